mod ad_dto;

pub use ad_dto::{
    AdDetailDto, AdListItemDto, AdListQuery, AdRepresentationDto, CreateAdDto, UpdateAdDto,
    UploadAdImageDto, ALLOWED_IMAGE_MIME_TYPES, MAX_IMAGE_SIZE,
};
