mod selection_dto;

pub use selection_dto::{
    CreateSelectionDto, SelectionDetailDto, SelectionListItemDto, SelectionResponseDto,
    UpdateSelectionDto,
};
