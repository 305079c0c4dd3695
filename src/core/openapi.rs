use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::core::config::SwaggerConfig;
use crate::features::ads::{dtos as ad_dtos, handlers as ad_handlers};
use crate::features::categories::{dtos as category_dtos, handlers as category_handlers};
use crate::features::locations::{dtos as location_dtos, handlers as location_handlers};
use crate::features::selections::{dtos as selection_dtos, handlers as selection_handlers};
use crate::shared::types::{Page, StatusResponse};

#[derive(OpenApi)]
#[openapi(
    paths(
        // Categories
        category_handlers::list_categories,
        category_handlers::create_category,
        category_handlers::get_category,
        category_handlers::update_category,
        category_handlers::delete_category,
        // Ads
        ad_handlers::list_ads,
        ad_handlers::create_ad,
        ad_handlers::get_ad,
        ad_handlers::update_ad,
        ad_handlers::delete_ad,
        ad_handlers::upload_ad_image,
        // Locations
        location_handlers::list_locations,
        location_handlers::create_location,
        location_handlers::get_location,
        location_handlers::update_location,
        location_handlers::delete_location,
        // Selections
        selection_handlers::list_selections,
        selection_handlers::create_selection,
        selection_handlers::get_selection,
        selection_handlers::update_selection,
        selection_handlers::delete_selection,
    ),
    components(schemas(
        StatusResponse,
        Page<category_dtos::CategoryResponseDto>,
        Page<ad_dtos::AdListItemDto>,
        Page<location_dtos::LocationResponseDto>,
        Page<selection_dtos::SelectionListItemDto>,
        category_dtos::CategoryResponseDto,
        category_dtos::CreateCategoryDto,
        category_dtos::UpdateCategoryDto,
        ad_dtos::AdListItemDto,
        ad_dtos::AdDetailDto,
        ad_dtos::AdRepresentationDto,
        ad_dtos::CreateAdDto,
        ad_dtos::UpdateAdDto,
        ad_dtos::UploadAdImageDto,
        location_dtos::LocationResponseDto,
        location_dtos::CreateLocationDto,
        location_dtos::UpdateLocationDto,
        selection_dtos::SelectionListItemDto,
        selection_dtos::SelectionResponseDto,
        selection_dtos::SelectionDetailDto,
        selection_dtos::CreateSelectionDto,
        selection_dtos::UpdateSelectionDto,
    )),
    modifiers(&SecurityAddon),
    tags(
        (name = "categories", description = "Ad categories"),
        (name = "ads", description = "Classified ads"),
        (name = "locations", description = "Locations users associate with"),
        (name = "selections", description = "User-curated ad selections"),
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}

/// Applies the configured title/version/description to the generated doc.
pub struct SwaggerInfoModifier<'a>(pub &'a SwaggerConfig);

impl Modify for SwaggerInfoModifier<'_> {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        openapi.info.title = self.0.title.clone();
        openapi.info.version = self.0.version.clone();
        openapi.info.description = Some(self.0.description.clone());
    }
}
