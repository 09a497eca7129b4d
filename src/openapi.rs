use utoipa::OpenApi;

use crate::api::routes::{cat, health};
use crate::models::{CatCreateRequest, CatRepoModel};

/// OpenAPI document for the cat registry API.
#[derive(OpenApi)]
#[openapi(
    tags(
        (name = "Cats", description = "Cat record management endpoints"),
        (name = "Health", description = "Service liveness endpoint")
    ),
    info(
        description = "REST service managing a registry of cat records",
        version = "0.1.0",
        title = "Cat Registry API"
    ),
    paths(
        cat::list_cats,
        cat::list_cat_field,
        cat::list_cats_filtered,
        cat::list_cats_ordered,
        cat::create_cat,
        cat::update_cat,
        cat::toggle_hungry,
        cat::delete_fed,
        cat::delete_cat,
        health::health,
    ),
    components(schemas(CatRepoModel, CatCreateRequest))
)]
pub struct ApiDoc;
