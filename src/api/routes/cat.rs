//! HTTP routes for cat record operations: listing, projection, filtering,
//! ordering, creation, update, hunger toggle, and deletion. Handlers are
//! thin bindings onto the cat controller.

use actix_web::{delete, get, post, put, web, Responder};
use serde_json::Value;

use crate::api::controllers::cat;
use crate::models::{AppState, CatCreateRequest, CatRepoModel, FilterParams, OrderParams};

/// Lists every cat record in store-default order.
#[utoipa::path(
    get,
    path = "/cats",
    tag = "Cats",
    operation_id = "listCats",
    responses(
        (status = 200, description = "All cat records", body = Vec<CatRepoModel>),
        (status = 500, description = "Store failure"),
    )
)]
#[get("/cats")]
pub async fn list_cats(data: web::ThinData<AppState>) -> impl Responder {
    cat::list_cats(data).await
}

/// Projects a single attribute across all records.
#[utoipa::path(
    get,
    path = "/cats/fields/{field}",
    tag = "Cats",
    operation_id = "listCatField",
    params(("field" = String, Path, description = "Attribute to project; unknown attributes yield nulls")),
    responses(
        (status = 200, description = "One value per record, identifiers excluded"),
        (status = 500, description = "Store failure"),
    )
)]
#[get("/cats/fields/{field}")]
pub async fn list_cat_field(
    field: web::Path<String>,
    data: web::ThinData<AppState>,
) -> impl Responder {
    cat::list_cat_field(field.into_inner(), data).await
}

/// Lists records matching the conjunction of the given filters.
#[utoipa::path(
    get,
    path = "/cats/filtered",
    tag = "Cats",
    operation_id = "listCatsFiltered",
    params(FilterParams),
    responses(
        (status = 200, description = "Matching cat records", body = Vec<CatRepoModel>),
        (status = 500, description = "Store failure or unusable filter value"),
    )
)]
#[get("/cats/filtered")]
pub async fn list_cats_filtered(
    query: web::Query<FilterParams>,
    data: web::ThinData<AppState>,
) -> impl Responder {
    cat::list_cats_filtered(query.into_inner(), data).await
}

/// Lists records sorted by a named field.
#[utoipa::path(
    get,
    path = "/cats/ordered",
    tag = "Cats",
    operation_id = "listCatsOrdered",
    params(OrderParams),
    responses(
        (status = 200, description = "Sorted cat records", body = Vec<CatRepoModel>),
        (status = 500, description = "Store failure or unrecognized direction token"),
    )
)]
#[get("/cats/ordered")]
pub async fn list_cats_ordered(
    query: web::Query<OrderParams>,
    data: web::ThinData<AppState>,
) -> impl Responder {
    cat::list_cats_ordered(query.into_inner(), data).await
}

/// Creates a new cat record from the request body.
#[utoipa::path(
    post,
    path = "/cats",
    tag = "Cats",
    operation_id = "createCat",
    request_body = CatCreateRequest,
    responses(
        (status = 201, description = "Created record including assigned id", body = CatRepoModel),
        (status = 500, description = "Store failure or unusable record shape"),
    )
)]
#[post("/cats")]
pub async fn create_cat(
    body: web::Json<Value>,
    data: web::ThinData<AppState>,
) -> impl Responder {
    cat::create_cat(body.into_inner(), data).await
}

/// Replaces the given attributes on an existing record.
#[utoipa::path(
    put,
    path = "/cats/{id}",
    tag = "Cats",
    operation_id = "updateCat",
    params(("id" = String, Path, description = "Record identifier")),
    request_body = CatCreateRequest,
    responses(
        (status = 200, description = "Post-update record", body = CatRepoModel),
        (status = 404, description = "No record with that id"),
        (status = 500, description = "Store failure"),
    )
)]
#[put("/cats/{id}")]
pub async fn update_cat(
    id: web::Path<String>,
    body: web::Json<Value>,
    data: web::ThinData<AppState>,
) -> impl Responder {
    cat::update_cat(id.into_inner(), body.into_inner(), data).await
}

/// Flips the record's hunger flag; an unset flag toggles to true.
#[utoipa::path(
    put,
    path = "/cats/{id}/toggleHungry",
    tag = "Cats",
    operation_id = "toggleHungry",
    params(("id" = String, Path, description = "Record identifier")),
    responses(
        (status = 200, description = "Record with the flag flipped", body = CatRepoModel),
        (status = 404, description = "No record with that id"),
        (status = 500, description = "Store failure"),
    )
)]
#[put("/cats/{id}/toggleHungry")]
pub async fn toggle_hungry(
    id: web::Path<String>,
    data: web::ThinData<AppState>,
) -> impl Responder {
    cat::toggle_hungry(id.into_inner(), data).await
}

/// Removes every record whose hunger flag is exactly false.
#[utoipa::path(
    delete,
    path = "/cats/fed",
    tag = "Cats",
    operation_id = "deleteFed",
    responses(
        (status = 204, description = "Fed records removed (zero matches included)"),
        (status = 500, description = "Store failure"),
    )
)]
#[delete("/cats/fed")]
pub async fn delete_fed(data: web::ThinData<AppState>) -> impl Responder {
    cat::delete_fed(data).await
}

/// Removes a single record by id.
#[utoipa::path(
    delete,
    path = "/cats/{id}",
    tag = "Cats",
    operation_id = "deleteCat",
    params(("id" = String, Path, description = "Record identifier")),
    responses(
        (status = 200, description = "The removed record's pre-deletion state", body = CatRepoModel),
        (status = 404, description = "No record with that id"),
        (status = 500, description = "Store failure"),
    )
)]
#[delete("/cats/{id}")]
pub async fn delete_cat(id: web::Path<String>, data: web::ThinData<AppState>) -> impl Responder {
    cat::delete_cat(id.into_inner(), data).await
}

/// Registers the cat routes. `/cats/fed` is registered ahead of
/// `/cats/{id}` so the static segment wins.
pub fn init(cfg: &mut web::ServiceConfig) {
    cfg.service(list_cats);
    cfg.service(list_cat_field);
    cfg.service(list_cats_filtered);
    cfg.service(list_cats_ordered);
    cfg.service(create_cat);
    cfg.service(update_cat);
    cfg.service(toggle_hungry);
    cfg.service(delete_fed);
    cfg.service(delete_cat);
}
