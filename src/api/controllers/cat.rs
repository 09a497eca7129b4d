//! # Cat Controller
//!
//! Maps store outcomes to HTTP responses for every cat operation:
//! - listing, projection, filtering, and ordering
//! - creation, update, and the hunger toggle
//! - single and bulk deletion
//!
//! Each handler is stateless and single-shot: translate the request, execute
//! one store call, map the outcome. Missing targets become 404 and store
//! failures become 500, both with empty bodies, via [`ApiError`].

use actix_web::{web, HttpResponse};
use log::info;
use serde_json::Value;

use crate::models::{
    project_field, CatCreateRequest, CatFilter, FilterParams, OrderParams, SortSpec,
};
use crate::repositories::CatRepositoryTrait;
use crate::{ApiError, AppState};

type CatResult = Result<HttpResponse, ApiError>;

/// GET /cats: every record, store-default order.
pub async fn list_cats(state: web::ThinData<AppState>) -> CatResult {
    let cats = state
        .cat_repository
        .find(&CatFilter::default(), None)
        .await?;
    Ok(HttpResponse::Ok().json(cats))
}

/// GET /cats/fields/{field}: one value per record for the named attribute,
/// identifier excluded. Unknown attributes project nulls rather than
/// failing.
pub async fn list_cat_field(field: String, state: web::ThinData<AppState>) -> CatResult {
    let cats = state
        .cat_repository
        .find(&CatFilter::default(), None)
        .await?;
    let values = project_field(&cats, &field);
    Ok(HttpResponse::Ok().json(values))
}

/// GET /cats/filtered: conjunction of the provided conditions.
pub async fn list_cats_filtered(
    params: FilterParams,
    state: web::ThinData<AppState>,
) -> CatResult {
    let filter = CatFilter::try_from(params)?;
    let cats = state.cat_repository.find(&filter, None).await?;
    Ok(HttpResponse::Ok().json(cats))
}

/// GET /cats/ordered: sorted by the `by` field in the given direction.
pub async fn list_cats_ordered(params: OrderParams, state: web::ThinData<AppState>) -> CatResult {
    let sort = SortSpec::from_params(params)?;
    let cats = state
        .cat_repository
        .find(&CatFilter::default(), sort.as_ref())
        .await?;
    Ok(HttpResponse::Ok().json(cats))
}

/// POST /cats: insert the body as a new record; the store assigns the id.
pub async fn create_cat(body: Value, state: web::ThinData<AppState>) -> CatResult {
    let request = CatCreateRequest::from_json(body)?;
    let cat = state.cat_repository.insert(request).await?;
    info!("Created cat {}", cat.id);
    Ok(HttpResponse::Created().json(cat))
}

/// PUT /cats/{id}: replace the given attributes on the record.
pub async fn update_cat(id: String, body: Value, state: web::ThinData<AppState>) -> CatResult {
    let fields = match body {
        Value::Object(map) => map,
        other => {
            return Err(ApiError::InternalError(format!(
                "Update body must be an object, got {}",
                other
            )))
        }
    };
    let cat = state.cat_repository.find_by_id_and_update(&id, fields).await?;
    Ok(HttpResponse::Ok().json(cat))
}

/// PUT /cats/{id}/toggleHungry: atomically flip the hunger flag, treating
/// unset as false.
pub async fn toggle_hungry(id: String, state: web::ThinData<AppState>) -> CatResult {
    let cat = state.cat_repository.find_by_id_and_toggle_hungry(&id).await?;
    Ok(HttpResponse::Ok().json(cat))
}

/// DELETE /cats/fed: remove every record whose hunger flag is exactly
/// false. 204 regardless of how many matched.
pub async fn delete_fed(state: web::ThinData<AppState>) -> CatResult {
    let removed = state.cat_repository.delete_many(&CatFilter::fed()).await?;
    info!("Removed {} fed cats", removed);
    Ok(HttpResponse::NoContent().finish())
}

/// DELETE /cats/{id}: remove the record, returning its pre-deletion state.
pub async fn delete_cat(id: String, state: web::ThinData<AppState>) -> CatResult {
    let cat = state.cat_repository.find_by_id_and_delete(&id).await?;
    Ok(HttpResponse::Ok().json(cat))
}
