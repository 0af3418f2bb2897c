use axum::{
    extract::{Path, State},
    Json,
};

use crate::database::parse_id;
use crate::errors::AppResult;
use crate::models::{Category, CategoryCreateRequest, CategoryUpdateRequest};
use crate::web::{extractors::JsonBody, AppState, CreatedResponse, OkResponse};

pub async fn list_categories(State(state): State<AppState>) -> AppResult<Json<Vec<Category>>> {
    Ok(Json(state.database.list_categories().await?))
}

pub async fn create_category(
    State(state): State<AppState>,
    JsonBody(request): JsonBody<CategoryCreateRequest>,
) -> AppResult<Json<CreatedResponse>> {
    let category = request.validate()?;
    let id = state.database.create_category(&category).await?;
    Ok(Json(CreatedResponse { id }))
}

pub async fn update_category(
    State(state): State<AppState>,
    Path(id): Path<String>,
    JsonBody(update): JsonBody<CategoryUpdateRequest>,
) -> AppResult<Json<OkResponse>> {
    if let Some(id) = parse_id(&id) {
        state.database.update_category(id, &update).await?;
    }
    Ok(Json(OkResponse::ok()))
}

pub async fn delete_category(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<OkResponse>> {
    if let Some(id) = parse_id(&id) {
        state.database.delete_category(id).await?;
    }
    Ok(Json(OkResponse::ok()))
}
