use axum::{
    extract::{Path, State},
    Json,
};

use crate::database::parse_id;
use crate::errors::{AppError, AppResult};
use crate::models::{Channel, ChannelCreateRequest, ChannelUpdateRequest};
use crate::web::{extractors::JsonBody, AppState, CreatedResponse, OkResponse};

/// Channels of a category; an unknown category simply has none
pub async fn list_channels(
    State(state): State<AppState>,
    Path(category_id): Path<String>,
) -> AppResult<Json<Vec<Channel>>> {
    let channels = match parse_id(&category_id) {
        Some(category_id) => state.database.list_channels(category_id).await?,
        None => Vec::new(),
    };
    Ok(Json(channels))
}

/// The category is not checked for existence
pub async fn create_channel(
    State(state): State<AppState>,
    Path(category_id): Path<String>,
    JsonBody(request): JsonBody<ChannelCreateRequest>,
) -> AppResult<Json<CreatedResponse>> {
    let category_id =
        parse_id(&category_id).ok_or_else(|| AppError::validation("invalid category id"))?;
    let channel = request.validate()?;
    let id = state.database.create_channel(category_id, &channel).await?;
    Ok(Json(CreatedResponse { id }))
}

pub async fn update_channel(
    State(state): State<AppState>,
    Path(id): Path<String>,
    JsonBody(update): JsonBody<ChannelUpdateRequest>,
) -> AppResult<Json<OkResponse>> {
    if let Some(id) = parse_id(&id) {
        state.database.update_channel(id, &update).await?;
    }
    Ok(Json(OkResponse::ok()))
}

pub async fn delete_channel(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<OkResponse>> {
    if let Some(id) = parse_id(&id) {
        state.database.delete_channel(id).await?;
    }
    Ok(Json(OkResponse::ok()))
}
