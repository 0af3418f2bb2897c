use axum::{
    extract::{Path, State},
    Json,
};

use crate::database::parse_id;
use crate::errors::AppResult;
use crate::models::{Event, EventCreateRequest, EventUpdateRequest};
use crate::web::{extractors::JsonBody, AppState, CreatedResponse, OkResponse};

pub async fn list_events(State(state): State<AppState>) -> AppResult<Json<Vec<Event>>> {
    Ok(Json(state.database.list_events().await?))
}

pub async fn create_event(
    State(state): State<AppState>,
    JsonBody(request): JsonBody<EventCreateRequest>,
) -> AppResult<Json<CreatedResponse>> {
    let event = request.validate()?;
    let id = state.database.create_event(&event).await?;
    Ok(Json(CreatedResponse { id }))
}

pub async fn update_event(
    State(state): State<AppState>,
    Path(id): Path<String>,
    JsonBody(update): JsonBody<EventUpdateRequest>,
) -> AppResult<Json<OkResponse>> {
    if let Some(id) = parse_id(&id) {
        state.database.update_event(id, &update).await?;
    }
    Ok(Json(OkResponse::ok()))
}

/// Removes the event together with all of its event streams
pub async fn delete_event(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<OkResponse>> {
    if let Some(id) = parse_id(&id) {
        state.database.delete_event(id).await?;
    }
    Ok(Json(OkResponse::ok()))
}
