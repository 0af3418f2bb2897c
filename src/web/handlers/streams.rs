//! Channel streams and event streams
//!
//! Both families share the same request bodies and queries; the route
//! decides which [`StreamOwner`] table is touched.

use axum::{
    extract::{Path, State},
    Json,
};

use crate::database::{parse_id, StreamOwner};
use crate::errors::{AppError, AppResult};
use crate::models::{EventStream, Stream, StreamCreateRequest, StreamUpdateRequest};
use crate::web::{extractors::JsonBody, AppState, CreatedResponse, OkResponse};

async fn create(
    state: &AppState,
    owner: StreamOwner,
    owner_id: &str,
    request: StreamCreateRequest,
) -> AppResult<CreatedResponse> {
    let owner_id = parse_id(owner_id).ok_or_else(|| match owner {
        StreamOwner::Channel => AppError::validation("invalid channel id"),
        StreamOwner::Event => AppError::validation("invalid event id"),
    })?;
    let stream = request.validate()?;
    let id = state.database.create_stream(owner, owner_id, &stream).await?;
    Ok(CreatedResponse { id })
}

async fn update(
    state: &AppState,
    owner: StreamOwner,
    id: &str,
    update: StreamUpdateRequest,
) -> AppResult<OkResponse> {
    if let Some(id) = parse_id(id) {
        state.database.update_stream(owner, id, &update).await?;
    }
    Ok(OkResponse::ok())
}

async fn delete(state: &AppState, owner: StreamOwner, id: &str) -> AppResult<OkResponse> {
    if let Some(id) = parse_id(id) {
        state.database.delete_stream(owner, id).await?;
    }
    Ok(OkResponse::ok())
}

pub async fn list_channel_streams(
    State(state): State<AppState>,
    Path(channel_id): Path<String>,
) -> AppResult<Json<Vec<Stream>>> {
    let streams: Vec<Stream> = match parse_id(&channel_id) {
        Some(channel_id) => state
            .database
            .list_streams(StreamOwner::Channel, channel_id)
            .await?
            .into_iter()
            .map(Stream::from)
            .collect(),
        None => Vec::new(),
    };
    Ok(Json(streams))
}

pub async fn create_channel_stream(
    State(state): State<AppState>,
    Path(channel_id): Path<String>,
    JsonBody(request): JsonBody<StreamCreateRequest>,
) -> AppResult<Json<CreatedResponse>> {
    Ok(Json(
        create(&state, StreamOwner::Channel, &channel_id, request).await?,
    ))
}

pub async fn update_channel_stream(
    State(state): State<AppState>,
    Path(id): Path<String>,
    JsonBody(request): JsonBody<StreamUpdateRequest>,
) -> AppResult<Json<OkResponse>> {
    Ok(Json(update(&state, StreamOwner::Channel, &id, request).await?))
}

pub async fn delete_channel_stream(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<OkResponse>> {
    Ok(Json(delete(&state, StreamOwner::Channel, &id).await?))
}

pub async fn list_event_streams(
    State(state): State<AppState>,
    Path(event_id): Path<String>,
) -> AppResult<Json<Vec<EventStream>>> {
    let streams: Vec<EventStream> = match parse_id(&event_id) {
        Some(event_id) => state
            .database
            .list_streams(StreamOwner::Event, event_id)
            .await?
            .into_iter()
            .map(EventStream::from)
            .collect(),
        None => Vec::new(),
    };
    Ok(Json(streams))
}

pub async fn create_event_stream(
    State(state): State<AppState>,
    Path(event_id): Path<String>,
    JsonBody(request): JsonBody<StreamCreateRequest>,
) -> AppResult<Json<CreatedResponse>> {
    Ok(Json(
        create(&state, StreamOwner::Event, &event_id, request).await?,
    ))
}

pub async fn update_event_stream(
    State(state): State<AppState>,
    Path(id): Path<String>,
    JsonBody(request): JsonBody<StreamUpdateRequest>,
) -> AppResult<Json<OkResponse>> {
    Ok(Json(update(&state, StreamOwner::Event, &id, request).await?))
}

pub async fn delete_event_stream(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<OkResponse>> {
    Ok(Json(delete(&state, StreamOwner::Event, &id).await?))
}
