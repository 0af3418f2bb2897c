//! Public read API
//!
//! Each handler runs one query, reshapes the rows into the client contract
//! and returns the payload obfuscated (see [`crate::obfuscation`]). Unknown
//! or malformed ids produce an empty `data` list, never an error.

use axum::extract::{Path, State};

use crate::database::{parse_id, StreamOwner};
use crate::errors::AppResult;
use crate::models::{
    CategoryListEnvelope, DataEnvelope, PublicCategory, PublicChannel, PublicEvent, PublicStream,
};
use crate::web::{AppState, Obfuscated};

pub async fn categories(State(state): State<AppState>) -> AppResult<Obfuscated> {
    let data = state
        .database
        .list_public_categories()
        .await?
        .into_iter()
        .map(PublicCategory::from)
        .collect();

    state.obfuscate(&CategoryListEnvelope { vt: 0, data })
}

pub async fn category_channels(
    State(state): State<AppState>,
    Path(category_id): Path<String>,
) -> AppResult<Obfuscated> {
    let data: Vec<PublicChannel> = match parse_id(&category_id) {
        Some(category_id) => state
            .database
            .list_public_channels(category_id)
            .await?
            .into_iter()
            .map(PublicChannel::from)
            .collect(),
        None => Vec::new(),
    };

    state.obfuscate(&DataEnvelope::new(data))
}

pub async fn channel_streams(
    State(state): State<AppState>,
    Path(channel_id): Path<String>,
) -> AppResult<Obfuscated> {
    let data: Vec<PublicStream> = match parse_id(&channel_id) {
        Some(channel_id) => state
            .database
            .list_public_streams(StreamOwner::Channel, channel_id)
            .await?
            .into_iter()
            .map(|record| PublicStream::from_fields(record.fields, None))
            .collect(),
        None => Vec::new(),
    };

    state.obfuscate(&DataEnvelope::new(data))
}

pub async fn events(State(state): State<AppState>) -> AppResult<Obfuscated> {
    let data: Vec<PublicEvent> = state
        .database
        .list_public_events()
        .await?
        .into_iter()
        .map(PublicEvent::from)
        .collect();

    state.obfuscate(&DataEnvelope::new(data))
}

/// Streams of one event, each tagged with the event id
pub async fn event_streams(
    State(state): State<AppState>,
    Path(event_id): Path<String>,
) -> AppResult<Obfuscated> {
    let data: Vec<PublicStream> = match parse_id(&event_id) {
        Some(event_id) => state
            .database
            .list_public_streams(StreamOwner::Event, event_id)
            .await?
            .into_iter()
            .map(|record| PublicStream::from_fields(record.fields, Some(event_id)))
            .collect(),
        None => Vec::new(),
    };

    state.obfuscate(&DataEnvelope::new(data))
}
