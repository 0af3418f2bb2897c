//! Shapes served by the public read API
//!
//! Field order matters: the payload is obfuscated byte-for-byte, so structs
//! serialize in the order existing clients expect.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{non_empty, parse_headers, Category, Channel, Event, StreamFields};
use super::{DEFAULT_URL_TYPE, DEFAULT_USER_AGENT};

/// `/api/categories` envelope
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryListEnvelope {
    pub vt: i64,
    pub data: Vec<PublicCategory>,
}

/// Envelope used by every other public endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataEnvelope<T> {
    pub data: Vec<T>,
}

impl<T> DataEnvelope<T> {
    pub fn new(data: Vec<T>) -> Self {
        Self { data }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PublicCategory {
    pub id: i64,
    pub name: String,
    pub logo: String,
    pub child_count: i64,
}

impl From<Category> for PublicCategory {
    fn from(category: Category) -> Self {
        Self {
            id: category.id,
            name: category.name,
            logo: category.logo,
            child_count: 0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PublicChannel {
    pub id: i64,
    pub name: String,
    pub logo: String,
    pub is_hide: i64,
    pub priority: i64,
}

impl From<Channel> for PublicChannel {
    fn from(channel: Channel) -> Self {
        Self {
            id: channel.id,
            name: channel.name,
            logo: channel.logo,
            is_hide: channel.is_hide,
            priority: channel.priority,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PublicStream {
    pub name: String,
    pub url: String,
    pub url_type: i64,
    pub user_agent: String,
    pub referer: String,
    /// Owning event id for event streams, `null` for channel streams
    pub event_channel_id: Option<i64>,
    pub headers: Value,
    pub drm: Option<String>,
}

impl PublicStream {
    pub fn from_fields(fields: StreamFields, event_channel_id: Option<i64>) -> Self {
        Self {
            name: fields.name,
            url: fields.url,
            url_type: if fields.url_type == 0 {
                DEFAULT_URL_TYPE
            } else {
                fields.url_type
            },
            user_agent: non_empty(Some(fields.user_agent))
                .unwrap_or_else(|| DEFAULT_USER_AGENT.to_string()),
            referer: fields.referer,
            event_channel_id,
            headers: parse_headers(Some(&fields.headers)),
            drm: non_empty(fields.drm),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Team {
    pub name: String,
    pub logo: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PublicEvent {
    pub id: i64,
    pub start_time: i64,
    pub end_time: i64,
    pub champions: String,
    pub commentary: String,
    pub team_1: Team,
    pub team_2: Team,
    pub channel: String,
}

impl From<Event> for PublicEvent {
    fn from(event: Event) -> Self {
        Self {
            id: event.id,
            start_time: event.start_time,
            end_time: event.end_time,
            champions: event.champions,
            commentary: event.commentary,
            team_1: Team {
                name: event.team1_name,
                logo: event.team1_logo,
            },
            team_2: Team {
                name: event.team2_name,
                logo: event.team2_logo,
            },
            channel: event.channel,
        }
    }
}
