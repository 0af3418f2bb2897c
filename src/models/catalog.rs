//! Categories, channels and their streams

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{flag, lenient_integer, non_empty, truthy, DEFAULT_URL_TYPE};
use crate::errors::{AppError, AppResult};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    pub id: i64,
    pub name: String,
    pub logo: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Channel {
    pub id: i64,
    pub category_id: i64,
    pub name: String,
    pub logo: String,
    pub is_hide: i64,
    pub priority: i64,
}

/// Playback fields shared by channel streams and event streams
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StreamFields {
    pub name: String,
    pub url: String,
    pub url_type: i64,
    pub user_agent: String,
    pub referer: String,
    /// JSON object stored as text
    pub headers: String,
    pub drm: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stream {
    pub id: i64,
    pub channel_id: i64,
    #[serde(flatten)]
    pub fields: StreamFields,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventStream {
    pub id: i64,
    pub event_id: i64,
    #[serde(flatten)]
    pub fields: StreamFields,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CategoryCreateRequest {
    pub name: Option<String>,
    pub logo: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CategoryUpdateRequest {
    pub name: Option<String>,
    pub logo: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewCategory {
    pub name: String,
    pub logo: String,
}

impl CategoryCreateRequest {
    pub fn validate(self) -> AppResult<NewCategory> {
        let name = non_empty(self.name).ok_or_else(|| AppError::validation("name required"))?;
        Ok(NewCategory {
            name,
            logo: self.logo.unwrap_or_default(),
        })
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ChannelCreateRequest {
    pub name: Option<String>,
    pub logo: Option<String>,
    pub is_hide: Option<Value>,
    #[serde(default, deserialize_with = "lenient_integer")]
    pub priority: Option<i64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ChannelUpdateRequest {
    pub name: Option<String>,
    pub logo: Option<String>,
    pub is_hide: Option<Value>,
    #[serde(default, deserialize_with = "lenient_integer")]
    pub priority: Option<i64>,
}

impl ChannelUpdateRequest {
    /// `is_hide` as a stored flag, `None` when the field was not sent
    pub fn is_hide_flag(&self) -> Option<i64> {
        self.is_hide
            .as_ref()
            .filter(|v| !v.is_null())
            .map(flag)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewChannel {
    pub name: String,
    pub logo: String,
    pub is_hide: i64,
    pub priority: i64,
}

impl ChannelCreateRequest {
    pub fn validate(self) -> AppResult<NewChannel> {
        let name = non_empty(self.name).ok_or_else(|| AppError::validation("name required"))?;
        Ok(NewChannel {
            name,
            logo: self.logo.unwrap_or_default(),
            is_hide: self.is_hide.as_ref().map(flag).unwrap_or(0),
            priority: self.priority.unwrap_or(0),
        })
    }
}

/// Compact JSON text for the `headers` column; falsy values store `{}`
fn headers_for_storage(value: &Value) -> AppResult<String> {
    if truthy(value) {
        Ok(serde_json::to_string(value)?)
    } else {
        Ok("{}".to_string())
    }
}

/// Body for creating a stream under a channel or an event
#[derive(Debug, Clone, Default, Deserialize)]
pub struct StreamCreateRequest {
    pub name: Option<String>,
    pub url: Option<String>,
    #[serde(default, deserialize_with = "lenient_integer")]
    pub url_type: Option<i64>,
    pub user_agent: Option<String>,
    pub referer: Option<String>,
    pub headers: Option<Value>,
    pub drm: Option<String>,
}

/// Body for partially updating a channel stream or an event stream
#[derive(Debug, Clone, Default, Deserialize)]
pub struct StreamUpdateRequest {
    pub name: Option<String>,
    pub url: Option<String>,
    #[serde(default, deserialize_with = "lenient_integer")]
    pub url_type: Option<i64>,
    pub user_agent: Option<String>,
    pub referer: Option<String>,
    pub headers: Option<Value>,
    pub drm: Option<String>,
}

impl StreamUpdateRequest {
    /// `headers` re-serialized for storage, `None` when not sent or `null`.
    /// Other falsy values (`""`, `false`, `0`) reset the column to `{}`.
    pub fn headers_text(&self) -> AppResult<Option<String>> {
        match &self.headers {
            None | Some(Value::Null) => Ok(None),
            Some(value) => Ok(Some(headers_for_storage(value)?)),
        }
    }
}

impl StreamCreateRequest {
    pub fn validate(self) -> AppResult<StreamFields> {
        let url = non_empty(self.url).ok_or_else(|| AppError::validation("url required"))?;
        let headers = match &self.headers {
            Some(value) => headers_for_storage(value)?,
            None => "{}".to_string(),
        };

        Ok(StreamFields {
            name: self.name.unwrap_or_default(),
            url,
            url_type: self
                .url_type
                .filter(|t| *t != 0)
                .unwrap_or(DEFAULT_URL_TYPE),
            user_agent: self.user_agent.unwrap_or_default(),
            referer: self.referer.unwrap_or_default(),
            headers,
            drm: non_empty(self.drm),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_category_requires_name() {
        let err = CategoryCreateRequest::default().validate().unwrap_err();
        assert_eq!(err.to_string(), "Validation error: name required");

        let empty = CategoryCreateRequest {
            name: Some(String::new()),
            logo: None,
        };
        assert!(empty.validate().is_err());
    }

    #[test]
    fn test_channel_defaults() {
        let request: ChannelCreateRequest = serde_json::from_value(json!({"name": "Sport 1"})).unwrap();
        let channel = request.validate().unwrap();
        assert_eq!(channel.logo, "");
        assert_eq!(channel.is_hide, 0);
        assert_eq!(channel.priority, 0);
    }

    #[test]
    fn test_channel_is_hide_is_coerced() {
        let request: ChannelCreateRequest =
            serde_json::from_value(json!({"name": "x", "is_hide": true})).unwrap();
        assert_eq!(request.validate().unwrap().is_hide, 1);

        let update: ChannelUpdateRequest = serde_json::from_value(json!({"is_hide": 5})).unwrap();
        assert_eq!(update.is_hide_flag(), Some(1));

        let update: ChannelUpdateRequest = serde_json::from_value(json!({"logo": "x"})).unwrap();
        assert_eq!(update.is_hide_flag(), None);
    }

    #[test]
    fn test_stream_defaults() {
        let request: StreamCreateRequest =
            serde_json::from_value(json!({"url": "https://cdn.example/live.m3u8", "url_type": 0, "drm": ""}))
                .unwrap();
        let fields = request.validate().unwrap();
        assert_eq!(fields.name, "");
        assert_eq!(fields.url_type, 3);
        assert_eq!(fields.headers, "{}");
        assert_eq!(fields.drm, None);
    }

    #[test]
    fn test_stream_headers_are_stored_as_json_text() {
        let request: StreamCreateRequest = serde_json::from_value(json!({
            "url": "https://cdn.example/live.mpd",
            "headers": {"Referer": "https://site.example", "X-Token": "abc"}
        }))
        .unwrap();
        let fields = request.validate().unwrap();
        assert_eq!(
            fields.headers,
            r#"{"Referer":"https://site.example","X-Token":"abc"}"#
        );
    }

    #[test]
    fn test_falsy_stream_headers_store_empty_object() {
        for headers in [json!(""), json!(false), json!(0), Value::Null] {
            let request: StreamCreateRequest =
                serde_json::from_value(json!({"url": "u", "headers": headers})).unwrap();
            assert_eq!(request.validate().unwrap().headers, "{}");
        }

        let update: StreamUpdateRequest = serde_json::from_value(json!({"headers": ""})).unwrap();
        assert_eq!(update.headers_text().unwrap().as_deref(), Some("{}"));
        let update: StreamUpdateRequest = serde_json::from_value(json!({"headers": null})).unwrap();
        assert_eq!(update.headers_text().unwrap(), None);
    }

    #[test]
    fn test_numeric_strings_are_accepted() {
        let channel: ChannelCreateRequest =
            serde_json::from_value(json!({"name": "x", "priority": "5"})).unwrap();
        assert_eq!(channel.validate().unwrap().priority, 5);

        let stream: StreamCreateRequest =
            serde_json::from_value(json!({"url": "u", "url_type": "2"})).unwrap();
        assert_eq!(stream.validate().unwrap().url_type, 2);

        let update: ChannelUpdateRequest =
            serde_json::from_value(json!({"priority": "not a number"})).unwrap();
        assert_eq!(update.priority, None);
    }

    #[test]
    fn test_stream_requires_url() {
        let err = StreamCreateRequest::default().validate().unwrap_err();
        assert_eq!(err.to_string(), "Validation error: url required");
    }

    #[test]
    fn test_stream_row_serializes_flat() {
        let stream = Stream {
            id: 4,
            channel_id: 2,
            fields: StreamFields {
                name: "HD".to_string(),
                url: "u".to_string(),
                url_type: 3,
                user_agent: String::new(),
                referer: String::new(),
                headers: "{}".to_string(),
                drm: None,
            },
        };
        assert_eq!(
            serde_json::to_string(&stream).unwrap(),
            r#"{"id":4,"channel_id":2,"name":"HD","url":"u","url_type":3,"user_agent":"","referer":"","headers":"{}","drm":null}"#
        );
    }
}
