//! Scheduled events

use serde::{Deserialize, Serialize};

use super::{lenient_integer, non_empty};
use crate::errors::{AppError, AppResult};

/// Event row; team columns are stored flattened
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    pub id: i64,
    pub start_time: i64,
    pub end_time: i64,
    pub champions: String,
    pub commentary: String,
    pub team1_name: String,
    pub team1_logo: String,
    pub team2_name: String,
    pub team2_logo: String,
    pub channel: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct TeamInput {
    pub name: Option<String>,
    pub logo: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct EventCreateRequest {
    #[serde(default, deserialize_with = "lenient_integer")]
    pub start_time: Option<i64>,
    #[serde(default, deserialize_with = "lenient_integer")]
    pub end_time: Option<i64>,
    pub champions: Option<String>,
    pub commentary: Option<String>,
    pub team_1: Option<TeamInput>,
    pub team_2: Option<TeamInput>,
    pub channel: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct EventUpdateRequest {
    #[serde(default, deserialize_with = "lenient_integer")]
    pub start_time: Option<i64>,
    #[serde(default, deserialize_with = "lenient_integer")]
    pub end_time: Option<i64>,
    pub champions: Option<String>,
    pub commentary: Option<String>,
    pub team_1: Option<TeamInput>,
    pub team_2: Option<TeamInput>,
    pub channel: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewEvent {
    pub start_time: i64,
    pub end_time: i64,
    pub champions: String,
    pub commentary: String,
    pub team1_name: String,
    pub team1_logo: String,
    pub team2_name: String,
    pub team2_logo: String,
    pub channel: String,
}

impl EventCreateRequest {
    pub fn validate(self) -> AppResult<NewEvent> {
        let missing = || AppError::validation("missing required fields");

        let start_time = self.start_time.filter(|t| *t != 0).ok_or_else(missing)?;
        let end_time = self.end_time.filter(|t| *t != 0).ok_or_else(missing)?;
        let team_1 = self.team_1.unwrap_or_default();
        let team_2 = self.team_2.unwrap_or_default();
        let team1_name = non_empty(team_1.name).ok_or_else(missing)?;
        let team2_name = non_empty(team_2.name).ok_or_else(missing)?;

        Ok(NewEvent {
            start_time,
            end_time,
            champions: self.champions.unwrap_or_default(),
            commentary: self.commentary.unwrap_or_default(),
            team1_name,
            team1_logo: team_1.logo.unwrap_or_default(),
            team2_name,
            team2_logo: team_2.logo.unwrap_or_default(),
            channel: self.channel.unwrap_or_default(),
        })
    }
}
