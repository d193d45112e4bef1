use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::entities::{
    MatchResult, MatchStatus, RoundStatus, tournament_match_entity as match_entity,
    tournament_round_entity as round_entity,
};
use crate::rules::scoring;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CreateRoundRequest {
    #[schema(example = 1)]
    pub round_number: i32,
    #[serde(default)]
    pub start_datetime: Option<DateTime<Utc>>,
    #[serde(default)]
    pub end_datetime: Option<DateTime<Utc>>,
    /// Defaults to scheduled
    #[serde(default)]
    pub status: Option<RoundStatus>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UpdateRoundStatusRequest {
    pub status: RoundStatus,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct RoundResponse {
    pub id: i64,
    pub event_id: i64,
    pub round_number: i32,
    pub start_datetime: Option<DateTime<Utc>>,
    pub end_datetime: Option<DateTime<Utc>>,
    pub status: RoundStatus,
}

impl From<round_entity::Model> for RoundResponse {
    fn from(m: round_entity::Model) -> Self {
        RoundResponse {
            id: m.id,
            event_id: m.event_id,
            round_number: m.round_number,
            start_datetime: m.start_datetime,
            end_datetime: m.end_datetime,
            status: m.status,
        }
    }
}

/// Round with its pairings. `all_matches_resolved` is informational; the round
/// status stays whatever the organiser last set.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct RoundSummaryResponse {
    pub round: RoundResponse,
    pub matches: Vec<MatchResponse>,
    pub all_matches_resolved: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CreateMatchRequest {
    pub white_player_id: i64,
    pub black_player_id: i64,
    #[serde(default)]
    pub board_number: Option<i32>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UpdateMatchStatusRequest {
    pub status: MatchStatus,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SetMatchResultRequest {
    /// One of `1-0`, `0-1`, `1/2-1/2`, `*`
    #[schema(value_type = String, example = "1-0")]
    pub result: MatchResult,
}

/// Match with points derived from its result
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct MatchResponse {
    pub id: i64,
    pub round_id: i64,
    pub board_number: Option<i32>,
    pub white_player_id: i64,
    pub black_player_id: i64,
    pub result: Option<MatchResult>,
    pub status: MatchStatus,
    pub white_points: Option<f64>,
    pub black_points: Option<f64>,
}

impl From<match_entity::Model> for MatchResponse {
    fn from(m: match_entity::Model) -> Self {
        let (white_points, black_points) = scoring::match_points(&m);
        MatchResponse {
            id: m.id,
            round_id: m.round_id,
            board_number: m.board_number,
            white_player_id: m.white_player_id,
            black_player_id: m.black_player_id,
            result: m.result,
            status: m.status,
            white_points,
            black_points,
        }
    }
}
