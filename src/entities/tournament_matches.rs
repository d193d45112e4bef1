use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use sea_orm::{DeriveActiveEnum, EnumIter};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(
    Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, ToSchema, DeriveActiveEnum, EnumIter,
)]
#[sea_orm(rs_type = "String", db_type = "String(Some(20))")]
#[serde(rename_all = "kebab-case")]
pub enum MatchStatus {
    #[sea_orm(string_value = "scheduled")]
    Scheduled,
    #[sea_orm(string_value = "in-progress")]
    InProgress,
    #[sea_orm(string_value = "completed")]
    Completed,
    #[sea_orm(string_value = "cancelled")]
    Cancelled,
}

impl std::fmt::Display for MatchStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MatchStatus::Scheduled => write!(f, "scheduled"),
            MatchStatus::InProgress => write!(f, "in-progress"),
            MatchStatus::Completed => write!(f, "completed"),
            MatchStatus::Cancelled => write!(f, "cancelled"),
        }
    }
}

/// Result codes in PGN notation. `*` means the game has no result yet.
#[derive(
    Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, ToSchema, DeriveActiveEnum, EnumIter,
)]
#[sea_orm(rs_type = "String", db_type = "String(Some(10))")]
pub enum MatchResult {
    #[sea_orm(string_value = "1-0")]
    #[serde(rename = "1-0")]
    WhiteWins,
    #[sea_orm(string_value = "0-1")]
    #[serde(rename = "0-1")]
    BlackWins,
    #[sea_orm(string_value = "1/2-1/2")]
    #[serde(rename = "1/2-1/2")]
    Draw,
    #[sea_orm(string_value = "*")]
    #[serde(rename = "*")]
    Unresolved,
}

impl MatchResult {
    pub fn as_code(&self) -> &'static str {
        match self {
            MatchResult::WhiteWins => "1-0",
            MatchResult::BlackWins => "0-1",
            MatchResult::Draw => "1/2-1/2",
            MatchResult::Unresolved => "*",
        }
    }

    /// Parse a PGN result code; unknown codes yield `None`
    pub fn from_code(code: &str) -> Option<Self> {
        match code.trim() {
            "1-0" => Some(MatchResult::WhiteWins),
            "0-1" => Some(MatchResult::BlackWins),
            "1/2-1/2" => Some(MatchResult::Draw),
            "*" => Some(MatchResult::Unresolved),
            _ => None,
        }
    }
}

impl std::fmt::Display for MatchResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_code())
    }
}

/// A single game between two players within a round.
/// `result` is only ever stored while `status` is completed.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq)]
#[sea_orm(table_name = "tournament_matches")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub round_id: i64,
    pub board_number: Option<i32>,
    pub white_player_id: i64,
    pub black_player_id: i64,
    pub result: Option<MatchResult>,
    pub status: MatchStatus,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl Model {
    pub fn is_scheduled(&self) -> bool {
        self.status == MatchStatus::Scheduled
    }

    pub fn is_in_progress(&self) -> bool {
        self.status == MatchStatus::InProgress
    }

    pub fn is_completed(&self) -> bool {
        self.status == MatchStatus::Completed
    }

    pub fn is_cancelled(&self) -> bool {
        self.status == MatchStatus::Cancelled
    }

    /// Completed or cancelled; nothing more will happen on this board
    pub fn is_resolved(&self) -> bool {
        self.is_completed() || self.is_cancelled()
    }
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::tournament_rounds::Entity",
        from = "Column::RoundId",
        to = "super::tournament_rounds::Column::Id"
    )]
    TournamentRound,
}

impl Related<super::tournament_rounds::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::TournamentRound.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
