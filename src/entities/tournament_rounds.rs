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
pub enum RoundStatus {
    #[sea_orm(string_value = "scheduled")]
    Scheduled,
    #[sea_orm(string_value = "in-progress")]
    InProgress,
    #[sea_orm(string_value = "completed")]
    Completed,
}

impl std::fmt::Display for RoundStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RoundStatus::Scheduled => write!(f, "scheduled"),
            RoundStatus::InProgress => write!(f, "in-progress"),
            RoundStatus::Completed => write!(f, "completed"),
        }
    }
}

/// A numbered stage of a tournament event. Status is set directly by the
/// organiser and is never derived from the round's matches.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq)]
#[sea_orm(table_name = "tournament_rounds")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub event_id: i64,
    pub round_number: i32,
    pub start_datetime: Option<DateTime<Utc>>,
    pub end_datetime: Option<DateTime<Utc>>,
    pub status: RoundStatus,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl Model {
    pub fn is_scheduled(&self) -> bool {
        self.status == RoundStatus::Scheduled
    }

    pub fn is_in_progress(&self) -> bool {
        self.status == RoundStatus::InProgress
    }

    pub fn is_completed(&self) -> bool {
        self.status == RoundStatus::Completed
    }
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::tournament_matches::Entity")]
    TournamentMatches,
}

impl Related<super::tournament_matches::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::TournamentMatches.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
