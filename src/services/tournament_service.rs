use crate::entities::{
    MatchResult, MatchStatus, RoundStatus, tournament_match_entity as matches,
    tournament_round_entity as rounds,
};
use crate::error::{AppError, AppResult};
use crate::models::*;
use crate::rules::scoring;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, IntoActiveModel, QueryFilter,
    QueryOrder, Set,
};

#[derive(Clone)]
pub struct TournamentService {
    pool: DatabaseConnection,
}

impl TournamentService {
    pub fn new(pool: DatabaseConnection) -> Self {
        Self { pool }
    }

    pub async fn create_round(
        &self,
        event_id: i64,
        request: CreateRoundRequest,
    ) -> AppResult<RoundResponse> {
        if request.round_number < 1 {
            return Err(AppError::ValidationError(
                "Round number must be at least 1".to_string(),
            ));
        }
        if let (Some(start), Some(end)) = (request.start_datetime, request.end_datetime)
            && end < start
        {
            return Err(AppError::ValidationError(
                "Round cannot end before it starts".to_string(),
            ));
        }

        let existing = rounds::Entity::find()
            .filter(rounds::Column::EventId.eq(event_id))
            .filter(rounds::Column::RoundNumber.eq(request.round_number))
            .one(&self.pool)
            .await?;
        if existing.is_some() {
            return Err(AppError::ValidationError(format!(
                "Round {} already exists for event {}",
                request.round_number, event_id
            )));
        }

        let now = Utc::now();
        let round = rounds::ActiveModel {
            event_id: Set(event_id),
            round_number: Set(request.round_number),
            start_datetime: Set(request.start_datetime),
            end_datetime: Set(request.end_datetime),
            status: Set(request.status.unwrap_or(RoundStatus::Scheduled)),
            created_at: Set(Some(now)),
            updated_at: Set(Some(now)),
            ..Default::default()
        }
        .insert(&self.pool)
        .await?;

        log::info!(
            "Round {} created for event {} (id {})",
            round.round_number,
            round.event_id,
            round.id
        );

        Ok(round.into())
    }

    /// Direct status assignment; any transition is allowed
    pub async fn set_round_status(
        &self,
        round_id: i64,
        status: RoundStatus,
    ) -> AppResult<RoundResponse> {
        let round = self.find_round(round_id).await?;

        let mut active = round.into_active_model();
        active.status = Set(status);
        active.updated_at = Set(Some(Utc::now()));
        let round = active.update(&self.pool).await?;

        log::info!("Round {} status set to {}", round.id, round.status);
        Ok(round.into())
    }

    /// Round with its matches ordered by board
    pub async fn get_round_summary(&self, round_id: i64) -> AppResult<RoundSummaryResponse> {
        let round = self.find_round(round_id).await?;

        let list = matches::Entity::find()
            .filter(matches::Column::RoundId.eq(round.id))
            .order_by_asc(matches::Column::BoardNumber)
            .order_by_asc(matches::Column::Id)
            .all(&self.pool)
            .await?;

        let all_matches_resolved = scoring::all_matches_resolved(&list);

        Ok(RoundSummaryResponse {
            round: round.into(),
            matches: list.into_iter().map(MatchResponse::from).collect(),
            all_matches_resolved,
        })
    }

    pub async fn create_match(
        &self,
        round_id: i64,
        request: CreateMatchRequest,
    ) -> AppResult<MatchResponse> {
        if request.white_player_id == request.black_player_id {
            return Err(AppError::ValidationError(
                "A player cannot play against themselves".to_string(),
            ));
        }
        if request.board_number.is_some_and(|b| b < 1) {
            return Err(AppError::ValidationError(
                "Board number must be at least 1".to_string(),
            ));
        }

        let round = self.find_round(round_id).await?;

        let now = Utc::now();
        let game = matches::ActiveModel {
            round_id: Set(round.id),
            board_number: Set(request.board_number),
            white_player_id: Set(request.white_player_id),
            black_player_id: Set(request.black_player_id),
            result: Set(None),
            status: Set(MatchStatus::Scheduled),
            created_at: Set(Some(now)),
            updated_at: Set(Some(now)),
            ..Default::default()
        }
        .insert(&self.pool)
        .await?;

        Ok(game.into())
    }

    pub async fn get_match(&self, match_id: i64) -> AppResult<MatchResponse> {
        Ok(self.find_match(match_id).await?.into())
    }

    pub async fn set_match_status(
        &self,
        match_id: i64,
        status: MatchStatus,
    ) -> AppResult<MatchResponse> {
        let game = self.find_match(match_id).await?;
        let mut updated = game.clone();
        scoring::set_status(&mut updated, status)?;
        self.save_match(game, updated).await
    }

    pub async fn set_match_result(
        &self,
        match_id: i64,
        result: MatchResult,
    ) -> AppResult<MatchResponse> {
        let game = self.find_match(match_id).await?;
        let mut updated = game.clone();
        scoring::set_result(&mut updated, result)?;

        log::info!("Match {} result recorded: {}", game.id, result);
        self.save_match(game, updated).await
    }

    pub async fn clear_match_result(&self, match_id: i64) -> AppResult<MatchResponse> {
        let game = self.find_match(match_id).await?;
        let mut updated = game.clone();
        scoring::clear_result(&mut updated);
        self.save_match(game, updated).await
    }

    async fn find_round(&self, round_id: i64) -> AppResult<rounds::Model> {
        rounds::Entity::find_by_id(round_id)
            .one(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound("Round not found".to_string()))
    }

    async fn find_match(&self, match_id: i64) -> AppResult<matches::Model> {
        matches::Entity::find_by_id(match_id)
            .one(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound("Match not found".to_string()))
    }

    async fn save_match(
        &self,
        original: matches::Model,
        updated: matches::Model,
    ) -> AppResult<MatchResponse> {
        let mut active = original.into_active_model();
        active.status = Set(updated.status);
        active.result = Set(updated.result);
        active.updated_at = Set(Some(Utc::now()));
        let saved = active.update(&self.pool).await?;
        Ok(saved.into())
    }
}
