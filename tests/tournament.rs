mod common;

use chess_club_backend::entities::{MatchResult, MatchStatus, RoundStatus};
use chess_club_backend::error::AppError;
use chess_club_backend::models::*;
use chess_club_backend::services::TournamentService;
use common::test_db;

fn round_request(round_number: i32) -> CreateRoundRequest {
    CreateRoundRequest {
        round_number,
        start_datetime: None,
        end_datetime: None,
        status: None,
    }
}

fn pairing(white: i64, black: i64, board: i32) -> CreateMatchRequest {
    CreateMatchRequest {
        white_player_id: white,
        black_player_id: black,
        board_number: Some(board),
    }
}

#[tokio::test]
async fn black_win_scores_for_black() -> anyhow::Result<()> {
    let db = test_db().await;
    let service = TournamentService::new(db);

    let round = service.create_round(1, round_request(1)).await?;
    assert_eq!(round.status, RoundStatus::Scheduled);

    let game = service.create_match(round.id, pairing(10, 11, 1)).await?;
    assert_eq!(game.status, MatchStatus::Scheduled);
    assert_eq!((game.white_points, game.black_points), (None, None));

    service
        .set_match_status(game.id, MatchStatus::Completed)
        .await?;
    let game = service
        .set_match_result(game.id, MatchResult::BlackWins)
        .await?;

    assert_eq!(game.result, Some(MatchResult::BlackWins));
    assert_eq!(game.white_points, Some(0.0));
    assert_eq!(game.black_points, Some(1.0));

    let reread = service.get_match(game.id).await?;
    assert_eq!(reread.black_points, Some(1.0));
    Ok(())
}

#[tokio::test]
async fn result_requires_completed_match() -> anyhow::Result<()> {
    let db = test_db().await;
    let service = TournamentService::new(db);

    let round = service.create_round(1, round_request(1)).await?;
    let game = service.create_match(round.id, pairing(10, 11, 1)).await?;
    service
        .set_match_status(game.id, MatchStatus::InProgress)
        .await?;

    let err = service
        .set_match_result(game.id, MatchResult::WhiteWins)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::InvalidState(_)));
    assert_eq!(service.get_match(game.id).await?.result, None);
    Ok(())
}

#[tokio::test]
async fn status_change_requires_clearing_result() -> anyhow::Result<()> {
    let db = test_db().await;
    let service = TournamentService::new(db);

    let round = service.create_round(1, round_request(1)).await?;
    let game = service.create_match(round.id, pairing(10, 11, 1)).await?;
    service
        .set_match_status(game.id, MatchStatus::Completed)
        .await?;
    service.set_match_result(game.id, MatchResult::Draw).await?;

    let err = service
        .set_match_status(game.id, MatchStatus::InProgress)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::InvalidState(_)));

    let cleared = service.clear_match_result(game.id).await?;
    assert_eq!(cleared.result, None);
    assert_eq!(cleared.status, MatchStatus::Completed);

    let game = service
        .set_match_status(game.id, MatchStatus::InProgress)
        .await?;
    assert_eq!(game.status, MatchStatus::InProgress);
    Ok(())
}

#[tokio::test]
async fn unresolved_result_leaves_match_movable() -> anyhow::Result<()> {
    let db = test_db().await;
    let service = TournamentService::new(db);

    let round = service.create_round(1, round_request(1)).await?;
    let game = service.create_match(round.id, pairing(10, 11, 1)).await?;
    service
        .set_match_status(game.id, MatchStatus::Completed)
        .await?;
    service.set_match_result(game.id, MatchResult::WhiteWins).await?;

    let game = service
        .set_match_result(game.id, MatchResult::Unresolved)
        .await?;
    assert_eq!(game.result, None);
    assert_eq!((game.white_points, game.black_points), (None, None));

    let game = service
        .set_match_status(game.id, MatchStatus::Scheduled)
        .await?;
    assert_eq!(game.status, MatchStatus::Scheduled);
    Ok(())
}

#[tokio::test]
async fn round_summary_reports_resolution_without_changing_status() -> anyhow::Result<()> {
    let db = test_db().await;
    let service = TournamentService::new(db);

    let round = service.create_round(5, round_request(2)).await?;
    let first = service.create_match(round.id, pairing(1, 2, 2)).await?;
    let second = service.create_match(round.id, pairing(3, 4, 1)).await?;

    service
        .set_match_status(first.id, MatchStatus::Completed)
        .await?;
    service.set_match_result(first.id, MatchResult::Draw).await?;

    let summary = service.get_round_summary(round.id).await?;
    assert!(!summary.all_matches_resolved);
    assert_eq!(summary.matches.len(), 2);
    // ordered by board
    assert_eq!(summary.matches[0].id, second.id);
    assert_eq!(summary.matches[1].white_points, Some(0.5));
    assert_eq!(summary.matches[1].black_points, Some(0.5));

    service
        .set_match_status(second.id, MatchStatus::Cancelled)
        .await?;
    let summary = service.get_round_summary(round.id).await?;
    assert!(summary.all_matches_resolved);
    assert_eq!(summary.round.status, RoundStatus::Scheduled);

    let updated = service
        .set_round_status(round.id, RoundStatus::Completed)
        .await?;
    assert_eq!(updated.status, RoundStatus::Completed);

    // any transition is allowed
    let updated = service
        .set_round_status(round.id, RoundStatus::InProgress)
        .await?;
    assert_eq!(updated.status, RoundStatus::InProgress);
    Ok(())
}

#[tokio::test]
async fn invalid_rounds_and_pairings_are_rejected() -> anyhow::Result<()> {
    let db = test_db().await;
    let service = TournamentService::new(db);

    let err = service.create_round(1, round_request(0)).await.unwrap_err();
    assert!(matches!(err, AppError::ValidationError(_)));

    let round = service.create_round(1, round_request(1)).await?;
    let err = service.create_round(1, round_request(1)).await.unwrap_err();
    assert!(matches!(err, AppError::ValidationError(_)));

    // same number in another event is fine
    service.create_round(2, round_request(1)).await?;

    let err = service
        .create_match(round.id, pairing(7, 7, 1))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::ValidationError(_)));

    let err = service
        .create_match(9_999, pairing(7, 8, 1))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));

    let err = service.get_match(9_999).await.unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));
    Ok(())
}
