//! Match scoring
//!
//! Result-to-points mapping for tournament games and the checks that keep a
//! match's result consistent with its status.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use utoipa::ToSchema;

use crate::entities::{MatchResult, MatchStatus, tournament_match_entity as matches};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum Side {
    White,
    Black,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MatchStateError {
    #[error("a result can only be recorded on a completed match (status is {status})")]
    ResultRequiresCompleted { status: MatchStatus },

    #[error("match has result {result}; clear it before changing status to {requested}")]
    ResultPresent {
        result: MatchResult,
        requested: MatchStatus,
    },
}

/// Points earned by `side` for a result
///
/// Returns `None` while the game has no result (`*` or missing).
pub fn points_for(result: Option<MatchResult>, side: Side) -> Option<f64> {
    match (result?, side) {
        (MatchResult::WhiteWins, Side::White) => Some(1.0),
        (MatchResult::WhiteWins, Side::Black) => Some(0.0),
        (MatchResult::BlackWins, Side::White) => Some(0.0),
        (MatchResult::BlackWins, Side::Black) => Some(1.0),
        (MatchResult::Draw, _) => Some(0.5),
        (MatchResult::Unresolved, _) => None,
    }
}

/// Same as [`points_for`] for a raw result code. Unknown codes score `None`.
pub fn points_for_code(code: &str, side: Side) -> Option<f64> {
    points_for(MatchResult::from_code(code), side)
}

/// Points for both players as `(white, black)`
pub fn match_points(m: &matches::Model) -> (Option<f64>, Option<f64>) {
    (
        points_for(m.result, Side::White),
        points_for(m.result, Side::Black),
    )
}

/// Record a result. Only allowed once the match is completed.
///
/// `*` is not a result: it clears whatever was stored, so the match can
/// still leave `completed` afterwards.
pub fn set_result(m: &mut matches::Model, result: MatchResult) -> Result<(), MatchStateError> {
    if !m.is_completed() {
        return Err(MatchStateError::ResultRequiresCompleted { status: m.status });
    }
    match result {
        MatchResult::Unresolved => clear_result(m),
        decided => m.result = Some(decided),
    }
    Ok(())
}

/// Remove any recorded result; allowed in every status
pub fn clear_result(m: &mut matches::Model) {
    m.result = None;
}

/// Assign a status directly. Leaving `completed` while a result is stored
/// would orphan the result, so that case is refused.
pub fn set_status(m: &mut matches::Model, status: MatchStatus) -> Result<(), MatchStateError> {
    if status != MatchStatus::Completed
        && let Some(result) = m.result
    {
        return Err(MatchStateError::ResultPresent {
            result,
            requested: status,
        });
    }
    m.status = status;
    Ok(())
}

/// Every match is completed or cancelled. Informational only: round status
/// is never changed from here.
pub fn all_matches_resolved(list: &[matches::Model]) -> bool {
    list.iter().all(|m| m.is_resolved())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn game(status: MatchStatus, result: Option<MatchResult>) -> matches::Model {
        matches::Model {
            id: 1,
            round_id: 1,
            board_number: Some(1),
            white_player_id: 10,
            black_player_id: 11,
            result,
            status,
            created_at: None,
            updated_at: None,
        }
    }

    #[test]
    fn test_points_table() {
        assert_eq!(points_for(Some(MatchResult::WhiteWins), Side::White), Some(1.0));
        assert_eq!(points_for(Some(MatchResult::WhiteWins), Side::Black), Some(0.0));
        assert_eq!(points_for(Some(MatchResult::BlackWins), Side::White), Some(0.0));
        assert_eq!(points_for(Some(MatchResult::BlackWins), Side::Black), Some(1.0));
        assert_eq!(points_for(Some(MatchResult::Draw), Side::White), Some(0.5));
        assert_eq!(points_for(Some(MatchResult::Draw), Side::Black), Some(0.5));
        assert_eq!(points_for(Some(MatchResult::Unresolved), Side::White), None);
        assert_eq!(points_for(None, Side::Black), None);
    }

    #[test]
    fn test_decisive_results_sum_to_one() {
        for code in ["1-0", "0-1"] {
            let white = points_for_code(code, Side::White).unwrap();
            let black = points_for_code(code, Side::Black).unwrap();
            assert_eq!(white + black, 1.0);
        }
    }

    #[test]
    fn test_black_win_scores() {
        assert_eq!(points_for_code("0-1", Side::White), Some(0.0));
        assert_eq!(points_for_code("0-1", Side::Black), Some(1.0));
    }

    #[test]
    fn test_unknown_and_pending_codes_score_nothing() {
        assert_eq!(points_for_code("*", Side::White), None);
        assert_eq!(points_for_code("*", Side::Black), None);
        assert_eq!(points_for_code("2-0", Side::White), None);
        assert_eq!(points_for_code("", Side::Black), None);
    }

    #[test]
    fn test_set_result_requires_completed() {
        for status in [
            MatchStatus::Scheduled,
            MatchStatus::InProgress,
            MatchStatus::Cancelled,
        ] {
            let mut m = game(status, None);
            let err = set_result(&mut m, MatchResult::Draw).unwrap_err();
            assert_eq!(err, MatchStateError::ResultRequiresCompleted { status });
            assert_eq!(m.result, None);
        }

        let mut m = game(MatchStatus::Completed, None);
        set_result(&mut m, MatchResult::BlackWins).unwrap();
        assert_eq!(m.result, Some(MatchResult::BlackWins));
        assert_eq!(match_points(&m), (Some(0.0), Some(1.0)));
    }

    #[test]
    fn test_status_change_blocked_while_result_present() {
        let mut m = game(MatchStatus::Completed, Some(MatchResult::WhiteWins));
        let err = set_status(&mut m, MatchStatus::InProgress).unwrap_err();
        assert!(matches!(err, MatchStateError::ResultPresent { .. }));
        assert_eq!(m.status, MatchStatus::Completed);

        clear_result(&mut m);
        set_status(&mut m, MatchStatus::InProgress).unwrap();
        assert!(m.is_in_progress());
    }

    #[test]
    fn test_unresolved_result_clears() {
        let mut m = game(MatchStatus::Completed, Some(MatchResult::Draw));
        set_result(&mut m, MatchResult::Unresolved).unwrap();
        assert_eq!(m.result, None);
        assert_eq!(match_points(&m), (None, None));

        set_status(&mut m, MatchStatus::InProgress).unwrap();
        assert!(m.is_in_progress());

        let mut m = game(MatchStatus::Scheduled, None);
        let err = set_result(&mut m, MatchResult::Unresolved).unwrap_err();
        assert!(matches!(err, MatchStateError::ResultRequiresCompleted { .. }));
    }

    #[test]
    fn test_status_is_direct_assignment() {
        let mut m = game(MatchStatus::Completed, None);
        set_status(&mut m, MatchStatus::Scheduled).unwrap();
        assert!(m.is_scheduled());
        set_status(&mut m, MatchStatus::Cancelled).unwrap();
        assert!(m.is_cancelled());
        set_status(&mut m, MatchStatus::Completed).unwrap();
        assert!(m.is_completed());
    }

    #[test]
    fn test_all_matches_resolved() {
        let list = vec![
            game(MatchStatus::Completed, Some(MatchResult::Draw)),
            game(MatchStatus::Cancelled, None),
        ];
        assert!(all_matches_resolved(&list));

        let list = vec![
            game(MatchStatus::Completed, Some(MatchResult::Draw)),
            game(MatchStatus::InProgress, None),
        ];
        assert!(!all_matches_resolved(&list));
        assert!(all_matches_resolved(&[]));
    }
}
