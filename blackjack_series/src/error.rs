use actix_web::{body::BoxBody, error, http::StatusCode, HttpResponse};
use blackjack_lib::BlackjackGameError;
use serde::Serialize;
use thiserror::Error;

/// Errors reported back to whoever is driving a match.
#[derive(Debug, Error)]
pub enum UserError {
    #[error("an internal error occurred")]
    InternalError,
    #[error("no match with id {0}, start a new match")]
    MatchNotFound(String),
    #[error("{0}")]
    InvalidState(String),
}

impl From<BlackjackGameError> for UserError {
    fn from(e: BlackjackGameError) -> Self {
        match e {
            BlackjackGameError::DeckExhausted => {
                log::error!("game invariant violated: {e}");
                UserError::InternalError
            }
            other => UserError::InvalidState(other.to_string()),
        }
    }
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

impl error::ResponseError for UserError {
    fn error_response(&self) -> HttpResponse<BoxBody> {
        HttpResponse::build(self.status_code()).json(ErrorBody {
            error: self.to_string(),
        })
    }

    fn status_code(&self) -> StatusCode {
        match *self {
            UserError::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
            UserError::MatchNotFound(_) => StatusCode::NOT_FOUND,
            UserError::InvalidState(_) => StatusCode::CONFLICT,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::ResponseError;
    use blackjack_lib::{Action, RoundPhase};

    #[test]
    fn exhausted_deck_is_an_internal_error() {
        let e = UserError::from(BlackjackGameError::DeckExhausted);
        assert!(matches!(e, UserError::InternalError));
        assert_eq!(e.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn invalid_actions_are_conflicts() {
        let e = UserError::from(BlackjackGameError::InvalidAction {
            action: Action::Hit,
            phase: RoundPhase::DealerDrawing,
        });
        assert_eq!(e.status_code(), StatusCode::CONFLICT);
        assert_eq!(e.to_string(), "cannot hit during the dealer drawing phase");
        assert_eq!(
            UserError::from(BlackjackGameError::SeriesOver).status_code(),
            StatusCode::CONFLICT
        );
    }

    #[test]
    fn unknown_match_is_not_found() {
        let e = UserError::MatchNotFound("abc".to_string());
        assert_eq!(e.status_code(), StatusCode::NOT_FOUND);
    }
}
