use crate::round::RoundPhase;
use serde::{Deserialize, Serialize};
use std::fmt::Display;
use thiserror::Error;

/// The externally triggered actions a series accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    Hit,
    Stand,
    AdvanceDealer,
}

impl Display for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Action::Hit => write!(f, "hit"),
            Action::Stand => write!(f, "stand"),
            Action::AdvanceDealer => write!(f, "advance the dealer"),
        }
    }
}

/// Errors produced by the core game logic. None of them leave a round or series half updated.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BlackjackGameError {
    /// A draw was attempted against an empty deck. Rounds are sized so this cannot happen against a fresh deck.
    #[error("attempted to draw from an exhausted deck")]
    DeckExhausted,
    #[error("cannot {action} during the {phase} phase")]
    InvalidAction { action: Action, phase: RoundPhase },
    #[error("the series is already over")]
    SeriesOver,
    #[error("the series is still in progress")]
    SeriesInProgress,
}
