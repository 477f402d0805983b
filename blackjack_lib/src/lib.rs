//! Core logic for a best-of-three blackjack series played between a human player and an automated dealer.
//! Everything here is transport agnostic, all match data lives in an explicitly owned `SeriesState`.

pub mod card;
pub mod dealer;
pub mod deck;
pub mod error;
pub mod hand;
pub mod round;
pub mod series;
pub mod view;

pub mod prelude {
    pub use super::card::{Card, Rank, Suit};
    pub use super::dealer::{should_draw, DEALER_STANDS_ON};
    pub use super::deck::{Deck, DECK_SIZE};
    pub use super::error::{Action, BlackjackGameError};
    pub use super::hand::{hand_value, CardFace, Hand, BLACKJACK};
    pub use super::round::{decide_winner, DealerStep, Round, RoundOutcome, RoundPhase, Winner};
    pub use super::series::{
        series_over, series_winner, SeriesResult, SeriesState, SeriesStep, SeriesWinner,
        MAX_ROUNDS, WINS_NEEDED,
    };
    pub use super::view::SeriesView;
}

pub use prelude::*;
