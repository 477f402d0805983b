//! Series controller: a best of three match, first side to two round wins takes it.

use crate::card::Card;
use crate::deck::Deck;
use crate::error::BlackjackGameError;
use crate::round::{DealerStep, Round, RoundOutcome, Winner};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// Rounds a side has to win to take the series.
pub const WINS_NEEDED: u32 = 2;
/// Upper bound on rounds played in one series, pushes included.
pub const MAX_ROUNDS: u32 = 3;

/// Whether a series is finished after `round_number` rounds have been resolved with the given scores.
pub fn series_over(player_score: u32, dealer_score: u32, round_number: u32) -> bool {
    player_score >= WINS_NEEDED || dealer_score >= WINS_NEEDED || round_number >= MAX_ROUNDS
}

/// Decides the series winner from the final scores. Equal scores are a draw.
pub fn series_winner(player_score: u32, dealer_score: u32) -> SeriesWinner {
    if player_score > dealer_score {
        SeriesWinner::Player
    } else if player_score < dealer_score {
        SeriesWinner::Dealer
    } else {
        SeriesWinner::Tie
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SeriesWinner {
    Player,
    Dealer,
    Tie,
}

impl Display for SeriesWinner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SeriesWinner::Player => write!(f, "the player wins the series"),
            SeriesWinner::Dealer => write!(f, "the dealer wins the series"),
            SeriesWinner::Tie => write!(f, "the series is tied"),
        }
    }
}

/// Final summary of a completed series.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeriesResult {
    pub winner: SeriesWinner,
    pub player_score: u32,
    pub dealer_score: u32,
    pub rounds_played: u32,
    pub history: Vec<RoundOutcome>,
}

/// What a single dealer step did at the series level.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "step", rename_all = "snake_case")]
pub enum SeriesStep {
    DealerDrew { card: Card },
    /// The round finished. When the series continues the next round has already been dealt.
    RoundResolved {
        outcome: RoundOutcome,
        series_over: bool,
    },
}

/// All of the data belonging to one match. Nothing about a match lives outside of this struct.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeriesState {
    round_number: u32,
    player_score: u32,
    dealer_score: u32,
    history: Vec<RoundOutcome>,
    round: Round,
}

impl SeriesState {
    /// Starts a new series, dealing the first round from a freshly shuffled deck.
    pub fn start<R: Rng + ?Sized>(rng: &mut R) -> Result<Self, BlackjackGameError> {
        SeriesState::with_deck(Deck::shuffled(rng))
    }

    /// Starts a new series whose first round is dealt from `deck`.
    pub fn with_deck(deck: Deck) -> Result<Self, BlackjackGameError> {
        let round = Round::deal(1, deck)?;
        log::info!("series started");
        Ok(SeriesState {
            round_number: 1,
            player_score: 0,
            dealer_score: 0,
            history: Vec::new(),
            round,
        })
    }

    /// Method for having the player draw another card. Rejected once the series is over.
    pub fn player_hit(&mut self) -> Result<Card, BlackjackGameError> {
        self.require_in_progress()?;
        self.round.hit()
    }

    /// Method for ending the player's turn in the current round. Rejected once the series is over.
    pub fn player_stand(&mut self) -> Result<(), BlackjackGameError> {
        self.require_in_progress()?;
        self.round.stand()
    }

    /// Advances the dealer by one step, shuffling a fresh deck from `rng` if a new round has to be dealt.
    pub fn advance_dealer_turn<R: Rng + ?Sized>(
        &mut self,
        rng: &mut R,
    ) -> Result<SeriesStep, BlackjackGameError> {
        self.advance_dealer_turn_with(|| Deck::shuffled(rng))
    }

    /// Advances the dealer by one step. `next_deck` is only called when a round resolves and the series continues.
    /// Nothing is committed unless the whole step succeeds.
    pub fn advance_dealer_turn_with<F>(
        &mut self,
        next_deck: F,
    ) -> Result<SeriesStep, BlackjackGameError>
    where
        F: FnOnce() -> Deck,
    {
        self.require_in_progress()?;

        let mut round = self.round.clone();
        let outcome = match round.advance_dealer()? {
            DealerStep::Drew(card) => {
                self.round = round;
                return Ok(SeriesStep::DealerDrew { card });
            }
            DealerStep::Resolved(outcome) => outcome,
        };

        let (mut player_score, mut dealer_score) = (self.player_score, self.dealer_score);
        match outcome.winner {
            Winner::Player => player_score += 1,
            Winner::Dealer => dealer_score += 1,
            Winner::Tie => {}
        }

        let over = series_over(player_score, dealer_score, self.round_number);
        let next_round = if over {
            None
        } else {
            Some(Round::deal(self.round_number + 1, next_deck())?)
        };

        log::info!(
            "round {} resolved: player {} dealer {}, winner {}",
            outcome.round,
            outcome.player_total,
            outcome.dealer_total,
            outcome.winner
        );

        self.player_score = player_score;
        self.dealer_score = dealer_score;
        self.history.push(outcome.clone());
        match next_round {
            Some(next) => {
                self.round_number += 1;
                self.round = next;
            }
            None => {
                self.round = round;
                log::info!(
                    "series over after {} rounds, {}",
                    self.round_number,
                    series_winner(player_score, dealer_score)
                );
            }
        }

        Ok(SeriesStep::RoundResolved {
            outcome,
            series_over: over,
        })
    }

    /// The final result, only available once the series has ended.
    pub fn result(&self) -> Result<SeriesResult, BlackjackGameError> {
        if !self.is_over() {
            return Err(BlackjackGameError::SeriesInProgress);
        }

        Ok(SeriesResult {
            winner: series_winner(self.player_score, self.dealer_score),
            player_score: self.player_score,
            dealer_score: self.dealer_score,
            rounds_played: self.round_number,
            history: self.history.clone(),
        })
    }

    fn require_in_progress(&self) -> Result<(), BlackjackGameError> {
        if self.is_over() {
            Err(BlackjackGameError::SeriesOver)
        } else {
            Ok(())
        }
    }

    /// A resolved round is only ever kept around once the series has ended.
    pub fn is_over(&self) -> bool {
        self.round.is_resolved()
    }

    /// Getter method for the number of the round currently in play, or the last one played once the series is over.
    pub fn round_number(&self) -> u32 {
        self.round_number
    }

    /// Getter method for the rounds won by the player so far.
    pub fn player_score(&self) -> u32 {
        self.player_score
    }

    /// Getter method for the rounds won by the dealer so far.
    pub fn dealer_score(&self) -> u32 {
        self.dealer_score
    }

    /// Getter method for the outcomes of every resolved round, oldest first.
    pub fn history(&self) -> &[RoundOutcome] {
        &self.history
    }

    /// Getter method for the current round.
    pub fn round(&self) -> &Round {
        &self.round
    }

    /// See `Round::hole_card_revealed`.
    pub fn hole_card_revealed(&self) -> bool {
        self.round.hole_card_revealed()
    }

    pub fn dealer_drawing(&self) -> bool {
        self.round.dealer_drawing()
    }
}
