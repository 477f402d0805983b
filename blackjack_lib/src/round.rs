//! The state machine for a single round: deal, player turn, staged dealer reveal and draws, resolution.
//!
//! Every public method performs exactly one transition and returns, so callers can present each
//! dealer draw as its own step. Rejected actions leave the round untouched.

use crate::card::Card;
use crate::dealer::should_draw;
use crate::deck::Deck;
use crate::error::{Action, BlackjackGameError};
use crate::hand::{Hand, BLACKJACK};
use serde::{Deserialize, Serialize};
use std::fmt::Display;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoundPhase {
    PlayerTurn,
    /// The hole card has been turned over but the dealer has not drawn yet.
    DealerReveal,
    DealerDrawing,
    Resolved,
}

impl Display for RoundPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RoundPhase::PlayerTurn => write!(f, "player turn"),
            RoundPhase::DealerReveal => write!(f, "dealer reveal"),
            RoundPhase::DealerDrawing => write!(f, "dealer drawing"),
            RoundPhase::Resolved => write!(f, "resolved"),
        }
    }
}

/// Which side took a round.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Winner {
    Player,
    Dealer,
    Tie,
}

impl Display for Winner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Winner::Player => write!(f, "player"),
            Winner::Dealer => write!(f, "dealer"),
            Winner::Tie => write!(f, "tie"),
        }
    }
}

/// Decides the winner of a round from the two final totals.
/// A player bust loses even when the dealer busts as well, the player's bust is checked first.
pub fn decide_winner(player_total: u32, dealer_total: u32) -> Winner {
    if player_total > BLACKJACK {
        Winner::Dealer
    } else if dealer_total > BLACKJACK {
        Winner::Player
    } else if player_total > dealer_total {
        Winner::Player
    } else if player_total < dealer_total {
        Winner::Dealer
    } else {
        Winner::Tie
    }
}

/// Immutable record of a finished round.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundOutcome {
    pub round: u32,
    pub player_total: u32,
    pub dealer_total: u32,
    pub winner: Winner,
    pub player_hand: Vec<Card>,
    pub dealer_hand: Vec<Card>,
}

/// Result of a single dealer step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DealerStep {
    Drew(Card),
    Resolved(RoundOutcome),
}

/// One round of blackjack: the deck it is dealt from, both hands and the current phase.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Round {
    number: u32,
    deck: Deck,
    player_hand: Hand,
    dealer_hand: Hand,
    phase: RoundPhase,
}

impl Round {
    /// Deals two cards to the player and then two to the dealer from `deck`, leaving the round in the player's turn.
    pub fn deal(number: u32, mut deck: Deck) -> Result<Round, BlackjackGameError> {
        let mut player_hand = Hand::new();
        let mut dealer_hand = Hand::new();
        player_hand.receive_card(deck.draw()?);
        player_hand.receive_card(deck.draw()?);
        dealer_hand.receive_card(deck.draw()?);
        dealer_hand.receive_card(deck.draw()?);

        log::debug!("round {number} dealt, player holds {player_hand}");

        Ok(Round {
            number,
            deck,
            player_hand,
            dealer_hand,
            phase: RoundPhase::PlayerTurn,
        })
    }

    /// Draws a card into the player's hand. A bust ends the player's turn and hands control to the dealer.
    pub fn hit(&mut self) -> Result<Card, BlackjackGameError> {
        self.require_phase(Action::Hit)?;
        let card = self.deck.draw()?;
        self.player_hand.receive_card(card);
        if self.player_hand.is_bust() {
            log::debug!("round {} player busted with {}", self.number, self.player_hand);
            self.phase = RoundPhase::DealerReveal;
        }
        Ok(card)
    }

    /// Method for ending the player's turn. The hole card is turned over and nothing is drawn yet.
    pub fn stand(&mut self) -> Result<(), BlackjackGameError> {
        self.require_phase(Action::Stand)?;
        self.phase = RoundPhase::DealerReveal;
        Ok(())
    }

    /// Runs one iteration of the dealer loop: draws a single card if the dealer policy asks for one,
    /// otherwise resolves the round.
    pub fn advance_dealer(&mut self) -> Result<DealerStep, BlackjackGameError> {
        self.require_phase(Action::AdvanceDealer)?;

        if should_draw(&self.dealer_hand) {
            let card = self.deck.draw()?;
            self.dealer_hand.receive_card(card);
            self.phase = RoundPhase::DealerDrawing;
            log::debug!("round {} dealer drew {card}", self.number);
            return Ok(DealerStep::Drew(card));
        }

        self.phase = RoundPhase::Resolved;
        Ok(DealerStep::Resolved(self.outcome()))
    }

    fn require_phase(&self, action: Action) -> Result<(), BlackjackGameError> {
        let allowed = match action {
            Action::Hit | Action::Stand => self.phase == RoundPhase::PlayerTurn,
            Action::AdvanceDealer => matches!(
                self.phase,
                RoundPhase::DealerReveal | RoundPhase::DealerDrawing
            ),
        };

        if allowed {
            Ok(())
        } else {
            Err(BlackjackGameError::InvalidAction {
                action,
                phase: self.phase,
            })
        }
    }

    fn outcome(&self) -> RoundOutcome {
        let (player_total, dealer_total) = (self.player_hand.value(), self.dealer_hand.value());
        RoundOutcome {
            round: self.number,
            player_total,
            dealer_total,
            winner: decide_winner(player_total, dealer_total),
            player_hand: self.player_hand.cards().to_vec(),
            dealer_hand: self.dealer_hand.cards().to_vec(),
        }
    }

    /// Getter method for the round number, starting at 1.
    pub fn number(&self) -> u32 {
        self.number
    }

    /// Getter method for the current phase of the round.
    pub fn phase(&self) -> RoundPhase {
        self.phase
    }

    /// Getter method for the player's hand.
    pub fn player_hand(&self) -> &Hand {
        &self.player_hand
    }

    /// Getter method for the dealer's hand, unmasked. Use `Hand::faces` when showing it to the player.
    pub fn dealer_hand(&self) -> &Hand {
        &self.dealer_hand
    }

    /// Getter method for the number of cards left in this round's deck.
    pub fn cards_remaining(&self) -> usize {
        self.deck.len()
    }

    /// The hole card is only hidden while the player is still acting.
    pub fn hole_card_revealed(&self) -> bool {
        self.phase != RoundPhase::PlayerTurn
    }

    /// True while the presentation layer should keep stepping the dealer.
    pub fn dealer_drawing(&self) -> bool {
        matches!(
            self.phase,
            RoundPhase::DealerReveal | RoundPhase::DealerDrawing
        )
    }

    /// Whether both hands are final and an outcome can be read.
    pub fn is_resolved(&self) -> bool {
        self.phase == RoundPhase::Resolved
    }
}
