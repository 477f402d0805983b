use crate::card::{Card, Rank, Suit};
use crate::error::BlackjackGameError;
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

pub const DECK_SIZE: usize = 52;

/// A single 52 card deck. Cards are drawn from the back of the underlying vector.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Deck {
    cards: Vec<Card>,
}

impl Deck {
    /// Associated function that creates an unshuffled deck, one card for every suit and rank combination.
    /// The order is fixed: suits in `Suit::ALL` order, and within each suit the ranks in `Rank::ALL` order.
    pub fn new() -> Self {
        let cards = Suit::ALL
            .into_iter()
            .flat_map(|suit| Rank::ALL.into_iter().map(move |rank| Card::new(rank, suit)))
            .collect::<Vec<Card>>();
        Deck { cards }
    }

    /// Creates a fresh deck and shuffles it with `rng`.
    pub fn shuffled<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let mut deck = Deck::new();
        deck.shuffle(rng);
        deck
    }

    /// Builds a deck whose draws return `draw_order` front to back. Useful for replaying a known sequence of cards.
    pub fn stacked(draw_order: Vec<Card>) -> Self {
        let mut cards = draw_order;
        cards.reverse();
        Deck { cards }
    }

    /// Uniformly permutes the remaining cards in place.
    pub fn shuffle<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.cards.shuffle(rng);
    }

    /// Removes and returns the next card.
    pub fn draw(&mut self) -> Result<Card, BlackjackGameError> {
        match self.cards.pop() {
            Some(card) => Ok(card),
            None => {
                log::error!("draw attempted against an empty deck");
                Err(BlackjackGameError::DeckExhausted)
            }
        }
    }

    /// Getter method for the number of cards left to draw.
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }
}

impl Default for Deck {
    fn default() -> Self {
        Deck::new()
    }
}
