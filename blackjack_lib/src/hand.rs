use crate::card::Card;
use serde::{Deserialize, Serialize};
use std::fmt::Display;

pub const BLACKJACK: u32 = 21;

/// Computes the blackjack total of `cards`. Every ace starts at 11 and is dropped to 1, one at a time,
/// for as long as the total is over 21.
pub fn hand_value(cards: &[Card]) -> u32 {
    let mut total = cards.iter().map(Card::points).sum::<u32>();
    let mut aces = cards.iter().filter(|card| card.is_ace()).count();

    while total > BLACKJACK && aces > 0 {
        total -= 10;
        aces -= 1;
    }

    total
}

/// How a single card is shown to whoever is watching the table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "face", rename_all = "snake_case")]
pub enum CardFace {
    Up(Card),
    Down,
}

impl Display for CardFace {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CardFace::Up(card) => write!(f, "{}", card),
            CardFace::Down => write!(f, "??"),
        }
    }
}

/// The cards held by one side of the table for the duration of a round, in the order they were drawn.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hand {
    cards: Vec<Card>,
}

impl Hand {
    pub fn new() -> Self {
        Hand { cards: Vec::new() }
    }

    pub fn from_cards(cards: Vec<Card>) -> Self {
        Hand { cards }
    }

    /// Method for adding a newly drawn card to the end of the hand.
    pub fn receive_card(&mut self, card: Card) {
        self.cards.push(card);
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Getter method for the best total of the hand, see `hand_value`.
    pub fn value(&self) -> u32 {
        hand_value(&self.cards)
    }

    pub fn is_bust(&self) -> bool {
        self.value() > BLACKJACK
    }

    /// Masks the second card (the dealer's hole card) until `hole_card_revealed` is set.
    /// The hand itself is never altered, only the returned faces are.
    pub fn faces(&self, hole_card_revealed: bool) -> Vec<CardFace> {
        self.cards
            .iter()
            .enumerate()
            .map(|(i, card)| {
                if i == 1 && !hole_card_revealed {
                    CardFace::Down
                } else {
                    CardFace::Up(*card)
                }
            })
            .collect()
    }

    /// Formats the hand as its cards separated by spaces, e.g. `A♠ 10♥`.
    pub fn formatted(&self) -> String {
        self.cards
            .iter()
            .map(|card| card.to_string())
            .collect::<Vec<String>>()
            .join(" ")
    }
}

impl Display for Hand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.formatted(), self.value())
    }
}
