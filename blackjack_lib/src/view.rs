//! A read-only snapshot of a series for whatever is presenting it. The dealer's hole card is masked here,
//! the series itself always holds the true hand.

use crate::hand::{CardFace, Hand};
use crate::round::{RoundOutcome, RoundPhase};
use crate::series::{SeriesResult, SeriesState};
use serde::Serialize;
use std::fmt::Display;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SeriesView {
    pub round_number: u32,
    pub player_score: u32,
    pub dealer_score: u32,
    pub phase: RoundPhase,
    pub player_hand: Vec<CardFace>,
    pub player_total: u32,
    pub dealer_hand: Vec<CardFace>,
    /// Only present once the hole card is showing.
    pub dealer_total: Option<u32>,
    pub hole_card_revealed: bool,
    pub dealer_drawing: bool,
    pub history: Vec<RoundOutcome>,
    pub series_over: bool,
    pub result: Option<SeriesResult>,
}

impl From<&SeriesState> for SeriesView {
    fn from(series: &SeriesState) -> Self {
        let round = series.round();
        let revealed = series.hole_card_revealed();
        SeriesView {
            round_number: series.round_number(),
            player_score: series.player_score(),
            dealer_score: series.dealer_score(),
            phase: round.phase(),
            player_hand: round.player_hand().faces(true),
            player_total: round.player_hand().value(),
            dealer_hand: round.dealer_hand().faces(revealed),
            dealer_total: revealed.then(|| round.dealer_hand().value()),
            hole_card_revealed: revealed,
            dealer_drawing: series.dealer_drawing(),
            history: series.history().to_vec(),
            series_over: series.is_over(),
            result: series.result().ok(),
        }
    }
}

fn joined_faces(faces: &[CardFace]) -> String {
    faces
        .iter()
        .map(|face| face.to_string())
        .collect::<Vec<String>>()
        .join(" ")
}

impl Display for SeriesView {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        const WIDTH: usize = 80;
        const TEXT_WIDTH: usize = "dealer's hand".len() + 20;
        const VALUE_WIDTH: usize = WIDTH - TEXT_WIDTH;

        writeln!(f, "{}", "-".repeat(WIDTH))?;
        writeln!(f, "{:-^WIDTH$}", format!(" round {} ", self.round_number))?;
        writeln!(
            f,
            "{:<TEXT_WIDTH$}{:>VALUE_WIDTH$}",
            "player's hand",
            format!("{} ({})", joined_faces(&self.player_hand), self.player_total)
        )?;
        let dealer = match self.dealer_total {
            Some(total) => format!("{} ({})", joined_faces(&self.dealer_hand), total),
            None => joined_faces(&self.dealer_hand),
        };
        writeln!(f, "{:<TEXT_WIDTH$}{:>VALUE_WIDTH$}", "dealer's hand", dealer)?;
        writeln!(
            f,
            "{:<TEXT_WIDTH$}{:>VALUE_WIDTH$}",
            "score",
            format!("player {} - {} dealer", self.player_score, self.dealer_score)
        )?;
        writeln!(f, "{:<TEXT_WIDTH$}{:>VALUE_WIDTH$}", "phase", self.phase.to_string())?;

        if !self.history.is_empty() {
            writeln!(f, "{:-^WIDTH$}", " history ")?;
            writeln!(
                f,
                "{:<8}{:>8}{:>8}{:>10}  {:<20}{:<20}",
                "round", "player", "dealer", "winner", "player's hand", "dealer's hand"
            )?;
            for outcome in &self.history {
                writeln!(
                    f,
                    "{:<8}{:>8}{:>8}{:>10}  {:<20}{:<20}",
                    outcome.round,
                    outcome.player_total,
                    outcome.dealer_total,
                    outcome.winner.to_string(),
                    Hand::from_cards(outcome.player_hand.clone()).formatted(),
                    Hand::from_cards(outcome.dealer_hand.clone()).formatted()
                )?;
            }
        }

        if let Some(result) = &self.result {
            writeln!(f, "{:-^WIDTH$}", format!(" {} ", result.winner))?;
        }
        write!(f, "{}", "-".repeat(WIDTH))
    }
}
