use blackjack_series::config::init_logging;
use blackjack_series::prelude::*;
use clap::Parser;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::error::Error;
use std::io::{self, BufRead, Write};

fn main() {
    let config = PlayConfig::parse();
    init_logging(&config.log_level);

    let mut rng = match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    if let Err(e) = play(&mut rng) {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}

/// Plays one series against stdin, stepping the dealer one card at a time.
fn play(rng: &mut StdRng) -> Result<(), Box<dyn Error>> {
    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    let mut stdout = io::stdout();
    let mut series = SeriesState::start(rng)?;

    while !series.is_over() {
        println!("{}", SeriesView::from(&series));
        println!();

        if series.dealer_drawing() {
            match series.advance_dealer_turn(rng)? {
                SeriesStep::DealerDrew { card } => println!("dealer draws {card}"),
                SeriesStep::RoundResolved { outcome, .. } => println!(
                    "round {} over, player {} dealer {}, winner: {}",
                    outcome.round, outcome.player_total, outcome.dealer_total, outcome.winner
                ),
            }
            continue;
        }

        print!("(h)it or (s)tand? ");
        stdout.flush()?;
        let line = match lines.next() {
            Some(line) => line?,
            None => return Ok(()),
        };
        match line.trim() {
            "h" | "hit" => {
                let card = series.player_hit()?;
                println!("you draw {card}");
            }
            "s" | "stand" => series.player_stand()?,
            other => eprintln!("error: {other} is not a valid option"),
        }
    }

    println!("{}", SeriesView::from(&series));
    let result = series.result()?;
    println!(
        "{}, final score {} - {}",
        result.winner, result.player_score, result.dealer_score
    );
    Ok(())
}
