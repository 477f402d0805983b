use crate::store::{MatchStore, DEFAULT_CAPACITY, DEFAULT_IDLE_TTL};
use clap::Parser;
use std::time::Duration;

/// Configuration for the HTTP server, read from the command line or the environment.
/// Command line and environment configuration for the HTTP server.
#[derive(Debug, Clone, Parser)]
#[command(name = "blackjack-series", about = "Serves best of three blackjack matches over HTTP")]
pub struct ServerConfig {
    #[arg(long, env = "BLACKJACK_ADDRESS", default_value = "127.0.0.1")]
    pub address: String,

    #[arg(long, env = "BLACKJACK_PORT", default_value_t = 8080)]
    pub port: u16,

    /// Number of worker threads, actix picks one per physical core when unset
    #[arg(long)]
    pub workers: Option<usize>,

    /// Default log filter, `RUST_LOG` takes precedence when set
    #[arg(long, env = "BLACKJACK_LOG", default_value = "info")]
    pub log_level: String,

    /// Most matches kept in memory, the least recently used one is evicted past this
    #[arg(long, env = "BLACKJACK_MAX_MATCHES", default_value_t = DEFAULT_CAPACITY)]
    pub max_matches: usize,

    /// Seconds a match may sit idle before it is discarded
    #[arg(long, env = "BLACKJACK_MATCH_TTL", default_value_t = DEFAULT_IDLE_TTL.as_secs())]
    pub match_ttl_secs: u64,
}

impl ServerConfig {
    /// Builds the match store described by this configuration.
    pub fn match_store(&self) -> MatchStore {
        MatchStore::with_limits(self.max_matches, Duration::from_secs(self.match_ttl_secs))
    }
}

/// Configuration for a single match played in the terminal.
/// Configuration for the terminal binary.
#[derive(Debug, Clone, Parser)]
#[command(name = "play", about = "Play a best of three blackjack series against the dealer")]
pub struct PlayConfig {
    /// Seed for the shuffles, a random seed is used when unset
    #[arg(long)]
    pub seed: Option<u64>,

    #[arg(long, env = "BLACKJACK_LOG", default_value = "warn")]
    pub log_level: String,
}

/// Initialises `env_logger`, falling back to `default_level` when `RUST_LOG` is unset.
pub fn init_logging(default_level: &str) {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn server_flags_override_defaults() {
        let config = ServerConfig::try_parse_from([
            "api",
            "--address",
            "0.0.0.0",
            "--port",
            "9000",
            "--workers",
            "2",
            "--max-matches",
            "50",
        ])
        .unwrap();
        assert_eq!(config.address, "0.0.0.0");
        assert_eq!(config.port, 9000);
        assert_eq!(config.workers, Some(2));
        assert_eq!(config.max_matches, 50);
        assert_eq!(config.match_ttl_secs, DEFAULT_IDLE_TTL.as_secs());
    }

    #[test]
    fn invalid_port_is_rejected() {
        assert!(ServerConfig::try_parse_from(["api", "--port", "not-a-port"]).is_err());
    }

    #[test]
    fn play_seed_is_optional() {
        let config = PlayConfig::try_parse_from(["play", "--seed", "17"]).unwrap();
        assert_eq!(config.seed, Some(17));
        let config = PlayConfig::try_parse_from(["play"]).unwrap();
        assert_eq!(config.seed, None);
    }
}
