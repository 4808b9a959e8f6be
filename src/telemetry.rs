// src/telemetry.rs
//! Tracing setup and log-safe identifiers.
//!
//! Raw user text is never written to logs; call sites log `anon_id(text)`.

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

pub const ENV_LOG_FILTER: &str = "SENTIMENT_LOG";
pub const ENV_LOG_JSON: &str = "SENTIMENT_LOG_JSON";
const DEFAULT_FILTER: &str = "sentiment_lens=info,warn";

/// Short anonymized id of a text: first 6 bytes of its SHA-256, hex encoded.
pub fn anon_id(text: &str) -> String {
    use sha2::{Digest, Sha256};
    let mut hasher = Sha256::new();
    hasher.update(text.as_bytes());
    let digest = hasher.finalize();
    let mut out = String::with_capacity(12);
    for b in digest.iter().take(6) {
        use std::fmt::Write as _;
        let _ = write!(&mut out, "{:02x}", b);
    }
    out
}

/// Install the global subscriber. Filter comes from `SENTIMENT_LOG`, then
/// `RUST_LOG`; `SENTIMENT_LOG_JSON=1` switches to JSON lines. Logs go to stderr
/// so stdout stays clean for results.
pub fn init_tracing() {
    let filter = std::env::var(ENV_LOG_FILTER)
        .ok()
        .and_then(|f| EnvFilter::try_new(f).ok())
        .or_else(|| EnvFilter::try_from_default_env().ok())
        .unwrap_or_else(|| EnvFilter::new(DEFAULT_FILTER));

    let json = std::env::var(ENV_LOG_JSON).ok().is_some_and(|v| v == "1");

    let registry = tracing_subscriber::registry().with(filter);
    let result = if json {
        registry
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .try_init()
    } else {
        registry
            .with(fmt::layer().compact().with_writer(std::io::stderr))
            .try_init()
    };
    if let Err(e) = result {
        eprintln!("tracing already initialized: {e}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn anon_id_is_short_stable_hex() {
        let a = anon_id("I hate everything");
        assert_eq!(a.len(), 12);
        assert!(a.chars().all(|c| c.is_ascii_hexdigit()));
        assert_eq!(a, anon_id("I hate everything"));
        assert_ne!(a, anon_id("I love everything"));
    }
}
