//! Fringuello - a Twitter client library
//!
//! Re-exports the client from the `twitter-client` crate and adds logging
//! setup for applications that embed it.
//!
//! # Usage
//!
//! ```rust,no_run
//! use fringuello::{init_logging, Twitter, TwitterConfig};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     init_logging("fringuello=info,twitter_client=info")?;
//!
//!     let mut twitter = Twitter::with_config(TwitterConfig::from_env())?;
//!     for status in twitter.friends_timeline().await? {
//!         let author = status.user.as_ref().map_or("?", |u| u.screen_name.as_str());
//!         println!("{author}: {status}");
//!     }
//!     Ok(())
//! }
//! ```

pub use twitter_client::*;

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Error returned when a global subscriber is already installed
pub type LoggingError = tracing_subscriber::util::TryInitError;

/// Install a global `tracing` subscriber writing to stderr
///
/// `RUST_LOG` wins over `default_filter` when set. Fails if a subscriber is
/// already installed.
pub fn init_logging(default_filter: &str) -> std::result::Result<(), LoggingError> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(true).with_writer(std::io::stderr))
        .try_init()?;

    tracing::debug!(default_filter, "logging initialised");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_logging_only_once() {
        // Another test may have installed a subscriber already; either way the
        // second call must fail
        let _ = init_logging("debug");
        assert!(init_logging("debug").is_err());
    }

    #[test]
    fn test_init_logging_error_is_not_a_client_error() {
        // The crate-level `Result` alias is re-exported from the client; the
        // logging bootstrap must keep its own error type
        let outcome: std::result::Result<(), LoggingError> = init_logging("info");
        if let Err(err) = outcome {
            assert!(!err.to_string().is_empty());
        }
    }
}
