//! Twitter Client Library
//!
//! This crate provides an async client for the Twitter REST API: timelines,
//! direct messages, friendships, user profiles and search, on top of a
//! pluggable HTTP transport.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod error;
pub mod json;
pub mod model;
pub mod text;
pub mod transport;
pub mod twitter;

#[cfg(test)]
pub(crate) mod test_utils;

pub use error::{ErrorKind, Result, TwitterError};
pub use model::{Message, Status, Tweet, TweetView, User};
pub use transport::{Credentials, HttpTransport, HttpTransportConfig, Params, Transport};
pub use twitter::{FriendshipOutcome, Twitter, TwitterConfig};
