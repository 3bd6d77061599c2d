//! Domain model: statuses, direct messages and users
//!
//! Model values are built once, from a parsed JSON object, and never change
//! afterwards. Constructors read required fields eagerly and fail with a
//! [`JsonError`] on the first malformed one.

mod message;
mod status;
mod user;

pub use message::Message;
pub use status::Status;
pub use user::User;

pub(crate) use message::messages_from_json;
pub(crate) use status::{statuses_from_json, statuses_from_search};
pub(crate) use user::users_from_json;

use crate::json::{JsonError, JsonObject};
use chrono::{DateTime, Utc};
use serde::Serialize;

/// Date format used by the REST API, e.g. `Wed Mar 04 12:00:00 +0000 2009`
pub const TWEET_DATE_FORMAT: &str = "%a %b %d %H:%M:%S %z %Y";

/// Parse a timestamp in the server's date format
///
/// chrono's month and weekday names are fixed English, so the result does
/// not depend on the process locale. The search API's RFC 2822 form
/// (`Wed, 04 Mar 2009 12:00:00 +0000`) is accepted as well.
pub fn parse_timestamp(raw: &str) -> Result<DateTime<Utc>, JsonError> {
    let raw = raw.trim();
    DateTime::parse_from_str(raw, TWEET_DATE_FORMAT)
        .or_else(|e| DateTime::parse_from_rfc2822(raw).map_err(|_| e))
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|source| JsonError::InvalidDate {
            value: raw.to_string(),
            source,
        })
}

/// Read `created_at`; absent or `null` means the time is unknown
pub(crate) fn created_at(obj: &JsonObject<'_>) -> Result<Option<DateTime<Utc>>, JsonError> {
    obj.get_string("created_at")?.map(parse_timestamp).transpose()
}

/// Fields shared by every kind of tweet
pub trait TweetView {
    /// Server-assigned id
    fn id(&self) -> i64;
    /// Text of the tweet
    fn text(&self) -> &str;
    /// Creation time, if the server sent one
    fn created_at(&self) -> Option<DateTime<Utc>>;
    /// Who wrote it; `None` when the server omitted the author
    fn author(&self) -> Option<&User>;
}

/// A status update or a direct message
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Tweet {
    /// Public status update
    Status(Status),
    /// Direct message
    Message(Message),
}

impl TweetView for Tweet {
    fn id(&self) -> i64 {
        match self {
            Tweet::Status(s) => s.id(),
            Tweet::Message(m) => m.id(),
        }
    }

    fn text(&self) -> &str {
        match self {
            Tweet::Status(s) => s.text(),
            Tweet::Message(m) => m.text(),
        }
    }

    fn created_at(&self) -> Option<DateTime<Utc>> {
        match self {
            Tweet::Status(s) => TweetView::created_at(s),
            Tweet::Message(m) => TweetView::created_at(m),
        }
    }

    fn author(&self) -> Option<&User> {
        match self {
            Tweet::Status(s) => s.author(),
            Tweet::Message(m) => m.author(),
        }
    }
}

impl From<Status> for Tweet {
    fn from(status: Status) -> Self {
        Tweet::Status(status)
    }
}

impl From<Message> for Tweet {
    fn from(message: Message) -> Self {
        Tweet::Message(message)
    }
}

impl std::fmt::Display for Tweet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.text())
    }
}
