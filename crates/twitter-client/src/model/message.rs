use super::{created_at, TweetView, User};
use crate::json::{self, JsonArray, JsonObject};
use chrono::{DateTime, Utc};
use serde::Serialize;

/// A direct message
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Message {
    /// Server-assigned id
    pub id: i64,
    /// Message text
    pub text: String,
    /// Creation time; `None` if the server did not send one
    pub created_at: Option<DateTime<Utc>>,
    /// Who sent it
    pub sender: User,
    /// Who received it; only present on messages the authenticating user sent
    pub recipient: Option<User>,
}

impl Message {
    /// Build a message from a JSON object
    pub fn from_json(obj: &JsonObject<'_>) -> json::Result<Self> {
        let recipient = if obj.has("recipient") {
            Some(User::from_json(&obj.get_object("recipient")?)?)
        } else {
            None
        };

        Ok(Self {
            id: obj.get_long("id")?,
            text: obj.get_string("text")?.unwrap_or_default().to_string(),
            created_at: created_at(obj)?,
            sender: User::from_json(&obj.get_object("sender")?)?,
            recipient,
        })
    }
}

impl TweetView for Message {
    fn id(&self) -> i64 {
        self.id
    }

    fn text(&self) -> &str {
        &self.text
    }

    fn created_at(&self) -> Option<DateTime<Utc>> {
        self.created_at
    }

    fn author(&self) -> Option<&User> {
        Some(&self.sender)
    }
}

impl std::fmt::Display for Message {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.text)
    }
}

/// Parse a JSON array of direct messages; a blank body means no messages
pub(crate) fn messages_from_json(text: &str) -> json::Result<Vec<Message>> {
    if json::is_blank(text) {
        return Ok(Vec::new());
    }
    let doc = json::parse(text)?;
    JsonArray::from_value(&doc)?
        .objects()
        .map(|obj| obj.and_then(|o| Message::from_json(&o)))
        .collect()
}
