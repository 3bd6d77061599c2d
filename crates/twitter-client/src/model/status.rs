use super::{created_at, TweetView, User};
use crate::json::{self, JsonArray, JsonObject};
use crate::text;
use chrono::{DateTime, Utc};
use serde::Serialize;

/// A status post
///
/// `Display` prints the status text. To change your status use
/// [`Twitter::update_status`](crate::Twitter::update_status) and
/// [`Twitter::destroy_status`](crate::Twitter::destroy_status).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Status {
    /// Server-assigned id
    pub id: i64,
    /// Status text
    pub text: String,
    /// Creation time; `None` if the server did not send one
    pub created_at: Option<DateTime<Utc>>,
    /// Author; a dummy user for search results
    pub user: Option<User>,
    /// Posting client label, e.g. "web"
    pub source: Option<String>,
}

impl Status {
    /// Build a status from a JSON object with the author embedded under `user`
    pub fn from_json(obj: &JsonObject<'_>) -> json::Result<Self> {
        let user = obj.opt_object("user")?.map(|u| User::author_from_json(&u)).transpose()?;
        Self::build(obj, user)
    }

    /// Build a status whose author is already known
    pub(crate) fn from_json_with_author(obj: &JsonObject<'_>, author: User) -> json::Result<Self> {
        Self::build(obj, Some(author))
    }

    fn build(obj: &JsonObject<'_>, user: Option<User>) -> json::Result<Self> {
        Ok(Self {
            id: obj.get_long("id")?,
            text: obj.get_string("text")?.unwrap_or_default().to_string(),
            created_at: created_at(obj)?,
            user,
            source: obj.get_string("source")?.map(str::to_string),
        })
    }

    /// Screen names mentioned with `@`, lowercased, in order of appearance
    ///
    /// There is no guarantee these are real accounts. `@` signs glued to a
    /// preceding word (e-mail addresses) are ignored.
    pub fn mentions(&self) -> Vec<String> {
        text::mentions(&self.text)
    }
}

impl TweetView for Status {
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
        self.user.as_ref()
    }
}

impl std::fmt::Display for Status {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.text)
    }
}

/// Parse a timeline: a JSON array of statuses; a blank body means no statuses
pub(crate) fn statuses_from_json(text: &str) -> json::Result<Vec<Status>> {
    if json::is_blank(text) {
        return Ok(Vec::new());
    }
    let doc = json::parse(text)?;
    JsonArray::from_value(&doc)?
        .objects()
        .map(|obj| obj.and_then(|o| Status::from_json(&o)))
        .collect()
}

/// Parse a search response
///
/// Results sit under `results` and carry only a flat `from_user` screen name,
/// so every author is a dummy user.
pub(crate) fn statuses_from_search(text: &str) -> json::Result<Vec<Status>> {
    if json::is_blank(text) {
        return Ok(Vec::new());
    }
    let doc = json::parse(text)?;
    let envelope = JsonObject::from_value(&doc)?;
    envelope
        .get_array("results")?
        .objects()
        .map(|obj| {
            let obj = obj?;
            let from_user = obj.get_string("from_user")?.unwrap_or_default();
            Status::from_json_with_author(&obj, User::dummy(from_user))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::fixtures;
    use serde_json::json;

    #[test]
    fn test_status_from_json() {
        let value = fixtures::status_json(42, "hello @bob", "alice", fixtures::T0);
        let status = Status::from_json(&JsonObject::from_value(&value).unwrap()).unwrap();
        assert_eq!(status.id, 42);
        assert_eq!(status.text, "hello @bob");
        assert_eq!(status.source.as_deref(), Some("web"));
        assert_eq!(status.created_at, Some(fixtures::t0()));
        let author = status.user.as_ref().unwrap();
        assert_eq!(author.screen_name, "alice");
        assert!(author.status.is_none());
        assert_eq!(status.to_string(), "hello @bob");
    }

    #[test]
    fn test_status_without_author_or_date() {
        let value = json!({"id": 1, "text": "anon", "source": "web"});
        let status = Status::from_json(&JsonObject::from_value(&value).unwrap()).unwrap();
        assert!(status.user.is_none());
        assert!(status.created_at.is_none());
    }

    #[test]
    fn test_status_bad_date_is_an_error() {
        let value = json!({"id": 1, "text": "x", "created_at": "not a date"});
        assert!(Status::from_json(&JsonObject::from_value(&value).unwrap()).is_err());
    }

    #[test]
    fn test_status_mentions() {
        let text = "hello @Bob and @carol, cc user@example.com";
        let value = fixtures::status_json(1, text, "a", fixtures::T0);
        let status = Status::from_json(&JsonObject::from_value(&value).unwrap()).unwrap();
        assert_eq!(status.mentions(), vec!["bob", "carol"]);
    }

    #[test]
    fn test_statuses_preserve_order() {
        let body = fixtures::timeline_body(100, 5);
        let statuses = statuses_from_json(&body).unwrap();
        let ids: Vec<i64> = statuses.iter().map(|s| s.id).collect();
        assert_eq!(ids, vec![100, 101, 102, 103, 104]);
    }

    #[test]
    fn test_statuses_blank_body() {
        assert!(statuses_from_json("").unwrap().is_empty());
        assert!(statuses_from_json(" \r\n ").unwrap().is_empty());
    }

    #[test]
    fn test_statuses_malformed_body() {
        assert!(statuses_from_json("[{\"id\": \"oops\"}]").is_err());
        assert!(statuses_from_json("not json").is_err());
    }

    #[test]
    fn test_statuses_from_search() {
        let body = json!({
            "results": [
                {"id": 5, "text": "rust is fun", "from_user": "carol",
                 "created_at": "Wed, 04 Mar 2009 12:00:00 +0000", "source": "web"},
                {"id": 6, "text": "@carol agreed", "from_user": "dave",
                 "created_at": "Wed, 04 Mar 2009 12:05:00 +0000"}
            ],
            "query": "rust"
        })
        .to_string();
        let statuses = statuses_from_search(&body).unwrap();
        assert_eq!(statuses.len(), 2);
        let author = statuses[0].user.as_ref().unwrap();
        assert!(author.is_dummy());
        assert_eq!(author, &User::dummy("carol"));
        assert_eq!(statuses[1].mentions(), vec!["carol"]);
    }

    #[test]
    fn test_search_requires_results_envelope() {
        let body = fixtures::timeline_body(1, 2);
        assert!(statuses_from_search(&body).is_err());
    }
}
