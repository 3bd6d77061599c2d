use super::Status;
use crate::json::{self, JsonArray, JsonError, JsonObject};
use serde::Serialize;
use std::hash::{Hash, Hasher};

/// A Twitter user
///
/// Identity is the screen name alone: two users are equal (and hash the same)
/// iff their screen names match, case-sensitively. This lets a dummy user
/// built with [`User::dummy`] stand in for a full profile in membership checks.
///
/// ```
/// use twitter_client::User;
///
/// let friends = vec![User::dummy("jtwit"), User::dummy("winterstein")];
/// assert!(friends.contains(&User::dummy("jtwit")));
/// ```
#[derive(Debug, Clone, Serialize)]
pub struct User {
    /// User id; -1 for dummy users
    pub id: i64,
    /// Login name, e.g. "winterstein"
    pub screen_name: String,
    /// Display name
    pub name: Option<String>,
    /// Free-text location
    pub location: Option<String>,
    /// Profile description
    pub description: Option<String>,
    /// URL of the profile picture
    pub profile_image_url: Option<String>,
    /// Link to the user's website
    pub website: Option<String>,
    /// Whether the user's updates are protected
    pub protected: bool,
    /// Seconds between the user's time zone and UTC; 0 if unknown
    pub timezone_offset: i32,
    /// Name of the user's time zone
    pub timezone: Option<String>,
    /// Current status, when the server embeds it
    pub status: Option<Box<Status>>,
}

impl User {
    /// Create a dummy user that only knows its screen name
    pub fn dummy(screen_name: impl Into<String>) -> Self {
        Self {
            id: -1,
            screen_name: screen_name.into(),
            name: None,
            location: None,
            description: None,
            profile_image_url: None,
            website: None,
            protected: false,
            timezone_offset: 0,
            timezone: None,
            status: None,
        }
    }

    /// Whether this is a dummy user built from a screen name only
    pub fn is_dummy(&self) -> bool {
        self.id == -1
    }

    /// Build a user from a JSON object, including its embedded status
    pub fn from_json(obj: &JsonObject<'_>) -> json::Result<Self> {
        Self::parse(obj, true)
    }

    /// Build the author of a status
    ///
    /// The author's own embedded status is not read again: the status being
    /// parsed is the one that references it.
    pub(crate) fn author_from_json(obj: &JsonObject<'_>) -> json::Result<Self> {
        Self::parse(obj, false)
    }

    fn parse(obj: &JsonObject<'_>, with_status: bool) -> json::Result<Self> {
        let screen_name = obj
            .get_string("screen_name")?
            .ok_or_else(|| JsonError::MissingField("screen_name".to_string()))?
            .to_string();

        let status = if with_status {
            match obj.opt_object("status")? {
                // The embedded status refers back to this user by screen name
                Some(s) => Some(Box::new(Status::from_json_with_author(
                    &s,
                    User::dummy(screen_name.clone()),
                )?)),
                None => None,
            }
        } else {
            None
        };

        let timezone_offset = match obj.opt_long("utc_offset")? {
            Some(offset) => i32::try_from(offset).map_err(|_| JsonError::WrongType {
                field: "utc_offset".to_string(),
                expected: "a 32-bit integer",
            })?,
            None => 0,
        };

        Ok(Self {
            id: obj.get_long("id")?,
            screen_name,
            name: obj.get_string("name")?.map(str::to_string),
            location: obj.get_string("location")?.map(str::to_string),
            description: obj.get_string("description")?.map(str::to_string),
            profile_image_url: obj.get_string("profile_image_url")?.map(str::to_string),
            website: obj.get_string("url")?.map(str::to_string),
            protected: obj.get_bool("protected")?,
            timezone_offset,
            timezone: obj.get_string("time_zone")?.map(str::to_string),
            status,
        })
    }
}

impl PartialEq for User {
    fn eq(&self, other: &Self) -> bool {
        self.screen_name == other.screen_name
    }
}

impl Eq for User {}

impl Hash for User {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.screen_name.hash(state);
    }
}

impl std::fmt::Display for User {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.screen_name)
    }
}

/// Parse a JSON array of users; a blank body means no users
pub(crate) fn users_from_json(text: &str) -> json::Result<Vec<User>> {
    if json::is_blank(text) {
        return Ok(Vec::new());
    }
    let doc = json::parse(text)?;
    JsonArray::from_value(&doc)?
        .objects()
        .map(|obj| obj.and_then(|o| User::from_json(&o)))
        .collect()
}
