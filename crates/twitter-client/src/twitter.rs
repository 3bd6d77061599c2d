//! Twitter - main client for the REST API
//!
//! [`Twitter`] builds endpoint URIs and parameter sets, applies the standing
//! filters (since-id, since-date, page number), drives multi-page fetches and
//! turns the raw responses into [`Status`], [`Message`] and [`User`] values.
//!
//! # Example
//!
//! ```rust,no_run
//! use twitter_client::Twitter;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let mut twitter = Twitter::new("my-name", "my-password")?;
//!
//!     // Print winterstein's status
//!     if let Some(status) = twitter.status_of("winterstein").await? {
//!         println!("{status}");
//!     }
//!
//!     // Set my status
//!     twitter.update_status("Messing about in Rust").await?;
//!     Ok(())
//! }
//! ```
//!
//! # Standing filters
//!
//! `since_id`, `since_date` and `max_results` apply to every later list call
//! until changed. The page number is consumed by the next list request only.
//! Because these live on the client, every list operation takes `&mut self`;
//! share a client between tasks only behind a `tokio::sync::Mutex`.

use crate::error::{ErrorKind, Result, TwitterError};
use crate::json::{self, JsonArray, JsonObject};
use crate::model::{
    messages_from_json, statuses_from_json, statuses_from_search, users_from_json, Message,
    Status, TweetView, User,
};
use crate::text;
use crate::transport::{HttpTransport, HttpTransportConfig, Params, Transport};
use chrono::{DateTime, Utc};
use std::sync::Arc;
use tracing::{debug, warn};

/// Number of items the server returns per page
pub const PAGE_SIZE: usize = 20;

/// Longest status text the server accepts
pub const MAX_STATUS_CHARS: usize = 160;

/// Longest direct message text the server accepts
pub const MAX_MESSAGE_CHARS: usize = 140;

/// Search results requested per page (server maximum)
pub const SEARCH_RESULTS_PER_PAGE: u32 = 100;

/// Default REST endpoint
pub const DEFAULT_API_URL: &str = "http://twitter.com";

/// Default search endpoint
pub const DEFAULT_SEARCH_URL: &str = "http://search.twitter.com";

/// Default source label attached to posted updates
pub const DEFAULT_SOURCE: &str = "fringuello";

/// Outcome of a follow or stop-following request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FriendshipOutcome {
    /// The relationship changed; carries the user returned by the server
    Changed(User),
    /// Nothing to do: already following (or already not following)
    Unchanged,
}

impl FriendshipOutcome {
    /// Whether the server changed the relationship
    pub fn is_changed(&self) -> bool {
        matches!(self, FriendshipOutcome::Changed(_))
    }

    /// The user returned by the server, if the relationship changed
    pub fn user(&self) -> Option<&User> {
        match self {
            FriendshipOutcome::Changed(user) => Some(user),
            FriendshipOutcome::Unchanged => None,
        }
    }
}

/// Configuration for [`Twitter`]
#[derive(Debug, Clone)]
pub struct TwitterConfig {
    /// Base URL of the REST API
    pub api_url: String,
    /// Base URL of the search API
    pub search_url: String,
    /// Screen name of the authenticating user, if known
    pub screen_name: Option<String>,
    /// Source label for posted updates; `None` for no label
    pub source_app: Option<String>,
    /// Result cap for multi-page fetches; below 1 means a single page
    pub max_results: i32,
    /// Transport configuration (used by [`Twitter::with_config`])
    pub transport: HttpTransportConfig,
}

impl Default for TwitterConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            search_url: DEFAULT_SEARCH_URL.to_string(),
            screen_name: None,
            source_app: Some(DEFAULT_SOURCE.to_string()),
            max_results: -1,
            transport: HttpTransportConfig::default(),
        }
    }
}

impl TwitterConfig {
    /// Create a configuration with default endpoints and no user
    pub fn new() -> Self {
        Self::default()
    }

    /// Read the configuration from `TWITTER_*` environment variables
    ///
    /// Recognised: `TWITTER_USERNAME`, `TWITTER_PASSWORD`, `TWITTER_API_URL`,
    /// `TWITTER_SEARCH_URL`, `TWITTER_SOURCE` (empty for no label).
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();
        if let Some(url) = lookup("TWITTER_API_URL") {
            config = config.with_api_url(url);
        }
        if let Some(url) = lookup("TWITTER_SEARCH_URL") {
            config = config.with_search_url(url);
        }
        if let Some(source) = lookup("TWITTER_SOURCE") {
            config.source_app = Some(source).filter(|s| !s.is_empty());
        }
        match (lookup("TWITTER_USERNAME"), lookup("TWITTER_PASSWORD")) {
            (Some(user), Some(password)) => config = config.with_credentials(user, password),
            (Some(user), None) => config = config.with_screen_name(user),
            _ => {}
        }
        config
    }

    /// Set the REST API base URL
    pub fn with_api_url(mut self, url: impl Into<String>) -> Self {
        self.api_url = url.into();
        self
    }

    /// Set the search API base URL
    pub fn with_search_url(mut self, url: impl Into<String>) -> Self {
        self.search_url = url.into();
        self
    }

    /// Set the authenticating user's screen name without credentials
    pub fn with_screen_name(mut self, screen_name: impl Into<String>) -> Self {
        self.screen_name = Some(screen_name.into());
        self
    }

    /// Set the screen name and the basic-auth credentials in one go
    pub fn with_credentials(
        mut self,
        screen_name: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        let screen_name = screen_name.into();
        self.transport = self.transport.with_credentials(screen_name.clone(), password);
        self.screen_name = Some(screen_name);
        self
    }

    /// Set the source label; `None` suppresses it
    pub fn with_source(mut self, source_app: Option<String>) -> Self {
        self.source_app = source_app;
        self
    }

    /// Set the multi-page result cap
    pub fn with_max_results(mut self, max_results: i32) -> Self {
        self.max_results = max_results;
        self
    }

    /// Set the transport configuration
    pub fn with_transport_config(mut self, transport: HttpTransportConfig) -> Self {
        self.transport = transport;
        self
    }
}

/// Main client for the Twitter REST API
///
/// Operations run their HTTP round trips one after another and return only
/// once every page has arrived or one request has failed; a failure on any
/// page fails the whole call.
pub struct Twitter {
    /// REST API base URL, without trailing slash
    api_url: String,
    /// Search API base URL, without trailing slash
    search_url: String,
    /// Authenticating user's screen name
    screen_name: Option<String>,
    /// Transport for all requests
    http: Arc<dyn Transport>,
    /// Source label for posted updates
    source_app: Option<String>,
    /// Only return items newer than this id
    since_id: Option<i64>,
    /// Client-side date filter
    since_date: Option<DateTime<Utc>>,
    /// Page for the next list request only
    page_number: Option<u32>,
    /// Multi-page cap; below 1 means a single page
    max_results: i32,
}

impl Twitter {
    /// Create a client for a user with the default configuration
    pub fn new(screen_name: impl Into<String>, password: impl Into<String>) -> Result<Self> {
        Self::with_config(TwitterConfig::new().with_credentials(screen_name, password))
    }

    /// Create a client without a user; only public endpoints will work
    pub fn anonymous() -> Result<Self> {
        Self::with_config(TwitterConfig::new())
    }

    /// Create a client over an [`HttpTransport`] built from `config.transport`
    pub fn with_config(config: TwitterConfig) -> Result<Self> {
        let transport = HttpTransport::new(config.transport.clone())?;
        Ok(Self::with_transport(config, Arc::new(transport)))
    }

    /// Create a client over a custom transport
    ///
    /// `config.transport` is ignored; the given transport is used as is.
    pub fn with_transport(config: TwitterConfig, transport: Arc<dyn Transport>) -> Self {
        Self {
            api_url: config.api_url.trim_end_matches('/').to_string(),
            search_url: config.search_url.trim_end_matches('/').to_string(),
            screen_name: config.screen_name,
            http: transport,
            source_app: config.source_app,
            since_id: None,
            since_date: None,
            page_number: None,
            max_results: config.max_results,
        }
    }

    // =========================================================================
    // Standing filters
    // =========================================================================

    /// Screen name of the authenticating user, if known
    pub fn screen_name(&self) -> Option<&str> {
        self.screen_name.as_deref()
    }

    /// Whether the transport can send credentials
    pub fn can_authenticate(&self) -> bool {
        self.http.can_authenticate()
    }

    /// Only return statuses and messages newer than this id
    ///
    /// Sticks until set back to `None`. With a high
    /// [`max_results`](Self::set_max_results) this keeps API usage down.
    pub fn set_since_id(&mut self, since_id: Option<i64>) {
        self.since_id = since_id;
    }

    /// Current since-id filter
    pub fn since_id(&self) -> Option<i64> {
        self.since_id
    }

    /// Keep only statuses and messages created at or after this time
    ///
    /// Filtering happens client-side, after each page is parsed, so a single
    /// page may come back with fewer than 20 items. Items whose creation time
    /// is unknown are kept.
    pub fn set_since_date(&mut self, since_date: Option<DateTime<Utc>>) {
        self.since_date = since_date;
    }

    /// Current since-date filter
    pub fn since_date(&self) -> Option<DateTime<Utc>> {
        self.since_date
    }

    /// Request this page (1-based) in the next list call only
    pub fn set_page_number(&mut self, page_number: u32) {
        self.page_number = Some(page_number);
    }

    /// Page number waiting for the next list call
    pub fn page_number(&self) -> Option<u32> {
        self.page_number
    }

    /// Fetch pages until a short page arrives or more than this many items
    /// have been collected
    ///
    /// Below 1 (the default) every list call fetches a single page. When
    /// raising it, also set a since-id or since-date, or the rate limit goes
    /// quickly.
    pub fn set_max_results(&mut self, max_results: i32) {
        self.max_results = max_results;
    }

    /// Current multi-page cap
    pub fn max_results(&self) -> i32 {
        self.max_results
    }

    /// Set the source label shown next to posted updates; `None` for none
    ///
    /// The label must be registered with the server, otherwise it shows as
    /// "web".
    pub fn set_source(&mut self, source_app: Option<String>) {
        self.source_app = source_app;
    }

    /// Current source label
    pub fn source(&self) -> Option<&str> {
        self.source_app.as_deref()
    }

    // =========================================================================
    // Request plumbing
    // =========================================================================

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.api_url, path)
    }

    fn require_screen_name(&self) -> Result<&str> {
        self.screen_name
            .as_deref()
            .ok_or_else(|| TwitterError::validation("no authenticating user configured"))
    }

    /// Merge since-id and the one-shot page number into `params`
    fn add_standard_params(&mut self, params: &mut Params) {
        if let Some(since_id) = self.since_id {
            params.set("since_id", since_id.to_string());
        }
        if let Some(page) = self.page_number.take() {
            params.set("page", page.to_string());
        }
    }

    fn standard_params(&mut self) -> Params {
        let mut params = Params::new();
        self.add_standard_params(&mut params);
        params
    }

    fn date_filter<T: TweetView>(&self, items: Vec<T>) -> Vec<T> {
        match self.since_date {
            None => items,
            Some(since) => items
                .into_iter()
                .filter(|item| item.created_at().map_or(true, |created| created >= since))
                .collect(),
        }
    }

    /// Fetch a list endpoint, following pages when `max_results` is set
    ///
    /// The stop decision looks at the unfiltered page size: a page that the
    /// date filter thinned out may still have more pages behind it.
    async fn fetch_list<T, F>(
        &mut self,
        uri: &str,
        mut params: Params,
        authenticate: bool,
        parse: F,
    ) -> Result<Vec<T>>
    where
        T: TweetView,
        F: Fn(&str) -> json::Result<Vec<T>>,
    {
        if self.max_results < 1 {
            let body = self.http.get(uri, &params, authenticate).await?;
            let items = parse(&body)?;
            debug!(uri, count = items.len(), "fetched single page");
            return Ok(self.date_filter(items));
        }

        let max_results = usize::try_from(self.max_results).unwrap_or(usize::MAX);
        let mut items = Vec::new();
        let mut page: u32 = 1;

        while items.len() <= max_results {
            params.set("page", page.to_string());
            let body = self.http.get(uri, &params, authenticate).await?;
            let next_page = parse(&body)?;
            let raw_count = next_page.len();
            items.extend(self.date_filter(next_page));
            debug!(uri, page, raw_count, total = items.len(), "fetched page");

            if raw_count < PAGE_SIZE {
                break;
            }
            page += 1;
        }

        Ok(items)
    }

    async fn fetch_statuses(
        &mut self,
        uri: &str,
        params: Params,
        authenticate: bool,
    ) -> Result<Vec<Status>> {
        self.fetch_list(uri, params, authenticate, statuses_from_json).await
    }

    async fn fetch_messages(&mut self, uri: &str, params: Params) -> Result<Vec<Message>> {
        self.fetch_list(uri, params, true, messages_from_json).await
    }

    async fn fetch_users(&self, uri: &str) -> Result<Vec<User>> {
        let body = self.http.get(uri, &Params::new(), true).await?;
        Ok(users_from_json(&body)?)
    }

    async fn fetch_ids(&self, uri: &str) -> Result<Vec<i64>> {
        let body = self.http.get(uri, &Params::new(), true).await?;
        if json::is_blank(&body) {
            return Ok(Vec::new());
        }
        let doc = json::parse(&body)?;
        Ok(JsonArray::from_value(&doc)?.longs()?)
    }

    async fn fetch_user(&self, uri: &str, authenticate: bool) -> Result<User> {
        let body = self.http.get(uri, &Params::new(), authenticate).await?;
        parse_object(&body, User::from_json)
    }

    async fn post_for_user(&self, uri: &str) -> Result<User> {
        let body = self.http.post(uri, &Params::new(), true).await?;
        parse_object(&body, User::from_json)
    }

    // =========================================================================
    // Timelines
    // =========================================================================

    /// The 20 most recent statuses from non-protected users
    ///
    /// The server refreshes this every 60 seconds.
    pub async fn public_timeline(&mut self) -> Result<Vec<Status>> {
        let uri = self.endpoint("statuses/public_timeline.json");
        let params = self.standard_params();
        self.fetch_statuses(&uri, params, true).await
    }

    /// Recent statuses from the authenticating user and their friends
    pub async fn friends_timeline(&mut self) -> Result<Vec<Status>> {
        let uri = self.endpoint("statuses/friends_timeline.json");
        let params = self.standard_params();
        self.fetch_statuses(&uri, params, true).await
    }

    /// Recent statuses from the given user and their friends
    pub async fn friends_timeline_of(&mut self, id: &str) -> Result<Vec<Status>> {
        let uri = self.endpoint("statuses/friends_timeline.json");
        let mut params = Params::new().with("id", id);
        self.add_standard_params(&mut params);
        self.fetch_statuses(&uri, params, true).await
    }

    /// Recent statuses from the authenticating user
    pub async fn user_timeline(&mut self) -> Result<Vec<Status>> {
        let uri = self.endpoint("statuses/user_timeline.json");
        let params = self.standard_params();
        self.fetch_statuses(&uri, params, true).await
    }

    /// Recent statuses from the given user
    ///
    /// Authenticates when the transport can, which is needed to read a
    /// protected user's timeline.
    pub async fn user_timeline_of(&mut self, id: &str) -> Result<Vec<Status>> {
        let uri = self.endpoint("statuses/user_timeline.json");
        let mut params = Params::new().with("id", id);
        self.add_standard_params(&mut params);
        let authenticate = self.http.can_authenticate();
        self.fetch_statuses(&uri, params, authenticate).await
    }

    /// Recent statuses mentioning the authenticating user
    pub async fn replies(&mut self) -> Result<Vec<Status>> {
        let uri = self.endpoint("statuses/replies.json");
        let params = self.standard_params();
        self.fetch_statuses(&uri, params, true).await
    }

    // =========================================================================
    // Direct messages
    // =========================================================================

    /// Direct messages sent to the authenticating user
    pub async fn direct_messages(&mut self) -> Result<Vec<Message>> {
        let uri = self.endpoint("direct_messages.json");
        let params = self.standard_params();
        self.fetch_messages(&uri, params).await
    }

    /// Direct messages sent by the authenticating user
    pub async fn direct_messages_sent(&mut self) -> Result<Vec<Message>> {
        let uri = self.endpoint("direct_messages/sent.json");
        let params = self.standard_params();
        self.fetch_messages(&uri, params).await
    }

    /// Send a direct message
    ///
    /// Fails with a validation error, without any request, if `text` is
    /// longer than 140 characters.
    pub async fn send_message(&self, recipient: &str, text: &str) -> Result<Message> {
        let length = text.chars().count();
        if length > MAX_MESSAGE_CHARS {
            return Err(TwitterError::validation(format!(
                "Message text must be {MAX_MESSAGE_CHARS} characters or less: {length}"
            )));
        }

        let uri = self.endpoint("direct_messages/new.json");
        let params = Params::new().with("user", recipient).with("text", text);
        let body = self.http.post(&uri, &params, true).await?;
        parse_object(&body, Message::from_json)
    }

    // =========================================================================
    // Statuses
    // =========================================================================

    /// The authenticating user's latest status; `None` if they never posted
    pub async fn status(&self) -> Result<Option<Status>> {
        let uri = self.endpoint("statuses/user_timeline.json");
        let params = Params::new().with("count", "1");
        let body = self.http.get(&uri, &params, true).await?;
        Ok(statuses_from_json(&body)?.into_iter().next())
    }

    /// A single status by id, with its author inline
    pub async fn status_by_id(&self, id: i64) -> Result<Status> {
        let uri = self.endpoint(&format!("statuses/show/{id}.json"));
        let body = self.http.get(&uri, &Params::new(), true).await?;
        parse_object(&body, Status::from_json)
    }

    /// The given user's latest status; `None` if they never posted
    pub async fn status_of(&self, screen_name: &str) -> Result<Option<Status>> {
        let uri = self.endpoint("statuses/user_timeline.json");
        let params = Params::new().with("id", screen_name).with("count", "1");
        let body = self.http.get(&uri, &params, false).await?;
        Ok(statuses_from_json(&body)?.into_iter().next())
    }

    /// Post a new status for the authenticating user
    ///
    /// Text over 160 characters is rejected before any request is made;
    /// keep it to 140 for the best display.
    pub async fn update_status(&self, text: &str) -> Result<Status> {
        let length = text.chars().count();
        if length > MAX_STATUS_CHARS {
            return Err(TwitterError::validation(format!(
                "Status text must be {MAX_STATUS_CHARS} characters or less: {length}"
            )));
        }

        let uri = self.endpoint("statuses/update.json");
        let mut params = Params::new().with("status", text);
        if let Some(source) = &self.source_app {
            params.set("source", source.as_str());
        }
        let body = self.http.post(&uri, &params, true).await?;
        let status = parse_object(&body, Status::from_json)?;
        debug!(id = status.id, "status updated");
        Ok(status)
    }

    /// Delete one of the authenticating user's statuses
    ///
    /// Sends two requests: the server does not make a deletion visible until
    /// the user's own timeline has been read again.
    pub async fn destroy_status(&self, id: i64) -> Result<()> {
        let uri = self.endpoint(&format!("statuses/destroy/{id}.json"));
        self.http.post(&uri, &Params::new(), true).await?;

        let refresh = self.endpoint("statuses/user_timeline.json");
        self.http.get(&refresh, &Params::new().with("count", "1"), true).await?;
        debug!(id, "status destroyed");
        Ok(())
    }

    /// Split a long text into chunks that can be posted one by one
    pub fn split_message(long_text: &str) -> Vec<String> {
        text::split_message(long_text)
    }

    // =========================================================================
    // Friendships
    // =========================================================================

    /// Start following a user
    ///
    /// A 403 is checked against the current relationship: if the user is
    /// already followed the result is [`FriendshipOutcome::Unchanged`],
    /// otherwise the 403 is returned.
    pub async fn follow(&self, screen_name: &str) -> Result<FriendshipOutcome> {
        let uri = self.endpoint(&format!("friendships/create/{screen_name}.json"));
        match self.post_for_user(&uri).await {
            Ok(user) => Ok(FriendshipOutcome::Changed(user)),
            Err(err) if err.kind() == ErrorKind::Forbidden => {
                match self.is_following(screen_name).await {
                    Ok(true) => {
                        warn!(screen_name, "follow rejected: already following");
                        Ok(FriendshipOutcome::Unchanged)
                    }
                    Ok(false) => Err(err),
                    Err(check) => {
                        warn!(screen_name, error = %check, "could not verify follow state");
                        Err(err)
                    }
                }
            }
            Err(err) => Err(err),
        }
    }

    /// Stop following a user
    ///
    /// On failure, checks whether the user was followed at all; if not, the
    /// result is [`FriendshipOutcome::Unchanged`].
    pub async fn stop_following(&self, screen_name: &str) -> Result<FriendshipOutcome> {
        let uri = self.endpoint(&format!("friendships/destroy/{screen_name}.json"));
        match self.post_for_user(&uri).await {
            Ok(user) => Ok(FriendshipOutcome::Changed(user)),
            Err(err) => match self.is_following(screen_name).await {
                Ok(false) => {
                    warn!(screen_name, error = %err, "stop following failed: was not following");
                    Ok(FriendshipOutcome::Unchanged)
                }
                Ok(true) => Err(err),
                Err(check) => {
                    warn!(screen_name, error = %check, "could not verify follow state");
                    Err(err)
                }
            },
        }
    }

    /// Is `follower` following `followed`?
    ///
    /// A 403 here can mean one of the users protects their updates.
    pub async fn is_follower_of(&self, follower: &str, followed: &str) -> Result<bool> {
        let uri = self.endpoint("friendships/exists.json");
        let params = Params::new().with("user_a", follower).with("user_b", followed);
        let body = self.http.get(&uri, &params, true).await?;
        let exists: bool = serde_json::from_str(body.trim()).map_err(json::JsonError::from)?;
        Ok(exists)
    }

    /// Is the authenticating user followed by `screen_name`?
    pub async fn is_follower(&self, screen_name: &str) -> Result<bool> {
        let me = self.require_screen_name()?;
        self.is_follower_of(screen_name, me).await
    }

    /// Does the authenticating user follow `screen_name`?
    pub async fn is_following(&self, screen_name: &str) -> Result<bool> {
        let me = self.require_screen_name()?;
        self.is_follower_of(me, screen_name).await
    }

    /// The authenticating user's followers, each with their status inline
    pub async fn followers(&self) -> Result<Vec<User>> {
        self.fetch_users(&self.endpoint("statuses/followers.json")).await
    }

    /// The users the authenticating user follows, each with their status inline
    ///
    /// Updates to this list show up with a small delay.
    pub async fn friends(&self) -> Result<Vec<User>> {
        self.fetch_users(&self.endpoint("statuses/friends.json")).await
    }

    /// The users the given user follows
    pub async fn friends_of(&self, screen_name: &str) -> Result<Vec<User>> {
        self.fetch_users(&self.endpoint(&format!("statuses/friends/{screen_name}.json"))).await
    }

    /// Ids of the authenticating user's followers
    pub async fn follower_ids(&self) -> Result<Vec<i64>> {
        self.fetch_ids(&self.endpoint("followers/ids.json")).await
    }

    /// Ids of the given user's followers
    pub async fn follower_ids_of(&self, screen_name: &str) -> Result<Vec<i64>> {
        self.fetch_ids(&self.endpoint(&format!("followers/ids/{screen_name}.json"))).await
    }

    /// Ids of the users the authenticating user follows
    pub async fn friend_ids(&self) -> Result<Vec<i64>> {
        self.fetch_ids(&self.endpoint("friends/ids.json")).await
    }

    /// Ids of the users the given user follows
    pub async fn friend_ids_of(&self, screen_name: &str) -> Result<Vec<i64>> {
        self.fetch_ids(&self.endpoint(&format!("friends/ids/{screen_name}.json"))).await
    }

    /// Authors of the public timeline
    ///
    /// Statuses that arrive without an author are skipped, so the result can
    /// be shorter than the timeline.
    pub async fn featured(&mut self) -> Result<Vec<User>> {
        let statuses = self.public_timeline().await?;
        Ok(statuses.into_iter().filter_map(|s| s.user).collect())
    }

    // =========================================================================
    // Users
    // =========================================================================

    /// Profile of a user by id or screen name
    ///
    /// Fails with [`ErrorKind::NotFound`] if the user does not exist or has
    /// been suspended.
    pub async fn show(&self, id: &str) -> Result<User> {
        let uri = self.endpoint(&format!("users/show/{id}.json"));
        let authenticate = self.http.can_authenticate();
        self.fetch_user(&uri, authenticate).await
    }

    /// Whether a user exists (and is not suspended)
    pub async fn user_exists(&self, id: &str) -> Result<bool> {
        let uri = self.endpoint(&format!("users/show/{id}.json"));
        match self.http.get(&uri, &Params::new(), true).await {
            Ok(_) => Ok(true),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(false),
            Err(err) => Err(err),
        }
    }

    /// Turn on notifications for a user who is already a friend
    pub async fn notify(&self, screen_name: &str) -> Result<User> {
        let uri = self.endpoint(&format!("notifications/follow/{screen_name}.json"));
        self.fetch_user(&uri, true).await
    }

    /// Turn off notifications for a user who is already a friend
    pub async fn leave_notifications(&self, screen_name: &str) -> Result<User> {
        let uri = self.endpoint(&format!("notifications/leave/{screen_name}.json"));
        self.fetch_user(&uri, true).await
    }

    /// Requests left before the hourly limit
    ///
    /// If this is negative, stop using this login for a while. Calling it
    /// does not count against the limit.
    pub async fn rate_limit_status(&self) -> Result<i32> {
        let uri = self.endpoint("account/rate_limit_status.json");
        let body = self.http.get(&uri, &Params::new(), true).await?;
        parse_object(&body, |obj| obj.get_int("remaining_hits"))
    }

    // =========================================================================
    // Search
    // =========================================================================

    /// Search statuses
    ///
    /// The authors of the returned statuses are dummy users: only the screen
    /// name is known. Use [`show`](Self::show) for the full profile.
    pub async fn search(&mut self, term: &str) -> Result<Vec<Status>> {
        let uri = format!("{}/search.json", self.search_url);
        let mut params = Params::new()
            .with("rpp", SEARCH_RESULTS_PER_PAGE.to_string())
            .with("q", term);
        self.add_standard_params(&mut params);

        let body = self.http.get(&uri, &params, true).await?;
        let results = statuses_from_search(&body)?;
        debug!(term, count = results.len(), "search results");
        Ok(self.date_filter(results))
    }
}

/// Parse a response holding a single JSON object
fn parse_object<T>(
    body: &str,
    build: impl FnOnce(&JsonObject<'_>) -> json::Result<T>,
) -> Result<T> {
    let doc = json::parse(body)?;
    let obj = JsonObject::from_value(&doc)?;
    Ok(build(&obj)?)
}
