//! Test utilities and fixtures for Twitter client testing
//!
//! This module provides JSON fixture builders in the server's wire shape and
//! a scripted in-memory transport that records every request.

#![allow(dead_code)] // Not every helper is used by every test module

use crate::error::{Result, TwitterError};
use crate::transport::{HttpMethod, Params, Transport};
use async_trait::async_trait;
use chrono::{DateTime, TimeZone, Utc};
use std::collections::VecDeque;
use std::sync::Mutex;

/// JSON fixtures in the shape the REST API sends them
pub mod fixtures {
    use super::*;
    use serde_json::{json, Value};

    /// Reference timestamp in the REST API format
    pub const T0: &str = "Wed Mar 04 12:00:00 +0000 2009";

    /// [`T0`] as a UTC time
    pub fn t0() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2009, 3, 4, 12, 0, 0).unwrap()
    }

    /// A full user profile without an embedded status
    pub fn user_json(id: i64, screen_name: &str) -> Value {
        let mut display = screen_name.to_string();
        if let Some(first) = display.get_mut(0..1) {
            first.make_ascii_uppercase();
        }
        json!({
            "id": id,
            "screen_name": screen_name,
            "name": format!("{display} Example"),
            "location": null,
            "description": format!("Just {screen_name} testing things"),
            "profile_image_url":
                format!("http://a1.twimg.com/profile_images/{id}/{screen_name}_normal.png"),
            "url": null,
            "protected": false,
            "utc_offset": -18000,
            "time_zone": "Eastern Time (US & Canada)",
            "followers_count": 10
        })
    }

    /// A status with its author embedded
    pub fn status_json(id: i64, text: &str, screen_name: &str, created_at: &str) -> Value {
        let mut status = status_json_without_user(id, text, created_at);
        status["user"] = user_json(id + 1000, screen_name);
        status
    }

    /// A status as embedded inside a user profile
    pub fn status_json_without_user(id: i64, text: &str, created_at: &str) -> Value {
        json!({
            "id": id,
            "text": text,
            "created_at": created_at,
            "source": "web",
            "truncated": false,
            "in_reply_to_status_id": null
        })
    }

    /// A direct message; `recipient` is only present on sent messages
    pub fn message_json(
        id: i64,
        text: &str,
        sender: &str,
        recipient: Option<&str>,
        created_at: &str,
    ) -> Value {
        let mut message = json!({
            "id": id,
            "text": text,
            "created_at": created_at,
            "sender_screen_name": sender,
            "sender": user_json(id + 2000, sender)
        });
        if let Some(recipient) = recipient {
            message["recipient_screen_name"] = json!(recipient);
            message["recipient"] = user_json(id + 3000, recipient);
        }
        message
    }

    /// A timeline body of `count` statuses with consecutive ids
    pub fn timeline_body(start_id: i64, count: usize) -> String {
        let statuses: Vec<Value> = (0..count as i64)
            .map(|i| status_json(start_id + i, &format!("status {}", start_id + i), "alice", T0))
            .collect();
        Value::Array(statuses).to_string()
    }

    /// A body of `count` received direct messages with consecutive ids
    pub fn messages_body(start_id: i64, count: usize) -> String {
        let messages: Vec<Value> = (0..count as i64)
            .map(|i| {
                let id = start_id + i;
                message_json(id, &format!("message {id}"), "bob", None, T0)
            })
            .collect();
        Value::Array(messages).to_string()
    }
}

/// A request seen by [`ScriptedTransport`]
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedCall {
    pub method: HttpMethod,
    pub uri: String,
    pub params: Params,
    pub authenticate: bool,
}

/// In-memory transport that replays queued responses in order
///
/// Once the queue is empty every request fails with an API error.
pub struct ScriptedTransport {
    responses: Mutex<VecDeque<Result<String>>>,
    calls: Mutex<Vec<RecordedCall>>,
    can_authenticate: bool,
}

impl ScriptedTransport {
    /// A transport holding credentials
    pub fn new() -> Self {
        Self {
            responses: Mutex::new(VecDeque::new()),
            calls: Mutex::new(Vec::new()),
            can_authenticate: true,
        }
    }

    /// A transport without credentials
    pub fn anonymous() -> Self {
        Self {
            can_authenticate: false,
            ..Self::new()
        }
    }

    /// Queue a successful response body
    pub fn respond(self, body: impl Into<String>) -> Self {
        self.responses.lock().unwrap().push_back(Ok(body.into()));
        self
    }

    /// Queue a failure
    pub fn fail(self, error: TwitterError) -> Self {
        self.responses.lock().unwrap().push_back(Err(error));
        self
    }

    /// Every request made so far, oldest first
    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().unwrap().clone()
    }

    fn answer(
        &self,
        method: HttpMethod,
        uri: &str,
        params: &Params,
        authenticate: bool,
    ) -> Result<String> {
        self.calls.lock().unwrap().push(RecordedCall {
            method,
            uri: uri.to_string(),
            params: params.clone(),
            authenticate,
        });
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| {
                Err(TwitterError::api(None, format!("no scripted response for {uri}")))
            })
    }
}

#[async_trait]
impl Transport for ScriptedTransport {
    fn can_authenticate(&self) -> bool {
        self.can_authenticate
    }

    async fn get(&self, uri: &str, params: &Params, authenticate: bool) -> Result<String> {
        self.answer(HttpMethod::Get, uri, params, authenticate)
    }

    async fn post(&self, uri: &str, params: &Params, authenticate: bool) -> Result<String> {
        self.answer(HttpMethod::Post, uri, params, authenticate)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_t0_matches_wire_format() {
        assert_eq!(crate::model::parse_timestamp(fixtures::T0).unwrap(), fixtures::t0());
    }

    #[test]
    fn test_user_fixture_display_name() {
        assert_eq!(fixtures::user_json(1, "alice")["name"], "Alice Example");
    }

    #[tokio::test]
    async fn test_scripted_transport_replays_in_order() {
        let transport =
            ScriptedTransport::new().respond("one").fail(TwitterError::NotFound("x".into()));
        assert_eq!(transport.get("u1", &Params::new(), true).await.unwrap(), "one");
        assert!(transport.post("u2", &Params::new(), false).await.is_err());
        assert!(transport.get("u3", &Params::new(), true).await.is_err());
        let calls = transport.calls();
        assert_eq!(calls.len(), 3);
        assert_eq!(calls[1].method, HttpMethod::Post);
        assert!(!calls[1].authenticate);
    }
}
