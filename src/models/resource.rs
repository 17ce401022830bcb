//! Resource models for the demo REST service.
//!
//! `NewPost` is the payload sent on create/update; `Post` and `Comment` are
//! typed views of what the service returns.

use serde::{Deserialize, Serialize};

/// Payload for creating or replacing a post.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewPost {
    pub title: String,
    pub body: String,
    pub user_id: i64,
}

impl NewPost {
    pub fn new(title: impl Into<String>, body: impl Into<String>, user_id: i64) -> Self {
        Self {
            title: title.into(),
            body: body.into(),
            user_id,
        }
    }

    /// The standard fixture payload. Returns a fresh value on every call.
    pub fn sample() -> Self {
        Self::new(
            "Test Post from Automated Suite",
            "This is a comprehensive test of the API",
            1,
        )
    }
}

/// A post as returned by the service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    pub id: i64,
    pub user_id: i64,
    pub title: String,
    pub body: String,
}

impl Post {
    /// Builds the post a create call is expected to return.
    pub fn from_new(id: i64, new: &NewPost) -> Self {
        Self {
            id,
            user_id: new.user_id,
            title: new.title.clone(),
            body: new.body.clone(),
        }
    }
}

/// A comment attached to a post.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    pub post_id: i64,
    pub id: i64,
    pub name: String,
    pub email: String,
    pub body: String,
}
