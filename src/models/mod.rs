//! Data models for requests, responses and the resources they carry.

pub mod request;
pub mod resource;
pub mod response;

pub use request::{HttpMethod, RequestOptions};
pub use resource::{Comment, NewPost, Post};
pub use response::ApiResponse;
