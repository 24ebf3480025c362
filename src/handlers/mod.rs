//! HTTP handlers for the paste upload and view endpoints.

pub mod paste;
