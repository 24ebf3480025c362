//! Data models for persisted pastes and API payloads.

pub mod paste;

#[cfg(test)]
mod tests;
