//! Data models for catalog actions

pub mod location;
pub mod request;
pub mod session;
