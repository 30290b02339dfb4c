//! HTTP 핸들러

pub mod health;
pub mod session;
pub mod tokens;
