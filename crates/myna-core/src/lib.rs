//! # myna-core
//!
//! Configuration and error handling shared by the Myna bot.

pub mod config;
pub mod error;
