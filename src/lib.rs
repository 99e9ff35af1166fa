#![forbid(unsafe_code)]

pub mod adapters;
pub mod agents;
pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod platform;
pub mod prompt;
pub mod pull;
pub mod reconcile;
pub mod sync;
pub mod trace;
pub mod utils;
pub mod version;
