//! browser-ctl library
//!
//! Resolves a piece of text into browser destinations: addresses are opened
//! as-is, everything else becomes a web search, a translation, or a
//! Wikipedia lookup that cascades across language editions.

pub mod address;
pub mod cli;
pub mod config;
pub mod desktop;
pub mod dispatch;
pub mod logging;
pub mod query;
pub mod search;
