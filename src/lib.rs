//! Showreel - media delivery server for the studio portfolio site
//!
//! This library crate exposes the core functionality for integration testing.

pub mod catalog;
pub mod config;
pub mod error;
pub mod playback;
pub mod server;
pub mod streaming;
