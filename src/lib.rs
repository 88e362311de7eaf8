//! Vidsplit - split a video into fixed-length segments
//!
//! This library crate exposes the core functionality for integration testing.

pub mod config;
pub mod library;
pub mod probe;
pub mod session;
