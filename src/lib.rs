//! HTTP service for IdeaForge.
//!
//! Storage and models live in `ideaforge-core`; this crate adds the JSON API
//! and the command line entry point.

pub mod api;
pub mod config;

pub use ideaforge_core::{db, models};
