//! Core library for IdeaForge.
//!
//! This crate provides the domain models and database operations for IdeaForge,
//! independent of any transport layer.
//!
//! # Usage
//!
//! ```no_run
//! use ideaforge_core::db::Database;
//! use ideaforge_core::models::*;
//!
//! let db = Database::open_default()?;
//! db.migrate()?;
//!
//! let ideas = db.list_ideas()?;
//! # Ok::<(), anyhow::Error>(())
//! ```

pub mod db;
pub mod models;

// Re-export commonly used types at crate root
pub use db::Database;
