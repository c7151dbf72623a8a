//! Core types, trait definitions and services for the Academia gym backend.
//!
//! This crate is deliberately free of HTTP and database dependencies.
//! Storage backends implement [`store::GymStore`] and [`photo::PhotoStore`];
//! the services in [`roster`], [`catalog`] and [`assembly`] are written
//! against those traits only.

// We intentionally use native `async fn` in traits (stabilised in Rust 1.75).
// Suppress the advisory lint about `Send` bounds on the returned futures.
#![allow(async_fn_in_trait)]

pub mod assembly;
pub mod catalog;
pub mod error;
pub mod exercise;
mod fields;
pub mod person;
pub mod photo;
pub mod plan;
pub mod roster;
pub mod store;

pub use error::{EntityKind, Error, Result};

/// System-assigned identifier shared by every entity kind.
pub type Id = i64;
