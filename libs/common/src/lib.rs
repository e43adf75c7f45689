//! Common library for the flashcard backend
//!
//! This crate provides shared infrastructure used by the API service:
//! PostgreSQL connection pooling and the database error types.

pub mod database;
pub mod error;
