//! # Agora Shared
//! This crate defines shared data structures and types used across the agora
//! backend. It includes common definitions for content entities (posts,
//! comments, subs, users), the vote ledger types, and aggregate vote counts.
pub mod types;
