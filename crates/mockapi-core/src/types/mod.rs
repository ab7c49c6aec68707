//! Core domain types for users, groups, and their relations.

pub mod collection;
pub mod record;
pub mod relation;
