//! Configuration and seed data loading.

pub mod error;
pub mod parser;
pub mod seed;
pub mod settings;
