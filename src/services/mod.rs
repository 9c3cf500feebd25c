// src/services/mod.rs

pub mod content;
pub mod credentials;
pub mod stats;
