// src/models/mod.rs

pub mod attempt;
pub mod text;
pub mod user;
