// src/handlers/mod.rs

pub mod auth;
pub mod pages;
pub mod profile;
pub mod texts;
pub mod typing;
