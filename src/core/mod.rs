// src/core/mod.rs

pub mod engine;
pub mod environment;
pub mod expander;
pub mod loader;
pub mod locator;
pub mod parser;
