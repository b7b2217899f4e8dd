// src/system/mod.rs

pub mod launcher;
pub mod report;
