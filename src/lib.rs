// src/lib.rs

pub mod config;
pub mod consolidate;
pub mod corrections;
pub mod error;
pub mod patch;
pub mod report;
pub mod scan;
pub mod schema;
pub mod table;
