//! Health Tracker Library
//!
//! Daily calorie estimation, user profiles and prompt assembly for the health tracker.

pub mod build_info;
pub mod calories;
pub mod config;
pub mod db;
pub mod mcp;
pub mod models;
pub mod prompts;
pub mod tools;

pub use calories::estimate;
