//! CLI command implementations

pub mod utils;

pub mod completions;
pub mod config;
pub mod convert;
pub mod list;
pub mod mark;
pub mod reset;
pub mod show;
pub mod summary;
