//! FEC: Fire Extinguisher Checker
//!
//! Tracks monthly inspection status of fire extinguishers listed in a CSV or
//! JSON inventory, with timestamped backups on every save.

pub mod cli;
pub mod core;
pub mod json;
