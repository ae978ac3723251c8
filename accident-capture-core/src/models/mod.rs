pub mod capture;
pub mod config;
pub mod error;
pub mod permission;
pub mod report;
pub mod state;
