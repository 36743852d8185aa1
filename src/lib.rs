pub mod client;
pub mod config;
pub mod report;
pub mod types;
pub mod verifier;
