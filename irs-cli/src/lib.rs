pub mod app;
pub mod config;
pub mod report;
pub mod scenarios;
pub mod utils;
