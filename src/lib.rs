pub mod browser;
pub mod config;
pub mod error;
pub mod output;
pub mod results;
pub mod scoring;
pub mod season;
