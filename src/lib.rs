pub mod cli;
pub mod error;
pub mod github;
pub mod loader;
pub mod models;
pub mod render;
pub mod server;
pub mod tally;
pub mod types;
