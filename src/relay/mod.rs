pub mod config;
pub mod envelope;
pub mod server;
pub mod upstream;
