pub mod activation;
pub mod affordance;
pub mod app;
pub mod client;
pub mod components;
pub mod controller;
pub mod panel;
pub mod types;
