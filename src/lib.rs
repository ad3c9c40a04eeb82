pub mod relay;
pub mod widget;

pub use relay::server::start_server;
