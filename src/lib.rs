pub mod config;
pub mod handlers;
pub mod models;
pub mod moderation;
pub mod observability;
pub mod repositories;
pub mod services;

pub use config::Config;
pub use observability::{init_observability, shutdown_observability};
