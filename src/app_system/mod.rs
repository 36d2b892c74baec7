//! System orchestration: configuration, tracing, startup and shutdown.

pub mod config;
pub mod inventory_system;
pub mod tracing;

pub use config::*;
pub use inventory_system::*;
pub use self::tracing::*;
