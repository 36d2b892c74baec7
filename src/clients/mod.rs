//! Client handles for talking to the actors.

#[macro_use]
mod macros;
mod inventory_client;

pub use inventory_client::*;
