//! The inventory actor: sole owner of the product store.

mod inventory_service;

pub use inventory_service::*;
