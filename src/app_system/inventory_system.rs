use tracing::{error, info, instrument};

use crate::actors::InventoryService;
use crate::clients::InventoryClient;
use crate::error::InventoryError;
use crate::store::ProductStore;

use super::{Config, ConfigError};

/// Owns the running inventory actor and hands out its client.
pub struct InventorySystem {
    pub inventory_client: InventoryClient,
    handle: tokio::task::JoinHandle<()>,
}

impl InventorySystem {
    /// Seeds the store from `config` and starts the actor.
    ///
    /// Must be called from within a tokio runtime.
    #[instrument(name = "inventory_system", skip(config))]
    pub fn start(config: &Config) -> Result<Self, ConfigError> {
        info!("Starting inventory system");

        let store = config.seed_store()?;
        let system = Self::with_store(store, config.channel_capacity);

        info!("Inventory system started successfully");
        Ok(system)
    }

    pub fn with_store(store: ProductStore, channel_capacity: usize) -> Self {
        let (service, inventory_client) = InventoryService::new(channel_capacity, store);
        let handle = tokio::spawn(service.run());
        Self {
            inventory_client,
            handle,
        }
    }

    /// Stops the actor and waits for it to finish.
    #[instrument(skip(self))]
    pub async fn shutdown(self) -> Result<(), InventoryError> {
        info!("Shutting down inventory system");

        // the actor may already be gone; the join below still reports that
        if let Err(e) = self.inventory_client.shutdown().await {
            error!(error = %e, "Shutdown request not delivered");
        }

        if let Err(e) = self.handle.await {
            error!(error = ?e, "Service shutdown error");
            return Err(InventoryError::ActorCommunication(format!("Actor task failed: {e}")));
        }

        info!("Inventory system shutdown complete");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_start_and_shutdown() -> Result<(), Box<dyn std::error::Error>> {
        let system = InventorySystem::start(&Config::default())?;

        let warehouses = system.inventory_client.list_warehouses().await?;
        assert_eq!(warehouses, vec!["BLR-A", "DEL-B", "PNQ-C"]);

        let client = system.inventory_client.clone();
        system.shutdown().await?;
        assert!(client.get_product("P-1001".to_string()).await.is_err());
        Ok(())
    }
}
