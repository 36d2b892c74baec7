use tokio::sync::mpsc;
use tracing::{debug, instrument};

use crate::domain::ProductView;
use crate::error::InventoryError;
use crate::kpi::Kpis;
use crate::messages::InventoryRequest;
use crate::store::ProductQuery;

/// Client for the inventory actor. Cheap to clone; every clone feeds the same
/// mailbox.
#[derive(Clone)]
pub struct InventoryClient {
    sender: mpsc::Sender<InventoryRequest>,
}

impl InventoryClient {
    pub fn new(sender: mpsc::Sender<InventoryRequest>) -> Self {
        Self { sender }
    }

    #[instrument(skip(self))]
    pub async fn shutdown(&self) -> Result<(), InventoryError> {
        debug!("Sending shutdown request");
        self.sender
            .send(InventoryRequest::Shutdown)
            .await
            .map_err(|_| InventoryError::ActorCommunication("Actor closed".to_string()))
    }

    /// Resolves once the actor has dropped its mailbox.
    #[cfg(test)]
    pub async fn closed(&self) {
        self.sender.closed().await
    }
}

client_method!(InventoryClient => fn list_products(query: ProductQuery) -> Vec<ProductView> as InventoryRequest::ListProducts);
client_method!(InventoryClient => fn get_product(id: String) -> Option<ProductView> as InventoryRequest::GetProduct);
client_method!(InventoryClient => fn list_warehouses() -> Vec<String> as InventoryRequest::ListWarehouses);
client_method!(InventoryClient => fn compute_kpis(range: u32) -> Kpis as InventoryRequest::ComputeKpis);
client_method!(InventoryClient => fn update_demand(id: String, demand: i64) -> ProductView as InventoryRequest::UpdateDemand);
client_method!(InventoryClient => fn transfer_stock(id: String, delta: i64) -> ProductView as InventoryRequest::TransferStock);

// Test-only method for internal state inspection
#[cfg(test)]
client_method!(InventoryClient => fn get_product_count() -> usize as InventoryRequest::GetProductCount);
