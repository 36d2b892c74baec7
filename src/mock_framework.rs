//! # Mock Framework
//!
//! Utilities for testing code that talks to the inventory actor without
//! starting one.
//!
//! [`create_mock_client`] returns a real [`InventoryClient`] together with the
//! receiving end of its mailbox. Tests pull requests off the receiver with the
//! `expect_*` helpers, assert on the parameters, and answer through the
//! returned responder.

use tokio::sync::mpsc;

use crate::clients::InventoryClient;
use crate::domain::ProductView;
use crate::kpi::Kpis;
use crate::messages::{InventoryRequest, ServiceResponse};
use crate::store::ProductQuery;

/// Creates a client whose requests land on the returned receiver.
pub fn create_mock_client(buffer_size: usize) -> (InventoryClient, mpsc::Receiver<InventoryRequest>) {
    let (sender, receiver) = mpsc::channel(buffer_size);
    (InventoryClient::new(sender), receiver)
}

/// Helper to verify that the next message is a ListProducts request
pub async fn expect_list_products(
    receiver: &mut mpsc::Receiver<InventoryRequest>,
) -> Option<(ProductQuery, ServiceResponse<Vec<ProductView>>)> {
    match receiver.recv().await {
        Some(InventoryRequest::ListProducts { query, respond_to }) => Some((query, respond_to)),
        _ => None,
    }
}

/// Helper to verify that the next message is a ComputeKpis request
pub async fn expect_compute_kpis(
    receiver: &mut mpsc::Receiver<InventoryRequest>,
) -> Option<(u32, ServiceResponse<Kpis>)> {
    match receiver.recv().await {
        Some(InventoryRequest::ComputeKpis { range, respond_to }) => Some((range, respond_to)),
        _ => None,
    }
}

/// Helper to verify that the next message is an UpdateDemand request
pub async fn expect_update_demand(
    receiver: &mut mpsc::Receiver<InventoryRequest>,
) -> Option<(String, i64, ServiceResponse<ProductView>)> {
    match receiver.recv().await {
        Some(InventoryRequest::UpdateDemand {
            id,
            demand,
            respond_to,
        }) => Some((id, demand, respond_to)),
        _ => None,
    }
}

/// Helper to verify that the next message is a TransferStock request
pub async fn expect_transfer_stock(
    receiver: &mut mpsc::Receiver<InventoryRequest>,
) -> Option<(String, i64, ServiceResponse<ProductView>)> {
    match receiver.recv().await {
        Some(InventoryRequest::TransferStock {
            id,
            delta,
            respond_to,
        }) => Some((id, delta, respond_to)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::InventoryError;

    #[tokio::test]
    async fn test_mock_client() {
        let (client, mut receiver) = create_mock_client(10);

        let task = tokio::spawn(async move { client.transfer_stock("P-1".to_string(), -4).await });

        let (id, delta, responder) = expect_transfer_stock(&mut receiver)
            .await
            .expect("Expected TransferStock request");
        assert_eq!(id, "P-1");
        assert_eq!(delta, -4);
        responder.send(Err(InventoryError::NotFound(id))).unwrap();

        let result = task.await.unwrap();
        assert_eq!(result, Err(InventoryError::NotFound("P-1".to_string())));
    }

    #[tokio::test]
    async fn test_dropped_responder_is_reported() {
        let (client, mut receiver) = create_mock_client(10);

        let task = tokio::spawn(async move { client.list_warehouses().await });
        drop(receiver.recv().await);

        let result = task.await.unwrap();
        assert!(matches!(result, Err(InventoryError::ActorCommunication(_))));
    }
}
