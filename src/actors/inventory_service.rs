use chrono::{NaiveDate, Utc};
use tokio::sync::mpsc;
use tracing::{debug, error, info, instrument};

use crate::clients::InventoryClient;
use crate::domain::ProductView;
use crate::kpi::{self, Kpis};
use crate::messages::{InventoryRequest, ServiceResponse};
use crate::store::{ProductQuery, ProductStore};

/// Inventory actor. Owns the [`ProductStore`] and processes one request at a
/// time, so every mutation is atomic with respect to every other request.
pub struct InventoryService {
    receiver: mpsc::Receiver<InventoryRequest>,
    store: ProductStore,
    today_fn: Box<dyn Fn() -> NaiveDate + Send + Sync>,
}

impl InventoryService {
    /// Creates the actor and its client. The trend uses the current UTC date.
    pub fn new(buffer_size: usize, store: ProductStore) -> (Self, InventoryClient) {
        Self::with_clock(buffer_size, store, || Utc::now().date_naive())
    }

    /// Same as [`InventoryService::new`] with an explicit source for "today".
    pub fn with_clock(
        buffer_size: usize,
        store: ProductStore,
        today_fn: impl Fn() -> NaiveDate + Send + Sync + 'static,
    ) -> (Self, InventoryClient) {
        let (sender, receiver) = mpsc::channel(buffer_size);
        let service = Self {
            receiver,
            store,
            today_fn: Box::new(today_fn),
        };
        let client = InventoryClient::new(sender);
        (service, client)
    }

    /// Main actor loop. Stops on `Shutdown` or once every client is dropped.
    #[instrument(name = "inventory_service", skip(self))]
    pub async fn run(mut self) {
        info!(product_count = self.store.len(), "InventoryService starting");

        while let Some(msg) = self.receiver.recv().await {
            match msg {
                InventoryRequest::ListProducts { query, respond_to } => {
                    self.handle_list_products(query, respond_to);
                }
                InventoryRequest::GetProduct { id, respond_to } => {
                    self.handle_get_product(id, respond_to);
                }
                InventoryRequest::ListWarehouses { respond_to } => {
                    self.handle_list_warehouses(respond_to);
                }
                InventoryRequest::ComputeKpis { range, respond_to } => {
                    self.handle_compute_kpis(range, respond_to);
                }
                InventoryRequest::UpdateDemand {
                    id,
                    demand,
                    respond_to,
                } => {
                    self.handle_update_demand(id, demand, respond_to);
                }
                InventoryRequest::TransferStock {
                    id,
                    delta,
                    respond_to,
                } => {
                    self.handle_transfer_stock(id, delta, respond_to);
                }
                InventoryRequest::Shutdown => {
                    info!("InventoryService shutting down");
                    break;
                }
                #[cfg(test)]
                InventoryRequest::GetProductCount { respond_to } => {
                    let _ = respond_to.send(Ok(self.store.len()));
                }
            }
        }

        info!("InventoryService stopped");
    }

    #[instrument(
        fields(
            search = ?query.search,
            warehouse = ?query.warehouse,
            status = ?query.status,
            offset = query.offset,
            limit = query.limit
        ),
        skip(self, query, respond_to)
    )]
    fn handle_list_products(&self, query: ProductQuery, respond_to: ServiceResponse<Vec<ProductView>>) {
        debug!("Processing list_products request");

        let products: Vec<ProductView> = self.store.list(&query).into_iter().map(ProductView::from).collect();
        info!(result_count = products.len(), "Listed products");

        let _ = respond_to.send(Ok(products));
    }

    #[instrument(fields(product_id = %id), skip(self, id, respond_to))]
    fn handle_get_product(&self, id: String, respond_to: ServiceResponse<Option<ProductView>>) {
        debug!("Processing get_product request");

        let product = self.store.get(&id).map(ProductView::from);

        match &product {
            Some(product) => info!(product_name = %product.name, status = %product.status, "Product found"),
            None => debug!("Product not found"),
        }

        let _ = respond_to.send(Ok(product));
    }

    #[instrument(skip(self, respond_to))]
    fn handle_list_warehouses(&self, respond_to: ServiceResponse<Vec<String>>) {
        debug!("Processing list_warehouses request");

        let warehouses = self.store.warehouses();
        info!(warehouse_count = warehouses.len(), "Listed warehouses");

        let _ = respond_to.send(Ok(warehouses));
    }

    #[instrument(skip(self, respond_to))]
    fn handle_compute_kpis(&self, range: u32, respond_to: ServiceResponse<Kpis>) {
        debug!("Processing compute_kpis request");

        let today = (self.today_fn)();
        let result = kpi::compute_kpis(self.store.products(), range, today);

        match &result {
            Ok(kpis) => info!(
                total_stock = kpis.total_stock,
                total_demand = kpis.total_demand,
                fill_rate = kpis.fill_rate,
                "KPIs computed"
            ),
            Err(e) => error!(error = %e, "KPI computation rejected"),
        }

        let _ = respond_to.send(result);
    }

    #[instrument(fields(product_id = %id), skip(self, id, respond_to))]
    fn handle_update_demand(&mut self, id: String, demand: i64, respond_to: ServiceResponse<ProductView>) {
        debug!("Processing update_demand request");

        let result = self.store.update_demand(&id, demand).map(ProductView::from);

        match &result {
            Ok(product) => info!(status = %product.status, "Demand updated successfully"),
            Err(e) => error!(error = %e, "Demand update failed"),
        }

        let _ = respond_to.send(result);
    }

    #[instrument(fields(product_id = %id), skip(self, id, respond_to))]
    fn handle_transfer_stock(&mut self, id: String, delta: i64, respond_to: ServiceResponse<ProductView>) {
        debug!("Processing transfer_stock request");

        let result = self.store.transfer_stock(&id, delta).map(ProductView::from);

        match &result {
            Ok(product) => info!(
                remaining_stock = product.stock,
                status = %product.status,
                "Stock transferred successfully"
            ),
            Err(e) => error!(error = %e, "Stock transfer failed"),
        }

        let _ = respond_to.send(result);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{seed_products, Status};
    use crate::error::InventoryError;

    fn start() -> InventoryClient {
        let store = ProductStore::new(seed_products()).unwrap();
        let today = NaiveDate::from_ymd_opt(2024, 5, 20).unwrap();
        let (service, client) = InventoryService::with_clock(10, store, move || today);
        tokio::spawn(service.run());
        client
    }

    #[tokio::test]
    async fn test_reads_reflect_previous_writes() -> Result<(), Box<dyn std::error::Error>> {
        let client = start();

        let updated = client.update_demand("P-1004".to_string(), 10).await?;
        assert_eq!(updated.status, Status::Healthy);

        let product = client.get_product("P-1004".to_string()).await?.unwrap();
        assert_eq!(product.demand, 10);

        let critical = client
            .list_products(ProductQuery::new().status(Status::Critical))
            .await?;
        assert_eq!(critical.len(), 1);
        assert_eq!(critical[0].id, "P-1002");

        client.shutdown().await?;
        Ok(())
    }

    #[tokio::test]
    async fn test_kpis_use_injected_clock() -> Result<(), Box<dyn std::error::Error>> {
        let client = start();

        let kpis = client.compute_kpis(3).await?;
        let dates: Vec<String> = kpis.trend.iter().map(|p| p.date.to_string()).collect();
        assert_eq!(dates, vec!["2024-05-18", "2024-05-19", "2024-05-20"]);

        client.shutdown().await?;
        Ok(())
    }

    #[tokio::test]
    async fn test_failed_mutation_keeps_state() -> Result<(), Box<dyn std::error::Error>> {
        let client = start();

        let err = client.transfer_stock("P-0000".to_string(), 5).await.unwrap_err();
        assert_eq!(err, InventoryError::NotFound("P-0000".to_string()));
        assert_eq!(client.get_product_count().await?, 4);

        let kpis = client.compute_kpis(1).await?;
        assert_eq!(kpis.total_stock, 334);

        client.shutdown().await?;
        Ok(())
    }

    #[tokio::test]
    async fn test_concurrent_transfers_are_serialized() -> Result<(), Box<dyn std::error::Error>> {
        let client = start();

        let mut tasks = Vec::new();
        for _ in 0..50 {
            let client = client.clone();
            tasks.push(tokio::spawn(async move {
                client.transfer_stock("P-1002".to_string(), 2).await
            }));
        }
        for task in tasks {
            task.await??;
        }

        let product = client.get_product("P-1002".to_string()).await?.unwrap();
        assert_eq!(product.stock, 150);

        client.shutdown().await?;
        Ok(())
    }

    #[tokio::test]
    async fn test_client_errors_after_shutdown() {
        let client = start();
        client.shutdown().await.unwrap();

        // the actor may still be draining; wait for the channel to close
        client.closed().await;
        let err = client.list_warehouses().await.unwrap_err();
        assert!(matches!(err, InventoryError::ActorCommunication(_)));
    }
}
