use tokio::sync::oneshot;

use crate::domain::ProductView;
use crate::error::InventoryError;
use crate::kpi::Kpis;
use crate::store::ProductQuery;

/// Type aliases for service communication
pub type ServiceResult<T> = std::result::Result<T, InventoryError>;
pub type ServiceResponse<T> = oneshot::Sender<ServiceResult<T>>;

/// Messages understood by the inventory actor. Each variant carries its
/// parameters and a oneshot channel for the reply.
#[derive(Debug)]
pub enum InventoryRequest {
    ListProducts {
        query: ProductQuery,
        respond_to: ServiceResponse<Vec<ProductView>>,
    },
    GetProduct {
        id: String,
        respond_to: ServiceResponse<Option<ProductView>>,
    },
    ListWarehouses {
        respond_to: ServiceResponse<Vec<String>>,
    },
    ComputeKpis {
        range: u32,
        respond_to: ServiceResponse<Kpis>,
    },
    UpdateDemand {
        id: String,
        demand: i64,
        respond_to: ServiceResponse<ProductView>,
    },
    TransferStock {
        id: String,
        delta: i64,
        respond_to: ServiceResponse<ProductView>,
    },
    Shutdown,
    #[cfg(test)]
    GetProductCount {
        respond_to: ServiceResponse<usize>,
    },
}
