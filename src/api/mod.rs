//! JSON request/response envelopes for the six inventory operations.
//!
//! Requests are internally tagged by `op`. Numbers arrive as signed 64-bit
//! integers; page windows and the KPI range are checked here, demand is
//! checked by the store.

mod stdio;

pub use stdio::serve_lines;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::clients::InventoryClient;
use crate::domain::{ProductView, Status};
use crate::error::InventoryError;
use crate::kpi::Kpis;
use crate::store::{ProductQuery, DEFAULT_PAGE_LIMIT};

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "op", rename_all = "camelCase")]
pub enum Request {
    #[serde(alias = "products")]
    ListProducts {
        search: Option<String>,
        warehouse: Option<String>,
        status: Option<String>,
        offset: Option<i64>,
        limit: Option<i64>,
    },
    #[serde(alias = "product")]
    GetProduct { id: String },
    #[serde(alias = "warehouses")]
    ListWarehouses,
    #[serde(alias = "computeKPIs", alias = "kpis")]
    ComputeKpis { range: i64 },
    UpdateDemand { id: String, demand: i64 },
    TransferStock { id: String, delta: i64 },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Payload {
    Products(Vec<ProductView>),
    Product(Option<ProductView>),
    Warehouses(Vec<String>),
    Kpis(Kpis),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorBody {
    pub code: String,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Response {
    Ok(Payload),
    Error(ErrorBody),
}

impl Response {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Response::Error(ErrorBody {
            code: "bad_request".to_string(),
            message: message.into(),
        })
    }
}

impl From<InventoryError> for Response {
    fn from(err: InventoryError) -> Self {
        Response::Error(ErrorBody {
            code: err.code().to_string(),
            message: err.to_string(),
        })
    }
}

/// Parses one JSON request and runs it.
pub async fn handle_line(client: &InventoryClient, line: &str) -> Response {
    match serde_json::from_str::<Request>(line) {
        Ok(request) => handle(client, request).await,
        Err(e) => {
            warn!(error = %e, "Rejected malformed request");
            Response::bad_request(e.to_string())
        }
    }
}

pub async fn handle(client: &InventoryClient, request: Request) -> Response {
    debug!(?request, "Dispatching request");
    match execute(client, request).await {
        Ok(payload) => Response::Ok(payload),
        Err(e) => Response::from(e),
    }
}

async fn execute(client: &InventoryClient, request: Request) -> Result<Payload, InventoryError> {
    match request {
        Request::ListProducts {
            search,
            warehouse,
            status,
            offset,
            limit,
        } => {
            let query = ProductQuery {
                search: non_blank(search),
                warehouse: warehouse.filter(|w| !w.is_empty()),
                status: non_blank(status).map(|s| s.parse::<Status>()).transpose()?,
                offset: offset.map(|v| non_negative("offset", v)).transpose()?.unwrap_or(0),
                limit: limit
                    .map(|v| non_negative("limit", v))
                    .transpose()?
                    .unwrap_or(DEFAULT_PAGE_LIMIT),
            };
            client.list_products(query).await.map(Payload::Products)
        }
        Request::GetProduct { id } => client.get_product(id).await.map(Payload::Product),
        Request::ListWarehouses => client.list_warehouses().await.map(Payload::Warehouses),
        Request::ComputeKpis { range } => {
            client.compute_kpis(trend_range(range)?).await.map(Payload::Kpis)
        }
        // negative demand is rejected by the store before it mutates anything
        Request::UpdateDemand { id, demand } => client
            .update_demand(id, demand)
            .await
            .map(|p| Payload::Product(Some(p))),
        Request::TransferStock { id, delta } => client
            .transfer_stock(id, delta)
            .await
            .map(|p| Payload::Product(Some(p))),
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

fn trend_range(range: i64) -> Result<u32, InventoryError> {
    if range <= 0 {
        return Err(InventoryError::InvalidArgument(format!(
            "range must be a positive number of days (got {range})"
        )));
    }
    u32::try_from(range).map_err(|_| {
        InventoryError::InvalidArgument(format!("range must be at most {} days (got {range})", u32::MAX))
    })
}

fn non_negative(name: &str, value: i64) -> Result<usize, InventoryError> {
    usize::try_from(value)
        .map_err(|_| InventoryError::InvalidArgument(format!("{name} must be non-negative (got {value})")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parses_every_operation() {
        let cases = [
            (
                json!({"op": "listProducts", "search": "bolt", "limit": 2}),
                Request::ListProducts {
                    search: Some("bolt".into()),
                    warehouse: None,
                    status: None,
                    offset: None,
                    limit: Some(2),
                },
            ),
            (json!({"op": "getProduct", "id": "P-1"}), Request::GetProduct { id: "P-1".into() }),
            (json!({"op": "listWarehouses"}), Request::ListWarehouses),
            (json!({"op": "computeKpis", "range": 7}), Request::ComputeKpis { range: 7 }),
            (
                json!({"op": "updateDemand", "id": "P-1", "demand": 3}),
                Request::UpdateDemand { id: "P-1".into(), demand: 3 },
            ),
            (
                json!({"op": "transferStock", "id": "P-1", "delta": -3}),
                Request::TransferStock { id: "P-1".into(), delta: -3 },
            ),
        ];
        for (raw, expected) in cases {
            let parsed: Request = serde_json::from_value(raw.clone()).unwrap();
            assert_eq!(parsed, expected, "{raw}");
        }
    }

    #[test]
    fn test_accepts_schema_field_names() {
        let parsed: Request = serde_json::from_value(json!({"op": "kpis", "range": 14})).unwrap();
        assert_eq!(parsed, Request::ComputeKpis { range: 14 });
        let parsed: Request = serde_json::from_value(json!({"op": "computeKPIs", "range": 30})).unwrap();
        assert_eq!(parsed, Request::ComputeKpis { range: 30 });
        let parsed: Request = serde_json::from_value(json!({"op": "warehouses"})).unwrap();
        assert_eq!(parsed, Request::ListWarehouses);
    }

    #[test]
    fn test_rejects_unknown_ops_and_missing_fields() {
        assert!(serde_json::from_value::<Request>(json!({"op": "deleteProduct", "id": "P-1"})).is_err());
        assert!(serde_json::from_value::<Request>(json!({"id": "P-1"})).is_err());
        assert!(serde_json::from_value::<Request>(json!({"op": "updateDemand", "id": "P-1"})).is_err());
    }

    #[test]
    fn test_response_envelope_shape() {
        let ok = serde_json::to_value(Response::Ok(Payload::Warehouses(vec!["A".into()]))).unwrap();
        assert_eq!(ok, json!({"ok": ["A"]}));

        let missing = serde_json::to_value(Response::Ok(Payload::Product(None))).unwrap();
        assert_eq!(missing, json!({"ok": null}));

        let err = serde_json::to_value(Response::from(InventoryError::NotFound("P-7".into()))).unwrap();
        assert_eq!(
            err,
            json!({"error": {"code": "not_found", "message": "Product not found: P-7"}})
        );
    }

    #[test]
    fn test_boundary_helpers() {
        assert_eq!(non_blank(Some("  ".into())), None);
        assert_eq!(non_blank(Some("BLR-A".into())), Some("BLR-A".into()));
        assert_eq!(non_negative("offset", 3), Ok(3));
        assert!(non_negative("offset", -1).is_err());
    }

    #[test]
    fn test_trend_range_messages() {
        assert_eq!(trend_range(3651), Ok(3651));
        assert_eq!(
            trend_range(0),
            Err(InventoryError::InvalidArgument(
                "range must be a positive number of days (got 0)".to_string()
            ))
        );
        assert_eq!(
            trend_range(i64::from(u32::MAX) + 1),
            Err(InventoryError::InvalidArgument(
                "range must be at most 4294967295 days (got 4294967296)".to_string()
            ))
        );
    }
}
