//! Aggregate stock/demand figures and the synthetic trend series.

use chrono::{Days, NaiveDate};
use serde::Serialize;

use crate::domain::Product;
use crate::error::InventoryError;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Kpis {
    pub total_stock: u64,
    pub total_demand: u64,
    pub fill_rate: f64,
    pub trend: Vec<TrendPoint>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TrendPoint {
    pub date: NaiveDate,
    pub stock: u64,
    pub demand: u64,
}

/// Percentage of demand covered by stock, product by product.
///
/// Zero when there is no demand at all.
pub fn fill_rate(products: &[Product]) -> f64 {
    let total_demand = products.iter().fold(0u64, |acc, p| acc.saturating_add(p.demand));
    if total_demand == 0 {
        return 0.0;
    }
    let satisfied = products
        .iter()
        .fold(0u64, |acc, p| acc.saturating_add(p.stock.min(p.demand)));
    satisfied as f64 / total_demand as f64 * 100.0
}

/// Offset applied to the current totals for the `index`-th trend point.
///
/// Cycles through -6, -3, 0, 3, 6.
pub fn trend_variance(index: u32) -> i64 {
    (i64::from(index % 5) - 2) * 3
}

/// Computes the totals, fill rate and a `range`-day trend ending on `today`.
///
/// The trend is not historical: each point perturbs the current totals by
/// [`trend_variance`], oldest point first.
///
/// # Errors
/// `InvalidArgument` when `range` is zero, or so large that the first point
/// would fall before the earliest representable date.
pub fn compute_kpis(products: &[Product], range: u32, today: NaiveDate) -> Result<Kpis, InventoryError> {
    if range == 0 {
        return Err(InventoryError::InvalidArgument(
            "range must be a positive number of days (got 0)".to_string(),
        ));
    }
    let start = today
        .checked_sub_days(Days::new(u64::from(range - 1)))
        .ok_or_else(|| InventoryError::InvalidArgument(format!("range {range} reaches before the calendar start")))?;

    let total_stock = products.iter().fold(0u64, |acc, p| acc.saturating_add(p.stock));
    let total_demand = products.iter().fold(0u64, |acc, p| acc.saturating_add(p.demand));

    let trend = start
        .iter_days()
        .zip(0..range)
        .map(|(date, i)| {
            let variance = trend_variance(i);
            TrendPoint {
                date,
                stock: total_stock.saturating_add_signed(variance),
                demand: total_demand.saturating_add_signed(-variance),
            }
        })
        .collect();

    Ok(Kpis {
        total_stock,
        total_demand,
        fill_rate: fill_rate(products),
        trend,
    })
}
