//! Stock checks across cart lines.

use rustc_hash::FxHashMap;

use crate::domain::{
    checkout::{errors::StockShortfall, pricing::LockedLine},
    products::records::ProductUuid,
};

/// Quantity requested per product, in first-seen order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductDemand {
    pub product_uuid: ProductUuid,
    pub product_name: String,
    pub requested: u64,
    pub available: u64,
}

/// Combine lines that draw on the same product.
#[must_use]
pub fn aggregate_demand(lines: &[LockedLine]) -> Vec<ProductDemand> {
    let mut positions: FxHashMap<ProductUuid, usize> = FxHashMap::default();
    let mut demand: Vec<ProductDemand> = Vec::new();

    for line in lines {
        let quantity = u64::from(line.quantity);

        if let Some(existing) = positions
            .get(&line.product_uuid)
            .and_then(|&index| demand.get_mut(index))
        {
            existing.requested = existing.requested.saturating_add(quantity);
            continue;
        }

        positions.insert(line.product_uuid, demand.len());

        demand.push(ProductDemand {
            product_uuid: line.product_uuid,
            product_name: line.product_name.clone(),
            requested: quantity,
            available: line.stock,
        });
    }

    demand
}

/// Every product whose combined demand exceeds its stock.
#[must_use]
pub fn find_shortfalls(demand: &[ProductDemand]) -> Vec<StockShortfall> {
    demand
        .iter()
        .filter(|product| product.requested > product.available)
        .map(|product| StockShortfall {
            product_uuid: product.product_uuid,
            product_name: product.product_name.clone(),
            requested: product.requested,
            available: product.available,
        })
        .collect()
}
