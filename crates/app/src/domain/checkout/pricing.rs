//! Pricing
//!
//! Every amount is computed from catalog rows read under lock. Nothing here
//! trusts a price coming from the caller or from the cart.

use crate::domain::{
    carts::records::CartItemUuid,
    checkout::errors::ValidationError,
    products::records::{OptionUuid, ProductUuid},
};

/// Basis points in one whole.
const BPS_DENOMINATOR: u64 = 10_000;

/// A cart line joined with its product and selected options, as locked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LockedLine {
    pub cart_item_uuid: CartItemUuid,
    pub product_uuid: ProductUuid,
    pub product_name: String,
    pub product_available: bool,
    /// Every selected option is still active.
    pub options_available: bool,
    pub base_price: u64,
    pub stock: u64,
    pub quantity: u32,
    pub size_uuid: Option<OptionUuid>,
    pub temperature_uuid: Option<OptionUuid>,
    pub variant_uuid: Option<OptionUuid>,
    pub size_adjustment: u64,
    pub temperature_adjustment: u64,
    pub variant_adjustment: u64,
}

/// A locked line with its unit price and line total resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PricedLine {
    pub line: LockedLine,
    pub unit_price: u64,
    pub line_total: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Totals {
    pub subtotal: u64,
    pub delivery_fee: u64,
    pub tax_amount: u64,
    pub total: u64,
}

/// Resolve the effective unit price and line total for one line.
///
/// # Errors
///
/// Returns [`ValidationError::AmountOverflow`] if any sum or product overflows.
pub fn price_line(line: &LockedLine) -> Result<PricedLine, ValidationError> {
    let unit_price = line
        .base_price
        .checked_add(line.size_adjustment)
        .and_then(|price| price.checked_add(line.temperature_adjustment))
        .and_then(|price| price.checked_add(line.variant_adjustment))
        .ok_or(ValidationError::AmountOverflow)?;

    let line_total = unit_price
        .checked_mul(u64::from(line.quantity))
        .ok_or(ValidationError::AmountOverflow)?;

    Ok(PricedLine {
        line: line.clone(),
        unit_price,
        line_total,
    })
}

/// Tax owed on `subtotal` at `rate_bps`, rounded down.
///
/// # Errors
///
/// Returns [`ValidationError::AmountOverflow`] if the intermediate product overflows.
pub fn tax_for(subtotal: u64, rate_bps: u64) -> Result<u64, ValidationError> {
    subtotal
        .checked_mul(rate_bps)
        .map(|scaled| scaled / BPS_DENOMINATOR)
        .ok_or(ValidationError::AmountOverflow)
}

/// Sum priced lines and add the delivery fee and tax.
///
/// # Errors
///
/// Returns [`ValidationError::AmountOverflow`] if any sum overflows.
pub fn compute_totals(
    lines: &[PricedLine],
    delivery_fee: u64,
    tax_rate_bps: u64,
) -> Result<Totals, ValidationError> {
    let subtotal = lines.iter().try_fold(0_u64, |acc, line| {
        acc.checked_add(line.line_total)
            .ok_or(ValidationError::AmountOverflow)
    })?;

    let tax_amount = tax_for(subtotal, tax_rate_bps)?;

    let total = subtotal
        .checked_add(delivery_fee)
        .and_then(|total| total.checked_add(tax_amount))
        .ok_or(ValidationError::AmountOverflow)?;

    Ok(Totals {
        subtotal,
        delivery_fee,
        tax_amount,
        total,
    })
}
