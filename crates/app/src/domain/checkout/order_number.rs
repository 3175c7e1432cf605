//! Order numbers.

use jiff::Timestamp;

/// Minimum digits in the sequence part of an order number.
const SEQUENCE_WIDTH: usize = 6;

/// Build a human-readable order number from the UTC date and a sequence value.
///
/// The sequence is unique on its own; the date only aids reading.
#[must_use]
pub fn format_order_number(at: Timestamp, sequence: i64) -> String {
    format!(
        "ORD-{}-{sequence:0width$}",
        at.strftime("%Y%m%d"),
        width = SEQUENCE_WIDTH
    )
}
