//! Pricing and duration aggregation over the current selection
//!
//! Purely additive: no rounding and no overlap logic.

use salonkit_domain::Service;

/// Price actually charged for one service, in cents.
///
/// The discount applies only when it is a real reduction: strictly positive
/// and strictly below the base price. Anything else falls back to the base
/// price.
pub fn effective_price_cents(service: &Service) -> i64 {
    match service.discount_price_cents {
        Some(discount) if discount > 0 && discount < service.price_cents => discount,
        _ => service.price_cents,
    }
}

/// Sum of effective prices over the selection, in display currency units
/// (cents divided by 100).
pub fn total_price(selection: &[&Service]) -> f64 {
    let cents: i64 = selection.iter().map(|s| effective_price_cents(s)).sum();
    cents as f64 / 100.0
}

/// Sum of durations over the selection, in minutes
pub fn total_duration_minutes(selection: &[&Service]) -> u32 {
    selection.iter().map(|s| s.duration_minutes).sum()
}
