//! Tiered cashback calculation for capsule orders.
//!
//! Rates are pence per capsule, keyed by product and quantity band. The
//! order arrives as an arbitrary JSON object; only recognized product keys
//! holding a positive JSON integer contribute, everything else is skipped
//! without error (legacy contract).

use std::fmt;

use serde_json::Value;

/// Quantity bands: (0, 50], (50, 500], (500, ∞).
const TIER_BOUNDS: [i64; 2] = [50, 500];

/// The capsule products that earn cashback.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Product {
    Ristretto,
    Espresso,
    Lungo,
}

impl Product {
    pub const ALL: [Product; 3] = [Product::Ristretto, Product::Espresso, Product::Lungo];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Product::Ristretto => "Ristretto",
            Product::Espresso => "Espresso",
            Product::Lungo => "Lungo",
        }
    }

    /// Pence per capsule for each quantity band.
    #[must_use]
    fn rates(self) -> [i64; 3] {
        match self {
            Product::Ristretto => [2, 3, 5],
            Product::Espresso => [4, 6, 10],
            Product::Lungo => [6, 9, 15],
        }
    }

    /// Per-unit rate for the given quantity, or `None` when the quantity
    /// earns nothing (zero or negative).
    #[must_use]
    fn rate_for(self, quantity: i64) -> Option<i64> {
        let rates = self.rates();
        if quantity <= 0 {
            None
        } else if quantity <= TIER_BOUNDS[0] {
            Some(rates[0])
        } else if quantity <= TIER_BOUNDS[1] {
            Some(rates[1])
        } else {
            Some(rates[2])
        }
    }
}

impl fmt::Display for Product {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Computes the total cashback in pence for an order payload.
///
/// For each recognized product whose value is a positive JSON integer, adds
/// `quantity × rate(band)`. Unknown keys, missing products, zero, negative,
/// and non-integer quantities all contribute zero.
#[must_use]
pub fn calculate_cashback(order: &Value) -> i64 {
    let mut total: i64 = 0;
    for product in Product::ALL {
        // Strict integer check: "50" and 50.0 do not count, matching the
        // legacy is_int() gate.
        let Some(quantity) = order.get(product.as_str()).and_then(Value::as_i64) else {
            continue;
        };
        if let Some(rate) = product.rate_for(quantity) {
            // Quantities are attacker-controlled; saturate instead of
            // wrapping or panicking on absurd orders.
            total = total.saturating_add(quantity.saturating_mul(rate));
        }
    }
    total
}

/// Renders pence as a pound string for the response body, e.g. `306` →
/// `"£3.06"`. Display-boundary helper; all arithmetic stays in pence.
#[must_use]
pub fn format_pounds(pence: i64) -> String {
    let sign = if pence < 0 { "-" } else { "" };
    let abs = pence.abs();
    format!("{sign}£{}.{:02}", abs / 100, abs % 100)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn espresso_tier_boundaries() {
        assert_eq!(calculate_cashback(&json!({ "Espresso": 50 })), 200);
        assert_eq!(calculate_cashback(&json!({ "Espresso": 51 })), 306);
        assert_eq!(calculate_cashback(&json!({ "Espresso": 500 })), 3_000);
        assert_eq!(calculate_cashback(&json!({ "Espresso": 501 })), 5_010);
    }

    #[test]
    fn ristretto_top_tier() {
        assert_eq!(calculate_cashback(&json!({ "Ristretto": 501 })), 2_505);
    }

    #[test]
    fn lungo_tier_boundaries() {
        assert_eq!(calculate_cashback(&json!({ "Lungo": 50 })), 300);
        assert_eq!(calculate_cashback(&json!({ "Lungo": 51 })), 459);
        assert_eq!(calculate_cashback(&json!({ "Lungo": 501 })), 7_515);
    }

    #[test]
    fn products_sum_independently() {
        let order = json!({ "Espresso": 50, "Ristretto": 10, "Lungo": 600 });
        assert_eq!(calculate_cashback(&order), 200 + 20 + 9_000);
    }

    #[test]
    fn zero_and_negative_quantities_earn_nothing() {
        assert_eq!(calculate_cashback(&json!({ "Espresso": 0 })), 0);
        assert_eq!(calculate_cashback(&json!({ "Espresso": -5 })), 0);
    }

    #[test]
    fn non_integer_quantities_are_skipped() {
        assert_eq!(calculate_cashback(&json!({ "Espresso": "50" })), 0);
        assert_eq!(calculate_cashback(&json!({ "Espresso": 50.5 })), 0);
        assert_eq!(calculate_cashback(&json!({ "Espresso": null })), 0);
    }

    #[test]
    fn extreme_quantities_saturate_instead_of_overflowing() {
        let total = calculate_cashback(&json!({ "Espresso": i64::MAX }));
        assert_eq!(total, i64::MAX);

        let combined = calculate_cashback(&json!({
            "Espresso": i64::MAX,
            "Lungo": i64::MAX
        }));
        assert_eq!(combined, i64::MAX, "accumulation must saturate too");
    }

    #[test]
    fn unrecognized_keys_are_ignored() {
        let order = json!({ "Decaf": 100, "Espresso": 1, "notes": "asap" });
        assert_eq!(calculate_cashback(&order), 4);
    }

    #[test]
    fn empty_and_non_object_payloads_earn_nothing() {
        assert_eq!(calculate_cashback(&json!({})), 0);
        assert_eq!(calculate_cashback(&json!([1, 2, 3])), 0);
        assert_eq!(calculate_cashback(&json!(null)), 0);
    }

    #[test]
    fn formats_pence_as_pounds() {
        assert_eq!(format_pounds(0), "£0.00");
        assert_eq!(format_pounds(200), "£2.00");
        assert_eq!(format_pounds(306), "£3.06");
        assert_eq!(format_pounds(2_505), "£25.05");
        assert_eq!(format_pounds(5), "£0.05");
    }
}
