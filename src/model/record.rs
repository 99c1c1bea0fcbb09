// src/model/record.rs
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

/// Fractional digits carried by every cost and revenue value.
pub const COST_SCALE: u32 = 2;

/// Total digits allowed for a cost, matching `DECIMAL(10,2)`.
pub const COST_PRECISION: u32 = 10;

/// One transaction as it appears in the source file.
///
/// Any field may be missing; [`RawRecord::clean`] decides whether the row
/// survives.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawRecord {
    pub restaurant: Option<String>,
    pub dish: Option<String>,
    pub customer: Option<String>,
    pub cost: Option<Decimal>,
}

impl RawRecord {
    pub fn new(
        restaurant: impl Into<String>,
        dish: impl Into<String>,
        customer: impl Into<String>,
        cost: Decimal,
    ) -> Self {
        Self {
            restaurant: Some(restaurant.into()),
            dish: Some(dish.into()),
            customer: Some(customer.into()),
            cost: Some(cost),
        }
    }

    /// Convert to a cleaned record, or `None` if a field is missing or the
    /// cost does not fit a non-negative `DECIMAL(10,2)`.
    pub fn clean(&self) -> Option<CleanedRecord> {
        let restaurant = non_empty(self.restaurant.as_deref())?;
        let dish = non_empty(self.dish.as_deref())?;
        let customer = non_empty(self.customer.as_deref())?;
        let cost = to_fixed_cost(self.cost?)?;

        Some(CleanedRecord {
            restaurant: restaurant.to_string(),
            dish: dish.to_string(),
            customer: customer.to_string(),
            cost,
        })
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

/// Round a cost to two places and check it against the fixed-point range.
pub fn to_fixed_cost(cost: Decimal) -> Option<Decimal> {
    let mut fixed = cost.round_dp_with_strategy(COST_SCALE, RoundingStrategy::MidpointAwayFromZero);
    fixed.rescale(COST_SCALE);

    if (fixed.is_sign_negative() && !fixed.is_zero()) || fixed >= max_cost_exclusive() {
        return None;
    }
    // -0.00 prints as "-0.00"
    fixed.set_sign_positive(true);
    Some(fixed)
}

fn max_cost_exclusive() -> Decimal {
    Decimal::from(10_i64.pow(COST_PRECISION - COST_SCALE))
}

/// A transaction with every field present and a fixed-point cost.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CleanedRecord {
    #[serde(rename = "restaurant_names")]
    pub restaurant: String,
    #[serde(rename = "food_names")]
    pub dish: String,
    #[serde(rename = "first_name")]
    pub customer: String,
    #[serde(rename = "food_cost")]
    pub cost: Decimal,
}
