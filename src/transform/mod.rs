//! Aggregation of the cleaned table into the analytical tables.
//!
//! Each aggregation is a pure function of the cleaned records. The
//! [`Session`] owns the cleaned table and the derived tables for the length
//! of one run.

mod customers;
mod dishes;
pub mod rank;
mod restaurants;
mod visitors;
mod visits;

pub use customers::customer_stats;
pub use dishes::{popular_dishes, profitable_dishes};
pub use restaurants::restaurant_stats;
pub use visitors::frequent_visitors;

use std::path::Path;

use rust_decimal::Decimal;
use tracing::{debug, info};

use crate::ingest::{self, IngestResult};
use crate::model::{
    CleanedRecord, CustomerStats, FrequentVisitor, PopularDish, ProfitableDish, RawRecord,
    RestaurantStats, COST_SCALE,
};

/// Default number of dishes kept per restaurant.
pub const DEFAULT_DISH_RANK_CUTOFF: u32 = 5;

/// Options for the aggregation stage.
#[derive(Debug, Clone)]
pub struct TransformOptions {
    /// Highest rank kept in `popular_dishes` and `profitable_dishes`.
    pub dish_rank_cutoff: u32,
}

impl Default for TransformOptions {
    fn default() -> Self {
        Self {
            dish_rank_cutoff: DEFAULT_DISH_RANK_CUTOFF,
        }
    }
}

impl TransformOptions {
    /// Set the dish rank cutoff.
    pub fn with_dish_rank_cutoff(mut self, cutoff: u32) -> Self {
        self.dish_rank_cutoff = cutoff;
        self
    }
}

/// Pin a revenue value to two fractional digits.
pub(crate) fn fixed_revenue(mut revenue: Decimal) -> Decimal {
    revenue.rescale(COST_SCALE);
    revenue
}

/// The five derived tables.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DerivedTables {
    pub restaurant_stats: Vec<RestaurantStats>,
    pub popular_dishes: Vec<PopularDish>,
    pub profitable_dishes: Vec<ProfitableDish>,
    pub customer_stats: Vec<CustomerStats>,
    pub frequent_visitors: Vec<FrequentVisitor>,
}

impl DerivedTables {
    /// Run every aggregation over the cleaned records.
    pub fn compute(records: &[CleanedRecord], options: &TransformOptions) -> Self {
        let tables = Self {
            restaurant_stats: restaurant_stats(records),
            popular_dishes: popular_dishes(records, options.dish_rank_cutoff),
            profitable_dishes: profitable_dishes(records, options.dish_rank_cutoff),
            customer_stats: customer_stats(records),
            frequent_visitors: frequent_visitors(records),
        };

        info!(
            restaurant_stats = tables.restaurant_stats.len(),
            popular_dishes = tables.popular_dishes.len(),
            profitable_dishes = tables.profitable_dishes.len(),
            customer_stats = tables.customer_stats.len(),
            frequent_visitors = tables.frequent_visitors.len(),
            "Derived tables"
        );
        tables
    }
}

/// Working state of one pipeline run.
///
/// Opening a session ingests and cleans the source; [`Session::derive`]
/// fills in the derived tables. Everything is released when the session
/// is dropped.
#[derive(Debug)]
pub struct Session {
    cleaned: Vec<CleanedRecord>,
    dropped: usize,
    derived: Option<DerivedTables>,
}

impl Session {
    /// Load and clean a source file.
    pub fn open(source: &Path) -> IngestResult<Self> {
        let raw = ingest::load(source)?;
        Ok(Self::from_raw(&raw))
    }

    /// Clean already-loaded raw records.
    pub fn from_raw(raw: &[RawRecord]) -> Self {
        let outcome = ingest::clean(raw);
        Self {
            cleaned: outcome.records,
            dropped: outcome.dropped,
            derived: None,
        }
    }

    /// Start from records that are already clean.
    pub fn from_cleaned(records: Vec<CleanedRecord>) -> Self {
        Self {
            cleaned: records,
            dropped: 0,
            derived: None,
        }
    }

    /// The `cleaned_data` table.
    pub fn cleaned(&self) -> &[CleanedRecord] {
        &self.cleaned
    }

    /// Number of raw rows rejected by cleaning.
    pub fn dropped(&self) -> usize {
        self.dropped
    }

    /// Compute the derived tables, replacing any earlier result.
    pub fn derive(&mut self, options: &TransformOptions) -> &DerivedTables {
        self.derived
            .insert(DerivedTables::compute(&self.cleaned, options))
    }

    /// Derived tables, if [`Session::derive`] has run.
    pub fn derived(&self) -> Option<&DerivedTables> {
        self.derived.as_ref()
    }
}

impl Drop for Session {
    fn drop(&mut self) {
        debug!(rows = self.cleaned.len(), "Closing session");
    }
}
