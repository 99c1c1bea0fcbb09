//! Record and table types shared by every pipeline stage.

pub mod derived;
pub mod record;
pub mod table;

pub use derived::{CustomerStats, FrequentVisitor, PopularDish, ProfitableDish, RestaurantStats};
pub use record::{CleanedRecord, RawRecord, COST_PRECISION, COST_SCALE};
pub use table::{TableName, TableRow};
