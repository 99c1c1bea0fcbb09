//! Header-name resolution for the source file.

use csv::StringRecord;

/// The four columns the pipeline reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Column {
    Restaurant,
    Dish,
    Customer,
    Cost,
}

impl Column {
    /// Canonical header name.
    pub fn header(&self) -> &'static str {
        match self {
            Column::Restaurant => "restaurant_names",
            Column::Dish => "food_names",
            Column::Customer => "first_name",
            Column::Cost => "food_cost",
        }
    }

    fn aliases(&self) -> &'static [&'static str] {
        match self {
            Column::Restaurant => &["restaurant_names", "restaurant_name", "restaurant"],
            Column::Dish => &["food_names", "food_name", "dish", "dish_name"],
            Column::Customer => &["first_name", "customer", "customer_name"],
            Column::Cost => &["food_cost", "cost", "price"],
        }
    }

    fn matches(&self, header: &str) -> bool {
        let normalized = normalize(header);
        self.aliases().iter().any(|alias| *alias == normalized)
    }
}

fn normalize(header: &str) -> String {
    header
        .trim()
        .to_lowercase()
        .chars()
        .map(|c| if c == ' ' || c == '-' { '_' } else { c })
        .collect()
}

/// Positions of the required columns within a header row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnMap {
    restaurant: usize,
    dish: usize,
    customer: usize,
    cost: usize,
}

impl ColumnMap {
    /// Resolve column positions from header names.
    ///
    /// The first header matching a column wins.
    pub fn from_headers<'a>(headers: impl IntoIterator<Item = &'a str>) -> Result<Self, String> {
        let headers: Vec<&str> = headers.into_iter().collect();
        let find = |column: Column| {
            headers
                .iter()
                .position(|h| column.matches(h))
                .ok_or_else(|| format!("missing required column '{}'", column.header()))
        };

        Ok(Self {
            restaurant: find(Column::Restaurant)?,
            dish: find(Column::Dish)?,
            customer: find(Column::Customer)?,
            cost: find(Column::Cost)?,
        })
    }

    /// Position of a column.
    pub fn index(&self, column: Column) -> usize {
        match column {
            Column::Restaurant => self.restaurant,
            Column::Dish => self.dish,
            Column::Customer => self.customer,
            Column::Cost => self.cost,
        }
    }

    /// Trimmed field value, `None` when empty.
    pub fn get<'r>(&self, row: &'r StringRecord, column: Column) -> Option<&'r str> {
        row.get(self.index(column))
            .map(str::trim)
            .filter(|v| !v.is_empty())
    }
}
