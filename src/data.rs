use crate::constants::CHURN;
use crate::errors::ExploreError;
use crate::utils::items_to_strings;
use hashbrown::HashMap;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Churn label of a single customer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Churn {
    Yes,
    No,
}

impl Churn {
    /// Whether the label marks a churned customer.
    pub fn is_churned(&self) -> bool {
        matches!(self, Churn::Yes)
    }

    /// The label as written in the source data.
    pub fn as_str(&self) -> &'static str {
        match self {
            Churn::Yes => "Yes",
            Churn::No => "No",
        }
    }
}

impl FromStr for Churn {
    type Err = ExploreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "Yes" | "yes" | "YES" => Ok(Churn::Yes),
            "No" | "no" | "NO" => Ok(Churn::No),
            _ => Err(ExploreError::ParseString(
                s.to_string(),
                "Churn".to_string(),
                items_to_strings(vec!["Yes", "No"]),
            )),
        }
    }
}

impl fmt::Display for Churn {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A single named column of customer data.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Column {
    /// String labelled values, one label per customer.
    Categorical(Vec<String>),
    /// Float values, one per customer.
    Numeric(Vec<f64>),
}

impl Column {
    /// Number of values held by the column.
    pub fn len(&self) -> usize {
        match self {
            Column::Categorical(v) => v.len(),
            Column::Numeric(v) => v.len(),
        }
    }

    /// Whether the column holds no values.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn kind(&self) -> &'static str {
        match self {
            Column::Categorical(_) => "categorical",
            Column::Numeric(_) => "numeric",
        }
    }
}

/// Column oriented, in-memory table of customer records.
///
/// Each column is stored under its name, and every column must hold exactly
/// one value per customer. The first column added fixes the row count for the
/// rest of the table. Nothing in this crate mutates a table after it is
/// built; exploration views and significance checks read filtered views of
/// its columns and discard them.
///
/// The Telco schema this crate works against is described by the column name
/// constants in [`crate::constants`]: a categorical churn label, categorical
/// contract and payment types, and numeric tenure and monthly charges.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CustomerTable {
    columns: HashMap<String, Column>,
    order: Vec<String>,
    rows: usize,
}

impl CustomerTable {
    /// Create a new, empty table.
    pub fn new() -> Self {
        CustomerTable {
            columns: HashMap::new(),
            order: Vec::new(),
            rows: 0,
        }
    }

    /// Number of rows (customers) in the table.
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Whether the table holds no columns.
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Names of the columns, in the order they were added.
    pub fn column_names(&self) -> impl Iterator<Item = &str> {
        self.order.iter().map(|s| s.as_str())
    }

    /// Add a categorical column, consuming and returning the table.
    ///
    /// * `name` - Name the column is stored under.
    /// * `values` - One label per customer.
    pub fn with_categorical<S: Into<String>>(self, name: S, values: Vec<String>) -> Result<Self, ExploreError> {
        self.insert(name.into(), Column::Categorical(values))
    }

    /// Add a numeric column, consuming and returning the table.
    ///
    /// * `name` - Name the column is stored under.
    /// * `values` - One value per customer.
    pub fn with_numeric<S: Into<String>>(self, name: S, values: Vec<f64>) -> Result<Self, ExploreError> {
        self.insert(name.into(), Column::Numeric(values))
    }

    fn insert(mut self, name: String, column: Column) -> Result<Self, ExploreError> {
        if self.order.is_empty() {
            // The first column fixes the row count.
            self.rows = column.len();
        } else if column.len() != self.rows {
            return Err(ExploreError::ColumnLength(name, self.rows, column.len()));
        }
        if !self.columns.contains_key(&name) {
            self.order.push(name.clone());
        }
        self.columns.insert(name, column);
        Ok(self)
    }

    /// Get a categorical column as a slice of labels.
    ///
    /// * `name` - Name of the column to get.
    pub fn categorical(&self, name: &str) -> Result<&[String], ExploreError> {
        match self.columns.get(name) {
            None => Err(ExploreError::MissingColumn(name.to_string())),
            Some(Column::Categorical(v)) => Ok(v),
            Some(c) => Err(ExploreError::ColumnType(name.to_string(), "categorical", c.kind())),
        }
    }

    /// Get a numeric column as a slice of floats.
    ///
    /// * `name` - Name of the column to get.
    pub fn numeric(&self, name: &str) -> Result<&[f64], ExploreError> {
        match self.columns.get(name) {
            None => Err(ExploreError::MissingColumn(name.to_string())),
            Some(Column::Numeric(v)) => Ok(v),
            Some(c) => Err(ExploreError::ColumnType(name.to_string(), "numeric", c.kind())),
        }
    }

    /// Parse the churn column into one label per customer.
    pub fn churn(&self) -> Result<Vec<Churn>, ExploreError> {
        self.categorical(CHURN)?.iter().map(|s| s.parse()).collect()
    }
}
