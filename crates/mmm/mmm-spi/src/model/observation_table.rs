//! Rectangular, time-ordered table of named numeric columns.

use serde::{Deserialize, Serialize};

use crate::error::{MmmError, Result};

/// A single named column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Column {
    pub name: String,
    pub values: Vec<f64>,
}

/// Observation table.
///
/// Rows are time steps (row position is the time index). Every column has
/// the same length and holds only finite values.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "TableRepr")]
pub struct ObservationTable {
    columns: Vec<Column>,
    n_rows: usize,
}

/// Wire form of [`ObservationTable`]; validated on the way in.
#[derive(Deserialize)]
struct TableRepr {
    columns: Vec<Column>,
    #[serde(default)]
    n_rows: Option<usize>,
}

impl TryFrom<TableRepr> for ObservationTable {
    type Error = MmmError;

    fn try_from(repr: TableRepr) -> Result<Self> {
        let table = Self::from_columns(repr.columns.into_iter().map(|c| (c.name, c.values)))?;
        match repr.n_rows {
            Some(n_rows) if n_rows != table.n_rows => Err(MmmError::InvalidData(format!(
                "declared {} rows, columns have {}",
                n_rows, table.n_rows
            ))),
            _ => Ok(table),
        }
    }
}

impl ObservationTable {
    /// Create an empty table with no columns.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a table from `(name, values)` pairs.
    pub fn from_columns<I, S>(columns: I) -> Result<Self>
    where
        I: IntoIterator<Item = (S, Vec<f64>)>,
        S: Into<String>,
    {
        let mut table = Self::new();
        for (name, values) in columns {
            table.push_column(name.into(), values)?;
        }
        Ok(table)
    }

    /// Return a copy of this table with an additional column.
    pub fn with_column(&self, name: impl Into<String>, values: Vec<f64>) -> Result<Self> {
        let mut table = self.clone();
        table.push_column(name.into(), values)?;
        Ok(table)
    }

    /// Number of rows (time steps).
    pub fn n_rows(&self) -> usize {
        self.n_rows
    }

    /// Number of columns.
    pub fn n_columns(&self) -> usize {
        self.columns.len()
    }

    /// Whether a column called `name` exists.
    pub fn has_column(&self, name: &str) -> bool {
        self.columns.iter().any(|c| c.name == name)
    }

    /// Column names in insertion order.
    pub fn column_names(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(|c| c.name.as_str())
    }

    /// Values of a column, or `None` if absent.
    pub fn get(&self, name: &str) -> Option<&[f64]> {
        self.columns
            .iter()
            .find(|c| c.name == name)
            .map(|c| c.values.as_slice())
    }

    /// Values of a column, failing with [`MmmError::MissingColumn`] if absent.
    pub fn column(&self, name: &str) -> Result<&[f64]> {
        self.get(name).ok_or_else(|| MmmError::missing_column(name))
    }

    /// Names from `names` that are not columns of this table, in input order.
    pub fn missing_columns<'a, I>(&self, names: I) -> Vec<String>
    where
        I: IntoIterator<Item = &'a str>,
    {
        names
            .into_iter()
            .filter(|name| !self.has_column(name))
            .map(str::to_string)
            .collect()
    }

    /// Fail with every absent name if any of `names` is missing.
    pub fn require_columns<'a, I>(&self, names: I) -> Result<()>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let missing = self.missing_columns(names);
        if missing.is_empty() {
            Ok(())
        } else {
            Err(MmmError::MissingColumn(missing))
        }
    }

    /// Sum of a column.
    pub fn sum(&self, name: &str) -> Result<f64> {
        Ok(self.column(name)?.iter().sum())
    }

    /// Arithmetic mean of a column.
    pub fn mean(&self, name: &str) -> Result<f64> {
        let values = self.column(name)?;
        if values.is_empty() {
            return Err(MmmError::InsufficientData {
                required: 1,
                actual: 0,
            });
        }
        Ok(values.iter().sum::<f64>() / values.len() as f64)
    }

    fn push_column(&mut self, name: String, values: Vec<f64>) -> Result<()> {
        if self.has_column(&name) {
            return Err(MmmError::InvalidData(format!("duplicate column '{}'", name)));
        }
        if !self.columns.is_empty() && values.len() != self.n_rows {
            return Err(MmmError::InvalidData(format!(
                "column '{}' has {} rows, expected {}",
                name,
                values.len(),
                self.n_rows
            )));
        }
        if let Some(row) = values.iter().position(|v| !v.is_finite()) {
            return Err(MmmError::InvalidData(format!(
                "column '{}' has a non-finite value at row {}",
                name, row
            )));
        }
        self.n_rows = values.len();
        self.columns.push(Column { name, values });
        Ok(())
    }
}
