//! Raw, date-indexed price table as delivered by a history source.
//!
//! Rows may arrive unsorted, carry duplicate dates or hold gaps; cleaning is
//! the job of [`normalize`](crate::domain::normalize::normalize).

use crate::domain::error::DcasimError;
use chrono::NaiveDate;

#[derive(Debug, Clone, PartialEq)]
pub struct RawColumn {
    pub name: String,
    pub values: Vec<Option<f64>>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawHistory {
    index: Vec<NaiveDate>,
    columns: Vec<RawColumn>,
}

impl RawHistory {
    pub fn new(index: Vec<NaiveDate>) -> Self {
        Self {
            index,
            columns: Vec::new(),
        }
    }

    /// Adds a column, replacing any existing column with the same name.
    pub fn add_column(
        &mut self,
        name: impl Into<String>,
        values: Vec<Option<f64>>,
    ) -> Result<(), DcasimError> {
        let name = name.into();
        if values.len() != self.index.len() {
            return Err(DcasimError::MalformedHistory {
                reason: format!(
                    "column '{}' has {} values for {} dates",
                    name,
                    values.len(),
                    self.index.len()
                ),
            });
        }
        self.columns.retain(|c| c.name != name);
        self.columns.push(RawColumn { name, values });
        Ok(())
    }

    pub fn with_column(
        mut self,
        name: impl Into<String>,
        values: Vec<Option<f64>>,
    ) -> Result<Self, DcasimError> {
        self.add_column(name, values)?;
        Ok(self)
    }

    pub fn index(&self) -> &[NaiveDate] {
        &self.index
    }

    pub fn column(&self, name: &str) -> Option<&RawColumn> {
        self.columns.iter().find(|c| c.name == name)
    }

    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.name.as_str()).collect()
    }

    pub fn row_count(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }
}
