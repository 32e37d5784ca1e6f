use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::model::{Encoder, Error};

/// Ordinal encoding: a value's code is its position among the sorted distinct
/// values seen for its column during fitting.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct OrdinalEncoder {
    columns: Vec<String>,
    categories: Vec<Vec<String>>,
}

impl OrdinalEncoder {
    pub fn new(columns: &[&str]) -> Self {
        Self {
            columns: columns.iter().map(|column| column.to_string()).collect(),
            categories: Vec::new(),
        }
    }

    pub fn is_fitted(&self) -> bool {
        !self.categories.is_empty() && self.categories.len() == self.columns.len()
    }

    fn check_width(&self, actual: usize) -> Result<(), Error> {
        if actual != self.columns.len() {
            return Err(Error::Shape {
                expected: self.columns.len(),
                actual,
            });
        }
        Ok(())
    }
}

impl Encoder for OrdinalEncoder {
    fn fit(&mut self, rows: &[Vec<&str>]) -> Result<(), Error> {
        if rows.is_empty() {
            return Err(Error::EmptyTrainingSet);
        }
        let mut sets: Vec<BTreeSet<&str>> = vec![BTreeSet::new(); self.columns.len()];
        for row in rows {
            self.check_width(row.len())?;
            for (set, value) in sets.iter_mut().zip(row) {
                set.insert(*value);
            }
        }
        self.categories = sets
            .into_iter()
            .map(|set| set.into_iter().map(str::to_string).collect())
            .collect();
        Ok(())
    }

    fn transform(&self, row: &[&str]) -> Result<Vec<f64>, Error> {
        if !self.is_fitted() {
            return Err(Error::NotFitted);
        }
        self.check_width(row.len())?;
        row.iter()
            .zip(&self.columns)
            .zip(&self.categories)
            .map(|((value, column), categories)| {
                categories
                    .binary_search_by(|category| category.as_str().cmp(*value))
                    .map(|code| code as f64)
                    .map_err(|_| Error::UnknownCategory {
                        column: column.clone(),
                        value: value.to_string(),
                    })
            })
            .collect()
    }

    fn validate(&self) -> Result<(), Error> {
        if self.columns.is_empty() {
            return Err(Error::Malformed("encoder has no columns".into()));
        }
        if self.categories.len() != self.columns.len() {
            return Err(Error::Malformed(format!(
                "encoder has {} columns but {} category lists",
                self.columns.len(),
                self.categories.len()
            )));
        }
        for (column, categories) in self.columns.iter().zip(&self.categories) {
            if categories.is_empty() {
                return Err(Error::Malformed(format!("column {column} has no categories")));
            }
            // transform relies on binary search
            if categories.windows(2).any(|pair| pair[0] >= pair[1]) {
                return Err(Error::Malformed(format!(
                    "categories of column {column} are not strictly sorted"
                )));
            }
        }
        Ok(())
    }
}
