// Decoding for the stats site's tabular JSON: each table is a list of
// column headers plus rows of positional values.

use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::{Map, Value};
use tracing::warn;

use crate::source::SourceError;

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResultSet {
    pub name: String,
    pub headers: Vec<String>,
    #[serde(default)]
    pub row_set: Vec<Vec<Value>>,
}

/// Envelope for stats responses. Most endpoints send `resultSets` (plural);
/// league leaders sends a single `resultSet`.
#[derive(Debug, Clone, Deserialize)]
pub struct StatsResponse {
    #[serde(rename = "resultSets", default)]
    pub result_sets: Vec<ResultSet>,
    #[serde(rename = "resultSet", default)]
    pub result_set: Option<ResultSet>,
}

impl StatsResponse {
    fn all(&self) -> impl Iterator<Item = &ResultSet> {
        self.result_sets.iter().chain(self.result_set.iter())
    }

    pub fn table(&self, name: &str) -> Option<&ResultSet> {
        self.all().find(|set| set.name == name)
    }

    /// Named table, or the first one when the name doesn't match (some
    /// endpoints rename their table by mode).
    pub fn table_or_first(&self, name: &str) -> Result<&ResultSet, SourceError> {
        self.table(name)
            .or_else(|| self.all().next())
            .ok_or_else(|| SourceError::Schema {
                table: name.to_string(),
                message: "response contained no result sets".into(),
            })
    }
}

impl ResultSet {
    fn missing_headers(&self, required: &[&str]) -> Vec<String> {
        required
            .iter()
            .filter(|col| !self.headers.iter().any(|h| h == *col))
            .map(|col| col.to_string())
            .collect()
    }

    /// Decode every row into `T` by header name. Column order is irrelevant.
    ///
    /// Any column in `required` missing from the headers fails the whole
    /// table; individual rows that don't decode are skipped with a warning.
    pub fn records<T: DeserializeOwned>(&self, required: &[&str]) -> Result<Vec<T>, SourceError> {
        let missing = self.missing_headers(required);
        if !missing.is_empty() {
            return Err(SourceError::Schema {
                table: self.name.clone(),
                message: format!("missing columns: {}", missing.join(", ")),
            });
        }

        let mut records = Vec::with_capacity(self.row_set.len());
        for (i, row) in self.row_set.iter().enumerate() {
            if row.len() != self.headers.len() {
                warn!(
                    "skipping {} row {}: {} values for {} headers",
                    self.name,
                    i,
                    row.len(),
                    self.headers.len()
                );
                continue;
            }
            let object: Map<String, Value> = self
                .headers
                .iter()
                .cloned()
                .zip(row.iter().cloned())
                .collect();
            match serde_json::from_value::<T>(Value::Object(object)) {
                Ok(record) => records.push(record),
                Err(e) => warn!("skipping malformed {} row {}: {}", self.name, i, e),
            }
        }
        Ok(records)
    }
}
