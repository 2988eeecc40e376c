//! Tabular edge lists.

use combograph_graphlib::{AttrValue, Attrs};
use serde::{Deserialize, Deserializer};

/// A rectangular table of attribute values, one row per edge.
///
/// Rows always have exactly one cell per column; absent cells are `Null`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EdgeTable {
    columns: Vec<String>,
    rows: Vec<Vec<AttrValue>>,
}

impl EdgeTable {
    pub fn new<I, S>(columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            columns: columns.into_iter().map(Into::into).collect(),
            rows: Vec::new(),
        }
    }

    /// Appends a row, padding short rows with `Null` and truncating long ones.
    pub fn push_row<I, V>(&mut self, cells: I) -> &mut Self
    where
        I: IntoIterator<Item = V>,
        V: Into<AttrValue>,
    {
        let mut row: Vec<AttrValue> = cells
            .into_iter()
            .take(self.columns.len())
            .map(Into::into)
            .collect();
        row.resize(self.columns.len(), AttrValue::Null);
        self.rows.push(row);
        self
    }

    /// Builds a table from records. Columns appear in the order they are first seen.
    pub fn from_records<I>(records: I) -> Self
    where
        I: IntoIterator<Item = Attrs>,
    {
        let records: Vec<Attrs> = records.into_iter().collect();
        let mut columns: indexmap::IndexSet<String> = indexmap::IndexSet::new();
        for r in &records {
            for k in r.keys() {
                if !columns.contains(k) {
                    columns.insert(k.clone());
                }
            }
        }
        let rows = records
            .into_iter()
            .map(|mut r| {
                columns
                    .iter()
                    .map(|c| r.swap_remove(c).unwrap_or_default())
                    .collect()
            })
            .collect();
        Self {
            columns: columns.into_iter().collect(),
            rows,
        }
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.column_index(name).is_some()
    }

    pub fn rows(&self) -> impl Iterator<Item = &[AttrValue]> {
        self.rows.iter().map(Vec::as_slice)
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

impl<'de> Deserialize<'de> for EdgeTable {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let records = Vec::<Attrs>::deserialize(deserializer)?;
        Ok(Self::from_records(records))
    }
}
