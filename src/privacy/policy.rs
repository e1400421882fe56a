//! Per-field overwrite rules
//!
//! Every anonymized column has exactly one [`Overwrite`] rule, looked up from a
//! [`PolicyTable`] and applied the same way for every table. Columns that are
//! not listed are never touched.

use std::collections::HashMap;

use crate::error::Result;

/// When a column may be replaced with a synthetic value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Overwrite {
    /// Replace only non-NULL values, so NULL stays NULL
    IfPresent,
    /// Replace only non-NULL, non-empty values
    IfNonEmpty,
    /// Leave the column as it is
    Never,
}

impl Overwrite {
    pub fn applies_to(self, current: Option<&str>) -> bool {
        match self {
            Self::IfPresent => current.is_some(),
            Self::IfNonEmpty => current.is_some_and(|v| !v.is_empty()),
            Self::Never => false,
        }
    }
}

/// A replaced column, kept for the diff log
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldChange {
    pub field: &'static str,
    pub old: Option<String>,
    pub new: String,
}

#[derive(Debug, Clone)]
pub struct PolicyTable {
    rules: HashMap<&'static str, HashMap<&'static str, Overwrite>>,
}

impl PolicyTable {
    /// Rules for the tables this crate anonymizes.
    ///
    /// `anonymize_country` is off by default: consumers of the snapshot rely on
    /// the country of an address staying stable.
    pub fn standard(anonymize_country: bool) -> Self {
        use Overwrite::*;

        let country = if anonymize_country { IfPresent } else { Never };
        let tables: [(&'static str, Vec<(&'static str, Overwrite)>); 5] = [
            ("organizations", vec![("name", IfPresent)]),
            (
                "users",
                vec![
                    ("first_name", IfPresent),
                    ("last_name", IfPresent),
                    ("display_name", IfPresent),
                    ("email", IfPresent),
                    ("phone", IfPresent),
                    ("auth_id", IfPresent),
                    ("device_token", IfPresent),
                ],
            ),
            (
                "addresses",
                vec![
                    ("street1", IfPresent),
                    ("street2", IfPresent),
                    ("city", IfPresent),
                    ("state", IfPresent),
                    ("zip_code", IfPresent),
                    ("country", country),
                ],
            ),
            ("receipts", vec![("name", IfNonEmpty)]),
            ("cards", vec![("token", IfPresent)]),
        ];

        Self {
            rules: tables
                .into_iter()
                .map(|(table, fields)| (table, fields.into_iter().collect()))
                .collect(),
        }
    }

    pub fn rule(&self, table: &str, field: &str) -> Overwrite {
        self.rules
            .get(table)
            .and_then(|fields| fields.get(field))
            .copied()
            .unwrap_or(Overwrite::Never)
    }

    /// Whether any of `fields` would be replaced given their current values.
    pub fn any_applies(&self, table: &str, fields: &[(&str, Option<&str>)]) -> bool {
        fields
            .iter()
            .any(|(field, current)| self.rule(table, field).applies_to(*current))
    }

    /// Replace `current` with the value from `replacement` if the column's rule
    /// allows it. `replacement` is only called when the write happens, so
    /// skipped columns do not consume unique values.
    pub fn apply(
        &self,
        table: &str,
        field: &'static str,
        current: &mut Option<String>,
        replacement: impl FnOnce() -> Result<String>,
    ) -> Result<Option<FieldChange>> {
        if !self.rule(table, field).applies_to(current.as_deref()) {
            return Ok(None);
        }
        let new = replacement()?;
        let old = current.replace(new.clone());
        Ok(Some(FieldChange { field, old, new }))
    }
}
