use std::fmt;

use sqlx::prelude::FromRow;

use super::RowId;

/// Organization model, name only
#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct Organization {
    pub id: RowId,
    pub name: Option<String>,
}

/// Activity counted per organization when choosing where test users land.
///
/// Declared in the order metrics are processed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ActivityMetric {
    Transactions,
    Budgets,
    Cards,
}

impl ActivityMetric {
    pub const PRIORITY: [ActivityMetric; 3] = [Self::Transactions, Self::Budgets, Self::Cards];

    /// Table whose rows are counted, grouped by `organization_id`
    pub fn table(self) -> &'static str {
        match self {
            Self::Transactions => "transactions",
            Self::Budgets => "budgets",
            Self::Cards => "cards",
        }
    }
}

impl fmt::Display for ActivityMetric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.table())
    }
}

/// One row of a grouped count, highest first
#[derive(Debug, Clone, Copy, PartialEq, Eq, FromRow)]
pub struct OrganizationActivity {
    pub organization_id: RowId,
    pub activity: i64,
}
