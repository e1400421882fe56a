use sqlx::prelude::FromRow;

use super::RowId;

/// Address model
#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct Address {
    pub id: RowId,
    pub street1: Option<String>,
    pub street2: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub zip_code: Option<String>,
    pub country: Option<String>,
}
