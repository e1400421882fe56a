use sqlx::prelude::FromRow;

use super::RowId;

/// Receipt model; `name` is the uploaded file's name
#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct Receipt {
    pub id: RowId,
    pub name: Option<String>,
}

/// Payment card model, token only
#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct Card {
    pub id: RowId,
    pub token: Option<String>,
}
