use async_trait::async_trait;
use sqlx::{Connection, SqliteConnection};
use tracing::{debug, instrument};

use super::r#trait::DataStore;
use crate::entities::{
    ActivityMetric, Address, Card, Credential, Organization, OrganizationActivity, Receipt, RowId,
    User,
};
use crate::error::{AppError, Result};

/// SQLite implementation of the DataStore trait, used for local snapshots and tests
pub struct SqliteStore {
    conn: SqliteConnection,
}

impl SqliteStore {
    pub fn new(conn: SqliteConnection) -> Self {
        Self { conn }
    }

    /// Open a SQLite snapshot, e.g. `sqlite://snapshot.db` or `sqlite::memory:`
    #[instrument(err)]
    pub async fn open(url: &str) -> Result<Self> {
        let conn = SqliteConnection::connect(url)
            .await
            .map_err(AppError::connection)?;
        Ok(Self::new(conn))
    }

    /// Run a multi-statement script, such as a schema or fixture file
    pub async fn execute_script(&mut self, sql: &str) -> Result<()> {
        sqlx::raw_sql(sql).execute(&mut self.conn).await?;
        Ok(())
    }

    /// Get the underlying connection
    pub fn connection(&mut self) -> &mut SqliteConnection {
        &mut self.conn
    }
}

#[async_trait]
impl DataStore for SqliteStore {
    async fn organizations_after(&mut self, after: RowId, limit: i64) -> Result<Vec<Organization>> {
        Ok(sqlx::query_as::<_, Organization>(
            "SELECT id, name FROM organizations WHERE id > ? ORDER BY id LIMIT ?",
        )
        .bind(after)
        .bind(limit)
        .fetch_all(&mut self.conn)
        .await?)
    }

    async fn update_organization(&mut self, organization: &Organization) -> Result<()> {
        sqlx::query("UPDATE organizations SET name = ? WHERE id = ?")
            .bind(&organization.name)
            .bind(organization.id)
            .execute(&mut self.conn)
            .await?;
        Ok(())
    }

    async fn users_after(&mut self, after: RowId, limit: i64) -> Result<Vec<User>> {
        Ok(sqlx::query_as::<_, User>(
            r#"SELECT id, first_name, last_name, display_name, email, phone, auth_id, device_token
                 FROM users
                WHERE id > ?
                ORDER BY id
                LIMIT ?"#,
        )
        .bind(after)
        .bind(limit)
        .fetch_all(&mut self.conn)
        .await?)
    }

    async fn update_user(&mut self, user: &User) -> Result<()> {
        sqlx::query(
            r#"UPDATE users
                  SET first_name = ?, last_name = ?, display_name = ?, email = ?,
                      phone = ?, auth_id = ?, device_token = ?
                WHERE id = ?"#,
        )
        .bind(&user.first_name)
        .bind(&user.last_name)
        .bind(&user.display_name)
        .bind(&user.email)
        .bind(&user.phone)
        .bind(&user.auth_id)
        .bind(&user.device_token)
        .bind(user.id)
        .execute(&mut self.conn)
        .await?;
        Ok(())
    }

    async fn addresses_after(&mut self, after: RowId, limit: i64) -> Result<Vec<Address>> {
        Ok(sqlx::query_as::<_, Address>(
            r#"SELECT id, street1, street2, city, state, zip_code, country
                 FROM addresses
                WHERE id > ?
                ORDER BY id
                LIMIT ?"#,
        )
        .bind(after)
        .bind(limit)
        .fetch_all(&mut self.conn)
        .await?)
    }

    async fn update_address(&mut self, address: &Address) -> Result<()> {
        sqlx::query(
            r#"UPDATE addresses
                  SET street1 = ?, street2 = ?, city = ?, state = ?,
                      zip_code = ?, country = ?
                WHERE id = ?"#,
        )
        .bind(&address.street1)
        .bind(&address.street2)
        .bind(&address.city)
        .bind(&address.state)
        .bind(&address.zip_code)
        .bind(&address.country)
        .bind(address.id)
        .execute(&mut self.conn)
        .await?;
        Ok(())
    }

    async fn receipts_after(&mut self, after: RowId, limit: i64) -> Result<Vec<Receipt>> {
        Ok(sqlx::query_as::<_, Receipt>(
            "SELECT id, name FROM receipts WHERE id > ? ORDER BY id LIMIT ?",
        )
        .bind(after)
        .bind(limit)
        .fetch_all(&mut self.conn)
        .await?)
    }

    async fn update_receipt(&mut self, receipt: &Receipt) -> Result<()> {
        sqlx::query("UPDATE receipts SET name = ? WHERE id = ?")
            .bind(&receipt.name)
            .bind(receipt.id)
            .execute(&mut self.conn)
            .await?;
        Ok(())
    }

    async fn cards_after(&mut self, after: RowId, limit: i64) -> Result<Vec<Card>> {
        Ok(sqlx::query_as::<_, Card>(
            "SELECT id, token FROM cards WHERE id > ? ORDER BY id LIMIT ?",
        )
        .bind(after)
        .bind(limit)
        .fetch_all(&mut self.conn)
        .await?)
    }

    async fn update_card(&mut self, card: &Card) -> Result<()> {
        sqlx::query("UPDATE cards SET token = ? WHERE id = ?")
            .bind(&card.token)
            .bind(card.id)
            .execute(&mut self.conn)
            .await?;
        Ok(())
    }

    #[instrument(err, skip(self))]
    async fn truncate(&mut self, table: &str) -> Result<()> {
        sqlx::query(&format!("DELETE FROM {table}"))
            .execute(&mut self.conn)
            .await?;
        Ok(())
    }

    #[instrument(err, skip(self))]
    async fn find_superadmin(&mut self) -> Result<Option<RowId>> {
        Ok(sqlx::query_scalar::<_, RowId>(
            r#"SELECT id
                 FROM users
                WHERE superadmin = 1 AND
                      retired = 0
                ORDER BY id
                LIMIT 1"#,
        )
        .fetch_optional(&mut self.conn)
        .await?)
    }

    #[instrument(err, skip(self))]
    async fn rank_organizations(
        &mut self,
        metric: ActivityMetric,
        limit: i64,
    ) -> Result<Vec<OrganizationActivity>> {
        let sql = format!(
            r#"SELECT organization_id, COUNT(*) AS activity
                 FROM {}
                WHERE organization_id IS NOT NULL
                GROUP BY organization_id
                ORDER BY activity DESC
                LIMIT ?"#,
            metric.table()
        );
        let ranked = sqlx::query_as::<_, OrganizationActivity>(&sql)
            .bind(limit)
            .fetch_all(&mut self.conn)
            .await?;
        debug!("{} ranked organizations for {}", ranked.len(), metric);
        Ok(ranked)
    }

    #[instrument(err, skip(self))]
    async fn find_organization_admin(&mut self, organization_id: RowId) -> Result<Option<RowId>> {
        Ok(sqlx::query_scalar::<_, RowId>(
            r#"SELECT id
                 FROM users
                WHERE organization_id = ? AND
                      organization_admin = 1 AND
                      retired = 0
                ORDER BY id
                LIMIT 1"#,
        )
        .bind(organization_id)
        .fetch_optional(&mut self.conn)
        .await?)
    }

    #[instrument(err, skip(self))]
    async fn find_organization_members(
        &mut self,
        organization_id: RowId,
        limit: i64,
    ) -> Result<Vec<RowId>> {
        Ok(sqlx::query_scalar::<_, RowId>(
            r#"SELECT id
                 FROM users
                WHERE organization_id = ? AND
                      organization_admin = 0 AND
                      retired = 0
                ORDER BY id
                LIMIT ?"#,
        )
        .bind(organization_id)
        .bind(limit)
        .fetch_all(&mut self.conn)
        .await?)
    }

    #[instrument(err, skip(self, credential))]
    async fn bind_credential(&mut self, user_id: RowId, credential: &Credential) -> Result<()> {
        sqlx::query("UPDATE users SET email = ?, auth_id = ? WHERE id = ?")
            .bind(&credential.email)
            .bind(&credential.auth_id)
            .bind(user_id)
            .execute(&mut self.conn)
            .await?;
        Ok(())
    }

    async fn close(self) -> Result<()> {
        self.conn.close().await?;
        Ok(())
    }
}
