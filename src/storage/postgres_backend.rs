use async_trait::async_trait;
use sqlx::{Connection, PgConnection};
use tracing::{debug, instrument};

use super::r#trait::DataStore;
use crate::entities::{
    ActivityMetric, Address, Card, Credential, Organization, OrganizationActivity, Receipt, RowId,
    User,
};
use crate::error::Result;

/// PostgreSQL implementation of the DataStore trait, on a single connection
pub struct PostgresStore {
    conn: PgConnection,
}

impl PostgresStore {
    pub fn new(conn: PgConnection) -> Self {
        Self { conn }
    }
}

#[async_trait]
impl DataStore for PostgresStore {
    async fn organizations_after(&mut self, after: RowId, limit: i64) -> Result<Vec<Organization>> {
        Ok(sqlx::query_as::<_, Organization>(
            "SELECT id, name FROM organizations WHERE id > $1 ORDER BY id LIMIT $2",
        )
        .bind(after)
        .bind(limit)
        .fetch_all(&mut self.conn)
        .await?)
    }

    async fn update_organization(&mut self, organization: &Organization) -> Result<()> {
        sqlx::query("UPDATE organizations SET name = $1 WHERE id = $2")
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
                WHERE id > $1
                ORDER BY id
                LIMIT $2"#,
        )
        .bind(after)
        .bind(limit)
        .fetch_all(&mut self.conn)
        .await?)
    }

    async fn update_user(&mut self, user: &User) -> Result<()> {
        sqlx::query(
            r#"UPDATE users
                  SET first_name = $1, last_name = $2, display_name = $3, email = $4,
                      phone = $5, auth_id = $6, device_token = $7
                WHERE id = $8"#,
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
                WHERE id > $1
                ORDER BY id
                LIMIT $2"#,
        )
        .bind(after)
        .bind(limit)
        .fetch_all(&mut self.conn)
        .await?)
    }

    async fn update_address(&mut self, address: &Address) -> Result<()> {
        sqlx::query(
            r#"UPDATE addresses
                  SET street1 = $1, street2 = $2, city = $3, state = $4,
                      zip_code = $5, country = $6
                WHERE id = $7"#,
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
            "SELECT id, name FROM receipts WHERE id > $1 ORDER BY id LIMIT $2",
        )
        .bind(after)
        .bind(limit)
        .fetch_all(&mut self.conn)
        .await?)
    }

    async fn update_receipt(&mut self, receipt: &Receipt) -> Result<()> {
        sqlx::query("UPDATE receipts SET name = $1 WHERE id = $2")
            .bind(&receipt.name)
            .bind(receipt.id)
            .execute(&mut self.conn)
            .await?;
        Ok(())
    }

    async fn cards_after(&mut self, after: RowId, limit: i64) -> Result<Vec<Card>> {
        Ok(sqlx::query_as::<_, Card>(
            "SELECT id, token FROM cards WHERE id > $1 ORDER BY id LIMIT $2",
        )
        .bind(after)
        .bind(limit)
        .fetch_all(&mut self.conn)
        .await?)
    }

    async fn update_card(&mut self, card: &Card) -> Result<()> {
        sqlx::query("UPDATE cards SET token = $1 WHERE id = $2")
            .bind(&card.token)
            .bind(card.id)
            .execute(&mut self.conn)
            .await?;
        Ok(())
    }

    #[instrument(err, skip(self))]
    async fn truncate(&mut self, table: &str) -> Result<()> {
        sqlx::query(&format!("TRUNCATE {table}"))
            .execute(&mut self.conn)
            .await?;
        Ok(())
    }

    #[instrument(err, skip(self))]
    async fn find_superadmin(&mut self) -> Result<Option<RowId>> {
        Ok(sqlx::query_scalar::<_, RowId>(
            r#"SELECT id
                 FROM users
                WHERE superadmin = true AND
                      retired = false
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
                LIMIT $1"#,
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
                WHERE organization_id = $1 AND
                      organization_admin = true AND
                      retired = false
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
                WHERE organization_id = $1 AND
                      organization_admin = false AND
                      retired = false
                ORDER BY id
                LIMIT $2"#,
        )
        .bind(organization_id)
        .bind(limit)
        .fetch_all(&mut self.conn)
        .await?)
    }

    #[instrument(err, skip(self, credential))]
    async fn bind_credential(&mut self, user_id: RowId, credential: &Credential) -> Result<()> {
        sqlx::query("UPDATE users SET email = $1, auth_id = $2 WHERE id = $3")
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
