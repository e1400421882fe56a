use async_trait::async_trait;

use crate::entities::{
    ActivityMetric, Address, Card, Credential, Organization, OrganizationActivity, Receipt, RowId,
    User,
};
use crate::error::Result;

/// Statements the anonymizer issues against the snapshot.
///
/// Reads are keyset pages (`id > after ORDER BY id LIMIT limit`) so a table is
/// never loaded whole, and every write is a single statement keyed by primary
/// key. Implementations hold one connection and run in autocommit mode: each
/// write is durable as soon as it returns.
#[async_trait]
pub trait DataStore: Send {
    async fn organizations_after(&mut self, after: RowId, limit: i64) -> Result<Vec<Organization>>;
    async fn update_organization(&mut self, organization: &Organization) -> Result<()>;

    async fn users_after(&mut self, after: RowId, limit: i64) -> Result<Vec<User>>;
    async fn update_user(&mut self, user: &User) -> Result<()>;

    async fn addresses_after(&mut self, after: RowId, limit: i64) -> Result<Vec<Address>>;
    async fn update_address(&mut self, address: &Address) -> Result<()>;

    async fn receipts_after(&mut self, after: RowId, limit: i64) -> Result<Vec<Receipt>>;
    async fn update_receipt(&mut self, receipt: &Receipt) -> Result<()>;

    async fn cards_after(&mut self, after: RowId, limit: i64) -> Result<Vec<Card>>;
    async fn update_card(&mut self, card: &Card) -> Result<()>;

    /// Remove every row of `table`. The name must already be a validated
    /// identifier.
    async fn truncate(&mut self, table: &str) -> Result<()>;

    /// First active superadmin, if any
    async fn find_superadmin(&mut self) -> Result<Option<RowId>>;

    /// Organizations by `metric` count, highest first, at most `limit` rows
    async fn rank_organizations(
        &mut self,
        metric: ActivityMetric,
        limit: i64,
    ) -> Result<Vec<OrganizationActivity>>;

    /// First active admin of the organization, if any
    async fn find_organization_admin(&mut self, organization_id: RowId) -> Result<Option<RowId>>;

    /// Active non-admin users of the organization in id order, at most `limit`
    async fn find_organization_members(
        &mut self,
        organization_id: RowId,
        limit: i64,
    ) -> Result<Vec<RowId>>;

    /// Overwrite the login columns of one user
    async fn bind_credential(&mut self, user_id: RowId, credential: &Credential) -> Result<()>;

    async fn close(self) -> Result<()>
    where
        Self: Sized;
}
