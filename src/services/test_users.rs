//! Test-user binding
//!
//! After anonymization nobody can log into the snapshot. This step writes a
//! fixed set of known credentials onto real rows: one superadmin, and for each
//! activity metric an admin plus a few members of the most active organization
//! that has not been picked yet.

use std::collections::HashSet;

use tracing::info;

use crate::entities::{
    ActivityMetric, Credential, CredentialAssignment, OrganizationActivity, Role, RowId,
};
use crate::error::Result;
use crate::logging::OperationLogger;
use crate::storage::DataStore;

/// Organizations already handed to a metric during this run
#[derive(Debug, Default)]
pub struct ClaimedOrganizations {
    ids: HashSet<RowId>,
}

impl ClaimedOrganizations {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, organization_id: RowId) -> bool {
        self.ids.contains(&organization_id)
    }

    /// Returns `false` if the organization was already claimed.
    pub fn claim(&mut self, organization_id: RowId) -> bool {
        self.ids.insert(organization_id)
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}

/// Credentials for the organization picked by one metric
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetricCredentials {
    pub admin: Credential,
    /// Bound to members in id order; extras are dropped
    pub members: Vec<Credential>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TestUserPlan {
    pub superadmin: Credential,
    pub transactions: MetricCredentials,
    pub budgets: MetricCredentials,
    pub cards: MetricCredentials,
}

impl TestUserPlan {
    pub fn credentials(&self, metric: ActivityMetric) -> &MetricCredentials {
        match metric {
            ActivityMetric::Transactions => &self.transactions,
            ActivityMetric::Budgets => &self.budgets,
            ActivityMetric::Cards => &self.cards,
        }
    }
}

/// Outcome of one metric
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetricAssignment {
    pub metric: ActivityMetric,
    pub organization: OrganizationActivity,
    pub assignments: Vec<CredentialAssignment>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TestUserReport {
    pub superadmin: Option<CredentialAssignment>,
    pub metrics: Vec<MetricAssignment>,
}

impl TestUserReport {
    /// Every credential written, superadmin first
    pub fn assignments(&self) -> impl Iterator<Item = &CredentialAssignment> {
        self.superadmin
            .iter()
            .chain(self.metrics.iter().flat_map(|m| m.assignments.iter()))
    }

    pub fn metric(&self, metric: ActivityMetric) -> Option<&MetricAssignment> {
        self.metrics.iter().find(|m| m.metric == metric)
    }
}

pub struct TestUserAssigner {
    plan: TestUserPlan,
}

impl TestUserAssigner {
    pub fn new(plan: TestUserPlan) -> Self {
        Self { plan }
    }

    /// Bind the superadmin, then each metric in [`ActivityMetric::PRIORITY`]
    /// order.
    pub async fn run<D: DataStore>(
        &self,
        store: &mut D,
        claimed: &mut ClaimedOrganizations,
    ) -> Result<TestUserReport> {
        let op = OperationLogger::start("Assigning test users");

        let superadmin = self.bind_superadmin(store).await?;

        let mut metrics = Vec::new();
        for metric in ActivityMetric::PRIORITY {
            if let Some(assignment) = self.assign_metric(store, claimed, metric).await? {
                metrics.push(assignment);
            }
        }

        let report = TestUserReport {
            superadmin,
            metrics,
        };
        let bound = report.assignments().count() as u64;
        op.finish(bound, bound);
        Ok(report)
    }

    /// Bind the superadmin credential to the first active superadmin.
    pub async fn bind_superadmin<D: DataStore>(
        &self,
        store: &mut D,
    ) -> Result<Option<CredentialAssignment>> {
        let Some(user_id) = store.find_superadmin().await? else {
            info!("No active superadmin found; skipping");
            return Ok(None);
        };

        let credential = self.plan.superadmin.clone();
        store.bind_credential(user_id, &credential).await?;
        info!("superadmin={} email={}", user_id, credential.email);

        Ok(Some(CredentialAssignment {
            role: Role::Superadmin,
            organization_id: None,
            user_id,
            credential,
        }))
    }

    /// Claim the most active unclaimed organization for `metric` and bind its
    /// admin and members. Returns `None` when every ranked organization is
    /// already claimed or the metric has no rows.
    pub async fn assign_metric<D: DataStore>(
        &self,
        store: &mut D,
        claimed: &mut ClaimedOrganizations,
        metric: ActivityMetric,
    ) -> Result<Option<MetricAssignment>> {
        // One more than the claimed count guarantees an unclaimed candidate
        // whenever enough organizations exist.
        let ranked = store
            .rank_organizations(metric, claimed.len() as i64 + 1)
            .await?;
        let Some(organization) = ranked
            .into_iter()
            .find(|candidate| !claimed.contains(candidate.organization_id))
        else {
            info!("No unclaimed organization with {}", metric);
            return Ok(None);
        };
        claimed.claim(organization.organization_id);

        let credentials = self.plan.credentials(metric);
        let organization_id = organization.organization_id;
        let mut assignments = Vec::new();

        match store.find_organization_admin(organization_id).await? {
            Some(user_id) => {
                store.bind_credential(user_id, &credentials.admin).await?;
                info!(
                    "most {} organization={} admin={}",
                    metric, organization_id, user_id
                );
                assignments.push(CredentialAssignment {
                    role: Role::OrganizationAdmin,
                    organization_id: Some(organization_id),
                    user_id,
                    credential: credentials.admin.clone(),
                });
            }
            None => info!("organization={} has no active admin", organization_id),
        }

        if !credentials.members.is_empty() {
            let members = store
                .find_organization_members(organization_id, credentials.members.len() as i64)
                .await?;
            for (user_id, credential) in members.into_iter().zip(&credentials.members) {
                store.bind_credential(user_id, credential).await?;
                info!(
                    "most {} organization={} user={}",
                    metric, organization_id, user_id
                );
                assignments.push(CredentialAssignment {
                    role: Role::OrganizationMember,
                    organization_id: Some(organization_id),
                    user_id,
                    credential: credential.clone(),
                });
            }
        }

        Ok(Some(MetricAssignment {
            metric,
            organization,
            assignments,
        }))
    }
}
