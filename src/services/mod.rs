// Anonymization steps
pub mod anonymizer;
pub mod test_users;

pub use anonymizer::{AnonymizationReport, RecordAnonymizer, Replacer, TableReport};
pub use test_users::{
    ClaimedOrganizations, MetricAssignment, MetricCredentials, TestUserAssigner, TestUserPlan,
    TestUserReport,
};
