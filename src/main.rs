use snapshot_anonymizer_lib::{
    entities::Credential,
    services::{MetricCredentials, TestUserPlan},
};

fn metric(admin: (&str, &str), members: &[(&str, &str)]) -> MetricCredentials {
    MetricCredentials {
        admin: Credential::new(admin.0, admin.1),
        members: members
            .iter()
            .map(|(email, auth_id)| Credential::new(*email, *auth_id))
            .collect(),
    }
}

/// Known logins written onto the anonymized snapshot
fn fixture_plan() -> TestUserPlan {
    TestUserPlan {
        superadmin: Credential::new("dev+super@example.com", "pass1"),
        transactions: metric(
            ("dev+tadm@example.com", "pass2"),
            &[
                ("dev+tusr1@example.com", "pass3"),
                ("dev+tusr2@example.com", "pass3"),
                ("dev+tusr3@example.com", "pass3"),
            ],
        ),
        budgets: metric(
            ("dev+badm@example.com", "pass3"),
            &[
                ("dev+busr1@example.com", "pass3"),
                ("dev+busr2@example.com", "pass3"),
            ],
        ),
        cards: metric(
            ("dev+cadm@example.com", "pass3"),
            &[
                ("dev+cusr1@example.com", "pass3"),
                ("dev+cusr2@example.com", "pass3"),
            ],
        ),
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> color_eyre::Result<()> {
    snapshot_anonymizer_lib::run(fixture_plan()).await
}
