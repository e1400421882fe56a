//! Record anonymization
//!
//! Walks every PII-bearing table page by page, replaces the columns its
//! [`PolicyTable`] allows, and writes each changed row back with its own
//! UPDATE. Ephemeral tables are truncated instead.

use crate::config::AnonymizerConfig;
use crate::entities::{Address, Card, Organization, Receipt, RowId, User};
use crate::error::Result;
use crate::logging::{OperationLogger, log_changes};
use crate::privacy::{
    Category, FieldChange, History, PersonName, PolicyTable, UniqueAssigner, ValueSynthesizer,
};
use crate::storage::DataStore;

/// Rows read and rewritten for one table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableReport {
    pub table: &'static str,
    pub rows_seen: u64,
    pub rows_updated: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AnonymizationReport {
    pub tables: Vec<TableReport>,
    pub truncated: Vec<String>,
}

impl AnonymizationReport {
    pub fn table(&self, name: &str) -> Option<&TableReport> {
        self.tables.iter().find(|t| t.table == name)
    }
}

/// Value source plus the rules deciding which columns get a value
pub struct Replacer {
    assigner: UniqueAssigner<ValueSynthesizer>,
    policy: PolicyTable,
}

impl Replacer {
    pub fn new(assigner: UniqueAssigner<ValueSynthesizer>, policy: PolicyTable) -> Self {
        Self { assigner, policy }
    }

    fn replace(
        &mut self,
        history: &mut History,
        table: &str,
        field: &'static str,
        current: &mut Option<String>,
        category: Category,
    ) -> Result<Option<FieldChange>> {
        let Self { assigner, policy } = self;
        policy.apply(table, field, current, || assigner.assign(history, category))
    }
}

/// A table the anonymizer walks
trait AnonymizedTable: Sized {
    const TABLE: &'static str;
    const STEP: &'static str;

    fn id(&self) -> RowId;

    async fn page<D: DataStore>(store: &mut D, after: RowId, limit: i64) -> Result<Vec<Self>>;

    async fn write<D: DataStore>(store: &mut D, row: &Self) -> Result<()>;

    /// Replace this row's PII in place, returning what changed
    fn anonymize(&mut self, replacer: &mut Replacer, history: &mut History)
    -> Result<Vec<FieldChange>>;
}

impl AnonymizedTable for Organization {
    const TABLE: &'static str = "organizations";
    const STEP: &'static str = "Anonymizing Organization data";

    fn id(&self) -> RowId {
        self.id
    }

    async fn page<D: DataStore>(store: &mut D, after: RowId, limit: i64) -> Result<Vec<Self>> {
        store.organizations_after(after, limit).await
    }

    async fn write<D: DataStore>(store: &mut D, row: &Self) -> Result<()> {
        store.update_organization(row).await
    }

    fn anonymize(
        &mut self,
        replacer: &mut Replacer,
        history: &mut History,
    ) -> Result<Vec<FieldChange>> {
        Ok(replacer
            .replace(history, Self::TABLE, "name", &mut self.name, Category::OrganizationName)?
            .into_iter()
            .collect())
    }
}

impl AnonymizedTable for User {
    const TABLE: &'static str = "users";
    const STEP: &'static str = "Anonymizing User data";

    fn id(&self) -> RowId {
        self.id
    }

    async fn page<D: DataStore>(store: &mut D, after: RowId, limit: i64) -> Result<Vec<Self>> {
        store.users_after(after, limit).await
    }

    async fn write<D: DataStore>(store: &mut D, row: &Self) -> Result<()> {
        store.update_user(row).await
    }

    fn anonymize(
        &mut self,
        replacer: &mut Replacer,
        history: &mut History,
    ) -> Result<Vec<FieldChange>> {
        let mut changes = Vec::new();

        // One unique name feeds all three name columns.
        let name_fields = [
            ("first_name", self.first_name.as_deref()),
            ("last_name", self.last_name.as_deref()),
            ("display_name", self.display_name.as_deref()),
        ];
        if replacer.policy.any_applies(Self::TABLE, &name_fields) {
            let name = PersonName::parse(&replacer.assigner.assign(history, Category::PersonName)?);
            let policy = &replacer.policy;
            changes.extend(policy.apply(Self::TABLE, "first_name", &mut self.first_name, || {
                Ok(name.first.clone())
            })?);
            changes.extend(policy.apply(Self::TABLE, "last_name", &mut self.last_name, || {
                Ok(name.last.clone())
            })?);
            changes.extend(policy.apply(
                Self::TABLE,
                "display_name",
                &mut self.display_name,
                || Ok(name.display.clone()),
            )?);
        }

        for (field, current, category) in [
            ("email", &mut self.email, Category::Email),
            ("phone", &mut self.phone, Category::Phone),
            ("auth_id", &mut self.auth_id, Category::AuthToken),
            ("device_token", &mut self.device_token, Category::DeviceToken),
        ] {
            changes.extend(replacer.replace(history, Self::TABLE, field, current, category)?);
        }

        Ok(changes)
    }
}

impl AnonymizedTable for Address {
    const TABLE: &'static str = "addresses";
    const STEP: &'static str = "Anonymizing Address data";

    fn id(&self) -> RowId {
        self.id
    }

    async fn page<D: DataStore>(store: &mut D, after: RowId, limit: i64) -> Result<Vec<Self>> {
        store.addresses_after(after, limit).await
    }

    async fn write<D: DataStore>(store: &mut D, row: &Self) -> Result<()> {
        store.update_address(row).await
    }

    fn anonymize(
        &mut self,
        replacer: &mut Replacer,
        _history: &mut History,
    ) -> Result<Vec<FieldChange>> {
        let address = replacer.assigner.synthesizer().address();
        let policy = &replacer.policy;

        let mut changes = Vec::new();
        for (field, current, value) in [
            ("street1", &mut self.street1, address.line1),
            ("street2", &mut self.street2, address.line2),
            ("city", &mut self.city, address.city),
            ("state", &mut self.state, address.subdivision_code),
            ("zip_code", &mut self.zip_code, address.postal_code),
            ("country", &mut self.country, address.country_code),
        ] {
            changes.extend(policy.apply(Self::TABLE, field, current, move || Ok(value))?);
        }
        Ok(changes)
    }
}

impl AnonymizedTable for Receipt {
    const TABLE: &'static str = "receipts";
    const STEP: &'static str = "Anonymizing Receipt data";

    fn id(&self) -> RowId {
        self.id
    }

    async fn page<D: DataStore>(store: &mut D, after: RowId, limit: i64) -> Result<Vec<Self>> {
        store.receipts_after(after, limit).await
    }

    async fn write<D: DataStore>(store: &mut D, row: &Self) -> Result<()> {
        store.update_receipt(row).await
    }

    fn anonymize(
        &mut self,
        replacer: &mut Replacer,
        history: &mut History,
    ) -> Result<Vec<FieldChange>> {
        Ok(replacer
            .replace(history, Self::TABLE, "name", &mut self.name, Category::Filename)?
            .into_iter()
            .collect())
    }
}

impl AnonymizedTable for Card {
    const TABLE: &'static str = "cards";
    const STEP: &'static str = "Anonymizing Card data";

    fn id(&self) -> RowId {
        self.id
    }

    async fn page<D: DataStore>(store: &mut D, after: RowId, limit: i64) -> Result<Vec<Self>> {
        store.cards_after(after, limit).await
    }

    async fn write<D: DataStore>(store: &mut D, row: &Self) -> Result<()> {
        store.update_card(row).await
    }

    fn anonymize(
        &mut self,
        replacer: &mut Replacer,
        history: &mut History,
    ) -> Result<Vec<FieldChange>> {
        Ok(replacer
            .replace(history, Self::TABLE, "token", &mut self.token, Category::CardToken)?
            .into_iter()
            .collect())
    }
}

pub struct RecordAnonymizer {
    replacer: Replacer,
    page_size: i64,
    truncate_tables: Vec<String>,
}

impl RecordAnonymizer {
    pub fn new(replacer: Replacer, page_size: i64, truncate_tables: Vec<String>) -> Self {
        Self {
            replacer,
            page_size,
            truncate_tables,
        }
    }

    /// Anonymizer seeded and shaped by `config`
    pub fn from_config(config: &AnonymizerConfig) -> Self {
        let synthesizer = ValueSynthesizer::new(config.seed, config.synthesis.clone());
        let replacer = Replacer::new(
            UniqueAssigner::new(synthesizer, config.uniqueness),
            PolicyTable::standard(config.anonymize_country),
        );
        Self::new(replacer, config.page_size, config.truncate_tables.clone())
    }

    /// Anonymize every PII table, then truncate the ephemeral ones.
    pub async fn run<D: DataStore>(
        &mut self,
        store: &mut D,
        history: &mut History,
    ) -> Result<AnonymizationReport> {
        let tables = vec![
            self.walk::<Organization, D>(store, history).await?,
            self.walk::<User, D>(store, history).await?,
            self.walk::<Address, D>(store, history).await?,
            self.walk::<Receipt, D>(store, history).await?,
            self.walk::<Card, D>(store, history).await?,
        ];
        let truncated = self.trim(store).await?;
        Ok(AnonymizationReport { tables, truncated })
    }

    /// Empty the ephemeral tables
    pub async fn trim<D: DataStore>(&mut self, store: &mut D) -> Result<Vec<String>> {
        let op = OperationLogger::start("Trimming unneeded data");
        for table in &self.truncate_tables {
            store.truncate(table).await?;
        }
        op.finish(0, 0);
        Ok(self.truncate_tables.clone())
    }

    async fn walk<T: AnonymizedTable, D: DataStore>(
        &mut self,
        store: &mut D,
        history: &mut History,
    ) -> Result<TableReport> {
        let op = OperationLogger::start(T::STEP);
        let mut report = TableReport {
            table: T::TABLE,
            rows_seen: 0,
            rows_updated: 0,
        };

        let mut after = RowId::MIN;
        loop {
            let page = T::page(store, after, self.page_size).await?;
            let Some(last) = page.last() else { break };
            after = last.id();
            let exhausted = (page.len() as i64) < self.page_size;

            for mut row in page {
                report.rows_seen += 1;
                let changes = row.anonymize(&mut self.replacer, history)?;
                if changes.is_empty() {
                    continue;
                }
                log_changes(T::TABLE, row.id(), &changes);
                T::write(store, &row).await?;
                report.rows_updated += 1;
            }

            if exhausted {
                break;
            }
        }

        op.finish(report.rows_seen, report.rows_updated);
        Ok(report)
    }
}
