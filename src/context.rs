//! Core context
//!
//! Wires settings, persistence, the ledger and the session together from a
//! single data directory. The UI layer holds one `CoreContext` and routes
//! every command through it.

use tracing::info;

use crate::audit::AuditLogger;
use crate::config::{PaySpherePaths, Settings};
use crate::error::PaySphereResult;
use crate::models::Transaction;
use crate::reports::{dashboard_summary, AnalyticsReport, DashboardSummary};
use crate::services::{
    filter_transactions, CredentialVerifier, LedgerFilter, PaymentService, RestoreOutcome,
    SessionService,
};
use crate::storage::{seed, JsonFileStore, KeyValueIdentityStore, TransactionLedger};

/// Session service backed by the on-disk session file
pub type FileSessionService = SessionService<KeyValueIdentityStore<JsonFileStore>>;

pub struct CoreContext {
    paths: PaySpherePaths,
    settings: Settings,
    ledger: TransactionLedger,
    audit: Option<AuditLogger>,
    session: FileSessionService,
}

impl CoreContext {
    /// Open the core rooted at `paths`.
    ///
    /// The session starts logged out; call [`restore_session`] to pick up a
    /// persisted one.
    ///
    /// [`restore_session`]: Self::restore_session
    pub fn open(paths: PaySpherePaths) -> PaySphereResult<Self> {
        paths.ensure_directories()?;
        let settings = Settings::load_or_create(&paths)?;

        let ledger = if settings.seed_demo_data {
            TransactionLedger::from_seed(seed::demo_transactions())?
        } else {
            TransactionLedger::new()
        };

        let audit = settings
            .audit_enabled
            .then(|| AuditLogger::new(paths.audit_log()));

        let identity = KeyValueIdentityStore::new(JsonFileStore::new(paths.session_file()));
        let mut session = SessionService::new(identity, CredentialVerifier::demo()?);
        if let Some(logger) = &audit {
            session = session.with_audit(logger.clone());
        }

        info!(
            base_dir = %paths.base_dir().display(),
            transactions = ledger.len()?,
            "Core opened"
        );

        Ok(Self {
            paths,
            settings,
            ledger,
            audit,
            session,
        })
    }

    pub fn paths(&self) -> &PaySpherePaths {
        &self.paths
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn ledger(&self) -> &TransactionLedger {
        &self.ledger
    }

    pub fn audit(&self) -> Option<&AuditLogger> {
        self.audit.as_ref()
    }

    pub fn session(&self) -> &FileSessionService {
        &self.session
    }

    /// Login, signup and logout go through here
    pub fn session_mut(&mut self) -> &mut FileSessionService {
        &mut self.session
    }

    pub fn restore_session(&mut self) -> RestoreOutcome {
        self.session.restore_session()
    }

    /// Send and request money against the ledger
    pub fn payments(&self) -> PaymentService<'_> {
        let service = PaymentService::new(&self.ledger);
        match &self.audit {
            Some(logger) => service.with_audit(logger),
            None => service,
        }
    }

    pub fn snapshot(&self) -> PaySphereResult<Vec<Transaction>> {
        self.ledger.snapshot()
    }

    /// Transactions matching `filter`, newest first
    pub fn search(&self, filter: &LedgerFilter) -> PaySphereResult<Vec<Transaction>> {
        Ok(filter_transactions(&self.ledger.snapshot()?, filter))
    }

    pub fn dashboard(&self) -> PaySphereResult<DashboardSummary> {
        let snapshot = self.ledger.snapshot()?;
        Ok(dashboard_summary(
            &snapshot,
            self.settings.recent_transactions_limit,
        ))
    }

    pub fn analytics(&self) -> PaySphereResult<AnalyticsReport> {
        Ok(AnalyticsReport::generate(&self.ledger.snapshot()?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audit::Operation;
    use crate::models::{Direction, Money};
    use tempfile::TempDir;

    fn open(temp: &TempDir) -> CoreContext {
        CoreContext::open(PaySpherePaths::with_base_dir(temp.path().to_path_buf())).unwrap()
    }

    #[test]
    fn test_open_seeds_ledger_and_starts_logged_out() {
        let temp = TempDir::new().unwrap();
        let ctx = open(&temp);

        assert_eq!(ctx.snapshot().unwrap().len(), 8);
        assert!(!ctx.session().is_authenticated());
        assert!(ctx.audit().is_some());
    }

    #[test]
    fn test_open_without_seed_or_audit() {
        let temp = TempDir::new().unwrap();
        let paths = PaySpherePaths::with_base_dir(temp.path().to_path_buf());
        let settings = Settings {
            seed_demo_data: false,
            audit_enabled: false,
            ..Settings::default()
        };
        settings.save(&paths).unwrap();

        let ctx = CoreContext::open(paths).unwrap();
        assert!(ctx.ledger().is_empty().unwrap());
        assert!(ctx.audit().is_none());
        assert!(ctx.analytics().unwrap().category_shares.is_none());
    }

    #[test]
    fn test_session_survives_reopen() {
        let temp = TempDir::new().unwrap();

        let mut ctx = open(&temp);
        assert_eq!(ctx.restore_session(), RestoreOutcome::Absent);
        ctx.session_mut()
            .login("john.doe@example.com", "password123")
            .unwrap();
        drop(ctx);

        let mut reopened = open(&temp);
        // Not restored until asked
        assert!(!reopened.session().is_authenticated());
        assert!(reopened.restore_session().is_restored());
        assert_eq!(
            reopened.session().current().map(|p| p.email.as_str()),
            Some("john.doe@example.com")
        );
    }

    #[test]
    fn test_payment_flows_into_views() {
        let temp = TempDir::new().unwrap();
        let ctx = open(&temp);

        let before = ctx.dashboard().unwrap();
        let txn = ctx.payments().send_payment("Alice", "10.00", None).unwrap();

        let after = ctx.dashboard().unwrap();
        assert_eq!(after.recent[0], txn);
        assert_eq!(
            after.total_outgoing,
            before.total_outgoing + Money::from_cents(1000)
        );
        assert_eq!(after.recent.len(), ctx.settings().recent_transactions_limit);

        let sent = ctx
            .search(&LedgerFilter::new().direction(Direction::Outgoing).search("alice"))
            .unwrap();
        assert_eq!(sent, vec![txn]);

        let entries = ctx.audit().unwrap().read_all().unwrap();
        assert_eq!(entries.last().map(|e| e.operation), Some(Operation::Create));
    }
}
