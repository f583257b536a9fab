//! Payment service
//!
//! Turns the send-money and request-money forms into ledger entries. Amounts
//! arrive as text and are parsed exactly; nothing here goes through floats.

use tracing::info;

use crate::audit::{AuditEntry, AuditLogger, EntityType};
use crate::error::{PaySphereError, PaySphereResult};
use crate::models::{Money, Transaction};
use crate::storage::TransactionLedger;

/// Service for recording payments
pub struct PaymentService<'a> {
    ledger: &'a TransactionLedger,
    audit: Option<&'a AuditLogger>,
}

impl<'a> PaymentService<'a> {
    pub fn new(ledger: &'a TransactionLedger) -> Self {
        Self {
            ledger,
            audit: None,
        }
    }

    pub fn with_audit(mut self, logger: &'a AuditLogger) -> Self {
        self.audit = Some(logger);
        self
    }

    /// Record a completed payment to `recipient`
    pub fn send_payment(
        &self,
        recipient: &str,
        amount_text: &str,
        note: Option<&str>,
    ) -> PaySphereResult<Transaction> {
        let amount = parse_amount(amount_text)?;
        let txn = self.ledger.create_sent(recipient, amount, note)?;

        info!(id = %txn.id, amount = %txn.amount, "Payment sent");
        self.audit(&txn);
        Ok(txn)
    }

    /// Record a pending request for money from `payer`
    pub fn request_payment(
        &self,
        payer: &str,
        amount_text: &str,
        note: Option<&str>,
    ) -> PaySphereResult<Transaction> {
        let amount = parse_amount(amount_text)?;
        let txn = self.ledger.create_requested(payer, amount, note)?;

        info!(id = %txn.id, amount = %txn.amount, "Payment requested");
        self.audit(&txn);
        Ok(txn)
    }

    fn audit(&self, txn: &Transaction) {
        if let Some(logger) = self.audit {
            logger.log_or_warn(&AuditEntry::create(
                EntityType::Transaction,
                txn.id.to_string(),
                Some(txn.counterparty.clone()),
                txn,
            ));
        }
    }
}

fn parse_amount(text: &str) -> PaySphereResult<Money> {
    Money::parse(text).map_err(|e| PaySphereError::Validation(e.to_string()))
}
