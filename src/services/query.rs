//! Ledger query
//!
//! Stateless search and filtering over a ledger snapshot. Results keep the
//! snapshot's order; nothing is re-sorted.

use crate::models::{Direction, Transaction, TransactionState};

/// Options for filtering transactions
///
/// `None` for `status` or `direction` means "all". An empty search text
/// matches everything.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LedgerFilter {
    /// Case-insensitive substring matched against counterparty or note
    pub search_text: String,
    pub status: Option<TransactionState>,
    pub direction: Option<Direction>,
}

impl LedgerFilter {
    /// Create a filter that matches everything
    pub fn new() -> Self {
        Self::default()
    }

    pub fn search(mut self, text: impl Into<String>) -> Self {
        self.search_text = text.into();
        self
    }

    pub fn status(mut self, status: TransactionState) -> Self {
        self.status = Some(status);
        self
    }

    pub fn direction(mut self, direction: Direction) -> Self {
        self.direction = Some(direction);
        self
    }

    /// True when no predicate narrows the result
    pub fn is_unfiltered(&self) -> bool {
        self.search_text.is_empty() && self.status.is_none() && self.direction.is_none()
    }

    /// Whether a single transaction satisfies all three predicates
    pub fn matches(&self, txn: &Transaction) -> bool {
        self.matches_search(txn)
            && self.status.map_or(true, |s| txn.state == s)
            && self.direction.map_or(true, |d| txn.direction == d)
    }

    fn matches_search(&self, txn: &Transaction) -> bool {
        if self.search_text.is_empty() {
            return true;
        }
        let needle = self.search_text.to_lowercase();
        txn.counterparty.to_lowercase().contains(&needle)
            || txn.note_text().to_lowercase().contains(&needle)
    }
}

/// Return the transactions matching `filter`, in snapshot order
pub fn filter_transactions(snapshot: &[Transaction], filter: &LedgerFilter) -> Vec<Transaction> {
    snapshot
        .iter()
        .filter(|txn| filter.matches(txn))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::seed;

    fn names(txns: &[Transaction]) -> Vec<&str> {
        txns.iter().map(|t| t.counterparty.as_str()).collect()
    }

    #[test]
    fn test_unfiltered_returns_full_snapshot() {
        let snapshot = seed::demo_transactions();
        let filter = LedgerFilter::new();

        assert!(filter.is_unfiltered());
        assert_eq!(filter_transactions(&snapshot, &filter), snapshot);
    }

    #[test]
    fn test_search_counterparty_case_insensitive() {
        let snapshot = seed::demo_transactions();
        let result = filter_transactions(&snapshot, &LedgerFilter::new().search("NETFLIX"));
        assert_eq!(names(&result), vec!["Netflix"]);
    }

    #[test]
    fn test_search_matches_note() {
        let snapshot = seed::demo_transactions();
        let result = filter_transactions(&snapshot, &LedgerFilter::new().search("dinner"));
        // "Dinner payment" and "Split dinner bill"
        assert_eq!(names(&result), vec!["Sarah Johnson", "Emma Wilson"]);
    }

    #[test]
    fn test_status_filter() {
        let snapshot = seed::demo_transactions();
        let pending = filter_transactions(
            &snapshot,
            &LedgerFilter::new().status(TransactionState::Pending),
        );
        assert_eq!(names(&pending), vec!["Emma Wilson"]);
    }

    #[test]
    fn test_direction_filter_preserves_order() {
        let snapshot = seed::demo_transactions();
        let received = filter_transactions(
            &snapshot,
            &LedgerFilter::new().direction(Direction::Incoming),
        );
        assert_eq!(names(&received), vec!["Mike Chen", "Emma Wilson", "David Kim"]);
    }

    #[test]
    fn test_predicates_are_conjunctive() {
        let snapshot = seed::demo_transactions();
        let filter = LedgerFilter::new()
            .search("a")
            .status(TransactionState::Completed)
            .direction(Direction::Incoming);

        let result = filter_transactions(&snapshot, &filter);
        // Emma Wilson matches the text and direction but is pending
        assert_eq!(names(&result), vec!["Mike Chen", "David Kim"]);
    }

    #[test]
    fn test_idempotent() {
        let snapshot = seed::demo_transactions();
        let filter = LedgerFilter::new().direction(Direction::Outgoing).search("o");

        let once = filter_transactions(&snapshot, &filter);
        let twice = filter_transactions(&once, &filter);
        assert_eq!(once, twice);
        assert_eq!(once, filter_transactions(&snapshot, &filter));
    }

    #[test]
    fn test_missing_note_only_matches_counterparty() {
        let mut snapshot = seed::demo_transactions();
        snapshot[0].note = None;

        let result = filter_transactions(&snapshot, &LedgerFilter::new().search("payment"));
        // Sarah Johnson's "Dinner payment" is gone; "Loan repayment" still matches
        assert_eq!(names(&result), vec!["Mike Chen", "David Kim"]);

        let by_name = filter_transactions(&snapshot, &LedgerFilter::new().search("sarah"));
        assert_eq!(names(&by_name), vec!["Sarah Johnson"]);
    }

    #[test]
    fn test_no_matches() {
        let snapshot = seed::demo_transactions();
        let result = filter_transactions(&snapshot, &LedgerFilter::new().search("zzz"));
        assert!(result.is_empty());
    }
}
