//! Analytics over a ledger snapshot
//!
//! Totals, category breakdowns and monthly series. Every sum is computed in
//! integer cents; only the category shares are floating point, and those are
//! derived from exact totals at the end.

use std::collections::BTreeMap;

use chrono::Datelike;

use crate::models::{Money, Transaction};

/// Sum of completed outgoing amounts
pub fn total_outgoing(snapshot: &[Transaction]) -> Money {
    snapshot
        .iter()
        .filter(|t| t.is_outgoing() && t.is_completed())
        .map(|t| t.amount)
        .sum()
}

/// Sum of completed incoming amounts; pending requests are not counted
pub fn total_incoming(snapshot: &[Transaction]) -> Money {
    snapshot
        .iter()
        .filter(|t| t.is_incoming() && t.is_completed())
        .map(|t| t.amount)
        .sum()
}

/// Mean amount over every transaction regardless of state or direction.
///
/// Zero for an empty snapshot. Rounded half away from zero to the cent.
pub fn average_amount(snapshot: &[Transaction]) -> Money {
    let total: Money = snapshot.iter().map(|t| t.amount).sum();
    total.divide(snapshot.len()).unwrap_or_default()
}

/// Completed outgoing amounts summed per category.
///
/// A category appears only if at least one such transaction carries it.
pub fn category_breakdown(snapshot: &[Transaction]) -> BTreeMap<String, Money> {
    let mut breakdown: BTreeMap<String, Money> = BTreeMap::new();
    for txn in snapshot.iter().filter(|t| t.is_outgoing() && t.is_completed()) {
        *breakdown.entry(txn.category.clone()).or_default() += txn.amount;
    }
    breakdown
}

/// One category's slice of outgoing spend
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryShare {
    pub category: String,
    pub amount: Money,
    /// Fraction of total outgoing, in `0.0..=1.0`
    pub share: f64,
}

impl CategoryShare {
    pub fn percentage(&self) -> f64 {
        self.share * 100.0
    }
}

/// Each category's share of `total_outgoing`, largest first.
///
/// Returns `None` when `total_outgoing` is zero; there is no meaningful share
/// of nothing and callers must handle that case.
pub fn by_category_percentage(
    breakdown: &BTreeMap<String, Money>,
    total_outgoing: Money,
) -> Option<Vec<CategoryShare>> {
    if total_outgoing.is_zero() {
        return None;
    }

    let mut shares = breakdown
        .iter()
        .map(|(category, amount)| {
            amount.ratio_of(total_outgoing).map(|share| CategoryShare {
                category: category.clone(),
                amount: *amount,
                share,
            })
        })
        .collect::<Option<Vec<_>>>()?;

    shares.sort_by(|a, b| b.amount.cmp(&a.amount).then(a.category.cmp(&b.category)));
    Some(shares)
}

/// Completed totals for one calendar month
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonthlyTotals {
    pub year: i32,
    /// 1-12
    pub month: u32,
    pub outgoing: Money,
    pub incoming: Money,
}

/// Completed outgoing and incoming totals per month, oldest month first.
///
/// Only months with at least one completed transaction appear.
pub fn monthly_series(snapshot: &[Transaction]) -> Vec<MonthlyTotals> {
    let mut months: BTreeMap<(i32, u32), (Money, Money)> = BTreeMap::new();

    for txn in snapshot.iter().filter(|t| t.is_completed()) {
        let key = (txn.occurred_on.year(), txn.occurred_on.month());
        let (outgoing, incoming) = months.entry(key).or_default();
        if txn.is_outgoing() {
            *outgoing += txn.amount;
        } else {
            *incoming += txn.amount;
        }
    }

    months
        .into_iter()
        .map(|((year, month), (outgoing, incoming))| MonthlyTotals {
            year,
            month,
            outgoing,
            incoming,
        })
        .collect()
}

/// Headline numbers for the dashboard page
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardSummary {
    pub total_outgoing: Money,
    pub total_incoming: Money,
    pub completed_count: usize,
    pub pending_count: usize,
    pub transaction_count: usize,
    pub average_amount: Money,
    /// The most recent transactions, newest first
    pub recent: Vec<Transaction>,
}

/// Summarize a snapshot for the dashboard, keeping `recent_limit` entries
pub fn dashboard_summary(snapshot: &[Transaction], recent_limit: usize) -> DashboardSummary {
    let completed_count = snapshot.iter().filter(|t| t.is_completed()).count();

    DashboardSummary {
        total_outgoing: total_outgoing(snapshot),
        total_incoming: total_incoming(snapshot),
        completed_count,
        pending_count: snapshot.len() - completed_count,
        transaction_count: snapshot.len(),
        average_amount: average_amount(snapshot),
        recent: snapshot.iter().take(recent_limit).cloned().collect(),
    }
}

/// Everything the analytics page shows, computed from one snapshot
#[derive(Debug, Clone, PartialEq)]
pub struct AnalyticsReport {
    pub total_outgoing: Money,
    pub total_incoming: Money,
    pub average_amount: Money,
    pub transaction_count: usize,
    pub categories: BTreeMap<String, Money>,
    /// `None` when nothing has been sent yet
    pub category_shares: Option<Vec<CategoryShare>>,
    pub monthly: Vec<MonthlyTotals>,
}

impl AnalyticsReport {
    pub fn generate(snapshot: &[Transaction]) -> Self {
        let total_outgoing = total_outgoing(snapshot);
        let categories = category_breakdown(snapshot);
        let category_shares = by_category_percentage(&categories, total_outgoing);

        Self {
            total_outgoing,
            total_incoming: total_incoming(snapshot),
            average_amount: average_amount(snapshot),
            transaction_count: snapshot.len(),
            categories,
            category_shares,
            monthly: monthly_series(snapshot),
        }
    }

    /// Get top spending categories
    pub fn top_categories(&self, limit: usize) -> &[CategoryShare] {
        match &self.category_shares {
            Some(shares) => &shares[..limit.min(shares.len())],
            None => &[],
        }
    }
}
