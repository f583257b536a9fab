//! Reports module for PaySphere
//!
//! Derived views over a ledger snapshot: outgoing and incoming totals,
//! category breakdowns, monthly series and the dashboard summary.

pub mod analytics;

pub use analytics::{
    average_amount, by_category_percentage, category_breakdown, dashboard_summary,
    monthly_series, total_incoming, total_outgoing, AnalyticsReport, CategoryShare,
    DashboardSummary, MonthlyTotals,
};
