//! Period summary: totals, net, and top-5 rankings.

use std::collections::HashMap;

use chrono::NaiveDateTime;
use serde::Serialize;
use tracing::debug;

use crate::datetime::parse_db_datetime;
use crate::db::{FinancialRecord, RecordType};
use crate::report::ReportPeriod;

/// One ranking row: a member or item with its summed amount.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RankEntry {
    /// Member name or item name.
    pub name: String,
    /// Summed `total_amount` across the period, income and expense alike.
    pub total_amount: f64,
    /// Number of records contributing.
    pub record_count: i64,
}

/// Summary of a reporting period.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PeriodReport {
    /// The period label.
    pub period: String,
    /// Inclusive start bound.
    pub start: String,
    /// Inclusive end bound.
    pub end: String,
    /// Sum of income `total_amount`s.
    pub total_income: f64,
    /// Sum of expense `total_amount`s.
    pub total_expense: f64,
    /// Income minus expense.
    pub net: f64,
    /// Records that fell inside the period.
    pub record_count: usize,
    /// Top 5 members by summed amount, descending.
    pub top_members: Vec<RankEntry>,
    /// Top 5 items by summed amount, descending.
    pub top_items: Vec<RankEntry>,
}

/// Summarize `records` over `period`, with bounds computed around `now`.
///
/// Records whose date fails to parse are skipped. Amounts are taken from
/// `total_amount` as stored; nothing is recomputed from unit price and
/// quantity.
pub fn summarize(records: &[FinancialRecord], period: ReportPeriod, now: NaiveDateTime) -> PeriodReport {
    let (start, end) = period.bounds(now);

    let filtered: Vec<&FinancialRecord> = records
        .iter()
        .filter(|r| {
            parse_db_datetime(&r.record_date)
                .map(|d| d >= start && d <= end)
                .unwrap_or(false)
        })
        .collect();

    debug!(
        period = period.label(),
        records = filtered.len(),
        "period filter applied"
    );

    let total_income: f64 = filtered
        .iter()
        .filter(|r| r.record_type == RecordType::Income)
        .map(|r| r.total_amount)
        .sum();
    let total_expense: f64 = filtered
        .iter()
        .filter(|r| r.record_type == RecordType::Expense)
        .map(|r| r.total_amount)
        .sum();

    let top_members = top_five(&filtered, |r| &r.member_name);
    let top_items = top_five(&filtered, |r| &r.item);

    PeriodReport {
        period: period.label().to_string(),
        start: start.format("%Y-%m-%d %H:%M:%S").to_string(),
        end: end.format("%Y-%m-%d %H:%M:%S").to_string(),
        total_income,
        total_expense,
        net: total_income - total_expense,
        record_count: filtered.len(),
        top_members,
        top_items,
    }
}

/// Group records by a key, sum amounts, and keep the top five.
///
/// Income and expense records both count toward a key's total, as the
/// original rankings do. Ties break by name for a stable order.
fn top_five<'a, F>(records: &[&'a FinancialRecord], key: F) -> Vec<RankEntry>
where
    F: Fn(&'a FinancialRecord) -> &'a str,
{
    let mut stats: HashMap<&str, (f64, i64)> = HashMap::new();
    for record in records {
        let entry = stats.entry(key(record)).or_insert((0.0, 0));
        entry.0 += record.total_amount;
        entry.1 += 1;
    }

    let mut ranked: Vec<RankEntry> = stats
        .into_iter()
        .map(|(name, (total_amount, record_count))| RankEntry {
            name: name.to_string(),
            total_amount,
            record_count,
        })
        .collect();

    ranked.sort_by(|a, b| {
        b.total_amount
            .partial_cmp(&a.total_amount)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| a.name.cmp(&b.name))
    });
    ranked.truncate(5);
    ranked
}
