//! Trailing 12-month financial trend.

use chrono::{Datelike, Months, NaiveDateTime};
use serde::Serialize;

use crate::datetime::parse_db_datetime;
use crate::db::{FinancialRecord, RecordType};

/// Number of buckets in the trend window.
const TREND_MONTHS: usize = 12;

/// One month's bucket in the trend series.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TrendPoint {
    /// Bucket key, "YYYY-MM".
    pub month_key: String,
    /// Summed income.
    pub income: f64,
    /// Summed expense.
    pub expense: f64,
    /// Income minus expense.
    pub net: f64,
    /// Records in the bucket.
    pub record_count: i64,
    /// Percent change of income vs the prior bucket.
    pub income_change: f64,
    /// Percent change of expense vs the prior bucket.
    pub expense_change: f64,
    /// Percent change of net vs the prior bucket.
    pub net_change: f64,
}

/// A month singled out in the overview.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthAmount {
    /// Bucket key, "YYYY-MM".
    pub month: String,
    /// The amount that made it stand out.
    pub amount: f64,
}

/// Overview statistics across the whole window.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TrendOverview {
    /// Income summed across all buckets.
    pub total_income: f64,
    /// Expense summed across all buckets.
    pub total_expense: f64,
    /// Net across all buckets.
    pub total_net: f64,
    /// Record count across all buckets.
    pub total_records: i64,
    /// Always income / 12, even for sparsely filled windows.
    pub avg_income: f64,
    /// Always expense / 12.
    pub avg_expense: f64,
    /// Always net / 12.
    pub avg_net: f64,
    /// Bucket with the highest income (earliest wins ties).
    pub max_income_month: MonthAmount,
    /// Bucket with the highest expense (earliest wins ties).
    pub max_expense_month: MonthAmount,
}

/// The full trend report.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TrendReport {
    /// Exactly 12 buckets, oldest first.
    pub trend_data: Vec<TrendPoint>,
    /// Window-wide statistics.
    pub summary: TrendOverview,
}

/// Round to 2 decimal places.
fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Percent change with the zero-prior rule: a zero prior yields 0%, by
/// policy, so a month after a silent month never reports an infinite
/// spike.
fn percent_change(current: f64, prior: f64, divisor: f64) -> f64 {
    if divisor == 0.0 {
        0.0
    } else {
        round2((current - prior) / divisor * 100.0)
    }
}

/// Compute the trailing 12-month trend ending at `now`'s month.
///
/// Every bucket exists even with no records; records outside the window
/// or with unparseable dates are ignored.
pub fn monthly_trend(records: &[FinancialRecord], now: NaiveDateTime) -> TrendReport {
    // Oldest-first keys for the 12 months ending at now's month
    let mut points: Vec<TrendPoint> = (0..TREND_MONTHS)
        .rev()
        .map(|back| {
            let month = now.date() - Months::new(back as u32);
            TrendPoint {
                month_key: format!("{:04}-{:02}", month.year(), month.month()),
                income: 0.0,
                expense: 0.0,
                net: 0.0,
                record_count: 0,
                income_change: 0.0,
                expense_change: 0.0,
                net_change: 0.0,
            }
        })
        .collect();

    for record in records {
        let Some(date) = parse_db_datetime(&record.record_date) else {
            continue;
        };
        let key = format!("{:04}-{:02}", date.year(), date.month());
        let Some(point) = points.iter_mut().find(|p| p.month_key == key) else {
            continue;
        };

        match record.record_type {
            RecordType::Income => point.income += record.total_amount,
            RecordType::Expense => point.expense += record.total_amount,
        }
        point.record_count += 1;
        point.net = point.income - point.expense;
    }

    // Percent changes vs the prior bucket; the first bucket stays at 0.
    // Net divides by |prior net| so the sign of the change survives a
    // negative prior month.
    for i in 1..points.len() {
        let prior = points[i - 1].clone();
        let current = &mut points[i];
        current.income_change = percent_change(current.income, prior.income, prior.income);
        current.expense_change = percent_change(current.expense, prior.expense, prior.expense);
        current.net_change = percent_change(current.net, prior.net, prior.net.abs());
    }

    let total_income: f64 = points.iter().map(|p| p.income).sum();
    let total_expense: f64 = points.iter().map(|p| p.expense).sum();
    let total_net = total_income - total_expense;
    let total_records: i64 = points.iter().map(|p| p.record_count).sum();

    let mut max_income = &points[0];
    let mut max_expense = &points[0];
    for point in &points[1..] {
        if point.income > max_income.income {
            max_income = point;
        }
        if point.expense > max_expense.expense {
            max_expense = point;
        }
    }

    let summary = TrendOverview {
        total_income,
        total_expense,
        total_net,
        total_records,
        avg_income: round2(total_income / TREND_MONTHS as f64),
        avg_expense: round2(total_expense / TREND_MONTHS as f64),
        avg_net: round2(total_net / TREND_MONTHS as f64),
        max_income_month: MonthAmount {
            month: max_income.month_key.clone(),
            amount: max_income.income,
        },
        max_expense_month: MonthAmount {
            month: max_expense.month_key.clone(),
            amount: max_expense.expense,
        },
    };

    TrendReport {
        trend_data: points,
        summary,
    }
}
