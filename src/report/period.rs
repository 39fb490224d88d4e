//! Reporting periods and their calendar bounds.

use chrono::{Datelike, Days, Months, NaiveDate, NaiveDateTime, NaiveTime};

/// A reporting period relative to a supplied "now".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReportPeriod {
    /// The calendar month containing now.
    #[default]
    ThisMonth,
    /// The calendar month before the one containing now.
    LastMonth,
    /// The calendar quarter containing now.
    ThisQuarter,
    /// The calendar year containing now.
    ThisYear,
}

impl ReportPeriod {
    /// Parse a period label.
    ///
    /// Accepts the original UI labels and English keys; anything else
    /// falls back to `ThisMonth`, matching the report page's default arm.
    pub fn from_label(label: &str) -> Self {
        match label {
            "本月" | "thisMonth" | "this_month" => ReportPeriod::ThisMonth,
            "上月" | "lastMonth" | "last_month" => ReportPeriod::LastMonth,
            "本季度" | "thisQuarter" | "this_quarter" => ReportPeriod::ThisQuarter,
            "本年" | "thisYear" | "this_year" => ReportPeriod::ThisYear,
            _ => ReportPeriod::ThisMonth,
        }
    }

    /// The original UI label.
    pub fn label(&self) -> &'static str {
        match self {
            ReportPeriod::ThisMonth => "本月",
            ReportPeriod::LastMonth => "上月",
            ReportPeriod::ThisQuarter => "本季度",
            ReportPeriod::ThisYear => "本年",
        }
    }

    /// Inclusive [start, end] bounds of the period around `now`.
    ///
    /// Start is the first day at 00:00:00, end is the last day at
    /// 23:59:59. Both ends are inclusive when filtering records.
    pub fn bounds(&self, now: NaiveDateTime) -> (NaiveDateTime, NaiveDateTime) {
        let today = now.date();
        let (start_day, end_day) = match self {
            ReportPeriod::ThisMonth => {
                let start = first_of_month(today);
                (start, last_of_month(start))
            }
            ReportPeriod::LastMonth => {
                let start = first_of_month(today) - Months::new(1);
                (start, last_of_month(start))
            }
            ReportPeriod::ThisQuarter => {
                let quarter0 = today.month0() / 3;
                let start = NaiveDate::from_ymd_opt(today.year(), quarter0 * 3 + 1, 1)
                    .unwrap_or(today);
                let end = last_of_month(start + Months::new(2));
                (start, end)
            }
            ReportPeriod::ThisYear => {
                let start = NaiveDate::from_ymd_opt(today.year(), 1, 1).unwrap_or(today);
                let end = NaiveDate::from_ymd_opt(today.year(), 12, 31).unwrap_or(today);
                (start, end)
            }
        };

        (
            start_day.and_time(NaiveTime::MIN),
            end_day
                .and_time(NaiveTime::from_hms_opt(23, 59, 59).unwrap_or(NaiveTime::MIN)),
        )
    }
}

fn first_of_month(date: NaiveDate) -> NaiveDate {
    // with_day(1) cannot fail for day 1
    date.with_day(1).unwrap_or(date)
}

fn last_of_month(first: NaiveDate) -> NaiveDate {
    first + Months::new(1) - Days::new(1)
}
