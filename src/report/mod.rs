//! Financial reporting for GYMDESK.
//!
//! Pure aggregation over already-fetched record lists: period summaries
//! with top-5 rankings, and the trailing 12-month trend.

mod period;
mod summary;
mod trend;

pub use period::ReportPeriod;
pub use summary::{summarize, PeriodReport, RankEntry};
pub use trend::{monthly_trend, MonthAmount, TrendOverview, TrendPoint, TrendReport};
