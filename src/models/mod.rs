pub mod billing;
pub mod outcome;
pub mod row;

pub use billing::BillingResult;
pub use outcome::{ReportRecord, RowOutcome, RowReport, RunSummary, SkipReason};
pub use row::{column, parse_amount, BillingRow, SheetRow};
