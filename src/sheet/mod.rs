pub mod reader;

pub use reader::{BillingSource, CsvSheet};
