pub mod config;
pub mod delivery;
pub mod error;
pub mod models;
pub mod report;
pub mod service;
pub mod sheet;

pub use config::AppConfig;
pub use error::{InvoiceError, Result};
pub use service::{InvoiceProcessor, MailSettings};
pub use sheet::CsvSheet;
