pub mod calculator;
pub mod placeholders;
pub mod processor;
pub mod words;

pub use calculator::{compute, format_amount, round_half_up};
pub use placeholders::{fill_template, invoice_placeholders, Placeholders};
pub use processor::{InvoiceProcessor, MailSettings};
pub use words::amount_in_words;
