pub mod document;
pub mod mail;
pub mod storage;

pub use document::{DocumentRenderer, PdfRenderer};
pub use mail::{build_mailer, InvoiceMail, Mailer, OutboxMailer, SmtpMailer};
pub use storage::{invoice_file_name, FolderStore, InvoiceStore};
