#![allow(dead_code)]

use async_trait::async_trait;
use gst_invoice_mailer::delivery::{InvoiceMail, InvoiceStore, Mailer, PdfRenderer};
use gst_invoice_mailer::models::SheetRow;
use gst_invoice_mailer::{InvoiceError, InvoiceProcessor, MailSettings, Result};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

pub const TEMPLATE: &str = "# TAX INVOICE\nInvoice {{InvoiceNo}} for {{ClientCompanyName}}\nGrand Total: {{GrandTotal}}\n{{AmountInWords}}\n";

/// 内存存储，clone 共享同一份文件表
#[derive(Clone, Default)]
pub struct MemoryStore {
    files: Arc<Mutex<HashMap<String, Vec<u8>>>>,
    fail_on_save: bool,
}

impl MemoryStore {
    pub fn with_existing(names: &[&str]) -> Self {
        let store = Self::default();
        for name in names {
            store.files.lock().unwrap().insert(name.to_string(), b"%PDF-old".to_vec());
        }
        store
    }

    pub fn failing() -> Self {
        Self {
            fail_on_save: true,
            ..Self::default()
        }
    }

    pub fn file(&self, name: &str) -> Option<Vec<u8>> {
        self.files.lock().unwrap().get(name).cloned()
    }

    pub fn len(&self) -> usize {
        self.files.lock().unwrap().len()
    }
}

#[async_trait]
impl InvoiceStore for MemoryStore {
    async fn exists(&self, file_name: &str) -> Result<bool> {
        Ok(self.files.lock().unwrap().contains_key(file_name))
    }

    async fn save(&self, file_name: &str, data: Vec<u8>) -> Result<()> {
        if self.fail_on_save {
            return Err(InvoiceError::Io(std::io::Error::new(
                std::io::ErrorKind::PermissionDenied,
                "read-only folder",
            )));
        }
        self.files.lock().unwrap().insert(file_name.to_string(), data);
        Ok(())
    }
}

/// 记录发送内容的邮件投递
#[derive(Clone, Default)]
pub struct RecordingMailer {
    sent: Arc<Mutex<Vec<InvoiceMail>>>,
}

impl RecordingMailer {
    pub fn sent(&self) -> Vec<InvoiceMail> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl Mailer for RecordingMailer {
    async fn send(&self, mail: &InvoiceMail) -> Result<()> {
        self.sent.lock().unwrap().push(mail.clone());
        Ok(())
    }
}

pub fn settings() -> MailSettings {
    MailSettings {
        subject_prefix: "Experiment_Bill_Format".to_string(),
        sender_name: "HSK Enterprises".to_string(),
    }
}

pub fn processor(store: &MemoryStore, mailer: &RecordingMailer) -> InvoiceProcessor {
    InvoiceProcessor::new(
        Box::new(store.clone()),
        Box::new(PdfRenderer::new(TEMPLATE)),
        Box::new(mailer.clone()),
        settings(),
    )
}

/// 构造一行完整账单
pub fn billing_row(line: usize, invoice_no: &str, company: &str, email: &str, freight: &str) -> SheetRow {
    let cells = [
        invoice_no, "Asha Rao", "01/04/2024", company, "15/04/2024", "12 MG Road", "9845012345",
        email, "Water supply", "2201", "1200", "1450", "250", "4", freight,
    ];
    SheetRow::new(line, cells.iter().map(|c| c.to_string()).collect())
}
