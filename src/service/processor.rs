use crate::delivery::mail::{InvoiceMail, Mailer};
use crate::delivery::{invoice_file_name, DocumentRenderer, InvoiceStore};
use crate::error::Result;
use crate::models::{BillingRow, RowOutcome, RowReport, RunSummary, SheetRow, SkipReason};
use crate::service::calculator::compute;
use crate::service::placeholders::invoice_placeholders;
use crate::sheet::BillingSource;

/// 邮件正文与主题设置
#[derive(Debug, Clone)]
pub struct MailSettings {
    pub subject_prefix: String,
    pub sender_name: String,
}

/// 逐行生成发票并发送
pub struct InvoiceProcessor {
    store: Box<dyn InvoiceStore>,
    renderer: Box<dyn DocumentRenderer>,
    mailer: Box<dyn Mailer>,
    settings: MailSettings,
}

impl InvoiceProcessor {
    pub fn new(
        store: Box<dyn InvoiceStore>,
        renderer: Box<dyn DocumentRenderer>,
        mailer: Box<dyn Mailer>,
        settings: MailSettings,
    ) -> Self {
        Self {
            store,
            renderer,
            mailer,
            settings,
        }
    }

    /// 读取全部行并按顺序处理；数据源读取失败则整批中止
    pub async fn run(&self, source: &dyn BillingSource) -> Result<RunSummary> {
        let rows = source.read_rows()?;
        Ok(self.process_rows(&rows).await)
    }

    /// 单行失败只记录，不影响后续行
    pub async fn process_rows(&self, rows: &[SheetRow]) -> RunSummary {
        let mut summary = RunSummary::default();
        let total = rows.len();

        for (idx, row) in rows.iter().enumerate() {
            tracing::info!("Processing row {} ({}/{})", row.line, idx + 1, total);
            let file_name = invoice_file_name(row.client_company_name(), row.invoice_no());
            let outcome = self.process_row(row, &file_name).await;

            if let RowOutcome::Failed { reason } = &outcome {
                tracing::warn!("Row {} failed: {}", row.line, reason);
            }

            summary.push(RowReport {
                line: row.line,
                invoice_no: row.invoice_no().to_string(),
                client_company_name: row.client_company_name().to_string(),
                file_name,
                outcome,
            });
        }

        tracing::info!(
            "Run finished: {} rows, {} sent, {} skipped, {} failed",
            total,
            summary.sent(),
            summary.skipped(),
            summary.failed()
        );
        summary
    }

    async fn process_row(&self, row: &SheetRow, file_name: &str) -> RowOutcome {
        // 1. 无邮箱跳过
        let Some(email) = row.email() else {
            tracing::info!(
                "Skipping row {}: No email provided for {}",
                row.line,
                row.contact_name()
            );
            return RowOutcome::Skipped(SkipReason::MissingEmail);
        };

        // 2. 已生成过的发票跳过
        match self.store.exists(file_name).await {
            Ok(true) => {
                tracing::info!("Invoice already exists: {}", file_name);
                return RowOutcome::Skipped(SkipReason::DuplicateOutput {
                    file_name: file_name.to_string(),
                });
            }
            Ok(false) => {}
            Err(e) => {
                return RowOutcome::Failed {
                    reason: e.to_string(),
                }
            }
        }

        // 3. 计算、渲染、保存、发送
        match self.deliver(row, email, file_name).await {
            Ok(()) => {
                tracing::info!("Email sent to {} for Invoice No: {}", email, row.invoice_no());
                RowOutcome::Sent {
                    file_name: file_name.to_string(),
                }
            }
            Err(e) => RowOutcome::Failed {
                reason: e.to_string(),
            },
        }
    }

    async fn deliver(&self, row: &SheetRow, email: &str, file_name: &str) -> Result<()> {
        let billing = BillingRow::parse(row)?;
        let result = compute(&billing.quantity, &billing.rate, &billing.freight)?;
        let fields = invoice_placeholders(&billing, &result);

        let title = file_name.trim_end_matches(".pdf");
        let pdf = self.renderer.render(title, &fields)?;
        self.store.save(file_name, pdf.clone()).await?;

        let mail = InvoiceMail {
            to: email.to_string(),
            subject: InvoiceMail::subject_for(&self.settings.subject_prefix, &billing.invoice_no),
            body: InvoiceMail::body_for(&billing.contact_name, &self.settings.sender_name),
            attachment_name: file_name.to_string(),
            attachment: pdf,
        };
        self.mailer.send(&mail).await
    }
}
