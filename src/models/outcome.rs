use serde::Serialize;

/// 跳过原因 (不视为错误)
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    MissingEmail,
    DuplicateOutput { file_name: String },
}

/// 单行处理结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RowOutcome {
    Sent { file_name: String },
    Skipped(SkipReason),
    Failed { reason: String },
}

impl RowOutcome {
    pub fn status(&self) -> &'static str {
        match self {
            RowOutcome::Sent { .. } => "sent",
            RowOutcome::Skipped(SkipReason::MissingEmail) => "skipped_missing_email",
            RowOutcome::Skipped(SkipReason::DuplicateOutput { .. }) => "skipped_duplicate",
            RowOutcome::Failed { .. } => "failed",
        }
    }
}

/// 单行处理记录
#[derive(Debug, Clone)]
pub struct RowReport {
    pub line: usize,
    pub invoice_no: String,
    pub client_company_name: String,
    pub file_name: String,
    pub outcome: RowOutcome,
}

/// 运行报告 CSV 行
#[derive(Debug, Serialize)]
pub struct ReportRecord<'a> {
    pub line: usize,
    pub invoice_no: &'a str,
    pub client_company_name: &'a str,
    pub file_name: &'a str,
    pub status: &'static str,
    pub detail: String,
    pub processed_at: &'a str,
}

impl RowReport {
    pub fn to_record<'a>(&'a self, processed_at: &'a str) -> ReportRecord<'a> {
        let detail = match &self.outcome {
            RowOutcome::Sent { .. } => String::new(),
            RowOutcome::Skipped(SkipReason::MissingEmail) => "no email provided".to_string(),
            RowOutcome::Skipped(SkipReason::DuplicateOutput { .. }) => {
                "invoice already exists".to_string()
            }
            RowOutcome::Failed { reason } => reason.clone(),
        };
        ReportRecord {
            line: self.line,
            invoice_no: &self.invoice_no,
            client_company_name: &self.client_company_name,
            file_name: &self.file_name,
            status: self.outcome.status(),
            detail,
            processed_at,
        }
    }
}

/// 整批处理统计
#[derive(Debug, Clone, Default)]
pub struct RunSummary {
    pub rows: Vec<RowReport>,
}

impl RunSummary {
    pub fn push(&mut self, report: RowReport) {
        self.rows.push(report);
    }

    pub fn sent(&self) -> usize {
        self.count(|o| matches!(o, RowOutcome::Sent { .. }))
    }

    pub fn skipped(&self) -> usize {
        self.count(|o| matches!(o, RowOutcome::Skipped(_)))
    }

    pub fn failed(&self) -> usize {
        self.count(|o| matches!(o, RowOutcome::Failed { .. }))
    }

    fn count(&self, pred: impl Fn(&RowOutcome) -> bool) -> usize {
        self.rows.iter().filter(|r| pred(&r.outcome)).count()
    }
}
