use thiserror::Error;

/// 统一错误类型
#[derive(Debug, Error)]
pub enum InvoiceError {
    /// 单元格无法解析为合法数值，或金额超出可朗读范围
    #[error("Invalid input in {field}: {reason}")]
    InvalidInput { field: &'static str, reason: String },

    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("Sheet error: {0}")]
    Sheet(#[from] csv::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Render error: {0}")]
    Render(String),

    #[error("Mail error: {0}")]
    Mail(String),
}

impl InvoiceError {
    pub fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        InvoiceError::InvalidInput {
            field,
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, InvoiceError>;
