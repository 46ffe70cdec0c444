use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// 应用配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub source: SourceConfig,
    pub template: TemplateConfig,
    pub output: OutputConfig,
    pub mail: MailConfig,
}

/// 账单表 (CSV 导出)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceConfig {
    pub path: PathBuf,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TemplateConfig {
    pub path: PathBuf,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    /// 发票 PDF 输出目录
    pub dir: PathBuf,
    /// 运行报告 CSV，不配置则不生成
    #[serde(default)]
    pub report_path: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MailTransport {
    Smtp,
    /// 写入本地发件箱目录
    File,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MailConfig {
    pub transport: MailTransport,
    pub from_name: String,
    pub from_email: String,
    pub subject_prefix: String,
    pub outbox_dir: PathBuf,
    pub smtp: SmtpConfig,
}

#[derive(Clone, Serialize, Deserialize)]
pub struct SmtpConfig {
    pub host: String,
    pub port: u16,
    #[serde(default)]
    pub user: String,
    #[serde(default)]
    pub password: String,
    pub starttls: bool,
}

impl std::fmt::Debug for SmtpConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SmtpConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("user", &self.user)
            .field("password", &"***")
            .field("starttls", &self.starttls)
            .finish()
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            source: SourceConfig {
                path: PathBuf::from("billing.csv"),
            },
            template: TemplateConfig {
                path: PathBuf::from("templates/invoice.txt"),
            },
            output: OutputConfig {
                dir: PathBuf::from("invoices"),
                report_path: None,
            },
            mail: MailConfig {
                transport: MailTransport::File,
                from_name: "HSK Enterprises".to_string(),
                from_email: "billing@example.com".to_string(),
                subject_prefix: "Experiment_Bill_Format".to_string(),
                outbox_dir: PathBuf::from("outbox"),
                smtp: SmtpConfig {
                    host: "smtp.gmail.com".to_string(),
                    port: 587,
                    user: String::new(),
                    password: String::new(),
                    starttls: true,
                },
            },
        }
    }
}

/// 配置文件环境变量
pub const CONFIG_PATH_VAR: &str = "INVOICE_CONFIG";
const DEFAULT_CONFIG_NAME: &str = "invoice-mailer";
const ENV_PREFIX: &str = "INVOICE";

impl AppConfig {
    /// 默认值 < 配置文件 < 环境变量 (INVOICE_MAIL__SMTP__HOST 等)
    pub fn load() -> Result<Self> {
        let name = std::env::var(CONFIG_PATH_VAR).unwrap_or_else(|_| DEFAULT_CONFIG_NAME.to_string());
        Self::load_from(&name)
    }

    pub fn load_from(name: &str) -> Result<Self> {
        let defaults = config::Config::try_from(&AppConfig::default())?;
        let settings = config::Config::builder()
            .add_source(defaults)
            .add_source(config::File::with_name(name).required(false))
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        Ok(settings.try_deserialize()?)
    }
}
