use crate::config::{MailConfig, MailTransport};
use crate::error::{InvoiceError, Result};
use async_trait::async_trait;
use lettre::{
    message::{header::ContentType, Attachment, Mailbox, MultiPart, SinglePart},
    transport::smtp::authentication::Credentials,
    AsyncFileTransport, AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor,
};
use std::path::PathBuf;

/// 待发送的发票邮件
#[derive(Debug, Clone)]
pub struct InvoiceMail {
    pub to: String,
    pub subject: String,
    pub body: String,
    pub attachment_name: String,
    pub attachment: Vec<u8>,
}

impl InvoiceMail {
    pub fn subject_for(subject_prefix: &str, invoice_no: &str) -> String {
        let prefix = subject_prefix.trim();
        if prefix.is_empty() {
            format!("Invoice {}", invoice_no)
        } else {
            format!("{} Invoice {}", prefix, invoice_no)
        }
    }

    pub fn body_for(contact_name: &str, sender_name: &str) -> String {
        format!(
            "Dear {},\n\nPlease find attached your invoice.\n\nRegards,\n{}",
            contact_name, sender_name
        )
    }
}

/// 邮件投递
#[async_trait]
pub trait Mailer: Send + Sync {
    async fn send(&self, mail: &InvoiceMail) -> Result<()>;
}

/// 按配置构建邮件投递方式
pub fn build_mailer(config: &MailConfig) -> Result<Box<dyn Mailer>> {
    let from = sender_mailbox(config)?;
    match config.transport {
        MailTransport::Smtp => Ok(Box::new(SmtpMailer::new(config, from)?)),
        MailTransport::File => Ok(Box::new(OutboxMailer::new(&config.outbox_dir, from)?)),
    }
}

fn sender_mailbox(config: &MailConfig) -> Result<Mailbox> {
    format!("{} <{}>", config.from_name, config.from_email)
        .parse()
        .map_err(|e| InvoiceError::Mail(format!("Invalid from address: {}", e)))
}

/// 组装带 PDF 附件的邮件
pub fn build_message(from: &Mailbox, mail: &InvoiceMail) -> Result<Message> {
    let to: Mailbox = mail
        .to
        .parse()
        .map_err(|e| InvoiceError::Mail(format!("Invalid recipient '{}': {}", mail.to, e)))?;
    let pdf = ContentType::parse("application/pdf")
        .map_err(|e| InvoiceError::Mail(format!("Invalid content type: {}", e)))?;

    Message::builder()
        .from(from.clone())
        .to(to)
        .subject(mail.subject.as_str())
        .multipart(
            MultiPart::mixed()
                .singlepart(SinglePart::plain(mail.body.clone()))
                .singlepart(
                    Attachment::new(mail.attachment_name.clone()).body(mail.attachment.clone(), pdf),
                ),
        )
        .map_err(|e| InvoiceError::Mail(format!("Failed to build message: {}", e)))
}

/// SMTP 发送
pub struct SmtpMailer {
    from: Mailbox,
    transport: AsyncSmtpTransport<Tokio1Executor>,
}

impl SmtpMailer {
    pub fn new(config: &MailConfig, from: Mailbox) -> Result<Self> {
        let smtp = &config.smtp;
        let mut builder = if smtp.starttls {
            AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&smtp.host)
                .map_err(|e| InvoiceError::Mail(format!("Failed to create SMTP relay: {}", e)))?
        } else {
            AsyncSmtpTransport::<Tokio1Executor>::builder_dangerous(&smtp.host)
        }
        .port(smtp.port);

        if !smtp.user.trim().is_empty() {
            builder = builder.credentials(Credentials::new(smtp.user.clone(), smtp.password.clone()));
        }

        Ok(Self {
            from,
            transport: builder.build(),
        })
    }
}

#[async_trait]
impl Mailer for SmtpMailer {
    async fn send(&self, mail: &InvoiceMail) -> Result<()> {
        let message = build_message(&self.from, mail)?;
        self.transport
            .send(message)
            .await
            .map_err(|e| InvoiceError::Mail(format!("Failed to send email: {}", e)))?;

        tracing::info!(to = %mail.to, subject = %mail.subject, "Email sent");
        Ok(())
    }
}

/// 写入本地发件箱 (.eml)，用于试运行
pub struct OutboxMailer {
    from: Mailbox,
    dir: PathBuf,
    transport: AsyncFileTransport<Tokio1Executor>,
}

impl OutboxMailer {
    pub fn new(dir: impl Into<PathBuf>, from: Mailbox) -> Result<Self> {
        let dir = dir.into();
        std::fs::create_dir_all(&dir)?;
        Ok(Self {
            from,
            transport: AsyncFileTransport::new(&dir),
            dir,
        })
    }
}

#[async_trait]
impl Mailer for OutboxMailer {
    async fn send(&self, mail: &InvoiceMail) -> Result<()> {
        let message = build_message(&self.from, mail)?;
        let id = self
            .transport
            .send(message)
            .await
            .map_err(|e| InvoiceError::Mail(format!("Failed to write email: {}", e)))?;

        tracing::info!(to = %mail.to, outbox = %self.dir.display(), id = %id, "Email written to outbox");
        Ok(())
    }
}
