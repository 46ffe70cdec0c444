use gst_invoice_mailer::delivery::{build_mailer, FolderStore, PdfRenderer};
use gst_invoice_mailer::report::write_report;
use gst_invoice_mailer::{AppConfig, CsvSheet, InvoiceProcessor, MailSettings};
use tracing::info;
use tracing_subscriber::fmt::time::ChronoLocal;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 初始化日志 - 本地时间格式
    tracing_subscriber::fmt()
        .with_timer(ChronoLocal::new("%Y-%m-%d %H:%M:%S".to_string()))
        .with_target(true)
        .with_level(true)
        .init();

    // 加载配置
    let config = AppConfig::load()?;
    info!("Starting invoice run with config: {:?}", config);

    // 构建协作组件，任何一步失败都中止本次运行
    let source = CsvSheet::new(&config.source.path);
    let renderer = PdfRenderer::from_file(&config.template.path)?;
    let store = FolderStore::new(&config.output.dir).await?;
    let mailer = build_mailer(&config.mail)?;
    info!("Saving invoices to {}", store.base_path().display());

    let processor = InvoiceProcessor::new(
        Box::new(store),
        Box::new(renderer),
        mailer,
        MailSettings {
            subject_prefix: config.mail.subject_prefix.clone(),
            sender_name: config.mail.from_name.clone(),
        },
    );

    let summary = processor.run(&source).await?;

    if let Some(path) = &config.output.report_path {
        write_report(path, &summary)?;
    }

    info!(
        "Done: {} sent, {} skipped, {} failed",
        summary.sent(),
        summary.skipped(),
        summary.failed()
    );
    Ok(())
}
