use crate::error::Result;
use crate::models::RunSummary;
use chrono::Local;
use std::io::Write;
use std::path::Path;

/// 写出运行报告 CSV
pub fn write_report(path: &Path, summary: &RunSummary) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    let file = std::fs::File::create(path)?;
    write_records(file, summary)?;
    tracing::info!("Run report written to {}", path.display());
    Ok(())
}

pub fn write_records<W: Write>(out: W, summary: &RunSummary) -> Result<()> {
    let processed_at = Local::now().format("%Y-%m-%d %H:%M:%S").to_string();
    let mut writer = csv::Writer::from_writer(out);
    for row in &summary.rows {
        writer.serialize(row.to_record(&processed_at))?;
    }
    writer.flush()?;
    Ok(())
}
