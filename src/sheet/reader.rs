use crate::error::Result;
use crate::models::SheetRow;
use std::io::Read;
use std::path::PathBuf;

/// 账单数据来源
pub trait BillingSource: Send + Sync {
    /// 读取全部数据行 (不含表头)，按表格顺序返回
    fn read_rows(&self) -> Result<Vec<SheetRow>>;
}

/// 从 CSV 导出的账单表读取
#[derive(Debug, Clone)]
pub struct CsvSheet {
    path: PathBuf,
}

impl CsvSheet {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl BillingSource for CsvSheet {
    fn read_rows(&self) -> Result<Vec<SheetRow>> {
        let file = std::fs::File::open(&self.path)?;
        let rows = read_records(file)?;
        tracing::info!("Read {} billing rows from {}", rows.len(), self.path.display());
        Ok(rows)
    }
}

/// 解析 CSV，第一条记录为表头
pub fn read_records<R: Read>(input: R) -> Result<Vec<SheetRow>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(input);

    let mut rows = Vec::new();
    for (idx, record) in reader.records().enumerate() {
        let record = record?;
        let cells: Vec<String> = record.iter().map(str::to_string).collect();
        if cells.iter().all(|c| c.trim().is_empty()) {
            continue;
        }
        // 表头占第 1 行
        let line = record
            .position()
            .map(|p| p.line() as usize)
            .unwrap_or(idx + 2);
        rows.push(SheetRow::new(line, cells));
    }

    Ok(rows)
}
