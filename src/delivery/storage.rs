use crate::error::Result;
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio::fs;

/// 发票文件存储 (输出目录)
#[async_trait]
pub trait InvoiceStore: Send + Sync {
    async fn exists(&self, file_name: &str) -> Result<bool>;
    async fn save(&self, file_name: &str, data: Vec<u8>) -> Result<()>;
}

/// 本地目录存储
pub struct FolderStore {
    base_path: PathBuf,
}

impl FolderStore {
    pub async fn new(base_path: impl Into<PathBuf>) -> Result<Self> {
        let base_path = base_path.into();
        if !fs::try_exists(&base_path).await? {
            fs::create_dir_all(&base_path).await?;
        }
        Ok(Self { base_path })
    }

    pub fn base_path(&self) -> &Path {
        &self.base_path
    }
}

#[async_trait]
impl InvoiceStore for FolderStore {
    async fn exists(&self, file_name: &str) -> Result<bool> {
        let path = self.base_path.join(file_name);
        tracing::debug!("Checking for file: {} in folder: {}", file_name, self.base_path.display());
        Ok(fs::try_exists(path).await?)
    }

    async fn save(&self, file_name: &str, data: Vec<u8>) -> Result<()> {
        fs::write(self.base_path.join(file_name), data).await?;
        Ok(())
    }
}

/// 输出文件名: Invoice_<客户公司>_<发票号>.pdf
pub fn invoice_file_name(client_company_name: &str, invoice_no: &str) -> String {
    format!(
        "Invoice_{}_{}.pdf",
        sanitize(client_company_name),
        sanitize(invoice_no)
    )
}

/// 替换路径分隔符与控制字符
fn sanitize(part: &str) -> String {
    part.chars()
        .map(|ch| if ch == '/' || ch == '\\' || ch.is_control() { '_' } else { ch })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_name_is_deterministic() {
        assert_eq!(invoice_file_name("Acme Traders", "INV-001"), "Invoice_Acme Traders_INV-001.pdf");
        assert_eq!(invoice_file_name("Acme Traders", "INV-001"), invoice_file_name("Acme Traders", "INV-001"));
    }

    #[test]
    fn file_name_cannot_escape_folder() {
        assert_eq!(invoice_file_name("A/B\\C", "7\n"), "Invoice_A_B_C_7_.pdf");
    }

    #[test]
    fn surrounding_spaces_are_kept() {
        assert_eq!(invoice_file_name(" Acme ", "INV-1"), "Invoice_ Acme _INV-1.pdf");
    }

    #[tokio::test]
    async fn saved_file_exists() {
        let dir = tempfile::tempdir().unwrap();
        let store = FolderStore::new(dir.path().join("out")).await.unwrap();

        assert!(!store.exists("Invoice_A_1.pdf").await.unwrap());
        store.save("Invoice_A_1.pdf", b"%PDF-1.3".to_vec()).await.unwrap();
        assert!(store.exists("Invoice_A_1.pdf").await.unwrap());
    }
}
