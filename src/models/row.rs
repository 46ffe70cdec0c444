use crate::error::{InvoiceError, Result};
use bigdecimal::{BigDecimal, Zero};
use std::str::FromStr;

/// 账单表列位置 (第 0 列为发票号 ... 第 14 列为运费)
pub mod column {
    pub const INVOICE_NO: usize = 0;
    pub const CONTACT_NAME: usize = 1;
    pub const INVOICE_DATE: usize = 2;
    pub const CLIENT_COMPANY_NAME: usize = 3;
    pub const DUE_DATE: usize = 4;
    pub const ADDRESS: usize = 5;
    pub const PHONE: usize = 6;
    pub const EMAIL: usize = 7;
    pub const DESCRIPTION: usize = 8;
    pub const HSN_CODE: usize = 9;
    pub const LAST_READING: usize = 10;
    pub const CURRENT_READING: usize = 11;
    pub const QUANTITY: usize = 12;
    pub const RATE: usize = 13;
    pub const FREIGHT: usize = 14;
}

/// 原始表格行 (未校验)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SheetRow {
    /// 表格中的行号 (从 1 开始，表头为第 1 行)
    pub line: usize,
    pub cells: Vec<String>,
}

impl SheetRow {
    pub fn new(line: usize, cells: Vec<String>) -> Self {
        Self { line, cells }
    }

    /// 缺失的单元格按空白处理
    pub fn cell(&self, idx: usize) -> &str {
        self.cells.get(idx).map(String::as_str).unwrap_or("")
    }

    /// 收件邮箱，空白视为缺失
    pub fn email(&self) -> Option<&str> {
        let email = self.cell(column::EMAIL).trim();
        if email.is_empty() {
            None
        } else {
            Some(email)
        }
    }

    pub fn invoice_no(&self) -> &str {
        self.cell(column::INVOICE_NO)
    }

    pub fn client_company_name(&self) -> &str {
        self.cell(column::CLIENT_COMPANY_NAME)
    }

    pub fn contact_name(&self) -> &str {
        self.cell(column::CONTACT_NAME)
    }
}

/// 已校验的账单行
#[derive(Debug, Clone)]
pub struct BillingRow {
    pub invoice_no: String,
    pub contact_name: String,
    pub invoice_date: String,
    pub client_company_name: String,
    pub due_date: String,
    pub address: String,
    pub phone: String,
    pub email: String,
    pub description: String,
    pub hsn_code: String,
    pub last_reading: String,
    pub current_reading: String,
    pub quantity_text: String,
    pub rate_text: String,
    pub quantity: BigDecimal,
    pub rate: BigDecimal,
    pub freight: BigDecimal,
}

impl BillingRow {
    /// 解析并校验数值列，其余列原样转交模板
    pub fn parse(row: &SheetRow) -> Result<Self> {
        let quantity = parse_amount("quantity", row.cell(column::QUANTITY))?;
        let rate = parse_amount("rate", row.cell(column::RATE))?;
        let freight = parse_amount("freight", row.cell(column::FREIGHT))?;

        Ok(Self {
            invoice_no: row.cell(column::INVOICE_NO).to_string(),
            contact_name: row.cell(column::CONTACT_NAME).to_string(),
            invoice_date: row.cell(column::INVOICE_DATE).to_string(),
            client_company_name: row.cell(column::CLIENT_COMPANY_NAME).to_string(),
            due_date: row.cell(column::DUE_DATE).to_string(),
            address: row.cell(column::ADDRESS).to_string(),
            phone: row.cell(column::PHONE).to_string(),
            email: row.cell(column::EMAIL).trim().to_string(),
            description: row.cell(column::DESCRIPTION).to_string(),
            hsn_code: row.cell(column::HSN_CODE).to_string(),
            last_reading: row.cell(column::LAST_READING).to_string(),
            current_reading: row.cell(column::CURRENT_READING).to_string(),
            quantity_text: row.cell(column::QUANTITY).trim().to_string(),
            rate_text: row.cell(column::RATE).trim().to_string(),
            quantity,
            rate,
            freight,
        })
    }
}

/// 小数位 / 十进制指数上限
const MAX_SCALE: i64 = 20;
/// 有效数字上限
const MAX_DIGITS: u64 = 40;

/// 解析非负金额/数量，超出量级上限的值在进入运算前拒绝
pub fn parse_amount(field: &'static str, text: &str) -> Result<BigDecimal> {
    let text = text.trim();
    if text.is_empty() {
        return Err(InvoiceError::invalid(field, "value is blank"));
    }
    let value = BigDecimal::from_str(text)
        .map_err(|e| InvoiceError::invalid(field, format!("'{}' is not a number: {}", text, e)))?;
    if value < BigDecimal::zero() {
        return Err(InvoiceError::invalid(field, format!("'{}' is negative", text)));
    }
    let (_, scale) = value.as_bigint_and_exponent();
    if !(-MAX_SCALE..=MAX_SCALE).contains(&scale) || value.digits() > MAX_DIGITS {
        return Err(InvoiceError::invalid(field, format!("'{}' is out of range", text)));
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sheet_row(cells: &[&str]) -> SheetRow {
        SheetRow::new(2, cells.iter().map(|c| c.to_string()).collect())
    }

    fn full_row() -> Vec<&'static str> {
        vec![
            "INV-001", "Asha Rao", "01/04/2024", "Acme Traders", "15/04/2024",
            "12 MG Road", "9876543210", " asha@acme.test ", "Water supply", "2201",
            "1200", "1450", "250", "12.5", "100",
        ]
    }

    #[test]
    fn parses_numeric_columns_and_relays_the_rest() {
        let row = BillingRow::parse(&sheet_row(&full_row())).unwrap();

        assert_eq!(row.invoice_no, "INV-001");
        assert_eq!(row.client_company_name, "Acme Traders");
        assert_eq!(row.email, "asha@acme.test");
        assert_eq!(row.quantity, BigDecimal::from(250));
        assert_eq!(row.rate, BigDecimal::from_str("12.5").unwrap());
        assert_eq!(row.freight, BigDecimal::from(100));
        assert_eq!(row.rate_text, "12.5");
    }

    #[test]
    fn non_numeric_freight_is_invalid_input() {
        let mut cells = full_row();
        cells[column::FREIGHT] = "free";
        let err = BillingRow::parse(&sheet_row(&cells)).unwrap_err();

        assert!(matches!(err, InvoiceError::InvalidInput { field: "freight", .. }));
    }

    #[test]
    fn missing_freight_cell_is_invalid_input() {
        let cells = full_row();
        let err = BillingRow::parse(&sheet_row(&cells[..column::FREIGHT])).unwrap_err();

        assert!(matches!(err, InvoiceError::InvalidInput { field: "freight", .. }));
    }

    #[test]
    fn negative_quantity_is_invalid_input() {
        let mut cells = full_row();
        cells[column::QUANTITY] = "-3";
        let err = BillingRow::parse(&sheet_row(&cells)).unwrap_err();

        assert!(matches!(err, InvoiceError::InvalidInput { field: "quantity", .. }));
    }

    #[test]
    fn oversized_exponent_is_invalid_input() {
        for text in ["1e30000000", "1e-30000000"] {
            let mut cells = full_row();
            cells[column::QUANTITY] = text;
            let err = BillingRow::parse(&sheet_row(&cells)).unwrap_err();

            assert!(matches!(err, InvoiceError::InvalidInput { field: "quantity", .. }));
        }

        let long = "9".repeat(60);
        assert!(matches!(
            parse_amount("rate", &long),
            Err(InvoiceError::InvalidInput { field: "rate", .. })
        ));
        assert_eq!(parse_amount("rate", "2.5e2").unwrap(), BigDecimal::from(250));
    }

    #[test]
    fn non_numeric_quantity_and_rate_are_invalid_input() {
        let mut cells = full_row();
        cells[column::QUANTITY] = "abc";
        let err = BillingRow::parse(&sheet_row(&cells)).unwrap_err();
        assert!(matches!(err, InvoiceError::InvalidInput { field: "quantity", .. }));

        let mut cells = full_row();
        cells[column::RATE] = "abc";
        let err = BillingRow::parse(&sheet_row(&cells)).unwrap_err();
        assert!(matches!(err, InvoiceError::InvalidInput { field: "rate", .. }));
    }

    #[test]
    fn blank_email_reads_as_missing() {
        let mut cells = full_row();
        cells[column::EMAIL] = "   ";

        assert_eq!(sheet_row(&cells).email(), None);
        assert_eq!(sheet_row(&full_row()).email(), Some("asha@acme.test"));
    }
}
