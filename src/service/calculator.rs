use crate::error::{InvoiceError, Result};
use crate::models::BillingResult;
use crate::service::words::amount_in_words;
use bigdecimal::{BigDecimal, ToPrimitive, Zero};

/// CGST / SGST 各 9%
const HALF_TAX_PERCENT: i32 = 9;

/// 总税率 (模板 TotalTaxRate)
pub const TOTAL_TAX_RATE: &str = "18";

fn half_tax_rate() -> BigDecimal {
    BigDecimal::new(HALF_TAX_PERCENT.into(), 2)
}

/// 计算单行税额与合计
pub fn compute(quantity: &BigDecimal, rate: &BigDecimal, freight: &BigDecimal) -> Result<BillingResult> {
    for (field, value) in [("quantity", quantity), ("rate", rate), ("freight", freight)] {
        if *value < BigDecimal::zero() {
            return Err(InvoiceError::invalid(field, format!("{} is negative", value)));
        }
    }

    let total_before_tax = quantity * rate;
    let cgst = &total_before_tax * &half_tax_rate();
    let sgst = &total_before_tax * &half_tax_rate();
    let total_tax = &cgst + &sgst;
    let grand_total = &total_before_tax + &total_tax + freight;

    let rounded_grand_total = round_half_up(&grand_total, 0);
    let round_off = round_half_up(&(&rounded_grand_total - &grand_total), 2);

    let rupees = rounded_grand_total.to_u64().ok_or_else(|| {
        InvoiceError::invalid("amount", format!("{} cannot be spelled", rounded_grand_total))
    })?;
    let amount_in_words = amount_in_words(rupees)?;

    Ok(BillingResult {
        total_before_tax,
        cgst,
        sgst,
        total_tax,
        grand_total,
        rounded_grand_total,
        round_off,
        amount_in_words,
    })
}

/// 四舍五入到 `digits` 位小数 (.5 远离零)
pub fn round_half_up(value: &BigDecimal, digits: i64) -> BigDecimal {
    let half = BigDecimal::new(5.into(), digits + 1);
    // with_scale 向零截断
    if *value < BigDecimal::zero() {
        (value - &half).with_scale(digits)
    } else {
        (value + &half).with_scale(digits)
    }
}

/// 两位小数展示
pub fn format_amount(value: &BigDecimal) -> String {
    round_half_up(value, 2).to_string()
}
