use bigdecimal::BigDecimal;

/// 单行账单计算结果
#[derive(Debug, Clone, PartialEq)]
pub struct BillingResult {
    pub total_before_tax: BigDecimal,
    pub cgst: BigDecimal,
    pub sgst: BigDecimal,
    pub total_tax: BigDecimal,
    /// 未取整的应付总额
    pub grand_total: BigDecimal,
    pub rounded_grand_total: BigDecimal,
    /// 取整差额，保留两位小数
    pub round_off: BigDecimal,
    pub amount_in_words: String,
}
