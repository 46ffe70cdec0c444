use crate::error::{InvoiceError, Result};

const ONES: [&str; 20] = [
    "", "One", "Two", "Three", "Four", "Five", "Six", "Seven", "Eight", "Nine", "Ten",
    "Eleven", "Twelve", "Thirteen", "Fourteen", "Fifteen", "Sixteen", "Seventeen",
    "Eighteen", "Nineteen",
];

const TENS: [&str; 10] = [
    "", "", "Twenty", "Thirty", "Forty", "Fifty", "Sixty", "Seventy", "Eighty", "Ninety",
];

/// 印度计数分组 (高位在前)
const GROUPS: [(u64, &str); 3] = [
    (10_000_000, "Crore"),
    (100_000, "Lakh"),
    (1_000, "Thousand"),
];

/// 可朗读的最大金额: 999 Crore 99 Lakh 99 Thousand 999
pub const MAX_SPELLABLE: u64 = 9_999_999_999;

/// 金额转英文大写 (印度计数法)，结果以 " Rupees" 结尾
pub fn amount_in_words(amount: u64) -> Result<String> {
    if amount > MAX_SPELLABLE {
        return Err(InvoiceError::invalid(
            "amount",
            format!("{} exceeds the largest spellable amount {}", amount, MAX_SPELLABLE),
        ));
    }
    if amount == 0 {
        return Ok("Zero Rupees".to_string());
    }

    let mut parts: Vec<String> = Vec::new();
    let mut rest = amount;
    for (size, name) in GROUPS {
        let group = rest / size;
        rest %= size;
        if group > 0 {
            parts.push(format!("{} {}", below_thousand(group), name));
        }
    }
    if rest > 0 {
        parts.push(below_thousand(rest));
    }

    Ok(format!("{} Rupees", parts.join(" ")))
}

/// 朗读 [1, 999]，各分组与末段共用
fn below_thousand(n: u64) -> String {
    debug_assert!(n < 1_000);
    let mut words: Vec<&str> = Vec::with_capacity(4);

    let hundred = (n / 100) as usize;
    if hundred > 0 {
        words.push(ONES[hundred]);
        words.push("Hundred");
    }

    let tens_and_ones = (n % 100) as usize;
    if tens_and_ones > 0 {
        if tens_and_ones < 20 {
            words.push(ONES[tens_and_ones]);
        } else {
            words.push(TENS[tens_and_ones / 10]);
            let ones = tens_and_ones % 10;
            if ones > 0 {
                words.push(ONES[ones]);
            }
        }
    }

    words.join(" ")
}
