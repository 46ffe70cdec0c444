use crate::models::{BillingResult, BillingRow};
use crate::service::calculator::{format_amount, TOTAL_TAX_RATE};
use indexmap::IndexMap;

/// 模板占位符 -> 替换值 (保持模板字段顺序)
pub type Placeholders = IndexMap<&'static str, String>;

/// 组装发票模板字段
pub fn invoice_placeholders(row: &BillingRow, result: &BillingResult) -> Placeholders {
    let mut fields = Placeholders::with_capacity(24);

    fields.insert("InvoiceNo", row.invoice_no.clone());
    fields.insert("ContactName", row.contact_name.clone());
    fields.insert("InvoiceDate", row.invoice_date.clone());
    fields.insert("ClientCompanyName", row.client_company_name.clone());
    fields.insert("DueDate", row.due_date.clone());
    fields.insert("Address", row.address.clone());
    fields.insert("Phone", row.phone.clone());
    fields.insert("Email", row.email.clone());
    fields.insert("Description", row.description.clone());
    fields.insert("CurrentReading", row.current_reading.clone());
    fields.insert("LastReading", row.last_reading.clone());
    fields.insert("HSNCode", row.hsn_code.clone());
    fields.insert("QTY", row.quantity_text.clone());
    fields.insert("Rate", row.rate_text.clone());
    fields.insert("Total", format_amount(&result.total_before_tax));
    fields.insert("Freight", format_amount(&row.freight));
    fields.insert("CGST", format_amount(&result.cgst));
    fields.insert("SGST", format_amount(&result.sgst));
    fields.insert("TotalBeforeTax", format_amount(&result.total_before_tax));
    fields.insert("TotalTax", format_amount(&result.total_tax));
    fields.insert("TotalTaxRate", TOTAL_TAX_RATE.to_string());
    fields.insert("AmountInWords", result.amount_in_words.clone());
    fields.insert("GrandTotal", format_amount(&result.rounded_grand_total));
    fields.insert("RoundOff", format_amount(&result.round_off));

    fields
}

/// 替换模板中的 `{{Name}}`，未知占位符原样保留
pub fn fill_template(template: &str, fields: &Placeholders) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(start) = rest.find("{{") {
        out.push_str(&rest[..start]);
        let after = &rest[start + 2..];
        match after.find("}}") {
            Some(end) => {
                let name = &after[..end];
                match fields.get(name.trim()) {
                    Some(value) => out.push_str(value),
                    None => {
                        out.push_str("{{");
                        out.push_str(name);
                        out.push_str("}}");
                    }
                }
                rest = &after[end + 2..];
            }
            None => {
                out.push_str(&rest[start..]);
                rest = "";
            }
        }
    }
    out.push_str(rest);

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::SheetRow;
    use crate::service::calculator::compute;

    fn sample() -> (BillingRow, BillingResult) {
        let cells = [
            "INV-7", "Ravi", "2024-05-01", "Blue Hills", "2024-05-15", "Pune", "98200",
            "ravi@bluehills.test", "Meter charges", "9987", "100", "350", "250", "4", "20.5",
        ];
        let row = BillingRow::parse(&SheetRow::new(
            3,
            cells.iter().map(|c| c.to_string()).collect(),
        ))
        .unwrap();
        let result = compute(&row.quantity, &row.rate, &row.freight).unwrap();
        (row, result)
    }

    #[test]
    fn placeholders_follow_template_order() {
        let (row, result) = sample();
        let fields = invoice_placeholders(&row, &result);
        let names: Vec<&str> = fields.keys().copied().collect();

        assert_eq!(
            names,
            vec![
                "InvoiceNo", "ContactName", "InvoiceDate", "ClientCompanyName", "DueDate",
                "Address", "Phone", "Email", "Description", "CurrentReading", "LastReading",
                "HSNCode", "QTY", "Rate", "Total", "Freight", "CGST", "SGST",
                "TotalBeforeTax", "TotalTax", "TotalTaxRate", "AmountInWords", "GrandTotal",
                "RoundOff",
            ]
        );
    }

    #[test]
    fn numeric_fields_are_formatted() {
        let (row, result) = sample();
        let fields = invoice_placeholders(&row, &result);

        // 250 * 4 = 1000, 税 180, 运费 20.5 => 1200.5 -> 1201
        assert_eq!(fields["QTY"], "250");
        assert_eq!(fields["Rate"], "4");
        assert_eq!(fields["Total"], "1000.00");
        assert_eq!(fields["TotalBeforeTax"], "1000.00");
        assert_eq!(fields["Freight"], "20.50");
        assert_eq!(fields["CGST"], "90.00");
        assert_eq!(fields["SGST"], "90.00");
        assert_eq!(fields["TotalTax"], "180.00");
        assert_eq!(fields["TotalTaxRate"], "18");
        assert_eq!(fields["GrandTotal"], "1201.00");
        assert_eq!(fields["RoundOff"], "0.50");
        assert_eq!(fields["AmountInWords"], "One Thousand Two Hundred One Rupees");
    }

    #[test]
    fn fill_replaces_known_and_keeps_unknown() {
        let mut fields = Placeholders::new();
        fields.insert("Total", "10.00".to_string());
        fields.insert("TotalTax", "1.80".to_string());

        let filled = fill_template("T={{Total}} X={{TotalTax}} U={{Unknown}} {{ Total }}", &fields);
        assert_eq!(filled, "T=10.00 X=1.80 U={{Unknown}} 10.00");
    }

    #[test]
    fn fill_leaves_unterminated_token() {
        let fields = Placeholders::new();
        assert_eq!(fill_template("Total: {{Total", &fields), "Total: {{Total");
    }
}
