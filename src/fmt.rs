/// Format an amount with thousands separators and a currency code: 1,234.56 USD
pub fn format_money(amount: f64, currency: &str) -> String {
    let negative = amount < 0.0;
    let cents = format!("{:.2}", amount.abs());
    let (int_part, dec_part) = cents.split_once('.').unwrap_or((cents.as_str(), "00"));

    let mut grouped = String::new();
    for (i, c) in int_part.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    let grouped: String = grouped.chars().rev().collect();

    // "-0.00" reads badly once rounding has eaten the value
    if negative && cents != "0.00" {
        format!("-{grouped}.{dec_part} {currency}")
    } else {
        format!("{grouped}.{dec_part} {currency}")
    }
}
