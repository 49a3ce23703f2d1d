//! Money formatting for integer minor units

/// Format an amount in cents with its currency, e.g. `$1,234.56` or `1,234.56 CHF`
pub fn format_money(cents: i64, currency: &str) -> String {
    let sign = if cents < 0 { "-" } else { "" };
    let abs = cents.unsigned_abs();
    let whole = group_thousands(abs / 100);
    let fraction = abs % 100;

    match currency_symbol(currency) {
        Some(symbol) => format!("{}{}{}.{:02}", sign, symbol, whole, fraction),
        None => format!("{}{}.{:02} {}", sign, whole, fraction, currency),
    }
}

fn currency_symbol(currency: &str) -> Option<&'static str> {
    match currency {
        "USD" => Some("$"),
        "EUR" => Some("€"),
        "GBP" => Some("£"),
        "JPY" => Some("¥"),
        _ => None,
    }
}

fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_money() {
        assert_eq!(format_money(0, "USD"), "$0.00");
        assert_eq!(format_money(123456, "USD"), "$1,234.56");
        assert_eq!(format_money(-990, "EUR"), "-€9.90");
        assert_eq!(format_money(100_000_000, "CHF"), "1,000,000.00 CHF");
    }
}
