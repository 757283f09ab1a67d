//! Rounding and formatting for screens and printouts. Stored values keep
//! full precision.

/// Round to cents, half away from zero
pub fn round_currency(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Argentine display format with two decimals, e.g. `1.234,56`
pub fn format_price(value: f64) -> String {
    let cents = (value * 100.0).round();
    let negative = cents < 0.0;
    let cents = cents.abs() as u64;

    let digits = (cents / 100).to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(ch);
    }

    format!("{}{},{:02}", if negative { "-" } else { "" }, grouped, cents % 100)
}
