// Display formatting for prices, volumes and percentages

/// Fixed-point with `,` between thousands, e.g. `1234567.891, 2` -> `1,234,567.89`.
pub fn group_thousands(value: f64, decimals: usize) -> String {
    if !value.is_finite() {
        return value.to_string();
    }

    let formatted = format!("{:.*}", decimals, value.abs());
    let (int_part, frac_part) = match formatted.split_once('.') {
        Some((int_part, frac_part)) => (int_part, Some(frac_part)),
        None => (formatted.as_str(), None),
    };

    let mut grouped = String::with_capacity(formatted.len() + int_part.len() / 3 + 1);
    if value < 0.0 {
        grouped.push('-');
    }
    for (i, digit) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }
    if let Some(frac_part) = frac_part {
        grouped.push('.');
        grouped.push_str(frac_part);
    }
    grouped
}

/// Sub-dollar prices keep 8 decimals so cents don't swallow them.
pub fn format_price(price: f64) -> String {
    if price >= 1.0 {
        format!("${}", group_thousands(price, 2))
    } else {
        format!("${:.8}", price)
    }
}

pub fn format_whole_dollars(value: f64) -> String {
    format!("${}", group_thousands(value, 0))
}

/// A change of exactly 0 also prints `N/A`, same as a missing one.
pub fn format_change(change: Option<f64>) -> String {
    match change {
        Some(pct) if pct != 0.0 => format!("{:.2}%", pct),
        _ => "N/A".to_string(),
    }
}
