//! Display formatting
//!
//! en-US number formatting for cards, tooltips and table cells. Only the
//! subset of locale behavior the dashboard uses is implemented: comma digit
//! grouping, a leading minus sign and trimmed fraction digits.

/// Format an amount in US dollars with up to two fraction digits
///
/// `1847520.0` becomes `"$1,847,520"`, `12.5` becomes `"$12.5"`.
pub fn format_currency(value: f64) -> String {
    if !value.is_finite() {
        return "N/A".to_string();
    }
    let (non_zero, digits) = format_decimal(value.abs(), 2);
    format!("{}${}", sign(non_zero, value), digits)
}

/// Format a number with digit grouping and up to three fraction digits
pub fn format_number(value: f64) -> String {
    if !value.is_finite() {
        return "N/A".to_string();
    }
    let (non_zero, digits) = format_decimal(value.abs(), 3);
    format!("{}{}", sign(non_zero, value), digits)
}

/// Format a percentage with exactly two decimals (`3.87` becomes `"3.87%"`)
pub fn format_percentage(value: f64) -> String {
    format!("{value:.2}%")
}

/// Shorten `text` to `max_chars` characters, appending `...` when cut
pub fn truncate_text(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((cut, _)) => format!("{}...", &text[..cut]),
        None => text.to_string(),
    }
}

/// Group and trim a non-negative value
///
/// Returns whether the rounded value is non-zero along with the digits, so
/// callers do not print a sign in front of a value that rounds to zero.
fn format_decimal(value: f64, max_fraction_digits: usize) -> (bool, String) {
    let fixed = format!("{value:.max_fraction_digits$}");
    let (int_part, frac_part) = fixed.split_once('.').unwrap_or((fixed.as_str(), ""));
    let frac_part = frac_part.trim_end_matches('0');

    let non_zero = int_part.chars().chain(frac_part.chars()).any(|c| c != '0');

    let mut out = group_thousands(int_part);
    if !frac_part.is_empty() {
        out.push('.');
        out.push_str(frac_part);
    }
    (non_zero, out)
}

fn sign(non_zero: bool, value: f64) -> &'static str {
    if non_zero && value < 0.0 {
        "-"
    } else {
        ""
    }
}

fn group_thousands(digits: &str) -> String {
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    grouped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_currency() {
        assert_eq!(format_currency(1_847_520.0), "$1,847,520");
        assert_eq!(format_currency(144.0), "$144");
        assert_eq!(format_currency(12.5), "$12.5");
        assert_eq!(format_currency(1234.567), "$1,234.57");
        assert_eq!(format_currency(-3.25), "-$3.25");
        assert_eq!(format_currency(0.0), "$0");
        assert_eq!(format_currency(-0.001), "$0");
        assert_eq!(format_currency(f64::NAN), "N/A");
    }

    #[test]
    fn test_number() {
        assert_eq!(format_number(12_847.0), "12,847");
        assert_eq!(format_number(100.0), "100");
        assert_eq!(format_number(1_000.0), "1,000");
        assert_eq!(format_number(3.14159), "3.142");
        assert_eq!(format_number(-47_892.5), "-47,892.5");
    }

    #[test]
    fn test_percentage() {
        assert_eq!(format_percentage(3.87), "3.87%");
        assert_eq!(format_percentage(35.0), "35.00%");
        assert_eq!(format_percentage(-8.333), "-8.33%");
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate_text("Sony WH-1000XM5 Headphones", 8), "Sony WH-...");
        assert_eq!(truncate_text("Short", 5), "Short");
        assert_eq!(truncate_text("Café crème", 4), "Café...");
        assert_eq!(truncate_text("", 0), "");
    }
}
