//! Display formatting for Brazilian Real amounts and installment labels

/// Format an amount as Brazilian Real: `R$ 1.234,56`
pub fn format_currency(value: f64) -> String {
    let total_cents = (value.abs() * 100.0).round() as u64;
    let units = total_cents / 100;
    let cents = total_cents % 100;

    let sign = if value < 0.0 && total_cents > 0 { "-" } else { "" };
    format!("{}R$ {},{:02}", sign, group_thousands(units), cents)
}

/// Installment label such as `12x`
pub fn installment_label(installments: u32) -> String {
    format!("{}x", installments)
}

/// Parse a user-typed amount.
///
/// Accepts an optional `R$` prefix, `,` or `.` as decimal separator, and `.`
/// thousands grouping when `,` is the decimal separator (`1.234,56`). A run of
/// several dots with no comma is read as grouping (`1.234.567`).
/// Returns `None` for blank or unreadable input.
pub fn parse_amount(input: &str) -> Option<f64> {
    let cleaned: String = input
        .trim()
        .trim_start_matches("R$")
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect();

    if cleaned.is_empty() {
        return None;
    }

    let digits = cleaned.strip_prefix('-').unwrap_or(&cleaned);
    if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_digit() || c == '.' || c == ',') {
        return None;
    }

    let normalized = if cleaned.contains(',') {
        cleaned.replace('.', "").replacen(',', ".", 1)
    } else if cleaned.matches('.').count() > 1 {
        cleaned.replace('.', "")
    } else {
        cleaned
    };

    normalized.parse::<f64>().ok().filter(|v| v.is_finite())
}

fn group_thousands(units: u64) -> String {
    let digits = units.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(ch);
    }
    grouped
}
