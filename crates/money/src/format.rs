//! Display formatting for money amounts.
//!
//! Both currencies display as whole units with thousands grouping, matching
//! how the amounts are quoted to clients. Formatting never fails; broken
//! amounts render as zero.

/// Format a home-currency (TWD) amount, e.g. `NT$2,500`.
pub fn format_home(amount: f64) -> String {
    format_with_marker(amount, "NT$")
}

/// Format a foreign-currency (KRW) amount, e.g. `₩100,000`.
pub fn format_foreign(amount: f64) -> String {
    format_with_marker(amount, "₩")
}

fn format_with_marker(amount: f64, marker: &str) -> String {
    if !amount.is_finite() {
        return format!("{marker}0");
    }
    // Round half away from zero to whole units before grouping.
    let units = amount.abs().round() as u64;
    let grouped = group_thousands(units);
    if amount < 0.0 && units > 0 {
        format!("-{marker}{grouped}")
    } else {
        format!("{marker}{grouped}")
    }
}

fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}
