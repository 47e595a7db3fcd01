//! KPI text formatting.

/// Placeholder for a statistic that has no value (empty selection).
pub const NO_VALUE: &str = "—";

/// Group digits in threes: `1234567` → `"1,234,567"`.
pub fn with_thousands(n: i64) -> String {
    let digits = n.unsigned_abs().to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if n < 0 {
        out.push('-');
    }
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

pub fn count(n: usize) -> String {
    with_thousands(i64::try_from(n).unwrap_or(i64::MAX))
}

/// Whole dollars with separators, e.g. `"$101,500"`.
pub fn money(value: Option<f64>) -> String {
    match value {
        Some(v) => format!("${}", with_thousands(v.round() as i64)),
        None => NO_VALUE.to_string(),
    }
}

/// One-decimal percentage, e.g. `"62.5%"`.
pub fn share(value: Option<f64>) -> String {
    match value {
        Some(v) => format!("{v:.1}%"),
        None => NO_VALUE.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn thousands_grouping() {
        assert_eq!(with_thousands(0), "0");
        assert_eq!(with_thousands(999), "999");
        assert_eq!(with_thousands(1000), "1,000");
        assert_eq!(with_thousands(1234567), "1,234,567");
        assert_eq!(with_thousands(-45000), "-45,000");
        assert_eq!(count(2500), "2,500");
    }

    #[test]
    fn money_and_share_use_placeholder_when_missing() {
        assert_eq!(money(Some(100000.0)), "$100,000");
        assert_eq!(money(Some(79833.6)), "$79,834");
        assert_eq!(money(None), NO_VALUE);
        assert_eq!(share(Some(50.0)), "50.0%");
        assert_eq!(share(Some(33.333)), "33.3%");
        assert_eq!(share(None), NO_VALUE);
    }
}
