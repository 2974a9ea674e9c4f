// src/core/sanitize.rs

/// Strip currency, percent, thousands separators and newlines from a
/// rendered value, then trim. Idempotent on already-clean text.
///
/// `"$1,234.56"` → `"1234.56"`, `"12.3%"` → `"12.3"`.
pub fn clean_number(text: &str) -> String {
    let out: String = text
        .chars()
        .filter(|c| !matches!(c, '$' | ',' | '%' | '\n'))
        .collect();
    out.trim().to_string()
}

/// Numeric value of a rendered field, if it has one.
pub fn normalized(text: &str) -> Option<f64> {
    clean_number(text).parse::<f64>().ok()
}

/// Text before the first newline (name cells render "Bitcoin\nBTC").
pub fn first_line(s: &str) -> &str {
    s.split('\n').next().unwrap_or("")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cleans_currency_and_percent() {
        assert_eq!(clean_number("$1,234.56"), "1234.56");
        assert_eq!(clean_number("12.3%"), "12.3");
        assert_eq!(clean_number(" -0.42%\n"), "-0.42");
    }

    #[test]
    fn clean_is_idempotent() {
        let once = clean_number("$98,765.4");
        assert_eq!(clean_number(&once), once);
        assert_eq!(clean_number("42.0"), "42.0");
    }

    #[test]
    fn normalized_parses_or_none() {
        assert_eq!(normalized("$1,234.56"), Some(1234.56));
        assert_eq!(normalized("-8%"), Some(-8.0));
        assert_eq!(normalized("bogus"), None);
        assert_eq!(normalized(""), None);
    }

    #[test]
    fn first_line_takes_name_part() {
        assert_eq!(first_line("Bitcoin\nBTC"), "Bitcoin");
        assert_eq!(first_line("Ethereum"), "Ethereum");
        assert_eq!(first_line(""), "");
    }
}
