//! Thousands separators for amount inputs.
//!
//! Amounts are shown grouped (`150/000`) and always sent without grouping.

pub const THOUSANDS_SEPARATOR: char = '/';

/// Remove grouping from user input. Commas are accepted as well since they
/// are what people paste from elsewhere.
pub fn strip_separators(input: &str) -> String {
    input
        .trim()
        .chars()
        .filter(|c| *c != THOUSANDS_SEPARATOR && *c != ',')
        .collect()
}

/// Keep only ASCII digits. Used for inputs that can only hold whole amounts.
pub fn digits_only(input: &str) -> String {
    input.chars().filter(char::is_ascii_digit).collect()
}

/// Strip grouping, then keep digits and the first decimal point. Used for
/// amounts and sizes, which the service stores as decimal strings.
pub fn decimal_only(input: &str) -> String {
    let mut seen_point = false;
    strip_separators(input)
        .chars()
        .filter(|c| match c {
            '.' if !seen_point => {
                seen_point = true;
                true
            }
            c => c.is_ascii_digit(),
        })
        .collect()
}

/// Group the whole part of a number in threes from the right; a fractional
/// part is kept as is. Anything that is not a plain number after stripping
/// is returned unchanged.
pub fn format_thousands(input: &str) -> String {
    let stripped = strip_separators(input);
    let (whole, fraction) = match stripped.split_once('.') {
        Some((whole, fraction)) => (whole, Some(fraction)),
        None => (stripped.as_str(), None),
    };
    let is_digits = |s: &str| s.chars().all(|c| c.is_ascii_digit());
    if whole.is_empty() || !is_digits(whole) || !fraction.is_none_or(is_digits)
    {
        return input.to_string();
    }

    let len = whole.len();
    let mut out = String::with_capacity(stripped.len() + len / 3);
    for (i, c) in whole.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(THOUSANDS_SEPARATOR);
        }
        out.push(c);
    }
    if let Some(fraction) = fraction {
        out.push('.');
        out.push_str(fraction);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn groups_in_threes() {
        assert_eq!(format_thousands("150000"), "150/000");
        assert_eq!(format_thousands("1500000"), "1/500/000");
        assert_eq!(format_thousands("999"), "999");
        assert_eq!(format_thousands("1000"), "1/000");
        assert_eq!(format_thousands(""), "");
    }

    #[test]
    fn regrouping_is_stable() {
        assert_eq!(format_thousands("1/50/000"), "150/000");
        assert_eq!(format_thousands("150,000"), "150/000");
    }

    #[test]
    fn leaves_non_numeric_alone() {
        assert_eq!(format_thousands("abc"), "abc");
        assert_eq!(format_thousands(".5"), ".5");
        assert_eq!(format_thousands("1.2.3"), "1.2.3");
    }

    #[test]
    fn fraction_is_kept_after_grouping() {
        assert_eq!(format_thousands("12.5"), "12.5");
        assert_eq!(format_thousands("1500.75"), "1/500.75");
        assert_eq!(format_thousands("1/500.75"), "1/500.75");
    }

    #[test]
    fn decimal_input_keeps_one_point() {
        assert_eq!(decimal_only("250.5"), "250.5");
        assert_eq!(decimal_only(" 1/500.25 "), "1500.25");
        assert_eq!(decimal_only("1.2.3"), "1.23");
        assert_eq!(decimal_only("12a0"), "120");
    }

    #[test]
    fn strips_both_separators() {
        assert_eq!(strip_separators(" 1/500,000 "), "1500000");
        assert_eq!(digits_only("2a0b0"), "200");
    }
}
