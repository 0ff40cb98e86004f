//! Display formatting for currency amounts.

const CURRENCY_SYMBOL: &str = "$";

/// Group an already-rounded digit string with commas: "1234567" -> "1,234,567".
fn group_thousands(digits: &str) -> String {
    let mut with_commas = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            with_commas.push(',');
        }
        with_commas.push(c);
    }
    with_commas.chars().rev().collect()
}

/// Round to whole units and split into (is_negative, grouped digits).
fn whole_units(val: f64) -> (bool, String) {
    let rounded = format!("{:.0}", val);
    match rounded.strip_prefix('-') {
        Some(digits) => (true, group_thousands(digits)),
        None => (false, group_thousands(&rounded)),
    }
}

/// Whole-unit amount with thousands separators: 1234.5 -> "1,234"
pub fn number(val: f64) -> String {
    match whole_units(val) {
        (true, digits) => format!("-{digits}"),
        (false, digits) => digits,
    }
}

/// Currency amount with no decimals: $1,234 (negative: $-1,234)
pub fn money(val: f64) -> String {
    format!("{CURRENCY_SYMBOL}{}", number(val))
}

/// Always-signed amount for deltas: +472,802 / -1,234
pub fn signed_number(val: f64) -> String {
    match whole_units(val) {
        (true, digits) => format!("-{digits}"),
        (false, digits) => format!("+{digits}"),
    }
}
