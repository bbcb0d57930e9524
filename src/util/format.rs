//! pt-BR number rendering for the UI: `R$ 1.234,56`, `17,43%`.

/// Formats a currency amount with the `R$` prefix.
pub fn format_brl(value: f64) -> String {
    format!("R$ {}", format_decimal(value, 2))
}

/// Formats a decimal fraction as percent points (`0.1743` → `17,43%`).
pub fn format_pct(fraction: f64) -> String {
    format!("{}%", format_decimal(fraction * 100.0, 2))
}

/// Fixed-point rendering with `.` thousands grouping and `,` decimal comma.
pub fn format_decimal(value: f64, decimals: usize) -> String {
    let rounded = format!("{:.*}", decimals, value.abs());
    let (int_part, frac_part) = match rounded.split_once('.') {
        Some((int_part, frac_part)) => (int_part, Some(frac_part)),
        None => (rounded.as_str(), None),
    };

    let mut grouped = String::with_capacity(rounded.len() + int_part.len() / 3);
    for (idx, ch) in int_part.chars().enumerate() {
        if idx > 0 && (int_part.len() - idx) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(ch);
    }

    if let Some(frac) = frac_part {
        grouped.push(',');
        grouped.push_str(frac);
    }

    // Sign from the rounded text, so -0.001 at two decimals prints as 0,00.
    let negative = value < 0.0 && rounded.trim_matches(|c| c == '0' || c == '.') != "";
    if negative {
        format!("-{grouped}")
    } else {
        grouped
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn groups_thousands_with_dots() {
        assert_eq!(format_brl(1234.56), "R$ 1.234,56");
        assert_eq!(format_brl(1_234_567.891), "R$ 1.234.567,89");
        assert_eq!(format_brl(999.994), "R$ 999,99");
    }

    #[test]
    fn small_amounts_skip_grouping() {
        assert_eq!(format_brl(0.0), "R$ 0,00");
        assert_eq!(format_brl(42.5), "R$ 42,50");
    }

    #[test]
    fn negatives_carry_the_sign_outside() {
        assert_eq!(format_brl(-1234.5), "R$ -1.234,50");
        assert_eq!(format_decimal(-0.0001, 2), "0,00");
    }

    #[test]
    fn percent_converts_the_fraction() {
        assert_eq!(format_pct(0.1743), "17,43%");
        assert_eq!(format_pct(0.2), "20,00%");
        assert_eq!(format_pct(1.5), "150,00%");
    }

    #[test]
    fn respects_the_requested_precision() {
        assert_eq!(format_decimal(1.211094, 5), "1,21109");
        assert_eq!(format_decimal(1234.0, 0), "1.234");
    }
}
