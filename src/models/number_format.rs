/// Render an amount the way the invoice page shows it: whole numbers
/// without decimals, otherwise at most 2 decimals with trailing zeros dropped.
///
/// ```
/// use payline::models::format_number;
///
/// assert_eq!(format_number(12.0), "12");
/// assert_eq!(format_number(12.5), "12.5");
/// assert_eq!(format_number(3.14159), "3.14");
/// ```
pub fn format_number(value: f64) -> String {
    if value == 0.0 {
        return "0".to_string();
    }
    if value.fract() == 0.0 {
        return format!("{value}");
    }

    // ties go away from zero, `{:.2}` alone would round them to even
    let rounded = (value * 100.0).round() / 100.0;
    let fixed = format!("{rounded:.2}");
    let trimmed = fixed.trim_end_matches('0').trim_end_matches('.');
    if trimmed == "-0" {
        "0".to_string()
    } else {
        trimmed.to_string()
    }
}
