/// Форматирует число с разделителями тысяч (запятыми)
pub fn format_number(n: usize) -> String {
    let s = n.to_string();
    let mut result = String::new();
    for (i, ch) in s.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            result.push(',');
        }
        result.push(ch);
    }
    result.chars().rev().collect()
}

/// Display text for a value that cannot be computed (e.g. CPL without conversions)
pub const NOT_COMPUTABLE: &str = "not computable";

/// Rounds to an integer and groups thousands; keeps the sign
pub fn format_amount(value: f64) -> String {
    let rounded = value.round();
    let grouped = format_number(rounded.abs() as usize);
    if rounded < 0.0 {
        format!("-{grouped}")
    } else {
        grouped
    }
}

/// Money with the currency symbol: `₩7.4M`, `₩12,900`, `₩850`
pub fn format_money(currency: &str, value: f64) -> String {
    let abs = value.abs();
    if abs >= 1_000_000.0 {
        let sign = if value < 0.0 { "-" } else { "" };
        format!("{sign}{currency}{:.1}M", abs / 1_000_000.0)
    } else {
        format_money_exact(currency, value)
    }
}

/// Money without compaction, for costs per conversion: `₩12,740`
pub fn format_money_exact(currency: &str, value: f64) -> String {
    // sign of the rounded value, so -0.4 prints as ₩0
    let rounded = value.round();
    let sign = if rounded < 0.0 { "-" } else { "" };
    format!("{sign}{currency}{}", format_amount(rounded.abs()))
}

/// Signed money delta: `+₩1,200`, `-₩160`, `₩0`
pub fn format_money_delta(currency: &str, value: f64) -> String {
    let rounded = value.round();
    let sign = if rounded > 0.0 {
        "+"
    } else if rounded < 0.0 {
        "-"
    } else {
        ""
    };
    format!("{sign}{currency}{}", format_amount(rounded.abs()))
}

/// Signed count rounded to an integer: `+9`, `-3`, `0`
pub fn format_signed(value: f64) -> String {
    let rounded = value.round();
    if rounded > 0.0 {
        format!("+{}", format_amount(rounded))
    } else if rounded < 0.0 {
        format_amount(rounded)
    } else {
        "0".to_string()
    }
}

pub fn format_percent(value: f64, decimals: usize) -> String {
    format!("{value:.decimals$}%")
}

/// `+1.6%`, `-24.0%`
pub fn format_signed_percent(value: f64, decimals: usize) -> String {
    format!("{value:+.decimals$}%")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(0), "0");
        assert_eq!(format_number(42), "42");
        assert_eq!(format_number(999), "999");
        assert_eq!(format_number(1000), "1,000");
        assert_eq!(format_number(1234), "1,234");
        assert_eq!(format_number(1234567), "1,234,567");
        assert_eq!(format_number(1234567890), "1,234,567,890");
    }

    #[test]
    fn test_format_amount() {
        assert_eq!(format_amount(12_739.6), "12,740");
        assert_eq!(format_amount(-1_500.2), "-1,500");
        assert_eq!(format_amount(0.4), "0");
    }

    #[test]
    fn test_format_money() {
        assert_eq!(format_money("₩", 7_358_550.0), "₩7.4M");
        assert_eq!(format_money("₩", 12_900.0), "₩12,900");
        assert_eq!(format_money("₩", 850.0), "₩850");
        assert_eq!(format_money_exact("₩", 12_739.5), "₩12,740");
    }

    #[test]
    fn test_format_deltas() {
        assert_eq!(format_money_delta("₩", -160.4), "-₩160");
        assert_eq!(format_money_delta("₩", 1_200.0), "+₩1,200");
        assert_eq!(format_signed(8.6), "+9");
        assert_eq!(format_signed(-3.2), "-3");
        assert_eq!(format_signed(0.2), "0");
        assert_eq!(format_percent(17.26, 1), "17.3%");
        assert_eq!(format_signed_percent(1.55, 1), "+1.6%");
        assert_eq!(format_signed_percent(-24.0, 1), "-24.0%");
    }

    #[test]
    fn test_money_rounding_to_zero_has_no_sign() {
        assert_eq!(format_money_exact("₩", -0.4), "₩0");
        assert_eq!(format_money("₩", -0.3), "₩0");
        assert_eq!(format_money_delta("₩", -0.4), "₩0");
        assert_eq!(format_money_delta("₩", 0.2), "₩0");
        assert_eq!(format_money_exact("₩", -0.6), "-₩1");
        assert_eq!(format_money_delta("₩", -0.6), "-₩1");
        assert_eq!(format_money("₩", -1_500_000.0), "-₩1.5M");
    }
}
