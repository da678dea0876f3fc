//! 數值格式化與防禦性轉換（僅用於匯出邊界）

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use std::str::FromStr;

/// 顯示標籤 `[代碼] 名稱`，缺漏段落為空字串
pub fn display_label(code: Option<&str>, name: Option<&str>) -> String {
    format!("[{}] {}", code.unwrap_or(""), name.unwrap_or(""))
}

/// 數值 → 逗號小數字串，固定兩位小數（`123.4` → `"123,40"`）
pub fn format_decimal(value: Decimal) -> String {
    let mut rounded = value.round_dp_with_strategy(2, RoundingStrategy::MidpointNearestEven);
    rounded.rescale(2);
    rounded.to_string().replace('.', ",")
}

/// 貨幣顯示 `R$ 12,50`（不含千分位）
pub fn format_currency(value: Decimal) -> String {
    format!("R$ {}", format_decimal(value))
}

/// 分鐘 → `HH:MM:SS`
///
/// 先四捨五入到整秒；負值視為零，缺漏值為 `00:00:00`，超出範圍時取 `u64::MAX` 秒。
pub fn format_duration(minutes: Option<Decimal>) -> String {
    let minutes = minutes
        .filter(|m| *m > Decimal::ZERO)
        .unwrap_or(Decimal::ZERO);

    let total_seconds = minutes
        .checked_mul(Decimal::from(60))
        .and_then(|seconds| seconds.round().to_u64())
        .unwrap_or(u64::MAX);

    let hours = total_seconds / 3600;
    let remaining = total_seconds % 3600;
    format!("{:02}:{:02}:{:02}", hours, remaining / 60, remaining % 60)
}

/// 字串 → 數值，接受逗號小數；任何解析失敗都回傳零
pub fn parse_decimal_lenient(value: &str) -> Decimal {
    let cleaned = value.trim().replace(',', ".");
    if cleaned.is_empty() {
        return Decimal::ZERO;
    }

    Decimal::from_str(&cleaned)
        .or_else(|_| Decimal::from_scientific(&cleaned))
        .unwrap_or(Decimal::ZERO)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[rstest]
    #[case("123.4", "123,40")]
    #[case("0", "0,00")]
    #[case("0.00", "0,00")]
    #[case("1.005", "1,00")]
    #[case("2.675", "2,68")]
    #[case("-3.5", "-3,50")]
    #[case("1000000", "1000000,00")]
    fn test_format_decimal(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(format_decimal(dec(input)), expected);
    }

    #[rstest]
    #[case("123,40", "123.4")]
    #[case(" 7,5 ", "7.5")]
    #[case("42", "42")]
    #[case("1e3", "1000")]
    #[case("", "0")]
    #[case("abc", "0")]
    #[case("1.234,56", "0")]
    fn test_parse_decimal_lenient(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(parse_decimal_lenient(input), dec(expected));
    }

    #[test]
    fn test_format_parse_round_trip() {
        let parsed = parse_decimal_lenient("123,40");
        assert_eq!(parsed, dec("123.4"));
        assert_eq!(format_decimal(parsed), "123,40");
    }

    #[rstest]
    #[case(Some("90"), "01:30:00")]
    #[case(Some("-5"), "00:00:00")]
    #[case(None, "00:00:00")]
    #[case(Some("0.5"), "00:00:30")]
    #[case(Some("1.0083"), "00:01:00")]
    #[case(Some("1500"), "25:00:00")]
    fn test_format_duration(#[case] minutes: Option<&str>, #[case] expected: &str) {
        assert_eq!(format_duration(minutes.map(dec)), expected);
    }

    #[rstest]
    #[case(Decimal::MAX)]
    #[case(dec("100000000000000000000"))]
    fn test_format_duration_saturates(#[case] minutes: Decimal) {
        assert_eq!(format_duration(Some(minutes)), "5124095576030431:00:15");
    }

    #[test]
    fn test_display_label() {
        assert_eq!(display_label(Some("A1"), Some("Frame")), "[A1] Frame");
        assert_eq!(display_label(None, Some("Frame")), "[] Frame");
        assert_eq!(display_label(None, None), "[] ");
    }

    #[test]
    fn test_format_currency() {
        assert_eq!(format_currency(dec("12.5")), "R$ 12,50");
    }
}
