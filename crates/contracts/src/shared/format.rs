//! Форматирование денежных сумм и счётчиков для метрик дашборда

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

/// Resolved currency display rules
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurrencyFormat {
    /// ISO 4217 code, e.g. "BRL"
    pub code: String,
    pub symbol: String,
    pub thousands_separator: char,
    pub decimal_separator: char,
    /// Space between symbol and amount ("R$ 10,00" vs "$10.00")
    pub symbol_spacing: bool,
}

impl CurrencyFormat {
    /// Build display rules from a currency code and a locale name such as
    /// `pt_BR`. Unknown locales use `en_US` separators, unknown codes are
    /// printed as-is in place of a symbol.
    pub fn resolve(currency_code: &str, locale: &str) -> Self {
        let code = currency_code.trim().to_uppercase();
        let (thousands_separator, decimal_separator, locale_spacing) =
            match locale.replace('-', "_").as_str() {
                "pt_BR" | "es_CO" | "es_ES" | "de_DE" | "id_ID" => ('.', ',', true),
                "ru_RU" | "fr_FR" => ('\u{00a0}', ',', true),
                _ => (',', '.', false),
            };

        let known_symbol = match code.as_str() {
            "BRL" => Some("R$"),
            "USD" => Some("$"),
            "AUD" => Some("AU$"),
            "EUR" => Some("€"),
            "GBP" => Some("£"),
            "IDR" => Some("Rp"),
            "RUB" => Some("₽"),
            _ => None,
        };

        let (symbol, symbol_spacing) = match known_symbol {
            Some(symbol) => (symbol.to_string(), locale_spacing),
            None => (code.clone(), true),
        };

        Self {
            code,
            symbol,
            thousands_separator,
            decimal_separator,
            symbol_spacing,
        }
    }

    pub fn brazilian_real() -> Self {
        Self::resolve("BRL", "pt_BR")
    }

    /// Форматирует сумму: два знака после запятой, разделители тысяч
    pub fn format(&self, amount: Decimal) -> String {
        let mut rounded = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
        let negative = rounded.is_sign_negative() && !rounded.is_zero();
        rounded = rounded.abs();
        rounded.rescale(2);

        let text = rounded.to_string();
        let (int_part, frac_part) = text.split_once('.').unwrap_or((text.as_str(), "00"));
        let number = format!(
            "{}{}{}",
            group_digits(int_part, self.thousands_separator),
            self.decimal_separator,
            frac_part
        );

        let sign = if negative { "-" } else { "" };
        let spacing = if self.symbol_spacing { " " } else { "" };
        format!("{}{}{}{}", sign, self.symbol, spacing, number)
    }

    /// Целое число с разделителями тысяч в стиле локали
    pub fn format_count(&self, n: u64) -> String {
        group_digits(&n.to_string(), self.thousands_separator)
    }
}

impl Default for CurrencyFormat {
    fn default() -> Self {
        Self::brazilian_real()
    }
}

/// Вставляет разделитель каждые 3 цифры с конца
pub fn group_digits(digits: &str, separator: char) -> String {
    let mut result = String::new();
    for (i, ch) in digits.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            result.push(separator);
        }
        result.push(ch);
    }
    result.chars().rev().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_group_digits() {
        assert_eq!(group_digits("0", '.'), "0");
        assert_eq!(group_digits("999", '.'), "999");
        assert_eq!(group_digits("1000", '.'), "1.000");
        assert_eq!(group_digits("1234567890", ','), "1,234,567,890");
    }

    #[test]
    fn test_brazilian_real() {
        let fmt = CurrencyFormat::brazilian_real();
        assert_eq!(fmt.format(dec("1234567.891")), "R$ 1.234.567,89");
        assert_eq!(fmt.format(dec("25")), "R$ 25,00");
        assert_eq!(fmt.format(Decimal::ZERO), "R$ 0,00");
        assert_eq!(fmt.format(dec("-1500.5")), "-R$ 1.500,50");
    }

    #[test]
    fn test_us_dollar_rounds_half_away_from_zero() {
        let fmt = CurrencyFormat::resolve("usd", "en-US");
        assert_eq!(fmt.format(dec("1234.565")), "$1,234.57");
        assert_eq!(fmt.format(dec("0.005")), "$0.01");
    }

    #[test]
    fn test_unknown_currency_uses_code() {
        let fmt = CurrencyFormat::resolve("XYZ", "xx_XX");
        assert_eq!(fmt.symbol, "XYZ");
        assert_eq!(fmt.format(dec("10")), "XYZ 10.00");
    }

    #[test]
    fn test_format_count() {
        let fmt = CurrencyFormat::brazilian_real();
        assert_eq!(fmt.format_count(99441), "99.441");
        assert_eq!(fmt.format_count(7), "7");
    }
}
