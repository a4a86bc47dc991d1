//! Currency Formatting
//!
//! Prices arrive from the payment provider as integer minor units (centavos).
//! They are turned into display strings with decimal arithmetic only.

use rust_decimal::Decimal;

/// Locale rules for rendering a currency amount
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CurrencyFormat {
    /// Symbol placed before the amount
    pub symbol: &'static str,

    /// Separator between integer and fraction digits
    pub decimal_separator: char,

    /// Separator between thousands groups
    pub group_separator: char,

    /// Number of minor-unit digits
    pub scale: u32,
}

/// Brazilian Portuguese / Brazilian Real
pub const PT_BR_BRL: CurrencyFormat = CurrencyFormat {
    symbol: "R$",
    decimal_separator: ',',
    group_separator: '.',
    scale: 2,
};

impl CurrencyFormat {
    /// Format an amount given in minor units. A missing amount counts as zero.
    pub fn format_minor(&self, minor_units: Option<i64>) -> String {
        let amount = Decimal::new(minor_units.unwrap_or(0), self.scale);
        self.format(amount)
    }

    /// Format a decimal amount in major units
    pub fn format(&self, amount: Decimal) -> String {
        let rounded = amount.abs().round_dp(self.scale);
        let plain = format!("{:.*}", self.scale as usize, rounded);

        let (int_part, frac_part) = plain.split_once('.').unwrap_or((plain.as_str(), ""));

        let mut out = String::with_capacity(plain.len() + self.symbol.len() + 4);
        if amount.is_sign_negative() && !rounded.is_zero() {
            out.push('-');
        }
        out.push_str(self.symbol);
        out.push(' ');
        out.push_str(&group_thousands(int_part, self.group_separator));
        if !frac_part.is_empty() {
            out.push(self.decimal_separator);
            out.push_str(frac_part);
        }
        out
    }
}

/// Format minor units as BRL the way the storefront displays prices
pub fn format_brl(minor_units: Option<i64>) -> String {
    PT_BR_BRL.format_minor(minor_units)
}

fn group_thousands(digits: &str, separator: char) -> String {
    let len = digits.len();
    let mut grouped = String::with_capacity(len + len / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            grouped.push(separator);
        }
        grouped.push(ch);
    }
    grouped
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_format_minor_units() {
        assert_eq!(format_brl(Some(19990)), "R$ 199,90");
        assert_eq!(format_brl(Some(5)), "R$ 0,05");
        assert_eq!(format_brl(Some(100)), "R$ 1,00");
    }

    #[test]
    fn test_missing_amount_is_zero() {
        assert_eq!(format_brl(None), "R$ 0,00");
        assert_eq!(format_brl(Some(0)), "R$ 0,00");
    }

    #[test]
    fn test_thousands_grouping() {
        assert_eq!(format_brl(Some(123_456)), "R$ 1.234,56");
        assert_eq!(format_brl(Some(100_000_000)), "R$ 1.000.000,00");
        assert_eq!(format_brl(Some(99_999)), "R$ 999,99");
    }

    #[test]
    fn test_negative_amount() {
        assert_eq!(format_brl(Some(-500)), "-R$ 5,00");
    }

    #[test]
    fn test_format_decimal_rounds_to_scale() {
        assert_eq!(PT_BR_BRL.format(dec!(10.005)), "R$ 10,00");
        assert_eq!(PT_BR_BRL.format(dec!(2500)), "R$ 2.500,00");
    }
}
