//! Storefront money formatting
//!
//! The shop's money-format template carries one `{{ ... }}` placeholder.
//! The placeholder set is closed, so it dispatches through an enum instead
//! of matching raw strings at every call site.

use rust_decimal::prelude::*;

/// Default template when the shop setting is absent
pub const DEFAULT_MONEY_FORMAT: &str = "${{amount}}";

/// Recognized placeholders in a shop money-format template
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoneyPlaceholder {
    Amount,
    AmountNoDecimals,
    AmountWithCommaSeparator,
    AmountNoDecimalsWithCommaSeparator,
}

impl MoneyPlaceholder {
    fn parse(name: &str) -> Option<Self> {
        match name {
            "amount" => Some(Self::Amount),
            "amount_no_decimals" => Some(Self::AmountNoDecimals),
            "amount_with_comma_separator" => Some(Self::AmountWithCommaSeparator),
            "amount_no_decimals_with_comma_separator" => {
                Some(Self::AmountNoDecimalsWithCommaSeparator)
            }
            _ => None,
        }
    }

    fn precision(self) -> u32 {
        match self {
            Self::Amount | Self::AmountWithCommaSeparator => 2,
            Self::AmountNoDecimals | Self::AmountNoDecimalsWithCommaSeparator => 0,
        }
    }

    fn thousands(self) -> char {
        match self {
            Self::Amount | Self::AmountNoDecimals => ',',
            Self::AmountWithCommaSeparator | Self::AmountNoDecimalsWithCommaSeparator => '.',
        }
    }

    fn decimal(self) -> char {
        match self {
            Self::Amount | Self::AmountNoDecimals => '.',
            Self::AmountWithCommaSeparator | Self::AmountNoDecimalsWithCommaSeparator => ',',
        }
    }
}

/// Render a cent amount through a money-format template.
///
/// Unknown placeholders fall back to the plain `amount` rules; a template
/// without a placeholder is returned untouched.
pub fn format_money(cents: i64, template: Option<&str>) -> String {
    let template = template.unwrap_or(DEFAULT_MONEY_FORMAT);
    let Some(start) = template.find("{{") else {
        return template.to_string();
    };
    let Some(end_rel) = template[start..].find("}}") else {
        return template.to_string();
    };
    let end = start + end_rel + 2;
    let name = template[start + 2..end - 2].trim();
    let placeholder = MoneyPlaceholder::parse(name).unwrap_or(MoneyPlaceholder::Amount);
    format!(
        "{}{}{}",
        &template[..start],
        format_with_delimiters(cents, placeholder),
        &template[end..]
    )
}

fn format_with_delimiters(cents: i64, placeholder: MoneyPlaceholder) -> String {
    let amount = Decimal::new(cents, 2)
        .round_dp_with_strategy(placeholder.precision(), RoundingStrategy::MidpointAwayFromZero);
    let text = amount.abs().to_string();
    let (whole, fraction) = match text.split_once('.') {
        Some((whole, fraction)) => (whole.to_string(), Some(fraction.to_string())),
        None => (text, None),
    };

    let mut grouped = String::new();
    for (index, digit) in whole.chars().enumerate() {
        if index > 0 && (whole.len() - index) % 3 == 0 {
            grouped.push(placeholder.thousands());
        }
        grouped.push(digit);
    }

    let mut out = String::new();
    if amount.is_sign_negative() && !amount.is_zero() {
        out.push('-');
    }
    out.push_str(&grouped);
    if let Some(fraction) = fraction {
        out.push(placeholder.decimal());
        out.push_str(&fraction);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_format() {
        assert_eq!(format_money(123_456, None), "$1,234.56");
        assert_eq!(format_money(0, None), "$0.00");
        assert_eq!(format_money(99, None), "$0.99");
    }

    #[test]
    fn test_no_decimals_rounds_half_up() {
        assert_eq!(format_money(123_456, Some("${{amount_no_decimals}}")), "$1,235");
        assert_eq!(format_money(149, Some("${{amount_no_decimals}}")), "$1");
        assert_eq!(format_money(150, Some("${{amount_no_decimals}}")), "$2");
    }

    #[test]
    fn test_comma_separator_formats() {
        assert_eq!(
            format_money(1_234_567, Some("{{amount_with_comma_separator}} AUD")),
            "12.345,67 AUD"
        );
        assert_eq!(
            format_money(1_234_567, Some("{{amount_no_decimals_with_comma_separator}}")),
            "12.346"
        );
    }

    #[test]
    fn test_placeholder_whitespace_and_surrounding_text() {
        assert_eq!(format_money(6_000, Some("from ${{ amount }} per week")), "from $60.00 per week");
    }

    #[test]
    fn test_unknown_placeholder_falls_back_to_amount() {
        assert_eq!(format_money(500, Some("${{amount_in_words}}")), "$5.00");
    }

    #[test]
    fn test_template_without_placeholder_is_untouched() {
        assert_eq!(format_money(500, Some("free")), "free");
    }

    #[test]
    fn test_large_and_negative_amounts() {
        assert_eq!(format_money(123_456_789, None), "$1,234,567.89");
        assert_eq!(format_money(-123_456, None), "$-1,234.56");
    }
}
