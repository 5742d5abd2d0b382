use rust_decimal::Decimal;

/// Formats a money amount for console output, e.g. `$1234.50` or `$-100.00`.
pub fn format_money(amount: Decimal) -> String {
    format!("${:.2}", amount.round_dp(2))
}
