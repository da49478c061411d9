//! Money conversion helpers
//!
//! All internal amounts are integer cents; conversion to the major
//! currency unit happens only at the display edge.

/// Convert a major-unit amount to cents (rounded)
///
/// # Examples
///
/// ```
/// use restopos_core::utils::money::major_to_cents;
///
/// assert_eq!(major_to_cents(12.50), 1250);
/// assert_eq!(major_to_cents(0.01), 1);
/// assert_eq!(major_to_cents(100.00), 10000);
/// ```
pub fn major_to_cents(amount: f64) -> i64 {
    (amount * 100.0).round() as i64
}

/// Convert cents to the major currency unit
///
/// # Examples
///
/// ```
/// use restopos_core::utils::money::cents_to_major;
///
/// assert!((cents_to_major(1250) - 12.50).abs() < 0.001);
/// assert!((cents_to_major(1) - 0.01).abs() < 0.001);
/// ```
pub fn cents_to_major(cents: i64) -> f64 {
    cents as f64 / 100.0
}

/// Format cents as a currency string
///
/// # Examples
///
/// ```
/// use restopos_core::utils::money::format_cents;
///
/// assert_eq!(format_cents(1250, "$"), "$12.50");
/// assert_eq!(format_cents(10000, "€"), "€100.00");
/// ```
pub fn format_cents(cents: i64, symbol: &str) -> String {
    format!("{}{:.2}", symbol, cents_to_major(cents))
}
