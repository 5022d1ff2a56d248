//! FILENAME: core/engine/src/number_format.rs
//! PURPOSE: Number formatting utilities for displaying cell values and statistics.
//! CONTEXT: Statistics are shown with a fixed number of decimals, raw values in
//! general format, and Excel serial dates as ISO timestamps.

/// How a number should be rendered as text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NumberFormat {
    /// Shortest readable form, integers without a decimal point.
    General,
    /// Fixed decimal places, no thousands separator.
    Decimal { decimal_places: u8 },
    /// Excel serial date rendered as `YYYY-MM-DD HH:MM:SS`.
    DateTime,
}

/// Format a number according to the specified format.
pub fn format_number(value: f64, format: NumberFormat) -> String {
    match format {
        NumberFormat::General => format_general(value),
        NumberFormat::Decimal { decimal_places } => format_decimal(value, decimal_places),
        NumberFormat::DateTime => format_date_time(value),
    }
}

/// Format a number in general format (auto-detect best representation).
fn format_general(value: f64) -> String {
    if value.is_nan() {
        return "NaN".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "inf" } else { "-inf" }.to_string();
    }
    if value == 0.0 {
        return "0".to_string();
    }

    let abs_value = value.abs();

    // Use scientific notation for very large or very small numbers
    if abs_value >= 1e15 || abs_value < 1e-4 {
        let formatted = format!("{:.5e}", value);
        let (mantissa, exponent) = formatted.split_once('e').unwrap_or((&formatted, "0"));
        let mantissa = mantissa.trim_end_matches('0').trim_end_matches('.');
        return format!("{}e{}", mantissa, exponent);
    }

    if value.fract() == 0.0 {
        return format!("{:.0}", value);
    }

    // Up to 10 decimals, trailing zeros trimmed
    let formatted = format!("{:.10}", value);
    formatted
        .trim_end_matches('0')
        .trim_end_matches('.')
        .to_string()
}

/// Format a number with a fixed number of decimal places.
fn format_decimal(value: f64, decimal_places: u8) -> String {
    format!("{:.prec$}", value, prec = decimal_places as usize)
}

/// Format an Excel serial date number.
/// Serial numbers below 1 carry only a time of day.
fn format_date_time(value: f64) -> String {
    let days = value.floor() as i64;
    let time = format_time_of_day(value - value.floor());

    if days < 1 {
        return time;
    }

    // Excel treats 1900 as a leap year: serial 60 is the phantom Feb 29, 1900.
    let adjusted_days = if days >= 60 { days - 1 } else { days };

    match civil_date(adjusted_days) {
        Some((year, month, day)) => format!("{:04}-{:02}-{:02} {}", year, month, day, time),
        None => format_general(value),
    }
}

fn format_time_of_day(fraction: f64) -> String {
    let total_seconds = ((fraction * 86400.0).round() as u32).min(86399);
    let hours = total_seconds / 3600;
    let minutes = (total_seconds % 3600) / 60;
    let seconds = total_seconds % 60;
    format!("{:02}:{:02}:{:02}", hours, minutes, seconds)
}

/// Returns (year, month, day) for a given number of days since Dec 31, 1899.
fn civil_date(days: i64) -> Option<(i32, u32, u32)> {
    if days < 1 {
        return None;
    }

    let mut remaining = days;
    let mut year = 1900i32;

    loop {
        let days_in_year = if is_leap_year(year) { 366 } else { 365 };
        if remaining <= days_in_year {
            break;
        }
        remaining -= days_in_year;
        year += 1;
    }

    let months_days: [i64; 12] = if is_leap_year(year) {
        [31, 29, 31, 30, 31, 30, 31, 31, 30, 31, 30, 31]
    } else {
        [31, 28, 31, 30, 31, 30, 31, 31, 30, 31, 30, 31]
    };

    let mut month = 1u32;
    for &days_in_month in &months_days {
        if remaining <= days_in_month {
            return Some((year, month, remaining as u32));
        }
        remaining -= days_in_month;
        month += 1;
    }

    None
}

fn is_leap_year(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || (year % 400 == 0)
}
