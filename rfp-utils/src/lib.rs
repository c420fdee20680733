//! Shared utility functions for RFP crates.

/// Date utility functions
pub mod dates {
    use chrono::NaiveDate;

    /// Date format used in chart data and CSV input: "YYYY-MM-DD"
    pub const DATE_FORMAT: &str = "%Y-%m-%d";

    /// Format a NaiveDate as "YYYY-MM-DD"
    pub fn format_date(date: &NaiveDate) -> String {
        date.format(DATE_FORMAT).to_string()
    }

    /// Parse a date string in "YYYY-MM-DD" format.
    ///
    /// A trailing time component ("2024-01-05T00:00:00", "2024-01-05 00:00")
    /// is ignored, since crawl dates are sometimes exported as timestamps.
    pub fn parse_date(s: &str) -> anyhow::Result<NaiveDate> {
        let s = s.trim();
        let day = s.split(['T', ' ']).next().unwrap_or(s);
        Ok(NaiveDate::parse_from_str(day, DATE_FORMAT)?)
    }

    /// Format a date as a long-form calendar date, e.g. "January 5, 2024".
    pub fn format_long_date(date: &NaiveDate) -> String {
        date.format("%B %-d, %Y").to_string()
    }

    /// Long-form rendering of a "YYYY-MM-DD" string. Unparseable input is
    /// returned unchanged.
    pub fn long_date_from_str(s: &str) -> String {
        match parse_date(s) {
            Ok(date) => format_long_date(&date),
            Err(_) => s.to_string(),
        }
    }

    /// Number of whole days from `start` to `end` (negative if `end` is earlier).
    pub fn days_between(start: &NaiveDate, end: &NaiveDate) -> i64 {
        (*end - *start).num_days()
    }

}

/// Display formatting for currency, counts and percentages.
pub mod format {
    /// Format a value already expressed in trillions, e.g. `12.34` -> "$12.3T".
    pub fn format_trillions(value: f64) -> String {
        format!("{}T", format_currency(value, 1))
    }

    /// Format a currency amount with a fixed precision, e.g. "$5.2".
    pub fn format_currency(value: f64, precision: usize) -> String {
        if value < 0.0 {
            format!("-${:.*}", precision, value.abs())
        } else {
            format!("${:.*}", precision, value)
        }
    }

    /// Format a number with thousands separators, e.g. `2756.0` -> "2,756".
    pub fn format_number(value: f64, precision: usize) -> String {
        let rendered = format!("{:.*}", precision, value.abs());
        let (int_part, frac_part) = match rendered.split_once('.') {
            Some((i, f)) => (i, Some(f)),
            None => (rendered.as_str(), None),
        };

        let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
        for (i, ch) in int_part.chars().enumerate() {
            if i > 0 && (int_part.len() - i) % 3 == 0 {
                grouped.push(',');
            }
            grouped.push(ch);
        }

        let negative = value < 0.0 && rendered.chars().any(|c| c.is_ascii_digit() && c != '0');
        let sign = if negative { "-" } else { "" };
        match frac_part {
            Some(frac) => format!("{sign}{grouped}.{frac}"),
            None => format!("{sign}{grouped}"),
        }
    }

    /// Format a percentage with an explicit sign, e.g. "+28.4%".
    pub fn format_percentage(value: f64, precision: usize) -> String {
        format!("{:+.*}%", precision, value)
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        #[test]
        fn test_format_trillions() {
            assert_eq!(format_trillions(12.34), "$12.3T");
            assert_eq!(format_trillions(0.0), "$0.0T");
            assert_eq!(format_trillions(9.96), "$10.0T");
        }

        #[test]
        fn test_format_currency() {
            assert_eq!(format_currency(5.25, 2), "$5.25");
            assert_eq!(format_currency(-1.5, 1), "-$1.5");
        }

        #[test]
        fn test_format_number() {
            assert_eq!(format_number(2756.0, 0), "2,756");
            assert_eq!(format_number(1234567.891, 1), "1,234,567.9");
            assert_eq!(format_number(999.0, 0), "999");
            assert_eq!(format_number(-4200.0, 0), "-4,200");
            assert_eq!(format_number(-0.01, 0), "0");
        }

        #[test]
        fn test_format_percentage() {
            assert_eq!(format_percentage(28.44, 1), "+28.4%");
            assert_eq!(format_percentage(-3.0, 1), "-3.0%");
        }
    }
}
