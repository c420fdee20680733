//! SQL schema definitions for the in-memory SQLite database.

/// Returns the full SQL schema as a single batch string.
///
/// - `wealth_records` - One row per person per crawl date (worth in USD,
///   optional CPI-U / PCE index values for that date)
///
/// Daily totals are derived on-the-fly via `GROUP BY date` with
/// `SUM(final_worth)` and `COUNT(DISTINCT person_name)`.
pub fn create_schema() -> &'static str {
    r#"
    CREATE TABLE IF NOT EXISTS wealth_records (
        date TEXT NOT NULL,
        person_name TEXT NOT NULL,
        final_worth REAL NOT NULL,
        cpi_u REAL,
        pce REAL,
        PRIMARY KEY (date, person_name)
    );
    CREATE INDEX IF NOT EXISTS idx_wealth_date ON wealth_records(date);
    "#
}
