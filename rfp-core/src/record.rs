use chrono::NaiveDate;
use csv::{ReaderBuilder, StringRecord};
use rfp_utils::dates::parse_date;
use thiserror::Error;

/// Expected column layout of the wealth records CSV (headers required).
pub const CSV_HEADER: &str = "date,person_name,final_worth,cpi_u,pce";

/// Minimum number of columns in a record row; the index columns are optional.
pub const CSV_MIN_ROW_LENGTH: usize = 3;

/// Errors that can occur when reading wealth records.
#[derive(Error, Debug, PartialEq, Clone, Copy, Hash)]
pub enum RecordError {
    /// The CSV itself could not be read
    #[error("Failed to parse wealth records CSV")]
    CsvParseError,

    /// Every row was malformed, or there were none
    #[error("No valid wealth records found")]
    NoRecords,
}

/// Net worth of one person on one crawl date.
///
/// `final_worth` is in USD. `cpi_u` and `pce` are the price index values
/// published for that date, when known; they are repeated on every row of the
/// same date.
#[derive(Debug, Clone, PartialEq)]
pub struct WealthRecord {
    pub date: NaiveDate,
    pub person_name: String,
    pub final_worth: f64,
    pub cpi_u: Option<f64>,
    pub pce: Option<f64>,
}

/// Aggregate of all records sharing one crawl date.
///
/// `total_wealth` is the sum of `final_worth` in USD; the index values are
/// averaged over the rows of that date that carry them.
#[derive(Debug, Clone, PartialEq)]
pub struct DailyTotal {
    pub date: NaiveDate,
    pub total_wealth: f64,
    pub billionaire_count: u32,
    pub cpi_u: Option<f64>,
    pub pce: Option<f64>,
}

impl WealthRecord {
    /// Parse a wealth records CSV string.
    ///
    /// Rows that cannot be converted (bad date, non-numeric worth, missing
    /// name) are skipped and logged. Returns `NoRecords` if nothing survives.
    pub fn parse_csv(csv_data: &str) -> Result<Vec<WealthRecord>, RecordError> {
        let mut rdr = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_reader(csv_data.as_bytes());

        let mut records = Vec::new();
        let mut skipped = 0u32;
        for result in rdr.records() {
            let row = result.map_err(|_| RecordError::CsvParseError)?;
            match WealthRecord::try_from(&row) {
                Ok(record) => records.push(record),
                Err(()) => skipped += 1,
            }
        }

        if skipped > 0 {
            log::warn!("record: skipped {} malformed wealth rows", skipped);
        }
        log::info!("record: parsed {} wealth records", records.len());

        if records.is_empty() {
            return Err(RecordError::NoRecords);
        }
        Ok(records)
    }

}

fn parse_index(value: Option<&str>) -> Option<f64> {
    value
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .and_then(|s| s.parse::<f64>().ok())
        .filter(|v| v.is_finite())
}

impl TryFrom<&StringRecord> for WealthRecord {
    type Error = ();

    fn try_from(value: &StringRecord) -> Result<Self, Self::Error> {
        if value.len() < CSV_MIN_ROW_LENGTH {
            return Err(());
        }
        let date = parse_date(value.get(0).unwrap_or("")).map_err(|_| ())?;
        let person_name = value.get(1).unwrap_or("").trim();
        if person_name.is_empty() {
            return Err(());
        }
        let final_worth = value
            .get(2)
            .unwrap_or("")
            .trim()
            .parse::<f64>()
            .map_err(|_| ())?;
        if !final_worth.is_finite() {
            return Err(());
        }

        Ok(WealthRecord {
            date,
            person_name: person_name.to_string(),
            final_worth,
            cpi_u: parse_index(value.get(3)),
            pce: parse_index(value.get(4)),
        })
    }
}

#[cfg(test)]
mod test {
    use super::*;

    const STR_RESULT: &str = r#"date,person_name,final_worth,cpi_u,pce
2024-01-01,Ada Example,210000000000,308.4,121.3
2024-01-01,Bo Sample,180000000000,308.4,121.3
2024-01-02,Ada Example,212000000000,,
2024-01-02,Bo Sample,not-a-number,,
bad-date,Cy Missing,1000,,
2024-01-03,,5000,,
"#;

    #[test]
    fn test_parse_csv_skips_malformed_rows() {
        let records = WealthRecord::parse_csv(STR_RESULT).unwrap();
        assert_eq!(records.len(), 3);
        assert_eq!(records[0].person_name, "Ada Example");
        assert_eq!(records[0].final_worth, 210_000_000_000.0);
        assert_eq!(records[0].cpi_u, Some(308.4));
        assert_eq!(records[2].cpi_u, None);
        assert_eq!(records[2].pce, None);
    }

    #[test]
    fn test_parse_csv_without_index_columns() {
        let csv = "date,person_name,final_worth\n2024-02-01,Ada Example,1.5e11\n";
        let records = WealthRecord::parse_csv(csv).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].cpi_u, None);
    }

    #[test]
    fn test_parse_csv_empty_is_error() {
        assert_eq!(
            WealthRecord::parse_csv(CSV_HEADER),
            Err(RecordError::NoRecords)
        );
    }

    #[test]
    fn test_parse_csv_keeps_quoted_commas_in_names() {
        let csv = "date,person_name,final_worth\n2024-01-01,\"Walton, Alice\",1000\n";
        let records = WealthRecord::parse_csv(csv).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].person_name, "Walton, Alice");
        assert_eq!(records[0].final_worth, 1000.0);
    }
}
