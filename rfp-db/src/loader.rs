//! Loading wealth records into the in-memory database.
//!
//! CSV format (with headers): `date,person_name,final_worth,cpi_u,pce`. See
//! [`rfp_core::record::WealthRecord::parse_csv`] for the row rules.

use crate::Database;
use rfp_core::record::WealthRecord;
use rfp_utils::dates::format_date;
use rusqlite::params;

impl Database {
    /// Insert parsed records. A later record for the same (date, person)
    /// replaces an earlier one.
    pub fn load_records(&self, records: &[WealthRecord]) -> anyhow::Result<()> {
        let mut conn = self.conn.borrow_mut();
        let tx = conn.transaction()?;
        {
            let mut stmt = tx.prepare(
                "INSERT OR REPLACE INTO wealth_records (date, person_name, final_worth, cpi_u, pce)
                 VALUES (?1, ?2, ?3, ?4, ?5)",
            )?;
            for r in records {
                stmt.execute(params![
                    format_date(&r.date),
                    r.person_name,
                    r.final_worth,
                    r.cpi_u,
                    r.pce
                ])?;
            }
        }
        tx.commit()?;
        log::info!("loader: loaded {} wealth records", records.len());
        Ok(())
    }

    /// Parse a wealth records CSV string and insert its rows.
    pub fn load_records_csv(&self, csv_data: &str) -> anyhow::Result<()> {
        let records = WealthRecord::parse_csv(csv_data)?;
        self.load_records(&records)
    }
}
