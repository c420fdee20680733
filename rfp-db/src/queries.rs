//! Typed query methods over the wealth records table.

use crate::Database;
use rfp_core::record::DailyTotal;
use rfp_utils::dates::parse_date;

impl Database {
    /// Number of stored (date, person) records.
    pub fn record_count(&self) -> anyhow::Result<u64> {
        let conn = self.conn.borrow();
        let count: i64 =
            conn.query_row("SELECT COUNT(*) FROM wealth_records", [], |row| row.get(0))?;
        Ok(count as u64)
    }

    /// Per-date totals ordered chronologically.
    ///
    /// `total_wealth` is `SUM(final_worth)`, `billionaire_count` is the number
    /// of distinct names, and the index columns are averaged over the rows of
    /// the date that carry a value (NULL if none do).
    pub fn query_daily_totals(&self) -> anyhow::Result<Vec<DailyTotal>> {
        let conn = self.conn.borrow();
        let mut stmt = conn.prepare(
            "SELECT date, SUM(final_worth), COUNT(DISTINCT person_name), AVG(cpi_u), AVG(pce)
             FROM wealth_records
             GROUP BY date
             ORDER BY date",
        )?;
        let rows = stmt
            .query_map([], |row| {
                Ok((
                    row.get::<_, String>(0)?,
                    row.get::<_, f64>(1)?,
                    row.get::<_, i64>(2)?,
                    row.get::<_, Option<f64>>(3)?,
                    row.get::<_, Option<f64>>(4)?,
                ))
            })?
            .collect::<Result<Vec<_>, _>>()?;

        let totals = rows
            .into_iter()
            .map(|(date, total_wealth, count, cpi_u, pce)| {
                Ok(DailyTotal {
                    date: parse_date(&date)?,
                    total_wealth,
                    billionaire_count: u32::try_from(count)?,
                    cpi_u,
                    pce,
                })
            })
            .collect::<anyhow::Result<Vec<_>>>()?;
        log::info!("query: query_daily_totals returned {} days", totals.len());
        Ok(totals)
    }

}

#[cfg(test)]
mod tests {
    use crate::Database;
    use chrono::NaiveDate;

    fn sample_db() -> Database {
        let db = Database::new().unwrap();
        let csv = "\
date,person_name,final_worth,cpi_u,pce
2024-01-02,Ada Example,220,309.0,
2024-01-01,Ada Example,200,308.0,120.0
2024-01-01,Bo Sample,100,308.0,120.0
2024-01-02,Bo Sample,110,,
2024-01-02,Cy Third,50,,
";
        db.load_records_csv(csv).unwrap();
        db
    }

    #[test]
    fn daily_totals_are_ordered_and_summed() {
        let totals = sample_db().query_daily_totals().unwrap();
        assert_eq!(totals.len(), 2);
        assert_eq!(totals[0].date, NaiveDate::from_ymd_opt(2024, 1, 1).unwrap());
        assert!((totals[0].total_wealth - 300.0).abs() < 1e-9);
        assert_eq!(totals[0].billionaire_count, 2);
        assert!((totals[1].total_wealth - 380.0).abs() < 1e-9);
        assert_eq!(totals[1].billionaire_count, 3);
    }

    #[test]
    fn index_columns_average_only_present_values() {
        let totals = sample_db().query_daily_totals().unwrap();
        assert_eq!(totals[0].cpi_u, Some(308.0));
        assert_eq!(totals[0].pce, Some(120.0));
        assert_eq!(totals[1].cpi_u, Some(309.0));
        assert_eq!(totals[1].pce, None);
    }}
