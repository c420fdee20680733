//! In-memory SQLite database layer for billionaire wealth records.
//!
//! Raw per-person records are loaded from CSV, and daily totals are derived
//! on-the-fly with SQL `GROUP BY date` queries. The totals feed the chart data
//! preparation in `rfp-data`.
//!
//! # Usage
//!
//! ```rust
//! use rfp_db::Database;
//!
//! let db = Database::new().unwrap();
//! db.load_records_csv("date,person_name,final_worth\n2024-01-01,Ada Example,2.1e11\n").unwrap();
//! let totals = db.query_daily_totals().unwrap();
//! assert_eq!(totals.len(), 1);
//! ```

pub mod schema;
mod loader;
mod queries;

use rusqlite::Connection;
use std::cell::RefCell;
use std::rc::Rc;

/// In-memory SQLite database of wealth records.
///
/// Cheaply cloneable (via `Rc`); clones share one connection.
#[derive(Clone)]
pub struct Database {
    conn: Rc<RefCell<Connection>>,
}

impl Database {
    /// Create a new in-memory database with the schema applied.
    pub fn new() -> anyhow::Result<Self> {
        let conn = Connection::open_in_memory()?;
        conn.execute_batch(schema::create_schema())?;
        Ok(Self {
            conn: Rc::new(RefCell::new(conn)),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn database_creates_successfully() {
        let db = Database::new();
        assert!(db.is_ok(), "Database should create without errors");
    }

    #[test]
    fn database_is_cloneable() {
        let db = Database::new().unwrap();
        let db2 = db.clone();
        db.load_records_csv("date,person_name,final_worth\n2024-01-01,Ada Example,2.1e11\n")
            .unwrap();
        assert_eq!(
            db2.record_count().unwrap(),
            1,
            "Clone should see same data via shared Rc"
        );
    }

    #[test]
    fn database_starts_empty() {
        let db = Database::new().unwrap();
        assert_eq!(db.record_count().unwrap(), 0);
        assert!(db.query_daily_totals().unwrap().is_empty());
    }
}
