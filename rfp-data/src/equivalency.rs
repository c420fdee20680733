//! Wealth equivalency comparisons ("how many median households").

use crate::DataError;
use serde::Serialize;

/// Income figures the total wealth is compared against, in USD.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Baselines {
    pub median_household_income: f64,
    pub median_worker_annual: f64,
    pub median_lifetime_earnings: f64,
}

impl Default for Baselines {
    fn default() -> Self {
        Self {
            median_household_income: 66_000.0,
            median_worker_annual: 59_000.0,
            median_lifetime_earnings: 1_700_000.0,
        }
    }
}

impl Baselines {
    /// Read baselines from a `metric,value` CSV (headers required).
    ///
    /// Unknown metrics are ignored; missing ones keep their default.
    pub fn from_csv(csv_data: &str) -> Result<Self, DataError> {
        let mut baselines = Self::default();
        let mut rdr = csv::ReaderBuilder::new()
            .has_headers(true)
            .from_reader(csv_data.as_bytes());

        for result in rdr.records() {
            let row = result.map_err(|e| DataError::Baselines(e.to_string()))?;
            let metric = row.get(0).unwrap_or("").trim();
            let value: f64 = row
                .get(1)
                .unwrap_or("")
                .trim()
                .parse()
                .map_err(|_| DataError::Baselines(format!("bad value for '{}'", metric)))?;
            match metric {
                "median_household_income" => baselines.median_household_income = value,
                "median_worker_annual" => baselines.median_worker_annual = value,
                "median_lifetime_earnings" => baselines.median_lifetime_earnings = value,
                other => log::warn!("equivalency: ignoring unknown baseline '{}'", other),
            }
        }
        Ok(baselines)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Equivalency {
    pub comparison: String,
    /// e.g. "215 million"
    pub value: String,
    pub context: String,
}

/// Express `total_wealth_trillions` as multiples of each baseline.
pub fn equivalencies(total_wealth_trillions: f64, baselines: &Baselines) -> Vec<Equivalency> {
    let total_dollars = total_wealth_trillions * crate::TRILLION;
    [
        (
            "Median US Households",
            baselines.median_household_income,
            "Annual household income",
        ),
        (
            "Median Workers",
            baselines.median_worker_annual,
            "Annual salaries",
        ),
        (
            "Average US Workers",
            baselines.median_lifetime_earnings,
            "Lifetime careers",
        ),
    ]
    .into_iter()
    .filter(|(_, divisor, _)| *divisor > 0.0)
    .map(|(name, divisor, context)| Equivalency {
        comparison: name.to_string(),
        value: format!("{:.0} million", total_dollars / divisor / 1e6),
        context: context.to_string(),
    })
    .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_equivalencies_default_baselines() {
        let eq = equivalencies(14.19, &Baselines::default());
        assert_eq!(eq.len(), 3);
        assert_eq!(eq[0].comparison, "Median US Households");
        assert_eq!(eq[0].value, "215 million");
        assert_eq!(eq[2].context, "Lifetime careers");
    }

    #[test]
    fn test_baselines_from_csv() {
        let csv = "metric,value\nmedian_household_income,80000\nsomething_else,1\n";
        let b = Baselines::from_csv(csv).unwrap();
        assert_eq!(b.median_household_income, 80_000.0);
        assert_eq!(b.median_worker_annual, Baselines::default().median_worker_annual);
    }

    #[test]
    fn test_baselines_bad_value() {
        let csv = "metric,value\nmedian_worker_annual,lots\n";
        assert!(matches!(Baselines::from_csv(csv), Err(DataError::Baselines(_))));
    }

    #[test]
    fn test_zero_baseline_is_skipped() {
        let baselines = Baselines {
            median_worker_annual: 0.0,
            ..Baselines::default()
        };
        assert_eq!(equivalencies(1.0, &baselines).len(), 2);
    }
}
