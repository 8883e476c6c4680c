//! Per-column descriptive statistics.
//!
//! Missing cells (and one-hot gaps) only count towards `missing`; they never
//! contribute to means, quantiles or frequencies.

use crate::dataset::cell::Cell;
use crate::dataset::column::{Column, ColumnType};
use crate::dataset::Dataset;
use crate::error::Result;
use serde::Serialize;
use std::collections::HashMap;
use std::fmt;

/// Location and spread of a numeric column.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Distribution {
    pub mean: f64,
    /// Population variance: mean of squared deviations, not sample-corrected.
    pub std_dev: f64,
    pub min: f64,
    pub p25: f64,
    pub p50: f64,
    pub p75: f64,
    pub max: f64,
}

/// Statistics for one column, shaped by its declared type.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum ColumnStatistics {
    Timestamp {
        valid: usize,
        missing: usize,
        /// Earliest value, rendered with the column's formatter.
        min: Option<String>,
        /// Latest value, rendered with the column's formatter.
        max: Option<String>,
    },
    Numeric {
        valid: usize,
        missing: usize,
        /// `None` when every cell is missing.
        distribution: Option<Distribution>,
    },
    Categorical {
        valid: usize,
        missing: usize,
        unique: usize,
        /// Most frequent value; ties go to the first value seen.
        top: Option<String>,
    },
}

impl ColumnStatistics {
    pub fn valid(&self) -> usize {
        match self {
            ColumnStatistics::Timestamp { valid, .. }
            | ColumnStatistics::Numeric { valid, .. }
            | ColumnStatistics::Categorical { valid, .. } => *valid,
        }
    }

    pub fn missing(&self) -> usize {
        match self {
            ColumnStatistics::Timestamp { missing, .. }
            | ColumnStatistics::Numeric { missing, .. }
            | ColumnStatistics::Categorical { missing, .. } => *missing,
        }
    }
}

impl fmt::Display for ColumnStatistics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "valid: {}", self.valid())?;
        writeln!(f, "missing: {}", self.missing())?;
        match self {
            ColumnStatistics::Timestamp { min, max, .. } => {
                writeln!(f, "min: {}", min.as_deref().unwrap_or("-"))?;
                writeln!(f, "max: {}", max.as_deref().unwrap_or("-"))
            }
            ColumnStatistics::Numeric { distribution, .. } => match distribution {
                Some(d) => {
                    writeln!(f, "mean: {:.6}", d.mean)?;
                    writeln!(f, "std dev: {:.6}", d.std_dev)?;
                    writeln!(
                        f,
                        "min: {:.6}; 25%: {:.6}; 50%: {:.6}; 75%: {:.6}; max: {:.6}",
                        d.min, d.p25, d.p50, d.p75, d.max
                    )
                }
                None => writeln!(f, "no values"),
            },
            ColumnStatistics::Categorical { unique, top, .. } => {
                writeln!(f, "uniq: {}", unique)?;
                writeln!(f, "top: {}", top.as_deref().unwrap_or("-"))
            }
        }
    }
}

impl Dataset {
    /// Statistics for the named column.
    ///
    /// Returns `Ok(None)` until the dataset has been fully loaded.
    pub fn statistics(&self, name: &str) -> Result<Option<ColumnStatistics>> {
        let pos = self.column_position(name)?;
        if !self.loaded {
            return Ok(None);
        }
        let column = &self.columns[pos];
        let cells: Vec<Option<&Cell>> = self.column_cells(pos).collect();
        let stats = match column.column_type() {
            ColumnType::Timestamp => timestamp_statistics(column, &cells),
            ColumnType::Int | ColumnType::Float => numeric_statistics(&cells),
            ColumnType::String => categorical_statistics(&cells),
        };
        Ok(Some(stats))
    }
}

fn present<'a>(cells: &'a [Option<&'a Cell>]) -> impl Iterator<Item = &'a Cell> + 'a {
    cells.iter().filter_map(|c| c.filter(|c| !c.is_empty()))
}

fn timestamp_statistics(column: &Column, cells: &[Option<&Cell>]) -> ColumnStatistics {
    let values: Vec<_> = present(cells)
        .filter_map(|c| match c {
            Cell::Timestamp(ts) => Some(*ts),
            _ => None,
        })
        .collect();

    let bounds = values.split_first().map(|(first, rest)| {
        rest.iter()
            .fold((*first, *first), |(lo, hi), ts| (lo.min(*ts), hi.max(*ts)))
    });
    let render = |ts| column.render(&Cell::Timestamp(ts));

    ColumnStatistics::Timestamp {
        valid: values.len(),
        missing: cells.len() - values.len(),
        min: bounds.map(|(lo, _)| render(lo)),
        max: bounds.map(|(_, hi)| render(hi)),
    }
}

fn numeric_statistics(cells: &[Option<&Cell>]) -> ColumnStatistics {
    let mut values: Vec<f64> = present(cells).filter_map(Cell::numeric).collect();
    let valid = values.len();
    let missing = cells.len() - valid;
    if values.is_empty() {
        return ColumnStatistics::Numeric {
            valid,
            missing,
            distribution: None,
        };
    }

    let n = values.len() as f64;
    let mean = values.iter().sum::<f64>() / n;
    let variance = values.iter().map(|v| (v - mean) * (v - mean)).sum::<f64>() / n;

    values.sort_by(f64::total_cmp);
    let at = |p: usize| values[(values.len() * p / 100).min(values.len() - 1)];

    ColumnStatistics::Numeric {
        valid,
        missing,
        distribution: Some(Distribution {
            mean,
            std_dev: variance,
            min: at(0),
            p25: at(25),
            p50: at(50),
            p75: at(75),
            max: at(100),
        }),
    }
}

fn categorical_statistics(cells: &[Option<&Cell>]) -> ColumnStatistics {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    let mut order: Vec<&str> = Vec::new();
    for value in present(cells).filter_map(Cell::as_str) {
        let count = counts.entry(value).or_insert(0);
        if *count == 0 {
            order.push(value);
        }
        *count += 1;
    }

    let valid: usize = counts.values().sum();
    let mut top: Option<(&str, usize)> = None;
    for value in &order {
        let count = counts[value];
        if top.map_or(true, |(_, best)| count > best) {
            top = Some((*value, count));
        }
    }

    ColumnStatistics::Categorical {
        valid,
        missing: cells.len() - valid,
        unique: counts.len(),
        top: top.map(|(value, _)| value.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::TimestampCodec;
    use crate::error::Error;
    use approx::assert_relative_eq;

    fn numeric_dataset(values: &[&str]) -> Dataset {
        let mut ds = Dataset::new();
        ds.add_column(Column::int("n", 0)).unwrap();
        ds.load_csv(values.join("\n").as_bytes(), false).unwrap();
        ds
    }

    #[test]
    fn test_statistics_require_loaded_dataset() {
        let mut ds = Dataset::new();
        ds.add_column(Column::int("n", 0)).unwrap();
        assert_eq!(ds.statistics("n").unwrap(), None);
        assert!(matches!(ds.statistics("x"), Err(Error::UnknownColumn(_))));
    }

    #[test]
    fn test_numeric_statistics() {
        let ds = numeric_dataset(&["4", "\"\"", "1", "3", "2", "\"\""]);
        let stats = ds.statistics("n").unwrap().unwrap();

        assert_eq!(stats.valid(), 4);
        assert_eq!(stats.missing(), 2);
        let ColumnStatistics::Numeric {
            distribution: Some(d),
            ..
        } = stats
        else {
            panic!("expected numeric statistics");
        };
        assert_relative_eq!(d.mean, 2.5);
        // ((1.5)^2 + (0.5)^2 + (0.5)^2 + (1.5)^2) / 4
        assert_relative_eq!(d.std_dev, 1.25);
        assert_eq!(d.min, 1.0);
        assert_eq!(d.p25, 2.0);
        assert_eq!(d.p50, 3.0);
        assert_eq!(d.p75, 4.0);
        assert_eq!(d.max, 4.0);
    }

    #[test]
    fn test_numeric_statistics_all_missing() {
        let mut ds = Dataset::new();
        ds.add_column(Column::int("a", 0)).unwrap();
        ds.add_column(Column::float("b", 1)).unwrap();
        ds.load_csv("1,\n2,\n".as_bytes(), false).unwrap();

        let stats = ds.statistics("b").unwrap().unwrap();
        assert_eq!(
            stats,
            ColumnStatistics::Numeric {
                valid: 0,
                missing: 2,
                distribution: None
            }
        );
    }

    #[test]
    fn test_categorical_mode_ties_go_to_first_seen() {
        let mut ds = Dataset::new();
        ds.add_column(Column::string("s", 0)).unwrap();
        ds.load_csv("b\na\na\nb\nc\n".as_bytes(), false).unwrap();

        let stats = ds.statistics("s").unwrap().unwrap();
        assert_eq!(
            stats,
            ColumnStatistics::Categorical {
                valid: 5,
                missing: 0,
                unique: 3,
                top: Some("b".to_string()),
            }
        );
    }

    #[test]
    fn test_categorical_counts_missing() {
        let mut ds = Dataset::new();
        ds.add_column(Column::string("s", 0)).unwrap();
        ds.add_column(Column::int("n", 1)).unwrap();
        ds.load_csv("x,1\n,2\nx,3\n".as_bytes(), false).unwrap();

        let stats = ds.statistics("s").unwrap().unwrap();
        assert_eq!(stats.valid(), 2);
        assert_eq!(stats.missing(), 1);
    }

    #[test]
    fn test_timestamp_bounds() {
        let mut ds = Dataset::new();
        ds.add_column(Column::timestamp(
            "date",
            0,
            TimestampCodec::with_format("%Y-%m-%d"),
        ))
        .unwrap();
        ds.add_column(Column::int("n", 1)).unwrap();
        ds.load_csv("2020-03-01,1\n,2\n2019-12-31,3\n2020-01-15,4\n".as_bytes(), false)
            .unwrap();

        let stats = ds.statistics("date").unwrap().unwrap();
        assert_eq!(
            stats,
            ColumnStatistics::Timestamp {
                valid: 3,
                missing: 1,
                min: Some("2019-12-31".to_string()),
                max: Some("2020-03-01".to_string()),
            }
        );
    }

    #[test]
    fn test_display_report() {
        let ds = numeric_dataset(&["1", "3"]);
        let text = ds.statistics("n").unwrap().unwrap().to_string();
        assert!(text.starts_with("valid: 2\nmissing: 0\nmean: 2.000000\n"));
        assert!(text.contains("std dev: 1.000000"));
    }

    #[test]
    fn test_statistics_serialize_to_json() {
        let ds = numeric_dataset(&["1", "3"]);
        let stats = ds.statistics("n").unwrap().unwrap();
        let json = serde_json::to_value(&stats).unwrap();
        assert_eq!(json["kind"], "numeric");
        assert_eq!(json["valid"], 2);
        assert_eq!(json["distribution"]["max"], 3.0);
    }
}
