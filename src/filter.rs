// src/filter.rs
//
// Threshold filter over a PriceTable. All-or-nothing: if any threshold or
// any row value fails to parse, the table comes back untouched together
// with the reason. Boundaries are inclusive (`>=`).

use log::{debug, warn};

use crate::config::options::FilterCriteria;
use crate::core::normalized;
use crate::data::{Column, PriceTable};
use crate::error::FilterError;

#[derive(Debug)]
pub enum Filtered {
    /// Filtering was not requested.
    Skipped(PriceTable),
    Applied(PriceTable),
    /// Bad input; the original table is returned unfiltered.
    Aborted { table: PriceTable, reason: FilterError },
}

impl Filtered {
    pub fn table(&self) -> &PriceTable {
        match self {
            Filtered::Skipped(t) | Filtered::Applied(t) => t,
            Filtered::Aborted { table, .. } => table,
        }
    }

    pub fn into_table(self) -> PriceTable {
        match self {
            Filtered::Skipped(t) | Filtered::Applied(t) => t,
            Filtered::Aborted { table, .. } => table,
        }
    }
}

pub fn apply(table: PriceTable, criteria: &FilterCriteria) -> Filtered {
    if !criteria.enabled {
        return Filtered::Skipped(table);
    }
    match keep_mask(&table, criteria) {
        Ok(mask) => {
            let before = table.len();
            let kept: PriceTable = table
                .into_rows()
                .into_iter()
                .zip(mask)
                .filter_map(|(r, keep)| keep.then_some(r))
                .collect();
            debug!("Filter kept {}/{} rows", kept.len(), before);
            Filtered::Applied(kept)
        }
        Err(reason) => {
            warn!("Filter aborted: {reason}");
            Filtered::Aborted { table, reason }
        }
    }
}

/// Per-row keep flags, or the first parse failure.
fn keep_mask(table: &PriceTable, criteria: &FilterCriteria) -> Result<Vec<bool>, FilterError> {
    let mut mask = vec![true; table.len()];

    for (column, raw) in [
        (Column::Price, criteria.min_price.as_str()),
        (Column::Change24h, criteria.min_change.as_str()),
    ] {
        let Some(min) = threshold(column, raw)? else { continue };

        for (i, rec) in table.rows().iter().enumerate() {
            let value = rec.get(column);
            let n = normalized(value).ok_or_else(|| FilterError::UnparseableField {
                row: i,
                column,
                value: s!(value),
            })?;
            mask[i] &= n >= min;
        }
    }
    Ok(mask)
}

/// Empty (or blank) means no constraint on that column.
fn threshold(column: Column, raw: &str) -> Result<Option<f64>, FilterError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(None);
    }
    raw.parse::<f64>()
        .map(Some)
        .map_err(|_| FilterError::InvalidThreshold { column, value: s!(raw) })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::fixtures::record;

    fn names(t: &PriceTable) -> Vec<&str> {
        t.rows().iter().map(|r| r.name.as_str()).collect()
    }

    fn sample() -> PriceTable {
        PriceTable::new(vec![record("Low", "$50", "2%"), record("High", "$150", "-1%")])
    }

    #[test]
    fn min_price_only() {
        let out = apply(sample(), &FilterCriteria::new("100", ""));
        assert!(matches!(out, Filtered::Applied(_)));
        assert_eq!(names(out.table()), ["High"]);
    }

    #[test]
    fn boundary_is_inclusive() {
        let out = apply(sample(), &FilterCriteria::new("150", "-1"));
        assert_eq!(names(out.table()), ["High"]);
    }

    #[test]
    fn both_thresholds_combine() {
        let out = apply(sample(), &FilterCriteria::new("10", "0"));
        assert_eq!(names(out.table()), ["Low"]);
    }

    #[test]
    fn disabled_returns_table_as_is() {
        let out = apply(sample(), &FilterCriteria::disabled());
        assert!(matches!(out, Filtered::Skipped(_)));
        assert_eq!(out.table().len(), 2);
    }

    #[test]
    fn bad_threshold_aborts_whole_filter() {
        let out = apply(sample(), &FilterCriteria::new("abc", "0"));
        match out {
            Filtered::Aborted { table, reason } => {
                assert_eq!(table, sample());
                assert_eq!(reason, FilterError::InvalidThreshold {
                    column: Column::Price,
                    value: s!("abc"),
                });
            }
            other => panic!("expected abort, got {other:?}"),
        }
    }

    #[test]
    fn bad_change_threshold_aborts_even_with_valid_price() {
        let out = apply(sample(), &FilterCriteria::new("100", "lots"));
        assert!(matches!(out, Filtered::Aborted { .. }));
        assert_eq!(out.table().len(), 2);
    }

    #[test]
    fn unparseable_row_aborts() {
        let t = PriceTable::new(vec![record("A", "$10", "1%"), record("B", "--", "1%")]);
        let out = apply(t.clone(), &FilterCriteria::new("1", ""));
        match out {
            Filtered::Aborted { table, reason } => {
                assert_eq!(table, t);
                assert!(matches!(reason, FilterError::UnparseableField { row: 1, .. }));
            }
            other => panic!("expected abort, got {other:?}"),
        }
    }

    #[test]
    fn unused_column_is_not_parsed() {
        // bad 24h text does not matter when only price is constrained
        let t = PriceTable::new(vec![record("A", "$10", "n/a")]);
        let out = apply(t, &FilterCriteria::new("5", " "));
        assert_eq!(names(out.table()), ["A"]);
    }

    #[test]
    fn can_filter_everything_out() {
        let out = apply(sample(), &FilterCriteria::new("1000", ""));
        assert!(matches!(out, Filtered::Applied(ref t) if t.is_empty()));
    }
}
