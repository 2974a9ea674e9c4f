// src/analyze.rs
use std::cmp::Ordering;

use crate::config::consts::MOVERS;
use crate::core::normalized;
use crate::data::{Column, PriceRecord, PriceTable};

/// Top gainers/losers over 24h. Copies; the source table is not reordered.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Movers {
    pub gainers: Vec<PriceRecord>,
    pub losers: Vec<PriceRecord>,
}

/// Lenient 24h value: only percentage-looking text counts, the rest ranks as 0.
pub fn change_24h(rec: &PriceRecord) -> f64 {
    let raw = rec.get(Column::Change24h);
    if !raw.contains('%') {
        return 0.0;
    }
    normalized(raw).unwrap_or(0.0)
}

pub fn analyze(table: &PriceTable) -> Movers {
    top_movers(table, MOVERS)
}

/// Stable sorts, so equal values keep table order.
pub fn top_movers(table: &PriceTable, n: usize) -> Movers {
    let keyed: Vec<(f64, &PriceRecord)> =
        table.rows().iter().map(|r| (change_24h(r), r)).collect();

    let pick = |cmp: fn(&f64, &f64) -> Ordering| -> Vec<PriceRecord> {
        let mut sorted = keyed.clone();
        sorted.sort_by(|a, b| cmp(&a.0, &b.0));
        sorted.into_iter().take(n).map(|(_, r)| r.clone()).collect()
    };

    Movers {
        gainers: pick(|a: &f64, b: &f64| b.total_cmp(a)),
        losers: pick(|a: &f64, b: &f64| a.total_cmp(b)),
    }
}
