// src/data.rs
//
// Canonical row/table types.
//
// - PriceRecord: one asset at one capture instant, fields kept exactly as
//                the page rendered them ("$1,234.56", "-0.42%").
// - PriceTable:  ordered records for one run. Filtering produces subsets,
//                the movers report works on re-sorted copies; nothing edits
//                a record in place.

use std::fmt;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PriceRecord {
    /// `%Y-%m-%d %H:%M:%S`, shared by every record of one run.
    pub captured_at: String,
    pub rank: String,
    pub name: String,
    pub price: String,
    pub change_1h: String,
    pub change_24h: String,
    pub change_7d: String,
    pub market_cap: String,
}

impl PriceRecord {
    pub fn get(&self, col: Column) -> &str {
        match col {
            Column::Time => &self.captured_at,
            Column::Rank => &self.rank,
            Column::Name => &self.name,
            Column::Price => &self.price,
            Column::Change1h => &self.change_1h,
            Column::Change24h => &self.change_24h,
            Column::Change7d => &self.change_7d,
            Column::MarketCap => &self.market_cap,
        }
    }

    /// Display-format fields in persisted column order.
    pub fn to_row(&self) -> Vec<String> {
        Column::ALL.iter().map(|&c| s!(self.get(c))).collect()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Column {
    Time,
    Rank,
    Name,
    Price,
    Change1h,
    Change24h,
    Change7d,
    MarketCap,
}

impl Column {
    /// Persisted/printed order.
    pub const ALL: [Column; 8] = [
        Column::Time,
        Column::Rank,
        Column::Name,
        Column::Price,
        Column::Change1h,
        Column::Change24h,
        Column::Change7d,
        Column::MarketCap,
    ];

    pub fn header(self) -> &'static str {
        match self {
            Column::Time => "Time",
            Column::Rank => "Rank",
            Column::Name => "Name",
            Column::Price => "Price",
            Column::Change1h => "1h",
            Column::Change24h => "24h",
            Column::Change7d => "7d",
            Column::MarketCap => "Market Cap",
        }
    }

    pub fn headers() -> Vec<String> {
        Self::ALL.iter().map(|c| s!(c.header())).collect()
    }
}

impl fmt::Display for Column {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.header())
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PriceTable {
    rows: Vec<PriceRecord>,
}

impl PriceTable {
    pub fn new(rows: Vec<PriceRecord>) -> Self { Self { rows } }

    pub fn rows(&self) -> &[PriceRecord] { &self.rows }
    pub fn into_rows(self) -> Vec<PriceRecord> { self.rows }
    pub fn len(&self) -> usize { self.rows.len() }
    pub fn is_empty(&self) -> bool { self.rows.is_empty() }

    /// All rows as display strings, header order.
    pub fn to_string_rows(&self) -> Vec<Vec<String>> {
        self.rows.iter().map(PriceRecord::to_row).collect()
    }
}

impl FromIterator<PriceRecord> for PriceTable {
    fn from_iter<I: IntoIterator<Item = PriceRecord>>(iter: I) -> Self {
        Self { rows: iter.into_iter().collect() }
    }
}
