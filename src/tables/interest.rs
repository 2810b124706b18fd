//! Interest rate tables by installment count
//!
//! Each entry holds the two markup columns ("full" / cheia and "half" / metade)
//! as percentages. The cash case (1 installment) is never stored; it always
//! carries a zero rate.

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;

use super::TableError;

/// Lowest installment count a table may contain (1 is the implicit cash case)
pub const MIN_TABLE_INSTALLMENTS: u32 = 2;

/// Highest installment count supported
pub const MAX_INSTALLMENTS: u32 = 24;

/// Which rate column to apply for a calculation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum TableSelector {
    #[default]
    Full,
    Half,
}

impl fmt::Display for TableSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TableSelector::Full => write!(f, "full"),
            TableSelector::Half => write!(f, "half"),
        }
    }
}

impl FromStr for TableSelector {
    type Err = TableError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        // Accept the shop-floor names as well ("cheia" / "metade", or just "c" / "m")
        match s.trim().to_ascii_lowercase().as_str() {
            "full" | "cheia" | "c" => Ok(TableSelector::Full),
            "half" | "metade" | "m" => Ok(TableSelector::Half),
            other => Err(TableError::UnknownSelector(other.to_string())),
        }
    }
}

// Serialized as "full" / "half"; read back through `FromStr` so config files,
// CSV batches and JSON requests accept the same names as the command line
impl<'de> Deserialize<'de> for TableSelector {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let name = String::deserialize(deserializer)?;
        name.parse().map_err(serde::de::Error::custom)
    }
}

/// Pair of interest rates (percent) for one installment count
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RatePair {
    pub full_rate: f64,
    pub half_rate: f64,
}

impl RatePair {
    pub fn new(full_rate: f64, half_rate: f64) -> Self {
        Self { full_rate, half_rate }
    }

    /// Rate for the selected column
    pub fn select(&self, selector: TableSelector) -> f64 {
        match selector {
            TableSelector::Full => self.full_rate,
            TableSelector::Half => self.half_rate,
        }
    }
}

/// Validated interest table, keyed by contiguous installment counts
#[derive(Debug, Clone, PartialEq)]
pub struct InterestTable {
    /// Installment count of the first entry
    first_count: u32,
    /// Rates indexed by `count - first_count`
    rates: Vec<RatePair>,
}

impl InterestTable {
    /// Build a table from `(installment_count, rates)` entries.
    ///
    /// Entries must be strictly ascending and contiguous within
    /// `MIN_TABLE_INSTALLMENTS..=MAX_INSTALLMENTS`, every pair must satisfy
    /// `full_rate >= half_rate >= 0`, and neither column may decrease as the
    /// installment count grows.
    pub fn new(entries: Vec<(u32, RatePair)>) -> Result<Self, TableError> {
        let first_count = match entries.first() {
            Some((count, _)) => *count,
            None => return Err(TableError::Empty),
        };

        let mut previous: Option<(u32, RatePair)> = None;
        for &(count, pair) in &entries {
            if !(MIN_TABLE_INSTALLMENTS..=MAX_INSTALLMENTS).contains(&count) {
                return Err(TableError::CountOutOfRange(count));
            }
            if !pair.full_rate.is_finite()
                || !pair.half_rate.is_finite()
                || pair.half_rate < 0.0
                || pair.full_rate < pair.half_rate
            {
                return Err(TableError::InvalidRates {
                    installments: count,
                    full_rate: pair.full_rate,
                    half_rate: pair.half_rate,
                });
            }
            if let Some((prev_count, prev_pair)) = previous {
                if count != prev_count + 1 {
                    return Err(TableError::NonContiguous {
                        expected: prev_count + 1,
                        found: count,
                    });
                }
                if pair.full_rate < prev_pair.full_rate || pair.half_rate < prev_pair.half_rate {
                    return Err(TableError::DecreasingRate { installments: count });
                }
            }
            previous = Some((count, pair));
        }

        Ok(Self {
            first_count,
            rates: entries.into_iter().map(|(_, pair)| pair).collect(),
        })
    }

    /// The shop's standard table: full rate 13% at 2x growing 4 points per
    /// installment (101% at 24x), half rate 7% growing 2 points (51% at 24x).
    pub fn standard() -> Self {
        Self {
            first_count: MIN_TABLE_INSTALLMENTS,
            rates: vec![
                RatePair::new(13.0, 7.0),   // 2x
                RatePair::new(17.0, 9.0),   // 3x
                RatePair::new(21.0, 11.0),  // 4x
                RatePair::new(25.0, 13.0),  // 5x
                RatePair::new(29.0, 15.0),  // 6x
                RatePair::new(33.0, 17.0),  // 7x
                RatePair::new(37.0, 19.0),  // 8x
                RatePair::new(41.0, 21.0),  // 9x
                RatePair::new(45.0, 23.0),  // 10x
                RatePair::new(49.0, 25.0),  // 11x
                RatePair::new(53.0, 27.0),  // 12x
                RatePair::new(57.0, 29.0),  // 13x
                RatePair::new(61.0, 31.0),  // 14x
                RatePair::new(65.0, 33.0),  // 15x
                RatePair::new(69.0, 35.0),  // 16x
                RatePair::new(73.0, 37.0),  // 17x
                RatePair::new(77.0, 39.0),  // 18x
                RatePair::new(81.0, 41.0),  // 19x
                RatePair::new(85.0, 43.0),  // 20x
                RatePair::new(89.0, 45.0),  // 21x
                RatePair::new(93.0, 47.0),  // 22x
                RatePair::new(97.0, 49.0),  // 23x
                RatePair::new(101.0, 51.0), // 24x
            ],
        }
    }

    /// Rate pair for an installment count; `None` when the table has no entry.
    /// The cash case (1) resolves to a zero pair.
    pub fn get(&self, installments: u32) -> Option<RatePair> {
        if installments == 1 {
            return Some(RatePair::new(0.0, 0.0));
        }
        let idx = installments.checked_sub(self.first_count)? as usize;
        self.rates.get(idx).copied()
    }

    /// Applicable rate (percent) for an installment count and column
    pub fn rate(&self, installments: u32, selector: TableSelector) -> Option<f64> {
        self.get(installments).map(|pair| pair.select(selector))
    }

    /// Installment counts stored in the table, ascending (excludes the cash case)
    pub fn installment_counts(&self) -> impl Iterator<Item = u32> + '_ {
        (0..self.rates.len() as u32).map(move |i| self.first_count + i)
    }

    /// Stored entries, ascending by installment count
    pub fn entries(&self) -> impl Iterator<Item = (u32, RatePair)> + '_ {
        self.installment_counts().zip(self.rates.iter().copied())
    }

    pub fn len(&self) -> usize {
        self.rates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rates.is_empty()
    }
}

impl Default for InterestTable {
    fn default() -> Self {
        Self::standard()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_table_rates() {
        let table = InterestTable::standard();

        assert_eq!(table.len(), 23);
        assert_eq!(table.rate(2, TableSelector::Full), Some(13.0));
        assert_eq!(table.rate(2, TableSelector::Half), Some(7.0));
        assert_eq!(table.rate(12, TableSelector::Full), Some(53.0));
        assert_eq!(table.rate(12, TableSelector::Half), Some(27.0));
        assert_eq!(table.rate(24, TableSelector::Full), Some(101.0));
        assert_eq!(table.rate(24, TableSelector::Half), Some(51.0));

        // Cash case is synthesized, beyond the table is absent
        assert_eq!(table.rate(1, TableSelector::Full), Some(0.0));
        assert_eq!(table.rate(25, TableSelector::Full), None);
        assert_eq!(table.rate(0, TableSelector::Full), None);
    }

    #[test]
    fn test_standard_table_passes_validation() {
        let standard = InterestTable::standard();
        let rebuilt = InterestTable::new(standard.entries().collect()).expect("standard table is valid");
        assert_eq!(rebuilt, standard);
    }

    #[test]
    fn test_installment_counts_ascending() {
        let counts: Vec<u32> = InterestTable::standard().installment_counts().collect();
        assert_eq!(counts, (2..=24).collect::<Vec<_>>());
    }

    #[test]
    fn test_rejects_gaps_and_duplicates() {
        let gap = vec![(2, RatePair::new(10.0, 5.0)), (4, RatePair::new(12.0, 6.0))];
        assert!(matches!(
            InterestTable::new(gap),
            Err(TableError::NonContiguous { expected: 3, found: 4 })
        ));

        let dup = vec![(2, RatePair::new(10.0, 5.0)), (2, RatePair::new(10.0, 5.0))];
        assert!(matches!(InterestTable::new(dup), Err(TableError::NonContiguous { .. })));
    }

    #[test]
    fn test_rejects_bad_rates() {
        let inverted = vec![(2, RatePair::new(5.0, 10.0))];
        assert!(matches!(InterestTable::new(inverted), Err(TableError::InvalidRates { .. })));

        let negative = vec![(2, RatePair::new(5.0, -1.0))];
        assert!(matches!(InterestTable::new(negative), Err(TableError::InvalidRates { .. })));

        let decreasing = vec![(2, RatePair::new(10.0, 5.0)), (3, RatePair::new(9.0, 5.0))];
        assert!(matches!(
            InterestTable::new(decreasing),
            Err(TableError::DecreasingRate { installments: 3 })
        ));
    }

    #[test]
    fn test_rejects_out_of_range_and_empty() {
        assert!(matches!(InterestTable::new(vec![]), Err(TableError::Empty)));
        assert!(matches!(
            InterestTable::new(vec![(1, RatePair::new(0.0, 0.0))]),
            Err(TableError::CountOutOfRange(1))
        ));
        assert!(matches!(
            InterestTable::new(vec![(25, RatePair::new(1.0, 0.0))]),
            Err(TableError::CountOutOfRange(25))
        ));
    }

    #[test]
    fn test_partial_table_offsets() {
        let table = InterestTable::new(vec![
            (6, RatePair::new(20.0, 10.0)),
            (7, RatePair::new(22.0, 11.0)),
        ])
        .unwrap();

        assert_eq!(table.rate(5, TableSelector::Full), None);
        assert_eq!(table.rate(6, TableSelector::Full), Some(20.0));
        assert_eq!(table.rate(7, TableSelector::Half), Some(11.0));
        assert_eq!(table.rate(8, TableSelector::Half), None);
    }

    #[test]
    fn test_selector_parsing() {
        assert_eq!("full".parse::<TableSelector>().unwrap(), TableSelector::Full);
        assert_eq!("Cheia".parse::<TableSelector>().unwrap(), TableSelector::Full);
        assert_eq!("m".parse::<TableSelector>().unwrap(), TableSelector::Half);
        assert_eq!(" half ".parse::<TableSelector>().unwrap(), TableSelector::Half);
        assert!("quarter".parse::<TableSelector>().is_err());
    }

    #[test]
    fn test_selector_deserializes_shop_floor_names() {
        let parse = |json: &str| serde_json::from_str::<TableSelector>(json);
        assert_eq!(parse(r#""full""#).unwrap(), TableSelector::Full);
        assert_eq!(parse(r#""metade""#).unwrap(), TableSelector::Half);
        assert_eq!(parse(r#""C""#).unwrap(), TableSelector::Full);
        assert!(parse(r#""quarter""#).is_err());
        assert_eq!(serde_json::to_string(&TableSelector::Half).unwrap(), r#""half""#);
    }

    #[test]
    fn test_selector_from_csv_rows() {
        #[derive(Deserialize)]
        struct Row {
            id: String,
            table: Option<TableSelector>,
        }

        let data = "id,table\na,cheia\nb,m\nc,half\nd,\n";
        let rows: Vec<Row> = csv::Reader::from_reader(data.as_bytes())
            .deserialize()
            .collect::<Result<_, _>>()
            .unwrap();

        let tables: Vec<(&str, Option<TableSelector>)> =
            rows.iter().map(|r| (r.id.as_str(), r.table)).collect();
        assert_eq!(
            tables,
            vec![
                ("a", Some(TableSelector::Full)),
                ("b", Some(TableSelector::Half)),
                ("c", Some(TableSelector::Half)),
                ("d", None),
            ]
        );
    }
}
