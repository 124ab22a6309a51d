//! Turns a [`BarSeries`] into a [`BarTable`] according to a [`TableLayout`].
//!
//! One row is produced per bar, in the order the provider returned them. The
//! `Datetime` cell is rendered from the epoch-millisecond timestamp; every other
//! cell is the provider's number rendered as-is. Optional fields missing from a
//! bar become empty cells.

use crate::errors::NoDataReason;
use crate::models::{
    bar::Bar,
    bar_series::BarSeries,
    table::{BarTable, Column, TableLayout},
};
use crate::tz::render_datetime;

/// Builds the export table for one symbol.
///
/// Fails only if a timestamp cannot be represented as a datetime.
pub fn to_table(series: &BarSeries, layout: &TableLayout) -> Result<BarTable, NoDataReason> {
    let columns = layout.columns.columns();

    let rows = series
        .bars
        .iter()
        .enumerate()
        .map(|(row, bar)| {
            let datetime = bar
                .timestamp()
                .map(|dt| render_datetime(dt, layout.datetime))
                .ok_or(NoDataReason::InvalidTimestamp {
                    row,
                    timestamp_ms: bar.timestamp_ms,
                })?;

            Ok(columns
                .iter()
                .map(|col| cell(*col, &series.symbol, &datetime, bar))
                .collect())
        })
        .collect::<Result<Vec<Vec<String>>, NoDataReason>>()?;

    Ok(BarTable::new(series.symbol.clone(), columns.to_vec(), rows))
}

fn cell(column: Column, symbol: &str, datetime: &str, bar: &Bar) -> String {
    match column {
        Column::Symbol => symbol.to_string(),
        Column::Datetime => datetime.to_string(),
        Column::Open => bar.open.to_string(),
        Column::High => bar.high.to_string(),
        Column::Low => bar.low.to_string(),
        Column::Close => bar.close.to_string(),
        Column::Volume => bar.volume.to_string(),
        Column::Vwap => bar.vwap.as_ref().map(ToString::to_string).unwrap_or_default(),
        Column::TradeCount => bar
            .trade_count
            .as_ref()
            .map(ToString::to_string)
            .unwrap_or_default(),
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;
    use serde_json::Number;

    use super::*;
    use crate::models::table::{ColumnSet, DatetimeMode};
    use crate::tz::US_EASTERN;

    fn bar(ts: i64, close: f64) -> Bar {
        Bar {
            timestamp_ms: ts,
            open: Number::from_f64(138.5).unwrap(),
            high: Number::from_f64(138.7).unwrap(),
            low: Number::from_f64(138.41).unwrap(),
            close: Number::from_f64(close).unwrap(),
            volume: Number::from(1200),
            vwap: Number::from_f64(138.5012),
            trade_count: Some(Number::from(31)),
        }
    }

    fn series(bars: Vec<Bar>) -> BarSeries {
        BarSeries {
            symbol: "AMD".into(),
            bars,
        }
    }

    #[test]
    fn basic_layout_in_eastern_time() {
        let layout = TableLayout {
            columns: ColumnSet::Basic,
            datetime: DatetimeMode::Zoned(US_EASTERN),
        };
        let table = to_table(&series(vec![bar(1_704_205_800_000, 138.62)]), &layout).unwrap();

        assert_eq!(
            table.header(),
            vec!["Symbol", "Datetime", "Open", "High", "Low", "Close", "Volume"]
        );
        assert_eq!(
            table.rows()[0],
            vec!["AMD", "2024-01-02 09:30:00", "138.5", "138.7", "138.41", "138.62", "1200"]
        );
    }

    #[test]
    fn extended_layout_in_naive_utc() {
        let table = to_table(
            &series(vec![bar(1_704_205_800_000, 138.62)]),
            &TableLayout {
                columns: ColumnSet::Extended,
                datetime: DatetimeMode::NaiveUtc,
            },
        )
        .unwrap();

        assert_eq!(table.header()[7..], ["Volume Weighted Average Price", "Number of Transactions"]);
        assert_eq!(table.rows()[0][1], "2024-01-02 14:30:00");
        assert_eq!(table.rows()[0][7..], ["138.5012", "31"]);
    }

    #[test]
    fn missing_optional_fields_are_blank() {
        let mut b = bar(1_704_205_800_000, 1.0);
        b.vwap = None;
        b.trade_count = None;
        let layout = TableLayout {
            columns: ColumnSet::Extended,
            datetime: DatetimeMode::NaiveUtc,
        };
        let table = to_table(&series(vec![b]), &layout).unwrap();
        assert_eq!(table.rows()[0][7..], ["", ""]);
    }

    #[test]
    fn unrepresentable_timestamp_is_rejected() {
        let err = to_table(
            &series(vec![bar(1_704_205_800_000, 1.0), bar(i64::MAX, 1.0)]),
            &TableLayout::default(),
        )
        .unwrap_err();
        assert_eq!(
            err,
            NoDataReason::InvalidTimestamp {
                row: 1,
                timestamp_ms: i64::MAX
            }
        );
    }

    #[test]
    fn every_short_code_lands_under_its_label() {
        let body = r#"{"results": [
            {"t": 1704205800000, "o": 1.5, "h": 2.5, "l": 0.5, "c": 1.75, "v": 300, "vw": 1.25, "n": 7}
        ]}"#;
        let bars = crate::providers::polygon_rest::response::parse_aggregates(body).unwrap();
        let layout = TableLayout {
            columns: ColumnSet::Extended,
            datetime: DatetimeMode::NaiveUtc,
        };
        let table = to_table(&series(bars), &layout).unwrap();
        let header = table.header();

        for (code, label, value) in [
            ("o", "Open", "1.5"),
            ("h", "High", "2.5"),
            ("l", "Low", "0.5"),
            ("c", "Close", "1.75"),
            ("v", "Volume", "300"),
            ("vw", "Volume Weighted Average Price", "1.25"),
            ("n", "Number of Transactions", "7"),
        ] {
            let idx = header
                .iter()
                .position(|h| *h == label)
                .unwrap_or_else(|| panic!("no column for {code}"));
            assert_eq!(table.rows()[0][idx], value, "{code} -> {label}");
        }
    }

    #[test]
    fn headers_are_unique_and_never_short_codes() {
        const SHORT_CODES: [&str; 8] = ["t", "o", "h", "l", "c", "v", "vw", "n"];
        for columns in [ColumnSet::Basic, ColumnSet::Extended] {
            let layout = TableLayout {
                columns,
                datetime: DatetimeMode::NaiveUtc,
            };
            let header = to_table(&series(vec![bar(1_704_205_800_000, 1.0)]), &layout)
                .unwrap()
                .header();

            let distinct: std::collections::HashSet<_> = header.iter().collect();
            assert_eq!(distinct.len(), header.len());
            assert!(header.iter().all(|h| !SHORT_CODES.contains(h)));
        }
    }

    proptest! {
        #[test]
        fn one_row_per_bar_in_order(
            offsets in proptest::collection::vec(0i64..10_000_000, 1..50),
            extended in any::<bool>(),
        ) {
            let base = 1_704_205_800_000i64;
            let bars: Vec<Bar> = offsets
                .iter()
                .enumerate()
                .map(|(i, off)| bar(base + off * 60_000, 100.0 + i as f64))
                .collect();
            let layout = TableLayout {
                columns: if extended { ColumnSet::Extended } else { ColumnSet::Basic },
                datetime: DatetimeMode::NaiveUtc,
            };

            let table = to_table(&series(bars.clone()), &layout).unwrap();
            prop_assert_eq!(table.len(), bars.len());

            let close_idx = table.columns().iter().position(|c| *c == Column::Close).unwrap();
            for (row, b) in table.rows().iter().zip(&bars) {
                prop_assert_eq!(row.len(), table.columns().len());
                prop_assert_eq!(&row[close_idx], &b.close.to_string());
                prop_assert_eq!(&row[0], "AMD");
            }
        }
    }
}
