//! Dense calendar range backing the timeline strip.
//!
//! Memories are sparse; the strip is dense. One `DateTick` per calendar day
//! between the configured bounds, joined against records by ISO key.

use chrono::{Datelike, NaiveDate};

/// One calendar day on the timeline strip.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DateTick {
    /// Canonical `YYYY-MM-DD` key, used to look up the record for this day.
    pub iso: String,
    /// Short label under the tick, e.g. "JUL. 30".
    pub label: String,
    /// Full English month name, e.g. "July". Drives month grouping.
    pub month_name: String,
}

/// Canonical `YYYY-MM-DD` form of a date.
pub fn iso_key(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// Generate one tick per day in `[start, end]`, ascending.
///
/// Inclusive of both bounds. `start > end` yields an empty vec (fails closed).
/// Pure and deterministic: identical inputs always produce identical ticks,
/// labels use fixed English month names.
pub fn generate_date_range(start: NaiveDate, end: NaiveDate) -> Vec<DateTick> {
    let mut ticks = Vec::new();
    let mut current = start;
    while current <= end {
        let abbr = current.format("%b").to_string().to_uppercase();
        ticks.push(DateTick {
            iso: iso_key(current),
            label: format!("{}. {}", abbr, current.day()),
            month_name: current.format("%B").to_string(),
        });
        let Some(next) = current.succ_opt() else {
            break;
        };
        current = next;
    }
    ticks
}

/// Whether tick `idx` begins a new month group.
///
/// True for the first tick, or when the month name differs from the
/// immediately preceding tick's.
pub fn starts_month(ticks: &[DateTick], idx: usize) -> bool {
    if idx == 0 {
        return true;
    }
    match (ticks.get(idx), ticks.get(idx - 1)) {
        (Some(tick), Some(prev)) => tick.month_name != prev.month_name,
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_inclusive_day_count() {
        let start = date(2024, 9, 1);
        let end = date(2025, 12, 31);
        let ticks = generate_date_range(start, end);
        let expected = (end - start).num_days() as usize + 1;
        assert_eq!(ticks.len(), expected);
        assert_eq!(ticks.first().unwrap().iso, "2024-09-01");
        assert_eq!(ticks.last().unwrap().iso, "2025-12-31");
    }

    #[test]
    fn test_keys_unique_and_ascending() {
        let ticks = generate_date_range(date(2025, 1, 1), date(2025, 3, 31));
        for pair in ticks.windows(2) {
            assert!(pair[0].iso < pair[1].iso);
        }
    }

    #[test]
    fn test_reversed_bounds_yield_empty() {
        assert!(generate_date_range(date(2025, 7, 30), date(2025, 7, 29)).is_empty());
    }

    #[test]
    fn test_single_day_range() {
        let ticks = generate_date_range(date(2025, 7, 30), date(2025, 7, 30));
        assert_eq!(ticks.len(), 1);
        assert_eq!(ticks[0].iso, "2025-07-30");
    }

    #[test]
    fn test_label_formatting() {
        let ticks = generate_date_range(date(2025, 7, 30), date(2025, 7, 30));
        assert_eq!(ticks[0].label, "JUL. 30");
        assert_eq!(ticks[0].month_name, "July");
    }

    #[test]
    fn test_label_has_no_leading_zero() {
        let ticks = generate_date_range(date(2025, 3, 5), date(2025, 3, 5));
        assert_eq!(ticks[0].label, "MAR. 5");
    }

    #[test]
    fn test_leap_day_present() {
        let ticks = generate_date_range(date(2024, 2, 28), date(2024, 3, 1));
        let keys: Vec<&str> = ticks.iter().map(|t| t.iso.as_str()).collect();
        assert_eq!(keys, ["2024-02-28", "2024-02-29", "2024-03-01"]);
    }

    #[test]
    fn test_months_group_contiguously() {
        // Once a month name is left behind it must never reappear.
        let ticks = generate_date_range(date(2024, 9, 1), date(2025, 12, 31));
        let mut seen: Vec<String> = Vec::new();
        for (idx, tick) in ticks.iter().enumerate() {
            if starts_month(&ticks, idx) {
                seen.push(tick.month_name.clone());
            } else {
                assert_eq!(Some(&tick.month_name), seen.last());
            }
        }
        // 4 months of 2024 + 12 of 2025, September appears twice.
        assert_eq!(seen.len(), 16);
    }

    #[test]
    fn test_starts_month_at_boundaries() {
        let ticks = generate_date_range(date(2025, 1, 30), date(2025, 2, 2));
        assert!(starts_month(&ticks, 0));
        assert!(!starts_month(&ticks, 1));
        assert!(starts_month(&ticks, 2)); // Feb 1
        assert!(!starts_month(&ticks, 3));
    }

    #[test]
    fn test_determinism() {
        let a = generate_date_range(date(2025, 5, 1), date(2025, 6, 15));
        let b = generate_date_range(date(2025, 5, 1), date(2025, 6, 15));
        assert_eq!(a, b);
    }
}
