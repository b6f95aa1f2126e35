//! Business-day calendar and arithmetic.
//!
//! A date is a business day when it is neither a Saturday nor a Sunday and
//! not listed as a holiday. The holiday set is fixed once the calendar is
//! built; there is no way to mutate it afterwards.
//!
//! All arithmetic walks one calendar day at a time. Offsets in this domain
//! are bounded by a few hundred business days, so the linear walk is fine.

mod holidays;

use std::collections::BTreeMap;

use jiff::civil::{Date, Weekday};
use jiff::{Span, ToSpan};

/// Name given to holidays supplied through configuration.
const EXTRA_HOLIDAY: &str = "Additional holiday";

/// An immutable business-day calendar.
#[derive(Debug, Clone, Default)]
pub struct Calendar {
    holidays: BTreeMap<Date, &'static str>,
}

impl Calendar {
    /// A calendar where only weekends are non-business days.
    pub fn weekends_only() -> Self {
        Self::default()
    }

    /// The built-in calendar: weekends plus Australian national public holidays.
    pub fn australia() -> Self {
        Self {
            holidays: holidays::AUSTRALIA.iter().copied().collect(),
        }
    }

    /// Returns this calendar with additional holidays.
    ///
    /// Dates already present keep their existing name.
    #[must_use]
    pub fn with_extra_holidays(mut self, dates: impl IntoIterator<Item = Date>) -> Self {
        for date in dates {
            self.holidays.entry(date).or_insert(EXTRA_HOLIDAY);
        }
        self
    }

    /// The holiday name for `date`, if it is a holiday.
    pub fn holiday(&self, date: Date) -> Option<&'static str> {
        self.holidays.get(&date).copied()
    }

    /// Whether `date` is a business day.
    pub fn is_business_day(&self, date: Date) -> bool {
        !is_weekend(date) && !self.holidays.contains_key(&date)
    }

    /// Moves `n` business days forward from `start`.
    ///
    /// `start` itself is never counted. For `n > 0` the result is always a
    /// business day; for `n = 0`, `start` is returned as-is.
    pub fn add_business_days(&self, start: Date, n: u32) -> Date {
        self.walk(start, 1.day(), n)
    }

    /// Moves `n` business days backward from `start`. Mirror of
    /// [`Calendar::add_business_days`].
    pub fn subtract_business_days(&self, start: Date, n: u32) -> Date {
        self.walk(start, 1.day().negate(), n)
    }

    /// Signed business-day distance from `from` to `to`.
    ///
    /// Forward, this counts the business days in `(from, to]`. Backward, it
    /// is the negated count of business days in `[to, from)`, so that
    /// `business_days_between(d, subtract_business_days(d, n)) == -n`.
    pub fn business_days_between(&self, from: Date, to: Date) -> i64 {
        if to >= from {
            let count = from
                .series(1.day())
                .skip(1)
                .take_while(|d| *d <= to)
                .filter(|d| self.is_business_day(*d))
                .count();
            i64::try_from(count).unwrap_or(i64::MAX)
        } else {
            let count = to
                .series(1.day())
                .take_while(|d| *d < from)
                .filter(|d| self.is_business_day(*d))
                .count();
            -i64::try_from(count).unwrap_or(i64::MAX)
        }
    }

    /// Steps from `start` in `step` increments, stopping on the `n`th
    /// business day. Saturates at the last business day reached if the
    /// representable date range runs out first.
    fn walk(&self, start: Date, step: Span, n: u32) -> Date {
        start
            .series(step)
            .skip(1)
            .filter(|d| self.is_business_day(*d))
            .take(n as usize)
            .last()
            .unwrap_or(start)
    }
}

/// Whether `date` falls on a Saturday or Sunday.
pub fn is_weekend(date: Date) -> bool {
    matches!(date.weekday(), Weekday::Saturday | Weekday::Sunday)
}

/// Full English weekday name, e.g. `"Monday"`.
pub fn weekday_name(date: Date) -> String {
    date.strftime("%A").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    use jiff::civil::date;

    #[test]
    fn weekends_are_not_business_days() {
        let cal = Calendar::weekends_only();
        assert!(!cal.is_business_day(date(2026, 1, 3)));
        assert!(!cal.is_business_day(date(2026, 1, 4)));
        assert!(cal.is_business_day(date(2026, 1, 5)));
    }

    #[test]
    fn holidays_are_not_business_days() {
        let cal = Calendar::australia();
        assert!(!cal.is_business_day(date(2026, 1, 26)));
        assert_eq!(cal.holiday(date(2026, 1, 26)), Some("Australia Day"));
        assert!(cal.is_business_day(date(2026, 1, 27)));
    }

    #[test]
    fn extra_holidays_extend_the_set() {
        let cal = Calendar::australia().with_extra_holidays([date(2026, 12, 24)]);
        assert!(!cal.is_business_day(date(2026, 12, 24)));
        assert_eq!(cal.holiday(date(2026, 12, 24)), Some(EXTRA_HOLIDAY));
        let builtin = Calendar::australia();
        assert!(!builtin.holidays.contains_key(&date(2026, 12, 24)));
    }

    #[test]
    fn extra_holiday_does_not_rename_builtin() {
        let cal = Calendar::australia().with_extra_holidays([date(2026, 1, 1)]);
        assert_eq!(cal.holiday(date(2026, 1, 1)), Some("New Year's Day"));
    }

    #[test]
    fn add_zero_returns_start_even_on_weekend() {
        let cal = Calendar::australia();
        let saturday = date(2026, 1, 24);
        assert_eq!(cal.add_business_days(saturday, 0), saturday);
        assert_eq!(cal.subtract_business_days(saturday, 0), saturday);
    }

    #[test]
    fn add_skips_weekend_and_holiday() {
        let cal = Calendar::australia();
        // Friday 23 Jan 2026 → skip Sat, Sun, Australia Day Monday.
        assert_eq!(
            cal.add_business_days(date(2026, 1, 23), 1),
            date(2026, 1, 27)
        );
    }

    #[test]
    fn subtract_skips_weekend_and_holiday() {
        let cal = Calendar::australia();
        assert_eq!(
            cal.subtract_business_days(date(2026, 1, 27), 1),
            date(2026, 1, 23)
        );
        // Across the Christmas / New Year break.
        assert_eq!(
            cal.subtract_business_days(date(2026, 1, 5), 5),
            date(2025, 12, 24)
        );
    }

    #[test]
    fn add_from_non_business_day() {
        let cal = Calendar::australia();
        // Christmas Eve 2025 + 3 → skips 25th, 26th and the weekend.
        assert_eq!(
            cal.add_business_days(date(2025, 12, 24), 3),
            date(2025, 12, 31)
        );
        // Starting on a Sunday, the first business day is Monday.
        assert_eq!(cal.add_business_days(date(2026, 1, 4), 1), date(2026, 1, 5));
    }

    #[test]
    fn added_dates_are_business_days() {
        let cal = Calendar::australia();
        let starts = date(2025, 1, 1).series(1.day()).take(760);
        for start in starts {
            for n in [1, 2, 5, 15, 30, 120] {
                let end = cal.add_business_days(start, n);
                assert!(cal.is_business_day(end), "{start} + {n} = {end}");
                assert!(end > start);
            }
        }
    }

    #[test]
    fn count_between_start_and_result_matches_n() {
        let cal = Calendar::australia();
        let starts = date(2025, 1, 1).series(1.day()).take(760);
        for start in starts {
            for n in [0, 1, 7, 30, 55, 120] {
                let end = cal.add_business_days(start, n);
                assert_eq!(cal.business_days_between(start, end), i64::from(n));
            }
        }
    }

    #[test]
    fn between_backward_is_negative_mirror() {
        let cal = Calendar::australia();
        let start = date(2026, 1, 5);
        for n in [1, 5, 10, 40] {
            let earlier = cal.subtract_business_days(start, n);
            assert_eq!(cal.business_days_between(start, earlier), -i64::from(n));
        }
    }

    #[test]
    fn between_same_day_is_zero() {
        let cal = Calendar::australia();
        assert_eq!(
            cal.business_days_between(date(2026, 1, 5), date(2026, 1, 5)),
            0
        );
    }

    #[test]
    fn between_filing_and_stop_clock() {
        let cal = Calendar::australia();
        assert_eq!(
            cal.business_days_between(date(2026, 1, 5), date(2026, 1, 20)),
            11
        );
    }

    #[test]
    fn add_saturates_at_end_of_range() {
        let cal = Calendar::weekends_only();
        let end = cal.add_business_days(Date::MAX, 3);
        assert_eq!(end, Date::MAX);
    }

    #[test]
    fn weekday_names() {
        assert_eq!(weekday_name(date(2026, 1, 5)), "Monday");
        assert_eq!(weekday_name(date(2026, 6, 26)), "Friday");
    }
}
