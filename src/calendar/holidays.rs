//! Built-in public holiday list.
//!
//! Australian national public holidays, 2025–2027. Where a holiday falls on a
//! weekend and a substitute weekday is observed nationally, the substitute is
//! listed instead. Fixed at build time; extend through `extra-holidays` in the
//! config file rather than editing this list at runtime.

use jiff::civil::{Date, date};

/// `(date, name)` pairs, in chronological order.
pub const AUSTRALIA: &[(Date, &str)] = &[
    // 2025
    (date(2025, 1, 1), "New Year's Day"),
    (date(2025, 1, 27), "Australia Day (observed)"),
    (date(2025, 4, 18), "Good Friday"),
    (date(2025, 4, 21), "Easter Monday"),
    (date(2025, 4, 25), "Anzac Day"),
    (date(2025, 6, 9), "King's Birthday"),
    (date(2025, 12, 25), "Christmas Day"),
    (date(2025, 12, 26), "Boxing Day"),
    // 2026
    (date(2026, 1, 1), "New Year's Day"),
    (date(2026, 1, 26), "Australia Day"),
    (date(2026, 4, 3), "Good Friday"),
    (date(2026, 4, 6), "Easter Monday"),
    (date(2026, 4, 25), "Anzac Day"),
    (date(2026, 6, 8), "King's Birthday"),
    (date(2026, 12, 25), "Christmas Day"),
    (date(2026, 12, 28), "Boxing Day (observed)"),
    // 2027
    (date(2027, 1, 1), "New Year's Day"),
    (date(2027, 1, 26), "Australia Day"),
    (date(2027, 3, 26), "Good Friday"),
    (date(2027, 3, 29), "Easter Monday"),
    (date(2027, 4, 26), "Anzac Day (observed)"),
    (date(2027, 6, 14), "King's Birthday"),
    (date(2027, 12, 27), "Christmas Day (observed)"),
    (date(2027, 12, 28), "Boxing Day (observed)"),
];
