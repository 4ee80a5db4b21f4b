//! Hijri (Islamic lunar) calendar seam
//!
//! The GEDCOM engine mirrors every decoded Gregorian date into the Hijri
//! calendar. The conversion itself sits behind [`HijriConverter`] so an
//! observational calendar can be swapped in; [`TabularHijri`] is the
//! arithmetic default.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

/// A date in the Hijri calendar
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HijriDate {
    pub year: i64,
    pub month: u32,
    pub day: u32,
}

impl std::fmt::Display for HijriDate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:04}-{:02}-{:02}", self.year, self.month, self.day)
    }
}

/// Gregorian to Hijri conversion
///
/// Implementations must be pure: the same input always yields the same
/// output. `None` means the date cannot be represented.
pub trait HijriConverter {
    fn to_hijri(&self, date: NaiveDate) -> Option<HijriDate>;
}

/// Julian day number of 1 Muharram 1 AH in the civil (Friday) epoch
const CIVIL_EPOCH_JDN: i64 = 1_948_440;

/// `num_days_from_ce` is 1 for 0001-01-01, whose Julian day number is 1721426
const CE_TO_JDN: i64 = 1_721_425;

/// Arithmetic (tabular) Islamic calendar with the civil epoch and the
/// 30-year leap cycle 2, 5, 7, 10, 13, 16, 18, 21, 24, 26, 29.
#[derive(Debug, Clone, Copy, Default)]
pub struct TabularHijri;

impl HijriConverter for TabularHijri {
    fn to_hijri(&self, date: NaiveDate) -> Option<HijriDate> {
        let jdn = i64::from(date.num_days_from_ce()) + CE_TO_JDN;
        if jdn < CIVIL_EPOCH_JDN {
            return None;
        }

        let mut l = jdn - CIVIL_EPOCH_JDN + 10632;
        let n = (l - 1) / 10631;
        l = l - 10631 * n + 354;
        let j = ((10985 - l) / 5316) * ((50 * l) / 17719) + (l / 5670) * ((43 * l) / 15238);
        l = l - ((30 - j) / 15) * ((17719 * j) / 50) - (j / 16) * ((15238 * j) / 43) + 29;
        let month = (24 * l) / 709;
        let day = l - (709 * month) / 24;
        let year = 30 * n + j - 30;

        Some(HijriDate {
            year,
            month: u32::try_from(month).ok()?,
            day: u32::try_from(day).ok()?,
        })
    }
}
