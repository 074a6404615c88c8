//! Jalali (Persian solar Hijri) calendar math.
//!
//! Gregorian days are plain [`NaiveDate`]s, so time-of-day never takes part in
//! a comparison. Jalali dates are always derived on demand; nothing here keeps
//! both representations side by side.
use chrono::{Datelike, Days, NaiveDate};
use std::fmt;
use std::str::FromStr;

use crate::error::CalendarError;

pub mod grid;

/// Earliest Jalali year covered by the leap table.
pub const MIN_YEAR: i32 = -61;
/// Latest Jalali year covered by the leap table.
pub const MAX_YEAR: i32 = 3177;

/// Jalali years at which the leap-cycle pattern shifts.
const BREAKS: [i32; 20] = [
    -61, 9, 38, 199, 426, 686, 756, 818, 1111, 1181, 1210, 1635, 2060, 2097, 2192, 2262, 2324,
    2394, 2456, 3178,
];

// ─── Data types ───────────────────────────────────────────────────────────────

/// A day in the Jalali calendar. Field order makes the derived `Ord`
/// chronological.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct JalaliDate {
    pub jy: i32,
    pub jm: u32,
    pub jd: u32,
}

impl JalaliDate {
    /// Builds a date, rejecting days that do not exist.
    pub fn new(jy: i32, jm: u32, jd: u32) -> Result<Self, CalendarError> {
        validate(jy, jm, jd)?;
        Ok(Self { jy, jm, jd })
    }

    pub fn from_gregorian(date: NaiveDate) -> Result<Self, CalendarError> {
        to_jalali(date)
    }

    pub fn to_gregorian(&self) -> Result<NaiveDate, CalendarError> {
        to_gregorian(*self)
    }
}

impl fmt::Display for JalaliDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{:02}/{:02}", self.jy, self.jm, self.jd)
    }
}

impl FromStr for JalaliDate {
    type Err = CalendarError;

    /// Reads `yyyy/mm/dd`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parse_err = |reason: &str| CalendarError::Parse {
            input:  s.to_owned(),
            reason: reason.to_owned(),
        };
        let parts: Vec<&str> = s.trim().split('/').collect();
        let [y, m, d] = parts.as_slice() else {
            return Err(parse_err("expected yyyy/mm/dd"));
        };
        let jy = y.parse::<i32>().map_err(|_| parse_err("year is not a number"))?;
        let jm = m.parse::<u32>().map_err(|_| parse_err("month is not a number"))?;
        let jd = d.parse::<u32>().map_err(|_| parse_err("day is not a number"))?;
        JalaliDate::new(jy, jm, jd)
    }
}

/// Leap position and the Gregorian anchor of a Jalali year.
struct YearInfo {
    /// Years since the last leap year; 0 means this year is leap.
    leap:  i32,
    /// Gregorian year in which this Jalali year begins.
    gy:    i32,
    /// Day of March on which Farvardin 1 falls.
    march: u32,
}

fn year_info(jy: i32) -> Result<YearInfo, CalendarError> {
    if !(MIN_YEAR..=MAX_YEAR).contains(&jy) {
        return Err(CalendarError::YearOutOfRange { jy, min: MIN_YEAR, max: MAX_YEAR });
    }

    let gy = jy + 621;
    let mut leap_j = -14;
    let mut jp     = BREAKS[0];
    let mut jump   = 0;
    for &brk in &BREAKS[1..] {
        jump = brk - jp;
        if jy < brk { break; }
        leap_j += jump / 33 * 8 + (jump % 33) / 4;
        jp = brk;
    }

    let mut n = jy - jp;
    leap_j += n / 33 * 8 + (n % 33 + 3) / 4;
    if jump % 33 == 4 && jump - n == 4 {
        leap_j += 1;
    }

    let leap_g = gy / 4 - (gy / 100 + 1) * 3 / 4 - 150;
    let march  = 20 + leap_j - leap_g;

    if jump - n < 6 {
        n = n - jump + (jump + 4) / 33 * 33;
    }
    let mut leap = ((n + 1) % 33 - 1) % 4;
    if leap == -1 { leap = 4; }

    Ok(YearInfo { leap, gy, march: march as u32 })
}

fn validate(jy: i32, jm: u32, jd: u32) -> Result<(), CalendarError> {
    if !(MIN_YEAR..=MAX_YEAR).contains(&jy) {
        return Err(CalendarError::YearOutOfRange { jy, min: MIN_YEAR, max: MAX_YEAR });
    }
    if !(1..=12).contains(&jm) {
        return Err(CalendarError::InvalidMonth { jm });
    }
    if jd < 1 || jd > month_length(jy, jm) {
        return Err(CalendarError::InvalidDate { jy, jm, jd });
    }
    Ok(())
}

// ─── Public API ───────────────────────────────────────────────────────────────

/// Converts a Gregorian day to its Jalali counterpart.
pub fn to_jalali(date: NaiveDate) -> Result<JalaliDate, CalendarError> {
    let mut jy = date.year() - 621;
    // Days before Nowruz belong to the previous Jalali year.
    if jy > MAX_YEAR || nowruz(jy).is_ok_and(|n| date < n) {
        jy -= 1;
    }

    let mut k = (date - nowruz(jy)?).num_days();
    let year_days = if is_leap_year(jy) { 366 } else { 365 };
    if k >= year_days {
        return Err(CalendarError::YearOutOfRange { jy: jy + 1, min: MIN_YEAR, max: MAX_YEAR });
    }
    if k <= 185 {
        return Ok(JalaliDate { jy, jm: 1 + (k / 31) as u32, jd: (k % 31) as u32 + 1 });
    }
    k -= 186;
    Ok(JalaliDate { jy, jm: 7 + (k / 30) as u32, jd: (k % 30) as u32 + 1 })
}

/// Gregorian date of Farvardin 1.
fn nowruz(jy: i32) -> Result<NaiveDate, CalendarError> {
    let info = year_info(jy)?;
    NaiveDate::from_ymd_opt(info.gy, 3, info.march)
        .ok_or(CalendarError::YearOutOfRange { jy, min: MIN_YEAR, max: MAX_YEAR })
}

/// Converts a Jalali date to Gregorian, failing on days the month lacks.
pub fn to_gregorian(date: JalaliDate) -> Result<NaiveDate, CalendarError> {
    let JalaliDate { jy, jm, jd } = date;
    validate(jy, jm, jd)?;

    let (m, d) = (jm as i64, jd as i64);
    let day_of_year = (m - 1) * 31 - (m / 7) * (m - 7) + d - 1;

    nowruz(jy)?
        .checked_add_days(Days::new(day_of_year as u64))
        .ok_or(CalendarError::YearOutOfRange { jy, min: MIN_YEAR, max: MAX_YEAR })
}

/// True when Esfand has 30 days in `jy`.
pub fn is_leap_year(jy: i32) -> bool {
    year_info(jy).is_ok_and(|info| info.leap == 0)
}

/// Days in a Jalali month: 31 for months 1-6, 30 for 7-11, 29 or 30 for 12.
/// Returns 0 when the month or year cannot be represented.
pub fn month_length(jy: i32, jm: u32) -> u32 {
    if !(MIN_YEAR..=MAX_YEAR).contains(&jy) { return 0; }
    match jm {
        1..=6  => 31,
        7..=11 => 30,
        12 if is_leap_year(jy) => 30,
        12 => 29,
        _  => 0,
    }
}

pub fn is_valid_jalali_date(jy: i32, jm: u32, jd: u32) -> bool {
    validate(jy, jm, jd).is_ok()
}

/// Weekday index with Saturday as 0 through Friday as 6.
pub fn weekday(date: NaiveDate) -> u32 {
    (date.weekday().num_days_from_sunday() + 1) % 7
}

// ─── Displayed month ──────────────────────────────────────────────────────────

/// The Jalali year/month a calendar is showing. Always inside the supported
/// year range, so building its grid cannot fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DisplayedMonth {
    jy: i32,
    jm: u32,
}

impl DisplayedMonth {
    /// Dey 1348, the month holding the Unix epoch.
    pub const EPOCH: DisplayedMonth = DisplayedMonth { jy: 1348, jm: 10 };

    pub fn new(jy: i32, jm: u32) -> Result<Self, CalendarError> {
        if !(MIN_YEAR..=MAX_YEAR).contains(&jy) {
            return Err(CalendarError::YearOutOfRange { jy, min: MIN_YEAR, max: MAX_YEAR });
        }
        if !(1..=12).contains(&jm) {
            return Err(CalendarError::InvalidMonth { jm });
        }
        Ok(Self { jy, jm })
    }

    /// The month a Gregorian day falls in.
    pub fn containing(date: NaiveDate) -> Result<Self, CalendarError> {
        let j = to_jalali(date)?;
        Ok(Self { jy: j.jy, jm: j.jm })
    }

    pub fn jy(&self) -> i32 { self.jy }
    pub fn jm(&self) -> u32 { self.jm }

    pub fn days(&self) -> u32 {
        month_length(self.jy, self.jm)
    }

    /// Gregorian date of day 1.
    pub fn first_day(&self) -> NaiveDate {
        to_gregorian(JalaliDate { jy: self.jy, jm: self.jm, jd: 1 })
            .expect("displayed month is always within the supported range")
    }

    pub fn contains(&self, date: &JalaliDate) -> bool {
        date.jy == self.jy && date.jm == self.jm
    }

    /// Moves by `delta` months with year rollover, saturating at the ends of
    /// the supported range.
    pub fn offset(self, delta: i32) -> Self {
        let lo  = MIN_YEAR as i64 * 12;
        let hi  = MAX_YEAR as i64 * 12 + 11;
        let idx = (self.jy as i64 * 12 + (self.jm as i64 - 1) + delta as i64).clamp(lo, hi);
        Self {
            jy: idx.div_euclid(12) as i32,
            jm: idx.rem_euclid(12) as u32 + 1,
        }
    }

    pub fn next(self) -> Self { self.offset(1) }
    pub fn prev(self) -> Self { self.offset(-1) }
}

impl fmt::Display for DisplayedMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{:02}", self.jy, self.jm)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn g(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn j(jy: i32, jm: u32, jd: u32) -> JalaliDate {
        JalaliDate { jy, jm, jd }
    }

    #[test]
    fn converts_known_dates() {
        assert_eq!(to_gregorian(j(1403, 1, 1)).unwrap(), g(2024, 3, 20));
        assert_eq!(to_gregorian(j(1403, 2, 10)).unwrap(), g(2024, 4, 29));
        assert_eq!(to_gregorian(j(1403, 7, 1)).unwrap(), g(2024, 9, 22));
        assert_eq!(to_gregorian(j(1348, 10, 11)).unwrap(), g(1970, 1, 1));
        assert_eq!(to_jalali(g(1970, 1, 1)).unwrap(), j(1348, 10, 11));
        assert_eq!(to_jalali(g(2024, 3, 19)).unwrap(), j(1402, 12, 29));
        assert_eq!(to_jalali(g(2024, 9, 21)).unwrap(), j(1403, 6, 31));
    }

    #[test]
    fn last_day_of_leap_esfand_maps_back() {
        assert_eq!(to_gregorian(j(1403, 12, 30)).unwrap(), g(2025, 3, 20));
        assert_eq!(to_jalali(g(2025, 3, 20)).unwrap(), j(1403, 12, 30));
        assert_eq!(to_jalali(g(2021, 3, 20)).unwrap(), j(1399, 12, 30));
    }

    #[test]
    fn leap_years_follow_the_cycle() {
        for jy in [1395, 1399, 1403, 1408] {
            assert!(is_leap_year(jy), "{jy} should be leap");
        }
        for jy in [1400, 1401, 1402, 1404, 1405, 1406, 1407] {
            assert!(!is_leap_year(jy), "{jy} should not be leap");
        }
    }

    #[test]
    fn month_lengths() {
        assert_eq!(month_length(1403, 1), 31);
        assert_eq!(month_length(1403, 6), 31);
        assert_eq!(month_length(1403, 7), 30);
        assert_eq!(month_length(1403, 11), 30);
        assert_eq!(month_length(1403, 12), 30);
        assert_eq!(month_length(1402, 12), 29);
        assert_eq!(month_length(1403, 13), 0);
        assert_eq!(month_length(MAX_YEAR + 1, 1), 0);
    }

    #[test]
    fn rejects_day_past_month_end() {
        assert_eq!(
            to_gregorian(j(1402, 12, 30)),
            Err(CalendarError::InvalidDate { jy: 1402, jm: 12, jd: 30 })
        );
        assert!(matches!(to_gregorian(j(1403, 7, 31)), Err(CalendarError::InvalidDate { .. })));
        assert!(matches!(to_gregorian(j(1403, 0, 1)), Err(CalendarError::InvalidMonth { jm: 0 })));
        assert!(matches!(to_gregorian(j(4000, 1, 1)), Err(CalendarError::YearOutOfRange { .. })));
        assert!(matches!(to_jalali(g(3799, 12, 1)), Err(CalendarError::YearOutOfRange { jy: 3178, .. })));
        assert!(matches!(to_jalali(g(500, 1, 1)), Err(CalendarError::YearOutOfRange { .. })));
    }

    #[test]
    fn validity_never_panics() {
        assert!(is_valid_jalali_date(1403, 12, 30));
        assert!(!is_valid_jalali_date(1402, 12, 30));
        assert!(!is_valid_jalali_date(1403, 1, 0));
        assert!(!is_valid_jalali_date(i32::MAX, 1, 1));
        assert!(!is_valid_jalali_date(1403, u32::MAX, 1));
    }

    #[test]
    fn weekday_is_saturday_based() {
        assert_eq!(weekday(g(2026, 3, 21)), 0); // Saturday, 1405/01/01
        assert_eq!(weekday(g(2024, 3, 20)), 4); // Wednesday
        assert_eq!(weekday(g(2024, 3, 22)), 6); // Friday
    }

    #[test]
    fn parses_and_displays() {
        let d: JalaliDate = "1403/02/05".parse().unwrap();
        assert_eq!(d, j(1403, 2, 5));
        assert_eq!(d.to_string(), "1403/02/05");
        assert!(matches!("1403-02-05".parse::<JalaliDate>(), Err(CalendarError::Parse { .. })));
        assert!(matches!("1403/xx/05".parse::<JalaliDate>(), Err(CalendarError::Parse { .. })));
        assert!(matches!("1402/12/30".parse::<JalaliDate>(), Err(CalendarError::InvalidDate { .. })));
    }

    #[test]
    fn month_offset_rolls_over_years() {
        let esfand = DisplayedMonth::new(1402, 12).unwrap();
        assert_eq!(esfand.next(), DisplayedMonth::new(1403, 1).unwrap());
        let farvardin = DisplayedMonth::new(1403, 1).unwrap();
        assert_eq!(farvardin.prev(), esfand);
        assert_eq!(farvardin.offset(-13), DisplayedMonth::new(1401, 12).unwrap());
        assert_eq!(farvardin.offset(25), DisplayedMonth::new(1405, 2).unwrap());
    }

    #[test]
    fn month_offset_saturates_at_range_ends() {
        let last = DisplayedMonth::new(MAX_YEAR, 12).unwrap();
        assert_eq!(last.next(), last);
        let first = DisplayedMonth::new(MIN_YEAR, 1).unwrap();
        assert_eq!(first.prev(), first);
    }

    #[test]
    fn displayed_month_first_day_and_containing() {
        let m = DisplayedMonth::new(1403, 2).unwrap();
        assert_eq!(m.first_day(), g(2024, 4, 20));
        assert_eq!(m.days(), 31);
        assert_eq!(DisplayedMonth::containing(g(2024, 5, 9)).unwrap(), m);
        assert!(m.contains(&j(1403, 2, 31)));
        assert!(!m.contains(&j(1403, 3, 1)));
        assert_eq!(m.to_string(), "1403/02");
    }
}
