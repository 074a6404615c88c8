//! Display strings: Persian digits, month and weekday names, value formatting.
use chrono::{NaiveDate, Weekday};

use crate::calendar::grid::column_weekdays;
use crate::calendar::{to_jalali, DisplayedMonth};
use crate::selection::SelectionValue;

pub const PERSIAN_MONTHS: [&str; 12] = [
    "فروردین", "اردیبهشت", "خرداد", "تیر", "مرداد", "شهریور",
    "مهر", "آبان", "آذر", "دی", "بهمن", "اسفند",
];

/// Saturday-first weekday abbreviations.
pub const PERSIAN_WEEKDAYS: [&str; 7] = ["ش", "ی", "د", "س", "چ", "پ", "ج"];

const PERSIAN_DIGITS: [char; 10] = ['۰', '۱', '۲', '۳', '۴', '۵', '۶', '۷', '۸', '۹'];

/// Range separator used by the default formatter.
pub const RANGE_SEPARATOR: &str = " – ";

/// Replaces ASCII digits with Persian ones; everything else passes through.
pub fn to_persian_digits(s: &str) -> String {
    s.chars()
        .map(|c| match c.to_digit(10) {
            Some(d) => PERSIAN_DIGITS[d as usize],
            None    => c,
        })
        .collect()
}

fn digits(s: String, persian: bool) -> String {
    if persian { to_persian_digits(&s) } else { s }
}

/// `yyyy/mm/dd` in the Jalali calendar. Days outside the convertible range
/// fall back to ISO Gregorian.
pub fn format_date(date: NaiveDate, persian: bool) -> String {
    let text = match to_jalali(date) {
        Ok(j)  => j.to_string(),
        Err(_) => date.format("%Y-%m-%d").to_string(),
    };
    digits(text, persian)
}

/// Default rendering of a selection: empty when unset, `start – end` for a
/// completed range, just the start for a pending one.
pub fn format_value(value: &SelectionValue, persian: bool) -> String {
    match value {
        SelectionValue::Single(None)    => String::new(),
        SelectionValue::Single(Some(d)) => format_date(*d, persian),
        SelectionValue::Range(r) => match (r.start(), r.end()) {
            (Some(s), Some(e)) => format!(
                "{}{RANGE_SEPARATOR}{}",
                format_date(s, persian),
                format_date(e, persian)
            ),
            (Some(s), None) => format_date(s, persian),
            _ => String::new(),
        },
    }
}

/// Month heading, e.g. `فروردین ۱۴۰۳`.
pub fn month_title(month: DisplayedMonth, persian: bool) -> String {
    let name = PERSIAN_MONTHS[(month.jm() - 1) as usize];
    digits(format!("{name} {}", month.jy()), persian)
}

pub fn day_label(jd: u32, persian: bool) -> String {
    digits(jd.to_string(), persian)
}

/// Weekday header row in column order.
pub fn weekday_labels(week_start: Weekday) -> [&'static str; 7] {
    column_weekdays(week_start).map(|i| PERSIAN_WEEKDAYS[i as usize])
}
