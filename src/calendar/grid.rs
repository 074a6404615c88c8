//! Month grid layout under a configurable week start.
use chrono::{Duration, NaiveDate, Weekday};

use super::{weekday, DisplayedMonth, JalaliDate};

// ─── Data types ───────────────────────────────────────────────────────────────

/// One dated slot of the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DayCell {
    pub gregorian:        NaiveDate,
    pub jalali:           JalaliDate,
    pub is_outside_month: bool,
}

/// A grid slot: either a day or an empty placeholder that carries no date
/// and can never be selected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GridCell {
    Placeholder,
    Day(DayCell),
}

impl GridCell {
    pub fn day(&self) -> Option<&DayCell> {
        match self {
            GridCell::Day(cell) => Some(cell),
            GridCell::Placeholder => None,
        }
    }

    pub fn date(&self) -> Option<NaiveDate> {
        self.day().map(|c| c.gregorian)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GridOptions {
    /// Weekday shown in the first column.
    pub week_start:        Weekday,
    /// Fill padding slots with adjacent-month days instead of placeholders.
    pub show_outside_days: bool,
}

impl Default for GridOptions {
    fn default() -> Self {
        Self { week_start: Weekday::Sat, show_outside_days: true }
    }
}

// ─── Public API ───────────────────────────────────────────────────────────────

/// Saturday-based column index of a weekday (Saturday = 0).
pub fn weekday_index(day: Weekday) -> u32 {
    (day.num_days_from_sunday() + 1) % 7
}

/// Weekday index from the Sunday = 0 … Saturday = 6 numbering used by
/// configuration. Values wrap modulo 7.
pub fn weekday_from_number(n: u8) -> Weekday {
    match n % 7 {
        0 => Weekday::Sun,
        1 => Weekday::Mon,
        2 => Weekday::Tue,
        3 => Weekday::Wed,
        4 => Weekday::Thu,
        5 => Weekday::Fri,
        _ => Weekday::Sat,
    }
}

/// Saturday-based weekday indices in column order.
pub fn column_weekdays(week_start: Weekday) -> [u32; 7] {
    let first = weekday_index(week_start);
    std::array::from_fn(|col| (first + col as u32) % 7)
}

/// Slots needed before day 1 so it lands under its weekday column.
pub fn leading_cells(month: DisplayedMonth, week_start: Weekday) -> u32 {
    (weekday(month.first_day()) + 7 - weekday_index(week_start)) % 7
}

/// Builds the row-major cell sequence for `month`. The length is always a
/// multiple of 7 and the same inputs always yield the same cells.
pub fn build(month: DisplayedMonth, options: GridOptions) -> Vec<GridCell> {
    let first = month.first_day();
    let shift = leading_cells(month, options.week_start);
    let days  = month.days();
    let total = (shift + days).div_ceil(7) * 7;

    // Saturated navigation returns the same month at the range ends; there is
    // no adjacent month to borrow days from there.
    let prev = Some(month.prev()).filter(|m| *m != month);
    let next = Some(month.next()).filter(|m| *m != month);

    let cells: Vec<GridCell> = (0..total)
        .map(|i| {
            let (owner, jd, outside) = if i < shift {
                match prev {
                    Some(p) => (p, p.days() - shift + 1 + i, true),
                    None    => return GridCell::Placeholder,
                }
            } else if i < shift + days {
                (month, i - shift + 1, false)
            } else {
                match next {
                    Some(n) => (n, i - shift - days + 1, true),
                    None    => return GridCell::Placeholder,
                }
            };

            if outside && !options.show_outside_days {
                return GridCell::Placeholder;
            }

            GridCell::Day(DayCell {
                gregorian:        first + Duration::days(i as i64 - shift as i64),
                jalali:           JalaliDate { jy: owner.jy(), jm: owner.jm(), jd },
                is_outside_month: outside,
            })
        })
        .collect();

    tracing::trace!(%month, shift, cells = cells.len(), "built month grid");
    cells
}
