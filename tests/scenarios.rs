//! End-to-end picker and calendar scenarios through the public API.

use chrono::{NaiveDate, Weekday};
use jalali_picker::calendar::grid::{build, leading_cells, weekday_from_number};
use jalali_picker::format::format_value;
use jalali_picker::{
    CalendarConfig, CalendarController, DatePickerController, DateRange, DisablementPolicy,
    DisplayedMonth, Effect, GridCell, GridOptions, JalaliDate, Mode, PickerConfig, SelectionValue,
};

fn jd(s: &str) -> NaiveDate {
    s.parse::<JalaliDate>().unwrap().to_gregorian().unwrap()
}

fn open_picker(calendar: CalendarConfig) -> DatePickerController {
    DatePickerController::new(PickerConfig::new(calendar).with_default_open(true))
}

/// 1403/01/01 is a Wednesday. Leading cells for every week start.
#[test]
fn leading_cells_for_each_week_start() {
    let month = DisplayedMonth::new(1403, 1).unwrap();
    // (Sunday = 0 … Saturday = 6, expected leading cells)
    let expected = [(0, 3), (1, 2), (2, 1), (3, 0), (4, 6), (5, 5), (6, 4)];

    for (n, lead) in expected {
        let week_start = weekday_from_number(n);
        assert_eq!(leading_cells(month, week_start), lead, "week start {n}");

        let cells = build(month, GridOptions { week_start, show_outside_days: true });
        let first_in_month = cells.iter().position(|c| !c.day().unwrap().is_outside_month).unwrap();
        assert_eq!(first_in_month as u32, lead, "week start {n}");
        assert_eq!(
            cells[lead as usize].day().unwrap().jalali,
            JalaliDate { jy: 1403, jm: 1, jd: 1 }
        );
    }
}

#[test]
fn saturday_start_month_opens_grid() {
    // 1405/01/01 falls on a Saturday.
    let month = DisplayedMonth::new(1405, 1).unwrap();
    let cells = build(month, GridOptions { week_start: Weekday::Sat, show_outside_days: true });
    assert_eq!(leading_cells(month, Weekday::Sat), 0);
    assert_eq!(cells[0].day().unwrap().jalali, JalaliDate { jy: 1405, jm: 1, jd: 1 });
}

#[test]
fn earlier_second_click_replaces_start() {
    let mut cal = CalendarController::new(CalendarConfig::new(Mode::Range));
    cal.activate_day(jd("1403/02/10"));
    let t = cal.activate_day(jd("1403/02/05"));

    assert_eq!(t.state, SelectionValue::Range(DateRange::pending(jd("1403/02/05"))));
    assert_eq!(cal.value().range().start(), Some(jd("1403/02/05")));
    assert_eq!(cal.value().range().end(), None);
}

#[test]
fn completing_range_keeps_picker_open() {
    let mut picker = open_picker(
        CalendarConfig::new(Mode::Range)
            .with_default_value(SelectionValue::Range(DateRange::pending(jd("1403/02/05")))),
    );
    let t = picker.activate_day(jd("1403/02/20"));

    let done = SelectionValue::Range(DateRange::complete(jd("1403/02/05"), jd("1403/02/20")));
    assert_eq!(t.effects, vec![Effect::ValueChanged(done)]);
    assert_eq!(picker.value(), done);
    assert!(picker.is_open());
}

#[test]
fn single_pick_closes_picker() {
    let mut picker = open_picker(CalendarConfig::new(Mode::Single));
    picker.activate_day(jd("1403/05/17"));

    assert_eq!(picker.value(), SelectionValue::Single(Some(jd("1403/05/17"))));
    assert!(!picker.is_open());
}

#[test]
fn day_before_min_is_ignored() {
    let mut picker = open_picker(
        CalendarConfig::new(Mode::Single)
            .with_policy(DisablementPolicy::new().with_min(jd("1403/01/10"))),
    );
    let t = picker.activate_day(jd("1403/01/05"));

    assert!(t.is_noop());
    assert_eq!(picker.value(), SelectionValue::Single(None));
    assert!(picker.is_open());

    let snap = picker.calendar().snapshot();
    assert!(snap.is_disabled(jd("1403/01/05")));
    assert!(!snap.is_disabled(jd("1403/01/10")));
}

#[test]
fn range_formats_with_persian_digits() {
    let v = SelectionValue::Range(DateRange::complete(jd("1403/01/01"), jd("1403/01/10")));
    assert_eq!(format_value(&v, true), "۱۴۰۳/۰۱/۰۱ – ۱۴۰۳/۰۱/۱۰");

    let picker = DatePickerController::new(PickerConfig::new(
        CalendarConfig::new(Mode::Range).with_default_value(v),
    ));
    assert_eq!(picker.display(), "۱۴۰۳/۰۱/۰۱ – ۱۴۰۳/۰۱/۱۰");
}

#[test]
fn navigation_never_moves_selection() {
    let mut picker = open_picker(
        CalendarConfig::new(Mode::Single).with_default_month(DisplayedMonth::new(1403, 12).unwrap()),
    );
    picker.activate_day(jd("1403/12/30"));
    picker.set_open(true);

    let t = picker.navigate_month(1);
    assert_eq!(t.state, DisplayedMonth::new(1404, 1).unwrap());
    assert_eq!(picker.value(), SelectionValue::Single(Some(jd("1403/12/30"))));

    let snap = picker.snapshot();
    let cal = snap.calendar.expect("open picker exposes its calendar");
    assert_eq!(cal.displayed_month, DisplayedMonth::new(1404, 1).unwrap());
    // 1403/12/30 shows as an outside day in Farvardin 1404 and stays selected.
    let outside = cal
        .cells
        .iter()
        .filter_map(GridCell::day)
        .find(|c| c.gregorian == jd("1403/12/30"))
        .unwrap();
    assert!(outside.is_outside_month);
    assert!(cal.is_selected(outside.gregorian));
}
