//! Exhaustive and sequence-based checks of the engine's invariants.

use chrono::{Duration, NaiveDate};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use jalali_picker::calendar::grid::{build, weekday_from_number};
use jalali_picker::{
    month_length, to_gregorian, to_jalali, CalendarConfig, CalendarController, DisablementPolicy,
    DisplayedMonth, GridCell, GridOptions, JalaliDate, Mode, SelectionValue,
};

fn all_grid_options() -> Vec<GridOptions> {
    (0..7u8)
        .flat_map(|n| {
            [true, false].map(|show_outside_days| GridOptions {
                week_start: weekday_from_number(n),
                show_outside_days,
            })
        })
        .collect()
}

#[test]
fn jalali_round_trip() {
    for jy in (1300..=1500).chain([-61, 0, 1, 1000, 3000, 3177]) {
        for jm in 1..=12 {
            for jd in 1..=month_length(jy, jm) {
                let j = JalaliDate { jy, jm, jd };
                let g = to_gregorian(j).unwrap();
                assert_eq!(to_jalali(g).unwrap(), j);
            }
        }
    }
}

#[test]
fn consecutive_jalali_days_are_consecutive_gregorian_days() {
    let mut prev = to_gregorian(JalaliDate { jy: 1350, jm: 1, jd: 1 }).unwrap();
    for jy in 1350..1450 {
        for jm in 1..=12 {
            for jd in 1..=month_length(jy, jm) {
                if (jy, jm, jd) == (1350, 1, 1) { continue; }
                let g = to_gregorian(JalaliDate { jy, jm, jd }).unwrap();
                assert_eq!(g, prev + Duration::days(1), "{jy}/{jm}/{jd}");
                prev = g;
            }
        }
    }
}

#[test]
fn grid_totality() {
    for jy in 1395..=1410 {
        for jm in 1..=12 {
            let month = DisplayedMonth::new(jy, jm).unwrap();
            for opts in all_grid_options() {
                let cells = build(month, opts);
                assert_eq!(cells.len() % 7, 0);
                assert!(cells.len() <= 42);
                let in_month = cells
                    .iter()
                    .filter_map(GridCell::day)
                    .filter(|c| !c.is_outside_month)
                    .count();
                assert_eq!(in_month as u32, month_length(jy, jm));
                if !opts.show_outside_days {
                    assert!(cells.iter().filter_map(GridCell::day).all(|c| !c.is_outside_month));
                }
            }
        }
    }
}

#[test]
fn grid_rows_are_consecutive_days() {
    let month = DisplayedMonth::new(1403, 7).unwrap();
    for opts in all_grid_options().into_iter().filter(|o| o.show_outside_days) {
        let cells = build(month, opts);
        let dates: Vec<NaiveDate> = cells.iter().filter_map(GridCell::date).collect();
        assert_eq!(dates.len(), cells.len());
        assert!(dates.windows(2).all(|w| w[1] - w[0] == Duration::days(1)));
    }
}

#[test]
fn grid_is_pure() {
    let month = DisplayedMonth::new(1403, 12).unwrap();
    for opts in all_grid_options() {
        assert_eq!(build(month, opts), build(month, opts));
    }
}

#[test]
fn range_end_never_precedes_start() {
    let base = NaiveDate::from_ymd_opt(2024, 3, 20).unwrap();
    let mut rng = StdRng::seed_from_u64(7);
    let mut cal = CalendarController::new(CalendarConfig::new(Mode::Range));

    for _ in 0..2000 {
        let day = base + Duration::days(rng.gen_range(0..90));
        cal.activate_day(day);
        let r = cal.value().range();
        if let Some(end) = r.end() {
            let start = r.start().expect("an end always comes with a start");
            assert!(start <= end);
        }
    }
}

#[test]
fn disabled_days_never_change_selection() {
    let base = NaiveDate::from_ymd_opt(2024, 3, 20).unwrap();
    let policy = DisablementPolicy::new()
        .with_min(base + Duration::days(10))
        .with_max(base + Duration::days(60))
        .with_predicate(|d| d.format("%d").to_string().ends_with('3'));

    for mode in [Mode::Single, Mode::Range] {
        let mut rng = StdRng::seed_from_u64(11);
        let mut cal = CalendarController::new(CalendarConfig::new(mode).with_policy(policy.clone()));
        for _ in 0..1000 {
            let day = base + Duration::days(rng.gen_range(0..80));
            let before: SelectionValue = cal.value();
            let t = cal.activate_day(day);
            if policy.is_disabled(day) {
                assert!(t.is_noop());
                assert_eq!(cal.value(), before);
            } else {
                assert_eq!(t.effects.len(), 1);
            }
        }
    }
}
