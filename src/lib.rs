//! Jalali calendar engine: calendar conversion, month grids, single/range
//! selection with disablement rules, and a date-picker wrapper.
//!
//! The engine is synchronous and UI-agnostic. Hosts read snapshots and
//! dispatch the [`controller::Effect`]s returned by each transition.

pub mod calendar;
pub mod config;
pub mod controller;
pub mod error;
pub mod format;
pub mod picker;
pub mod policy;
pub mod selection;

pub use calendar::grid::{DayCell, GridCell, GridOptions};
pub use calendar::{
    is_leap_year, is_valid_jalali_date, month_length, to_gregorian, to_jalali, DisplayedMonth,
    JalaliDate,
};
pub use controller::{
    dispatch, CalendarConfig, CalendarController, CalendarSnapshot, DayState, Effect, Notifier,
    Ownership, Transition,
};
pub use error::CalendarError;
pub use picker::{DatePickerController, PickerConfig, PickerSnapshot};
pub use policy::DisablementPolicy;
pub use selection::{DateRange, Mode, SelectionModel, SelectionValue};
