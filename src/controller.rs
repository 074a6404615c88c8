//! Calendar state: displayed month, selection, disablement and the
//! read-only snapshot handed to renderers.
//!
//! State transitions never call back into the host. Each one returns a
//! [`Transition`] with the effects the host should dispatch, in order.
use chrono::{Local, NaiveDate};
use std::fmt;

use crate::calendar::grid::{self, DayCell, GridCell, GridOptions};
use crate::calendar::DisplayedMonth;
use crate::format;
use crate::policy::DisablementPolicy;
use crate::selection::{Mode, SelectionModel, SelectionValue};

// ─── Ownership ────────────────────────────────────────────────────────────────

/// Who holds the source of truth for a piece of state. Chosen once at
/// construction.
pub enum Ownership<T> {
    /// The host owns the value; every read goes through the accessor and
    /// writes are only reported as effects.
    External(Box<dyn Fn() -> T>),
    /// The controller owns the value.
    Internal(T),
}

impl<T: Clone> Ownership<T> {
    pub fn external(accessor: impl Fn() -> T + 'static) -> Self {
        Ownership::External(Box::new(accessor))
    }

    pub fn get(&self) -> T {
        match self {
            Ownership::External(read) => read(),
            Ownership::Internal(value) => value.clone(),
        }
    }

    pub fn is_external(&self) -> bool {
        matches!(self, Ownership::External(_))
    }

    /// Stores `value` when internally owned; externally owned values are left
    /// to the host.
    pub(crate) fn store(&mut self, value: T) {
        if let Ownership::Internal(slot) = self {
            *slot = value;
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for Ownership<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Ownership::External(_)     => f.write_str("External(<fn>)"),
            Ownership::Internal(value) => f.debug_tuple("Internal").field(value).finish(),
        }
    }
}

// ─── Effects ──────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    ValueChanged(SelectionValue),
    MonthChanged(DisplayedMonth),
    OpenChanged(bool),
}

/// Result of a state transition: the state it settled on and the
/// notifications it produced. For externally owned state, `state` is the
/// value the host is asked to adopt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transition<T> {
    pub state:   T,
    pub effects: Vec<Effect>,
}

impl<T> Transition<T> {
    pub fn unchanged(state: T) -> Self {
        Self { state, effects: Vec::new() }
    }

    pub fn changed(state: T, effect: Effect) -> Self {
        Self { state, effects: vec![effect] }
    }

    pub fn is_noop(&self) -> bool {
        self.effects.is_empty()
    }
}

/// Host-side receiver for effects. Every method defaults to doing nothing.
pub trait Notifier {
    fn on_change(&mut self, _value: &SelectionValue) {}
    fn on_month_change(&mut self, _month: DisplayedMonth) {}
    fn on_open_change(&mut self, _open: bool) {}
}

/// Delivers effects to `notifier` in the order they were produced.
pub fn dispatch<'a>(effects: impl IntoIterator<Item = &'a Effect>, notifier: &mut impl Notifier) {
    for effect in effects {
        match effect {
            Effect::ValueChanged(v) => notifier.on_change(v),
            Effect::MonthChanged(m) => notifier.on_month_change(*m),
            Effect::OpenChanged(o)  => notifier.on_open_change(*o),
        }
    }
}

// ─── Configuration ────────────────────────────────────────────────────────────

/// Construction-time settings for a [`CalendarController`].
#[derive(Debug)]
pub struct CalendarConfig {
    pub mode:              Mode,
    pub grid:              GridOptions,
    pub to_persian_digits: bool,
    pub policy:            DisablementPolicy,
    /// `None` means internally owned and initially unset.
    pub value:             Option<Ownership<SelectionValue>>,
    /// `None` means internally owned, starting at the value's month or today's.
    pub month:             Option<Ownership<DisplayedMonth>>,
    /// Overrides the local date used for "today".
    pub today:             Option<NaiveDate>,
}

impl CalendarConfig {
    pub fn new(mode: Mode) -> Self {
        Self {
            mode,
            grid:              GridOptions::default(),
            to_persian_digits: true,
            policy:            DisablementPolicy::default(),
            value:             None,
            month:             None,
            today:             None,
        }
    }

    pub fn with_grid(mut self, grid: GridOptions) -> Self {
        self.grid = grid;
        self
    }

    pub fn with_persian_digits(mut self, on: bool) -> Self {
        self.to_persian_digits = on;
        self
    }

    pub fn with_policy(mut self, policy: DisablementPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Host-owned value, read through `accessor` on every access.
    pub fn with_value(mut self, accessor: impl Fn() -> SelectionValue + 'static) -> Self {
        self.value = Some(Ownership::external(accessor));
        self
    }

    /// Controller-owned value starting at `value`.
    pub fn with_default_value(mut self, value: SelectionValue) -> Self {
        self.value = Some(Ownership::Internal(value));
        self
    }

    pub fn with_month(mut self, accessor: impl Fn() -> DisplayedMonth + 'static) -> Self {
        self.month = Some(Ownership::external(accessor));
        self
    }

    pub fn with_default_month(mut self, month: DisplayedMonth) -> Self {
        self.month = Some(Ownership::Internal(month));
        self
    }

    pub fn with_today(mut self, today: NaiveDate) -> Self {
        self.today = Some(today);
        self
    }
}

impl Default for CalendarConfig {
    fn default() -> Self {
        Self::new(Mode::Single)
    }
}

// ─── Controller ───────────────────────────────────────────────────────────────

#[derive(Debug)]
pub struct CalendarController {
    selection:      SelectionModel,
    grid:           GridOptions,
    persian_digits: bool,
    policy:         DisablementPolicy,
    value:          Ownership<SelectionValue>,
    month:          Ownership<DisplayedMonth>,
    today:          NaiveDate,
}

impl CalendarController {
    pub fn new(config: CalendarConfig) -> Self {
        let CalendarConfig { mode, grid, to_persian_digits, policy, value, month, today } = config;
        let today = today.unwrap_or_else(|| Local::now().date_naive());
        let value = value.unwrap_or_else(|| Ownership::Internal(SelectionValue::empty(mode)));

        let month = month.unwrap_or_else(|| {
            let initial = value
                .get()
                .anchor()
                .and_then(|d| DisplayedMonth::containing(d).ok())
                .or_else(|| DisplayedMonth::containing(today).ok())
                .unwrap_or(DisplayedMonth::EPOCH);
            Ownership::Internal(initial)
        });

        tracing::debug!(
            ?mode,
            external_value = value.is_external(),
            external_month = month.is_external(),
            "calendar controller created"
        );

        Self {
            selection: SelectionModel::new(mode),
            grid,
            persian_digits: to_persian_digits,
            policy,
            value,
            month,
            today,
        }
    }

    pub fn mode(&self) -> Mode { self.selection.mode() }
    pub fn value(&self) -> SelectionValue { self.value.get() }
    pub fn displayed_month(&self) -> DisplayedMonth { self.month.get() }
    pub fn policy(&self) -> &DisablementPolicy { &self.policy }
    pub fn grid_options(&self) -> GridOptions { self.grid }
    pub fn persian_digits(&self) -> bool { self.persian_digits }
    pub fn today(&self) -> NaiveDate { self.today }

    pub fn is_disabled(&self, day: NaiveDate) -> bool {
        self.policy.is_disabled(day)
    }

    /// Fresh read-only view of the current state.
    pub fn snapshot(&self) -> CalendarSnapshot<'_> {
        let displayed_month = self.month.get();
        CalendarSnapshot {
            cells:     grid::build(displayed_month, self.grid),
            selection: self.value.get(),
            displayed_month,
            title:     format::month_title(displayed_month, self.persian_digits),
            weekdays:  format::weekday_labels(self.grid.week_start),
            model:     self.selection,
            policy:    &self.policy,
            today:     self.today,
            persian:   self.persian_digits,
        }
    }

    /// Applies a click on `day`. Disabled days are ignored.
    pub fn activate_day(&mut self, day: NaiveDate) -> Transition<SelectionValue> {
        let current = self.value.get();
        if self.policy.is_disabled(day) {
            tracing::trace!(%day, "ignored activation of disabled day");
            return Transition::unchanged(current);
        }

        let next = self.selection.activate(&current, day);
        tracing::debug!(%day, ?next, "day activated");
        self.replace_value(next)
    }

    /// Resets the value to the mode's unset shape.
    pub fn clear(&mut self) -> Transition<SelectionValue> {
        tracing::debug!("selection cleared");
        self.replace_value(self.selection.empty())
    }

    /// Moves the displayed month by `delta`. The selection is untouched.
    pub fn navigate_month(&mut self, delta: i32) -> Transition<DisplayedMonth> {
        let current = self.month.get();
        let next = current.offset(delta);
        if next == current {
            return Transition::unchanged(current);
        }
        self.month.store(next);
        tracing::debug!(from = %current, to = %next, "month navigated");
        Transition::changed(next, Effect::MonthChanged(next))
    }

    fn replace_value(&mut self, next: SelectionValue) -> Transition<SelectionValue> {
        self.value.store(next);
        Transition::changed(next, Effect::ValueChanged(next))
    }
}

// ─── Snapshot ─────────────────────────────────────────────────────────────────

/// Per-cell flags a renderer needs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DayState {
    pub disabled:    bool,
    pub selected:    bool,
    pub in_range:    bool,
    pub range_start: bool,
    pub range_end:   bool,
    pub today:       bool,
    pub outside:     bool,
}

/// Everything needed to draw one month. Built fresh by
/// [`CalendarController::snapshot`]; holding it does not pin any state.
pub struct CalendarSnapshot<'a> {
    pub cells:           Vec<GridCell>,
    pub selection:       SelectionValue,
    pub displayed_month: DisplayedMonth,
    pub title:           String,
    pub weekdays:        [&'static str; 7],
    model:               SelectionModel,
    policy:              &'a DisablementPolicy,
    today:               NaiveDate,
    persian:             bool,
}

impl CalendarSnapshot<'_> {
    pub fn is_disabled(&self, day: NaiveDate) -> bool {
        self.policy.is_disabled(day)
    }

    pub fn is_selected(&self, day: NaiveDate) -> bool {
        self.model.is_selected(&self.selection, day)
    }

    pub fn is_in_range(&self, day: NaiveDate) -> bool {
        self.model.is_in_range(&self.selection, day)
    }

    pub fn is_range_start(&self, day: NaiveDate) -> bool {
        self.model.mode() == Mode::Range && self.selection.range().start() == Some(day)
    }

    pub fn is_range_end(&self, day: NaiveDate) -> bool {
        self.model.mode() == Mode::Range && self.selection.range().end() == Some(day)
    }

    pub fn is_today(&self, day: NaiveDate) -> bool {
        day == self.today
    }

    pub fn day_label(&self, cell: &DayCell) -> String {
        format::day_label(cell.jalali.jd, self.persian)
    }

    pub fn day_state(&self, cell: &DayCell) -> DayState {
        let day = cell.gregorian;
        DayState {
            disabled:    self.is_disabled(day),
            selected:    self.is_selected(day),
            in_range:    self.is_in_range(day),
            range_start: self.is_range_start(day),
            range_end:   self.is_range_end(day),
            today:       self.is_today(day),
            outside:     cell.is_outside_month,
        }
    }

    /// Grid rows of seven cells.
    pub fn weeks(&self) -> impl Iterator<Item = &[GridCell]> {
        self.cells.chunks(7)
    }
}

impl fmt::Debug for CalendarSnapshot<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CalendarSnapshot")
            .field("displayed_month", &self.displayed_month)
            .field("selection", &self.selection)
            .field("cells", &self.cells.len())
            .finish()
    }
}
