//! Date picker: a calendar behind an open/closed text field.
use chrono::NaiveDate;
use std::fmt;

use crate::calendar::DisplayedMonth;
use crate::controller::{
    CalendarConfig, CalendarController, CalendarSnapshot, Effect, Ownership, Transition,
};
use crate::format;
use crate::selection::{Mode, SelectionValue};

/// Turns a selection into the text shown in the field.
pub type Formatter = Box<dyn Fn(&SelectionValue) -> String>;

pub const DEFAULT_PLACEHOLDER: &str = "انتخاب تاریخ";

pub struct PickerConfig {
    pub calendar:    CalendarConfig,
    /// `None` means internally owned and initially closed.
    pub open:        Option<Ownership<bool>>,
    pub placeholder: String,
    pub clearable:   bool,
    pub disabled:    bool,
    pub format:      Option<Formatter>,
}

impl PickerConfig {
    pub fn new(calendar: CalendarConfig) -> Self {
        Self {
            calendar,
            open:        None,
            placeholder: DEFAULT_PLACEHOLDER.to_owned(),
            clearable:   true,
            disabled:    false,
            format:      None,
        }
    }

    pub fn with_open(mut self, accessor: impl Fn() -> bool + 'static) -> Self {
        self.open = Some(Ownership::external(accessor));
        self
    }

    pub fn with_default_open(mut self, open: bool) -> Self {
        self.open = Some(Ownership::Internal(open));
        self
    }

    pub fn with_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = placeholder.into();
        self
    }

    pub fn with_clearable(mut self, clearable: bool) -> Self {
        self.clearable = clearable;
        self
    }

    pub fn with_disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    pub fn with_format(mut self, format: impl Fn(&SelectionValue) -> String + 'static) -> Self {
        self.format = Some(Box::new(format));
        self
    }
}

impl fmt::Debug for PickerConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PickerConfig")
            .field("calendar", &self.calendar)
            .field("open", &self.open)
            .field("placeholder", &self.placeholder)
            .field("clearable", &self.clearable)
            .field("disabled", &self.disabled)
            .finish_non_exhaustive()
    }
}

pub struct DatePickerController {
    calendar:    CalendarController,
    open:        Ownership<bool>,
    placeholder: String,
    clearable:   bool,
    disabled:    bool,
    format:      Option<Formatter>,
}

/// What the field and its popover need to render.
#[derive(Debug)]
pub struct PickerSnapshot<'a> {
    pub display:     String,
    pub placeholder: &'a str,
    pub is_open:     bool,
    pub disabled:    bool,
    pub show_clear:  bool,
    /// Present only while the popover is visible.
    pub calendar:    Option<CalendarSnapshot<'a>>,
}

impl DatePickerController {
    pub fn new(config: PickerConfig) -> Self {
        let PickerConfig { calendar, open, placeholder, clearable, disabled, format } = config;
        Self {
            calendar: CalendarController::new(calendar),
            open:     open.unwrap_or(Ownership::Internal(false)),
            placeholder,
            clearable,
            disabled,
            format,
        }
    }

    pub fn calendar(&self) -> &CalendarController { &self.calendar }
    pub fn mode(&self) -> Mode { self.calendar.mode() }
    pub fn value(&self) -> SelectionValue { self.calendar.value() }
    pub fn is_open(&self) -> bool { self.open.get() }
    pub fn is_disabled(&self) -> bool { self.disabled }

    /// The field text for the current value.
    pub fn display(&self) -> String {
        let value = self.calendar.value();
        match &self.format {
            Some(format) => format(&value),
            None => format::format_value(&value, self.calendar.persian_digits()),
        }
    }

    pub fn snapshot(&self) -> PickerSnapshot<'_> {
        let display = self.display();
        let is_open = self.is_open();
        PickerSnapshot {
            show_clear:  self.clearable && !display.is_empty() && !self.disabled,
            display,
            placeholder: &self.placeholder,
            is_open,
            disabled:    self.disabled,
            calendar:    (is_open && !self.disabled).then(|| self.calendar.snapshot()),
        }
    }

    /// Opening a disabled picker does nothing; setting the current state
    /// emits nothing.
    pub fn set_open(&mut self, open: bool) -> Transition<bool> {
        let current = self.open.get();
        if open == current || (open && self.disabled) {
            return Transition::unchanged(current);
        }
        self.open.store(open);
        tracing::debug!(open, "picker visibility changed");
        Transition::changed(open, Effect::OpenChanged(open))
    }

    pub fn toggle_open(&mut self) -> Transition<bool> {
        let open = !self.open.get();
        self.set_open(open)
    }

    /// Forwards the click to the calendar. A single-date pick closes the
    /// picker; ranges stay open across both endpoints.
    pub fn activate_day(&mut self, day: NaiveDate) -> Transition<SelectionValue> {
        if self.disabled {
            return Transition::unchanged(self.calendar.value());
        }
        let mut t = self.calendar.activate_day(day);
        if !t.is_noop() && self.calendar.mode() == Mode::Single {
            t.effects.extend(self.set_open(false).effects);
        }
        t
    }

    pub fn navigate_month(&mut self, delta: i32) -> Transition<DisplayedMonth> {
        self.calendar.navigate_month(delta)
    }

    /// Unsets the value; visibility is untouched.
    pub fn clear(&mut self) -> Transition<SelectionValue> {
        self.calendar.clear()
    }
}

impl fmt::Debug for DatePickerController {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DatePickerController")
            .field("calendar", &self.calendar)
            .field("open", &self.open)
            .field("placeholder", &self.placeholder)
            .field("clearable", &self.clearable)
            .field("disabled", &self.disabled)
            .finish_non_exhaustive()
    }
}
