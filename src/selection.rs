//! Selection values and the day-activation state machine.
use chrono::NaiveDate;
use serde::Deserialize;

// ─── Data types ───────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    #[default]
    Single,
    Range,
}

/// A range whose end is only ever set together with an earlier-or-equal
/// start. Fields are private so an end without a start cannot be built.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct DateRange {
    start: Option<NaiveDate>,
    end:   Option<NaiveDate>,
}

impl DateRange {
    pub fn empty() -> Self {
        Self::default()
    }

    /// A range with only its start chosen.
    pub fn pending(start: NaiveDate) -> Self {
        Self { start: Some(start), end: None }
    }

    /// A completed range. Endpoints given in reverse are put in order.
    pub fn complete(a: NaiveDate, b: NaiveDate) -> Self {
        Self { start: Some(a.min(b)), end: Some(a.max(b)) }
    }

    pub fn start(&self) -> Option<NaiveDate> { self.start }
    pub fn end(&self) -> Option<NaiveDate> { self.end }

    pub fn is_complete(&self) -> bool {
        self.start.is_some() && self.end.is_some()
    }

    /// Strictly between the endpoints of a completed range.
    pub fn contains_open(&self, date: NaiveDate) -> bool {
        match (self.start, self.end) {
            (Some(s), Some(e)) => s < date && date < e,
            _ => false,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SelectionValue {
    Single(Option<NaiveDate>),
    Range(DateRange),
}

impl SelectionValue {
    /// The unset value for a mode.
    pub fn empty(mode: Mode) -> Self {
        match mode {
            Mode::Single => SelectionValue::Single(None),
            Mode::Range  => SelectionValue::Range(DateRange::empty()),
        }
    }

    pub fn is_empty(&self) -> bool {
        match self {
            SelectionValue::Single(d) => d.is_none(),
            SelectionValue::Range(r)  => r.start().is_none(),
        }
    }

    pub fn single(&self) -> Option<NaiveDate> {
        match self {
            SelectionValue::Single(d) => *d,
            SelectionValue::Range(_)  => None,
        }
    }

    /// The range view; a single value reads as an empty range.
    pub fn range(&self) -> DateRange {
        match self {
            SelectionValue::Range(r)  => *r,
            SelectionValue::Single(_) => DateRange::empty(),
        }
    }

    /// The day that best represents this value when choosing a month to show.
    pub fn anchor(&self) -> Option<NaiveDate> {
        match self {
            SelectionValue::Single(d) => *d,
            SelectionValue::Range(r)  => r.start(),
        }
    }
}

// ─── State machine ────────────────────────────────────────────────────────────

/// Applies day activations for a fixed mode. The current value is passed in
/// so the same model serves internally and externally owned values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SelectionModel {
    mode: Mode,
}

impl SelectionModel {
    pub fn new(mode: Mode) -> Self {
        Self { mode }
    }

    pub fn mode(&self) -> Mode { self.mode }

    pub fn empty(&self) -> SelectionValue {
        SelectionValue::empty(self.mode)
    }

    /// The value after activating `day`. A value of the other mode's shape is
    /// read as unset.
    pub fn activate(&self, current: &SelectionValue, day: NaiveDate) -> SelectionValue {
        match self.mode {
            Mode::Single => SelectionValue::Single(Some(day)),
            Mode::Range  => {
                let range = current.range();
                let next = match (range.start(), range.end()) {
                    (Some(start), None) if day < start => DateRange::pending(day),
                    (Some(start), None)                => DateRange::complete(start, day),
                    _                                  => DateRange::pending(day),
                };
                SelectionValue::Range(next)
            }
        }
    }

    /// Whether `day` shows as selected: the single value, or either endpoint
    /// of a completed range.
    pub fn is_selected(&self, current: &SelectionValue, day: NaiveDate) -> bool {
        match self.mode {
            Mode::Single => current.single() == Some(day),
            Mode::Range  => {
                let r = current.range();
                r.is_complete() && (r.start() == Some(day) || r.end() == Some(day))
            }
        }
    }

    pub fn is_in_range(&self, current: &SelectionValue, day: NaiveDate) -> bool {
        self.mode == Mode::Range && current.range().contains_open(day)
    }
}
