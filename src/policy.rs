//! Which days may be selected.
use chrono::NaiveDate;
use std::fmt;
use std::rc::Rc;

/// Caller-supplied "is this day disabled" test.
pub type DatePredicate = Rc<dyn Fn(NaiveDate) -> bool>;

/// Bounds plus an optional custom predicate. The predicate only runs for days
/// already inside `[min, max]`.
#[derive(Clone, Default)]
pub struct DisablementPolicy {
    min:       Option<NaiveDate>,
    max:       Option<NaiveDate>,
    predicate: Option<DatePredicate>,
}

impl DisablementPolicy {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_min(mut self, min: NaiveDate) -> Self {
        self.min = Some(min);
        self
    }

    pub fn with_max(mut self, max: NaiveDate) -> Self {
        self.max = Some(max);
        self
    }

    pub fn with_predicate(mut self, predicate: impl Fn(NaiveDate) -> bool + 'static) -> Self {
        self.predicate = Some(Rc::new(predicate));
        self
    }

    pub fn min(&self) -> Option<NaiveDate> { self.min }
    pub fn max(&self) -> Option<NaiveDate> { self.max }

    pub fn is_disabled(&self, date: NaiveDate) -> bool {
        if self.min.is_some_and(|min| date < min) { return true; }
        if self.max.is_some_and(|max| date > max) { return true; }
        self.predicate.as_ref().is_some_and(|p| p(date))
    }
}

impl fmt::Debug for DisablementPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DisablementPolicy")
            .field("min", &self.min)
            .field("max", &self.max)
            .field("predicate", &self.predicate.as_ref().map(|_| "<fn>"))
            .finish()
    }
}
