//! Engine error types.

/// Errors raised by the Jalali calendar math.
///
/// Grid building, selection and navigation never produce these; they only
/// surface when a caller converts or parses a date directly.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CalendarError {
    /// The day does not exist in that Jalali month of that year.
    #[error("invalid Jalali date {jy}/{jm:02}/{jd:02}")]
    InvalidDate { jy: i32, jm: u32, jd: u32 },

    /// Month outside 1..=12.
    #[error("invalid Jalali month {jm} (expected 1..=12)")]
    InvalidMonth { jm: u32 },

    /// Jalali year outside the range covered by the leap-year table.
    #[error("Jalali year {jy} is outside the supported range {min}..={max}")]
    YearOutOfRange { jy: i32, min: i32, max: i32 },

    /// Text could not be read as a date.
    #[error("cannot parse '{input}' as a date: {reason}")]
    Parse { input: String, reason: String },
}
