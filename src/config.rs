use anyhow::Result;
use chrono::{Datelike, NaiveDate};
use serde::Deserialize;
use std::path::PathBuf;

use crate::calendar::grid::{weekday_from_number, GridOptions};
use crate::controller::CalendarConfig;
use crate::picker::{DatePickerController, PickerConfig, DEFAULT_PLACEHOLDER};
use crate::policy::DisablementPolicy;
use crate::selection::Mode;

#[derive(Debug, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub calendar: CalendarSection,
    #[serde(default)]
    pub picker:   PickerSection,
}

fn default_week_start() -> u8 { 6 }
fn default_true()       -> bool { true }

#[derive(Debug, Deserialize)]
pub struct CalendarSection {
    #[serde(default)]
    pub mode:              Mode,
    /// 0 = Sunday … 6 = Saturday.
    #[serde(default = "default_week_start")]
    pub week_starts_on:    u8,
    #[serde(default = "default_true")]
    pub show_outside_days: bool,
    #[serde(default = "default_true")]
    pub persian_digits:    bool,
    pub min_date:          Option<NaiveDate>,
    pub max_date:          Option<NaiveDate>,
    /// Weekdays (same numbering as `week_starts_on`) that can never be picked.
    #[serde(default)]
    pub disabled_weekdays: Vec<u8>,
}

impl Default for CalendarSection {
    fn default() -> Self {
        Self {
            mode:              Mode::Single,
            week_starts_on:    default_week_start(),
            show_outside_days: true,
            persian_digits:    true,
            min_date:          None,
            max_date:          None,
            disabled_weekdays: Vec::new(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct PickerSection {
    pub placeholder: Option<String>,
    #[serde(default = "default_true")]
    pub clearable:   bool,
}

impl Default for PickerSection {
    fn default() -> Self {
        Self { placeholder: None, clearable: true }
    }
}

impl AppConfig {
    pub fn load() -> Result<Self> {
        let path = config_dir().join("config.toml");
        if path.exists() {
            Self::parse(&std::fs::read_to_string(&path)?)
        } else {
            Ok(AppConfig::default())
        }
    }

    pub fn parse(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }

    pub fn policy(&self) -> DisablementPolicy {
        let c = &self.calendar;
        let mut policy = DisablementPolicy::new();
        if let Some(min) = c.min_date { policy = policy.with_min(min); }
        if let Some(max) = c.max_date { policy = policy.with_max(max); }
        if !c.disabled_weekdays.is_empty() {
            let blocked: Vec<_> = c.disabled_weekdays.iter().map(|&n| weekday_from_number(n)).collect();
            policy = policy.with_predicate(move |d: NaiveDate| blocked.contains(&d.weekday()));
        }
        policy
    }

    pub fn calendar(&self) -> CalendarConfig {
        let c = &self.calendar;
        CalendarConfig::new(c.mode)
            .with_grid(GridOptions {
                week_start:        weekday_from_number(c.week_starts_on),
                show_outside_days: c.show_outside_days,
            })
            .with_persian_digits(c.persian_digits)
            .with_policy(self.policy())
    }

    /// A ready picker with internally owned state.
    pub fn picker(&self) -> DatePickerController {
        let placeholder = self.picker.placeholder.as_deref().unwrap_or(DEFAULT_PLACEHOLDER);
        DatePickerController::new(
            PickerConfig::new(self.calendar())
                .with_placeholder(placeholder)
                .with_clearable(self.picker.clearable),
        )
    }
}

pub fn config_dir() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("jalali-picker")
}
