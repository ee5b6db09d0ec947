use chrono::{Datelike, Utc};
use clap::ValueEnum;

/// Year assumed for dates that carry no year anywhere on the page.
///
/// Listing pages announce future events, so some deployments prefer biasing
/// partial dates toward next year instead of the current one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum FallbackYear {
    /// Use the current calendar year.
    #[default]
    Current,
    /// Use the current calendar year plus one.
    Next,
}

impl FallbackYear {
    pub fn resolve(self) -> i32 {
        let current = Utc::now().year();
        match self {
            FallbackYear::Current => current,
            FallbackYear::Next => current + 1,
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct Config {
    pub fallback_year: FallbackYear,
}

impl Config {
    pub fn fallback_year_value(&self) -> i32 {
        self.fallback_year.resolve()
    }
}
