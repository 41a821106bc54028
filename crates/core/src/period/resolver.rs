//! Period specification and resolution against a reference date.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::calendar::DateRange;
use super::error::PeriodError;

/// How a period is anchored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PeriodMode {
    /// The calendar month containing the reference date.
    Monthly,
    /// The calendar year containing the reference date.
    Yearly,
    /// Explicit start and end dates.
    Custom,
}

/// A period to resolve into a concrete date range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PeriodSpec {
    /// Anchoring mode.
    pub mode: PeriodMode,
    /// Start date for custom periods.
    #[serde(default)]
    pub explicit_start: Option<NaiveDate>,
    /// End date for custom periods.
    #[serde(default)]
    pub explicit_end: Option<NaiveDate>,
}

impl PeriodSpec {
    /// A monthly period.
    #[must_use]
    pub const fn monthly() -> Self {
        Self {
            mode: PeriodMode::Monthly,
            explicit_start: None,
            explicit_end: None,
        }
    }

    /// A yearly period.
    #[must_use]
    pub const fn yearly() -> Self {
        Self {
            mode: PeriodMode::Yearly,
            explicit_start: None,
            explicit_end: None,
        }
    }

    /// A custom period with explicit bounds.
    #[must_use]
    pub const fn custom(start: NaiveDate, end: NaiveDate) -> Self {
        Self {
            mode: PeriodMode::Custom,
            explicit_start: Some(start),
            explicit_end: Some(end),
        }
    }

    fn explicit_bounds(&self) -> Option<(NaiveDate, NaiveDate)> {
        self.explicit_start.zip(self.explicit_end)
    }
}

impl Default for PeriodSpec {
    fn default() -> Self {
        Self::monthly()
    }
}

/// Resolves period specifications into inclusive date ranges.
pub struct PeriodResolver;

impl PeriodResolver {
    /// Resolves `spec` against `reference`.
    ///
    /// A `Custom` spec missing either bound falls back to the `Monthly` rule
    /// for the reference date. Budgets rely on this fallback; use
    /// [`PeriodResolver::resolve_strict`] where it must not apply.
    ///
    /// # Errors
    ///
    /// Returns `PeriodError::InvalidRange` if the explicit start is after the
    /// explicit end.
    pub fn resolve(spec: &PeriodSpec, reference: NaiveDate) -> Result<DateRange, PeriodError> {
        match spec.mode {
            PeriodMode::Monthly => DateRange::month_of(reference),
            PeriodMode::Yearly => DateRange::year(reference.year()),
            PeriodMode::Custom => match spec.explicit_bounds() {
                Some((start, end)) => DateRange::new(start, end),
                None => {
                    debug!(%reference, "custom period without bounds, using monthly rule");
                    DateRange::month_of(reference)
                }
            },
        }
    }

    /// Resolves `spec` without the custom-to-monthly fallback.
    ///
    /// # Errors
    ///
    /// Returns `PeriodError::InvalidPeriodSpec` for a custom spec missing a
    /// bound, and `PeriodError::InvalidRange` for reversed bounds.
    pub fn resolve_strict(
        spec: &PeriodSpec,
        reference: NaiveDate,
    ) -> Result<DateRange, PeriodError> {
        if spec.mode == PeriodMode::Custom && spec.explicit_bounds().is_none() {
            return Err(PeriodError::InvalidPeriodSpec(
                "custom period requires both start and end dates".to_string(),
            ));
        }
        Self::resolve(spec, reference)
    }
}
