//! Canonical billing-period identifiers.
//!
//! Period ids are a pure function of the work timestamp and the contract's
//! period type. Derivation happens in UTC.
//!
//! | Type | Format | Example |
//! |------|--------|---------|
//! | weekly | `YYYY-Www` (ISO week-year and week) | `2026-W01` |
//! | biweekly | `YYYY-BWww` (ISO week of the fortnight's first Monday) | `2026-BW02` |
//! | monthly | `YYYY-Mmm` | `2026-M01` |
//!
//! Biweekly periods are counted in 14-day steps from a fixed anchor Monday,
//! so each one covers exactly two whole ISO weeks.

use chrono::{DateTime, Datelike, NaiveDate, TimeDelta, Utc, Weekday};

use rostra_shared::config::default_biweekly_anchor;
use rostra_shared::types::PeriodId;

use crate::billing::error::BillingError;
use crate::contract::PeriodType;

const DAYS_PER_FORTNIGHT: i64 = 14;

/// Derives period ids for ledger lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PeriodDeriver {
    biweekly_anchor: NaiveDate,
}

impl Default for PeriodDeriver {
    fn default() -> Self {
        Self {
            biweekly_anchor: default_biweekly_anchor(),
        }
    }
}

impl PeriodDeriver {
    /// Creates a deriver whose biweekly periods start on `biweekly_anchor`.
    ///
    /// # Errors
    ///
    /// Returns `BillingError::AnchorNotMonday` unless the anchor is a Monday.
    pub fn new(biweekly_anchor: NaiveDate) -> Result<Self, BillingError> {
        if biweekly_anchor.weekday() != Weekday::Mon {
            return Err(BillingError::AnchorNotMonday(biweekly_anchor));
        }
        Ok(Self { biweekly_anchor })
    }

    /// Returns the configured biweekly anchor.
    #[must_use]
    pub const fn biweekly_anchor(&self) -> NaiveDate {
        self.biweekly_anchor
    }

    /// Returns the period id containing `timestamp`.
    pub fn period_id(
        &self,
        timestamp: DateTime<Utc>,
        period_type: PeriodType,
    ) -> Result<PeriodId, BillingError> {
        let date = timestamp.date_naive();
        let id = match period_type {
            PeriodType::Weekly => {
                let week = date.iso_week();
                format!("{:04}-W{:02}", week.year(), week.week())
            }
            PeriodType::Biweekly => {
                let start = self.fortnight_start(date)?;
                let week = start.iso_week();
                format!("{:04}-BW{:02}", week.year(), week.week())
            }
            PeriodType::Monthly => format!("{:04}-M{:02}", date.year(), date.month()),
        };
        Ok(PeriodId::new(id)?)
    }

    /// First Monday of the biweekly period containing `date`.
    pub fn fortnight_start(&self, date: NaiveDate) -> Result<NaiveDate, BillingError> {
        let days = (date - self.biweekly_anchor).num_days();
        let index = days.div_euclid(DAYS_PER_FORTNIGHT);
        self.biweekly_anchor
            .checked_add_signed(TimeDelta::days(index * DAYS_PER_FORTNIGHT))
            .ok_or(BillingError::DateOutOfRange)
    }
}
