//! Per-period totals for parent administrators.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use rostra_shared::types::{OrgId, ParentId, PeriodId};

use crate::ledger::line::LedgerLine;

/// Totals for one sub-organization within a period.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubOrgTotals {
    /// Sub-organization.
    pub sub_org_id: OrgId,
    /// Number of lines.
    pub line_count: u64,
    /// Sum of billed hours.
    pub hours: Decimal,
    /// Sum of line amounts.
    pub amount: Decimal,
}

impl SubOrgTotals {
    fn empty(sub_org_id: OrgId) -> Self {
        Self {
            sub_org_id,
            line_count: 0,
            hours: Decimal::ZERO,
            amount: Decimal::ZERO,
        }
    }

    fn add(&mut self, line: &LedgerLine) {
        self.line_count += 1;
        self.hours += line.hours;
        self.amount += line.amount;
    }
}

/// Aggregated view of one ledger period. Carries no staff references.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PeriodSummary {
    /// Billing parent.
    pub parent_id: ParentId,
    /// Ledger period.
    pub period_id: PeriodId,
    /// Number of lines in the period.
    pub line_count: u64,
    /// Sum of billed hours.
    pub total_hours: Decimal,
    /// Sum of line amounts.
    pub total_amount: Decimal,
    /// Totals per sub-organization, ordered by id.
    pub sub_orgs: Vec<SubOrgTotals>,
}

impl PeriodSummary {
    /// Builds the summary of `parent_id`'s ledger for `period_id`.
    ///
    /// Lines belonging to another parent or period are ignored.
    #[must_use]
    pub fn from_lines(parent_id: ParentId, period_id: PeriodId, lines: &[LedgerLine]) -> Self {
        let mut per_org: BTreeMap<OrgId, SubOrgTotals> = BTreeMap::new();

        for line in lines
            .iter()
            .filter(|l| l.parent_id == parent_id && l.period_id == period_id)
        {
            per_org
                .entry(line.sub_org_id.clone())
                .or_insert_with(|| SubOrgTotals::empty(line.sub_org_id.clone()))
                .add(line);
        }

        let sub_orgs: Vec<SubOrgTotals> = per_org.into_values().collect();
        Self {
            line_count: sub_orgs.iter().map(|t| t.line_count).sum(),
            total_hours: sub_orgs.iter().map(|t| t.hours).sum(),
            total_amount: sub_orgs.iter().map(|t| t.amount).sum(),
            parent_id,
            period_id,
            sub_orgs,
        }
    }
}
