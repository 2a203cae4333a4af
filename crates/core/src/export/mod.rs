//! CSV export of ledger lines.
//!
//! Column order is fixed and consumed by downstream invoicing:
//! `parentId,subOrgId,staffRef,venueId,periodId,hours,billRate,amount,sourceAttendanceId,createdAt`.

use chrono::SecondsFormat;

use crate::ledger::LedgerLine;

/// Header row of the ledger export.
pub const LEDGER_CSV_HEADER: &str =
    "parentId,subOrgId,staffRef,venueId,periodId,hours,billRate,amount,sourceAttendanceId,createdAt";

fn csv_escape(value: &str) -> String {
    if !value.contains([',', '"', '\n', '\r']) {
        return value.to_string();
    }
    let escaped = value.replace('"', "\"\"");
    format!("\"{escaped}\"")
}

/// Renders `lines` as CSV, header first, one `\n`-terminated row per line.
#[must_use]
pub fn ledger_csv(lines: &[LedgerLine]) -> String {
    let mut out = String::with_capacity(LEDGER_CSV_HEADER.len() + 1 + lines.len() * 160);
    out.push_str(LEDGER_CSV_HEADER);
    out.push('\n');

    for line in lines {
        out.push_str(&format!(
            "{},{},{},{},{},{},{},{},{},{}\n",
            csv_escape(line.parent_id.as_str()),
            csv_escape(line.sub_org_id.as_str()),
            line.staff_ref,
            csv_escape(line.venue_id.as_str()),
            csv_escape(line.period_id.as_str()),
            line.hours,
            line.bill_rate,
            line.amount,
            csv_escape(line.source_attendance_id.as_str()),
            line.created_at.to_rfc3339_opts(SecondsFormat::Millis, true),
        ));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledger::LedgerCandidate;
    use chrono::{TimeZone, Utc};
    use rostra_shared::types::{
        AttendanceId, OrgId, ParentId, PeriodId, StaffId, StaffRef, VenueId,
    };
    use rust_decimal_macros::dec;

    fn line(venue: &str) -> LedgerLine {
        let sub_org_id = OrgId::new("org-1").unwrap();
        LedgerCandidate {
            parent_id: ParentId::new("P1").unwrap(),
            staff_ref: StaffRef::pseudonymize(&sub_org_id, &StaffId::new("s-1").unwrap()),
            sub_org_id,
            venue_id: VenueId::new(venue).unwrap(),
            period_id: PeriodId::new("2026-W02").unwrap(),
            hours: dec!(2.5),
            bill_rate: dec!(22.50),
            source_attendance_id: AttendanceId::new("att-1").unwrap(),
        }
        .into_line(Utc.with_ymd_and_hms(2026, 1, 6, 8, 0, 0).unwrap())
        .unwrap()
    }

    #[test]
    fn test_escape() {
        assert_eq!(csv_escape("plain"), "plain");
        assert_eq!(csv_escape("a,b"), "\"a,b\"");
        assert_eq!(csv_escape("say \"hi\""), "\"say \"\"hi\"\"\"");
        assert_eq!(csv_escape("two\nlines"), "\"two\nlines\"");
        assert_eq!(csv_escape("cr\rhere"), "\"cr\rhere\"");
    }

    #[test]
    fn test_empty_export_is_header_only() {
        assert_eq!(ledger_csv(&[]), format!("{LEDGER_CSV_HEADER}\n"));
    }

    #[test]
    fn test_row_layout() {
        let l = line("v-1");
        let csv = ledger_csv(std::slice::from_ref(&l));
        let rows: Vec<&str> = csv.lines().collect();

        assert_eq!(rows.len(), 2);
        assert_eq!(
            rows[1],
            format!(
                "P1,org-1,{},v-1,2026-W02,2.5,22.50,56.25,att-1,2026-01-06T08:00:00.000Z",
                l.staff_ref
            )
        );
        assert!(csv.ends_with('\n'));
    }

    #[test]
    fn test_every_line_becomes_one_row() {
        let csv = ledger_csv(&[line("v-1"), line("v-2"), line("v-3")]);
        let rows: Vec<&str> = csv.lines().collect();

        assert_eq!(rows.len(), 4);
        assert!(rows[1].contains(",v-1,"));
        assert!(rows[3].contains(",v-3,"));
        assert_eq!(csv.matches('\n').count(), 4);
    }

    #[test]
    fn test_venue_with_comma_is_quoted() {
        let csv = ledger_csv(&[line("hall,east")]);
        assert!(csv.contains(",\"hall,east\","));
    }

    #[test]
    fn test_export_has_ten_columns() {
        let csv = ledger_csv(&[line("v-1")]);
        for row in csv.lines() {
            assert_eq!(row.split(',').count(), 10);
        }
    }
}
