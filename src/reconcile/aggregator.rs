//! Period aggregation.
//!
//! Rolls classified day records up into period summaries, groups
//! infraction dates by month for annual reviews, and picks out the
//! employees whose infraction count clears the alert limit.

use std::collections::BTreeMap;

use chrono::{Datelike, NaiveDate};

use crate::models::{DayRecord, DayStatus, EmployeeAttendance, Infraction, PeriodSummary};

/// Rolls a slice of day records up into a [`PeriodSummary`].
///
/// Not-applicable days are not counted anywhere. Holiday and leave days
/// share the `justified` bucket; every other status has its own counter.
/// Infraction dates land in `bad_days`, sorted ascending.
pub fn summarize(records: &[DayRecord]) -> PeriodSummary {
    let mut summary = PeriodSummary::default();

    for record in records {
        match record.status {
            DayStatus::NotApplicable => continue,
            DayStatus::Rest => summary.rest += 1,
            DayStatus::JustifiedHoliday | DayStatus::JustifiedLeave => summary.justified += 1,
            DayStatus::Absence => summary.absence += 1,
            DayStatus::OnTime => summary.on_time += 1,
            DayStatus::LateMinor => summary.late_minor += 1,
            DayStatus::LateMajor => summary.late_major += 1,
            DayStatus::MissingCheckin => summary.missing_checkin += 1,
            DayStatus::MissingCheckout => summary.missing_checkout += 1,
        }
        if record.status.is_infraction() {
            summary.bad_days.push(record.date);
        }
    }

    summary.bad_days.sort_unstable();
    summary
}

/// Groups infraction dates by calendar month for an annual review.
///
/// Every month 1 through 12 gets an entry so a clean month reads as an
/// explicit empty list rather than a hole in the map.
pub fn bad_days_by_month(records: &[DayRecord]) -> BTreeMap<u32, Vec<NaiveDate>> {
    let mut by_month: BTreeMap<u32, Vec<NaiveDate>> =
        (1..=12).map(|month| (month, Vec::new())).collect();

    for record in records {
        if record.status.is_infraction() {
            by_month.entry(record.date.month()).or_default().push(record.date);
        }
    }
    for dates in by_month.values_mut() {
        dates.sort_unstable();
    }
    by_month
}

/// Picks out the employees whose infraction count meets or exceeds the
/// alert limit, in the order they appear in the run.
pub fn detect_infractions(employees: &[EmployeeAttendance], limit: u32) -> Vec<Infraction> {
    employees
        .iter()
        .filter(|employee| employee.summary.infraction_count() >= limit)
        .map(|employee| Infraction {
            employee_id: employee.employee_id.clone(),
            employee_code: employee.employee_code.clone(),
            full_name: employee.full_name.clone(),
            infraction_count: employee.summary.infraction_count(),
            bad_days: employee.summary.bad_days.clone(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_date(date_str: &str) -> NaiveDate {
        NaiveDate::parse_from_str(date_str, "%Y-%m-%d").unwrap()
    }

    fn make_record(date_str: &str, status: DayStatus) -> DayRecord {
        DayRecord {
            date: make_date(date_str),
            matched_in: None,
            matched_out: None,
            status,
            observation: None,
        }
    }

    fn make_attendance(employee_id: &str, summary: PeriodSummary) -> EmployeeAttendance {
        EmployeeAttendance {
            employee_id: employee_id.to_string(),
            employee_code: format!("code_{}", employee_id),
            full_name: format!("Employee {}", employee_id),
            records: Vec::new(),
            summary,
        }
    }

    // ==========================================================================
    // AG-001: Every countable status lands in exactly one bucket
    // ==========================================================================
    #[test]
    fn test_ag_001_statuses_map_to_buckets() {
        let records = vec![
            make_record("2025-03-03", DayStatus::OnTime),
            make_record("2025-03-04", DayStatus::LateMinor),
            make_record("2025-03-05", DayStatus::LateMajor),
            make_record("2025-03-06", DayStatus::Absence),
            make_record("2025-03-07", DayStatus::MissingCheckin),
            make_record("2025-03-08", DayStatus::Rest),
            make_record("2025-03-09", DayStatus::Rest),
            make_record("2025-03-10", DayStatus::MissingCheckout),
            make_record("2025-03-11", DayStatus::JustifiedHoliday),
            make_record("2025-03-12", DayStatus::JustifiedLeave),
        ];

        let summary = summarize(&records);
        assert_eq!(summary.on_time, 1);
        assert_eq!(summary.late_minor, 1);
        assert_eq!(summary.late_major, 1);
        assert_eq!(summary.absence, 1);
        assert_eq!(summary.missing_checkin, 1);
        assert_eq!(summary.missing_checkout, 1);
        assert_eq!(summary.rest, 2);
        assert_eq!(summary.justified, 2);
        assert_eq!(summary.bad_days, vec![make_date("2025-03-05"), make_date("2025-03-06")]);
    }

    // ==========================================================================
    // AG-002: Not-applicable days are excluded from every bucket
    // ==========================================================================
    #[test]
    fn test_ag_002_not_applicable_is_excluded() {
        let records = vec![
            make_record("2025-03-03", DayStatus::OnTime),
            make_record("2025-04-01", DayStatus::NotApplicable),
            make_record("2025-04-02", DayStatus::NotApplicable),
        ];

        let summary = summarize(&records);
        assert_eq!(summary.on_time, 1);
        let total = summary.on_time
            + summary.late_minor
            + summary.late_major
            + summary.absence
            + summary.missing_checkin
            + summary.missing_checkout
            + summary.rest
            + summary.justified;
        assert_eq!(total, 1);
    }

    // ==========================================================================
    // AG-003: Bad days come out sorted regardless of input order
    // ==========================================================================
    #[test]
    fn test_ag_003_bad_days_are_sorted() {
        let records = vec![
            make_record("2025-03-20", DayStatus::LateMajor),
            make_record("2025-03-04", DayStatus::Absence),
            make_record("2025-03-12", DayStatus::LateMajor),
        ];

        let summary = summarize(&records);
        assert_eq!(
            summary.bad_days,
            vec![make_date("2025-03-04"), make_date("2025-03-12"), make_date("2025-03-20")]
        );
    }

    // ==========================================================================
    // AG-004: Sharded summaries merge to the same totals as one pass
    // ==========================================================================
    #[test]
    fn test_ag_004_sharded_summaries_merge_to_whole() {
        let records = vec![
            make_record("2025-03-03", DayStatus::OnTime),
            make_record("2025-03-04", DayStatus::LateMinor),
            make_record("2025-03-05", DayStatus::LateMajor),
            make_record("2025-03-06", DayStatus::Absence),
            make_record("2025-03-07", DayStatus::OnTime),
            make_record("2025-03-08", DayStatus::Rest),
        ];

        let whole = summarize(&records);
        let merged = summarize(&records[..3]).merge(summarize(&records[3..]));
        assert_eq!(whole, merged);
    }

    // Additional tests

    #[test]
    fn test_empty_records_summarize_to_default() {
        assert_eq!(summarize(&[]), PeriodSummary::default());
    }

    #[test]
    fn test_minor_lateness_is_not_a_bad_day() {
        let records = vec![make_record("2025-03-04", DayStatus::LateMinor)];
        let summary = summarize(&records);
        assert!(summary.bad_days.is_empty());
        assert_eq!(summary.infraction_count(), 0);
    }

    #[test]
    fn test_bad_days_by_month_seeds_all_twelve_months() {
        let records = vec![
            make_record("2025-03-05", DayStatus::Absence),
            make_record("2025-07-14", DayStatus::LateMajor),
            make_record("2025-07-02", DayStatus::Absence),
        ];

        let by_month = bad_days_by_month(&records);
        assert_eq!(by_month.len(), 12);
        assert_eq!(by_month[&3], vec![make_date("2025-03-05")]);
        assert_eq!(by_month[&7], vec![make_date("2025-07-02"), make_date("2025-07-14")]);
        assert!(by_month[&1].is_empty());
        assert!(by_month[&12].is_empty());
    }

    #[test]
    fn test_detect_infractions_at_and_below_limit() {
        let over = PeriodSummary {
            absence: 2,
            late_major: 2,
            bad_days: vec![
                make_date("2025-03-04"),
                make_date("2025-03-05"),
                make_date("2025-03-12"),
                make_date("2025-03-20"),
            ],
            ..PeriodSummary::default()
        };
        let at_limit = PeriodSummary {
            absence: 3,
            bad_days: vec![
                make_date("2025-03-04"),
                make_date("2025-03-05"),
                make_date("2025-03-06"),
            ],
            ..PeriodSummary::default()
        };
        let below = PeriodSummary {
            absence: 1,
            late_minor: 5,
            bad_days: vec![make_date("2025-03-04")],
            ..PeriodSummary::default()
        };
        let employees = vec![
            make_attendance("emp_001", over),
            make_attendance("emp_002", at_limit),
            make_attendance("emp_003", below),
        ];

        let infractions = detect_infractions(&employees, 3);
        assert_eq!(infractions.len(), 2);
        assert_eq!(infractions[0].employee_id, "emp_001");
        assert_eq!(infractions[0].infraction_count, 4);
        assert_eq!(infractions[1].employee_id, "emp_002");
        assert_eq!(infractions[1].infraction_count, 3);
    }
}
