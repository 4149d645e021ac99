//! Day classification.
//!
//! Collapses everything known about one employee-day into a single
//! [`DayStatus`]. The checks run in a fixed priority order; the first one
//! that fires wins and later checks never see the day:
//!
//! 1. Days outside the employee's working life are not applicable.
//! 2. Weekends are rest days, punches or not.
//! 3. A holiday covering the day excuses it, unless punches matched.
//! 4. A leave interval covering the day excuses it.
//! 5. Otherwise a scheduled day with no matched punches is an absence,
//!    a fully matched day is graded by lateness, and a half-matched day
//!    surfaces the missing punch.

use chrono::{Datelike, NaiveDate, Weekday};
use tracing::debug;

use crate::config::ClassifierConfig;
use crate::models::{DayRecord, DayStatus, Holiday, LeaveInterval, ScheduleWindow};
use crate::reconcile::matcher::PunchMatch;

/// Everything the classifier needs to know about one employee-day.
#[derive(Debug, Clone, Copy)]
pub struct DayContext<'a> {
    /// The day being classified.
    pub date: NaiveDate,
    /// The reconciliation cut-off; days on or after it are not graded.
    pub today: NaiveDate,
    /// The employee's hire date; days before it are not graded.
    pub hire_date: NaiveDate,
    /// The schedule window for this day, if one exists.
    pub window: Option<&'a ScheduleWindow>,
    /// The punch match outcome for this day.
    pub matched: PunchMatch,
    /// Leave intervals on file for the employee.
    pub leaves: &'a [LeaveInterval],
    /// Holidays overlapping the reconciliation period.
    pub holidays: &'a [Holiday],
    /// Minor-lateness days already accumulated earlier in the period.
    pub prior_minor_count: u32,
}

/// Returns true for Saturday and Sunday.
pub fn is_weekend(date: NaiveDate) -> bool {
    matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
}

/// Classifies one employee-day.
///
/// The matched punches are carried into the record even when the status
/// comes from an earlier branch, so a rest day worked anyway still shows
/// its punches in the output.
pub fn classify_day(ctx: &DayContext<'_>, config: &ClassifierConfig) -> DayRecord {
    let mut observation = None;
    if ctx.matched.multi_punch {
        debug!(date = %ctx.date, "Day has more than two punch clusters");
        observation = Some("multiple punch clusters".to_string());
    }

    let status = resolve_status(ctx, config, &mut observation);

    DayRecord {
        date: ctx.date,
        matched_in: ctx.matched.matched_in,
        matched_out: ctx.matched.matched_out,
        status,
        observation,
    }
}

fn resolve_status(
    ctx: &DayContext<'_>,
    config: &ClassifierConfig,
    observation: &mut Option<String>,
) -> DayStatus {
    if ctx.date >= ctx.today || ctx.date < ctx.hire_date {
        return DayStatus::NotApplicable;
    }
    if is_weekend(ctx.date) {
        return DayStatus::Rest;
    }

    let nothing_matched = ctx.matched.matched_in.is_none() && ctx.matched.matched_out.is_none();

    if nothing_matched {
        if let Some(holiday) = ctx.holidays.iter().find(|h| h.covers(ctx.date)) {
            *observation = Some(holiday.alias.clone());
            return DayStatus::JustifiedHoliday;
        }
    }
    if let Some(leave) = pick_leave(ctx.leaves, ctx.date) {
        *observation = Some(leave.symbol.clone());
        return DayStatus::JustifiedLeave;
    }
    if nothing_matched {
        return DayStatus::Absence;
    }

    if let (Some(arrival), Some(window)) = (ctx.matched.matched_in, ctx.window) {
        if ctx.matched.matched_out.is_some() {
            let diff_minutes = (arrival - window.target_in()).num_minutes();
            return grade(diff_minutes, ctx.prior_minor_count, config);
        }
    }

    if ctx.matched.matched_in.is_some() {
        DayStatus::MissingCheckout
    } else {
        DayStatus::MissingCheckin
    }
}

/// Picks the governing leave interval for a date.
///
/// When several intervals cover the same day the latest-starting one
/// wins, then the shortest, then the lexicographically smallest symbol,
/// so re-runs always report the same symbol.
fn pick_leave(leaves: &[LeaveInterval], date: NaiveDate) -> Option<&LeaveInterval> {
    leaves.iter().filter(|leave| leave.covers(date)).min_by(|a, b| {
        b.start
            .cmp(&a.start)
            .then_with(|| (a.end - a.start).cmp(&(b.end - b.start)))
            .then_with(|| a.symbol.cmp(&b.symbol))
    })
}

/// Grades a fully matched day by its check-in deviation.
///
/// `diff_minutes` is matched check-in minus target, so early arrivals are
/// negative and always on time. With escalation enabled, a day that would
/// be minor becomes major once the employee has already accumulated the
/// configured number of minor days in the period.
fn grade(diff_minutes: i64, prior_minor_count: u32, config: &ClassifierConfig) -> DayStatus {
    if diff_minutes <= config.checkin_tolerance_minutes {
        DayStatus::OnTime
    } else if diff_minutes <= config.late_minor_ceiling_minutes {
        if config.escalation.enabled && prior_minor_count >= config.escalation.minor_repeat_limit {
            DayStatus::LateMajor
        } else {
            DayStatus::LateMinor
        }
    } else {
        DayStatus::LateMajor
    }
}
