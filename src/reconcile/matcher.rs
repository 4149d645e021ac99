//! Punch-to-window matching.
//!
//! Assigns one day's normalized punches to the expected check-in and
//! check-out slots of that day's schedule window. The assignment is a
//! greedy nearest-candidate pass, not a globally optimal matching; a day
//! normally has only two meaningful punches, so days with more clusters
//! are flagged instead of solved.

use chrono::{Duration, NaiveDateTime};

use crate::config::MatcherConfig;
use crate::models::ScheduleWindow;

/// The outcome of matching one day's punches against its window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PunchMatch {
    /// The punch accepted for the check-in slot.
    pub matched_in: Option<NaiveDateTime>,
    /// The punch accepted for the check-out slot.
    pub matched_out: Option<NaiveDateTime>,
    /// More than two punch clusters survived cleanup that day.
    pub multi_punch: bool,
}

/// Matches one day's normalized punches against the schedule window.
///
/// Every punch is assigned to whichever of `target_in`/`target_out` it is
/// nearer to (a tie goes to the check-in slot); per slot, the punch with
/// the minimum distance wins, accepted only within the configured
/// tolerance. Two special behaviors are kept from the field:
///
/// - A single-punch day assigns its punch to the nearer slot without any
///   tolerance check, which matches looser than the two-punch case.
/// - A matched check-out earlier than `target_out` is discarded: leaving
///   before the scheduled end is never a completed day and must surface
///   as an omission instead.
///
/// With no window nothing can match.
///
/// # Example
///
/// ```
/// use attendance_engine::config::MatcherConfig;
/// use attendance_engine::models::ScheduleWindow;
/// use attendance_engine::reconcile::match_punches;
/// use chrono::{NaiveDate, NaiveTime};
///
/// let window = ScheduleWindow {
///     employee_id: "emp_001".to_string(),
///     date: NaiveDate::from_ymd_opt(2025, 3, 10).unwrap(),
///     expected_in: NaiveTime::from_hms_opt(8, 0, 0).unwrap(),
///     duration_minutes: 540,
/// };
/// let config = MatcherConfig { punch_match_tolerance_minutes: 30 };
/// let punches = vec![
///     NaiveDate::from_ymd_opt(2025, 3, 10).unwrap().and_hms_opt(8, 2, 0).unwrap(),
///     NaiveDate::from_ymd_opt(2025, 3, 10).unwrap().and_hms_opt(17, 4, 0).unwrap(),
/// ];
///
/// let matched = match_punches(&punches, Some(&window), &config);
/// assert_eq!(matched.matched_in, Some(punches[0]));
/// assert_eq!(matched.matched_out, Some(punches[1]));
/// assert!(!matched.multi_punch);
/// ```
pub fn match_punches(
    punches: &[NaiveDateTime],
    window: Option<&ScheduleWindow>,
    config: &MatcherConfig,
) -> PunchMatch {
    let multi_punch = punches.len() > 2;

    let Some(window) = window else {
        return PunchMatch {
            multi_punch,
            ..PunchMatch::default()
        };
    };
    if punches.is_empty() {
        return PunchMatch::default();
    }

    let target_in = window.target_in();
    let target_out = window.target_out();

    let mut matched_in = None;
    let mut matched_out = None;

    if let [punch] = punches {
        // Single punch: nearer slot wins, tolerance deliberately skipped.
        if distance(*punch, target_in) <= distance(*punch, target_out) {
            matched_in = Some(*punch);
        } else {
            matched_out = Some(*punch);
        }
    } else {
        let tolerance = Duration::minutes(config.punch_match_tolerance_minutes);
        let mut best_in: Option<(Duration, NaiveDateTime)> = None;
        let mut best_out: Option<(Duration, NaiveDateTime)> = None;

        for &punch in punches {
            let to_in = distance(punch, target_in);
            let to_out = distance(punch, target_out);
            if to_in <= to_out {
                if to_in <= tolerance && best_in.is_none_or(|(best, _)| to_in < best) {
                    best_in = Some((to_in, punch));
                }
            } else if to_out <= tolerance && best_out.is_none_or(|(best, _)| to_out < best) {
                best_out = Some((to_out, punch));
            }
        }

        matched_in = best_in.map(|(_, punch)| punch);
        matched_out = best_out.map(|(_, punch)| punch);
    }

    // Early-departure override: an exit before the scheduled end is not a
    // valid checkout.
    if matched_out.is_some_and(|out| out < target_out) {
        matched_out = None;
    }

    PunchMatch {
        matched_in,
        matched_out,
        multi_punch,
    }
}

/// Absolute time distance between a punch and a slot target.
fn distance(punch: NaiveDateTime, target: NaiveDateTime) -> Duration {
    (punch - target).abs()
}
