//! Occurrence rule evaluation for recurring chores.
//!
//! Pure date arithmetic with no I/O: decides whether a chore is due on a
//! given calendar day, and which date window initial generation covers.
//! All dates are calendar days in UTC.

use chrono::{Datelike, NaiveDate};

use crate::models::chore::{DayOfWeek, IntervalUnit, OccurrenceData, OccurrenceType};

/// Divisor for custom month intervals. Fixed 30-day months, not true
/// calendar-month arithmetic.
const DAYS_PER_MONTH: i64 = 30;

/// Returns true iff a chore with the given rule is due on `date`.
///
/// Dates outside `[start_date, end_date]` are never due. A custom rule
/// with a missing or non-positive interval is never due.
pub fn is_due(occurrence_type: OccurrenceType, data: &OccurrenceData, date: NaiveDate) -> bool {
    if date < data.start_date {
        return false;
    }
    if let Some(end_date) = data.end_date {
        if date > end_date {
            return false;
        }
    }

    match occurrence_type {
        OccurrenceType::Daily => true,
        OccurrenceType::Weekly => data
            .days_of_week
            .contains(&DayOfWeek::from_weekday(date.weekday())),
        OccurrenceType::Monthly => data.days_of_month.contains(&(date.day() as i16)),
        OccurrenceType::Custom => is_due_custom(data, date),
    }
}

fn is_due_custom(data: &OccurrenceData, date: NaiveDate) -> bool {
    let (interval, unit) = match (data.interval, data.interval_unit) {
        (Some(interval), Some(unit)) if interval >= 1 => (i64::from(interval), unit),
        _ => return false,
    };

    // Non-negative, the range check above already rejected earlier dates.
    let days_elapsed = (date - data.start_date).num_days();

    match unit {
        IntervalUnit::Day => days_elapsed % interval == 0,
        IntervalUnit::Week => (days_elapsed / 7) % interval == 0,
        IntervalUnit::Month => (days_elapsed / DAYS_PER_MONTH) % interval == 0,
    }
}

/// Date window `[from, to]` that initial generation covers for a rule.
///
/// Returns `None` for future-dated rules. The window ends at `today`,
/// clamped to the rule's end date when that is earlier.
pub fn generation_window(data: &OccurrenceData, today: NaiveDate) -> Option<(NaiveDate, NaiveDate)> {
    if data.start_date > today {
        return None;
    }
    let to = match data.end_date {
        Some(end_date) if end_date < today => end_date,
        _ => today,
    };
    Some((data.start_date, to))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn rule_from(start: NaiveDate) -> OccurrenceData {
        OccurrenceData::daily(start)
    }

    #[test]
    fn test_daily_due_every_day_in_range() {
        let mut data = rule_from(date(2024, 1, 10));
        data.end_date = Some(date(2024, 1, 20));

        assert!(!is_due(OccurrenceType::Daily, &data, date(2024, 1, 9)));
        assert!(is_due(OccurrenceType::Daily, &data, date(2024, 1, 10)));
        assert!(is_due(OccurrenceType::Daily, &data, date(2024, 1, 15)));
        assert!(is_due(OccurrenceType::Daily, &data, date(2024, 1, 20)));
        assert!(!is_due(OccurrenceType::Daily, &data, date(2024, 1, 21)));
    }

    #[test]
    fn test_daily_unbounded_when_no_end_date() {
        let data = rule_from(date(2024, 1, 1));
        assert!(is_due(OccurrenceType::Daily, &data, date(2030, 6, 15)));
    }

    #[test]
    fn test_weekly_due_only_on_listed_weekdays() {
        // 2024-01-01 is a Monday.
        let mut data = rule_from(date(2024, 1, 1));
        data.days_of_week = vec![DayOfWeek::Monday, DayOfWeek::Wednesday];

        assert!(is_due(OccurrenceType::Weekly, &data, date(2024, 1, 1)));
        assert!(!is_due(OccurrenceType::Weekly, &data, date(2024, 1, 2)));
        assert!(is_due(OccurrenceType::Weekly, &data, date(2024, 1, 3)));
        assert!(!is_due(OccurrenceType::Weekly, &data, date(2024, 1, 4)));
        assert!(is_due(OccurrenceType::Weekly, &data, date(2024, 1, 8)));
    }

    #[test]
    fn test_weekly_with_empty_days_never_due() {
        let data = rule_from(date(2024, 1, 1));
        assert!(!is_due(OccurrenceType::Weekly, &data, date(2024, 1, 1)));
    }

    #[test]
    fn test_monthly_due_on_listed_days() {
        let mut data = rule_from(date(2024, 1, 1));
        data.days_of_month = vec![1, 15];

        assert!(is_due(OccurrenceType::Monthly, &data, date(2024, 1, 1)));
        assert!(is_due(OccurrenceType::Monthly, &data, date(2024, 1, 15)));
        assert!(is_due(OccurrenceType::Monthly, &data, date(2024, 2, 15)));
        assert!(!is_due(OccurrenceType::Monthly, &data, date(2024, 1, 14)));
    }

    #[test]
    fn test_monthly_with_empty_days_never_due() {
        let data = rule_from(date(2024, 1, 1));
        assert!(!is_due(OccurrenceType::Monthly, &data, date(2024, 1, 1)));
    }

    #[test]
    fn test_custom_day_interval() {
        let mut data = rule_from(date(2024, 1, 1));
        data.interval = Some(3);
        data.interval_unit = Some(IntervalUnit::Day);

        assert!(is_due(OccurrenceType::Custom, &data, date(2024, 1, 1)));
        assert!(!is_due(OccurrenceType::Custom, &data, date(2024, 1, 2)));
        assert!(!is_due(OccurrenceType::Custom, &data, date(2024, 1, 3)));
        assert!(is_due(OccurrenceType::Custom, &data, date(2024, 1, 4)));
        assert!(is_due(OccurrenceType::Custom, &data, date(2024, 1, 7)));
    }

    #[test]
    fn test_custom_week_interval_counts_whole_weeks() {
        let mut data = rule_from(date(2024, 1, 1));
        data.interval = Some(2);
        data.interval_unit = Some(IntervalUnit::Week);

        // Week 0 is due, week 1 is not, week 2 is due again.
        assert!(is_due(OccurrenceType::Custom, &data, date(2024, 1, 1)));
        assert!(is_due(OccurrenceType::Custom, &data, date(2024, 1, 7)));
        assert!(!is_due(OccurrenceType::Custom, &data, date(2024, 1, 8)));
        assert!(!is_due(OccurrenceType::Custom, &data, date(2024, 1, 14)));
        assert!(is_due(OccurrenceType::Custom, &data, date(2024, 1, 15)));
    }

    #[test]
    fn test_custom_month_interval_uses_thirty_day_months() {
        let mut data = rule_from(date(2024, 1, 1));
        data.interval = Some(2);
        data.interval_unit = Some(IntervalUnit::Month);

        // Days 0-29 fall in "month" 0, days 30-59 in "month" 1.
        assert!(is_due(OccurrenceType::Custom, &data, date(2024, 1, 1)));
        assert!(is_due(OccurrenceType::Custom, &data, date(2024, 1, 30)));
        assert!(!is_due(OccurrenceType::Custom, &data, date(2024, 1, 31)));
        assert!(!is_due(OccurrenceType::Custom, &data, date(2024, 2, 29)));
        assert!(is_due(OccurrenceType::Custom, &data, date(2024, 3, 1)));
    }

    #[test]
    fn test_custom_missing_interval_never_due() {
        let mut data = rule_from(date(2024, 1, 1));
        data.interval_unit = Some(IntervalUnit::Day);
        assert!(!is_due(OccurrenceType::Custom, &data, date(2024, 1, 1)));
    }

    #[test]
    fn test_custom_missing_unit_never_due() {
        let mut data = rule_from(date(2024, 1, 1));
        data.interval = Some(3);
        assert!(!is_due(OccurrenceType::Custom, &data, date(2024, 1, 1)));
    }

    #[test]
    fn test_custom_non_positive_interval_never_due() {
        let mut data = rule_from(date(2024, 1, 1));
        data.interval = Some(0);
        data.interval_unit = Some(IntervalUnit::Day);
        assert!(!is_due(OccurrenceType::Custom, &data, date(2024, 1, 1)));

        data.interval = Some(-3);
        assert!(!is_due(OccurrenceType::Custom, &data, date(2024, 1, 1)));
    }

    #[test]
    fn test_generation_window_future_start() {
        let data = rule_from(date(2024, 6, 1));
        assert_eq!(generation_window(&data, date(2024, 5, 31)), None);
    }

    #[test]
    fn test_generation_window_ends_today() {
        let data = rule_from(date(2024, 1, 1));
        assert_eq!(
            generation_window(&data, date(2024, 1, 10)),
            Some((date(2024, 1, 1), date(2024, 1, 10)))
        );
    }

    #[test]
    fn test_generation_window_clamped_to_end_date() {
        let mut data = rule_from(date(2024, 1, 1));
        data.end_date = Some(date(2024, 1, 5));
        assert_eq!(
            generation_window(&data, date(2024, 1, 10)),
            Some((date(2024, 1, 1), date(2024, 1, 5)))
        );
    }

    #[test]
    fn test_generation_window_starts_today() {
        let data = rule_from(date(2024, 1, 10));
        assert_eq!(
            generation_window(&data, date(2024, 1, 10)),
            Some((date(2024, 1, 10), date(2024, 1, 10)))
        );
    }
}
