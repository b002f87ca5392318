use std::iter::successors;
use thiserror::Error;
use time::{Date, Month};

pub(super) const DAYS_IN_WEEK: usize = 7;

/// One cell of the calendar grid: a date plus its display flags, derived
/// fresh for every render and never stored.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(super) struct DayCell {
    pub(super) date: Date,
    /// The date belongs to a month adjacent to the one on display.
    pub(super) outside_month: bool,
    pub(super) selected: bool,
    pub(super) today: bool,
}

impl DayCell {
    pub(super) fn classify(
        date: Date,
        month: Date,
        selected: Option<Date>,
        today: Date,
    ) -> DayCell {
        DayCell {
            date,
            outside_month: !same_month(date, month),
            selected: selected == Some(date),
            today: date == today,
        }
    }
}

#[derive(Copy, Clone, Debug, Eq, Error, PartialEq)]
#[error("reached the edge of the calendar")]
pub(super) struct OutOfTimeError;

/// Every date shown for `month`'s calendar month, in order: the week
/// containing the 1st through the week containing the last day, so the
/// length is a multiple of seven.  Weeks run Sunday through Saturday.  At
/// `Date::MIN`/`Date::MAX` the padding days do not exist and the grid clips
/// instead.
pub(super) fn month_grid(month: Date) -> Vec<Date> {
    let start = week_start(first_of_month(month));
    let end = week_end(last_of_month(month));
    successors(Some(start), |&d| d.next_day())
        .take_while(|&d| d <= end)
        .collect()
}

/// Blank columns before `start`'s cell in its grid row.  Zero whenever the
/// grid begins on a Sunday, which is every month but the calendar's first.
pub(super) fn leading_gap(start: Date) -> usize {
    usize::from(start.weekday().number_days_from_sunday())
}

/// `date` moved by `delta` whole months, the day-of-month clipped to the
/// last valid day of the target month.
pub(super) fn shift_months(date: Date, delta: i32) -> Result<Date, OutOfTimeError> {
    let months = date
        .year()
        .checked_mul(12)
        .and_then(|m| m.checked_add(i32::from(u8::from(date.month())) - 1))
        .and_then(|m| m.checked_add(delta))
        .ok_or(OutOfTimeError)?;
    let year = months.div_euclid(12);
    let month = u8::try_from(months.rem_euclid(12) + 1)
        .ok()
        .and_then(|n| Month::try_from(n).ok())
        .expect("a month number modulo twelve should be valid");
    let day = date.day().min(month.length(year));
    Date::from_calendar_date(year, month, day).map_err(|_| OutOfTimeError)
}

fn first_of_month(date: Date) -> Date {
    date.replace_day(1)
        .expect("the first should be a valid day of every month")
}

fn last_of_month(date: Date) -> Date {
    date.replace_day(date.month().length(date.year()))
        .expect("a month's length should be a valid day of it")
}

// Walks backwards to the Sunday of `date`'s week, stopping early at
// `Date::MIN`.
fn week_start(date: Date) -> Date {
    let back = usize::from(date.weekday().number_days_from_sunday());
    days_before(date).take(back).last().unwrap_or(date)
}

// Walks forwards to the Saturday of `date`'s week, stopping early at
// `Date::MAX`.
fn week_end(date: Date) -> Date {
    let ahead = DAYS_IN_WEEK - 1 - usize::from(date.weekday().number_days_from_sunday());
    days_after(date).take(ahead).last().unwrap_or(date)
}

fn days_after(date: Date) -> impl Iterator<Item = Date> {
    successors(Some(date), |&d| d.next_day()).skip(1)
}

fn days_before(date: Date) -> impl Iterator<Item = Date> {
    successors(Some(date), |&d| d.previous_day()).skip(1)
}

fn same_month(a: Date, b: Date) -> bool {
    (a.year(), a.month()) == (b.year(), b.month())
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::date;

    #[test]
    fn test_march_2024_grid() {
        let grid = month_grid(date!(2024 - 03 - 15));
        assert_eq!(grid.len(), 42);
        assert_eq!(grid.first(), Some(&date!(2024 - 02 - 25)));
        assert_eq!(grid.last(), Some(&date!(2024 - 04 - 06)));
        for day in 1..=31 {
            let date = date!(2024 - 03 - 01).replace_day(day).unwrap();
            assert_eq!(grid.iter().filter(|&&d| d == date).count(), 1, "day {day}");
        }
    }

    #[test]
    fn test_exact_month_needs_no_padding() {
        // February 2015 starts on a Sunday and has exactly four weeks.
        let grid = month_grid(date!(2015 - 02 - 14));
        assert_eq!(grid.len(), 28);
        assert_eq!(grid.first(), Some(&date!(2015 - 02 - 01)));
        assert_eq!(grid.last(), Some(&date!(2015 - 02 - 28)));
    }

    #[test]
    fn test_grid_weeks_are_whole() {
        for month in 1..=12 {
            let date = date!(2024 - 01 - 15)
                .replace_month(Month::try_from(month).unwrap())
                .unwrap();
            let grid = month_grid(date);
            assert_eq!(grid.len() % DAYS_IN_WEEK, 0, "month {month}");
            assert_eq!(
                grid.first().copied().map(Date::weekday),
                Some(time::Weekday::Sunday),
                "month {month} start"
            );
            assert_eq!(
                grid.last().copied().map(Date::weekday),
                Some(time::Weekday::Saturday),
                "month {month} end"
            );
        }
    }

    #[test]
    fn test_grid_clips_at_the_dawn_of_time() {
        let grid = month_grid(Date::MIN);
        assert_eq!(grid.first(), Some(&Date::MIN));
        assert_eq!(
            grid.last().copied().map(Date::weekday),
            Some(time::Weekday::Saturday)
        );
        assert!(grid.len() >= 31);
        // The calendar opens on a Monday, leaving one column blank.
        assert_eq!(leading_gap(Date::MIN), 1);
    }

    #[test]
    fn test_grid_clips_at_the_end_of_time() {
        let grid = month_grid(Date::MAX);
        assert_eq!(grid.first(), Some(&date!(9999 - 11 - 28)));
        assert_eq!(grid.last(), Some(&Date::MAX));
        assert_eq!(grid.len(), 34);
        assert_eq!(leading_gap(date!(9999 - 11 - 28)), 0);
    }

    #[test]
    fn test_week_start_of_sunday_is_itself() {
        assert_eq!(week_start(date!(2023 - 11 - 12)), date!(2023 - 11 - 12));
    }

    #[test]
    fn test_week_end_of_saturday_is_itself() {
        assert_eq!(week_end(date!(2023 - 11 - 18)), date!(2023 - 11 - 18));
    }

    #[test]
    fn test_week_bounds_midweek() {
        assert_eq!(week_start(date!(2023 - 11 - 16)), date!(2023 - 11 - 12));
        assert_eq!(week_end(date!(2023 - 11 - 16)), date!(2023 - 11 - 18));
    }

    #[test]
    fn test_shift_clips_to_month_length() {
        assert_eq!(
            shift_months(date!(2024 - 01 - 31), 1),
            Ok(date!(2024 - 02 - 29))
        );
        assert_eq!(
            shift_months(date!(2024 - 03 - 31), -1),
            Ok(date!(2024 - 02 - 29))
        );
        assert_eq!(
            shift_months(date!(2023 - 01 - 31), 1),
            Ok(date!(2023 - 02 - 28))
        );
    }

    #[test]
    fn test_shift_round_trip_mid_month() {
        let start = date!(2024 - 03 - 15);
        let there = shift_months(start, 1).unwrap();
        assert_eq!(there, date!(2024 - 04 - 15));
        assert_eq!(shift_months(there, -1), Ok(start));
    }

    #[test]
    fn test_shift_across_year_boundary() {
        assert_eq!(
            shift_months(date!(2023 - 12 - 10), 1),
            Ok(date!(2024 - 01 - 10))
        );
        assert_eq!(
            shift_months(date!(2024 - 01 - 10), -1),
            Ok(date!(2023 - 12 - 10))
        );
    }

    #[test]
    fn test_shift_off_the_calendar() {
        assert_eq!(shift_months(Date::MAX, 1), Err(OutOfTimeError));
        assert_eq!(shift_months(Date::MIN, -1), Err(OutOfTimeError));
    }

    #[test]
    fn test_classify_flags() {
        let month = date!(2024 - 03 - 15);
        let today = date!(2024 - 03 - 15);
        let selected = Some(date!(2024 - 04 - 06));
        let cells = month_grid(month)
            .into_iter()
            .map(|d| DayCell::classify(d, month, selected, today))
            .collect::<Vec<_>>();
        assert_eq!(cells.iter().filter(|c| c.today).count(), 1);
        assert_eq!(cells.iter().filter(|c| c.selected).count(), 1);
        assert_eq!(cells.iter().filter(|c| c.outside_month).count(), 11);
        let picked = cells.iter().find(|c| c.selected).unwrap();
        assert!(picked.outside_month);
        assert_eq!(picked.date, date!(2024 - 04 - 06));
    }

    #[test]
    fn test_classify_without_selection() {
        let month = date!(2024 - 03 - 15);
        let cells = month_grid(month)
            .into_iter()
            .map(|d| DayCell::classify(d, month, None, date!(2025 - 01 - 01)))
            .collect::<Vec<_>>();
        assert!(cells.iter().all(|c| !c.selected));
        assert!(cells.iter().all(|c| !c.today));
    }
}
