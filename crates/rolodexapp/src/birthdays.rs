//! Upcoming-birthday date arithmetic.
//!
//! For a birth date and a reference day ("today"):
//!
//! 1. Take the birthday's month/day in the current year. Feb 29 in a non-leap
//!    year becomes Mar 1.
//! 2. If that day is already behind us, do the same for next year.
//! 3. The congratulation day is the birthday itself, unless it falls on a
//!    weekend, in which case it moves to the following Monday.

use chrono::{Datelike, Days, NaiveDate, Weekday};

/// The birthday's anniversary in `year`, with Feb 29 mapped to Mar 1 in
/// non-leap years.
pub fn anniversary_in(birthday: NaiveDate, year: i32) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(year, birthday.month(), birthday.day())
        .or_else(|| NaiveDate::from_ymd_opt(year, 3, 1))
}

/// The next anniversary on or after `today`.
pub fn next_birthday(birthday: NaiveDate, today: NaiveDate) -> Option<NaiveDate> {
    let this_year = anniversary_in(birthday, today.year())?;
    if this_year < today {
        anniversary_in(birthday, today.year() + 1)
    } else {
        Some(this_year)
    }
}

/// Shifts Saturday and Sunday forward to Monday.
pub fn congratulation_date(day: NaiveDate) -> Option<NaiveDate> {
    let shift = match day.weekday() {
        Weekday::Sat | Weekday::Sun => 7 - u64::from(day.weekday().num_days_from_monday()),
        _ => 0,
    };
    day.checked_add_days(Days::new(shift))
}

/// When to congratulate someone born on `birthday`, if their next birthday
/// is at most `days` days after `today`.
pub fn upcoming(birthday: NaiveDate, today: NaiveDate, days: u32) -> Option<NaiveDate> {
    let next = next_birthday(birthday, today)?;
    let days_to = (next - today).num_days();
    if (0..=i64::from(days)).contains(&days_to) {
        congratulation_date(next)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_leap_day_in_non_leap_year_maps_to_march_first() {
        assert_eq!(anniversary_in(date(2000, 2, 29), 2023), Some(date(2023, 3, 1)));
        assert_eq!(anniversary_in(date(2000, 2, 29), 2024), Some(date(2024, 2, 29)));
    }

    #[test]
    fn test_next_birthday_today_counts() {
        let today = date(2024, 5, 10);
        assert_eq!(next_birthday(date(1990, 5, 10), today), Some(today));
    }

    #[test]
    fn test_next_birthday_rolls_over_to_next_year() {
        let today = date(2024, 12, 30);
        assert_eq!(
            next_birthday(date(1990, 1, 2), today),
            Some(date(2025, 1, 2))
        );
        // Leap-day birthday rolling into a non-leap year
        let today = date(2024, 3, 2);
        assert_eq!(
            next_birthday(date(2000, 2, 29), today),
            Some(date(2025, 3, 1))
        );
    }

    #[test]
    fn test_weekend_moves_to_monday() {
        // 2024-06-08 is a Saturday, 2024-06-09 a Sunday
        assert_eq!(congratulation_date(date(2024, 6, 8)), Some(date(2024, 6, 10)));
        assert_eq!(congratulation_date(date(2024, 6, 9)), Some(date(2024, 6, 10)));
        assert_eq!(congratulation_date(date(2024, 6, 7)), Some(date(2024, 6, 7)));
        assert_eq!(congratulation_date(date(2024, 6, 10)), Some(date(2024, 6, 10)));
    }

    #[test]
    fn test_upcoming_window_is_inclusive() {
        // Monday 2024-06-03
        let today = date(2024, 6, 3);
        assert_eq!(upcoming(date(1990, 6, 3), today, 7), Some(date(2024, 6, 3)));
        assert_eq!(upcoming(date(1990, 6, 10), today, 7), Some(date(2024, 6, 10)));
        assert_eq!(upcoming(date(1990, 6, 11), today, 7), None);
        assert_eq!(upcoming(date(1990, 6, 2), today, 7), None);
        assert_eq!(upcoming(date(1990, 6, 3), today, 0), Some(date(2024, 6, 3)));
    }

    #[test]
    fn test_upcoming_weekend_birthday_may_land_past_window() {
        // Friday 2024-06-07; birthday Sunday 06-09 is 2 days away, congratulated Monday 06-10
        let today = date(2024, 6, 7);
        assert_eq!(upcoming(date(1985, 6, 9), today, 2), Some(date(2024, 6, 10)));
    }

    #[test]
    fn test_upcoming_leap_day_in_non_leap_year() {
        // 2023-02-27 is a Monday; Feb 29 → Wed Mar 1
        let today = date(2023, 2, 27);
        assert_eq!(upcoming(date(2000, 2, 29), today, 7), Some(date(2023, 3, 1)));
    }
}
