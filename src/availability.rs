use crate::holidays::HolidayCalendar;
use chrono::{Duration, NaiveDate, NaiveTime};
use serde::Serialize;

/// Bookings open tomorrow and close this many days out.
pub const BOOKING_WINDOW_DAYS: i64 = 90;

/// Everything the booking form needs to know about when a table can be
/// reserved. Recomputed per request since "today" moves.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Availability {
    pub min_date: NaiveDate,
    pub max_date: NaiveDate,
    pub holiday_dates: Vec<NaiveDate>,
    pub valid_time_slots: Vec<NaiveTime>,
}

pub fn compute_availability<H: HolidayCalendar>(today: NaiveDate, calendar: &H) -> Availability {
    let max_date = today + Duration::days(BOOKING_WINDOW_DAYS);
    Availability {
        min_date: today + Duration::days(1),
        max_date,
        holiday_dates: calendar.holidays_between(today, max_date),
        valid_time_slots: valid_time_slots(),
    }
}

/// Half-hour marks inside business hours, ascending. The opening mark 09:00
/// and the closing mark 21:30 are not bookable, which leaves 09:30..21:00.
pub fn valid_time_slots() -> Vec<NaiveTime> {
    let mut slots = Vec::new();
    for hour in 9..=21 {
        for minute in [0, 30] {
            if (hour, minute) == (9, 0) || (hour, minute) == (21, 30) {
                continue;
            }
            slots.push(NaiveTime::from_hms_opt(hour, minute, 0).expect("valid slot time"));
        }
    }
    slots
}

#[cfg(test)]
mod test {
    use super::*;

    struct StubCalendar(Vec<NaiveDate>);

    impl HolidayCalendar for StubCalendar {
        fn holidays_between(&self, start: NaiveDate, end: NaiveDate) -> Vec<NaiveDate> {
            self.0
                .iter()
                .copied()
                .filter(|day| *day >= start && *day <= end)
                .collect()
        }
    }

    fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    fn time(hour: u32, minute: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(hour, minute, 0).unwrap()
    }

    #[test]
    fn slots_are_the_24_half_hour_marks() {
        let slots = valid_time_slots();
        assert_eq!(slots.len(), 24);
        assert_eq!(slots.first(), Some(&time(9, 30)));
        assert_eq!(slots.last(), Some(&time(21, 0)));
        assert!(!slots.contains(&time(9, 0)));
        assert!(!slots.contains(&time(21, 30)));
        assert!(slots.windows(2).all(|pair| pair[0] < pair[1]));
    }

    #[test]
    fn window_runs_from_tomorrow_to_ninety_days_out() {
        let today = date(2024, 6, 10);
        let availability = compute_availability(today, &StubCalendar(Vec::new()));
        assert_eq!(availability.min_date, date(2024, 6, 11));
        assert_eq!(availability.max_date, date(2024, 9, 8));
    }

    #[test]
    fn holidays_are_taken_from_the_calendar_within_the_window() {
        let today = date(2024, 6, 10);
        let calendar = StubCalendar(vec![
            date(2024, 6, 10),  // today itself is part of the queried range
            date(2024, 7, 15),
            date(2024, 12, 25), // outside the window
        ]);
        let availability = compute_availability(today, &calendar);
        assert_eq!(
            availability.holiday_dates,
            vec![date(2024, 6, 10), date(2024, 7, 15)]
        );
    }
}
