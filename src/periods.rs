use chrono::{Datelike, Duration, NaiveDate};

/// Fixed vocabulary selecting a date range for the booking listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PeriodToken {
    Today,
    Tomorrow,
    ThisWeek,
    ThisMonth,
    NextMonth,
    PastBooking,
}

/// Inclusive date range. A missing start means the range is open-ended
/// towards the past.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    pub start: Option<NaiveDate>,
    pub end: NaiveDate,
}

impl PeriodToken {
    /// Unknown tokens silently fall back to `Today`.
    pub fn parse(token: &str) -> Self {
        match token {
            "today" => PeriodToken::Today,
            "tomorrow" => PeriodToken::Tomorrow,
            "this_week" => PeriodToken::ThisWeek,
            "this_month" => PeriodToken::ThisMonth,
            "next_month" => PeriodToken::NextMonth,
            "past_booking" => PeriodToken::PastBooking,
            _ => PeriodToken::Today,
        }
    }

    pub fn token(&self) -> &'static str {
        match self {
            PeriodToken::Today => "today",
            PeriodToken::Tomorrow => "tomorrow",
            PeriodToken::ThisWeek => "this_week",
            PeriodToken::ThisMonth => "this_month",
            PeriodToken::NextMonth => "next_month",
            PeriodToken::PastBooking => "past_booking",
        }
    }

    pub fn date_range(&self, today: NaiveDate) -> DateRange {
        match self {
            PeriodToken::Today => DateRange {
                start: Some(today),
                end: today,
            },
            PeriodToken::Tomorrow => {
                let tomorrow = today + Duration::days(1);
                DateRange {
                    start: Some(tomorrow),
                    end: tomorrow,
                }
            }
            // Week ends on the next Sunday, inclusive.
            PeriodToken::ThisWeek => {
                let days_to_sunday = 6 - today.weekday().num_days_from_monday() as i64;
                DateRange {
                    start: Some(today),
                    end: today + Duration::days(days_to_sunday),
                }
            }
            PeriodToken::ThisMonth => DateRange {
                start: Some(today),
                end: last_day_of_month(today.year(), today.month()),
            },
            PeriodToken::NextMonth => {
                let (year, month) = if today.month() == 12 {
                    (today.year() + 1, 1)
                } else {
                    (today.year(), today.month() + 1)
                };
                DateRange {
                    start: first_day_of_month(year, month),
                    end: last_day_of_month(year, month),
                }
            }
            PeriodToken::PastBooking => DateRange {
                start: None,
                end: today - Duration::days(1),
            },
        }
    }
}

fn first_day_of_month(year: i32, month: u32) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(year, month, 1)
}

fn last_day_of_month(year: i32, month: u32) -> NaiveDate {
    let (next_year, next_month) = if month == 12 {
        (year + 1, 1)
    } else {
        (year, month + 1)
    };
    NaiveDate::from_ymd_opt(next_year, next_month, 1)
        .and_then(|first| first.pred_opt())
        .expect("month start is always representable")
}

#[cfg(test)]
mod test {
    use super::*;

    fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    #[test_case::test_case("today", PeriodToken::Today)]
    #[test_case::test_case("tomorrow", PeriodToken::Tomorrow)]
    #[test_case::test_case("this_week", PeriodToken::ThisWeek)]
    #[test_case::test_case("this_month", PeriodToken::ThisMonth)]
    #[test_case::test_case("next_month", PeriodToken::NextMonth)]
    #[test_case::test_case("past_booking", PeriodToken::PastBooking)]
    #[test_case::test_case("last_tuesday", PeriodToken::Today ; "unknown token falls back to today")]
    #[test_case::test_case("", PeriodToken::Today ; "empty token falls back to today")]
    fn parse_tokens(token: &str, expected: PeriodToken) {
        assert_eq!(PeriodToken::parse(token), expected);
    }

    #[test]
    fn today_and_tomorrow_are_single_days() {
        let today = date(2024, 6, 10);
        let range = PeriodToken::Today.date_range(today);
        assert_eq!(range.start, Some(today));
        assert_eq!(range.end, today);

        let range = PeriodToken::Tomorrow.date_range(today);
        assert_eq!(range.start, Some(date(2024, 6, 11)));
        assert_eq!(range.end, date(2024, 6, 11));
    }

    #[test]
    fn this_week_ends_on_sunday() {
        // 2024-06-12 is a Wednesday; the week runs through Sunday the 16th.
        let range = PeriodToken::ThisWeek.date_range(date(2024, 6, 12));
        assert_eq!(range.start, Some(date(2024, 6, 12)));
        assert_eq!(range.end, date(2024, 6, 16));

        // Starting on a Sunday the week is a single day.
        let range = PeriodToken::ThisWeek.date_range(date(2024, 6, 16));
        assert_eq!(range.end, date(2024, 6, 16));
    }

    #[test]
    fn this_month_ends_on_last_calendar_day() {
        let range = PeriodToken::ThisMonth.date_range(date(2024, 2, 10));
        assert_eq!(range.start, Some(date(2024, 2, 10)));
        assert_eq!(range.end, date(2024, 2, 29)); // leap year

        let range = PeriodToken::ThisMonth.date_range(date(2023, 2, 10));
        assert_eq!(range.end, date(2023, 2, 28));
    }

    #[test]
    fn next_month_handles_year_rollover() {
        let range = PeriodToken::NextMonth.date_range(date(2024, 12, 15));
        assert_eq!(range.start, Some(date(2025, 1, 1)));
        assert_eq!(range.end, date(2025, 1, 31));

        let range = PeriodToken::NextMonth.date_range(date(2024, 3, 31));
        assert_eq!(range.start, Some(date(2024, 4, 1)));
        assert_eq!(range.end, date(2024, 4, 30));
    }

    #[test]
    fn past_booking_is_open_ended() {
        let range = PeriodToken::PastBooking.date_range(date(2024, 6, 10));
        assert_eq!(range.start, None);
        assert_eq!(range.end, date(2024, 6, 9));
    }
}
