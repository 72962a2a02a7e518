use chrono::{Datelike, Duration, NaiveDate, Weekday};

/// Holiday calendar collaborator. The availability computation only needs
/// the holidays inside a date range, so that is the whole interface.
pub trait HolidayCalendar {
    fn holidays_between(&self, start: NaiveDate, end: NaiveDate) -> Vec<NaiveDate>;
}

/// Japanese public holidays, generated from the current holiday law rather
/// than a hand-kept table. Covers 1980..=2099 (the equinox approximation is
/// only valid in that span). Historical one-off moves (e.g. the 2020/2021
/// Olympic rearrangements) are not reproduced.
#[derive(Debug, Clone, Copy, Default)]
pub struct JapaneseHolidays;

impl JapaneseHolidays {
    /// Holidays as written in the law, before substitute-day rules.
    fn base_holidays(year: i32) -> Vec<NaiveDate> {
        let mut days = vec![
            ymd(year, 1, 1),                         // New Year's Day
            nth_monday(year, 1, 2),                  // Coming of Age Day
            ymd(year, 2, 11),                        // National Foundation Day
            ymd(year, 2, 23),                        // Emperor's Birthday
            ymd(year, 3, equinox_day(year, 20.8431)), // Vernal Equinox Day
            ymd(year, 4, 29),                        // Showa Day
            ymd(year, 5, 3),                         // Constitution Memorial Day
            ymd(year, 5, 4),                         // Greenery Day
            ymd(year, 5, 5),                         // Children's Day
            nth_monday(year, 7, 3),                  // Marine Day
            ymd(year, 8, 11),                        // Mountain Day
            nth_monday(year, 9, 3),                  // Respect for the Aged Day
            ymd(year, 9, equinox_day(year, 23.2488)), // Autumnal Equinox Day
            nth_monday(year, 10, 2),                 // Sports Day
            ymd(year, 11, 3),                        // Culture Day
            ymd(year, 11, 23),                       // Labor Thanksgiving Day
        ];
        days.sort();
        days.dedup();
        days
    }

    fn holidays_in_year(year: i32) -> Vec<NaiveDate> {
        let base = Self::base_holidays(year);
        let mut all = base.clone();

        // Substitute holiday: a holiday falling on a Sunday pushes the next
        // day that is not itself a holiday into being one.
        for day in &base {
            if day.weekday() == Weekday::Sun {
                let mut substitute = *day + Duration::days(1);
                while base.contains(&substitute) {
                    substitute += Duration::days(1);
                }
                all.push(substitute);
            }
        }

        // Citizens' holiday: a single non-Sunday weekday squeezed between
        // two holidays becomes a holiday itself (the September silver week).
        for day in &base {
            let sandwiched = *day + Duration::days(1);
            let day_after = *day + Duration::days(2);
            if base.contains(&day_after)
                && !all.contains(&sandwiched)
                && sandwiched.weekday() != Weekday::Sun
            {
                all.push(sandwiched);
            }
        }

        all.sort();
        all.dedup();
        all
    }
}

impl HolidayCalendar for JapaneseHolidays {
    fn holidays_between(&self, start: NaiveDate, end: NaiveDate) -> Vec<NaiveDate> {
        let mut holidays = Vec::new();
        for year in start.year()..=end.year() {
            holidays.extend(
                Self::holidays_in_year(year)
                    .into_iter()
                    .filter(|day| *day >= start && *day <= end),
            );
        }
        holidays
    }
}

fn ymd(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("valid holiday date")
}

fn nth_monday(year: i32, month: u32, nth: u32) -> NaiveDate {
    let first = ymd(year, month, 1);
    let offset = (7 - first.weekday().num_days_from_monday()) % 7;
    first + Duration::days(offset as i64 + (nth as i64 - 1) * 7)
}

// Astronomical approximation, valid for 1980..=2099.
fn equinox_day(year: i32, base: f64) -> u32 {
    let years_since_1980 = year - 1980;
    (base + 0.242194 * years_since_1980 as f64) as u32 - (years_since_1980 / 4) as u32
}
