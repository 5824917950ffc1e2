use chrono::{Datelike, Month, NaiveDate, Timelike};
use nom::{
    character::complete::{char, digit1},
    combinator::{all_consuming, map_res, opt, recognize},
    sequence::{pair, separated_pair},
    IResult,
};
use num_traits::FromPrimitive;
use std::cmp::Ordering;
use std::convert::TryFrom;
use std::fmt;
use std::ops::{Add, Sub};
use std::str::FromStr;

use crate::error::{Error, ErrorKind};

pub const SECONDS_PER_DAY: u32 = 86_400;

/// Number of days of `month` in `year`.
///
/// Asks the calendar for the day before the first of the following month, so
/// leap years come for free.
pub fn days_of_month(month: &Month, year: i32) -> u32 {
    let next = MonthIndex::new(*month, year).next();

    NaiveDate::from_ymd_opt(next.year, next.index.number_from_month(), 1)
        .and_then(|first| first.pred_opt())
        .map(|last| last.day())
        .unwrap_or_else(|| {
            log::warn!(
                "{} {} is outside of the supported date range",
                month.name(),
                year
            );
            gregorian_days_of_month(month, year)
        })
}

fn gregorian_days_of_month(month: &Month, year: i32) -> u32 {
    let is_leap = (year % 4 == 0 && year % 100 != 0) || year % 400 == 0;

    match month.number_from_month() {
        2 if is_leap => 29,
        2 => 28,
        4 | 6 | 9 | 11 => 30,
        _ => 31,
    }
}

/// English ordinal label of a day number: `1st`, `2nd`, `11th`, `23rd`, ...
pub fn ordinal(n: u32) -> String {
    const SUFFIXES: [&str; 4] = ["th", "st", "nd", "rd"];

    let v = n % 100;
    let suffix = v
        .checked_sub(20)
        .and_then(|tens| SUFFIXES.get((tens % 10) as usize))
        .or_else(|| SUFFIXES.get(v as usize))
        .unwrap_or(&SUFFIXES[0]);

    format!("{}{}", n, suffix)
}

/// Fraction of the day elapsed at `time`, in `[0, 1)`.
pub fn day_progress<T: Timelike>(time: &T) -> f64 {
    let elapsed = time.hour() * 3600 + time.minute() * 60 + time.second();
    f64::from(elapsed) / f64::from(SECONDS_PER_DAY)
}

/// Whole percent shown next to the progress bar.
pub fn momentum_percent(progress: f64) -> u32 {
    (progress * 100.0).floor() as u32
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MonthIndex {
    index: Month,
    year: i32,
}

impl MonthIndex {
    pub fn new(index: Month, year: i32) -> Self {
        MonthIndex { index, year }
    }

    /// `month0` counts from 0 (January) to 11 (December).
    pub fn from_month0(month0: u32, year: i32) -> Option<Self> {
        Month::from_u32(month0 + 1).map(|index| MonthIndex { index, year })
    }

    pub fn month(&self) -> Month {
        self.index
    }

    pub fn month0(&self) -> u32 {
        self.index.number_from_month() - 1
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn name(&self) -> &'static str {
        self.index.name()
    }

    pub fn num_days(&self) -> u32 {
        days_of_month(&self.index, self.year)
    }

    /// Moves by `months`, rolling the year over in both directions.
    ///
    /// Stops at the first and last month representable by an `i32` year.
    pub fn offset(&self, months: i32) -> Self {
        let total = i64::from(self.year) * 12 + i64::from(self.month0()) + i64::from(months);
        let month0 = total.rem_euclid(12) as u32;

        match i32::try_from(total.div_euclid(12)) {
            Ok(year) => MonthIndex {
                index: Month::from_u32(month0 + 1).unwrap_or(Month::January),
                year,
            },
            Err(_) => {
                log::warn!("Cannot move {} months from {}", months, self);
                if months < 0 {
                    MonthIndex::new(Month::January, i32::MIN)
                } else {
                    MonthIndex::new(Month::December, i32::MAX)
                }
            }
        }
    }

    pub fn next(&self) -> Self {
        self.offset(1)
    }

    pub fn prev(&self) -> Self {
        self.offset(-1)
    }

    pub fn contains<T: Datelike>(&self, date: &T) -> bool {
        date.year() == self.year && date.month() == self.index.number_from_month()
    }

    /// Whether `day` of this month lies strictly before the calendar date of `date`.
    pub fn is_day_before<T: Datelike>(&self, day: u32, date: &T) -> bool {
        (self.year, self.index.number_from_month(), day) < (date.year(), date.month(), date.day())
    }
}

impl<T: Datelike> From<T> for MonthIndex {
    fn from(m: T) -> Self {
        MonthIndex {
            index: Month::from_u32(m.month()).unwrap_or(Month::January),
            year: m.year(),
        }
    }
}

impl Add<i32> for MonthIndex {
    type Output = MonthIndex;
    fn add(self, rhs: i32) -> Self::Output {
        self.offset(rhs)
    }
}

impl Sub<i32> for MonthIndex {
    type Output = MonthIndex;
    fn sub(self, rhs: i32) -> Self::Output {
        self.offset(-rhs)
    }
}

impl Ord for MonthIndex {
    fn cmp(&self, other: &Self) -> Ordering {
        (self.year, self.index.number_from_month())
            .cmp(&(other.year, other.index.number_from_month()))
    }
}

impl PartialOrd for MonthIndex {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for MonthIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.index.name(), self.year)
    }
}

fn year_and_month(input: &str) -> IResult<&str, (i32, u32)> {
    separated_pair(
        map_res(recognize(pair(opt(char('-')), digit1)), |s: &str| {
            s.parse::<i32>()
        }),
        char('-'),
        map_res(digit1, |s: &str| s.parse::<u32>()),
    )(input)
}

impl FromStr for MonthIndex {
    type Err = Error;

    /// Parses `YYYY-MM`, e.g. `2026-10`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (_, (year, month)) = all_consuming(year_and_month)(s.trim())
            .map_err(|_| Error::new(ErrorKind::MonthParse, s))?;

        Month::from_u32(month)
            .map(|index| MonthIndex::new(index, year))
            .ok_or_else(|| Error::new(ErrorKind::MonthParse, s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveTime;

    #[test]
    fn days_of_month_matches_calendar() {
        for year in 1899..=2101 {
            for number in 1..=12 {
                let month = Month::from_u32(number).unwrap();
                assert_eq!(
                    days_of_month(&month, year),
                    gregorian_days_of_month(&month, year),
                    "{} {}",
                    month.name(),
                    year
                );
            }
        }

        assert_eq!(days_of_month(&Month::February, 2024), 29);
        assert_eq!(days_of_month(&Month::February, 2023), 28);
        assert_eq!(days_of_month(&Month::February, 2000), 29);
        assert_eq!(days_of_month(&Month::February, 1900), 28);
        assert_eq!(days_of_month(&Month::April, 2026), 30);
        assert_eq!(days_of_month(&Month::December, 2026), 31);
    }

    #[test]
    fn offset_rolls_over_years() {
        let jan = MonthIndex::new(Month::January, 2026);
        assert_eq!(jan.prev(), MonthIndex::new(Month::December, 2025));

        let dec = MonthIndex::new(Month::December, 2026);
        assert_eq!(dec.next(), MonthIndex::new(Month::January, 2027));

        assert_eq!(jan + 25, MonthIndex::new(Month::February, 2028));
        assert_eq!(jan - 25, MonthIndex::new(Month::December, 2023));
    }

    #[test]
    fn offset_stops_at_the_year_range() {
        let last = MonthIndex::new(Month::December, i32::MAX);
        assert_eq!(last.next(), last);
        assert_eq!(last + i32::MAX, last);
        assert_eq!(last.prev(), MonthIndex::new(Month::November, i32::MAX));

        let first = MonthIndex::new(Month::January, i32::MIN);
        assert_eq!(first.prev(), first);
        assert_eq!(first - i32::MAX, first);
        assert_eq!(first.next(), MonthIndex::new(Month::February, i32::MIN));

        assert_eq!(days_of_month(&Month::December, i32::MAX), 31);
    }

    #[test]
    fn twelve_steps_are_one_year() {
        for month0 in 0..12 {
            let start = MonthIndex::from_month0(month0, 2026).unwrap();

            let forward = (0..12).fold(start, |m, _| m.next());
            assert_eq!(forward, MonthIndex::from_month0(month0, 2027).unwrap());

            let back = (0..12).fold(forward, |m, _| m.prev());
            assert_eq!(back, start);
        }
    }

    #[test]
    fn month_index_ordering() {
        let a = MonthIndex::new(Month::December, 2025);
        let b = MonthIndex::new(Month::January, 2026);
        assert!(a < b);
        assert_eq!(a.next().cmp(&b), Ordering::Equal);
    }

    #[test]
    fn ordinals() {
        let expected = [
            (1, "1st"),
            (2, "2nd"),
            (3, "3rd"),
            (4, "4th"),
            (10, "10th"),
            (11, "11th"),
            (12, "12th"),
            (13, "13th"),
            (14, "14th"),
            (20, "20th"),
            (21, "21st"),
            (22, "22nd"),
            (23, "23rd"),
            (24, "24th"),
            (31, "31st"),
            (101, "101st"),
            (111, "111th"),
        ];

        for (n, label) in expected.iter() {
            assert_eq!(ordinal(*n), *label);
        }
    }

    #[test]
    fn progress_through_the_day() {
        let midnight = NaiveTime::from_hms_opt(0, 0, 0).unwrap();
        let noon = NaiveTime::from_hms_opt(12, 0, 0).unwrap();
        let last_second = NaiveTime::from_hms_opt(23, 59, 59).unwrap();

        assert_eq!(day_progress(&midnight), 0.0);
        assert_eq!(day_progress(&noon), 0.5);
        assert!((day_progress(&last_second) - 0.999988).abs() < 1e-6);

        assert_eq!(momentum_percent(day_progress(&noon)), 50);
        assert_eq!(momentum_percent(day_progress(&last_second)), 99);
    }

    #[test]
    fn parse_month_index() {
        assert_eq!(
            "2026-10".parse::<MonthIndex>().unwrap(),
            MonthIndex::new(Month::October, 2026)
        );
        assert_eq!(
            "-44-3".parse::<MonthIndex>().unwrap(),
            MonthIndex::new(Month::March, -44)
        );
        assert!("2026-13".parse::<MonthIndex>().is_err());
        assert!("2026/10".parse::<MonthIndex>().is_err());
        assert!("october".parse::<MonthIndex>().is_err());
    }

    #[test]
    fn display_and_accessors() {
        let m = MonthIndex::from_month0(9, 2026).unwrap();
        assert_eq!(m.to_string(), "October 2026");
        assert_eq!(m.month0(), 9);
        assert_eq!(m.num_days(), 31);
        assert!(MonthIndex::from_month0(12, 2026).is_none());
    }
}
