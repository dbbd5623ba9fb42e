//! age.rs
//!
//! This module computes the full set of age figures for a birth date:
//!     周岁 (international age), 虚岁 (nominal age), 生肖, days lived,
//!     days to the next birthday, and lunar renderings of both dates.
//!
//! The two ages come from different calendars and are never derived from one
//! another:
//!   • 周岁 is Gregorian year subtraction with a borrow when this year's
//!     birthday hasn't happened yet
//!   • 虚岁 is 1 at birth plus one for every lunar new year crossed
//!
//! Only the date portion of "now" takes part, so every day count here is an
//! exact whole-day difference.
//!
//! A Feb 29 birthday is observed on Mar 1 in non-leap years. That is also the
//! day the borrow rule above stops borrowing, so the countdown reaches 0 on
//! the same day the international age goes up.

use crate::lunar::{CalendarConverter, ChineseCalendar, LunarCalendar};
use crate::zodiac::ZodiacAnimal;
use chrono::{Datelike, NaiveDate, NaiveDateTime};
use serde::Serialize;

/// Everything computed for one birth date at one moment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AgeFacts {
    pub international_age: i32,
    pub nominal_age: i32,
    pub days_lived: i64,
    pub zodiac_animal: ZodiacAnimal,
    pub days_to_next_birthday: i64,
    pub lunar_birth_date_label: String,
    pub lunar_current_date_label: String,
}

pub struct AgeEngine<L = ChineseCalendar> {
    converter: CalendarConverter<L>,
}

impl AgeEngine<ChineseCalendar> {
    pub fn new() -> Self {
        Self {
            converter: CalendarConverter::new(),
        }
    }
}

impl Default for AgeEngine<ChineseCalendar> {
    fn default() -> Self {
        Self::new()
    }
}

impl<L: LunarCalendar> AgeEngine<L> {
    pub fn with_converter(converter: CalendarConverter<L>) -> Self {
        Self { converter }
    }

    /// Computes all figures for `birth` as of `now`. Never fails; birth dates
    /// in the future still produce (odd looking) figures.
    pub fn compute_age_facts(&self, birth: NaiveDate, now: NaiveDateTime) -> AgeFacts {
        let today = now.date();

        // One conversion per date
        let (birth_lunar_year, lunar_birth_date_label) =
            self.converter.lunar_year_and_label_of(birth);
        let (current_lunar_year, lunar_current_date_label) =
            self.converter.lunar_year_and_label_of(today);

        AgeFacts {
            international_age: international_age(birth, today),
            nominal_age: 1 + (current_lunar_year - birth_lunar_year),
            days_lived: (today - birth).num_days().abs(),
            zodiac_animal: ZodiacAnimal::from_lunar_year(birth_lunar_year),
            days_to_next_birthday: days_to_next_birthday(birth, today),
            lunar_birth_date_label,
            lunar_current_date_label,
        }
    }
}

/// Computes [`AgeFacts`] with the default Chinese calendar.
pub fn compute_age_facts(birth: NaiveDate, now: NaiveDateTime) -> AgeFacts {
    AgeEngine::new().compute_age_facts(birth, now)
}

/// Completed Gregorian years between `birth` and `today`.
pub fn international_age(birth: NaiveDate, today: NaiveDate) -> i32 {
    let years = today.year() - birth.year();

    // Borrow a year if this year's birthday is still ahead
    if (today.month(), today.day()) < (birth.month(), birth.day()) {
        years - 1
    } else {
        years
    }
}

/// Days until the next birthday, 0 when it is today.
pub fn days_to_next_birthday(birth: NaiveDate, today: NaiveDate) -> i64 {
    let mut next = birthday_in(birth, today.year());
    if next < today {
        next = birthday_in(birth, today.year() + 1);
    }
    (next - today).num_days()
}

/// The day `birth` is celebrated in `year`. Feb 29 moves to Mar 1 when
/// `year` has no leap day.
pub fn birthday_in(birth: NaiveDate, year: i32) -> NaiveDate {
    let (month, day) = if birth.month() == 2 && birth.day() == 29 && !is_leap_year(year) {
        (3, 1)
    } else {
        (birth.month(), birth.day())
    };

    // Only fails at the edges of chrono's representable range
    NaiveDate::from_ymd_opt(year, month, day).unwrap_or(birth)
}

/// Leap-year rule (Gregorian):
///   - divisible by 4 → leap year
///   - except divisible by 100 → not leap year
///   - except divisible by 400 → leap year
fn is_leap_year(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}
