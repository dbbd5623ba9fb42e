//! lunar.rs
//!
//! Gregorian → traditional Chinese calendar conversion.
//!
//! The astronomy (new moons, solar terms, leap months) is not done here; it
//! comes from `icu_calendar`'s Chinese calendar and its compiled year data.
//! This module only reads the year/month/day back out and renders them in
//! the usual zh-CN style, e.g. `2024甲辰年五月初十星期六`.
//!
//! The traditional new year falls between Jan 21 and Feb 20, so a date in
//! January or early February belongs to the *previous* lunar year.
//!
//! If a date cannot be converted the converter degrades to the Gregorian
//! year and a Gregorian label instead of failing; an age must always come
//! out, even when the calendar data can't help.

use crate::zodiac::{cyclic_year_of, stem_branch};
use chrono::{Datelike, NaiveDate, Weekday};
use icu_calendar::chinese::Chinese;
use icu_calendar::{Date, Ref};
use std::fmt;
use std::ops::RangeInclusive;

const MONTH_NAMES: [&str; 12] = [
    "正", "二", "三", "四", "五", "六", "七", "八", "九", "十", "十一", "十二",
];
/// Gregorian years handed to the astronomical calculation. Far outside this
/// window the new-moon arithmetic drifts and yields impossible month lengths.
pub const SUPPORTED_YEARS: RangeInclusive<i32> = 1..=9999;

const DIGITS: [&str; 10] = ["", "一", "二", "三", "四", "五", "六", "七", "八", "九"];

/// A date in the traditional calendar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LunarDate {
    /// Gregorian year in which this lunar year began.
    pub related_year: i32,
    /// Position in the sixty-year cycle, 1 = 甲子.
    pub cyclic_year: u8,
    /// Lunar month number, 1..=12. A leap month repeats the number of the
    /// month before it.
    pub month: u8,
    pub leap_month: bool,
    pub day: u8,
    pub weekday: Weekday,
}

impl fmt::Display for LunarDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{}年{}{}月{}{}",
            self.related_year,
            stem_branch(self.cyclic_year),
            if self.leap_month { "闰" } else { "" },
            month_name(self.month),
            day_name(self.day),
            weekday_name(self.weekday)
        )
    }
}

/// Source of Gregorian → lunar conversions. `None` means the date could not
/// be converted.
pub trait LunarCalendar {
    fn to_lunar(&self, date: NaiveDate) -> Option<LunarDate>;
}

/// Chinese calendar backed by ICU4X compiled data.
pub struct ChineseCalendar {
    calendar: Chinese,
}

impl ChineseCalendar {
    pub fn new() -> Self {
        Self {
            calendar: Chinese::new(),
        }
    }
}

impl Default for ChineseCalendar {
    fn default() -> Self {
        Self::new()
    }
}

impl LunarCalendar for ChineseCalendar {
    fn to_lunar(&self, date: NaiveDate) -> Option<LunarDate> {
        if !SUPPORTED_YEARS.contains(&date.year()) {
            return None;
        }

        let iso = Date::try_new_iso_date(
            date.year(),
            u8::try_from(date.month()).ok()?,
            u8::try_from(date.day()).ok()?,
        )
        .ok()?;
        let lunar = iso.to_calendar(Ref(&self.calendar));

        let year = lunar.year();
        let related_year = year.related_iso?;
        let cyclic_year = year
            .cyclic
            .map(|c| c.get())
            .unwrap_or_else(|| cyclic_year_of(related_year));

        // Month codes look like "M05", or "M05L" for the leap fifth month.
        let month_info = lunar.month();
        let code: &str = &month_info.code.0;
        let month = code.get(1..3)?.parse::<u8>().ok()?;
        let day = u8::try_from(lunar.day_of_month().0).ok()?;
        if !(1..=12).contains(&month) || !(1..=30).contains(&day) {
            return None;
        }

        Some(LunarDate {
            related_year,
            cyclic_year,
            month,
            leap_month: code.ends_with('L'),
            day,
            weekday: date.weekday(),
        })
    }
}

/// Lunar year number and display label for Gregorian dates, with a
/// Gregorian fallback when the underlying calendar can't convert.
pub struct CalendarConverter<L = ChineseCalendar> {
    calendar: L,
}

impl CalendarConverter<ChineseCalendar> {
    pub fn new() -> Self {
        Self {
            calendar: ChineseCalendar::new(),
        }
    }
}

impl Default for CalendarConverter<ChineseCalendar> {
    fn default() -> Self {
        Self::new()
    }
}

impl<L: LunarCalendar> CalendarConverter<L> {
    pub fn with_calendar(calendar: L) -> Self {
        Self { calendar }
    }

    /// Lunar date, logging when the calendar can't produce one.
    pub fn lunar_date_of(&self, date: NaiveDate) -> Option<LunarDate> {
        let lunar = self.calendar.to_lunar(date);
        if lunar.is_none() {
            log::warn!("lunar conversion unavailable for {date}, using Gregorian calendar");
        }
        lunar
    }

    /// Number of the lunar year containing `date`.
    pub fn lunar_year_of(&self, date: NaiveDate) -> i32 {
        self.lunar_year_and_label_of(date).0
    }

    /// Full display label of `date` in the lunar calendar.
    pub fn lunar_label_of(&self, date: NaiveDate) -> String {
        self.lunar_year_and_label_of(date).1
    }

    /// Year and label from a single conversion.
    pub fn lunar_year_and_label_of(&self, date: NaiveDate) -> (i32, String) {
        match self.lunar_date_of(date) {
            Some(lunar) => (lunar.related_year, lunar.to_string()),
            None => (date.year(), gregorian_label(date)),
        }
    }
}

/// zh-CN full Gregorian date, e.g. `2024年6月15日星期六`.
pub fn gregorian_label(date: NaiveDate) -> String {
    format!(
        "{}年{}月{}日{}",
        date.year(),
        date.month(),
        date.day(),
        weekday_name(date.weekday())
    )
}

fn month_name(month: u8) -> &'static str {
    MONTH_NAMES
        .get(usize::from(month.max(1)) - 1)
        .copied()
        .unwrap_or("?")
}

/// 初一 … 初十, 十一 … 十九, 二十, 廿一 … 廿九, 三十
fn day_name(day: u8) -> String {
    match day {
        1..=10 => format!("初{}", if day == 10 { "十" } else { DIGITS[day as usize] }),
        11..=19 => format!("十{}", DIGITS[(day - 10) as usize]),
        20 => "二十".to_string(),
        21..=29 => format!("廿{}", DIGITS[(day - 20) as usize]),
        30 => "三十".to_string(),
        _ => day.to_string(),
    }
}

fn weekday_name(weekday: Weekday) -> &'static str {
    match weekday {
        Weekday::Mon => "星期一",
        Weekday::Tue => "星期二",
        Weekday::Wed => "星期三",
        Weekday::Thu => "星期四",
        Weekday::Fri => "星期五",
        Weekday::Sat => "星期六",
        Weekday::Sun => "星期日",
    }
}
