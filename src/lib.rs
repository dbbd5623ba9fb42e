//! Age figures for a Chinese audience: 周岁, 虚岁, 生肖, days lived, the
//! next-birthday countdown and lunar calendar renderings, plus an optional
//! narrative from a text-generation service.

pub mod age;
pub mod config;
pub mod insight;
pub mod lunar;
pub mod report;
pub mod zodiac;

pub use age::{AgeEngine, AgeFacts, compute_age_facts};
pub use insight::{Insight, InsightClient, InsightRequest};
pub use lunar::{CalendarConverter, ChineseCalendar, LunarCalendar, LunarDate};
pub use zodiac::ZodiacAnimal;
