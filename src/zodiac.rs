//! zodiac.rs
//!
//! The twelve-animal cycle (生肖) and the sexagenary year names (干支).
//!
//! The animal for a lunar year is `(year - 4) mod 12`: year 4 of the related
//! Gregorian numbering is a rat year, and every year twelve apart shares its
//! animal. The modulo is Euclidean so lunar years below 4 (and negative ones)
//! still land in the cycle.

use serde::{Serialize, Serializer};
use std::fmt;

const HEAVENLY_STEMS: [&str; 10] = ["甲", "乙", "丙", "丁", "戊", "己", "庚", "辛", "壬", "癸"];
const EARTHLY_BRANCHES: [&str; 12] = [
    "子", "丑", "寅", "卯", "辰", "巳", "午", "未", "申", "酉", "戌", "亥",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ZodiacAnimal {
    Rat,
    Ox,
    Tiger,
    Rabbit,
    Dragon,
    Snake,
    Horse,
    Goat,
    Monkey,
    Rooster,
    Dog,
    Pig,
}

impl ZodiacAnimal {
    /// All animals in cycle order, rat first.
    pub const CYCLE: [ZodiacAnimal; 12] = [
        ZodiacAnimal::Rat,
        ZodiacAnimal::Ox,
        ZodiacAnimal::Tiger,
        ZodiacAnimal::Rabbit,
        ZodiacAnimal::Dragon,
        ZodiacAnimal::Snake,
        ZodiacAnimal::Horse,
        ZodiacAnimal::Goat,
        ZodiacAnimal::Monkey,
        ZodiacAnimal::Rooster,
        ZodiacAnimal::Dog,
        ZodiacAnimal::Pig,
    ];

    /// Animal of the given lunar year number.
    pub fn from_lunar_year(lunar_year: i32) -> Self {
        let index = (lunar_year as i64 - 4).rem_euclid(12) as usize;
        Self::CYCLE[index]
    }

    /// Single-character Chinese label, as shown to users.
    pub fn label(self) -> &'static str {
        match self {
            ZodiacAnimal::Rat => "鼠",
            ZodiacAnimal::Ox => "牛",
            ZodiacAnimal::Tiger => "虎",
            ZodiacAnimal::Rabbit => "兔",
            ZodiacAnimal::Dragon => "龙",
            ZodiacAnimal::Snake => "蛇",
            ZodiacAnimal::Horse => "马",
            ZodiacAnimal::Goat => "羊",
            ZodiacAnimal::Monkey => "猴",
            ZodiacAnimal::Rooster => "鸡",
            ZodiacAnimal::Dog => "狗",
            ZodiacAnimal::Pig => "猪",
        }
    }

    pub fn english_name(self) -> &'static str {
        match self {
            ZodiacAnimal::Rat => "Rat",
            ZodiacAnimal::Ox => "Ox",
            ZodiacAnimal::Tiger => "Tiger",
            ZodiacAnimal::Rabbit => "Rabbit",
            ZodiacAnimal::Dragon => "Dragon",
            ZodiacAnimal::Snake => "Snake",
            ZodiacAnimal::Horse => "Horse",
            ZodiacAnimal::Goat => "Goat",
            ZodiacAnimal::Monkey => "Monkey",
            ZodiacAnimal::Rooster => "Rooster",
            ZodiacAnimal::Dog => "Dog",
            ZodiacAnimal::Pig => "Pig",
        }
    }
}

impl fmt::Display for ZodiacAnimal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl Serialize for ZodiacAnimal {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.label())
    }
}

/// Sexagenary name of a cyclic year, 1 = 甲子 through 60 = 癸亥.
/// Values outside 1..=60 wrap around the cycle.
pub fn stem_branch(cyclic_year: u8) -> String {
    let offset = (cyclic_year as usize + 59) % 60;
    format!(
        "{}{}",
        HEAVENLY_STEMS[offset % 10],
        EARTHLY_BRANCHES[offset % 12]
    )
}

/// Cyclic year (1..=60) of a related Gregorian year number.
pub fn cyclic_year_of(related_year: i32) -> u8 {
    ((related_year as i64 - 4).rem_euclid(60) + 1) as u8
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(1994, ZodiacAnimal::Dog)]
    #[case(1995, ZodiacAnimal::Pig)]
    #[case(1996, ZodiacAnimal::Rat)]
    #[case(2020, ZodiacAnimal::Rat)]
    #[case(2024, ZodiacAnimal::Dragon)]
    #[case(4, ZodiacAnimal::Rat)]
    #[case(3, ZodiacAnimal::Pig)]
    #[case(1, ZodiacAnimal::Rooster)]
    #[case(0, ZodiacAnimal::Monkey)]
    #[case(-1, ZodiacAnimal::Goat)]
    #[case(-8, ZodiacAnimal::Rat)]
    fn animal_for_year(#[case] year: i32, #[case] expected: ZodiacAnimal) {
        assert_eq!(ZodiacAnimal::from_lunar_year(year), expected);
    }

    #[test]
    fn animal_repeats_every_twelve_years() {
        for year in -60..=2100 {
            let animal = ZodiacAnimal::from_lunar_year(year);
            for k in [-3, -1, 1, 2, 10] {
                assert_eq!(ZodiacAnimal::from_lunar_year(year + 12 * k), animal);
            }
        }
    }

    #[test]
    fn labels_are_distinct() {
        let mut labels: Vec<_> = ZodiacAnimal::CYCLE.iter().map(|a| a.label()).collect();
        labels.sort();
        labels.dedup();
        assert_eq!(labels.len(), 12);
    }

    #[test]
    fn english_names_follow_the_cycle() {
        let names: Vec<_> = ZodiacAnimal::CYCLE.iter().map(|a| a.english_name()).collect();
        assert_eq!(names.first(), Some(&"Rat"));
        assert_eq!(names.last(), Some(&"Pig"));
        assert_eq!(ZodiacAnimal::from_lunar_year(1994).english_name(), "Dog");
    }

    #[test]
    fn serializes_as_chinese_label() {
        let json = serde_json::to_string(&ZodiacAnimal::Dragon).unwrap();
        assert_eq!(json, "\"龙\"");
    }

    #[rstest]
    #[case(1, "甲子")]
    #[case(41, "甲辰")]
    #[case(60, "癸亥")]
    fn sexagenary_names(#[case] cyclic: u8, #[case] expected: &str) {
        assert_eq!(stem_branch(cyclic), expected);
    }

    #[test]
    fn cyclic_year_matches_known_years() {
        assert_eq!(cyclic_year_of(1984), 1);
        assert_eq!(cyclic_year_of(2024), 41);
        assert_eq!(stem_branch(cyclic_year_of(1994)), "甲戌");
    }
}
