//! Zodiac signs and the fixed calendar table that assigns them.

use std::str::FromStr;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

/// One of the twelve signs, or `Unknown` when no range matched.
///
/// Variants are declared alphabetically: the derived `Ord` is the default
/// ranking order used when the model gives no usable answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ZodiacSign {
    Aquarius,
    Aries,
    Cancer,
    Capricorn,
    Gemini,
    Leo,
    Libra,
    Pisces,
    Sagittarius,
    Scorpio,
    Taurus,
    Virgo,
    Unknown,
}

impl ZodiacSign {
    pub const ALL: [ZodiacSign; 12] = [
        ZodiacSign::Aquarius,
        ZodiacSign::Aries,
        ZodiacSign::Cancer,
        ZodiacSign::Capricorn,
        ZodiacSign::Gemini,
        ZodiacSign::Leo,
        ZodiacSign::Libra,
        ZodiacSign::Pisces,
        ZodiacSign::Sagittarius,
        ZodiacSign::Scorpio,
        ZodiacSign::Taurus,
        ZodiacSign::Virgo,
    ];

    pub fn label(self) -> &'static str {
        match self {
            ZodiacSign::Aquarius => "Aquarius",
            ZodiacSign::Aries => "Aries",
            ZodiacSign::Cancer => "Cancer",
            ZodiacSign::Capricorn => "Capricorn",
            ZodiacSign::Gemini => "Gemini",
            ZodiacSign::Leo => "Leo",
            ZodiacSign::Libra => "Libra",
            ZodiacSign::Pisces => "Pisces",
            ZodiacSign::Sagittarius => "Sagittarius",
            ZodiacSign::Scorpio => "Scorpio",
            ZodiacSign::Taurus => "Taurus",
            ZodiacSign::Virgo => "Virgo",
            ZodiacSign::Unknown => "Unknown",
        }
    }

    pub fn is_known(self) -> bool {
        self != ZodiacSign::Unknown
    }
}

impl std::fmt::Display for ZodiacSign {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for ZodiacSign {
    type Err = String;

    /// Case-insensitive label match (model replies are not always capitalised).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        ZodiacSign::ALL
            .into_iter()
            .chain(std::iter::once(ZodiacSign::Unknown))
            .find(|sign| sign.label().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| format!("Unrecognised zodiac sign '{trimmed}'."))
    }
}

/// Inclusive `(month, day)` range mapped to a sign.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ZodiacRange {
    pub start: (u32, u32),
    pub end: (u32, u32),
    pub sign: ZodiacSign,
}

impl ZodiacRange {
    const fn new(start: (u32, u32), end: (u32, u32), sign: ZodiacSign) -> Self {
        Self { start, end, sign }
    }

    /// Whether the range crosses the year boundary (Capricorn).
    pub fn wraps(&self) -> bool {
        self.start.0 > self.end.0
    }

    fn contains(&self, month_day: (u32, u32)) -> bool {
        if self.wraps() {
            month_day >= self.start || month_day <= self.end
        } else {
            self.start <= month_day && month_day <= self.end
        }
    }
}

/// The twelve ranges, checked in this order.
pub const ZODIAC_RANGES: [ZodiacRange; 12] = [
    ZodiacRange::new((1, 20), (2, 18), ZodiacSign::Aquarius),
    ZodiacRange::new((2, 19), (3, 20), ZodiacSign::Pisces),
    ZodiacRange::new((3, 21), (4, 19), ZodiacSign::Aries),
    ZodiacRange::new((4, 20), (5, 20), ZodiacSign::Taurus),
    ZodiacRange::new((5, 21), (6, 20), ZodiacSign::Gemini),
    ZodiacRange::new((6, 21), (7, 22), ZodiacSign::Cancer),
    ZodiacRange::new((7, 23), (8, 22), ZodiacSign::Leo),
    ZodiacRange::new((8, 23), (9, 22), ZodiacSign::Virgo),
    ZodiacRange::new((9, 23), (10, 22), ZodiacSign::Libra),
    ZodiacRange::new((10, 23), (11, 21), ZodiacSign::Scorpio),
    ZodiacRange::new((11, 22), (12, 21), ZodiacSign::Sagittarius),
    ZodiacRange::new((12, 22), (1, 19), ZodiacSign::Capricorn),
];

/// Resolve the sign for a date of birth.
///
/// Comparison is on `(month, day)` within the date's own year, so Feb 29 needs
/// no special casing. Returns `Unknown` only if the table has a gap.
pub fn resolve(date: NaiveDate) -> ZodiacSign {
    let month_day = (date.month(), date.day());
    ZODIAC_RANGES
        .iter()
        .find(|range| range.contains(month_day))
        .map(|range| range.sign)
        .unwrap_or(ZodiacSign::Unknown)
}
