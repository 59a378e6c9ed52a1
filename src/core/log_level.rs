//! Log level definitions and the bitmask level filter
//!
//! Each [`LogLevel`] is an independent power of two, so a set of enabled
//! severities is simply the bitwise OR of its members ([`LevelMask`]).

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{BitAnd, BitOr, BitOrAssign};
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[repr(u8)]
pub enum LogLevel {
    Trace = 1 << 0,
    Debug = 1 << 1,
    Info = 1 << 2,
    Error = 1 << 3,
    Warn = 1 << 4,
    Critical = 1 << 5,
}

impl LogLevel {
    pub const ALL: [LogLevel; 6] = [
        LogLevel::Trace,
        LogLevel::Debug,
        LogLevel::Info,
        LogLevel::Error,
        LogLevel::Warn,
        LogLevel::Critical,
    ];

    #[inline]
    pub const fn bits(self) -> u8 {
        self as u8
    }

    pub fn to_str(&self) -> &'static str {
        match self {
            LogLevel::Trace => "TRACE",
            LogLevel::Debug => "DEBUG",
            LogLevel::Info => "INFO",
            LogLevel::Error => "ERROR",
            LogLevel::Warn => "WARN",
            LogLevel::Critical => "CRITICAL",
        }
    }

    /// Single-letter tag prepended to every message, e.g. `[W]`
    pub fn tag(&self) -> char {
        match self {
            LogLevel::Trace => 'T',
            LogLevel::Debug => 'D',
            LogLevel::Info => 'I',
            LogLevel::Error => 'E',
            LogLevel::Warn => 'W',
            LogLevel::Critical => 'C',
        }
    }

    #[cfg(feature = "console")]
    pub fn color_code(&self) -> colored::Color {
        use colored::Color::*;
        match self {
            LogLevel::Trace => BrightBlack,
            LogLevel::Debug => Blue,
            LogLevel::Info => Green,
            LogLevel::Warn => Yellow,
            LogLevel::Error => Red,
            LogLevel::Critical => BrightRed,
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_str())
    }
}

impl FromStr for LogLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "TRACE" => Ok(LogLevel::Trace),
            "DEBUG" => Ok(LogLevel::Debug),
            "INFO" => Ok(LogLevel::Info),
            "ERROR" => Ok(LogLevel::Error),
            "WARN" | "WARNING" => Ok(LogLevel::Warn),
            "CRITICAL" | "FATAL" => Ok(LogLevel::Critical),
            _ => Err(format!("Invalid log level: '{}'", s)),
        }
    }
}

/// Returns whether `level` passes the filter `mask`.
#[inline]
pub fn enabled(mask: LevelMask, level: LogLevel) -> bool {
    mask.bits() & level.bits() != 0
}

/// A set of enabled levels, stored as the union of their bits
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "MaskRepr", into = "u8")]
pub struct LevelMask(u8);

impl LevelMask {
    pub const NONE: LevelMask = LevelMask(0);
    pub const ALL: LevelMask = LevelMask(0b0011_1111);

    /// Build a mask from raw bits, rejecting bits that name no level.
    pub const fn from_bits(bits: u8) -> Option<Self> {
        if bits & !Self::ALL.0 == 0 {
            Some(LevelMask(bits))
        } else {
            None
        }
    }

    pub const fn from_bits_truncate(bits: u8) -> Self {
        LevelMask(bits & Self::ALL.0)
    }

    pub fn from_levels<I: IntoIterator<Item = LogLevel>>(levels: I) -> Self {
        levels.into_iter().fold(Self::NONE, |mask, level| mask.with(level))
    }

    #[inline]
    pub const fn bits(self) -> u8 {
        self.0
    }

    #[inline]
    pub fn contains(self, level: LogLevel) -> bool {
        enabled(self, level)
    }

    #[must_use]
    pub const fn with(self, level: LogLevel) -> Self {
        LevelMask(self.0 | level.bits())
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Enabled levels in bit order
    pub fn levels(self) -> impl Iterator<Item = LogLevel> {
        LogLevel::ALL.into_iter().filter(move |level| self.contains(*level))
    }
}

impl Default for LevelMask {
    fn default() -> Self {
        Self::ALL
    }
}

impl fmt::Display for LevelMask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return write!(f, "NONE");
        }
        let mut first = true;
        for level in self.levels() {
            if !first {
                write!(f, "|")?;
            }
            write!(f, "{}", level)?;
            first = false;
        }
        Ok(())
    }
}

impl From<LogLevel> for LevelMask {
    fn from(level: LogLevel) -> Self {
        LevelMask(level.bits())
    }
}

impl From<LevelMask> for u8 {
    fn from(mask: LevelMask) -> Self {
        mask.0
    }
}

impl BitOr for LevelMask {
    type Output = LevelMask;

    fn bitor(self, rhs: LevelMask) -> LevelMask {
        LevelMask(self.0 | rhs.0)
    }
}

impl BitOr<LogLevel> for LevelMask {
    type Output = LevelMask;

    fn bitor(self, rhs: LogLevel) -> LevelMask {
        self.with(rhs)
    }
}

impl BitOr for LogLevel {
    type Output = LevelMask;

    fn bitor(self, rhs: LogLevel) -> LevelMask {
        LevelMask(self.bits() | rhs.bits())
    }
}

impl BitOr<LevelMask> for LogLevel {
    type Output = LevelMask;

    fn bitor(self, rhs: LevelMask) -> LevelMask {
        rhs.with(self)
    }
}

impl BitOrAssign<LogLevel> for LevelMask {
    fn bitor_assign(&mut self, rhs: LogLevel) {
        self.0 |= rhs.bits();
    }
}

impl BitOrAssign for LevelMask {
    fn bitor_assign(&mut self, rhs: LevelMask) {
        self.0 |= rhs.0;
    }
}

impl BitAnd for LevelMask {
    type Output = LevelMask;

    fn bitand(self, rhs: LevelMask) -> LevelMask {
        LevelMask(self.0 & rhs.0)
    }
}

/// Accepted configuration spellings for a mask: `63` or `["error", "critical"]`
#[derive(Deserialize)]
#[serde(untagged)]
enum MaskRepr {
    Bits(u8),
    Names(Vec<String>),
}

impl TryFrom<MaskRepr> for LevelMask {
    type Error = String;

    fn try_from(repr: MaskRepr) -> Result<Self, Self::Error> {
        match repr {
            MaskRepr::Bits(bits) => LevelMask::from_bits(bits)
                .ok_or_else(|| format!("Invalid level mask: {:#04x} has unknown bits", bits)),
            MaskRepr::Names(names) => names
                .iter()
                .map(|name| name.parse::<LogLevel>())
                .collect::<Result<Vec<_>, _>>()
                .map(LevelMask::from_levels),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_levels_are_distinct_powers_of_two() {
        let mut seen = 0u8;
        for level in LogLevel::ALL {
            assert_eq!(level.bits().count_ones(), 1, "{} is not a single bit", level);
            assert_eq!(seen & level.bits(), 0);
            seen |= level.bits();
        }
        assert_eq!(seen, LevelMask::ALL.bits());
    }

    #[test]
    fn test_mask_composition() {
        let mask = LogLevel::Error | LogLevel::Critical;
        assert!(mask.contains(LogLevel::Error));
        assert!(mask.contains(LogLevel::Critical));
        assert!(!mask.contains(LogLevel::Debug));
        assert!(!mask.contains(LogLevel::Warn));
        assert_eq!(mask.bits(), 8 | 32);
    }

    #[test]
    fn test_empty_mask_enables_nothing() {
        for level in LogLevel::ALL {
            assert!(!enabled(LevelMask::NONE, level));
            assert!(enabled(LevelMask::ALL, level));
        }
    }

    #[test]
    fn test_from_bits_rejects_unknown() {
        assert_eq!(LevelMask::from_bits(63), Some(LevelMask::ALL));
        assert_eq!(LevelMask::from_bits(64), None);
        assert_eq!(LevelMask::from_bits_truncate(0xFF), LevelMask::ALL);
    }

    #[test]
    fn test_parse_aliases() {
        assert_eq!("warning".parse::<LogLevel>(), Ok(LogLevel::Warn));
        assert_eq!("Fatal".parse::<LogLevel>(), Ok(LogLevel::Critical));
        assert!("verbose".parse::<LogLevel>().is_err());
    }

    #[test]
    fn test_tags() {
        let tags: String = LogLevel::ALL.iter().map(LogLevel::tag).collect();
        assert_eq!(tags, "TDIEWC");
    }

    #[test]
    fn test_mask_display() {
        assert_eq!((LogLevel::Info | LogLevel::Warn).to_string(), "INFO|WARN");
        assert_eq!(LevelMask::NONE.to_string(), "NONE");
    }
}
