use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// Carriage section. The train has exactly two.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Section {
    A,
    B,
}

impl Section {
    /// Allocation order: section A fills up before section B.
    pub const ALL: [Section; 2] = [Section::A, Section::B];

    pub fn parse(s: &str) -> Option<Section> {
        match s {
            "A" => Some(Section::A),
            "B" => Some(Section::B),
            _ => None,
        }
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Section::A => f.write_str("A"),
            Section::B => f.write_str("B"),
        }
    }
}

/// A single seat, displayed and serialized as its compact identifier
/// (`A1`, `B3`). Ordered by `(section, number)` so ordered collections
/// enumerate A1, A2, ... before B1, B2, ...
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Seat {
    pub section: Section,
    pub number: u32,
}

impl Seat {
    pub fn new(section: Section, number: u32) -> Self {
        Seat { section, number }
    }
}

impl fmt::Display for Seat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.section, self.number)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseSeatError;

impl fmt::Display for ParseSeatError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("seat identifiers look like A1 or B3")
    }
}

impl std::error::Error for ParseSeatError {}

impl FromStr for Seat {
    type Err = ParseSeatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.chars();
        let section = match chars.next() {
            Some('A') => Section::A,
            Some('B') => Section::B,
            _ => return Err(ParseSeatError),
        };
        let digits = chars.as_str();
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(ParseSeatError);
        }
        let number: u32 = digits.parse().map_err(|_| ParseSeatError)?;
        if number == 0 {
            return Err(ParseSeatError);
        }
        Ok(Seat { section, number })
    }
}

impl TryFrom<String> for Seat {
    type Error = ParseSeatError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<Seat> for String {
    fn from(seat: Seat) -> String {
        seat.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_canonical_identifiers() {
        assert_eq!("A1".parse(), Ok(Seat::new(Section::A, 1)));
        assert_eq!("B12".parse(), Ok(Seat::new(Section::B, 12)));
    }

    #[test]
    fn rejects_malformed_identifiers() {
        for bad in ["", "A", "C1", "a1", "A-1", "A0", "1A", "B1b"] {
            assert_eq!(bad.parse::<Seat>(), Err(ParseSeatError), "{bad:?}");
        }
    }

    #[test]
    fn display_roundtrips() {
        let seat = Seat::new(Section::B, 4);
        assert_eq!(seat.to_string(), "B4");
        assert_eq!(seat.to_string().parse(), Ok(seat));
    }
}
