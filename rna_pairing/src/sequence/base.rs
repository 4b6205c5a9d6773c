use serde::Serialize;
use std::fmt;

/// One symbol of the four-letter alphabet
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum Base {
    A,
    C,
    G,
    U,
}

impl Base {
    pub const ALL: [Base; 4] = [Base::A, Base::C, Base::G, Base::U];

    /// A <-> U, C <-> G. Involutive and fixed-point-free.
    pub const fn complement(self) -> Base {
        match self {
            Base::A => Base::U,
            Base::U => Base::A,
            Base::C => Base::G,
            Base::G => Base::C,
        }
    }

    pub const fn pairs_with(self, other: Base) -> bool {
        // derived PartialEq is not const
        self.complement() as u8 == other as u8
    }

    pub const fn as_char(self) -> char {
        match self {
            Base::A => 'A',
            Base::C => 'C',
            Base::G => 'G',
            Base::U => 'U',
        }
    }

    /// Upper-case symbol only
    pub const fn from_char(c: char) -> Option<Base> {
        match c {
            'A' => Some(Base::A),
            'C' => Some(Base::C),
            'G' => Some(Base::G),
            'U' => Some(Base::U),
            _ => None,
        }
    }
}

impl TryFrom<char> for Base {
    type Error = char;

    fn try_from(c: char) -> Result<Self, Self::Error> {
        Base::from_char(c).ok_or(c)
    }
}

impl fmt::Display for Base {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}
