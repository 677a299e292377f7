use std::collections::HashMap;
use std::fmt;

use once_cell::sync::Lazy;
use serde::Serialize;

/// One of the five mouth shapes the controller can draw.
///
/// Each shape travels over the link as a single ASCII letter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Viseme {
    #[serde(rename = "A")]
    OpenA,
    #[serde(rename = "E")]
    OpenE,
    #[serde(rename = "O")]
    RoundO,
    #[serde(rename = "U")]
    NarrowU,
    #[serde(rename = "M")]
    ClosedM,
}

impl Viseme {
    /// The closed mouth. Default for unknown characters and the final state of every session.
    pub const REST: Viseme = Viseme::ClosedM;

    pub const ALL: [Viseme; 5] = [
        Viseme::OpenA,
        Viseme::OpenE,
        Viseme::RoundO,
        Viseme::NarrowU,
        Viseme::ClosedM,
    ];

    /// Byte written to the controller for this shape.
    pub fn as_byte(self) -> u8 {
        match self {
            Viseme::OpenA => b'A',
            Viseme::OpenE => b'E',
            Viseme::RoundO => b'O',
            Viseme::NarrowU => b'U',
            Viseme::ClosedM => b'M',
        }
    }

    pub fn from_byte(byte: u8) -> Option<Viseme> {
        Viseme::ALL.into_iter().find(|v| v.as_byte() == byte)
    }

    pub fn is_rest(self) -> bool {
        self == Viseme::REST
    }
}

impl fmt::Display for Viseme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_byte() as char)
    }
}

// Rough shapes for animation, not phonetics. Both letter cases are listed on purpose.
static VISEME_TABLE: Lazy<HashMap<char, Viseme>> = Lazy::new(|| {
    let groups: [(&str, Viseme); 10] = [
        // vowels
        ("aA", Viseme::OpenA),
        ("eEiI", Viseme::OpenE),
        ("oO", Viseme::RoundO),
        ("uU", Viseme::NarrowU),
        // open or smiling consonants
        ("hH", Viseme::OpenA),
        ("cCdDgGjJkKlLnNrRsStTyYzZ", Viseme::OpenE),
        // rounded lips
        ("qQwW", Viseme::RoundO),
        // narrowed lips
        ("fFvV", Viseme::NarrowU),
        // closed lips
        ("bBmMpP", Viseme::ClosedM),
        // pause between words
        (" ", Viseme::ClosedM),
    ];

    let mut table = HashMap::new();
    for (chars, viseme) in groups {
        for c in chars.chars() {
            table.insert(c, viseme);
        }
    }
    table
});

/// Map a single character to its mouth shape. Anything not in the table is the rest shape.
pub fn map_char(c: char) -> Viseme {
    VISEME_TABLE.get(&c).copied().unwrap_or(Viseme::REST)
}

/// Per-character mapping of `text`, without removing repeats.
pub fn map_text(text: &str) -> Vec<Viseme> {
    text.chars().map(map_char).collect()
}
