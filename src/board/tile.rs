//! Tile variants and their printable codes

use rand::Rng;
use serde::{Deserialize, Serialize};

/// The six tile colors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Color {
    Red,
    Green,
    Blue,
    Orange,
    Yellow,
    Purple,
}

impl Color {
    pub const ALL: [Color; 6] = [
        Color::Red,
        Color::Green,
        Color::Blue,
        Color::Orange,
        Color::Yellow,
        Color::Purple,
    ];

    pub fn to_char(self) -> char {
        match self {
            Color::Red => 'R',
            Color::Green => 'G',
            Color::Blue => 'B',
            Color::Orange => 'O',
            Color::Yellow => 'Y',
            Color::Purple => 'P',
        }
    }

    pub fn from_char(c: char) -> Option<Color> {
        match c {
            'R' => Some(Color::Red),
            'G' => Some(Color::Green),
            'B' => Some(Color::Blue),
            'O' => Some(Color::Orange),
            'Y' => Some(Color::Yellow),
            'P' => Some(Color::Purple),
            _ => None,
        }
    }

    /// Draw a uniformly random color.
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Color {
        Color::ALL[rng.random_range(0..Color::ALL.len())]
    }
}

/// Orientation of a striped tile: vertical stripes clear the column they sit
/// in when crushed, horizontal stripes clear the row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Orientation {
    Vertical,
    Horizontal,
}

impl Orientation {
    pub fn to_char(self) -> char {
        match self {
            Orientation::Vertical => 'V',
            Orientation::Horizontal => 'H',
        }
    }

    pub fn from_char(c: char) -> Option<Orientation> {
        match c {
            'V' => Some(Orientation::Vertical),
            'H' => Some(Orientation::Horizontal),
            _ => None,
        }
    }

    /// Draw a uniformly random orientation.
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Orientation {
        if rng.random_bool(0.5) {
            Orientation::Vertical
        } else {
            Orientation::Horizontal
        }
    }
}

/// A tile occupying a board cell.
///
/// Wrapped tiles carry no color-match identity of their own; their `exploding`
/// flag marks them for removal on the next scan pass after a wrapped+wrapped
/// swap cleared the rest of the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Tile {
    Plain { color: Color },
    Striped { color: Color, orientation: Orientation },
    Wrapped { exploding: bool },
}

impl Tile {
    /// A fresh random plain tile, as produced by the gravity refill.
    pub fn random_plain<R: Rng + ?Sized>(rng: &mut R) -> Tile {
        Tile::Plain {
            color: Color::random(rng),
        }
    }

    /// Color used for run matching. Wrapped tiles never match by color.
    pub fn color(self) -> Option<Color> {
        match self {
            Tile::Plain { color } | Tile::Striped { color, .. } => Some(color),
            Tile::Wrapped { .. } => None,
        }
    }

    pub fn is_wrapped(self) -> bool {
        matches!(self, Tile::Wrapped { .. })
    }

    pub fn is_striped(self) -> bool {
        matches!(self, Tile::Striped { .. })
    }

    /// Printable code used by the board fingerprint and debug dump.
    ///
    /// The exploding flag of a wrapped tile is deliberately not encoded: the
    /// fingerprint is a lossy structural encoding and two boards differing
    /// only in exploding markers collide.
    pub fn code(self) -> String {
        match self {
            Tile::Plain { color } => color.to_char().to_string(),
            Tile::Striped { color, orientation } => {
                format!("{}{}", color.to_char(), orientation.to_char())
            }
            Tile::Wrapped { .. } => "C".to_string(),
        }
    }

    /// Parse a tile code as produced by [`Tile::code`].
    pub fn from_code(code: &str) -> Option<Tile> {
        let mut chars = code.chars();
        let first = chars.next()?;
        let second = chars.next();
        if chars.next().is_some() {
            return None;
        }
        match (first, second) {
            ('C', None) => Some(Tile::Wrapped { exploding: false }),
            (c, None) => Color::from_char(c).map(|color| Tile::Plain { color }),
            (c, Some(o)) => {
                let color = Color::from_char(c)?;
                let orientation = Orientation::from_char(o)?;
                Some(Tile::Striped { color, orientation })
            }
        }
    }
}
