//! Range atom parsing
//!
//! A range string is split on whitespace into atoms. Each atom has the form
//! `[HANDLE] POSITION [QUALIFIER] [ROTATION]`:
//!
//! - `A1-10east` → pages 1 to 10 of document A, rotated 90°
//! - `Bend-1odd` → odd pages of document B, last to first
//! - `r3-r1` → the last three pages of the default document
//!
//! Keywords are case-sensitive: handles are uppercase, everything else is
//! lowercase. `1-5EAST` is rejected rather than corrected.

use std::str::FromStr;

use crate::error::{Error, Result};

/// One end of a page position, before it is resolved against a page count
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Bound {
    /// Literal 1-based page number
    Number(usize),
    /// `end`, the last page
    End,
    /// `rN`, the Nth page counting from the end (`r1` is the last page)
    Reverse(usize),
    /// `rend`, the first page
    ReverseEnd,
}

/// Page position of an atom
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Position {
    /// Every page of the document (a bare handle such as `A`)
    All,
    /// A single page
    Single(Bound),
    /// An inclusive range, ascending or descending
    Range(Bound, Bound),
}

/// Even/odd filter, applied by absolute page number
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Qualifier {
    Even,
    Odd,
}

impl Qualifier {
    const ALL: [Qualifier; 2] = [Qualifier::Even, Qualifier::Odd];

    pub fn keyword(self) -> &'static str {
        match self {
            Qualifier::Even => "even",
            Qualifier::Odd => "odd",
        }
    }

    /// Whether the page number passes this filter
    pub fn matches(self, page: usize) -> bool {
        match self {
            Qualifier::Even => page % 2 == 0,
            Qualifier::Odd => page % 2 == 1,
        }
    }
}

/// Rotation keyword
///
/// `north`/`east`/`south`/`west` are absolute orientations. `left`/`right`/`down`
/// are adjustments to the page's current orientation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rotation {
    North,
    East,
    South,
    West,
    Left,
    Right,
    Down,
}

impl Rotation {
    pub const ALL: [Rotation; 7] = [
        Rotation::North,
        Rotation::East,
        Rotation::South,
        Rotation::West,
        Rotation::Left,
        Rotation::Right,
        Rotation::Down,
    ];

    pub fn keyword(self) -> &'static str {
        match self {
            Rotation::North => "north",
            Rotation::East => "east",
            Rotation::South => "south",
            Rotation::West => "west",
            Rotation::Left => "left",
            Rotation::Right => "right",
            Rotation::Down => "down",
        }
    }

    /// Signed clockwise degrees as written in the keyword table
    pub fn adjustment(self) -> i32 {
        match self {
            Rotation::North => 0,
            Rotation::East => 90,
            Rotation::South => 180,
            Rotation::West => 270,
            Rotation::Left => -90,
            Rotation::Right => 90,
            Rotation::Down => 180,
        }
    }

    /// Whether the keyword adjusts the current orientation instead of replacing it
    pub fn is_relative(self) -> bool {
        matches!(self, Rotation::Left | Rotation::Right | Rotation::Down)
    }

    /// Clockwise degrees in {0, 90, 180, 270}, taking the page's current
    /// orientation to be 0
    pub fn degrees(self) -> u16 {
        normalize_degrees(self.adjustment())
    }

    /// Orientation after applying this keyword to a page already rotated by
    /// `current` degrees
    ///
    /// Range resolution has no access to a page's existing rotation; this is
    /// for the assembler that does.
    pub fn apply_to(self, current: u16) -> u16 {
        if self.is_relative() {
            normalize_degrees(i32::from(current) + self.adjustment())
        } else {
            self.degrees()
        }
    }
}

/// Fold any multiple of 90 into {0, 90, 180, 270}
pub fn normalize_degrees(degrees: i32) -> u16 {
    degrees.rem_euclid(360) as u16
}

/// A parsed but unresolved atom
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Atom {
    pub handle: Option<String>,
    pub position: Position,
    pub qualifier: Option<Qualifier>,
    pub rotation: Option<Rotation>,
}

impl FromStr for Atom {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        parse_atom(s)
    }
}

/// Split a range string into atoms on whitespace, dropping empty atoms
pub fn tokenize(range_str: &str) -> impl Iterator<Item = &str> {
    range_str.split_whitespace()
}

/// Parse a single atom
///
/// The handle is peeled from the front (longest run of uppercase letters),
/// then the rotation and the qualifier are peeled from the back. What is left
/// is the page position.
pub fn parse_atom(text: &str) -> Result<Atom> {
    if text.is_empty() {
        return Err(Error::malformed(text, "empty page range"));
    }

    let handle_len = text.bytes().take_while(u8::is_ascii_uppercase).count();
    let (handle, rest) = text.split_at(handle_len);
    let handle = (!handle.is_empty()).then(|| handle.to_string());

    let (rest, rotation) = strip_keyword(rest, &Rotation::ALL, Rotation::keyword);
    let (rest, qualifier) = strip_keyword(rest, &Qualifier::ALL, Qualifier::keyword);

    let position = if rest.is_empty() {
        if handle.is_none() {
            return Err(Error::malformed(text, "missing page number"));
        }
        Position::All
    } else {
        parse_position(text, rest)?
    };

    Ok(Atom {
        handle,
        position,
        qualifier,
        rotation,
    })
}

fn strip_keyword<'s, K: Copy>(
    text: &'s str,
    table: &[K],
    keyword: impl Fn(K) -> &'static str,
) -> (&'s str, Option<K>) {
    for &entry in table {
        if let Some(rest) = text.strip_suffix(keyword(entry)) {
            return (rest, Some(entry));
        }
    }
    (text, None)
}

fn parse_position(atom: &str, text: &str) -> Result<Position> {
    match text.split_once('-') {
        Some((start, end)) => Ok(Position::Range(
            parse_bound(atom, start)?,
            parse_bound(atom, end)?,
        )),
        None => Ok(Position::Single(parse_bound(atom, text)?)),
    }
}

fn parse_bound(atom: &str, text: &str) -> Result<Bound> {
    match text {
        "" => Err(Error::malformed(atom, "missing page number")),
        "end" => Ok(Bound::End),
        "rend" => Ok(Bound::ReverseEnd),
        _ => match text.strip_prefix('r') {
            Some("") => Err(Error::malformed(atom, "missing page number after 'r'")),
            Some(digits) => parse_number(atom, digits).map(Bound::Reverse),
            None => parse_number(atom, text).map(Bound::Number),
        },
    }
}

fn parse_number(atom: &str, digits: &str) -> Result<usize> {
    if !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(Error::malformed(
            atom,
            format!("invalid page number '{}'", digits),
        ));
    }
    digits
        .parse()
        .map_err(|_| Error::malformed(atom, format!("page number '{}' is too large", digits)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn atom(text: &str) -> Atom {
        parse_atom(text).unwrap()
    }

    #[test]
    fn test_tokenize() {
        let atoms: Vec<&str> = tokenize("  A1-5\tB  end \n").collect();
        assert_eq!(atoms, vec!["A1-5", "B", "end"]);
        assert_eq!(tokenize("   ").count(), 0);
    }

    #[test]
    fn test_parse_single_page() {
        let parsed = atom("5");
        assert_eq!(parsed.handle, None);
        assert_eq!(parsed.position, Position::Single(Bound::Number(5)));
        assert_eq!(parsed.qualifier, None);
        assert_eq!(parsed.rotation, None);
    }

    #[test]
    fn test_parse_keywords() {
        assert_eq!(atom("end").position, Position::Single(Bound::End));
        assert_eq!(atom("rend").position, Position::Single(Bound::ReverseEnd));
        assert_eq!(atom("r3").position, Position::Single(Bound::Reverse(3)));
        assert_eq!(
            atom("r3-r1").position,
            Position::Range(Bound::Reverse(3), Bound::Reverse(1))
        );
        assert_eq!(
            atom("5-end").position,
            Position::Range(Bound::Number(5), Bound::End)
        );
    }

    #[test]
    fn test_parse_full_atom() {
        let parsed = atom("Bend-1evensouth");
        assert_eq!(parsed.handle.as_deref(), Some("B"));
        assert_eq!(parsed.position, Position::Range(Bound::End, Bound::Number(1)));
        assert_eq!(parsed.qualifier, Some(Qualifier::Even));
        assert_eq!(parsed.rotation, Some(Rotation::South));
    }

    #[test]
    fn test_parse_multi_letter_handle() {
        let parsed = atom("AB2-4left");
        assert_eq!(parsed.handle.as_deref(), Some("AB"));
        assert_eq!(parsed.position, Position::Range(Bound::Number(2), Bound::Number(4)));
        assert_eq!(parsed.rotation, Some(Rotation::Left));
    }

    #[test]
    fn test_parse_bare_handle() {
        let parsed = atom("A");
        assert_eq!(parsed.handle.as_deref(), Some("A"));
        assert_eq!(parsed.position, Position::All);

        let parsed = atom("Aoddeast");
        assert_eq!(parsed.position, Position::All);
        assert_eq!(parsed.qualifier, Some(Qualifier::Odd));
        assert_eq!(parsed.rotation, Some(Rotation::East));
    }

    #[test]
    fn test_parse_from_str() {
        let parsed: Atom = "A1-5east".parse().unwrap();
        assert_eq!(parsed.rotation, Some(Rotation::East));
    }

    #[test]
    fn test_parse_malformed() {
        let cases = vec![
            "", "east", "even", "1-", "-5", "r", "rx", "1-5EAST", "a1-5", "1-2-3",
            "1-5eastodd", "five", "+5", "1.5", "99999999999999999999999",
        ];

        for input in cases {
            match parse_atom(input) {
                Err(Error::MalformedAtom { atom, .. }) => assert_eq!(atom, input),
                other => panic!("Expected MalformedAtom for {:?}, got {:?}", input, other),
            }
        }
    }

    #[test]
    fn test_rotation_degrees() {
        let expected = vec![
            (Rotation::North, 0),
            (Rotation::East, 90),
            (Rotation::South, 180),
            (Rotation::West, 270),
            (Rotation::Left, 270),
            (Rotation::Right, 90),
            (Rotation::Down, 180),
        ];

        for (rotation, degrees) in expected {
            assert_eq!(rotation.degrees(), degrees, "{}", rotation.keyword());
        }
    }

    #[test]
    fn test_rotation_apply_to_existing() {
        assert_eq!(Rotation::Left.apply_to(90), 0);
        assert_eq!(Rotation::Right.apply_to(270), 0);
        assert_eq!(Rotation::Down.apply_to(90), 270);
        // Absolute keywords ignore the current orientation
        assert_eq!(Rotation::East.apply_to(180), 90);
        assert_eq!(Rotation::North.apply_to(270), 0);
    }

    #[test]
    fn test_normalize_degrees() {
        assert_eq!(normalize_degrees(-90), 270);
        assert_eq!(normalize_degrees(360), 0);
        assert_eq!(normalize_degrees(450), 90);
        assert_eq!(normalize_degrees(-540), 180);
    }

    #[test]
    fn test_qualifier_matches() {
        assert!(Qualifier::Even.matches(10));
        assert!(!Qualifier::Even.matches(9));
        assert!(Qualifier::Odd.matches(1));
        assert!(!Qualifier::Odd.matches(2));
    }
}
