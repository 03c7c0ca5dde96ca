//! Verse addressing for song lyrics
//!
//! Lyrics are stored as one string; verses are the segments between blank
//! lines (`"\n\n"`) and are numbered from 1.

use crate::{Error, Result};

/// Separator between verses
pub const VERSE_SEPARATOR: &str = "\n\n";

/// Split lyrics into verses
pub fn split_verses(text: &str) -> Vec<&str> {
    text.split(VERSE_SEPARATOR).collect()
}

/// Select a 1-indexed verse from raw `verse` input
///
/// Non-numeric input, `0`, and numbers past the last verse are rejected
/// with [`Error::InvalidInput`].
pub fn select_verse<'a>(text: &'a str, verse: &str) -> Result<&'a str> {
    let verses = split_verses(text);

    let number = verse
        .trim()
        .parse::<usize>()
        .ok()
        .filter(|n| (1..=verses.len()).contains(n))
        .ok_or_else(|| Error::InvalidInput(format!("Invalid verse number: {}", verse)))?;

    Ok(verses[number - 1])
}
