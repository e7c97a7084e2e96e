use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;

use crate::types::Meld;

fn suit_offset(c: char) -> Option<u8> {
    match c {
        'm' => Some(0),
        'p' => Some(9),
        's' => Some(18),
        'z' => Some(27),
        _ => None,
    }
}

fn resolve(digit: u8, offset: u8) -> Result<(u8, bool), String> {
    if offset == 27 {
        // honors are 1-7z, no red tiles
        if !(1..=7).contains(&digit) {
            return Err(format!("invalid honor tile {digit}z"));
        }
        return Ok((offset + digit - 1, false));
    }
    if digit == 0 {
        // 0m/0p/0s is the red five
        return Ok((offset + 4, true));
    }
    if digit > 9 {
        return Err(format!("invalid tile number {digit}"));
    }
    Ok((offset + digit - 1, false))
}

/// Parses hand notation like `123m456p11z(777s)(a5555m)`: digit runs are
/// closed by a suit letter, parenthesised groups are declared melds with a
/// leading `a` marking a concealed kan, and `0` of a number suit is the red
/// five. Returns closed tiles, the red-five count and the melds.
pub fn parse_hand_internal(text: &str) -> Result<(Vec<u8>, u8, Vec<Meld>), String> {
    let mut closed: Vec<u8> = Vec::new();
    let mut aka = 0u8;
    let mut melds: Vec<Meld> = Vec::new();

    let mut pending: Vec<u8> = Vec::new();
    let mut in_meld = false;
    let mut meld_open = true;
    let mut meld_tiles: Vec<u8> = Vec::new();

    for c in text.chars() {
        match c {
            '(' => {
                if in_meld || !pending.is_empty() {
                    return Err(format!("unexpected '(' in {text:?}"));
                }
                in_meld = true;
                meld_open = true;
            }
            'a' if in_meld && pending.is_empty() && meld_tiles.is_empty() => {
                meld_open = false;
            }
            ')' => {
                if !in_meld || !pending.is_empty() || meld_tiles.is_empty() {
                    return Err(format!("unexpected ')' in {text:?}"));
                }
                meld_tiles.sort_unstable();
                melds.push(Meld::new(std::mem::take(&mut meld_tiles), meld_open));
                in_meld = false;
            }
            '0'..='9' => pending.push(c as u8 - b'0'),
            _ => {
                let offset = suit_offset(c).ok_or_else(|| format!("unknown symbol {c:?}"))?;
                if pending.is_empty() {
                    return Err(format!("suit {c:?} without tile numbers"));
                }
                for digit in pending.drain(..) {
                    let (tile, red) = resolve(digit, offset)?;
                    if red {
                        aka += 1;
                    }
                    if in_meld {
                        meld_tiles.push(tile);
                    } else {
                        closed.push(tile);
                    }
                }
            }
        }
    }
    if in_meld {
        return Err(format!("unterminated meld in {text:?}"));
    }
    if !pending.is_empty() {
        return Err(format!("trailing tile numbers in {text:?}"));
    }
    Ok((closed, aka, melds))
}

/// Parses hand notation, returning `(closed_tiles, aka_count, melds)`.
#[pyfunction]
pub fn parse_hand(text: &str) -> PyResult<(Vec<u8>, u8, Vec<Meld>)> {
    parse_hand_internal(text).map_err(PyValueError::new_err)
}

/// Parses a single tile like `5m` or `3z` to its id. `0m`/`0p`/`0s` map to
/// the plain five.
#[pyfunction]
pub fn parse_tile(text: &str) -> PyResult<u8> {
    let (tiles, _, melds) = parse_hand_internal(text).map_err(PyValueError::new_err)?;
    if tiles.len() != 1 || !melds.is_empty() {
        return Err(PyValueError::new_err(format!("not a single tile: {text:?}")));
    }
    Ok(tiles[0])
}
