use pyo3::prelude::*;
use serde::{Deserialize, Serialize};

pub const TILE_MAX: usize = 34;

/// Honor tile ids: winds are 27..=30 (E/S/W/N), dragons 31..=33 (white/green/red).
pub const EAST: u8 = 27;
pub const HAKU: u8 = 31;

/// Terminal (1/9 of a suit) or honor tile.
pub fn is_terminal_or_honor(tile: u8) -> bool {
    is_number_terminal(tile) || is_honor(tile)
}

/// 1 or 9 of man/pin/sou.
pub fn is_number_terminal(tile: u8) -> bool {
    tile < 27 && (tile % 9 == 0 || tile % 9 == 8)
}

pub fn is_honor(tile: u8) -> bool {
    tile >= 27 && (tile as usize) < TILE_MAX
}

/// Wind/dragon tile whose triplet always scores, given the round and seat
/// winds as tile ids.
pub fn is_yakuhai(tile: u8, bakaze: u8, jikaze: u8) -> bool {
    tile >= HAKU || tile == bakaze || tile == jikaze
}

/// A hand representation using a histogram of tile types (0-33).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Hand {
    pub counts: [u8; TILE_MAX],
}

impl Default for Hand {
    fn default() -> Self {
        Self {
            counts: [0; TILE_MAX],
        }
    }
}

impl Hand {
    pub fn new(tiles: &[u8]) -> Self {
        let mut h = Hand::default();
        for &t in tiles {
            h.add(t);
        }
        h
    }

    pub fn add(&mut self, t: u8) {
        if (t as usize) < TILE_MAX {
            self.counts[t as usize] += 1;
        }
    }

    pub fn remove(&mut self, t: u8) {
        if (t as usize) < TILE_MAX && self.counts[t as usize] > 0 {
            self.counts[t as usize] -= 1;
        }
    }

    pub fn total(&self) -> usize {
        self.counts.iter().map(|&c| c as usize).sum()
    }
}

/// Wind directions, used for the round wind and the seat wind.
///
/// East is the dealer seat. Internally winds are compared as honor tile
/// ids (27 + wind), see [`Wind::tile`].
#[pyclass(eq, eq_int)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Wind {
    East = 0,
    South = 1,
    West = 2,
    North = 3,
}

impl Wind {
    pub fn tile(self) -> u8 {
        EAST + self as u8
    }
}

/// A declared tile group: triplet, sequence or quad.
///
/// The `open` flag is the single source of truth for claimed vs. concealed;
/// a closed kan is `open == false` with four tiles, so a closed kan of tile 0
/// (1-man) is representable without sign tricks on the tile value.
#[pyclass]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Meld {
    #[pyo3(get, set)]
    pub tiles: Vec<u8>,
    #[pyo3(get, set)]
    pub open: bool,
}

#[pymethods]
impl Meld {
    #[new]
    pub fn new(tiles: Vec<u8>, open: bool) -> Self {
        Self { tiles, open }
    }

    fn __repr__(&self) -> String {
        format!("Meld(tiles={:?}, open={})", self.tiles, self.open)
    }
}

impl Meld {
    pub fn is_quad(&self) -> bool {
        self.tiles.len() == 4
    }

    /// Triplet or quad, as opposed to a sequence. Assumes a validated shape.
    pub fn is_set_of_kind(&self) -> bool {
        self.tiles.len() >= 3 && self.tiles[0] == self.tiles[1]
    }

    pub fn is_sequence(&self) -> bool {
        self.tiles.len() == 3 && self.tiles[0] != self.tiles[1]
    }
}

/// Validates a declared group: three identical tiles, three consecutive tiles
/// of one suit, or four identical tiles. `tiles` must be sorted.
pub fn is_proper_set(tiles: &[u8]) -> bool {
    if tiles.iter().any(|&t| t as usize >= TILE_MAX) {
        return false;
    }
    match tiles {
        [a, b, c] => {
            if a == b {
                b == c
            } else {
                *c < 27 && *a % 9 <= 6 && *b == *a + 1 && *c == *a + 2
            }
        }
        [a, b, c, d] => a == b && b == c && c == d,
        _ => false,
    }
}

/// Situational context fixed at the moment of the win.
#[pyclass]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Conditions {
    #[pyo3(get, set)]
    pub bakaze: Wind,
    #[pyo3(get, set)]
    pub jikaze: Wind,
    /// Win on the very first uninterrupted draw/discard (tenhou/chihou/renhou).
    #[pyo3(get, set)]
    pub first_take: bool,
    #[pyo3(get, set)]
    pub riichi: bool,
    #[pyo3(get, set)]
    pub ippatsu: bool,
    #[pyo3(get, set)]
    pub double_riichi: bool,
    /// Last tile of the wall / last discard (haitei/houtei).
    #[pyo3(get, set)]
    pub last_tile: bool,
    /// Win immediately after a kan declaration (rinshan/chankan).
    #[pyo3(get, set)]
    pub after_kan: bool,
}

#[pymethods]
impl Conditions {
    #[new]
    #[pyo3(signature = (bakaze=Wind::East, jikaze=Wind::South, first_take=false, riichi=false, ippatsu=false, double_riichi=false, last_tile=false, after_kan=false))]
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        bakaze: Wind,
        jikaze: Wind,
        first_take: bool,
        riichi: bool,
        ippatsu: bool,
        double_riichi: bool,
        last_tile: bool,
        after_kan: bool,
    ) -> Self {
        Self {
            bakaze,
            jikaze,
            first_take,
            riichi,
            ippatsu,
            double_riichi,
            last_tile,
            after_kan,
        }
    }
}

impl Default for Conditions {
    fn default() -> Self {
        Self::new(
            Wind::East,
            Wind::South,
            false,
            false,
            false,
            false,
            false,
            false,
        )
    }
}
