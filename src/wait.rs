use crate::agari::{HandShape, Mentsu};
use crate::types::is_terminal_or_honor;

/// Wait shapes consistent with one decomposition and a winning tile.
///
/// Several flags may hold at once when the winning tile participates in more
/// than one group of the same decomposition; the fu calculator picks the most
/// favorable reading.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WaitProfile {
    /// Two-sided wait completing an inner run.
    pub ryanmen: bool,
    /// Gap wait filling the middle of a run.
    pub kanchan: bool,
    /// Edge wait: 1-2 waiting on 3, or 8-9 waiting on 7.
    pub penchan: bool,
    /// Dual-pair wait completing a triplet.
    pub shanpon: bool,
    /// Pair wait.
    pub tanki: bool,
}

/// Classifies the wait against the closed groups of `shape`. Declared melds
/// never participate, they were complete before the win.
pub fn classify(shape: &HandShape, win_tile: u8) -> WaitProfile {
    let mut w = WaitProfile::default();
    match shape {
        HandShape::Standard(div) => {
            if div.head == win_tile {
                w.tanki = true;
            }
            for m in &div.body {
                match *m {
                    Mentsu::Koutsu(t) => {
                        if t == win_tile {
                            w.shanpon = true;
                        }
                    }
                    Mentsu::Shuntsu(t) => {
                        let low = t;
                        let high = t + 2;
                        if (win_tile == low && !is_terminal_or_honor(high))
                            || (win_tile == high && !is_terminal_or_honor(low))
                        {
                            w.ryanmen = true;
                        }
                        if (win_tile == low && is_terminal_or_honor(high))
                            || (win_tile == high && is_terminal_or_honor(low))
                        {
                            w.penchan = true;
                        }
                        if win_tile == t + 1 {
                            w.kanchan = true;
                        }
                    }
                }
            }
        }
        HandShape::SevenPairs(pairs) => {
            w.tanki = pairs.contains(&win_tile);
        }
        HandShape::ThirteenOrphans => {}
    }
    w
}
