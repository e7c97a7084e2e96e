use crate::types::{Meld, TILE_MAX};

/// Counts dora in the full hand. Entries in `dora` are the winning tiles
/// themselves (callers resolve indicators beforehand), so duplicates in the
/// list stack as usual for kan reveals.
pub fn count_dora(closed_counts: &[u8; TILE_MAX], melds: &[Meld], dora: &[u8]) -> u32 {
    let mut n = 0u32;
    for &d in dora {
        if (d as usize) < TILE_MAX {
            n += closed_counts[d as usize] as u32;
        }
        for m in melds {
            n += m.tiles.iter().filter(|&&t| t == d).count() as u32;
        }
    }
    n
}
