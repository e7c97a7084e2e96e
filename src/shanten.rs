use pyo3::prelude::*;

use crate::types::TILE_MAX;

/// Tile-acceptance report for a hand that has not won. For a hand one tile
/// short of a full count, `wait` lists the tiles that lower the shanten
/// number. For a full count, `waits_after_discard` lists each discard that
/// keeps the hand at its best shanten, with the acceptance after it.
#[pyclass]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Hairi {
    #[pyo3(get)]
    pub now: i8,
    #[pyo3(get)]
    pub wait: Vec<u8>,
    #[pyo3(get)]
    pub waits_after_discard: Vec<(u8, Vec<u8>)>,
}

/// Shanten of the closed tiles given `declared` declared melds. -1 means the
/// hand is complete. `special_only` restricts the search to the seven-pairs
/// and thirteen-orphans shapes.
pub fn shanten(counts: &[u8; TILE_MAX], declared: u8, special_only: bool) -> i8 {
    let mut best = i8::MAX;
    if declared == 0 {
        best = best.min(chiitoi_shanten(counts)).min(kokushi_shanten(counts));
    }
    if !special_only {
        let mut work = *counts;
        best = best.min(normal_shanten(&mut work, declared));
    }
    best
}

fn chiitoi_shanten(counts: &[u8; TILE_MAX]) -> i8 {
    let pairs = counts.iter().filter(|&&c| c >= 2).count() as i8;
    let kinds = counts.iter().filter(|&&c| c >= 1).count() as i8;
    6 - pairs + (7 - kinds).max(0)
}

fn kokushi_shanten(counts: &[u8; TILE_MAX]) -> i8 {
    const ORPHANS: [usize; 13] = [0, 8, 9, 17, 18, 26, 27, 28, 29, 30, 31, 32, 33];
    let mut kinds = 0i8;
    let mut pair = 0i8;
    for &t in &ORPHANS {
        if counts[t] >= 1 {
            kinds += 1;
        }
        if counts[t] >= 2 {
            pair = 1;
        }
    }
    13 - kinds - pair
}

fn normal_shanten(counts: &mut [u8; TILE_MAX], declared: u8) -> i8 {
    let mut best = 8;
    extract_sets(counts, 0, declared as i8, &mut best);
    best
}

fn extract_sets(counts: &mut [u8; TILE_MAX], start: usize, sets: i8, best: &mut i8) {
    let mut i = start;
    while i < TILE_MAX && counts[i] == 0 {
        i += 1;
    }
    if i == TILE_MAX {
        extract_partials(counts, 0, sets, 0, 0, best);
        return;
    }

    if counts[i] >= 3 {
        counts[i] -= 3;
        extract_sets(counts, i, sets + 1, best);
        counts[i] += 3;
    }
    if i < 27 && i % 9 <= 6 && counts[i + 1] > 0 && counts[i + 2] > 0 {
        counts[i] -= 1;
        counts[i + 1] -= 1;
        counts[i + 2] -= 1;
        extract_sets(counts, i, sets + 1, best);
        counts[i] += 1;
        counts[i + 1] += 1;
        counts[i + 2] += 1;
    }
    // leave this tile out of any set; it stays for the partials phase
    extract_sets(counts, i + 1, sets, best);
}

fn extract_partials(
    counts: &mut [u8; TILE_MAX],
    start: usize,
    sets: i8,
    partials: i8,
    pairs: i8,
    best: &mut i8,
) {
    let mut i = start;
    while i < TILE_MAX && counts[i] == 0 {
        i += 1;
    }
    if i == TILE_MAX {
        // one pair serves as the head, the rest count as partial sets
        let head = (pairs > 0) as i8;
        let spare = partials + pairs - head;
        let sets = sets.min(4);
        let sh = 8 - 2 * sets - spare.min(4 - sets) - head;
        *best = (*best).min(sh);
        return;
    }

    if counts[i] >= 2 {
        counts[i] -= 2;
        extract_partials(counts, i, sets, partials, pairs + 1, best);
        counts[i] += 2;
    }
    if i < 27 && i % 9 <= 7 && counts[i + 1] > 0 {
        counts[i] -= 1;
        counts[i + 1] -= 1;
        extract_partials(counts, i, sets, partials + 1, pairs, best);
        counts[i] += 1;
        counts[i + 1] += 1;
    }
    if i < 27 && i % 9 <= 6 && counts[i + 2] > 0 {
        counts[i] -= 1;
        counts[i + 2] -= 1;
        extract_partials(counts, i, sets, partials + 1, pairs, best);
        counts[i] += 1;
        counts[i + 2] += 1;
    }
    // remaining copies of this tile are floaters
    extract_partials(counts, i + 1, sets, partials, pairs, best);
}

fn improving_tiles(counts: &[u8; TILE_MAX], declared: u8, special_only: bool, now: i8) -> Vec<u8> {
    let mut out = Vec::new();
    let mut work = *counts;
    for t in 0..TILE_MAX {
        if work[t] >= 4 {
            continue;
        }
        work[t] += 1;
        if shanten(&work, declared, special_only) < now {
            out.push(t as u8);
        }
        work[t] -= 1;
    }
    out
}

/// Acceptance analysis. `counts` holds the closed tiles; hands with a full
/// count (3k+2 tiles) get per-discard acceptance, one tile short (3k+1)
/// gets the direct wait list.
pub fn hairi(counts: &[u8; TILE_MAX], declared: u8, special_only: bool) -> Hairi {
    let total: usize = counts.iter().map(|&c| c as usize).sum();
    let now = shanten(counts, declared, special_only);
    let mut out = Hairi {
        now,
        ..Hairi::default()
    };
    if now < 0 {
        return out;
    }
    if total % 3 == 1 {
        out.wait = improving_tiles(counts, declared, special_only, now);
        return out;
    }
    if total % 3 != 2 {
        return out;
    }
    let mut work = *counts;
    let mut best = i8::MAX;
    let mut per_discard: Vec<(u8, i8, Vec<u8>)> = Vec::new();
    for t in 0..TILE_MAX {
        if work[t] == 0 {
            continue;
        }
        work[t] -= 1;
        let sh = shanten(&work, declared, special_only);
        if sh <= best {
            let wait = improving_tiles(&work, declared, special_only, sh);
            per_discard.push((t as u8, sh, wait));
            best = best.min(sh);
        }
        work[t] += 1;
    }
    out.waits_after_discard = per_discard
        .into_iter()
        .filter(|(_, sh, _)| *sh == best)
        .map(|(t, _, wait)| (t, wait))
        .collect();
    out
}
