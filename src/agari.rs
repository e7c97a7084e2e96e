use crate::types::{Hand, TILE_MAX};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mentsu {
    Koutsu(u8),
    Shuntsu(u8),
}

/// One partition of the closed tiles into a pair plus sets. Declared melds are
/// carried separately and appended by the caller where needed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Division {
    pub head: u8,
    pub body: Vec<Mentsu>,
}

/// A complete interpretation of the closed part of a winning hand.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HandShape {
    Standard(Division),
    SevenPairs(Vec<u8>),
    ThirteenOrphans,
}

pub fn is_agari(hand: &mut Hand) -> bool {
    if is_kokushi(hand) {
        return true;
    }
    if is_chiitoitsu(hand) {
        return true;
    }
    is_standard_agari(hand)
}

/// Enumerates every valid interpretation of the closed tiles: all standard
/// head-plus-sets partitions, the seven-pairs shape and the thirteen-orphans
/// shape. Order is deterministic (heads ascending, then set choices).
pub fn find_decompositions(hand: &Hand) -> Vec<HandShape> {
    let mut shapes: Vec<HandShape> = find_divisions(hand)
        .into_iter()
        .map(HandShape::Standard)
        .collect();
    if is_chiitoitsu(hand) {
        let pairs = hand
            .counts
            .iter()
            .enumerate()
            .filter(|(_, &c)| c == 2)
            .map(|(i, _)| i as u8)
            .collect();
        shapes.push(HandShape::SevenPairs(pairs));
    }
    if is_kokushi(hand) {
        shapes.push(HandShape::ThirteenOrphans);
    }
    shapes
}

pub fn find_divisions(hand: &Hand) -> Vec<Division> {
    let mut divisions = Vec::new();
    for i in 0..TILE_MAX {
        if hand.counts[i] >= 2 {
            let mut processing_hand = hand.clone();
            processing_hand.counts[i] -= 2;
            let mut bodies = Vec::new();
            let mut current_body = Vec::new();
            decompose_all(&mut processing_hand, 0, &mut current_body, &mut bodies);
            for body in bodies {
                divisions.push(Division {
                    head: i as u8,
                    body,
                });
            }
        }
    }
    divisions
}

fn decompose_all(
    hand: &mut Hand,
    start_idx: usize,
    current_body: &mut Vec<Mentsu>,
    results: &mut Vec<Vec<Mentsu>>,
) {
    let mut i = start_idx;
    while i < TILE_MAX && hand.counts[i] == 0 {
        i += 1;
    }

    if i == TILE_MAX {
        results.push(current_body.clone());
        return;
    }

    // Try Koutsu
    if hand.counts[i] >= 3 {
        hand.counts[i] -= 3;
        current_body.push(Mentsu::Koutsu(i as u8));
        decompose_all(hand, i, current_body, results);
        current_body.pop();
        hand.counts[i] += 3;
    }

    // Try Shuntsu
    if i < 27 && i % 9 <= 6 && hand.counts[i + 1] > 0 && hand.counts[i + 2] > 0 {
        hand.counts[i] -= 1;
        hand.counts[i + 1] -= 1;
        hand.counts[i + 2] -= 1;
        current_body.push(Mentsu::Shuntsu(i as u8));
        decompose_all(hand, i, current_body, results);
        current_body.pop();
        hand.counts[i] += 1;
        hand.counts[i + 1] += 1;
        hand.counts[i + 2] += 1;
    }
}

pub fn is_kokushi(hand: &Hand) -> bool {
    let kokushi_indices = [0, 8, 9, 17, 18, 26, 27, 28, 29, 30, 31, 32, 33];
    let mut pair_found = false;

    if hand.total() != kokushi_indices.len() + 1 {
        return false;
    }
    for &idx in &kokushi_indices {
        match hand.counts[idx] {
            0 => return false,
            1 => {}
            2 => {
                if pair_found {
                    return false;
                }
                pair_found = true;
            }
            _ => return false,
        }
    }
    pair_found
}

pub fn is_chiitoitsu(hand: &Hand) -> bool {
    let mut pairs = 0;
    for c in hand.counts.iter() {
        if *c == 2 {
            pairs += 1;
        } else if *c != 0 {
            return false;
        }
    }
    pairs == 7
}

pub fn is_standard_agari(hand: &mut Hand) -> bool {
    // 1. Pick a pair (head)
    // 2. Decompose the rest into sequences/triplets
    for i in 0..TILE_MAX {
        if hand.counts[i] >= 2 {
            hand.counts[i] -= 2;
            let ok = decompose(hand, 0);
            hand.counts[i] += 2;
            if ok {
                return true;
            }
        }
    }
    false
}

fn decompose(hand: &mut Hand, start_idx: usize) -> bool {
    let mut i = start_idx;
    while i < TILE_MAX && hand.counts[i] == 0 {
        i += 1;
    }

    if i == TILE_MAX {
        return true;
    }

    if hand.counts[i] >= 3 {
        hand.counts[i] -= 3;
        let ok = decompose(hand, i);
        hand.counts[i] += 3;
        if ok {
            return true;
        }
    }

    if i < 27 && i % 9 <= 6 && hand.counts[i + 1] > 0 && hand.counts[i + 2] > 0 {
        hand.counts[i] -= 1;
        hand.counts[i + 1] -= 1;
        hand.counts[i + 2] -= 1;
        let ok = decompose(hand, i);
        hand.counts[i] += 1;
        hand.counts[i + 1] += 1;
        hand.counts[i + 2] += 1;
        if ok {
            return true;
        }
    }

    false
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_agari() {
        // 123m 456m 789m 123p 11s
        let tiles = [0, 1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 18, 18];
        let mut hand = Hand::new(&tiles);
        assert!(is_agari(&mut hand));
        // hand restored by backtracking
        assert_eq!(hand, Hand::new(&tiles));
    }

    #[test]
    fn test_partial_hand_with_melds() {
        // Two melds declared elsewhere: closed part is 2 sets + pair
        let mut hand = Hand::new(&[0, 1, 2, 13, 13, 13, 20, 20]);
        assert!(is_agari(&mut hand));
    }

    #[test]
    fn test_chiitoitsu_shape() {
        let mut hand = Hand::default();
        for &t in &[0, 2, 4, 6, 8, 10, 12] {
            hand.add(t);
            hand.add(t);
        }
        assert!(is_chiitoitsu(&hand));
        assert!(is_agari(&mut hand));
        // four of a kind is not two pairs
        let mut bad = Hand::default();
        for &t in &[0, 0, 2, 4, 6, 8, 10] {
            bad.add(t);
            bad.add(t);
        }
        assert!(!is_chiitoitsu(&bad));
    }

    #[test]
    fn test_kokushi_shape() {
        let mut hand = Hand::default();
        for &t in &[0u8, 8, 9, 17, 18, 26, 27, 28, 29, 30, 31, 32, 33] {
            hand.add(t);
        }
        assert!(!is_kokushi(&hand)); // 13 tiles, no pair yet
        hand.add(0);
        assert!(is_kokushi(&hand));
        assert!(is_agari(&mut hand));
    }

    #[test]
    fn test_multiple_divisions() {
        // 111222333m 44m 567s reads as three triplets, three runs, or a
        // 1m head with 123m 234m 234m
        let mut hand = Hand::default();
        for t in 0..3u8 {
            for _ in 0..3 {
                hand.add(t);
            }
        }
        hand.add(3);
        hand.add(3);
        for &t in &[22, 23, 24] {
            hand.add(t);
        }
        let divisions = find_divisions(&hand);
        assert_eq!(divisions.len(), 3);
        assert!(divisions
            .iter()
            .any(|d| d.head == 0 && d.body.contains(&Mentsu::Shuntsu(1))));
        let koutsu_div = divisions
            .iter()
            .find(|d| d.body.contains(&Mentsu::Koutsu(0)))
            .unwrap();
        assert!(koutsu_div.body.contains(&Mentsu::Koutsu(2)));
        let run_div = divisions
            .iter()
            .find(|d| d.head == 3 && d.body.contains(&Mentsu::Shuntsu(0)))
            .unwrap();
        assert_eq!(
            run_div
                .body
                .iter()
                .filter(|m| **m == Mentsu::Shuntsu(0))
                .count(),
            3
        );
    }

    #[test]
    fn test_decompositions_include_seven_pairs() {
        // 22334455667788p is both ryanpeikou-style runs and seven pairs
        let mut hand = Hand::default();
        for t in 10..=16u8 {
            hand.add(t);
            hand.add(t);
        }
        let shapes = find_decompositions(&hand);
        assert!(shapes
            .iter()
            .any(|s| matches!(s, HandShape::SevenPairs(_))));
        assert!(shapes.iter().any(|s| matches!(s, HandShape::Standard(_))));
    }
}
