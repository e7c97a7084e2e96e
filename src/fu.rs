use crate::agari::{HandShape, Mentsu};
use crate::types::{is_terminal_or_honor, Meld};
use crate::wait::WaitProfile;

/// Named fu contribution. Each variant carries a fixed score and a stable
/// label used in score breakdowns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FuReason {
    Base,
    OpenPinfu,
    Chiitoitsu,
    PairWait,
    EdgeWait,
    ClosedWait,
    Tsumo,
    MenzenRon,
    OpenTripletSimple,
    OpenTripletNonSimple,
    ClosedTripletSimple,
    ClosedTripletNonSimple,
    OpenKanSimple,
    OpenKanNonSimple,
    ClosedKanSimple,
    ClosedKanNonSimple,
    YakuhaiPair,
    Kokushimusou,
}

impl FuReason {
    pub fn score(self) -> u32 {
        match self {
            FuReason::Base => 20,
            FuReason::OpenPinfu => 2,
            FuReason::Chiitoitsu => 25,
            FuReason::PairWait => 2,
            FuReason::EdgeWait => 2,
            FuReason::ClosedWait => 2,
            FuReason::Tsumo => 2,
            FuReason::MenzenRon => 10,
            FuReason::OpenTripletSimple => 2,
            FuReason::OpenTripletNonSimple => 4,
            FuReason::ClosedTripletSimple => 4,
            FuReason::ClosedTripletNonSimple => 8,
            FuReason::OpenKanSimple => 8,
            FuReason::OpenKanNonSimple => 16,
            FuReason::ClosedKanSimple => 16,
            FuReason::ClosedKanNonSimple => 32,
            FuReason::YakuhaiPair => 2,
            FuReason::Kokushimusou => 0,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            FuReason::Base => "base",
            FuReason::OpenPinfu => "open pinfu",
            FuReason::Chiitoitsu => "chiitoitsu",
            FuReason::PairWait => "pair wait",
            FuReason::EdgeWait => "edge wait",
            FuReason::ClosedWait => "closed wait",
            FuReason::Tsumo => "tsumo",
            FuReason::MenzenRon => "menzen ron",
            FuReason::OpenTripletSimple => "open triplet simple",
            FuReason::OpenTripletNonSimple => "open triplet non simple",
            FuReason::ClosedTripletSimple => "closed triplet simple",
            FuReason::ClosedTripletNonSimple => "closed triplet non simple",
            FuReason::OpenKanSimple => "open kan simple",
            FuReason::OpenKanNonSimple => "open kan non simple",
            FuReason::ClosedKanSimple => "closed kan simple",
            FuReason::ClosedKanNonSimple => "closed kan non simple",
            FuReason::YakuhaiPair => "yakuhai pair",
            FuReason::Kokushimusou => "kokushimusou",
        }
    }
}

fn ceil10(n: u32) -> u32 {
    n.div_ceil(10) * 10
}

/// Fu of yaku already established for the current decomposition. Keying the
/// special cases off the fired rules (not the raw shape) lets a seven-pair
/// hand with the chiitoitsu rule disabled fall through to the general path.
#[derive(Debug, Clone, Copy, Default)]
pub struct FiredOverrides {
    pub chiitoitsu: bool,
    pub kokushi: bool,
    pub pinfu: bool,
}

pub struct FuInput<'a> {
    pub shape: &'a HandShape,
    pub melds: &'a [Meld],
    pub win_tile: u8,
    pub is_tsumo: bool,
    pub is_menzen: bool,
    pub bakaze: u8,
    pub jikaze: u8,
    pub wait: WaitProfile,
    pub fired: FiredOverrides,
}

/// Computes total fu and the ordered list of contributions for one
/// decomposition.
pub fn calc_fu(input: &FuInput) -> (u32, Vec<FuReason>) {
    let mut reasons = Vec::new();

    if input.fired.chiitoitsu {
        reasons.push(FuReason::Chiitoitsu);
        return (25, reasons);
    }
    if input.fired.kokushi {
        reasons.push(FuReason::Kokushimusou);
        return (0, reasons);
    }
    if input.fired.pinfu {
        reasons.push(FuReason::Base);
        if input.is_tsumo {
            return (20, reasons);
        }
        reasons.push(FuReason::MenzenRon);
        return (30, reasons);
    }

    let mut fu = 20;
    reasons.push(FuReason::Base);
    if !input.is_tsumo && input.is_menzen {
        fu += 10;
        reasons.push(FuReason::MenzenRon);
    }

    let w = input.wait;

    for m in input.melds {
        if m.is_quad() {
            let reason = match (is_terminal_or_honor(m.tiles[0]), m.open) {
                (false, true) => FuReason::OpenKanSimple,
                (false, false) => FuReason::ClosedKanSimple,
                (true, true) => FuReason::OpenKanNonSimple,
                (true, false) => FuReason::ClosedKanNonSimple,
            };
            fu += reason.score();
            reasons.push(reason);
        } else if m.is_set_of_kind() {
            let reason = if is_terminal_or_honor(m.tiles[0]) {
                FuReason::OpenTripletNonSimple
            } else {
                FuReason::OpenTripletSimple
            };
            fu += reason.score();
            reasons.push(reason);
        }
    }

    let score_pair = |pair: u8, fu: &mut u32, reasons: &mut Vec<FuReason>| {
        if pair == input.bakaze || pair == input.jikaze || pair >= 31 {
            *fu += 2;
            reasons.push(FuReason::YakuhaiPair);
        }
        // a pair of one's own wind which is also the round wind counts twice
        if input.bakaze == input.jikaze && pair == input.bakaze {
            *fu += 2;
            reasons.push(FuReason::YakuhaiPair);
        }
        if pair == input.win_tile {
            *fu += 2;
            reasons.push(FuReason::PairWait);
        }
    };

    match input.shape {
        HandShape::Standard(div) => {
            score_pair(div.head, &mut fu, &mut reasons);
            for m in &div.body {
                let t = match *m {
                    Mentsu::Koutsu(t) => t,
                    Mentsu::Shuntsu(_) => continue,
                };
                let closed = if !input.is_tsumo && t == input.win_tile {
                    // a ron completing this triplet scores it open, unless
                    // the tile also finishes a run of the same decomposition
                    w.ryanmen || w.kanchan || w.penchan
                } else {
                    true
                };
                let reason = match (is_terminal_or_honor(t), closed) {
                    (false, true) => FuReason::ClosedTripletSimple,
                    (true, true) => FuReason::ClosedTripletNonSimple,
                    (false, false) => FuReason::OpenTripletSimple,
                    (true, false) => FuReason::OpenTripletNonSimple,
                };
                fu += reason.score();
                reasons.push(reason);
            }
        }
        HandShape::SevenPairs(pairs) => {
            for &p in pairs {
                score_pair(p, &mut fu, &mut reasons);
            }
        }
        HandShape::ThirteenOrphans => {}
    }

    if (w.penchan || w.kanchan) && !w.shanpon && !w.ryanmen && !w.tanki {
        fu += 2;
        // when both hold, the edge-wait reading is the one reported
        reasons.push(if w.penchan {
            FuReason::EdgeWait
        } else {
            FuReason::ClosedWait
        });
    }

    if input.is_tsumo {
        fu += 2;
        reasons.push(FuReason::Tsumo);
    }

    fu = ceil10(fu);
    if fu < 30 {
        // open hand shaped like pinfu still pays at least 30
        fu = 30;
        reasons.push(FuReason::OpenPinfu);
    }

    (fu, reasons)
}
