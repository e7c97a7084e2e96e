use crate::agari::{HandShape, Mentsu};
use crate::rule::RuleConfig;
use crate::types::{
    is_honor, is_number_terminal, is_terminal_or_honor, is_yakuhai, Conditions, Meld, EAST, HAKU,
    TILE_MAX,
};
use crate::wait::WaitProfile;

/// Immutable snapshot of one decomposition plus the win context. Every rule
/// predicate reads from this and nothing else.
pub struct RuleState<'a> {
    pub shape: &'a HandShape,
    pub melds: &'a [Meld],
    /// Closed tiles plus meld tiles, as a histogram.
    pub all_counts: &'a [u8; TILE_MAX],
    /// Closed tiles only, winning tile included.
    pub closed_counts: &'a [u8; TILE_MAX],
    pub win_tile: u8,
    pub is_tsumo: bool,
    pub is_menzen: bool,
    pub bakaze: u8,
    pub jikaze: u8,
    pub flags: &'a Conditions,
    pub wait: WaitProfile,
    pub allow_kuitan: bool,
}

impl RuleState<'_> {
    fn body(&self) -> &[Mentsu] {
        match self.shape {
            HandShape::Standard(div) => &div.body,
            _ => &[],
        }
    }

    fn head(&self) -> Option<u8> {
        match self.shape {
            HandShape::Standard(div) => Some(div.head),
            _ => None,
        }
    }

    fn has_koutsu_of(&self, t: u8) -> bool {
        self.body().contains(&Mentsu::Koutsu(t))
            || self
                .melds
                .iter()
                .any(|m| m.is_set_of_kind() && m.tiles[0] == t)
    }

    fn run_starts(&self) -> Vec<u8> {
        let mut runs: Vec<u8> = self
            .body()
            .iter()
            .filter_map(|m| match m {
                Mentsu::Shuntsu(t) => Some(*t),
                Mentsu::Koutsu(_) => None,
            })
            .collect();
        runs.extend(
            self.melds
                .iter()
                .filter(|m| m.is_sequence())
                .map(|m| m.tiles[0]),
        );
        runs
    }

    /// Concealed triplets under the fu rule: a triplet finished by ron only
    /// stays concealed when the winning tile is also explainable as part
    /// of a run in the same decomposition.
    fn ankou_count(&self) -> u32 {
        let w = self.wait;
        let mut n = 0;
        for m in self.body() {
            if let Mentsu::Koutsu(t) = *m {
                if self.is_tsumo || t != self.win_tile || w.ryanmen || w.kanchan || w.penchan {
                    n += 1;
                }
            }
        }
        n + self.melds.iter().filter(|m| m.is_quad() && !m.open).count() as u32
    }

    fn quad_count(&self) -> usize {
        self.melds.iter().filter(|m| m.is_quad()).count()
    }

    fn wind_koutsu_count(&self) -> usize {
        (EAST..EAST + 4).filter(|&t| self.has_koutsu_of(t)).count()
    }

    fn dragon_koutsu_count(&self) -> usize {
        (HAKU..HAKU + 3).filter(|&t| self.has_koutsu_of(t)).count()
    }

    fn identical_run_pairs(&self) -> u32 {
        let mut counts = [0u8; 27];
        for m in self.body() {
            if let Mentsu::Shuntsu(t) = *m {
                counts[t as usize] += 1;
            }
        }
        counts.iter().map(|&c| (c / 2) as u32).sum()
    }

    fn all_tiles(&self, pred: impl Fn(u8) -> bool) -> bool {
        self.all_counts
            .iter()
            .enumerate()
            .all(|(t, &c)| c == 0 || pred(t as u8))
    }

    fn uses_honors(&self) -> bool {
        (27..TILE_MAX).any(|t| self.all_counts[t] > 0)
    }

    fn number_suits_used(&self) -> usize {
        (0..3)
            .filter(|s| (s * 9..s * 9 + 9).any(|t| self.all_counts[t] > 0))
            .count()
    }

    fn single_suit(&self) -> Option<usize> {
        let mut suit = None;
        for t in 0..27 {
            if self.all_counts[t] > 0 {
                let s = t / 9;
                if suit.is_some_and(|p| p != s) {
                    return None;
                }
                suit = Some(s);
            }
        }
        suit
    }

    /// Every group of the decomposition, melds and pair included, holds a
    /// tile satisfying `pred` on terminals. Used for the outside hands.
    fn all_groups_outside(&self, honors_ok: bool) -> bool {
        let group_ok = |t: u8, run: bool| {
            if run {
                t % 9 == 0 || t % 9 == 6
            } else if is_honor(t) {
                honors_ok
            } else {
                is_number_terminal(t)
            }
        };
        let Some(head) = self.head() else { return false };
        if !group_ok(head, false) {
            return false;
        }
        for m in self.body() {
            let ok = match *m {
                Mentsu::Koutsu(t) => group_ok(t, false),
                Mentsu::Shuntsu(t) => group_ok(t, true),
            };
            if !ok {
                return false;
            }
        }
        self.melds.iter().all(|m| {
            if m.is_sequence() {
                group_ok(m.tiles[0], true)
            } else {
                group_ok(m.tiles[0], false)
            }
        })
    }

    /// `Some(true)` for the pure nine-gates shape, `Some(false)` for the
    /// ordinary one, `None` when the hand is not nine gates at all.
    fn chuuren_kind(&self) -> Option<bool> {
        if !self.melds.is_empty() {
            return None;
        }
        let suit = self.single_suit()?;
        if self.uses_honors() {
            return None;
        }
        const PATTERN: [u8; 9] = [3, 1, 1, 1, 1, 1, 1, 1, 3];
        let base = suit * 9;
        let counts = &self.all_counts[base..base + 9];
        if counts
            .iter()
            .zip(PATTERN.iter())
            .any(|(&have, &need)| have < need)
        {
            return None;
        }
        let win = self.win_tile as usize;
        if win / 9 != suit {
            return None;
        }
        Some(counts[win % 9] == PATTERN[win % 9] + 1)
    }
}

/// Every scoring rule, in evaluation order: limit hands first, then the
/// regular rules. Names are the strings reported in results.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Yaku {
    KokushiJusanmen,
    Kokushi,
    JunseiChuuren,
    Chuuren,
    SuuankouTanki,
    Suuankou,
    Daisuushii,
    Shousuushii,
    Daisangen,
    Tsuuiisou,
    Ryuuiisou,
    Chinroutou,
    Suukantsu,
    Tenhou,
    Chihou,
    Renhou,
    Daisharin,
    Riichi,
    DaburuRiichi,
    Ippatsu,
    MenzenTsumo,
    Pinfu,
    Tanyao,
    Iipeikou,
    Haku,
    Hatsu,
    Chun,
    Bakaze,
    Jikaze,
    Haitei,
    Houtei,
    Rinshan,
    Chankan,
    SanshokuDoujun,
    Ittsuu,
    Chanta,
    Chiitoitsu,
    Toitoi,
    Sanankou,
    SanshokuDoukou,
    Sankantsu,
    Honroutou,
    Shousangen,
    Honitsu,
    Junchan,
    Ryanpeikou,
    Chinitsu,
}

pub const YAKU_TABLE: [Yaku; 47] = [
    Yaku::KokushiJusanmen,
    Yaku::Kokushi,
    Yaku::JunseiChuuren,
    Yaku::Chuuren,
    Yaku::SuuankouTanki,
    Yaku::Suuankou,
    Yaku::Daisuushii,
    Yaku::Shousuushii,
    Yaku::Daisangen,
    Yaku::Tsuuiisou,
    Yaku::Ryuuiisou,
    Yaku::Chinroutou,
    Yaku::Suukantsu,
    Yaku::Tenhou,
    Yaku::Chihou,
    Yaku::Renhou,
    Yaku::Daisharin,
    Yaku::Riichi,
    Yaku::DaburuRiichi,
    Yaku::Ippatsu,
    Yaku::MenzenTsumo,
    Yaku::Pinfu,
    Yaku::Tanyao,
    Yaku::Iipeikou,
    Yaku::Haku,
    Yaku::Hatsu,
    Yaku::Chun,
    Yaku::Bakaze,
    Yaku::Jikaze,
    Yaku::Haitei,
    Yaku::Houtei,
    Yaku::Rinshan,
    Yaku::Chankan,
    Yaku::SanshokuDoujun,
    Yaku::Ittsuu,
    Yaku::Chanta,
    Yaku::Chiitoitsu,
    Yaku::Toitoi,
    Yaku::Sanankou,
    Yaku::SanshokuDoukou,
    Yaku::Sankantsu,
    Yaku::Honroutou,
    Yaku::Shousangen,
    Yaku::Honitsu,
    Yaku::Junchan,
    Yaku::Ryanpeikou,
    Yaku::Chinitsu,
];

impl Yaku {
    pub fn name(self) -> &'static str {
        match self {
            Yaku::KokushiJusanmen => "kokushimusou 13 sides",
            Yaku::Kokushi => "kokushimusou",
            Yaku::JunseiChuuren => "junsei chuurenpoutou",
            Yaku::Chuuren => "chuurenpoutou",
            Yaku::SuuankouTanki => "suuankou tanki",
            Yaku::Suuankou => "suuankou",
            Yaku::Daisuushii => "daisuushii",
            Yaku::Shousuushii => "shousuushii",
            Yaku::Daisangen => "daisangen",
            Yaku::Tsuuiisou => "tsuuiisou",
            Yaku::Ryuuiisou => "ryuuiisou",
            Yaku::Chinroutou => "chinroutou",
            Yaku::Suukantsu => "suukantsu",
            Yaku::Tenhou => "tenhou",
            Yaku::Chihou => "chihou",
            Yaku::Renhou => "renhou",
            Yaku::Daisharin => "daisharin",
            Yaku::Riichi => "riichi",
            Yaku::DaburuRiichi => "daburu riichi",
            Yaku::Ippatsu => "ippatsu",
            Yaku::MenzenTsumo => "menzen tsumo",
            Yaku::Pinfu => "pinfu",
            Yaku::Tanyao => "tanyao",
            Yaku::Iipeikou => "iipeikou",
            Yaku::Haku => "haku",
            Yaku::Hatsu => "hatsu",
            Yaku::Chun => "chun",
            Yaku::Bakaze => "bakaze",
            Yaku::Jikaze => "jikaze",
            Yaku::Haitei => "haitei",
            Yaku::Houtei => "houtei",
            Yaku::Rinshan => "rinshan kaihou",
            Yaku::Chankan => "chankan",
            Yaku::SanshokuDoujun => "sanshoku doujun",
            Yaku::Ittsuu => "ittsuu",
            Yaku::Chanta => "chanta",
            Yaku::Chiitoitsu => "chiitoitsu",
            Yaku::Toitoi => "toitoi",
            Yaku::Sanankou => "sanankou",
            Yaku::SanshokuDoukou => "sanshoku doukou",
            Yaku::Sankantsu => "sankantsu",
            Yaku::Honroutou => "honroutou",
            Yaku::Shousangen => "shousangen",
            Yaku::Honitsu => "honitsu",
            Yaku::Junchan => "junchan",
            Yaku::Ryanpeikou => "ryanpeikou",
            Yaku::Chinitsu => "chinitsu",
        }
    }

    /// Yakuman multiplier, 0 for regular rules.
    pub fn yakuman(self) -> u8 {
        match self {
            Yaku::KokushiJusanmen
            | Yaku::JunseiChuuren
            | Yaku::SuuankouTanki
            | Yaku::Daisuushii => 2,
            Yaku::Kokushi
            | Yaku::Chuuren
            | Yaku::Suuankou
            | Yaku::Shousuushii
            | Yaku::Daisangen
            | Yaku::Tsuuiisou
            | Yaku::Ryuuiisou
            | Yaku::Chinroutou
            | Yaku::Suukantsu
            | Yaku::Tenhou
            | Yaku::Chihou
            | Yaku::Renhou
            | Yaku::Daisharin => 1,
            _ => 0,
        }
    }

    pub fn han(self) -> u32 {
        match self {
            Yaku::Riichi
            | Yaku::Ippatsu
            | Yaku::MenzenTsumo
            | Yaku::Pinfu
            | Yaku::Tanyao
            | Yaku::Iipeikou
            | Yaku::Haku
            | Yaku::Hatsu
            | Yaku::Chun
            | Yaku::Bakaze
            | Yaku::Jikaze
            | Yaku::Haitei
            | Yaku::Houtei
            | Yaku::Rinshan
            | Yaku::Chankan => 1,
            Yaku::DaburuRiichi
            | Yaku::SanshokuDoujun
            | Yaku::Ittsuu
            | Yaku::Chanta
            | Yaku::Chiitoitsu
            | Yaku::Toitoi
            | Yaku::Sanankou
            | Yaku::SanshokuDoukou
            | Yaku::Sankantsu
            | Yaku::Honroutou
            | Yaku::Shousangen => 2,
            Yaku::Honitsu | Yaku::Junchan | Yaku::Ryanpeikou => 3,
            Yaku::Chinitsu => 6,
            _ => 0,
        }
    }

    pub fn is_menzen_only(self) -> bool {
        matches!(
            self,
            Yaku::Riichi
                | Yaku::DaburuRiichi
                | Yaku::Ippatsu
                | Yaku::MenzenTsumo
                | Yaku::Pinfu
                | Yaku::Iipeikou
                | Yaku::Chiitoitsu
                | Yaku::Ryanpeikou
        )
    }

    /// Worth one han less when the hand is open.
    pub fn is_furo_minus(self) -> bool {
        matches!(
            self,
            Yaku::SanshokuDoujun
                | Yaku::Ittsuu
                | Yaku::Chanta
                | Yaku::Honitsu
                | Yaku::Junchan
                | Yaku::Chinitsu
        )
    }

    /// Local rules are off unless enabled in the configuration.
    pub fn is_local(self) -> bool {
        matches!(self, Yaku::Renhou | Yaku::Daisharin)
    }

    pub fn check(self, st: &RuleState) -> bool {
        match self {
            Yaku::KokushiJusanmen => {
                matches!(st.shape, HandShape::ThirteenOrphans)
                    && st.closed_counts[st.win_tile as usize] == 2
            }
            Yaku::Kokushi => {
                matches!(st.shape, HandShape::ThirteenOrphans)
                    && st.closed_counts[st.win_tile as usize] != 2
            }
            Yaku::JunseiChuuren => st.chuuren_kind() == Some(true),
            Yaku::Chuuren => st.chuuren_kind() == Some(false),
            Yaku::SuuankouTanki => st.ankou_count() == 4 && st.wait.tanki,
            Yaku::Suuankou => st.ankou_count() == 4 && !st.wait.tanki,
            Yaku::Daisuushii => st.wind_koutsu_count() == 4,
            Yaku::Shousuushii => {
                st.wind_koutsu_count() == 3
                    && st.head().is_some_and(|h| (EAST..EAST + 4).contains(&h))
            }
            Yaku::Daisangen => st.dragon_koutsu_count() == 3,
            Yaku::Tsuuiisou => st.all_tiles(is_honor),
            Yaku::Ryuuiisou => st.all_tiles(|t| matches!(t, 19 | 20 | 21 | 23 | 25 | 32)),
            Yaku::Chinroutou => st.all_tiles(is_number_terminal),
            Yaku::Suukantsu => st.quad_count() == 4,
            Yaku::Tenhou => st.is_tsumo && st.flags.first_take && st.jikaze == EAST,
            Yaku::Chihou => st.is_tsumo && st.flags.first_take && st.jikaze != EAST,
            Yaku::Renhou => !st.is_tsumo && st.flags.first_take,
            Yaku::Daisharin => {
                matches!(st.shape, HandShape::SevenPairs(pairs)
                    if *pairs == [10, 11, 12, 13, 14, 15, 16])
            }
            Yaku::Riichi => st.flags.riichi && !st.flags.double_riichi,
            Yaku::DaburuRiichi => st.flags.double_riichi,
            Yaku::Ippatsu => st.flags.ippatsu,
            Yaku::MenzenTsumo => st.is_tsumo,
            Yaku::Pinfu => {
                st.melds.is_empty()
                    && st.wait.ryanmen
                    && matches!(st.shape, HandShape::Standard(div)
                        if div.body.iter().all(|m| matches!(m, Mentsu::Shuntsu(_)))
                            && !is_yakuhai(div.head, st.bakaze, st.jikaze))
            }
            Yaku::Tanyao => {
                (st.is_menzen || st.allow_kuitan) && st.all_tiles(|t| !is_terminal_or_honor(t))
            }
            Yaku::Iipeikou => st.identical_run_pairs() == 1,
            Yaku::Haku => st.has_koutsu_of(HAKU),
            Yaku::Hatsu => st.has_koutsu_of(HAKU + 1),
            Yaku::Chun => st.has_koutsu_of(HAKU + 2),
            Yaku::Bakaze => st.has_koutsu_of(st.bakaze),
            Yaku::Jikaze => st.has_koutsu_of(st.jikaze),
            Yaku::Haitei => st.flags.last_tile && st.is_tsumo,
            Yaku::Houtei => st.flags.last_tile && !st.is_tsumo,
            Yaku::Rinshan => st.flags.after_kan && st.is_tsumo,
            Yaku::Chankan => st.flags.after_kan && !st.is_tsumo,
            Yaku::SanshokuDoujun => {
                let runs = st.run_starts();
                (0..7).any(|n| {
                    runs.contains(&n) && runs.contains(&(n + 9)) && runs.contains(&(n + 18))
                })
            }
            Yaku::Ittsuu => {
                let runs = st.run_starts();
                (0..3).any(|s| {
                    let base = s * 9;
                    runs.contains(&base) && runs.contains(&(base + 3)) && runs.contains(&(base + 6))
                })
            }
            Yaku::Chanta => {
                !st.run_starts().is_empty() && st.uses_honors() && st.all_groups_outside(true)
            }
            Yaku::Chiitoitsu => matches!(st.shape, HandShape::SevenPairs(_)),
            Yaku::Toitoi => {
                matches!(st.shape, HandShape::Standard(div)
                    if div.body.iter().all(|m| matches!(m, Mentsu::Koutsu(_))))
                    && st.melds.iter().all(|m| m.is_set_of_kind())
            }
            Yaku::Sanankou => st.ankou_count() >= 3,
            Yaku::SanshokuDoukou => (0..9).any(|n| {
                st.has_koutsu_of(n) && st.has_koutsu_of(n + 9) && st.has_koutsu_of(n + 18)
            }),
            Yaku::Sankantsu => st.quad_count() >= 3,
            Yaku::Honroutou => st.all_tiles(is_terminal_or_honor),
            Yaku::Shousangen => {
                st.dragon_koutsu_count() == 2 && st.head().is_some_and(|h| h >= HAKU)
            }
            Yaku::Honitsu => st.number_suits_used() <= 1 && st.uses_honors(),
            Yaku::Junchan => !st.run_starts().is_empty() && st.all_groups_outside(false),
            Yaku::Ryanpeikou => st.identical_run_pairs() == 2,
            Yaku::Chinitsu => st.single_suit().is_some() && !st.uses_honors(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct YakuSummary {
    pub yakuman: u8,
    pub han: u32,
    pub yaku: Vec<(String, u32)>,
}

impl YakuSummary {
    pub fn fired(&self, name: &str) -> bool {
        self.yaku.iter().any(|(n, _)| n == name)
    }
}

/// Runs the rule table against one decomposition. Once a limit hand fires,
/// regular rules are skipped; further limit hands still stack.
pub fn evaluate(st: &RuleState, rule: &RuleConfig) -> YakuSummary {
    let mut out = YakuSummary::default();
    for y in YAKU_TABLE {
        let name = y.name();
        if rule.is_disabled(name) {
            continue;
        }
        if y.is_local() && !rule.is_local_enabled(name) {
            continue;
        }
        if out.yakuman > 0 && y.yakuman() == 0 {
            break;
        }
        if y.is_menzen_only() && !st.is_menzen {
            continue;
        }
        if !y.check(st) {
            continue;
        }
        if y.yakuman() > 0 {
            let n = if rule.allow_double_yakuman {
                y.yakuman()
            } else {
                1
            };
            out.yakuman += n;
            out.yaku.push((name.to_string(), 13 * n as u32));
        } else {
            let mut han = y.han();
            if y.is_furo_minus() && !st.is_menzen {
                han -= 1;
            }
            out.han += han;
            out.yaku.push((name.to_string(), han));
        }
    }
    out
}
