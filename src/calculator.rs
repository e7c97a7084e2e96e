use pyo3::prelude::*;

use crate::agari::{find_decompositions, HandShape};
use crate::dora::count_dora;
use crate::fu::{calc_fu, FiredOverrides, FuInput};
use crate::parser::parse_hand_internal;
use crate::rule::RuleConfig;
use crate::score::calc_points;
use crate::shanten::{hairi, Hairi};
use crate::types::{is_proper_set, Conditions, Hand, Meld, EAST, TILE_MAX};
use crate::wait::classify;
use crate::yaku::{evaluate, RuleState};

/// Outcome of one scoring request. A plain value: results of different
/// decompositions are compared and the best one is cloned out, nothing
/// aliases the calculator's state.
#[pyclass]
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScoreResult {
    #[pyo3(get)]
    pub is_agari: bool,
    /// Malformed input. All other fields are zeroed.
    #[pyo3(get)]
    pub error: bool,
    #[pyo3(get)]
    pub yakuman: u8,
    /// Fired rule names with their han values.
    #[pyo3(get)]
    pub yaku: Vec<(String, u32)>,
    #[pyo3(get)]
    pub han: u32,
    #[pyo3(get)]
    pub fu: u32,
    #[pyo3(get)]
    pub fu_reasons: Vec<(String, u32)>,
    #[pyo3(get)]
    pub ten: u32,
    #[pyo3(get)]
    pub ten_tsumo: Vec<u32>,
    /// Limit-hand name, empty below the limits.
    #[pyo3(get)]
    pub name: String,
    #[pyo3(get)]
    pub text: String,
    /// Acceptance hints for non-winning hands.
    #[pyo3(get)]
    pub hairi: Option<Hairi>,
    #[pyo3(get)]
    pub hairi_chiitoi_kokushi: Option<Hairi>,
}

#[pymethods]
impl ScoreResult {
    fn __repr__(&self) -> String {
        if self.error {
            return "ScoreResult(error)".to_string();
        }
        if !self.is_agari {
            return "ScoreResult(not agari)".to_string();
        }
        format!(
            "ScoreResult(han={}, fu={}, ten={}, yaku={:?})",
            self.han, self.fu, self.ten, self.yaku
        )
    }
}

impl ScoreResult {
    /// Strictly better in the (ten, han, fu) order.
    fn beats(&self, other: &ScoreResult) -> bool {
        self.ten > other.ten
            || (self.ten == other.ten && self.han > other.han)
            || (self.ten == other.ten && self.han == other.han && self.fu > other.fu)
    }
}

/// Scores one winning (or near-winning) hand under a rule configuration.
///
/// `closed` holds the concealed tiles including the winning tile. A ron is
/// marked by passing the winning tile explicitly; on a self-draw the last
/// tile of `closed` is the draw. Declared groups that do not form a proper
/// set are dissolved back into the concealed pool rather than corrected.
#[pyclass]
pub struct ScoreCalculator {
    hand: Hand,
    melds: Vec<Meld>,
    win_tile: u8,
    is_tsumo: bool,
    dora: Vec<u8>,
    aka: u8,
    flags: Conditions,
    rule: RuleConfig,
    error: bool,
}

#[pymethods]
impl ScoreCalculator {
    #[new]
    #[pyo3(signature = (closed, melds=Vec::new(), win_tile=None, dora=Vec::new(), aka=0, conditions=None, rule=None))]
    pub fn new(
        closed: Vec<u8>,
        melds: Vec<Meld>,
        win_tile: Option<u8>,
        dora: Vec<u8>,
        aka: u8,
        conditions: Option<Conditions>,
        rule: Option<RuleConfig>,
    ) -> Self {
        let mut closed = closed;
        // the draw is the last tile as given; dissolved meld tiles appended
        // below must not displace it
        let last_draw = closed.last().copied();
        let mut kept: Vec<Meld> = Vec::new();
        for m in melds {
            let mut tiles = m.tiles.clone();
            tiles.sort_unstable();
            if is_proper_set(&tiles) {
                kept.push(Meld::new(tiles, m.open));
            } else {
                closed.extend(m.tiles);
            }
        }

        let mut error = closed.is_empty()
            || closed.len() % 3 == 0
            || closed.len() + kept.len() * 3 > 14
            || closed.iter().any(|&t| t as usize >= TILE_MAX);
        let is_tsumo = win_tile.is_none();
        let win_tile = match win_tile {
            Some(t) => {
                if t as usize >= TILE_MAX || !closed.contains(&t) {
                    error = true;
                }
                t
            }
            None => match last_draw {
                Some(t) => t,
                None => {
                    error = true;
                    0
                }
            },
        };

        Self {
            hand: Hand::new(&closed),
            melds: kept,
            win_tile,
            is_tsumo,
            dora,
            aka,
            flags: conditions.unwrap_or_default(),
            rule: rule.unwrap_or_default(),
            error,
        }
    }

    /// Builds a calculator from hand notation, counting red fives from the
    /// text itself.
    #[staticmethod]
    #[pyo3(signature = (text, win_tile=None, dora=Vec::new(), conditions=None, rule=None))]
    pub fn from_text(
        text: &str,
        win_tile: Option<u8>,
        dora: Vec<u8>,
        conditions: Option<Conditions>,
        rule: Option<RuleConfig>,
    ) -> PyResult<Self> {
        let (closed, aka, melds) = parse_hand_internal(text)
            .map_err(pyo3::exceptions::PyValueError::new_err)?;
        Ok(Self::new(closed, melds, win_tile, dora, aka, conditions, rule))
    }

    pub fn calc(&self) -> ScoreResult {
        self.calc_impl()
    }
}

impl ScoreCalculator {
    fn is_menzen(&self) -> bool {
        self.melds.iter().all(|m| m.is_quad() && !m.open)
    }

    fn all_counts(&self) -> [u8; TILE_MAX] {
        let mut all = self.hand.counts;
        for m in &self.melds {
            for &t in &m.tiles {
                if (t as usize) < TILE_MAX {
                    all[t as usize] += 1;
                }
            }
        }
        all
    }

    fn calc_impl(&self) -> ScoreResult {
        if self.error {
            return ScoreResult {
                error: true,
                ..ScoreResult::default()
            };
        }

        let shapes = self.complete_shapes();
        if shapes.is_empty() {
            return self.incomplete_result();
        }

        let mut best: Option<ScoreResult> = None;
        for shape in &shapes {
            let candidate = self.score_shape(shape);
            if best.as_ref().map_or(true, |b| candidate.beats(b)) {
                best = Some(candidate);
            }
        }
        let mut result = best.unwrap_or_default();
        if result.ten == 0 {
            result.text = "no yaku".to_string();
        }
        result
    }

    /// Decompositions whose set count matches the declared melds.
    fn complete_shapes(&self) -> Vec<HandShape> {
        let needed = 4 - self.melds.len();
        find_decompositions(&self.hand)
            .into_iter()
            .filter(|s| match s {
                HandShape::Standard(div) => div.body.len() == needed,
                HandShape::SevenPairs(_) | HandShape::ThirteenOrphans => self.melds.is_empty(),
            })
            .collect()
    }

    fn score_shape(&self, shape: &HandShape) -> ScoreResult {
        let all_counts = self.all_counts();
        let is_menzen = self.is_menzen();
        let bakaze = self.flags.bakaze.tile();
        let jikaze = self.flags.jikaze.tile();
        let wait = classify(shape, self.win_tile);

        let st = RuleState {
            shape,
            melds: &self.melds,
            all_counts: &all_counts,
            closed_counts: &self.hand.counts,
            win_tile: self.win_tile,
            is_tsumo: self.is_tsumo,
            is_menzen,
            bakaze,
            jikaze,
            flags: &self.flags,
            wait,
            allow_kuitan: self.rule.allow_kuitan,
        };
        let summary = evaluate(&st, &self.rule);

        let mut yaku = summary.yaku.clone();
        let mut han = summary.han;
        if summary.yakuman == 0 && han > 0 {
            let dora = count_dora(&self.hand.counts, &self.melds, &self.dora);
            if dora > 0 {
                yaku.push(("dora".to_string(), dora));
                han += dora;
            }
            if self.rule.allow_aka && self.aka > 0 {
                yaku.push(("akadora".to_string(), self.aka as u32));
                han += self.aka as u32;
            }
        }

        let fired = FiredOverrides {
            chiitoitsu: summary.fired("chiitoitsu"),
            kokushi: summary.fired("kokushimusou") || summary.fired("kokushimusou 13 sides"),
            pinfu: summary.fired("pinfu"),
        };
        let (fu, fu_reasons) = calc_fu(&FuInput {
            shape,
            melds: &self.melds,
            win_tile: self.win_tile,
            is_tsumo: self.is_tsumo,
            is_menzen,
            bakaze,
            jikaze,
            wait,
            fired,
        });

        let points = calc_points(
            han,
            fu,
            summary.yakuman,
            jikaze == EAST,
            self.is_tsumo,
            self.rule.with_kiriage,
        );

        let text = if points.ten == 0 {
            String::new()
        } else if points.name.is_empty() {
            format!("{} han {} fu {}", han, fu, points.ten)
        } else {
            format!("{} {}", points.name, points.ten)
        };

        ScoreResult {
            is_agari: true,
            error: false,
            yakuman: summary.yakuman,
            yaku,
            han,
            fu,
            fu_reasons: fu_reasons
                .iter()
                .map(|r| (r.label().to_string(), r.score()))
                .collect(),
            ten: points.ten,
            ten_tsumo: points.ten_tsumo,
            name: points.name,
            text,
            hairi: None,
            hairi_chiitoi_kokushi: None,
        }
    }

    fn incomplete_result(&self) -> ScoreResult {
        let mut result = ScoreResult::default();
        if self.rule.compute_hairi {
            let declared = self.melds.len() as u8;
            result.hairi = Some(hairi(&self.hand.counts, declared, false));
            if self.melds.is_empty() {
                result.hairi_chiitoi_kokushi = Some(hairi(&self.hand.counts, 0, true));
            }
        }
        result
    }
}
