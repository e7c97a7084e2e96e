use pyo3::prelude::*;

pub mod agari;
pub mod calculator;
pub mod dora;
pub mod fu;
pub mod parser;
pub mod rule;
pub mod score;
pub mod shanten;
pub mod types;
pub mod wait;
pub mod yaku;

#[cfg(test)]
mod tests;

/// Riichi mahjong hand scoring: decomposition, yaku, fu and point transfers.
#[pymodule]
fn _riichi_score(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<types::Wind>()?;
    m.add_class::<types::Meld>()?;
    m.add_class::<types::Conditions>()?;
    m.add_class::<rule::RuleConfig>()?;
    m.add_class::<score::Points>()?;
    m.add_class::<shanten::Hairi>()?;
    m.add_class::<calculator::ScoreResult>()?;
    m.add_class::<calculator::ScoreCalculator>()?;
    m.add_function(wrap_pyfunction!(parser::parse_hand, m)?)?;
    m.add_function(wrap_pyfunction!(parser::parse_tile, m)?)?;
    m.add_function(wrap_pyfunction!(score::calculate_points, m)?)?;
    Ok(())
}
