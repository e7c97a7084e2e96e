use pyo3::prelude::*;
use serde::{Deserialize, Serialize};

/// Scoring rule configuration. All toggles are resolved once at calculation
/// time, the evaluation itself never consults mutable state.
#[pyclass]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RuleConfig {
    /// Pay 26000/13000 x2 for the limit-hand variants that earn it.
    #[pyo3(get, set)]
    pub allow_double_yakuman: bool,
    /// All-simples with an open hand.
    #[pyo3(get, set)]
    pub allow_kuitan: bool,
    /// Count red fives.
    #[pyo3(get, set)]
    pub allow_aka: bool,
    /// Round 4 han 30 fu and 3 han 60 fu up to mangan.
    #[pyo3(get, set)]
    pub with_kiriage: bool,
    /// Attach tile-acceptance hints to non-winning results.
    #[pyo3(get, set)]
    pub compute_hairi: bool,
    /// Enable every local rule at once.
    #[pyo3(get, set)]
    pub all_local_enabled: bool,
    /// Individually enabled local rules, by name.
    #[pyo3(get, set)]
    pub local_enabled: Vec<String>,
    /// Rules excluded from evaluation, by name.
    #[pyo3(get, set)]
    pub disabled: Vec<String>,
}

#[pymethods]
impl RuleConfig {
    #[new]
    #[pyo3(signature = (allow_double_yakuman=true, allow_kuitan=true, allow_aka=true, with_kiriage=false, compute_hairi=true, all_local_enabled=false, local_enabled=Vec::new(), disabled=Vec::new()))]
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        allow_double_yakuman: bool,
        allow_kuitan: bool,
        allow_aka: bool,
        with_kiriage: bool,
        compute_hairi: bool,
        all_local_enabled: bool,
        local_enabled: Vec<String>,
        disabled: Vec<String>,
    ) -> Self {
        Self {
            allow_double_yakuman,
            allow_kuitan,
            allow_aka,
            with_kiriage,
            compute_hairi,
            all_local_enabled,
            local_enabled,
            disabled,
        }
    }

    /// Tenhou-style defaults: double yakuman off, kiriage off.
    #[staticmethod]
    pub fn tenhou() -> Self {
        Self {
            allow_double_yakuman: false,
            ..Self::default()
        }
    }

    /// Mahjong Soul-style defaults: double yakuman and kiriage mangan on.
    #[staticmethod]
    pub fn mjsoul() -> Self {
        Self {
            with_kiriage: true,
            ..Self::default()
        }
    }

    pub fn disable_yaku(&mut self, name: String) {
        if !self.disabled.contains(&name) {
            self.disabled.push(name);
        }
    }

    pub fn enable_local_yaku(&mut self, name: String) {
        if !self.local_enabled.contains(&name) {
            self.local_enabled.push(name);
        }
    }

    fn __repr__(&self) -> String {
        format!(
            "RuleConfig(allow_double_yakuman={}, allow_kuitan={}, allow_aka={}, with_kiriage={}, disabled={:?})",
            self.allow_double_yakuman,
            self.allow_kuitan,
            self.allow_aka,
            self.with_kiriage,
            self.disabled
        )
    }
}

impl RuleConfig {
    pub fn is_disabled(&self, name: &str) -> bool {
        self.disabled.iter().any(|d| d == name)
    }

    pub fn is_local_enabled(&self, name: &str) -> bool {
        self.all_local_enabled || self.local_enabled.iter().any(|d| d == name)
    }
}

impl Default for RuleConfig {
    fn default() -> Self {
        Self::new(true, true, true, false, true, false, Vec::new(), Vec::new())
    }
}
