use serde::{Deserialize, Serialize};

use super::entities::{CalculatorDefaults, PricingParams, Quote, SelicRate};

/// Everything the pages share through the root signal.
#[derive(Clone, Debug, Default)]
pub struct AppState {
    /// Persisted form defaults.
    pub defaults: CalculatorDefaults,
    /// Last SELIC observation fetched from the Banco Central, if any.
    pub selic: Option<SelicRate>,
    /// The last quoted scenario; the analysis page works on this.
    pub scenario: Option<Scenario>,
}

impl AppState {
    pub fn apply_persisted(&mut self, persisted: PersistedState) {
        self.defaults = persisted.defaults;
    }

    pub fn to_persisted(&self) -> PersistedState {
        PersistedState {
            defaults: self.defaults,
        }
    }
}

/// A quoted scenario: the validated inputs plus the resulting quote and the
/// auxiliary rates that do not feed the pricing formula itself.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Scenario {
    pub params: PricingParams,
    /// Annual SELIC as a decimal fraction; drives the capital-cost schedule.
    pub selic_rate: f64,
    /// Seller's cut of the gross margin, decimal fraction.
    pub seller_margin: f64,
    pub quote: Quote,
}

impl Scenario {
    /// The seller's share of the gross margin.
    pub fn seller_cut(&self) -> f64 {
        self.quote.net_profit * self.seller_margin
    }
}

#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize)]
pub struct PersistedState {
    #[serde(default)]
    pub defaults: CalculatorDefaults,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn persisted_round_trip_keeps_the_defaults() {
        let mut state = AppState::default();
        state.defaults.profit_pct = 35.0;

        let restored = {
            let json = serde_json::to_string(&state.to_persisted()).unwrap();
            serde_json::from_str::<PersistedState>(&json).unwrap()
        };

        let mut fresh = AppState::default();
        fresh.apply_persisted(restored);
        assert_eq!(fresh.defaults.profit_pct, 35.0);
    }

    #[test]
    fn missing_fields_fall_back_to_defaults() {
        let restored: PersistedState = serde_json::from_str("{}").unwrap();
        assert_eq!(restored.defaults, CalculatorDefaults::default());
    }
}
