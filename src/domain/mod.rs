//! Domain logic for sale price derivation lives here.

pub mod app_state;
pub mod capital;
pub mod entities;
pub mod pricing;
pub mod sensitivity;

#[allow(unused_imports)]
pub use app_state::{AppState, PersistedState, Scenario};
#[allow(unused_imports)]
pub use capital::{minimum_acceptable_interest, CapitalError, InterestSchedule, InterestStep};
#[allow(unused_imports)]
pub use entities::{
    CalculatorDefaults, MarginBasis, PricingParams, Quote, SaleMode, SelicRate, TaxComponent,
    ANNUAL_MONTHS, EFFECTIVE_TAX_RATE, TAX_COMPONENTS,
};
#[allow(unused_imports)]
pub use pricing::{quote_sale_price, PricingError};
#[allow(unused_imports)]
pub use sensitivity::{
    interest_profit_grid, profit_sweep, ProfitVariation, SensitivityGrid,
};
