use std::time::SystemTime;

use serde::{Deserialize, Serialize};
use time::Date;

/// Months in the annualised sale cycle.
pub const ANNUAL_MONTHS: u32 = 12;

/// Effective tax load on gross revenue (Lucro Presumido, serviços/SP).
/// The component rates live in [`TAX_COMPONENTS`].
pub const EFFECTIVE_TAX_RATE: f64 = 0.1743;

/// How the sale is billed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SaleMode {
    #[default]
    Annual,
    Monthly,
}

impl SaleMode {
    pub fn label(&self) -> &'static str {
        match self {
            SaleMode::Annual => "Anual",
            SaleMode::Monthly => "Mensal",
        }
    }

    pub const ALL: [SaleMode; 2] = [SaleMode::Annual, SaleMode::Monthly];
}

/// Which side of the deal the profit rate is applied to.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum MarginBasis {
    /// Profit computed over the purchase cost.
    #[default]
    OnPurchase,
    /// Profit carved out of the sale price itself.
    OnSale,
}

impl MarginBasis {
    pub fn label(&self) -> &'static str {
        match self {
            MarginBasis::OnPurchase => "Aplicado na compra",
            MarginBasis::OnSale => "Aplicado na venda",
        }
    }

    pub const ALL: [MarginBasis; 2] = [MarginBasis::OnPurchase, MarginBasis::OnSale];
}

/// Inputs for one quote. Rates are decimal fractions (0.20 == 20%),
/// never percent points.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PricingParams {
    pub sale_mode: SaleMode,
    pub margin_basis: MarginBasis,
    pub purchase_price: f64,
    pub tax_rate: f64,
    pub profit_rate: f64,
    pub interest_rate: f64,
}

/// A computed sale price with the intermediate values the UI walks through.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Quote {
    pub sale_mode: SaleMode,
    pub margin_basis: MarginBasis,
    /// Price per billing period: the annual price, or one twelfth of it for
    /// [`SaleMode::Monthly`].
    pub sale_price: f64,
    /// Full-cycle price the taxes and margin are computed against.
    pub annual_sale_price: f64,
    /// Gross margin after taxes, interest and cost (margem bruta).
    pub net_profit: f64,
    /// Taxes owed on the annual price.
    pub taxes: f64,
    /// Cost of capital charged in the monthly modes, zero otherwise.
    pub interest_cost: f64,
    /// `1 / (1 - tax_rate)`.
    pub net_multiplier: f64,
    /// `1 - profit_rate - tax_rate`, only meaningful for [`MarginBasis::OnSale`].
    pub sale_denominator: Option<f64>,
}

/// One line of the fixed effective-tax breakdown.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TaxComponent {
    pub name: &'static str,
    pub rate_pct: f64,
    pub description: &'static str,
}

/// Components behind [`EFFECTIVE_TAX_RATE`]. They sum to 17.43%.
pub const TAX_COMPONENTS: [TaxComponent; 6] = [
    TaxComponent {
        name: "PIS",
        rate_pct: 0.65,
        description: "Cumulativo, sobre o faturamento bruto.",
    },
    TaxComponent {
        name: "COFINS",
        rate_pct: 3.00,
        description: "Cumulativo, sobre o faturamento bruto.",
    },
    TaxComponent {
        name: "IRPJ",
        rate_pct: 4.80,
        description: "Lucro Presumido: 15% sobre a base presumida de 32%.",
    },
    TaxComponent {
        name: "Adicional de IRPJ",
        rate_pct: 3.20,
        description: "10% sobre a base presumida, no que exceder R$ 20.000/mês.",
    },
    TaxComponent {
        name: "CSLL",
        rate_pct: 2.88,
        description: "Sobre a base presumida.",
    },
    TaxComponent {
        name: "ISS",
        rate_pct: 2.90,
        description: "SP, software/serviço, sobre o faturamento bruto.",
    },
];

/// A SELIC observation from the Banco Central series.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SelicRate {
    /// Annual rate as a decimal fraction.
    pub annual_rate: f64,
    /// Date the observation refers to, not the fetch date.
    pub reference_date: Date,
    pub fetched_at: SystemTime,
}

impl SelicRate {
    pub fn annual_pct(&self) -> f64 {
        self.annual_rate * 100.0
    }
}

/// User-editable defaults for the calculator form. Stored the way they are
/// typed: percent points, not fractions.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct CalculatorDefaults {
    pub purchase_price: f64,
    pub selic_pct: f64,
    pub profit_pct: f64,
    pub interest_pct: f64,
    pub seller_margin_pct: f64,
}

impl Default for CalculatorDefaults {
    fn default() -> Self {
        Self {
            purchase_price: 100.0,
            selic_pct: 15.0,
            profit_pct: 20.0,
            interest_pct: 12.0,
            seller_margin_pct: 10.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tax_components_sum_to_effective_rate() {
        let total: f64 = TAX_COMPONENTS.iter().map(|c| c.rate_pct).sum();
        assert!((total - EFFECTIVE_TAX_RATE * 100.0).abs() < 1e-9);
    }

    #[test]
    fn mode_labels_are_the_portuguese_ui_strings() {
        assert_eq!(SaleMode::Annual.label(), "Anual");
        assert_eq!(MarginBasis::OnSale.label(), "Aplicado na venda");
    }
}
