//! Sale price recomputed over a ± range of profit and interest rates.

use super::entities::{PricingParams, SaleMode};
use super::pricing::quote_sale_price;

/// One profit-rate variation of an annual scenario.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ProfitVariation {
    pub profit_pct: i32,
    pub sale_price: f64,
}

/// Sale prices for the profit rate swept over `base ± delta` whole percent
/// points. Combinations that fail validation are skipped.
pub fn profit_sweep(params: &PricingParams, delta_pct: u32) -> Vec<ProfitVariation> {
    let base_pct = (params.profit_rate * 100.0).round() as i32;
    let delta = delta_pct as i32;

    (base_pct - delta..=base_pct + delta)
        .filter_map(|candidate_pct| {
            let candidate = PricingParams {
                profit_rate: candidate_pct as f64 / 100.0,
                ..*params
            };
            quote_sale_price(&candidate).ok().map(|quote| ProfitVariation {
                profit_pct: candidate_pct,
                sale_price: quote.sale_price,
            })
        })
        .collect()
}

/// Profit × interest grid for a monthly scenario. `None` cells are
/// combinations the pricing formula rejects.
#[derive(Clone, Debug, PartialEq)]
pub struct SensitivityGrid {
    /// Row axis, whole percent points of profit.
    pub profit_pcts: Vec<i32>,
    /// Column axis, whole percent points of interest.
    pub interest_pcts: Vec<i32>,
    /// `cells[row][col]` is the sale price for `(profit_pcts[row], interest_pcts[col])`.
    pub cells: Vec<Vec<Option<f64>>>,
}

impl SensitivityGrid {
    /// Cell indices of the scenario the grid was built around.
    pub fn center(&self) -> (usize, usize) {
        (self.profit_pcts.len() / 2, self.interest_pcts.len() / 2)
    }

    /// Smallest and largest price in the grid, for colour scaling.
    pub fn price_bounds(&self) -> Option<(f64, f64)> {
        let mut bounds: Option<(f64, f64)> = None;
        for price in self.cells.iter().flatten().flatten() {
            bounds = Some(match bounds {
                Some((min, max)) => (min.min(*price), max.max(*price)),
                None => (*price, *price),
            });
        }
        bounds
    }
}

/// Builds the monthly sensitivity grid around the given scenario.
///
/// The sale mode is forced to monthly; interest only moves the price there.
pub fn interest_profit_grid(
    params: &PricingParams,
    profit_delta_pct: u32,
    interest_delta_pct: u32,
) -> SensitivityGrid {
    let base = PricingParams {
        sale_mode: SaleMode::Monthly,
        ..*params
    };

    let profit_base = (base.profit_rate * 100.0).round() as i32;
    let interest_base = (base.interest_rate * 100.0).round() as i32;

    let profit_pcts: Vec<i32> =
        (profit_base - profit_delta_pct as i32..=profit_base + profit_delta_pct as i32).collect();
    let interest_pcts: Vec<i32> = (interest_base - interest_delta_pct as i32
        ..=interest_base + interest_delta_pct as i32)
        .collect();

    let cells = profit_pcts
        .iter()
        .map(|&profit_pct| {
            interest_pcts
                .iter()
                .map(|&interest_pct| {
                    let candidate = PricingParams {
                        profit_rate: profit_pct as f64 / 100.0,
                        interest_rate: interest_pct as f64 / 100.0,
                        ..base
                    };
                    quote_sale_price(&candidate).ok().map(|quote| quote.sale_price)
                })
                .collect()
        })
        .collect();

    SensitivityGrid {
        profit_pcts,
        interest_pcts,
        cells,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::{MarginBasis, EFFECTIVE_TAX_RATE};

    fn base_params() -> PricingParams {
        PricingParams {
            sale_mode: SaleMode::Annual,
            margin_basis: MarginBasis::OnPurchase,
            purchase_price: 100.0,
            tax_rate: EFFECTIVE_TAX_RATE,
            profit_rate: 0.20,
            interest_rate: 0.12,
        }
    }

    #[test]
    fn profit_sweep_covers_the_full_range() {
        let rows = profit_sweep(&base_params(), 3);
        assert_eq!(rows.len(), 7);
        assert_eq!(rows.first().unwrap().profit_pct, 17);
        assert_eq!(rows.last().unwrap().profit_pct, 23);
        for pair in rows.windows(2) {
            assert!(pair[1].sale_price > pair[0].sale_price);
        }
    }

    #[test]
    fn profit_sweep_skips_negative_candidates() {
        let mut params = base_params();
        params.profit_rate = 0.01;
        let rows = profit_sweep(&params, 3);
        // -2%..=4%, of which -2% and -1% fail validation.
        assert_eq!(rows.len(), 5);
        assert_eq!(rows.first().unwrap().profit_pct, 0);
    }

    #[test]
    fn grid_has_the_requested_dimensions() {
        let grid = interest_profit_grid(&base_params(), 3, 2);
        assert_eq!(grid.profit_pcts.len(), 7);
        assert_eq!(grid.interest_pcts.len(), 5);
        assert_eq!(grid.cells.len(), 7);
        assert!(grid.cells.iter().all(|row| row.len() == 5));
    }

    #[test]
    fn grid_center_points_at_the_base_scenario() {
        let grid = interest_profit_grid(&base_params(), 3, 3);
        let (row, col) = grid.center();
        assert_eq!(grid.profit_pcts[row], 20);
        assert_eq!(grid.interest_pcts[col], 12);
        assert!(grid.cells[row][col].is_some());
    }

    #[test]
    fn invalid_combinations_become_empty_cells() {
        let mut params = base_params();
        params.margin_basis = MarginBasis::OnSale;
        params.profit_rate = 0.81; // 81% + 17.43% tax: barely under one
        let grid = interest_profit_grid(&params, 3, 1);
        // Rows above 82% profit break the sale denominator.
        assert!(grid.cells.first().unwrap().iter().all(|c| c.is_some()));
        assert!(grid.cells.last().unwrap().iter().all(|c| c.is_none()));
    }

    #[test]
    fn price_bounds_span_the_grid() {
        let grid = interest_profit_grid(&base_params(), 2, 2);
        let (min, max) = grid.price_bounds().unwrap();
        assert!(min < max);
        for price in grid.cells.iter().flatten().flatten() {
            assert!(*price >= min && *price <= max);
        }
    }
}
