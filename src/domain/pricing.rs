//! Sale price derivation from cost, margin, tax and interest inputs.

use thiserror::Error;

use super::entities::{MarginBasis, PricingParams, Quote, SaleMode, ANNUAL_MONTHS};

#[derive(Debug, Error, PartialEq)]
pub enum PricingError {
    #[error("o valor da compra deve ser maior que zero")]
    NonPositivePurchasePrice,
    #[error("a taxa de imposto deve estar entre 0% e 100% (exclusivo)")]
    TaxRateOutOfRange,
    #[error("o lucro desejado deve estar entre 0% e 100% (exclusivo)")]
    ProfitRateOutOfRange,
    #[error("a taxa de juros não pode ser negativa")]
    NegativeInterestRate,
    #[error("lucro + imposto chegam a 100% ou mais; o preço de venda não fecha")]
    MarginPlusTaxTooHigh,
}

/// Derives the sale price for the given scenario.
///
/// All four mode/basis combinations price the full annual cycle first; the
/// monthly mode then splits that price over twelve instalments and charges
/// the cost of capital on the financed purchase.
pub fn quote_sale_price(params: &PricingParams) -> Result<Quote, PricingError> {
    validate(params)?;

    let PricingParams {
        sale_mode,
        margin_basis,
        purchase_price,
        tax_rate,
        profit_rate,
        interest_rate,
    } = *params;

    let net_multiplier = 1.0 / (1.0 - tax_rate);

    let (annual_sale_price, sale_denominator) = match margin_basis {
        MarginBasis::OnPurchase => {
            let uplift = match sale_mode {
                SaleMode::Annual => 1.0 + profit_rate,
                SaleMode::Monthly => 1.0 + profit_rate + interest_rate,
            };
            (purchase_price * net_multiplier * uplift, None)
        }
        MarginBasis::OnSale => {
            let denominator = 1.0 - profit_rate - tax_rate;
            if denominator <= 0.0 {
                return Err(PricingError::MarginPlusTaxTooHigh);
            }
            let annual = match sale_mode {
                SaleMode::Annual => purchase_price / denominator,
                SaleMode::Monthly => {
                    purchase_price / denominator
                        + purchase_price * interest_rate * net_multiplier
                }
            };
            (annual, Some(denominator))
        }
    };

    let interest_cost = match sale_mode {
        SaleMode::Annual => 0.0,
        SaleMode::Monthly => purchase_price * interest_rate,
    };

    let taxes = annual_sale_price * tax_rate;
    let net_profit = annual_sale_price - taxes - interest_cost - purchase_price;

    let sale_price = match sale_mode {
        SaleMode::Annual => annual_sale_price,
        SaleMode::Monthly => annual_sale_price / ANNUAL_MONTHS as f64,
    };

    Ok(Quote {
        sale_mode,
        margin_basis,
        sale_price,
        annual_sale_price,
        net_profit,
        taxes,
        interest_cost,
        net_multiplier,
        sale_denominator,
    })
}

fn validate(params: &PricingParams) -> Result<(), PricingError> {
    if !(params.purchase_price > 0.0) {
        return Err(PricingError::NonPositivePurchasePrice);
    }
    if !(0.0..1.0).contains(&params.tax_rate) {
        return Err(PricingError::TaxRateOutOfRange);
    }
    if !(0.0..1.0).contains(&params.profit_rate) {
        return Err(PricingError::ProfitRateOutOfRange);
    }
    if params.interest_rate < 0.0 {
        return Err(PricingError::NegativeInterestRate);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::EFFECTIVE_TAX_RATE;

    fn params(sale_mode: SaleMode, margin_basis: MarginBasis) -> PricingParams {
        PricingParams {
            sale_mode,
            margin_basis,
            purchase_price: 100.0,
            tax_rate: EFFECTIVE_TAX_RATE,
            profit_rate: 0.20,
            interest_rate: 0.12,
        }
    }

    #[test]
    fn annual_on_purchase_matches_the_closed_form() {
        let quote = quote_sale_price(&params(SaleMode::Annual, MarginBasis::OnPurchase)).unwrap();
        let multiplier = 1.0 / (1.0 - EFFECTIVE_TAX_RATE);
        let expected = 100.0 * multiplier * 1.20;
        assert!((quote.sale_price - expected).abs() < 1e-9);
        assert!((quote.net_profit - (expected - expected * EFFECTIVE_TAX_RATE - 100.0)).abs() < 1e-9);
        assert_eq!(quote.interest_cost, 0.0);
        assert!(quote.sale_denominator.is_none());
    }

    #[test]
    fn annual_on_sale_divides_by_the_remaining_share() {
        let quote = quote_sale_price(&params(SaleMode::Annual, MarginBasis::OnSale)).unwrap();
        let denominator = 1.0 - 0.20 - EFFECTIVE_TAX_RATE;
        assert!((quote.sale_price - 100.0 / denominator).abs() < 1e-9);
        assert_eq!(quote.sale_denominator, Some(denominator));
        // Carving the margin out of the sale side always prices higher.
        let on_purchase =
            quote_sale_price(&params(SaleMode::Annual, MarginBasis::OnPurchase)).unwrap();
        assert!(quote.sale_price > on_purchase.sale_price);
    }

    #[test]
    fn monthly_on_purchase_splits_the_annual_price_in_twelve() {
        let quote = quote_sale_price(&params(SaleMode::Monthly, MarginBasis::OnPurchase)).unwrap();
        let multiplier = 1.0 / (1.0 - EFFECTIVE_TAX_RATE);
        let annual = 100.0 * multiplier * (1.0 + 0.20 + 0.12);
        assert!((quote.annual_sale_price - annual).abs() < 1e-9);
        assert!((quote.sale_price - annual / 12.0).abs() < 1e-9);
        assert!((quote.interest_cost - 12.0).abs() < 1e-9);
        let expected_profit = annual - annual * EFFECTIVE_TAX_RATE - 12.0 - 100.0;
        assert!((quote.net_profit - expected_profit).abs() < 1e-9);
    }

    #[test]
    fn monthly_on_sale_adds_grossed_up_interest() {
        let quote = quote_sale_price(&params(SaleMode::Monthly, MarginBasis::OnSale)).unwrap();
        let multiplier = 1.0 / (1.0 - EFFECTIVE_TAX_RATE);
        let denominator = 1.0 - 0.20 - EFFECTIVE_TAX_RATE;
        let annual = 100.0 / denominator + 100.0 * 0.12 * multiplier;
        assert!((quote.annual_sale_price - annual).abs() < 1e-9);
        assert!((quote.sale_price - annual / 12.0).abs() < 1e-9);
    }

    #[test]
    fn zero_rates_quote_the_purchase_price_back() {
        let quote = quote_sale_price(&PricingParams {
            sale_mode: SaleMode::Annual,
            margin_basis: MarginBasis::OnPurchase,
            purchase_price: 250.0,
            tax_rate: 0.0,
            profit_rate: 0.0,
            interest_rate: 0.0,
        })
        .unwrap();
        assert_eq!(quote.sale_price, 250.0);
        assert_eq!(quote.net_profit, 0.0);
        assert_eq!(quote.taxes, 0.0);
    }

    #[test]
    fn annual_price_never_drops_below_cost() {
        for &tax in &[0.0, 0.10, EFFECTIVE_TAX_RATE, 0.40] {
            for &profit in &[0.0, 0.05, 0.20, 0.50] {
                for &basis in &MarginBasis::ALL {
                    let result = quote_sale_price(&PricingParams {
                        sale_mode: SaleMode::Annual,
                        margin_basis: basis,
                        purchase_price: 100.0,
                        tax_rate: tax,
                        profit_rate: profit,
                        interest_rate: 0.0,
                    });
                    if let Ok(quote) = result {
                        assert!(
                            quote.annual_sale_price >= 100.0,
                            "price {} below cost for tax {tax} profit {profit} {basis:?}",
                            quote.annual_sale_price
                        );
                    }
                }
            }
        }
    }

    #[test]
    fn price_grows_with_the_profit_rate() {
        let mut low = params(SaleMode::Annual, MarginBasis::OnPurchase);
        low.profit_rate = 0.10;
        let mut high = low;
        high.profit_rate = 0.20;
        assert!(
            quote_sale_price(&high).unwrap().sale_price > quote_sale_price(&low).unwrap().sale_price
        );
    }

    #[test]
    fn monthly_price_grows_with_the_interest_rate() {
        let mut low = params(SaleMode::Monthly, MarginBasis::OnPurchase);
        low.interest_rate = 0.10;
        let mut high = low;
        high.interest_rate = 0.12;
        assert!(
            quote_sale_price(&high).unwrap().sale_price > quote_sale_price(&low).unwrap().sale_price
        );
    }

    #[test]
    fn rejects_non_positive_purchase_price() {
        for price in [0.0, -100.0] {
            let mut p = params(SaleMode::Annual, MarginBasis::OnPurchase);
            p.purchase_price = price;
            assert_eq!(
                quote_sale_price(&p),
                Err(PricingError::NonPositivePurchasePrice)
            );
        }
    }

    #[test]
    fn rejects_rates_outside_their_ranges() {
        let mut p = params(SaleMode::Annual, MarginBasis::OnPurchase);
        p.tax_rate = 1.0;
        assert_eq!(quote_sale_price(&p), Err(PricingError::TaxRateOutOfRange));

        let mut p = params(SaleMode::Annual, MarginBasis::OnPurchase);
        p.tax_rate = -0.1;
        assert_eq!(quote_sale_price(&p), Err(PricingError::TaxRateOutOfRange));

        let mut p = params(SaleMode::Annual, MarginBasis::OnPurchase);
        p.profit_rate = 1.5;
        assert_eq!(quote_sale_price(&p), Err(PricingError::ProfitRateOutOfRange));

        let mut p = params(SaleMode::Annual, MarginBasis::OnPurchase);
        p.interest_rate = -0.12;
        assert_eq!(quote_sale_price(&p), Err(PricingError::NegativeInterestRate));
    }

    #[test]
    fn rejects_margin_plus_tax_reaching_one() {
        let mut p = params(SaleMode::Annual, MarginBasis::OnSale);
        p.profit_rate = 0.85;
        assert_eq!(quote_sale_price(&p), Err(PricingError::MarginPlusTaxTooHigh));

        let mut p = params(SaleMode::Monthly, MarginBasis::OnSale);
        p.profit_rate = 0.90;
        assert_eq!(quote_sale_price(&p), Err(PricingError::MarginPlusTaxTooHigh));
    }
}
