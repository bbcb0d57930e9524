use dioxus::prelude::*;

use crate::domain::{MarginBasis, SaleMode, Scenario, ANNUAL_MONTHS};
use crate::ui::theme;
use crate::util::format::{format_brl, format_decimal, format_pct};

/// Walks through the formula that produced the quote, line by line, the way
/// a buyer would want it justified.
#[component]
pub fn QuoteBreakdown(scenario: Scenario) -> Element {
    let lines = breakdown_lines(&scenario);

    rsx! {
        div {
            class: "{theme::panel_border()}",
            header {
                class: "border-b border-slate-800 px-4 py-3",
                h3 { class: "text-sm font-semibold text-slate-200", "Memória de cálculo" }
            }
            ul {
                class: "{theme::table_divider()} px-4",
                for (label, detail) in lines {
                    li {
                        class: "py-3",
                        p { class: "text-xs font-semibold uppercase tracking-wide {theme::text_muted()}", "{label}" }
                        p { class: "mt-1 text-sm text-slate-300", "{detail}" }
                    }
                }
            }
        }
    }
}

fn breakdown_lines(scenario: &Scenario) -> Vec<(String, String)> {
    let quote = &scenario.quote;
    let params = &scenario.params;
    let mut lines = Vec::new();

    if let Some(denominator) = quote.sale_denominator {
        lines.push((
            "Denominador de venda".to_string(),
            format!(
                "100% − {} − {} = {}",
                format_pct(params.profit_rate),
                format_pct(params.tax_rate),
                format_pct(denominator)
            ),
        ));
    }

    let uses_multiplier = params.margin_basis == MarginBasis::OnPurchase
        || params.sale_mode == SaleMode::Monthly;
    if uses_multiplier {
        lines.push((
            "Multiplicador líquido".to_string(),
            format!(
                "1 ÷ (100% − {}) = {}",
                format_pct(params.tax_rate),
                format_decimal(quote.net_multiplier, 5)
            ),
        ));
    }

    let annual_label = match params.sale_mode {
        SaleMode::Annual => "Preço de venda",
        SaleMode::Monthly => "Preço de venda anual",
    };
    let annual_formula = match (params.sale_mode, params.margin_basis) {
        (SaleMode::Annual, MarginBasis::OnPurchase) => format!(
            "{} × {} × (100% + {}) = {}",
            format_brl(params.purchase_price),
            format_decimal(quote.net_multiplier, 5),
            format_pct(params.profit_rate),
            format_brl(quote.annual_sale_price)
        ),
        (SaleMode::Annual, MarginBasis::OnSale) => format!(
            "{} ÷ {} = {}",
            format_brl(params.purchase_price),
            format_decimal(quote.sale_denominator.unwrap_or_default(), 4),
            format_brl(quote.annual_sale_price)
        ),
        (SaleMode::Monthly, MarginBasis::OnPurchase) => format!(
            "{} × {} × (100% + {} + {}) = {}",
            format_brl(params.purchase_price),
            format_decimal(quote.net_multiplier, 5),
            format_pct(params.profit_rate),
            format_pct(params.interest_rate),
            format_brl(quote.annual_sale_price)
        ),
        (SaleMode::Monthly, MarginBasis::OnSale) => format!(
            "({} ÷ {}) + ({} × {} × {}) = {}",
            format_brl(params.purchase_price),
            format_decimal(quote.sale_denominator.unwrap_or_default(), 4),
            format_brl(params.purchase_price),
            format_pct(params.interest_rate),
            format_decimal(quote.net_multiplier, 5),
            format_brl(quote.annual_sale_price)
        ),
    };
    lines.push((annual_label.to_string(), annual_formula));

    if params.sale_mode == SaleMode::Monthly {
        lines.push((
            "Preço de venda mensal".to_string(),
            format!(
                "{} ÷ {ANNUAL_MONTHS} = {}",
                format_brl(quote.annual_sale_price),
                format_brl(quote.sale_price)
            ),
        ));
    }

    lines.push(("💸 Impostos".to_string(), format_brl(quote.taxes)));
    if params.sale_mode == SaleMode::Monthly {
        lines.push(("🏦 Juros".to_string(), format_brl(quote.interest_cost)));
    }
    lines.push(("💰 Margem bruta".to_string(), format_brl(quote.net_profit)));

    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{quote_sale_price, PricingParams, EFFECTIVE_TAX_RATE};

    fn scenario(sale_mode: SaleMode, margin_basis: MarginBasis) -> Scenario {
        let params = PricingParams {
            sale_mode,
            margin_basis,
            purchase_price: 100.0,
            tax_rate: EFFECTIVE_TAX_RATE,
            profit_rate: 0.20,
            interest_rate: 0.12,
        };
        Scenario {
            params,
            selic_rate: 0.15,
            seller_margin: 0.10,
            quote: quote_sale_price(&params).unwrap(),
        }
    }

    #[test]
    fn annual_on_purchase_walks_four_lines() {
        let lines = breakdown_lines(&scenario(SaleMode::Annual, MarginBasis::OnPurchase));
        assert_eq!(lines.len(), 4);
        assert!(lines[0].1.contains("17,43%"));
        assert!(lines[1].1.ends_with("R$ 145,33"));
    }

    #[test]
    fn monthly_on_sale_includes_denominator_and_interest() {
        let lines = breakdown_lines(&scenario(SaleMode::Monthly, MarginBasis::OnSale));
        let labels: Vec<_> = lines.iter().map(|(label, _)| label.as_str()).collect();
        assert!(labels.contains(&"Denominador de venda"));
        assert!(labels.contains(&"Multiplicador líquido"));
        assert!(labels.contains(&"Preço de venda mensal"));
        assert!(labels.contains(&"🏦 Juros"));
    }
}
