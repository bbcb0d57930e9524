use dioxus::prelude::*;

use crate::{
    domain::{
        minimum_acceptable_interest, quote_sale_price, AppState, MarginBasis, PricingParams,
        SaleMode, Scenario, ANNUAL_MONTHS, EFFECTIVE_TAX_RATE,
    },
    ui::{
        components::{
            kpi_card::KpiCard,
            pill_group::PillGroup,
            quote_breakdown::QuoteBreakdown,
            toast::{push_toast, ToastKind, ToastMessage},
        },
        theme,
    },
    util::format::{format_brl, format_decimal, format_pct},
};

#[component]
pub fn CalculatorPage() -> Element {
    let state = use_context::<Signal<AppState>>();
    let toasts = use_context::<Signal<Vec<ToastMessage>>>();

    let defaults = state.with(|st| st.defaults);

    let margin_basis = use_signal(MarginBasis::default);
    let sale_mode = use_signal(SaleMode::default);
    let purchase_input = use_signal(move || format!("{:.2}", defaults.purchase_price));
    let mut selic_input = use_signal(move || format!("{:.2}", defaults.selic_pct));
    let profit_input = use_signal(move || format!("{:.2}", defaults.profit_pct));
    let interest_input = use_signal(move || format!("{:.2}", defaults.interest_pct));
    let margin_input = use_signal(move || format!("{:.2}", defaults.seller_margin_pct));

    let selic = state.with(|st| st.selic);
    let scenario = state.with(|st| st.scenario);

    // Live hint: the interest rate that just covers the SELIC over a year.
    let interest_floor_pct = parse_number(&purchase_input()).ok().and_then(|price| {
        parse_number(&selic_input())
            .ok()
            .filter(|pct| *pct >= 0.0)
            .and_then(|pct| minimum_acceptable_interest(price, pct / 100.0, ANNUAL_MONTHS).ok())
    });

    let on_submit = {
        let mut state = state.clone();
        let toasts = toasts.clone();
        let margin_basis = margin_basis.clone();
        let sale_mode = sale_mode.clone();
        let purchase_input = purchase_input.clone();
        let selic_input = selic_input.clone();
        let profit_input = profit_input.clone();
        let interest_input = interest_input.clone();
        let margin_input = margin_input.clone();
        move |evt: FormEvent| {
            evt.prevent_default();

            let form = match parse_form(
                &purchase_input(),
                &selic_input(),
                &profit_input(),
                &interest_input(),
                &margin_input(),
            ) {
                Ok(form) => form,
                Err(message) => {
                    push_toast(toasts.clone(), ToastKind::Error, message);
                    return;
                }
            };

            let params = PricingParams {
                sale_mode: sale_mode(),
                margin_basis: margin_basis(),
                purchase_price: form.purchase_price,
                tax_rate: EFFECTIVE_TAX_RATE,
                profit_rate: form.profit_rate,
                interest_rate: form.interest_rate,
            };

            match quote_sale_price(&params) {
                Ok(quote) => {
                    if params.sale_mode == SaleMode::Monthly {
                        if let Ok(floor_pct) = minimum_acceptable_interest(
                            form.purchase_price,
                            form.selic_rate,
                            ANNUAL_MONTHS,
                        ) {
                            if form.interest_rate * 100.0 < floor_pct {
                                push_toast(
                                    toasts.clone(),
                                    ToastKind::Warning,
                                    format!(
                                        "Taxa de juros abaixo do custo mínimo de capital ({}% a.a.).",
                                        format_decimal(floor_pct, 2)
                                    ),
                                );
                            }
                        }
                    }
                    state.with_mut(|st| {
                        st.scenario = Some(Scenario {
                            params,
                            selic_rate: form.selic_rate,
                            seller_margin: form.seller_margin,
                            quote,
                        });
                    });
                }
                Err(err) => {
                    push_toast(toasts.clone(), ToastKind::Error, format!("Erro no cálculo: {err}"));
                }
            }
        }
    };

    rsx! {
        div { class: "space-y-8",
            form {
                class: "space-y-6 {theme::panel_border()} px-5 py-5",
                onsubmit: on_submit,

                div { class: "grid gap-4 sm:grid-cols-2",
                    PillGroup {
                        legend: "Onde a margem de lucro será aplicada:".to_string(),
                        options: MarginBasis::ALL.iter().map(|b| b.label().to_string()).collect::<Vec<_>>(),
                        selected: MarginBasis::ALL.iter().position(|b| *b == margin_basis()).unwrap_or(0),
                        onselect: {
                            let mut margin_basis = margin_basis.clone();
                            move |index: usize| margin_basis.set(MarginBasis::ALL[index])
                        },
                    }
                    PillGroup {
                        legend: "Modelo de venda:".to_string(),
                        options: SaleMode::ALL.iter().map(|m| m.label().to_string()).collect::<Vec<_>>(),
                        selected: SaleMode::ALL.iter().position(|m| *m == sale_mode()).unwrap_or(0),
                        onselect: {
                            let mut sale_mode = sale_mode.clone();
                            move |index: usize| sale_mode.set(SaleMode::ALL[index])
                        },
                    }
                }

                div {
                    label { class: "{theme::label_class()}", "Valor da compra em R$ (reais)" }
                    input {
                        class: "{theme::input_class()}",
                        inputmode: "decimal",
                        value: purchase_input(),
                        oninput: {
                            let mut purchase_input = purchase_input.clone();
                            move |evt: FormEvent| purchase_input.set(evt.value())
                        },
                        placeholder: "100,00",
                    }
                }

                div { class: "grid gap-4 sm:grid-cols-2 lg:grid-cols-4",
                    div {
                        label { class: "{theme::label_class()}", "Taxa Selic atual (%)" }
                        input {
                            class: "{theme::input_class()}",
                            inputmode: "decimal",
                            value: selic_input(),
                            oninput: {
                                let mut selic_input = selic_input.clone();
                                move |evt: FormEvent| selic_input.set(evt.value())
                            },
                        }
                        if let Some(rate) = selic {
                            button {
                                class: "mt-1 {theme::link_class()}",
                                r#type: "button",
                                onclick: move |_| selic_input.set(format!("{:.2}", rate.annual_pct())),
                                "usar Selic de hoje: {format_decimal(rate.annual_pct(), 2)}%"
                            }
                        }
                    }
                    div {
                        label { class: "{theme::label_class()}", "Lucro desejado (%)" }
                        input {
                            class: "{theme::input_class()}",
                            inputmode: "decimal",
                            value: profit_input(),
                            oninput: {
                                let mut profit_input = profit_input.clone();
                                move |evt: FormEvent| profit_input.set(evt.value())
                            },
                        }
                    }
                    div {
                        label { class: "{theme::label_class()}", "Taxa de juros (%)" }
                        input {
                            class: "{theme::input_class()}",
                            inputmode: "decimal",
                            value: interest_input(),
                            oninput: {
                                let mut interest_input = interest_input.clone();
                                move |evt: FormEvent| interest_input.set(evt.value())
                            },
                        }
                        if let Some(floor) = interest_floor_pct {
                            p { class: "mt-1 text-xs {theme::text_muted()}",
                                "Custo mínimo de capital: {format_decimal(floor, 2)}% a.a."
                            }
                        }
                    }
                    div {
                        label { class: "{theme::label_class()}", "Margem do vendedor (%)" }
                        input {
                            class: "{theme::input_class()}",
                            inputmode: "decimal",
                            value: margin_input(),
                            oninput: {
                                let mut margin_input = margin_input.clone();
                                move |evt: FormEvent| margin_input.set(evt.value())
                            },
                        }
                    }
                }

                div {
                    button {
                        class: "{theme::btn_primary()}",
                        r#type: "submit",
                        "Calcular preço de venda"
                    }
                    span { class: "ml-3 text-xs {theme::text_muted()}",
                        "Imposto efetivo fixo de {format_pct(EFFECTIVE_TAX_RATE)} (Lucro Presumido)."
                    }
                }
            }

            if let Some(scenario) = scenario {
                section { class: "grid gap-4 sm:grid-cols-2",
                    KpiCard {
                        title: format!("💰 Preço de venda {}", scenario.params.sale_mode.label().to_lowercase()),
                        value: format_brl(scenario.quote.sale_price),
                        description: Some(format!(
                            "Margem {}",
                            scenario.params.margin_basis.label().to_lowercase()
                        )),
                    }
                    KpiCard {
                        title: format!("💰 Margem do vendedor ({})", format_pct(scenario.seller_margin)),
                        value: format_brl(scenario.seller_cut()),
                        description: Some(format!(
                            "Sobre a margem bruta de {}",
                            format_brl(scenario.quote.net_profit)
                        )),
                    }
                }
                QuoteBreakdown { scenario }
            } else {
                p { class: "text-sm {theme::text_muted()}",
                    "Preencha os campos e calcule para ver o preço sugerido e a memória de cálculo."
                }
            }
        }
    }
}

/// Parsed and range-checked form values, already as decimal fractions.
struct FormValues {
    purchase_price: f64,
    selic_rate: f64,
    profit_rate: f64,
    interest_rate: f64,
    seller_margin: f64,
}

fn parse_form(
    purchase: &str,
    selic: &str,
    profit: &str,
    interest: &str,
    margin: &str,
) -> Result<FormValues, String> {
    let purchase_price =
        parse_number(purchase).map_err(|_| "O valor da compra deve ser numérico.".to_string())?;
    let selic_pct =
        parse_number(selic).map_err(|_| "A taxa Selic deve ser numérica.".to_string())?;
    if selic_pct < 0.0 {
        return Err("A taxa Selic não pode ser negativa.".to_string());
    }
    let profit_pct =
        parse_number(profit).map_err(|_| "O lucro desejado deve ser numérico.".to_string())?;
    let interest_pct =
        parse_number(interest).map_err(|_| "A taxa de juros deve ser numérica.".to_string())?;
    let margin_pct =
        parse_number(margin).map_err(|_| "A margem do vendedor deve ser numérica.".to_string())?;
    if margin_pct < 0.0 {
        return Err("A margem do vendedor não pode ser negativa.".to_string());
    }

    Ok(FormValues {
        purchase_price,
        selic_rate: selic_pct / 100.0,
        profit_rate: profit_pct / 100.0,
        interest_rate: interest_pct / 100.0,
        seller_margin: margin_pct / 100.0,
    })
}

/// Accepts both `1234.56` and the pt-BR `1.234,56`.
fn parse_number(raw: &str) -> Result<f64, std::num::ParseFloatError> {
    let trimmed = raw.trim();
    let normalized = if trimmed.contains(',') {
        trimmed.replace('.', "").replace(',', ".")
    } else {
        trimmed.to_string()
    };
    normalized.parse()
}

pub fn humanize_age(timestamp: std::time::SystemTime) -> String {
    use std::time::SystemTime;

    let now = SystemTime::now();
    let age = now.duration_since(timestamp).unwrap_or_default().as_secs();
    if age < 60 {
        format!("{age}s atrás")
    } else if age < 3_600 {
        format!("{}m atrás", age / 60)
    } else if age < 86_400 {
        format!("{}h atrás", age / 3_600)
    } else {
        format!("{}d atrás", age / 86_400)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numbers_parse_in_both_locales() {
        assert_eq!(parse_number("1234.56").unwrap(), 1234.56);
        assert_eq!(parse_number("1.234,56").unwrap(), 1234.56);
        assert_eq!(parse_number(" 20,5 ").unwrap(), 20.5);
        assert!(parse_number("abc").is_err());
    }

    #[test]
    fn form_values_become_fractions() {
        let form = parse_form("100,00", "15", "20", "12", "10").unwrap();
        assert_eq!(form.purchase_price, 100.0);
        assert_eq!(form.selic_rate, 0.15);
        assert_eq!(form.profit_rate, 0.20);
        assert_eq!(form.interest_rate, 0.12);
        assert_eq!(form.seller_margin, 0.10);
    }

    #[test]
    fn negative_auxiliary_rates_are_rejected_up_front() {
        assert!(parse_form("100", "-1", "20", "12", "10").is_err());
        assert!(parse_form("100", "15", "20", "12", "-10").is_err());
    }
}
