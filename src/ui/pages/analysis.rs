use dioxus::prelude::*;

use crate::{
    domain::{
        interest_profit_grid, minimum_acceptable_interest, profit_sweep, AppState,
        InterestSchedule, SaleMode,
    },
    ui::{
        components::{heatmap::{ProfitSweepTable, SensitivityHeatmap}, kpi_card::KpiCard, schedule_table::ScheduleTable},
        theme,
    },
    util::format::{format_brl, format_decimal, format_pct},
};

/// Largest ± sweep the tables stay readable at.
const MAX_DELTA_PCT: u32 = 10;
const MAX_SCHEDULE_MONTHS: u32 = 120;

#[component]
pub fn AnalysisPage() -> Element {
    let state = use_context::<Signal<AppState>>();
    let scenario = state.with(|st| st.scenario);

    let profit_delta_input = use_signal(|| "3".to_string());
    let interest_delta_input = use_signal(|| "3".to_string());
    let months_input = use_signal(|| "12".to_string());

    let Some(scenario) = scenario else {
        return rsx! {
            div {
                class: "{theme::panel_border()} px-6 py-10 text-center",
                p { class: "text-sm text-slate-400", "Nenhum cenário calculado ainda." }
                p { class: "mt-1 text-xs {theme::text_muted()}",
                    "Calcule um preço na aba Calculadora para liberar as análises."
                }
            }
        };
    };

    let profit_delta = parse_bounded(&profit_delta_input(), 3, 1, MAX_DELTA_PCT);
    let interest_delta = parse_bounded(&interest_delta_input(), 3, 1, MAX_DELTA_PCT);
    let months = parse_bounded(&months_input(), 12, 1, MAX_SCHEDULE_MONTHS);

    let schedule_steps: Vec<_> =
        match InterestSchedule::new(scenario.params.purchase_price, scenario.selic_rate, months) {
            Ok(schedule) => schedule.collect(),
            Err(_) => Vec::new(),
        };
    let interest_floor_pct =
        minimum_acceptable_interest(scenario.params.purchase_price, scenario.selic_rate, months)
            .unwrap_or(0.0);

    let base_profit_pct = (scenario.params.profit_rate * 100.0).round() as i32;
    let scenario_summary = format!(
        "{} · {} · compra de {}",
        scenario.params.sale_mode.label(),
        scenario.params.margin_basis.label(),
        format_brl(scenario.params.purchase_price)
    );

    rsx! {
        div { class: "space-y-8",
            p { class: "text-xs {theme::text_muted()}", "Cenário em análise: {scenario_summary}" }

            section {
                class: "space-y-4",
                div { class: "flex flex-wrap items-end gap-4",
                    h2 { class: "text-sm font-semibold text-slate-200", "Variações na taxa de juros e no lucro desejado" }
                    div { class: "w-40",
                        label { class: "{theme::label_class()}", "Variações de lucro (±)" }
                        input {
                            class: "{theme::input_class()}",
                            inputmode: "numeric",
                            value: profit_delta_input(),
                            oninput: {
                                let mut profit_delta_input = profit_delta_input.clone();
                                move |evt: FormEvent| profit_delta_input.set(evt.value())
                            },
                        }
                    }
                    if scenario.params.sale_mode == SaleMode::Monthly {
                        div { class: "w-40",
                            label { class: "{theme::label_class()}", "Variações de juros (±)" }
                            input {
                                class: "{theme::input_class()}",
                                inputmode: "numeric",
                                value: interest_delta_input(),
                                oninput: {
                                    let mut interest_delta_input = interest_delta_input.clone();
                                    move |evt: FormEvent| interest_delta_input.set(evt.value())
                                },
                            }
                        }
                    }
                }

                match scenario.params.sale_mode {
                    SaleMode::Annual => rsx! {
                        ProfitSweepTable {
                            rows: profit_sweep(&scenario.params, profit_delta),
                            base_pct: base_profit_pct,
                        }
                    },
                    SaleMode::Monthly => rsx! {
                        SensitivityHeatmap {
                            grid: interest_profit_grid(&scenario.params, profit_delta, interest_delta),
                        }
                    },
                }
            }

            section {
                class: "space-y-4",
                div { class: "flex flex-wrap items-end justify-between gap-4",
                    h2 { class: "text-sm font-semibold text-slate-200", "Cálculo do custo do capital" }
                    div { class: "w-40",
                        label { class: "{theme::label_class()}", "Meses financiados" }
                        input {
                            class: "{theme::input_class()}",
                            inputmode: "numeric",
                            value: months_input(),
                            oninput: {
                                let mut months_input = months_input.clone();
                                move |evt: FormEvent| months_input.set(evt.value())
                            },
                        }
                    }
                }

                div { class: "grid gap-4 sm:grid-cols-2",
                    KpiCard {
                        title: "Custo mínimo de capital".to_string(),
                        value: format!("{}%", format_decimal(interest_floor_pct, 2)),
                        description: Some(format!(
                            "Para cobrir a Selic de {} em {months} meses",
                            format_pct(scenario.selic_rate)
                        )),
                    }
                    KpiCard {
                        title: "Juros acumulados".to_string(),
                        value: format_brl(
                            schedule_steps
                                .last()
                                .map(|step| step.cumulative_interest)
                                .unwrap_or_default(),
                        ),
                        description: Some(format!(
                            "Sobre {} financiados",
                            format_brl(scenario.params.purchase_price)
                        )),
                    }
                }

                ScheduleTable { steps: schedule_steps }
            }
        }
    }
}

fn parse_bounded(raw: &str, fallback: u32, min: u32, max: u32) -> u32 {
    raw.trim()
        .parse::<u32>()
        .unwrap_or(fallback)
        .clamp(min, max)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bounded_parse_clamps_and_falls_back() {
        assert_eq!(parse_bounded("3", 3, 1, 10), 3);
        assert_eq!(parse_bounded("0", 3, 1, 10), 1);
        assert_eq!(parse_bounded("99", 3, 1, 10), 10);
        assert_eq!(parse_bounded("abc", 3, 1, 10), 3);
        assert_eq!(parse_bounded("", 12, 1, 120), 12);
    }
}
