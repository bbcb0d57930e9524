use dioxus::prelude::*;

use crate::domain::InterestStep;
use crate::ui::theme;
use crate::util::format::format_decimal;

/// Month-by-month capital cost table for a financed purchase.
#[component]
pub fn ScheduleTable(steps: Vec<InterestStep>) -> Element {
    let count = steps.len();

    rsx! {
        div {
            class: "{theme::table_container()}",
            header {
                class: "flex items-center justify-between border-b border-slate-800 px-4 py-3",
                h3 { class: "text-sm font-semibold text-slate-200", "Custo do capital" }
                span { class: "text-xs {theme::text_muted()}", "{count} meses" }
            }
            if steps.is_empty() {
                p { class: "px-4 py-6 text-sm {theme::text_muted()}", "Nenhum período para simular." }
            } else {
                table {
                    class: "min-w-full {theme::table_divider()} text-sm",
                    thead {
                        class: "{theme::table_header()}",
                        tr {
                            th { class: "px-4 py-3 font-medium", "Mês" }
                            th { class: "px-4 py-3 font-medium text-right", "Valor financiado no mês" }
                            th { class: "px-4 py-3 font-medium text-right", "Juros sobre saldo devedor" }
                            th { class: "px-4 py-3 font-medium text-right", "Rendimentos acumulados" }
                        }
                    }
                    tbody {
                        class: "{theme::table_divider()}",
                        for step in steps {
                            tr {
                                class: "hover:bg-slate-800/40",
                                td { class: "px-4 py-2 font-medium text-slate-100", "{step.month}" }
                                td { class: "px-4 py-2 text-right text-slate-300", "{format_decimal(step.outstanding_balance, 2)}" }
                                td { class: "px-4 py-2 text-right text-slate-300", "{format_decimal(step.monthly_interest, 2)}" }
                                td { class: "px-4 py-2 text-right {theme::accent_text()}", "{format_decimal(step.cumulative_interest, 2)}" }
                            }
                        }
                    }
                }
            }
        }
    }
}
