use dioxus::prelude::*;

use crate::{
    app::persist_user_state,
    domain::{AppState, CalculatorDefaults, EFFECTIVE_TAX_RATE, TAX_COMPONENTS},
    infra::cache::clear_selic_cache,
    ui::{
        components::toast::{push_toast, ToastKind, ToastMessage},
        pages::calculator::humanize_age,
        theme,
    },
    util::format::{format_decimal, format_pct},
    util::version::version_label,
};

#[component]
pub fn SettingsPage() -> Element {
    let state = use_context::<Signal<AppState>>();
    let toasts = use_context::<Signal<Vec<ToastMessage>>>();
    let selic_refresh = use_context::<Signal<u32>>();

    let initial = state.with(|st| st.defaults);

    let mut purchase_input = use_signal(move || format!("{:.2}", initial.purchase_price));
    let mut selic_input = use_signal(move || format!("{:.2}", initial.selic_pct));
    let mut profit_input = use_signal(move || format!("{:.2}", initial.profit_pct));
    let mut interest_input = use_signal(move || format!("{:.2}", initial.interest_pct));
    let mut margin_input = use_signal(move || format!("{:.2}", initial.seller_margin_pct));

    let selic = state.with(|st| st.selic);

    let on_apply = {
        let mut state = state.clone();
        let toasts = toasts.clone();
        let purchase_input = purchase_input.clone();
        let selic_input = selic_input.clone();
        let profit_input = profit_input.clone();
        let interest_input = interest_input.clone();
        let margin_input = margin_input.clone();
        move |_| {
            let parsed = parse_defaults(
                purchase_input(),
                selic_input(),
                profit_input(),
                interest_input(),
                margin_input(),
            );

            match parsed {
                Ok(defaults) => {
                    state.with_mut(|st| st.defaults = defaults);
                    persist_user_state(&state);
                    push_toast(
                        toasts.clone(),
                        ToastKind::Success,
                        "Valores padrão atualizados.",
                    );
                }
                Err(message) => {
                    push_toast(toasts.clone(), ToastKind::Error, message);
                }
            }
        }
    };

    let on_reset = {
        let mut state = state.clone();
        let toasts = toasts.clone();
        move |_| {
            let defaults = CalculatorDefaults::default();
            purchase_input.set(format!("{:.2}", defaults.purchase_price));
            selic_input.set(format!("{:.2}", defaults.selic_pct));
            profit_input.set(format!("{:.2}", defaults.profit_pct));
            interest_input.set(format!("{:.2}", defaults.interest_pct));
            margin_input.set(format!("{:.2}", defaults.seller_margin_pct));
            state.with_mut(|st| st.defaults = defaults);
            persist_user_state(&state);
            push_toast(
                toasts.clone(),
                ToastKind::Info,
                "Valores padrão restaurados.",
            );
        }
    };

    let on_refresh_selic = {
        let toasts = toasts.clone();
        let mut selic_refresh = selic_refresh.clone();
        move |_| {
            selic_refresh.with_mut(|n| *n += 1);
            push_toast(toasts.clone(), ToastKind::Info, "Atualizando taxa Selic...");
        }
    };

    let on_clear_cache = {
        let toasts = toasts.clone();
        move |_| match clear_selic_cache() {
            Ok(()) => push_toast(
                toasts.clone(),
                ToastKind::Info,
                "Cache local da Selic removido.",
            ),
            Err(e) => push_toast(
                toasts.clone(),
                ToastKind::Error,
                format!("Não foi possível remover o cache: {e}"),
            ),
        }
    };

    rsx! {
        div { class: "space-y-8",
            section {
                class: "{theme::panel_border()} p-6",
                h2 { class: "text-sm font-semibold uppercase tracking-wide {theme::text_muted()}", "Valores padrão do formulário" }
                div { class: "mt-4 grid gap-4 sm:grid-cols-2 lg:grid-cols-3",
                    div {
                        label { class: "{theme::label_class()}", "Valor da compra (R$)" }
                        input {
                            class: "{theme::input_class()}",
                            value: purchase_input(),
                            oninput: move |evt: FormEvent| purchase_input.set(evt.value()),
                        }
                    }
                    div {
                        label { class: "{theme::label_class()}", "Taxa Selic (%)" }
                        input {
                            class: "{theme::input_class()}",
                            value: selic_input(),
                            oninput: move |evt: FormEvent| selic_input.set(evt.value()),
                        }
                    }
                    div {
                        label { class: "{theme::label_class()}", "Lucro desejado (%)" }
                        input {
                            class: "{theme::input_class()}",
                            value: profit_input(),
                            oninput: move |evt: FormEvent| profit_input.set(evt.value()),
                        }
                    }
                    div {
                        label { class: "{theme::label_class()}", "Taxa de juros (%)" }
                        input {
                            class: "{theme::input_class()}",
                            value: interest_input(),
                            oninput: move |evt: FormEvent| interest_input.set(evt.value()),
                        }
                    }
                    div {
                        label { class: "{theme::label_class()}", "Margem do vendedor (%)" }
                        input {
                            class: "{theme::input_class()}",
                            value: margin_input(),
                            oninput: move |evt: FormEvent| margin_input.set(evt.value()),
                        }
                    }
                }
                div { class: "mt-4 flex gap-3",
                    button { class: "{theme::btn_primary()}", onclick: on_apply, "Aplicar" }
                    button { class: "{theme::btn_secondary()}", onclick: on_reset, "Restaurar padrão" }
                }
            }

            section {
                class: "{theme::panel_border()} p-6",
                h2 { class: "text-sm font-semibold uppercase tracking-wide {theme::text_muted()}", "Taxa Selic" }
                if let Some(rate) = selic {
                    ul {
                        class: "mt-3 space-y-2 text-sm text-slate-300",
                        li { class: "flex items-center justify-between rounded-lg border border-slate-800 bg-slate-900/60 px-3 py-2",
                            span { "Taxa anual" }
                            span { class: "{theme::accent_text()}", "{format_decimal(rate.annual_pct(), 2)}% a.a." }
                        }
                        li { class: "flex items-center justify-between rounded-lg border border-slate-800 bg-slate-900/60 px-3 py-2",
                            span { "Data de referência" }
                            span { class: "text-xs {theme::text_muted()}", "{format_reference_date(rate.reference_date)}" }
                        }
                        li { class: "flex items-center justify-between rounded-lg border border-slate-800 bg-slate-900/60 px-3 py-2",
                            span { "Obtida" }
                            span { class: "text-xs {theme::text_muted()}", "{humanize_age(rate.fetched_at)}" }
                        }
                    }
                } else {
                    p { class: "mt-3 text-sm text-slate-400", "Nenhuma taxa carregada ainda. O valor padrão do formulário será usado." }
                }
                div { class: "mt-4 flex gap-3",
                    button { class: "{theme::btn_secondary()}", onclick: on_refresh_selic, "Atualizar agora" }
                    button {
                        class: "rounded-lg border border-amber-500/40 px-4 py-2 text-xs font-semibold uppercase tracking-wide text-amber-200 hover:bg-amber-500/10",
                        onclick: on_clear_cache,
                        "Limpar cache local"
                    }
                }
            }

            section {
                class: "{theme::panel_border()} p-6",
                h2 { class: "text-sm font-semibold uppercase tracking-wide {theme::text_muted()}", "Detalhamento dos tributos" }
                p { class: "mt-2 text-sm text-slate-400",
                    "Carga efetiva aplicada a todo preço calculado (Lucro Presumido, serviços em SP)."
                }
                table {
                    class: "mt-4 min-w-full {theme::table_divider()} text-sm",
                    thead {
                        class: "{theme::table_header()}",
                        tr {
                            th { class: "px-3 py-2 font-medium", "Tributo" }
                            th { class: "px-3 py-2 font-medium text-right", "Alíquota" }
                            th { class: "px-3 py-2 font-medium", "Base" }
                        }
                    }
                    tbody {
                        class: "{theme::table_divider()}",
                        for component in TAX_COMPONENTS.iter() {
                            tr {
                                td { class: "px-3 py-2 font-medium text-slate-100", "{component.name}" }
                                td { class: "px-3 py-2 text-right text-slate-300", "{format_decimal(component.rate_pct, 2)}%" }
                                td { class: "px-3 py-2 text-xs {theme::text_muted()}", "{component.description}" }
                            }
                        }
                        tr {
                            td { class: "px-3 py-2 font-semibold {theme::accent_text()}", "Total" }
                            td { class: "px-3 py-2 text-right font-semibold {theme::accent_text()}", "{format_pct(EFFECTIVE_TAX_RATE)}" }
                            td { class: "px-3 py-2" }
                        }
                    }
                }
            }

            section {
                class: "flex flex-col items-center gap-2 {theme::panel_border()} p-6 text-center text-slate-400",
                h2 { class: "text-sm font-semibold uppercase tracking-wide {theme::text_muted()}", "Fonte de dados" }
                p {
                    class: "text-sm",
                    "Taxa Selic fornecida pelo Banco Central do Brasil (SGS, série 432)."
                }
                a {
                    href: "https://dadosabertos.bcb.gov.br",
                    target: "_blank",
                    rel: "noreferrer",
                    class: "{theme::link_class()}",
                    "dadosabertos.bcb.gov.br"
                }
                p { class: "text-xs {theme::text_muted()}", "{version_label()}" }
            }
        }
    }
}

fn format_reference_date(date: time::Date) -> String {
    format!(
        "{:02}/{:02}/{}",
        date.day(),
        u8::from(date.month()),
        date.year()
    )
}

fn parse_defaults(
    purchase: String,
    selic: String,
    profit: String,
    interest: String,
    margin: String,
) -> Result<CalculatorDefaults, String> {
    let purchase_price: f64 = purchase
        .trim()
        .parse()
        .map_err(|_| "O valor da compra deve ser numérico.".to_string())?;
    if purchase_price <= 0.0 {
        return Err("O valor da compra deve ser maior que zero.".to_string());
    }
    let selic_pct: f64 = selic
        .trim()
        .parse()
        .map_err(|_| "A taxa Selic deve ser numérica.".to_string())?;
    let profit_pct: f64 = profit
        .trim()
        .parse()
        .map_err(|_| "O lucro desejado deve ser numérico.".to_string())?;
    let interest_pct: f64 = interest
        .trim()
        .parse()
        .map_err(|_| "A taxa de juros deve ser numérica.".to_string())?;
    let margin_pct: f64 = margin
        .trim()
        .parse()
        .map_err(|_| "A margem do vendedor deve ser numérica.".to_string())?;

    if [selic_pct, profit_pct, interest_pct, margin_pct]
        .iter()
        .any(|pct| *pct < 0.0)
    {
        return Err("Percentuais não podem ser negativos.".to_string());
    }

    Ok(CalculatorDefaults {
        purchase_price,
        selic_pct,
        profit_pct,
        interest_pct,
        seller_margin_pct: margin_pct,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_parse_and_reject_negatives() {
        let parsed = parse_defaults(
            "100.0".into(),
            "15".into(),
            "20".into(),
            "12".into(),
            "10".into(),
        )
        .unwrap();
        assert_eq!(parsed.selic_pct, 15.0);

        assert!(parse_defaults("0".into(), "15".into(), "20".into(), "12".into(), "10".into()).is_err());
        assert!(parse_defaults("100".into(), "-1".into(), "20".into(), "12".into(), "10".into()).is_err());
    }

    #[test]
    fn reference_dates_render_as_dd_mm_yyyy() {
        let date = time::Date::from_calendar_date(2026, time::Month::August, 6).unwrap();
        assert_eq!(format_reference_date(date), "06/08/2026");
    }
}
