use dioxus::{prelude::*, signals::Signal};

use crate::{
    domain::AppState,
    infra::bcb::{BcbClient, CacheStatus},
    ui::{
        components::toast::{push_toast, Toast, ToastKind, ToastMessage},
        pages::{AnalysisPage, CalculatorPage, SettingsPage},
        shell::Shell,
    },
    util::{
        assets,
        persistence::{load_persisted_state, save_persisted_state},
    },
};

#[derive(Routable, Clone, PartialEq)]
pub enum Route {
    #[route("/")]
    Calculator {},
    #[route("/analise")]
    Analysis {},
    #[route("/configuracoes")]
    Settings {},
}

#[component]
pub fn App() -> Element {
    let state = use_signal(AppState::default);
    use_hook({
        let mut state = state.clone();
        move || {
            if let Some(saved) = load_persisted_state() {
                state.with_mut(|st| st.apply_persisted(saved));
            }
        }
    });
    use_context_provider(|| state.clone());

    let toasts = use_signal(Vec::<ToastMessage>::new);
    use_context_provider(|| toasts.clone());

    // Manual refresh trigger shared with the settings page.
    let selic_refresh = use_signal(|| 0_u32);
    use_context_provider(|| selic_refresh.clone());

    let _selic = use_resource({
        let state = state.clone();
        let toasts = toasts.clone();
        let selic_refresh = selic_refresh.clone();
        move || async move {
            // Reading the counter re-runs the fetch whenever it is bumped.
            let _generation = selic_refresh();
            fetch_selic(state.clone(), toasts.clone()).await
        }
    });

    rsx! {
        document::Link { rel: "icon", href: assets::favicon_data_uri() }
        document::Style { "{assets::main_css()}" }
        document::Style { "{assets::tailwind_css()}" }
        Router::<Route> {}
        Toast {}
    }
}

pub fn persist_user_state(state: &Signal<AppState>) {
    let snapshot = state.with(|st| st.to_persisted());
    if let Err(err) = save_persisted_state(&snapshot) {
        println!("[persist] Failed to persist user state: {err}");
    }
}

async fn fetch_selic(
    mut state: Signal<AppState>,
    toasts: Signal<Vec<ToastMessage>>,
) -> Option<CacheStatus> {
    let client = match BcbClient::new() {
        Ok(client) => client,
        Err(err) => {
            println!("[selic] Failed to initialise BCB client: {err}");
            push_toast(
                toasts.clone(),
                ToastKind::Error,
                "Falha ao iniciar o cliente do Banco Central.",
            );
            return None;
        }
    };

    match client.get_selic().await {
        Ok(payload) => {
            state.with_mut(|st| st.selic = Some(payload.data));
            match payload.status {
                CacheStatus::Fresh => {}
                CacheStatus::Cached => push_toast(
                    toasts.clone(),
                    ToastKind::Info,
                    "Taxa Selic carregada do cache local.",
                ),
                CacheStatus::Stale => push_toast(
                    toasts.clone(),
                    ToastKind::Warning,
                    "A taxa Selic em cache pode estar desatualizada.",
                ),
            }
            Some(payload.status)
        }
        Err(err) => {
            println!("[selic] Unable to load the SELIC rate: {err}");
            push_toast(
                toasts.clone(),
                ToastKind::Warning,
                "Não foi possível obter a taxa Selic; usando o valor padrão.",
            );
            None
        }
    }
}

#[component]
pub fn Calculator() -> Element {
    rsx! { Shell { CalculatorPage {} } }
}

#[component]
pub fn Analysis() -> Element {
    rsx! { Shell { AnalysisPage {} } }
}

#[component]
pub fn Settings() -> Element {
    rsx! { Shell { SettingsPage {} } }
}
