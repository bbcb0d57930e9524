use dioxus::prelude::*;

use crate::ui::theme;

/// Segmented single-choice selector, one button per option.
#[component]
pub fn PillGroup(
    legend: String,
    options: Vec<String>,
    selected: usize,
    onselect: EventHandler<usize>,
) -> Element {
    rsx! {
        div {
            span { class: "{theme::label_class()}", "{legend}" }
            div { class: "mt-1 flex gap-1",
                for (index, option) in options.into_iter().enumerate() {
                    PillButton {
                        label: option,
                        active: index == selected,
                        onclick: move |_| onselect.call(index),
                    }
                }
            }
        }
    }
}

#[component]
fn PillButton(label: String, active: bool, onclick: EventHandler<()>) -> Element {
    let class = if active {
        "rounded-lg px-3 py-1.5 text-sm font-semibold bg-emerald-500/20 text-emerald-300 border border-emerald-500/40"
    } else {
        "rounded-lg px-3 py-1.5 text-sm text-slate-500 border border-slate-800 hover:border-emerald-600 hover:text-emerald-400 transition"
    };

    rsx! {
        button {
            class: "{class}",
            r#type: "button",
            onclick: move |_| onclick.call(()),
            "{label}"
        }
    }
}
