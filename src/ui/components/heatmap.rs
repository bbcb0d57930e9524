use dioxus::prelude::*;

use crate::domain::{ProfitVariation, SensitivityGrid};
use crate::ui::theme;
use crate::util::format::format_decimal;

/// Profit-rate sweep for annual scenarios: one row per candidate rate.
#[component]
pub fn ProfitSweepTable(rows: Vec<ProfitVariation>, base_pct: i32) -> Element {
    let bounds = price_bounds(&rows);

    rsx! {
        div {
            class: "{theme::table_container()}",
            header {
                class: "border-b border-slate-800 px-4 py-3",
                h3 { class: "text-sm font-semibold text-slate-200", "Preço de venda por lucro desejado" }
            }
            if rows.is_empty() {
                p { class: "px-4 py-6 text-sm {theme::text_muted()}", "Nenhuma variação válida neste intervalo." }
            } else {
                table {
                    class: "min-w-full {theme::table_divider()} text-sm",
                    thead {
                        class: "{theme::table_header()}",
                        tr {
                            th { class: "px-4 py-3 font-medium", "Lucro desejado (%)" }
                            th { class: "px-4 py-3 font-medium text-right", "Preço de venda (R$)" }
                        }
                    }
                    tbody {
                        class: "{theme::table_divider()}",
                        for row in rows {
                            tr {
                                class: if row.profit_pct == base_pct { "outline outline-2 -outline-offset-2 outline-sky-400" } else { "" },
                                td { class: "px-4 py-2 font-medium text-slate-100", "{row.profit_pct}%" }
                                td {
                                    class: "px-4 py-2 text-right text-slate-100",
                                    style: "{cell_style(Some(row.sale_price), bounds)}",
                                    "{format_decimal(row.sale_price, 2)}"
                                }
                            }
                        }
                    }
                }
            }
        }
    }
}

/// Profit × interest heatmap for monthly scenarios. The centre cell is the
/// quoted scenario.
#[component]
pub fn SensitivityHeatmap(grid: SensitivityGrid) -> Element {
    let bounds = grid.price_bounds();
    let (center_row, center_col) = grid.center();

    rsx! {
        div {
            class: "{theme::table_container()}",
            header {
                class: "border-b border-slate-800 px-4 py-3",
                h3 { class: "text-sm font-semibold text-slate-200", "Preço de venda mensal por juros × lucro" }
                p { class: "mt-1 text-xs {theme::text_muted()}", "Linhas: lucro desejado (%). Colunas: taxa de juros (%)." }
            }
            div {
                class: "overflow-x-auto",
                table {
                    class: "min-w-full {theme::table_divider()} text-sm",
                    thead {
                        class: "{theme::table_header()}",
                        tr {
                            th { class: "px-3 py-2 font-medium", "" }
                            for interest_pct in grid.interest_pcts.iter() {
                                th { class: "px-3 py-2 font-medium text-right", "{interest_pct}%" }
                            }
                        }
                    }
                    tbody {
                        class: "{theme::table_divider()}",
                        for (row_idx, profit_pct) in grid.profit_pcts.iter().enumerate() {
                            tr {
                                td { class: "px-3 py-2 font-medium text-slate-100", "{profit_pct}%" }
                                for (col_idx, cell) in grid.cells[row_idx].iter().enumerate() {
                                    td {
                                        class: if row_idx == center_row && col_idx == center_col {
                                            "px-3 py-2 text-right text-slate-100 outline outline-2 -outline-offset-2 outline-sky-400"
                                        } else {
                                            "px-3 py-2 text-right text-slate-100"
                                        },
                                        style: "{cell_style(*cell, bounds)}",
                                        "{cell_label(*cell)}"
                                    }
                                }
                            }
                        }
                    }
                }
            }
        }
    }
}

fn cell_label(cell: Option<f64>) -> String {
    match cell {
        Some(price) => format_decimal(price, 2),
        None => "—".to_string(),
    }
}

/// Background intensity scaled between the cheapest and priciest cell.
fn cell_style(cell: Option<f64>, bounds: Option<(f64, f64)>) -> String {
    let (Some(price), Some((min, max))) = (cell, bounds) else {
        return String::new();
    };
    let spread = max - min;
    let normalized = if spread > f64::EPSILON {
        (price - min) / spread
    } else {
        0.5
    };
    let alpha = 0.08 + normalized * 0.62;
    format!("background-color: rgba(16, 185, 129, {alpha:.3})")
}

fn price_bounds(rows: &[ProfitVariation]) -> Option<(f64, f64)> {
    rows.iter().fold(None, |bounds, row| {
        Some(match bounds {
            Some((min, max)) => (row.sale_price.min(min), row.sale_price.max(max)),
            None => (row.sale_price, row.sale_price),
        })
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cell_style_scales_between_the_bounds() {
        let low = cell_style(Some(100.0), Some((100.0, 200.0)));
        let high = cell_style(Some(200.0), Some((100.0, 200.0)));
        assert!(low.contains("0.080"));
        assert!(high.contains("0.700"));
        assert_eq!(cell_style(None, Some((100.0, 200.0))), "");
    }

    #[test]
    fn flat_grids_sit_in_the_middle_of_the_ramp() {
        let style = cell_style(Some(100.0), Some((100.0, 100.0)));
        assert!(style.contains("0.390"));
    }
}
