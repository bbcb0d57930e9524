pub mod heatmap;
pub mod kpi_card;
pub mod pill_group;
pub mod quote_breakdown;
pub mod schedule_table;
pub mod toast;
