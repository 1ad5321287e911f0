pub mod cart_table;
pub mod confidence_badge;
pub mod kpi_card;
pub mod rate_table;
pub mod risk_indicator;
pub mod toast;
