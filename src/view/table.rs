use {
    super::DashboardView,
    crate::{
        domain::AssetRecord,
        utils::{format_clock, format_currency, format_max_supply, format_number, format_percentage},
    },
    tabled::{
        Table, Tabled,
        settings::{Alignment, Style, object::Columns},
    },
};

#[derive(Tabled)]
struct AssetRow {
    #[tabled(rename = "Asset")]
    asset: String,
    #[tabled(rename = "Price")]
    price: String,
    #[tabled(rename = "1h %")]
    change_1h: String,
    #[tabled(rename = "24h %")]
    change_24h: String,
    #[tabled(rename = "7d %")]
    change_7d: String,
    #[tabled(rename = "Market Cap")]
    market_cap: String,
    #[tabled(rename = "24h Volume")]
    volume_24h: String,
    #[tabled(rename = "Circulating Supply")]
    circulating_supply: String,
    #[tabled(rename = "Max Supply")]
    max_supply: String,
    #[tabled(rename = "Trend")]
    trend: String,
}

impl From<&AssetRecord> for AssetRow {
    fn from(a: &AssetRecord) -> Self {
        Self {
            asset: format!("{} {}", a.name, a.symbol),
            price: format_currency(a.price, 2),
            change_1h: format_percentage(a.change_1h),
            change_24h: format_percentage(a.change_24h),
            change_7d: format_percentage(a.change_7d),
            market_cap: format_currency(a.market_cap, 0),
            volume_24h: format_currency(a.volume_24h, 0),
            circulating_supply: format_number(a.circulating_supply),
            max_supply: format_max_supply(a.max_supply),
            trend: a.trend_series.sparkline(),
        }
    }
}

/// The asset table alone. Empty results get a hint instead of a bare header.
pub fn render_table(rows: &[AssetRecord]) -> String {
    if rows.is_empty() {
        return "No assets found. Try adjusting your filter.".to_string();
    }
    Table::new(rows.iter().map(AssetRow::from))
        .with(Style::rounded())
        .modify(Columns::new(1..9), Alignment::right())
        .to_string()
}

/// One line of status: counts, sort, filter, toggles, errors.
pub fn render_status(view: &DashboardView) -> String {
    let mut parts = vec![format!("{}/{} assets", view.rows.len(), view.total)];
    parts.push(format!("sort: {}", view.sort));
    if !view.filter.is_empty() {
        parts.push(format!("filter: \"{}\"", view.filter));
    }
    parts.push(format!(
        "live: {}",
        if view.live_updates { view.connection.to_string() } else { "off".to_string() }
    ));
    parts.push(format!("sim: {}", if view.simulation_active { "on" } else { "off" }));
    if view.loading {
        parts.push("loading…".to_string());
    }
    parts.push(format!("@ {}", format_clock(&view.updated_at)));
    parts.join("  |  ")
}

/// Full screen: status line, optional error banner, table.
pub fn render_dashboard(view: &DashboardView) -> String {
    let mut out = render_status(view);
    if let Some(error) = &view.error {
        out.push_str(&format!("\n⚠ Error: {}", error));
    }
    out.push('\n');
    if view.loading && !view.loaded {
        out.push_str("Loading market data…");
    } else {
        out.push_str(&render_table(&view.rows));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::test_record;

    #[test]
    fn table_has_one_line_per_asset_plus_frame() {
        let rows = vec![
            test_record("bitcoin", "Bitcoin", "BTC", 60_243.52, 1.18e12),
            test_record("ethereum", "Ethereum", "ETH", 3_245.18, 3.89e11),
        ];
        let table = render_table(&rows);

        assert!(table.contains("Bitcoin BTC"));
        assert!(table.contains("$60.24K"));
        assert!(table.contains("$1T"));
        assert!(table.contains("Max Supply"));
        assert!(table.contains('∞'));
    }

    #[test]
    fn empty_table_shows_hint() {
        assert_eq!(render_table(&[]), "No assets found. Try adjusting your filter.");
    }

    #[test]
    fn dashboard_shows_error_banner() {
        let view = DashboardView {
            error: Some("Failed to fetch crypto data. Please try again later.".into()),
            ..DashboardView::default()
        };
        let screen = render_dashboard(&view);
        assert!(screen.contains("⚠ Error: Failed to fetch"));
        assert!(screen.contains("sort: marketCap desc"));
    }
}
