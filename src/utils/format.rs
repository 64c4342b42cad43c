const SCALES: [(f64, &str); 4] = [(1e12, "T"), (1e9, "B"), (1e6, "M"), (1e3, "K")];

fn abbreviate(value: f64, decimals: usize) -> Option<String> {
    SCALES
        .iter()
        .find(|(scale, _)| value >= *scale)
        .map(|(scale, suffix)| format!("{:.*}{}", decimals, value / scale, suffix))
}

/// "$1.19T", "$605.72", "$28.75B"
pub fn format_currency(value: f64, decimals: usize) -> String {
    match abbreviate(value, decimals) {
        Some(s) => format!("${}", s),
        None => format!("${:.*}", decimals, value),
    }
}

/// Like `format_currency` without the dollar sign; small values keep up to 3 decimals.
pub fn format_number(value: f64) -> String {
    abbreviate(value, 2).unwrap_or_else(|| {
        let s = format!("{:.3}", value);
        s.trim_end_matches('0').trim_end_matches('.').to_string()
    })
}

/// Always signed: "+1.32%", "-0.23%"
pub fn format_percentage(value: f64) -> String {
    let sign = if value >= 0.0 { "+" } else { "" };
    format!("{}{:.2}%", sign, value)
}

/// Max supply column; an absent cap is unlimited.
pub fn format_max_supply(value: Option<f64>) -> String {
    match value {
        Some(cap) if cap > 0.0 => format_number(cap),
        _ => "∞".to_string(),
    }
}
