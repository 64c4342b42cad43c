use crate::domain::{AssetRecord, SortDirection, SortDirective};

/// Case-insensitive substring match on name or symbol. Empty filter matches everything.
pub fn matches_filter(asset: &AssetRecord, filter: &str) -> bool {
    if filter.is_empty() {
        return true;
    }
    matches_lowered(asset, &filter.to_lowercase())
}

fn matches_lowered(asset: &AssetRecord, needle: &str) -> bool {
    asset.name.to_lowercase().contains(needle) || asset.symbol.to_lowercase().contains(needle)
}

/// Filtered and sorted projection of `assets` for display. Never mutates its input.
///
/// The sort is stable, and descending negates the comparator rather than
/// reversing the output, so ties keep their input order in both directions.
pub fn derive_view<'a>(
    assets: &'a [AssetRecord],
    filter: &str,
    sort: &SortDirective,
) -> Vec<&'a AssetRecord> {
    let needle = filter.to_lowercase();
    let mut rows: Vec<&AssetRecord> = if needle.is_empty() {
        assets.iter().collect()
    } else {
        assets
            .iter()
            .filter(|a| matches_lowered(a, &needle))
            .collect()
    };

    let value = sort.field.accessor();
    let descending = sort.direction == SortDirection::Descending;

    rows.sort_by(|a, b| {
        let ord = value(a).compare(&value(b));
        if descending { ord.reverse() } else { ord }
    });

    rows
}
