use {
    crate::{
        config::ID_ALIASES,
        domain::{AssetPatch, AssetRecord, TrendSeries},
    },
    rand::Rng,
};

#[cfg(debug_assertions)]
use crate::config::DF;

/// Static mapping from a push source's asset id to the store's canonical id.
#[derive(Debug, Clone, Copy)]
pub struct IdAliases {
    table: &'static [(&'static str, &'static str)],
}

impl IdAliases {
    pub const fn new(table: &'static [(&'static str, &'static str)]) -> Self {
        Self { table }
    }

    /// Canonical id for `external`, or `external` itself when no alias is known.
    pub fn resolve<'a>(&self, external: &'a str) -> &'a str {
        self.table
            .iter()
            .find(|(from, _)| *from == external)
            .map(|(_, to)| *to)
            .unwrap_or(external)
    }
}

impl Default for IdAliases {
    fn default() -> Self {
        Self::new(ID_ALIASES)
    }
}

/// The single authoritative, ordered collection of assets plus fetch status.
#[derive(Debug, Clone, Default)]
pub struct AssetStore {
    assets: Vec<AssetRecord>,
    aliases: IdAliases,
    loading: bool,
    loaded: bool,
    error: Option<String>,
}

impl AssetStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn assets(&self) -> &[AssetRecord] {
        &self.assets
    }

    pub fn get(&self, id: &str) -> Option<&AssetRecord> {
        self.assets.iter().find(|a| a.id == id)
    }

    pub fn len(&self) -> usize {
        self.assets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.assets.is_empty()
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Discards the current collection and installs `records` in the given order.
    pub fn replace_all(&mut self, records: Vec<AssetRecord>) {
        self.assets = records;
        self.loaded = true;
        self.loading = false;
        self.error = None;
    }

    /// Swaps the collection for a new generation of the same assets.
    /// Fetch status (loading, loaded, error) is left as it is.
    pub fn replace_assets(&mut self, records: Vec<AssetRecord>) {
        self.assets = records;
    }

    /// Merges `fields` into the asset `id` (after alias resolution).
    /// Returns false, leaving the store untouched, when no asset matches.
    pub fn patch<R: Rng + ?Sized>(&mut self, id: &str, fields: AssetPatch, rng: &mut R) -> bool {
        let canonical = self.aliases.resolve(id);
        let Some(asset) = self.assets.iter_mut().find(|a| a.id == canonical) else {
            #[cfg(debug_assertions)]
            if DF.log_unmatched_patches {
                log::debug!("Patch for unknown asset '{}' ignored", id);
            }
            return false;
        };

        if asset.merge(fields.sanitized(canonical)) {
            asset.trend_series = TrendSeries::for_change(asset.change_24h, rng);
        }
        true
    }

    /// Fetch in flight. The collection stays on display.
    pub fn mark_loading(&mut self) {
        self.loading = true;
        self.error = None;
    }

    /// Fetch failed. The last good collection is kept.
    pub fn mark_error(&mut self, message: impl Into<String>) {
        self.loading = false;
        self.error = Some(message.into());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::test_record;
    use rand::{SeedableRng, rngs::StdRng};

    fn two_assets() -> Vec<AssetRecord> {
        vec![
            test_record("bitcoin", "Bitcoin", "BTC", 50_000.0, 1e12),
            test_record("ethereum", "Ethereum", "ETH", 3_000.0, 4e11),
        ]
    }

    #[test]
    fn aliases_resolve_known_ids_and_pass_through_unknown() {
        let aliases = IdAliases::default();
        assert_eq!(aliases.resolve("ripple"), "xrp");
        assert_eq!(aliases.resolve("avalanche"), "avalanche-2");
        assert_eq!(aliases.resolve("bitcoin"), "bitcoin");
        assert_eq!(aliases.resolve("some-new-coin"), "some-new-coin");
    }

    #[test]
    fn replace_all_installs_in_order_and_clears_error() {
        let mut store = AssetStore::new();
        store.mark_loading();
        store.mark_error("boom");

        store.replace_all(two_assets());

        assert_eq!(store.assets(), two_assets().as_slice());
        assert!(store.is_loaded());
        assert!(!store.is_loading());
        assert_eq!(store.error(), None);
    }

    #[test]
    fn replace_all_accepts_empty() {
        let mut store = AssetStore::new();
        store.replace_all(two_assets());
        store.replace_all(Vec::new());
        assert!(store.is_empty());
        assert!(store.is_loaded());
    }

    #[test]
    fn patch_updates_only_named_fields_and_regenerates_trend() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut store = AssetStore::new();
        store.replace_all(two_assets());
        let before = store.get("bitcoin").cloned().unwrap();

        let patch = AssetPatch::price(55_000.0).with_change_24h(3.0);
        assert!(store.patch("bitcoin", patch, &mut rng));

        let after = store.get("bitcoin").unwrap();
        assert_eq!(after.price, 55_000.0);
        assert_eq!(after.change_24h, 3.0);
        assert_eq!(after.trend_series.points().len(), crate::config::TREND.points);
        assert_eq!(
            AssetRecord {
                price: before.price,
                change_24h: before.change_24h,
                trend_series: before.trend_series.clone(),
                ..after.clone()
            },
            before
        );
        assert_eq!(store.get("ethereum"), two_assets().get(1));
    }

    #[test]
    fn patch_without_change_24h_keeps_trend() {
        let mut rng = StdRng::seed_from_u64(2);
        let mut store = AssetStore::new();
        let mut assets = two_assets();
        assets[0].trend_series = TrendSeries::generate(true, &mut rng);
        store.replace_all(assets.clone());

        store.patch("bitcoin", AssetPatch::price(1.0), &mut rng);

        assert_eq!(store.get("bitcoin").unwrap().trend_series, assets[0].trend_series);
    }

    #[test]
    fn patch_resolves_alias() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut store = AssetStore::new();
        store.replace_all(vec![test_record("xrp", "XRP", "XRP", 0.5, 2e10)]);

        assert!(store.patch("ripple", AssetPatch::price(0.6), &mut rng));
        assert_eq!(store.get("xrp").unwrap().price, 0.6);
    }

    #[test]
    fn patch_unknown_id_is_a_noop() {
        let mut rng = StdRng::seed_from_u64(4);
        let mut store = AssetStore::new();
        store.replace_all(two_assets());

        assert!(!store.patch("dogecoin", AssetPatch::price(0.1), &mut rng));
        assert_eq!(store.assets(), two_assets().as_slice());
    }

    #[test]
    fn replace_assets_leaves_fetch_status_alone() {
        let mut store = AssetStore::new();
        store.replace_all(two_assets());
        store.mark_loading();
        store.mark_error("Failed");
        store.mark_loading();

        store.replace_assets(two_assets().into_iter().rev().collect());

        assert_eq!(store.assets()[0].id, "ethereum");
        assert!(store.is_loading());
        assert!(store.is_loaded());

        store.mark_error("Failed");
        store.replace_assets(two_assets());
        assert_eq!(store.error(), Some("Failed"));
    }

    #[test]
    fn mark_error_keeps_last_good_collection() {
        let mut store = AssetStore::new();
        store.replace_all(two_assets());
        store.mark_loading();
        assert!(store.is_loading());

        store.mark_error("Failed");

        assert_eq!(store.len(), 2);
        assert!(!store.is_loading());
        assert_eq!(store.error(), Some("Failed"));
    }
}
