use {
    super::AssetRecord,
    serde::{Deserialize, Serialize},
    std::cmp::Ordering,
    strum_macros::{Display, EnumIter, EnumString},
};

/// Selector over every `AssetRecord` field. Parses from the camelCase field name.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
    Default,
)]
#[serde(rename_all = "camelCase")]
#[strum(serialize_all = "camelCase", ascii_case_insensitive)]
pub enum SortField {
    Id,
    Name,
    Symbol,
    #[strum(to_string = "logoUrl", serialize = "logo")]
    LogoUrl,
    Price,
    Change1h,
    Change24h,
    Change7d,
    #[default]
    MarketCap,
    Volume24h,
    CirculatingSupply,
    MaxSupply,
    TrendSeries,
}

/// A field as seen by the comparator.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FieldValue<'a> {
    Text(&'a str),
    Number(f64),
    /// Optional field with no value.
    Absent,
    /// Field type the comparator does not order (always "equal").
    Unsupported,
}

pub type FieldAccessor = for<'a> fn(&'a AssetRecord) -> FieldValue<'a>;

impl SortField {
    /// Typed accessor for this field, resolved once per derivation.
    pub fn accessor(self) -> FieldAccessor {
        match self {
            SortField::Id => |a| FieldValue::Text(&a.id),
            SortField::Name => |a| FieldValue::Text(&a.name),
            SortField::Symbol => |a| FieldValue::Text(&a.symbol),
            SortField::LogoUrl => |a| match &a.logo_url {
                Some(url) => FieldValue::Text(url),
                None => FieldValue::Absent,
            },
            SortField::Price => |a| FieldValue::Number(a.price),
            SortField::Change1h => |a| FieldValue::Number(a.change_1h),
            SortField::Change24h => |a| FieldValue::Number(a.change_24h),
            SortField::Change7d => |a| FieldValue::Number(a.change_7d),
            SortField::MarketCap => |a| FieldValue::Number(a.market_cap),
            SortField::Volume24h => |a| FieldValue::Number(a.volume_24h),
            SortField::CirculatingSupply => |a| FieldValue::Number(a.circulating_supply),
            SortField::MaxSupply => |a| match a.max_supply {
                Some(cap) => FieldValue::Number(cap),
                None => FieldValue::Absent,
            },
            SortField::TrendSeries => |_| FieldValue::Unsupported,
        }
    }
}

impl FieldValue<'_> {
    /// Ascending order. Absent values go after present ones; mismatched or unsupported
    /// kinds compare equal so the stable sort keeps their input order.
    pub fn compare(&self, other: &Self) -> Ordering {
        match (self, other) {
            (FieldValue::Text(a), FieldValue::Text(b)) => locale_compare(a, b),
            (FieldValue::Number(a), FieldValue::Number(b)) => a.total_cmp(b),
            (FieldValue::Absent, FieldValue::Absent) => Ordering::Equal,
            (FieldValue::Absent, FieldValue::Text(_) | FieldValue::Number(_)) => Ordering::Greater,
            (FieldValue::Text(_) | FieldValue::Number(_), FieldValue::Absent) => Ordering::Less,
            _ => Ordering::Equal,
        }
    }
}

/// Case-insensitive first, then lowercase before uppercase, then code point order.
fn locale_compare(a: &str, b: &str) -> Ordering {
    let folded = a
        .chars()
        .flat_map(char::to_lowercase)
        .cmp(b.chars().flat_map(char::to_lowercase));

    folded
        .then_with(|| {
            a.chars()
                .map(char::is_uppercase)
                .cmp(b.chars().map(char::is_uppercase))
        })
        .then_with(|| a.cmp(b))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, Display, EnumString)]
#[serde(rename_all = "lowercase")]
#[strum(ascii_case_insensitive)]
pub enum SortDirection {
    #[strum(to_string = "asc", serialize = "ascending")]
    Ascending,
    #[default]
    #[strum(to_string = "desc", serialize = "descending")]
    Descending,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SortDirective {
    pub field: SortField,
    pub direction: SortDirection,
}

impl SortDirective {
    pub fn new(field: SortField, direction: SortDirection) -> Self {
        Self { field, direction }
    }

    pub fn ascending(field: SortField) -> Self {
        Self::new(field, SortDirection::Ascending)
    }

    pub fn descending(field: SortField) -> Self {
        Self::new(field, SortDirection::Descending)
    }
}

impl std::fmt::Display for SortDirective {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.field, self.direction)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;
    use strum::IntoEnumIterator;

    #[test]
    fn field_names_round_trip_through_display() {
        for field in SortField::iter() {
            assert_eq!(SortField::from_str(&field.to_string()).unwrap(), field);
        }
        assert_eq!(SortField::MarketCap.to_string(), "marketCap");
        assert_eq!(SortField::Change24h.to_string(), "change24h");
    }

    #[test]
    fn field_parsing_is_case_insensitive_with_logo_alias() {
        assert_eq!(SortField::from_str("MARKETCAP").unwrap(), SortField::MarketCap);
        assert_eq!(SortField::from_str("logo").unwrap(), SortField::LogoUrl);
        assert!(SortField::from_str("colour").is_err());
    }

    #[test]
    fn direction_parses_short_and_long_forms() {
        assert_eq!(SortDirection::from_str("asc").unwrap(), SortDirection::Ascending);
        assert_eq!(SortDirection::from_str("Descending").unwrap(), SortDirection::Descending);
    }

    #[test]
    fn default_directive_is_market_cap_descending() {
        assert_eq!(SortDirective::default(), SortDirective::descending(SortField::MarketCap));
    }

    #[test]
    fn locale_compare_ignores_case_first() {
        assert_eq!(locale_compare("bitcoin", "Cardano"), Ordering::Less);
        assert_eq!(locale_compare("a", "A"), Ordering::Less);
        assert_eq!(locale_compare("Tether", "tether"), Ordering::Greater);
        assert_eq!(locale_compare("eth", "eth"), Ordering::Equal);
    }

    #[test]
    fn absent_sorts_after_present() {
        assert_eq!(FieldValue::Absent.compare(&FieldValue::Number(1.0)), Ordering::Greater);
        assert_eq!(FieldValue::Number(1.0).compare(&FieldValue::Absent), Ordering::Less);
        assert_eq!(FieldValue::Unsupported.compare(&FieldValue::Number(1.0)), Ordering::Equal);
    }
}
