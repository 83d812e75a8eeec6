//! GRI code module - topic categories for sustainability disclosures

use std::fmt;

/// Separator between a GRI category prefix and the disclosure number
pub const CODE_SEPARATOR: char = '-';

/// Environmental topic categories tracked by the dashboard
///
/// Each category is identified by the leading digits of a GRI code:
/// - Energy: `302-*`
/// - Water: `303-*`
/// - Emissions: `305-*`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GriCategory {
    /// GRI 302: Energy
    Energy,

    /// GRI 303: Water and Effluents
    Water,

    /// GRI 305: Emissions
    Emissions,
}

impl GriCategory {
    /// All tracked categories, in GRI order
    pub const ALL: [GriCategory; 3] = [GriCategory::Energy, GriCategory::Water, GriCategory::Emissions];

    /// The code prefix that identifies this category
    pub fn prefix(&self) -> &'static str {
        match self {
            GriCategory::Energy => "302",
            GriCategory::Water => "303",
            GriCategory::Emissions => "305",
        }
    }

    /// Human-readable topic name
    pub fn as_str(&self) -> &'static str {
        match self {
            GriCategory::Energy => "energy",
            GriCategory::Water => "water",
            GriCategory::Emissions => "emissions",
        }
    }

    /// The tracked category with exactly this prefix, if any
    pub fn from_prefix(prefix: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.prefix() == prefix)
    }

    /// Whether a GRI code belongs to this category
    ///
    /// This is a plain prefix test on the raw code string, so `3021` would
    /// also count as energy. A missing code never matches.
    pub fn matches(&self, gri_code: Option<&str>) -> bool {
        gri_code.is_some_and(|code| code.starts_with(self.prefix()))
    }
}

impl fmt::Display for GriCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Category prefix of a GRI code: everything before the first `-`
///
/// A code without a separator is its own prefix.
///
/// # Examples
///
/// ```
/// use altrua_domain::category_prefix;
///
/// assert_eq!(category_prefix("302-1"), "302");
/// assert_eq!(category_prefix("2-22-a"), "2");
/// assert_eq!(category_prefix("305"), "305");
/// ```
pub fn category_prefix(gri_code: &str) -> &str {
    match gri_code.split_once(CODE_SEPARATOR) {
        Some((prefix, _)) => prefix,
        None => gri_code,
    }
}
