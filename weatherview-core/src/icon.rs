use serde::{Deserialize, Serialize};

/// Which illustration to show next to the current conditions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IconCategory {
    Clear,
    Cloudy,
    Rainy,
    Drizzle,
    Snow,
    Hot,
}

impl IconCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            IconCategory::Clear => "clear",
            IconCategory::Cloudy => "cloudy",
            IconCategory::Rainy => "rainy",
            IconCategory::Drizzle => "drizzle",
            IconCategory::Snow => "snow",
            IconCategory::Hot => "hot",
        }
    }

    pub const fn all() -> &'static [IconCategory] {
        &[
            IconCategory::Clear,
            IconCategory::Cloudy,
            IconCategory::Rainy,
            IconCategory::Drizzle,
            IconCategory::Snow,
            IconCategory::Hot,
        ]
    }
}

impl std::fmt::Display for IconCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Temperature condition of a single rule, in degrees Celsius.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Threshold {
    /// Strictly greater than.
    Above(f64),
    /// Less than or equal to.
    AtMost(f64),
}

impl Threshold {
    fn admits(&self, temperature_c: f64) -> bool {
        match *self {
            Threshold::Above(limit) => temperature_c > limit,
            Threshold::AtMost(limit) => temperature_c <= limit,
        }
    }
}

/// One row of the icon decision table.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IconRule {
    pub threshold: Threshold,
    /// Lowercase substring the condition text must contain, if any.
    pub keyword: Option<&'static str>,
    pub category: IconCategory,
}

impl IconRule {
    /// `condition` must already be lowercased.
    fn matches(&self, condition: &str, temperature_c: f64) -> bool {
        self.threshold.admits(temperature_c)
            && self.keyword.is_none_or(|keyword| condition.contains(keyword))
    }
}

const FALLBACK: IconCategory = IconCategory::Clear;

// Evaluated top to bottom, first match wins.
const ICON_RULES: &[IconRule] = &[
    IconRule { threshold: Threshold::Above(35.0), keyword: None, category: IconCategory::Hot },
    IconRule {
        threshold: Threshold::Above(25.0),
        keyword: Some("clear"),
        category: IconCategory::Clear,
    },
    IconRule {
        threshold: Threshold::Above(20.0),
        keyword: Some("cloud"),
        category: IconCategory::Cloudy,
    },
    IconRule {
        threshold: Threshold::Above(10.0),
        keyword: Some("rain"),
        category: IconCategory::Rainy,
    },
    IconRule {
        threshold: Threshold::Above(5.0),
        keyword: Some("drizzle"),
        category: IconCategory::Drizzle,
    },
    IconRule { threshold: Threshold::AtMost(5.0), keyword: None, category: IconCategory::Snow },
];

/// The ordered decision table used by [`pick_icon`].
pub fn icon_rules() -> &'static [IconRule] {
    ICON_RULES
}

/// Map a provider condition (e.g. "Clouds") and the unrounded temperature to
/// an icon. Keyword matching is case-insensitive substring containment.
pub fn pick_icon(condition: &str, temperature_c: f64) -> IconCategory {
    let condition = condition.to_lowercase();

    ICON_RULES
        .iter()
        .find(|rule| rule.matches(&condition, temperature_c))
        .map_or(FALLBACK, |rule| rule.category)
}
