use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;

/// Catalog item types supported by the price guide
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ItemType {
    #[serde(rename = "MINIFIG")]
    Minifigure,
    #[serde(rename = "PART")]
    Part,
    #[serde(rename = "SET")]
    Set,
}

impl ItemType {
    /// Parse an inventory `ITEMTYPE` code (e.g., "M", "P", "S")
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "M" => Some(ItemType::Minifigure),
            "P" => Some(ItemType::Part),
            "S" => Some(ItemType::Set),
            _ => None,
        }
    }

    /// Returns the inventory `ITEMTYPE` code
    pub fn code(&self) -> &'static str {
        match self {
            ItemType::Minifigure => "M",
            ItemType::Part => "P",
            ItemType::Set => "S",
        }
    }

    /// Returns the type string used in API paths (always uppercase)
    pub fn api_name(&self) -> &'static str {
        match self {
            ItemType::Minifigure => "MINIFIG",
            ItemType::Part => "PART",
            ItemType::Set => "SET",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ItemType::Minifigure => "minifigure",
            ItemType::Part => "part",
            ItemType::Set => "set",
        }
    }
}

impl fmt::Display for ItemType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.api_name())
    }
}

/// Item condition: new or used
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
pub enum Condition {
    #[serde(rename = "N")]
    New,
    #[default]
    #[serde(rename = "U")]
    Used,
}

impl Condition {
    /// Returns the single-letter code used in inventories and API queries
    pub fn code(&self) -> &'static str {
        match self {
            Condition::New => "N",
            Condition::Used => "U",
        }
    }

    /// Parse a condition code ("N"/"U") or word ("new"/"used"), case-insensitive
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "n" | "new" => Some(Condition::New),
            "u" | "used" => Some(Condition::Used),
            _ => None,
        }
    }
}

impl FromStr for Condition {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Condition::parse(s).ok_or_else(|| format!("invalid condition '{s}' (expected N or U)"))
    }
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// One normalized entry from the inventory, before deduplication
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineItem {
    pub item_id: String,
    pub item_type: ItemType,
    pub color_id: u32,
    pub quantity: u32,
    pub condition: Condition,
}

impl LineItem {
    pub fn dedup_key(&self) -> DedupKey {
        DedupKey {
            item_id: self.item_id.clone(),
            item_type: self.item_type,
            condition: self.condition,
        }
    }
}

/// Identifies one price lookup; at most one lookup is made per key per run
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DedupKey {
    pub item_id: String,
    pub item_type: ItemType,
    pub condition: Condition,
}

/// Price guide payload (`data` of the price guide response)
///
/// Prices are kept as the decimal strings the API returns. Fields this crate
/// does not interpret (`item`, `price_detail`, ...) are preserved in `extra`
/// so the detailed export carries the full payload.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PriceGuide {
    #[serde(default, deserialize_with = "price_string", skip_serializing_if = "Option::is_none")]
    pub avg_price: Option<String>,
    #[serde(default, deserialize_with = "price_string", skip_serializing_if = "Option::is_none")]
    pub min_price: Option<String>,
    #[serde(default, deserialize_with = "price_string", skip_serializing_if = "Option::is_none")]
    pub max_price: Option<String>,
    #[serde(default, deserialize_with = "price_string", skip_serializing_if = "Option::is_none")]
    pub qty_avg_price: Option<String>,
    /// Number of units currently listed for sale
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_quantity: Option<u64>,
    /// Prices are quoted per this many units
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit_quantity: Option<u64>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl PriceGuide {
    /// Average price, if the API quoted a non-empty one
    pub fn avg_price(&self) -> Option<&str> {
        non_empty(&self.avg_price)
    }

    /// Average price as a number, if it parses
    pub fn avg_price_value(&self) -> Option<f64> {
        self.avg_price().and_then(|p| p.trim().parse::<f64>().ok())
    }

    pub fn min_price(&self) -> Option<&str> {
        non_empty(&self.min_price)
    }

    pub fn max_price(&self) -> Option<&str> {
        non_empty(&self.max_price)
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|s| !s.trim().is_empty())
}

/// Accepts prices sent either as strings ("12.3400") or as bare numbers
fn price_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<serde_json::Value>::deserialize(deserializer)? {
        Some(serde_json::Value::String(s)) => Some(s),
        Some(serde_json::Value::Number(n)) => Some(n.to_string()),
        _ => None,
    })
}

/// Outcome of a single price lookup
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "result", rename_all = "snake_case")]
pub enum LookupOutcome {
    Success {
        guide: PriceGuide,
    },
    Failure {
        error: String,
        /// HTTP status of the response, when one was received
        status: Option<u16>,
    },
}

impl LookupOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, LookupOutcome::Success { .. })
    }
}

/// Price lookup result for one unique (item, type, condition) key
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PriceLookup {
    pub item_id: String,
    pub item_type: ItemType,
    /// Condition of the inventory entry; unchanged when new-condition prices were substituted
    pub condition: Condition,
    pub quantity: u32,
    /// True when the guide came from a new-condition lookup
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub fallback_used: bool,
    pub outcome: LookupOutcome,
}

impl PriceLookup {
    pub fn is_success(&self) -> bool {
        self.outcome.is_success()
    }

    pub fn guide(&self) -> Option<&PriceGuide> {
        match &self.outcome {
            LookupOutcome::Success { guide } => Some(guide),
            LookupOutcome::Failure { .. } => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match &self.outcome {
            LookupOutcome::Success { .. } => None,
            LookupOutcome::Failure { error, .. } => Some(error),
        }
    }

    /// Average price as a number; `None` for failed lookups or missing prices
    pub fn average_price(&self) -> Option<f64> {
        self.guide().and_then(PriceGuide::avg_price_value)
    }
}
