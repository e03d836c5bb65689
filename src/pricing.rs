//! Price lookups for a whole inventory
//!
//! Lookups run strictly one after another with a fixed pause between keys
//! to stay under the API rate limit.

use crate::bricklink::PriceSource;
use crate::models::{Condition, DedupKey, LineItem, LookupOutcome, PriceLookup};
use std::collections::HashMap;
use std::time::Duration;

/// Default pause after each processed key
pub const DEFAULT_THROTTLE: Duration = Duration::from_millis(100);

/// How quantities of line items sharing a dedup key are attached to the result
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum QuantityPolicy {
    /// Keep the quantity of the first line item seen for the key
    #[default]
    FirstSeen,
    /// Add up the quantities of all line items with the key
    Sum,
}

#[derive(Debug, Clone)]
pub struct PricingOptions {
    /// Only price line items with this condition
    pub condition_filter: Option<Condition>,
    pub throttle: Duration,
    pub quantity_policy: QuantityPolicy,
}

impl Default for PricingOptions {
    fn default() -> Self {
        Self {
            condition_filter: None,
            throttle: DEFAULT_THROTTLE,
            quantity_policy: QuantityPolicy::default(),
        }
    }
}

/// Look up prices for every eligible unique key, in order of first appearance.
pub fn fetch_prices<S>(source: &S, items: &[LineItem], options: &PricingOptions) -> Vec<PriceLookup>
where
    S: PriceSource + ?Sized,
{
    let mut results: Vec<PriceLookup> = Vec::new();
    let mut seen: HashMap<DedupKey, usize> = HashMap::new();
    let total = items.len();

    log::info!("Getting prices for {} entries...", total);

    for (i, item) in items.iter().enumerate() {
        if options
            .condition_filter
            .is_some_and(|wanted| wanted != item.condition)
        {
            continue;
        }

        let key = item.dedup_key();
        if let Some(&index) = seen.get(&key) {
            if options.quantity_policy == QuantityPolicy::Sum {
                let result = &mut results[index];
                result.quantity = result.quantity.saturating_add(item.quantity);
            }
            continue;
        }

        log::info!(
            "[{}/{}] Getting price for {} ({}, {})...",
            i + 1,
            total,
            item.item_id,
            item.item_type,
            item.condition
        );

        seen.insert(key, results.len());
        results.push(lookup_item(source, item));

        if !options.throttle.is_zero() {
            std::thread::sleep(options.throttle);
        }
    }

    results
}

/// Primary lookup plus the used-to-new fallback
fn lookup_item<S>(source: &S, item: &LineItem) -> PriceLookup
where
    S: PriceSource + ?Sized,
{
    let mut outcome = source.fetch_price(&item.item_id, item.item_type, item.condition);
    let mut fallback_used = false;

    let needs_fallback = item.condition == Condition::Used
        && matches!(&outcome, LookupOutcome::Success { guide } if guide.avg_price().is_none());

    if needs_fallback {
        log::info!("  No used price found, checking new price...");
        match source.fetch_price(&item.item_id, item.item_type, Condition::New) {
            LookupOutcome::Success { guide } if guide.avg_price().is_some() => {
                log::info!("  Using new price: ${}", guide.avg_price().unwrap_or_default());
                outcome = LookupOutcome::Success { guide };
                fallback_used = true;
            }
            _ => log::debug!("  No new price for {} either", item.item_id),
        }
    }

    if let LookupOutcome::Failure { error, .. } = &outcome {
        log::warn!("  Failed to get price for {}: {}", item.item_id, error);
    }

    PriceLookup {
        item_id: item.item_id.clone(),
        item_type: item.item_type,
        condition: item.condition,
        quantity: item.quantity,
        fallback_used,
        outcome,
    }
}

#[cfg(test)]
#[path = "pricing_tests.rs"]
mod tests;
