//! BrickLink XML inventory parsing

use crate::error::{PricerError, Result};
use crate::models::{Condition, ItemType, LineItem};
use std::collections::{BTreeSet, HashSet};
use std::num::IntErrorKind;
use std::path::Path;

/// Line items accepted from an inventory, plus how many entries were skipped
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ParsedInventory {
    pub items: Vec<LineItem>,
    pub skipped: usize,
}

impl ParsedInventory {
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Read and parse an inventory file
pub fn parse_inventory(path: &Path) -> Result<ParsedInventory> {
    let content = std::fs::read_to_string(path).map_err(|e| match e.kind() {
        std::io::ErrorKind::NotFound => PricerError::InventoryNotFound(path.to_path_buf()),
        _ => PricerError::Io(e),
    })?;
    parse_inventory_str(&content)
}

/// Parse inventory XML. Every `ITEM` element in the document is considered, in order.
pub fn parse_inventory_str(xml: &str) -> Result<ParsedInventory> {
    let doc = roxmltree::Document::parse(xml)?;
    let mut inventory = ParsedInventory::default();

    for node in doc.descendants().filter(|n| n.has_tag_name("ITEM")) {
        match parse_item(node) {
            Some(item) => inventory.items.push(item),
            None => {
                log::debug!(
                    "Skipping inventory entry at byte {}: missing or unsupported ITEMTYPE/ITEMID/CONDITION",
                    node.range().start
                );
                inventory.skipped += 1;
            }
        }
    }

    log::debug!(
        "Parsed {} inventory entries ({} skipped)",
        inventory.items.len(),
        inventory.skipped
    );
    Ok(inventory)
}

/// Parse an inventory file, reporting problems to the user instead of failing.
///
/// Returns an empty inventory when the file is missing or malformed.
pub fn load_inventory(path: &Path) -> ParsedInventory {
    match parse_inventory(path) {
        Ok(inventory) => inventory,
        Err(e) => {
            log::error!("Failed to read inventory {}: {}", path.display(), e);
            println!("Error: {e}");
            ParsedInventory::default()
        }
    }
}

fn child_text<'a>(node: roxmltree::Node<'a, '_>, tag: &str) -> Option<&'a str> {
    node.children()
        .find(|c| c.has_tag_name(tag))
        .map(|c| c.text().unwrap_or("").trim())
}

fn parse_item(node: roxmltree::Node<'_, '_>) -> Option<LineItem> {
    let item_type = child_text(node, "ITEMTYPE").and_then(ItemType::from_code)?;
    let item_id = child_text(node, "ITEMID").filter(|id| !id.is_empty())?;

    let condition = match child_text(node, "CONDITION") {
        None | Some("") => Condition::Used,
        Some(code) => Condition::parse(code)?,
    };

    let color_id = child_text(node, "COLOR")
        .and_then(|c| c.parse::<u32>().ok())
        .unwrap_or(0);

    let quantity = child_text(node, "QTY")
        .and_then(|q| parse_quantity(item_id, q))
        .filter(|q| *q > 0)
        .unwrap_or(1);

    Some(LineItem {
        item_id: item_id.to_string(),
        item_type,
        color_id,
        quantity,
        condition,
    })
}

/// Numeric quantities too large for a line item are capped at `u32::MAX`
fn parse_quantity(item_id: &str, text: &str) -> Option<u32> {
    match text.parse::<u32>() {
        Ok(quantity) => Some(quantity),
        Err(e) if *e.kind() == IntErrorKind::PosOverflow => {
            log::warn!(
                "Quantity {} for {} is too large, using {}",
                text,
                item_id,
                u32::MAX
            );
            Some(u32::MAX)
        }
        Err(_) => None,
    }
}

/// Pre-flight statistics about a parsed inventory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InventoryStats {
    pub entries: usize,
    pub item_types: BTreeSet<ItemType>,
    pub unique_items: usize,
    pub total_quantity: u64,
    pub conditions: BTreeSet<Condition>,
}

impl InventoryStats {
    pub fn from_items(items: &[LineItem]) -> Self {
        let unique_items: HashSet<&str> = items.iter().map(|i| i.item_id.as_str()).collect();
        Self {
            entries: items.len(),
            item_types: items.iter().map(|i| i.item_type).collect(),
            unique_items: unique_items.len(),
            total_quantity: items.iter().map(|i| u64::from(i.quantity)).sum(),
            conditions: items.iter().map(|i| i.condition).collect(),
        }
    }

    /// Item type labels joined for display, e.g. "minifigure, part"
    pub fn type_labels(&self) -> String {
        self.item_types
            .iter()
            .map(ItemType::label)
            .collect::<Vec<_>>()
            .join(", ")
    }

    pub fn condition_codes(&self) -> String {
        self.conditions
            .iter()
            .map(Condition::code)
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// Number of line items with the given condition
pub fn count_with_condition(items: &[LineItem], condition: Condition) -> usize {
    items.iter().filter(|i| i.condition == condition).count()
}

#[cfg(test)]
#[path = "inventory_tests.rs"]
mod tests;
