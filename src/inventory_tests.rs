//! Tests for inventory parsing

use super::*;
use std::io::Write;

fn sample_inventory() -> String {
    r#"<INVENTORY>
    <ITEM>
        <ITEMTYPE>M</ITEMTYPE>
        <ITEMID>sw0001a</ITEMID>
        <COLOR>0</COLOR>
        <QTY>2</QTY>
        <CONDITION>U</CONDITION>
    </ITEM>
    <ITEM>
        <ITEMTYPE>P</ITEMTYPE>
        <ITEMID>3001</ITEMID>
        <COLOR>5</COLOR>
        <QTY>10</QTY>
        <CONDITION>N</CONDITION>
    </ITEM>
    <ITEM>
        <ITEMTYPE>S</ITEMTYPE>
        <ITEMID>75192-1</ITEMID>
    </ITEM>
</INVENTORY>"#
        .to_string()
}

#[test]
fn parses_all_valid_entries_in_order() {
    let inventory = parse_inventory_str(&sample_inventory()).unwrap();

    assert_eq!(inventory.skipped, 0);
    let ids: Vec<&str> = inventory.items.iter().map(|i| i.item_id.as_str()).collect();
    assert_eq!(ids, vec!["sw0001a", "3001", "75192-1"]);

    let part = &inventory.items[1];
    assert_eq!(part.item_type, ItemType::Part);
    assert_eq!(part.color_id, 5);
    assert_eq!(part.quantity, 10);
    assert_eq!(part.condition, Condition::New);
}

#[test]
fn applies_defaults_for_missing_fields() {
    let inventory = parse_inventory_str(&sample_inventory()).unwrap();
    let set = &inventory.items[2];

    assert_eq!(set.item_type, ItemType::Set);
    assert_eq!(set.color_id, 0);
    assert_eq!(set.quantity, 1);
    assert_eq!(set.condition, Condition::Used);
}

#[test]
fn non_numeric_quantity_defaults_to_one() {
    let xml = r#"<INVENTORY>
        <ITEM><ITEMTYPE>M</ITEMTYPE><ITEMID>a</ITEMID><QTY>lots</QTY></ITEM>
        <ITEM><ITEMTYPE>M</ITEMTYPE><ITEMID>b</ITEMID><QTY>-3</QTY></ITEM>
        <ITEM><ITEMTYPE>M</ITEMTYPE><ITEMID>c</ITEMID><QTY></QTY></ITEM>
        <ITEM><ITEMTYPE>M</ITEMTYPE><ITEMID>d</ITEMID><QTY>0</QTY></ITEM>
    </INVENTORY>"#;

    let inventory = parse_inventory_str(xml).unwrap();
    assert_eq!(inventory.items.len(), 4);
    assert!(inventory.items.iter().all(|i| i.quantity == 1));
}

#[test]
fn oversized_quantity_is_capped_not_reset() {
    let xml = r#"<INVENTORY>
        <ITEM><ITEMTYPE>P</ITEMTYPE><ITEMID>3001</ITEMID><QTY>4294967295</QTY></ITEM>
        <ITEM><ITEMTYPE>P</ITEMTYPE><ITEMID>3002</ITEMID><QTY>4294967296</QTY></ITEM>
        <ITEM><ITEMTYPE>P</ITEMTYPE><ITEMID>3003</ITEMID><QTY>99999999999999999999999</QTY></ITEM>
    </INVENTORY>"#;

    let inventory = parse_inventory_str(xml).unwrap();
    let quantities: Vec<u32> = inventory.items.iter().map(|i| i.quantity).collect();
    assert_eq!(quantities, vec![u32::MAX, u32::MAX, u32::MAX]);
}

#[test]
fn skips_entries_without_type_or_id() {
    let xml = r#"<INVENTORY>
        <ITEM><ITEMID>no-type</ITEMID></ITEM>
        <ITEM><ITEMTYPE>X</ITEMTYPE><ITEMID>bad-type</ITEMID></ITEM>
        <ITEM><ITEMTYPE>M</ITEMTYPE></ITEM>
        <ITEM><ITEMTYPE>M</ITEMTYPE><ITEMID>   </ITEMID></ITEM>
        <ITEM><ITEMTYPE>M</ITEMTYPE><ITEMID>sw0002</ITEMID></ITEM>
    </INVENTORY>"#;

    let inventory = parse_inventory_str(xml).unwrap();
    assert_eq!(inventory.items.len(), 1);
    assert_eq!(inventory.items[0].item_id, "sw0002");
    assert_eq!(inventory.skipped, 4);
}

#[test]
fn skips_unknown_condition_but_defaults_blank() {
    let xml = r#"<INVENTORY>
        <ITEM><ITEMTYPE>P</ITEMTYPE><ITEMID>3001</ITEMID><CONDITION>X</CONDITION></ITEM>
        <ITEM><ITEMTYPE>P</ITEMTYPE><ITEMID>3002</ITEMID><CONDITION></CONDITION></ITEM>
    </INVENTORY>"#;

    let inventory = parse_inventory_str(xml).unwrap();
    assert_eq!(inventory.skipped, 1);
    assert_eq!(inventory.items[0].item_id, "3002");
    assert_eq!(inventory.items[0].condition, Condition::Used);
}

#[test]
fn finds_nested_items() {
    let xml = r#"<ROOT><GROUP><INVENTORY>
        <ITEM><ITEMTYPE>S</ITEMTYPE><ITEMID>10179-1</ITEMID></ITEM>
    </INVENTORY></GROUP></ROOT>"#;

    let inventory = parse_inventory_str(xml).unwrap();
    assert_eq!(inventory.items.len(), 1);
}

#[test]
fn malformed_xml_is_an_error() {
    let result = parse_inventory_str("<INVENTORY><ITEM></INVENTORY>");
    assert!(matches!(result, Err(PricerError::Xml(_))));
}

#[test]
fn parse_inventory_reports_missing_file() {
    let result = parse_inventory(Path::new("/nonexistent/Minifigures.xml"));
    match result {
        Err(PricerError::InventoryNotFound(path)) => {
            assert_eq!(path, Path::new("/nonexistent/Minifigures.xml"));
        }
        other => panic!("Expected InventoryNotFound, got: {other:?}"),
    }
}

#[test]
fn load_inventory_returns_empty_on_error() {
    let mut tmp = tempfile::NamedTempFile::new().unwrap();
    write!(tmp, "<INVENTORY><ITEM>").unwrap();

    let inventory = load_inventory(tmp.path());
    assert!(inventory.is_empty());

    let missing = load_inventory(Path::new("/nonexistent/Parts.xml"));
    assert!(missing.is_empty());
}

#[test]
fn load_inventory_reads_file() {
    let mut tmp = tempfile::NamedTempFile::new().unwrap();
    write!(tmp, "{}", sample_inventory()).unwrap();

    let inventory = load_inventory(tmp.path());
    assert_eq!(inventory.items.len(), 3);
}

#[test]
fn stats_summarize_inventory() {
    let mut inventory = parse_inventory_str(&sample_inventory()).unwrap();
    inventory.items.push(inventory.items[0].clone());

    let stats = InventoryStats::from_items(&inventory.items);
    assert_eq!(stats.entries, 4);
    assert_eq!(stats.unique_items, 3);
    assert_eq!(stats.total_quantity, 2 + 10 + 1 + 2);
    assert_eq!(stats.type_labels(), "minifigure, part, set");
    assert_eq!(stats.condition_codes(), "N, U");
    assert_eq!(count_with_condition(&inventory.items, Condition::Used), 3);
}
