//! Console output: per-item price info and the price summary

use crate::models::{PriceGuide, PriceLookup};

/// One-line description of a price guide, e.g. "Average: $4.50 | Range: $2.00 - $8.00"
pub fn format_price_info(guide: &PriceGuide) -> String {
    let mut parts = Vec::new();

    if let Some(avg) = guide.avg_price() {
        parts.push(format!("Average: ${avg}"));
    }

    if let (Some(min), Some(max)) = (guide.min_price(), guide.max_price()) {
        parts.push(format!("Range: ${min} - ${max}"));
    }

    if let Some(available) = guide.total_quantity.filter(|q| *q > 0) {
        parts.push(format!("Qty Available: {available}"));
    }

    if let Some(units) = guide.unit_quantity.filter(|u| *u > 1) {
        parts.push(format!("Price per {units} units"));
    }

    if parts.is_empty() {
        "No pricing information".to_string()
    } else {
        parts.join(" | ")
    }
}

/// Sum of average price times quantity over successful lookups with a numeric price
pub fn estimated_total_value(results: &[PriceLookup]) -> f64 {
    results
        .iter()
        .filter_map(|r| r.average_price().map(|avg| avg * r.quantity as f64))
        .sum()
}

/// Summary table of successful lookups, the estimated total value and the failures
pub fn format_price_summary(results: &[PriceLookup]) -> String {
    let (successful, failed): (Vec<&PriceLookup>, Vec<&PriceLookup>) =
        results.iter().partition(|r| r.is_success());
    let rule = "=".repeat(80);

    let mut output = String::new();
    output.push_str(&format!("\n{rule}\nPRICE SUMMARY\n{rule}\n"));
    output.push_str(&format!(
        "Successfully retrieved: {} prices\n",
        successful.len()
    ));
    output.push_str(&format!("Failed: {} items\n", failed.len()));
    output.push_str(&format!("{rule}\n"));

    if !successful.is_empty() {
        output.push_str(&format!(
            "\n{:<12} {:<4} {:<3} {}\n",
            "Item", "Cond", "Qty", "Price Info"
        ));
        output.push_str(&format!(
            "{} {} {} {}\n",
            "-".repeat(12),
            "-".repeat(4),
            "-".repeat(3),
            "-".repeat(50)
        ));

        for result in &successful {
            let price_info = result
                .guide()
                .map(format_price_info)
                .unwrap_or_else(|| "No price data available".to_string());
            output.push_str(&format!(
                "{:<12} {:<4} {:<3} {}\n",
                result.item_id,
                result.condition.code(),
                result.quantity,
                price_info
            ));
        }

        let total = estimated_total_value(results);
        if total > 0.0 {
            output.push_str(&format!(
                "\nEstimated Total Collection Value: ${total:.2}\n"
            ));
        }
    }

    if !failed.is_empty() {
        output.push_str("\nFAILED TO GET PRICES FOR:\n");
        for result in &failed {
            output.push_str(&format!(
                "  {}: {}\n",
                result.item_id,
                result.error().unwrap_or_default()
            ));
        }
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Condition, ItemType, LookupOutcome};

    fn guide(avg: Option<&str>, min: Option<&str>, max: Option<&str>) -> PriceGuide {
        PriceGuide {
            avg_price: avg.map(str::to_string),
            min_price: min.map(str::to_string),
            max_price: max.map(str::to_string),
            ..Default::default()
        }
    }

    fn lookup(id: &str, quantity: u32, outcome: LookupOutcome) -> PriceLookup {
        PriceLookup {
            item_id: id.to_string(),
            item_type: ItemType::Minifigure,
            condition: Condition::Used,
            quantity,
            fallback_used: false,
            outcome,
        }
    }

    #[test]
    fn price_info_joins_available_fields() {
        let mut g = guide(Some("4.50"), Some("2.00"), Some("8.00"));
        g.total_quantity = Some(12);
        g.unit_quantity = Some(3);
        assert_eq!(
            format_price_info(&g),
            "Average: $4.50 | Range: $2.00 - $8.00 | Qty Available: 12 | Price per 3 units"
        );
    }

    #[test]
    fn price_info_needs_both_range_ends() {
        let g = guide(Some("4.50"), Some("2.00"), None);
        assert_eq!(format_price_info(&g), "Average: $4.50");
    }

    #[test]
    fn price_info_ignores_single_unit_quantity() {
        let mut g = guide(None, None, None);
        g.unit_quantity = Some(1);
        assert_eq!(format_price_info(&g), "No pricing information");
    }

    #[test]
    fn total_value_skips_failures_and_unparseable_prices() {
        let results = vec![
            lookup("a", 2, LookupOutcome::Success { guide: guide(Some("10.00"), None, None) }),
            lookup("b", 1, LookupOutcome::Success { guide: guide(Some("n/a"), None, None) }),
            lookup(
                "c",
                5,
                LookupOutcome::Failure {
                    error: "boom".to_string(),
                    status: None,
                },
            ),
        ];
        assert!((estimated_total_value(&results) - 20.0).abs() < 1e-9);
    }

    #[test]
    fn summary_lists_successes_total_and_failures() {
        let results = vec![
            lookup("sw0001a", 2, LookupOutcome::Success { guide: guide(Some("3.25"), None, None) }),
            lookup(
                "sw9999",
                1,
                LookupOutcome::Failure {
                    error: "RESOURCE_NOT_FOUND - Item not found".to_string(),
                    status: Some(404),
                },
            ),
        ];

        let summary = format_price_summary(&results);
        assert!(summary.contains("Successfully retrieved: 1 prices"));
        assert!(summary.contains("Failed: 1 items"));
        assert!(summary.contains("sw0001a      U    2   Average: $3.25"));
        assert!(summary.contains("Estimated Total Collection Value: $6.50"));
        assert!(summary.contains("  sw9999: RESOURCE_NOT_FOUND - Item not found"));
    }

    #[test]
    fn summary_omits_total_when_nothing_priced() {
        let results = vec![lookup("x", 1, LookupOutcome::Success { guide: guide(None, None, None) })];
        let summary = format_price_summary(&results);
        assert!(!summary.contains("Estimated Total"));
        assert!(summary.contains("No pricing information"));
    }
}
