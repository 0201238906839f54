//! Console renderings of search results and of the full dataset.

use crate::keyword::KeywordMatch;
use crate::model::{Dataset, Grouped, NearbyCanteen, PriceHit};
use crate::price::PriceRange;

pub fn keyword_report(found: &KeywordMatch) -> String {
    let mut lines = vec![format!(
        "{} food stall(s) found matching keyword '{}':",
        found.results.total(),
        found.term
    )];
    for (canteen, hit) in found.results.iter() {
        lines.push(format!("{} - {} ({})", canteen, hit.stall, hit.keywords));
    }
    lines.join("\n")
}

pub fn price_report(range: PriceRange, results: &Grouped<PriceHit>) -> String {
    let mut lines = vec![format!(
        "{} food stall(s) found within specified price range (S${:.2} - S${:.2}):",
        results.total(),
        range.min(),
        range.max()
    )];
    for (canteen, hit) in results.iter() {
        lines.push(format!("{} ({}) - S${:.2}", hit.stall, canteen, hit.price));
    }
    lines.join("\n")
}

/// Distances are shown truncated to whole metres.
pub fn nearest_report(results: &[NearbyCanteen]) -> String {
    let mut lines = vec![format!("{} nearest canteen(s) found:", results.len())];
    for r in results {
        lines.push(format!("{} - {:.0}m", r.canteen, r.distance.trunc()));
    }
    lines.join("\n")
}

pub fn dataset_report(dataset: &Dataset) -> String {
    let canteens = dataset.canteen_names();
    let mut lines = vec!["Keyword Data".to_string(), "------------".to_string()];
    for canteen in &canteens {
        lines.push(format!("{canteen}:"));
        for s in dataset.stalls_in(canteen) {
            lines.push(format!("{} ({})", s.stall, s.keywords));
        }
        lines.push(String::new());
    }

    lines.push("Price Data".to_string());
    lines.push("----------".to_string());
    for canteen in &canteens {
        lines.push(format!("{canteen}:"));
        for s in dataset.stalls_in(canteen) {
            lines.push(format!("{} - S${:.2}", s.stall, s.price));
        }
        lines.push(String::new());
    }

    lines.push("Location Data".to_string());
    lines.push("-------------".to_string());
    for canteen in &canteens {
        if let Some(p) = dataset.location_of(canteen) {
            lines.push(format!("{} - X: {}, Y: {}", canteen, p.x, p.y));
        }
    }
    lines.join("\n")
}
