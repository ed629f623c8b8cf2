//! Feedback Analytics
//!
//! Aggregates feedback rows into top-rated items and a rating
//! distribution. Recomputed from the store on every request, never
//! cached. Completely independent from the db/ module.

use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};

/// Number of items reported in the top-rated ranking
pub const TOP_RATED_LIMIT: usize = 5;

/// One feedback row as seen by the aggregator
///
/// `food_name` is `None` for general feedback without a food reference.
#[derive(Debug, Clone)]
pub struct RatingRow {
    pub food_name: Option<String>,
    pub rating: u8,
}

/// Aggregate for a single food item
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TopRatedItem {
    pub food_name: String,
    /// Mean rating, unrounded
    pub avg_rating: f64,
    /// Number of feedback entries for this item
    pub count: u32,
}

/// Full analytics response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeedbackAnalytics {
    pub top_rated: Vec<TopRatedItem>,
    /// Counts per rating value 1..=5, zero-filled
    pub rating_distribution: BTreeMap<u8, u32>,
}

/// Aggregate feedback rows.
///
/// Ranking: average rating descending, ties broken by entry count
/// descending, then by food name ascending. Only rows with a food
/// reference participate in the ranking; the rating distribution
/// counts every row.
pub fn compute(rows: &[RatingRow]) -> FeedbackAnalytics {
    let mut distribution: BTreeMap<u8, u32> = (1..=5u8).map(|r| (r, 0)).collect();
    let mut per_item: HashMap<String, (u64, u32)> = HashMap::new();

    for row in rows {
        if let Some(slot) = distribution.get_mut(&row.rating) {
            *slot += 1;
        }

        if let Some(ref name) = row.food_name {
            let entry = per_item.entry(name.clone()).or_insert((0u64, 0u32));
            entry.0 += row.rating as u64;
            entry.1 += 1;
        }
    }

    let mut top_rated: Vec<TopRatedItem> = per_item
        .into_iter()
        .map(|(food_name, (sum, count))| TopRatedItem {
            food_name,
            avg_rating: sum as f64 / count as f64,
            count,
        })
        .collect();

    top_rated.sort_by(|a, b| {
        b.avg_rating
            .total_cmp(&a.avg_rating)
            .then_with(|| b.count.cmp(&a.count))
            .then_with(|| a.food_name.cmp(&b.food_name))
    });
    top_rated.truncate(TOP_RATED_LIMIT);

    FeedbackAnalytics {
        top_rated,
        rating_distribution: distribution,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Helper to create a rated row
    fn make_row(food_name: Option<&str>, rating: u8) -> RatingRow {
        RatingRow {
            food_name: food_name.map(|n| n.to_string()),
            rating,
        }
    }

    #[test]
    fn test_single_item_average_and_distribution() {
        // Ratings 5, 5, 3 for one item: avg 13/3, distribution {3: 1, 5: 2}
        let rows = vec![
            make_row(Some("Tacos"), 5),
            make_row(Some("Tacos"), 5),
            make_row(Some("Tacos"), 3),
        ];

        let result = compute(&rows);

        assert_eq!(result.top_rated.len(), 1);
        let top = &result.top_rated[0];
        assert_eq!(top.food_name, "Tacos");
        assert_eq!(top.count, 3);
        assert!((top.avg_rating - 13.0 / 3.0).abs() < 1e-9);

        assert_eq!(result.rating_distribution[&1], 0);
        assert_eq!(result.rating_distribution[&2], 0);
        assert_eq!(result.rating_distribution[&3], 1);
        assert_eq!(result.rating_distribution[&4], 0);
        assert_eq!(result.rating_distribution[&5], 2);
    }

    #[test]
    fn test_top_rated_limit() {
        let rows: Vec<RatingRow> = (0..8)
            .map(|i| make_row(Some(&format!("item_{}", i)), 4))
            .collect();

        let result = compute(&rows);

        assert_eq!(result.top_rated.len(), TOP_RATED_LIMIT);
    }

    #[test]
    fn test_tie_broken_by_count_then_name() {
        // Same average: more entries ranks higher
        let rows = vec![
            make_row(Some("Beans"), 4),
            make_row(Some("Rice"), 4),
            make_row(Some("Rice"), 4),
        ];
        let result = compute(&rows);
        assert_eq!(result.top_rated[0].food_name, "Rice");
        assert_eq!(result.top_rated[1].food_name, "Beans");

        // Same average and count: alphabetical order
        let rows = vec![make_row(Some("Zucchini"), 5), make_row(Some("Apple"), 5)];
        let result = compute(&rows);
        assert_eq!(result.top_rated[0].food_name, "Apple");
        assert_eq!(result.top_rated[1].food_name, "Zucchini");
    }

    #[test]
    fn test_general_feedback_counts_in_distribution_only() {
        let rows = vec![make_row(None, 2), make_row(None, 2)];

        let result = compute(&rows);

        assert!(result.top_rated.is_empty());
        assert_eq!(result.rating_distribution[&2], 2);
    }

    #[test]
    fn test_empty_input_is_zero_filled() {
        let result = compute(&[]);

        assert!(result.top_rated.is_empty());
        assert_eq!(result.rating_distribution.len(), 5);
        assert!(result.rating_distribution.values().all(|&v| v == 0));
    }

    #[test]
    fn test_distribution_keys_serialize_as_strings() {
        let result = compute(&[make_row(None, 5)]);
        let json = serde_json::to_value(&result).expect("serialize");

        assert_eq!(json["rating_distribution"]["5"], 1);
        assert_eq!(json["rating_distribution"]["1"], 0);
    }
}
