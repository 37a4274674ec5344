//! Order Overview
//!
//! Turns the customer-orders query state into what the account page shows:
//! skeleton rows while loading, an empty marker, or the orders newest first.

use std::cmp::Ordering;

use crate::domain::{Order, OrderList};

/// Number of orders previewed on the account page
pub const ORDER_PREVIEW_TAKE: u32 = 3;

/// Upper bound on skeleton rows, whatever `take` is
pub const MAX_SKELETON_ROWS: u32 = 50;

/// Skeleton row shown while the orders are still loading
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placeholder {
    pub index: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub enum OrderOverview {
    Skeleton(Vec<Placeholder>),
    /// The customer has no orders at all
    Empty,
    Orders(Vec<Order>),
}

impl OrderOverview {
    pub fn is_loading(&self) -> bool {
        matches!(self, OrderOverview::Skeleton(_))
    }

    /// Number of rows to render
    pub fn row_count(&self) -> usize {
        match self {
            OrderOverview::Skeleton(rows) => rows.len(),
            OrderOverview::Empty => 1,
            OrderOverview::Orders(orders) => orders.len(),
        }
    }
}

/// Build the overview for `orders`, which is `None` until the query resolves.
///
/// The backend already limits the page to `take`, so resolved items are
/// reordered but never truncated. Skeleton rows are capped at
/// [`MAX_SKELETON_ROWS`].
pub fn summarize(orders: Option<&OrderList>, take: u32) -> OrderOverview {
    let Some(list) = orders else {
        let rows = take.min(MAX_SKELETON_ROWS) as usize;
        return OrderOverview::Skeleton((0..rows).map(|index| Placeholder { index }).collect());
    };

    if list.total_items == 0 {
        return OrderOverview::Empty;
    }

    let mut keyed: Vec<_> = list
        .items
        .iter()
        .map(|order| (order.updated_instant(), order))
        .collect();

    // sort_by is stable; equal or unparseable timestamps keep input order
    keyed.sort_by(|(a, _), (b, _)| match (a, b) {
        (Some(a), Some(b)) => b.cmp(a),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    });

    OrderOverview::Orders(keyed.into_iter().map(|(_, order)| order.clone()).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn order(id: &str, updated_at: &str) -> Order {
        serde_json::from_value(json!({ "id": id, "updatedAt": updated_at })).unwrap()
    }

    fn ids(overview: &OrderOverview) -> Vec<&str> {
        match overview {
            OrderOverview::Orders(orders) => orders.iter().map(|o| o.id.as_str()).collect(),
            other => panic!("expected orders, got {:?}", other),
        }
    }

    #[test]
    fn test_unresolved_yields_placeholders() {
        let overview = summarize(None, 3);
        assert!(overview.is_loading());
        assert_eq!(
            overview,
            OrderOverview::Skeleton(vec![
                Placeholder { index: 0 },
                Placeholder { index: 1 },
                Placeholder { index: 2 },
            ])
        );
        assert_eq!(summarize(None, 0).row_count(), 0);
    }

    #[test]
    fn test_skeleton_rows_are_capped() {
        assert_eq!(summarize(None, u32::MAX).row_count(), MAX_SKELETON_ROWS as usize);
        assert_eq!(summarize(None, MAX_SKELETON_ROWS + 1).row_count(), MAX_SKELETON_ROWS as usize);
    }

    #[test]
    fn test_no_orders_yields_empty_marker() {
        let list = OrderList { items: vec![], total_items: 0 };
        assert_eq!(summarize(Some(&list), 3), OrderOverview::Empty);
        assert_eq!(summarize(Some(&list), 3).row_count(), 1);
    }

    #[test]
    fn test_newest_first() {
        let list = OrderList {
            items: vec![order("a", "2024-01-01T00:00:00Z"), order("b", "2024-02-01T00:00:00Z")],
            total_items: 2,
        };
        assert_eq!(ids(&summarize(Some(&list), 3)), vec!["b", "a"]);
    }

    #[test]
    fn test_offsets_compare_as_instants() {
        // 10:30+02:00 is 08:30Z, earlier than 09:00Z
        let list = OrderList {
            items: vec![order("x", "2024-05-01T10:30:00+02:00"), order("y", "2024-05-01T09:00:00Z")],
            total_items: 2,
        };
        assert_eq!(ids(&summarize(Some(&list), 3)), vec!["y", "x"]);
    }

    #[test]
    fn test_ties_and_garbage_keep_input_order() {
        let list = OrderList {
            items: vec![
                order("bad1", "not a date"),
                order("t1", "2024-01-01T00:00:00Z"),
                order("t2", "2024-01-01T00:00:00Z"),
                order("bad2", ""),
                order("new", "2024-03-01T00:00:00Z"),
            ],
            total_items: 5,
        };
        assert_eq!(
            ids(&summarize(Some(&list), 3)),
            vec!["new", "t1", "t2", "bad1", "bad2"]
        );
    }

    #[test]
    fn test_no_truncation_and_idempotent() {
        let list = OrderList {
            items: (1..=5)
                .map(|d| order(&d.to_string(), &format!("2024-01-0{}T00:00:00Z", d)))
                .collect(),
            total_items: 12,
        };
        let first = summarize(Some(&list), 3);
        assert_eq!(first.row_count(), 5);
        assert_eq!(first, summarize(Some(&list), 3));
    }
}
