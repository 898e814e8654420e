//! Property-based tests for neighbor lookups using proptest.

use proptest::prelude::*;
use keyseek::{
    merge, resolve, Dir, Filter, FindOptions, Finder, MemoryTable, Number, Op, OrderBy,
    OrderSpec, Predicate, QueryRequest, Record, SeekConfig, Traversal, Value,
};

// ============================================================================
// Test helpers
// ============================================================================

#[derive(Debug, Clone)]
struct Row {
    id: i64,
    author_id: i64,
    rank: i64,
}

impl Record for Row {
    fn field_value(&self, column: &str) -> Value<'_> {
        match column {
            "id" => Value::Number(Number::I64(self.id)),
            "author_id" => Value::Number(Number::I64(self.author_id)),
            "rank" => Value::Number(Number::I64(self.rank)),
            _ => Value::None,
        }
    }
}

// Unique ids 1..=n, few distinct values elsewhere so ties are common
fn rows_strategy() -> impl Strategy<Value = Vec<Row>> {
    prop::collection::vec((0i64..4, -2i64..3), 1..30).prop_map(|cols| {
        cols.into_iter()
            .enumerate()
            .map(|(i, (author_id, rank))| Row {
                id: i as i64 + 1,
                author_id,
                rank,
            })
            .collect()
    })
}

fn dir_strategy() -> impl Strategy<Value = Dir> {
    prop_oneof![Just(Dir::Asc), Just(Dir::Desc)]
}

fn order_strategy() -> impl Strategy<Value = Vec<OrderBy>> {
    (
        prop::sample::subsequence(vec!["author_id", "rank"], 1..=2),
        prop::collection::vec(dir_strategy(), 2),
        prop::option::of(dir_strategy()),
    )
        .prop_map(|(columns, dirs, id_dir)| {
            let mut order: Vec<OrderBy> = columns
                .into_iter()
                .zip(dirs)
                .map(|(column, dir)| OrderBy::new(column, dir))
                .collect();
            if let Some(dir) = id_dir {
                order.push(OrderBy::new("id", dir));
            }
            order
        })
}

fn sorted_ids(rows: &[Row], order: &OrderSpec, filter: Option<&Filter>) -> Vec<i64> {
    let request = QueryRequest {
        predicate: merge(filter, None),
        order: order.clone(),
        limit: usize::MAX,
    };
    MemoryTable::new(rows)
        .select(&request)
        .unwrap()
        .into_iter()
        .map(|row| row.id)
        .collect()
}

// ============================================================================
// Property tests
// ============================================================================

proptest! {
    /// Next and previous match the neighbors in the fully sorted set.
    #[test]
    fn neighbors_match_sorted_positions(rows in rows_strategy(), order in order_strategy()) {
        let spec = OrderSpec::from_columns(order.clone(), &SeekConfig::default()).unwrap();
        let expected = sorted_ids(&rows, &spec, None);

        let finder = Finder::new(MemoryTable::new(&rows))
            .with_context(FindOptions::new().order(order));

        for (pos, id) in expected.iter().enumerate() {
            let anchor = &rows[(*id - 1) as usize];
            let (next, prev) = finder.find_next_and_prev(anchor).unwrap();
            prop_assert_eq!(next.map(|r| r.id), expected.get(pos + 1).copied());
            prop_assert_eq!(prev.map(|r| r.id), pos.checked_sub(1).map(|p| expected[p]));
        }
    }

    /// Whenever next(a) = b, prev(b) = a.
    #[test]
    fn next_and_previous_are_inverse(rows in rows_strategy(), order in order_strategy()) {
        let finder = Finder::new(MemoryTable::new(&rows))
            .with_context(FindOptions::new().order(order));

        for row in &rows {
            if let Some(next) = finder.find_next(row).unwrap() {
                let back = finder.find_prev(next).unwrap();
                prop_assert_eq!(back.map(|r| r.id), Some(row.id));
            }
        }
    }

    /// Walking with next from the first row visits every row exactly once.
    #[test]
    fn walking_visits_every_row(rows in rows_strategy(), order in order_strategy()) {
        let spec = OrderSpec::from_columns(order.clone(), &SeekConfig::default()).unwrap();
        let expected = sorted_ids(&rows, &spec, None);
        let finder = Finder::new(MemoryTable::new(&rows))
            .with_context(FindOptions::new().order(order));

        let mut walked = vec![expected[0]];
        let mut current = &rows[(expected[0] - 1) as usize];
        while let Some(next) = finder.find_next(current).unwrap() {
            prop_assert!(walked.len() <= rows.len());
            walked.push(next.id);
            current = next;
        }
        prop_assert_eq!(walked, expected);
    }

    /// Under a filter, neighbors are the adjacent filtered rows and its ends have none.
    #[test]
    fn filtered_boundaries(rows in rows_strategy(), order in order_strategy(), author in 0i64..4) {
        let filter = Filter::eq("author_id", author);
        let spec = OrderSpec::from_columns(order.clone(), &SeekConfig::default()).unwrap();
        let expected = sorted_ids(&rows, &spec, Some(&filter));
        let finder = Finder::new(MemoryTable::new(&rows))
            .with_context(FindOptions::new().order(order).filter(filter));

        for row in &rows {
            let (next, prev) = finder.find_next_and_prev(row).unwrap();
            for neighbor in next.iter().chain(prev.iter()) {
                prop_assert_eq!(neighbor.author_id, author);
            }
        }
        for (pos, id) in expected.iter().enumerate() {
            let (next, prev) = finder.find_next_and_prev(&rows[(*id - 1) as usize]).unwrap();
            prop_assert_eq!(next.map(|r| r.id), expected.get(pos + 1).copied());
            prop_assert_eq!(prev.map(|r| r.id), pos.checked_sub(1).map(|p| expected[p]));
        }
        if let (Some(first), Some(last)) = (expected.first(), expected.last()) {
            prop_assert!(finder.find_prev(&rows[(*first - 1) as usize]).unwrap().is_none());
            prop_assert!(finder.find_next(&rows[(*last - 1) as usize]).unwrap().is_none());
        }
    }

    /// Every row is strictly before or after the anchor, or is the anchor.
    #[test]
    fn seek_splits_rows_around_the_anchor(rows in rows_strategy(), order in order_strategy()) {
        let spec = OrderSpec::from_columns(order, &SeekConfig::default()).unwrap();
        let anchor = &rows[rows.len() / 2];

        let after = keyseek::seek_predicate(anchor, &resolve(&spec, Traversal::Next)).unwrap().unwrap();
        let before = keyseek::seek_predicate(anchor, &resolve(&spec, Traversal::Previous)).unwrap().unwrap();

        for row in &rows {
            let is_after = after.matches(row) == Some(true);
            let is_before = before.matches(row) == Some(true);
            let is_anchor = row.id == anchor.id;
            prop_assert_eq!(u8::from(is_after) + u8::from(is_before) + u8::from(is_anchor), 1);
            prop_assert_eq!(is_after, spec.compare(row, anchor) == std::cmp::Ordering::Greater);
        }
    }

    /// Previous flips every operator and the whole effective order.
    #[test]
    fn directions_are_symmetric(order in order_strategy()) {
        let spec = OrderSpec::from_columns(order, &SeekConfig::default()).unwrap();
        let next = resolve(&spec, Traversal::Next);
        let prev = resolve(&spec, Traversal::Previous);

        prop_assert_eq!(&next.effective, &spec);
        prop_assert_eq!(&prev.effective, &spec.reversed());
        for ((col_n, op_n), (col_p, op_p)) in next.columns.iter().zip(&prev.columns) {
            prop_assert_eq!(col_n, col_p);
            prop_assert!(matches!((op_n, op_p), (Op::Gt, Op::Lt) | (Op::Lt, Op::Gt)));
        }
        prop_assert_eq!(spec.columns().last().map(|c| c.column.as_str()), Some("id"));
    }

    /// Rendering an order and parsing it back gives the same order.
    #[test]
    fn order_display_round_trips(order in order_strategy()) {
        let config = SeekConfig::default();
        let spec = OrderSpec::from_columns(order, &config).unwrap();
        let reparsed = OrderSpec::parse(&spec.to_string(), &config).unwrap();
        prop_assert_eq!(reparsed, spec);
    }

    /// The merged predicate matches exactly the rows both parts match, and
    /// merging leaves the filter untouched.
    #[test]
    fn merge_is_a_conjunction(rows in rows_strategy(), author in 0i64..4, threshold in 0i64..30) {
        let filter = Filter::eq("author_id", author);
        let before = filter.clone();
        let seek = Predicate::compare("id", Op::Gt, threshold);

        let merged = merge(Some(&filter), Some(seek.clone())).unwrap();
        prop_assert_eq!(&filter, &before);
        prop_assert_eq!(merge(Some(&filter), None), filter.to_predicate());
        prop_assert_eq!(merge(None, Some(seek.clone())), Some(seek.clone()));

        for row in &rows {
            let both = filter.to_predicate().unwrap().matches(row) == Some(true)
                && seek.matches(row) == Some(true);
            prop_assert_eq!(merged.matches(row) == Some(true), both);
        }
    }
}
