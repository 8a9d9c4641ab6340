use proptest::prelude::*;
use std::sync::Arc;

use tableview::engine::{StaticValue, ViewEngine};

#[derive(Debug, Clone, PartialEq, Eq)]
struct Row {
    id: usize,
    color: &'static str,
    size: &'static str,
}

const COLORS: [&str; 3] = ["red", "green", "blue"];
const SIZES: [&str; 3] = ["s", "m", "l"];

fn rows_strategy() -> impl Strategy<Value = Vec<Row>> {
    prop::collection::vec((0usize..3, 0usize..3), 0..40).prop_map(|pairs| {
        pairs
            .into_iter()
            .enumerate()
            .map(|(id, (c, s))| Row {
                id,
                color: COLORS[c],
                size: SIZES[s],
            })
            .collect()
    })
}

fn filter_value() -> impl Strategy<Value = String> {
    prop_oneof![
        Just(String::new()),
        Just("All".to_string()),
        Just("  ".to_string()),
        prop::sample::select(COLORS.to_vec()).prop_map(str::to_uppercase),
        prop::sample::select(SIZES.to_vec()).prop_map(str::to_string),
    ]
}

fn color_rule(row: &Row, value: &str) -> bool {
    row.color == value
}

fn size_rule(row: &Row, value: &str) -> bool {
    row.size == value
}

fn engine(rows: Vec<Row>, cap: Option<String>) -> ViewEngine<Row> {
    let builder = ViewEngine::builder(|_: Arc<[Row]>| {}).master(rows);
    match cap {
        Some(cap) => builder.page_size(StaticValue::new(cap)).build(),
        None => builder.build(),
    }
}

fn ids(items: &[Row]) -> Vec<usize> {
    items.iter().map(|r| r.id).collect()
}

proptest! {
    #[test]
    fn refresh_is_idempotent(rows in rows_strategy(), color in filter_value(), cap in 0usize..10) {
        let mut engine = engine(rows, Some(cap.to_string()));
        engine.add_column_filter(StaticValue::new(color), color_rule);

        let first = engine.refresh().clone();
        let second = engine.refresh();

        prop_assert_eq!(first.items(), second.items());
        prop_assert_eq!(first.summary(), second.summary());
    }

    #[test]
    fn empty_master_yields_no_items(color in filter_value(), size in filter_value(), cap in 0usize..5) {
        let mut engine = engine(Vec::new(), Some(cap.to_string()));
        engine.add_column_filter(StaticValue::new(color), color_rule);
        engine.add_column_filter(StaticValue::new(size), size_rule);

        let result = engine.refresh();
        prop_assert_eq!(result.visible_count(), 0);
        prop_assert_eq!(result.total_count(), 0);
        prop_assert_eq!(result.summary(), "No items to show.");
    }

    #[test]
    fn filter_order_does_not_matter(rows in rows_strategy(), color in filter_value(), size in filter_value()) {
        let mut forward = engine(rows.clone(), None);
        forward.add_column_filter(StaticValue::new(color.clone()), color_rule);
        forward.add_column_filter(StaticValue::new(size.clone()), size_rule);

        let mut reverse = engine(rows, None);
        reverse.add_column_filter(StaticValue::new(size), size_rule);
        reverse.add_column_filter(StaticValue::new(color), color_rule);

        prop_assert_eq!(forward.refresh().items(), reverse.refresh().items());
    }

    #[test]
    fn cap_never_exceeds_total(rows in rows_strategy(), color in filter_value(), cap in 0usize..50) {
        let mut uncapped = engine(rows.clone(), None);
        uncapped.add_column_filter(StaticValue::new(color.clone()), color_rule);
        let total = uncapped.refresh().total_count();

        let mut capped = engine(rows, Some(cap.to_string()));
        capped.add_column_filter(StaticValue::new(color), color_rule);
        let result = capped.refresh();

        let expected_visible = if cap == 0 { total } else { cap.min(total) };
        prop_assert_eq!(result.total_count(), total);
        prop_assert_eq!(result.visible_count(), expected_visible);
        prop_assert_eq!(result.items().len(), expected_visible);
    }

    #[test]
    fn inert_values_change_nothing(rows in rows_strategy(), inert in prop::sample::select(vec!["", "   ", "All", "todos", "TODAS"])) {
        let mut plain = engine(rows.clone(), None);
        let mut with_inert = engine(rows, None);
        with_inert.add_column_filter(StaticValue::new(inert), |_: &Row, _: &str| false);

        prop_assert_eq!(plain.refresh().items(), with_inert.refresh().items());
    }

    #[test]
    fn visible_order_follows_master(rows in rows_strategy(), size in filter_value(), cap in 0usize..20) {
        let mut engine = engine(rows, Some(cap.to_string()));
        engine.add_column_filter(StaticValue::new(size), size_rule);

        let visible = ids(engine.refresh().items());
        prop_assert!(visible.windows(2).all(|w| w[0] < w[1]));
    }
}
