use std::cell::RefCell;
use std::rc::Rc;
use std::sync::Arc;

use tableview::engine::{Selector, StaticValue, TextInput, ViewEngine};
use tableview::matching::equals_folded;

#[derive(Debug, Clone, PartialEq, Eq)]
struct Job {
    name: &'static str,
    status: &'static str,
}

fn job(name: &'static str, status: &'static str) -> Job {
    Job { name, status }
}

fn master() -> Vec<Job> {
    vec![job("A", "open"), job("B", "closed"), job("C", "open")]
}

fn names(items: &[Job]) -> Vec<&'static str> {
    items.iter().map(|j| j.name).collect()
}

struct Harness {
    engine: ViewEngine<Job>,
    visible: Rc<RefCell<Vec<Job>>>,
    summary: Rc<RefCell<String>>,
    status: Selector,
    page: Selector,
}

fn harness(master: Vec<Job>) -> Harness {
    let visible = Rc::new(RefCell::new(Vec::new()));
    let summary = Rc::new(RefCell::new(String::new()));
    let (v, s) = (Rc::clone(&visible), Rc::clone(&summary));

    let status = Selector::new(["All", "open", "closed"]);
    let page = Selector::page_sizes(&[1, 2], "All");
    page.select("All");

    let mut engine = ViewEngine::builder(move |items: Arc<[Job]>| *v.borrow_mut() = items.to_vec())
        .master(master)
        .page_size(page.clone())
        .summary_sink(move |text| *s.borrow_mut() = text.to_string())
        .build();
    engine.add_column_filter(status.clone(), |j: &Job, value: &str| equals_folded(j.status, value));

    Harness { engine, visible, summary, status, page }
}

#[test]
fn no_filters_shows_everything() {
    let mut h = harness(master());
    h.engine.refresh();

    assert_eq!(names(&h.visible.borrow()), ["A", "B", "C"]);
    assert_eq!(*h.summary.borrow(), "Showing 3 items.");
}

#[test]
fn status_filter_keeps_matching_items() {
    let mut h = harness(master());
    h.status.select("open");
    h.engine.refresh();

    assert_eq!(names(&h.visible.borrow()), ["A", "C"]);
    assert_eq!(h.engine.last_total_count(), 2);
    assert_eq!(*h.summary.borrow(), "Showing 2 items.");
}

#[test]
fn cap_truncates_filtered_result() {
    let mut h = harness(master());
    h.status.select("open");
    h.page.select("1");
    h.engine.refresh();

    assert_eq!(names(&h.visible.borrow()), ["A"]);
    assert_eq!(h.engine.last_visible_count(), 1);
    assert_eq!(h.engine.last_total_count(), 2);
    assert_eq!(*h.summary.borrow(), "Showing 1 of 2 items.");
}

#[test]
fn empty_master_shows_nothing() {
    let mut h = harness(Vec::new());
    h.status.select("closed");
    h.page.select("2");
    h.engine.refresh();

    assert!(h.visible.borrow().is_empty());
    assert_eq!(*h.summary.borrow(), "No items to show.");
}

#[test]
fn global_search_matches_name() {
    #[derive(Debug, Clone, PartialEq)]
    struct Person {
        name: String,
    }

    let mut engine = ViewEngine::builder(|_: Arc<[Person]>| {})
        .master(vec![Person { name: "Bob".into() }, Person { name: "Ann".into() }])
        .global_search(StaticValue::new("b"), |p: &Person, term: &str| {
            p.name.to_lowercase().contains(term)
        })
        .build();

    let result = engine.refresh();
    assert_eq!(result.items(), [Person { name: "Bob".into() }]);
    assert_eq!(result.total_count(), 1);
}

#[test]
fn sentinel_value_is_inert() {
    for sentinel in ["Todos", "All", "ALL", " todas "] {
        let mut engine = ViewEngine::builder(|_: Arc<[Job]>| {})
            .master(vec![job("A", "open"), job("B", "closed")])
            .build();
        engine.add_column_filter(StaticValue::new(sentinel), |j: &Job, v: &str| j.status == v);

        let result = engine.refresh();
        assert_eq!(names(result.items()), ["A", "B"], "sentinel {sentinel:?}");
    }
}

#[test]
fn blank_search_shows_everything() {
    for blank in ["", "   "] {
        let mut engine = ViewEngine::builder(|_: Arc<[Job]>| {})
            .master(master())
            .global_search(StaticValue::new(blank), |_: &Job, _: &str| false)
            .build();

        let result = engine.refresh();
        assert_eq!(names(result.items()), ["A", "B", "C"], "search {blank:?}");
        assert_eq!(result.summary(), "Showing 3 items.");
    }
}

#[test]
fn master_replacement_flows_through_next_refresh() {
    let search = TextInput::new();
    let mut engine = ViewEngine::builder(|_: Arc<[Job]>| {})
        .master(master())
        .global_search(search.clone(), |j: &Job, t: &str| j.name.to_lowercase() == t)
        .entity_label("jobs")
        .build();

    search.set("d");
    assert_eq!(engine.refresh().summary(), "No jobs to show.");

    engine.set_master(vec![job("D", "open")]);
    assert_eq!(engine.refresh().summary(), "Showing 1 jobs.");
}

#[test]
fn resize_hook_sees_final_counts() {
    let rows = Rc::new(RefCell::new(0usize));
    let seen = Rc::clone(&rows);

    let mut engine = ViewEngine::builder(|_: Arc<[Job]>| {})
        .master(master())
        .page_size(StaticValue::new("2"))
        .on_refresh(move |result| *seen.borrow_mut() = result.visible_count())
        .build();

    engine.refresh();
    assert_eq!(*rows.borrow(), 2);
}
