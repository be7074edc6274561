use super::*;
use proptest::prelude::*;

#[derive(Debug, Clone, PartialEq)]
struct Row {
    id: u32,
    name: String,
    status: &'static str,
    score: u32,
    joined: &'static str,
}

fn row(id: u32, name: &str, status: &'static str, score: u32, joined: &'static str) -> Row {
    Row {
        id,
        name: name.to_string(),
        status,
        score,
        joined,
    }
}

fn table(rows: Vec<Row>) -> DataTable<Row> {
    DataTable::new(vec![
        Column::text("name", "Name", |r: &Row| r.name.clone()).sortable(),
        Column::text("status", "Status", |r: &Row| r.status),
        Column::number("score", "Score", |r: &Row| r.score).sortable(),
        Column::date("joined", "Joined", |r: &Row| r.joined).sortable(),
    ])
    .search_by("name", |r: &Row| r.name.clone())
    .filter_by(
        "status",
        vec![
            FilterOption::new("active", "Active"),
            FilterOption::new("blocked", "Blocked"),
        ],
        |r: &Row| r.status.to_string(),
    )
    .page_size(2)
    .with_rows(rows)
}

fn fixture() -> Vec<Row> {
    vec![
        row(1, "Priya", "active", 30, "2023-08-20"),
        row(2, "amit", "blocked", 10, "2023-06-15"),
        row(3, "Karan", "active", 30, "2024-01-10"),
        row(4, "Sneha", "active", 5, "2023-09-10"),
        row(5, "Amitabh", "active", 10, "2023-07-05"),
    ]
}

fn ids(rows: &[&Row]) -> Vec<u32> {
    rows.iter().map(|r| r.id).collect()
}

#[test]
fn numeric_sort_toggles_and_keeps_ties_in_source_order() {
    let mut table = table(fixture());

    table.set_sort("score").expect("sortable");
    assert_eq!(table.state().sort_direction, SortDirection::Ascending);
    assert_eq!(ids(&table.filtered_rows()), vec![4, 2, 5, 1, 3]);

    table.set_sort("score").expect("sortable");
    assert_eq!(table.state().sort_direction, SortDirection::Descending);
    assert_eq!(ids(&table.filtered_rows()), vec![1, 3, 2, 5, 4]);

    table.set_sort("score").expect("sortable");
    assert_eq!(table.state().sort_direction, SortDirection::Ascending);
}

#[test]
fn selecting_a_new_key_resets_to_ascending() {
    let mut table = table(fixture());
    table.set_sort("score").expect("sortable");
    table.set_sort("score").expect("sortable");
    table.set_sort("joined").expect("sortable");

    assert_eq!(table.state().sort_key, Some("joined"));
    assert_eq!(table.state().sort_direction, SortDirection::Ascending);
    assert_eq!(ids(&table.filtered_rows()), vec![2, 5, 1, 4, 3]);
}

#[test]
fn text_sort_ignores_case() {
    let mut table = table(fixture());
    table.set_sort("name").expect("sortable");
    assert_eq!(ids(&table.filtered_rows()), vec![2, 5, 3, 1, 4]);

    table.set_sort("name").expect("sortable");
    assert_eq!(ids(&table.filtered_rows()), vec![4, 1, 3, 5, 2]);
}

#[test]
fn sort_rejects_unknown_and_unsortable_columns() {
    let mut table = table(fixture());
    assert_eq!(
        table.set_sort("missing"),
        Err(TableError::UnknownColumn("missing".into()))
    );
    assert_eq!(
        table.set_sort("status"),
        Err(TableError::NotSortable("status".into()))
    );
    assert_eq!(table.state().sort_key, None);
}

#[test]
fn search_is_case_insensitive_substring() {
    let mut table = table(fixture());
    table.set_search("AMIT");
    assert_eq!(ids(&table.filtered_rows()), vec![2, 5]);

    table.set_search("");
    assert_eq!(table.filtered_count(), 5);
}

#[test]
fn filter_runs_before_search_and_all_clears_it() {
    let mut table = table(fixture());
    table
        .set_filter(FilterValue::Equals("active".into()))
        .expect("filter");
    table.set_search("amit");
    assert_eq!(ids(&table.filtered_rows()), vec![5]);

    table.set_filter(FilterValue::parse("all")).expect("filter");
    assert_eq!(ids(&table.filtered_rows()), vec![2, 5]);
}

#[test]
fn sort_only_orders_the_matched_subset() {
    let mut table = table(fixture());
    table
        .set_filter(FilterValue::Equals("active".into()))
        .expect("filter");
    table.set_sort("score").expect("sortable");
    assert_eq!(ids(&table.filtered_rows()), vec![4, 5, 1, 3]);
    assert_eq!(table.page_count(), 2);
    assert_eq!(ids(&table.page_rows()), vec![4, 5]);
}

#[test]
fn page_requests_clamp_into_range() {
    let mut table = table(fixture());
    assert_eq!(table.page_count(), 3);

    table.set_page(0);
    assert_eq!(table.current_page(), 1);

    table.set_page(99);
    assert_eq!(table.current_page(), 3);
    assert_eq!(ids(&table.page_rows()), vec![5]);

    table.set_search("nobody");
    assert_eq!(table.page_count(), 1);
    assert_eq!(table.current_page(), 1);
    assert!(table.page_rows().is_empty());
}

#[test]
fn search_change_returns_to_first_page() {
    let mut table = table(fixture());
    table.set_page(3);
    table.set_search("a");
    assert_eq!(table.current_page(), 1);
}

#[test]
fn shrinking_rows_reclamps_current_page() {
    let mut table = table(fixture());
    table.set_page(3);
    table.retain(|r| r.id <= 2);
    assert_eq!(table.page_count(), 1);
    assert_eq!(table.current_page(), 1);
}

#[test]
fn local_patches_are_reflected_immediately() {
    let mut table = table(fixture());
    table
        .set_filter(FilterValue::Equals("blocked".into()))
        .expect("filter");
    assert_eq!(ids(&table.filtered_rows()), vec![2]);

    let touched = table.update_where(|r| r.id == 4, |r| r.status = "blocked");
    assert_eq!(touched, 1);
    assert_eq!(ids(&table.filtered_rows()), vec![2, 4]);

    table.push(row(6, "Zoe", "blocked", 1, "2024-02-01"));
    assert_eq!(ids(&table.filtered_rows()), vec![2, 4, 6]);
}

#[test]
fn render_row_uses_column_display() {
    let table = table(fixture());
    let first = &table.rows()[0];
    assert_eq!(
        table.render_row(first),
        vec!["Priya", "active", "30", "2023-08-20"]
    );
    assert_eq!(table.headers(), vec!["Name", "Status", "Score", "Joined"]);
    assert_eq!(table.filter_key(), Some("status"));
    assert_eq!(table.search_key(), Some("name"));
    assert_eq!(table.filter_options().len(), 2);
}

#[test]
fn filter_without_field_is_rejected() {
    let mut table: DataTable<Row> =
        DataTable::new(vec![Column::text("name", "Name", |r: &Row| r.name.clone())]);
    assert_eq!(
        table.set_filter(FilterValue::Equals("active".into())),
        Err(TableError::NoFilterField)
    );
    table.set_filter(FilterValue::All).expect("all is always allowed");
}

fn arb_row() -> impl Strategy<Value = Row> {
    (
        0u32..50,
        prop_oneof![Just("ann"), Just("Bob"), Just("carla"), Just("ANNA"), Just("dan")],
        prop_oneof![Just("active"), Just("blocked")],
        0u32..5,
        prop_oneof![Just("2023-01-01"), Just("2024-06-30"), Just("not a date")],
    )
        .prop_map(|(id, name, status, score, joined)| row(id, name, status, score, joined))
}

proptest! {
    #[test]
    fn pages_partition_the_filtered_set(
        rows in prop::collection::vec(arb_row(), 0..40),
        query in prop_oneof![Just(""), Just("an"), Just("B"), Just("zzz")],
        filter in prop_oneof![Just("all"), Just("active"), Just("blocked")],
        sort in prop_oneof![Just(None), Just(Some("score")), Just(Some("name")), Just(Some("joined"))],
        descending in any::<bool>(),
        page_size in 1usize..7,
    ) {
        let rows: Vec<Row> = rows
            .into_iter()
            .enumerate()
            .map(|(idx, mut r)| { r.id = idx as u32; r })
            .collect();
        let mut table = table(rows.clone()).page_size(page_size);
        table.set_filter(FilterValue::parse(filter)).expect("filter");
        table.set_search(query);
        if let Some(key) = sort {
            table.set_sort(key).expect("sortable");
            if descending {
                table.set_sort(key).expect("sortable");
            }
        }

        let needle = query.to_lowercase();
        let mut expected: Vec<u32> = rows
            .iter()
            .filter(|r| filter == "all" || r.status == filter)
            .filter(|r| r.name.to_lowercase().contains(&needle))
            .map(|r| r.id)
            .collect();

        let mut seen = Vec::new();
        for page in 1..=table.page_count() {
            table.set_page(page);
            let visible = table.page_rows();
            prop_assert!(visible.len() <= page_size);
            for r in visible {
                prop_assert!(rows.contains(r));
                seen.push(r.id);
            }
        }

        prop_assert_eq!(seen.len(), expected.len());
        seen.sort_unstable();
        expected.sort_unstable();
        prop_assert_eq!(seen, expected);
    }
}
