use anyhow::Result;
use mltable::{
    generate_document, Column, DatasetDocument, ExportScope, FilterValue, MultiLevelTable, Node,
    NodeId, SampleConfig, SelectAllScope, SortDir, TableConfig, TableError,
};
use std::env;
use std::fs;

fn ids(nodes: &[&Node]) -> Vec<String> {
    nodes.iter().map(|node| node.id.to_string()).collect()
}

fn visible_ids(table: &MultiLevelTable) -> Result<Vec<(String, usize)>> {
    Ok(table
        .visible_rows()?
        .iter()
        .map(|row| (row.id().to_string(), row.level))
        .collect())
}

fn flat_rows(count: i64) -> Vec<Node> {
    (1..=count)
        .map(|i| Node::new(i).with_field("name", format!("row {}", i)))
        .collect()
}

fn name_table(roots: Vec<Node>, config: TableConfig) -> MultiLevelTable {
    MultiLevelTable::new(vec![Column::new("name", "Name")], config).with_dataset(roots)
}

fn config_with_page_size(page_size: usize) -> TableConfig {
    TableConfig {
        page_size,
        ..TableConfig::default()
    }
}

#[test]
fn test_sort_cycle_round_trip() -> Result<()> {
    let roots = vec![
        Node::new(1).with_field("name", "B"),
        Node::new(2).with_field("name", "A"),
    ];
    let mut table = name_table(roots, TableConfig::default());

    table.set_sort("name", Some(SortDir::Asc));
    assert_eq!(ids(&table.filtered_top_level()), vec!["2", "1"]);

    table.set_sort("name", Some(SortDir::Desc));
    assert_eq!(ids(&table.filtered_top_level()), vec!["1", "2"]);

    // Header clicks: asc, desc, then back to data order.
    table.clear_sort();
    assert!(table.toggle_sort("name")?.is_some());
    assert!(table.toggle_sort("name")?.is_some());
    assert_eq!(table.toggle_sort("name")?, None);
    assert_eq!(ids(&table.filtered_top_level()), vec!["1", "2"]);
    Ok(())
}

#[test]
fn test_expansion_levels() -> Result<()> {
    let roots = vec![Node::new(1).with_children(vec![
        Node::new(10),
        Node::new(11).with_children(vec![Node::new(110)]),
    ])];
    let mut table = name_table(roots, TableConfig::default());

    table.toggle_expansion(&NodeId::from(1));
    table.toggle_expansion(&NodeId::from(11));

    assert_eq!(
        visible_ids(&table)?,
        vec![
            ("1".to_string(), 0),
            ("10".to_string(), 1),
            ("11".to_string(), 1),
            ("110".to_string(), 2),
        ]
    );
    Ok(())
}

#[test]
fn test_fully_expanded_rows_are_preorder() -> Result<()> {
    let document = generate_document(&SampleConfig {
        roots: 4,
        depth: 3,
        fanout_min: 1,
        fanout_max: 3,
        seed: 11,
    });
    let mut table = MultiLevelTable::new(document.columns(), config_with_page_size(100))
        .with_dataset(document.data.clone());
    table.expand_all();

    let mut expected = Vec::new();
    let mut stack: Vec<(usize, &Node)> = document.data.iter().rev().map(|node| (0, node)).collect();
    while let Some((level, node)) = stack.pop() {
        expected.push((node.id.to_string(), level));
        stack.extend(node.children.iter().rev().map(|child| (level + 1, child)));
    }

    assert!(table.is_all_expanded());
    assert_eq!(visible_ids(&table)?, expected);
    Ok(())
}

#[test]
fn test_pagination_example() -> Result<()> {
    let mut table = name_table(flat_rows(15), config_with_page_size(5));

    assert_eq!(ids(&table.current_page()), vec!["1", "2", "3", "4", "5"]);
    table.goto_page(1);
    assert_eq!(ids(&table.current_page()), vec!["6", "7", "8", "9", "10"]);

    table.set_page_size(20);
    assert_eq!(table.page_index(), 0);
    assert_eq!(table.current_page().len(), 15);
    assert_eq!(table.page_count(), 1);
    Ok(())
}

#[test]
fn test_unsupported_page_size_snaps_to_option() -> Result<()> {
    let mut table = name_table(flat_rows(30), config_with_page_size(7));
    assert_eq!(table.page_size(), 5);

    table.set_page_size(40);
    assert_eq!(table.page_size(), 50);

    table.goto_page(99);
    assert_eq!(table.page_index(), 0);
    Ok(())
}

#[test]
fn test_expansion_does_not_change_pagination() -> Result<()> {
    let roots: Vec<Node> = (1..=12)
        .map(|i| {
            Node::new(i)
                .with_field("name", format!("row {}", i))
                .with_children(vec![Node::new(100 + i), Node::new(200 + i)])
        })
        .collect();
    let mut table = name_table(roots, config_with_page_size(5));
    table.goto_page(1);
    let before_page = ids(&table.current_page());
    let before_count = table.page_count();

    table.toggle_expansion(&NodeId::from(6));
    table.toggle_expansion(&NodeId::from(7));

    assert_eq!(table.page_count(), before_count);
    assert_eq!(ids(&table.current_page()), before_page);
    assert_eq!(table.visible_rows()?.len(), 9);
    Ok(())
}

#[test]
fn test_sort_is_stable_for_equal_values() -> Result<()> {
    let roots: Vec<Node> = (1..=6).map(|i| Node::new(i).with_field("name", "same")).collect();
    let mut table = name_table(roots, TableConfig::default());

    table.set_sort("name", Some(SortDir::Asc));
    assert_eq!(ids(&table.filtered_top_level()), vec!["1", "2", "3", "4", "5", "6"]);
    table.set_sort("name", Some(SortDir::Desc));
    assert_eq!(ids(&table.filtered_top_level()), vec!["1", "2", "3", "4", "5", "6"]);
    Ok(())
}

#[test]
fn test_children_keep_document_order_under_sort() -> Result<()> {
    let roots = vec![
        Node::new(1).with_field("name", "b").with_children(vec![
            Node::new(12).with_field("name", "z"),
            Node::new(11).with_field("name", "a"),
        ]),
        Node::new(2).with_field("name", "a"),
    ];
    let mut table = name_table(roots, TableConfig::default());
    table.set_sort("name", Some(SortDir::Asc));
    table.toggle_expansion(&NodeId::from(1));

    let order: Vec<String> = visible_ids(&table)?.into_iter().map(|(id, _)| id).collect();
    assert_eq!(order, vec!["2", "1", "12", "11"]);
    Ok(())
}

#[test]
fn test_search_is_reversible() -> Result<()> {
    let mut table = name_table(flat_rows(20), TableConfig::default());
    let before = ids(&table.filtered_top_level());

    table.set_search_query("ROW 1");
    assert_eq!(table.total_items(), 11);
    table.set_search_query("");

    assert_eq!(ids(&table.filtered_top_level()), before);
    Ok(())
}

#[test]
fn test_search_and_filter_compose() -> Result<()> {
    let document = DatasetDocument::from_json(
        r#"{
            "columns": [
                {"key": "name", "title": "Name"},
                {"key": "status", "title": "Status", "filterable": true}
            ],
            "data": [
                {"id": 1, "name": "api-gateway", "status": "Active"},
                {"id": 2, "name": "api-worker", "status": "Pending"},
                {"id": 3, "name": "web", "status": "Active"},
                {"id": 4, "name": "api-cache", "status": {"nested": true}}
            ]
        }"#,
    )?;
    let mut table = MultiLevelTable::new(document.columns(), TableConfig::default())
        .with_dataset(document.data);

    table.set_search_query("api");
    table.set_active_filter("status", [FilterValue::from("Active")])?;
    assert_eq!(ids(&table.filtered_top_level()), vec!["1"]);

    table.set_active_filter("status", Vec::<FilterValue>::new())?;
    assert_eq!(ids(&table.filtered_top_level()), vec!["1", "2", "4"]);

    let err = table.set_active_filter("name", [FilterValue::from("web")]).unwrap_err();
    assert!(matches!(err, TableError::ColumnNotFilterable { .. }));
    Ok(())
}

#[test]
fn test_criteria_change_collapses_everything() -> Result<()> {
    let roots = vec![
        Node::new(1).with_field("name", "a").with_children(vec![Node::new(10)]),
        Node::new(2).with_field("name", "b").with_children(vec![Node::new(20)]),
    ];
    let mut table = name_table(roots, TableConfig::default());

    table.expand_all();
    table.set_sort("name", Some(SortDir::Desc));
    assert!(table.expansion().is_empty());

    table.expand_all();
    table.set_search_query("a");
    assert!(table.expansion().is_empty());
    Ok(())
}

#[test]
fn test_select_all_example() -> Result<()> {
    let mut table = name_table(flat_rows(3), TableConfig::default());

    assert!(table.toggle_select_all());
    assert!(table.is_all_selected());
    assert_eq!(table.selection().selected_count(), 3);

    table.toggle_selection(&NodeId::from(2));
    assert!(!table.is_all_selected());
    assert!(table.is_selected(&NodeId::from(1)));
    assert!(table.is_selected(&NodeId::from(3)));
    Ok(())
}

#[test]
fn test_select_all_page_scope() -> Result<()> {
    let config = TableConfig {
        page_size: 5,
        select_all_scope: SelectAllScope::Page,
        ..TableConfig::default()
    };
    let mut table = name_table(flat_rows(12), config);
    table.goto_page(2);

    table.toggle_select_all();
    assert_eq!(table.selection().selected_count(), 2);
    assert!(table.is_all_selected());
    Ok(())
}

#[test]
fn test_selection_and_expansion_are_independent() -> Result<()> {
    let roots = vec![Node::new(1).with_children(vec![Node::new(10), Node::new(11)])];
    let mut table = name_table(roots, TableConfig::default());

    table.toggle_selection(&NodeId::from(1));
    table.toggle_expansion(&NodeId::from(1));
    table.toggle_selection(&NodeId::from(10));
    table.toggle_expansion(&NodeId::from(1));
    table.toggle_expansion(&NodeId::from(1));

    assert_eq!(table.selection().selected_count(), 2);
    assert!(!table.is_selected(&NodeId::from(11)));
    assert!(table.is_expanded(&NodeId::from(1)));

    table.toggle_selection(&NodeId::from(1));
    assert!(table.is_expanded(&NodeId::from(1)));
    let rows = table.visible_rows()?;
    let selected: Vec<String> = rows
        .iter()
        .filter(|row| row.is_selected)
        .map(|row| row.id().to_string())
        .collect();
    assert_eq!(selected, vec!["10"]);
    Ok(())
}

#[test]
fn test_delete_flow_and_apply() -> Result<()> {
    let roots = vec![
        Node::new(1).with_field("name", "a").with_children(vec![Node::new(10).with_field("name", "c")]),
        Node::new(2).with_field("name", "b"),
    ];
    let mut table = name_table(roots, TableConfig::default());

    let prompt = table
        .request_delete(&NodeId::from(1))
        .map(|request| request.prompt())
        .unwrap_or_default();
    assert_eq!(prompt, "Are you sure you want to delete \"a\" (ID: 1)?");

    let request = table.confirm_delete().ok_or_else(|| anyhow::anyhow!("no pending delete"))?;
    table.apply_delete(&request);

    assert_eq!(ids(&table.filtered_top_level()), vec!["2"]);
    assert!(!table.index().contains(&NodeId::from(10)));
    assert!(table.pending_delete().is_none());
    Ok(())
}

#[test]
fn test_export_filtered_scope_includes_subtrees() -> Result<()> {
    let roots = vec![
        Node::new(1).with_field("name", "b").with_children(vec![Node::new(10).with_field("name", "child")]),
        Node::new(2).with_field("name", "a"),
    ];
    let mut table = name_table(roots, TableConfig::default());
    table.set_sort("name", Some(SortDir::Asc));

    let mut out = Vec::new();
    let written = table.export_csv(&mut out, ExportScope::Filtered)?;

    assert_eq!(written, 3);
    assert_eq!(String::from_utf8(out)?, "level,Name\n0,a\n0,b\n1,child\n");
    Ok(())
}

#[test]
fn test_export_selected_scope() -> Result<()> {
    let roots = vec![
        Node::new(1).with_field("name", "a").with_children(vec![Node::new(10).with_field("name", "child")]),
        Node::new(2).with_field("name", "b"),
    ];
    let mut table = name_table(roots, TableConfig::default());
    table.toggle_selection(&NodeId::from(10));
    table.toggle_selection(&NodeId::from(2));

    let mut out = Vec::new();
    table.export_csv(&mut out, ExportScope::Selected)?;
    assert_eq!(String::from_utf8(out)?, "level,Name\n1,child\n0,b\n");
    Ok(())
}

#[test]
fn test_document_save_and_load() -> Result<()> {
    let path = env::temp_dir().join(format!("mltable_integration_{}.json", std::process::id()));
    let _ = fs::remove_file(&path);

    let document = generate_document(&SampleConfig {
        roots: 8,
        ..SampleConfig::default()
    });
    document.save(&path)?;
    let loaded = DatasetDocument::load(&path)?;
    fs::remove_file(&path)?;

    assert_eq!(loaded, document);
    assert_eq!(loaded.column_specs().len(), 6);
    Ok(())
}

#[test]
fn test_missing_document_is_io_error() {
    let path = env::temp_dir().join("mltable_does_not_exist.json");
    assert!(matches!(DatasetDocument::load(&path), Err(TableError::Io(_))));
}

#[test]
fn test_wide_numeric_ids_stay_distinct() -> Result<()> {
    let document = DatasetDocument::from_json(
        r#"[
            {"id": 18446744073709551615, "name": "max"},
            {"id": -1, "name": "minus one"},
            {"id": 1.5, "name": "fraction"}
        ]"#,
    )?;
    let mut table = MultiLevelTable::new(document.columns(), TableConfig::default())
        .with_dataset(document.data);

    assert_eq!(table.index().node_count(), 3);
    table.toggle_selection(&NodeId::from(u64::MAX));
    assert!(!table.is_selected(&NodeId::from(-1i64)));
    assert_eq!(table.selection().selected_count(), 1);

    let ids = ids(&table.filtered_top_level());
    assert_eq!(ids, vec!["18446744073709551615", "-1", "1.5"]);
    Ok(())
}

#[test]
fn test_edited_row_is_exported() -> Result<()> {
    let mut table = name_table(flat_rows(2), TableConfig::default());
    let mut fields = serde_json::Map::new();
    fields.insert("name".to_string(), serde_json::Value::from("edited"));
    assert!(table.update_node(&NodeId::from(2), fields));

    let mut out = Vec::new();
    table.export_csv(&mut out, ExportScope::Filtered)?;
    assert_eq!(String::from_utf8(out)?, "level,Name\n0,row 1\n0,edited\n");
    Ok(())
}
