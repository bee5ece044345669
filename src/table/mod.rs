//! The table core: one state bundle per table instance.
//!
//! `MultiLevelTable` owns the dataset, its index and every piece of view
//! state. All operations recompute synchronously; nothing is cached between
//! calls except the tree index, which is rebuilt on `set_dataset`.

pub mod delete_flow;
pub mod expansion;
pub mod selection;

pub use delete_flow::{DeleteConfirmation, DeleteRequest};
pub use expansion::ExpansionState;
pub use selection::{SelectionSnapshot, SelectionState};

use crate::column::{find_column, Column};
use crate::config::{SelectAllScope, TableConfig};
use crate::error::{Result, TableError};
use crate::export::{self, ExportScope};
use crate::node::{FilterValue, Node, NodeId};
use crate::pipeline::{
    filter_categories, filter_options, filter_top_level, next_sort_on_click, sort_top_level,
    ActiveFilter, FilterCategory, FilterCriteria, FilterOption, PageLink, Paginator, SortDir,
    SortSpec,
};
use crate::tree::{flatten_visible, FlattenLimits, TreeIndex, VisibleRow};
use serde_json::{Map, Value};
use std::collections::HashSet;
use std::io::Write;

type RowCallback = Box<dyn FnMut(&Node) + Send>;
type DeleteCallback = Box<dyn FnMut(&DeleteRequest) + Send>;
type SelectionCallback = Box<dyn FnMut(&SelectionSnapshot) + Send>;

/// Hooks fired synchronously from the operation that triggers them.
#[derive(Default)]
pub struct TableCallbacks {
    pub on_row_click: Option<RowCallback>,
    pub on_edit_request: Option<RowCallback>,
    pub on_delete_request: Option<DeleteCallback>,
    pub on_selection_change: Option<SelectionCallback>,
}

impl TableCallbacks {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on_row_click(mut self, f: impl FnMut(&Node) + Send + 'static) -> Self {
        self.on_row_click = Some(Box::new(f));
        self
    }

    pub fn on_edit_request(mut self, f: impl FnMut(&Node) + Send + 'static) -> Self {
        self.on_edit_request = Some(Box::new(f));
        self
    }

    pub fn on_delete_request(mut self, f: impl FnMut(&DeleteRequest) + Send + 'static) -> Self {
        self.on_delete_request = Some(Box::new(f));
        self
    }

    pub fn on_selection_change(mut self, f: impl FnMut(&SelectionSnapshot) + Send + 'static) -> Self {
        self.on_selection_change = Some(Box::new(f));
        self
    }
}

/// Headless hierarchical table.
pub struct MultiLevelTable {
    config: TableConfig,
    columns: Vec<Column>,
    roots: Vec<Node>,
    index: TreeIndex,

    search_query: String,
    active_filter: Option<ActiveFilter>,
    active_sort: Option<SortSpec>,

    paginator: Paginator,
    expansion: ExpansionState,
    selection: SelectionState,
    delete_flow: DeleteConfirmation,
    callbacks: TableCallbacks,
}

impl MultiLevelTable {
    pub fn new(columns: Vec<Column>, config: TableConfig) -> Self {
        Self {
            paginator: Paginator::new(&config),
            config,
            columns,
            roots: Vec::new(),
            index: TreeIndex::new(),
            search_query: String::new(),
            active_filter: None,
            active_sort: None,
            expansion: ExpansionState::new(),
            selection: SelectionState::new(),
            delete_flow: DeleteConfirmation::new(),
            callbacks: TableCallbacks::new(),
        }
    }

    pub fn with_dataset(mut self, roots: Vec<Node>) -> Self {
        self.set_dataset(roots);
        self
    }

    pub fn with_callbacks(mut self, callbacks: TableCallbacks) -> Self {
        self.callbacks = callbacks;
        self
    }

    // ===== Queries =====

    pub fn config(&self) -> &TableConfig {
        &self.config
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn roots(&self) -> &[Node] {
        &self.roots
    }

    pub fn index(&self) -> &TreeIndex {
        &self.index
    }

    pub fn search_query(&self) -> &str {
        &self.search_query
    }

    pub fn active_filter(&self) -> Option<&ActiveFilter> {
        self.active_filter.as_ref()
    }

    pub fn active_sort(&self) -> Option<&SortSpec> {
        self.active_sort.as_ref()
    }

    pub fn expansion(&self) -> &ExpansionState {
        &self.expansion
    }

    pub fn selection(&self) -> &SelectionState {
        &self.selection
    }

    /// Top-level rows passing search and filter, in sorted order.
    pub fn filtered_top_level(&self) -> Vec<&Node> {
        let criteria = FilterCriteria {
            query: &self.search_query,
            searchable_keys: &self.config.searchable_columns,
            active: self.active_filter.as_ref(),
        };
        let mut rows = filter_top_level(&self.roots, &self.columns, &criteria);
        sort_top_level(&mut rows, &self.columns, self.active_sort.as_ref());
        rows
    }

    /// Top-level rows on the current page.
    pub fn current_page(&self) -> Vec<&Node> {
        let mut rows = self.filtered_top_level();
        let range = self.paginator.page_range(rows.len());
        rows.truncate(range.end);
        rows.drain(..range.start);
        rows
    }

    /// Rows to display for the current page, children of expanded nodes
    /// included.
    pub fn visible_rows(&self) -> Result<Vec<VisibleRow<'_>>> {
        let page = self.current_page();
        flatten_visible(
            &page,
            &self.roots,
            &self.index,
            &self.expansion,
            &self.selection,
            FlattenLimits::from_config(&self.config),
        )
    }

    /// Number of top-level rows passing search and filter.
    pub fn total_items(&self) -> usize {
        self.filtered_top_level().len()
    }

    pub fn page_index(&self) -> usize {
        self.paginator.effective_page_index(self.total_items())
    }

    pub fn page_size(&self) -> usize {
        self.paginator.page_size()
    }

    pub fn page_size_options(&self) -> &[usize] {
        self.paginator.page_size_options()
    }

    pub fn page_count(&self) -> usize {
        self.paginator.page_count(self.total_items())
    }

    pub fn page_links(&self) -> Vec<PageLink> {
        self.paginator.page_links(self.total_items())
    }

    pub fn can_previous_page(&self) -> bool {
        self.paginator.can_previous_page(self.total_items())
    }

    pub fn can_next_page(&self) -> bool {
        self.paginator.can_next_page(self.total_items())
    }

    pub fn is_expanded(&self, id: &NodeId) -> bool {
        self.expansion.is_expanded(id)
    }

    pub fn is_all_expanded(&self) -> bool {
        self.expansion.is_all_expanded(&self.index)
    }

    pub fn is_selected(&self, id: &NodeId) -> bool {
        self.selection.is_selected(id)
    }

    /// Top-level ids covered by "select all".
    pub fn eligible_ids(&self) -> Vec<NodeId> {
        let rows = match self.config.select_all_scope {
            SelectAllScope::Filtered => self.filtered_top_level(),
            SelectAllScope::Page => self.current_page(),
        };
        rows.into_iter().map(|node| node.id.clone()).collect()
    }

    pub fn is_all_selected(&self) -> bool {
        self.selection.is_all_selected(&self.eligible_ids())
    }

    pub fn selection_snapshot(&self) -> SelectionSnapshot {
        self.selection.snapshot(&self.eligible_ids())
    }

    pub fn find_node(&self, id: &NodeId) -> Option<&Node> {
        self.index.node(&self.roots, id)
    }

    pub fn filter_options(&self, key: &str) -> Vec<FilterOption> {
        filter_options(&self.roots, key)
    }

    pub fn filter_categories(&self) -> Vec<FilterCategory> {
        filter_categories(&self.roots, &self.columns)
    }

    pub fn pending_delete(&self) -> Option<&DeleteRequest> {
        self.delete_flow.pending()
    }

    // ===== Dataset and Column Mutations =====

    /// Replaces the dataset and rebuilds the index. View state is kept.
    pub fn set_dataset(&mut self, roots: Vec<Node>) {
        self.roots = roots;
        self.index = TreeIndex::build(&self.roots);
        let total = self.total_items();
        self.paginator.clamp(total);
    }

    pub fn set_columns(&mut self, columns: Vec<Column>) {
        self.columns = columns;
    }

    pub fn set_callbacks(&mut self, callbacks: TableCallbacks) {
        self.callbacks = callbacks;
    }

    // ===== Filter and Sort Mutations =====

    pub fn set_search_query(&mut self, query: impl Into<String>) {
        let query = query.into();
        if query == self.search_query {
            return;
        }
        log::debug!("search query set to '{}'", query);
        self.search_query = query;
        self.criteria_changed();
    }

    /// Activates a category filter. An empty `accepted` set passes everything.
    ///
    /// A declared column that is not filterable is rejected; an undeclared
    /// key is accepted and matches nothing.
    pub fn set_active_filter(
        &mut self,
        key: &str,
        accepted: impl IntoIterator<Item = FilterValue>,
    ) -> Result<()> {
        if let Some(column) = find_column(&self.columns, key) {
            if !column.filterable {
                return Err(TableError::ColumnNotFilterable { key: key.to_string() });
            }
        }
        let filter = ActiveFilter::new(key, accepted);
        log::debug!("filter on '{}' with {} accepted values", key, filter.accepted.len());
        self.active_filter = Some(filter);
        self.criteria_changed();
        Ok(())
    }

    pub fn clear_active_filter(&mut self) {
        if self.active_filter.take().is_some() {
            log::debug!("filter cleared");
            self.criteria_changed();
        }
    }

    /// Sets the sort column and direction; `None` restores data order.
    pub fn set_sort(&mut self, key: &str, dir: Option<SortDir>) {
        self.active_sort = dir.map(|dir| SortSpec::new(key, dir));
        log::debug!("sort set to {:?}", self.active_sort);
        self.criteria_changed();
    }

    pub fn clear_sort(&mut self) {
        self.active_sort = None;
        self.criteria_changed();
    }

    /// Advances the header-click cycle for `key`. Returns the new sort.
    pub fn toggle_sort(&mut self, key: &str) -> Result<Option<SortSpec>> {
        let column = find_column(&self.columns, key)
            .ok_or_else(|| TableError::UnknownColumn { key: key.to_string() })?;
        if !column.is_sortable(self.config.sortable) {
            return Err(TableError::ColumnNotSortable { key: key.to_string() });
        }

        self.active_sort = next_sort_on_click(self.active_sort.as_ref(), key, self.config.allow_clear_sort);
        log::debug!("sort toggled to {:?}", self.active_sort);
        self.criteria_changed();
        Ok(self.active_sort.clone())
    }

    /// Ordering or membership of top-level rows changed: collapse everything
    /// and pull the page back into range.
    fn criteria_changed(&mut self) {
        if !self.expansion.is_empty() {
            log::debug!("expansion cleared ({} nodes)", self.expansion.expanded_count());
            self.expansion.clear();
        }
        let total = self.total_items();
        self.paginator.clamp(total);
    }

    // ===== Expansion Mutations =====

    /// Flips expansion of `id`. Returns the new state, or `None` for ids
    /// without children.
    pub fn toggle_expansion(&mut self, id: &NodeId) -> Option<bool> {
        self.expansion.toggle(id, &self.index)
    }

    pub fn expand_all(&mut self) {
        self.expansion.expand_all(&self.index);
        log::debug!("expanded all {} parents", self.expansion.expanded_count());
    }

    pub fn collapse_all(&mut self) {
        self.expansion.clear();
    }

    // ===== Selection Mutations =====

    /// Flips selection of `id`. Returns the new state; always false when the
    /// table is not selectable.
    pub fn toggle_selection(&mut self, id: &NodeId) -> bool {
        if !self.config.selectable {
            return false;
        }
        let selected = self.selection.toggle_one(id);
        self.notify_selection();
        selected
    }

    /// Selects every eligible top-level id, or clears the selection when they
    /// are all selected. Returns the resulting "all selected" flag.
    pub fn toggle_select_all(&mut self) -> bool {
        if !self.config.selectable {
            return false;
        }
        let eligible = self.eligible_ids();
        let all = self.selection.toggle_all(&eligible);
        self.notify_selection();
        all
    }

    pub fn clear_selection(&mut self) {
        if !self.selection.is_empty() {
            self.selection.clear();
            self.notify_selection();
        }
    }

    fn notify_selection(&mut self) {
        if self.callbacks.on_selection_change.is_none() {
            return;
        }
        let snapshot = self.selection_snapshot();
        if let Some(callback) = self.callbacks.on_selection_change.as_mut() {
            callback(&snapshot);
        }
    }

    // ===== Pagination Mutations =====

    pub fn goto_page(&mut self, index: usize) {
        let total = self.total_items();
        self.paginator.goto_page(index, total);
    }

    pub fn next_page(&mut self) {
        let total = self.total_items();
        self.paginator.next_page(total);
    }

    pub fn previous_page(&mut self) {
        let total = self.total_items();
        self.paginator.previous_page(total);
    }

    pub fn set_page_size(&mut self, size: usize) {
        self.paginator.set_page_size(size);
    }

    // ===== Row Actions =====

    /// Fires the row-click callback for `id`. Returns false for unknown ids.
    pub fn row_click(&mut self, id: &NodeId) -> bool {
        let Some(node) = self.index.node(&self.roots, id) else {
            return false;
        };
        if let Some(callback) = self.callbacks.on_row_click.as_mut() {
            callback(node);
        }
        true
    }

    /// Fires the edit-request callback for `id`. Returns false for unknown
    /// ids. Editing itself is up to the host, which writes the result back
    /// with [`MultiLevelTable::update_node`].
    pub fn request_edit(&mut self, id: &NodeId) -> bool {
        let Some(node) = self.index.node(&self.roots, id) else {
            return false;
        };
        if let Some(callback) = self.callbacks.on_edit_request.as_mut() {
            callback(node);
        }
        true
    }

    /// Opens a delete confirmation for one node.
    pub fn request_delete(&mut self, id: &NodeId) -> Option<&DeleteRequest> {
        let node = self.index.node(&self.roots, id)?;
        let request = DeleteRequest::Single {
            id: node.id.clone(),
            name: node.display_name(),
        };
        self.open_delete(request);
        self.delete_flow.pending()
    }

    /// Opens a delete confirmation for the current selection. Does nothing
    /// when the selection is empty.
    pub fn request_bulk_delete(&mut self) -> Option<&DeleteRequest> {
        if self.selection.is_empty() {
            return None;
        }
        let request = DeleteRequest::Bulk {
            ids: self.selection.selected_ids(),
        };
        self.open_delete(request);
        self.delete_flow.pending()
    }

    fn open_delete(&mut self, request: DeleteRequest) {
        if let Some(callback) = self.callbacks.on_delete_request.as_mut() {
            callback(&request);
        }
        self.delete_flow.open(request);
    }

    /// Closes the pending confirmation and hands the request back. A bulk
    /// confirm clears the selection. The dataset is left untouched.
    pub fn confirm_delete(&mut self) -> Option<DeleteRequest> {
        let request = self.delete_flow.confirm()?;
        if matches!(request, DeleteRequest::Bulk { .. }) {
            self.clear_selection();
        }
        Some(request)
    }

    pub fn cancel_delete(&mut self) {
        self.delete_flow.cancel();
    }

    /// Removes the nodes of a confirmed request from the dataset, together
    /// with their subtrees, and drops them from selection and expansion.
    pub fn apply_delete(&mut self, request: &DeleteRequest) {
        let ids: HashSet<NodeId> = request.ids().into_iter().collect();
        let pruned = crate::node::prune_ids(&self.roots, &ids);
        self.set_dataset(pruned);
        let index = &self.index;
        self.selection.retain(|id| index.contains(id));
        self.expansion.retain(|id| index.has_children(id));
    }

    /// Overwrites the given fields of the node with `id`, leaving its other
    /// fields, its children and all view state in place. `id` and `children`
    /// keys are ignored. Returns false for unknown ids.
    pub fn update_node(&mut self, id: &NodeId, fields: Map<String, Value>) -> bool {
        let Some(node) = self.index.node_mut(&mut self.roots, id) else {
            return false;
        };
        for (key, value) in fields {
            if key == "id" || key == "children" {
                log::warn!("ignoring structural key '{}' in update of {}", key, id);
                continue;
            }
            node.fields.insert(key, value);
        }
        log::debug!("updated fields of {}", id);
        self.index = TreeIndex::build(&self.roots);
        let total = self.total_items();
        self.paginator.clamp(total);
        true
    }

    // ===== Export =====

    /// Writes the rows in `scope` as CSV. Returns the number of records.
    pub fn export_csv<W: Write>(&self, writer: W, scope: ExportScope) -> Result<usize> {
        match scope {
            ExportScope::Filtered => {
                let rows = export::subtrees_preorder(&self.filtered_top_level());
                export::export_csv(writer, rows, &self.columns)
            }
            ExportScope::Page => {
                let rows = self.visible_rows()?;
                export::export_csv(writer, rows.iter().map(|row| (row.level, row.node)), &self.columns)
            }
            ExportScope::Selected => {
                let tops: Vec<&Node> = self.roots.iter().collect();
                let rows = export::subtrees_preorder(&tops)
                    .into_iter()
                    .filter(|(_, node)| self.selection.is_selected(&node.id));
                export::export_csv(writer, rows, &self.columns)
            }
        }
    }
}
