//! Filter/sort/paginate engine over an in-memory record collection.
//!
//! The engine keeps the source records untouched and tracks the visible
//! subset as an index vector, the same way a database view projects rows
//! without copying them. It renders nothing and binds no events: hosts
//! issue commands (`filter`, `sort`, `set_page`) and read state back,
//! usually through [`TableEngine::snapshot`].

use tracing::debug;

use super::column::{ColumnSpec, RenderKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Ascending,
    Descending,
}

impl SortDirection {
    pub fn toggled(self) -> Self {
        match self {
            SortDirection::Ascending => SortDirection::Descending,
            SortDirection::Descending => SortDirection::Ascending,
        }
    }

    pub fn marker(self) -> &'static str {
        match self {
            SortDirection::Ascending => "▲",
            SortDirection::Descending => "▼",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortState {
    pub key: &'static str,
    pub direction: SortDirection,
}

pub struct TableEngine<T> {
    columns: Vec<ColumnSpec<T>>,
    source: Vec<T>,
    /// Indices into `source` that survive the active filter, in display
    /// order. Sorting permutes this vector, never `source`.
    visible: Vec<usize>,
    page_size: usize,
    current_page: usize,
    search_term: String,
    sort: Option<SortState>,
}

impl<T> TableEngine<T> {
    pub fn new(columns: Vec<ColumnSpec<T>>, records: Vec<T>, page_size: usize) -> Self {
        let visible = (0..records.len()).collect();
        Self {
            columns,
            source: records,
            visible,
            page_size: page_size.max(1),
            current_page: 1,
            search_term: String::new(),
            sort: None,
        }
    }

    /// Replaces the source records. The search term clears and the page
    /// resets, but an active sort carries over and is re-applied so a
    /// reload keeps the user's ordering.
    pub fn set_data(&mut self, records: Vec<T>) {
        self.source = records;
        self.visible = (0..self.source.len()).collect();
        self.search_term.clear();
        self.current_page = 1;
        self.apply_sort();
    }

    /// Keeps rows where any column's rendered value contains `term`
    /// case-insensitively. An empty term restores every row. The page
    /// resets; an active sort is re-applied to the surviving rows.
    pub fn filter(&mut self, term: &str) {
        self.search_term = term.to_string();
        let needle = term.to_lowercase();
        self.visible = (0..self.source.len())
            .filter(|&index| {
                if needle.is_empty() {
                    return true;
                }
                let record = &self.source[index];
                self.columns
                    .iter()
                    .any(|column| column.rendered(record).to_lowercase().contains(&needle))
            })
            .collect();
        self.current_page = 1;
        self.apply_sort();
    }

    /// Sorts by the named column: a repeated key toggles direction, a
    /// new key starts ascending. Unknown and non-sortable keys are
    /// ignored. The page is left alone.
    pub fn sort(&mut self, key: &str) {
        let Some(column) = self.columns.iter().find(|column| column.key == key) else {
            debug!(target: "table", "ignoring sort on unknown column {key}");
            return;
        };
        if !column.sortable {
            return;
        }
        let direction = match self.sort {
            Some(state) if state.key == column.key => state.direction.toggled(),
            _ => SortDirection::Ascending,
        };
        self.sort = Some(SortState {
            key: column.key,
            direction,
        });
        self.apply_sort();
    }

    /// Accepted only when `1 <= page <= page_count`; anything else is a
    /// silent no-op so stale pagination input cannot jump out of range.
    pub fn set_page(&mut self, page: usize) {
        if (1..=self.page_count()).contains(&page) {
            self.current_page = page;
        }
    }

    pub fn next_page(&mut self) {
        self.set_page(self.current_page + 1);
    }

    pub fn prev_page(&mut self) {
        self.set_page(self.current_page.saturating_sub(1));
    }

    pub fn page_count(&self) -> usize {
        self.visible.len().div_ceil(self.page_size).max(1)
    }

    pub fn current_page(&self) -> usize {
        self.current_page
    }

    pub fn search_term(&self) -> &str {
        &self.search_term
    }

    pub fn sort_state(&self) -> Option<SortState> {
        self.sort
    }

    pub fn visible_len(&self) -> usize {
        self.visible.len()
    }

    pub fn source_len(&self) -> usize {
        self.source.len()
    }

    pub fn columns(&self) -> &[ColumnSpec<T>] {
        &self.columns
    }

    /// Records on the current page, clamped to what exists. An empty
    /// page is a valid result, not an error.
    pub fn page_records(&self) -> Vec<&T> {
        self.page_indices()
            .iter()
            .map(|&index| &self.source[index])
            .collect()
    }

    /// The whole visible set in display order, for exports.
    pub fn visible_records(&self) -> Vec<&T> {
        self.visible.iter().map(|&index| &self.source[index]).collect()
    }

    /// Record behind row `row` of the current page.
    pub fn page_record(&self, row: usize) -> Option<&T> {
        self.page_indices()
            .get(row)
            .map(|&index| &self.source[index])
    }

    /// Render-ready copy of the current page and paging state. Hosts
    /// draw from this without reaching into the engine.
    pub fn snapshot(&self) -> TableSnapshot {
        let headers = self
            .columns
            .iter()
            .map(|column| HeaderCell {
                key: column.key,
                label: column.label.clone(),
                kind: column.kind,
                sortable: column.sortable,
                sort: self
                    .sort
                    .filter(|state| state.key == column.key)
                    .map(|state| state.direction),
            })
            .collect();
        let rows = self
            .page_indices()
            .iter()
            .map(|&index| {
                let record = &self.source[index];
                RowSnapshot {
                    source_index: index,
                    cells: self
                        .columns
                        .iter()
                        .map(|column| {
                            let text = column.rendered(record);
                            let tag = (column.kind == RenderKind::Badge)
                                .then(|| text.to_lowercase());
                            CellSnapshot {
                                text,
                                kind: column.kind,
                                tag,
                            }
                        })
                        .collect(),
                }
            })
            .collect();
        TableSnapshot {
            headers,
            rows,
            current_page: self.current_page,
            page_count: self.page_count(),
            visible_total: self.visible.len(),
            source_total: self.source.len(),
            search_term: self.search_term.clone(),
        }
    }

    fn page_indices(&self) -> &[usize] {
        let start = (self.current_page - 1) * self.page_size;
        let end = (start + self.page_size).min(self.visible.len());
        if start >= self.visible.len() {
            return &[];
        }
        &self.visible[start..end]
    }

    fn apply_sort(&mut self) {
        let Some(state) = self.sort else {
            return;
        };
        let Some(column) = self.columns.iter().find(|column| column.key == state.key) else {
            return;
        };
        let source = &self.source;
        // Stable sort keeps tied rows in their pre-sort relative order.
        self.visible.sort_by(|&a, &b| {
            let ordering = column.value(&source[a]).compare(&column.value(&source[b]));
            match state.direction {
                SortDirection::Ascending => ordering,
                SortDirection::Descending => ordering.reverse(),
            }
        });
    }
}

/// Header metadata for one rendered column.
#[derive(Debug, Clone)]
pub struct HeaderCell {
    pub key: &'static str,
    pub label: String,
    pub kind: RenderKind,
    pub sortable: bool,
    pub sort: Option<SortDirection>,
}

#[derive(Debug, Clone)]
pub struct CellSnapshot {
    pub text: String,
    pub kind: RenderKind,
    /// Lowercased badge label for hosts that style badges.
    pub tag: Option<String>,
}

#[derive(Debug, Clone)]
pub struct RowSnapshot {
    pub source_index: usize,
    pub cells: Vec<CellSnapshot>,
}

#[derive(Debug, Clone)]
pub struct TableSnapshot {
    pub headers: Vec<HeaderCell>,
    pub rows: Vec<RowSnapshot>,
    pub current_page: usize,
    pub page_count: usize,
    pub visible_total: usize,
    pub source_total: usize,
    pub search_term: String,
}

impl TableSnapshot {
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
