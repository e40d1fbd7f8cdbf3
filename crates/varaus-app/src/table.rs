// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use std::cmp::Ordering;
use std::collections::{BTreeMap, BTreeSet};

use crate::columns::CellConfig;
use crate::fields::TableRecord;
use crate::model::{Application, Group, GroupTab, ProcessedAllocationResult, SortOrder};

/// Sort, filter and selection state over one grouped row collection. All
/// operations are pure and local; the visible projection is recomputed from
/// scratch on every call so it can never go stale against the base
/// collection.
pub struct TableView<R> {
    config: CellConfig<R>,
    groups: Vec<Group<R>>,
    sort_key: String,
    sort_order: SortOrder,
    active_filters: BTreeMap<&'static str, BTreeSet<String>>,
    selected: BTreeSet<i64>,
}

impl<R: TableRecord + Clone> TableView<R> {
    pub fn new(config: CellConfig<R>, groups: Vec<Group<R>>) -> Self {
        let sort_key = config.sorting.to_owned();
        let sort_order = config.order;
        Self {
            config,
            groups,
            sort_key,
            sort_order,
            active_filters: BTreeMap::new(),
            selected: BTreeSet::new(),
        }
    }

    pub fn config(&self) -> &CellConfig<R> {
        &self.config
    }

    pub fn sort_key(&self) -> &str {
        &self.sort_key
    }

    pub fn sort_order(&self) -> SortOrder {
        self.sort_order
    }

    /// Replaces the base collection. Sort and filter state survive; the
    /// selection is pruned to rows that still exist.
    pub fn set_groups(&mut self, groups: Vec<Group<R>>) {
        self.groups = groups;
        let existing: BTreeSet<i64> = self
            .groups
            .iter()
            .flat_map(|group| group.data.iter())
            .filter_map(|row| (self.config.index)(row))
            .collect();
        self.selected.retain(|id| existing.contains(id));
    }

    pub fn set_sort(&mut self, key: &str, order: SortOrder) {
        self.sort_key = key.to_owned();
        self.sort_order = order;
    }

    /// Activating the current sort column flips its direction; a new column
    /// starts at the config's default order.
    pub fn cycle_sort(&mut self, key: &str) {
        if self.sort_key == key {
            self.sort_order = self.sort_order.flipped();
        } else {
            self.sort_key = key.to_owned();
            self.sort_order = self.config.order;
        }
    }

    pub fn toggle_filter(&mut self, key: &'static str, value: &str) {
        let set = self.active_filters.entry(key).or_default();
        if !set.remove(value) {
            set.insert(value.to_owned());
        }
        if self.active_filters.get(key).is_some_and(BTreeSet::is_empty) {
            self.active_filters.remove(key);
        }
    }

    pub fn clear_filters(&mut self) {
        self.active_filters.clear();
    }

    pub fn has_filter(&self, key: &str, value: &str) -> bool {
        self.active_filters
            .get(key)
            .is_some_and(|set| set.contains(value))
    }

    pub fn active_filter_count(&self) -> usize {
        self.active_filters.values().map(BTreeSet::len).sum()
    }

    pub fn toggle_select(&mut self, row_id: i64) {
        if !self.selected.remove(&row_id) {
            self.selected.insert(row_id);
        }
    }

    pub fn clear_selection(&mut self) {
        self.selected.clear();
    }

    pub fn is_selected(&self, row_id: i64) -> bool {
        self.selected.contains(&row_id)
    }

    pub fn selected_ids(&self) -> Vec<i64> {
        self.selected.iter().copied().collect()
    }

    pub fn all_rows(&self) -> Vec<&R> {
        self.groups
            .iter()
            .flat_map(|group| group.data.iter())
            .collect()
    }

    pub fn total_rows(&self) -> usize {
        self.groups.iter().map(|group| group.data.len()).sum()
    }

    /// The pure projection: filter then stable sort, within each group.
    /// Groups that filter down to nothing stay in place (renderers may skip
    /// them); group order never changes.
    pub fn visible_groups(&self) -> Vec<Group<R>> {
        self.groups
            .iter()
            .map(|group| {
                let mut data: Vec<R> = group
                    .data
                    .iter()
                    .filter(|row| self.row_passes_filters(row))
                    .cloned()
                    .collect();
                self.sort_rows(&mut data);
                Group {
                    id: group.id,
                    data,
                }
            })
            .collect()
    }

    pub fn visible_rows(&self) -> Vec<R> {
        self.visible_groups()
            .into_iter()
            .flat_map(|group| group.data)
            .collect()
    }

    // AND across facets, OR within a facet's value set.
    fn row_passes_filters(&self, row: &R) -> bool {
        self.active_filters.iter().all(|(key, set)| {
            set.is_empty() || set.contains(&row.field(key).filter_token())
        })
    }

    fn sort_rows(&self, rows: &mut [R]) {
        rows.sort_by(|left, right| {
            let left_value = left.field(&self.sort_key);
            let right_value = right.field(&self.sort_key);
            // Missing values go to the end under either direction.
            let ordering = match (left_value.is_empty(), right_value.is_empty()) {
                (true, true) => Ordering::Equal,
                (true, false) => return Ordering::Greater,
                (false, true) => return Ordering::Less,
                (false, false) => match self.sort_order {
                    SortOrder::Asc => left_value.cmp_value(&right_value),
                    SortOrder::Desc => left_value.cmp_value(&right_value).reverse(),
                },
            };
            if ordering != Ordering::Equal {
                return ordering;
            }
            (self.config.index)(left).cmp(&(self.config.index)(right))
        });
    }
}

/// The resolution report's two row collections and which of them subsequent
/// operations act on. Each tab keeps its own sort/filter/selection state;
/// switching resets nothing.
pub struct ResolutionTables {
    pub allocated: TableView<ProcessedAllocationResult>,
    pub unallocated: TableView<Application>,
    active_tab: GroupTab,
}

impl ResolutionTables {
    pub fn new(
        allocated: TableView<ProcessedAllocationResult>,
        unallocated: TableView<Application>,
    ) -> Self {
        Self {
            allocated,
            unallocated,
            active_tab: GroupTab::Allocated,
        }
    }

    pub fn active_tab(&self) -> GroupTab {
        self.active_tab
    }

    pub fn set_active_tab(&mut self, tab: GroupTab) {
        self.active_tab = tab;
    }

    pub fn toggle_tab(&mut self) {
        self.active_tab = match self.active_tab {
            GroupTab::Allocated => GroupTab::Unallocated,
            GroupTab::Unallocated => GroupTab::Allocated,
        };
    }
}
