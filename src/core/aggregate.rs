use crate::core::normalize::{clean_city, clean_state, display_city_label};
use crate::domain::model::{CountEntry, Table};
use serde::Serialize;
use std::collections::HashMap;

/// Shown in place of a top label when a table has no entries.
pub const EMPTY_SENTINEL: &str = "—";

/// Frequency table sorted by count descending. Equal counts keep the order
/// in which the labels were first seen.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CountTable {
    entries: Vec<CountEntry>,
}

impl CountTable {
    pub fn from_labels<I, S>(labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut index: HashMap<String, usize> = HashMap::new();
        let mut entries: Vec<CountEntry> = Vec::new();

        for label in labels {
            let label = label.into();
            match index.get(&label) {
                Some(&slot) => entries[slot].count += 1,
                None => {
                    index.insert(label.clone(), entries.len());
                    entries.push(CountEntry { label, count: 1 });
                }
            }
        }

        // sort_by 是穩定排序，同票數維持首次出現順序
        entries.sort_by(|a, b| b.count.cmp(&a.count));

        Self { entries }
    }

    pub fn entries(&self) -> &[CountEntry] {
        &self.entries
    }

    /// Number of distinct labels.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Sum of all counts.
    pub fn total(&self) -> usize {
        self.entries.iter().map(|e| e.count).sum()
    }

    pub fn top(&self) -> Option<&CountEntry> {
        self.entries.first()
    }

    pub fn top_label(&self) -> &str {
        self.top().map_or(EMPTY_SENTINEL, |e| e.label.as_str())
    }

    /// First `n` entries; `n` larger than the table yields the whole table.
    pub fn top_n(&self, n: usize) -> &[CountEntry] {
        &self.entries[..n.min(self.entries.len())]
    }

    /// Same counts and order with every label passed through `f`. Only meant
    /// for rendering, since `f` may collapse distinct labels.
    pub fn relabeled<'a, F>(&'a self, f: F) -> impl Iterator<Item = CountEntry> + 'a
    where
        F: Fn(&str) -> &str + 'a,
    {
        self.entries.iter().map(move |e| CountEntry {
            label: f(e.label.as_str()).to_string(),
            count: e.count,
        })
    }
}

/// 一次上傳的統計結果
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Report {
    pub total_rows: usize,
    pub states: CountTable,
    pub cities: CountTable,
}

impl Report {
    pub fn aggregate(table: &Table) -> Self {
        let states = CountTable::from_labels(table.rows().map(|row| clean_state(row.raw_state())));
        let cities = CountTable::from_labels(table.rows().map(|row| clean_city(row.raw_city())));

        tracing::debug!(
            "Aggregated {} rows into {} states / {} cities",
            table.len(),
            states.len(),
            cities.len()
        );

        Self {
            total_rows: table.len(),
            states,
            cities,
        }
    }

    pub fn distinct_states(&self) -> usize {
        self.states.len()
    }

    pub fn distinct_cities(&self) -> usize {
        self.cities.len()
    }

    pub fn top_state(&self) -> &str {
        self.states.top_label()
    }

    /// Top city in display form.
    pub fn top_city_display(&self) -> &str {
        display_city_label(self.cities.top_label())
    }

    pub fn top_states(&self, n: usize) -> &[CountEntry] {
        self.states.top_n(n)
    }

    pub fn top_cities(&self, n: usize) -> &[CountEntry] {
        self.cities.top_n(n)
    }

    /// City counts with display labels, same order as `cities`.
    pub fn cities_for_display(&self) -> Vec<CountEntry> {
        self.cities.relabeled(display_city_label).collect()
    }
}
