//! Frequency Ranker
//! Counts tokens and ranks them, most frequent first.

use polars::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

pub const DEFAULT_TOP_N: usize = 10;

/// Column names of the exported frequency table.
pub const TERM_COLUMN: &str = "palavra";
pub const COUNT_COLUMN: &str = "frequencia";

/// One row of the ranked table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankedTerm {
    pub term: String,
    pub count: usize,
}

/// Token counts kept in first-encounter order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FrequencyTable {
    counts: Vec<(String, usize)>,
}

impl FrequencyTable {
    pub fn from_tokens<S: AsRef<str>>(tokens: &[S]) -> Self {
        let mut index: HashMap<&str, usize> = HashMap::new();
        let mut counts: Vec<(String, usize)> = Vec::new();

        for token in tokens {
            let token = token.as_ref();
            match index.get(token) {
                Some(&slot) => counts[slot].1 += 1,
                None => {
                    index.insert(token, counts.len());
                    counts.push((token.to_string(), 1));
                }
            }
        }

        Self { counts }
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Number of distinct tokens.
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    /// Sum of all counts, i.e. the length of the source sequence.
    pub fn total(&self) -> usize {
        self.counts.iter().map(|(_, c)| c).sum()
    }

    /// All rows by descending count; ties keep first-encounter order.
    pub fn ranked(&self) -> Vec<RankedTerm> {
        let mut rows: Vec<RankedTerm> = self
            .counts
            .iter()
            .map(|(term, count)| RankedTerm {
                term: term.clone(),
                count: *count,
            })
            .collect();
        // `sort_by` is stable
        rows.sort_by(|a, b| b.count.cmp(&a.count));
        rows
    }

    pub fn top(&self, n: usize) -> Vec<RankedTerm> {
        let mut rows = self.ranked();
        rows.truncate(n);
        rows
    }

    /// Ranked two-column table (`palavra`, `frequencia`).
    pub fn to_dataframe(&self) -> PolarsResult<DataFrame> {
        let ranked = self.ranked();
        let terms: Vec<String> = ranked.iter().map(|r| r.term.clone()).collect();
        let counts: Vec<u32> = ranked.iter().map(|r| r.count as u32).collect();

        DataFrame::new(vec![
            Column::new(TERM_COLUMN.into(), terms),
            Column::new(COUNT_COLUMN.into(), counts),
        ])
    }
}
