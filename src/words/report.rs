// src/words/report.rs
// =============================================================================
// Ranks the counted tokens for the final report.
//
// Ordering rules:
// 1. Higher count first
// 2. On equal counts, alphabetical (byte order) by token
//
// Ties are very common at low counts, so rule 2 is what keeps the output
// identical from run to run.
// =============================================================================

use serde::Serialize;
use std::cmp::Reverse;
use std::collections::HashMap;

// One line of the report
//
// #[derive(Serialize)] lets us print the report as JSON with --json
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RankedToken {
    pub token: String,
    pub count: u64,
}

// Picks the `limit` most frequent tokens
//
// Parameters:
//   counts: the final frequency table snapshot
//   limit: maximum number of entries to return
//
// Returns: Vec of RankedToken in report order
pub fn top_n(counts: &HashMap<String, u64>, limit: usize) -> Vec<RankedToken> {
    let mut ranked: Vec<RankedToken> = counts
        .iter()
        .map(|(token, count)| RankedToken {
            token: token.clone(),
            count: *count,
        })
        .collect();

    ranked.sort_by(|a, b| {
        Reverse(a.count)
            .cmp(&Reverse(b.count))
            .then_with(|| a.token.cmp(&b.token))
    });
    ranked.truncate(limit);

    ranked
}
