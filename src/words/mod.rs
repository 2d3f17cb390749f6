// src/words/mod.rs
// =============================================================================
// This module holds everything about the words we count.
//
// Submodules:
// - classify: Splits page text into words and picks the countable ones
// - table: The shared, thread-safe frequency table
// - report: Ranks the final counts for printing
// =============================================================================

mod classify;
mod report;
mod table;

pub use report::{top_n, RankedToken};
pub use table::FrequencyTable;
