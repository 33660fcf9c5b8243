use std::sync::OnceLock;

/// Neighbor counts range over `0..=8`
const NEIGHBOR_COUNTS: usize = 9;
type RuleIndex = [[bool; NEIGHBOR_COUNTS]; 2];

/// Returns a Singleton lookup table for the Game of Life ruleset
///
/// Equivalent to calling [`generate_rule_index`] once and storing the result
pub(super) fn get_rule_index() -> &'static RuleIndex {
    static CELL: OnceLock<RuleIndex> = OnceLock::new();
    CELL.get_or_init(generate_rule_index)
}

/// Creates a lookup table for the Game of Life ruleset (B3/S23)
///
/// The table is indexed by `[alive as usize][live_neighbors]`.
///
/// Returns whether the cell should be alive in the next generation
pub(super) fn generate_rule_index() -> RuleIndex {
    let mut index = [[false; NEIGHBOR_COUNTS]; 2];
    for (alive, row) in index.iter_mut().enumerate() {
        for (neighbors, next) in row.iter_mut().enumerate() {
            *next = matches!((alive == 1, neighbors), (true, 2) | (_, 3));
        }
    }
    index
}
