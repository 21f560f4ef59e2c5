//! Demo mode - the game plays itself
//!
//! Chases the most dangerous column (the one whose newest object is highest)
//! one step at a time and fires when lined up.

use super::state::{GameState, Intent};

/// Next intent for the current state, or None if there is nothing to do
pub fn decide(state: &GameState) -> Option<Intent> {
    if !state.is_running() {
        return None;
    }

    // Only the newest object of a column can be hit, so rank columns by it
    let target = (0..state.num_columns())
        .filter_map(|col| {
            state
                .newest_in_column(col)
                .map(|idx| (col, state.objects[idx].position))
        })
        .max_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(std::cmp::Ordering::Equal))
        .map(|(col, _)| col)?;

    Some(match target.cmp(&state.player_column) {
        std::cmp::Ordering::Less => Intent::MoveLeft,
        std::cmp::Ordering::Greater => Intent::MoveRight,
        std::cmp::Ordering::Equal => Intent::Destroy,
    })
}
