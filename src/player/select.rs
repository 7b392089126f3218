//! Next/previous track selection.
//!
//! "Next" replays a recorded forward step when one exists, so a
//! previous/next round trip lands on the track the user already heard.
//! Only at the frontier of the history is a fresh index computed.

use rand::Rng;

use super::history::History;

/// Pick the next track index, or `None` once every track has been visited.
///
/// Callers must treat `None` as terminal rather than wrapping around.
pub fn select_next<R: Rng>(
    history: &History,
    playlist_len: usize,
    current: usize,
    random_mode: bool,
    rng: &mut R,
) -> Option<usize> {
    if playlist_len == 0 || history.len() >= playlist_len {
        return None;
    }

    // Behind the frontier: replay the recorded forward step.
    if let Some(next) = history.entry_after(current) {
        return Some(next);
    }

    if !random_mode || playlist_len < 2 {
        return Some((current + 1) % playlist_len);
    }

    // Re-roll until the pick is not the current track and, while unvisited
    // non-current tracks remain, not one already played.
    let prefer_unvisited = (0..playlist_len).any(|i| i != current && !history.contains(i));
    loop {
        let pick = rng.random_range(0..playlist_len);
        if pick == current {
            continue;
        }
        if prefer_unvisited && history.contains(pick) {
            continue;
        }
        return Some(pick);
    }
}

/// Pick the previous track index by walking the history back one step.
///
/// `None` when the history is too shallow; callers treat that as a no-op
/// (the UI disables the control).
pub fn select_previous(history: &History, current: usize) -> Option<usize> {
    if history.len() < 2 {
        return None;
    }
    history.entry_before(current)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn history_of(indices: &[usize]) -> History {
        let mut h = History::new();
        for &i in indices {
            h.record(i);
        }
        h
    }

    #[test]
    fn sequential_next_wraps_modulo_playlist() {
        let mut rng = StdRng::seed_from_u64(1);
        let h = history_of(&[2]);
        assert_eq!(select_next(&h, 4, 2, false, &mut rng), Some(3));
        let h = history_of(&[3]);
        assert_eq!(select_next(&h, 4, 3, false, &mut rng), Some(0));
    }

    #[test]
    fn behind_frontier_replays_recorded_step_in_both_modes() {
        let mut rng = StdRng::seed_from_u64(1);
        // Visited 0 -> 2 -> 1; user went back to 0.
        let h = history_of(&[0, 2, 1]);
        assert_eq!(select_next(&h, 5, 0, false, &mut rng), Some(2));
        assert_eq!(select_next(&h, 5, 0, true, &mut rng), Some(2));
        assert_eq!(select_next(&h, 5, 2, true, &mut rng), Some(1));
    }

    #[test]
    fn exhausted_playlist_yields_none_even_behind_frontier() {
        let mut rng = StdRng::seed_from_u64(1);
        let h = history_of(&[0, 1, 2]);
        assert_eq!(select_next(&h, 3, 2, false, &mut rng), None);
        assert_eq!(select_next(&h, 3, 0, false, &mut rng), None);
        assert_eq!(select_next(&h, 3, 1, true, &mut rng), None);
    }

    #[test]
    fn random_next_never_picks_the_current_track() {
        // Two tracks leave exactly one legal pick; any bias or repeat would
        // show up immediately.
        for seed in 0..50 {
            let mut rng = StdRng::seed_from_u64(seed);
            let h = history_of(&[0]);
            assert_eq!(select_next(&h, 2, 0, true, &mut rng), Some(1));
        }
    }

    #[test]
    fn random_next_prefers_unvisited_tracks() {
        for seed in 0..50 {
            let mut rng = StdRng::seed_from_u64(seed);
            let h = history_of(&[0, 1, 2, 3]);
            // Only 4 is unvisited, so it must be chosen.
            assert_eq!(select_next(&h, 5, 3, true, &mut rng), Some(4));
        }
    }

    #[test]
    fn previous_requires_two_recorded_entries() {
        let h = history_of(&[0]);
        assert_eq!(select_previous(&h, 0), None);

        let h = history_of(&[0, 2]);
        assert_eq!(select_previous(&h, 2), Some(0));
        assert_eq!(select_previous(&h, 0), None);
    }
}
