//! "Did you mean" suggestions for lookup misses

/// Keys further away than this many edits are never suggested
const MAX_SUGGESTION_DISTANCE: usize = 8;

/// Find the cached keys closest to a key that was not found
///
/// Candidates are ranked by Levenshtein distance; exact matches are skipped.
pub fn suggest_keys<S: AsRef<str>>(missing: &str, keys: &[S], max_results: usize) -> Vec<String> {
    let threshold = MAX_SUGGESTION_DISTANCE.max(missing.len() / 5);

    let mut ranked: Vec<(usize, &str)> = keys
        .iter()
        .map(|k| AsRef::<str>::as_ref(k))
        .filter_map(|candidate| {
            let distance = strsim::levenshtein(missing, candidate);
            (distance > 0 && distance <= threshold).then_some((distance, candidate))
        })
        .collect();

    ranked.sort();
    ranked.truncate(max_results);
    ranked.into_iter().map(|(_, key)| key.to_string()).collect()
}
