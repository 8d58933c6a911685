//! Ordering and filtering of algorithm names.

use std::collections::HashSet;

/// Reorder `available` by the preference order in `known`, dropping anything in `blacklist`.
///
/// Every occurrence of a blacklisted name is removed. Then each name of `known`, in order,
/// takes one occurrence out of what is left and moves it to the front. Whatever remains
/// (names the preference table doesn't know about, plus residual duplicates) follows in
/// the order the platform reported it.
///
/// Names in `known` that are not available are skipped. An empty `blacklist` removes
/// nothing. Matching is exact string equality.
///
/// ```
/// use carteggio_tls::reorder;
///
/// let out = reorder(&["X", "A", "Y", "B"], &["A", "B"], &[] as &[&str]);
/// assert_eq!(out, ["A", "B", "X", "Y"]);
/// ```
pub fn reorder<A, K, B>(available: &[A], known: &[K], blacklist: &[B]) -> Vec<String>
where
    A: AsRef<str>,
    K: AsRef<str>,
    B: AsRef<str>,
{
    let mut unknown: Vec<&str> = available
        .iter()
        .map(AsRef::as_ref)
        .filter(|name| !blacklist.iter().any(|b| b.as_ref() == *name))
        .collect();

    let mut result = Vec::with_capacity(unknown.len());

    for item in known {
        let item = item.as_ref();
        if let Some(pos) = unknown.iter().position(|n| *n == item) {
            unknown.remove(pos);
            result.push(item.to_string());
        }
    }

    // Unknown names go last. A platform update that adds algorithms keeps them enabled.
    result.extend(unknown.into_iter().map(str::to_string));

    result
}

/// Remove repeated names, keeping the first occurrence of each.
pub fn dedup_stable(names: &mut Vec<String>) {
    let mut seen = HashSet::with_capacity(names.len());
    names.retain(|n| seen.insert(n.clone()));
}
