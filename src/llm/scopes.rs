use std::collections::HashSet;

/// Drop suggestions the scope prompt tells the model not to make.
///
/// Entries are trimmed; empty ones, nested names containing `/`, the `docs`
/// scope and repeats are removed. Order of first appearance is kept.
pub fn filter_suggestions(suggested: Vec<String>) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut kept = Vec::with_capacity(suggested.len());

    for raw in suggested {
        let scope = raw.trim();
        let rejected = scope.is_empty() || scope.contains('/') || scope.eq_ignore_ascii_case("docs");
        if rejected {
            log::debug!("Dropping suggested scope {raw:?}");
            continue;
        }
        if seen.insert(scope.to_string()) {
            kept.push(scope.to_string());
        }
    }

    kept
}
