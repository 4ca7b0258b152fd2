//! Folding explanations of unfolded statements

use duck_domain::{BoolValue, Explanation, StmtExplanation};
use std::collections::HashSet;

/// Merge explanations of derived statements back into their source statement
///
/// A key `<id>-<n>` folds into `<id>` when `<id>` is one of `source_ids`;
/// every other key is kept as is. Merged values are ORed, merged `assumed`
/// flags are ANDed. Compatible purposes are mapped to source ids, with self
/// references and duplicates dropped.
pub fn fold_explanation<'a, I>(explanation: &Explanation, source_ids: I) -> Explanation
where
    I: IntoIterator<Item = &'a str>,
{
    let sources: HashSet<&str> = source_ids.into_iter().collect();
    let mut folded = Explanation::new();

    for (id, stmt) in explanation {
        let base = base_id(id, &sources);
        let merged = match folded.remove(base) {
            None => stmt.clone(),
            Some(prev) => merge(prev, stmt),
        };
        folded.insert(base.to_string(), merged);
    }

    for (id, stmt) in folded.iter_mut() {
        let mut seen = HashSet::new();
        stmt.compatible_purpose = stmt
            .compatible_purpose
            .iter()
            .map(|other| base_id(other, &sources))
            .filter(|other| *other != id.as_str() && seen.insert(*other))
            .map(str::to_string)
            .collect();
    }

    folded
}

fn base_id<'s>(id: &'s str, sources: &HashSet<&str>) -> &'s str {
    if sources.contains(id) {
        return id;
    }
    match id.rsplit_once('-') {
        Some((base, n))
            if !n.is_empty() && n.bytes().all(|b| b.is_ascii_digit()) && sources.contains(base) =>
        {
            base
        }
        _ => id,
    }
}

fn or_and(a: BoolValue, b: BoolValue) -> BoolValue {
    BoolValue {
        value: a.value || b.value,
        assumed: a.assumed && b.assumed,
    }
}

fn merge(prev: StmtExplanation, next: &StmtExplanation) -> StmtExplanation {
    let mut compatible_purpose = prev.compatible_purpose;
    compatible_purpose.extend(next.compatible_purpose.iter().cloned());
    StmtExplanation {
        consent_required: or_and(prev.consent_required, next.consent_required),
        pii: or_and(prev.pii, next.pii),
        li: or_and(prev.li, next.li),
        id_not_required: or_and(prev.id_not_required, next.id_not_required),
        compatible_purpose,
    }
}
