use std::collections::BTreeMap;

pub const NOTES_DELIMITER: &str = " | ";

/// Notes shown under one template group.
///
/// A group may carry notes under its own id and, for reports saved before
/// groups had ids, under the id of the stored template it came from. Both
/// are kept, in that order, without repeating identical text.
pub fn resolve_group_notes(
    notes: &BTreeMap<String, String>,
    group_id: &str,
    template_id: Option<&str>,
) -> String {
    let mut parts: Vec<&str> = Vec::new();
    for key in [Some(group_id), template_id].into_iter().flatten() {
        let Some(note) = notes.get(key).map(|n| n.trim()).filter(|n| !n.is_empty()) else {
            continue;
        };
        if !parts.contains(&note) {
            parts.push(note);
        }
    }
    parts.join(NOTES_DELIMITER)
}
