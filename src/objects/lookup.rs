//! Fuzzy object lookup.
//!
//! Players refer to things loosely ("Back Pack", "the leather bag").
//! Matching runs in passes, and the first pass with a hit wins:
//!
//! 1. exact id
//! 2. case-insensitive id or name
//! 3. normalized id or name (spaces, hyphens, underscores stripped)
//! 4. description substring, in either direction
//!
//! Pass order matters: an exact id must beat a description that happens
//! to mention the query.

use super::definition::ObjectDefinition;

/// Lower-case and strip spaces, hyphens and underscores.
#[must_use]
pub fn normalize(text: &str) -> String {
    text.chars()
        .filter(|c| !matches!(c, ' ' | '-' | '_'))
        .flat_map(char::to_lowercase)
        .collect()
}

/// Find the best match for `query` among `candidates`.
pub fn fuzzy_find<'a, I>(candidates: I, query: &str) -> Option<&'a ObjectDefinition>
where
    I: IntoIterator<Item = &'a ObjectDefinition>,
{
    let query = query.trim();
    if query.is_empty() {
        return None;
    }

    let candidates: Vec<&ObjectDefinition> = candidates.into_iter().collect();

    if let Some(hit) = candidates.iter().copied().find(|o| o.id.as_str() == query) {
        return Some(hit);
    }

    let lower = query.to_lowercase();
    if let Some(hit) = candidates.iter().copied().find(|o| {
        o.id.as_str().to_lowercase() == lower || o.display_name().to_lowercase() == lower
    }) {
        return Some(hit);
    }

    let normalized = normalize(query);
    if let Some(hit) = candidates.iter().copied().find(|o| {
        normalize(o.id.as_str()) == normalized || normalize(o.display_name()) == normalized
    }) {
        return Some(hit);
    }

    candidates
        .into_iter()
        .find(|o| {
            let description = o.description.trim().to_lowercase();
            !description.is_empty()
                && (description.contains(&lower) || lower.contains(&description))
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn objects() -> Vec<ObjectDefinition> {
        vec![
            ObjectDefinition::container("small_pouch", "A pouch that once held a backpack strap."),
            ObjectDefinition::container("backpack", "A sturdy leather bag."),
            ObjectDefinition::container("Chest", "An iron-bound chest."),
        ]
    }

    #[test]
    fn test_normalize() {
        assert_eq!(normalize("Back-Pack_ 2"), "backpack2");
    }

    #[test]
    fn test_exact_beats_description() {
        let objs = objects();
        let hit = fuzzy_find(&objs, "backpack").unwrap();
        assert_eq!(hit.id.as_str(), "backpack");
    }

    #[test]
    fn test_case_insensitive() {
        let objs = objects();
        assert_eq!(fuzzy_find(&objs, "chest").unwrap().id.as_str(), "Chest");
    }

    #[test]
    fn test_normalized() {
        let objs = objects();
        assert_eq!(fuzzy_find(&objs, "Back Pack").unwrap().id.as_str(), "backpack");
        assert_eq!(fuzzy_find(&objs, "small pouch").unwrap().id.as_str(), "small_pouch");
    }

    #[test]
    fn test_description_both_directions() {
        let objs = objects();
        assert_eq!(fuzzy_find(&objs, "leather").unwrap().id.as_str(), "backpack");
        assert_eq!(
            fuzzy_find(&objs, "open an iron-bound chest. now").unwrap().id.as_str(),
            "Chest"
        );
    }

    #[test]
    fn test_no_match() {
        let objs = objects();
        assert!(fuzzy_find(&objs, "sword").is_none());
        assert!(fuzzy_find(&objs, "   ").is_none());
    }
}
