//! Keyword-overlap relevance scoring shared by the in-memory backends.
//!
//! A deliberately small stand-in for embedding similarity: the
//! fraction of query tokens present in the candidate text, mapped into
//! (0.0, 1.0]. Zero means no token matched.

/// Scores `text` against `query` by token overlap.
pub(crate) fn keyword_overlap(query: &str, text: &str) -> f32 {
    let text = text.to_lowercase();
    let tokens: Vec<&str> = query
        .split(|c: char| !c.is_alphanumeric())
        .filter(|t| t.len() > 1)
        .collect();
    if tokens.is_empty() {
        return 0.0;
    }

    let matched = tokens
        .iter()
        .filter(|t| text.contains(&t.to_lowercase()))
        .count();
    matched as f32 / tokens.len() as f32
}
