//! Structured review text template
//!
//! Reviews are stored as one string with inline section markers:
//! `%OverallThoughts%...%FavoriteCharacter%...%FavoritePart%...`. The
//! overall-thoughts section is always present; the other two are optional.
//! Marker text typed by the user is stripped before building, so a stored
//! review always parses back into the same sections.

/// Section marker preceding the required overall-thoughts text
pub const OVERALL_MARKER: &str = "%OverallThoughts%";

/// Section marker preceding the optional favorite-character text
pub const CHARACTER_MARKER: &str = "%FavoriteCharacter%";

/// Section marker preceding the optional favorite-part text
pub const PART_MARKER: &str = "%FavoritePart%";

/// A review split back into its sections
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ReviewSections {
    pub overall: String,
    pub favorite_character: Option<String>,
    pub favorite_part: Option<String>,
}

/// Build the stored review string from user input
///
/// Empty optional sections are omitted entirely.
pub fn build_review_text(overall: &str, character: &str, part: &str) -> String {
    let overall = strip_markers(overall);
    let character = strip_markers(character);
    let part = strip_markers(part);

    let mut result = format!("{}{}", OVERALL_MARKER, overall);
    if !character.is_empty() {
        result.push_str(CHARACTER_MARKER);
        result.push_str(&character);
    }
    if !part.is_empty() {
        result.push_str(PART_MARKER);
        result.push_str(&part);
    }
    result
}

/// Split a stored review string into sections
///
/// Text without any markers (reviews predating the template) becomes the
/// overall section.
pub fn parse_review_text(text: &str) -> ReviewSections {
    let markers = [OVERALL_MARKER, CHARACTER_MARKER, PART_MARKER];

    // Every marker occurrence, in document order.
    let mut found: Vec<(usize, usize, usize)> = Vec::new(); // (pos, marker_idx, len)
    for (idx, marker) in markers.iter().enumerate() {
        let mut from = 0;
        while let Some(pos) = find_ignore_ascii_case(text, marker, from) {
            found.push((pos, idx, marker.len()));
            from = pos + marker.len();
        }
    }
    found.sort_unstable();

    if found.is_empty() {
        return ReviewSections {
            overall: text.trim().to_string(),
            ..Default::default()
        };
    }

    let mut sections = ReviewSections::default();
    for (i, &(pos, marker_idx, len)) in found.iter().enumerate() {
        let start = pos + len;
        let end = found.get(i + 1).map(|&(next, _, _)| next).unwrap_or(text.len());
        let segment = text[start..end].trim().to_string();
        match marker_idx {
            0 => sections.overall = segment,
            1 => sections.favorite_character = Some(segment).filter(|s| !s.is_empty()),
            _ => sections.favorite_part = Some(segment).filter(|s| !s.is_empty()),
        }
    }
    sections
}

/// Remove any section markers the user typed and trim the result
pub fn strip_markers(input: &str) -> String {
    let mut result = input.to_string();
    for marker in [OVERALL_MARKER, CHARACTER_MARKER, PART_MARKER] {
        while let Some(pos) = find_ignore_ascii_case(&result, marker, 0) {
            result.replace_range(pos..pos + marker.len(), "");
        }
    }
    result.trim().to_string()
}

/// Byte-offset search, ASCII case-insensitive
///
/// The needle is pure ASCII, so a byte-level match always lands on a char
/// boundary of the haystack.
fn find_ignore_ascii_case(haystack: &str, needle: &str, from: usize) -> Option<usize> {
    let haystack = haystack.as_bytes();
    let needle = needle.as_bytes();
    if from + needle.len() > haystack.len() {
        return None;
    }
    haystack[from..]
        .windows(needle.len())
        .position(|window| window.eq_ignore_ascii_case(needle))
        .map(|pos| from + pos)
}
