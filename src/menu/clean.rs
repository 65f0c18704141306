/// Normalizes one raw text fragment: runs of whitespace (newlines included)
/// collapse to a single space, then any trailing mix of commas, hyphens,
/// en-dashes and whitespace is dropped. Idempotent; empty in, empty out.
pub fn clean_fragment(text: &str) -> String {
    let collapsed = text.split_whitespace().collect::<Vec<&str>>().join(" ");

    collapsed
        .trim_end_matches(|character: char| {
            matches!(character, ',' | '-' | '–') || character.is_whitespace()
        })
        .to_string()
}
