use anyhow::{Context, Result};
use regex::Regex;

use super::boundary::DAY_TOKEN_PATTERN;

/// Slices a day block into the four meal sections.
///
/// The block offers no structure beyond the labels themselves, so each
/// section is "find my label, slice up to the next one": content starts just
/// after the label's separator and ends at the earliest *later* label in the
/// canonical order that actually occurs, capped at the next weekday token
/// (multiple days can share one block), else end of text. Positional slicing
/// keeps soft-wrapped dish descriptions intact where a line-oriented scan
/// would split them.
pub struct SectionSegmenter {
    labels: [Regex; 4],
    day_token: Regex,
}

impl SectionSegmenter {
    pub fn new() -> Result<Self> {
        // Word boundary is load-bearing: RUČAK is a strict suffix of DORUČAK
        // and must not match inside it. The separator is part of the label;
        // a bare label word in free text is not a section start.
        let labels = [
            label_regex(r"\bDORUČAK")?,
            label_regex(r"\bUŽINA\s*I")?,
            label_regex(r"\bRUČAK")?,
            label_regex(r"\bUŽINA\s*II")?,
        ];
        let day_token =
            Regex::new(DAY_TOKEN_PATTERN).context("failed to compile day token regex")?;

        Ok(Self { labels, day_token })
    }

    /// Raw (uncleaned) section slices in canonical order; `None` for a
    /// section whose label does not occur.
    pub fn segment<'t>(&self, text: &'t str) -> [Option<&'t str>; 4] {
        let mut sections: [Option<&'t str>; 4] = [None; 4];

        for index in 0..self.labels.len() {
            let Some(found) = self.labels[index].find(text) else {
                continue;
            };
            let content_start = found.end();
            let mut content_end = text.len();

            for later in &self.labels[index + 1..] {
                if let Some(next_found) = later.find_at(text, content_start) {
                    content_end = content_end.min(next_found.start());
                }
            }
            if let Some(next_day) = self.day_token.find_at(text, content_start) {
                content_end = content_end.min(next_day.start());
            }

            sections[index] = Some(&text[content_start..content_end]);
        }

        sections
    }
}

fn label_regex(label: &str) -> Result<Regex> {
    Regex::new(&format!(r"(?i){label}\s*[–-]\s*"))
        .with_context(|| format!("failed to compile section label regex: {label}"))
}
