use anyhow::{Context, Result};
use chrono::NaiveDate;
use regex::Regex;

/// Bare weekday token, shared with the segmenter (trailing-section stop) and
/// the loader (day-block slicing). Menus cover workdays only.
pub const DAY_TOKEN_PATTERN: &str = r"(?i)\b(?:PONEDELJAK|UTORAK|SREDA|ČETVRTAK|PETAK)\b";

const BOUNDARY_PATTERN: &str =
    r"(?i)\b(PONEDELJAK|UTORAK|SREDA|ČETVRTAK|PETAK)\s+(\d{1,2})\.(\d{1,2})\.(\d{4})\.?";

/// Locates the weekday-name + `D.M.YYYY` pair that opens a day block.
pub struct BoundaryMatcher {
    pattern: Regex,
}

impl BoundaryMatcher {
    pub fn new() -> Result<Self> {
        let pattern =
            Regex::new(BOUNDARY_PATTERN).context("failed to compile day boundary regex")?;
        Ok(Self { pattern })
    }

    /// First boundary in `text`, as the lower-cased weekday name and the
    /// calendar date. `None` when no weekday token is present or the date
    /// token does not name a real calendar date; the caller rejects the
    /// whole row in that case.
    pub fn find(&self, text: &str) -> Option<(String, NaiveDate)> {
        let captures = self.pattern.captures(text)?;

        let day_name = captures[1].to_lowercase();
        let day = captures[2].parse::<u32>().ok()?;
        let month = captures[3].parse::<u32>().ok()?;
        let year = captures[4].parse::<i32>().ok()?;

        let date = NaiveDate::from_ymd_opt(year, month, day)?;
        Some((day_name, date))
    }
}
