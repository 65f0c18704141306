use std::path::{Path, PathBuf};
use std::process::Command;

use anyhow::{Context, Result, bail};
use regex::Regex;

use crate::menu::DAY_TOKEN_PATTERN;

/// One extracted table: rows of optional text cells, consumed read-only by
/// the parsing pipeline.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawTable {
    pub rows: Vec<Vec<Option<String>>>,
}

impl RawTable {
    pub fn from_rows(rows: Vec<Vec<Option<String>>>) -> Self {
        Self { rows }
    }
}

/// Page-oriented access to the source document's tables. Pages are indexed
/// from zero; both extraction methods may fail per page without poisoning
/// the rest of the document.
pub trait DocumentSource {
    fn page_count(&self) -> usize;

    /// Structured table extraction for one page; may legitimately be empty.
    fn extract_tables(&self, page: usize) -> Result<Vec<RawTable>>;

    /// Best-effort single-table extraction, used as a fallback when
    /// `extract_tables` yields nothing.
    fn extract_table(&self, page: usize) -> Result<Option<RawTable>>;
}

/// Adapter over `pdftotext`: page text is captured once at open, then sliced
/// into day blocks on demand. Each day block becomes a single-cell row, which
/// is all the downstream pipeline reads.
pub struct PdftotextDocument {
    path: PathBuf,
    pages: Vec<String>,
    day_token: Regex,
}

impl PdftotextDocument {
    pub fn open(path: &Path, max_pages: Option<usize>) -> Result<Self> {
        let pages = extract_pages_with_pdftotext(path, max_pages)?;
        let day_token =
            Regex::new(DAY_TOKEN_PATTERN).context("failed to compile day token regex")?;

        Ok(Self {
            path: path.to_path_buf(),
            pages,
            day_token,
        })
    }

    #[cfg(test)]
    fn from_pages(pages: Vec<String>) -> Result<Self> {
        let day_token =
            Regex::new(DAY_TOKEN_PATTERN).context("failed to compile day token regex")?;
        Ok(Self {
            path: PathBuf::from("in-memory"),
            pages,
            day_token,
        })
    }

    fn page_text(&self, page: usize) -> Result<&str> {
        self.pages
            .get(page)
            .map(String::as_str)
            .with_context(|| format!("page {} out of range for {}", page + 1, self.path.display()))
    }
}

impl DocumentSource for PdftotextDocument {
    fn page_count(&self) -> usize {
        self.pages.len()
    }

    fn extract_tables(&self, page: usize) -> Result<Vec<RawTable>> {
        let text = self.page_text(page)?;

        let starts = self
            .day_token
            .find_iter(text)
            .map(|found| found.start())
            .collect::<Vec<usize>>();
        if starts.is_empty() {
            return Ok(Vec::new());
        }

        let mut rows = Vec::with_capacity(starts.len());
        for (index, &start) in starts.iter().enumerate() {
            let end = starts.get(index + 1).copied().unwrap_or(text.len());
            rows.push(vec![Some(text[start..end].to_string())]);
        }

        Ok(vec![RawTable::from_rows(rows)])
    }

    fn extract_table(&self, page: usize) -> Result<Option<RawTable>> {
        let text = self.page_text(page)?;
        if text.trim().is_empty() {
            return Ok(None);
        }

        Ok(Some(RawTable::from_rows(vec![vec![Some(
            text.to_string(),
        )]])))
    }
}

fn extract_pages_with_pdftotext(pdf_path: &Path, max_pages: Option<usize>) -> Result<Vec<String>> {
    let mut command = Command::new("pdftotext");
    command.arg("-enc").arg("UTF-8").arg("-f").arg("1");
    if let Some(max_pages) = max_pages {
        command.arg("-l").arg(max_pages.to_string());
    }
    command.arg(pdf_path).arg("-");

    let output = command
        .output()
        .with_context(|| format!("failed to execute pdftotext for {}", pdf_path.display()))?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        bail!(
            "pdftotext returned non-zero exit status for {}: {}",
            pdf_path.display(),
            stderr.trim()
        );
    }

    let raw = String::from_utf8_lossy(&output.stdout);
    let mut pages: Vec<String> = raw
        .split('\u{000C}')
        .map(|chunk| chunk.replace('\u{0000}', ""))
        .collect();

    while let Some(last_page) = pages.last() {
        if last_page.trim().is_empty() {
            pages.pop();
            continue;
        }
        break;
    }

    Ok(pages)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extract_tables_slices_page_text_into_day_rows() {
        let page = "Jelovnik za mart\nPONEDELJAK 3.3.2025\nDORUČAK – hleb\nUTORAK 4.3.2025\nRUČAK – pasulj\n";
        let document = PdftotextDocument::from_pages(vec![page.to_string()]).unwrap();

        let tables = document.extract_tables(0).unwrap();
        assert_eq!(tables.len(), 1);
        assert_eq!(tables[0].rows.len(), 2);

        let first = tables[0].rows[0][0].as_deref().unwrap();
        let second = tables[0].rows[1][0].as_deref().unwrap();
        assert!(first.starts_with("PONEDELJAK 3.3.2025"));
        assert!(first.contains("DORUČAK"));
        assert!(!first.contains("UTORAK"));
        assert!(second.starts_with("UTORAK 4.3.2025"));
    }

    #[test]
    fn extract_tables_is_empty_without_day_tokens() {
        let document =
            PdftotextDocument::from_pages(vec!["spisak namirnica za nedelju".to_string()]).unwrap();

        assert!(document.extract_tables(0).unwrap().is_empty());
    }

    #[test]
    fn extract_table_returns_whole_page_or_nothing() {
        let document = PdftotextDocument::from_pages(vec![
            "PONEDELJAK 3.3.2025 DORUČAK – hleb".to_string(),
            "   \n".to_string(),
        ])
        .unwrap();

        let table = document.extract_table(0).unwrap().unwrap();
        assert_eq!(table.rows.len(), 1);
        assert_eq!(
            table.rows[0][0].as_deref(),
            Some("PONEDELJAK 3.3.2025 DORUČAK – hleb")
        );

        assert!(document.extract_table(1).unwrap().is_none());
    }

    #[test]
    fn out_of_range_page_is_an_error() {
        let document = PdftotextDocument::from_pages(Vec::new()).unwrap();
        assert!(document.extract_tables(0).is_err());
    }
}
