use anyhow::Result;

use crate::loader::{DocumentSource, RawTable};
use crate::model::{DayRecord, MealKind, Meals, MenuSet, ParseCounts};

use super::boundary::BoundaryMatcher;
use super::clean::clean_fragment;
use super::segment::SectionSegmenter;

/// Everything one `parse_document` call produced: the records plus the
/// counters and warnings a run manifest wants. Warnings are collected here
/// instead of logged so the pipeline stays a pure function of its input;
/// the command layer emits them.
#[derive(Debug, Default)]
pub struct DocumentOutcome {
    pub menu: MenuSet,
    pub counts: ParseCounts,
    pub warnings: Vec<String>,
}

pub struct MenuParser {
    boundary: BoundaryMatcher,
    segmenter: SectionSegmenter,
}

impl MenuParser {
    pub fn new() -> Result<Self> {
        Ok(Self {
            boundary: BoundaryMatcher::new()?,
            segmenter: SectionSegmenter::new()?,
        })
    }

    /// One table row's primary cell to zero or one record. Rows without a
    /// recognized weekday + valid date (headers, ingredient-only rows) yield
    /// `None`; a recognized day with missing sections keeps those sections
    /// empty. Never a hard failure, so one bad row cannot abort a batch.
    pub fn parse_row(&self, row_text: &str) -> Option<DayRecord> {
        let (day_name, date) = self.boundary.find(row_text)?;

        let mut meals = Meals::default();
        let sections = self.segmenter.segment(row_text);
        for (kind, section) in MealKind::ALL.into_iter().zip(sections) {
            let Some(raw) = section else {
                continue;
            };
            let content = clean_fragment(raw);
            if !content.is_empty() {
                meals.push(kind, content);
            }
        }

        Some(DayRecord {
            date,
            day_name,
            meals,
        })
    }

    /// Feeds every row's primary cell through [`Self::parse_row`] and merges
    /// records into `menu` by date, later rows overwriting earlier ones.
    /// Additional cells (an ingredients column in the source tables) carry
    /// nothing the records need and are ignored.
    pub fn parse_table(&self, table: &RawTable, menu: &mut MenuSet) -> usize {
        let mut produced = 0;

        for row in &table.rows {
            let Some(primary) = row.first().and_then(|cell| cell.as_deref()) else {
                continue;
            };
            if primary.trim().is_empty() {
                continue;
            }

            if let Some(record) = self.parse_row(primary) {
                menu.insert(record.date, record);
                produced += 1;
            }
        }

        produced
    }

    /// Walks every page of `source`, preferring structured table extraction
    /// and falling back to single whole-page extraction when it yields
    /// nothing. A page whose extraction fails is recorded as a warning and
    /// skipped; the rest of the document still parses.
    pub fn parse_document(&self, source: &dyn DocumentSource) -> DocumentOutcome {
        let mut outcome = DocumentOutcome::default();

        for page in 0..source.page_count() {
            outcome.counts.page_count += 1;

            let tables = match self.tables_for_page(source, page) {
                Ok(tables) => tables,
                Err(error) => {
                    outcome.counts.skipped_page_count += 1;
                    outcome
                        .warnings
                        .push(format!("skipped page {}: {error:#}", page + 1));
                    continue;
                }
            };

            for table in &tables {
                outcome.counts.table_count += 1;
                outcome.counts.row_count += table.rows.len();
                self.parse_table(table, &mut outcome.menu);
            }
        }

        outcome.counts.day_count = outcome.menu.len();
        outcome
    }

    fn tables_for_page(&self, source: &dyn DocumentSource, page: usize) -> Result<Vec<RawTable>> {
        let tables = source.extract_tables(page)?;
        if !tables.is_empty() {
            return Ok(tables);
        }

        Ok(source.extract_table(page)?.into_iter().collect())
    }
}
