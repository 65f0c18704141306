use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Lower-case Serbian month names, indexed by `month - 1`.
pub const MONTH_NAMES_SR: [&str; 12] = [
    "januar",
    "februar",
    "mart",
    "april",
    "maj",
    "jun",
    "jul",
    "avgust",
    "septembar",
    "oktobar",
    "novembar",
    "decembar",
];

pub fn month_name_sr(month: u32) -> &'static str {
    MONTH_NAMES_SR[(month as usize - 1) % 12]
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MealKind {
    Breakfast,
    MorningSnack,
    Lunch,
    AfternoonSnack,
}

impl MealKind {
    /// Canonical section order inside a day block.
    pub const ALL: [MealKind; 4] = [
        MealKind::Breakfast,
        MealKind::MorningSnack,
        MealKind::Lunch,
        MealKind::AfternoonSnack,
    ];

    /// Section title for rendered daily files.
    pub fn title_sr(self) -> &'static str {
        match self {
            MealKind::Breakfast => "Doručak",
            MealKind::MorningSnack => "Užina I",
            MealKind::Lunch => "Ručak",
            MealKind::AfternoonSnack => "Užina II",
        }
    }

    /// Section label as printed in the source tables.
    pub fn label_sr(self) -> &'static str {
        match self {
            MealKind::Breakfast => "DORUČAK",
            MealKind::MorningSnack => "UŽINA I",
            MealKind::Lunch => "RUČAK",
            MealKind::AfternoonSnack => "UŽINA II",
        }
    }
}

/// The four fixed meal sections of one day. Each holds zero or one cleaned
/// item today; the shape stays a sequence for future multi-item sections.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Meals {
    pub breakfast: Vec<String>,
    pub morning_snack: Vec<String>,
    pub lunch: Vec<String>,
    pub afternoon_snack: Vec<String>,
}

impl Meals {
    pub fn get(&self, kind: MealKind) -> &[String] {
        match kind {
            MealKind::Breakfast => &self.breakfast,
            MealKind::MorningSnack => &self.morning_snack,
            MealKind::Lunch => &self.lunch,
            MealKind::AfternoonSnack => &self.afternoon_snack,
        }
    }

    pub fn push(&mut self, kind: MealKind, item: String) {
        match kind {
            MealKind::Breakfast => self.breakfast.push(item),
            MealKind::MorningSnack => self.morning_snack.push(item),
            MealKind::Lunch => self.lunch.push(item),
            MealKind::AfternoonSnack => self.afternoon_snack.push(item),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayRecord {
    pub date: NaiveDate,
    pub day_name: String,
    pub meals: Meals,
}

/// Date-keyed record collection for one document; later inserts for the same
/// date overwrite earlier ones.
pub type MenuSet = BTreeMap<NaiveDate, DayRecord>;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FetchManifest {
    pub manifest_version: u32,
    pub fetched_at: String,
    pub source_url: String,
    pub target_month: String,
    pub saved_path: String,
    pub sha256: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ParseCounts {
    pub page_count: usize,
    pub table_count: usize,
    pub row_count: usize,
    pub day_count: usize,
    pub skipped_page_count: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParseRunManifest {
    pub manifest_version: u32,
    pub generated_at: String,
    pub pdf_path: String,
    pub pdf_sha256: String,
    pub menu_path: String,
    pub counts: ParseCounts,
    pub warnings: Vec<String>,
}
