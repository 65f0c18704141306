use std::fs;

use anyhow::{Context, Result, bail};
use chrono::{Datelike, NaiveDate};
use tracing::{error, info};

use crate::cli::RenderArgs;
use crate::model::{DayRecord, MealKind, MenuSet, month_name_sr};
use crate::util::{ensure_directory, parse_year_month};

pub fn run(args: RenderArgs) -> Result<()> {
    let menu_path = args
        .menu_path
        .unwrap_or_else(|| args.data_dir.join("menu.json"));

    let raw = fs::read(&menu_path)
        .with_context(|| format!("failed to read {}", menu_path.display()))?;
    let menu: MenuSet = serde_json::from_slice(&raw)
        .with_context(|| format!("failed to parse {}", menu_path.display()))?;

    if menu.is_empty() {
        bail!("no day records in {}", menu_path.display());
    }

    let daily_dir = args.data_dir.join("daily");
    ensure_directory(&daily_dir)?;

    let mut written = 0usize;
    for record in menu.values() {
        let path = daily_dir.join(format!("{}.md", record.date));
        match fs::write(&path, render_day_markdown(record)) {
            Ok(()) => written += 1,
            Err(err) => {
                error!(date = %record.date, error = %err, "failed to write daily file");
            }
        }
    }
    info!(count = written, dir = %daily_dir.display(), "wrote daily files");

    let (year, month) = match &args.month {
        Some(raw) => parse_year_month(raw)?,
        None => {
            let first = menu.keys().next().expect("menu checked non-empty");
            (first.year(), first.month())
        }
    };

    let summary_path = args.data_dir.join(format!("{year:04}-{month:02}.md"));
    fs::write(&summary_path, render_month_summary(&menu, year, month))
        .with_context(|| format!("failed to write {}", summary_path.display()))?;
    info!(path = %summary_path.display(), "wrote month summary");

    Ok(())
}

/// One Markdown document per day: heading with the capitalized day name and
/// Serbian-formatted date, one section per populated meal.
fn render_day_markdown(record: &DayRecord) -> String {
    let mut content = format!(
        "# Jelovnik - {}, {}\n\n",
        capitalize_first(&record.day_name),
        format_date_sr(record.date)
    );

    for kind in MealKind::ALL {
        let items = record.meals.get(kind);
        if items.is_empty() {
            continue;
        }
        content.push_str(&format!("## {}\n", kind.title_sr()));
        for item in items {
            content.push_str(&format!("- {item}\n"));
        }
        content.push('\n');
    }

    content
}

/// Month-level summary: every record of the given month in date order,
/// one bold label line per populated meal.
fn render_month_summary(menu: &MenuSet, year: i32, month: u32) -> String {
    let mut content = format!(
        "# Jelovnik - {} {}\n\n",
        capitalize_first(month_name_sr(month)),
        year
    );

    for record in menu.values() {
        if record.date.year() != year || record.date.month() != month {
            continue;
        }

        content.push_str(&format!(
            "## {} {}\n\n",
            record.day_name.to_uppercase(),
            format_date_sr(record.date)
        ));

        for kind in MealKind::ALL {
            let items = record.meals.get(kind);
            if items.is_empty() {
                continue;
            }
            content.push_str(&format!("**{}**: {}\n\n", kind.label_sr(), items.join(", ")));
        }

        content.push_str("---\n\n");
    }

    content
}

fn format_date_sr(date: NaiveDate) -> String {
    format!(
        "{}. {} {}.",
        date.day(),
        month_name_sr(date.month()),
        date.year()
    )
}

fn capitalize_first(value: &str) -> String {
    let mut chars = value.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}
