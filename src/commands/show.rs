use std::fs;

use anyhow::{Context, Result};
use chrono::{Datelike, Days, Local, Weekday};
use tracing::debug;

use crate::cli::ShowArgs;

/// Reads back the rendered daily file for one date. Weekends have no menu
/// and a missing file is a user hint, not an error; both print a notice and
/// exit cleanly.
pub fn run(args: ShowArgs) -> Result<()> {
    let mut date = args.date.unwrap_or_else(|| Local::now().date_naive());
    if args.tomorrow {
        date = date
            .checked_add_days(Days::new(1))
            .context("date out of range")?;
    }

    if matches!(date.weekday(), Weekday::Sat | Weekday::Sun) {
        println!("Za vikend nema jelovnika u vrtiću.");
        return Ok(());
    }

    let path = args.data_dir.join("daily").join(format!("{date}.md"));
    debug!(path = %path.display(), "looking up daily file");

    if !path.exists() {
        println!(
            "Jelovnik za {} nije pronađen. Pokrenite fetch/parse/render za novi mesec.",
            date.format("%d.%m.%Y.")
        );
        return Ok(());
    }

    let content =
        fs::read_to_string(&path).with_context(|| format!("failed to read {}", path.display()))?;
    print!("{content}");

    Ok(())
}
