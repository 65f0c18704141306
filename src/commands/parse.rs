use anyhow::Result;
use tracing::{info, warn};

use crate::cli::ParseArgs;
use crate::loader::PdftotextDocument;
use crate::menu::MenuParser;
use crate::model::ParseRunManifest;
use crate::util::{now_utc_string, sha256_file, write_json_pretty};

pub fn run(args: ParseArgs) -> Result<()> {
    let menu_path = args
        .menu_path
        .unwrap_or_else(|| args.data_dir.join("menu.json"));
    let manifest_path = args
        .manifest_path
        .unwrap_or_else(|| args.data_dir.join("manifests").join("parse_run.json"));

    info!(pdf = %args.pdf_path.display(), "parsing menu pdf");

    let document = PdftotextDocument::open(&args.pdf_path, args.max_pages)?;
    let parser = MenuParser::new()?;
    let outcome = parser.parse_document(&document);

    for warning in &outcome.warnings {
        warn!(warning = %warning, "extraction unit skipped");
    }
    if outcome.menu.is_empty() {
        warn!(pdf = %args.pdf_path.display(), "no day records found in document");
    }

    write_json_pretty(&menu_path, &outcome.menu)?;

    let manifest = ParseRunManifest {
        manifest_version: 1,
        generated_at: now_utc_string(),
        pdf_path: args.pdf_path.display().to_string(),
        pdf_sha256: sha256_file(&args.pdf_path)?,
        menu_path: menu_path.display().to_string(),
        counts: outcome.counts.clone(),
        warnings: outcome.warnings.clone(),
    };
    write_json_pretty(&manifest_path, &manifest)?;

    info!(
        days = outcome.counts.day_count,
        pages = outcome.counts.page_count,
        tables = outcome.counts.table_count,
        path = %menu_path.display(),
        "wrote menu records"
    );

    Ok(())
}
