use std::fs;
use std::time::Duration;

use anyhow::{Context, Result, anyhow};
use chrono::{Datelike, NaiveDate, Utc};
use reqwest::blocking::Client;
use scraper::{Html, Selector};
use tracing::info;
use url::Url;

use crate::cli::FetchArgs;
use crate::model::{FetchManifest, month_name_sr};
use crate::util::{ensure_directory, now_utc_string, parse_year_month, sha256_file, write_json_pretty};

const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36";

pub fn run(args: FetchArgs) -> Result<()> {
    let (year, month) = match &args.month {
        Some(raw) => parse_year_month(raw)?,
        None => target_month(Utc::now().date_naive()),
    };
    let month_name = month_name_sr(month);

    info!(year, month = month_name, url = %args.base_url, "looking for menu pdf");

    let client = Client::builder()
        .user_agent(USER_AGENT)
        .timeout(Duration::from_secs(30))
        .build()
        .context("failed to build http client")?;

    let body = client
        .get(&args.base_url)
        .send()
        .with_context(|| format!("failed to fetch {}", args.base_url))?
        .error_for_status()
        .with_context(|| format!("menu page request rejected: {}", args.base_url))?
        .text()
        .context("failed to read menu page body")?;

    let links = collect_pdf_links(&body)?;
    let href = select_menu_link(&links, month_name)
        .with_context(|| format!("no menu pdf link found for {month_name} {year}"))?;
    let pdf_url = resolve_href(&args.base_url, &href)?;

    info!(url = %pdf_url, "downloading menu pdf");

    let bytes = client
        .get(pdf_url.as_str())
        .send()
        .with_context(|| format!("failed to download {pdf_url}"))?
        .error_for_status()
        .with_context(|| format!("pdf download rejected: {pdf_url}"))?
        .bytes()
        .context("failed to read pdf body")?;

    let pdf_dir = args.data_dir.join("pdfs");
    ensure_directory(&pdf_dir)?;
    let save_path = pdf_dir.join(format!("{year:04}-{month:02}.pdf"));
    fs::write(&save_path, &bytes)
        .with_context(|| format!("failed to write {}", save_path.display()))?;

    let manifest = FetchManifest {
        manifest_version: 1,
        fetched_at: now_utc_string(),
        source_url: pdf_url.to_string(),
        target_month: format!("{year:04}-{month:02}"),
        saved_path: save_path.display().to_string(),
        sha256: sha256_file(&save_path)?,
    };
    let manifest_path = args
        .manifest_path
        .unwrap_or_else(|| args.data_dir.join("manifests").join("fetch.json"));
    write_json_pretty(&manifest_path, &manifest)?;

    info!(path = %save_path.display(), bytes = bytes.len(), "menu pdf saved");

    Ok(())
}

/// The month whose menu to look for: the current one, rolling over to the
/// next from the 25th onward since the site publishes ahead.
fn target_month(today: NaiveDate) -> (i32, u32) {
    if today.day() < 25 {
        (today.year(), today.month())
    } else if today.month() == 12 {
        (today.year() + 1, 1)
    } else {
        (today.year(), today.month() + 1)
    }
}

/// All `(href, link text)` anchor pairs on the page.
fn collect_pdf_links(body: &str) -> Result<Vec<(String, String)>> {
    let selector = Selector::parse("a[href]")
        .map_err(|err| anyhow!("failed to parse anchor selector: {err:?}"))?;

    let document = Html::parse_document(body);
    Ok(document
        .select(&selector)
        .filter_map(|anchor| {
            let href = anchor.value().attr("href")?;
            let text = anchor.text().collect::<String>();
            Some((href.to_string(), text))
        })
        .collect())
}

/// First PDF link whose text names the regular menu for the target month.
/// The site also publishes lunch/snack-only variants; those are skipped.
fn select_menu_link(links: &[(String, String)], month_name: &str) -> Option<String> {
    for (href, text) in links {
        if !href.to_lowercase().ends_with(".pdf") {
            continue;
        }

        let text = text.trim().to_lowercase();
        if !text.contains("jelovnik") || !text.contains(month_name) {
            continue;
        }
        if text.contains("lanč") || text.contains("užina") {
            continue;
        }

        return Some(href.clone());
    }

    None
}

fn resolve_href(base_url: &str, href: &str) -> Result<Url> {
    let base = Url::parse(base_url).with_context(|| format!("invalid base url: {base_url}"))?;
    base.join(href)
        .with_context(|| format!("failed to resolve pdf link: {href}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    #[test]
    fn target_month_rolls_forward_near_month_end() {
        assert_eq!(target_month(day(2025, 3, 10)), (2025, 3));
        assert_eq!(target_month(day(2025, 3, 24)), (2025, 3));
        assert_eq!(target_month(day(2025, 3, 25)), (2025, 4));
        assert_eq!(target_month(day(2025, 12, 28)), (2026, 1));
    }

    #[test]
    fn menu_link_selection_filters_variants_and_other_months() {
        let links = vec![
            ("/uploads/raspored.pdf".to_string(), "Raspored mart".to_string()),
            (
                "/uploads/lanc-mart.pdf".to_string(),
                "Lanč paket jelovnik mart".to_string(),
            ),
            (
                "/uploads/jelovnik-februar.pdf".to_string(),
                "Jelovnik februar".to_string(),
            ),
            (
                "/uploads/jelovnik-mart.pdf".to_string(),
                "Jelovnik MART 2025".to_string(),
            ),
        ];

        assert_eq!(
            select_menu_link(&links, "mart").as_deref(),
            Some("/uploads/jelovnik-mart.pdf")
        );
        assert_eq!(select_menu_link(&links, "maj"), None);
    }

    #[test]
    fn relative_hrefs_resolve_against_the_menu_page() {
        let resolved = resolve_href(
            "https://www.nasaradost.edu.rs/jelovnik/",
            "/uploads/jelovnik-mart.pdf",
        )
        .unwrap();
        assert_eq!(
            resolved.as_str(),
            "https://www.nasaradost.edu.rs/uploads/jelovnik-mart.pdf"
        );

        let absolute = resolve_href(
            "https://www.nasaradost.edu.rs/jelovnik/",
            "https://cdn.example.rs/jelovnik.pdf",
        )
        .unwrap();
        assert_eq!(absolute.as_str(), "https://cdn.example.rs/jelovnik.pdf");
    }

    #[test]
    fn pdf_links_are_collected_with_their_text() {
        let body = r#"<html><body>
            <a href="/uploads/jelovnik-mart.pdf">Jelovnik mart</a>
            <a>no href</a>
            <a href="/kontakt">Kontakt</a>
        </body></html>"#;

        let links = collect_pdf_links(body).unwrap();
        assert!(links.contains(&(
            "/uploads/jelovnik-mart.pdf".to_string(),
            "Jelovnik mart".to_string()
        )));
        assert!(links.iter().all(|(href, _)| href != "no href"));
    }
}
