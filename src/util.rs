use std::fs::{self, File};
use std::io::Read;
use std::path::Path;

use anyhow::{Context, Result, bail};
use chrono::{SecondsFormat, Utc};
use serde::Serialize;
use sha2::{Digest, Sha256};

pub fn now_utc_string() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true)
}

pub fn ensure_directory(path: &Path) -> Result<()> {
    fs::create_dir_all(path)
        .with_context(|| format!("failed to create directory: {}", path.display()))
}

pub fn sha256_file(path: &Path) -> Result<String> {
    let mut file = File::open(path)
        .with_context(|| format!("failed to open file for hashing: {}", path.display()))?;

    let mut hasher = Sha256::new();
    let mut buf = [0_u8; 8192];

    loop {
        let count = file
            .read(&mut buf)
            .with_context(|| format!("failed to read file for hashing: {}", path.display()))?;
        if count == 0 {
            break;
        }
        hasher.update(&buf[..count]);
    }

    Ok(format!("{:x}", hasher.finalize()))
}

pub fn write_json_pretty<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    if let Some(parent) = path.parent() {
        ensure_directory(parent)?;
    }

    let mut data = serde_json::to_vec_pretty(value)
        .with_context(|| format!("failed to serialize json: {}", path.display()))?;
    data.push(b'\n');

    fs::write(path, data).with_context(|| format!("failed to write json: {}", path.display()))
}

pub fn parse_year_month(raw: &str) -> Result<(i32, u32)> {
    let (year, month) = raw
        .split_once('-')
        .with_context(|| format!("expected YYYY-MM, got: {raw}"))?;

    let year = year
        .parse::<i32>()
        .with_context(|| format!("invalid year in: {raw}"))?;
    let month = month
        .parse::<u32>()
        .with_context(|| format!("invalid month in: {raw}"))?;
    if !(1..=12).contains(&month) {
        bail!("month out of range in: {raw}");
    }

    Ok((year, month))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_year_month_accepts_padded_and_unpadded_months() {
        assert_eq!(parse_year_month("2025-03").unwrap(), (2025, 3));
        assert_eq!(parse_year_month("2025-11").unwrap(), (2025, 11));
    }

    #[test]
    fn parse_year_month_rejects_garbage() {
        assert!(parse_year_month("march 2025").is_err());
        assert!(parse_year_month("2025-13").is_err());
        assert!(parse_year_month("2025-0").is_err());
    }
}
