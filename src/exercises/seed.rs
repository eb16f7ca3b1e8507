use std::path::Path;

use anyhow::Context;
use serde_json::Value;
use tracing::{debug, info, warn};

use super::dto::Exercise;
use super::repo::ExerciseCatalog;

pub const CATALOG_FILES: [&str; 3] = ["beginner.json", "intermediate.json", "expert.json"];

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SeedReport {
    pub inserted: usize,
    pub duplicates: usize,
    pub skipped: usize,
    pub malformed: usize,
}

#[derive(Debug, Default)]
pub struct ParsedCatalog {
    pub entries: Vec<Exercise>,
    /// Entries without instructions.
    pub skipped: usize,
    /// Entries missing a field or carrying the wrong type.
    pub malformed: usize,
}

/// Parses one catalog file. Only a file that is not a JSON array fails;
/// bad entries are counted and left out.
pub fn parse_catalog(raw: &str) -> anyhow::Result<ParsedCatalog> {
    let items: Vec<Value> = serde_json::from_str(raw)?;
    let mut parsed = ParsedCatalog::default();
    for (index, item) in items.into_iter().enumerate() {
        match serde_json::from_value::<Exercise>(item) {
            Ok(e) if e.instructions.is_empty() => parsed.skipped += 1,
            Ok(e) => parsed.entries.push(e),
            Err(err) => {
                warn!(index, error = %err, "malformed catalog entry");
                parsed.malformed += 1;
            }
        }
    }
    Ok(parsed)
}

pub async fn seed_entries(
    catalog: &dyn ExerciseCatalog,
    entries: &[Exercise],
    report: &mut SeedReport,
) -> anyhow::Result<()> {
    for e in entries {
        if catalog.insert(e).await? {
            report.inserted += 1;
        } else {
            debug!(name = %e.name, "duplicate catalog entry");
            report.duplicates += 1;
        }
    }
    Ok(())
}

/// Loads the three fixed catalog files from `dir`.
pub async fn seed_from_dir(catalog: &dyn ExerciseCatalog, dir: &Path) -> anyhow::Result<SeedReport> {
    let mut report = SeedReport::default();
    for file in CATALOG_FILES {
        let path = dir.join(file);
        let raw = tokio::fs::read_to_string(&path)
            .await
            .with_context(|| format!("read {}", path.display()))?;
        let parsed = parse_catalog(&raw).with_context(|| format!("parse {}", path.display()))?;
        report.skipped += parsed.skipped;
        report.malformed += parsed.malformed;
        seed_entries(catalog, &parsed.entries, &mut report).await?;
        info!(
            file,
            entries = parsed.entries.len(),
            skipped = parsed.skipped,
            malformed = parsed.malformed,
            "catalog file loaded"
        );
    }
    Ok(report)
}
