//! Batch outputs.
//!
//! Accepted awards leave three traces: spreadsheet rows ready to paste
//! into the award tracker, a human-readable block in the audit log, and
//! the source document renamed after its identifier. Rejected documents
//! leave an error block in the audit log.

use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use rust_decimal::Decimal;
use tracing::debug;

use crate::config::IntakeConfig;
use crate::error::{EngineError, EngineResult};
use crate::models::{AwardRecord, NomineeRecord, Nominees};

const RULE_WIDTH: usize = 50;

/// One tab-separated row per nominee.
///
/// Columns: ID, date, blank, nominee, category, type, money, hours,
/// nominator, funding organization, blank, justification.
pub fn spreadsheet_rows(record: &AwardRecord) -> Vec<String> {
    record
        .nominees
        .as_slice()
        .iter()
        .map(|nominee| {
            let money = amount(nominee.monetary_amount);
            let hours = amount(nominee.time_off_hours);
            [
                record.id.as_str(),
                record.received.as_str(),
                "",
                nominee.name.as_str(),
                record.category.code(),
                record.award_type.code(),
                money.as_str(),
                hours.as_str(),
                record.nominator.as_str(),
                record.funding_org.as_str(),
                "",
                record.justification.as_str(),
            ]
            .join("\t")
        })
        .collect()
}

/// The aligned block written to the audit log for an accepted document.
///
/// The justification is shown as a word count.
pub fn format_record_block(document_name: &str, record: &AwardRecord) -> String {
    let mut lines: Vec<(&str, String)> = vec![
        ("Award ID", record.id.to_string()),
        ("Date Received", record.received.clone()),
        ("Category", record.category.code().to_string()),
        ("Type", record.award_type.code().to_string()),
        ("Nominator", record.nominator.clone()),
        ("Funding Org", record.funding_org.clone()),
    ];
    if let Some(value_extent) = record.value_extent {
        lines.push(("Value", value_extent.value.label().to_string()));
        lines.push(("Extent", value_extent.extent.label().to_string()));
    }
    lines.push((
        "Justification",
        format!("{} words", record.justification.split_whitespace().count()),
    ));
    match &record.nominees {
        Nominees::Individual(nominee) => lines.push((
            "Nominee",
            format!(
                "{}    ${}    {} hours",
                nominee.name,
                amount(nominee.monetary_amount),
                amount(nominee.time_off_hours)
            ),
        )),
        Nominees::Group(nominees) => lines.push(("Nominees", format_group_nominees(nominees))),
    }

    let key_width = lines.iter().map(|(key, _)| key.len()).max().unwrap_or(0) + 2;
    let body: Vec<String> = lines
        .iter()
        .map(|(key, value)| format!("{:<key_width$} {}", format!("{}:", key), value))
        .collect();

    format!(
        "{}\n\n{}\n{}\n\n",
        document_name,
        body.join("\n"),
        ".".repeat(RULE_WIDTH)
    )
}

fn format_group_nominees(nominees: &[NomineeRecord]) -> String {
    let name_width = nominees.iter().map(|n| n.name.len()).max().unwrap_or(0) + 5;
    let money_width = nominees
        .iter()
        .map(|n| amount(n.monetary_amount).len())
        .max()
        .unwrap_or(0)
        + 5;

    let rows: Vec<String> = nominees
        .iter()
        .map(|n| {
            format!(
                "{:<name_width$}${:<money_width$}{} hours",
                format!("{}:", n.name),
                amount(n.monetary_amount),
                amount(n.time_off_hours)
            )
        })
        .collect();
    format!("\n    {}", rows.join("\n    "))
}

/// The block written to the audit log for a rejected document.
///
/// # Example
///
/// ```
/// use award_intake::batch::format_error_block;
/// use award_intake::error::EngineError;
///
/// let block = format_error_block("scan.json", &EngineError::MissingNominator);
/// assert!(block.starts_with("#####\n#####\n#####\n#####\n#####\n\nscan.json\n"));
/// assert!(block.ends_with(&".".repeat(50)));
/// ```
pub fn format_error_block(document_name: &str, error: &EngineError) -> String {
    format!(
        "{}\n{}\n{}\n{}",
        "#####\n".repeat(5),
        document_name,
        error,
        ".".repeat(RULE_WIDTH)
    )
}

/// The file stem an accepted document is renamed to:
/// `ID - FundingOrg - Nominee|N nominees - Date`.
///
/// Path separators in any part are replaced with `-`.
pub fn new_file_name(record: &AwardRecord) -> String {
    [
        record.id.to_string(),
        record.funding_org.clone(),
        record.nominee_label(),
        record.received.clone(),
    ]
    .join(" - ")
    .replace(['/', '\\'], "-")
}

fn amount(value: Decimal) -> String {
    value.normalize().to_string()
}

/// Where batch outputs go.
pub trait OutputSink {
    /// Appends spreadsheet rows.
    fn append_rows(&mut self, rows: &[String]) -> EngineResult<()>;

    /// Appends a record or error block to the audit log.
    fn append_audit(&mut self, block: &str) -> EngineResult<()>;

    /// Renames a processed document to `new_stem`, keeping its extension,
    /// and moves it into the archive if one is configured. Returns the new path.
    fn relocate(&mut self, source: &Path, new_stem: &str) -> EngineResult<PathBuf>;
}

/// Writes outputs to the files named in the configuration.
#[derive(Debug, Clone)]
pub struct FileOutputs {
    spreadsheet_rows: PathBuf,
    audit_log: PathBuf,
    archive_dir: Option<PathBuf>,
}

impl FileOutputs {
    /// Creates outputs from the configured paths; the archive is used only
    /// when `actions.move_files` is set.
    pub fn from_config(config: &IntakeConfig) -> Self {
        Self {
            spreadsheet_rows: config.paths.spreadsheet_rows.clone(),
            audit_log: config.paths.audit_log.clone(),
            archive_dir: if config.actions.move_files {
                config.paths.archive_dir.clone()
            } else {
                None
            },
        }
    }

    fn append(path: &Path, text: &str) -> EngineResult<()> {
        let output_error = |e: std::io::Error| EngineError::Output {
            target: path.display().to_string(),
            message: e.to_string(),
        };
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .map_err(output_error)?;
        file.write_all(text.as_bytes()).map_err(output_error)
    }
}

impl OutputSink for FileOutputs {
    fn append_rows(&mut self, rows: &[String]) -> EngineResult<()> {
        let text: String = rows.iter().map(|row| format!("{}\n", row)).collect();
        Self::append(&self.spreadsheet_rows, &text)
    }

    fn append_audit(&mut self, block: &str) -> EngineResult<()> {
        let text = if block.ends_with('\n') {
            block.to_string()
        } else {
            format!("{}\n", block)
        };
        Self::append(&self.audit_log, &text)
    }

    fn relocate(&mut self, source: &Path, new_stem: &str) -> EngineResult<PathBuf> {
        let file_name = match source.extension() {
            Some(ext) => format!("{}.{}", new_stem, ext.to_string_lossy()),
            None => new_stem.to_string(),
        };
        let directory = match &self.archive_dir {
            Some(archive) => archive.clone(),
            None => source.parent().map(Path::to_path_buf).unwrap_or_default(),
        };
        let target = directory.join(file_name);

        let output_error = |e: std::io::Error| EngineError::Output {
            target: target.display().to_string(),
            message: e.to_string(),
        };
        if self.archive_dir.is_some() {
            fs::create_dir_all(&directory).map_err(output_error)?;
        }
        fs::rename(source, &target).map_err(output_error)?;

        debug!(from = %source.display(), to = %target.display(), "Document relocated");
        Ok(target)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{AwardCategory, AwardId, AwardType, ExtentTier, ValueExtent, ValueTier};

    fn nominee(name: &str, money: i64, hours: i64) -> NomineeRecord {
        NomineeRecord::new(name, Decimal::new(money, 0), Decimal::new(hours, 1))
    }

    fn record(nominees: Nominees) -> AwardRecord {
        let category = match nominees {
            Nominees::Individual(_) => AwardCategory::Individual,
            Nominees::Group(_) => AwardCategory::Group,
        };
        AwardRecord {
            id: AwardId::new("24", category, 12),
            category,
            award_type: AwardType::OnTheSpot,
            received: "2024-03-01".to_string(),
            nominator: "Smith, Jane".to_string(),
            funding_org: "BBB-000".to_string(),
            justification: "\"Kept the lab running overnight\"".to_string(),
            value_extent: Some(ValueExtent::new(ValueTier::High, ExtentTier::Limited)),
            nominees,
        }
    }

    #[test]
    fn test_one_row_per_nominee() {
        let record = record(Nominees::Group(vec![nominee("Lee, Ann", 200, 0), nominee("Chan, Bo", 0, 45)]));
        let rows = spreadsheet_rows(&record);
        assert_eq!(rows.len(), 2);
        assert_eq!(
            rows[1],
            "24-GRP-012\t2024-03-01\t\tChan, Bo\tGRP\tOTS\t0\t4.5\tSmith, Jane\tBBB-000\t\t\"Kept the lab running overnight\""
        );
    }

    #[test]
    fn test_record_block_shows_word_count() {
        let record = record(Nominees::Individual(nominee("Lee, Ann", 250, 0)));
        let block = format_record_block("scan.json", &record);
        assert!(block.starts_with("scan.json\n\nAward ID:"));
        assert!(block.contains("Justification:  5 words"));
        assert!(block.contains("Nominee:        Lee, Ann    $250    0 hours"));
        assert!(block.contains("Value:          high"));
        assert!(block.ends_with(&format!("{}\n\n", ".".repeat(50))));
    }

    #[test]
    fn test_group_block_lists_nominees() {
        let record = record(Nominees::Group(vec![nominee("Lee, Ann", 200, 0), nominee("Chan, Bo", 0, 45)]));
        let block = format_record_block("group.json", &record);
        assert!(block.contains("\n    Lee, Ann:    $200     0 hours"));
        assert!(block.contains("\n    Chan, Bo:    $0       4.5 hours"));
    }

    #[test]
    fn test_new_file_name() {
        let individual = record(Nominees::Individual(nominee("Lee, Ann", 250, 0)));
        assert_eq!(new_file_name(&individual), "24-IND-012 - BBB-000 - Lee, Ann - 2024-03-01");

        let mut group = record(Nominees::Group(vec![nominee("Lee, Ann", 200, 0), nominee("Chan, Bo", 0, 45)]));
        group.received = "3/4 or so".to_string();
        assert_eq!(new_file_name(&group), "24-GRP-012 - BBB-000 - 2 nominees - 3-4 or so");
    }

    #[test]
    fn test_error_block_contains_error_text() {
        let block = format_error_block("bad.json", &EngineError::InvalidDocumentShape { page_count: 7 });
        assert!(block.contains("bad.json\nInvalid page count. Expected: [2, 3, 4, 5] | Received: 7\n"));
    }

    #[test]
    fn test_file_outputs_append_and_relocate() {
        let dir = tempfile::tempdir().unwrap();
        let mut outputs = FileOutputs {
            spreadsheet_rows: dir.path().join("rows.txt"),
            audit_log: dir.path().join("log.txt"),
            archive_dir: Some(dir.path().join("done")),
        };

        outputs.append_rows(&["a\tb".to_string()]).unwrap();
        outputs.append_rows(&["c\td".to_string()]).unwrap();
        outputs.append_audit("block").unwrap();
        assert_eq!(fs::read_to_string(dir.path().join("rows.txt")).unwrap(), "a\tb\nc\td\n");
        assert_eq!(fs::read_to_string(dir.path().join("log.txt")).unwrap(), "block\n");

        let source = dir.path().join("scan.json");
        fs::write(&source, "{}").unwrap();
        let moved = outputs.relocate(&source, "24-IND-001 - AAA-000").unwrap();
        assert_eq!(moved, dir.path().join("done").join("24-IND-001 - AAA-000.json"));
        assert!(moved.exists());
        assert!(!source.exists());
    }
}
