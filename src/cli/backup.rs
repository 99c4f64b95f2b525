//! CLI command handler for full-storage backups

use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;

use chrono::Utc;
use clap::ValueEnum;

use crate::config::Settings;
use crate::error::{OneDripError, OneDripResult};
use crate::export::json::{backup_filename, export_full_json};
use crate::export::yaml::export_full_yaml;
use crate::storage::Storage;

/// Backup format options
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum BackupFormat {
    /// JSON format (machine-readable)
    Json,
    /// YAML format (human-readable)
    Yaml,
}

/// Handle the backup command
pub fn handle_backup_command(
    storage: &Storage,
    settings: &Settings,
    output_dir: Option<PathBuf>,
    format: BackupFormat,
) -> OneDripResult<()> {
    let dir = output_dir.unwrap_or_else(|| storage.paths().backup_dir());

    let mut filename = backup_filename(Utc::now());
    if matches!(format, BackupFormat::Yaml) {
        filename = filename.replace(".json", ".yaml");
    }
    let path = dir.join(&filename);

    let file = File::create(&path).map_err(|e| {
        OneDripError::Export(format!("Falha ao criar {}: {}", path.display(), e))
    })?;
    let mut writer = BufWriter::new(file);

    match format {
        BackupFormat::Json => export_full_json(storage, &mut writer, true)?,
        BackupFormat::Yaml => export_full_yaml(storage, &mut writer)?,
    }

    println!("Backup gravado em: {}", path.display());

    prune_backups(&dir, settings.backup_retention.keep_count as usize)?;

    Ok(())
}

/// Remove the oldest backups beyond the retention count
///
/// The epoch-millis suffix in the filename makes lexicographic order equal
/// chronological order.
fn prune_backups(dir: &PathBuf, keep_count: usize) -> OneDripResult<()> {
    let mut backups: Vec<PathBuf> = std::fs::read_dir(dir)
        .map_err(|e| OneDripError::Io(e.to_string()))?
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| {
            path.file_name()
                .and_then(|n| n.to_str())
                .map(|n| n.starts_with("onedrip-storage-backup-"))
                .unwrap_or(false)
        })
        .collect();

    if backups.len() <= keep_count {
        return Ok(());
    }

    backups.sort();
    let excess = backups.len() - keep_count;
    for path in backups.into_iter().take(excess) {
        std::fs::remove_file(&path).map_err(|e| {
            OneDripError::Io(format!("Failed to remove {}: {}", path.display(), e))
        })?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_prune_keeps_newest() {
        let temp_dir = TempDir::new().unwrap();
        let dir = temp_dir.path().to_path_buf();

        for ms in [1000, 2000, 3000, 4000] {
            std::fs::write(
                dir.join(format!("onedrip-storage-backup-{}.json", ms)),
                "{}",
            )
            .unwrap();
        }
        // Unrelated file must survive
        std::fs::write(dir.join("notes.txt"), "keep me").unwrap();

        prune_backups(&dir, 2).unwrap();

        assert!(!dir.join("onedrip-storage-backup-1000.json").exists());
        assert!(!dir.join("onedrip-storage-backup-2000.json").exists());
        assert!(dir.join("onedrip-storage-backup-3000.json").exists());
        assert!(dir.join("onedrip-storage-backup-4000.json").exists());
        assert!(dir.join("notes.txt").exists());
    }

    #[test]
    fn test_prune_under_limit_is_noop() {
        let temp_dir = TempDir::new().unwrap();
        let dir = temp_dir.path().to_path_buf();

        std::fs::write(dir.join("onedrip-storage-backup-1000.json"), "{}").unwrap();
        prune_backups(&dir, 5).unwrap();
        assert!(dir.join("onedrip-storage-backup-1000.json").exists());
    }
}
