//! Обход входного дерева: каталоги институтов, внутри — датированные снапшоты.
//!
//! Раскладка: `in_dir/<тег института>/<YYYY-MM-DD>/<файлы .csv>`.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use tracing::warn;

use crate::error::Result;
use crate::registry::{self, SourceTag};

/// Один датированный снапшот одного института.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot {
    pub tag: SourceTag,
    pub date: NaiveDate,
    /// Файлы снапшота в алфавитном порядке; институт может дробить
    /// выгрузку на несколько файлов.
    pub files: Vec<PathBuf>,
}

/// Каталог, который не удалось отнести ни к одному снапшоту.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Skipped {
    pub path: PathBuf,
    pub reason: String,
}

/// Находит все снапшоты под `in_dir`. Обрабатываются все датированные
/// каталоги, не только последний: инструмент конвертирует и исторические
/// партии. Нераспознанные каталоги попадают в список пропусков, не в ошибку.
pub fn resolve(in_dir: &Path) -> Result<(Vec<Snapshot>, Vec<Skipped>)> {
    let mut snapshots = Vec::new();
    let mut skipped = Vec::new();

    // Сортировка по имени делает порядок обхода воспроизводимым.
    for dir in sorted_subdirs(in_dir)? {
        let name = dir_name(&dir);
        let tag = match registry::lookup(&name) {
            Ok(tag) => tag,
            Err(err) => {
                warn!(dir = %dir.display(), "unknown institution directory");
                skipped.push(Skipped {
                    path: dir,
                    reason: err.to_string(),
                });
                continue;
            }
        };

        let mut dated = Vec::new();
        for snap_dir in sorted_subdirs(&dir)? {
            let snap_name = dir_name(&snap_dir);
            match NaiveDate::parse_from_str(&snap_name, "%Y-%m-%d") {
                Ok(date) => dated.push((date, snap_dir)),
                Err(_) => {
                    warn!(dir = %snap_dir.display(), "directory name is not a date, skipping");
                    skipped.push(Skipped {
                        path: snap_dir,
                        reason: format!("directory name {snap_name:?} is not a YYYY-MM-DD date"),
                    });
                }
            }
        }
        dated.sort();

        for (date, snap_dir) in dated {
            snapshots.push(Snapshot {
                tag,
                date,
                files: csv_files(&snap_dir)?,
            });
        }
    }

    Ok((snapshots, skipped))
}

fn sorted_subdirs(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut dirs = Vec::new();
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        if entry.file_type()?.is_dir() {
            dirs.push(entry.path());
        }
    }
    dirs.sort();
    Ok(dirs)
}

fn csv_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        let path = entry.path();
        if entry.file_type()?.is_file()
            && path.extension().is_some_and(|ext| ext == "csv")
        {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

fn dir_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default()
}
