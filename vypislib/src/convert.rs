//! Конвертация: разбор снапшотов и запись канонического CSV.
//!
//! Выходное дерево повторяет раскладку входного: `out_dir/<тег>/<дата>/<файл>`.
//! Повторный запуск по неизменённому входу даёт байт-в-байт тот же выход.

use std::fs;
use std::path::{Component, Path, PathBuf};

use csv::WriterBuilder;
use tracing::{info, warn};

use crate::config::Settings;
use crate::error::{Result, VypisError};
use crate::model::Transaction;
use crate::registry::SourceTag;
use crate::resolver::{self, Skipped};

/// Итог одного прогона. Ни один пропуск и ни один отказ не теряются.
#[derive(Debug, Default)]
pub struct RunSummary {
    pub files_processed: usize,
    pub records_written: usize,
    /// Файлы, которые не удалось сконвертировать.
    pub errors: Vec<Issue>,
    /// Каталоги, не попавшие в обход.
    pub skipped: Vec<Skipped>,
}

#[derive(Debug)]
pub struct Issue {
    pub unit: PathBuf,
    pub error: VypisError,
}

impl RunSummary {
    /// Отказ отдельных снапшотов не валит прогон, если хоть один файл
    /// сконвертирован; провал всех файлов — неуспех.
    pub fn is_success(&self) -> bool {
        self.errors.is_empty() || self.files_processed > 0
    }
}

/// Прогон по всему входному дереву. Ошибка разбора или чтения одного файла
/// изолируется в итоге; ошибка обхода корня или записи выхода фатальна.
pub fn run(settings: &Settings) -> Result<RunSummary> {
    check_disjoint(&settings.in_dir, &settings.out_dir)?;

    let (snapshots, skipped) = resolver::resolve(&settings.in_dir)?;
    let mut summary = RunSummary {
        skipped,
        ..RunSummary::default()
    };

    for snapshot in snapshots {
        for file in &snapshot.files {
            match convert_file(file, snapshot.tag) {
                Ok(records) => {
                    let out_path = output_path(file, &settings.in_dir, &settings.out_dir)?;
                    write_records(&out_path, &records)?;
                    info!(file = %file.display(), records = records.len(), "converted");
                    summary.files_processed += 1;
                    summary.records_written += records.len();
                }
                Err(error) => {
                    warn!(file = %file.display(), %error, "conversion failed");
                    summary.errors.push(Issue {
                        unit: file.clone(),
                        error,
                    });
                }
            }
        }
    }

    Ok(summary)
}

fn convert_file(path: &Path, tag: SourceTag) -> Result<Vec<Transaction>> {
    let bytes = fs::read(path)?;
    tag.spec().parse(&bytes, tag)
}

fn output_path(file: &Path, in_dir: &Path, out_dir: &Path) -> Result<PathBuf> {
    let rel = file.strip_prefix(in_dir).map_err(|_| {
        VypisError::Config(format!(
            "file {} is outside of in_dir {}",
            file.display(),
            in_dir.display()
        ))
    })?;
    Ok(out_dir.join(rel))
}

fn write_records(path: &Path, records: &[Transaction]) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let mut writer = WriterBuilder::new().from_path(path)?;
    for record in records {
        writer.serialize(record)?;
    }
    writer.flush()?;
    Ok(())
}

/// Пути входа и выхода не должны совпадать или быть вложены друг в друга,
/// иначе конвертер начнёт читать собственный выход.
pub fn check_disjoint(in_dir: &Path, out_dir: &Path) -> Result<()> {
    let a = normalize(in_dir)?;
    let b = normalize(out_dir)?;
    if a.starts_with(&b) || b.starts_with(&a) {
        return Err(VypisError::Config(format!(
            "in_dir {} and out_dir {} overlap",
            in_dir.display(),
            out_dir.display()
        )));
    }
    Ok(())
}

// Лексическая нормализация: выходного каталога может ещё не существовать,
// поэтому canonicalize не годится.
fn normalize(path: &Path) -> Result<PathBuf> {
    let abs = std::path::absolute(path)?;
    let mut clean = PathBuf::new();
    for component in abs.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                clean.pop();
            }
            other => clean.push(other),
        }
    }
    Ok(clean)
}
