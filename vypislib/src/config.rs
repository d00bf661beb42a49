//! Настройки запуска: TOML-файл с путями входного и выходного деревьев.

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::{Result, VypisError};

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub in_dir: PathBuf,
    pub out_dir: PathBuf,
}

impl Settings {
    /// Отсутствующий файл или поле — ошибка конфигурации, не I/O.
    pub fn load(path: &Path) -> Result<Settings> {
        let raw = std::fs::read_to_string(path)
            .map_err(|e| VypisError::Config(format!("cannot read {}: {e}", path.display())))?;
        toml::from_str(&raw)
            .map_err(|e| VypisError::Config(format!("{}: {e}", path.display())))
    }
}
