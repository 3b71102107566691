// src/error.rs
//! Ошибки генерации карты
//!
//! Таксономия намеренно узкая:
//! - некорректная конфигурация (отклоняется до начала работы с сеткой)
//! - отсутствующая или повреждённая иконка (фатально)
//! - ошибки записи результатов (фатально)

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum MapError {
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Icon not found at path: {path}")]
    IconMissing {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Icon at {path} is not a usable SVG: {reason}")]
    IconCorrupt { path: PathBuf, reason: String },

    #[error("Failed to read config: {0}")]
    ConfigParse(#[from] toml::de::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to encode image: {0}")]
    Image(#[from] image::ImageError),

    #[error("Failed to rasterize map: {0}")]
    Raster(String),

    #[error("Failed to export map: {0}")]
    Json(#[from] serde_json::Error),
}

/// Результат всех операций генератора
pub type MapResult<T> = Result<T, MapError>;
