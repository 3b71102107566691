// src/config.rs
//! Конфигурация генерации карты
//!
//! Этот модуль определяет все параметры одного запуска генератора:
//! - Размеры сетки и гексов
//! - Стиль карты (алгоритм назначения биомов)
//! - Параметры размещения владений (holdings)
//! - Настройки вывода (DPI, имя файла, каталоги)
//!
//! Все структуры поддерживают сериализацию в TOML/JSON для удобной настройки через конфигурационные файлы.

use crate::error::{MapError, MapResult};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

/// Стиль карты
///
/// Определяет алгоритм, по которому каждому гексу назначается цвет биома.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default, ValueEnum)]
pub enum MapStyle {
    /// Случайные биомы со слипанием с уже окрашенными соседями
    #[default]
    Random,
    /// Суша с редкими (10%) вкраплениями воды
    Continental,
    /// Вода вдоль одной или двух сторон карты
    Shore,
    /// Вода по всему периметру, остров в центре
    Island,
    /// Вода занимает около половины клеток
    Archipelago,
    /// Горные гряды сверху и снизу, лес и равнины между ними
    Valleys,
}

/// Основные параметры генерации карты
///
/// Полная конфигурация одного запуска. Поддерживает загрузку из TOML-файлов.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MapParams {
    /// Количество строк сетки (по умолчанию 12)
    #[serde(default = "default_rows")]
    pub rows: usize,

    /// Количество столбцов сетки (по умолчанию 12)
    #[serde(default = "default_cols")]
    pub cols: usize,

    /// Радиус гекса в пикселях (по умолчанию 50)
    #[serde(default = "default_hex_size")]
    pub hex_size: u32,

    /// Подписи строк (буквы) и столбцов (номера)
    #[serde(default = "default_true")]
    pub show_labels: bool,

    /// Случайность для стиля `Random`:
    /// - `0.0`: максимальное слипание с соседями,
    /// - `1.0`: каждый гекс выбирается независимо.
    #[serde(default = "default_randomness")]
    pub randomness: f64,

    /// DPI итогового PNG (масштаб растеризации = `dpi / 96`)
    #[serde(default = "default_dpi")]
    pub dpi: u32,

    /// Стиль карты (по умолчанию `Random`)
    #[serde(default)]
    pub map_style: MapStyle,

    /// Желаемое число владений; `None` → `min(rows, cols) / 3`
    #[serde(default)]
    pub holdings: Option<usize>,

    /// Заменить первое владение на резиденцию (seat)
    #[serde(default = "default_true")]
    pub place_seat: bool,

    /// Имя выходных файлов без расширения
    #[serde(default = "default_output_name")]
    pub output_name: String,

    /// Каталог для результатов
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,

    /// Каталог с `holding.svg` и `seat.svg`
    #[serde(default = "default_icons_dir")]
    pub icons_dir: PathBuf,

    /// Сид генератора случайных чисел; без него каждый запуск уникален
    #[serde(default)]
    pub seed: Option<u64>,

    /// Дополнительно сохранить сетку и владения в JSON
    #[serde(default)]
    pub export_json: bool,
}

impl MapParams {
    /// Загружает параметры из TOML-файла
    ///
    /// # Пример
    /// ```toml
    /// # map.toml
    /// rows = 20
    /// cols = 16
    /// map_style = "Island"
    /// seed = 42
    /// ```
    pub fn from_toml_file(path: &str) -> MapResult<Self> {
        let contents = fs::read_to_string(path)?;
        let params: Self = toml::from_str(&contents)?;
        Ok(params)
    }

    /// Проверяет параметры до начала любой работы с сеткой
    pub fn validate(&self) -> MapResult<()> {
        if self.rows == 0 || self.cols == 0 {
            return Err(MapError::InvalidConfig(format!(
                "grid must have at least one row and column, got {}x{}",
                self.rows, self.cols
            )));
        }
        if self.hex_size == 0 {
            return Err(MapError::InvalidConfig("hex_size must be positive".into()));
        }
        if self.dpi == 0 {
            return Err(MapError::InvalidConfig("dpi must be positive".into()));
        }
        if !(0.0..=1.0).contains(&self.randomness) {
            return Err(MapError::InvalidConfig(format!(
                "randomness must be within [0, 1], got {}",
                self.randomness
            )));
        }
        if self.output_name.trim().is_empty() {
            return Err(MapError::InvalidConfig("output_name is empty".into()));
        }
        Ok(())
    }
}

/// Число владений по умолчанию: треть меньшей стороны сетки
#[must_use]
pub fn default_holding_count(rows: usize, cols: usize) -> usize {
    rows.min(cols) / 3
}

fn default_rows() -> usize {
    12
}
fn default_cols() -> usize {
    12
}
fn default_hex_size() -> u32 {
    50
}
fn default_true() -> bool {
    true
}
fn default_randomness() -> f64 {
    0.2
}
fn default_dpi() -> u32 {
    300
}
fn default_output_name() -> String {
    "hex_map_example".into()
}
fn default_output_dir() -> PathBuf {
    PathBuf::from("output")
}
fn default_icons_dir() -> PathBuf {
    PathBuf::from("assets/icons")
}

impl Default for MapParams {
    fn default() -> Self {
        Self {
            rows: default_rows(),
            cols: default_cols(),
            hex_size: default_hex_size(),
            show_labels: default_true(),
            randomness: default_randomness(),
            dpi: default_dpi(),
            map_style: MapStyle::default(),
            holdings: None,
            place_seat: default_true(),
            output_name: default_output_name(),
            output_dir: default_output_dir(),
            icons_dir: default_icons_dir(),
            seed: None,
            export_json: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_empty_toml() {
        let params: MapParams = toml::from_str("").unwrap();
        assert_eq!(params, MapParams::default());
        assert_eq!(default_holding_count(params.rows, params.cols), 4);
    }

    #[test]
    fn test_defaults_match_empty_json() {
        let params: MapParams = serde_json::from_str("{}").unwrap();
        assert_eq!(params, MapParams::default());
        assert_eq!((params.rows, params.hex_size, params.dpi), (12, 50, 300));
        assert!((params.randomness - 0.2).abs() < f64::EPSILON);
    }

    #[test]
    fn test_toml_overrides() {
        let params: MapParams = toml::from_str(
            r#"
            rows = 20
            cols = 9
            map_style = "Island"
            holdings = 2
            seed = 7
            "#,
        )
        .unwrap();
        assert_eq!(params.rows, 20);
        assert_eq!(params.map_style, MapStyle::Island);
        assert_eq!(params.holdings, Some(2));
        assert_eq!(params.seed, Some(7));
        assert!(params.show_labels);
    }

    #[test]
    fn test_unknown_style_is_rejected() {
        let result: Result<MapParams, _> = toml::from_str(r#"map_style = "Volcanic""#);
        assert!(result.is_err());
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let bad = [
            MapParams {
                rows: 0,
                ..Default::default()
            },
            MapParams {
                randomness: 1.5,
                ..Default::default()
            },
            MapParams {
                dpi: 0,
                ..Default::default()
            },
            MapParams {
                hex_size: 0,
                ..Default::default()
            },
            MapParams {
                output_name: "  ".into(),
                ..Default::default()
            },
        ];
        for params in bad {
            assert!(matches!(
                params.validate(),
                Err(MapError::InvalidConfig(_))
            ));
        }
        assert!(MapParams::default().validate().is_ok());
    }
}
