// src/render/icons.rs
//! Иконки владений
//!
//! Обе иконки (`holding.svg` и `seat.svg`) нарисованы в системе координат 255×255.
//! Содержимое корневого `<svg>` собирается заново из событий парсера и затем вкладывается
//! в группу с масштабом `size / 255`. Оформление корня (`fill`, `style`, …) переносится
//! на эту группу.

use super::IconKind;
use crate::error::{MapError, MapResult};
use std::fs;
use std::path::Path;
use svg::node::Attributes;
use svg::node::element::tag::Type;
use svg::parser::Event;

/// Размер стороны исходной иконки в её собственных единицах
pub const ICON_UNITS: f64 = 255.0;

pub const HOLDING_ICON_FILE: &str = "holding.svg";
pub const SEAT_ICON_FILE: &str = "seat.svg";

/// Атрибуты корня, которые описывают сам документ, а не оформление
const DOCUMENT_ATTRIBUTES: [&str; 8] = [
    "xmlns",
    "version",
    "width",
    "height",
    "viewBox",
    "x",
    "y",
    "preserveAspectRatio",
];

#[derive(Debug, Clone, Default)]
pub struct Icon {
    /// Разметка внутри корневого `<svg>`
    pub body: String,
    /// Оформление корневого `<svg>` в порядке имён
    pub root_attributes: Vec<(String, String)>,
}

impl Icon {
    pub fn load(path: &Path) -> MapResult<Self> {
        let markup = fs::read_to_string(path).map_err(|source| MapError::IconMissing {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(path, &markup)
    }

    /// Проверяет разметку и собирает содержимое корневого элемента.
    ///
    /// Теги до корня считаются повреждением, всё после закрытия корня игнорируется.
    pub fn parse(path: &Path, markup: &str) -> MapResult<Self> {
        let corrupt = |reason: &str| MapError::IconCorrupt {
            path: path.to_path_buf(),
            reason: reason.to_string(),
        };

        let mut icon: Option<Icon> = None;
        let mut depth = 0usize;
        let mut closed = false;

        for event in svg::read(markup).map_err(|e| corrupt(&e.to_string()))? {
            match event {
                Event::Error(e) => return Err(corrupt(&e.to_string())),
                Event::Tag(name, kind, attributes) => {
                    if closed {
                        continue;
                    }
                    let Some(current) = icon.as_mut() else {
                        if name != "svg" {
                            return Err(corrupt("no <svg> root element"));
                        }
                        closed = matches!(kind, Type::Empty);
                        icon = Some(Icon {
                            body: String::new(),
                            root_attributes: presentation_attributes(&attributes),
                        });
                        continue;
                    };
                    match kind {
                        Type::Start => {
                            depth += 1;
                            push_open_tag(&mut current.body, name, &attributes, false);
                        }
                        Type::Empty => push_open_tag(&mut current.body, name, &attributes, true),
                        Type::End if depth == 0 => closed = true,
                        Type::End => {
                            depth -= 1;
                            current.body.push_str(&format!("</{name}>"));
                        }
                    }
                }
                Event::Text(text) if !closed => {
                    if let Some(current) = icon.as_mut() {
                        current.body.push_str(text);
                    }
                }
                _ => {}
            }
        }

        let mut icon = icon.ok_or_else(|| corrupt("no <svg> root element"))?;
        if !closed {
            return Err(corrupt("missing </svg>"));
        }
        icon.body = icon.body.trim().to_string();
        Ok(icon)
    }
}

fn presentation_attributes(attributes: &Attributes) -> Vec<(String, String)> {
    let mut kept: Vec<(String, String)> = attributes
        .iter()
        .filter(|(name, _)| {
            !DOCUMENT_ATTRIBUTES.contains(&name.as_str()) && !name.starts_with("xmlns:")
        })
        .map(|(name, value)| (name.clone(), value.to_string()))
        .collect();
    kept.sort();
    kept
}

fn push_open_tag(out: &mut String, name: &str, attributes: &Attributes, empty: bool) {
    let mut sorted: Vec<_> = attributes.iter().collect();
    sorted.sort_by(|a, b| a.0.cmp(b.0));

    out.push('<');
    out.push_str(name);
    for (key, value) in sorted {
        let value = value.to_string();
        let quote = if value.contains('"') { '\'' } else { '"' };
        out.push_str(&format!(" {key}={quote}{value}{quote}"));
    }
    out.push_str(if empty { "/>" } else { ">" });
}

/// Набор иконок для одного запуска
#[derive(Debug, Clone)]
pub struct IconSet {
    pub holding: Icon,
    pub seat: Icon,
}

impl IconSet {
    /// Загружает `holding.svg` и `seat.svg` из каталога. Любая ошибка фатальна:
    /// карта без иконок бесполезна.
    pub fn load(dir: &Path) -> MapResult<Self> {
        Ok(Self {
            holding: Icon::load(&dir.join(HOLDING_ICON_FILE))?,
            seat: Icon::load(&dir.join(SEAT_ICON_FILE))?,
        })
    }

    #[must_use]
    pub fn get(&self, kind: IconKind) -> &Icon {
        match kind {
            IconKind::Holding => &self.holding,
            IconKind::Seat => &self.seat,
        }
    }
}
