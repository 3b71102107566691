// src/render/vector.rs
//! Сериализация сцены в SVG-документ

use super::icons::{ICON_UNITS, Icon, IconSet};
use super::{DrawCommand, Scene};
use crate::error::MapResult;
use crate::layout::Point;
use std::path::Path;
use svg::Document;
use svg::node::Blob;
use svg::node::element::{Group, Polygon, Text};

const LABEL_FONT_SIZE: u32 = 18;

fn points_attr(corners: &[Point]) -> String {
    corners
        .iter()
        .map(|(x, y)| format!("{x},{y}"))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Трансформация иконки: масштаб `size / 255`, центр по горизонтали в `anchor.0`,
/// верхний край в `anchor.1`
#[must_use]
pub fn icon_transform(anchor: Point, size: f64) -> String {
    let scale = size / ICON_UNITS;
    let translate_x = anchor.0 - (ICON_UNITS / 2.0) * scale;
    format!("translate({translate_x}, {}) scale({scale})", anchor.1)
}

/// Группа с телом иконки; оформление её корневого `<svg>` ставится на группу
fn icon_group(icon: &Icon, anchor: Point, size: f64) -> Group {
    icon.root_attributes
        .iter()
        .fold(Group::new(), |group, (name, value)| {
            group.set(name.as_str(), value.as_str())
        })
        .set("transform", icon_transform(anchor, size))
        .add(Blob::new(icon.body.clone()))
}

/// Строит SVG-документ из сцены
#[must_use]
pub fn to_document(scene: &Scene, icons: &IconSet) -> Document {
    let mut document = Document::new()
        .set("width", scene.width)
        .set("height", scene.height)
        .set("viewBox", format!("0 0 {} {}", scene.width, scene.height));

    for command in &scene.commands {
        document = match command {
            DrawCommand::Hex { corners, fill } => document.add(
                Polygon::new()
                    .set("points", points_attr(corners))
                    .set("fill", fill.hex)
                    .set("stroke", "black"),
            ),
            DrawCommand::Icon { kind, anchor, size } => document.add(icon_group(
                icons.get(*kind),
                *anchor,
                *size,
            )),
            DrawCommand::Label { position, text } => document.add(
                Text::new(text.clone())
                    .set("x", position.0)
                    .set("y", position.1)
                    .set("font-size", LABEL_FONT_SIZE)
                    .set("text-anchor", "middle")
                    .set("fill", "black"),
            ),
        };
    }

    document
}

/// Сохраняет документ в файл
pub fn save_svg(document: &Document, path: &Path) -> MapResult<()> {
    svg::save(path, document)?;
    Ok(())
}
