// src/render/mod.rs
//! Рендеринг карты
//!
//! Рендер отделён от генерации: готовая сетка и владения превращаются в [`Scene`],
//! плоский список команд рисования. Дальше сцена сериализуется в SVG ([`vector`]) и
//! растеризуется в PNG ([`png`]).
//!
//! Порядок команд совпадает с порядком слоёв: гексы, затем иконки, затем подписи.

pub mod icons;
pub mod png;
pub mod vector;

use crate::grid::ColorGrid;
use crate::holding::{Holding, HoldingRole};
use crate::layout::{HexLayout, Point, col_label, row_label};
use crate::palette::Swatch;

/// Какая иконка рисуется поверх гекса
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IconKind {
    Holding,
    Seat,
}

impl From<HoldingRole> for IconKind {
    fn from(role: HoldingRole) -> Self {
        match role {
            HoldingRole::Ordinary => IconKind::Holding,
            HoldingRole::Seat => IconKind::Seat,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    /// Гекс с заливкой цветом биома и чёрной обводкой
    Hex { corners: [Point; 6], fill: Swatch },
    /// Иконка, вписанная в гекс размера `size`; `anchor` задаёт середину верхнего края
    Icon {
        kind: IconKind,
        anchor: Point,
        size: f64,
    },
    /// Текстовая подпись с центром по горизонтали в `position`
    Label { position: Point, text: String },
}

/// Холст с командами рисования в порядке слоёв
#[derive(Debug, Clone, PartialEq)]
pub struct Scene {
    pub width: f64,
    pub height: f64,
    pub commands: Vec<DrawCommand>,
}

/// Собирает сцену из окрашенной сетки и выбранных владений
#[must_use]
pub fn build_scene(
    layout: &HexLayout,
    grid: &ColorGrid,
    holdings: &[Holding],
    show_labels: bool,
) -> Scene {
    let (width, height) = layout.canvas_size();
    let mut commands = Vec::with_capacity(grid.rows * grid.cols + holdings.len());

    for (row, col, fill) in grid.cells() {
        commands.push(DrawCommand::Hex {
            corners: layout.hex_corners(layout.hex_center(row, col)),
            fill,
        });
    }

    for holding in holdings {
        commands.push(DrawCommand::Icon {
            kind: holding.role.into(),
            anchor: layout.icon_anchor(holding.row, holding.col),
            size: layout.size,
        });
    }

    if show_labels {
        for row in 0..layout.rows {
            commands.push(DrawCommand::Label {
                position: layout.row_label_position(row),
                text: row_label(row),
            });
        }
        for col in 0..layout.cols {
            commands.push(DrawCommand::Label {
                position: layout.col_label_position(col),
                text: col_label(col),
            });
        }
    }

    Scene {
        width,
        height,
        commands,
    }
}
