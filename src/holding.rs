// src/holding.rs
use crate::config::default_holding_count;
use crate::grid::ColorGrid;
use crate::palette::Palette;
use crate::random::RandomSource;
use serde::Serialize;
use tracing::debug;

/// Минимальное расстояние между владениями (в клетках, евклидово по строке/столбцу)
pub const MIN_HOLDING_DISTANCE: f64 = 2.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum HoldingRole {
    Ordinary,
    /// Резиденция правителя: всегда первое выбранное владение
    Seat,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Holding {
    pub row: usize,
    pub col: usize,
    pub role: HoldingRole,
}

/// Евклидово расстояние между клетками по строке и столбцу (не гексовая метрика)
#[must_use]
pub fn cell_distance(a: (usize, usize), b: (usize, usize)) -> f64 {
    let dr = a.0 as f64 - b.0 as f64;
    let dc = a.1 as f64 - b.1 as f64;
    (dr * dr + dc * dc).sqrt()
}

/// Выбирает владения на сухопутных клетках, разнесённые не ближе [`MIN_HOLDING_DISTANCE`].
///
/// Каждая вытянутая клетка покидает пул, даже если не прошла проверку расстояния,
/// поэтому цикл всегда завершается. Если пул кончился раньше, владений просто меньше.
/// Сетку не изменяет. Без `desired` берётся `min(rows, cols) / 3`.
pub fn place_holdings<R: RandomSource>(
    grid: &ColorGrid,
    palette: &Palette,
    desired: Option<usize>,
    place_seat: bool,
    rng: &mut R,
) -> Vec<Holding> {
    let count = desired.unwrap_or_else(|| default_holding_count(grid.rows, grid.cols));
    let mut candidates: Vec<(usize, usize)> = grid
        .cells()
        .filter(|(_, _, swatch)| !palette.is_water(swatch))
        .map(|(row, col, _)| (row, col))
        .collect();

    let mut chosen: Vec<(usize, usize)> = Vec::with_capacity(count.min(candidates.len()));
    while chosen.len() < count && !candidates.is_empty() {
        let i = rng.index(candidates.len());
        let cell = candidates.remove(i);

        if chosen
            .iter()
            .all(|&other| cell_distance(cell, other) >= MIN_HOLDING_DISTANCE)
        {
            chosen.push(cell);
        }
    }

    if chosen.len() < count {
        debug!(
            requested = count,
            placed = chosen.len(),
            "Ran out of land cells for holdings"
        );
    }

    chosen
        .into_iter()
        .enumerate()
        .map(|(i, (row, col))| Holding {
            row,
            col,
            role: if i == 0 && place_seat {
                HoldingRole::Seat
            } else {
                HoldingRole::Ordinary
            },
        })
        .collect()
}
