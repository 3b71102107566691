// src/biome.rs
//! Назначение биомов гексам
//!
//! Для каждого стиля карты есть своя политика выбора цвета. Значения уровня запуска
//! (стороны и ширина берега, сдвиг острова, вероятность воды архипелага) вычисляются
//! один раз в [`StylePlan::prepare`] до обхода сетки и дальше не меняются.
//!
//! Обход строго построчный: стиль `Random` смотрит на уже окрашенных соседей,
//! поэтому порядок обхода входит в контракт.

use crate::config::MapStyle;
use crate::grid::ColorGrid;
use crate::palette::{Biome, CERULEAN_SEA, Palette, Swatch};
use crate::random::RandomSource;
use serde::Serialize;
use tracing::{debug, debug_span};

/// Сторона карты
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Side {
    Top,
    Bottom,
    Left,
    Right,
}

/// Порядок проверки сторон в стиле `Shore`
const SIDES: [Side; 4] = [Side::Top, Side::Bottom, Side::Left, Side::Right];

/// Вероятность воды в стиле `Continental`
const CONTINENTAL_WATER_CHANCE: f64 = 0.1;
/// Доля строк/столбцов под береговую полосу острова
const ISLAND_MARGIN_FACTOR: f64 = 0.1;
/// Верхняя и нижняя полосы гор в стиле `Valleys`
const VALLEY_RIDGE_FACTOR: f64 = 0.2;
/// Вероятность одиночной горы внутри долины
const VALLEY_PEAK_CHANCE: f64 = 0.2;

/// Параметры стиля, зафиксированные на весь запуск
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum StylePlan {
    Random {
        randomness: f64,
    },
    Continental,
    Shore {
        /// Одна или две различные стороны
        sides: Vec<Side>,
        /// Ширина берега как доля размера карты, из `[0.1, 0.3]`
        margin: f64,
    },
    Island {
        row_margin: i64,
        col_margin: i64,
        /// Сдвиг из `{-1, 0, 1}` для всех четырёх границ по строкам
        row_shift: i64,
        col_shift: i64,
    },
    Archipelago {
        water_probability: f64,
    },
    Valleys,
}

impl StylePlan {
    /// Вычисляет значения уровня запуска для выбранного стиля
    pub fn prepare<R: RandomSource>(
        style: MapStyle,
        randomness: f64,
        rows: usize,
        cols: usize,
        rng: &mut R,
    ) -> Self {
        let plan = match style {
            MapStyle::Random => StylePlan::Random { randomness },
            MapStyle::Continental => StylePlan::Continental,
            MapStyle::Shore => {
                let count = rng.int_inclusive(1, 2) as usize;
                let mut pool = SIDES.to_vec();
                let sides = (0..count)
                    .map(|_| pool.remove(rng.index(pool.len())))
                    .collect();
                StylePlan::Shore {
                    sides,
                    margin: rng.uniform(0.1, 0.3),
                }
            }
            MapStyle::Island => StylePlan::Island {
                row_margin: ((rows as f64 * ISLAND_MARGIN_FACTOR) as i64).max(1),
                col_margin: ((cols as f64 * ISLAND_MARGIN_FACTOR) as i64).max(1),
                row_shift: rng.int_inclusive(-1, 1),
                col_shift: rng.int_inclusive(-1, 1),
            },
            MapStyle::Archipelago => StylePlan::Archipelago {
                water_probability: rng.uniform(0.4, 0.6),
            },
            MapStyle::Valleys => StylePlan::Valleys,
        };
        debug!(?plan, "Style plan prepared");
        plan
    }
}

/// Назначает цвета гексам по плану стиля
#[derive(Debug, Clone)]
pub struct BiomeAssigner<'a> {
    palette: &'a Palette,
    plan: StylePlan,
}

impl<'a> BiomeAssigner<'a> {
    #[must_use]
    pub fn new(palette: &'a Palette, plan: StylePlan) -> Self {
        Self { palette, plan }
    }

    #[must_use]
    pub fn plan(&self) -> &StylePlan {
        &self.plan
    }

    /// Цвет для одного гекса. Сетку не меняет: записывает результат вызывающий.
    ///
    /// Вызывается ровно один раз на клетку в построчном порядке.
    pub fn assign<R: RandomSource>(
        &self,
        grid: &ColorGrid,
        row: usize,
        col: usize,
        rng: &mut R,
    ) -> Swatch {
        let (rows, cols) = (grid.rows, grid.cols);
        let land = self.palette.land();

        match &self.plan {
            StylePlan::Random { randomness } => {
                let neighbors = grid.neighbor_colors(row, col);
                // Слипание: с вероятностью 1 - randomness копируем соседа
                if !neighbors.is_empty() && rng.unit() >= *randomness {
                    *rng.pick(&neighbors)
                } else {
                    *rng.pick(self.palette.all())
                }
            }
            StylePlan::Continental => {
                if rng.unit() < CONTINENTAL_WATER_CHANCE {
                    *rng.pick(self.palette.colors(Biome::Water))
                } else {
                    *rng.pick(land)
                }
            }
            StylePlan::Shore { sides, margin } => {
                let on_shore = SIDES
                    .iter()
                    .filter(|side| sides.contains(side))
                    .any(|&side| within_margin(side, row, col, rows, cols, *margin));
                if on_shore {
                    CERULEAN_SEA
                } else {
                    *rng.pick(land)
                }
            }
            StylePlan::Island {
                row_margin,
                col_margin,
                row_shift,
                col_shift,
            } => {
                let (r, c) = (row as i64, col as i64);
                let top = row_margin + row_shift;
                let bottom = rows as i64 - row_margin + row_shift;
                let left = col_margin + col_shift;
                let right = cols as i64 - col_margin + col_shift;

                if r < top || r > bottom || c < left || c > right {
                    CERULEAN_SEA
                } else {
                    *rng.pick(land)
                }
            }
            StylePlan::Archipelago { water_probability } => {
                if rng.unit() < *water_probability {
                    CERULEAN_SEA
                } else {
                    *rng.pick(land)
                }
            }
            StylePlan::Valleys => {
                let r = row as f64;
                let ridge = r < rows as f64 * VALLEY_RIDGE_FACTOR
                    || r > rows as f64 * (1.0 - VALLEY_RIDGE_FACTOR);
                if ridge || rng.unit() < VALLEY_PEAK_CHANCE {
                    *rng.pick(self.palette.colors(Biome::Mountain))
                } else {
                    *rng.pick(self.palette.lowland())
                }
            }
        }
    }

    /// Окрашивает всю сетку построчно; каждая запись видна следующим клеткам
    pub fn paint<R: RandomSource>(&self, rows: usize, cols: usize, rng: &mut R) -> ColorGrid {
        let span = debug_span!("paint", rows, cols);
        let _guard = span.enter();

        let mut grid = ColorGrid::new(rows, cols);
        for row in 0..rows {
            for col in 0..cols {
                let swatch = self.assign(&grid, row, col, rng);
                grid.set(row, col, swatch);
            }
        }

        let water = grid
            .cells()
            .filter(|(_, _, s)| self.palette.is_water(s))
            .count();
        debug!(water, total = rows * cols, "Grid painted");
        grid
    }
}

/// Попадает ли клетка в береговую полосу у стороны `side`
fn within_margin(side: Side, row: usize, col: usize, rows: usize, cols: usize, margin: f64) -> bool {
    let (r, c) = (row as f64, col as f64);
    let (rows, cols) = (rows as f64, cols as f64);
    match side {
        Side::Top => r < rows * margin,
        Side::Bottom => r > rows * (1.0 - margin),
        Side::Left => c < cols * margin,
        Side::Right => c > cols * (1.0 - margin),
    }
}

/// Строит план стиля и окрашивает сетку `rows × cols`
pub fn assign_biomes<R: RandomSource>(
    palette: &Palette,
    style: MapStyle,
    randomness: f64,
    rows: usize,
    cols: usize,
    rng: &mut R,
) -> ColorGrid {
    let plan = StylePlan::prepare(style, randomness, rows, cols, rng);
    BiomeAssigner::new(palette, plan).paint(rows, cols, rng)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::run_rng;
    use crate::random::scripted::ScriptedSource;

    const ALL_STYLES: [MapStyle; 6] = [
        MapStyle::Random,
        MapStyle::Continental,
        MapStyle::Shore,
        MapStyle::Island,
        MapStyle::Archipelago,
        MapStyle::Valleys,
    ];

    #[test]
    fn test_every_style_colors_every_cell() {
        let palette = Palette::standard();
        for (i, style) in ALL_STYLES.into_iter().enumerate() {
            let mut rng = run_rng(Some(i as u64));
            let grid = assign_biomes(&palette, style, 0.2, 9, 13, &mut rng);
            assert!(grid.is_complete(), "{style:?} left cells unassigned");
            assert_eq!(grid.data.len(), 9 * 13);
        }
    }

    #[test]
    fn test_zero_randomness_always_clumps() {
        let palette = Palette::standard();
        let mut rng = run_rng(Some(11));
        let grid = assign_biomes(&palette, MapStyle::Random, 0.0, 12, 12, &mut rng);

        for (row, col, swatch) in grid.cells() {
            // Соседи, окрашенные раньше этой клетки при построчном обходе
            let earlier: Vec<Swatch> = grid
                .neighbors(row, col)
                .filter(|&(r, c)| (r, c) < (row, col))
                .filter_map(|(r, c)| grid.get(r, c))
                .collect();
            if !earlier.is_empty() {
                assert!(earlier.contains(&swatch), "({row}, {col}) did not clump");
            }
        }
    }

    #[test]
    fn test_full_randomness_draws_from_whole_palette() {
        let palette = Palette::standard();
        // unit() = 0.99 < 1.0, поэтому соседи никогда не копируются
        let mut rng = ScriptedSource::new(vec![0.99], vec![2, 5, 17]);
        let grid = assign_biomes(&palette, MapStyle::Random, 1.0, 3, 3, &mut rng);
        assert_eq!(grid.get(0, 0), Some(palette.all()[2]));
        assert_eq!(grid.get(0, 1), Some(palette.all()[5]));
        assert_eq!(grid.get(0, 2), Some(palette.all()[17]));
    }

    #[test]
    fn test_continental_without_low_draws_is_all_land() {
        let palette = Palette::standard();
        let mut rng = ScriptedSource::new(vec![0.5, 0.1, 0.99], vec![0, 3, 7, 13]);
        let grid = assign_biomes(&palette, MapStyle::Continental, 0.2, 3, 3, &mut rng);
        assert!(grid.is_complete());
        for (_, _, swatch) in grid.cells() {
            assert!(palette.land().contains(&swatch));
        }
    }

    #[test]
    fn test_continental_low_draws_are_water() {
        let palette = Palette::standard();
        let mut rng = ScriptedSource::constant(0.05);
        let grid = assign_biomes(&palette, MapStyle::Continental, 0.2, 4, 4, &mut rng);
        assert!(grid.cells().all(|(_, _, s)| palette.is_water(&s)));
    }

    #[test]
    fn test_shore_margins_are_cerulean() {
        let palette = Palette::standard();
        let plan = StylePlan::Shore {
            sides: vec![Side::Right, Side::Top],
            margin: 0.25,
        };
        let mut rng = run_rng(Some(3));
        let grid = BiomeAssigner::new(&palette, plan).paint(10, 10, &mut rng);

        for (row, col, swatch) in grid.cells() {
            if row < 3 || col > 7 {
                assert_eq!(swatch, CERULEAN_SEA, "({row}, {col}) should be sea");
            } else {
                assert!(palette.land().contains(&swatch), "({row}, {col}) should be land");
            }
        }
    }

    #[test]
    fn test_shore_plan_is_drawn_once() {
        for seed in 0..32 {
            let mut rng = run_rng(Some(seed));
            let plan = StylePlan::prepare(MapStyle::Shore, 0.2, 10, 10, &mut rng);
            let StylePlan::Shore { sides, margin } = plan else {
                panic!("expected a shore plan");
            };
            assert!((1..=2).contains(&sides.len()));
            if sides.len() == 2 {
                assert_ne!(sides[0], sides[1]);
            }
            assert!((0.1..=0.3).contains(&margin));
        }
    }

    #[test]
    fn test_island_water_count_is_stable_under_jitter() {
        let palette = Palette::standard();
        let mut rng = run_rng(Some(5));
        for row_shift in -1..=1 {
            for col_shift in -1..=1 {
                let plan = StylePlan::Island {
                    row_margin: 2,
                    col_margin: 2,
                    row_shift,
                    col_shift,
                };
                let grid = BiomeAssigner::new(&palette, plan).paint(20, 20, &mut rng);
                assert!(grid.is_complete());

                // Внутренний прямоугольник всегда 17×17 клеток для сетки 20×20
                let water = grid.cells().filter(|(_, _, s)| palette.is_water(s)).count();
                assert_eq!(water, 400 - 17 * 17);

                let corner = grid.get(1, 1).unwrap();
                assert_eq!(
                    palette.is_water(&corner),
                    row_shift >= 0 || col_shift >= 0
                );
            }
        }
    }

    #[test]
    fn test_island_margins_never_below_one() {
        let mut rng = run_rng(Some(1));
        let plan = StylePlan::prepare(MapStyle::Island, 0.2, 5, 30, &mut rng);
        let StylePlan::Island {
            row_margin,
            col_margin,
            row_shift,
            col_shift,
        } = plan
        else {
            panic!("expected an island plan");
        };
        assert_eq!(row_margin, 1);
        assert_eq!(col_margin, 3);
        assert!((-1..=1).contains(&row_shift) && (-1..=1).contains(&col_shift));
    }

    #[test]
    fn test_archipelago_probability_range() {
        let palette = Palette::standard();
        let mut rng = ScriptedSource::constant(0.99);
        let plan = StylePlan::prepare(MapStyle::Archipelago, 0.2, 4, 4, &mut rng);
        let StylePlan::Archipelago { water_probability } = plan else {
            panic!("expected an archipelago plan");
        };
        assert!((0.4..=0.6).contains(&water_probability));

        // 0.99 всегда выше вероятности воды
        let grid = BiomeAssigner::new(&palette, plan).paint(4, 4, &mut rng);
        assert!(grid.cells().all(|(_, _, s)| !palette.is_water(&s)));
    }

    #[test]
    fn test_valleys_ridges_are_mountains() {
        let palette = Palette::standard();
        let mountains = palette.colors(Biome::Mountain);
        let mut rng = ScriptedSource::constant(0.5);
        let grid = assign_biomes(&palette, MapStyle::Valleys, 0.2, 10, 6, &mut rng);

        for (row, _, swatch) in grid.cells() {
            if row < 2 || row > 8 {
                assert!(mountains.contains(&swatch));
            } else {
                assert!(palette.lowland().contains(&swatch));
            }
        }
    }

    #[test]
    fn test_valleys_peaks_appear_inside() {
        let palette = Palette::standard();
        let mut rng = ScriptedSource::constant(0.1);
        let grid = assign_biomes(&palette, MapStyle::Valleys, 0.2, 10, 6, &mut rng);
        assert!(
            grid.cells()
                .all(|(_, _, s)| palette.biome_of(&s) == Some(Biome::Mountain))
        );
    }

    #[test]
    fn test_same_seed_same_grid() {
        let palette = Palette::standard();
        let a = assign_biomes(&palette, MapStyle::Random, 0.2, 8, 8, &mut run_rng(Some(99)));
        let b = assign_biomes(&palette, MapStyle::Random, 0.2, 8, 8, &mut run_rng(Some(99)));
        assert_eq!(a.data, b.data);
    }
}
