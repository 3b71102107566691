// src/generator.rs
//! Полный цикл генерации: биомы → владения → сцена → SVG + PNG (+ JSON).
//!
//! Генерация и сохранение разделены: [`generate_map`] работает только в памяти и
//! принимает внешний источник случайности, [`save_map`] пишет результаты на диск.

use crate::biome::{BiomeAssigner, StylePlan};
use crate::config::{MapParams, MapStyle};
use crate::error::MapResult;
use crate::grid::ColorGrid;
use crate::holding::{Holding, place_holdings};
use crate::layout::HexLayout;
use crate::palette::{Biome, Palette};
use crate::random::{RandomSource, run_rng};
use crate::render::icons::IconSet;
use crate::render::{Scene, build_scene, png, vector};
use serde::Serialize;
use std::fs;
use std::path::PathBuf;
use tracing::{info, info_span};

/// Результат одного запуска в памяти
#[derive(Debug, Clone)]
pub struct GeneratedMap {
    pub style: MapStyle,
    pub plan: StylePlan,
    pub grid: ColorGrid,
    pub holdings: Vec<Holding>,
}

/// Пути к сохранённым файлам
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MapArtifacts {
    pub svg: PathBuf,
    pub png: PathBuf,
    pub json: Option<PathBuf>,
}

/// Окрашивает сетку и расставляет владения
pub fn generate_map<R: RandomSource>(
    params: &MapParams,
    palette: &Palette,
    rng: &mut R,
) -> MapResult<GeneratedMap> {
    params.validate()?;

    let plan = StylePlan::prepare(
        params.map_style,
        params.randomness,
        params.rows,
        params.cols,
        rng,
    );
    let assigner = BiomeAssigner::new(palette, plan);
    let grid = assigner.paint(params.rows, params.cols, rng);
    let holdings = place_holdings(&grid, palette, params.holdings, params.place_seat, rng);

    info!(
        style = ?params.map_style,
        holdings = holdings.len(),
        "Map generated"
    );

    Ok(GeneratedMap {
        style: params.map_style,
        plan: assigner.plan().clone(),
        grid,
        holdings,
    })
}

#[derive(Serialize)]
struct CellExport {
    row: usize,
    col: usize,
    color: &'static str,
    name: &'static str,
    biome: Option<Biome>,
}

#[derive(Serialize)]
struct MapExport<'a> {
    rows: usize,
    cols: usize,
    style: MapStyle,
    plan: &'a StylePlan,
    cells: Vec<CellExport>,
    holdings: &'a [Holding],
}

impl GeneratedMap {
    #[must_use]
    pub fn scene(&self, hex_size: u32, show_labels: bool) -> Scene {
        let layout = HexLayout::new(self.grid.rows, self.grid.cols, hex_size);
        build_scene(&layout, &self.grid, &self.holdings, show_labels)
    }

    /// JSON-описание сетки и владений
    pub fn to_json(&self, palette: &Palette) -> MapResult<String> {
        let export = MapExport {
            rows: self.grid.rows,
            cols: self.grid.cols,
            style: self.style,
            plan: &self.plan,
            cells: self
                .grid
                .cells()
                .map(|(row, col, swatch)| CellExport {
                    row,
                    col,
                    color: swatch.hex,
                    name: swatch.name,
                    biome: palette.biome_of(&swatch),
                })
                .collect(),
            holdings: &self.holdings,
        };
        Ok(serde_json::to_string_pretty(&export)?)
    }
}

/// Пишет SVG и PNG (и JSON, если включён) в `params.output_dir`.
///
/// Растеризация и JSON готовятся до записи на диск: при ошибке не остаётся ни одного
/// файла. Если падает сама запись, уже записанные файлы удаляются.
pub fn save_map(
    params: &MapParams,
    map: &GeneratedMap,
    palette: &Palette,
    icons: &IconSet,
) -> MapResult<MapArtifacts> {
    let document = vector::to_document(&map.scene(params.hex_size, params.show_labels), icons);
    let raster = png::rasterize(&document.to_string(), params.dpi)?;
    let json = if params.export_json {
        Some(map.to_json(palette)?)
    } else {
        None
    };

    let output_path = |ext: &str| params.output_dir.join(format!("{}.{ext}", params.output_name));
    let artifacts = MapArtifacts {
        svg: output_path("svg"),
        png: output_path("png"),
        json: json.as_ref().map(|_| output_path("json")),
    };

    let written = write_outputs(params, &artifacts, &document, &raster, json.as_deref());
    if let Err(err) = written {
        for path in [Some(&artifacts.svg), Some(&artifacts.png), artifacts.json.as_ref()]
            .into_iter()
            .flatten()
        {
            let _ = fs::remove_file(path);
        }
        return Err(err);
    }
    Ok(artifacts)
}

fn write_outputs(
    params: &MapParams,
    artifacts: &MapArtifacts,
    document: &svg::Document,
    raster: &image::RgbaImage,
    json: Option<&str>,
) -> MapResult<()> {
    fs::create_dir_all(&params.output_dir)?;

    vector::save_svg(document, &artifacts.svg)?;
    info!(path = %artifacts.svg.display(), "SVG saved");

    raster.save(&artifacts.png)?;
    info!(path = %artifacts.png.display(), dpi = params.dpi, "PNG saved");

    if let (Some(path), Some(json)) = (&artifacts.json, json) {
        fs::write(path, json)?;
        info!(path = %path.display(), "JSON saved");
    }
    Ok(())
}

/// Запуск целиком: проверка параметров, иконки, генерация, сохранение
pub fn run(params: &MapParams) -> MapResult<MapArtifacts> {
    let span = info_span!("run", name = %params.output_name);
    let _guard = span.enter();

    params.validate()?;
    let icons = IconSet::load(&params.icons_dir)?;
    let palette = Palette::standard();
    let mut rng = run_rng(params.seed);

    let map = generate_map(params, &palette, &mut rng)?;
    save_map(params, &map, &palette, &icons)
}
