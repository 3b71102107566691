// src/palette.rs
//! Палитра биомов
//!
//! Цвета сгруппированы по классам биомов (вода, лес, равнина, горы).
//! Порядок цветов внутри класса важен: равномерный выбор идёт по индексу.
//! Состав палитры фиксируется при создании и больше не меняется.

use serde::{Deserialize, Serialize};

/// Класс биома
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Biome {
    Water,
    Forest,
    Plain,
    Mountain,
}

/// Конкретный цвет гекса: HEX-строка и человекочитаемое название
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Swatch {
    /// Цвет в формате `"#RRGGBB"`
    pub hex: &'static str,
    pub name: &'static str,
}

impl Swatch {
    const fn new(hex: &'static str, name: &'static str) -> Self {
        Self { hex, name }
    }
}

/// Основной цвет воды для стилей Shore, Island и Archipelago
pub const CERULEAN_SEA: Swatch = Swatch::new("#2196F3", "Cerulean Sea");

const WATER: [Swatch; 4] = [
    Swatch::new("#607D8B", "Misty Moors"),
    Swatch::new("#03A9F4", "Azure Lakes"),
    CERULEAN_SEA,
    Swatch::new("#009688", "Verdant Marshes"),
];

const FOREST: [Swatch; 6] = [
    Swatch::new("#4CAF50", "Emerald Forest"),
    Swatch::new("#8BC34A", "Verdant Plains"),
    Swatch::new("#2E7D32", "Pine Forest"),
    Swatch::new("#1B5E20", "Deep Woods"),
    Swatch::new("#388E3C", "Woodland"),
    Swatch::new("#CDDC39", "Savanna Grasslands"),
];

const PLAIN: [Swatch; 2] = [
    Swatch::new("#FFEB3B", "Golden Dunes"),
    Swatch::new("#FFC107", "Sunlit Meadows"),
];

const MOUNTAIN: [Swatch; 6] = [
    Swatch::new("#8D6E63", "Sierra Brown"),
    Swatch::new("#795548", "Umberwood"),
    Swatch::new("#6D4C41", "Rocky Earth"),
    Swatch::new("#A1887F", "Dusty Peaks"),
    Swatch::new("#FF9800", "Terracotta Highlands"),
    Swatch::new("#FF5722", "Cinder Wastes"),
];

/// Реестр цветов по классам биомов с готовыми объединёнными представлениями
#[derive(Debug, Clone)]
pub struct Palette {
    water: Vec<Swatch>,
    forest: Vec<Swatch>,
    plain: Vec<Swatch>,
    mountain: Vec<Swatch>,
    /// Лес + равнина + горы
    land: Vec<Swatch>,
    /// Лес + равнина (долины)
    lowland: Vec<Swatch>,
    /// Вода + вся суша
    all: Vec<Swatch>,
}

impl Palette {
    #[must_use]
    pub fn standard() -> Self {
        let lowland: Vec<Swatch> = FOREST.iter().chain(PLAIN.iter()).copied().collect();
        let land: Vec<Swatch> = lowland.iter().chain(MOUNTAIN.iter()).copied().collect();
        let all: Vec<Swatch> = WATER.iter().chain(land.iter()).copied().collect();

        Self {
            water: WATER.to_vec(),
            forest: FOREST.to_vec(),
            plain: PLAIN.to_vec(),
            mountain: MOUNTAIN.to_vec(),
            land,
            lowland,
            all,
        }
    }

    #[must_use]
    pub fn colors(&self, biome: Biome) -> &[Swatch] {
        match biome {
            Biome::Water => &self.water,
            Biome::Forest => &self.forest,
            Biome::Plain => &self.plain,
            Biome::Mountain => &self.mountain,
        }
    }

    #[must_use]
    pub fn land(&self) -> &[Swatch] {
        &self.land
    }

    #[must_use]
    pub fn lowland(&self) -> &[Swatch] {
        &self.lowland
    }

    #[must_use]
    pub fn all(&self) -> &[Swatch] {
        &self.all
    }

    /// Водный ли цвет: сравнение с цветами класса `Water` по HEX
    #[must_use]
    pub fn is_water(&self, swatch: &Swatch) -> bool {
        self.water.iter().any(|w| w.hex == swatch.hex)
    }

    /// Класс биома, которому принадлежит цвет (`None` для цвета вне палитры)
    #[must_use]
    pub fn biome_of(&self, swatch: &Swatch) -> Option<Biome> {
        [Biome::Water, Biome::Forest, Biome::Plain, Biome::Mountain]
            .into_iter()
            .find(|&b| self.colors(b).iter().any(|s| s.hex == swatch.hex))
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self::standard()
    }
}
