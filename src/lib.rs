pub mod biome;
pub mod config;
pub mod error;
pub mod generator;
pub mod grid;
pub mod holding;
pub mod layout;
pub mod palette;
pub mod random;
pub mod render;

pub use biome::{BiomeAssigner, StylePlan, assign_biomes};
pub use config::{MapParams, MapStyle};
pub use error::{MapError, MapResult};
pub use generator::{GeneratedMap, MapArtifacts, generate_map, run, save_map};
pub use grid::ColorGrid;
pub use holding::{Holding, HoldingRole, place_holdings};
pub use palette::{Biome, Palette, Swatch};
pub use random::{RandomSource, run_rng};
