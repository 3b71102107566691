use clap::Parser;
use hexmap::{MapParams, MapStyle};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Генератор гексовых карт с биомами и владениями
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Количество строк сетки (по умолчанию: 12)
    rows: Option<usize>,

    /// Количество столбцов сетки (по умолчанию: 12)
    cols: Option<usize>,

    /// Путь к конфигурационному файлу в формате TOML; флаги ниже его переопределяют
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Радиус гекса в пикселях (по умолчанию: 50)
    #[arg(long)]
    size: Option<u32>,

    /// Показывать подписи строк и столбцов (по умолчанию: true)
    #[arg(long)]
    labels: Option<bool>,

    /// Случайность слипания биомов, 0–1 (по умолчанию: 0.2)
    #[arg(long)]
    randomness: Option<f64>,

    /// DPI для PNG (по умолчанию: 300)
    #[arg(long)]
    dpi: Option<u32>,

    /// Общий вид карты (по умолчанию: random)
    #[arg(long, alias = "map_style", value_enum, ignore_case = true)]
    map_style: Option<MapStyle>,

    /// Количество владений (по умолчанию: min(rows, cols) / 3)
    #[arg(long)]
    holdings: Option<usize>,

    /// Заменить одно владение резиденцией (по умолчанию: true)
    #[arg(long, alias = "place_seat")]
    place_seat: Option<bool>,

    /// Имя выходных файлов без расширения (по умолчанию: hex_map_example)
    #[arg(short, long)]
    filename: Option<String>,

    /// Каталог для результатов (по умолчанию: output)
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Каталог с holding.svg и seat.svg (по умолчанию: assets/icons)
    #[arg(long)]
    icons_dir: Option<PathBuf>,

    /// Сид для воспроизводимой генерации
    #[arg(long)]
    seed: Option<u64>,

    /// Дополнительно сохранить карту в JSON
    #[arg(long)]
    json: bool,
}

impl Cli {
    /// Накладывает заданные флаги поверх параметров из файла (или значений по умолчанию)
    fn apply(self, mut params: MapParams) -> MapParams {
        if let Some(rows) = self.rows {
            params.rows = rows;
        }
        if let Some(cols) = self.cols {
            params.cols = cols;
        }
        if let Some(size) = self.size {
            params.hex_size = size;
        }
        if let Some(labels) = self.labels {
            params.show_labels = labels;
        }
        if let Some(randomness) = self.randomness {
            params.randomness = randomness;
        }
        if let Some(dpi) = self.dpi {
            params.dpi = dpi;
        }
        if let Some(style) = self.map_style {
            params.map_style = style;
        }
        if let Some(place_seat) = self.place_seat {
            params.place_seat = place_seat;
        }
        if let Some(filename) = self.filename {
            params.output_name = filename;
        }
        if let Some(dir) = self.output_dir {
            params.output_dir = dir;
        }
        if let Some(dir) = self.icons_dir {
            params.icons_dir = dir;
        }
        if self.holdings.is_some() {
            params.holdings = self.holdings;
        }
        if self.seed.is_some() {
            params.seed = self.seed;
        }
        params.export_json |= self.json;
        params
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    let base = match &cli.config {
        Some(path) => {
            println!("🔍 Загрузка конфигурации...");
            MapParams::from_toml_file(&path.to_string_lossy())?
        }
        None => MapParams::default(),
    };
    let params = cli.apply(base);

    println!(
        "Генерация карты {:?} (размер: {}×{})...",
        params.map_style, params.rows, params.cols
    );
    let artifacts = hexmap::run(&params)?;

    println!(
        "Map generated: {} and {}",
        artifacts.svg.display(),
        artifacts.png.display()
    );
    if let Some(json) = artifacts.json {
        println!("Map data: {}", json.display());
    }
    Ok(())
}
