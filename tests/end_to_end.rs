use hexmap::{MapError, MapParams, MapStyle, Palette, generate_map, run, run_rng};
use std::path::{Path, PathBuf};

fn scratch_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("hexmap-{name}-{}", std::process::id()));
    let _ = std::fs::remove_dir_all(&dir);
    dir
}

fn bundled_icons() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("assets/icons")
}

#[test]
fn run_writes_svg_png_and_json() {
    let out = scratch_dir("run");
    let params = MapParams {
        rows: 6,
        cols: 8,
        hex_size: 30,
        dpi: 96,
        map_style: MapStyle::Island,
        output_name: "island".into(),
        output_dir: out.clone(),
        icons_dir: bundled_icons(),
        seed: Some(17),
        export_json: true,
        ..Default::default()
    };

    let artifacts = run(&params).unwrap();
    assert_eq!(artifacts.svg, out.join("island.svg"));
    assert_eq!(artifacts.png, out.join("island.png"));

    let svg = std::fs::read_to_string(&artifacts.svg).unwrap();
    assert_eq!(svg.matches("<polygon").count(), 6 * 8);
    assert!(svg.contains("scale("));

    let png = image::open(&artifacts.png).unwrap();
    let (w, h) = (png.width(), png.height());
    // холст: 8·60·0.75 + 30 + 45 по ширине при масштабе 1
    assert_eq!(w, 435);
    assert!(h > 0);

    let json = std::fs::read_to_string(artifacts.json.unwrap()).unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(value["cells"].as_array().unwrap().len(), 48);

    std::fs::remove_dir_all(&out).unwrap();
}

#[test]
fn missing_icons_abort_the_run() {
    let out = scratch_dir("no-icons");
    let params = MapParams {
        output_dir: out.clone(),
        icons_dir: out.join("nowhere"),
        ..Default::default()
    };
    let err = run(&params).unwrap_err();
    assert!(matches!(err, MapError::IconMissing { .. }));
    assert!(!out.exists());
}

#[test]
fn failed_raster_leaves_no_files() {
    let out = scratch_dir("raster");
    let params = MapParams {
        rows: 3,
        cols: 3,
        dpi: u32::MAX,
        output_dir: out.clone(),
        icons_dir: bundled_icons(),
        seed: Some(5),
        export_json: true,
        ..Default::default()
    };
    let err = run(&params).unwrap_err();
    assert!(matches!(err, MapError::Raster(_)));
    assert!(!out.join("hex_map_example.svg").exists());
    assert!(!out.join("hex_map_example.png").exists());
    assert!(!out.join("hex_map_example.json").exists());
    assert!(!out.exists());
}

#[test]
fn invalid_config_is_rejected_before_icons() {
    let params = MapParams {
        randomness: -0.5,
        icons_dir: PathBuf::from("nowhere"),
        ..Default::default()
    };
    assert!(matches!(run(&params), Err(MapError::InvalidConfig(_))));
}

#[test]
fn every_style_covers_the_grid_and_keeps_holdings_apart() {
    let palette = Palette::standard();
    let styles = [
        MapStyle::Random,
        MapStyle::Continental,
        MapStyle::Shore,
        MapStyle::Island,
        MapStyle::Archipelago,
        MapStyle::Valleys,
    ];
    for (seed, style) in styles.into_iter().enumerate() {
        let params = MapParams {
            rows: 14,
            cols: 11,
            map_style: style,
            holdings: Some(6),
            ..Default::default()
        };
        let map = generate_map(&params, &palette, &mut run_rng(Some(seed as u64))).unwrap();
        assert!(map.grid.is_complete());

        for (i, a) in map.holdings.iter().enumerate() {
            assert!(!palette.is_water(&map.grid.get(a.row, a.col).unwrap()));
            for b in &map.holdings[i + 1..] {
                let d = ((a.row as f64 - b.row as f64).powi(2)
                    + (a.col as f64 - b.col as f64).powi(2))
                .sqrt();
                assert!(d >= 2.0, "{style:?}: holdings too close");
            }
        }
    }
}
