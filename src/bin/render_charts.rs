use std::fs;
use std::path::{Path, PathBuf};

use nexis_charts::interaction::PointerState;
use nexis_charts::render::SvgRenderer;
use nexis_charts::{ChartKind, ChartPage, ChartPageConfig, Scenario};
use tracing::{info, warn};

const DEFAULT_OUTPUT_DIR: &str = "target/charts";

#[derive(Debug)]
struct CliArgs {
    config_path: Option<PathBuf>,
    output_dir: PathBuf,
    only: Option<ChartKind>,
    scenario: Option<Scenario>,
    hover: PointerState,
    png: bool,
}

fn main() {
    let _ = nexis_charts::telemetry::init_default_tracing();
    if let Err(err) = run() {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), String> {
    let args = parse_args()?;

    let mut config = match &args.config_path {
        Some(path) => {
            let raw = fs::read_to_string(path)
                .map_err(|err| format!("failed to read config `{}`: {err}", path.display()))?;
            ChartPageConfig::from_json_str(&raw).map_err(|err| err.to_string())?
        }
        None => ChartPageConfig::default(),
    };
    if let Some(scenario) = args.scenario {
        config = config.with_initial_scenario(scenario);
    }
    let page = ChartPage::from_config(config).map_err(|err| err.to_string())?;

    fs::create_dir_all(&args.output_dir).map_err(|err| {
        format!(
            "failed to create output dir `{}`: {err}",
            args.output_dir.display()
        )
    })?;

    if args.hover.position().is_some() && args.only.is_none() {
        warn!("--hover applies to every chart; pass --only to target one");
    }

    let mut written = 0usize;
    for kind in ChartKind::ALL {
        if args.only.is_some_and(|only| only != kind) {
            continue;
        }
        let frame = page
            .build_frame(kind, &args.hover)
            .map_err(|err| format!("chart `{kind}` frame build failed: {err}"))?;

        let svg = SvgRenderer::render_to_string(&frame)
            .map_err(|err| format!("chart `{kind}` svg render failed: {err}"))?;
        let svg_path = args.output_dir.join(format!("{kind}.svg"));
        fs::write(&svg_path, svg)
            .map_err(|err| format!("failed to write `{}`: {err}", svg_path.display()))?;
        println!("rendered {kind} -> {}", svg_path.display());
        written += 1;

        if args.png {
            let png_path = args.output_dir.join(format!("{kind}.png"));
            write_png(&frame, &png_path)?;
            println!("rendered {kind} -> {}", png_path.display());
            written += 1;
        }
    }

    let snapshot_path = args.output_dir.join("snapshot.json");
    let snapshot = page.snapshot_json().map_err(|err| err.to_string())?;
    fs::write(&snapshot_path, snapshot)
        .map_err(|err| format!("failed to write `{}`: {err}", snapshot_path.display()))?;

    info!(files = written, dir = %args.output_dir.display(), "chart rendering finished");
    println!("done: wrote {written} chart file(s)");
    Ok(())
}

#[cfg(feature = "cairo-backend")]
fn write_png(frame: &nexis_charts::render::RenderFrame, path: &Path) -> Result<(), String> {
    use nexis_charts::render::{CairoRenderer, Renderer};
    use std::fs::File;

    let width = i32::try_from(frame.viewport.width)
        .map_err(|_| "viewport width overflows i32".to_owned())?;
    let height = i32::try_from(frame.viewport.height)
        .map_err(|_| "viewport height overflows i32".to_owned())?;
    let mut renderer =
        CairoRenderer::new(width, height).map_err(|err| format!("renderer init failed: {err}"))?;
    renderer
        .render(frame)
        .map_err(|err| format!("png render failed: {err}"))?;
    let mut file = File::create(path)
        .map_err(|err| format!("failed to create png `{}`: {err}", path.display()))?;
    renderer
        .surface()
        .write_to_png(&mut file)
        .map_err(|err| format!("failed to write png `{}`: {err}", path.display()))
}

#[cfg(not(feature = "cairo-backend"))]
fn write_png(_frame: &nexis_charts::render::RenderFrame, _path: &Path) -> Result<(), String> {
    Err("--png requires feature `cairo-backend`".to_owned())
}

fn parse_args() -> Result<CliArgs, String> {
    let mut config_path: Option<PathBuf> = None;
    let mut output_dir = PathBuf::from(DEFAULT_OUTPUT_DIR);
    let mut only: Option<ChartKind> = None;
    let mut scenario: Option<Scenario> = None;
    let mut hover = PointerState::default();
    let mut png = false;

    let mut args = std::env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--config" => {
                let value = args
                    .next()
                    .ok_or_else(|| "missing value for --config".to_owned())?;
                config_path = Some(PathBuf::from(value));
            }
            "--output-dir" => {
                let value = args
                    .next()
                    .ok_or_else(|| "missing value for --output-dir".to_owned())?;
                output_dir = PathBuf::from(value);
            }
            "--only" => {
                let value = args
                    .next()
                    .ok_or_else(|| "missing value for --only".to_owned())?;
                only = Some(value.parse().map_err(|err| format!("--only: {err}"))?);
            }
            "--scenario" => {
                let value = args
                    .next()
                    .ok_or_else(|| "missing value for --scenario".to_owned())?;
                scenario = Some(value.parse().map_err(|err| format!("--scenario: {err}"))?);
            }
            "--hover" => {
                let value = args
                    .next()
                    .ok_or_else(|| "missing value for --hover".to_owned())?;
                let (x, y) = parse_point(&value)?;
                hover.pointer_move(x, y);
            }
            "--png" => png = true,
            "--help" | "-h" => {
                print_usage();
                std::process::exit(0);
            }
            _ => {
                return Err(format!("unknown argument `{arg}`\n\n{}", usage_message()));
            }
        }
    }

    Ok(CliArgs {
        config_path,
        output_dir,
        only,
        scenario,
        hover,
        png,
    })
}

fn parse_point(value: &str) -> Result<(f64, f64), String> {
    let (x, y) = value
        .split_once(',')
        .ok_or_else(|| format!("--hover expects `<x>,<y>`, got `{value}`"))?;
    let parse = |raw: &str| {
        raw.trim()
            .parse::<f64>()
            .map_err(|err| format!("--hover coordinate `{raw}`: {err}"))
    };
    Ok((parse(x)?, parse(y)?))
}

fn print_usage() {
    println!("{}", usage_message());
}

fn usage_message() -> String {
    format!(
        "Usage: cargo run --bin render_charts -- [options]\n\nOptions:\n  --config <path>        Page config JSON (all fields optional)\n  --output-dir <dir>     Output directory (default: {DEFAULT_OUTPUT_DIR})\n  --only <chart-id>      Render one chart: fee-distribution, performance-benchmark,\n                         staking-tiers or token-emissions\n  --scenario <key>       Benchmark scenario: ethTransfer, swap or aiAgent\n  --hover <x>,<y>        Pointer position used for tooltips\n  --png                  Also write PNG files (feature `cairo-backend`)\n  -h, --help             Show this message"
    )
}
