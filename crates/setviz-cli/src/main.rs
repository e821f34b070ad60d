use setviz::render::raster::{self, RasterError, RasterOptions};
use setviz::render::{LayoutOptions, SvgRenderOptions};
use setviz::{CalculateRequest, Calculation, VennConfig};
use serde::Serialize;
use std::io::Read;
use std::str::FromStr;

#[derive(Debug)]
enum CliError {
    Usage(&'static str),
    Io(std::io::Error),
    Input(setviz::Error),
    Render(setviz_render::Error),
    Raster(RasterError),
    Json(serde_json::Error),
}

impl std::fmt::Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CliError::Usage(msg) => write!(f, "{msg}"),
            CliError::Io(err) => write!(f, "I/O error: {err}"),
            CliError::Input(err) => write!(f, "Error in input: {err}"),
            CliError::Render(err) => write!(f, "{err}"),
            CliError::Raster(err) => write!(f, "{err}"),
            CliError::Json(err) => write!(f, "JSON error: {err}"),
        }
    }
}

impl From<std::io::Error> for CliError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<setviz::Error> for CliError {
    fn from(value: setviz::Error) -> Self {
        Self::Input(value)
    }
}

impl From<setviz_render::Error> for CliError {
    fn from(value: setviz_render::Error) -> Self {
        Self::Render(value)
    }
}

impl From<RasterError> for CliError {
    fn from(value: RasterError) -> Self {
        Self::Raster(value)
    }
}

impl From<serde_json::Error> for CliError {
    fn from(value: serde_json::Error) -> Self {
        Self::Json(value)
    }
}

#[derive(Debug, Clone, Copy, Default)]
enum Command {
    #[default]
    Report,
    Regions,
    Layout,
    Render,
}

#[derive(Debug, Clone, Copy, Default)]
enum RenderFormat {
    #[default]
    Svg,
    Png,
    Jpeg,
    Pdf,
}

impl RenderFormat {
    fn extension(self) -> &'static str {
        match self {
            Self::Svg => "svg",
            Self::Png => "png",
            Self::Jpeg => "jpg",
            Self::Pdf => "pdf",
        }
    }
}

impl FromStr for RenderFormat {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "svg" => Ok(Self::Svg),
            "png" => Ok(Self::Png),
            "jpg" | "jpeg" => Ok(Self::Jpeg),
            "pdf" => Ok(Self::Pdf),
            _ => Err(()),
        }
    }
}

#[derive(Debug, Default)]
struct Args {
    command: Command,
    input: Option<String>,
    config: Option<String>,
    set_count: Option<usize>,
    operation: Option<String>,
    raw_sets: [Option<String>; 3],
    pretty: bool,
    render_format: RenderFormat,
    render_scale: f32,
    background: Option<String>,
    canvas_width: Option<f64>,
    canvas_height: Option<f64>,
    diagram_id: Option<String>,
    out: Option<String>,
}

#[derive(Serialize)]
struct RegionsOut<'a> {
    #[serde(flatten)]
    calculation: &'a Calculation,
    report: String,
}

fn usage() -> &'static str {
    "setviz-cli\n\
\n\
USAGE:\n\
  setviz-cli [report] <input>\n\
  setviz-cli regions [--pretty] <input>\n\
  setviz-cli layout [--pretty] [--config <path>] [--width <w>] [--height <h>] <input>\n\
  setviz-cli render [--format svg|png|jpg|pdf] [--scale <n>] [--background <css-color>] [--config <path>] [--width <w>] [--height <h>] [--id <diagram-id>] [--out <path>] <input>\n\
\n\
INPUT (either):\n\
  --sets 2|3 --op <operation> -a <text> -b <text> [-c <text>]\n\
  --input <path>|-        JSON: {\"setCount\": 2, \"operation\": \"Union\", \"sets\": [\"1,2\", \"2,3\"]}\n\
\n\
NOTES:\n\
  - Operations: Union, Intersection, Difference, Symmetric Difference.\n\
  - Set texts are comma separated; blanks and duplicates are dropped.\n\
  - Without --sets the count is 3 when -c is given, otherwise 2.\n\
  - render prints SVG to stdout by default; use --out to write a file.\n\
  - PNG/JPG/PDF output defaults to ./out.<ext>.\n\
  - Set SETVIZ_LOG (e.g. SETVIZ_LOG=debug) to log to stderr.\n\
"
}

fn parse_args(argv: &[String]) -> Result<Args, CliError> {
    let mut args = Args {
        render_scale: 1.0,
        ..Default::default()
    };

    let mut it = argv.iter().skip(1);
    while let Some(a) = it.next() {
        let mut value = || it.next().cloned().ok_or(CliError::Usage(usage()));
        match a.as_str() {
            "--help" | "-h" => return Err(CliError::Usage(usage())),
            "report" => args.command = Command::Report,
            "regions" => args.command = Command::Regions,
            "layout" => args.command = Command::Layout,
            "render" => args.command = Command::Render,
            "--pretty" => args.pretty = true,
            "--input" | "-i" => args.input = Some(value()?),
            "--config" => args.config = Some(value()?),
            "--sets" | "-n" => {
                args.set_count = Some(
                    value()?
                        .trim()
                        .parse::<usize>()
                        .map_err(|_| CliError::Usage(usage()))?,
                );
            }
            "--op" | "--operation" => args.operation = Some(value()?),
            "-a" | "--set-a" => args.raw_sets[0] = Some(value()?),
            "-b" | "--set-b" => args.raw_sets[1] = Some(value()?),
            "-c" | "--set-c" => args.raw_sets[2] = Some(value()?),
            "--format" => {
                args.render_format = value()?
                    .parse::<RenderFormat>()
                    .map_err(|_| CliError::Usage(usage()))?;
            }
            "--scale" => {
                args.render_scale = value()?
                    .parse::<f32>()
                    .map_err(|_| CliError::Usage(usage()))?;
                if !(args.render_scale.is_finite() && args.render_scale > 0.0) {
                    return Err(CliError::Usage(usage()));
                }
            }
            "--background" => {
                let bg = value()?;
                if !bg.trim().is_empty() {
                    args.background = Some(bg.trim().to_string());
                }
            }
            "--width" => {
                args.canvas_width =
                    Some(value()?.parse::<f64>().map_err(|_| CliError::Usage(usage()))?);
            }
            "--height" => {
                args.canvas_height =
                    Some(value()?.parse::<f64>().map_err(|_| CliError::Usage(usage()))?);
            }
            "--id" => args.diagram_id = Some(value()?),
            "--out" | "-o" => args.out = Some(value()?),
            _ => return Err(CliError::Usage(usage())),
        }
    }

    if args.input.is_none() && args.raw_sets.iter().all(Option::is_none) {
        return Err(CliError::Usage(usage()));
    }
    Ok(args)
}

fn read_input(input: &str) -> Result<String, CliError> {
    match input {
        "-" => {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf)?;
            Ok(buf)
        }
        path => Ok(std::fs::read_to_string(path)?),
    }
}

fn build_request(args: &Args) -> Result<CalculateRequest, CliError> {
    if let Some(input) = args.input.as_deref() {
        let mut req: CalculateRequest = serde_json::from_str(&read_input(input)?)?;
        if let Some(n) = args.set_count {
            req.set_count = n;
        }
        if let Some(op) = args.operation.as_deref() {
            req.operation = op.to_string();
        }
        return Ok(req);
    }

    let set_count = args
        .set_count
        .unwrap_or(if args.raw_sets[2].is_some() { 3 } else { 2 });
    // Sets the user left out are blank text, like an untouched input field.
    let raw_sets = args
        .raw_sets
        .iter()
        .take(set_count)
        .map(|s| s.clone().unwrap_or_default());

    Ok(CalculateRequest::new(
        set_count,
        args.operation.as_deref().unwrap_or("Union"),
        raw_sets,
    ))
}

fn build_layout_options(args: &Args) -> Result<LayoutOptions, CliError> {
    let mut config = VennConfig::default();
    if let Some(path) = args.config.as_deref() {
        config.deep_merge(VennConfig::from_json_str(&read_input(path)?)?.as_value());
    }
    if let Some(w) = args.canvas_width {
        config.set_value("canvas.width", serde_json::json!(w));
    }
    if let Some(h) = args.canvas_height {
        config.set_value("canvas.height", serde_json::json!(h));
    }
    Ok(LayoutOptions::from_config(&config)?)
}

fn write_json(value: &impl Serialize, pretty: bool) -> Result<(), CliError> {
    if pretty {
        serde_json::to_writer_pretty(std::io::stdout().lock(), value)?;
    } else {
        serde_json::to_writer(std::io::stdout().lock(), value)?;
    }
    println!();
    Ok(())
}

fn write_bytes(bytes: &[u8], out: Option<&str>, format: RenderFormat) -> Result<(), CliError> {
    let path = match out {
        Some(path) => std::path::PathBuf::from(path),
        None => std::path::PathBuf::from(format!("out.{}", format.extension())),
    };
    std::fs::write(&path, bytes)?;
    tracing::info!(path = %path.display(), bytes = bytes.len(), "wrote diagram");
    Ok(())
}

fn run(args: Args) -> Result<(), CliError> {
    let request = build_request(&args)?;
    tracing::debug!(?request, "calculate request");
    let calc = setviz::compute(&request)?;

    match args.command {
        Command::Report => {
            println!("{}", calc.report());
            Ok(())
        }
        Command::Regions => write_json(
            &RegionsOut {
                calculation: &calc,
                report: calc.report(),
            },
            args.pretty,
        ),
        Command::Layout => {
            let options = build_layout_options(&args)?;
            let layout = setviz::render::layout_calculation(&calc, &options)?;
            write_json(&layout, args.pretty)
        }
        Command::Render => {
            let options = build_layout_options(&args)?;
            let layout = setviz::render::layout_calculation(&calc, &options)?;
            // One background for both the SVG rect and the raster fill.
            let background = args.background.as_deref().unwrap_or("white");
            let svg_options = SvgRenderOptions {
                diagram_id: args.diagram_id.clone(),
                font_family: None,
                background: (!background.eq_ignore_ascii_case("transparent"))
                    .then(|| background.to_string()),
            };
            let svg = setviz::render::render_layout_svg(&layout, &svg_options);
            let raster_options = RasterOptions {
                scale: args.render_scale,
                background: Some(background.to_string()),
                ..Default::default()
            };

            match args.render_format {
                RenderFormat::Svg => match args.out.as_deref() {
                    None => {
                        println!("{svg}");
                        Ok(())
                    }
                    Some(path) => Ok(std::fs::write(path, svg)?),
                },
                RenderFormat::Png => write_bytes(
                    &raster::svg_to_png(&svg, &raster_options)?,
                    args.out.as_deref(),
                    args.render_format,
                ),
                RenderFormat::Jpeg => write_bytes(
                    &raster::svg_to_jpeg(&svg, &raster_options)?,
                    args.out.as_deref(),
                    args.render_format,
                ),
                RenderFormat::Pdf => write_bytes(
                    &raster::svg_to_pdf(&svg)?,
                    args.out.as_deref(),
                    args.render_format,
                ),
            }
        }
    }
}

fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_env("SETVIZ_LOG")
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

fn main() {
    init_tracing();

    let args = match parse_args(&std::env::args().collect::<Vec<_>>()) {
        Ok(v) => v,
        Err(CliError::Usage(msg)) => {
            eprintln!("{msg}");
            std::process::exit(2);
        }
        Err(err) => {
            eprintln!("{err}");
            std::process::exit(1);
        }
    };

    if let Err(err) = run(args) {
        eprintln!("{err}");
        std::process::exit(1);
    }
}
