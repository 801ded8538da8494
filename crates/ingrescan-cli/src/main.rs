mod display;

use std::io::Read;
use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Parser, Subcommand};
use ingrescan_ai::anthropic::{DEFAULT_BASE_URL, DEFAULT_MAX_TOKENS, DEFAULT_MODEL};
use ingrescan_ai::{AnthropicClient, Analyzer, NormalizedImage, acquire};
use ingrescan_core::{AnalysisReport, AnalysisSession, BarChart, ImageRef, prompt};

#[derive(Parser, Debug)]
#[command(name = "ingrescan", version, about = "Analyze product photos into structured ingredient reports")]
struct Cli {
    #[arg(long, global = true, help = "Output the report as JSON")]
    json: bool,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Normalize an image, send it for analysis, and print the report.
    Analyze {
        /// Image file path or http(s) URL.
        source: String,
        #[arg(long, help = "Write the score chart as SVG to this path")]
        chart: Option<PathBuf>,
        #[arg(long, env = "ANTHROPIC_API_KEY", hide_env_values = true)]
        api_key: String,
        #[arg(long, env = "INGRESCAN_MODEL", default_value = DEFAULT_MODEL)]
        model: String,
        #[arg(long, env = "INGRESCAN_API_URL", default_value = DEFAULT_BASE_URL)]
        api_url: String,
        #[arg(long, env = "INGRESCAN_MAX_TOKENS", default_value_t = DEFAULT_MAX_TOKENS)]
        max_tokens: u32,
    },
    /// Extract a report from saved inference text (`-` reads stdin).
    Parse {
        input: PathBuf,
        #[arg(long, help = "Write the score chart as SVG to this path")]
        chart: Option<PathBuf>,
    },
    /// Normalize an image and write it as JPEG without analyzing it.
    Normalize {
        image: PathBuf,
        #[arg(long)]
        out: PathBuf,
    },
    /// Print the instruction sent with each image.
    Prompt,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt().with_writer(std::io::stderr).init();
    tracing::debug!("ingrescan v{}", env!("CARGO_PKG_VERSION"));

    let cli = Cli::parse();
    match cli.command {
        Commands::Analyze {
            source,
            chart,
            api_key,
            model,
            api_url,
            max_tokens,
        } => {
            let client = AnthropicClient::new(api_url, api_key, model).with_max_tokens(max_tokens);
            let analyzer = Analyzer::new(client);
            let mut session = AnalysisSession::new();

            let report = analyzer
                .run(&mut session, image_ref(&source))
                .await
                .with_context(|| format!("could not analyze {source}"))?;
            emit(&report, cli.json, chart.as_deref())?;
        }
        Commands::Parse { input, chart } => {
            let raw = read_input(&input)?;
            let report = AnalysisReport::from_raw(raw);
            emit(&report, cli.json, chart.as_deref())?;
        }
        Commands::Normalize { image, out } => {
            let loaded = acquire::load_image(&image)
                .with_context(|| format!("could not open {}", image.display()))?;
            let staged = NormalizedImage::prepare(loaded).context("normalizing image")?;
            std::fs::copy(staged.path(), &out)
                .with_context(|| format!("writing {}", out.display()))?;
            let (w, h) = staged.dimensions();
            eprintln!("  Wrote {w}x{h} JPEG to {}", out.display());
        }
        Commands::Prompt => {
            println!("{}", prompt::analysis_instructions());
        }
    }
    Ok(())
}

fn image_ref(source: &str) -> ImageRef {
    if source.starts_with("http://") || source.starts_with("https://") {
        ImageRef::Url(source.to_string())
    } else {
        ImageRef::Path(PathBuf::from(source))
    }
}

fn read_input(input: &Path) -> anyhow::Result<String> {
    if input == Path::new("-") {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .context("reading report from stdin")?;
        Ok(buf)
    } else {
        std::fs::read_to_string(input).with_context(|| format!("reading {}", input.display()))
    }
}

/// Print the report and, when there are scores, write the chart.
fn emit(report: &AnalysisReport, json: bool, chart: Option<&Path>) -> anyhow::Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(report)?);
    } else {
        display::print_report(report);
    }

    if let Some(path) = chart {
        if report.parameter_scores.is_empty() {
            tracing::warn!("no parameter scores found, chart not written");
        } else {
            let svg = BarChart::from_scores(&report.parameter_scores).to_svg();
            std::fs::write(path, svg).with_context(|| format!("writing {}", path.display()))?;
            tracing::info!(path = %path.display(), "wrote score chart");
        }
    }
    Ok(())
}
