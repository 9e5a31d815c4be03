use std::path::{Path, PathBuf};
use std::process;

use clap::{Parser, Subcommand};

use boardreport_pdf::progress::ProgressEvent;
use boardreport_pdf::{
    ContingencyPlan, Error, GenerateOptions, ProgressSink, RenderConfig, RenderedReport,
    ReportData, generate_board_report, generate_contingency_plan, write_report,
};

#[derive(Parser, Debug)]
#[command(name = "boardreport-pdf", version, about = "Render board reports and contingency plans as PDF")]
struct Cli {
    #[arg(short, long, global = true, default_value = ".", help = "Directory to write the PDF into")]
    output: PathBuf,
    #[arg(long, global = true, help = "TrueType font for body text (overrides BOARDREPORT_FONT)")]
    font: Option<PathBuf>,
    #[arg(long, global = true, help = "TrueType font for bold text (overrides BOARDREPORT_BOLD_FONT)")]
    bold_font: Option<PathBuf>,
    #[arg(short, long, global = true, help = "Only print warnings and errors")]
    quiet: bool,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Board report from a ReportData JSON snapshot
    Board { input: PathBuf },
    /// Contingency plan from a ContingencyPlan JSON document
    Contingency {
        input: PathBuf,
        #[arg(long, help = "Render only this section (title or slug)")]
        section: Option<String>,
    },
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T, Error> {
    let text = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&text)?)
}

fn run(cli: Cli) -> Result<PathBuf, Error> {
    let mut config = RenderConfig::from_env();
    if cli.font.is_some() {
        config.fonts.regular = cli.font;
    }
    if cli.bold_font.is_some() {
        config.fonts.bold = cli.bold_font;
    }

    let quiet = cli.quiet;
    let mut print = |event: ProgressEvent| {
        if !quiet {
            eprintln!("[{:>3}%] {}", event.percent, event.message);
        }
    };
    let mut options = GenerateOptions::with_progress(&mut print as &mut dyn ProgressSink);

    let rendered: RenderedReport = match &cli.command {
        Commands::Board { input } => {
            let data: ReportData = read_json(input)?;
            generate_board_report(&data, &config, &mut options)?
        }
        Commands::Contingency { input, section } => {
            let plan: ContingencyPlan = read_json(input)?;
            generate_contingency_plan(&plan, section.as_deref(), &config, &mut options)?
        }
    };
    write_report(&rendered, &cli.output)
}

fn main() {
    let cli = Cli::parse();
    let default_level = if cli.quiet { "warn" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level)).init();

    match run(cli) {
        Ok(path) => println!("{}", path.display()),
        Err(e) => {
            eprintln!("Error: {e}");
            process::exit(1);
        }
    }
}
