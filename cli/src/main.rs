use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand, ValueEnum};
use rand::SeedableRng;
use rand::rngs::StdRng;
use rosterchart::avatar::AvatarGenerator;
use rosterchart::chart::format_score;
use rosterchart::codec::{self, CodecError};
use rosterchart::config::{AppConfig, ConfigError};
use rosterchart::consts::DEMO_ROSTER_SIZE;
use rosterchart::engine::EngineCore;
use rosterchart::sort::{SortDirection, SortKey, SortSpec};
use tracing_subscriber::EnvFilter;


#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("failed to read {path}: {source}")]
    Read { path: String, source: io::Error },
    #[error("failed to write {path}: {source}")]
    Write { path: String, source: io::Error },
    #[error("{path} rejected: {source}")]
    Import { path: String, source: CodecError },
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),
    #[error("invalid JSON payload: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Parser, Debug)]
#[command(name = "roster", about = "Student roster CSV tool")]
struct Cli {
    /// Avatar service for students without a photo (overrides `ROSTER_AVATAR_BASE_URL`).
    #[arg(long)]
    avatar_base_url: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Validate a roster file and report how many students it holds.
    Check {
        #[arg(default_value = "-", help = "Input file path, or - for stdin")]
        input: String,
    },
    /// Print the roster as a table.
    List {
        #[arg(default_value = "-", help = "Input file path, or - for stdin")]
        input: String,
        #[arg(long, value_enum)]
        sort: Option<SortArg>,
        #[arg(long, default_value_t = false)]
        desc: bool,
        #[arg(long, default_value_t = false, help = "Print chart-ready JSON (in sort order) instead of a table")]
        json: bool,
    },
    /// Re-export a roster with defaults filled in and means recomputed.
    Normalize {
        #[arg(default_value = "-", help = "Input file path, or - for stdin")]
        input: String,
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Append a student to a roster file in place.
    Add {
        file: PathBuf,
        #[arg(long)]
        name: String,
        #[arg(long)]
        photo: Option<String>,
    },
    /// Write a random demo roster.
    Demo {
        #[arg(long, default_value_t = DEMO_ROSTER_SIZE)]
        count: usize,
        #[arg(long)]
        seed: Option<u64>,
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum SortArg {
    Id,
    Name,
    Score,
}

impl From<SortArg> for SortKey {
    fn from(arg: SortArg) -> Self {
        match arg {
            SortArg::Id => Self::Id,
            SortArg::Name => Self::Name,
            SortArg::Score => Self::Score,
        }
    }
}

fn main() -> Result<(), CliError> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    let mut config = AppConfig::from_env()?;
    if let Some(url) = cli.avatar_base_url.as_deref() {
        config.avatars = AvatarGenerator::new(url)?;
    }

    let output = run(config, cli.command)?;
    if !output.is_empty() {
        println!("{output}");
    }
    Ok(())
}

/// Execute one command. Returns text for stdout (empty when everything was written to a file).
fn run(config: AppConfig, command: Command) -> Result<String, CliError> {
    let mut core = EngineCore::with_config(config);
    match command {
        Command::Check { input } => {
            load(&mut core, &input)?;
            Ok(format!("{input}: {} students", core.students().len()))
        }
        Command::List { input, sort, desc, json } => {
            load(&mut core, &input)?;
            let direction = if desc { SortDirection::Desc } else { SortDirection::Asc };
            core.sort = sort.map(|key| SortSpec::new(key.into(), direction));
            if json {
                return Ok(serde_json::to_string_pretty(&core.sorted_snapshot())?);
            }
            Ok(render_table(&core))
        }
        Command::Normalize { input, output } => {
            load(&mut core, &input)?;
            emit(output.as_deref(), &core.export_csv())
        }
        Command::Add { file, name, photo } => {
            let path = file.to_string_lossy().into_owned();
            load(&mut core, &path)?;
            core.add_student(&name, photo.as_deref());
            emit(Some(&file), &core.export_csv())
        }
        Command::Demo { count, seed, output } => {
            match seed {
                Some(seed) => core.load_demo(count, &mut StdRng::seed_from_u64(seed)),
                None => core.load_demo(count, &mut rand::rng()),
            };
            emit(output.as_deref(), &core.export_csv())
        }
    }
}

/// Import `input` (a path, or `-` for stdin) into `core`, replacing its roster.
fn load(core: &mut EngineCore, input: &str) -> Result<(), CliError> {
    let text = if input == "-" {
        let mut buf = String::new();
        io::stdin()
            .read_to_string(&mut buf)
            .map_err(|source| CliError::Read { path: "stdin".into(), source })?;
        buf
    } else {
        fs::read_to_string(input).map_err(|source| CliError::Read { path: input.into(), source })?
    };
    let students =
        codec::import(&text, &core.avatars).map_err(|source| CliError::Import { path: input.into(), source })?;
    let count = core.roster.replace(students);
    tracing::info!(%input, count, "roster loaded");
    Ok(())
}

/// Write `csv` to `output`, or hand it back for stdout when no path is given.
fn emit(output: Option<&Path>, csv: &str) -> Result<String, CliError> {
    let Some(path) = output else {
        return Ok(csv.to_string());
    };
    fs::write(path, format!("{csv}\n"))
        .map_err(|source| CliError::Write { path: path.display().to_string(), source })?;
    tracing::info!(path = %path.display(), "roster written");
    Ok(String::new())
}

fn render_table(core: &EngineCore) -> String {
    let header = format!(
        "{:>6}  {:<24}  {:>8} {}  {:>6}",
        "ID",
        "NAME",
        "SCORE",
        core.sort_indicator(SortKey::Score),
        "MEAN"
    );
    let mut lines = vec![header];
    for s in core.sorted_students() {
        lines.push(format!("{:>6}  {:<24}  {:>10}  {:>6}", s.id, s.name, format_score(s.scores.y), s.mean_score()));
    }
    lines.join("\n")
}
