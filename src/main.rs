use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use stubforge::model::DeclKind;
use stubforge::{Config, ReflectionDump, Registry, SidecarStore, StubGenerator, WriteOutcome};

#[derive(Parser, Debug)]
#[command(name = "stubforge")]
#[command(about = "Deterministic interface-stub generator for reflection dumps", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Generate sidecar stub files from reflection dumps
    Generate {
        /// Dump files, or directories to scan for *.json dumps
        #[arg(required = true)]
        paths: Vec<PathBuf>,

        /// Output directory (defaults to the configured out-dir, then to
        /// each dump's own directory)
        #[arg(short, long)]
        out_dir: Option<PathBuf>,

        /// Configuration file (defaults to ./stubforge.toml, then the
        /// user configuration directory)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Regenerate sidecars that already exist (delete-before-regenerate)
        #[arg(long)]
        force: bool,

        /// Only emit the declaration with this name or positional index
        #[arg(long)]
        only: Option<String>,
    },

    /// List the declarations found in reflection dumps
    List {
        /// Dump files, or directories to scan for *.json dumps
        #[arg(required = true)]
        paths: Vec<PathBuf>,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Generate {
            paths,
            out_dir,
            config,
            force,
            only,
        } => generate(&paths, out_dir.as_deref(), config.as_deref(), force, only.as_deref()),
        Commands::List { paths } => list(&paths),
    }
}

fn generate(
    paths: &[PathBuf],
    out_dir: Option<&Path>,
    config_path: Option<&Path>,
    force: bool,
    only: Option<&str>,
) -> Result<()> {
    let config = Config::load(config_path).context("failed to load configuration")?;
    let generator = StubGenerator::new();

    let dump_files = collect_dump_files(paths)?;
    if dump_files.is_empty() {
        bail!("no reflection dumps found under the given paths");
    }

    for dump_file in &dump_files {
        let dump = ReflectionDump::from_file(dump_file)
            .with_context(|| format!("failed to parse dump {}", dump_file.display()))?;
        let registry = Registry::from_dump(&dump);

        let text = match only {
            Some(selector) => {
                let name = resolve_selector(&registry, selector)
                    .with_context(|| format!("unknown declaration '{}'", selector))?;
                generator.single_stub(&dump, &config, &name)?
            }
            None => generator.module_stub(&dump, &config)?,
        };

        let target_dir = out_dir
            .map(Path::to_path_buf)
            .or_else(|| config.out_dir.clone())
            .or_else(|| dump_file.parent().map(Path::to_path_buf))
            .unwrap_or_else(|| PathBuf::from("."));
        let store = SidecarStore::new(target_dir);
        let stem = sidecar_stem(&dump, dump_file);

        if force {
            let path = store.refresh(&stem, &text)?;
            println!("refreshed {}", path.display());
        } else {
            match store.write_if_absent(&stem, &text)? {
                WriteOutcome::Written(path) => println!("wrote {}", path.display()),
                WriteOutcome::SkippedExisting(path) => {
                    println!("skipped {} (already present, use --force)", path.display())
                }
            }
        }
    }

    Ok(())
}

fn list(paths: &[PathBuf]) -> Result<()> {
    let dump_files = collect_dump_files(paths)?;
    if dump_files.is_empty() {
        bail!("no reflection dumps found under the given paths");
    }

    for dump_file in &dump_files {
        let dump = ReflectionDump::from_file(dump_file)
            .with_context(|| format!("failed to parse dump {}", dump_file.display()))?;
        let registry = Registry::from_dump(&dump);

        println!("{}:", dump_file.display());
        for index in 0..registry.len() {
            // Indices whose name was taken over by a later declaration
            // no longer resolve; skip them.
            if let Ok(name) = registry.name_at(index) {
                let kind = match registry.kind_at(index) {
                    DeclKind::Type => "type",
                    DeclKind::Function => "function",
                };
                println!("  {:>3}  {:<30} {}", index, name, kind);
            }
        }
    }

    Ok(())
}

/// Resolve a `--only` selector to a declaration name: a bare integer
/// selects by positional index, anything else is a display name
/// (validated through the registry so typos fail early).
fn resolve_selector(registry: &Registry, selector: &str) -> Result<String> {
    if let Ok(index) = selector.parse::<usize>() {
        return Ok(registry.name_at(index)?.to_string());
    }
    registry.index_of(selector)?;
    Ok(selector.to_string())
}

/// The sidecar stem for a dump: its recorded module name, falling back
/// to the dump file's own stem.
fn sidecar_stem(dump: &ReflectionDump, dump_file: &Path) -> String {
    dump.module.clone().unwrap_or_else(|| {
        dump_file
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .unwrap_or_else(|| "module".to_string())
    })
}

/// Collect dump files from the given paths: files are taken as-is,
/// directories are walked (honouring ignore files) for `*.json`.
fn collect_dump_files(paths: &[PathBuf]) -> Result<Vec<PathBuf>> {
    let mut found: Vec<PathBuf> = Vec::new();
    for path in paths {
        if path.is_dir() {
            for entry in ignore::WalkBuilder::new(path).build() {
                let entry = entry?;
                if entry.file_type().is_some_and(|t| t.is_file())
                    && entry.path().extension().is_some_and(|ext| ext == "json")
                {
                    found.push(entry.into_path());
                }
            }
        } else {
            found.push(path.clone());
        }
    }
    found.sort();
    found.dedup();
    Ok(found)
}
