use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use pushdown::batch::{evaluate_definition, MachineReport};
use pushdown::report::{render_language, render_log};
use pushdown::{EngineConfig, TIMEOUT};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "pushdown", about = "Pushdown automaton simulator")]
struct Cli {
    /// Log at debug level unless RUST_LOG says otherwise.
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Evaluate one machine and print its log and accepted strings.
    Run {
        /// Machine definition file.
        machine: PathBuf,
        /// Candidate strings (one per line).
        strings: PathBuf,
        #[command(flatten)]
        engine: EngineArgs,
    },
    /// Evaluate every machine in a directory, writing `<name>.txt` and `<name>.log`.
    Batch {
        /// Directory holding machine definitions.
        dir: PathBuf,
        /// Candidate strings (one per line).
        strings: PathBuf,
        /// Output directory (default: `<dir>/results`).
        #[arg(long)]
        out: Option<PathBuf>,
        /// File-name suffix selecting machine definitions.
        #[arg(long, default_value = ".pda")]
        suffix: String,
        #[command(flatten)]
        engine: EngineArgs,
    },
}

#[derive(Args, Debug, Clone)]
struct EngineArgs {
    /// Maximum simulation steps per string.
    #[arg(long, default_value_t = TIMEOUT)]
    step_budget: usize,
    /// Only evaluate strings on machines classified DPDA.
    #[arg(long)]
    deterministic_only: bool,
    /// Evaluate strings in parallel.
    #[arg(long)]
    parallel: bool,
    /// Print the report as JSON.
    #[cfg(feature = "serde")]
    #[arg(long)]
    json: bool,
}

impl EngineArgs {
    fn config(&self) -> Result<EngineConfig> {
        let config = EngineConfig {
            step_budget: self.step_budget,
            require_deterministic: self.deterministic_only,
            parallel: self.parallel,
        };
        config.validate()?;
        Ok(config)
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Run {
            machine,
            strings,
            engine,
        } => run_machine(&machine, &strings, &engine)?,
        Commands::Batch {
            dir,
            strings,
            out,
            suffix,
            engine,
        } => {
            let out = out.unwrap_or_else(|| dir.join("results"));
            let written = run_batch(&dir, &strings, &out, &suffix, &engine.config()?)?;
            println!("{} machine(s) evaluated, results in {}", written, out.display());
        }
    }

    Ok(())
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run_machine(machine_path: &Path, strings_path: &Path, engine: &EngineArgs) -> Result<()> {
    let config = engine.config()?;
    let definition = fs::read_to_string(machine_path)
        .with_context(|| format!("failed to read machine from {}", machine_path.display()))?;
    let strings = read_strings(strings_path)?;

    let report = evaluate_definition(&definition, &strings, &config);
    print_report(&report, engine)
}

#[cfg(feature = "serde")]
fn print_report(report: &MachineReport, engine: &EngineArgs) -> Result<()> {
    if engine.json {
        println!(
            "{}",
            serde_json::to_string_pretty(report).context("failed to serialize report")?
        );
        return Ok(());
    }
    print_text(report);
    Ok(())
}

#[cfg(not(feature = "serde"))]
fn print_report(report: &MachineReport, _engine: &EngineArgs) -> Result<()> {
    print_text(report);
    Ok(())
}

fn print_text(report: &MachineReport) {
    print!("{}", render_log(report));
    if let Some(reason) = &report.invalid_reason {
        println!("Reason: {reason}");
    }
    for diagnostic in &report.diagnostics {
        println!("Diagnostic: {diagnostic}");
    }
    print!("{}", render_language(report));
}

/// Evaluate every `*<suffix>` file in `dir`, returning how many were written.
fn run_batch(
    dir: &Path,
    strings_path: &Path,
    out: &Path,
    suffix: &str,
    config: &EngineConfig,
) -> Result<usize> {
    let strings = read_strings(strings_path)?;
    let mut machines = machine_files(dir, suffix)?;
    machines.sort();

    fs::create_dir_all(out)
        .with_context(|| format!("failed to create output directory {}", out.display()))?;

    let mut written = 0;
    for path in machines {
        let definition = match fs::read_to_string(&path) {
            Ok(text) => text,
            Err(err) => {
                tracing::warn!(path = %path.display(), error = %err, "skipping unreadable machine");
                continue;
            }
        };

        let report = evaluate_definition(&definition, &strings, config);
        let stem = file_stem(&path, suffix);
        let language_path = out.join(format!("{stem}.txt"));
        let log_path = out.join(format!("{stem}.log"));

        fs::write(&language_path, render_language(&report))
            .with_context(|| format!("failed to write {}", language_path.display()))?;
        fs::write(&log_path, render_log(&report))
            .with_context(|| format!("failed to write {}", log_path.display()))?;
        written += 1;
    }

    Ok(written)
}

fn machine_files(dir: &Path, suffix: &str) -> Result<Vec<PathBuf>> {
    let entries = fs::read_dir(dir)
        .with_context(|| format!("failed to list machine directory {}", dir.display()))?;

    let mut files = Vec::new();
    for entry in entries {
        let path = entry?.path();
        let matches = path
            .file_name()
            .and_then(|name| name.to_str())
            .is_some_and(|name| name.ends_with(suffix));
        if matches && path.is_file() {
            files.push(path);
        }
    }
    Ok(files)
}

fn file_stem(path: &Path, suffix: &str) -> String {
    let name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();
    name.strip_suffix(suffix).unwrap_or(&name).to_string()
}

/// One candidate per line; only the line terminator is stripped.
fn read_strings(path: &Path) -> Result<Vec<String>> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("failed to read strings from {}", path.display()))?;
    Ok(contents.lines().map(str::to_string).collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_run_flags() {
        let cli = Cli::parse_from([
            "pushdown",
            "run",
            "m.pda",
            "strings.txt",
            "--step-budget",
            "50",
            "--deterministic-only",
        ]);

        let Commands::Run { engine, .. } = cli.command else {
            panic!("expected run command");
        };
        let config = engine.config().unwrap();
        assert_eq!(config.step_budget, 50);
        assert!(config.require_deterministic);
        assert!(!config.parallel);
    }

    #[test]
    fn rejects_zero_budget() {
        let cli = Cli::parse_from(["pushdown", "run", "m.pda", "s.txt", "--step-budget", "0"]);
        let Commands::Run { engine, .. } = cli.command else {
            panic!("expected run command");
        };
        assert!(engine.config().is_err());
    }

    #[test]
    fn batch_writes_language_and_log() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("push_pop.pda"), "{5}\n0,a,,1,x\n1,b,x,5,\n").unwrap();
        fs::write(dir.path().join("broken.pda"), "{5}\n0,a,,1000,x\n").unwrap();
        fs::write(dir.path().join("notes.md"), "not a machine").unwrap();
        let strings = dir.path().join("strings.txt");
        fs::write(&strings, "ab\nba\n\nab\n").unwrap();
        let out = dir.path().join("results");

        let written = run_batch(dir.path(), &strings, &out, ".pda", &EngineConfig::default()).unwrap();
        assert_eq!(written, 2);

        let log = fs::read_to_string(out.join("push_pop.log")).unwrap();
        assert!(log.starts_with("Valid: DPDA\n"));
        assert!(log.ends_with("Accepted Strings: 2 / 4\n"));
        assert_eq!(fs::read_to_string(out.join("push_pop.txt")).unwrap(), "ab\nab\n");

        let broken = fs::read_to_string(out.join("broken.log")).unwrap();
        assert!(broken.starts_with("Valid: INVALID\n"));
        assert!(!out.join("notes.txt").exists());
    }

    #[test]
    fn stem_strips_suffix() {
        assert_eq!(file_stem(Path::new("dir/m04.pda"), ".pda"), "m04");
        assert_eq!(file_stem(Path::new("dir/readme"), ".pda"), "readme");
    }
}
