//! CLI command definitions, routing, and tracing setup.

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use color_eyre::eyre::{Result, eyre};
use indicatif::{ProgressBar, ProgressStyle};
use sdkdocs_core::layout::RunEnv;
use sdkdocs_core::pipeline::{GenerateConfig, GenerateReport, ProgressReporter};
use sdkdocs_core::version::resolve_version;
use sdkdocs_shared::{AppConfig, CONFIG_FILE_NAME, init_config, load_config};
use tracing::info;

/// Default docs directory, relative to the working directory.
const DEFAULT_DOCS_DIR: &str = "docs";

// ---------------------------------------------------------------------------
// CLI structure
// ---------------------------------------------------------------------------

/// sdkdocs: Sphinx documentation sources for a Go SDK.
#[derive(Parser)]
#[command(
    name = "sdkdocs",
    version,
    about = "Generate Sphinx documentation sources from a Go SDK checkout.",
    long_about = None,
)]
pub(crate) struct Cli {
    /// Log format: text (default) or json.
    #[arg(long, default_value = "text", global = true)]
    pub log_format: LogFormat,

    /// Verbosity level (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Config file (defaults to ./sdkdocs.toml when present).
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

/// Log output format.
#[derive(Clone, Debug, clap::ValueEnum)]
pub(crate) enum LogFormat {
    Text,
    Json,
}

/// Top-level CLI subcommands.
#[derive(Subcommand)]
pub(crate) enum Command {
    /// Generate the documentation source tree.
    Generate {
        /// SDK checkout root (defaults to the parent of the docs directory).
        #[arg(long)]
        project_root: Option<PathBuf>,

        /// Docs directory that receives requirements.txt and the source tree.
        #[arg(long)]
        docs_dir: Option<PathBuf>,

        /// Do not install the Sphinx dependencies.
        #[arg(long)]
        skip_install: bool,

        /// Exit non-zero if any step degraded.
        #[arg(long)]
        strict: bool,

        /// Print the run report as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Print the documentation version that would be used.
    Version {
        /// Docs directory the version-control query runs in.
        #[arg(long)]
        docs_dir: Option<PathBuf>,
    },

    /// Configuration management.
    Config {
        /// Config subcommand.
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Config subcommands.
#[derive(Subcommand)]
pub(crate) enum ConfigAction {
    /// Initialize config file with defaults.
    Init,
    /// Show resolved configuration.
    Show,
}

// ---------------------------------------------------------------------------
// Tracing setup
// ---------------------------------------------------------------------------

/// Initialize tracing based on CLI flags.
pub(crate) fn init_tracing(cli: &Cli) {
    use tracing_subscriber::{EnvFilter, fmt};

    let filter = match cli.verbose {
        0 => "sdkdocs=info",
        1 => "sdkdocs=debug",
        _ => "sdkdocs=trace",
    };

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(filter));

    match cli.log_format {
        LogFormat::Text => {
            fmt()
                .with_env_filter(env_filter)
                .with_target(false)
                .with_writer(std::io::stderr)
                .init();
        }
        LogFormat::Json => {
            fmt()
                .json()
                .with_env_filter(env_filter)
                .with_writer(std::io::stderr)
                .init();
        }
    }
}

// ---------------------------------------------------------------------------
// Command dispatch
// ---------------------------------------------------------------------------

/// Run the CLI command.
pub(crate) async fn run(cli: Cli) -> Result<()> {
    let config_path = cli.config.as_deref();
    match cli.command {
        Command::Generate {
            project_root,
            docs_dir,
            skip_install,
            strict,
            json,
        } => {
            cmd_generate(
                config_path,
                project_root,
                docs_dir,
                skip_install,
                strict,
                json,
            )
            .await
        }
        Command::Version { docs_dir } => cmd_version(config_path, docs_dir).await,
        Command::Config { action } => match action {
            ConfigAction::Init => cmd_config_init(config_path).await,
            ConfigAction::Show => cmd_config_show(config_path).await,
        },
    }
}

/// Resolve the docs directory and project root, both absolute.
fn resolve_paths(
    cwd: &Path,
    project_root: Option<PathBuf>,
    docs_dir: Option<PathBuf>,
) -> (PathBuf, PathBuf) {
    let docs_dir = cwd.join(docs_dir.unwrap_or_else(|| PathBuf::from(DEFAULT_DOCS_DIR)));
    let project_root = match project_root {
        Some(root) => cwd.join(root),
        None => docs_dir
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| cwd.to_path_buf()),
    };
    (project_root, docs_dir)
}

// ---------------------------------------------------------------------------
// Command handlers
// ---------------------------------------------------------------------------

async fn cmd_generate(
    config_path: Option<&Path>,
    project_root: Option<PathBuf>,
    docs_dir: Option<PathBuf>,
    skip_install: bool,
    strict: bool,
    json: bool,
) -> Result<()> {
    let app = load_config(config_path)?;

    let cwd = std::env::current_dir()
        .map_err(|e| eyre!("cannot determine working directory: {e}"))?;
    let (project_root, docs_dir) = resolve_paths(&cwd, project_root, docs_dir);

    let config = GenerateConfig {
        app,
        project_root,
        docs_dir,
        env: RunEnv::from_process(),
        skip_install,
    };

    info!(
        project_root = %config.project_root.display(),
        docs_dir = %config.docs_dir.display(),
        skip_install,
        "generating documentation"
    );

    let reporter = CliProgress::new();
    let report = sdkdocs_core::pipeline::generate(&config, &reporter).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_summary(&report);
    }

    if strict && !report.is_clean() {
        return Err(eyre!(
            "{} step warning(s) recorded and --strict is set",
            report.warnings.len()
        ));
    }

    Ok(())
}

fn print_summary(report: &GenerateReport) {
    println!();
    println!("  Documentation generation completed");
    println!("  Version:   {}", report.version.version);
    println!("  Source:    {}", report.layout.source_dir.display());
    if let Some(output) = &report.layout.output_dir {
        println!("  Output:    {}", output.display());
    }
    println!("  Files:     {}", report.files.len());
    println!("  Warnings:  {}", report.warnings.len());
    println!(
        "  Time:      {:.1}s",
        report.elapsed_ms as f64 / 1000.0
    );
    for warning in &report.warnings {
        println!("    - [{}] {}", warning.step, warning.message);
    }
    println!();
}

async fn cmd_version(config_path: Option<&Path>, docs_dir: Option<PathBuf>) -> Result<()> {
    let app = load_config(config_path)?;
    let cwd = std::env::current_dir()?;
    let (_, docs_dir) = resolve_paths(&cwd, None, docs_dir);

    let resolved = resolve_version(
        &RunEnv::from_process(),
        &app.toolchain.vcs_tag,
        &docs_dir,
        &app.project.default_version,
    )
    .await;

    println!("{} ({:?})", resolved.version, resolved.source);
    Ok(())
}

async fn cmd_config_init(config_path: Option<&Path>) -> Result<()> {
    let path = config_path.unwrap_or(Path::new(CONFIG_FILE_NAME));
    let path = init_config(path)?;
    println!("Config initialized at: {}", path.display());
    Ok(())
}

async fn cmd_config_show(config_path: Option<&Path>) -> Result<()> {
    let config: AppConfig = load_config(config_path)?;
    let toml_str = toml::to_string_pretty(&config)?;
    println!("{toml_str}");
    Ok(())
}

// ---------------------------------------------------------------------------
// CLI progress reporter
// ---------------------------------------------------------------------------

/// CLI progress reporter using an indicatif spinner.
struct CliProgress {
    spinner: ProgressBar,
}

impl CliProgress {
    fn new() -> Self {
        let spinner = ProgressBar::new_spinner();
        let style = ProgressStyle::with_template("{spinner:.cyan} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
            .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"]);
        spinner.set_style(style);
        spinner.enable_steady_tick(std::time::Duration::from_millis(80));
        Self { spinner }
    }
}

impl ProgressReporter for CliProgress {
    fn phase(&self, name: &str) {
        self.spinner.set_message(name.to_string());
    }

    fn file_written(&self, path: &Path) {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        self.spinner.set_message(format!("Wrote {name}"));
    }

    fn done(&self, _report: &GenerateReport) {
        self.spinner.finish_and_clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn project_root_defaults_to_docs_parent() {
        let cwd = Path::new("/work/sdk");
        let (root, docs) = resolve_paths(cwd, None, None);
        assert_eq!(docs, PathBuf::from("/work/sdk/docs"));
        assert_eq!(root, PathBuf::from("/work/sdk"));
    }

    #[test]
    fn explicit_paths_win() {
        let cwd = Path::new("/work");
        let (root, docs) = resolve_paths(
            cwd,
            Some(PathBuf::from("mgc-sdk-go")),
            Some(PathBuf::from("/tmp/site")),
        );
        assert_eq!(root, PathBuf::from("/work/mgc-sdk-go"));
        assert_eq!(docs, PathBuf::from("/tmp/site"));
    }

    #[test]
    fn cli_parses_generate_flags() {
        let cli = Cli::parse_from([
            "sdkdocs",
            "-v",
            "generate",
            "--skip-install",
            "--strict",
            "--docs-dir",
            "site",
        ]);
        assert_eq!(cli.verbose, 1);
        match cli.command {
            Command::Generate {
                skip_install,
                strict,
                json,
                docs_dir,
                ..
            } => {
                assert!(skip_install && strict && !json);
                assert_eq!(docs_dir, Some(PathBuf::from("site")));
            }
            _ => panic!("expected generate"),
        }
    }
}
