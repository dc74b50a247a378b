//! CLI command definitions, routing, and tracing setup.

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use color_eyre::eyre::Result;
use llmsgen_core::{Generator, PostBuildContext};
use llmsgen_shared::{
    GenerationConfig, LlmsGenError, RouteNode, SiteMetadata, init_config, load_config,
};
use tracing::{info, warn};

// ---------------------------------------------------------------------------
// CLI structure
// ---------------------------------------------------------------------------

/// llmsgen: turn a documentation site into llms.txt exports.
#[derive(Parser)]
#[command(
    name = "llmsgen",
    version,
    about = "Generate llms.txt and llms-full.txt from a documentation site.",
    long_about = None,
)]
pub(crate) struct Cli {
    /// Log format: text (default) or json.
    #[arg(long, default_value = "text", global = true)]
    pub log_format: LogFormat,

    /// Verbosity level (-v, -vv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Site root: walked for documents and searched for llmsgen.toml.
    #[arg(long, default_value = ".", global = true)]
    pub site_dir: PathBuf,

    /// Explicit config file (overrides <site-dir>/llmsgen.toml).
    #[arg(long = "config", global = true)]
    pub config_file: Option<PathBuf>,

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
    /// Collect documents and write both exports.
    Generate(GenerateArgs),

    /// Configuration management.
    Config {
        /// Config subcommand.
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Host inputs for `generate`.
#[derive(clap::Args)]
pub(crate) struct GenerateArgs {
    /// Output directory (defaults to <site-dir>/build).
    #[arg(short, long)]
    pub out_dir: Option<PathBuf>,

    /// Route tree JSON (array of route nodes).
    #[arg(long)]
    pub routes: Option<PathBuf>,

    /// Site configuration JSON (title, tagline, url, baseUrl).
    #[arg(long)]
    pub site: Option<PathBuf>,

    /// Site title (overrides --site).
    #[arg(long)]
    pub title: Option<String>,

    /// Site tagline (overrides --site).
    #[arg(long)]
    pub tagline: Option<String>,

    /// Site URL (overrides --site).
    #[arg(long)]
    pub url: Option<String>,

    /// Site base path (overrides --site).
    #[arg(long)]
    pub base_url: Option<String>,

    /// Log every visited path and route.
    #[arg(long)]
    pub debug: bool,
}

/// Config subcommands.
#[derive(Subcommand)]
pub(crate) enum ConfigAction {
    /// Write a default llmsgen.toml into the site directory.
    Init,
    /// Show resolved configuration.
    Show,
}

// ---------------------------------------------------------------------------
// Config resolution
// ---------------------------------------------------------------------------

/// Load the config for this invocation; CLI flags win over the file.
pub(crate) fn resolve_config(cli: &Cli) -> Result<GenerationConfig> {
    let mut config = load_config(&cli.site_dir, cli.config_file.as_deref())?;

    if let Command::Generate(args) = &cli.command {
        config.debug |= args.debug;
    }

    Ok(config)
}

// ---------------------------------------------------------------------------
// Tracing setup
// ---------------------------------------------------------------------------

/// Initialize tracing from CLI flags and the config's `debug` switch.
pub(crate) fn init_tracing(cli: &Cli, debug: bool) {
    use tracing_subscriber::{EnvFilter, fmt};

    let filter = match (cli.verbose, debug) {
        (0, false) => "llmsgen=info",
        (0, true) | (1, _) => "llmsgen=debug",
        _ => "llmsgen=trace",
    };

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));

    match cli.log_format {
        LogFormat::Text => {
            fmt().with_env_filter(env_filter).with_target(false).init();
        }
        LogFormat::Json => {
            fmt().json().with_env_filter(env_filter).init();
        }
    }
}

// ---------------------------------------------------------------------------
// Command dispatch
// ---------------------------------------------------------------------------

/// Run the CLI command.
pub(crate) async fn run(cli: Cli, config: GenerationConfig) -> Result<()> {
    match &cli.command {
        Command::Generate(args) => cmd_generate(&cli.site_dir, args, config).await,
        Command::Config { action } => match action {
            ConfigAction::Init => cmd_config_init(&cli.site_dir),
            ConfigAction::Show => cmd_config_show(&config),
        },
    }
}

async fn cmd_generate(site_dir: &Path, args: &GenerateArgs, config: GenerationConfig) -> Result<()> {
    let routes = match &args.routes {
        Some(path) => read_routes(path).await?,
        None => Vec::new(),
    };
    let site = resolve_site(args).await?;

    let out_dir = args
        .out_dir
        .clone()
        .unwrap_or_else(|| site_dir.join("build"));

    info!(
        site_dir = %site_dir.display(),
        out_dir = %out_dir.display(),
        routes = routes.len(),
        "generating llms exports"
    );

    let generator = Generator::new(config)?;
    let ctx = PostBuildContext {
        routes: &routes,
        site: &site,
        out_dir: &out_dir,
    };
    let report = generator.generate(site_dir, ctx).await?;

    let names: Vec<&str> = report
        .artifacts
        .iter()
        .map(|a| a.filename.as_str())
        .collect();
    println!("Generated LLM files: {}", names.join(" and "));
    println!("  Documents: {}", report.document_count);
    println!("  Entries:   {}", report.entry_count);
    println!("  Output:    {}", out_dir.display());
    for artifact in &report.artifacts {
        println!(
            "  {}: {} bytes, sha256 {}",
            artifact.filename, artifact.size_bytes, artifact.sha256
        );
    }

    Ok(())
}

/// Parse the route tree file. Only invalid JSON is an error; an unexpected
/// shape just yields fewer routes.
async fn read_routes(path: &Path) -> Result<Vec<RouteNode>> {
    let content = tokio::fs::read_to_string(path)
        .await
        .map_err(|e| LlmsGenError::io(path, e))?;

    let value = serde_json::from_str::<serde_json::Value>(&content).map_err(|e| {
        LlmsGenError::parse(format!("invalid route tree {}: {e}", path.display()))
    })?;
    if !value.is_array() {
        warn!(path = %path.display(), "route tree is not an array; no routes used");
    }
    Ok(RouteNode::list_from_value(value))
}

/// Site metadata from `--site`, with individual flags layered on top.
async fn resolve_site(args: &GenerateArgs) -> Result<SiteMetadata> {
    let mut site = match &args.site {
        Some(path) => {
            let content = tokio::fs::read_to_string(path)
                .await
                .map_err(|e| LlmsGenError::io(path, e))?;
            serde_json::from_str::<SiteMetadata>(&content)
                .map_err(|e| {
                    LlmsGenError::parse(format!("invalid site config {}: {e}", path.display()))
                })?
        }
        None => SiteMetadata::default(),
    };

    if let Some(title) = &args.title {
        site.title = title.clone();
    }
    if let Some(tagline) = &args.tagline {
        site.tagline = Some(tagline.clone());
    }
    if let Some(url) = &args.url {
        site.url = url.clone();
    }
    if let Some(base_url) = &args.base_url {
        site.base_url = base_url.clone();
    }

    if site.title.trim().is_empty() {
        warn!("site title is empty; pass --site or --title to name the index");
    }

    Ok(site)
}

fn cmd_config_init(site_dir: &Path) -> Result<()> {
    let path = init_config(site_dir)?;
    println!("Config initialized at: {}", path.display());
    Ok(())
}

fn cmd_config_show(config: &GenerationConfig) -> Result<()> {
    let toml_str = toml::to_string_pretty(config)?;
    println!("{toml_str}");
    Ok(())
}
