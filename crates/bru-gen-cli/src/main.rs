use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_complete::Shell;
use indexmap::IndexMap;

use bru_gen_bruno::{
    BrunoCollectionGenerator, CollectionConfig, GeneratedCollection, path_component,
};
use bru_gen_core::config::{self, BruGenConfig, CONFIG_FILE_NAME, ResolvedConfig};
use bru_gen_core::transform::{collect_operations, resolve_identity};
use bru_gen_core::{CodeGenerator, GeneratedFile, OpenApiDocument, parse};

#[derive(Parser)]
#[command(
    name = "bru-gen",
    about = "Generate a Bruno collection from an OpenAPI 3.x document",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a Bruno collection
    Generate(GenerateArgs),

    /// Validate an OpenAPI document
    Validate {
        /// Path to the OpenAPI document (JSON or YAML)
        #[arg(short, long)]
        input: PathBuf,
    },

    /// Show where every operation would be written, without writing anything
    Inspect {
        /// Path to the OpenAPI document (JSON or YAML)
        #[arg(short, long)]
        input: PathBuf,

        /// Config file (defaults to ./bru-gen.json when present)
        #[arg(long)]
        config: Option<PathBuf>,

        /// Output format
        #[arg(long, default_value = "yaml")]
        format: InspectFormat,
    },

    /// Write a default bru-gen.json
    Init {
        /// Overwrite an existing config file
        #[arg(long)]
        force: bool,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        shell: Shell,
    },
}

#[derive(Args, Default)]
struct GenerateArgs {
    /// Path to the OpenAPI document (JSON or YAML)
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// Directory the collection folder is created in
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Company name used in the collection name
    #[arg(short, long)]
    company: Option<String>,

    /// Environment to generate (repeatable, replaces the configured list)
    #[arg(short = 'e', long = "env", value_name = "ENV")]
    environments: Vec<String>,

    /// Base URL override for one environment
    #[arg(short = 'b', long = "base-url", value_name = "ENV=URL", value_parser = parse_base_url)]
    base_urls: Vec<(String, String)>,

    /// Config file to read instead of ./bru-gen.json
    #[arg(long)]
    config: Option<PathBuf>,
}

#[derive(Clone, ValueEnum)]
enum InspectFormat {
    Yaml,
    Json,
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Generate(args) => cmd_generate(args),

        Commands::Validate { input } => cmd_validate(input),

        Commands::Inspect {
            input,
            config,
            format,
        } => cmd_inspect(input, config, format),

        Commands::Init { force } => cmd_init(force),

        Commands::Completions { shell } => {
            let mut cmd = <Cli as clap::CommandFactory>::command();
            clap_complete::generate(shell, &mut cmd, "bru-gen", &mut std::io::stdout());
            Ok(())
        }
    }
}

/// Parse an `ENV=URL` pair.
fn parse_base_url(value: &str) -> Result<(String, String), String> {
    match value.split_once('=') {
        Some((env, url)) if !env.trim().is_empty() && !url.trim().is_empty() => {
            Ok((env.trim().to_string(), url.trim().to_string()))
        }
        _ => Err(format!("expected ENV=URL, got `{value}`")),
    }
}

/// Load an explicit config file, or `./bru-gen.json` if one exists.
fn load_file_config(path: Option<&Path>) -> Result<Option<BruGenConfig>> {
    match path {
        Some(path) => Ok(Some(
            config::load_config(path)?
                .with_context(|| format!("config file {} not found", path.display()))?,
        )),
        None => Ok(config::load_config(Path::new(CONFIG_FILE_NAME))?),
    }
}

/// Merge command-line flags over the config file, then apply defaults.
fn resolve_config(args: GenerateArgs) -> Result<ResolvedConfig> {
    let file_config = load_file_config(args.config.as_deref())?;

    let flags = BruGenConfig {
        input: args.input.map(|p| p.to_string_lossy().into_owned()),
        output: args.output.map(|p| p.to_string_lossy().into_owned()),
        company: args.company,
        environments: (!args.environments.is_empty()).then_some(args.environments),
        base_urls: (!args.base_urls.is_empty())
            .then(|| args.base_urls.into_iter().collect::<IndexMap<_, _>>()),
    };

    Ok(flags.merge(file_config.unwrap_or_default()).resolve())
}

fn load_document(path: &Path) -> Result<OpenApiDocument> {
    parse::from_path(path).with_context(|| format!("failed to load {}", path.display()))
}

/// Folder name for a collection. The API title must not be able to pick a
/// directory outside the output directory.
fn collection_dir_name(name: &str) -> String {
    path_component(name).unwrap_or_else(|| "collection".to_string())
}

/// Write generated files to disk under the given base directory.
fn write_files(base: &Path, files: &[GeneratedFile]) -> Result<()> {
    for file in files {
        let path = base.join(&file.path);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("failed to create directory {}", parent.display()))?;
        }
        fs::write(&path, &file.content)
            .with_context(|| format!("failed to write {}", path.display()))?;
        eprintln!("  wrote {}", path.display());
    }
    Ok(())
}

/// Generate and write the collection. Returns the collection directory.
fn run_generate(config: &ResolvedConfig) -> Result<PathBuf> {
    let document = load_document(&config.input)?;
    let collection = BrunoCollectionGenerator
        .generate(&document, &CollectionConfig::from(config))
        .with_context(|| format!("failed to generate a collection from {}", config.input.display()))?;

    let collection_dir = config.output.join(collection_dir_name(&collection.name));
    eprintln!("Generating {} → {}", collection.name, collection_dir.display());
    write_files(&collection_dir, &collection.files)?;

    print_stats(&collection);
    Ok(collection_dir)
}

fn print_stats(collection: &GeneratedCollection) {
    eprintln!(
        "Generated {} requests in {} groups",
        collection.stats.total_operations,
        collection.stats.groups.len()
    );
    for (group, count) in &collection.stats.groups {
        eprintln!("  {group}: {count}");
    }
    eprintln!("  environments: {}", collection.stats.environments.join(", "));
}

fn cmd_generate(args: GenerateArgs) -> Result<()> {
    let config = resolve_config(args)?;
    log::debug!("resolved config: {config:?}");
    run_generate(&config)?;
    Ok(())
}

fn cmd_validate(input: PathBuf) -> Result<()> {
    let document = load_document(&input)?;
    let spec = document.spec();

    eprintln!(
        "Valid OpenAPI {} document: {}",
        spec.openapi.as_deref().unwrap_or_default(),
        document.api_name()
    );
    eprintln!("  Version: {}", spec.info.version);
    eprintln!("  Paths: {}", spec.paths.len());

    let operations = collect_operations(&document)?;
    eprintln!("  Operations: {}", operations.len());

    eprintln!("Validation successful.");
    Ok(())
}

/// Collection settings for `inspect`: the config file with defaults applied.
/// Input and output paths are ignored.
fn inspect_config(path: Option<&Path>) -> Result<CollectionConfig> {
    let resolved = load_file_config(path)?.unwrap_or_default().resolve();
    Ok(CollectionConfig::from(&resolved))
}

fn cmd_inspect(input: PathBuf, config: Option<PathBuf>, format: InspectFormat) -> Result<()> {
    let document = load_document(&input)?;
    let summary = build_inspect_summary(&document, &inspect_config(config.as_deref())?)?;

    match format {
        InspectFormat::Yaml => {
            let yaml = serde_yaml_ng::to_string(&summary)?;
            print!("{}", yaml);
        }
        InspectFormat::Json => {
            let json = serde_json::to_string_pretty(&summary)?;
            println!("{}", json);
        }
    }

    Ok(())
}

fn build_inspect_summary(
    document: &OpenApiDocument,
    config: &CollectionConfig,
) -> Result<serde_json::Value> {
    let collection = BrunoCollectionGenerator.generate(document, config)?;

    // Names before collision suffixes, to make renames visible.
    let derived: Vec<String> = collect_operations(document)?
        .iter()
        .map(|op| resolve_identity(op).to_string())
        .collect();

    let requests: Vec<serde_json::Value> = collection
        .requests
        .iter()
        .zip(&derived)
        .map(|(request, derived)| {
            serde_json::json!({
                "method": request.method,
                "path": request.path,
                "file": request.file_path,
                "derived": derived,
                "summary": request.summary,
            })
        })
        .collect();

    Ok(serde_json::json!({
        "info": {
            "title": document.spec().info.title,
            "version": document.spec().info.version,
        },
        "collection": collection.name,
        "stats": collection.stats,
        "requests": requests,
    }))
}

fn cmd_init(force: bool) -> Result<()> {
    let config_path = PathBuf::from(CONFIG_FILE_NAME);

    if config_path.exists() && !force {
        anyhow::bail!(
            "{} already exists. Use --force to overwrite.",
            config_path.display()
        );
    }

    fs::write(&config_path, config::default_config_content())?;
    eprintln!("Created {}", config_path.display());
    Ok(())
}
