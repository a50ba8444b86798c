//! `ptl` - resolve pipeline template inheritance chains

mod config;
mod logging;
mod output;

use anyhow::Context;
use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};
use config::Config;
use ptl_loader::{TemplateLoader, TemplateLoaderError};
use ptl_template::{TemplateFormat, TemplateSource, TemplateUri, UriError};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

const EXIT_RESOLUTION: u8 = 1;
const EXIT_CONFIG: u8 = 2;

fn cli() -> Command {
    let source_arg = Arg::new("source")
        .required(true)
        .help("Template URI (file://, http://, ...) or a path to a local template file");

    Command::new("ptl")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Resolve pipeline template inheritance chains")
        .subcommand_required(true)
        .arg(
            Arg::new("config")
                .long("config")
                .short('c')
                .global(true)
                .value_parser(value_parser!(PathBuf))
                .help("Path to a TOML configuration file"),
        )
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .short('v')
                .global(true)
                .action(ArgAction::Count)
                .help("Increase log verbosity (-v info, -vv debug, -vvv trace)"),
        )
        .subcommand(
            Command::new("resolve")
                .about("Print the resolved chain, root ancestor first")
                .arg(source_arg.clone())
                .arg(
                    Arg::new("format")
                        .long("format")
                        .short('f')
                        .value_parser(["yaml", "json"])
                        .help("Output format (overrides config)"),
                ),
        )
        .subcommand(
            Command::new("lineage")
                .about("Print one line per template: position, id, parent source")
                .arg(source_arg),
        )
}

/// Accept bare paths to existing files as a convenience for local use
fn normalize_source(raw: &str) -> String {
    match TemplateUri::parse(raw) {
        Err(UriError::MissingScheme { .. }) => Path::new(raw)
            .canonicalize()
            .ok()
            .and_then(TemplateUri::from_file_path)
            .map_or_else(|| raw.to_string(), |uri| uri.to_string()),
        _ => raw.to_string(),
    }
}

fn resolve(
    loader: &TemplateLoader,
    args: &ArgMatches,
) -> Result<Vec<ptl_template::PipelineTemplate>, TemplateLoaderError> {
    let raw = args
        .get_one::<String>("source")
        .map(String::as_str)
        .unwrap_or_default();
    let source = TemplateSource::new(normalize_source(raw));

    tracing::info!(source = %source, "Resolving pipeline template chain");
    loader.load_source(&source)
}

fn run(matches: &ArgMatches, config: &Config, loader: &TemplateLoader) -> anyhow::Result<ExitCode> {
    let outcome = match matches.subcommand() {
        Some(("resolve", args)) => {
            let format = match args.get_one::<String>("format") {
                Some(f) => f.parse::<TemplateFormat>().map_err(anyhow::Error::msg)?,
                None => config.output_format()?,
            };
            resolve(loader, args)
                .map(|chain| output::render_chain(&chain, format))
                .map(|rendered| rendered.context("failed to render chain"))
        }
        Some(("lineage", args)) => {
            resolve(loader, args).map(|chain| Ok(output::render_lineage(&chain)))
        }
        _ => unreachable!("subcommand is required"),
    };

    match outcome {
        Ok(rendered) => {
            print!("{}", rendered?);
            Ok(ExitCode::SUCCESS)
        }
        Err(e) => {
            use std::error::Error as _;

            tracing::error!(kind = ?e.kind(), source = e.offending_source(), "Resolution failed");
            eprintln!("error: {e}");
            let mut cause = e.source();
            while let Some(inner) = cause {
                eprintln!("  caused by: {inner}");
                cause = inner.source();
            }
            Ok(ExitCode::from(EXIT_RESOLUTION))
        }
    }
}

fn execute(matches: &ArgMatches) -> ExitCode {
    let setup = Config::load(matches.get_one::<PathBuf>("config").map(PathBuf::as_path))
        .and_then(|config| {
            let registry = config.registry().context("invalid loader configuration")?;
            Ok((config, TemplateLoader::new(registry)))
        });

    let (config, loader) = match setup {
        Ok(setup) => setup,
        Err(e) => {
            eprintln!("error: {e:#}");
            return ExitCode::from(EXIT_CONFIG);
        }
    };

    logging::init(&config.logging, matches.get_count("verbose"));
    tracing::debug!(loaders = ?loader.registry().names(), "Template loaders registered");

    match run(matches, &config, &loader) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("error: {e:#}");
            ExitCode::from(EXIT_CONFIG)
        }
    }
}

fn main() -> ExitCode {
    execute(&cli().get_matches())
}
