use std::path::Path;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use federation_composition::CompositionError;
use federation_composition::CompositionOptions;
use federation_composition::CompositionOutput;
use federation_composition::Supergraph;
use federation_composition::compose_with_options;
use tracing::debug;
use tracing_subscriber::EnvFilter;

mod config;

use crate::config::SupergraphConfig;

/// CLI arguments. See <https://docs.rs/clap/latest/clap/_derive/index.html>
#[derive(Parser)]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(clap::Subcommand)]
enum Command {
    /// Composes the subgraphs listed in a supergraph config into a supergraph schema
    Compose {
        /// The path to the supergraph config file
        config: PathBuf,
        /// Print `{ "supergraphSdl": ..., "errors": [...] }` instead of plain text
        #[arg(long)]
        json: bool,
        /// Name of a validation rule to skip, e.g. `FieldArgumentDefaultsRule`
        #[arg(long = "disable-rule", value_name = "NAME")]
        disabled_rules: Vec<String>,
    },
}

fn main() -> anyhow::Result<ExitCode> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    match args.command {
        Command::Compose {
            config,
            json,
            disabled_rules,
        } => {
            let options = CompositionOptions { disabled_rules };
            let result = compose_config(&config, &options)?;
            println!("{}", render(&result, json)?);
            Ok(if result.is_ok() {
                ExitCode::SUCCESS
            } else {
                ExitCode::FAILURE
            })
        }
    }
}

fn compose_config(
    config_path: &Path,
    options: &CompositionOptions,
) -> anyhow::Result<Result<Supergraph, Vec<CompositionError>>> {
    let config = SupergraphConfig::read(config_path)?;
    debug!(subgraphs = config.subgraphs.len(), "loaded supergraph config");

    let mut subgraphs = Vec::with_capacity(config.subgraphs.len());
    let mut errors = Vec::new();
    for subgraph in config.load_subgraphs(config_path)? {
        match subgraph {
            Ok(subgraph) => subgraphs.push(subgraph),
            Err(error) => errors.push(error),
        }
    }
    if !errors.is_empty() {
        return Ok(Err(errors));
    }
    Ok(compose_with_options(subgraphs, options))
}

fn render(result: &Result<Supergraph, Vec<CompositionError>>, json: bool) -> anyhow::Result<String> {
    if json {
        return Ok(serde_json::to_string_pretty(&CompositionOutput::from(
            result,
        ))?);
    }
    Ok(match result {
        Ok(supergraph) => supergraph.supergraph_sdl().to_owned(),
        Err(errors) => errors
            .iter()
            .map(|error| format!("{}: {error}", error.code()))
            .collect::<Vec<_>>()
            .join("\n"),
    })
}
