mod graph;
mod map;
mod schema;

use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::{generate, Shell};
use std::io;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "er-relational")]
#[command(version)]
#[command(about = "Map Entity-Relationship models to relational schemas", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Map an ER model (JSON or YAML) to tables, keys and foreign keys
    Map {
        /// Input ER model (.json, .yaml or .yml)
        file: PathBuf,

        /// Output JSON file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// YAML config file
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Print a summary to stderr
        #[arg(long)]
        stats: bool,

        /// Print every table to stderr
        #[arg(short, long)]
        verbose: bool,
    },

    /// Render the relational schema of an ER model as a diagram
    Graph {
        /// Input ER model (.json, .yaml or .yml)
        file: PathBuf,

        /// Output file (default: stdout). Extension picks the format;
        /// .png/.svg/.pdf are rendered with Graphviz
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Output format: dot, mermaid, json
        #[arg(short, long)]
        format: Option<String>,

        /// Layout direction: lr, tb
        #[arg(long)]
        layout: Option<String>,

        /// Only include tables matching these glob patterns (comma-separated)
        #[arg(short, long)]
        tables: Option<String>,

        /// Exclude tables matching these glob patterns (comma-separated)
        #[arg(short, long)]
        exclude: Option<String>,

        /// Render DOT output to an image with Graphviz
        #[arg(long)]
        render: bool,

        /// YAML config file
        #[arg(short, long)]
        config: Option<PathBuf>,
    },

    /// Print JSON schemas for the model, config and JSON outputs
    Schema {
        /// Schema name (lists available names if omitted)
        name: Option<String>,

        /// Print every schema as one JSON object keyed by name
        #[arg(long, conflicts_with = "name")]
        all: bool,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

pub fn run(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Commands::Map {
            file,
            output,
            config,
            stats,
            verbose,
        } => map::run(file, output, config, stats, verbose),
        Commands::Graph {
            file,
            output,
            format,
            layout,
            tables,
            exclude,
            render,
            config,
        } => graph::run(file, output, format, layout, tables, exclude, render, config),
        Commands::Schema { name, all } => schema::run(name, all),
        Commands::Completions { shell } => {
            generate(
                shell,
                &mut Cli::command(),
                "er-relational",
                &mut io::stdout(),
            );
            Ok(())
        }
    }
}

/// Split a comma-separated CLI list, dropping empty entries
pub(crate) fn split_list(value: Option<String>) -> Vec<String> {
    value
        .map(|v| {
            v.split(',')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect()
        })
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_split_list() {
        assert_eq!(
            split_list(Some("a, b,,c ".to_string())),
            vec!["a", "b", "c"]
        );
        assert!(split_list(None).is_empty());
    }
}
