use std::io::Read;
use std::process::ExitCode;

use anyhow::Context;
use colored::Colorize;
use deepmap_diff::{collect_changes, ChangeNode, Changes, MapOptions, Mapper};
use deepmap_value::Value;
use serde_json::json;

use crate::cli::*;
use crate::config::CliConfig;
use crate::render;

/// Exit status when the run succeeded and, for `check`, nothing changed.
pub const EXIT_CLEAN: u8 = 0;
/// Exit status when `check` found a change.
pub const EXIT_DIRTY: u8 = 1;
/// Exit status when the run failed (unreadable input, bad JSON, bad config).
pub const EXIT_ERROR: u8 = 2;

/// Run one command and map its outcome to an exit status. Errors are
/// reported on stderr and never share a status with "changed".
pub fn run_command(cli: Cli) -> ExitCode {
    ExitCode::from(exit_status(&execute(cli)))
}

fn exit_status(outcome: &anyhow::Result<bool>) -> u8 {
    match outcome {
        Ok(false) => EXIT_CLEAN,
        Ok(true) => EXIT_DIRTY,
        Err(err) => {
            tracing::debug!(error = ?err, "command failed");
            eprintln!("error: {err:#}");
            EXIT_ERROR
        }
    }
}

fn execute(cli: Cli) -> anyhow::Result<bool> {
    let config = CliConfig::load(cli.config.as_deref())?;
    if !config.color {
        colored::control::set_override(false);
    }
    let (output, dirty) = match cli.command {
        Command::Diff(args) => (cmd_diff(&config, &cli.format, args)?, false),
        Command::Changes(args) => (cmd_changes(&config, &cli.format, args)?, false),
        Command::Check(args) => cmd_check(&config, &cli.format, args)?,
    };
    print!("{output}");
    Ok(dirty)
}

fn mapper_for(config: &CliConfig, pair: &PairArgs) -> Mapper {
    if pair.iterative {
        Mapper::new(MapOptions::iterative())
    } else {
        Mapper::new(config.map.clone())
    }
}

fn read_value(source: &str) -> anyhow::Result<Value> {
    let text = if source == "-" {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .context("reading standard input")?;
        buf
    } else {
        std::fs::read_to_string(source).with_context(|| format!("reading {source}"))?
    };
    Value::from_json_str(&text).with_context(|| format!("parsing {source}"))
}

fn read_pair(pair: &PairArgs) -> anyhow::Result<(Value, Value)> {
    anyhow::ensure!(
        !(pair.left == "-" && pair.right == "-"),
        "only one input can be read from standard input"
    );
    Ok((read_value(&pair.left)?, read_value(&pair.right)?))
}

fn cmd_diff(config: &CliConfig, format: &OutputFormat, args: DiffArgs) -> anyhow::Result<String> {
    let (left, right) = read_pair(&args.pair)?;
    let tree = mapper_for(config, &args.pair).map(&left, &right)?;
    // A bare leaf comparison stays as is; pruning only applies to containers.
    let tree = match tree {
        ChangeNode::Container(_) if args.changed_only || config.changed_only => {
            tree.changed_only().unwrap_or_default()
        }
        tree => tree,
    };
    Ok(match format {
        OutputFormat::Json => format!("{}\n", serde_json::to_string_pretty(&tree)?),
        OutputFormat::Text => {
            let summary = tree.summary();
            format!(
                "{}{} created, {} updated, {} deleted, {} unchanged\n",
                render::tree(&tree),
                summary.created.to_string().green(),
                summary.updated.to_string().yellow(),
                summary.deleted.to_string().red(),
                summary.unchanged,
            )
        }
    })
}

fn cmd_changes(config: &CliConfig, format: &OutputFormat, args: PairArgs) -> anyhow::Result<String> {
    let (left, right) = read_pair(&args)?;
    let records = collect_changes(&mapper_for(config, &args).map(&left, &right)?);
    Ok(match format {
        OutputFormat::Json => format!("{}\n", serde_json::to_string_pretty(&records)?),
        OutputFormat::Text if records.is_empty() => "No changes.\n".to_string(),
        OutputFormat::Text => render::records(&records),
    })
}

fn cmd_check(
    config: &CliConfig,
    format: &OutputFormat,
    args: CheckArgs,
) -> anyhow::Result<(String, bool)> {
    let (left, right) = read_pair(&args.pair)?;
    let changes = mapper_for(config, &args.pair).get_changes(&left, &right)?;
    let changed = if args.legacy {
        changes.is_legacy_changed()
    } else {
        changes.is_changed()
    };
    let first = match &changes {
        Changes::First { key, .. } => Some(key.to_string()),
        _ => None,
    };
    let output = match format {
        OutputFormat::Json => format!("{}\n", json!({ "changed": changed, "first": first })),
        OutputFormat::Text => match (changed, first) {
            (true, Some(key)) => format!("{} first change under {}\n", "changed:".yellow().bold(), key.bold()),
            (true, None) => format!("{}\n", "changed".yellow().bold()),
            (false, _) => format!("{}\n", "unchanged".green()),
        },
    };
    Ok((output, changed))
}
