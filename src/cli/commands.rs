use std::fmt;
use std::io;

use clap::CommandFactory;
use clap_complete::generate;
use tracing::{debug, instrument};

use crate::application::{FamilyFile, FamilyService};
use crate::cli::args::{Cli, Commands, ConfigCommands, TreeSource};
use crate::cli::output;
use crate::cli::{CliError, CliResult};
use crate::config::{global_config_path, Settings};
use crate::domain::{PersonId, TreeListItem};
use crate::tree_traits::TreeNodeConvert;

pub fn execute_command(cli: &Cli) -> CliResult<()> {
    match &cli.command {
        Some(Commands::Tree { source }) => _tree(cli, source),
        Some(Commands::List {
            source,
            start_depth,
        }) => _list(cli, source, *start_depth),
        Some(Commands::Stats { source }) => _stats(cli, source),
        Some(Commands::Layout { source, connectors }) => _layout(cli, source, *connectors),
        Some(Commands::Config { command }) => _config(cli, command),
        Some(Commands::Completion { shell }) => {
            let mut cmd = Cli::command();
            generate(*shell, &mut cmd, "famtree", &mut io::stdout());
            Ok(())
        }
        None => Err(CliError::Usage(
            "no command given, run `famtree --help`".to_string(),
        )),
    }
}

fn load_settings(cli: &Cli) -> CliResult<Settings> {
    Ok(Settings::load(cli.config.as_deref())?)
}

/// Loads the family file and picks the root person.
fn open(cli: &Cli, source: &TreeSource) -> CliResult<(FamilyService<FamilyFile>, PersonId)> {
    let settings = load_settings(cli)?;
    let family = FamilyFile::load(&source.file)?;
    let root = match source.root {
        Some(id) => PersonId(id),
        None => family
            .progenitors()
            .first()
            .map(|p| p.id)
            .ok_or_else(|| {
                CliError::InvalidArgs(format!(
                    "{} has nobody without parents, pass --root",
                    source.file.display()
                ))
            })?,
    };
    debug!(%root, "selected root person");
    Ok((FamilyService::new(family, settings)?, root))
}

#[instrument(skip(cli))]
fn _tree(cli: &Cli, source: &TreeSource) -> CliResult<()> {
    let (service, root) = open(cli, source)?;
    let (tree, root_idx) = service.display_tree(root, source.max_depth)?;
    output::info(&tree.to_tree_string(root_idx)?);
    Ok(())
}

#[instrument(skip(cli))]
fn _list(cli: &Cli, source: &TreeSource, start_depth: i64) -> CliResult<()> {
    let (service, root) = open(cli, source)?;
    let items = service.pre_order(root, start_depth, source.max_depth)?;
    // The root comes first and sits at the start depth
    let base = items.first().map_or(0, |item| item.depth());
    for item in &items {
        output::info(&list_line(item, base));
    }
    Ok(())
}

/// One `list` row, indented by the depth below the listed root.
fn list_line<T: fmt::Display>(item: &TreeListItem<T>, base: usize) -> String {
    format!(
        "{}{} [{}]",
        "  ".repeat(item.depth().saturating_sub(base)),
        item.data(),
        item.depth()
    )
}

#[instrument(skip(cli))]
fn _stats(cli: &Cli, source: &TreeSource) -> CliResult<()> {
    let (service, root) = open(cli, source)?;
    let stats = service.stats(root, source.max_depth)?;
    output::header(&format!("Descendants of person {root}"));
    output::detail(&format!("people:      {}", stats.people));
    output::detail(&format!("generations: {}", stats.height));
    output::detail(&format!("leaves:      {}", stats.leaves));
    if let Some(depth) = stats.max_depth {
        output::header(&format!("Cut at depth {depth}"));
        output::detail(&format!("generations: {}", stats.displayed_height));
        output::detail(&format!("leaves:      {}", stats.displayed_leaves));
    }
    Ok(())
}

#[instrument(skip(cli))]
fn _layout(cli: &Cli, source: &TreeSource, connectors: bool) -> CliResult<()> {
    let (service, root) = open(cli, source)?;
    let (tree, layout) = service.layout(root, source.max_depth)?;
    let canvas = layout.canvas();
    output::header(&format!(
        "canvas {:.1} x {:.1} ({} leaves, {} levels)",
        canvas.width,
        canvas.height,
        layout.leaf_count(),
        layout.height()
    ));
    for p in layout.placements() {
        let name = tree
            .get(p.id)
            .map(|n| n.data.full_name())
            .unwrap_or_default();
        output::info(&format!(
            "{}{}: box ({:.1}, {:.1}) band [{:.1}, {:.1})",
            "  ".repeat(p.depth),
            name,
            p.rect.x,
            p.rect.y,
            p.band.left,
            p.band.right
        ));
    }
    if connectors {
        output::header("connectors");
        for c in layout.connectors() {
            output::detail(&format!(
                "({:.1}, {:.1}) -> ({:.1}, {:.1})",
                c.from.x, c.from.y, c.to.x, c.to.y
            ));
        }
    }
    Ok(())
}

fn _config(cli: &Cli, command: &ConfigCommands) -> CliResult<()> {
    match command {
        ConfigCommands::Show => {
            let settings = load_settings(cli)?;
            output::info(&settings.to_toml()?);
        }
        ConfigCommands::Path => match global_config_path() {
            Some(path) => output::action("global config", &path.display()),
            None => output::warning("no home directory, global config disabled"),
        },
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn given_huge_start_depth_then_rows_are_indented_from_the_root() {
        let base = i64::MAX as usize;
        let root = TreeListItem::new("Eliza", i64::MAX).unwrap();
        let child = TreeListItem::at("Tom", base + 1);
        assert_eq!(list_line(&root, base), format!("Eliza [{base}]"));
        assert_eq!(list_line(&child, base), format!("  Tom [{}]", base + 1));
    }
}
