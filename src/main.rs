use anyhow::{Context, Result};
use armory_patcher::config::{self, Settings};
use armory_patcher::driver::{run_patch, PatchReport};
use armory_patcher::rules::{DESCRIPTION_RULES, NAME_RULES};
use armory_patcher::store::{snapshot, PatchMod};
use clap::{Parser, Subcommand};
use colored::Colorize;
use similar::{ChangeTag, TextDiff};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "armory-patcher")]
#[command(about = "Renames Heavy Armory weapons and rewrites perk descriptions", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the patch against a load-order snapshot
    Apply {
        /// JSON snapshot of the load order
        #[arg(short, long)]
        data: PathBuf,

        /// Settings file (defaults apply when omitted)
        #[arg(short, long)]
        settings: Option<PathBuf>,

        /// Where to write the override patch
        #[arg(short, long, default_value = "armory-patch.json")]
        out: PathBuf,

        /// Dry run - report changes without writing the patch file
        #[arg(short = 'n', long)]
        dry_run: bool,

        /// Show unified diffs of rewritten descriptions
        #[arg(long)]
        diff: bool,
    },

    /// List the substitution tables
    Rules,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Apply {
            data,
            settings,
            out,
            dry_run,
            diff,
        } => cmd_apply(data, settings, out, dry_run, diff),

        Commands::Rules => cmd_rules(),
    }
}

fn load_settings(path: Option<PathBuf>) -> Result<Settings> {
    match path {
        Some(path) => {
            let settings = config::load_from_path(&path)
                .with_context(|| format!("settings file {}", path.display()))?;
            Ok(settings)
        }
        None => Ok(Settings::default()),
    }
}

fn cmd_apply(
    data: PathBuf,
    settings: Option<PathBuf>,
    out: PathBuf,
    dry_run: bool,
    show_diff: bool,
) -> Result<()> {
    let settings = load_settings(settings)?;
    let load_order = snapshot::load_snapshot(&data)
        .with_context(|| format!("load-order snapshot {}", data.display()))?;

    println!("Snapshot: {}", data.display());
    println!("Target plugins: {}", settings.target_plugins.join(", "));
    println!();

    let mut patch = PatchMod::new();
    let report = run_patch(&load_order, &mut patch, &settings)
        .context("error while processing records")?;

    render_report(&report, show_diff);

    if dry_run {
        println!(
            "{}",
            "[DRY RUN - no patch file written]".cyan()
        );
        return Ok(());
    }

    if patch.is_empty() {
        println!("{}", "Nothing changed; no patch file written.".yellow());
        return Ok(());
    }

    snapshot::write_patch(&out, &patch)
        .with_context(|| format!("writing patch {}", out.display()))?;
    println!("Patch written to {}", out.display());

    Ok(())
}

fn render_report(report: &PatchReport, show_diff: bool) {
    for plugin in &report.missing_plugins {
        eprintln!(
            "{}",
            format!("Warning: plugin not found in load order: {plugin}").yellow()
        );
    }
    if !report.missing_plugins.is_empty() {
        eprintln!();
    }

    for rename in &report.renames {
        let label = rename
            .editor_id
            .clone()
            .unwrap_or_else(|| rename.form.to_string());
        println!(
            "{} {}: {} -> {}",
            "✓".green(),
            label,
            rename.old,
            rename.new.bold()
        );
    }

    for update in &report.description_updates {
        let label = update
            .editor_id
            .clone()
            .unwrap_or_else(|| update.form.to_string());
        println!("{} {}: description updated", "✓".green(), label);
        if show_diff {
            display_diff(&update.old, &update.new);
        }
    }

    for skipped in &report.skipped_perks {
        println!(
            "{} {}: skipped ({})",
            "⊘".cyan(),
            skipped.form,
            skipped.reason.dimmed()
        );
    }

    println!();
    println!("{}", "Summary:".bold());
    println!(
        "  {} weapons renamed",
        format!("{}", report.weapons_renamed()).green()
    );
    println!(
        "  {} perk descriptions updated",
        format!("{}", report.perks_updated()).green()
    );
    if !report.skipped_perks.is_empty() {
        println!(
            "  {} perks skipped",
            format!("{}", report.skipped_perks.len()).cyan()
        );
    }
    println!();
}

fn display_diff(original: &str, modified: &str) {
    let diff = TextDiff::from_words(original, modified);
    let mut rendered = String::new();
    for change in diff.iter_all_changes() {
        let piece = match change.tag() {
            ChangeTag::Delete => change.value().red().to_string(),
            ChangeTag::Insert => change.value().green().to_string(),
            ChangeTag::Equal => change.value().normal().to_string(),
        };
        rendered.push_str(&piece);
    }
    for line in rendered.lines() {
        println!("    {line}");
    }
}

fn cmd_rules() -> Result<()> {
    println!("{}", "Name rules (first match wins):".bold());
    for rule in NAME_RULES {
        println!(
            "  [{}] {} -> {}",
            rule.category.label().dimmed(),
            rule.pattern,
            rule.replacement
        );
    }

    println!();
    println!("{}", "Description rules (applied in order):".bold());
    for rule in DESCRIPTION_RULES {
        if rule.pattern == rule.replacement {
            println!("  {} {}", rule.pattern, "(claims region)".dimmed());
        } else {
            println!("  {} -> {}", rule.pattern, rule.replacement);
        }
    }

    Ok(())
}
