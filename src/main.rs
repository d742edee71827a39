mod catalog;
mod chat;
mod embed;
mod error;
mod fetch;
mod filter;
mod parser;
mod render;
mod settings;

use std::collections::BTreeMap;
use std::path::PathBuf;
use std::time::Instant;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing::{debug, error};

use catalog::Catalog;
use error::LOAD_FAILED_MESSAGE;
use filter::{CategoryFilter, FilterState};
use parser::classify::RuleSet;
use parser::{Pipeline, SubjectView};
use settings::Settings;

#[derive(Parser)]
#[command(name = "fagkatalog", about = "Elective subject catalog for upper secondary schools")]
struct Cli {
    /// School identifier (default from settings: bergen-private-gymnas)
    #[arg(short, long, global = true)]
    school: Option<String>,
    /// Classification rules: standard | code-prefix (default: school profile)
    #[arg(long, global = true)]
    rule_set: Option<String>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List subjects as a table
    List {
        /// Filter bucket (e.g. realfag, språk, all)
        #[arg(short, long, default_value = "all")]
        category: String,
        /// Match against title or subject code
        #[arg(short = 'q', long, default_value = "")]
        search: String,
        /// Max rows to display
        #[arg(short = 'n', long, default_value = "50")]
        limit: usize,
    },
    /// Show one subject in detail
    Show {
        /// Subject id
        id: String,
    },
    /// Write the catalog as a standalone HTML page
    Render {
        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Print the embed snippet and today's asset URLs
    Embed,
    /// Filter buckets with labels and subject counts
    Categories,
    /// Talk to the placeholder assistant
    Chat,
}

/// Resolved per-run context: which school, which rules.
struct RunContext {
    settings: Settings,
    school: String,
    rules: RuleSet,
}

impl RunContext {
    fn pipeline(&self) -> Pipeline {
        Pipeline {
            rules: self.rules,
            segment: self.settings.segment_rules(),
            image_base: self.settings.image_base.clone(),
        }
    }

    async fn load_catalog(&self) -> anyhow::Result<Catalog> {
        match fetch::fetch_catalog(&self.settings.api_base, &self.school).await {
            Ok(c) => Ok(c),
            Err(e) => {
                error!("Failed to load subjects: {}", e);
                eprintln!("{}", LOAD_FAILED_MESSAGE);
                Err(e.into())
            }
        }
    }

    async fn load_views(&self) -> anyhow::Result<Vec<SubjectView>> {
        let catalog = self.load_catalog().await?;
        Ok(self.pipeline().derive_all(&catalog.subjects))
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let t0 = Instant::now();
    let cli = Cli::parse();
    let mut settings = Settings::load().context("Failed to load settings")?;
    if cli.rule_set.is_some() {
        settings.rule_set = cli.rule_set.clone();
    }
    let school = cli.school.clone().unwrap_or_else(|| settings.school.clone());
    let rules = settings.rule_set(&school)?;
    debug!(school = %school, rules = ?rules, "Resolved run context");
    let ctx = RunContext { settings, school, rules };

    let result = match cli.command {
        Commands::List { category, search, limit } => {
            let views = ctx.load_views().await?;
            let state = FilterState {
                category: CategoryFilter::parse(&category),
                search,
            };
            print_table(&state.apply(&views), limit);
            Ok(())
        }
        Commands::Show { id } => {
            let catalog = ctx.load_catalog().await?;
            let record = catalog
                .find(&id)
                .with_context(|| format!("No subject with id '{}' for {}", id, ctx.school))?;
            print_detail(&ctx.pipeline().derive_view(record));
            Ok(())
        }
        Commands::Render { output } => {
            let views = ctx.load_views().await?;
            let html = render::page(&ctx.school, ctx.rules, &views);
            match output {
                Some(path) => {
                    std::fs::write(&path, html)
                        .with_context(|| format!("Failed to write {}", path.display()))?;
                    println!("Wrote {} subjects to {}", views.len(), path.display());
                }
                None => print!("{}", html),
            }
            Ok(())
        }
        Commands::Embed => {
            let assets = embed::EmbedAssets::today(&ctx.settings.embed_base, &ctx.school);
            println!("{}\n", assets.snippet());
            println!("Assets (load order):");
            for url in assets.load_order() {
                println!("  {}", url);
            }
            Ok(())
        }
        Commands::Categories => {
            let views = ctx.load_views().await?;
            let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
            for v in &views {
                *counts.entry(v.category).or_default() += 1;
            }
            for bucket in ctx.rules.buckets() {
                let key = ctx.rules.key(*bucket);
                println!(
                    "{:<12} {:<14} {:>3}",
                    key,
                    parser::classify::category_label(key),
                    counts.get(key).copied().unwrap_or(0)
                );
            }
            Ok(())
        }
        Commands::Chat => run_chat().await,
    };

    let elapsed = t0.elapsed();
    if elapsed.as_secs() >= 1 {
        debug!("Done in {:.1}s", elapsed.as_secs_f64());
    }

    result
}

fn print_table(views: &[&SubjectView], limit: usize) {
    if views.is_empty() {
        println!("No subjects found.");
        return;
    }

    println!(
        "{:>3} | {:<36} | {:<9} | {:<12} | {:>5}",
        "#", "Subject", "Code", "Category", "Goals"
    );
    println!("{}", "-".repeat(78));

    for (i, v) in views.iter().take(limit).enumerate() {
        println!(
            "{:>3} | {:<36} | {:<9} | {:<12} | {:>5}",
            i + 1,
            truncate(&v.title, 36),
            truncate(v.code_display(), 9),
            v.category_label,
            v.competency.item_count
        );
    }

    println!("\n{} of {} subjects shown", views.len().min(limit), views.len());
}

fn print_detail(view: &SubjectView) {
    println!("{} ({})", view.title, view.code_display());
    println!("Category: {}", view.category_label);
    if let Some(badge) = view.related_badge() {
        println!("{}", badge);
    }

    println!("\nOm faget\n  {}", view.description);

    for (heading, block) in [
        ("Hvordan arbeider man i faget?", &view.how_one_works),
        ("Fagets relevans", &view.relevance),
    ] {
        println!("\n{}", heading);
        if block.is_placeholder() {
            println!("  {}", parser::paragraphs::PLACEHOLDER);
        }
        for p in block.paragraphs() {
            println!("  {}\n", p);
        }
    }

    println!("\nI dette faget lærer du å ... ({} kompetansemål)", view.competency.item_count);

    println!("\nKjerneelementer ({})", view.core_elements.len());
    for k in &view.core_elements {
        println!("  - {}: {}", k.title, k.content);
    }

    println!("\nLæreplan: {}", view.curriculum_url);
}

async fn run_chat() -> anyhow::Result<()> {
    println!("Fagvalg-assistent (dummy). Ctrl-D avslutter.");
    let stdin = std::io::stdin();
    let bot = chat::converse(stdin.lock(), &mut std::io::stdout(), true).await?;

    let asked = bot.transcript.iter().filter(|m| m.from_user).count();
    debug!(
        last = bot.last_question().unwrap_or("-"),
        "Chat ended after {} questions", asked
    );
    Ok(())
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let truncated: String = s.chars().take(max.saturating_sub(3)).collect();
        format!("{}...", truncated)
    }
}
