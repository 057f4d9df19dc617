use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{ArgAction, Parser, Subcommand};
use tracing::level_filters::LevelFilter;

#[derive(Parser, Debug)]
#[command(name = "parallax-layout", version)]
struct Cli {
    /// Log more to stderr (repeat for more detail).
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the layered key for a section, layer and raw key.
    Key(KeyArgs),
    /// Print the slug of a piece of text.
    Slug(SlugArgs),
    /// Print the effective override for a key as JSON (`null` when none applies).
    Resolve(ResolveArgs),
    /// Print the inheritance chain for a key, ancestor first.
    Explain(ExplainArgs),
    /// Report authoring problems in an override table.
    Check(CheckArgs),
    /// Plan every section of a storyboard against an override table.
    Plan(PlanArgs),
}

#[derive(Parser, Debug)]
struct KeyArgs {
    /// Section key.
    #[arg(long)]
    section: String,

    /// Depth-layer label.
    #[arg(long)]
    layer: String,

    /// Raw item key.
    #[arg(long)]
    raw_key: String,
}

#[derive(Parser, Debug)]
struct SlugArgs {
    /// Text to slug.
    text: String,
}

#[derive(Parser, Debug)]
struct ResolveArgs {
    /// Override table (`.json`, `.json5` or `.js`).
    #[arg(long)]
    table: PathBuf,

    /// Section key.
    #[arg(long)]
    section: String,

    /// Layered key, tried first.
    #[arg(long)]
    key: String,

    /// Raw key, tried when the layered key has no entry.
    #[arg(long)]
    raw_key: Option<String>,
}

#[derive(Parser, Debug)]
struct ExplainArgs {
    /// Override table.
    #[arg(long)]
    table: PathBuf,

    /// Section key.
    #[arg(long)]
    section: String,

    /// Entry key.
    #[arg(long)]
    key: String,
}

#[derive(Parser, Debug)]
struct CheckArgs {
    /// Override table.
    #[arg(long)]
    table: PathBuf,
}

#[derive(Parser, Debug)]
struct PlanArgs {
    /// Override table.
    #[arg(long)]
    table: PathBuf,

    /// Storyboard JSON.
    #[arg(long)]
    story: PathBuf,

    /// Output path; stdout when omitted.
    #[arg(long)]
    out: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    match cli.cmd {
        Command::Key(args) => cmd_key(args),
        Command::Slug(args) => cmd_slug(args),
        Command::Resolve(args) => cmd_resolve(args),
        Command::Explain(args) => cmd_explain(args),
        Command::Check(args) => cmd_check(args),
        Command::Plan(args) => cmd_plan(args),
    }
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => LevelFilter::WARN,
        1 => LevelFilter::INFO,
        2 => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();
}

fn read_table(path: &Path) -> anyhow::Result<parallax_layout::OverrideTable> {
    parallax_layout::OverrideTable::from_path(path)
        .with_context(|| format!("load override table '{}'", path.display()))
}

fn cmd_key(args: KeyArgs) -> anyhow::Result<()> {
    println!(
        "{}",
        parallax_layout::compose_layered_key(&args.section, &args.layer, &args.raw_key)
    );
    Ok(())
}

fn cmd_slug(args: SlugArgs) -> anyhow::Result<()> {
    println!("{}", parallax_layout::slugify(&args.text));
    Ok(())
}

fn cmd_resolve(args: ResolveArgs) -> anyhow::Result<()> {
    let table = read_table(&args.table)?;
    let raw_key = args.raw_key.as_deref().unwrap_or_default();
    let config = table.resolve(&args.section, &args.key, raw_key);
    let json = serde_json::to_string_pretty(&config).context("serialize effective config")?;
    println!("{json}");
    Ok(())
}

fn cmd_explain(args: ExplainArgs) -> anyhow::Result<()> {
    let table = read_table(&args.table)?;
    let Some(section) = table.section(&args.section) else {
        anyhow::bail!("section '{}' not found in '{}'", args.section, args.table.display());
    };
    let chain = parallax_layout::collect_chain(section, &args.key);
    if chain.is_empty() {
        anyhow::bail!("no entry '{}' in section '{}'", args.key, args.section);
    }
    for key in chain.keys() {
        println!("{key}");
    }
    Ok(())
}

fn cmd_check(args: CheckArgs) -> anyhow::Result<()> {
    let table = read_table(&args.table)?;
    let issues = table.diagnostics();
    for issue in &issues {
        println!("{issue}");
    }
    if !issues.is_empty() {
        anyhow::bail!(
            "{} issue(s) in '{}'",
            issues.len(),
            args.table.display()
        );
    }
    eprintln!("ok: {} section(s)", table.len());
    Ok(())
}

fn cmd_plan(args: PlanArgs) -> anyhow::Result<()> {
    let table = read_table(&args.table)?;
    let story = parallax_layout::Storyboard::from_path(&args.story)
        .with_context(|| format!("load storyboard '{}'", args.story.display()))?;

    let plan = parallax_layout::plan_story(&story, &table);
    let json = serde_json::to_string_pretty(&plan).context("serialize story plan")?;

    match args.out {
        Some(out) => {
            std::fs::write(&out, json)
                .with_context(|| format!("write plan '{}'", out.display()))?;
            eprintln!("wrote {}", out.display());
        }
        None => println!("{json}"),
    }
    Ok(())
}
