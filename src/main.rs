//! # chatlens CLI
//!
//! Command-line interface for the chatlens library.

use std::fs;
use std::io::{self, Write};
use std::process;
use std::time::Instant;

use clap::Parser as ClapParser;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use chatlens::ChatlensError;
use chatlens::cli::{Args, Command};
use chatlens::core::filter::filter_export;
use chatlens::format::{OutputFormat, render_document, render_messages, render_records};
use chatlens::parsing;
use chatlens::session::{ChatAnalyzer, ChatSession};

fn main() {
    let args = <Args as ClapParser>::parse();
    init_tracing(&args);

    if let Err(e) = run(&args) {
        eprintln!("❌ Error: {}", e);
        process::exit(1);
    }
}

fn init_tracing(args: &Args) {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(args.log_level())),
        )
        .with_writer(io::stderr)
        .init();
}

fn run(args: &Args) -> Result<(), ChatlensError> {
    let total_start = Instant::now();
    let filter = args.filter_config()?;

    let parse_start = Instant::now();
    let export = parsing::load_path(args.input())?;
    let original_count = export.messages.len();
    let export = filter_export(export, &filter);
    let analyzed_count = export.messages.len();
    info!(
        input = %args.input().display(),
        messages = original_count,
        analyzed = analyzed_count,
        elapsed_ms = parse_start.elapsed().as_millis() as u64,
        "loaded export"
    );

    let mut analyzer = build_analyzer(args)?;
    analyzer.load_export(export);

    let report = render(args, &analyzer)?;

    let Some(ref output_path) = args.output else {
        io::stdout().write_all(report.as_bytes())?;
        return Ok(());
    };

    fs::write(output_path, report.as_bytes())?;
    debug!(path = %output_path.display(), bytes = report.len(), "wrote report");

    println!("🔎 chatlens v{}", env!("CARGO_PKG_VERSION"));
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    println!("📂 Input:   {}", args.input().display());
    println!("💬 Chat:    {}", analyzer.title().unwrap_or_default());
    println!("📄 Format:  {}", args.output_format());
    if filter.is_active() {
        println!("🔍 Filter:  {} of {} messages", analyzed_count, original_count);
    } else {
        println!("🔍 Messages: {}", original_count);
    }
    println!();
    println!("✅ Done! Report saved to {}", output_path.display());
    println!("   Total time:  {:.2}s", total_start.elapsed().as_secs_f64());

    Ok(())
}

fn build_analyzer(args: &Args) -> Result<ChatAnalyzer, ChatlensError> {
    let analyzer = ChatAnalyzer::with_config(args.analysis_config());
    if !args.wants_stemmer() {
        return Ok(analyzer);
    }

    #[cfg(feature = "stemming")]
    {
        use chatlens::normalize::SnowballNormalizer;
        Ok(analyzer.with_normalizer(SnowballNormalizer::new(args.language)))
    }
    #[cfg(not(feature = "stemming"))]
    {
        Err(ChatlensError::invalid_format(
            "options",
            "--stemmer requires the 'stemming' feature to be enabled",
        ))
    }
}

fn render(args: &Args, analyzer: &ChatAnalyzer) -> Result<String, ChatlensError> {
    let output_config = args.output_config();
    let format = args.output_format();

    match &args.command {
        Command::Info { .. } => {
            let summary = analyzer.session().map(ChatSession::summary);
            render_records(summary.as_slice(), format)
        }
        Command::Participants { sort, .. } => {
            render_records(&analyzer.participant_rows(*sort), format)
        }
        Command::User { id, .. } => {
            render_messages(&analyzer.messages_by_user(&id.as_str().into()), format, &output_config)
        }
        Command::Search { keyword, .. } => {
            render_messages(&analyzer.search(keyword), format, &output_config)
        }
        Command::Graph { weighted: true, .. } => {
            let edges = analyzer
                .interaction_graph()
                .map(|g| g.weighted_edges())
                .unwrap_or_default();
            render_records(&edges, format)
        }
        Command::Graph { .. } => match format {
            OutputFormat::Csv => render_records(&analyzer.graph().edges, format),
            _ => render_document(&analyzer.graph(), format),
        },
        Command::History { page, .. } => {
            let history = analyzer.history(*page);
            debug!(
                page = history.page,
                total_pages = history.total_pages(),
                total = history.total,
                "history page"
            );
            match format {
                OutputFormat::Csv => render_records(&history.entries, format),
                _ => render_document(&history.report(), format),
            }
        }
        Command::Links { .. } => render_records(&analyzer.links(), format),
        Command::Words { .. } => render_records(&analyzer.frequent_words(), format),
    }
}
