//! # chatsift CLI
//!
//! Command-line interface for the chatsift library.

use std::process;
use std::time::Instant;

use clap::Parser as ClapParser;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use chatsift::cli::Args;
use chatsift::core::{ChatStats, apply_filters};
use chatsift::format::{OutputFormat, write_to_format};
use chatsift::parser::TranscriptParser;
use chatsift::{ChatsiftError, MessageSequence};

fn main() {
    let args = <Args as ClapParser>::parse();
    init_logging(&args);

    if let Err(e) = run(&args) {
        eprintln!("❌ Error: {}", e);
        process::exit(1);
    }
}

/// Installs the stderr subscriber; `RUST_LOG` overrides `-v`.
fn init_logging(args: &Args) {
    let filter = EnvFilter::builder()
        .with_default_directive(args.log_level().into())
        .from_env_lossy();
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn run(args: &Args) -> Result<(), ChatsiftError> {
    let total_start = Instant::now();
    let output_path = args.output_path();
    let format: OutputFormat = args.format.into();

    // Validate filters before touching the input
    let filter_config = args.filter_config()?;
    let parser = TranscriptParser::with_config(args.parser_config())?;

    println!("📦 chatsift v{}", env!("CARGO_PKG_VERSION"));
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    println!("📂 Input:   {}", args.input);
    println!("💾 Output:  {}", output_path);
    println!("📄 Format:  {}", format);
    if args.no_continuation {
        println!("📏 Mode:    line per message");
    }
    if let Some(ref after) = args.after {
        println!("📅 After:   {}", after);
    }
    if let Some(ref before) = args.before {
        println!("📅 Before:  {}", before);
    }
    if let Some(ref from) = args.from {
        println!("👤 From:    {}", from);
    }
    println!();

    // Step 1: Parse
    println!("⏳ Parsing...");
    let parse_start = Instant::now();
    let seq = parser.parse_file(&args.input)?;
    println!(
        "   Found {} messages ({:.2}s)",
        seq.len(),
        parse_start.elapsed().as_secs_f64()
    );
    report_unmatched(&seq, args.show_unmatched);

    // Step 2: Order
    let seq = if args.sort {
        println!("🔃 Sorting by timestamp...");
        seq.sorted_by_timestamp()
    } else {
        seq
    };
    let parsed_count = seq.len();

    // Step 3: Filter
    let messages = if filter_config.is_active() {
        println!("🔍 Filtering messages...");
        let filtered = apply_filters(seq.into_messages(), &filter_config);
        println!("   {} messages after filtering", filtered.len());
        filtered
    } else {
        seq.into_messages()
    };

    // Step 4: Statistics
    if args.stats {
        print_stats(&ChatStats::compute(&messages));
    }

    // Step 5: Write
    println!("💾 Writing {}...", format);
    let write_start = Instant::now();
    write_to_format(&messages, &output_path, format, &args.output_config())?;
    println!("   Written in {:.2}s", write_start.elapsed().as_secs_f64());
    info!(path = %output_path, count = messages.len(), "output written");

    println!();
    println!("✅ Done! Output saved to {}", output_path);

    println!();
    println!("📊 Summary:");
    println!("   Parsed:    {} messages", parsed_count);
    if filter_config.is_active() {
        println!("   Filtered:  {} messages", messages.len());
    }
    println!("   Time:      {:.2}s", total_start.elapsed().as_secs_f64());

    Ok(())
}

fn report_unmatched(seq: &MessageSequence, show_lines: bool) {
    let Some(warning) = seq.warning() else {
        return;
    };
    warn!(unmatched = seq.unmatched_count(), "unparsed lines in input");
    println!("⚠️  {}", warning);
    if show_lines {
        for line in seq.diagnostics() {
            println!("   {}", line);
        }
    }
    if seq.is_empty() {
        println!("   The file contains no recognizable messages.");
    }
}

fn print_stats(stats: &ChatStats) {
    println!();
    println!("📈 Statistics:");
    println!("   Messages:       {}", stats.total_messages);
    println!("   Days:           {}", stats.total_days);
    println!("   Per day:        {:.2}", stats.avg_messages_per_day);
    println!("   Words/message:  {:.2}", stats.words_per_message);
    if let Some(hour) = stats.peak_hour() {
        println!("   Peak hour:      {:02}:00", hour);
    }
    if let Some(day) = stats.peak_weekday() {
        println!("   Peak weekday:   {}", day);
    }

    println!("   By sender:");
    for (sender, count) in &stats.messages_by_sender {
        println!("     {:<20} {}", sender, count);
    }

    if !stats.top_emoji.is_empty() {
        let emoji: Vec<String> = stats
            .top_emoji
            .iter()
            .map(|(e, count)| format!("{e} {count}"))
            .collect();
        println!("   Top emoji:      {}", emoji.join("  "));
    }
    println!();
}
