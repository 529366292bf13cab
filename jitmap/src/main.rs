//! # jitmap - Main Entry Point
//!
//! Replays one trace file, prints resolved stacks and a hotspot summary, and
//! optionally dumps the final symbol table or exports everything as JSON.

use anyhow::{Context, Result};
use clap::Parser;
use log::info;
use std::io::Write;

use jitmap::analysis::SampleStats;
use jitmap::cli::{Args, DumpFormat};
use jitmap::domain::TraceError;
use jitmap::export::{format_dump_table, write_dump_json, ReplayExporter};
use jitmap::profiling::{SessionReport, TraceSession};
use jitmap::trace_data::TraceData;

// Exit codes
const EXIT_SUCCESS: i32 = 0;
const EXIT_ERROR: i32 = 1;
const EXIT_NOINPUT: i32 = 66;

fn main() {
    env_logger::init();
    let args = Args::parse();
    std::process::exit(match run(&args) {
        Ok(()) => EXIT_SUCCESS,
        Err(e) => {
            let code = exit_code_for(&e);
            eprintln!("error: {e:#}");
            code
        }
    });
}

fn exit_code_for(err: &anyhow::Error) -> i32 {
    match err.downcast_ref::<TraceError>() {
        Some(TraceError::Io(io)) if io.kind() == std::io::ErrorKind::NotFound => EXIT_NOINPUT,
        _ => EXIT_ERROR,
    }
}

fn run(args: &Args) -> Result<()> {
    let trace = TraceData::from_file(&args.trace)
        .with_context(|| format!("Failed to load trace {}", args.trace.display()))?;
    info!(
        "Loaded {} events ({} ticks) from {}",
        trace.len(),
        trace.tick_count(),
        args.trace.display()
    );

    let mut session = TraceSession::new();
    session.replay(trace.events);
    let report = session.finish();

    if !args.quiet {
        print_samples(&report);
    }
    print_summary(&report, args.top);

    if args.dump_symbols {
        match args.dump_format {
            DumpFormat::Table => {
                println!("\nSYMBOLS ({} live)", report.table.len());
                print!("{}", format_dump_table(&report.table));
            }
            DumpFormat::Json => {
                let mut stdout = std::io::stdout().lock();
                write_dump_json(&report.table, &mut stdout)
                    .context("Failed to write symbol dump")?;
                writeln!(stdout)?;
            }
        }
    }

    if let Some(ref path) = args.export {
        ReplayExporter::new(&report)
            .export_to_file(path)
            .with_context(|| format!("Failed to export to {}", path.display()))?;
        println!("\nExported replay to {}", path.display());
    }

    Ok(())
}

fn print_samples(report: &SessionReport) {
    for (i, stack) in report.samples.iter().enumerate() {
        println!("tick {i}:");
        for line in stack.format().lines() {
            println!("   {line}");
        }
    }
}

fn print_summary(report: &SessionReport, top: usize) {
    let mut stats = SampleStats::new();
    for stack in &report.samples {
        stats.record(stack);
    }

    let s = report.stats;
    println!(
        "\n{} code objects created, {} moved, {} deleted, {} replaced by newer code",
        s.created, s.moved, s.deleted, s.replaced
    );
    if s.unresolved_moves + s.unresolved_deletes > 0 {
        println!(
            "{} moves and {} deletes referenced unknown code",
            s.unresolved_moves, s.unresolved_deletes
        );
    }

    println!(
        "\nHOTSPOTS ({} ticks, {:.1}% unresolved)",
        stats.total_samples(),
        stats.unknown_percentage()
    );
    for hotspot in stats.to_hotspots().iter().take(top) {
        let kind = hotspot.kind.map(|k| k.to_string()).unwrap_or_default();
        println!(
            "  {:>6.2}%  {:>6}  {:<12} {}",
            hotspot.percentage, hotspot.count, kind, hotspot.name
        );
    }
}
