// main.rs - CLI entry point

use std::path::Path;
use std::time::Instant;
use kmersig::cli::Config;
use kmersig::output::{write_summary, RunSummary};
use kmersig::pipeline::LoadStats;
use kmersig::prelude::*;

fn main() {
    if let Err(e) = run_main() {
        eprintln!("❌ ERROR: {}", e);
        std::process::exit(1);
    }
}

fn run_main() -> Result<(), String> {
    let mut args: Args = argh::from_env();
    let command_line = std::env::args().collect::<Vec<String>>().join(" ");

    // Handle generate config first
    if args.generate_config {
        let sample_config = Config::generate_sample();
        println!("{}", sample_config);
        println!("\n💡 Save this content to a .toml file and use --config /path/to/config.toml");
        return Ok(());
    }

    // Load configuration file if specified
    if let Some(config_path) = args.config.clone() {
        args = args
            .with_config_file(&config_path)
            .map_err(|e| e.to_string())?;
    }

    let logger = Logger::init(args.verbose);
    let validation = validate_args(&args)?;
    let params = &validation.params;
    let layout = &validation.layout;

    println!("🚀 kmersig v{}", kmersig::VERSION);
    println!("🧬 Window size: k = {}", params.window_size);
    match params.workers {
        Some(n) => println!("🧵 Workers: {}", n),
        None => println!("🧵 Workers: {} (default)", params.effective_workers()),
    }
    println!(
        "🔨 Reducer: {} ({})",
        validation.reducer.as_str(),
        validation.reducer.description()
    );

    let total_start = Instant::now();
    let mut summary = RunSummary::new(&command_line, validation.reducer.as_str());
    summary.window_size = Some(params.window_size);
    summary.workers = Some(params.effective_workers());

    // Step 1: alignments -> comparison table (skipped when a table is given)
    let reduce_input = match (&validation.input_table, &validation.alignments_dir) {
        (Some(table), _) => {
            println!("📂 Reducing existing table: {}", table.display());
            table.clone()
        }
        (None, Some(dir)) => {
            if args.dry_run {
                return run_dry(dir, &logger);
            }

            println!("\n🔍 Step 1: comparing k-mer windows in {}", dir.display());
            let step_start = Instant::now();
            let step1 = process_fasta_files(
                dir,
                params,
                Some(&layout.intermediate),
                Some(&layout.error_log),
                !args.no_progress,
                &logger,
            )
            .map_err(|e| format!("comparison step failed: {}", e))?;

            println!(
                "✅ {} groups loaded ({} placeholders, {} files skipped)",
                step1.load.groups, step1.load.placeholder_groups, step1.load.skipped_files
            );
            println!(
                "✅ {} groups compared, {} failed, {} rows in {:.2}s",
                step1.run.groups_succeeded(),
                step1.run.groups_failed,
                step1.run.processed.len(),
                step_start.elapsed().as_secs_f64()
            );
            if !step1.run.errors.is_empty() {
                println!(
                    "⚠️  {} group errors written to: {}",
                    step1.run.errors.len(),
                    layout.error_log.display()
                );
            }

            summary.groups_loaded = step1.load.groups;
            summary.placeholder_groups = step1.load.placeholder_groups;
            summary.skipped_files = step1.load.skipped_files;
            summary.groups_failed = step1.run.groups_failed;
            summary.intermediate_rows = step1.run.processed.len();
            summary.errors = step1.run.errors;

            layout.intermediate.clone()
        }
        (None, None) => return Err("--alignments is required (or --input-table)".to_string()),
    };

    // Step 2: column reduction
    println!("\n🔄 Step 2: reducing columns per group...");
    let reduced = reduce_comparison_file(
        validation.reducer,
        &reduce_input,
        &layout.final_table,
        &Crc32ColumnHasher,
        &logger,
    )
    .map_err(|e| format!("reduction step failed: {}", e))?;

    summary.final_groups = reduced.group_count();
    summary.final_rows = reduced.len();

    if let Some(summary_path) = &args.summary {
        write_summary(Path::new(summary_path), &summary)
            .map_err(|e| format!("failed to write summary: {}", e))?;
        println!("📋 Summary written to: {}", summary_path);
    }

    println!("\n🎉 === KMERSIG COMPLETED SUCCESSFULLY ===");
    println!(
        "⏱️  Total execution time: {:.2}s",
        total_start.elapsed().as_secs_f64()
    );
    println!(
        "📊 Final table: {} groups × {} rows",
        summary.final_groups, summary.final_rows
    );
    println!("📁 Output written to: {}", layout.final_table.display());
    println!("🔧 Command: {}", command_line);

    Ok(())
}

/// Load the alignment directory and report what a full run would process
fn run_dry(dir: &Path, logger: &Logger) -> Result<(), String> {
    let alignments = AlignmentSet::from_directory(dir, logger).map_err(|e| e.to_string())?;
    let stats = LoadStats::from(&alignments);

    println!("✅ Dry run completed successfully");
    println!(
        "📊 {} groups, {} sequences ({} placeholders, {} files skipped)",
        stats.groups, stats.sequences, stats.placeholder_groups, stats.skipped_files
    );
    Ok(())
}
