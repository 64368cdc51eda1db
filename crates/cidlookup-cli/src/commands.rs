//! Subcommand handlers

use crate::cli::{Commands, OutputFormat};
use crate::config::AppConfig;
use crate::render::Renderer;
use cidlookup_engine::LookupEngine;
use serde::Serialize;
use std::io::{BufRead, Write};
use std::time::Instant;
use tracing::{debug, info};

/// Representative queries timed by `bench`
pub const BENCH_QUERIES: &[(&str, &str)] = &[
    ("BIOL", "Department only"),
    ("bio hartnell", "Department and institution"),
    ("human anatomy", "Multi-word title"),
    ("de anza accounting", "Institution and title"),
    ("CS foothill", "Small result set"),
    ("financial accounting", "Two-word title"),
    ("ACCT 110", "Direct C-ID"),
];

/// Words that end an interactive session
const QUIT: &[&str] = &[":q", ":quit"];

/// Load the table and run one subcommand
pub fn run<W: Write>(
    command: &Commands,
    config: &AppConfig,
    format: OutputFormat,
    out: &mut W,
) -> anyhow::Result<()> {
    let start = Instant::now();
    let engine = LookupEngine::load(&config.data_file, config.engine.clone())?;
    let load_ms = start.elapsed().as_secs_f64() * 1000.0;
    let renderer = Renderer::new(format, config);

    match command {
        Commands::Search { query } => {
            let query = query.join(" ");
            let outcome = engine.resolve(&query);
            renderer.search(out, &query, &outcome)?;
        }
        Commands::Departments => {
            renderer.departments(out, &engine.departments())?;
        }
        Commands::Courses { department } => {
            renderer.listing(out, department, &engine.course_listing(department))?;
        }
        Commands::Show { department, number } => {
            show(&engine, &renderer, department, number.as_deref(), out)?;
        }
        Commands::Interactive => {
            let stdin = std::io::stdin();
            interactive(&engine, &renderer, stdin.lock(), out)?;
        }
        Commands::Bench { iterations } => {
            bench(&engine, load_ms, *iterations, format, out)?;
        }
    }
    Ok(())
}

/// Equivalents of one home course, or every course of the department
pub fn show<W: Write>(
    engine: &LookupEngine,
    renderer: &Renderer,
    department: &str,
    number: Option<&str>,
    out: &mut W,
) -> anyhow::Result<()> {
    match number.map(str::trim).filter(|n| !n.is_empty()) {
        Some(number) => {
            let heading = format!("{} {}", department, number);
            let outcome = engine.equivalents_for(department, number);
            renderer.equivalency(out, &heading, &outcome)?;
        }
        None => {
            let heading = format!("{} Department", department);
            let results = engine.courses_for_department(department);
            renderer.results(out, &heading, &results)?;
        }
    }
    Ok(())
}

/// Answer one query per input line until EOF or `:q`
pub fn interactive<R: BufRead, W: Write>(
    engine: &LookupEngine,
    renderer: &Renderer,
    input: R,
    out: &mut W,
) -> anyhow::Result<usize> {
    let mut answered = 0;
    for line in input.lines() {
        let line = line?;
        let query = line.trim();
        if QUIT.iter().any(|q| *q == query) {
            break;
        }
        if query.is_empty() {
            continue;
        }

        let outcome = engine.resolve(query);
        renderer.search(out, query, &outcome)?;
        if renderer.format() == OutputFormat::Table {
            writeln!(out)?;
        }
        out.flush()?;
        answered += 1;
    }
    debug!(answered, "Interactive session ended");
    Ok(answered)
}

#[derive(Debug, Serialize)]
struct BenchQuery {
    description: &'static str,
    query: &'static str,
    rows: usize,
    mean_us: f64,
}

#[derive(Debug, Serialize)]
struct BenchReport {
    rows_loaded: usize,
    load_ms: f64,
    iterations: u32,
    queries: Vec<BenchQuery>,
    mean_us: f64,
}

/// Time the representative queries against a loaded engine
pub fn bench<W: Write>(
    engine: &LookupEngine,
    load_ms: f64,
    iterations: u32,
    format: OutputFormat,
    out: &mut W,
) -> anyhow::Result<()> {
    let iterations = iterations.max(1);
    info!(rows = engine.dataset().len(), load_ms, iterations, "Running benchmark");

    let mut queries = Vec::with_capacity(BENCH_QUERIES.len());
    for &(query, description) in BENCH_QUERIES {
        let mut rows = 0;
        let start = Instant::now();
        for _ in 0..iterations {
            rows = engine.search(query).len();
        }
        let mean_us = start.elapsed().as_secs_f64() * 1_000_000.0 / f64::from(iterations);
        queries.push(BenchQuery {
            description,
            query,
            rows,
            mean_us,
        });
    }

    let mean_us = queries.iter().map(|q| q.mean_us).sum::<f64>() / queries.len() as f64;
    let report = BenchReport {
        rows_loaded: engine.dataset().len(),
        load_ms,
        iterations,
        queries,
        mean_us,
    };

    match format {
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut *out, &report)?;
            writeln!(out)?;
        }
        OutputFormat::Table => write_bench_table(out, &report)?,
    }
    Ok(())
}

fn write_bench_table<W: Write>(out: &mut W, report: &BenchReport) -> std::io::Result<()> {
    writeln!(
        out,
        "Loaded {} rows in {:.1}ms ({} iterations per query)",
        report.rows_loaded, report.load_ms, report.iterations
    )?;
    writeln!(out)?;
    writeln!(out, "{:<28} {:<22} {:>10} {:>8}", "Description", "Query", "Mean", "Rows")?;
    writeln!(out, "{}", "-".repeat(71))?;
    for q in &report.queries {
        writeln!(
            out,
            "{:<28} {:<22} {:>8.1}us {:>8}",
            q.description, q.query, q.mean_us, q.rows
        )?;
    }
    writeln!(out, "{}", "-".repeat(71))?;
    writeln!(out, "Average search time: {:.1}us", report.mean_us)
}
