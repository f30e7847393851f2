use high_order_terms::config::demo::{self, RuntimeConfig, Variant};
use high_order_terms::diagnostics::{HardTermReport, SoftTermReport};
use high_order_terms::heatmap::{render_cell_heatmap, render_term_heatmap, render_term_overlay};
use high_order_terms::raster::io::{load_floor_plan, save_rgb_png, write_json_file};
use high_order_terms::scan::PlacementInputs;
use high_order_terms::TermBuilder;
use std::env;
use std::path::Path;

/// Overlays written for the heaviest terms.
const TOP_OVERLAYS: usize = 5;

fn main() {
    if let Err(err) = run() {
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), String> {
    let program = env::args()
        .next()
        .unwrap_or_else(|| "terms_demo".to_string());
    let config = demo::parse_cli(&program)?;

    let plan = load_floor_plan(&config.floor_plan_path())?;
    let scans = config.load_scans()?;
    let inputs = PlacementInputs::new(&config.candidates, &scans, plan.as_view());
    let builder = TermBuilder::new(config.params.clone());

    match config.variant {
        Variant::Hard => {
            let report = builder
                .build_hard(&inputs, &config.unwanted)
                .map_err(|e| e.to_string())?;
            print_hard_summary(&report);
            if let Some(path) = &config.output.json_out {
                write_json_file(path, &report)?;
                println!("\nJSON report written to {}", path.display());
            }
            if let Some(dir) = &config.output.debug_dir {
                save_hard_artifacts(dir, &config, &inputs, &report)?;
                println!("Debug artifacts written to {}", dir.display());
            }
        }
        Variant::Soft => {
            let report = builder.build_soft(&inputs).map_err(|e| e.to_string())?;
            print_soft_summary(&report);
            if let Some(path) = &config.output.json_out {
                write_json_file(path, &report)?;
                println!("\nJSON report written to {}", path.display());
            }
        }
    }
    Ok(())
}

fn print_hard_summary(report: &HardTermReport) {
    let trace = &report.trace;
    println!("Hard terms");
    println!(
        "  input: {}x{} candidates={} locked={}",
        trace.input.width, trace.input.height, trace.input.candidates, trace.input.locked
    );
    println!(
        "  grid: writes={} touched={} owned={}",
        trace.grid.stats.writes,
        trace.grid.stats.cells_touched,
        trace.grid.owned_cells.unwrap_or(0)
    );
    println!(
        "  exclusion: relation={} cells_affected={} removed={}",
        trace.exclusion.relation_size,
        trace.exclusion.stats.cells_affected,
        trace.exclusion.stats.removed
    );
    let agg = &trace.aggregation.stats;
    println!(
        "  aggregation: cells={} inserted={} merged={} pruned={} retained={}",
        agg.contributing_cells, agg.keys_inserted, agg.keys_merged, agg.pruned, agg.retained
    );
    let norm = &trace.normalization.stats;
    match norm.weights {
        Some(w) => println!(
            "  normalization: {:?} mean={:.4} sigma={:.4} dropped={} retained={}",
            norm.outcome, w.mean, w.sigma, norm.dropped, norm.retained
        ),
        None => println!("  normalization: {:?}", norm.outcome),
    }
    println!("  total_ms={:.3}", trace.timings.total_ms);
    for (key, entry) in report.table.iter().take(10) {
        println!("    {key}: w={:.4} c={}", entry.w, entry.c);
    }
}

fn print_soft_summary(report: &SoftTermReport) {
    let trace = &report.trace;
    println!("Soft terms");
    println!(
        "  grid: writes={} touched={}",
        trace.grid.stats.writes, trace.grid.stats.cells_touched
    );
    println!(
        "  keys={} total_ms={:.3}",
        report.table.len(),
        trace.timings.total_ms
    );
}

fn save_hard_artifacts(
    dir: &Path,
    config: &RuntimeConfig,
    inputs: &PlacementInputs<'_>,
    report: &HardTermReport,
) -> Result<(), String> {
    std::fs::create_dir_all(dir)
        .map_err(|e| format!("Failed to create debug dir {}: {e}", dir.display()))?;
    write_json_file(&dir.join("trace.json"), &report.trace)?;

    let cells = render_cell_heatmap(&report.grid, inputs.floor_plan, &config.params);
    save_rgb_png(&cells, &dir.join("cell_weights.png"))?;
    let terms = render_term_heatmap(&report.grid, &report.table, inputs.floor_plan);
    save_rgb_png(&terms, &dir.join("term_weights.png"))?;

    let mut ranked: Vec<_> = report.table.iter().collect();
    ranked.sort_by(|a, b| b.1.w.total_cmp(&a.1.w));
    for (rank, (key, _)) in ranked.into_iter().take(TOP_OVERLAYS).enumerate() {
        let overlay = render_term_overlay(key, inputs).map_err(|e| e.to_string())?;
        save_rgb_png(&overlay, &dir.join(format!("term_{rank:02}_{key}.png")))?;
    }
    Ok(())
}
