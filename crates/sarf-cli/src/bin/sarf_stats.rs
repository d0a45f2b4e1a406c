// sarf-stats: Print statistics about the loaded definitions.
//
// Reports root, scheme and derivative counts, the pattern table's occupancy
// and the root tree's height. Derivatives are not persisted, so a freshly
// loaded data directory reports none.
//
// Usage:
//   sarf-stats [-d DATA_DIR] [--json]
//
// Options:
//   -d, --data-dir PATH   Directory containing the definition files
//   --json                Print a JSON report
//   -h, --help            Print help

use std::io::{self, Write};

use serde::Serialize;

use sarf_engine::Statistics;
use sarf_store::TableMetrics;

#[derive(Serialize)]
struct Report {
    statistics: Statistics,
    table: TableMetrics,
    tree_height: i32,
    transformation_groups: usize,
}

fn main() {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let (data_dir, args) = sarf_cli::parse_data_dir(&args);

    if sarf_cli::wants_help(&args) {
        println!("sarf-stats: Print statistics about the loaded definitions.");
        println!();
        println!("Usage: sarf-stats [-d DATA_DIR] [--json]");
        println!();
        println!("Options:");
        println!("  -d, --data-dir PATH   Directory containing the definition files");
        println!("  --json                Print a JSON report");
        println!("  -h, --help            Print this help");
        return;
    }

    let json = args.iter().any(|a| a == "--json");

    sarf_cli::init_tracing();
    let handle =
        sarf_cli::load_handle(data_dir.as_deref()).unwrap_or_else(|e| sarf_cli::fatal(&e));

    let report = Report {
        statistics: handle.statistics(),
        table: handle.table_metrics(),
        tree_height: handle.tree_height(),
        transformation_groups: handle.transformation_groups().len(),
    };

    let stdout = io::stdout();
    let mut out = io::BufWriter::new(stdout.lock());

    if json {
        match serde_json::to_string_pretty(&report) {
            Ok(text) => {
                let _ = writeln!(out, "{text}");
            }
            Err(e) => sarf_cli::fatal(&format!("failed to encode report: {e}")),
        }
        return;
    }

    let stats = &report.statistics;
    let _ = writeln!(out, "roots:              {}", stats.total_roots);
    let _ = writeln!(out, "schemes:            {}", stats.total_patterns);
    let _ = writeln!(out, "derivatives:        {}", stats.total_derivatives);
    let _ = writeln!(out, "density:            {:.2}", stats.density);
    let _ = writeln!(out, "groups:             {}", report.transformation_groups);
    let _ = writeln!(out, "tree height:        {}", report.tree_height);
    let _ = writeln!(
        out,
        "table:              {} entries / {} buckets (load {:.2}, longest chain {})",
        report.table.size, report.table.capacity, report.table.load_factor, report.table.longest_chain
    );
}
