// sarf-rules: List and edit transformation groups.
//
// Group keys are matched ignoring ASCII case. Every edit rewrites the
// transformations file in the data directory.
//
// Usage:
//   sarf-rules [-d DATA_DIR] list
//   sarf-rules [-d DATA_DIR] show KEY
//   sarf-rules [-d DATA_DIR] set KEY RULES [COMMENT]
//   sarf-rules [-d DATA_DIR] delete KEY
//
// RULES is a `;`-separated list of `replace=FROM>TO` and `replace_final=TO`
// clauses, e.g. "replace=او>ائ;replace=اي>ائ".
//
// Options:
//   -d, --data-dir PATH   Directory containing the definition files
//   -h, --help            Print help

use std::io::{self, Write};

use sarf_core::TransformationGroup;
use sarf_engine::definitions::{parse_rules, serialize_transformations};

fn print_help() {
    println!("sarf-rules: List and edit transformation groups.");
    println!();
    println!("Usage:");
    println!("  sarf-rules [-d DATA_DIR] list");
    println!("  sarf-rules [-d DATA_DIR] show KEY");
    println!("  sarf-rules [-d DATA_DIR] set KEY RULES [COMMENT]");
    println!("  sarf-rules [-d DATA_DIR] delete KEY");
    println!();
    println!("RULES is a ;-separated list of replace=FROM>TO and replace_final=TO.");
    println!();
    println!("Options:");
    println!("  -d, --data-dir PATH   Directory containing the definition files");
    println!("  -h, --help            Print this help");
}

fn main() {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let (data_dir, args) = sarf_cli::parse_data_dir(&args);

    if sarf_cli::wants_help(&args) || args.is_empty() {
        print_help();
        return;
    }

    sarf_cli::init_tracing();
    let mut handle =
        sarf_cli::load_handle(data_dir.as_deref()).unwrap_or_else(|e| sarf_cli::fatal(&e));

    let stdout = io::stdout();
    let mut out = io::BufWriter::new(stdout.lock());

    let args: Vec<&str> = args.iter().map(String::as_str).collect();
    match args.as_slice() {
        ["list"] => {
            for group in handle.transformation_groups() {
                let _ = writeln!(out, "{}\t{}", group.key, group.rules.len());
            }
        }
        ["show", key] => {
            let Some(group) = handle.transformation_group(key) else {
                sarf_cli::fatal(&format!("no transformation group {key}"));
            };
            for line in serialize_transformations(std::slice::from_ref(group)) {
                let _ = writeln!(out, "{line}");
            }
        }
        ["set", key, rules, comment @ ..] if comment.len() <= 1 => {
            let mut group = TransformationGroup::new(*key);
            group.rules = parse_rules(rules);
            if group.rules.is_empty() {
                sarf_cli::fatal("no valid rules given");
            }
            if let Some(comment) = comment.first() {
                for line in comment.lines() {
                    group.append_comment(line.trim());
                }
            }
            if let Err(e) = handle.save_transformation_group(group) {
                sarf_cli::fatal(&e.to_string());
            }
        }
        ["delete", key] => match handle.delete_transformation_group(key) {
            Ok(true) => {}
            Ok(false) => sarf_cli::fatal(&format!("no transformation group {key}")),
            Err(e) => sarf_cli::fatal(&e.to_string()),
        },
        _ => sarf_cli::fatal("unrecognized command; see --help"),
    }
}
