// sarf-schemes: List and edit morphological schemes.
//
// Every edit rewrites the schemes file in the data directory.
//
// Usage:
//   sarf-schemes [-d DATA_DIR] list
//   sarf-schemes [-d DATA_DIR] add NAME TEMPLATE
//   sarf-schemes [-d DATA_DIR] update NAME TEMPLATE
//   sarf-schemes [-d DATA_DIR] delete NAME
//
// Templates use {1}, {2} and {3} for the root letters.
//
// Options:
//   -d, --data-dir PATH   Directory containing the definition files
//   -h, --help            Print help

use std::io::{self, Write};

fn print_help() {
    println!("sarf-schemes: List and edit morphological schemes.");
    println!();
    println!("Usage:");
    println!("  sarf-schemes [-d DATA_DIR] list");
    println!("  sarf-schemes [-d DATA_DIR] add NAME TEMPLATE");
    println!("  sarf-schemes [-d DATA_DIR] update NAME TEMPLATE");
    println!("  sarf-schemes [-d DATA_DIR] delete NAME");
    println!();
    println!("Templates use {{1}}, {{2}} and {{3}} for the root letters.");
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

    let args: Vec<&str> = args.iter().map(String::as_str).collect();
    let result = match args.as_slice() {
        ["list"] => {
            let stdout = io::stdout();
            let mut out = io::BufWriter::new(stdout.lock());
            for name in handle.schemes() {
                let template = handle.scheme_template(name).unwrap_or_default();
                let _ = writeln!(out, "{name}={template}");
            }
            Ok(())
        }
        ["add", name, template] => handle.add_scheme(name, template),
        ["update", name, template] => handle.update_scheme(name, template),
        ["delete", name] => handle.delete_scheme(name),
        _ => sarf_cli::fatal("unrecognized command; see --help"),
    };

    if let Err(e) = result {
        sarf_cli::fatal(&e.to_string());
    }
}
