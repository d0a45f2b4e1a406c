// sarf-validate: Check whether words derive from roots.
//
// For each ROOT WORD pair, tries every scheme and reports the first one
// that produces the word:
//   V: word    root    scheme    (valid)
//   I: word    root              (root known, no scheme matches)
//   U: word    root              (unknown root)
//
// Usage:
//   sarf-validate [-d DATA_DIR] [ROOT WORD]
//
// Without arguments, reads `ROOT WORD` lines from stdin.
//
// Options:
//   -d, --data-dir PATH   Directory containing the definition files
//   -h, --help            Print help

use std::io::{self, BufRead, Write};

use sarf_engine::MorphologyHandle;

fn main() {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let (data_dir, args) = sarf_cli::parse_data_dir(&args);

    if sarf_cli::wants_help(&args) {
        println!("sarf-validate: Check whether words derive from roots.");
        println!();
        println!("Usage: sarf-validate [-d DATA_DIR] [ROOT WORD]");
        println!();
        println!("Without arguments, reads ROOT WORD lines from stdin. Prints:");
        println!("  V: word    root    scheme    (valid)");
        println!("  I: word    root              (no scheme matches)");
        println!("  U: word    root              (unknown root)");
        println!();
        println!("Options:");
        println!("  -d, --data-dir PATH   Directory containing the definition files");
        println!("  -h, --help            Print this help");
        return;
    }

    if !args.is_empty() && args.len() != 2 {
        sarf_cli::fatal("expected ROOT WORD");
    }

    sarf_cli::init_tracing();
    let mut handle =
        sarf_cli::load_handle(data_dir.as_deref()).unwrap_or_else(|e| sarf_cli::fatal(&e));

    let stdout = io::stdout();
    let mut out = io::BufWriter::new(stdout.lock());

    if let [root, word] = args.as_slice() {
        validate(&mut handle, &mut out, root, word);
        return;
    }

    let stdin = io::stdin();
    for line in stdin.lock().lines() {
        let line = match line {
            Ok(l) => l,
            Err(e) => {
                eprintln!("error reading stdin: {e}");
                break;
            }
        };
        let mut fields = line.split_whitespace();
        match (fields.next(), fields.next()) {
            (Some(root), Some(word)) => validate(&mut handle, &mut out, root, word),
            (Some(_), None) => eprintln!("error: expected ROOT WORD, got {:?}", line.trim()),
            _ => {}
        }
    }
}

fn validate(handle: &mut MorphologyHandle, out: &mut impl Write, root: &str, word: &str) {
    match handle.validate(root, word) {
        Ok(verdict) => match (verdict.valid, verdict.scheme) {
            (true, Some(scheme)) => {
                let _ = writeln!(out, "V: {word}\t{root}\t{scheme}");
            }
            _ if verdict.root.is_some() => {
                let _ = writeln!(out, "I: {word}\t{root}");
            }
            _ => {
                let _ = writeln!(out, "U: {word}\t{root}");
            }
        },
        Err(e) => eprintln!("error: {e}"),
    }
}
