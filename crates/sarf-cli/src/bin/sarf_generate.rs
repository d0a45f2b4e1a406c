// sarf-generate: Generate derived forms of roots.
//
// With a root and one or more scheme names, prints the word each scheme
// produces. With only a root, prints the word for every scheme. With no
// arguments, reads `ROOT [SCHEME...]` lines from stdin.
//
// Output, one line per word:
//   root<TAB>scheme<TAB>word     (explicit scheme)
//   root<TAB>word                (all schemes)
//
// Usage:
//   sarf-generate [-d DATA_DIR] [ROOT [SCHEME...]]
//
// Options:
//   -d, --data-dir PATH   Directory containing the definition files
//   -h, --help            Print help

use std::io::{self, BufRead, Write};
use std::process;

use sarf_engine::MorphologyHandle;

fn main() {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let (data_dir, args) = sarf_cli::parse_data_dir(&args);

    if sarf_cli::wants_help(&args) {
        println!("sarf-generate: Generate derived forms of roots.");
        println!();
        println!("Usage: sarf-generate [-d DATA_DIR] [ROOT [SCHEME...]]");
        println!();
        println!("With schemes, prints root, scheme and word per scheme.");
        println!("With a root only, prints the word for every scheme.");
        println!("Without arguments, reads ROOT [SCHEME...] lines from stdin.");
        println!();
        println!("Options:");
        println!("  -d, --data-dir PATH   Directory containing the definition files");
        println!("  -h, --help            Print this help");
        return;
    }

    sarf_cli::init_tracing();
    let mut handle =
        sarf_cli::load_handle(data_dir.as_deref()).unwrap_or_else(|e| sarf_cli::fatal(&e));

    let stdout = io::stdout();
    let mut out = io::BufWriter::new(stdout.lock());
    let mut failed = false;

    if let Some((root, schemes)) = args.split_first() {
        let schemes: Vec<&str> = schemes.iter().map(String::as_str).collect();
        failed |= !generate(&mut handle, &mut out, root, &schemes);
    } else {
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
            let Some(root) = fields.next() else {
                continue;
            };
            let schemes: Vec<&str> = fields.collect();
            failed |= !generate(&mut handle, &mut out, root, &schemes);
        }
    }

    let _ = out.flush();
    if failed {
        drop(out);
        process::exit(1);
    }
}

/// Print the requested words. Returns `false` if anything failed.
fn generate(
    handle: &mut MorphologyHandle,
    out: &mut impl Write,
    root: &str,
    schemes: &[&str],
) -> bool {
    if schemes.is_empty() {
        return match handle.generate_all(root) {
            Ok(words) if words.is_empty() => {
                if handle.state().roots.contains(root) {
                    eprintln!("error: no schemes loaded");
                } else {
                    eprintln!("error: unknown root: {root}");
                }
                false
            }
            Ok(words) => {
                for word in words {
                    let _ = writeln!(out, "{root}\t{word}");
                }
                true
            }
            Err(e) => {
                eprintln!("error: {e}");
                false
            }
        };
    }

    let mut ok = true;
    for scheme in schemes {
        match handle.generate(root, scheme) {
            Ok(word) => {
                let _ = writeln!(out, "{root}\t{scheme}\t{word}");
            }
            Err(e) => {
                eprintln!("error: {e}");
                ok = false;
            }
        }
    }
    ok
}
