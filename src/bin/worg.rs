//! Command-line front end over the [`worg`] library.
//!
//! Argument parsing uses `clap`'s 2.x builder API (`App`/`Arg`), matching the
//! library's own pinned `clap = "2.33"` (predates the derive-macro API). This
//! binary's flag surface is a best-effort convenience, not a specified
//! contract — see the library crate docs for the normative behavior it drives.

use std::path::{Path, PathBuf};
use std::process;

use clap::{App, Arg};

use worg::buffer::DocumentArena;
use worg::config::{Config, WarningsPolicy};
use worg::engine::Tangler;
use worg::registry::BlockArena;

fn main() {
    simple_logger::SimpleLogger::new()
        .init()
        .expect("failed to install logger");

    let matches = App::new("worg")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Expands named, cross-referencing code blocks in org documents into output source files")
        .arg(
            Arg::with_name("INPUT")
                .help("org document(s) to tangle")
                .required(true)
                .multiple(true),
        )
        .arg(
            Arg::with_name("debug")
                .short("g")
                .long("debug")
                .help("precede each text segment with a #line directive"),
        )
        .arg(
            Arg::with_name("warnings")
                .short("W")
                .long("warnings")
                .takes_value(true)
                .possible_values(&["none", "soft", "error"])
                .default_value("none")
                .help("policy for unresolved references and unused blocks"),
        )
        .arg(
            Arg::with_name("map")
                .short("m")
                .long("map")
                .takes_value(true)
                .value_name("PATH")
                .help("write a code map to PATH"),
        )
        .arg(
            Arg::with_name("no-tangle")
                .short("n")
                .long("no-tangle")
                .help("parse and check only; do not write output files"),
        )
        .get_matches();

    let warnings = match matches.value_of("warnings").unwrap() {
        "soft" => WarningsPolicy::Soft,
        "error" => WarningsPolicy::Error,
        _ => WarningsPolicy::None,
    };

    let config = Config {
        debug_line_markers: matches.is_present("debug"),
        warnings,
        tangle_code: !matches.is_present("no-tangle"),
        map_filename: matches.value_of("map").map(PathBuf::from),
        timing: false,
    };

    let documents = DocumentArena::new();
    let mut buffers = Vec::new();
    for path in matches.values_of("INPUT").unwrap() {
        match documents.load_file(Path::new(path)) {
            Ok(buf) => buffers.push(buf),
            Err(e) => {
                log::error!("{e}");
                process::exit(1);
            }
        }
    }

    let blocks = BlockArena::new();
    let mut tangler = Tangler::new(&blocks, config);

    if let Err(e) = tangler.run(buffers) {
        log::error!("{e}");
        process::exit(1);
    }

    for diagnostic in tangler.diagnostics() {
        eprintln!("{}", diagnostic.render());
    }

    if tangler.has_fatal_diagnostics() {
        process::exit(1);
    }
}
