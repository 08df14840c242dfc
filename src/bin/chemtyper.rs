//! Command-line interface for chemtyper
//! This binary converts chemistry markup into word equations and exposes the intermediate stages.
//!
//! Usage:
//!   chemtyper convert `<markup>` | --file `<path>`           - Print the word equation
//!   chemtyper normalize `<markup>` [--caret `<n>`]           - Expand ions and canonicalize states
//!   chemtyper inspect `<markup>` [--format `<format>`]       - Show tokens, tree or markup
//!   chemtyper list-formats                                 - List all inspect formats
//!
//! Settings are layered: built-in defaults, then `chemtyper.toml` in the working
//! directory if there is one, then the file given with `--config <path>`.
//! Set `RUST_LOG=debug` to trace the pipeline stages.

use chemtyper::chem::config::{ChemConfig, Loader, LOCAL_CONFIG_FILE};
use chemtyper::chem::normalize::normalize_ions_and_states;
use chemtyper::chem::pipeline::Converter;
use chemtyper::chem::processor::{available_formats, process_file, process_source, ProcessingSpec};
use clap::{Arg, ArgMatches, Command};

fn main() {
    env_logger::init();

    let matches = Command::new("chemtyper")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Convert chemistry equation markup into Word linear equations")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(
            Arg::new("config")
                .long("config")
                .short('c')
                .global(true)
                .help("TOML file layered over the built-in defaults"),
        )
        .subcommand(
            Command::new("convert")
                .about("Print the word equation for markup")
                .arg(
                    Arg::new("markup")
                        .help("Markup to convert")
                        .required_unless_present("file")
                        .index(1),
                )
                .arg(
                    Arg::new("file")
                        .long("file")
                        .short('f')
                        .help("Read the markup from a file")
                        .conflicts_with("markup"),
                ),
        )
        .subcommand(
            Command::new("normalize")
                .about("Expand polyatomic ions and canonicalize state annotations")
                .arg(
                    Arg::new("markup")
                        .help("Markup to normalize")
                        .required(true)
                        .index(1),
                )
                .arg(
                    Arg::new("caret")
                        .long("caret")
                        .help("Caret offset (in chars) to carry through the rewrite")
                        .value_parser(clap::value_parser!(usize)),
                ),
        )
        .subcommand(
            Command::new("inspect")
                .about("Show an intermediate stage of the pipeline")
                .arg(
                    Arg::new("markup")
                        .help("Markup to inspect")
                        .required(true)
                        .index(1),
                )
                .arg(
                    Arg::new("format")
                        .long("format")
                        .help("Output format (e.g., 'token-simple', 'ast-treeviz')"),
                ),
        )
        .subcommand(Command::new("list-formats").about("List available inspect formats"))
        .get_matches();

    let config = load_config(&matches);
    let converter = Converter::new(config.convert);

    // Handle subcommands
    match matches.subcommand() {
        Some(("convert", convert_matches)) => handle_convert_command(convert_matches, &converter),
        Some(("normalize", normalize_matches)) => handle_normalize_command(normalize_matches),
        Some(("inspect", inspect_matches)) => {
            handle_inspect_command(inspect_matches, &converter, &config.cli.format)
        }
        Some(("list-formats", _)) => handle_list_formats_command(),
        _ => unreachable!(),
    }
}

fn load_config(matches: &ArgMatches) -> ChemConfig {
    let mut loader = Loader::new().with_optional_file(LOCAL_CONFIG_FILE);
    if let Some(path) = matches.get_one::<String>("config") {
        loader = loader.with_file(path);
    }
    loader.build().unwrap_or_else(|e| {
        eprintln!("Error loading configuration: {}", e);
        std::process::exit(1);
    })
}

/// Handle the convert command
fn handle_convert_command(matches: &ArgMatches, converter: &Converter) {
    let spec = ProcessingSpec::from_string("word-text").unwrap_or_else(|e| {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    });

    let result = match matches.get_one::<String>("file") {
        Some(path) => process_file(path, &spec, converter),
        None => {
            let markup = matches.get_one::<String>("markup").map(String::as_str).unwrap_or("");
            process_source(markup, &spec, converter)
        }
    };

    match result {
        Ok(word) => println!("{}", word),
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}

/// Handle the normalize command
fn handle_normalize_command(matches: &ArgMatches) {
    let markup = matches.get_one::<String>("markup").map(String::as_str).unwrap_or("");
    let caret = matches.get_one::<usize>("caret").copied();

    let normalized = normalize_ions_and_states(markup, caret);
    println!("{}", normalized.text);
    if let Some(caret) = normalized.caret {
        println!("caret: {}", caret);
    }
}

/// Handle the inspect command
fn handle_inspect_command(matches: &ArgMatches, converter: &Converter, default_format: &str) {
    let markup = matches.get_one::<String>("markup").map(String::as_str).unwrap_or("");
    let format = matches
        .get_one::<String>("format")
        .map(String::as_str)
        .unwrap_or(default_format);

    let output = ProcessingSpec::from_string(format)
        .and_then(|spec| process_source(markup, &spec, converter))
        .unwrap_or_else(|e| {
            eprintln!("Execution error: {}", e);
            std::process::exit(1);
        });

    print!("{}", output);
    if !output.ends_with('\n') {
        println!();
    }
}

/// Handle the list-formats command
fn handle_list_formats_command() {
    println!("Available inspect formats:\n");
    for format in available_formats() {
        println!("  {}", format);
    }
}
