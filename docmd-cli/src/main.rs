// Command-line interface for docmd
//
// This binary converts document trees exported by a rich-text editor (as JSON) into Markdown,
// and can draw the tree for inspection.
//
// Usage:
//  docmd <input> [--to <format>] [--output <file>]            - Convert (default command)
//  docmd convert <input> [--to <format>] [--select 0,2] ...   - Same as above (explicit)
//  docmd inspect <input>                                      - Tree visualization of the input
//  docmd --list-formats                                       - List available formats
//
// Conversion warnings (placeholders left in the output) go to stderr as `line N: message`, or
// as a JSON array with --warnings-json. They never change the exit code; IO, parse and option
// errors exit with 1.
//
// Extra Parameters:
//
// Format-specific parameters can be passed using --extra-<parameter-name> <value>.
// The CLI layer strips the "extra-" prefix and passes the parameters to the format.
// Example:
//  docmd report.json --extra-toc placeholder --extra-list-indent 2

use clap::{Arg, ArgAction, Command, ValueHint};
use docmd::formats::treeviz::TreevizOptions;
use docmd::ir::nodes::{Document, Element};
use docmd::{convert_document, convert_elements, ConversionResult, ConvertOptions, FormatRegistry};
use docmd_config::{DocmdConfig, Loader};
use std::collections::HashMap;
use std::fs;

/// Parse extra-* arguments from command line args
/// Returns (cleaned_args_without_extras, extra_params_map)
///
/// Supports both:
/// - `--extra-<key> <value>` (explicit value)
/// - `--extra-<key>` (boolean flag, defaults to "true")
/// - `--extras-<key>` (alias for `--extra-<key>`)
fn parse_extra_args(args: &[String]) -> (Vec<String>, HashMap<String, String>) {
    let mut cleaned_args = Vec::new();
    let mut extra_params = HashMap::new();
    let mut i = 0;

    while i < args.len() {
        let arg = &args[i];

        let key_opt = arg
            .strip_prefix("--extra-")
            .or_else(|| arg.strip_prefix("--extras-"));

        if let Some(key) = key_opt {
            let has_value = args
                .get(i + 1)
                .map(|next| !next.starts_with('-'))
                .unwrap_or(false);

            if has_value {
                extra_params.insert(key.to_string(), args[i + 1].clone());
                i += 2;
            } else {
                extra_params.insert(key.to_string(), "true".to_string());
                i += 1;
            }
            continue;
        }

        cleaned_args.push(arg.clone());
        i += 1;
    }

    (cleaned_args, extra_params)
}

fn build_cli() -> Command {
    Command::new("docmd")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Convert rich-text document trees to Markdown")
        .long_about(
            "docmd converts document trees exported by a rich-text editor into\n\
            GitHub Flavored Markdown.\n\n\
            Commands:\n  \
            - convert: Convert a document (default command)\n  \
            - inspect: Draw the document tree\n\n\
            Extra Parameters:\n  \
            Use --extra-<name> [value] to pass format-specific options.\n  \
            Boolean flags can omit the value (defaults to 'true').\n\n\
            Examples:\n  \
            docmd report.json                        # Markdown on stdout\n  \
            docmd report.json -o report.md           # Markdown file\n  \
            docmd report.json --extra-toc placeholder\n  \
            docmd inspect report.json --extra-show-styles",
        )
        .arg_required_else_help(true)
        .subcommand_required(false)
        .arg(
            Arg::new("list-formats")
                .long("list-formats")
                .help("List available formats")
                .action(ArgAction::SetTrue)
                .global(true),
        )
        .arg(
            Arg::new("config")
                .long("config")
                .value_name("PATH")
                .help("Path to a docmd.toml configuration file")
                .value_hint(ValueHint::FilePath)
                .global(true),
        )
        .subcommand(
            Command::new("convert")
                .about("Convert a document (default command)")
                .long_about(
                    "Convert a document tree to another format.\n\n\
                    The source format is auto-detected from the file extension.\n\
                    Output goes to stdout by default, or use -o to specify a file.\n\n\
                    Examples:\n  \
                    docmd convert report.json                    # Markdown (stdout)\n  \
                    docmd convert report.json --select 0,3       # Only top-level elements 0 and 3\n  \
                    docmd convert report.json --warnings-json    # Warnings as JSON on stderr\n  \
                    docmd report.json --to json                  # Normalized tree",
                )
                .arg(
                    Arg::new("input")
                        .help("Input file path")
                        .required(true)
                        .index(1)
                        .value_hint(ValueHint::FilePath),
                )
                .arg(
                    Arg::new("from")
                        .long("from")
                        .help("Source format (auto-detected from file extension if not specified)")
                        .value_hint(ValueHint::Other),
                )
                .arg(
                    Arg::new("to")
                        .long("to")
                        .help("Target format")
                        .default_value("markdown")
                        .value_hint(ValueHint::Other),
                )
                .arg(
                    Arg::new("output")
                        .long("output")
                        .short('o')
                        .help("Output file path (defaults to stdout)")
                        .value_hint(ValueHint::FilePath),
                )
                .arg(
                    Arg::new("select")
                        .long("select")
                        .value_name("INDICES")
                        .help("Convert only these top-level elements (comma separated, 0-based)")
                        .value_delimiter(',')
                        .value_parser(clap::value_parser!(usize)),
                )
                .arg(
                    Arg::new("warnings-json")
                        .long("warnings-json")
                        .help("Print conversion warnings as a JSON array")
                        .action(ArgAction::SetTrue),
                ),
        )
        .subcommand(
            Command::new("inspect")
                .about("Draw the document tree")
                .arg(
                    Arg::new("input")
                        .help("Input file path")
                        .required(true)
                        .index(1)
                        .value_hint(ValueHint::FilePath),
                ),
        )
}

/// Insert `convert` when the first argument is not a known subcommand or flag.
fn inject_default_subcommand(args: &[String]) -> Option<Vec<String>> {
    let first = args.get(1)?;
    if first.starts_with('-') || ["convert", "inspect", "help"].contains(&first.as_str()) {
        return None;
    }
    let mut new_args = vec![args[0].clone(), "convert".to_string()];
    new_args.extend_from_slice(&args[1..]);
    Some(new_args)
}

fn main() {
    env_logger::init();

    let args: Vec<String> = std::env::args().collect();
    let (cleaned_args, mut extra_params) = parse_extra_args(&args);

    let cli = build_cli();
    let matches = match cli.clone().try_get_matches_from(&cleaned_args) {
        Ok(m) => m,
        Err(e) => match inject_default_subcommand(&cleaned_args) {
            Some(new_args) => cli
                .try_get_matches_from(&new_args)
                .unwrap_or_else(|e2| e2.exit()),
            None => e.exit(),
        },
    };

    if matches.get_flag("list-formats") {
        handle_list_formats_command();
        return;
    }

    let mut config = load_cli_config(matches.get_one::<String>("config").map(|s| s.as_str()));
    apply_config_overrides(&mut config, &mut extra_params);

    match matches.subcommand() {
        Some(("convert", sub_matches)) => {
            let input = sub_matches
                .get_one::<String>("input")
                .expect("input is required");
            let from = match sub_matches.get_one::<String>("from") {
                Some(from) => from.to_string(),
                None => detect_source_format(input),
            };
            let to = sub_matches
                .get_one::<String>("to")
                .expect("to has a default");
            let request = ConvertRequest {
                input,
                from: &from,
                to,
                output: sub_matches.get_one::<String>("output").map(|s| s.as_str()),
                selection: sub_matches
                    .get_many::<usize>("select")
                    .map(|indices| indices.copied().collect()),
                warnings_json: sub_matches.get_flag("warnings-json"),
            };
            handle_convert_command(&request, &extra_params, &config);
        }
        Some(("inspect", sub_matches)) => {
            let input = sub_matches
                .get_one::<String>("input")
                .expect("input is required");
            handle_inspect_command(input, &extra_params, &config);
        }
        _ => {
            eprintln!("Unknown subcommand. Use --help for usage information.");
            std::process::exit(1);
        }
    }
}

struct ConvertRequest<'a> {
    input: &'a str,
    from: &'a str,
    to: &'a str,
    output: Option<&'a str>,
    selection: Option<Vec<usize>>,
    warnings_json: bool,
}

fn detect_source_format(input: &str) -> String {
    let registry = FormatRegistry::default();
    match registry.detect_format_from_filename(input) {
        Some(detected) => detected,
        None => {
            eprintln!("Error: Could not detect format from filename '{input}'");
            eprintln!("Please specify --from explicitly");
            std::process::exit(1);
        }
    }
}

fn load_document(registry: &FormatRegistry, input: &str, from: &str) -> Document {
    let source = fs::read_to_string(input).unwrap_or_else(|e| {
        eprintln!("Error reading file '{input}': {e}");
        std::process::exit(1);
    });

    registry.parse(&source, from).unwrap_or_else(|e| {
        eprintln!("Parse error: {e}");
        std::process::exit(1);
    })
}

/// Handle the convert command
fn handle_convert_command(
    request: &ConvertRequest,
    extra_params: &HashMap<String, String>,
    config: &DocmdConfig,
) {
    let registry = FormatRegistry::default();

    for name in [request.from, request.to] {
        if let Err(e) = registry.get(name) {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    }

    let doc = load_document(&registry, request.input, request.from);

    let text = if request.to == "markdown" {
        let options = markdown_options(config, extra_params);
        let result = match &request.selection {
            Some(indices) => convert_elements(select_elements(&doc, indices), &options),
            None => convert_document(&doc, &options),
        };
        report_warnings(&result, request.warnings_json);
        result.markdown
    } else {
        if request.selection.is_some() {
            eprintln!("Error: --select is only supported when converting to markdown");
            std::process::exit(1);
        }
        let mut format_options = HashMap::new();
        if request.to == "treeviz" && config.inspect.treeviz.show_styles {
            format_options.insert("show-styles".to_string(), "true".to_string());
        }
        for (key, value) in extra_params {
            format_options.insert(key.clone(), value.clone());
        }
        registry
            .serialize_with_options(&doc, request.to, &format_options)
            .unwrap_or_else(|e| {
                eprintln!("Serialization error: {e}");
                std::process::exit(1);
            })
    };

    write_output(request.output, &text);
}

/// Handle the inspect command
fn handle_inspect_command(
    input: &str,
    extra_params: &HashMap<String, String>,
    config: &DocmdConfig,
) {
    let registry = FormatRegistry::default();
    let from = detect_source_format(input);
    let doc = load_document(&registry, input, &from);

    if let Some(key) = extra_params.keys().next() {
        eprintln!("Error: inspect does not support the parameter '{key}'");
        std::process::exit(1);
    }

    let options = TreevizOptions::from(&config.inspect.treeviz);
    print!(
        "{}",
        docmd::formats::treeviz::to_treeviz_str_with_options(&doc, options)
    );
}

/// Handle the list-formats command
fn handle_list_formats_command() {
    let registry = FormatRegistry::default();
    println!("Available formats:\n");
    for name in registry.list_formats() {
        if let Ok(format) = registry.get(&name) {
            let mut modes = Vec::new();
            if format.supports_parsing() {
                modes.push("in");
            }
            if format.supports_serialization() {
                modes.push("out");
            }
            println!(
                "  {:<10} {:<8} {}",
                name,
                modes.join("/"),
                format.description()
            );
        }
    }
}

fn select_elements<'d>(doc: &'d Document, indices: &[usize]) -> Vec<&'d Element> {
    let children = &doc.body.children;
    indices
        .iter()
        .map(|&index| {
            children.get(index).unwrap_or_else(|| {
                eprintln!(
                    "Error: selection index {index} is out of range (document has {} top-level elements)",
                    children.len()
                );
                std::process::exit(1);
            })
        })
        .collect()
}

fn markdown_options(config: &DocmdConfig, extra_params: &HashMap<String, String>) -> ConvertOptions {
    ConvertOptions::from(&config.convert.markdown)
        .apply_params(extra_params)
        .unwrap_or_else(|e| {
            eprintln!("Error: {e}");
            std::process::exit(1);
        })
}

fn report_warnings(result: &ConversionResult, as_json: bool) {
    if as_json {
        match serde_json::to_string_pretty(&result.warnings) {
            Ok(json) => eprintln!("{json}"),
            Err(e) => {
                eprintln!("Error encoding warnings: {e}");
                std::process::exit(1);
            }
        }
        return;
    }
    for warning in &result.warnings {
        eprintln!("line {}: {}", warning.line, warning.message);
    }
}

fn write_output(output: Option<&str>, text: &str) {
    let mut data = text.to_string();
    if !data.is_empty() && !data.ends_with('\n') {
        data.push('\n');
    }
    match output {
        Some(path) => fs::write(path, data).unwrap_or_else(|e| {
            eprintln!("Error writing file '{path}': {e}");
            std::process::exit(1);
        }),
        None => print!("{data}"),
    }
}

fn load_cli_config(explicit_path: Option<&str>) -> DocmdConfig {
    let loader = Loader::new().with_optional_file("docmd.toml");
    let loader = if let Some(path) = explicit_path {
        loader.with_file(path)
    } else {
        loader
    };

    loader.build().unwrap_or_else(|err| {
        eprintln!("Failed to load configuration: {err}");
        std::process::exit(1);
    })
}

/// Move extras that map onto configuration keys into the config.
/// Markdown parameters stay in the map; `ConvertOptions::apply_params`
/// reads them.
fn apply_config_overrides(config: &mut DocmdConfig, extra_params: &mut HashMap<String, String>) {
    if let Some(raw) = extra_params.remove("show-styles") {
        config.inspect.treeviz.show_styles = parse_bool_arg("show-styles", &raw);
    }
}

fn parse_bool_arg(flag: &str, raw: &str) -> bool {
    match raw.to_lowercase().as_str() {
        "true" | "1" | "yes" | "y" => true,
        "false" | "0" | "no" | "n" => false,
        other => {
            eprintln!("Invalid boolean value '{other}' for --extra-{flag}");
            std::process::exit(1);
        }
    }
}
