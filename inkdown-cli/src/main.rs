// Command-line interface for inkdown
//
// The main role for the inkdown program is to take an HTML page that carries raw Markdown in
// one of its elements and write the page back with that element rendered and sanitized.
// The core capabilities live in the inkdown crate; this binary only deals with files, flags
// and configuration.
//
// Usage:
//  inkdown <page.html> [--selector S] [--source S] [--mode first|all] [-o <file>]  - Render a page (default)
//  inkdown render <page.html> ...                                                - Same as above (explicit)
//  inkdown convert <input> [--converter NAME] [-o <file>]                        - Convert a markup file to HTML
//  inkdown --list-converters                                                     - List available converters
//
// Extra Parameters:
//
// Configuration keys can be overridden using --extra-<parameter-name> <value>.
// The CLI layer strips the "extra-" prefix and applies the value on top of the loaded configuration.
// Example:
//  inkdown page.html --extra-gate --extra-mode all

use clap::{Arg, ArgAction, Command, ValueHint};
use inkdown::{render_markup, ConverterRegistry, RenderOptions, Renderer, SelectionMode};
use inkdown_config::{InkdownConfig, Loader};
use std::collections::HashMap;
use std::fs;
use std::io::{self, Read};
use tracing_subscriber::EnvFilter;

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
    let mut args = args.iter().peekable();

    while let Some(arg) = args.next() {
        let key = arg
            .strip_prefix("--extra-")
            .or_else(|| arg.strip_prefix("--extras-"));

        let Some(key) = key else {
            cleaned_args.push(arg.clone());
            continue;
        };

        // A following token that isn't a flag is this key's value
        let value = match args.peek() {
            Some(next) if !next.starts_with('-') => args.next().cloned(),
            _ => None,
        };
        extra_params.insert(key.to_string(), value.unwrap_or_else(|| "true".to_string()));
    }

    (cleaned_args, extra_params)
}

fn build_cli() -> Command {
    Command::new("inkdown")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Render Markdown held in HTML page elements")
        .long_about(
            "inkdown finds the element of an HTML page that holds raw Markdown, converts it,\n\
            sanitizes the result and writes the page back with the element rendered.\n\n\
            Commands:\n  \
            - render:  Render the markup held in a page (default command)\n  \
            - convert: Convert a single markup file to sanitized HTML\n\n\
            Extra Parameters:\n  \
            Use --extra-<key> [value] to override configuration keys.\n  \
            Boolean flags can omit the value (defaults to 'true').\n  \
            Keys: normalize, gate, gate-marker, gate-attribute, mode, converter,\n  \
            rendered-marker, allow-tags, allow-attributes, link-rel, max-source-bytes\n\n\
            Examples:\n  \
            inkdown post.html                              # Render the first .content element\n  \
            inkdown post.html --source '#debug-markdown'   # Read the Markdown from another element\n  \
            inkdown feed.html --mode all --extra-gate      # Render every tagged text/markdown element\n  \
            inkdown convert notes.md -o notes.html         # Convert a Markdown file",
        )
        .arg_required_else_help(true)
        .subcommand_required(false)
        .arg(
            Arg::new("list-converters")
                .long("list-converters")
                .help("List available converters")
                .action(ArgAction::SetTrue)
                .global(true),
        )
        .arg(
            Arg::new("config")
                .long("config")
                .value_name("PATH")
                .help("Path to an inkdown.toml configuration file")
                .value_hint(ValueHint::FilePath)
                .global(true),
        )
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .short('v')
                .help("Log debug diagnostics to stderr")
                .long_help(
                    "Log debug diagnostics (raw source, text before conversion, converted markup)\n\
                    to stderr. Without this flag RUST_LOG is honoured, defaulting to warnings only.",
                )
                .action(ArgAction::SetTrue)
                .global(true),
        )
        .subcommand(
            Command::new("render")
                .about("Render the markup held in an HTML page (default command)")
                .long_about(
                    "Locate the target element(s), read their text, convert and sanitize it,\n\
                    and replace the element content with the result.\n\n\
                    Pages without a matching element are written back unchanged.\n\
                    A conversion failure leaves the affected element untouched; the\n\
                    command still succeeds. Use --report to see per-element outcomes.\n\n\
                    Examples:\n  \
                    inkdown render post.html                     # Render to stdout\n  \
                    inkdown render post.html -o rendered.html    # Render to a file\n  \
                    inkdown render - < post.html                 # Read the page from stdin",
                )
                .arg(
                    Arg::new("input")
                        .help("HTML page to render ('-' for stdin)")
                        .required(true)
                        .index(1)
                        .value_hint(ValueHint::FilePath),
                )
                .arg(
                    Arg::new("output")
                        .long("output")
                        .short('o')
                        .help("Output file path (defaults to stdout)")
                        .value_hint(ValueHint::FilePath),
                )
                .arg(
                    Arg::new("selector")
                        .long("selector")
                        .value_name("SELECTOR")
                        .help("Selector for the element(s) to render (overrides config)")
                        .long_help(
                            "Compound selector for the element(s) whose content is replaced:\n\
                            a tag name, #id and .class parts, e.g. 'div.content' or '#post'.",
                        )
                        .value_hint(ValueHint::Other),
                )
                .arg(
                    Arg::new("source")
                        .long("source")
                        .value_name("SELECTOR")
                        .help("Read the source text from a separate element")
                        .value_hint(ValueHint::Other),
                )
                .arg(
                    Arg::new("mode")
                        .long("mode")
                        .help("Render the first match only, or all matches")
                        .value_parser(["first", "all"]),
                )
                .arg(
                    Arg::new("report")
                        .long("report")
                        .help("Print the render report as JSON on stderr")
                        .action(ArgAction::SetTrue),
                ),
        )
        .subcommand(
            Command::new("convert")
                .about("Convert a markup file to sanitized HTML")
                .long_about(
                    "Run a single file through normalization, conversion and sanitization.\n\n\
                    The converter is auto-detected from the file extension. --converter takes\n\
                    a converter name or a content type (e.g. text/markdown).\n\n\
                    Examples:\n  \
                    inkdown convert notes.md                          # Markdown to stdout\n  \
                    inkdown convert notes.txt -o notes.html           # Plain text to a file\n  \
                    inkdown convert - --converter markdown < notes    # Read from stdin",
                )
                .arg(
                    Arg::new("input")
                        .help("Input file path ('-' for stdin)")
                        .required(true)
                        .index(1)
                        .value_hint(ValueHint::FilePath),
                )
                .arg(
                    Arg::new("converter")
                        .long("converter")
                        .help("Converter name or content type (auto-detected if not specified)")
                        .value_hint(ValueHint::Other),
                )
                .arg(
                    Arg::new("output")
                        .long("output")
                        .short('o')
                        .help("Output file path (defaults to stdout)")
                        .value_hint(ValueHint::FilePath),
                ),
        )
}

fn main() {
    // Try to parse args. If no subcommand is provided, inject "render"
    let args: Vec<String> = std::env::args().collect();

    // Parse extra-* arguments before clap processing
    let (cleaned_args, mut extra_params) = parse_extra_args(&args);

    let cli = build_cli();
    let matches = match cli.clone().try_get_matches_from(&cleaned_args) {
        Ok(m) => m,
        Err(e) => {
            if cleaned_args.len() > 1
                && (!cleaned_args[1].starts_with('-') || cleaned_args[1] == "-")
                && !["render", "convert", "help"].contains(&cleaned_args[1].as_str())
            {
                let mut new_args = vec![cleaned_args[0].clone(), "render".to_string()];
                new_args.extend_from_slice(&cleaned_args[1..]);

                match cli.try_get_matches_from(&new_args) {
                    Ok(m) => m,
                    Err(e2) => e2.exit(),
                }
            } else {
                e.exit();
            }
        }
    };

    init_logging(matches.get_flag("verbose"));

    if matches.get_flag("list-converters") {
        handle_list_converters_command();
        return;
    }

    let mut config = load_cli_config(matches.get_one::<String>("config").map(|s| s.as_str()));
    apply_config_overrides(&mut config, &mut extra_params);
    for key in extra_params.keys() {
        tracing::warn!(key = %key, "Ignoring unknown --extra parameter");
    }

    match matches.subcommand() {
        Some(("render", sub_matches)) => {
            let input = sub_matches
                .get_one::<String>("input")
                .expect("input is required");
            if let Some(selector) = sub_matches.get_one::<String>("selector") {
                config.render.selector = selector.clone();
            }
            if let Some(source) = sub_matches.get_one::<String>("source") {
                config.render.source = Some(source.clone());
            }
            if let Some(mode) = sub_matches.get_one::<String>("mode") {
                config.render.mode = parse_mode_arg(mode);
            }
            let output = sub_matches.get_one::<String>("output").map(|s| s.as_str());
            let report = sub_matches.get_flag("report");
            handle_render_command(input, output, report, &config);
        }
        Some(("convert", sub_matches)) => {
            let input = sub_matches
                .get_one::<String>("input")
                .expect("input is required");
            let registry = ConverterRegistry::default();

            let converter = match sub_matches.get_one::<String>("converter") {
                Some(requested) => resolve_converter(&registry, requested).unwrap_or_else(|| {
                    eprintln!("Error: Unknown converter or content type '{requested}'");
                    eprintln!("Use --list-converters to see the available converters");
                    std::process::exit(1);
                }),
                None if input == "-" => config.render.converter.clone(),
                None => match registry.detect_converter_from_filename(input) {
                    Some(detected) => detected,
                    None => {
                        eprintln!("Error: Could not detect converter from filename '{input}'");
                        eprintln!("Please specify --converter explicitly");
                        std::process::exit(1);
                    }
                },
            };

            let output = sub_matches.get_one::<String>("output").map(|s| s.as_str());
            handle_convert_command(input, &converter, output, &config);
        }
        _ => {
            eprintln!("Unknown subcommand. Use --help for usage information.");
            std::process::exit(1);
        }
    }
}

/// Logs go to stderr so stdout only ever carries rendered HTML
fn init_logging(verbose: bool) {
    // --verbose enables DEBUG level, otherwise use RUST_LOG or default to WARN
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

/// Handle the render command
fn handle_render_command(
    input: &str,
    output: Option<&str>,
    print_report: bool,
    config: &InkdownConfig,
) {
    let renderer = Renderer::new(RenderOptions::from(config)).unwrap_or_else(|e| {
        eprintln!("Error: {e}");
        std::process::exit(1);
    });

    let page = read_input(input);
    let rendered = renderer.render_html(&page).unwrap_or_else(|e| {
        eprintln!("Render error: {e}");
        std::process::exit(1);
    });
    tracing::info!(
        input = %input,
        matched = rendered.report.matched,
        rendered = rendered.report.rendered(),
        "Page processed"
    );

    if print_report {
        match serde_json::to_string_pretty(&rendered.report) {
            Ok(json) => eprintln!("{json}"),
            Err(e) => {
                eprintln!("Error serializing report: {e}");
                std::process::exit(1);
            }
        }
    }

    write_output(output, &rendered.html);
}

/// Handle the convert command
fn handle_convert_command(
    input: &str,
    converter: &str,
    output: Option<&str>,
    config: &InkdownConfig,
) {
    let options = RenderOptions {
        converter: converter.to_string(),
        ..RenderOptions::from(config)
    };

    let source = read_input(input);
    let html = render_markup(&source, &options).unwrap_or_else(|e| {
        eprintln!("Conversion error: {e}");
        std::process::exit(1);
    });

    write_output(output, &html);
}

/// Handle the list-converters command
fn handle_list_converters_command() {
    let registry = ConverterRegistry::default();

    println!("Available converters:\n");
    for name in registry.list_converters() {
        if let Ok(converter) = registry.get(&name) {
            println!(
                "  {:<10} {:<14} {}",
                name,
                converter.content_type(),
                converter.description()
            );
        }
    }
}

/// Accept either a registered converter name or a content type
fn resolve_converter(registry: &ConverterRegistry, requested: &str) -> Option<String> {
    if registry.has(requested) {
        Some(requested.to_string())
    } else {
        registry.detect_converter_from_content_type(requested)
    }
}

fn read_input(input: &str) -> String {
    let result = if input == "-" {
        let mut buffer = String::new();
        io::stdin().read_to_string(&mut buffer).map(|_| buffer)
    } else {
        fs::read_to_string(input)
    };

    result.unwrap_or_else(|e| {
        eprintln!("Error reading file '{input}': {e}");
        std::process::exit(1);
    })
}

fn write_output(output: Option<&str>, content: &str) {
    match output {
        Some(path) => {
            fs::write(path, content).unwrap_or_else(|e| {
                eprintln!("Error writing file '{path}': {e}");
                std::process::exit(1);
            });
        }
        None => print!("{content}"),
    }
}

fn load_cli_config(explicit_path: Option<&str>) -> InkdownConfig {
    let loader = Loader::new().with_optional_file("inkdown.toml");
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

fn apply_config_overrides(config: &mut InkdownConfig, extra_params: &mut HashMap<String, String>) {
    if let Some(raw) = extra_params.remove("normalize") {
        config.render.normalize = parse_bool_arg("normalize", &raw);
    }
    if let Some(raw) = extra_params.remove("gate") {
        config.render.gate.enabled = parse_bool_arg("gate", &raw);
    }

    // Naming the gate implies turning it on
    if let Some(raw) = extra_params.remove("gate-marker") {
        config.render.gate.marker = raw;
        config.render.gate.enabled = true;
    }
    if let Some(raw) = extra_params.remove("gate-attribute") {
        config.render.gate.attribute = raw;
        config.render.gate.enabled = true;
    }

    if let Some(raw) = extra_params.remove("mode") {
        config.render.mode = parse_mode_arg(&raw);
    }
    if let Some(raw) = extra_params.remove("converter") {
        config.render.converter = raw;
    }
    if let Some(raw) = take_override(extra_params, &["rendered-marker", "marker"]) {
        config.render.rendered_marker = raw;
    }

    if let Some(raw) = take_override(extra_params, &["allow-tags", "allow-tag"]) {
        config.sanitize.extra_tags.extend(parse_list_arg(&raw));
    }
    if let Some(raw) = take_override(extra_params, &["allow-attributes", "allow-attribute"]) {
        config.sanitize.extra_attributes.extend(parse_list_arg(&raw));
    }
    if let Some(raw) = extra_params.remove("link-rel") {
        config.sanitize.link_rel = raw;
    }

    if let Some(raw) = extra_params.remove("max-source-bytes") {
        config.limits.max_source_bytes = raw.parse().unwrap_or_else(|_| {
            eprintln!("Invalid byte count '{raw}' for --extra-max-source-bytes");
            std::process::exit(1);
        });
    }
}

fn take_override(map: &mut HashMap<String, String>, keys: &[&str]) -> Option<String> {
    keys.iter().find_map(|key| map.remove(*key))
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

fn parse_mode_arg(raw: &str) -> SelectionMode {
    raw.parse().unwrap_or_else(|e| {
        eprintln!("Error: {e}");
        std::process::exit(1);
    })
}

fn parse_list_arg(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(str::to_string)
        .collect()
}
