// Command-line interface for page-tei
//
// This binary converts Transkribus exports (a folder with mets.xml and one PAGE XML file per page)
// into TEI documents, one per export. The conversion itself lives in the page-tei crate; this crate
// only resolves configuration, installs logging and reports results.
//
// Usage:
//  page2tei -i <infolder> -o <outfolder> [--ignore-warnings]   - Convert every export below infolder (default)
//  page2tei convert -i <infolder> -o <outfolder>                - Same as above (explicit)
//  page2tei line <text> [--custom <custom attribute>]           - Render one line with its annotations
//  page2tei list-tags                                           - Print the effective tag tables
//
// Configuration:
//
// Defaults are embedded from page-tei-config. A page2tei.toml in the working directory and a file
// given with --config are layered on top, and command line flags win over both.

use clap::{Arg, ArgAction, ArgMatches, Command, ValueHint};
use page_tei::annotation::{IgnoreWarnings, TracingWarnings, WarningSink};
use page_tei::{convert_folder, render_line, TagTables};
use page_tei_config::{Loader, PageTeiConfig};
use std::path::Path;
use tracing_subscriber::EnvFilter;

/// Picked up from the working directory when present.
const LOCAL_CONFIG: &str = "page2tei.toml";

const SUBCOMMANDS: &[&str] = &["convert", "line", "list-tags", "help"];

fn build_cli() -> Command {
    Command::new("page2tei")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Convert Transkribus PAGE XML exports into TEI")
        .long_about(
            "page2tei converts Transkribus exports into TEI documents.\n\n\
            Inline annotations stored in the custom attribute of each line (persons, places,\n\
            abbreviations, dates, text styles...) are turned into nested TEI markup.\n\n\
            Examples:\n  \
            page2tei -i export/ -o tei/                   # Convert every export below export/\n  \
            page2tei -i export/ -o tei/ --ignore-warnings # Same, without annotation warnings\n  \
            page2tei line 'xyz' --custom 'abbrev {offset:0;length:2;expansion:example;}'\n  \
            page2tei list-tags                            # Show tag names and deepness",
        )
        .arg_required_else_help(true)
        .subcommand_required(false)
        .arg(
            Arg::new("config")
                .long("config")
                .value_name("PATH")
                .help("Path to a page2tei.toml configuration file")
                .value_hint(ValueHint::FilePath)
                .global(true),
        )
        .arg(
            Arg::new("tag-names")
                .long("tag-names")
                .value_name("JSON")
                .help("JSON file mapping source tag names to TEI element names")
                .value_hint(ValueHint::FilePath)
                .global(true),
        )
        .arg(
            Arg::new("tag-deepness")
                .long("tag-deepness")
                .value_name("JSON")
                .help("JSON file mapping tag names to nesting ranks")
                .value_hint(ValueHint::FilePath)
                .global(true),
        )
        .arg(
            Arg::new("ignore-warnings")
                .long("ignore-warnings")
                .alias("ignore_warnings")
                .help("Do not report annotation warnings, e.g. abbreviations without expansion")
                .action(ArgAction::SetTrue)
                .global(true),
        )
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .short('v')
                .help("Log every processed file (same as RUST_LOG=debug)")
                .action(ArgAction::SetTrue)
                .global(true),
        )
        .subcommand(
            Command::new("convert")
                .about("Convert every export below a folder (default command)")
                .long_about(
                    "Convert Transkribus exports to TEI.\n\n\
                    Every mets.xml found below the input folder is treated as one export.\n\
                    Each export is written to <outfolder>/<export folder name>.xml; the folder\n\
                    hierarchy of the input is not copied.\n\n\
                    Examples:\n  \
                    page2tei convert -i export/ -o tei/\n  \
                    page2tei -i export/ -o tei/              # 'convert' is optional",
                )
                .arg(
                    Arg::new("infolder")
                        .long("infolder")
                        .short('i')
                        .help("Folder with the exports to process (an unzipped Transkribus export)")
                        .required(true)
                        .value_hint(ValueHint::DirPath),
                )
                .arg(
                    Arg::new("outfolder")
                        .long("outfolder")
                        .short('o')
                        .help("Folder the TEI files are written to (created if missing)")
                        .required(true)
                        .value_hint(ValueHint::DirPath),
                )
                .arg(
                    Arg::new("publisher")
                        .long("publisher")
                        .help("Publisher written to the TEI header")
                        .value_hint(ValueHint::Other),
                )
                .arg(
                    Arg::new("no-validate")
                        .long("no-validate")
                        .help("Skip the well-formedness check of written files")
                        .action(ArgAction::SetTrue),
                ),
        )
        .subcommand(
            Command::new("line")
                .about("Render a single line of text with its annotations")
                .arg(
                    Arg::new("text")
                        .help("Line text")
                        .required(true)
                        .index(1),
                )
                .arg(
                    Arg::new("custom")
                        .long("custom")
                        .short('c')
                        .help("Custom attribute of the line, e.g. 'place {offset:0;length:4;}'"),
                ),
        )
        .subcommand(
            Command::new("list-tags").about("Print the tag name conversions and deepness ranks"),
        )
}

/// Parse `args`, injecting `convert` when no subcommand was given.
fn parse_args(cli: Command, args: &[String]) -> Result<ArgMatches, clap::Error> {
    match cli.clone().try_get_matches_from(args) {
        Ok(matches) => Ok(matches),
        Err(err) => {
            let inject = args.len() > 1
                && !SUBCOMMANDS.contains(&args[1].as_str())
                && !matches!(args[1].as_str(), "-h" | "--help" | "-V" | "--version");
            if !inject {
                return Err(err);
            }
            let mut injected = vec![args[0].clone(), "convert".to_string()];
            injected.extend_from_slice(&args[1..]);
            cli.try_get_matches_from(&injected)
        }
    }
}

fn main() {
    let args: Vec<String> = std::env::args().collect();
    let matches = parse_args(build_cli(), &args).unwrap_or_else(|e| e.exit());

    init_tracing(matches.get_flag("verbose"));

    let config = load_cli_config(&matches);
    let tables = config.tags.tag_tables().unwrap_or_else(|err| {
        eprintln!("Error loading tag tables: {err}");
        std::process::exit(1);
    });

    match matches.subcommand() {
        Some(("convert", sub_matches)) => {
            let input = sub_matches
                .get_one::<String>("infolder")
                .expect("infolder is required");
            let output = sub_matches
                .get_one::<String>("outfolder")
                .expect("outfolder is required");
            handle_convert_command(input, output, &tables, &config);
        }
        Some(("line", sub_matches)) => {
            let text = sub_matches
                .get_one::<String>("text")
                .expect("text is required");
            let custom = sub_matches.get_one::<String>("custom").map(|s| s.as_str());
            handle_line_command(text, custom, &tables, &config);
        }
        Some(("list-tags", _)) => {
            print!("{}", format_tag_tables(&tables));
        }
        _ => {
            eprintln!("Unknown subcommand. Use --help for usage information.");
            std::process::exit(1);
        }
    }
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn load_cli_config(matches: &ArgMatches) -> PageTeiConfig {
    let loader = Loader::new().with_optional_file(LOCAL_CONFIG);
    let loader = if let Some(path) = matches.get_one::<String>("config") {
        loader.with_file(path)
    } else {
        loader
    };

    apply_cli_overrides(loader, matches)
        .and_then(Loader::build)
        .unwrap_or_else(|err| {
            eprintln!("Failed to load configuration: {err}");
            std::process::exit(1);
        })
}

fn apply_cli_overrides(
    mut loader: Loader,
    matches: &ArgMatches,
) -> Result<Loader, page_tei_config::ConfigError> {
    if matches.get_flag("ignore-warnings") {
        loader = loader.set_override("convert.ignore_warnings", true)?;
    }
    if let Some(path) = matches.get_one::<String>("tag-names") {
        loader = loader.set_override("tags.names_file", path.as_str())?;
    }
    if let Some(path) = matches.get_one::<String>("tag-deepness") {
        loader = loader.set_override("tags.deepness_file", path.as_str())?;
    }
    if let Some(("convert", sub_matches)) = matches.subcommand() {
        if let Some(publisher) = sub_matches.get_one::<String>("publisher") {
            loader = loader.set_override("convert.publisher", publisher.as_str())?;
        }
        if sub_matches.get_flag("no-validate") {
            loader = loader.set_override("convert.validate", false)?;
        }
    }
    Ok(loader)
}

fn handle_convert_command(input: &str, output: &str, tables: &TagTables, config: &PageTeiConfig) {
    let options = config.convert_options();
    let report = convert_folder(Path::new(input), Path::new(output), tables, &options)
        .unwrap_or_else(|err| {
            eprintln!("Error: {err}");
            std::process::exit(1);
        });

    let invalid = report.invalid().count();
    eprintln!(
        "Converted {} export(s), {} failed, {} not well-formed",
        report.converted.len(),
        report.failed.len(),
        invalid
    );
    for (path, err) in &report.failed {
        eprintln!("  {}: {err}", path.display());
    }
    if !report.is_success() {
        std::process::exit(1);
    }
}

fn handle_line_command(text: &str, custom: Option<&str>, tables: &TagTables, config: &PageTeiConfig) {
    let mut logged = TracingWarnings::default();
    let mut ignored = IgnoreWarnings;
    let sink: &mut dyn WarningSink = if config.convert.ignore_warnings {
        &mut ignored
    } else {
        &mut logged
    };
    println!("{}", render_line(text, custom, tables, sink));
}

fn format_tag_tables(tables: &TagTables) -> String {
    let mut out = String::from("Tag names:\n");
    for (source, target) in tables.names.entries() {
        out.push_str(&format!("  {source} -> {target}\n"));
    }
    out.push_str("Deepness:\n");
    for (name, rank) in tables.ranks.snapshot() {
        out.push_str(&format!("  {name} {rank}\n"));
    }
    out
}
