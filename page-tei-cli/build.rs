use clap::{Arg, ArgAction, Command, ValueHint};
use clap_complete::{generate_to, shells::*};
use std::env;
use std::io::Error;

// Mirror of the command line from src/main.rs
// Build scripts can't access src/ modules, so the definition is repeated here
fn build_cli() -> Command {
    Command::new("page2tei")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Convert Transkribus PAGE XML exports into TEI")
        .arg_required_else_help(true)
        .arg(
            Arg::new("config")
                .long("config")
                .value_name("PATH")
                .value_hint(ValueHint::FilePath)
                .global(true),
        )
        .arg(
            Arg::new("tag-names")
                .long("tag-names")
                .value_name("JSON")
                .value_hint(ValueHint::FilePath)
                .global(true),
        )
        .arg(
            Arg::new("tag-deepness")
                .long("tag-deepness")
                .value_name("JSON")
                .value_hint(ValueHint::FilePath)
                .global(true),
        )
        .arg(
            Arg::new("ignore-warnings")
                .long("ignore-warnings")
                .action(ArgAction::SetTrue)
                .global(true),
        )
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .short('v')
                .action(ArgAction::SetTrue)
                .global(true),
        )
        .subcommand(
            Command::new("convert")
                .about("Convert every export below a folder")
                .arg(
                    Arg::new("infolder")
                        .long("infolder")
                        .short('i')
                        .required(true)
                        .value_hint(ValueHint::DirPath),
                )
                .arg(
                    Arg::new("outfolder")
                        .long("outfolder")
                        .short('o')
                        .required(true)
                        .value_hint(ValueHint::DirPath),
                )
                .arg(Arg::new("publisher").long("publisher"))
                .arg(
                    Arg::new("no-validate")
                        .long("no-validate")
                        .action(ArgAction::SetTrue),
                ),
        )
        .subcommand(
            Command::new("line")
                .about("Render a single line of text with its annotations")
                .arg(Arg::new("text").required(true).index(1))
                .arg(Arg::new("custom").long("custom").short('c')),
        )
        .subcommand(Command::new("list-tags").about("Print the tag tables"))
}

fn main() -> Result<(), Error> {
    let outdir = match env::var_os("OUT_DIR") {
        None => return Ok(()),
        Some(outdir) => outdir,
    };

    let mut cmd = build_cli();

    // Generate completions for bash
    generate_to(Bash, &mut cmd, "page2tei", &outdir)?;

    // Generate completions for zsh
    generate_to(Zsh, &mut cmd, "page2tei", &outdir)?;

    // Generate completions for fish
    generate_to(Fish, &mut cmd, "page2tei", &outdir)?;

    println!("cargo:warning=Shell completions generated in {outdir:?}");

    Ok(())
}
