extern crate clap;
use clap::*;

mod cmd_shoot;

fn main() -> anyhow::Result<()> {
    let app = Command::new("shoot")
        .version(crate_version!())
        .author(crate_authors!())
        .about("`shoot` - Phylogenetic search over gene trees")
        .propagate_version(true)
        .arg_required_else_help(true)
        .color(ColorChoice::Auto)
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .short('v')
                .global(true)
                .action(ArgAction::Count)
                .help("Log progress to stderr, -vv for details"),
        )
        .subcommand(cmd_shoot::narrow::make_subcommand())
        .subcommand(cmd_shoot::orthologs::make_subcommand())
        .subcommand(cmd_shoot::split::make_subcommand())
        .subcommand(cmd_shoot::split_db::make_subcommand())
        .subcommand(cmd_shoot::clean::make_subcommand())
        .after_help(
            r###"Subcommands:

* Placed trees:
    * narrow    - Cut a tree down to the neighbourhood of a gene
    * orthologs - Orthologs of a gene read off the tree

* Databases:
    * split     - Split a large gene tree into subtrees and a supertree
    * split-db  - Split every large tree of an OrthoFinder database

* Queries:
    * clean     - Check a query FASTA and sanitise its name

Log level follows RUST_LOG when set.

"###,
        );

    let matches = app.get_matches();
    init_logging(matches.get_count("verbose"));

    match matches.subcommand() {
        Some(("narrow", sub_matches)) => cmd_shoot::narrow::execute(sub_matches),
        Some(("orthologs", sub_matches)) => cmd_shoot::orthologs::execute(sub_matches),
        Some(("split", sub_matches)) => cmd_shoot::split::execute(sub_matches),
        Some(("split-db", sub_matches)) => cmd_shoot::split_db::execute(sub_matches),
        Some(("clean", sub_matches)) => cmd_shoot::clean::execute(sub_matches),
        _ => unreachable!(),
    }?;

    Ok(())
}

// stdout carries results, so logs go to stderr
fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
