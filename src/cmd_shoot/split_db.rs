use clap::*;
use shoot::libs::split::{database_jobs, split_database, SplitOptions};
use std::path::Path;

// Create clap subcommand arguments
pub fn make_subcommand() -> Command {
    Command::new("split-db")
        .about("Split every large tree of an OrthoFinder database")
        .after_help(
            r###"
Runs `shoot split` on each `Gene_Trees/OG*_tree.txt` of the database, with the
alignment `MultipleSequenceAlignments/OG*.fa`. Outputs go to
`Gene_Trees/subtrees/`.

A tree that cannot be split is reported on stderr and skipped.

Prints the total number of profile sequences over all split trees.

Examples:
1. shoot split-db OrthoFinder/Results_Jan01 -p 8

2. shoot split-db OrthoFinder/Results_Jan01 -n 200 --outgroup -p 8
"###,
        )
        .arg(
            Arg::new("dir")
                .required(true)
                .num_args(1)
                .index(1)
                .help("Database directory"),
        )
        .arg(
            Arg::new("taxa")
                .long("taxa")
                .short('n')
                .num_args(1)
                .default_value("500")
                .value_parser(value_parser!(usize))
                .help("Largest number of genes in a subtree"),
        )
        .arg(
            Arg::new("outgroup")
                .long("outgroup")
                .action(ArgAction::SetTrue)
                .help("Add an outgroup gene to each subtree"),
        )
        .arg(
            Arg::new("parallel")
                .long("parallel")
                .short('p')
                .num_args(1)
                .default_value("1")
                .value_parser(value_parser!(usize))
                .help("Number of threads for parallel processing"),
        )
}

// command implementation
pub fn execute(args: &ArgMatches) -> anyhow::Result<()> {
    //----------------------------
    // Args
    //----------------------------
    let dir = Path::new(args.get_one::<String>("dir").unwrap());
    let options = SplitOptions {
        n_taxa: *args.get_one::<usize>("taxa").unwrap(),
        outgroup: args.get_flag("outgroup"),
    };
    let opt_parallel = *args.get_one::<usize>("parallel").unwrap();

    //----------------------------
    // Process
    //----------------------------
    let jobs = database_jobs(dir)?;
    let summary = split_database(&jobs, &options, opt_parallel)?;
    println!("{}", summary.n_profile);

    Ok(())
}
