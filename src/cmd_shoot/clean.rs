use clap::*;
use shoot::libs::query::{check_query, clean_query};

// Create clap subcommand arguments
pub fn make_subcommand() -> Command {
    Command::new("clean")
        .about("Check a query FASTA and sanitise its name")
        .after_help(
            r###"
Checks that the file starts like FASTA: a `>name` line followed by a line of
residues. Characters other than letters, digits, `_`, `-` and `.` in the name
are replaced with `_`.

Prints the file to use from here on: the input itself, or `<infile>.sh.cleaned`
when the name had to change.

Examples:
1. shoot clean query.fa
"###,
        )
        .arg(
            Arg::new("infile")
                .required(true)
                .num_args(1)
                .index(1)
                .help("Query FASTA filename"),
        )
}

// command implementation
pub fn execute(args: &ArgMatches) -> anyhow::Result<()> {
    let infile = args.get_one::<String>("infile").unwrap();

    check_query(infile)?;
    let outfile = clean_query(infile)?;
    println!("{}", outfile);

    Ok(())
}
