use clap::*;
use shoot::libs::phylo::Tree;
use shoot::libs::scope::{narrow_file, narrow_newick, Bounds};
use std::io::Write;

// Create clap subcommand arguments
pub fn make_subcommand() -> Command {
    Command::new("narrow")
        .about("Cut a tree down to the neighbourhood of a gene")
        .after_help(
            r###"
Walks up from the gene towards the root and keeps the largest clade that stays
below the upper limit.

Notes:
* Without `--upper` the tree is returned unchanged.
* `--lower` lets the result exceed `--upper` when the smaller clade would have
  fewer taxa than this.
* The subtree root loses its branch length.
* `--in-place` overwrites the input file, which is left alone when the tree
  already fits.

Examples:
1. At most 50 taxa around the query:
   shoot narrow grafted.tre -g QUERY_gene -u 50

2. At most 50, but never fewer than 20:
   shoot narrow grafted.tre -g QUERY_gene -u 50 -l 20

3. Rewrite the file:
   shoot narrow grafted.tre -g QUERY_gene -u 50 --in-place
"###,
        )
        .arg(
            Arg::new("infile")
                .required(true)
                .num_args(1)
                .index(1)
                .help("Input filename. [stdin] for standard input"),
        )
        .arg(
            Arg::new("gene")
                .long("gene")
                .short('g')
                .required(true)
                .num_args(1)
                .help("Leaf name of the query gene"),
        )
        .arg(
            Arg::new("upper")
                .long("upper")
                .short('u')
                .num_args(1)
                .value_parser(value_parser!(usize))
                .help("Upper limit on the number of taxa, unless -l"),
        )
        .arg(
            Arg::new("lower")
                .long("lower")
                .short('l')
                .num_args(1)
                .value_parser(value_parser!(usize))
                .help("Exceed -u if the alternative has fewer taxa than this"),
        )
        .arg(
            Arg::new("in-place")
                .long("in-place")
                .action(ArgAction::SetTrue)
                .conflicts_with("outfile")
                .help("Overwrite the input file"),
        )
        .arg(
            Arg::new("outfile")
                .short('o')
                .long("outfile")
                .num_args(1)
                .default_value("stdout")
                .help("Output filename. [stdout] for screen"),
        )
}

// command implementation
pub fn execute(args: &ArgMatches) -> anyhow::Result<()> {
    //----------------------------
    // Args
    //----------------------------
    let infile = args.get_one::<String>("infile").unwrap();
    let gene = args.get_one::<String>("gene").unwrap();
    let bounds = Bounds::new(
        args.get_one::<usize>("upper").copied(),
        args.get_one::<usize>("lower").copied(),
    );

    //----------------------------
    // Process
    //----------------------------
    if args.get_flag("in-place") {
        if infile == "stdin" {
            anyhow::bail!("--in-place needs a file");
        }
        narrow_file(infile, gene, &bounds)?;
        return Ok(());
    }

    let tree = Tree::from_file(infile)?;
    let newick = narrow_newick(&tree, gene, &bounds)?;

    let mut writer = shoot::writer(args.get_one::<String>("outfile").unwrap())?;
    writeln!(writer, "{}", newick)?;
    writer.flush()?;

    Ok(())
}
