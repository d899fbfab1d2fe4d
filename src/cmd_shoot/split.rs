use clap::*;
use shoot::libs::split::{split_tree, SplitLayout, SplitOptions};
use std::path::Path;

// Create clap subcommand arguments
pub fn make_subcommand() -> Command {
    Command::new("split")
        .about("Split a large gene tree into subtrees and a supertree")
        .after_help(
            r###"
Cuts the tree into the largest clades holding at most `--taxa` genes. Each clade
is written as a subtree with its alignment; the supertree keeps the backbone
with every clade replaced by a `PART.<i>-<n>_genes` leaf.

Outputs, under `<dir of infile>/subtrees/` or `--outdir`:
* sub/<name>.<i>.tre                Subtree i
* sub/<name>.<i>.tre.unroot.tre     Subtree i, unrooted
* msa_sub/<name>.<i>.fa             Alignment of subtree i
* super/<name>.super.tre            Supertree
* super/<name>.super.tre.unroot.tre Supertree, unrooted

A tree that already fits is written as `sub/<name>.0.tre` alone.

With `--outgroup`, the sister gene with the fewest gaps is added to each
subtree and its alignment as `SHOOTOUTGROUP_<gene>`.

Prints the number of profile sequences: up to five per subtree.

Examples:
1. shoot split OG0000001_tree.txt OG0000001.fa

2. shoot split OG0000001_tree.txt OG0000001.fa -n 200 --outgroup --outdir parts
"###,
        )
        .arg(
            Arg::new("infile")
                .required(true)
                .num_args(1)
                .index(1)
                .help("Input tree filename"),
        )
        .arg(
            Arg::new("msa")
                .required(true)
                .num_args(1)
                .index(2)
                .help("Alignment of the tree's genes, FASTA"),
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
            Arg::new("outdir")
                .long("outdir")
                .num_args(1)
                .help("Output directory instead of <dir of infile>/subtrees"),
        )
}

// command implementation
pub fn execute(args: &ArgMatches) -> anyhow::Result<()> {
    //----------------------------
    // Args
    //----------------------------
    let infile = Path::new(args.get_one::<String>("infile").unwrap());
    let msa = Path::new(args.get_one::<String>("msa").unwrap());
    let options = SplitOptions {
        n_taxa: *args.get_one::<usize>("taxa").unwrap(),
        outgroup: args.get_flag("outgroup"),
    };

    let layout = match args.get_one::<String>("outdir") {
        Some(dir) => {
            let name = infile
                .file_name()
                .map(|s| s.to_string_lossy().to_string())
                .unwrap_or_else(|| "tree".to_string());
            SplitLayout::in_dir(Path::new(dir), &name)
        }
        None => SplitLayout::beside(infile),
    };

    //----------------------------
    // Process
    //----------------------------
    let summary = split_tree(infile, msa, &options, &layout)?;
    println!("{}", summary.n_profile);

    Ok(())
}
