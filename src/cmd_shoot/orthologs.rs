use clap::*;
use shoot::libs::ortholog::{infer_orthologs, write_orthologs};
use shoot::libs::phylo::Tree;
use std::io::Write;

// Create clap subcommand arguments
pub fn make_subcommand() -> Command {
    Command::new("orthologs")
        .about("Orthologs of a gene read off the tree")
        .after_help(
            r###"
Reports, species by species, the genes that are orthologous to the query gene.

Notes:
* Gene names must start with the species, as `genus_species_geneID`.
* At each ancestor of the query the clade on the other side is taken when its
  species do not reappear on the query's side. One shared species is tolerated
  from 4 species on, two from 9 species on.
* Output is tab separated with a `Species  Orthologs` header.

Examples:
1. Orthologs of a placed query:
   shoot orthologs grafted.tre -g QUERY_gene

2. Save the report:
   shoot orthologs grafted.tre -g QUERY_gene -o query.orthologs.tsv
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
    let outfile = args.get_one::<String>("outfile").unwrap();

    //----------------------------
    // Process
    //----------------------------
    let tree = Tree::from_file(infile)?;
    let rows = infer_orthologs(&tree, gene)?;

    let mut writer = shoot::writer(outfile)?;
    write_orthologs(&rows, &mut writer)?;
    writer.flush()?;

    Ok(())
}
