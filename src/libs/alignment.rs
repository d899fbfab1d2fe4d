//! Multiple sequence alignment held in memory for splitting.

use crate::libs::error::ShootError;
use crate::libs::phylo::node::outgroup_name;
use anyhow::Context;
use std::collections::HashMap;
use std::io::{BufRead, Write};

/// Gap characters per aligned sequence.
pub type GapTable = HashMap<String, usize>;

#[derive(Debug, Default)]
pub struct Alignment {
    records: HashMap<String, noodles_fasta::Record>,
}

impl Alignment {
    pub fn from_file(infile: &str) -> anyhow::Result<Self> {
        let reader = intspan::reader(infile);
        Self::from_reader(reader).with_context(|| format!("Invalid alignment: {}", infile))
    }

    pub fn from_reader<R: BufRead>(reader: R) -> anyhow::Result<Self> {
        let mut fa_in = noodles_fasta::io::Reader::new(reader);
        let mut records = HashMap::new();

        for result in fa_in.records() {
            let record = result?;
            let name = String::from_utf8(record.name().into())?;
            records.insert(name, record);
        }

        Ok(Self { records })
    }

    /// Count of `-` in every sequence. Used to rank outgroup candidates.
    pub fn gap_counts(&self) -> GapTable {
        self.records
            .iter()
            .map(|(name, record)| {
                let seq: &[u8] = record.sequence().as_ref();
                (name.clone(), seq.iter().filter(|&&b| b == b'-').count())
            })
            .collect()
    }

    /// Write the sequences of `names`, in that order, and then the outgroup
    /// sequence under its `SHOOTOUTGROUP_` name.
    pub fn write_subset<W: Write>(
        &self,
        names: &[String],
        outgroup: Option<&str>,
        writer: W,
    ) -> anyhow::Result<()> {
        let mut fa_out = noodles_fasta::io::writer::Builder::default()
            .set_line_base_count(usize::MAX)
            .build_from_writer(writer);

        for name in names {
            let record = self
                .records
                .get(name)
                .ok_or_else(|| ShootError::MissingSequence(name.clone()))?;
            fa_out.write_record(record)?;
        }

        if let Some(gene) = outgroup {
            let record = self
                .records
                .get(gene)
                .ok_or_else(|| ShootError::MissingSequence(gene.to_string()))?;
            let definition = noodles_fasta::record::Definition::new(outgroup_name(gene), None);
            let renamed = noodles_fasta::Record::new(definition, record.sequence().clone());
            fa_out.write_record(&renamed)?;
        }

        fa_out.get_mut().flush()?;
        Ok(())
    }
}
