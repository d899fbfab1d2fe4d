//! Query FASTA checks before a search.

use crate::libs::error::ShootError;
use anyhow::Context;
use lazy_static::lazy_static;
use regex::Regex;
use std::io::{BufRead, Write};

lazy_static! {
    static ref DISALLOWED_CHARS: Regex = Regex::new(r"[^A-Za-z0-9_\-.]").unwrap();
    static ref HEADER: Regex = Regex::new(r"^>.").unwrap();
    static ref RESIDUES: Regex = Regex::new(r"^[a-zA-Z]+$").unwrap();
}

/// Replace characters that tree tools choke on with `_`.
///
/// ```
/// use shoot::libs::query::sanitize_name;
///
/// assert_eq!(sanitize_name("sp|P12345|INS_HUMAN"), "sp_P12345_INS_HUMAN");
/// assert_eq!(sanitize_name("gene-1.2_a"), "gene-1.2_a");
/// ```
pub fn sanitize_name(name: &str) -> String {
    DISALLOWED_CHARS.replace_all(name, "_").into_owned()
}

/// Quick format check: a `>name` line followed by a line of letters.
pub fn check_query(infile: &str) -> anyhow::Result<()> {
    let mut lines = crate::reader(infile)?.lines();
    let header = lines.next().transpose()?.unwrap_or_default();
    let first_seq = lines.next().transpose()?.unwrap_or_default();

    if HEADER.is_match(&header) && RESIDUES.is_match(first_seq.trim_end_matches('\r')) {
        Ok(())
    } else {
        Err(ShootError::InvalidFasta(infile.to_string()).into())
    }
}

/// Path of the FASTA file to use downstream.
///
/// When the first record's name holds disallowed characters, a copy with a
/// cleaned header is written next to the input as `<infile>.sh.cleaned`.
pub fn clean_query(infile: &str) -> anyhow::Result<String> {
    let mut lines = crate::reader(infile)?.lines();
    let header = lines.next().transpose()?.unwrap_or_default();
    let name = header.trim_end().trim_start_matches('>');
    let cleaned = sanitize_name(name);

    if cleaned == name {
        return Ok(infile.to_string());
    }

    let outfile = format!("{}.sh.cleaned", infile);
    let mut writer = crate::writer(&outfile)?;
    writeln!(writer, ">{}", cleaned)?;
    for line in lines {
        writeln!(writer, "{}", line?)?;
    }
    writer
        .flush()
        .with_context(|| format!("could not write {}", outfile))?;

    Ok(outfile)
}
