use anyhow::Context;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;

/// Open a file for buffered reading, "stdin" for standard input.
/// Files ending in `.gz` are not supported here; use `intspan::reader` for those.
///
/// ```
/// use std::io::BufRead;
/// let reader = shoot::reader("tests/shoot/abcd.nwk").unwrap();
/// assert_eq!(reader.lines().count(), 1);
/// ```
pub fn reader(input: &str) -> anyhow::Result<Box<dyn BufRead>> {
    let reader: Box<dyn BufRead> = if input == "stdin" {
        Box::new(BufReader::new(std::io::stdin()))
    } else {
        let file = std::fs::File::open(input)
            .with_context(|| format!("could not open {}", input))?;
        Box::new(BufReader::new(file))
    };

    Ok(reader)
}

/// Create a buffered writer, "stdout" for the screen.
pub fn writer(output: &str) -> anyhow::Result<Box<dyn Write>> {
    let writer: Box<dyn Write> = if output == "stdout" {
        Box::new(BufWriter::new(std::io::stdout()))
    } else {
        let file = std::fs::File::create(output)
            .with_context(|| format!("could not create {}", output))?;
        Box::new(BufWriter::new(file))
    };

    Ok(writer)
}

/// Create a directory and its parents. Existing directories are fine, so
/// concurrent jobs may race on the same path.
pub fn ensure_dir(dir: &Path) -> anyhow::Result<()> {
    std::fs::create_dir_all(dir)
        .with_context(|| format!("could not create directory {}", dir.display()))
}

/// Write `content` plus a trailing newline to `path`.
pub fn write_line(path: &Path, content: &str) -> anyhow::Result<()> {
    let mut file = BufWriter::new(
        std::fs::File::create(path)
            .with_context(|| format!("could not create {}", path.display()))?,
    );
    writeln!(file, "{}", content)?;
    file.flush()
        .with_context(|| format!("could not write {}", path.display()))
}
