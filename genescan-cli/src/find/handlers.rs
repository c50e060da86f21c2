use std::fmt::Write as FmtWrite;
use std::io::{self, BufRead, BufWriter, Write};

use anyhow::{Context, Result};
use clap::ArgMatches;

use genescan_core::utils::get_dynamic_reader_w_stdin;
use genescan_overlaprs::ChromosomeIndexSet;

use crate::common::{build_index, load_config};

pub fn run_find(matches: &ArgMatches) -> Result<()> {
    let queries = matches
        .get_one::<String>("queries")
        .map(String::as_str)
        .unwrap_or("-");

    let config = load_config(matches)?;
    let index = build_index(matches, &config)?;

    let reader = get_dynamic_reader_w_stdin(queries)?;

    let stdout = io::stdout();
    let mut writer = BufWriter::new(stdout.lock());
    process_queries(reader, &index, &mut writer)?;
    writer.flush()?;

    Ok(())
}

fn parse_query(line: &str) -> Result<(&str, u32)> {
    let mut fields = line.split_whitespace();

    let chr = fields
        .next()
        .ok_or_else(|| anyhow::anyhow!("Missing chromosome field"))?;
    let pos_str = fields
        .next()
        .ok_or_else(|| anyhow::anyhow!("Missing position field"))?;

    let pos = pos_str
        .parse::<u32>()
        .with_context(|| format!("Invalid position: {}", pos_str))?;

    Ok((chr, pos))
}

/// Write one `chr, pos, id, name, min, max` line per hit of every query.
fn process_queries<R: BufRead, W: Write>(
    reader: R,
    index: &ChromosomeIndexSet,
    writer: &mut W,
) -> Result<()> {
    let mut output_buffer = String::with_capacity(1024);

    for (idx, line) in reader.lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }

        let (chr, pos) =
            parse_query(&line).with_context(|| format!("Bad query at line {}", idx + 1))?;

        for gene in index.find_genes(chr, pos) {
            output_buffer.clear();
            writeln!(
                &mut output_buffer,
                "{}\t{}\t{}\t{}\t{}\t{}",
                chr, pos, gene.id, gene.name, gene.min, gene.max
            )?;
            writer.write_all(output_buffer.as_bytes())?;
        }
    }

    Ok(())
}
