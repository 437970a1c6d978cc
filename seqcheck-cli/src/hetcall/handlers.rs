use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::Result;
use clap::ArgMatches;

use seqcheck_sanger::{CallTable, ExternalTraceDecoder, SangerError, TraceDecoder, TraceFiles};

use crate::load_config;

///
/// Het call at `index`, reading the trace's call table and decoding it
/// first when a decoder is available.
///
pub fn het_call_for_trace(
    trace: &str,
    index: i64,
    decoder: Option<&dyn TraceDecoder>,
) -> Result<String> {
    let files = TraceFiles::for_trace(trace);
    let tab = match decoder {
        Some(decoder) => decoder.ensure_call_table(&files)?.to_path_buf(),
        None if files.tab.is_file() => files.tab.clone(),
        None => return Err(SangerError::MissingDecoderOutput(files.tab).into()),
    };
    let table = CallTable::from_path(&tab)?;
    Ok(table.het_call(index))
}

pub fn run_hetcall(matches: &ArgMatches) -> Result<()> {
    let trace = matches
        .get_one::<String>("trace")
        .expect("A path to a trace is required.");
    let index = matches
        .get_one::<i64>("index")
        .expect("A position index is required.");

    let mut config = load_config(matches)?;
    if let Some(decoder) = matches.get_one::<String>("trace-decoder") {
        config.trace_decoder = Some(PathBuf::from(decoder));
    }

    let decoder = config.trace_decoder.as_ref().map(ExternalTraceDecoder::new);
    let call = het_call_for_trace(
        trace,
        *index,
        decoder.as_ref().map(|d| d as &dyn TraceDecoder),
    )?;

    let stdout = io::stdout();
    let mut out = stdout.lock();
    writeln!(out, "{}", call)?;
    Ok(())
}
