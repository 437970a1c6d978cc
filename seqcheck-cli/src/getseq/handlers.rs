use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, ensure};
use clap::ArgMatches;
use serde::Serialize;

use seqcheck_core::utils::get_dynamic_reader_w_stdin;
use seqcheck_core::{GenomicRange, RegionError, RegionResolver, SeqCheckConfig};
use seqcheck_refseq::{
    FastaReference, GenomeVersion, ReferenceError, ReferenceSource, UcscDasClient, dash_position,
    highlight_position, reverse_complement,
};
use seqcheck_sanger::{
    Ab1BasecallDecoder, ExternalTraceDecoder, ObservedSequence, Reconciler, Reconciliation,
    SangerError, TraceDecoder, find_best_match,
};

use crate::load_config;

/// Name used for a location given directly on the command line.
const QUERY_NAME: &str = "query";

/// Input argument that reads a query file from stdin.
const STDIN_INPUT: &str = "-";

#[derive(Debug, Clone, Default)]
pub struct OutputOptions {
    pub dash: bool,
    pub header: bool,
    pub rc: bool,
    pub json: bool,
}

/// Where the Sanger read for each input comes from.
#[derive(Debug, Clone)]
pub enum ReadSource {
    Absent,
    File(String),
    Directory(PathBuf),
}

#[derive(Serialize, Debug)]
pub struct Report {
    pub name: String,
    pub location: String,
    pub range: String,
    pub reference: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub observed: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reconciliation: Option<Reconciliation>,
}

impl Report {
    fn write_text<W: Write>(&self, out: &mut W, options: &OutputOptions) -> io::Result<()> {
        if options.header {
            writeln!(out, "> {} {} {}", self.name, self.location, self.range)?;
        }
        writeln!(out, "Reference Sequence:\t{}", self.reference)?;
        if let Some(observed) = &self.observed {
            writeln!(out, "Sanger Sequence:\t{}", observed)?;
        }
        if let Some(reconciliation) = &self.reconciliation {
            writeln!(out, "{}", reconciliation.summary())?;
            if let Some(het_call) = &reconciliation.het_call {
                writeln!(out, "Het Call:\t{}", het_call)?;
            }
        }
        Ok(())
    }
}

///
/// Everything needed to answer one `getseq` input line.
///
pub struct GetSeq {
    pub resolver: RegionResolver,
    pub upstream: usize,
    pub downstream: usize,
    pub reconciler: Reconciler,
    pub source: Box<dyn ReferenceSource>,
    pub reads: ReadSource,
    pub basecall_decoder: Box<dyn TraceDecoder>,
    pub call_table_decoder: Option<Box<dyn TraceDecoder>>,
    pub options: OutputOptions,
}

impl GetSeq {
    ///
    /// Build from configuration, with the reference source chosen by the
    /// presence of a FASTA path.
    ///
    pub fn from_config(
        config: &SeqCheckConfig,
        genome: GenomeVersion,
        reads: ReadSource,
        options: OutputOptions,
    ) -> Result<Self> {
        ensure!(
            config.upstream >= 0 && config.downstream >= 0,
            "Window sizes must not be negative (upstream={}, downstream={})",
            config.upstream,
            config.downstream
        );
        let upstream = config.upstream as usize;
        let downstream = config.downstream as usize;

        let source: Box<dyn ReferenceSource> = match &config.fasta {
            Some(fasta) => Box::new(FastaReference::open(fasta)?),
            None => Box::new(UcscDasClient::new(genome).with_base_url(&config.das_url)),
        };
        log::info!("Reference source: {}", source.describe());

        let external = config
            .trace_decoder
            .as_ref()
            .map(|program| ExternalTraceDecoder::new(program));
        let basecall_decoder: Box<dyn TraceDecoder> = match &external {
            Some(decoder) => Box::new(decoder.clone()),
            None => Box::new(Ab1BasecallDecoder),
        };
        let call_table_decoder = external.map(|d| Box::new(d) as Box<dyn TraceDecoder>);

        Ok(GetSeq {
            resolver: config.resolver(),
            upstream,
            downstream,
            reconciler: Reconciler::new(upstream, downstream)
                .with_window_policy(config.window_policy),
            source,
            reads,
            basecall_decoder,
            call_table_decoder,
            options,
        })
    }

    ///
    /// Offset of the queried base inside the fetched window. For a position
    /// this is measured from the end so that a clamped start does not shift
    /// it.
    ///
    fn variant_offset(&self, location: &str, range: &GenomicRange) -> Option<usize> {
        if RegionResolver::is_position(location) {
            usize::try_from(range.end() - self.downstream as i64 - range.start()).ok()
        } else {
            Some(self.upstream)
        }
    }

    fn load_read(&self, name: &str) -> Result<Option<ObservedSequence>> {
        let path = match &self.reads {
            ReadSource::Absent => return Ok(None),
            ReadSource::File(path) => path.clone(),
            ReadSource::Directory(dir) => find_best_match(name, dir)?.to_string_lossy().into_owned(),
        };
        let observed = ObservedSequence::load(&path, Some(self.basecall_decoder.as_ref()))?;
        Ok(Some(observed))
    }

    pub fn process(&self, name: &str, location: &str) -> Result<Report> {
        let range = self.resolver.resolve(location)?;
        log::debug!("{} resolved to {}", location, range);

        let sequence = self.source.fetch(&range)?;
        let offset = self.variant_offset(location, &range);

        let mut reference = sequence.clone();
        if let Some(offset) = offset.filter(|_| RegionResolver::is_position(location)) {
            reference = highlight_position(&reference, offset);
            if self.options.dash {
                reference = dash_position(&reference, offset);
            }
        }
        if self.options.rc {
            reference = reverse_complement(&reference);
        }

        let (observed, reconciliation) = match self.load_read(name)? {
            Some(read) => {
                let reconciler = match offset {
                    Some(offset) => self.reconciler.with_variant_offset(offset),
                    None => self.reconciler,
                };
                let result = reconciler.reconcile_observed(
                    &sequence,
                    &read,
                    self.call_table_decoder.as_deref(),
                )?;
                (Some(result.window.composite(self.options.dash)), Some(result))
            }
            None => (None, None),
        };

        Ok(Report {
            name: name.to_string(),
            location: location.to_string(),
            range: range.as_string(),
            reference,
            observed,
            reconciliation,
        })
    }

    ///
    /// Answer every query, reporting recognised per-input failures in place
    /// and stopping on anything else.
    ///
    pub fn run<W: Write>(&self, queries: &[(String, String)], out: &mut W) -> Result<()> {
        for (name, location) in queries {
            match self.process(name, location) {
                Ok(report) => {
                    if self.options.json {
                        serde_json::to_writer(&mut *out, &report)?;
                        writeln!(out)?;
                    } else {
                        report.write_text(out, &self.options)?;
                    }
                }
                Err(e) if is_recoverable(&e) => {
                    log::debug!("{:?}", e);
                    writeln!(out, "{} in {}: {}", location, name, e)?;
                }
                Err(e) => return Err(e.context(format!("{} in {}", location, name))),
            }
        }
        Ok(())
    }
}

///
/// Errors that only spoil one input line.
///
fn is_recoverable(e: &anyhow::Error) -> bool {
    if e.downcast_ref::<RegionError>().is_some() {
        return true;
    }
    if let Some(e) = e.downcast_ref::<ReferenceError>() {
        return matches!(
            e,
            ReferenceError::NoSequenceFound(_) | ReferenceError::SequenceNotInFasta { .. }
        );
    }
    if let Some(e) = e.downcast_ref::<SangerError>() {
        return matches!(
            e,
            SangerError::UnknownAmbiguityCode(_)
                | SangerError::NoMatchFound { .. }
                | SangerError::NoAnchorFound
                | SangerError::VariantOutOfBounds { .. }
                | SangerError::ReferenceTooShort { .. }
                | SangerError::WindowUnderflow(_)
        );
    }
    false
}

///
/// Interpret the input argument: an existing file (or `-` for stdin) holds
/// `name<TAB>location` lines, anything else is a single location.
///
pub fn read_queries(input: &str) -> Result<Vec<(String, String)>> {
    if input != STDIN_INPUT && !Path::new(input).is_file() {
        return Ok(vec![(QUERY_NAME.to_string(), input.trim().to_string())]);
    }

    let reader = get_dynamic_reader_w_stdin(input)?;
    let mut queries = Vec::new();
    for line in reader.lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let (name, location) = line
            .split_once('\t')
            .with_context(|| format!("Expected name<TAB>location, found '{}'", line))?;
        queries.push((name.to_string(), location.trim().to_string()));
    }
    Ok(queries)
}

pub fn run_getseq(matches: &ArgMatches) -> Result<()> {
    let mut config = load_config(matches)?;

    if let Some(upstream) = matches.get_one::<i64>("upstream") {
        config.upstream = *upstream;
    }
    if let Some(downstream) = matches.get_one::<i64>("downstream") {
        config.downstream = *downstream;
    }
    if let Some(genome) = matches.get_one::<String>("genome") {
        config.genome_version = genome.clone();
    }
    if let Some(fasta) = matches.get_one::<String>("fasta") {
        config.fasta = Some(PathBuf::from(fasta));
    }
    if let Some(decoder) = matches.get_one::<String>("trace-decoder") {
        config.trace_decoder = Some(PathBuf::from(decoder));
    }

    // an unknown assembly ends the run before anything is fetched
    let genome = match config.genome_version.parse::<GenomeVersion>() {
        Ok(genome) => genome,
        Err(e) => {
            eprintln!("{}", e);
            std::process::exit(1);
        }
    };

    let reads = match (
        matches.get_one::<String>("seq-file"),
        matches.get_one::<String>("seq-dir"),
    ) {
        (Some(file), _) => ReadSource::File(file.clone()),
        (None, Some(dir)) => ReadSource::Directory(PathBuf::from(dir)),
        (None, None) => ReadSource::Absent,
    };

    let options = OutputOptions {
        dash: matches.get_flag("dash"),
        header: matches.get_flag("header"),
        rc: matches.get_flag("rc"),
        json: matches.get_flag("json"),
    };

    let input = match matches.get_one::<String>("input") {
        Some(input) => input.clone(),
        None => {
            let mut line = String::new();
            io::stdin().lock().read_line(&mut line)?;
            line.trim().to_string()
        }
    };
    let queries = read_queries(&input)?;

    let getseq = GetSeq::from_config(&config, genome, reads, options)?;
    let stdout = io::stdout();
    let mut out = stdout.lock();
    getseq.run(&queries, &mut out)
}
