use std::fs;
use std::io;
use std::path::Path;

use seqcheck_core::utils::read_to_string_dynamic;

use crate::error::Result;
use crate::iupac;
use crate::trace::{TraceDecoder, TraceFiles};

///
/// An observed read ready for anchoring.
///
/// When the read came from a capillary trace, `trace` names the trace and
/// its derived files so that a call table can be consulted afterwards.
///
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObservedSequence {
    pub sequence: String,
    pub trace: Option<TraceFiles>,
}

impl ObservedSequence {
    ///
    /// Build a read from file contents: header lines (`>`) are dropped and
    /// the remaining lines joined. Bases are kept verbatim.
    ///
    pub fn from_text(text: &str) -> Self {
        let sequence = text
            .lines()
            .filter(|line| !line.starts_with('>'))
            .map(|line| line.trim_end_matches('\r'))
            .collect::<String>();

        ObservedSequence {
            sequence,
            trace: None,
        }
    }

    ///
    /// Load a read from a trace, a sequence file or a literal string.
    ///
    /// # Arguments
    /// - source: path to an `.ab1` trace, path to a sequence file, or the
    ///   bases themselves
    /// - decoder: used to produce `<trace>.seq` when it is missing
    ///
    /// A trace without a decoder can still be loaded when its `.seq` file
    /// already exists. A source that is not an existing file is taken as
    /// bases only when every character is an IUPAC code; anything else is
    /// reported as a missing file.
    ///
    pub fn load(source: &str, decoder: Option<&dyn TraceDecoder>) -> Result<Self> {
        let path = Path::new(source);

        if TraceFiles::is_trace(path) {
            let files = TraceFiles::for_trace(path);
            let seq_path = match decoder {
                Some(decoder) => decoder.ensure_basecalls(&files)?.to_path_buf(),
                None => files.seq.clone(),
            };
            log::debug!("Reading basecalls from {}", seq_path.display());
            let text = fs::read_to_string(&seq_path)?;
            let mut observed = Self::from_text(&text);
            observed.trace = Some(files);
            return Ok(observed);
        }

        if path.is_file() {
            log::debug!("Reading observed sequence from {}", path.display());
            let text = read_to_string_dynamic(path)?;
            return Ok(Self::from_text(&text));
        }

        let bases = source.trim();
        if bases.is_empty() || !bases.chars().all(|c| iupac::decode(c).is_ok()) {
            return Err(io::Error::new(
                io::ErrorKind::NotFound,
                format!("Sequence file {} not found", source),
            )
            .into());
        }

        Ok(ObservedSequence {
            sequence: bases.to_string(),
            trace: None,
        })
    }

    pub fn len(&self) -> usize {
        self.sequence.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sequence.is_empty()
    }
}
