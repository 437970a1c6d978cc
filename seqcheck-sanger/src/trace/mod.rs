//! Producing basecall and call-table files from capillary traces.
//!
//! A trace `sample.ab1` is decoded into `sample.ab1.seq` (plain basecalls)
//! and `sample.ab1.tab` (per-position calls). Decoding is only run when the
//! file is missing, so repeated requests reuse earlier output. Two requests
//! must not decode the same trace at once; nothing here locks the files.
pub mod abif;
pub mod external;

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use crate::consts::{AB1_EXT, SEQ_SUFFIX, TAB_SUFFIX};
use crate::error::{Result, SangerError};

pub use abif::Ab1BasecallDecoder;
pub use external::ExternalTraceDecoder;

///
/// A trace and the files derived from it.
///
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TraceFiles {
    pub trace: PathBuf,
    pub seq: PathBuf,
    pub tab: PathBuf,
}

impl TraceFiles {
    pub fn for_trace<P: AsRef<Path>>(trace: P) -> Self {
        let trace = trace.as_ref().to_path_buf();
        TraceFiles {
            seq: with_suffix(&trace, SEQ_SUFFIX),
            tab: with_suffix(&trace, TAB_SUFFIX),
            trace,
        }
    }

    /// Directory holding the trace, `.` for a bare file name.
    pub fn directory(&self) -> PathBuf {
        match self.trace.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        }
    }

    /// True when `path` names a raw trace by its extension.
    pub fn is_trace<P: AsRef<Path>>(path: P) -> bool {
        path.as_ref()
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| e.eq_ignore_ascii_case(AB1_EXT))
    }
}

fn with_suffix(path: &Path, suffix: &str) -> PathBuf {
    let mut name: OsString = path.as_os_str().to_owned();
    name.push(suffix);
    PathBuf::from(name)
}

///
/// Something that turns a trace into basecall and call-table files.
///
pub trait TraceDecoder {
    /// Write `files.seq`.
    fn decode_basecalls(&self, files: &TraceFiles) -> Result<()>;

    /// Write `files.tab`.
    fn decode_call_table(&self, files: &TraceFiles) -> Result<()>;

    ///
    /// Path of the basecall file, decoding first if it does not exist yet.
    ///
    fn ensure_basecalls<'a>(&self, files: &'a TraceFiles) -> Result<&'a Path> {
        if !files.seq.is_file() {
            log::info!("Decoding basecalls for {}", files.trace.display());
            self.decode_basecalls(files)?;
        }
        existing(&files.seq)
    }

    ///
    /// Path of the call table, decoding first if it does not exist yet.
    ///
    fn ensure_call_table<'a>(&self, files: &'a TraceFiles) -> Result<&'a Path> {
        if !files.tab.is_file() {
            log::info!("Decoding call table for {}", files.trace.display());
            self.decode_call_table(files)?;
        }
        existing(&files.tab)
    }
}

fn existing(path: &Path) -> Result<&Path> {
    if path.is_file() {
        Ok(path)
    } else {
        Err(SangerError::MissingDecoderOutput(path.to_path_buf()))
    }
}
