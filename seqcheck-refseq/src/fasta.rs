//! Random access into a local genome FASTA.
//!
//! The `.fai` index next to the FASTA is used when present; otherwise an
//! equivalent index is computed with a single pass over the file.

use std::collections::HashMap;
use std::fs::File;
use std::io::{BufRead, BufReader, Read, Seek, SeekFrom};
use std::path::{Path, PathBuf};

use seqcheck_core::GenomicRange;
use seqcheck_core::consts::CHROM_PREFIX;

use crate::error::{ReferenceError, Result};
use crate::source::ReferenceSource;

/// One line of a FASTA index (`.fai`).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FaiRecord {
    pub name: String,
    pub length: u64,
    pub offset: u64,     // byte offset to first base of sequence data
    pub line_bases: u64, // number of bases per line
    pub line_bytes: u64, // number of bytes per line (including newline chars)
}

#[derive(Debug, Clone)]
pub struct FastaReference {
    path: PathBuf,
    index: HashMap<String, FaiRecord>,
}

impl FastaReference {
    ///
    /// Open a FASTA file for random access.
    ///
    /// # Arguments
    /// - path: path to an uncompressed FASTA file
    ///
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref().to_path_buf();

        if path.extension().and_then(|e| e.to_str()) == Some("gz") {
            return Err(ReferenceError::CompressedFasta(path));
        }

        let fai_path = PathBuf::from(format!("{}.fai", path.display()));
        let records = if fai_path.exists() {
            log::debug!("Using FASTA index {}", fai_path.display());
            load_fai_index(&fai_path)?
        } else {
            log::info!("No index for {}, scanning file", path.display());
            compute_fai(&path)?
        };

        let index = records
            .into_iter()
            .map(|record| (record.name.clone(), record))
            .collect();

        Ok(FastaReference { path, index })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn sequence_names(&self) -> impl Iterator<Item = &str> + '_ {
        self.index.keys().map(|name| name.as_str())
    }

    /// Index record for a chromosome, trying `chr{chrom}` before `{chrom}`.
    fn resolve_record(&self, chrom: &str) -> Option<&FaiRecord> {
        self.index
            .get(&format!("{}{}", CHROM_PREFIX, chrom))
            .or_else(|| self.index.get(chrom))
    }

    ///
    /// Read the 0-based, end-exclusive window `[start, end)` of a record.
    ///
    fn read_window(&self, record: &FaiRecord, start: u64, end: u64) -> Result<String> {
        let end = end.min(record.length);
        if start >= end {
            return Ok(String::new());
        }

        let line_start = start / record.line_bases;
        let byte_offset = start % record.line_bases;
        let file_offset = record.offset + line_start * record.line_bytes + byte_offset;

        let seq_len = end - start;
        let num_lines = (seq_len + byte_offset).div_ceil(record.line_bases);
        let bytes_to_read = seq_len + num_lines * (record.line_bytes - record.line_bases);

        let mut file = File::open(&self.path)?;
        file.seek(SeekFrom::Start(file_offset))?;

        let mut buffer = Vec::with_capacity(bytes_to_read as usize);
        file.take(bytes_to_read).read_to_end(&mut buffer)?;

        let bases: Vec<u8> = buffer
            .into_iter()
            .filter(|&b| b != b'\n' && b != b'\r')
            .take(seq_len as usize)
            .collect();
        if !bases.is_ascii() {
            return Err(ReferenceError::NonAsciiSequence {
                chrom: record.name.clone(),
                path: self.path.clone(),
            });
        }
        Ok(bases.into_iter().map(char::from).collect())
    }
}

impl ReferenceSource for FastaReference {
    ///
    /// Fetch the 1-based, inclusive `range`. The end is clipped to the
    /// chromosome length; a start past the end (or below the first base)
    /// yields [`ReferenceError::NoSequenceFound`].
    ///
    fn fetch(&self, range: &GenomicRange) -> Result<String> {
        let record =
            self.resolve_record(range.chrom())
                .ok_or_else(|| ReferenceError::SequenceNotInFasta {
                    chrom: range.chrom().to_string(),
                    path: self.path.clone(),
                })?;

        // 1-based inclusive -> 0-based half open
        let start = range.start() - 1;
        if start < 0 || start as u64 >= record.length {
            return Err(ReferenceError::NoSequenceFound(range.as_string()));
        }

        let seq = self.read_window(record, start as u64, range.end() as u64)?;
        if seq.is_empty() {
            return Err(ReferenceError::NoSequenceFound(range.as_string()));
        }
        Ok(seq)
    }

    fn describe(&self) -> String {
        format!("FASTA {}", self.path.display())
    }
}

///
/// Load a FASTA index (`.fai`) file.
///
pub fn load_fai_index<P: AsRef<Path>>(fai_path: P) -> Result<Vec<FaiRecord>> {
    let fai_path = fai_path.as_ref();
    let reader = BufReader::new(File::open(fai_path)?);

    let invalid = |reason: String| ReferenceError::InvalidIndex {
        path: fai_path.to_path_buf(),
        reason,
    };

    let mut records = Vec::new();
    for line in reader.lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }

        let fields: Vec<&str> = line.split('\t').collect();
        if fields.len() < 5 {
            return Err(invalid(format!("expected 5 columns, found {}", fields.len())));
        }

        let parse = |i: usize| -> Result<u64> {
            fields[i].parse::<u64>().map_err(|_| {
                invalid(format!("'{}' is not a number in entry {}", fields[i], fields[0]))
            })
        };

        let record = FaiRecord {
            name: fields[0].to_string(),
            length: parse(1)?,
            offset: parse(2)?,
            line_bases: parse(3)?,
            line_bytes: parse(4)?,
        };

        if record.line_bases == 0 || record.line_bytes < record.line_bases {
            return Err(invalid(format!(
                "entry {} has line_bases={}, line_bytes={}",
                record.name, record.line_bases, record.line_bytes
            )));
        }

        records.push(record);
    }

    Ok(records)
}

///
/// Compute `.fai` records for a FASTA file in one pass.
///
/// Sequence names are the header up to the first whitespace, as samtools
/// does. Line geometry is taken from the first sequence line.
///
pub fn compute_fai<P: AsRef<Path>>(file_path: P) -> Result<Vec<FaiRecord>> {
    let mut reader = BufReader::new(File::open(file_path.as_ref())?);

    let mut results = Vec::new();
    let mut line = String::new();
    let mut byte_position: u64 = 0;
    let mut current: Option<FaiRecord> = None;

    loop {
        let bytes_read = reader.read_line(&mut line)?;
        if bytes_read == 0 {
            break;
        }
        byte_position += bytes_read as u64;

        if let Some(header) = line.strip_prefix('>') {
            if let Some(record) = current.take() {
                results.push(record);
            }
            let name = header.split_whitespace().next().unwrap_or_default();
            current = Some(FaiRecord {
                name: name.to_string(),
                length: 0,
                offset: byte_position,
                line_bases: 0,
                line_bytes: 0,
            });
        } else if let Some(record) = current.as_mut() {
            let bases = line.trim_end().len() as u64;
            if bases > 0 {
                if record.line_bases == 0 {
                    record.line_bases = bases;
                    record.line_bytes = bytes_read as u64;
                }
                record.length += bases;
            }
        }

        line.clear();
    }

    if let Some(record) = current.take() {
        results.push(record);
    }

    Ok(results)
}
