//! Minimal reader for ABIF (`.ab1`) capillary trace files.
//!
//! Only the directory and the `PBAS` basecall entries are read. Peak
//! heights and secondary calls are left to an external decoder.
use std::fs;
use std::io::{Cursor, Read, Seek, SeekFrom};
use std::path::Path;

use byteorder::{BigEndian, ReadBytesExt};

use crate::error::{Result, SangerError};
use crate::trace::{TraceDecoder, TraceFiles};

const ABIF_MAGIC: &[u8; 4] = b"ABIF";
const ROOT_ENTRY_OFFSET: u64 = 6;
const DIR_ENTRY_SIZE: usize = 28;
const BASECALL_TAG: &[u8; 4] = b"PBAS";
// PBAS 2 holds edited basecalls, PBAS 1 the originals
const BASECALL_NUMBERS: [i32; 2] = [2, 1];

#[derive(Debug, Clone, PartialEq, Eq)]
struct DirEntry {
    name: [u8; 4],
    number: i32,
    element_type: i16,
    element_size: i16,
    num_elements: i32,
    data_size: i32,
    data_offset: i32,
    data_handle: i32,
    // raw bytes of the offset field, which hold the data itself when it fits
    inline: [u8; 4],
}

impl DirEntry {
    fn read<R: Read>(reader: &mut R) -> std::io::Result<Self> {
        let mut name = [0u8; 4];
        reader.read_exact(&mut name)?;
        let number = reader.read_i32::<BigEndian>()?;
        let element_type = reader.read_i16::<BigEndian>()?;
        let element_size = reader.read_i16::<BigEndian>()?;
        let num_elements = reader.read_i32::<BigEndian>()?;
        let data_size = reader.read_i32::<BigEndian>()?;
        let mut inline = [0u8; 4];
        reader.read_exact(&mut inline)?;
        let data_offset = i32::from_be_bytes(inline);
        let data_handle = reader.read_i32::<BigEndian>()?;
        Ok(DirEntry {
            name,
            number,
            element_type,
            element_size,
            num_elements,
            data_size,
            data_offset,
            data_handle,
            inline,
        })
    }

    fn data<'a>(&'a self, bytes: &'a [u8]) -> Option<&'a [u8]> {
        let size = usize::try_from(self.data_size).ok()?;
        if size <= 4 {
            return Some(&self.inline[..size]);
        }
        let start = usize::try_from(self.data_offset).ok()?;
        bytes.get(start..start.checked_add(size)?)
    }
}

///
/// Extract the basecalls stored in an ABIF trace.
///
pub fn read_basecalls<P: AsRef<Path>>(path: P) -> Result<String> {
    let path = path.as_ref();
    let bytes = fs::read(path)?;
    parse_basecalls(&bytes).map_err(|reason| SangerError::InvalidTrace {
        path: path.to_path_buf(),
        reason,
    })
}

fn parse_basecalls(bytes: &[u8]) -> std::result::Result<String, String> {
    if bytes.len() < ROOT_ENTRY_OFFSET as usize + DIR_ENTRY_SIZE || &bytes[..4] != ABIF_MAGIC {
        return Err("not an ABIF file".to_string());
    }

    let mut cursor = Cursor::new(bytes);
    cursor
        .seek(SeekFrom::Start(ROOT_ENTRY_OFFSET))
        .map_err(|e| e.to_string())?;
    let root = DirEntry::read(&mut cursor).map_err(|e| format!("bad root entry: {}", e))?;

    let count = usize::try_from(root.num_elements).map_err(|_| "negative entry count")?;
    let start = usize::try_from(root.data_offset).map_err(|_| "negative directory offset")?;
    let available = bytes.len().saturating_sub(start);
    if count
        .checked_mul(DIR_ENTRY_SIZE)
        .is_none_or(|needed| needed > available)
    {
        return Err(format!(
            "directory of {} entries does not fit in {} bytes",
            count, available
        ));
    }
    cursor
        .seek(SeekFrom::Start(start as u64))
        .map_err(|e| e.to_string())?;

    let mut entries = Vec::with_capacity(count);
    for _ in 0..count {
        let entry = DirEntry::read(&mut cursor).map_err(|e| format!("truncated directory: {}", e))?;
        entries.push(entry);
    }

    for number in BASECALL_NUMBERS {
        if let Some(entry) = entries
            .iter()
            .find(|e| &e.name == BASECALL_TAG && e.number == number)
        {
            log::debug!(
                "PBAS {} has {} calls (type {}, size {}, handle {})",
                entry.number,
                entry.num_elements,
                entry.element_type,
                entry.element_size,
                entry.data_handle
            );
            let data = entry
                .data(bytes)
                .ok_or_else(|| format!("PBAS {} data out of range", number))?;
            return Ok(String::from_utf8_lossy(data).into_owned());
        }
    }
    Err("no basecalls (PBAS) entry".to_string())
}

///
/// Decoder that reads basecalls straight from the trace file.
///
/// It cannot produce call tables; use [`super::ExternalTraceDecoder`] when
/// heterozygous calls are needed.
///
#[derive(Debug, Clone, Copy, Default)]
pub struct Ab1BasecallDecoder;

impl TraceDecoder for Ab1BasecallDecoder {
    fn decode_basecalls(&self, files: &TraceFiles) -> Result<()> {
        let calls = read_basecalls(&files.trace)?;
        fs::write(&files.seq, format!("{}\n", calls))?;
        Ok(())
    }

    fn decode_call_table(&self, files: &TraceFiles) -> Result<()> {
        Err(SangerError::TraceDecoder {
            trace: files.trace.clone(),
            reason: "call tables need an external decoder".to_string(),
        })
    }
}
