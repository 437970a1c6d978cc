//! Presentation transforms applied to a fetched reference sequence.

/// Complement of a single IUPAC DNA code, preserving case.
const fn complement_base(base: char) -> char {
    match base {
        'A' => 'T',
        'T' => 'A',
        'C' => 'G',
        'G' => 'C',
        'R' => 'Y',
        'Y' => 'R',
        'K' => 'M',
        'M' => 'K',
        'B' => 'V',
        'V' => 'B',
        'D' => 'H',
        'H' => 'D',
        'a' => 't',
        't' => 'a',
        'c' => 'g',
        'g' => 'c',
        'r' => 'y',
        'y' => 'r',
        'k' => 'm',
        'm' => 'k',
        'b' => 'v',
        'v' => 'b',
        'd' => 'h',
        'h' => 'd',
        // S, W, N and separators are their own complement
        _ => base,
    }
}

///
/// Reverse complement a DNA string, preserving case and keeping
/// non-nucleotide characters such as `-` in (reversed) place.
///
pub fn reverse_complement(seq: &str) -> String {
    seq.chars().rev().map(complement_base).collect()
}

///
/// Lower-case the sequence and upper-case the base at `offset`.
///
/// Used for single-position queries, where the queried base sits exactly
/// `upstream` bases into the fetched sequence. An offset past the end leaves
/// the sequence lower-cased only.
///
pub fn highlight_position(seq: &str, offset: usize) -> String {
    seq.char_indices()
        .map(|(i, c)| {
            if i == offset {
                c.to_ascii_uppercase()
            } else {
                c.to_ascii_lowercase()
            }
        })
        .collect()
}

///
/// Flank the base at `offset` with dashes: `acg-T-gca`.
///
/// An offset past the end returns the sequence unchanged.
///
pub fn dash_position(seq: &str, offset: usize) -> String {
    if offset >= seq.len() {
        return seq.to_string();
    }
    let (before, rest) = seq.split_at(offset);
    let (var, after) = rest.split_at(1);
    format!("{}-{}-{}", before, var, after)
}
