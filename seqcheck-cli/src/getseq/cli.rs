use clap::{Arg, ArgAction, Command, arg, value_parser};

pub const GETSEQ_CMD: &str = "getseq";

pub fn create_getseq_cli() -> Command {
    Command::new(GETSEQ_CMD)
        .author("Databio")
        .about("Fetch the reference sequence around a position or range and optionally check a Sanger read against it.")
        .long_about(
            "INPUT is a position (15:48762884), a range (15:48762864-48762904) or a \
             tab-delimited file of name and position per line. Reads INPUT from stdin \
             when omitted.",
        )
        .arg(Arg::new("input").help("Position, range or file of named positions"))
        .arg(
            arg!(-u --upstream <BASES> "Bases upstream of a position")
                .value_parser(value_parser!(i64)),
        )
        .arg(
            arg!(-d --downstream <BASES> "Bases downstream of a position")
                .value_parser(value_parser!(i64)),
        )
        .arg(arg!(-g --genome <VERSION> "Genome version: hg16, hg17, hg18, hg19, hg38"))
        .arg(arg!(-f --fasta <FASTA> "Read the reference from a local FASTA instead of UCSC"))
        .arg(
            Arg::new("dash")
                .long("dash")
                .action(ArgAction::SetTrue)
                .help("Flank the variant base with dashes"),
        )
        .arg(
            Arg::new("header")
                .long("header")
                .action(ArgAction::SetTrue)
                .help("Print a header line with name, position and range"),
        )
        .arg(
            Arg::new("rc")
                .long("rc")
                .action(ArgAction::SetTrue)
                .help("Reverse complement the reference sequence"),
        )
        .arg(
            Arg::new("seq-file")
                .long("seq-file")
                .short('s')
                .conflicts_with("seq-dir")
                .help("Sanger read to check: .ab1 trace, sequence file or literal bases"),
        )
        .arg(
            Arg::new("seq-dir")
                .long("seq-dir")
                .help("Directory searched for a read whose file name contains each input name"),
        )
        .arg(arg!(--"trace-decoder" <PROGRAM> "External trace decoder used for .ab1 files"))
        .arg(
            Arg::new("json")
                .long("json")
                .action(ArgAction::SetTrue)
                .help("Print one JSON object per input"),
        )
}
