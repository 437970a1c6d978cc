use clap::{Arg, Command, arg, value_parser};

pub const HETCALL_CMD: &str = "hetcall";

pub fn create_hetcall_cli() -> Command {
    Command::new(HETCALL_CMD)
        .author("Databio")
        .about("Print the heterozygous call at a position index of a Sanger trace.")
        .arg(Arg::new("trace").required(true).help("Path to the .ab1 trace"))
        .arg(
            Arg::new("index")
                .required(true)
                .value_parser(value_parser!(i64))
                .help("Base position index in the read"),
        )
        .arg(arg!(--"trace-decoder" <PROGRAM> "External trace decoder used when the call table is missing"))
}
