mod getseq;
mod hetcall;

use std::path::Path;

use anyhow::{Context, Result};
use clap::{Arg, ArgAction, ArgMatches, Command};

use seqcheck_core::SeqCheckConfig;

pub mod consts {
    pub const VERSION: &str = env!("CARGO_PKG_VERSION");
    pub const PKG_NAME: &str = "seqcheck";
    pub const BIN_NAME: &str = "seqcheck";
}

fn build_parser() -> Command {
    Command::new(consts::BIN_NAME)
        .bin_name(consts::BIN_NAME)
        .version(consts::VERSION)
        .author("Databio")
        .about("Fetch the reference sequence around genomic positions and check Sanger reads against it.")
        .subcommand_required(true)
        .arg(
            Arg::new("config")
                .long("config")
                .short('c')
                .global(true)
                .help("TOML configuration file (defaults to $SEQCHECK_CONFIG)"),
        )
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .short('v')
                .global(true)
                .action(ArgAction::Count)
                .help("Increase log verbosity (-v info, -vv debug)"),
        )
        .subcommand(getseq::cli::create_getseq_cli())
        .subcommand(hetcall::cli::create_hetcall_cli())
}

fn init_logging(verbosity: u8) {
    let level = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp(None)
        .init();
}

///
/// Configuration from `--config`, else `$SEQCHECK_CONFIG`, else defaults.
///
pub(crate) fn load_config(matches: &ArgMatches) -> Result<SeqCheckConfig> {
    match matches.get_one::<String>("config") {
        Some(path) => SeqCheckConfig::try_from(Path::new(path))
            .with_context(|| format!("Failed to load config {}", path)),
        None => SeqCheckConfig::from_env().context("Failed to load config from environment"),
    }
}

fn main() -> Result<()> {
    let app = build_parser();
    let matches = app.get_matches();

    match matches.subcommand() {
        //
        // GETSEQ
        //
        Some((getseq::cli::GETSEQ_CMD, matches)) => {
            init_logging(matches.get_count("verbose"));
            getseq::handlers::run_getseq(matches)?;
        }

        //
        // HETCALL
        //
        Some((hetcall::cli::HETCALL_CMD, matches)) => {
            init_logging(matches.get_count("verbose"));
            hetcall::handlers::run_hetcall(matches)?;
        }

        _ => unreachable!("Subcommand not found"),
    };

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    use pretty_assertions::assert_eq;
    use rstest::*;

    #[rstest]
    fn test_parser_is_valid() {
        build_parser().debug_assert();
    }

    #[rstest]
    fn test_global_flags_reach_subcommand() {
        let matches = build_parser()
            .try_get_matches_from(["seqcheck", "-vv", "getseq", "15:48762884"])
            .unwrap();
        let (name, sub) = matches.subcommand().unwrap();
        assert_eq!(name, getseq::cli::GETSEQ_CMD);
        assert_eq!(sub.get_count("verbose"), 2);
    }

    #[rstest]
    fn test_load_config_from_flag() {
        let matches = build_parser()
            .try_get_matches_from([
                "seqcheck",
                "hetcall",
                "--config",
                "../tests/data/config/seqcheck.toml",
                "sample.ab1",
                "20",
            ])
            .unwrap();
        let (_, sub) = matches.subcommand().unwrap();
        let config = load_config(sub).unwrap();
        assert_eq!(config.upstream, 50);
        assert_eq!(config.genome_version, "hg38");
    }
}
