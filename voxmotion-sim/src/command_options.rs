//! Command line option parsing.

use std::path::PathBuf;

use clap::Parser;

use crate::logging::LoggingArgs;
use crate::scenario::Scenario;

#[derive(Clone, Debug, Parser)]
#[command(author, about, version)]
pub(crate) struct SimArgs {
    /// Which scenario to simulate.
    #[arg(value_enum)]
    pub(crate) scenario: Scenario,

    /// Number of ticks to simulate.
    #[arg(long = "ticks", short = 't', default_value_t = 40, value_name = "N")]
    pub(crate) ticks: u64,

    /// JSON file of physics parameters to use instead of the defaults.
    ///
    /// Parameters missing from the file keep their default values.
    #[arg(long = "physics", value_name = "FILE")]
    pub(crate) physics: Option<PathBuf>,

    #[command(flatten)]
    pub(crate) logging: LoggingArgs,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn parse(args: &[&str]) -> clap::error::Result<SimArgs> {
        SimArgs::try_parse_from(std::iter::once("voxmotion-sim").chain(args.iter().copied()))
    }

    #[test]
    fn defaults() {
        let args = parse(&["landing"]).unwrap();
        assert_eq!(args.scenario, Scenario::Landing);
        assert_eq!(args.ticks, 40);
        assert_eq!(args.physics, None);
        assert!(!args.logging.verbose);
    }

    #[test]
    fn all_options() {
        let args = parse(&["piston", "-t", "5", "--physics", "p.json", "-v"]).unwrap();
        assert_eq!(args.scenario, Scenario::Piston);
        assert_eq!(args.ticks, 5);
        assert_eq!(args.physics, Some(PathBuf::from("p.json")));
        assert!(args.logging.verbose);
    }

    #[test]
    fn unknown_scenario() {
        assert_eq!(
            parse(&["flying"]).unwrap_err().kind(),
            clap::error::ErrorKind::InvalidValue
        );
    }
}
