use std::num::{NonZeroU64, NonZeroUsize};
use std::path::PathBuf;

use clap::Parser;

use crate::combo::LengthSet;
use crate::error::Error;
use crate::settings::{
    DEFAULT_CHUNK_SIZE, DEFAULT_OUTPUT, DEFAULT_THREADS, DEFAULT_UPDATE_INTERVAL, RunConfig,
};

/// Generate every combination of a string's characters and write them to a
/// file, one per line.
#[derive(Parser, Debug, Clone)]
#[command(name = "combigen", version, about)]
pub struct CliArgs {
    /// Characters to combine. Repeated characters are kept and combined by
    /// position.
    pub alphabet: String,

    /// Generate every length from 1 up to this value.
    #[arg(short, long, value_name = "N")]
    pub max_length: Option<usize>,

    /// Generate only these lengths. Takes precedence over --max-length.
    #[arg(short, long, value_name = "N", num_args = 1..)]
    pub lengths: Vec<usize>,

    /// Output file. Truncated at the start of every run.
    ///
    /// Environment variable: `COMBIGEN_OUTPUT`
    #[arg(short, long, env = "COMBIGEN_OUTPUT", default_value = DEFAULT_OUTPUT)]
    pub output: PathBuf,

    /// Print a progress line every time this many combinations have been
    /// submitted.
    ///
    /// Environment variable: `COMBIGEN_UPDATE_INTERVAL`
    #[arg(short, long, env = "COMBIGEN_UPDATE_INTERVAL", default_value_t = DEFAULT_UPDATE_INTERVAL)]
    pub update_interval: u64,

    /// Number of combinations written per batch.
    ///
    /// Environment variable: `COMBIGEN_CHUNK_SIZE`
    #[arg(short, long, env = "COMBIGEN_CHUNK_SIZE", default_value_t = DEFAULT_CHUNK_SIZE)]
    pub chunk_size: usize,

    /// Number of writer threads. With more than one, line order in the
    /// output is not guaranteed.
    ///
    /// Environment variable: `COMBIGEN_THREADS`
    #[arg(short, long, env = "COMBIGEN_THREADS", default_value_t = DEFAULT_THREADS)]
    pub threads: usize,

    /// Suppress progress and summary output. Errors are still shown.
    #[arg(short, long)]
    pub quiet: bool,
}

impl TryFrom<CliArgs> for RunConfig {
    type Error = Error;

    fn try_from(args: CliArgs) -> Result<Self, Self::Error> {
        let lengths = if !args.lengths.is_empty() {
            args.lengths.into_iter().collect()
        } else if let Some(max) = args.max_length {
            LengthSet::up_to(max)
        } else {
            return Err(Error::config(
                "either --max-length or --lengths must be specified",
            ));
        };

        let chunk_size = NonZeroUsize::new(args.chunk_size)
            .ok_or_else(|| Error::config("--chunk-size must be greater than 0"))?;
        let update_interval = NonZeroU64::new(args.update_interval)
            .ok_or_else(|| Error::config("--update-interval must be greater than 0"))?;
        let threads = NonZeroUsize::new(args.threads)
            .ok_or_else(|| Error::config("--threads must be greater than 0"))?;

        Ok(Self {
            alphabet: args.alphabet.chars().collect(),
            lengths,
            output: args.output,
            update_interval,
            chunk_size,
            threads,
            quiet: args.quiet,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Result<CliArgs, clap::Error> {
        CliArgs::try_parse_from(std::iter::once("combigen").chain(args.iter().copied()))
    }

    fn config(args: &[&str]) -> Result<RunConfig, Error> {
        RunConfig::try_from(parse(args).unwrap())
    }

    #[test]
    fn clap_definition_is_valid() {
        use clap::CommandFactory;
        CliArgs::command().debug_assert();
    }

    #[test]
    fn defaults_apply() {
        let cfg = config(&["abc", "-m", "2"]).unwrap();
        assert_eq!(cfg.alphabet, vec!['a', 'b', 'c']);
        assert_eq!(cfg.lengths, LengthSet::up_to(2));
        assert_eq!(cfg.chunk_size.get(), DEFAULT_CHUNK_SIZE);
        assert_eq!(cfg.update_interval.get(), DEFAULT_UPDATE_INTERVAL);
        assert_eq!(cfg.threads.get(), DEFAULT_THREADS);
        assert!(!cfg.quiet);
    }

    #[test]
    fn explicit_lengths_win_over_max() {
        let cfg = config(&["abcd", "-m", "4", "-l", "3", "1"]).unwrap();
        assert_eq!(cfg.lengths.iter().collect::<Vec<_>>(), vec![1, 3]);
    }

    #[test]
    fn missing_lengths_is_a_config_error() {
        assert!(matches!(config(&["abc"]), Err(Error::Config { .. })));
    }

    #[test]
    fn zero_knobs_are_rejected() {
        for flag in ["--chunk-size", "--update-interval", "--threads"] {
            let result = config(&["abc", "-m", "2", flag, "0"]);
            assert!(matches!(result, Err(Error::Config { .. })), "{flag}");
        }
    }

    #[test]
    fn negative_values_fail_to_parse() {
        assert!(parse(&["abc", "-m", "2", "-c", "-5"]).is_err());
        assert!(parse(&["abc", "-l", "x"]).is_err());
    }

    #[test]
    fn short_flags() {
        let cfg = config(&[
            "xyz", "-l", "2", "-o", "out.txt", "-u", "5", "-c", "7", "-t", "3", "-q",
        ])
        .unwrap();
        assert_eq!(cfg.output, PathBuf::from("out.txt"));
        assert_eq!(cfg.update_interval.get(), 5);
        assert_eq!(cfg.chunk_size.get(), 7);
        assert_eq!(cfg.threads.get(), 3);
        assert!(cfg.quiet);
    }
}
