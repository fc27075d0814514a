//! Logging to stderr.

use anyhow::Context as _;

/// A [`clap::Args`] struct for options controlling log output to stderr.
#[derive(Clone, Debug, clap::Args)]
pub(crate) struct LoggingArgs {
    /// Additional logging to stderr, including every move of every body.
    #[arg(long = "verbose", short = 'v')]
    pub(crate) verbose: bool,

    /// Remove timestamps from logs so that they are deterministic.
    ///
    /// This option is intended for tests only.
    #[arg(long = "simplify-log-format", hide = true)]
    pub(crate) simplify_log_format: bool,
}

/// Install a [`log`] global logger based on user-provided `options`.
pub(crate) fn install(options: &LoggingArgs) -> Result<(), anyhow::Error> {
    use log::LevelFilter::{Error, Info, Off, Trace};

    let &LoggingArgs {
        verbose,
        simplify_log_format,
    } = options;

    let logger = *simplelog::WriteLogger::new(
        if verbose { Trace } else { Info },
        simplelog::ConfigBuilder::new()
            .set_target_level(Off)
            .set_location_level(Off)
            .set_time_level(if simplify_log_format { Off } else { Error })
            .build(),
        std::io::stderr(),
    );
    let max_level = simplelog::SharedLogger::level(&logger);

    log::set_boxed_logger(Box::new(SimLogger { stderr: logger }))
        .context("failed to initialize logging")?;
    log::set_max_level(max_level);
    Ok(())
}

/// [`log::Log`] implementation that [`install()`] registers globally.
struct SimLogger {
    stderr: simplelog::WriteLogger<std::io::Stderr>,
}

impl log::Log for SimLogger {
    fn enabled(&self, metadata: &log::Metadata<'_>) -> bool {
        voxmotion::util::log::standard_filter(metadata) && self.stderr.enabled(metadata)
    }

    fn log(&self, record: &log::Record<'_>) {
        if voxmotion::util::log::standard_filter(record.metadata()) {
            self.stderr.log(record);
        }
    }

    fn flush(&self) {
        self.stderr.flush();
    }
}
