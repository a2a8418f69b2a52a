mod app;
mod calendar;
mod config;
mod dates;
mod form;
mod help;
mod hits;
mod picker;
mod range;
mod theme;
use crate::app::App;
use crate::config::{Assignment, Options};
use crate::dates::LocalClock;
use crate::form::Form;
use crate::picker::DateRangePicker;
use anyhow::{bail, Context};
use lexopt::{Arg, Parser, ValueExt};
use ratatui::DefaultTerminal;
use std::fs::OpenOptions;
use std::path::{Path, PathBuf};
use time::UtcOffset;
use tracing::{info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

const START_FIELD: &str = "start";

const DEFAULT_DAYS_FIELD: &str = "days";

const DEFAULT_END_FIELD: &str = "end";

#[derive(Clone, Debug, Eq, PartialEq)]
enum Command {
    Run {
        options: Options,
        values: Vec<Assignment>,
        log: Option<PathBuf>,
    },
    Help,
    Version,
}

impl Command {
    fn from_parser(mut parser: Parser) -> Result<Command, lexopt::Error> {
        let mut options = Options::default();
        let mut values = Vec::new();
        let mut log = None;
        while let Some(arg) = parser.next()? {
            match arg {
                Arg::Short('h') | Arg::Long("help") => return Ok(Command::Help),
                Arg::Short('V') | Arg::Long("version") => return Ok(Command::Version),
                Arg::Long("days-field") => options.days_field = Some(parser.value()?.string()?),
                Arg::Long("end-field") => options.end_field = Some(parser.value()?.string()?),
                Arg::Long("format") => options.format = parser.value()?.parse()?,
                Arg::Long("months") => options.months = parser.value()?.parse()?,
                Arg::Long("allow-future") => options.no_future = false,
                Arg::Long("container") => options.container = Some(parser.value()?.string()?),
                Arg::Long("set") => values.push(parser.value()?.parse()?),
                Arg::Long("log") => log = Some(PathBuf::from(parser.value()?)),
                _ => return Err(arg.unexpected()),
            }
        }
        if options.days_field.is_none() && options.end_field.is_none() {
            options.days_field = Some(String::from(DEFAULT_DAYS_FIELD));
            options.end_field = Some(String::from(DEFAULT_END_FIELD));
        }
        Ok(Command::Run {
            options,
            values,
            log,
        })
    }

    fn run(self) -> anyhow::Result<()> {
        match self {
            Command::Run {
                options,
                values,
                log,
            } => {
                // This must happen before the log writer thread starts.
                let offset = UtcOffset::current_local_offset();
                let _guard = log.as_deref().map(init_logging).transpose()?;
                let offset = offset.unwrap_or_else(|e| {
                    warn!(error = %e, "could not determine local UTC offset; using UTC");
                    UtcOffset::UTC
                });
                let form = build_form(&options, values)?;
                info!(
                    format = %options.format,
                    months = options.months.get(),
                    no_future = options.no_future,
                    "starting date range picker"
                );
                let picker = DateRangePicker::new(START_FIELD, options, LocalClock::new(offset));
                let form = with_terminal(|mut terminal| {
                    terminal.hide_cursor().context("failed to hide cursor")?;
                    App::new(form, picker)
                        .run(terminal)
                        .context("terminal I/O failed")
                })?;
                for field in form.fields() {
                    println!("{}={}", field.name(), field.value());
                }
                Ok(())
            }
            Command::Help => {
                println!("Usage: rangepick [options]");
                println!();
                println!("Pick a date range from a terminal calendar & print the resulting fields");
                println!();
                println!("Options:");
                println!("  --days-field NAME     Field receiving the number of days [default: days]");
                println!("  --end-field NAME      Field receiving the end date [default: end]");
                println!("  --format iso|native   Format for reading & writing dates [default: iso]");
                println!("  --months N            Number of months shown at once [default: 3]");
                println!("  --allow-future        Allow picking days after today");
                println!("  --container NAME      Field under which to show the calendar [default: start]");
                println!("  --set NAME=VALUE      Pre-fill a field; may be given more than once");
                println!("  --log FILE            Append diagnostic logs to FILE");
                println!("  -h, --help            Display this help message and exit");
                println!("  -V, --version         Show the program version and exit");
                println!();
                println!("If only one of --days-field and --end-field is given, the other");
                println!("field is left out of the form.");
                Ok(())
            }
            Command::Version => {
                println!("{} {}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"));
                Ok(())
            }
        }
    }
}

fn main() -> anyhow::Result<()> {
    Command::from_parser(Parser::from_env())?.run()
}

fn build_form(options: &Options, values: Vec<Assignment>) -> anyhow::Result<Form> {
    let mut form = Form::new().with_field(START_FIELD, "Start date");
    if let Some(name) = &options.days_field {
        form = form.with_field(name.as_str(), "Days");
    }
    if let Some(name) = &options.end_field {
        form = form.with_field(name.as_str(), "End date");
    }
    for Assignment { name, value } in values {
        if !form.set_value(&name, value) {
            bail!("--set: there is no field named {name:?}");
        }
    }
    Ok(form)
}

fn init_logging(path: &Path) -> anyhow::Result<WorkerGuard> {
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("failed to open log file {}", path.display()))?;
    let (writer, guard) = tracing_appender::non_blocking(file);
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_ansi(false)
        .with_writer(writer)
        .with_env_filter(filter)
        .init();
    Ok(guard)
}

fn with_terminal<F, T>(func: F) -> anyhow::Result<T>
where
    F: FnOnce(DefaultTerminal) -> anyhow::Result<T>,
{
    let terminal = ratatui::init();
    let r = func(terminal);
    ratatui::restore();
    r
}
