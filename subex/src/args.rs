use argh::FromArgs;
use std::{path::PathBuf, str::FromStr};
use subex_parser::Order;

/// Parse an expression and report its repeated and maximally closed subexpressions.
///
/// Without an expression or a file, the expression is read from stdin, or an interactive prompt
/// is started if stdin is a terminal.
#[derive(FromArgs, Debug)]
pub struct Args {
    /// the expression to analyze
    #[argh(positional)]
    pub expression: Option<String>,

    /// read the expression from this file
    #[argh(option)]
    pub file: Option<PathBuf>,

    /// also print the nodes in the given traversal order (`pre`, `in`, or `post`)
    #[argh(option)]
    pub order: Option<Order>,

    /// do not report repeated subexpressions
    #[argh(switch)]
    pub no_repeated: bool,

    /// do not report maximally closed subexpressions
    #[argh(switch)]
    pub no_closed: bool,

    /// the amount of logging to perform
    #[argh(option, default = "LogLevel::Off")]
    pub log: LogLevel,
}

#[derive(Clone, Copy, Debug)]
pub enum LogLevel {
    Off,
    Trace,
    Debug,
    Info,
    Warning,
    Error,
}

impl LogLevel {
    pub fn to_level_filter(self) -> log::LevelFilter {
        match self {
            LogLevel::Off => log::LevelFilter::Off,
            LogLevel::Trace => log::LevelFilter::Trace,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Warning => log::LevelFilter::Warn,
            LogLevel::Error => log::LevelFilter::Error,
        }
    }
}

impl FromStr for LogLevel {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "off" => Ok(Self::Off),
            "trace" => Ok(Self::Trace),
            "debug" => Ok(Self::Debug),
            "info" => Ok(Self::Info),
            "warning" => Ok(Self::Warning),
            "error" => Ok(Self::Error),

            _ => Err("expected one of `off`, `trace`, `debug`, `info`, `warning`, or `error`"),
        }
    }
}
