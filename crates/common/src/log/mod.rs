use std::fmt;
use std::io::Write;
use std::sync::OnceLock;
use std::sync::atomic::{AtomicBool, AtomicU8, Ordering};
use serde::{Deserialize, Serialize};

use crate::utils::Color;


// ----------------------------------------------
// Level
// ----------------------------------------------

#[repr(u8)]
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Level {
    Silent,
    Verbose,
    Info,
    Warn,
    Error,
}

const ALL_LEVELS: [Level; 5] = [Level::Silent, Level::Verbose, Level::Info, Level::Warn, Level::Error];

impl Level {
    #[inline]
    pub fn is_enabled(self) -> bool {
        self as u8 >= THRESHOLD.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn name(self) -> &'static str {
        match self {
            Self::Silent  => "silent",
            Self::Verbose => "verbose",
            Self::Info    => "info",
            Self::Warn    => "warn",
            Self::Error   => "error",
        }
    }

    // Ignores case and surrounding whitespace.
    pub fn from_name(name: &str) -> Option<Self> {
        let name = name.trim();
        ALL_LEVELS.into_iter().find(|level| level.name().eq_ignore_ascii_case(name))
    }

    // Tint for hosts that show log lines on screen.
    pub fn color(self) -> Color {
        match self {
            Self::Silent  => Color::white(),
            Self::Verbose => Color::gray(),
            Self::Info    => Color::green(),
            Self::Warn    => Color::yellow(),
            Self::Error   => Color::red(),
        }
    }

    fn ansi_code(self) -> Option<&'static str> {
        match self {
            Self::Silent  => None,
            Self::Verbose => Some("90"),
            Self::Info    => Some("32"),
            Self::Warn    => Some("33"),
            Self::Error   => Some("31"),
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// ----------------------------------------------
// Channel
// ----------------------------------------------

// Named log category. The name is hashed at compile time so
// hosts can filter or bucket records without string compares.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Channel {
    pub name: &'static str,
    pub hash: u64,
}

impl Channel {
    pub const fn new(name: &'static str) -> Self {
        Self { name, hash: fnv1a(name.as_bytes()) }
    }
}

// 64-bit FNV-1a. Empty input hashes to zero.
const fn fnv1a(bytes: &[u8]) -> u64 {
    if bytes.is_empty() {
        return 0;
    }

    let mut state: u64 = 0xcbf29ce484222325;
    let mut i = 0;
    while i < bytes.len() {
        state = (state ^ bytes[i] as u64).wrapping_mul(0x100000001b3);
        i += 1;
    }
    state
}

#[macro_export]
macro_rules! channel {
    ($name:literal) => { $crate::log::Channel::new(concat!(" [", $name, "]")) };
}

// ----------------------------------------------
// Settings
// ----------------------------------------------

pub const LOG_LEVEL_ENV_VAR: &str = "MINIMAP_LOG";

static THRESHOLD: AtomicU8 = AtomicU8::new(Level::Info as u8);
static SHOW_LOCATION: AtomicBool = AtomicBool::new(false);
static TTY_COLORS: AtomicBool = AtomicBool::new(true);

#[inline]
pub fn set_level(level: Level) {
    THRESHOLD.store(level as u8, Ordering::Relaxed);
}

#[inline]
pub fn level() -> Level {
    let index = THRESHOLD.load(Ordering::Relaxed) as usize;
    ALL_LEVELS[index.min(ALL_LEVELS.len() - 1)]
}

// `MINIMAP_LOG=verbose` lowers the threshold; anything unrecognized is ignored.
pub fn init_from_env() {
    let Ok(value) = std::env::var(LOG_LEVEL_ENV_VAR) else {
        return;
    };

    match Level::from_name(&value) {
        Some(level) => set_level(level),
        None => eprintln!("Unknown {LOG_LEVEL_ENV_VAR} value '{value}', keeping level {}.", level()),
    }
}

#[inline]
pub fn enable_source_location(enable: bool) {
    SHOW_LOCATION.store(enable, Ordering::Relaxed);
}

#[inline]
pub fn enable_tty_colors(enable: bool) {
    TTY_COLORS.store(enable, Ordering::Relaxed);
}

// ----------------------------------------------
// Listener
// ----------------------------------------------

#[derive(Copy, Clone, Debug)]
pub struct Location {
    pub file: &'static str,
    pub line: u32,
    pub module: &'static str,
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{} {}", self.file, self.line, self.module)
    }
}

// A log line as handed to the listener.
pub struct Record {
    pub level: Level,
    pub channel: Option<Channel>,
    pub location: Location,
    pub message: String,
}

type Listener = Box<dyn Fn(Record) + Send + Sync>;

static LISTENER: OnceLock<Listener> = OnceLock::new();

// Installs the process-wide listener. Only the first call wins.
pub fn set_listener(listener: impl Fn(Record) + Send + Sync + 'static) -> bool {
    LISTENER.set(Box::new(listener)).is_ok()
}

// ----------------------------------------------
// Output
// ----------------------------------------------

fn format_line(level: Level, channel: Option<&Channel>, location: &Location, args: fmt::Arguments) -> String {
    let tag = channel.map_or("", |chan| chan.name);

    let mut line = match level.ansi_code().filter(|_| TTY_COLORS.load(Ordering::Relaxed)) {
        Some(code) => format!("\x1b[{code}m[{level:?}]{tag}\x1b[0m"),
        None => format!("[{level:?}]{tag}"),
    };

    if SHOW_LOCATION.load(Ordering::Relaxed) {
        line += &format!(" {location} -");
    }

    line += &format!(" {args}\n");
    line
}

// Entry point for the logging macros. Warn and Error go to stderr.
pub fn emit(level: Level, channel: Option<Channel>, location: Location, args: fmt::Arguments) {
    if !level.is_enabled() {
        return;
    }

    let line = format_line(level, channel.as_ref(), &location, args);
    let _ = if level >= Level::Warn {
        std::io::stderr().lock().write_all(line.as_bytes())
    } else {
        std::io::stdout().lock().write_all(line.as_bytes())
    };

    if let Some(listener) = LISTENER.get() {
        listener(Record { level, channel, location, message: args.to_string() });
    }
}

#[doc(hidden)]
#[macro_export]
macro_rules! __log_at {
    ($level:ident, $chan:expr, $($fmt:tt)+) => {
        if $crate::log::Level::$level.is_enabled() {
            $crate::log::emit(
                $crate::log::Level::$level,
                $chan,
                $crate::log::Location { file: file!(), line: line!(), module: module_path!() },
                format_args!($($fmt)+),
            );
        }
    };
}

// ----------------------------------------------
// Macros
// ----------------------------------------------

// Each takes an optional channel first: `log::warn!(log::channel!("raster"), "...")`.

#[macro_export]
macro_rules! verbose {
    ($fmt:literal $($rest:tt)*) => { $crate::__log_at!(Verbose, None, $fmt $($rest)*) };
    ($chan:expr, $($rest:tt)+) => { $crate::__log_at!(Verbose, Some($chan), $($rest)+) };
}

#[macro_export]
macro_rules! info {
    ($fmt:literal $($rest:tt)*) => { $crate::__log_at!(Info, None, $fmt $($rest)*) };
    ($chan:expr, $($rest:tt)+) => { $crate::__log_at!(Info, Some($chan), $($rest)+) };
}

#[macro_export]
macro_rules! warn {
    ($fmt:literal $($rest:tt)*) => { $crate::__log_at!(Warn, None, $fmt $($rest)*) };
    ($chan:expr, $($rest:tt)+) => { $crate::__log_at!(Warn, Some($chan), $($rest)+) };
}

#[macro_export]
macro_rules! error {
    ($fmt:literal $($rest:tt)*) => { $crate::__log_at!(Error, None, $fmt $($rest)*) };
    ($chan:expr, $($rest:tt)+) => { $crate::__log_at!(Error, Some($chan), $($rest)+) };
}

// Scoped usage: log::info!(), log::warn!(), etc.
#[allow(unused_imports)]
pub use crate::{channel, verbose, info, warn, error};
