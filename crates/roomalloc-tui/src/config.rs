//! Command-line configuration.

use std::path::PathBuf;

use clap::Parser;

/// Distribute a fixed number of guests across hotel rooms.
#[derive(Debug, Clone, Parser)]
#[command(name = "roomalloc-tui", version, about)]
pub struct Config {
    /// Total guests to distribute.
    #[arg(long, default_value_t = 10)]
    pub guests: u32,

    /// Number of rooms.
    #[arg(long, default_value_t = 3)]
    pub rooms: u32,

    /// Append structured logs to this file.
    ///
    /// The terminal owns the screen, so logs never go to stdout. Filtered
    /// via the `ROOMALLOC_LOG` environment variable.
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_ten_guests_three_rooms() {
        let config = Config::parse_from(["roomalloc-tui"]);
        assert_eq!(config.guests, 10);
        assert_eq!(config.rooms, 3);
        assert_eq!(config.log_file, None);
    }

    #[test]
    fn flags_override_defaults() {
        let config = Config::parse_from(["roomalloc-tui", "--guests", "6", "--rooms", "2"]);
        assert_eq!(config.guests, 6);
        assert_eq!(config.rooms, 2);
    }
}
