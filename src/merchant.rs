//! Line-at-a-time driver
//!
//! `Merchant` owns one conversation: a `Registry` plus the configuration
//! used to answer queries. Feed it lines, print whatever comes back.
//!
//! A host that wants to share one conversation between threads wraps the
//! `Merchant` in a `Mutex` and holds the lock for the whole of
//! `single_command`, since a price update reads and then writes the registry.

use std::io::{self, BufRead, Write};

use tracing::debug;

use crate::commands::parse_command;
use crate::config::MerchantConfig;
use crate::registry::Registry;

/// Strip the surrounding whitespace every driver loop removes before parsing
pub fn normalize_line(line: &str) -> &str {
    line.trim()
}

/// Counters for one `Merchant::run` pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunStats {
    pub lines: usize,
    pub responses: usize,
}

#[derive(Debug, Default)]
pub struct Merchant {
    registry: Registry,
    config: MerchantConfig,
}

impl Merchant {
    pub fn new(config: MerchantConfig) -> Self {
        Self {
            registry: Registry::new(),
            config,
        }
    }

    pub fn config(&self) -> &MerchantConfig {
        &self.config
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Parse and execute one line
    ///
    /// Returns `None` when the command has nothing to say (a successful
    /// definition).
    pub fn single_command(&mut self, line: &str) -> Option<String> {
        let command = parse_command(line);
        command
            .execute(&mut self.registry, self.config.rounding)
            .filter(|out| !out.is_empty())
    }

    /// Execute every line from `reader`, writing each response on its own line
    ///
    /// Each line goes through [`normalize_line`] first. A blank line is an
    /// unknown command like any other.
    pub fn run<R: BufRead, W: Write>(&mut self, reader: R, mut writer: W) -> io::Result<RunStats> {
        let mut stats = RunStats::default();

        for line in reader.lines() {
            let line = line?;
            stats.lines += 1;

            if let Some(response) = self.single_command(normalize_line(&line)) {
                writeln!(writer, "{}", response)?;
                stats.responses += 1;
            }
        }

        writer.flush()?;
        debug!(lines = stats.lines, responses = stats.responses, "run finished");
        Ok(stats)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RoundingMode;

    #[test]
    fn test_single_command() {
        let mut merchant = Merchant::default();
        assert_eq!(merchant.single_command("bork is I"), None);
        assert_eq!(merchant.single_command("kmar is V"), None);
        assert_eq!(merchant.single_command("gromp is X"), None);
        assert_eq!(merchant.single_command("urx is L"), None);
        assert_eq!(
            merchant.single_command("how much is gromp urx bork bork ?").as_deref(),
            Some("gromp urx bork bork is 42")
        );
        assert_eq!(merchant.registry().numeral_count(), 4);
    }

    #[test]
    fn test_conversations_are_isolated() {
        let mut first = Merchant::default();
        let mut second = Merchant::default();

        first.single_command("bork is I");
        assert_eq!(
            second.single_command("how much is bork ?").as_deref(),
            Some("Unknown alien numeral 'bork'")
        );
    }

    #[test]
    fn test_normalize_line() {
        assert_eq!(normalize_line("  bork is I \t"), "bork is I");
        assert_eq!(normalize_line("how much is bork ?\r"), "how much is bork ?");
        assert_eq!(normalize_line("   "), "");
    }

    #[test]
    fn test_run_answers_blank_lines_and_skips_definitions() {
        let input = "bork is I\n\n   \nhow much is bork bork ?\r\nnonsense\n";
        let mut out = Vec::new();
        let mut merchant = Merchant::new(MerchantConfig::new(RoundingMode::HalfUp));

        let stats = merchant.run(input.as_bytes(), &mut out).unwrap();

        assert_eq!(stats, RunStats { lines: 5, responses: 4 });
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "I have no idea what you are talking about\n\
             I have no idea what you are talking about\n\
             bork bork is 2\n\
             I have no idea what you are talking about\n"
        );
        assert_eq!(merchant.config().rounding, RoundingMode::HalfUp);
    }

    #[test]
    fn test_run_strips_leading_whitespace() {
        let mut out = Vec::new();
        let mut merchant = Merchant::default();

        merchant
            .run("  bork is I\n\t\thow much is bork ?\n".as_bytes(), &mut out)
            .unwrap();

        assert_eq!(String::from_utf8(out).unwrap(), "bork is 1\n");
        assert_eq!(merchant.registry().numeral_count(), 1);
    }
}
