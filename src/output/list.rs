//! Line-per-entry formatter
//!
//! `ListFormatter` writes one line per entry, optionally in a long
//! `ls -l` like layout, followed by a directory/file count summary.

use std::io;
use termcolor::{Color, ColorChoice, ColorSpec, NoColor, StandardStream, WriteColor};

use crate::entry::{Entry, FileKind};

use super::config::OutputConfig;
use super::utils::{display_path, format_mode, format_size, format_time};

/// Formatter for plain and long listings.
pub struct ListFormatter {
    config: OutputConfig,
}

impl ListFormatter {
    pub fn new(config: OutputConfig) -> Self {
        Self { config }
    }

    /// Render to a string without colors.
    pub fn format(&self, entries: &[Entry]) -> String {
        let mut out = NoColor::new(Vec::new());
        self.write_to(&mut out, entries)
            .expect("writing to a Vec is infallible");
        String::from_utf8_lossy(&out.into_inner()).to_string()
    }

    pub fn print(&self, entries: &[Entry]) -> io::Result<()> {
        let choice = if self.config.use_color {
            ColorChoice::Auto
        } else {
            ColorChoice::Never
        };
        let mut stdout = StandardStream::stdout(choice);
        self.write_to(&mut stdout, entries)
    }

    pub fn write_to<W: WriteColor>(&self, out: &mut W, entries: &[Entry]) -> io::Result<()> {
        let mut dir_count = 0;
        let mut file_count = 0;

        for entry in entries {
            if entry.is_dir() {
                dir_count += 1;
            } else {
                file_count += 1;
            }
            self.write_entry(out, entry)?;
        }

        out.reset()?;
        writeln!(out)?;
        writeln!(out, "{} directories, {} files", dir_count, file_count)?;
        Ok(())
    }

    fn write_entry<W: WriteColor>(&self, out: &mut W, entry: &Entry) -> io::Result<()> {
        let meta = &entry.metadata;
        if self.config.long {
            write!(
                out,
                "{} {:>3} {:>7} {} ",
                format_mode(meta),
                meta.nlink.map_or_else(|| "-".to_string(), |n| n.to_string()),
                format_size(meta.len),
                format_time(meta.modified),
            )?;
        }

        match meta.kind {
            FileKind::Dir => {
                out.set_color(ColorSpec::new().set_fg(Some(Color::Blue)).set_bold(true))?;
            }
            FileKind::Symlink => {
                out.set_color(ColorSpec::new().set_fg(Some(Color::Cyan)))?;
            }
            FileKind::Other => {
                out.set_color(ColorSpec::new().set_fg(Some(Color::Yellow)))?;
            }
            FileKind::File => {}
        }
        let path = display_path(&entry.path, self.config.relative_to.as_deref());
        write!(out, "{}", path)?;
        out.reset()?;
        writeln!(out)?;
        Ok(())
    }
}
