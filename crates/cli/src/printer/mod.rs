use std::io::{self, Write};

use clap::ValueEnum;
use filedeck_engine::{FileEntry, RowDecoration};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable output with optional colors.
    #[default]
    Human,
    /// NDJSON (newline-delimited JSON) for machine consumption.
    Json,
}

/// Color handling strategy.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum ColorChoice {
    /// Enable colors when stdout is a terminal.
    #[default]
    Auto,
    /// Always use colors.
    Always,
    /// Never use colors.
    Never,
}

/// Configuration for printing list results.
#[derive(Debug, Clone, Default)]
pub struct PrinterConfig {
    /// Color handling strategy.
    pub color: ColorChoice,
    /// Maximum number of rows to print.
    pub limit: Option<usize>,
}

/// Human-readable printer with optional color support.
pub struct HumanPrinter<W: Write, E: Write> {
    out: W,
    err: E,
    cfg: PrinterConfig,
    use_color: bool,
}

impl<W: Write, E: Write> HumanPrinter<W, E> {
    /// `Auto` color means no color here, since arbitrary writers cannot
    /// be checked for a terminal.
    pub fn new(out: W, err: E, cfg: PrinterConfig) -> Self {
        let use_color = cfg.color == ColorChoice::Always;

        Self {
            out,
            err,
            cfg,
            use_color,
        }
    }

    /// Create a printer that writes to stdout and stderr with TTY detection.
    pub fn stdout(cfg: PrinterConfig) -> HumanPrinter<io::Stdout, io::Stderr> {
        use std::io::IsTerminal;

        let use_color = match cfg.color {
            ColorChoice::Always => true,
            ColorChoice::Never => false,
            ColorChoice::Auto => io::stdout().is_terminal(),
        };

        HumanPrinter {
            out: io::stdout(),
            err: io::stderr(),
            cfg,
            use_color,
        }
    }

    /// Wrap the matched chars of `name` in bold yellow.
    fn highlight(&self, name: &str, matched: &[usize]) -> String {
        if !self.use_color || matched.is_empty() {
            return name.to_owned();
        }

        let mut out = String::with_capacity(name.len() + matched.len() * 11);
        let mut next = matched.iter().copied().peekable();

        for (idx, c) in name.chars().enumerate() {
            if next.peek() == Some(&idx) {
                next.next();
                out.push_str("\x1b[1;33m");
                out.push(c);
                out.push_str("\x1b[0m");
            } else {
                out.push(c);
            }
        }
        out
    }
}

pub struct JsonPrinter<W: Write, E: Write> {
    out: W,
    err: E,
}

impl<W: Write, E: Write> JsonPrinter<W, E> {
    pub fn new(out: W, err: E) -> Self {
        Self { out, err }
    }

    /// Create a printer that writes to stdout and stderr.
    pub fn stdout() -> JsonPrinter<io::Stdout, io::Stderr> {
        JsonPrinter {
            out: io::stdout(),
            err: io::stderr(),
        }
    }
}

/// Static context about a print run.
#[derive(Debug)]
pub struct ListPrintContext<'a> {
    /// Label of the listed source.
    pub source: &'a str,
    /// Filter text, if any.
    pub query: Option<&'a str>,
    /// Entries listed, visible or not.
    pub total: usize,
    /// Entries passing the filters.
    pub visible: usize,
    /// Whether output was truncated due to limit.
    pub truncated: bool,
}

/// One visible entry.
#[derive(Debug)]
pub struct ListRow<'a> {
    /// 1-based position among the visible rows.
    pub rank: usize,
    pub entry: &'a FileEntry,
    pub decoration: RowDecoration<'a>,
    /// Char indices of the name matched by the query.
    pub matched: &'a [usize],
    /// Whether the row cursor is on this row.
    pub selected: bool,
}

/// Trait for printing file lists.
///
/// Implementations receive a stream of rows and context, and are responsible
/// for formatting and outputting them appropriately.
pub trait ListPrinter {
    /// Called once before any rows are printed.
    fn begin(&mut self, ctx: &ListPrintContext) -> io::Result<()>;

    /// Called for each visible row.
    fn print_row(&mut self, row: &ListRow<'_>, ctx: &ListPrintContext) -> io::Result<()>;

    /// Called once after all rows are printed.
    fn finish(&mut self, ctx: &ListPrintContext) -> io::Result<()>;
}

impl<W: Write, E: Write> ListPrinter for HumanPrinter<W, E> {
    fn begin(&mut self, _ctx: &ListPrintContext) -> io::Result<()> {
        Ok(())
    }

    fn print_row(&mut self, row: &ListRow<'_>, _ctx: &ListPrintContext) -> io::Result<()> {
        let marker = if row.decoration.highlight { '>' } else { ' ' };
        let cursor = if row.selected { '*' } else { ' ' };
        let mut line = format!(
            "{marker}{cursor}{:<10} {}",
            row.entry.entry_type.label(),
            self.highlight(&row.entry.name, row.matched)
        );

        if let Some(sub_label) = row.decoration.sub_label {
            line.push_str(&format!("  [{sub_label}]"));
        }
        if !row.decoration.badges.is_empty() {
            line.push_str(&format!("  ({})", row.decoration.badges.join(", ")));
        }

        writeln!(self.out, "{line}")
    }

    fn finish(&mut self, ctx: &ListPrintContext) -> io::Result<()> {
        if ctx.truncated
            && let Some(limit) = self.cfg.limit
        {
            let remaining = ctx.visible.saturating_sub(limit);
            writeln!(self.out, "... and {remaining} more")?;
        }

        writeln!(self.err, "{} items", ctx.visible)
    }
}

impl<W: Write, E: Write> ListPrinter for JsonPrinter<W, E> {
    fn begin(&mut self, _ctx: &ListPrintContext) -> io::Result<()> {
        Ok(())
    }

    fn print_row(&mut self, row: &ListRow<'_>, ctx: &ListPrintContext) -> io::Result<()> {
        let obj = serde_json::json!({
            "source": ctx.source,
            "query": ctx.query,
            "rank": row.rank,
            "name": row.entry.name,
            "path": row.entry.full_path.to_string_lossy(),
            "type": row.entry.entry_type.key(),
            "current": row.decoration.highlight,
            "selected": row.selected,
            "badges": row.decoration.badges.as_slice(),
            "sub_label": row.decoration.sub_label,
            "matches": row.matched,
        });
        writeln!(self.out, "{obj}")
    }

    fn finish(&mut self, ctx: &ListPrintContext) -> io::Result<()> {
        let obj = serde_json::json!({
            "type": "summary",
            "source": ctx.source,
            "query": ctx.query,
            "total": ctx.total,
            "visible": ctx.visible,
            "truncated": ctx.truncated,
        });
        writeln!(self.err, "{obj}")
    }
}

#[cfg(test)]
#[path = "printer_tests.rs"]
mod tests;
