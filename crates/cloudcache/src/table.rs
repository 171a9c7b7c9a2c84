//! Indented text tables for terminal output.

use std::fmt;
use std::str::FromStr;

use tabled::builder::Builder;
use tabled::settings::Style;

use crate::error::UnknownTableFormat;

/// Border style of a rendered table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TableFormat {
    #[default]
    FancyGrid,
    Grid,
    Rounded,
    Psql,
    Markdown,
    Simple,
    Plain,
}

impl TableFormat {
    pub const ALL: [TableFormat; 7] = [
        TableFormat::FancyGrid,
        TableFormat::Grid,
        TableFormat::Rounded,
        TableFormat::Psql,
        TableFormat::Markdown,
        TableFormat::Simple,
        TableFormat::Plain,
    ];

    /// Top and bottom rule drawn around a table with no rows and no headers.
    /// Styles without an outer frame draw nothing.
    fn empty_frame(&self) -> &'static str {
        match self {
            TableFormat::FancyGrid => "┌┐\n└┘",
            TableFormat::Grid => "++\n++",
            TableFormat::Rounded => "╭╮\n╰╯",
            TableFormat::Psql | TableFormat::Markdown | TableFormat::Simple | TableFormat::Plain => "",
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            TableFormat::FancyGrid => "fancy_grid",
            TableFormat::Grid => "grid",
            TableFormat::Rounded => "rounded",
            TableFormat::Psql => "psql",
            TableFormat::Markdown => "markdown",
            TableFormat::Simple => "simple",
            TableFormat::Plain => "plain",
        }
    }
}

impl fmt::Display for TableFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for TableFormat {
    type Err = UnknownTableFormat;

    /// Accepts `fancy_grid` as well as `fancy-grid`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace('-', "_");
        TableFormat::ALL
            .into_iter()
            .find(|format| format.name() == normalized)
            .ok_or_else(|| UnknownTableFormat(s.to_string()))
    }
}

/// Render `data` as a table, prefixing every line with `indent` spaces.
///
/// `headers` may be empty, in which case no header row is drawn. Column
/// widths and borders come from `tabled`; lines are always joined with `\n`.
/// With neither rows nor headers, only the style's outer frame is drawn.
pub fn render<I>(data: I, headers: &[&str], indent: usize, format: TableFormat) -> String
where
    I: IntoIterator,
    I::Item: IntoIterator,
    <I::Item as IntoIterator>::Item: fmt::Display,
{
    let mut builder = Builder::default();
    let mut has_records = !headers.is_empty();
    if !headers.is_empty() {
        builder.push_record(headers.iter().map(|h| h.to_string()));
    }
    for row in data {
        builder.push_record(row.into_iter().map(|cell| cell.to_string()));
        has_records = true;
    }

    if !has_records {
        return indent_lines(format.empty_frame(), indent);
    }

    let mut table = builder.build();
    match format {
        TableFormat::FancyGrid => table.with(Style::modern()),
        TableFormat::Grid => table.with(Style::ascii()),
        TableFormat::Rounded => table.with(Style::rounded()),
        TableFormat::Psql => table.with(Style::psql()),
        TableFormat::Markdown => table.with(Style::markdown()),
        TableFormat::Simple => table.with(Style::blank()),
        TableFormat::Plain => table.with(Style::empty()),
    };

    indent_lines(&table.to_string(), indent)
}

fn indent_lines(text: &str, indent: usize) -> String {
    let pad = " ".repeat(indent);
    text.split('\n')
        .map(|line| format!("{pad}{line}"))
        .collect::<Vec<_>>()
        .join("\n")
}
