pub mod spinner;

use cloudcache::TableFormat;

/// Indent applied to tables in pretty output.
pub const TABLE_INDENT: usize = 2;

/// Render rows as an indented table for pretty output.
pub fn pretty_table<I>(rows: I, headers: &[&str], format: TableFormat) -> String
where
    I: IntoIterator,
    I::Item: IntoIterator,
    <I::Item as IntoIterator>::Item: std::fmt::Display,
{
    cloudcache::render(rows, headers, TABLE_INDENT, format)
}
