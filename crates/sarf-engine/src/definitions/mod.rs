// Definition file grammar
//
// Pure functions that turn already-decoded text lines into schemes,
// roots and transformation groups, and back. No file I/O happens here.

mod schemes;
mod transformations;

pub use schemes::{parse_scheme_line, scheme_is_representable, serialize_schemes};
pub use transformations::{
    format_header, group_is_representable, parse_rule_clause, parse_rules,
    parse_transformations, serialize_transformations,
};

/// Lines starting with this prefix are comments.
pub(crate) const COMMENT_PREFIX: char = '#';

/// Definitions are read one line at a time, so no field may span lines.
fn is_single_line(text: &str) -> bool {
    !text.contains(['\n', '\r'])
}

/// Outcome of reading one definition line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DefinitionLine<T> {
    /// Blank or comment line.
    Ignored,
    /// A usable definition.
    Entry(T),
    /// A non-blank line that does not follow the grammar.
    Malformed,
}

/// Classify one roots-file line. Roots are trimmed; their length is
/// checked by the caller.
pub fn parse_root_line(line: &str) -> DefinitionLine<&str> {
    let line = line.trim();
    if line.is_empty() || line.starts_with(COMMENT_PREFIX) {
        DefinitionLine::Ignored
    } else {
        DefinitionLine::Entry(line)
    }
}
