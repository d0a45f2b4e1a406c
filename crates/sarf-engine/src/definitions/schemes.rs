// Scheme definition lines: `<name>=<template>`

use sarf_store::PatternStore;

use super::{COMMENT_PREFIX, DefinitionLine, is_single_line};

/// Separator between scheme name and template.
const SEPARATOR: char = '=';

/// Classify one scheme line.
///
/// Blank lines and `#` lines are ignored. A definition must split into
/// exactly two non-empty parts on `=`.
pub fn parse_scheme_line(line: &str) -> DefinitionLine<(&str, &str)> {
    let line = line.trim();
    if line.is_empty() || line.starts_with(COMMENT_PREFIX) {
        return DefinitionLine::Ignored;
    }
    let mut parts = line.split(SEPARATOR);
    match (parts.next(), parts.next(), parts.next()) {
        (Some(name), Some(template), None) => {
            let (name, template) = (name.trim(), template.trim());
            if name.is_empty() || template.is_empty() {
                DefinitionLine::Malformed
            } else {
                DefinitionLine::Entry((name, template))
            }
        }
        _ => DefinitionLine::Malformed,
    }
}

/// Whether `name` and `template` can be written as one scheme line and
/// read back as the same pair.
pub fn scheme_is_representable(name: &str, template: &str) -> bool {
    if !is_single_line(name) || !is_single_line(template) {
        return false;
    }
    let line = format!("{name}{SEPARATOR}{template}");
    parse_scheme_line(&line) == DefinitionLine::Entry((name, template))
}

/// Serialize every scheme, in the table's bucket order.
pub fn serialize_schemes(table: &PatternStore) -> Vec<String> {
    table
        .iter()
        .map(|(name, template)| format!("{name}{SEPARATOR}{template}"))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_definition() {
        assert_eq!(
            parse_scheme_line("فاعل={1}ا{2}{3}"),
            DefinitionLine::Entry(("فاعل", "{1}ا{2}{3}"))
        );
    }

    #[test]
    fn trims_both_sides() {
        assert_eq!(
            parse_scheme_line("  مفعول = م{1}{2}و{3}  "),
            DefinitionLine::Entry(("مفعول", "م{1}{2}و{3}"))
        );
    }

    #[test]
    fn ignores_blank_and_comment_lines() {
        assert_eq!(parse_scheme_line(""), DefinitionLine::Ignored);
        assert_eq!(parse_scheme_line("   "), DefinitionLine::Ignored);
        assert_eq!(parse_scheme_line("# schemes"), DefinitionLine::Ignored);
        assert_eq!(parse_scheme_line("#a=b"), DefinitionLine::Ignored);
    }

    #[test]
    fn rejects_wrong_part_count() {
        assert_eq!(parse_scheme_line("no separator"), DefinitionLine::Malformed);
        assert_eq!(parse_scheme_line("a=b=c"), DefinitionLine::Malformed);
        assert_eq!(parse_scheme_line("a="), DefinitionLine::Malformed);
        assert_eq!(parse_scheme_line("=b"), DefinitionLine::Malformed);
    }

    #[test]
    fn representable_schemes() {
        assert!(scheme_is_representable("فاعل", "{1}ا{2}{3}"));
        assert!(scheme_is_representable("active participle", "{1}ا{2}{3}"));
    }

    #[test]
    fn unrepresentable_schemes() {
        assert!(!scheme_is_representable("#draft", "{1}{2}{3}"));
        assert!(!scheme_is_representable("a=b", "{1}{2}{3}"));
        assert!(!scheme_is_representable(" padded ", "{1}{2}{3}"));
        assert!(!scheme_is_representable("", "{1}{2}{3}"));
        assert!(!scheme_is_representable("فاعل", ""));
        assert!(!scheme_is_representable("فاعل", "{1}={2}{3}"));
        assert!(!scheme_is_representable("فاعل", "{1}{2}{3} "));
        assert!(!scheme_is_representable("two\nlines", "{1}{2}{3}"));
    }

    #[test]
    fn serialization_reparses_to_same_table() {
        let mut table = PatternStore::new();
        table.put("فاعل", "{1}ا{2}{3}");
        table.put("مفعول", "م{1}{2}و{3}");
        let lines = serialize_schemes(&table);
        assert_eq!(lines.len(), 2);

        let mut reloaded = PatternStore::new();
        for line in &lines {
            if let DefinitionLine::Entry((name, template)) = parse_scheme_line(line) {
                reloaded.put(name, template);
            }
        }
        assert_eq!(reloaded.get("فاعل"), Some("{1}ا{2}{3}"));
        assert_eq!(reloaded.get("مفعول"), Some("م{1}{2}و{3}"));
    }
}
