// Transformation definition lines
//
// A group header is `<key>:<rule>;<rule>;...` where each rule is either
// `replace=<from>><to>` or `replace_final=<to>`. `#` lines after a header
// accumulate into that group's comment until the next header.

use sarf_core::transformation::{REPLACE_FINAL_PREFIX, REPLACE_PREFIX};
use sarf_core::{RewriteOp, TransformationGroup, TransformationRule};

use super::{COMMENT_PREFIX, is_single_line};

/// Separator between group key and rule list.
const KEY_SEPARATOR: char = ':';

/// Separator between rules in a header.
const RULE_SEPARATOR: &str = ";";

/// Separator between source and target of a `replace=` rule.
const ARROW: char = '>';

/// Parse a single rule clause. Returns `None` for an unrecognized clause.
pub fn parse_rule_clause(clause: &str) -> Option<RewriteOp> {
    let clause = clause.trim();
    if let Some(to) = clause.strip_prefix(REPLACE_FINAL_PREFIX) {
        return Some(RewriteOp::ReplaceFinal {
            to: to.trim().to_string(),
        });
    }
    let operands = clause.strip_prefix(REPLACE_PREFIX)?;
    let (from, to) = operands.split_once(ARROW)?;
    Some(RewriteOp::Replace {
        from: from.trim().to_string(),
        to: to.trim().to_string(),
    })
}

/// Parse a `;`-separated rule list.
///
/// Rules receive order indices `0, 1, 2, ...` in list order. Empty segments
/// and unrecognized clauses are skipped without consuming an index.
pub fn parse_rules(text: &str) -> Vec<TransformationRule> {
    let mut rules = Vec::new();
    for clause in text.split(RULE_SEPARATOR) {
        if clause.trim().is_empty() {
            continue;
        }
        match parse_rule_clause(clause) {
            Some(op) => rules.push(TransformationRule {
                order: rules.len(),
                op,
            }),
            None => tracing::warn!(clause = clause.trim(), "skipping unrecognized rule clause"),
        }
    }
    rules
}

/// Parse a transformation definition source into groups, in source order.
///
/// Comments seen before the first header have no group to attach to and
/// are dropped.
pub fn parse_transformations<I, S>(lines: I) -> Vec<TransformationGroup>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut groups: Vec<TransformationGroup> = Vec::new();

    for (index, raw) in lines.into_iter().enumerate() {
        let line = raw.as_ref().trim();
        if line.is_empty() {
            continue;
        }
        if let Some(comment) = line.strip_prefix(COMMENT_PREFIX) {
            if let Some(current) = groups.last_mut() {
                current.append_comment(comment.trim());
            }
            continue;
        }
        let Some((key, rules)) = line.split_once(KEY_SEPARATOR) else {
            tracing::warn!(line = index + 1, "skipping transformation line without ':'");
            continue;
        };
        let key = key.trim();
        if key.is_empty() {
            tracing::warn!(line = index + 1, "skipping transformation group with empty key");
            continue;
        }
        let mut group = TransformationGroup::new(key);
        group.rules = parse_rules(rules.trim());
        groups.push(group);
    }

    groups
}

/// Format a group's header line.
pub fn format_header(group: &TransformationGroup) -> String {
    let rules: Vec<String> = group.rules.iter().map(ToString::to_string).collect();
    format!(
        "{}{KEY_SEPARATOR}{}",
        group.key,
        rules.join(RULE_SEPARATOR)
    )
}

/// Serialize groups back into definition lines.
///
/// Each header is followed by its comment lines, so parsing the output
/// reattaches every comment to the same group.
pub fn serialize_transformations(groups: &[TransformationGroup]) -> Vec<String> {
    let mut lines = Vec::new();
    for group in groups {
        lines.push(format_header(group));
        if let Some(comment) = &group.comment {
            for line in comment.split('\n') {
                lines.push(format!("{COMMENT_PREFIX} {}", line.trim()));
            }
        }
    }
    lines
}

/// Whether `group` survives serialization and reparsing with the same key
/// and the same rule operations in the same sequence.
///
/// Order indices and comment whitespace are not compared; both are
/// normalized by the line format.
pub fn group_is_representable(group: &TransformationGroup) -> bool {
    if !is_single_line(&format_header(group)) {
        return false;
    }
    let reparsed = parse_transformations(serialize_transformations(std::slice::from_ref(group)));
    match reparsed.as_slice() {
        [only] => {
            only.key == group.key
                && only.rules.len() == group.rules.len()
                && only.rules.iter().zip(&group.rules).all(|(a, b)| a.op == b.op)
        }
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_replace_clause() {
        assert_eq!(
            parse_rule_clause("replace=او>ائ"),
            Some(RewriteOp::Replace {
                from: "او".into(),
                to: "ائ".into()
            })
        );
    }

    #[test]
    fn replace_splits_on_first_arrow() {
        assert_eq!(
            parse_rule_clause("replace=a>b>c"),
            Some(RewriteOp::Replace {
                from: "a".into(),
                to: "b>c".into()
            })
        );
    }

    #[test]
    fn parses_replace_final_clause() {
        assert_eq!(
            parse_rule_clause(" replace_final=ي "),
            Some(RewriteOp::ReplaceFinal { to: "ي".into() })
        );
    }

    #[test]
    fn rejects_unknown_or_incomplete_clauses() {
        assert_eq!(parse_rule_clause("replace=ab"), None);
        assert_eq!(parse_rule_clause("delete=a"), None);
        assert_eq!(parse_rule_clause(""), None);
    }

    #[test]
    fn rule_orders_start_at_zero_and_increase() {
        let rules = parse_rules("replace=a>b;replace_final=c;replace=d>e");
        let orders: Vec<usize> = rules.iter().map(|r| r.order).collect();
        assert_eq!(orders, vec![0, 1, 2]);
    }

    #[test]
    fn skipped_clauses_do_not_consume_indices() {
        let rules = parse_rules("replace=a>b;;bogus;replace_final=c;");
        assert_eq!(rules.len(), 2);
        assert_eq!(rules[1].order, 1);
        assert_eq!(rules[1].op, RewriteOp::ReplaceFinal { to: "c".into() });
    }

    #[test]
    fn parses_groups_with_comments() {
        let src = [
            "# preamble with no group",
            "ajwaf_فاعل:replace=او>ائ;replace=اي>ائ",
            "# hamza on the medial seat",
            "# second note",
            "",
            "naqis_فاعل:replace_final=ي",
        ];
        let groups = parse_transformations(src);
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].key, "ajwaf_فاعل");
        assert_eq!(groups[0].rules.len(), 2);
        assert_eq!(
            groups[0].comment.as_deref(),
            Some("hamza on the medial seat\nsecond note")
        );
        assert_eq!(groups[1].key, "naqis_فاعل");
        assert_eq!(groups[1].comment, None);
    }

    #[test]
    fn header_without_rules_gives_empty_group() {
        let groups = parse_transformations(["empty_group:"]);
        assert_eq!(groups.len(), 1);
        assert!(groups[0].rules.is_empty());
    }

    #[test]
    fn lines_without_colon_are_skipped() {
        let groups = parse_transformations(["garbage", "k:replace=a>b"]);
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].key, "k");
    }

    #[test]
    fn empty_key_is_skipped() {
        let groups = parse_transformations([":replace=a>b"]);
        assert!(groups.is_empty());
    }

    #[test]
    fn key_is_split_on_first_colon_only() {
        let groups = parse_transformations(["k:replace=a>b:c"]);
        assert_eq!(groups[0].key, "k");
        assert_eq!(
            groups[0].rules[0].op,
            RewriteOp::Replace {
                from: "a".into(),
                to: "b:c".into()
            }
        );
    }

    #[test]
    fn header_format() {
        let groups = parse_transformations(["k: replace=a>b ; replace_final=c"]);
        assert_eq!(format_header(&groups[0]), "k:replace=a>b;replace_final=c");
    }

    #[test]
    fn serialization_round_trips_comments() {
        let src = [
            "ajwaf_فاعل:replace=او>ائ;replace=اي>ائ",
            "# hamza",
            "# second",
            "naqis_فاعل:replace_final=ي",
            "mithal_افتعل:replace=وت>تّ",
            "# assimilation",
        ];
        let groups = parse_transformations(src);
        let lines = serialize_transformations(&groups);
        assert_eq!(lines[0], "ajwaf_فاعل:replace=او>ائ;replace=اي>ائ");
        assert_eq!(lines[1], "# hamza");
        let reparsed = parse_transformations(&lines);
        assert_eq!(reparsed, groups);
    }

    fn group(key: &str, rules: Vec<TransformationRule>) -> TransformationGroup {
        let mut group = TransformationGroup::new(key);
        group.rules = rules;
        group
    }

    #[test]
    fn representable_groups() {
        assert!(group_is_representable(&group(
            "ajwaf_فاعل",
            vec![
                TransformationRule::replace(0, "او", "ائ"),
                TransformationRule::replace_final(1, "ي"),
            ],
        )));
        assert!(group_is_representable(&group("empty_group", vec![])));
        // `>` is only special in the source operand.
        assert!(group_is_representable(&group(
            "k",
            vec![TransformationRule::replace(0, "a", "b>c")],
        )));
    }

    #[test]
    fn unrepresentable_keys() {
        assert!(!group_is_representable(&group("#k", vec![])));
        assert!(!group_is_representable(&group("a:b", vec![])));
        assert!(!group_is_representable(&group("", vec![])));
        assert!(!group_is_representable(&group(" k", vec![])));
        assert!(!group_is_representable(&group("k\nj", vec![])));
    }

    #[test]
    fn unrepresentable_operands() {
        let arrow_in_source = group("k", vec![TransformationRule::replace(0, "a>b", "c")]);
        assert!(!group_is_representable(&arrow_in_source));
        let separator_in_target = group("k", vec![TransformationRule::replace(0, "a", "b;c")]);
        assert!(!group_is_representable(&separator_in_target));
        let separator_in_final = group("k", vec![TransformationRule::replace_final(0, "x;y")]);
        assert!(!group_is_representable(&separator_in_final));
        let padded = group("k", vec![TransformationRule::replace(0, " a", "b")]);
        assert!(!group_is_representable(&padded));
    }

    #[test]
    fn comments_and_order_indices_are_not_compared() {
        let mut g = group(
            "k",
            vec![
                TransformationRule::replace(4, "a", "b"),
                TransformationRule::replace(9, "b", "c"),
            ],
        );
        g.comment = Some("  spaced note ".into());
        assert!(group_is_representable(&g));
    }
}
