//! Narrowing a line down to its innermost enclosing definition.

use super::definitions::Definition;

/// Innermost definition among `candidates` (and their nested definitions)
/// whose span contains `line`.
///
/// The first containing candidate wins at every level. Siblings are expected
/// not to overlap; if a later sibling also contains the line, a warning is
/// logged and the first one is still used.
pub fn resolve_enclosing<'t>(line: usize, candidates: &[Definition<'t>]) -> Option<Definition<'t>> {
    let mut containing = candidates.iter().filter(|d| d.span().contains(line));
    let candidate = *containing.next()?;

    if let Some(other) = containing.next() {
        tracing::warn!(
            line,
            first = candidate.name(),
            second = other.name(),
            "overlapping sibling definitions contain the same line"
        );
    }

    tracing::trace!(
        line,
        name = candidate.name(),
        start = candidate.span().start,
        end = candidate.span().end,
        "narrowing into definition"
    );

    let nested = candidate.nested();
    Some(resolve_enclosing(line, &nested).unwrap_or(candidate))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::signature::definitions::{top_level_definitions, DefinitionKind};
    use crate::syntax::parse;

    const SOURCE: &str = "\
def first():
    return 1

class Shape:
    sides = 0

    def area(self):
        def unit():
            return 1
        return unit()

def last():
    pass
";

    fn resolved_name(line: usize) -> Option<String> {
        let tree = parse(SOURCE).unwrap();
        let top = top_level_definitions(&tree);
        resolve_enclosing(line, &top).map(|d| d.name().to_string())
    }

    #[test]
    fn line_outside_every_definition() {
        assert_eq!(resolved_name(3), None);
        assert_eq!(resolved_name(11), None);
        assert_eq!(resolved_name(100), None);
        assert_eq!(resolved_name(0), None);
    }

    #[test]
    fn boundaries_are_inclusive() {
        assert_eq!(resolved_name(1).as_deref(), Some("first"));
        assert_eq!(resolved_name(2).as_deref(), Some("first"));
        assert_eq!(resolved_name(12).as_deref(), Some("last"));
        assert_eq!(resolved_name(13).as_deref(), Some("last"));
    }

    #[test]
    fn innermost_definition_wins() {
        assert_eq!(resolved_name(7).as_deref(), Some("area"));
        assert_eq!(resolved_name(8).as_deref(), Some("unit"));
        assert_eq!(resolved_name(9).as_deref(), Some("unit"));
        assert_eq!(resolved_name(10).as_deref(), Some("area"));
    }

    #[test]
    fn class_is_returned_without_special_casing() {
        let tree = parse(SOURCE).unwrap();
        let top = top_level_definitions(&tree);
        let resolved = resolve_enclosing(5, &top).unwrap();
        assert_eq!(resolved.kind(), DefinitionKind::Class);
        assert_eq!(resolved.name(), "Shape");
    }

    #[test]
    fn first_of_overlapping_siblings_wins() {
        let left = parse("def left(a):\n    b = a\n    return b\n").unwrap();
        let right = parse("def right(c):\n    return c\n").unwrap();
        let a = top_level_definitions(&left)[0];
        let b = top_level_definitions(&right)[0];
        assert!(a.span().contains(2) && b.span().contains(2));

        assert_eq!(resolve_enclosing(2, &[a, b]).unwrap().name(), "left");
        assert_eq!(resolve_enclosing(2, &[b, a]).unwrap().name(), "right");

        // Past the end of `right`, only `left` contains the line.
        assert_eq!(resolve_enclosing(3, &[b, a]).unwrap().name(), "left");
    }

    #[test]
    fn empty_candidates() {
        assert!(resolve_enclosing(1, &[]).is_none());
    }
}
