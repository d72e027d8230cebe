//! Patch reconciler
//!
//! Folds added/removed declaration lines into a [`ChangeMapping`]. A removed
//! and an added line for the same name describe one edit, and hunks may show
//! either half first, so the rule is symmetric:
//!
//! | seen first      | then              | result                               |
//! |-----------------|-------------------|--------------------------------------|
//! | Added(v)        | Removed(v)        | entry deleted                        |
//! | Removed(v)      | Added(v)          | entry deleted                        |
//! | Removed(old)    | Added(new)        | Updated { new, previous: old }       |
//! | Added(new)      | Removed(old)      | Updated { new, previous: old }       |
//!
//! At most one removal and one addition per name are expected; repeats of a
//! half that is already recorded leave the mapping untouched.

use crate::domain::{ChangeKind, ChangeMapping, DependencyChange};
use crate::error::ReconcileError;
use crate::git::{DiffLine, LineOrigin};

/// A parsed `name: version` declaration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Declaration {
    pub name: String,
    pub version: String,
}

/// Parse a single declaration line such as `"react": "18.0.0",`
///
/// The trimmed line must split on whitespace into exactly two tokens. Trailing
/// and leading `,`/`:` are stripped from each token, then one pair of
/// surrounding double quotes.
pub fn parse_declaration(content: &str) -> Result<Declaration, ReconcileError> {
    let mut tokens = content.split_whitespace();
    match (tokens.next(), tokens.next(), tokens.next()) {
        (Some(name), Some(version), None) => {
            let name = clean_token(name);
            let version = clean_token(version);
            if name.is_empty() {
                return Err(ReconcileError::malformed(content.trim()));
            }
            Ok(Declaration {
                name: name.to_string(),
                version: version.to_string(),
            })
        }
        _ => Err(ReconcileError::malformed(content.trim())),
    }
}

fn clean_token(token: &str) -> &str {
    let token = token.trim_matches([',', ':']);
    token
        .strip_prefix('"')
        .and_then(|t| t.strip_suffix('"'))
        .unwrap_or(token)
}

/// Apply one diff line to the mapping
///
/// Context lines are ignored. Added and removed lines must hold a single
/// declaration.
pub fn apply_line(mapping: &mut ChangeMapping, line: &DiffLine) -> Result<(), ReconcileError> {
    match line.origin {
        LineOrigin::Context => Ok(()),
        LineOrigin::Removed => {
            let decl = parse_declaration(&line.content)?;
            apply_removed(mapping, decl);
            Ok(())
        }
        LineOrigin::Added => {
            let decl = parse_declaration(&line.content)?;
            apply_added(mapping, decl);
            Ok(())
        }
    }
}

fn apply_removed(mapping: &mut ChangeMapping, decl: Declaration) {
    let Declaration { name, version } = decl;
    match mapping.get_mut(&name) {
        Some(existing) if existing.kind == ChangeKind::Added => {
            if existing.version == version {
                mapping.remove(&name);
            } else {
                let newer = existing.version.clone();
                existing.mark_updated(version, newer);
            }
        }
        Some(_) => {}
        None => mapping.insert(DependencyChange::removed(name, version)),
    }
}

fn apply_added(mapping: &mut ChangeMapping, decl: Declaration) {
    let Declaration { name, version } = decl;
    match mapping.get_mut(&name) {
        Some(existing) if existing.kind == ChangeKind::Removed => {
            if existing.version == version {
                mapping.remove(&name);
            } else {
                let older = existing.version.clone();
                existing.mark_updated(older, version);
            }
        }
        Some(_) => {}
        None => mapping.insert(DependencyChange::added(name, version)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn removed(name: &str, version: &str) -> DiffLine {
        DiffLine::removed(format!("    \"{}\": \"{}\",", name, version))
    }

    fn added(name: &str, version: &str) -> DiffLine {
        DiffLine::added(format!("    \"{}\": \"{}\",", name, version))
    }

    fn fold(lines: &[DiffLine]) -> ChangeMapping {
        let mut mapping = ChangeMapping::new();
        for line in lines {
            apply_line(&mut mapping, line).unwrap();
        }
        mapping
    }

    #[test]
    fn test_parse_declaration_strips_separators_and_quotes() {
        let decl = parse_declaration("  \"react\": \"18.0.0\",").unwrap();
        assert_eq!(decl.name, "react");
        assert_eq!(decl.version, "18.0.0");
    }

    #[test]
    fn test_parse_declaration_without_trailing_comma() {
        let decl = parse_declaration("\"@types/node\": \"^20.1.0\"").unwrap();
        assert_eq!(decl.name, "@types/node");
        assert_eq!(decl.version, "^20.1.0");
    }

    #[test]
    fn test_parse_declaration_unquoted() {
        let decl = parse_declaration("lodash: 4.0.0").unwrap();
        assert_eq!(decl.name, "lodash");
        assert_eq!(decl.version, "4.0.0");
    }

    #[test]
    fn test_parse_declaration_malformed() {
        assert!(parse_declaration("").is_err());
        assert!(parse_declaration("\"react\":").is_err());
        assert!(parse_declaration("\"range\": \">=1.0.0 <2.0.0\"").is_err());
        assert!(parse_declaration(": \"1.0.0\"").is_err());
    }

    #[test]
    fn test_added_alone() {
        let mapping = fold(&[added("lodash", "4.0.0")]);
        assert_eq!(
            mapping.get("lodash"),
            Some(&DependencyChange::added("lodash", "4.0.0"))
        );
    }

    #[test]
    fn test_removed_alone() {
        let mapping = fold(&[removed("left-pad", "1.3.0")]);
        assert_eq!(
            mapping.get("left-pad"),
            Some(&DependencyChange::removed("left-pad", "1.3.0"))
        );
    }

    #[test]
    fn test_same_version_cancels_in_both_orders() {
        assert!(fold(&[added("react", "18.0.0"), removed("react", "18.0.0")]).is_empty());
        assert!(fold(&[removed("react", "18.0.0"), added("react", "18.0.0")]).is_empty());
    }

    #[test]
    fn test_update_is_order_independent() {
        let expected = DependencyChange::updated("react", "17.0.0", "18.0.0");

        let forward = fold(&[removed("react", "17.0.0"), added("react", "18.0.0")]);
        let reverse = fold(&[added("react", "18.0.0"), removed("react", "17.0.0")]);

        assert_eq!(forward.get("react"), Some(&expected));
        assert_eq!(reverse.get("react"), Some(&expected));
        assert_eq!(forward, reverse);
    }

    #[test]
    fn test_update_across_many_pairs() {
        let pairs = [("a", "1", "2"), ("b", "0.1.0", "0.2.0"), ("c", "^3", "~3")];
        for (name, old, new) in pairs {
            let forward = fold(&[removed(name, old), added(name, new)]);
            let reverse = fold(&[added(name, new), removed(name, old)]);
            assert_eq!(forward, reverse);
            assert_eq!(forward.get(name), Some(&DependencyChange::updated(name, old, new)));
        }
    }

    #[test]
    fn test_repeated_half_is_ignored() {
        let mapping = fold(&[removed("a", "1"), removed("a", "2")]);
        assert_eq!(mapping.get("a"), Some(&DependencyChange::removed("a", "1")));

        let mapping = fold(&[added("a", "1"), added("a", "2")]);
        assert_eq!(mapping.get("a"), Some(&DependencyChange::added("a", "1")));

        let mapping = fold(&[removed("a", "1"), added("a", "2"), added("a", "3")]);
        assert_eq!(mapping.get("a"), Some(&DependencyChange::updated("a", "1", "2")));
    }

    #[test]
    fn test_context_lines_are_ignored() {
        let mapping = fold(&[DiffLine::context("    \"react\": \"18.0.0\",")]);
        assert!(mapping.is_empty());
    }

    #[test]
    fn test_malformed_line_is_an_error() {
        let mut mapping = ChangeMapping::new();
        let err = apply_line(&mut mapping, &DiffLine::added("  \"a\": \"1\" \"b\"")).unwrap_err();
        assert!(matches!(err, ReconcileError::MalformedDiffLine { .. }));
        assert!(mapping.is_empty());
    }

    #[test]
    fn test_insertion_order_is_kept() {
        let mapping = fold(&[
            added("zod", "3.0.0"),
            removed("axios", "1.0.0"),
            removed("react", "17.0.0"),
            added("react", "18.0.0"),
        ]);
        let names: Vec<_> = mapping.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["zod", "axios", "react"]);
    }
}
