//! Namespace header parsing built on `nom`.
//!
//! A service declaration file names its namespace on a line of the form
//! `namespace app.mail;`. The type's short name is the file stem, so
//! `app/mail/Mailer.svc` with that header declares `app.mail.Mailer`.

use std::path::Path;

use nom::{
    IResult, Parser,
    bytes::complete::{tag, take_while1},
    character::complete::{char, space0, space1},
    combinator::{all_consuming, recognize},
    multi::separated_list1,
};
use wirebox_common::types::ServiceId;

const NAMESPACE_KEYWORD: &str = "namespace";

const fn is_segment_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

fn segment(input: &str) -> IResult<&str, &str> {
    take_while1(is_segment_char).parse(input)
}

/// Parses `a.b.c`, returning the whole dotted path.
fn dotted_path(input: &str) -> IResult<&str, &str> {
    recognize(separated_list1(char('.'), segment)).parse(input)
}

fn namespace_declaration(input: &str) -> IResult<&str, &str> {
    let (input, (_, _, path, _, _)) =
        (tag(NAMESPACE_KEYWORD), space1, dotted_path, space0, char(';')).parse(input)?;
    Ok((input, path))
}

/// Parses a single `namespace <dotted.path>;` line. Trailing whitespace is
/// ignored; anything else after the semicolon is not.
#[must_use]
pub fn parse_namespace(line: &str) -> Option<&str> {
    all_consuming(namespace_declaration)
        .parse(line.trim_end())
        .ok()
        .map(|(_, path)| path)
}

/// Returns the namespace declared by the first line starting with
/// `namespace `, if that line is well formed.
#[must_use]
pub fn find_namespace(source: &str) -> Option<&str> {
    source
        .lines()
        .find(|line| {
            line.strip_prefix(NAMESPACE_KEYWORD)
                .is_some_and(|rest| rest.starts_with(' '))
        })
        .and_then(parse_namespace)
}

/// Derives the fully-qualified identifier of the type declared in `path`.
#[must_use]
pub fn derive_identifier(path: &Path, source: &str) -> Option<ServiceId> {
    let namespace = find_namespace(source)?;
    let short_name = path.file_stem()?.to_str()?;
    Some(ServiceId::namespaced(namespace, short_name))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_dotted_namespace() {
        assert_eq!(parse_namespace("namespace app.mail;"), Some("app.mail"));
    }

    #[test]
    fn parses_single_segment() {
        assert_eq!(parse_namespace("namespace app;"), Some("app"));
    }

    #[test]
    fn tolerates_spacing_and_trailing_whitespace() {
        assert_eq!(parse_namespace("namespace  app.core ;  \r"), Some("app.core"));
    }

    #[test]
    fn rejects_malformed_lines() {
        assert!(parse_namespace("namespace app.mail").is_none());
        assert!(parse_namespace("namespace ;").is_none());
        assert!(parse_namespace("namespace app..mail;").is_none());
        assert!(parse_namespace("namespace app.mail; // trailing").is_none());
        assert!(parse_namespace("namespaces app;").is_none());
    }

    #[test]
    fn finds_first_namespace_line() {
        let source = "// header\nnamespace app.first;\nnamespace app.second;\n";
        assert_eq!(find_namespace(source), Some("app.first"));
    }

    #[test]
    fn indented_namespace_is_not_a_declaration() {
        assert!(find_namespace("  namespace app;\n").is_none());
    }

    #[test]
    fn malformed_first_declaration_hides_later_ones() {
        let source = "namespace broken\nnamespace app.ok;\n";
        assert!(find_namespace(source).is_none());
    }

    #[test]
    fn derive_identifier_uses_file_stem() {
        let id = derive_identifier(Path::new("src/mail/Mailer.svc"), "namespace app.mail;\n")
            .expect("identifier");
        assert_eq!(id.as_str(), "app.mail.Mailer");
    }

    #[test]
    fn derive_identifier_without_namespace_is_none() {
        assert!(derive_identifier(Path::new("Helper.svc"), "service Helper\n").is_none());
    }
}
