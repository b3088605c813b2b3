//! URL path joining.
//!
//! # Design
//! `join` never fails: fragments that would make a malformed URL (empty,
//! whitespace-only, slash-only) contribute nothing instead of producing an
//! error. The first fragment is treated as the base and keeps its leading
//! characters intact so a scheme like `https://` survives.

/// Join a base URL and any number of path fragments with single `/`
/// separators.
///
/// Empty and whitespace-only fragments are skipped. The first retained
/// fragment loses trailing slashes only; every later one loses both
/// leading and trailing slashes. Returns `""` when nothing is retained.
pub fn join<I, S>(fragments: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut result: Option<String> = None;

    for fragment in fragments {
        let fragment = fragment.as_ref();
        if fragment.trim().is_empty() {
            continue;
        }
        match result.as_mut() {
            None => result = Some(fragment.trim_end_matches('/').to_string()),
            Some(joined) => {
                let clean = fragment.trim_matches('/');
                if !clean.is_empty() {
                    joined.push('/');
                    joined.push_str(clean);
                }
            }
        }
    }

    result.unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_fragments_is_empty() {
        assert_eq!(join(Vec::<&str>::new()), "");
    }

    #[test]
    fn single_fragment_drops_trailing_slash() {
        assert_eq!(join(["https://host/"]), "https://host");
        assert_eq!(join(["https://host///"]), "https://host");
    }

    #[test]
    fn base_with_protocol_and_padded_path() {
        assert_eq!(join(["https://host", "/v1/x/"]), "https://host/v1/x");
    }

    #[test]
    fn slash_only_fragments_contribute_nothing() {
        assert_eq!(join(["https://host", "///", "v1"]), "https://host/v1");
        assert_eq!(join(["https://host", "/"]), "https://host");
    }

    #[test]
    fn slash_only_first_fragment_becomes_empty_base() {
        // The base loses its trailing slashes and is still the base.
        assert_eq!(join(["/", "v1"]), "/v1");
    }

    #[test]
    fn all_variants_of_a_segment_join_the_same() {
        for path in ["v1", "/v1", "v1/", "/v1/"] {
            assert_eq!(join(["https://host", path]), "https://host/v1", "{path}");
        }
    }

    #[test]
    fn empty_and_blank_fragments_are_skipped() {
        assert_eq!(join(["https://host", "", "  ", "v1"]), "https://host/v1");
        assert_eq!(join(["", "https://host", "v1"]), "https://host/v1");
    }

    #[test]
    fn joining_is_idempotent_with_trailing_empty() {
        let cases = [
            ("https://host", "v1"),
            ("https://host/", "/api/user/login"),
            ("http://127.0.0.1:3000/base/", "parse/classes/models/"),
        ];
        for (a, b) in cases {
            let once = join([a, b]);
            assert_eq!(join([once.as_str(), ""]), once);
        }
    }

    #[test]
    fn inner_slashes_are_preserved() {
        assert_eq!(
            join(["https://host/api", "parse//classes", "models"]),
            "https://host/api/parse//classes/models"
        );
    }

    #[test]
    fn accepts_owned_strings() {
        let parts = vec![String::from("https://host"), String::from("v2")];
        assert_eq!(join(&parts), "https://host/v2");
    }
}
