/// Maps an implementation-guide version string to the latest revision within
/// its major version, e.g. `005010X222` and `005010X222A1` both canonicalize
/// to `005010X222A2`.
const VERSION_ALIASES: &[(&str, &str)] = &[
    // benefit enrollment and maintenance
    ("005010X220", "005010X220A1"),
    ("005010X220A1", "005010X220A1"),
    // claims status
    ("005010X212", "005010X212"),
    // claim payment
    ("005010X221", "005010X221A1"),
    ("005010X221A1", "005010X221A1"),
    // eligibility inquiry
    ("005010X279", "005010X279A1"),
    ("005010X279A1", "005010X279A1"),
    // institutional claim
    ("004010X096", "004010X096A1"),
    ("004010X096A1", "004010X096A1"),
    ("005010X223", "005010X223A3"),
    ("005010X223A1", "005010X223A3"),
    ("005010X223A2", "005010X223A3"),
    ("005010X223A3", "005010X223A3"),
    // professional claim
    ("004010X098", "004010X098A1"),
    ("004010X098A1", "004010X098A1"),
    ("005010X222", "005010X222A2"),
    ("005010X222A1", "005010X222A2"),
    ("005010X222A2", "005010X222A2"),
];

/// Resolve `version` to its latest revision via the static alias table.
/// `None` if the version is not recognized (caller reports `UnknownVersion`).
pub fn canonicalize(version: &str) -> Option<&'static str> {
    VERSION_ALIASES
        .iter()
        .find(|(k, _)| *k == version)
        .map(|(_, v)| *v)
}

/// The major version substring (characters `2..6`), e.g. `005010X222A2` -> `5010`.
/// Shorter inputs yield the empty string.
pub fn major_version(implementation_version: &str) -> &str {
    if implementation_version.len() < 6 {
        ""
    } else {
        &implementation_version[2..6]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn canonicalize_resolves_base_and_alias_to_latest() {
        assert_eq!(canonicalize("005010X221"), Some("005010X221A1"));
        assert_eq!(canonicalize("005010X221A1"), Some("005010X221A1"));
    }

    #[test]
    fn canonicalize_is_idempotent() {
        let once = canonicalize("005010X222").unwrap();
        let twice = canonicalize(once).unwrap();
        assert_eq!(once, twice);
    }

    #[test]
    fn canonicalize_rejects_unknown_version() {
        assert_eq!(canonicalize("999999X999"), None);
    }

    #[test]
    fn major_version_extracts_digits() {
        assert_eq!(major_version("005010X279A1"), "5010");
        assert_eq!(major_version("00501"), "");
    }
}
