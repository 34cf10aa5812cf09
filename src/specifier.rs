//! Package specifier parsing.
//!
//! A specifier is the user-supplied `[@scope/]name[@version]` string. Parsing
//! is permissive: unmatched groups map to empty strings and nothing here ever
//! fails. Callers decide what an empty name means (the help path, not an
//! error).

use regex::Regex;
use std::fmt;
use std::sync::LazyLock;

static SPECIFIER_RE: LazyLock<Regex> = LazyLock::new(|| {
    // Must never fail to match: every group is optional.
    Regex::new(r"^(?:@(?P<scope>[^/]+)/)?(?P<name>[^@/]*)(?:@(?P<version>[^/]*))?")
        .unwrap_or_else(|e| panic!("invalid specifier regex: {e}"))
});

/// Structured form of a user-supplied package reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageSpecifier {
    /// Scope without the leading `@`, empty when unscoped
    pub namespace: String,
    /// Package name, empty only for malformed input
    pub name: String,
    /// Requested version, empty when unpinned
    pub version: String,
}

impl PackageSpecifier {
    /// Parses a specifier string, mapping unmatched groups to empty strings.
    pub fn parse(input: &str) -> Self {
        let caps = SPECIFIER_RE.captures(input);
        let field = |name: &str| -> String {
            caps.as_ref()
                .and_then(|c| c.name(name))
                .map(|m| m.as_str().to_string())
                .unwrap_or_default()
        };

        Self {
            namespace: field("scope"),
            name: field("name"),
            version: field("version"),
        }
    }

    /// The npm-qualified name: `@scope/name` when scoped, plain `name` otherwise.
    pub fn qualified_name(&self) -> String {
        if self.namespace.is_empty() {
            self.name.clone()
        } else {
            format!("@{}/{}", self.namespace, self.name)
        }
    }

    /// The argument handed to `npm install`: qualified name plus any version pin.
    pub fn install_arg(&self) -> String {
        if self.version.is_empty() {
            self.qualified_name()
        } else {
            format!("{}@{}", self.qualified_name(), self.version)
        }
    }

    /// Output bundle filename: non-empty parts of scope/name/version joined
    /// with `-`, plus the `.js` extension.
    pub fn output_file_name(&self) -> String {
        let parts: Vec<&str> = [&self.namespace, &self.name, &self.version]
            .into_iter()
            .map(String::as_str)
            .filter(|part| !part.is_empty())
            .collect();
        format!("{}.js", parts.join("-"))
    }
}

impl fmt::Display for PackageSpecifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.install_arg())
    }
}
