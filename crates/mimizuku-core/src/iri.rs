//! IRI and prefix handling

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use crate::vocab;

/// Prefix / local name / namespace split of an IRI, kept only for rendering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IriParts {
    pub prefix: String,
    pub local_name: String,
    pub namespace: String,
}

/// Global identifier.
///
/// Equality, ordering and hashing look at the full string only, so two IRIs
/// built with different decompositions of the same string are the same IRI.
/// The string is never validated.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Iri {
    full: Arc<str>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    parts: Option<Arc<IriParts>>,
}

impl Iri {
    pub fn new<S: AsRef<str>>(full: S) -> Self {
        Self {
            full: Arc::from(full.as_ref()),
            parts: None,
        }
    }

    /// Build an IRI from a namespace and a local name, remembering the prefix
    /// the namespace is registered under.
    pub fn with_parts(prefix: &str, namespace: &str, local_name: &str) -> Self {
        let full = format!("{}{}", namespace, local_name);
        Self {
            full: Arc::from(full.as_str()),
            parts: Some(Arc::new(IriParts {
                prefix: prefix.to_string(),
                local_name: local_name.to_string(),
                namespace: namespace.to_string(),
            })),
        }
    }

    pub fn full(&self) -> &str {
        &self.full
    }

    pub fn as_str(&self) -> &str {
        &self.full
    }

    pub fn parts(&self) -> Option<&IriParts> {
        self.parts.as_deref()
    }

    /// `prefix:local` when a decomposition is attached, `<full>` otherwise.
    pub fn abbreviated(&self) -> String {
        match &self.parts {
            Some(parts) => format!("{}:{}", parts.prefix, parts.local_name),
            None => format!("<{}>", self.full),
        }
    }

    /// Like [`Iri::abbreviated`] but consults a prefix mapping first.
    pub fn abbreviate_with(&self, prefixes: &PrefixMapping) -> String {
        prefixes
            .abbreviate(self)
            .unwrap_or_else(|| self.abbreviated())
    }

    /// Best-effort local name: the attached decomposition if any, else the
    /// text after the last `#` or `/`.
    pub fn local_name(&self) -> &str {
        if let Some(parts) = &self.parts {
            return &parts.local_name;
        }
        match self.full.rfind(|c: char| c == '#' || c == '/') {
            Some(pos) if pos + 1 < self.full.len() => &self.full[pos + 1..],
            _ => &self.full,
        }
    }
}

impl PartialEq for Iri {
    fn eq(&self, other: &Self) -> bool {
        self.full == other.full
    }
}

impl Eq for Iri {}

impl Hash for Iri {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.full.hash(state);
    }
}

impl PartialOrd for Iri {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Iri {
    fn cmp(&self, other: &Self) -> Ordering {
        self.full.cmp(&other.full)
    }
}

impl fmt::Display for Iri {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.full)
    }
}

impl From<&str> for Iri {
    fn from(s: &str) -> Self {
        Iri::new(s)
    }
}

impl From<String> for Iri {
    fn from(s: String) -> Self {
        Iri::new(s)
    }
}

impl AsRef<str> for Iri {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

/// Ordered prefix -> namespace map.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrefixMapping {
    entries: Vec<(String, String)>,
}

impl PrefixMapping {
    pub fn new() -> Self {
        Self::default()
    }

    /// `owl`, `rdf`, `rdfs` and `xsd`.
    pub fn standard() -> Self {
        let mut mapping = Self::new();
        mapping.insert("owl", vocab::OWL_NS);
        mapping.insert("rdf", vocab::RDF_NS);
        mapping.insert("rdfs", vocab::RDFS_NS);
        mapping.insert("xsd", vocab::XSD_NS);
        mapping
    }

    /// Register or replace a prefix.
    pub fn insert(&mut self, prefix: &str, namespace: &str) {
        if let Some(entry) = self.entries.iter_mut().find(|(p, _)| p == prefix) {
            entry.1 = namespace.to_string();
        } else {
            self.entries.push((prefix.to_string(), namespace.to_string()));
        }
    }

    pub fn remove(&mut self, prefix: &str) -> Option<String> {
        let pos = self.entries.iter().position(|(p, _)| p == prefix)?;
        Some(self.entries.remove(pos).1)
    }

    pub fn namespace(&self, prefix: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(p, _)| p == prefix)
            .map(|(_, ns)| ns.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(p, ns)| (p.as_str(), ns.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Expand `prefix:local` into a decomposed IRI. Returns `None` for an
    /// unregistered prefix or a string without a colon.
    pub fn expand(&self, curie: &str) -> Option<Iri> {
        let (prefix, local) = curie.split_once(':')?;
        let namespace = self.namespace(prefix)?;
        Some(Iri::with_parts(prefix, namespace, local))
    }

    /// The longest registered namespace wins; the remainder has to be a
    /// plain local name.
    pub fn abbreviate(&self, iri: &Iri) -> Option<String> {
        let full = iri.full();
        self.entries
            .iter()
            .filter(|(_, ns)| !ns.is_empty() && full.starts_with(ns.as_str()))
            .max_by_key(|(_, ns)| ns.len())
            .and_then(|(prefix, ns)| {
                let local = &full[ns.len()..];
                is_local_name(local).then(|| format!("{}:{}", prefix, local))
            })
    }
}

fn is_local_name(s: &str) -> bool {
    !s.ends_with('.')
        && s
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.'))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_equality_ignores_decomposition() {
        let plain = Iri::new("http://example.org/Gene");
        let split = Iri::with_parts("ex", "http://example.org/", "Gene");
        assert_eq!(plain, split);

        let mut set = HashSet::new();
        set.insert(plain);
        assert!(set.contains(&split));
    }

    #[test]
    fn test_abbreviated_rendering() {
        let plain = Iri::new("http://example.org/Gene");
        assert_eq!(plain.abbreviated(), "<http://example.org/Gene>");

        let split = Iri::with_parts("ex", "http://example.org/", "Gene");
        assert_eq!(split.abbreviated(), "ex:Gene");
        assert_eq!(split.full(), "http://example.org/Gene");
    }

    #[test]
    fn test_abbreviate_with_registered_prefix() {
        let mut prefixes = PrefixMapping::standard();
        prefixes.insert("ex", "http://example.org/");
        prefixes.insert("exb", "http://example.org/bio/");

        let iri = Iri::new("http://example.org/bio/APOE");
        assert_eq!(iri.abbreviate_with(&prefixes), "exb:APOE");

        let odd = Iri::new("http://example.org/a/b");
        assert_eq!(odd.abbreviate_with(&prefixes), "<http://example.org/a/b>");
    }

    #[test]
    fn test_expand_curie() {
        let prefixes = PrefixMapping::standard();
        let iri = prefixes.expand("xsd:string").unwrap();
        assert_eq!(iri.full(), vocab::XSD_STRING);
        assert!(prefixes.expand("nope:x").is_none());
        assert!(prefixes.expand("nocolon").is_none());
    }

    #[test]
    fn test_local_name() {
        assert_eq!(Iri::new("http://example.org/onto#Gene").local_name(), "Gene");
        assert_eq!(Iri::new("http://example.org/Gene").local_name(), "Gene");
        assert_eq!(Iri::new("urn:opaque").local_name(), "urn:opaque");
    }

    #[test]
    fn test_insert_replaces_existing_prefix() {
        let mut prefixes = PrefixMapping::new();
        prefixes.insert("ex", "http://a/");
        prefixes.insert("ex", "http://b/");
        assert_eq!(prefixes.len(), 1);
        assert_eq!(prefixes.namespace("ex"), Some("http://b/"));
    }
}
