//! Typed / language-tagged literal values

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::iri::Iri;
use crate::vocab;

/// A scalar data value. The lexical form is never parsed or validated.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Literal {
    lexical: String,
    datatype: Iri,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    lang: Option<String>,
}

impl Literal {
    /// Plain literal, datatype `xsd:string`.
    pub fn simple<S: Into<String>>(lexical: S) -> Self {
        Self {
            lexical: lexical.into(),
            datatype: Iri::new(vocab::XSD_STRING),
            lang: None,
        }
    }

    pub fn typed<S: Into<String>>(lexical: S, datatype: Iri) -> Self {
        Self {
            lexical: lexical.into(),
            datatype,
            lang: None,
        }
    }

    /// Language-tagged string, datatype `rdf:langString`.
    pub fn lang_tagged<S: Into<String>, L: Into<String>>(lexical: S, lang: L) -> Self {
        Self {
            lexical: lexical.into(),
            datatype: Iri::new(vocab::RDF_LANG_STRING),
            lang: Some(lang.into()),
        }
    }

    pub fn lexical(&self) -> &str {
        &self.lexical
    }

    pub fn datatype(&self) -> &Iri {
        &self.datatype
    }

    pub fn lang(&self) -> Option<&str> {
        self.lang.as_deref()
    }

    pub fn is_plain(&self) -> bool {
        self.lang.is_none() && self.datatype.full() == vocab::XSD_STRING
    }
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self.lexical)?;
        match &self.lang {
            Some(lang) => write!(f, "@{}", lang),
            None if self.is_plain() => Ok(()),
            None => write!(f, "^^<{}>", self.datatype),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_equality_needs_all_three_components() {
        let a = Literal::simple("APOE Gene");
        assert_eq!(a, Literal::simple("APOE Gene"));
        assert_eq!(a, Literal::typed("APOE Gene", Iri::new(vocab::XSD_STRING)));
        assert_ne!(a, Literal::typed("APOE Gene", Iri::new(vocab::XSD_INTEGER)));
        assert_ne!(a, Literal::lang_tagged("APOE Gene", "en"));
        assert_ne!(
            Literal::lang_tagged("gene", "en"),
            Literal::lang_tagged("gene", "de")
        );
    }

    #[test]
    fn test_lang_tag_implies_lang_string() {
        let lit = Literal::lang_tagged("Gen", "de");
        assert_eq!(lit.datatype().full(), vocab::RDF_LANG_STRING);
        assert_eq!(lit.lang(), Some("de"));
        assert!(!lit.is_plain());
    }

    #[test]
    fn test_no_numeric_validation() {
        let lit = Literal::typed("not a number", Iri::new(vocab::XSD_INTEGER));
        assert_eq!(lit.lexical(), "not a number");
    }

    #[test]
    fn test_display() {
        assert_eq!(Literal::simple("a").to_string(), "\"a\"");
        assert_eq!(Literal::lang_tagged("a", "en").to_string(), "\"a\"@en");
        assert_eq!(
            Literal::typed("1", Iri::new(vocab::XSD_INTEGER)).to_string(),
            format!("\"1\"^^<{}>", vocab::XSD_INTEGER)
        );
    }
}
