#![forbid(unsafe_code)]

//! Testimonial records and the author identity the shuffler keys on.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Anything with an author identity.
///
/// The shuffler only compares authors; everything else about an item is
/// display payload the engine never looks at.
pub trait Authored {
    /// Author identity used for the no-adjacent-repeat rule.
    fn author(&self) -> &str;
}

impl<T: Authored + ?Sized> Authored for &T {
    fn author(&self) -> &str {
        (**self).author()
    }
}

impl Authored for str {
    fn author(&self) -> &str {
        self
    }
}

impl Authored for String {
    fn author(&self) -> &str {
        self
    }
}

/// A testimonial as the portfolio's data source provides it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Testimonial {
    /// Who said it.
    pub author: String,
    /// The quote.
    pub content: String,
    /// Author's role or title.
    pub role: String,
    /// Image reference (URL or asset path).
    pub image: Option<String>,
    /// External link for the author.
    pub link: Option<String>,
}

impl Testimonial {
    /// Create a testimonial with an author and quote.
    #[must_use]
    pub fn new(author: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            author: author.into(),
            content: content.into(),
            ..Self::default()
        }
    }

    /// Set the author's role.
    #[must_use]
    pub fn role(mut self, role: impl Into<String>) -> Self {
        self.role = role.into();
        self
    }

    /// Set the image reference.
    #[must_use]
    pub fn image(mut self, image: impl Into<String>) -> Self {
        self.image = Some(image.into());
        self
    }

    /// Set the external link.
    #[must_use]
    pub fn link(mut self, link: impl Into<String>) -> Self {
        self.link = Some(link.into());
        self
    }

    /// Parse a JSON array of testimonials.
    #[cfg(feature = "serde")]
    pub fn list_from_json(json: &str) -> Result<Vec<Self>, serde_json::Error> {
        serde_json::from_str(json)
    }
}

impl Authored for Testimonial {
    fn author(&self) -> &str {
        &self.author
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_fills_payload() {
        let t = Testimonial::new("Ada", "Great work")
            .role("CTO")
            .image("/img/ada.png")
            .link("https://example.com/ada");
        assert_eq!(t.author(), "Ada");
        assert_eq!(t.role, "CTO");
        assert_eq!(t.image.as_deref(), Some("/img/ada.png"));
        assert_eq!(t.link.as_deref(), Some("https://example.com/ada"));
    }

    #[test]
    fn strings_are_their_own_author() {
        assert_eq!("Grace".author(), "Grace");
        assert_eq!(String::from("Linus").author(), "Linus");
        let t = Testimonial::new("Ada", "");
        assert_eq!((&t).author(), "Ada");
    }

    #[cfg(feature = "serde")]
    #[test]
    fn parses_json_list_with_missing_fields() {
        let json = r#"[
            {"author": "Ada", "content": "Sharp", "role": "CTO"},
            {"author": "Grace", "content": "Reliable", "link": "https://example.com"}
        ]"#;
        let items = Testimonial::list_from_json(json).expect("valid json");
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].role, "CTO");
        assert!(items[0].image.is_none());
        assert_eq!(items[1].link.as_deref(), Some("https://example.com"));
    }
}
