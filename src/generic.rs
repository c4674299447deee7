//! Rules deciding whether a grant's current image has to be replaced

use serde::Deserialize;

/// Substrings marking stock placeholders and broken default images
const DEFAULT_PATTERNS: &[&str] = &[
    "placeholder",
    "default",
    "generic",
    "noimage",
    "no-image",
    "via.placeholder.com",
    "dummyimage",
];

/// Overused purple stock photos, by Unsplash photo id
const DEFAULT_BLOCKED_PHOTOS: &[&str] = &[
    "photo-1568232961385-de49add58b50",
    "photo-1624590346293-a492bbdbaf3a",
    "photo-1501814497055-7e12385e45de",
    "photo-1620852454636-4711e95beaec",
    "photo-1509731269310-d8a8517025a0",
    "photo-1549030572280-4e1572837eac",
];

/// Why an image is or is not acceptable
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImageStatus {
    Missing,
    Placeholder(String),
    Svg,
    Blocked(String),
    Acceptable,
}

impl ImageStatus {
    pub fn is_generic(&self) -> bool {
        !matches!(self, ImageStatus::Acceptable)
    }

    pub fn label(&self) -> &'static str {
        match self {
            ImageStatus::Missing => "missing",
            ImageStatus::Placeholder(_) => "placeholder",
            ImageStatus::Svg => "svg",
            ImageStatus::Blocked(_) => "blocked",
            ImageStatus::Acceptable => "ok",
        }
    }

    /// Label plus the matched pattern or photo id, when there is one
    pub fn describe(&self) -> String {
        match self {
            ImageStatus::Placeholder(pattern) => format!("placeholder ({})", pattern),
            ImageStatus::Blocked(photo) => format!("blocked ({})", photo),
            other => other.label().to_string(),
        }
    }
}

/// Blocklist configuration, loadable from the `generic` block of the
/// settings file. Lists given there replace the defaults.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GenericRules {
    pub patterns: Vec<String>,
    pub blocked_photos: Vec<String>,
    pub reject_svg: bool,
}

impl Default for GenericRules {
    fn default() -> Self {
        Self {
            patterns: DEFAULT_PATTERNS.iter().map(|s| s.to_string()).collect(),
            blocked_photos: DEFAULT_BLOCKED_PHOTOS.iter().map(|s| s.to_string()).collect(),
            reject_svg: true,
        }
    }
}

impl GenericRules {
    pub fn classify(&self, url: Option<&str>) -> ImageStatus {
        let url = match url.map(str::trim) {
            Some(u) if !u.is_empty() => u,
            _ => return ImageStatus::Missing,
        };
        let lower = url.to_lowercase();

        if let Some(pattern) = self
            .patterns
            .iter()
            .find(|p| lower.contains(&p.to_lowercase()))
        {
            return ImageStatus::Placeholder(pattern.clone());
        }

        // Query strings carry sizing hints, not identity
        let path = lower.split(['?', '#']).next().unwrap_or(&lower);
        if self.reject_svg && path.ends_with(".svg") {
            return ImageStatus::Svg;
        }

        let photo_id = path.rsplit('/').next().unwrap_or(path);
        if let Some(blocked) = self
            .blocked_photos
            .iter()
            .find(|b| b.eq_ignore_ascii_case(photo_id) || b.eq_ignore_ascii_case(url))
        {
            return ImageStatus::Blocked(blocked.clone());
        }

        ImageStatus::Acceptable
    }

    pub fn is_generic(&self, url: Option<&str>) -> bool {
        self.classify(url).is_generic()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_images() {
        let rules = GenericRules::default();
        assert_eq!(rules.classify(None), ImageStatus::Missing);
        assert_eq!(rules.classify(Some("")), ImageStatus::Missing);
        assert_eq!(rules.classify(Some("   ")), ImageStatus::Missing);
    }

    #[test]
    fn test_placeholder_patterns() {
        let rules = GenericRules::default();
        assert_eq!(
            rules.classify(Some("https://example.com/images/Default-Grant.jpg")),
            ImageStatus::Placeholder("default".to_string())
        );
        assert!(rules.is_generic(Some("https://via.placeholder.com/800x400")));
        assert!(rules.is_generic(Some("/static/noimage.png")));
        assert_eq!(
            rules.classify(Some("https://via.placeholder.com/800x400")).describe(),
            "placeholder (placeholder)"
        );
    }

    #[test]
    fn test_svg_logos() {
        let rules = GenericRules::default();
        assert_eq!(
            rules.classify(Some("https://www.canada.ca/logo.SVG?v=2")),
            ImageStatus::Svg
        );

        let lenient = GenericRules {
            reject_svg: false,
            ..GenericRules::default()
        };
        assert_eq!(
            lenient.classify(Some("https://www.canada.ca/logo.svg")),
            ImageStatus::Acceptable
        );
    }

    #[test]
    fn test_blocked_photo_ids() {
        let rules = GenericRules::default();
        let url = "https://images.unsplash.com/photo-1568232961385-de49add58b50?w=800&h=400&fit=crop";
        assert_eq!(
            rules.classify(Some(url)),
            ImageStatus::Blocked("photo-1568232961385-de49add58b50".to_string())
        );
        // Same prefix, different photo
        assert!(!rules.is_generic(Some(
            "https://images.unsplash.com/photo-1568232961385-de49add58b51?w=800"
        )));
    }

    #[test]
    fn test_acceptable_image() {
        let rules = GenericRules::default();
        let status = rules.classify(Some("https://logo.clearbit.com/rbc.com"));
        assert_eq!(status, ImageStatus::Acceptable);
        assert!(!status.is_generic());
        assert_eq!(status.label(), "ok");
    }
}
