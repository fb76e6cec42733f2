//! Job-board selector table
//!
//! One [`SiteDescriptor`] per supported board. Update the selectors here when
//! a board changes its markup.

use regex::Regex;
use serde::Deserialize;
use tracing::debug;

/// Known job boards
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Source {
    LinkedIn,
    Indeed,
    Glassdoor,
}

impl Source {
    pub fn as_str(&self) -> &'static str {
        match self {
            Source::LinkedIn => "LinkedIn",
            Source::Indeed => "Indeed",
            Source::Glassdoor => "Glassdoor",
        }
    }
}

/// Static selector bundle for one board
#[derive(Debug)]
pub struct SiteDescriptor {
    /// Regex matched against the page URL (or hostname, see [`MatchMode`])
    pub pattern: &'static str,
    pub title_selector: &'static str,
    pub company_selector: &'static str,
    /// Element whose `href` is the listing URL
    pub link_selector: &'static str,
    pub source: Source,
}

pub static SITES: [SiteDescriptor; 3] = [
    SiteDescriptor {
        pattern: r"linkedin\.com",
        title_selector: ".job-details-jobs-unified-top-card__job-title",
        company_selector: ".job-details-jobs-unified-top-card__company-name",
        link_selector: ".job-details-jobs-unified-top-card__job-title a",
        source: Source::LinkedIn,
    },
    SiteDescriptor {
        pattern: r"indeed\.com",
        title_selector: ".jobsearch-JobInfoHeader-title",
        company_selector: r#"[data-testid="inlineHeader-companyName"]"#,
        link_selector: ".vjs-highlight .jobTitle a",
        source: Source::Indeed,
    },
    SiteDescriptor {
        pattern: r"glassdoor\.(?:com\.au|co\.uk|co\.in|com|ca|de|fr|ie|nl|be|ch|at|sg)",
        title_selector: r#"[data-test="job-title"]"#,
        company_selector: r#"[data-test="employer-name"]"#,
        link_selector: r#"a[data-test="job-link"]"#,
        source: Source::Glassdoor,
    },
];

/// How a descriptor pattern is tested against a page URL.
///
/// `Loose` searches the whole URL string, so `https://example.com/?ref=indeed.com`
/// resolves to Indeed. `Host` only accepts the parsed hostname or one of its
/// subdomains.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchMode {
    #[default]
    Loose,
    Host,
}

/// Read-only lookup from page URL to [`SiteDescriptor`]
#[derive(Debug)]
pub struct SiteMap {
    mode: MatchMode,
    entries: Vec<(Regex, &'static SiteDescriptor)>,
}

impl SiteMap {
    pub fn new(mode: MatchMode) -> Self {
        let entries = SITES
            .iter()
            .filter_map(|site| {
                let pattern = match mode {
                    MatchMode::Loose => site.pattern.to_string(),
                    MatchMode::Host => format!(r"^(?:[^.]+\.)*(?:{})$", site.pattern),
                };
                Regex::new(&pattern).ok().map(|re| (re, site))
            })
            .collect();

        Self { mode, entries }
    }

    pub fn mode(&self) -> MatchMode {
        self.mode
    }

    /// First descriptor matching `url`, or `None` when the page is not a known board
    pub fn lookup(&self, url: &str) -> Option<&'static SiteDescriptor> {
        let haystack = match self.mode {
            MatchMode::Loose => url.to_string(),
            MatchMode::Host => url::Url::parse(url)
                .ok()?
                .host_str()?
                .to_lowercase(),
        };

        let found = self
            .entries
            .iter()
            .find(|(re, _)| re.is_match(&haystack))
            .map(|(_, site)| *site);

        debug!(url, source = ?found.map(|s| s.source), "site lookup");
        found
    }
}

impl Default for SiteMap {
    fn default() -> Self {
        Self::new(MatchMode::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_patterns_compile() {
        assert_eq!(SiteMap::new(MatchMode::Loose).entries.len(), SITES.len());
        assert_eq!(SiteMap::new(MatchMode::Host).entries.len(), SITES.len());
    }

    #[test]
    fn test_lookup_known_boards() {
        let map = SiteMap::default();

        let cases = [
            ("https://www.linkedin.com/jobs/view/42", Source::LinkedIn),
            ("https://www.indeed.com/viewjob?jk=123", Source::Indeed),
            ("https://uk.indeed.com/viewjob?jk=9", Source::Indeed),
            ("https://www.glassdoor.co.uk/job-listing/x", Source::Glassdoor),
        ];
        for (url, expected) in cases {
            assert_eq!(map.lookup(url).map(|s| s.source), Some(expected), "{url}");
        }
    }

    #[test]
    fn test_unmatched_url() {
        let map = SiteMap::default();
        assert!(map.lookup("https://example.com/careers").is_none());
        assert!(map.lookup("").is_none());
    }

    #[test]
    fn test_loose_mode_matches_query_string() {
        // Kept for compatibility with the extension: any URL containing the
        // pattern counts as a match.
        let url = "https://example.com/apply?ref=indeed.com";
        assert_eq!(
            SiteMap::new(MatchMode::Loose).lookup(url).map(|s| s.source),
            Some(Source::Indeed)
        );
        assert!(SiteMap::new(MatchMode::Host).lookup(url).is_none());
    }

    #[test]
    fn test_host_mode_rejects_lookalike_domains() {
        let map = SiteMap::new(MatchMode::Host);
        assert!(map.lookup("https://notindeed.com.evil.test/").is_none());
        assert!(map.lookup("https://myindeed.com/").is_none());
        assert!(map.lookup("not a url").is_none());
        assert!(map.lookup("https://glassdoor.com.evil.test/apply").is_none());
        assert!(map.lookup("https://www.glassdoor.co.uk.example.net/").is_none());
        assert_eq!(
            map.lookup("https://www.glassdoor.co.uk/job-listing/x").map(|s| s.source),
            Some(Source::Glassdoor)
        );
        assert_eq!(
            map.lookup("https://WWW.LinkedIn.com/jobs").map(|s| s.source),
            Some(Source::LinkedIn)
        );
    }

    #[test]
    fn test_first_descriptor_wins() {
        let map = SiteMap::default();
        let url = "https://www.linkedin.com/redirect?to=indeed.com";
        assert_eq!(map.lookup(url).map(|s| s.source), Some(Source::LinkedIn));
    }
}
