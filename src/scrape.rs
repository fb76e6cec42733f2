//! Page scraper
//!
//! Best-effort: a missing element leaves its field empty (or the URL at the
//! page URL) instead of failing, so every spreadsheet row has all columns.

use chrono::{DateTime, Local};
use tracing::debug;

use crate::dom::Dom;
use crate::record::{format_timestamp, JobRecord};
use crate::sites::SiteMap;

/// Scrape the current page into a [`JobRecord`] stamped with the current time.
pub fn scrape<D: Dom + ?Sized>(url: &str, dom: &D, sites: &SiteMap) -> JobRecord {
    scrape_at(url, dom, sites, &Local::now())
}

/// [`scrape`] with an explicit timestamp.
pub fn scrape_at<D: Dom + ?Sized>(
    url: &str,
    dom: &D,
    sites: &SiteMap,
    now: &DateTime<Local>,
) -> JobRecord {
    let application_date_time = format_timestamp(now);

    let Some(site) = sites.lookup(url) else {
        return JobRecord {
            job_title: String::new(),
            company: String::new(),
            source: String::new(),
            application_date_time,
            url: url.to_string(),
        };
    };

    let job_title = dom.first_text(site.title_selector).unwrap_or_default();
    let company = dom.first_text(site.company_selector).unwrap_or_default();
    let listing_url = dom
        .first_attr(site.link_selector, "href")
        .map(|href| resolve_href(url, &href))
        .unwrap_or_else(|| url.to_string());

    debug!(
        source = site.source.as_str(),
        title = job_title.as_str(),
        company = company.as_str(),
        "scraped page"
    );

    JobRecord {
        job_title,
        company,
        source: site.source.as_str().to_string(),
        application_date_time,
        url: listing_url,
    }
}

/// Absolute form of `href`, as a browser reports `element.href`.
fn resolve_href(page_url: &str, href: &str) -> String {
    let href = href.trim();
    match url::Url::parse(page_url).and_then(|base| base.join(href)) {
        Ok(absolute) => absolute.to_string(),
        Err(_) => href.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::HtmlDocument;
    use crate::sites::MatchMode;
    use chrono::TimeZone;
    use std::collections::HashMap;

    /// Selector-keyed stand-in for a live document
    #[derive(Default)]
    struct FakeDom {
        text: HashMap<&'static str, &'static str>,
        hrefs: HashMap<&'static str, &'static str>,
    }

    impl Dom for FakeDom {
        fn first_text(&self, selector: &str) -> Option<String> {
            self.text.get(selector).map(|t| t.trim().to_string())
        }

        fn first_attr(&self, selector: &str, attr_name: &str) -> Option<String> {
            assert_eq!(attr_name, "href");
            self.hrefs.get(selector).map(|h| h.to_string())
        }

        fn exists(&self, selector: &str) -> bool {
            self.text.contains_key(selector) || self.hrefs.contains_key(selector)
        }
    }

    fn fixed_now() -> DateTime<Local> {
        Local.with_ymd_and_hms(2024, 5, 14, 16, 30, 0).unwrap()
    }

    const INDEED_PAGE: &str = r#"
        <html><body>
            <div class="vjs-highlight">
                <h2 class="jobTitle"><a href="https://www.indeed.com/job/456">Software Engineer</a></h2>
            </div>
            <h1 class="jobsearch-JobInfoHeader-title">  Software Engineer  </h1>
            <div data-testid="inlineHeader-companyName"><a>Acme Corp</a></div>
        </body></html>
    "#;

    #[test]
    fn test_indeed_example() {
        let dom = HtmlDocument::parse(INDEED_PAGE);
        let record = scrape_at(
            "https://www.indeed.com/viewjob?jk=123",
            &dom,
            &SiteMap::default(),
            &fixed_now(),
        );

        assert_eq!(
            record,
            JobRecord {
                job_title: "Software Engineer".into(),
                company: "Acme Corp".into(),
                source: "Indeed".into(),
                application_date_time: "14/05/2024 16:30:00".into(),
                url: "https://www.indeed.com/job/456".into(),
            }
        );
    }

    #[test]
    fn test_unmatched_site() {
        let dom = HtmlDocument::parse(INDEED_PAGE);
        let record = scrape("https://example.com/careers", &dom, &SiteMap::default());

        assert_eq!(record.job_title, "");
        assert_eq!(record.company, "");
        assert_eq!(record.source, "");
        assert_eq!(record.url, "https://example.com/careers");
        assert!(!record.application_date_time.is_empty());
    }

    #[test]
    fn test_missing_elements_degrade() {
        let dom = HtmlDocument::parse("<html><body><p>nothing here</p></body></html>");
        let url = "https://www.linkedin.com/jobs/view/42";
        let record = scrape(url, &dom, &SiteMap::default());

        assert_eq!(record.job_title, "");
        assert_eq!(record.company, "");
        assert_eq!(record.source, "LinkedIn");
        assert_eq!(record.url, url);
    }

    #[test]
    fn test_fake_dom_all_selectors_resolve() {
        let dom = FakeDom {
            text: HashMap::from([
                (r#"[data-test="job-title"]"#, " Data Analyst\n"),
                (r#"[data-test="employer-name"]"#, "Globex"),
            ]),
            hrefs: HashMap::from([(
                r#"a[data-test="job-link"]"#,
                "https://www.glassdoor.com/job-listing/77",
            )]),
        };
        let record = scrape("https://www.glassdoor.com/Job/x.htm", &dom, &SiteMap::default());

        assert_eq!(record.job_title, "Data Analyst");
        assert_eq!(record.company, "Globex");
        assert_eq!(record.source, "Glassdoor");
        assert_eq!(record.url, "https://www.glassdoor.com/job-listing/77");
    }

    #[test]
    fn test_relative_href_is_resolved() {
        let dom = HtmlDocument::parse(
            r#"<div class="vjs-highlight"><span class="jobTitle"><a href="/rc/clk?jk=9">x</a></span></div>"#,
        );
        let record = scrape(
            "https://www.indeed.com/jobs?q=rust",
            &dom,
            &SiteMap::default(),
        );
        assert_eq!(record.url, "https://www.indeed.com/rc/clk?jk=9");
    }

    #[test]
    fn test_scrape_is_idempotent_except_timestamp() {
        let dom = HtmlDocument::parse(INDEED_PAGE);
        let sites = SiteMap::default();
        let url = "https://www.indeed.com/viewjob?jk=123";

        let first = scrape_at(url, &dom, &sites, &fixed_now());
        let later = Local.with_ymd_and_hms(2024, 5, 14, 17, 0, 0).unwrap();
        let second = scrape_at(url, &dom, &sites, &later);

        assert!(first.same_listing(&second));
        assert_ne!(first.application_date_time, second.application_date_time);
    }

    #[test]
    fn test_host_mode_treats_query_match_as_unmatched() {
        let dom = HtmlDocument::parse(INDEED_PAGE);
        let url = "https://example.com/?ref=indeed.com";

        let loose = scrape(url, &dom, &SiteMap::new(MatchMode::Loose));
        assert_eq!(loose.source, "Indeed");

        let strict = scrape(url, &dom, &SiteMap::new(MatchMode::Host));
        assert_eq!(strict.source, "");
        assert_eq!(strict.url, url);
    }
}
