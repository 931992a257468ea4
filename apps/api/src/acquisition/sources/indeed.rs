use async_trait::async_trait;
use reqwest::Client;
use tracing::{debug, info, warn};
use url::Url;

use crate::acquisition::sources::markup::{parse_listings, ListingContext, ListingMarkup};
use crate::acquisition::sources::{JobSource, SourceError, Throttle};
use crate::models::Posting;

pub const NAME: &str = "indeed";
/// Indeed ignores larger page sizes.
const MAX_PAGE_SIZE: usize = 50;

const MARKUP: ListingMarkup = ListingMarkup {
    card: "div.job_seen_beacon",
    title: "h2.jobTitle",
    link: "h2.jobTitle a",
    company: "span.companyName",
    location: "div.companyLocation",
    description: Some("div.summary"),
};

pub struct IndeedSource {
    client: Client,
    base_url: Url,
    throttle: Throttle,
}

impl IndeedSource {
    pub fn new(client: Client, base_url: &str, throttle: Throttle) -> Result<Self, SourceError> {
        Ok(Self {
            client,
            base_url: Url::parse(base_url)?,
            throttle,
        })
    }

    fn search_url(&self, query: &str, location: &str, limit: usize) -> Url {
        let mut url = self.base_url.clone();
        url.query_pairs_mut()
            .append_pair("q", query)
            .append_pair("l", location)
            .append_pair("sort", "date")
            .append_pair("limit", &limit.min(MAX_PAGE_SIZE).to_string());
        url
    }
}

#[async_trait]
impl JobSource for IndeedSource {
    fn name(&self) -> &str {
        NAME
    }

    fn throttle(&self) -> Throttle {
        self.throttle
    }

    async fn fetch(
        &self,
        query: &str,
        location: &str,
        limit: usize,
    ) -> Result<Vec<Posting>, SourceError> {
        let url = self.search_url(query, location, limit);
        debug!("[{NAME}] GET {url}");

        let response = self.client.get(url).send().await?;
        let status = response.status();

        let postings = if status.is_success() {
            let body = response.text().await?;
            parse_listings(
                &body,
                &MARKUP,
                ListingContext {
                    source: NAME,
                    base_url: &self.base_url,
                    requested_location: location,
                },
                limit,
            )?
        } else {
            warn!("[{NAME}] search returned HTTP {status}, no postings from this source");
            Vec::new()
        };

        info!("[{NAME}] {} postings for '{query}'", postings.len());
        Ok(postings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const SEARCH_PAGE: &str = r#"
        <html><body>
          <div class="job_seen_beacon">
            <h2 class="jobTitle"><a href="/rc/clk?jk=abc">Senior Python Developer</a></h2>
            <span class="companyName">TechCorp Inc.</span>
            <div class="companyLocation">Austin, TX</div>
            <div class="summary">Django and React required</div>
          </div>
          <div class="job_seen_beacon">
            <h2 class="jobTitle">Data Scientist</h2>
            <span class="companyName">Acme</span>
          </div>
        </body></html>"#;

    fn source(server: &MockServer) -> IndeedSource {
        IndeedSource::new(
            Client::new(),
            &format!("{}/jobs", server.uri()),
            Throttle::disabled(),
        )
        .unwrap()
    }

    #[test]
    fn test_search_url_parameters() {
        let source = IndeedSource::new(
            Client::new(),
            "https://www.indeed.com/jobs",
            Throttle::disabled(),
        )
        .unwrap();
        let url = source.search_url("Python React", "New York", 80);
        let pairs: Vec<(String, String)> = url.query_pairs().into_owned().collect();
        assert_eq!(
            pairs,
            vec![
                ("q".to_string(), "Python React".to_string()),
                ("l".to_string(), "New York".to_string()),
                ("sort".to_string(), "date".to_string()),
                ("limit".to_string(), "50".to_string()),
            ]
        );
    }

    #[tokio::test]
    async fn test_fetch_parses_listing_cards() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/jobs"))
            .and(query_param("q", "Python"))
            .and(query_param("l", "Remote"))
            .respond_with(ResponseTemplate::new(200).set_body_string(SEARCH_PAGE))
            .expect(1)
            .mount(&server)
            .await;

        let postings = source(&server).fetch("Python", "Remote", 10).await.unwrap();

        assert_eq!(postings.len(), 2);
        assert_eq!(postings[0].title, "Senior Python Developer");
        assert_eq!(postings[0].company, "TechCorp Inc.");
        assert_eq!(postings[0].location, "Austin, TX");
        assert_eq!(postings[0].url, format!("{}/rc/clk?jk=abc", server.uri()));
        assert_eq!(postings[0].description, "Django and React required");
        assert_eq!(postings[0].source, NAME);
        assert_eq!(postings[1].location, "Remote");
    }

    #[tokio::test]
    async fn test_non_success_status_is_empty_not_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(403).set_body_string("blocked"))
            .mount(&server)
            .await;

        let postings = source(&server).fetch("Python", "Remote", 10).await.unwrap();
        assert!(postings.is_empty());
    }

    #[tokio::test]
    async fn test_unreachable_host_is_an_error() {
        let source = IndeedSource::new(
            Client::new(),
            "http://127.0.0.1:1/jobs",
            Throttle::disabled(),
        )
        .unwrap();
        let result = source.fetch("Python", "Remote", 10).await;
        assert!(matches!(result, Err(SourceError::Http(_))));
    }
}
