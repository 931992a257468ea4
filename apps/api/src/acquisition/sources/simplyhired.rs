use async_trait::async_trait;
use reqwest::Client;
use tracing::{debug, info, warn};
use url::Url;

use crate::acquisition::sources::markup::{parse_listings, ListingContext, ListingMarkup};
use crate::acquisition::sources::{JobSource, SourceError, Throttle};
use crate::models::Posting;

pub const NAME: &str = "simplyhired";

// SimplyHired's result cards carry no summary snippet.
const MARKUP: ListingMarkup = ListingMarkup {
    card: "div.SerpJob-jobCard",
    title: "a.SerpJob-titleLink",
    link: "a.SerpJob-titleLink",
    company: "span.SerpJob-companyName",
    location: "span.SerpJob-location",
    description: None,
};

pub struct SimplyHiredSource {
    client: Client,
    base_url: Url,
    throttle: Throttle,
}

impl SimplyHiredSource {
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
            .append_pair("job", &limit.to_string());
        url
    }
}

#[async_trait]
impl JobSource for SimplyHiredSource {
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
