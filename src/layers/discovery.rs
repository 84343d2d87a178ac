use anyhow::{Result, anyhow};
use reqwest::Client;
use serde::Deserialize;
use crate::layers::{Config, PaperDetails, PaperRecord};

#[derive(Deserialize)]
struct SSResult {
    #[serde(default)]
    data: Vec<SSPaper>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct SSPaper {
    paper_id: Option<String>,
    title: Option<String>,
    venue: Option<String>,
    year: Option<u32>,
    publication_date: Option<String>,
    #[serde(default)]
    fields_of_study: Option<Vec<String>>,
    #[serde(rename = "abstract", default)]
    abstract_text: Option<String>,
    #[serde(default)]
    authors: Vec<SSAuthor>,
}

#[derive(Deserialize)]
struct SSAuthor {
    name: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct SSPaperInfo {
    #[serde(default)]
    arxiv_id: Option<String>,
    #[serde(rename = "abstract", default)]
    abstract_text: Option<String>,
}

use governor::{Quota, RateLimiter};
use governor::clock::DefaultClock;
use governor::state::{InMemoryState, direct::NotKeyed};
use nonzero_ext::nonzero;
use std::sync::Arc;

pub struct SemanticScholarClient {
    client: Client,
    graph_api_base: String,
    lookup_api_base: String,
    search_fields: String,
    api_key: Option<String>,
    limiter: Arc<RateLimiter<NotKeyed, InMemoryState, DefaultClock>>,
}

impl SemanticScholarClient {
    pub fn new(config: &Config) -> Self {
        // Unkeyed requests get roughly 100 per 5 minutes; 1/s keeps us under that.
        let quota = Quota::per_second(nonzero!(1u32));

        Self {
            client: Client::new(),
            graph_api_base: config.graph_api_base.clone(),
            lookup_api_base: config.lookup_api_base.clone(),
            search_fields: config.search_fields.clone(),
            api_key: config.api_key.clone(),
            limiter: Arc::new(RateLimiter::direct(quota)),
        }
    }

    fn search_url(&self, query: &str, limit: usize) -> String {
        format!(
            "{}paper/search?query={}&fields={}&limit={}&sort=year",
            self.graph_api_base,
            urlencoding::encode(query),
            self.search_fields,
            limit
        )
    }

    pub async fn search(&self, query: &str, limit: usize) -> Result<Vec<PaperRecord>> {
        // Wait for permission
        self.limiter.until_ready().await;

        let url = self.search_url(query, limit);

        let mut request = self.client.get(&url);
        if let Some(key) = &self.api_key {
            request = request.header("x-api-key", key);
        }

        tracing::info!("Querying Semantic Scholar: {}", url);
        match request.send().await {
            Ok(resp) => {
                if !resp.status().is_success() {
                    tracing::warn!("Semantic Scholar API error: {}", resp.status());
                    return Ok(Vec::new());
                }
                let results: SSResult = resp.json().await?;
                let papers: Vec<PaperRecord> = results.data.into_iter().map(|p| PaperRecord {
                    title: p.title.unwrap_or_else(|| "N/A".to_string()),
                    authors: p.authors.into_iter().map(|a| a.name).collect(),
                    venue: p.venue,
                    year: p.year,
                    publication_date: p.publication_date,
                    fields_of_study: p.fields_of_study.unwrap_or_default(),
                    paper_id: p.paper_id,
                    abstract_text: p.abstract_text,
                }).collect();

                for paper in &papers {
                    tracing::debug!("Hit: {} [{}]", paper.title, paper.fields_of_study.join(", "));
                }
                Ok(papers)
            }
            Err(e) => Err(anyhow!("Request failed: {}", e)),
        }
    }

    pub async fn fetch_details(&self, paper_id: &str) -> Result<PaperDetails> {
        // Wait for permission
        self.limiter.until_ready().await;

        let url = format!("{}paper/{}", self.lookup_api_base, paper_id);

        let mut request = self.client.get(&url);
        if let Some(key) = &self.api_key {
            request = request.header("x-api-key", key);
        }

        tracing::info!("Fetching extended fields: {}", url);
        match request.send().await {
            Ok(resp) => {
                if !resp.status().is_success() {
                    tracing::warn!("Semantic Scholar lookup error for {}: {}", paper_id, resp.status());
                    return Ok(PaperDetails::default());
                }
                let info: SSPaperInfo = resp.json().await?;
                Ok(PaperDetails {
                    arxiv_id: info.arxiv_id,
                    abstract_text: info.abstract_text,
                })
            }
            Err(e) => Err(anyhow!("Request failed: {}", e)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn search_url_carries_fields_limit_and_sort() {
        let client = SemanticScholarClient::new(&Config::default());
        assert_eq!(
            client.search_url("Inference-Time Scaling", 1),
            "https://api.semanticscholar.org/graph/v1/paper/search?\
             query=Inference-Time%20Scaling\
             &fields=title,authors,venue,year,publicationDate,fieldsOfStudy\
             &limit=1&sort=year"
        );
    }

    #[test]
    fn search_response_tolerates_null_fields_of_study() {
        let payload = r#"{
            "total": 1,
            "offset": 0,
            "data": [
                {
                    "paperId": "649def34f8be52c8b66281af98ae884c09aef38b",
                    "title": "Construction of the Literature Graph in Semantic Scholar",
                    "venue": "",
                    "year": 2018,
                    "publicationDate": "2018-05-02",
                    "fieldsOfStudy": null,
                    "authors": [
                        { "authorId": "1741101", "name": "Waleed Ammar" },
                        { "authorId": "46181066", "name": "Dirk Groeneveld" }
                    ]
                }
            ]
        }"#;
        let parsed: SSResult = serde_json::from_str(payload).unwrap();
        assert_eq!(parsed.data.len(), 1);
        let paper = &parsed.data[0];
        assert_eq!(paper.title.as_deref(), Some("Construction of the Literature Graph in Semantic Scholar"));
        assert_eq!(paper.publication_date.as_deref(), Some("2018-05-02"));
        assert!(paper.fields_of_study.is_none());
        assert_eq!(paper.authors.len(), 2);
        assert_eq!(paper.venue.as_deref(), Some(""));
    }

    #[test]
    fn search_response_without_data_key_is_empty() {
        let parsed: SSResult = serde_json::from_str(r#"{"total": 0, "offset": 0}"#).unwrap();
        assert!(parsed.data.is_empty());
    }

    #[test]
    fn lookup_reads_arxiv_id_and_abstract() {
        let payload = r#"{
            "arxivId": "1805.02262",
            "abstract": "We describe a deployed scalable system for organizing published scientific literature.",
            "title": "Construction of the Literature Graph in Semantic Scholar"
        }"#;
        let info: SSPaperInfo = serde_json::from_str(payload).unwrap();
        assert_eq!(info.arxiv_id.as_deref(), Some("1805.02262"));
        assert!(info.abstract_text.unwrap().starts_with("We describe"));
    }

    #[test]
    fn lookup_tolerates_nulls() {
        let info: SSPaperInfo = serde_json::from_str(r#"{"arxivId": null, "abstract": null}"#).unwrap();
        assert!(info.arxiv_id.is_none());
        assert!(info.abstract_text.is_none());
    }
}
