use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct PaperRecord {
    pub title: String,
    pub authors: Vec<String>,
    pub venue: Option<String>,
    pub year: Option<u32>,
    pub publication_date: Option<String>,
    pub fields_of_study: Vec<String>,
    pub paper_id: Option<String>,
    pub abstract_text: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct PaperDetails {
    pub arxiv_id: Option<String>,
    pub abstract_text: Option<String>,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub graph_api_base: String,
    pub lookup_api_base: String,
    pub search_fields: String,
    pub search_limit: usize,
    pub papers_file: PathBuf,
    pub section_title: String,
    pub api_key: Option<String>,
    pub git_remote: String,
    pub git_branch: String,
    pub commit_message: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            graph_api_base: "https://api.semanticscholar.org/graph/v1/".to_string(),
            lookup_api_base: "https://api.semanticscholar.org/v1/".to_string(),
            search_fields: "title,authors,venue,year,publicationDate,fieldsOfStudy".to_string(),
            search_limit: 1,
            papers_file: PathBuf::from("README.md"),
            section_title: "## 📖 Paper List (Listed in Time Order)".to_string(),
            api_key: None,
            git_remote: "origin".to_string(),
            git_branch: "main".to_string(),
            commit_message: "Update paper list".to_string(),
        }
    }
}

pub mod discovery;
pub mod document;
pub mod publish;
pub mod render;
