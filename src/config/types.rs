use serde::Deserialize;

/// Main configuration structure for RuBot
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub crawl: CrawlConfig,
}

/// Crawl behavior configuration
#[derive(Debug, Clone, Deserialize)]
pub struct CrawlConfig {
    /// Seed URL(s) the crawl starts from; a single string or a list
    pub seeds: Seeds,

    /// Topic driving link prioritization
    pub topic: String,

    /// Query phrase matched against fetched page text
    #[serde(rename = "query-words")]
    pub query_words: String,

    /// Global budget on pages fetched
    #[serde(rename = "max-pages", default = "default_max_pages")]
    pub max_pages: u64,

    /// Maximum number of domains crawled simultaneously
    #[serde(rename = "max-domains", default = "default_max_domains")]
    pub max_domains: usize,

    /// User agent presented to sites and matched against robots.txt
    #[serde(rename = "user-agent", default = "default_user_agent")]
    pub user_agent: String,
}

/// One seed URL or a list of them
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum Seeds {
    One(String),
    Many(Vec<String>),
}

impl Seeds {
    /// The seeds as a uniform list.
    pub fn as_vec(&self) -> Vec<String> {
        match self {
            Seeds::One(seed) => vec![seed.clone()],
            Seeds::Many(seeds) => seeds.clone(),
        }
    }

    pub fn len(&self) -> usize {
        match self {
            Seeds::One(_) => 1,
            Seeds::Many(seeds) => seeds.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn default_max_pages() -> u64 {
    100
}

fn default_max_domains() -> usize {
    5
}

fn default_user_agent() -> String {
    "RuBot".to_string()
}
