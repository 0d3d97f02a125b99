//! Robots.txt rules built on the robotstxt crate
//!
//! Allow/deny questions go through the crate's matcher; the Crawl-delay
//! directive is parsed here directly because the crate does not expose it.

use robotstxt::DefaultMatcher;

/// Parsed robots.txt directives for one site
#[derive(Debug, Clone)]
pub struct RobotsRules {
    content: String,
}

impl RobotsRules {
    /// Wraps raw robots.txt content for later matching.
    pub fn from_content(content: &str) -> Self {
        Self {
            content: content.to_string(),
        }
    }

    /// Checks whether a path is allowed for the given user agent.
    pub fn is_allowed(&self, path: &str, user_agent: &str) -> bool {
        if self.content.is_empty() {
            return true;
        }

        let mut matcher = DefaultMatcher::default();
        matcher.one_agent_allowed_by_robots(&self.content, user_agent, path)
    }

    /// Extracts the Crawl-delay (in seconds) declared for a user agent.
    ///
    /// A delay declared for a group naming the agent specifically takes
    /// precedence over one declared for `*`. Returns None when the site
    /// declares no delay for this agent.
    pub fn crawl_delay(&self, user_agent: &str) -> Option<f64> {
        let agent = user_agent.to_lowercase();

        // Agents named by the group currently being read. A User-agent line
        // after any other directive starts a new group.
        let mut group: Vec<String> = Vec::new();
        let mut group_closed = false;

        let mut specific: Option<f64> = None;
        let mut wildcard: Option<f64> = None;

        for line in self.content.lines() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let Some((key, value)) = line.split_once(':') else {
                continue;
            };
            let key = key.trim().to_lowercase();
            let value = value.trim();

            if key == "user-agent" {
                if group_closed {
                    group.clear();
                    group_closed = false;
                }
                group.push(value.to_lowercase());
                continue;
            }

            group_closed = true;
            if key == "crawl-delay" {
                if let Ok(delay) = value.parse::<f64>() {
                    if group.iter().any(|ua| ua != "*" && agent.contains(ua.as_str())) {
                        specific = Some(delay);
                    } else if group.iter().any(|ua| ua == "*") {
                        wildcard = Some(delay);
                    }
                }
            }
        }

        specific.or(wildcard)
    }
}
