use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use store::Record;

/// Closed set of news categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NewsCategory {
    Heroic,
    Damage,
    Scandal,
}

impl NewsCategory {
    pub const ALL: [NewsCategory; 3] = [
        NewsCategory::Heroic,
        NewsCategory::Damage,
        NewsCategory::Scandal,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            NewsCategory::Heroic => "heroic",
            NewsCategory::Damage => "damage",
            NewsCategory::Scandal => "scandal",
        }
    }

    /// Human-readable label, e.g. "Collateral Damage".
    pub fn label(&self) -> &'static str {
        match self {
            NewsCategory::Heroic => "Heroic Acts",
            NewsCategory::Damage => "Collateral Damage",
            NewsCategory::Scandal => "Scandals",
        }
    }
}

impl fmt::Display for NewsCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for NewsCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        NewsCategory::ALL
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| format!("Unknown news category: {s}"))
    }
}

/// A news article. Likes and dislikes are plain counters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct News {
    pub id: String,
    pub title: String,
    pub content: String,
    pub category: NewsCategory,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(default)]
    pub likes: u64,
    #[serde(default)]
    pub dislikes: u64,
    pub created_at: DateTime<Utc>,
    /// Username of the publishing admin.
    pub created_by: String,
}

impl Record for News {
    fn id(&self) -> &str {
        &self.id
    }
}

/// Fields an admin supplies for a new article.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewsDraft {
    pub title: String,
    pub content: String,
    pub category: NewsCategory,
    pub image: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_parse() {
        assert_eq!("damage".parse::<NewsCategory>(), Ok(NewsCategory::Damage));
        assert!("gossip".parse::<NewsCategory>().is_err());
        assert_eq!(NewsCategory::Scandal.label(), "Scandals");
    }

    #[test]
    fn test_empty_image_is_omitted() {
        let news = News {
            id: "news1".to_string(),
            title: "t".to_string(),
            content: "c".to_string(),
            category: NewsCategory::Heroic,
            image: None,
            likes: 0,
            dislikes: 0,
            created_at: Utc::now(),
            created_by: "admin".to_string(),
        };
        let value = serde_json::to_value(&news).unwrap();
        assert!(value.get("image").is_none());
        assert_eq!(value["category"], "heroic");
        assert_eq!(value["createdBy"], "admin");
    }
}
