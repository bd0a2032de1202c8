use std::collections::HashMap;

use serde::Deserialize;

/// Namespace of ordinary content pages.
pub const ARTICLE_NAMESPACE: i64 = 0;

/// Largest `cmlimit` the API accepts for regular clients.
pub const MAX_MEMBER_LIMIT: u32 = 500;

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CategoryMember {
    pub title: String,
    pub ns: i64,
    #[serde(default)]
    pub pageid: Option<u64>,
}

impl CategoryMember {
    pub fn article(title: &str) -> Self {
        Self::new(title, ARTICLE_NAMESPACE)
    }

    pub fn new(title: &str, ns: i64) -> Self {
        Self {
            title: title.to_string(),
            ns,
            pageid: None,
        }
    }

    pub fn is_article(&self) -> bool {
        self.ns == ARTICLE_NAMESPACE
    }
}

/// One page of a category listing.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MembersBatch {
    pub members: Vec<CategoryMember>,
    pub continuation: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ApiErrorBody {
    #[serde(default)]
    pub code: String,
    #[serde(default)]
    pub info: String,
}

#[derive(Debug, Deserialize)]
pub struct MembersResponse {
    #[serde(default)]
    pub query: Option<MembersQuery>,
    #[serde(rename = "continue", default)]
    pub continuation: Option<MembersContinue>,
    #[serde(default)]
    pub error: Option<ApiErrorBody>,
}

#[derive(Debug, Deserialize)]
pub struct MembersQuery {
    #[serde(default)]
    pub categorymembers: Vec<CategoryMember>,
}

#[derive(Debug, Deserialize)]
pub struct MembersContinue {
    #[serde(default)]
    pub cmcontinue: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ExtractResponse {
    #[serde(default)]
    pub query: Option<ExtractQuery>,
    #[serde(default)]
    pub error: Option<ApiErrorBody>,
}

#[derive(Debug, Deserialize)]
pub struct ExtractQuery {
    #[serde(default)]
    pub pages: HashMap<String, ExtractPage>,
}

#[derive(Debug, Deserialize)]
pub struct ExtractPage {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub extract: Option<String>,
}
