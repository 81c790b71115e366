use chrono::{DateTime, Utc};
use serde::Deserialize;
use url::Url;

use super::{DEFAULT_THUMBNAIL, FeedEntry, PageRequest, PageSource};
use crate::http::{TransportError, check_status};

#[derive(Debug, Deserialize)]
struct CmsPage {
    data: Vec<CmsEntry>,
}

#[derive(Debug, Deserialize)]
struct CmsEntry {
    id: u64,
    attributes: CmsAttributes,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CmsAttributes {
    title: String,
    #[serde(default)]
    description: String,
    slug: String,
    #[serde(default)]
    author: String,
    published_at: Option<DateTime<Utc>>,
    thumbnail: Option<CmsMedia>,
    category: Option<String>,
    tags: Option<Vec<String>>,
}

#[derive(Debug, Deserialize)]
struct CmsMedia {
    data: Option<CmsMediaData>,
}

#[derive(Debug, Deserialize)]
struct CmsMediaData {
    attributes: CmsMediaAttributes,
}

#[derive(Debug, Deserialize)]
struct CmsMediaAttributes {
    url: String,
}

/// Client for the headless CMS blog collection.
pub struct CmsClient {
    client: reqwest::blocking::Client,
    base_url: Url,
}

impl CmsClient {
    pub fn new(client: reqwest::blocking::Client, base_url: Url) -> Self {
        Self { client, base_url }
    }

    pub fn page_url(&self, request: &PageRequest) -> Url {
        let mut url = self.base_url.clone();
        {
            let mut query = url.query_pairs_mut();
            query
                .append_pair("pagination[page]", &request.page.to_string())
                .append_pair("pagination[pageSize]", &request.page_size.to_string())
                .append_pair("populate", "*");
            if let Some(category) = &request.filters.category {
                query.append_pair("filters[category][$eq]", category);
            }
            if let Some(tag) = &request.filters.tag {
                query.append_pair("filters[tags][$contains]", tag);
            }
        }
        url
    }
}

impl PageSource for CmsClient {
    fn fetch_page(&self, request: &PageRequest) -> Result<Vec<FeedEntry>, TransportError> {
        let url = self.page_url(request);
        tracing::debug!(%url, "fetching blog page");
        let response = check_status(self.client.get(url).send()?)?;
        let bytes = response.bytes()?;
        parse(&bytes, &self.base_url)
    }
}

pub(crate) fn parse(body: &[u8], base_url: &Url) -> Result<Vec<FeedEntry>, TransportError> {
    let page: CmsPage = serde_json::from_slice(body)?;
    Ok(page
        .data
        .into_iter()
        .map(|entry| {
            let attrs = entry.attributes;
            FeedEntry {
                id: entry.id,
                title: attrs.title,
                description: attrs.description,
                author: attrs.author,
                published_at: attrs.published_at,
                slug: attrs.slug,
                thumbnail_url: thumbnail_url(attrs.thumbnail, base_url),
                category: attrs.category,
                tags: attrs.tags.unwrap_or_default(),
            }
        })
        .collect())
}

fn thumbnail_url(media: Option<CmsMedia>, base_url: &Url) -> String {
    let raw = media
        .and_then(|m| m.data)
        .map(|d| d.attributes.url)
        .filter(|u| !u.trim().is_empty());
    match raw {
        // Uploads are served relative to the CMS origin
        Some(u) if u.starts_with('/') => base_url
            .join(&u)
            .map(|joined| joined.to_string())
            .unwrap_or(u),
        Some(u) => u,
        None => DEFAULT_THUMBNAIL.to_string(),
    }
}
