use std::future::Future;

use color_eyre::{eyre::eyre, Result};
use url::Url;

use crate::api::dto::ApiBreed;
use crate::breed::Breed;
use crate::config::Config;

/// A paginated, read-only source of breeds.
///
/// The protocol has no total-count field; the final page is the one that
/// comes back shorter than the requested page size.
pub trait RemoteSource: Send + Sync {
  /// Fetch one page of breeds. `page` is zero-based.
  fn fetch_page(
    &self,
    page: usize,
    page_size: usize,
  ) -> impl Future<Output = Result<Vec<Breed>>> + Send;
}

/// TheCatAPI client.
#[derive(Clone)]
pub struct BreedApi {
  http: reqwest::Client,
  base_url: Url,
  api_key: Option<String>,
}

impl BreedApi {
  pub fn new(config: &Config) -> Result<Self> {
    let base_url = Url::parse(&config.api.url)
      .map_err(|e| eyre!("Invalid API base url {}: {}", config.api.url, e))?;

    let http = reqwest::Client::builder()
      .build()
      .map_err(|e| eyre!("Failed to create HTTP client: {}", e))?;

    Ok(Self {
      http,
      base_url,
      api_key: Config::get_api_key(),
    })
  }
}

impl RemoteSource for BreedApi {
  async fn fetch_page(&self, page: usize, page_size: usize) -> Result<Vec<Breed>> {
    let mut url = self
      .base_url
      .join("breeds")
      .map_err(|e| eyre!("Failed to build breeds url: {}", e))?;

    url
      .query_pairs_mut()
      .append_pair("limit", &page_size.to_string())
      .append_pair("page", &page.to_string());

    let mut request = self.http.get(url.clone());
    if let Some(key) = &self.api_key {
      request = request.header("x-api-key", key);
    }

    let response = request
      .send()
      .await
      .map_err(|e| eyre!("Failed to fetch breeds page {}: {}", page, e))?;

    let status = response.status();
    if !status.is_success() {
      return Err(eyre!("Breeds request {} returned {}", url, status));
    }

    let body = response
      .bytes()
      .await
      .map_err(|e| eyre!("Failed to read breeds page {}: {}", page, e))?;

    let breeds: Vec<ApiBreed> = serde_json::from_slice(&body)
      .map_err(|e| eyre!("Failed to decode breeds page {}: {}", page, e))?;

    Ok(breeds.into_iter().map(ApiBreed::into_breed).collect())
  }
}
