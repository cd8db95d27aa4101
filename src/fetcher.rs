//! Category and clue fetching from the remote trivia API.
//!
//! Two endpoints are used: `GET {base}/categories?count=N` for the candidate
//! pool and `GET {base}/category?id=I` for one category's full clue list.
//! Subset selection is delegated to the sampler; the fetcher itself does no
//! retries and no recovery, so a failed request aborts the load cycle and
//! the caller never sees a partially built board.

use crate::board::{Category, Clue};
use crate::config::GameConfig;
use crate::error::Result;
use crate::sampler::sample;
use serde::Deserialize;
use std::time::Duration;

const REQUEST_TIMEOUT_SECS: u64 = 30;

/// One entry of the categories listing. The API also serves a title and
/// clue count here; only the id is needed for the follow-up request.
#[derive(Debug, Deserialize)]
pub struct CategorySummary {
    pub id: u64,
}

#[derive(Debug, Deserialize)]
pub struct CategoryDetail {
    pub title: String,
    pub clues: Vec<RawClue>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct RawClue {
    pub question: String,
    pub answer: String,
}

#[derive(Clone)]
pub struct Fetcher {
    client: reqwest::Client,
    config: GameConfig,
}

impl Fetcher {
    pub fn new(config: GameConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()?;
        Ok(Self { client, config })
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{path}", self.config.api_url.trim_end_matches('/'))
    }

    /// Request the candidate category pool and sample the ids for one game.
    pub async fn fetch_category_ids(&self) -> Result<Vec<u64>> {
        let summaries: Vec<CategorySummary> = self
            .client
            .get(self.endpoint("categories"))
            .query(&[("count", self.config.category_pool_size)])
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        log::debug!("fetched {} candidate categories", summaries.len());

        let ids = ids_from_summaries(summaries);
        sample(&ids, self.config.num_categories)
    }

    /// Request one category's clue pool and sample it down to board size.
    pub async fn fetch_category(&self, id: u64) -> Result<Category> {
        let detail: CategoryDetail = self
            .client
            .get(self.endpoint("category"))
            .query(&[("id", id)])
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        log::debug!(
            "fetched category {id} ({:?}) with {} clues",
            detail.title,
            detail.clues.len()
        );

        category_from_detail(detail, self.config.clues_per_category)
    }

    /// Run one full load: sample ids, then fetch each category in sequence.
    /// The first failure aborts the whole load.
    pub async fn fetch_board(&self) -> Result<Vec<Category>> {
        let ids = self.fetch_category_ids().await?;
        let mut categories = Vec::with_capacity(ids.len());
        for id in ids {
            categories.push(self.fetch_category(id).await?);
        }
        log::info!("board loaded: {} categories", categories.len());
        Ok(categories)
    }
}

pub fn ids_from_summaries(summaries: Vec<CategorySummary>) -> Vec<u64> {
    summaries.into_iter().map(|summary| summary.id).collect()
}

/// Map a raw category payload into the board shape: sample the clue pool
/// down to `clues_per_category` and start every clue unrevealed.
pub fn category_from_detail(detail: CategoryDetail, clues_per_category: usize) -> Result<Category> {
    let picked = sample(&detail.clues, clues_per_category)?;
    Ok(Category {
        title: detail.title,
        clues: picked
            .into_iter()
            .map(|raw| Clue::new(raw.question, raw.answer))
            .collect(),
    })
}
