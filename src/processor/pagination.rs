//! Result pagination -- token-chained sequential fetching and block accumulation.

use crate::clients::TextDetectionClient;
use crate::error::UpstreamError;
use crate::types::{Block, JobId, ResultPage};

/// Lazy, finite, non-restartable sequence of result pages for one job.
///
/// Each fetch's input is the previous page's continuation token, so the
/// sequence is strictly sequential; pages for one job cannot be fetched
/// concurrently. The paginator fuses after the final page or the first error.
pub struct ResultPaginator<'a> {
    client: &'a dyn TextDetectionClient,
    job_id: &'a JobId,
    next_token: Option<String>,
    pages_fetched: usize,
    max_pages: usize,
    done: bool,
}

impl<'a> ResultPaginator<'a> {
    /// Create a paginator for the given job with the given page ceiling
    pub fn new(client: &'a dyn TextDetectionClient, job_id: &'a JobId, max_pages: usize) -> Self {
        Self {
            client,
            job_id,
            next_token: None,
            pages_fetched: 0,
            max_pages,
            done: false,
        }
    }

    /// Number of pages fetched so far
    pub fn pages_fetched(&self) -> usize {
        self.pages_fetched
    }

    /// Fetch the next page, or `None` once the final page has been yielded.
    ///
    /// Errors when the fetch fails, when a page after the first reports a
    /// non-success job status, or when a continuation token is still
    /// outstanding after `max_pages` fetches (a service that never stops
    /// returning tokens must not cause unbounded iteration).
    pub async fn try_next(&mut self) -> Result<Option<ResultPage>, UpstreamError> {
        if self.done {
            return Ok(None);
        }
        if self.pages_fetched >= self.max_pages {
            self.done = true;
            return Err(UpstreamError::PageLimitExceeded {
                limit: self.max_pages,
            });
        }

        let page = match self
            .client
            .get_result(self.job_id, self.next_token.as_deref())
            .await
        {
            Ok(page) => page,
            Err(e) => {
                self.done = true;
                return Err(e);
            }
        };
        self.pages_fetched += 1;

        // The notification already vouched for the first page; a later page
        // flipping away from success is an upstream inconsistency.
        if self.pages_fetched > 1 {
            if let Some(status) = page.job_status {
                if !status.is_success() {
                    self.done = true;
                    return Err(UpstreamError::InconsistentStatus {
                        status,
                        page: self.pages_fetched,
                    });
                }
            }
        }

        tracing::debug!(
            job_id = %self.job_id,
            page = self.pages_fetched,
            blocks = page.blocks.len(),
            has_token = page.continuation_token.is_some(),
            "fetched result page"
        );

        match &page.continuation_token {
            Some(token) => self.next_token = Some(token.clone()),
            None => self.done = true,
        }
        Ok(Some(page))
    }

    /// Drain the paginator, folding every page into one accumulated block
    /// collection in fetch order.
    pub async fn collect_blocks(mut self) -> Result<Vec<Block>, UpstreamError> {
        let mut blocks = Vec::new();
        while let Some(page) = self.try_next().await? {
            blocks = append_page(blocks, page);
        }
        Ok(blocks)
    }
}

/// Append one page's blocks to the accumulated collection, in fetch order.
///
/// Pure fold step: no deduplication, no reordering. Later pages are assumed
/// to contribute only additional content blocks, never a second copy of the
/// root structure; that assumption belongs to the upstream pagination
/// contract and is not checked here.
pub fn append_page(mut accumulated: Vec<Block>, page: ResultPage) -> Vec<Block> {
    accumulated.extend(page.blocks);
    accumulated
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::types::BlockType;

    fn block(id: &str) -> Block {
        Block {
            id: id.to_string(),
            block_type: BlockType::Line,
            text: None,
            child_ids: Vec::new(),
            geometry: None,
        }
    }

    fn page_with(ids: &[&str], token: Option<&str>) -> ResultPage {
        ResultPage {
            job_status: None,
            blocks: ids.iter().map(|id| block(id)).collect(),
            continuation_token: token.map(str::to_string),
        }
    }

    #[test]
    fn append_page_preserves_fetch_order() {
        let acc = append_page(Vec::new(), page_with(&["a", "b"], Some("t")));
        let acc = append_page(acc, page_with(&["c"], None));

        let ids: Vec<&str> = acc.iter().map(|b| b.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "b", "c"]);
    }

    #[test]
    fn append_page_does_not_deduplicate() {
        let acc = append_page(Vec::new(), page_with(&["a"], Some("t")));
        let acc = append_page(acc, page_with(&["a"], None));

        assert_eq!(acc.len(), 2, "repeated ids are appended verbatim");
    }

    #[test]
    fn append_empty_page_is_a_no_op() {
        let acc = append_page(vec![block("a")], ResultPage::default());
        assert_eq!(acc.len(), 1);
    }
}
