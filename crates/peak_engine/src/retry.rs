use std::future::Future;
use std::time::Duration;

use scrape_logging::{scrape_debug, scrape_trace, scrape_warn};

use crate::decode::decode_page;
use crate::{FetchError, FetchedPage, Fetcher};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Additional attempts after the first one.
    pub retries: u32,
    pub delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            retries: 2,
            delay: Duration::from_millis(500),
        }
    }
}

/// Runs `operation` up to `policy.retries + 1` times while it fails transiently.
pub async fn retry_transient<T, F, Fut>(
    policy: &RetryPolicy,
    mut operation: F,
) -> Result<T, FetchError>
where
    F: FnMut(u32) -> Fut,
    Fut: Future<Output = Result<T, FetchError>>,
{
    let mut attempt = 0u32;
    loop {
        match operation(attempt).await {
            Ok(value) => return Ok(value),
            Err(err) => {
                if !err.kind.is_transient() || attempt >= policy.retries {
                    return Err(err);
                }
                attempt += 1;
                scrape_warn!(
                    "transient fetch error ({}), retry {}/{} in {:?}",
                    err,
                    attempt,
                    policy.retries,
                    policy.delay
                );
                tokio::time::sleep(policy.delay).await;
            }
        }
    }
}

pub async fn fetch_page(
    fetcher: &dyn Fetcher,
    url: &str,
    policy: &RetryPolicy,
) -> Result<FetchedPage, FetchError> {
    let result = retry_transient(policy, |attempt| async move {
        scrape_debug!("fetch attempt {} for {}", attempt + 1, url);
        let output = fetcher.fetch(url).await?;
        Ok(decode_page(&output)?)
    })
    .await;

    match &result {
        Ok(page) => scrape_trace!("decoded {} as {}", page.final_url, page.encoding_label),
        Err(err) => scrape_warn!("Failed to fetch {}: {}", url, err),
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::FailureKind;
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::sync::Arc;

    fn no_delay(retries: u32) -> RetryPolicy {
        RetryPolicy {
            retries,
            delay: Duration::ZERO,
        }
    }

    #[tokio::test]
    async fn succeeds_immediately_on_first_try() {
        let calls = Arc::new(AtomicU32::new(0));
        let c = Arc::clone(&calls);
        let result = retry_transient(&no_delay(2), |_| {
            let c = Arc::clone(&c);
            async move {
                c.fetch_add(1, Ordering::SeqCst);
                Ok::<u32, FetchError>(42)
            }
        })
        .await;
        assert_eq!(result.unwrap(), 42);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn does_not_retry_http_status() {
        let calls = Arc::new(AtomicU32::new(0));
        let c = Arc::clone(&calls);
        let result = retry_transient(&no_delay(2), |_| {
            let c = Arc::clone(&c);
            async move {
                c.fetch_add(1, Ordering::SeqCst);
                Err::<u32, _>(FetchError::new(FailureKind::HttpStatus(404), "Not Found"))
            }
        })
        .await;
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(result.unwrap_err().kind, FailureKind::HttpStatus(404));
    }

    #[tokio::test]
    async fn attempt_index_counts_from_zero() {
        let mut seen = Vec::new();
        let _ = retry_transient(&no_delay(2), |attempt| {
            seen.push(attempt);
            async move { Err::<(), _>(FetchError::new(FailureKind::Network, "reset")) }
        })
        .await;
        assert_eq!(seen, vec![0, 1, 2]);
    }
}
