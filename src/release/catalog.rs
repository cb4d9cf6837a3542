//! Remote release listing filtered and ordered by semantic version

use std::collections::HashSet;
use std::sync::Arc;

use tracing::{debug, info};

use crate::config::MAX_PAGE_SIZE;
use crate::release::error::ReleaseError;
use crate::release::source::ReleaseSource;
use crate::release::types::{Release, RemoteRelease};

/// Options for [`ReleaseCatalog::fetch`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FetchOptions {
    /// Keep releases whose tag carries pre-release metadata
    pub include_devel: bool,
    /// Maximum number of releases to return, `0` or less for no limit
    pub limit: i64,
}

pub struct ReleaseCatalog {
    source: Arc<dyn ReleaseSource>,
}

impl ReleaseCatalog {
    pub fn new(source: Arc<dyn ReleaseSource>) -> Self {
        Self { source }
    }

    /// Fetch releases, ascending by version.
    ///
    /// Pages are requested until the source runs out or `limit` releases have
    /// been kept. Tags that are not versions are dropped, as are duplicates.
    pub async fn fetch(&self, options: FetchOptions) -> Result<Vec<RemoteRelease>, ReleaseError> {
        let limit = usize::try_from(options.limit).ok().filter(|&l| l > 0);
        let per_page = limit.map_or(MAX_PAGE_SIZE, |l| l.min(MAX_PAGE_SIZE as usize) as u32);

        let mut seen = HashSet::new();
        let mut kept = Vec::new();
        let mut page = 1;

        'pages: loop {
            let listing = self.source.list_releases(page, per_page).await?;
            debug!(
                "Fetched page {} with {} releases",
                page,
                listing.releases.len()
            );

            for release in listing.releases {
                if limit.is_some_and(|l| kept.len() >= l) {
                    break 'pages;
                }
                if !seen.insert(release.tag_name.clone()) {
                    continue;
                }
                let Some(remote) = RemoteRelease::from_release(release) else {
                    continue;
                };
                if !options.include_devel && remote.version.is_prerelease() {
                    continue;
                }
                kept.push(remote);
            }

            match listing.next_page {
                Some(next) if next > page => page = next,
                _ => break,
            }
            if limit.is_some_and(|l| kept.len() >= l) {
                break;
            }
        }

        kept.sort_by(|a, b| a.version.cmp(&b.version));
        info!("Found {} remote releases", kept.len());
        Ok(kept)
    }

    /// Fetch the release published under exactly `tag`
    pub async fn fetch_by_tag(&self, tag: &str) -> Result<Release, ReleaseError> {
        let release = self.source.release_by_tag(tag).await?;
        if release.tag_name != tag {
            return Err(ReleaseError::ReleaseNotFound(tag.to_string()));
        }
        Ok(release)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::release::source::MockReleaseSource;
    use crate::release::types::ReleasePage;
    use mockall::predicate::eq;
    use rstest::rstest;

    fn release(tag: &str) -> Release {
        Release {
            tag_name: tag.to_string(),
            prerelease: false,
            assets: vec![],
        }
    }

    fn page(tags: &[&str], next_page: Option<u32>) -> ReleasePage {
        ReleasePage {
            releases: tags.iter().map(|t| release(t)).collect(),
            next_page,
        }
    }

    fn tags(releases: &[RemoteRelease]) -> Vec<&str> {
        releases.iter().map(|r| r.tag()).collect()
    }

    #[tokio::test]
    async fn fetch_excludes_prereleases_and_sorts_ascending() {
        let mut source = MockReleaseSource::new();
        source
            .expect_list_releases()
            .with(eq(1), eq(MAX_PAGE_SIZE))
            .times(1)
            .returning(|_, _| {
                Ok(page(
                    &["v1.3.0", "v1.2.0-beta.1", "v1.2.0", "nightly", "v1.10.0"],
                    None,
                ))
            });

        let catalog = ReleaseCatalog::new(Arc::new(source));
        let result = catalog.fetch(FetchOptions::default()).await.unwrap();

        assert_eq!(tags(&result), vec!["v1.2.0", "v1.3.0", "v1.10.0"]);
    }

    #[tokio::test]
    async fn fetch_includes_prereleases_when_devel_requested() {
        let mut source = MockReleaseSource::new();
        source
            .expect_list_releases()
            .returning(|_, _| Ok(page(&["v1.2.0", "v1.2.0-beta.1"], None)));

        let catalog = ReleaseCatalog::new(Arc::new(source));
        let result = catalog
            .fetch(FetchOptions {
                include_devel: true,
                limit: 0,
            })
            .await
            .unwrap();

        assert_eq!(tags(&result), vec!["v1.2.0-beta.1", "v1.2.0"]);
    }

    #[tokio::test]
    async fn fetch_follows_pages_until_exhausted() {
        let mut source = MockReleaseSource::new();
        source
            .expect_list_releases()
            .with(eq(1), eq(MAX_PAGE_SIZE))
            .times(1)
            .returning(|_, _| Ok(page(&["v2.0.0", "v1.9.0"], Some(2))));
        source
            .expect_list_releases()
            .with(eq(2), eq(MAX_PAGE_SIZE))
            .times(1)
            .returning(|_, _| Ok(page(&["v1.8.0"], None)));

        let catalog = ReleaseCatalog::new(Arc::new(source));
        let result = catalog.fetch(FetchOptions::default()).await.unwrap();

        assert_eq!(tags(&result), vec!["v1.8.0", "v1.9.0", "v2.0.0"]);
    }

    #[rstest]
    #[case(0)]
    #[case(-1)]
    #[case(i64::MIN)]
    #[tokio::test]
    async fn fetch_without_positive_limit_reads_every_page(#[case] limit: i64) {
        let mut source = MockReleaseSource::new();
        source
            .expect_list_releases()
            .with(eq(1), eq(MAX_PAGE_SIZE))
            .times(1)
            .returning(|_, _| Ok(page(&["v1.5.0", "v1.4.0", "v1.3.0"], Some(2))));
        source
            .expect_list_releases()
            .with(eq(2), eq(MAX_PAGE_SIZE))
            .times(1)
            .returning(|_, _| Ok(page(&["v1.2.0", "v1.1.0"], None)));

        let catalog = ReleaseCatalog::new(Arc::new(source));
        let result = catalog
            .fetch(FetchOptions {
                include_devel: false,
                limit,
            })
            .await
            .unwrap();

        assert_eq!(
            tags(&result),
            vec!["v1.1.0", "v1.2.0", "v1.3.0", "v1.4.0", "v1.5.0"]
        );
    }

    #[tokio::test]
    async fn fetch_stops_once_limit_is_reached() {
        let mut source = MockReleaseSource::new();
        source
            .expect_list_releases()
            .with(eq(1), eq(3))
            .times(1)
            .returning(|_, _| Ok(page(&["v1.5.0", "v1.4.0", "v1.3.0"], Some(2))));

        let catalog = ReleaseCatalog::new(Arc::new(source));
        let result = catalog
            .fetch(FetchOptions {
                include_devel: false,
                limit: 3,
            })
            .await
            .unwrap();

        assert_eq!(tags(&result), vec!["v1.3.0", "v1.4.0", "v1.5.0"]);
    }

    #[tokio::test]
    async fn fetch_limit_counts_only_kept_releases() {
        let mut source = MockReleaseSource::new();
        source
            .expect_list_releases()
            .with(eq(1), eq(2))
            .times(1)
            .returning(|_, _| Ok(page(&["v1.5.0-rc.0", "v1.4.0"], Some(2))));
        source
            .expect_list_releases()
            .with(eq(2), eq(2))
            .times(1)
            .returning(|_, _| Ok(page(&["v1.3.0", "v1.2.0"], Some(3))));

        let catalog = ReleaseCatalog::new(Arc::new(source));
        let result = catalog
            .fetch(FetchOptions {
                include_devel: false,
                limit: 2,
            })
            .await
            .unwrap();

        assert_eq!(tags(&result), vec!["v1.3.0", "v1.4.0"]);
    }

    #[tokio::test]
    async fn fetch_drops_duplicate_tags() {
        let mut source = MockReleaseSource::new();
        source
            .expect_list_releases()
            .returning(|_, _| Ok(page(&["v1.0.0", "v1.0.0"], None)));

        let catalog = ReleaseCatalog::new(Arc::new(source));
        let result = catalog.fetch(FetchOptions::default()).await.unwrap();

        assert_eq!(tags(&result), vec!["v1.0.0"]);
    }

    #[tokio::test]
    async fn fetch_propagates_source_errors() {
        let mut source = MockReleaseSource::new();
        source.expect_list_releases().returning(|_, _| {
            Err(ReleaseError::RateLimited {
                retry_after_secs: None,
            })
        });

        let catalog = ReleaseCatalog::new(Arc::new(source));
        let result = catalog.fetch(FetchOptions::default()).await;

        assert!(matches!(result, Err(ReleaseError::RateLimited { .. })));
    }

    #[tokio::test]
    async fn fetch_by_tag_returns_release() {
        let mut source = MockReleaseSource::new();
        source
            .expect_release_by_tag()
            .with(eq("v1.7.0"))
            .returning(|tag| Ok(release(tag)));

        let catalog = ReleaseCatalog::new(Arc::new(source));
        let result = catalog.fetch_by_tag("v1.7.0").await.unwrap();

        assert_eq!(result.tag_name, "v1.7.0");
    }

    #[tokio::test]
    async fn fetch_by_tag_rejects_mismatched_tag() {
        let mut source = MockReleaseSource::new();
        source
            .expect_release_by_tag()
            .returning(|_| Ok(release("v1.7.1")));

        let catalog = ReleaseCatalog::new(Arc::new(source));
        let result = catalog.fetch_by_tag("v1.7.0").await;

        assert!(matches!(result, Err(ReleaseError::ReleaseNotFound(tag)) if tag == "v1.7.0"));
    }
}
