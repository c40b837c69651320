//! Crawl orchestration
//!
//! Drives one breadth-first crawl per configured target: load or seed the
//! frontier, fetch and extract admitted pages, persist records, checkpoint
//! the frontier at a fixed cadence, and merge the corpus once the frontier
//! drains. Targets are independent and processed sequentially; within a
//! target exactly one fetch is ever in flight.

use crate::config::{Config, TargetConfig};
use crate::crawler::extractor::{extract_links, Extractor};
use crate::crawler::fetcher::{FetchOutcome, Fetcher, Pacer, TokioPacer};
use crate::output::{build_corpus, write_corpus};
use crate::state::FrontierState;
use crate::storage::{PageRecord, PageStore, TargetPaths};
use crate::url::UrlPolicy;
use crate::Result;
use url::Url;

/// Main crawler coordinator
pub struct Coordinator<P: Pacer = TokioPacer> {
    config: Config,
    policy: UrlPolicy,
    extractor: Extractor,
    fetcher: Fetcher<P>,
}

impl Coordinator<TokioPacer> {
    /// Creates a coordinator with the production fetcher
    pub fn new(config: Config) -> Result<Self> {
        let fetcher = Fetcher::new(&config.crawler, &config.user_agent)?;
        Ok(Self::with_fetcher(config, fetcher))
    }
}

impl<P: Pacer> Coordinator<P> {
    /// Creates a coordinator around a caller-supplied fetcher
    pub fn with_fetcher(config: Config, fetcher: Fetcher<P>) -> Self {
        Self {
            policy: UrlPolicy::new(config.crawler.include_revisions),
            extractor: Extractor::new(),
            fetcher,
            config,
        }
    }

    /// Crawls every configured target sequentially
    ///
    /// # Arguments
    ///
    /// * `fresh` - Ignore any persisted state and start each target from
    ///   its seed URL
    pub async fn run(&mut self, fresh: bool) -> Result<()> {
        let targets = self.config.targets.clone();
        for target in &targets {
            self.run_target(target, fresh).await?;
        }
        Ok(())
    }

    /// Crawls a single target and writes its corpus artifact
    ///
    /// Per-page failures are isolated: a page that exhausts its retry
    /// budget is dropped for this run and the crawl continues. Only state
    /// corruption or filesystem failure aborts the target.
    pub async fn run_target(&mut self, target: &TargetConfig, fresh: bool) -> Result<()> {
        let paths = TargetPaths::new(&self.config.output.data_dir, &target.name);
        let store = PageStore::open(paths.pages_dir.clone())?;

        let resumed = if fresh {
            None
        } else {
            FrontierState::load(&paths.state_file)?
        };
        let mut state = match resumed {
            Some(state) => {
                tracing::info!(
                    "Resuming {}: {} visited, {} pending",
                    target.name,
                    state.visited.len(),
                    state.pending.len()
                );
                state
            }
            None => {
                tracing::info!("Starting {}", target.name);
                FrontierState::seeded(&target.seed_url)
            }
        };

        let mut saved_this_run: u64 = 0;

        loop {
            if let Some(cap) = self.config.crawler.max_pages {
                if saved_this_run >= cap {
                    tracing::info!("Page cap of {} reached for {}", cap, target.name);
                    break;
                }
            }

            let Some(url_str) = state.pending.pop_front() else {
                break;
            };

            if state.visited.contains(&url_str) {
                continue;
            }

            // Queue entries are canonical, but re-validate against the
            // current policy so a resumed run honors a tightened config
            let Ok(url) = Url::parse(&url_str) else {
                continue;
            };
            if !self.policy.allows(&url, target) {
                continue;
            }

            // Visited no matter how the fetch goes, so a permanently
            // failing URL cannot loop forever
            state.visited.insert(url_str.clone());

            let body = match self.fetcher.fetch(&url).await {
                FetchOutcome::Success { body } => body,
                FetchOutcome::GaveUp { .. } => continue,
            };

            let page = self.extractor.extract(&body);
            store.save(
                &url,
                &PageRecord {
                    url: url_str.clone(),
                    title: page.title.clone(),
                    text: page.text,
                },
            )?;
            state.order.push(url_str.clone());
            saved_this_run += 1;
            tracing::info!("({}) {}", state.order.len(), page.title);

            for link in extract_links(&body, &url) {
                if state.visited.contains(&link) {
                    continue;
                }
                if self.policy.admit(&link, &url, target).is_some() {
                    state.pending.push_back(link);
                }
            }

            if state.order.len() as u64 % self.config.crawler.checkpoint_interval == 0 {
                state.checkpoint(&paths.state_file)?;
                tracing::debug!("Checkpointed {} at {} pages", target.name, state.order.len());
            }
        }

        // Final checkpoint is unconditional so a later run observes a
        // consistent, flushed state even when nothing new was processed
        state.checkpoint(&paths.state_file)?;

        let corpus = build_corpus(
            target,
            &state,
            &store,
            self.config.crawler.include_revisions,
        );
        write_corpus(&paths.corpus_file, &corpus)?;

        tracing::info!(
            "Completed {}: {} pages saved, corpus at {}",
            target.name,
            state.order.len(),
            paths.corpus_file.display()
        );

        Ok(())
    }

    /// Rebuilds every target's corpus artifact from persisted state
    ///
    /// Merging is a pure read-and-format step, so this can run any number
    /// of times without a crawl in between.
    pub fn merge_all(&self) -> Result<()> {
        for target in &self.config.targets {
            let paths = TargetPaths::new(&self.config.output.data_dir, &target.name);

            let Some(state) = FrontierState::load(&paths.state_file)? else {
                tracing::warn!("No state for {}; nothing to merge", target.name);
                continue;
            };
            let store = PageStore::open(paths.pages_dir.clone())?;

            let corpus = build_corpus(
                target,
                &state,
                &store,
                self.config.crawler.include_revisions,
            );
            write_corpus(&paths.corpus_file, &corpus)?;

            tracing::info!(
                "Merged {}: corpus at {}",
                target.name,
                paths.corpus_file.display()
            );
        }
        Ok(())
    }
}
