use crate::error::Result;
use crate::failure_log::FailureLog;
use crate::index::MovieIndex;
use crate::nas::TaskSubmitter;
use console::{Term, style};
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;
use tokio::time::sleep;
use tracing::{debug, info};

/// Result of pushing one title through search, extraction and submission
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TitleOutcome {
    Submitted,
    NotFound,
    NoMagnet,
    Failed(String),
}

impl TitleOutcome {
    /// Line written to the failure log, `None` on success
    pub fn failure_reason(&self, index_name: &str) -> Option<String> {
        match self {
            TitleOutcome::Submitted => None,
            TitleOutcome::NotFound => Some(format!("Not found on {}", index_name)),
            TitleOutcome::NoMagnet => Some("No magnet link found".to_string()),
            TitleOutcome::Failed(message) => Some(message.clone()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Failure {
    pub title: String,
    pub reason: String,
}

#[derive(Debug, Default)]
pub struct RunSummary {
    pub total: usize,
    pub submitted: usize,
    pub failures: Vec<Failure>,
}

/// Drives every title of a list through the index and into the NAS, one at a time
pub struct Pipeline<I, S> {
    index: I,
    submitter: S,
    failure_log: FailureLog,
    delay: Duration,
    term: Term,
}

impl<I: MovieIndex, S: TaskSubmitter> Pipeline<I, S> {
    pub fn new(index: I, submitter: S, failure_log: FailureLog) -> Self {
        Self {
            index,
            submitter,
            failure_log,
            delay: Duration::from_secs(2),
            term: Term::stdout(),
        }
    }

    /// Pause after each successful submission
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn failure_log(&self) -> &FailureLog {
        &self.failure_log
    }

    /// Run a single title. Never fails; problems become the outcome.
    pub async fn process(&self, title: &str) -> TitleOutcome {
        let page = match self.index.search(title).await {
            Ok(Some(page)) => page,
            Ok(None) => return TitleOutcome::NotFound,
            Err(e) => return TitleOutcome::Failed(e.to_string()),
        };
        debug!("'{}' found at {}", title, page);

        let magnet = match self.index.best_magnet(&page).await {
            Ok(Some(magnet)) => magnet,
            Ok(None) => return TitleOutcome::NoMagnet,
            Err(e) => return TitleOutcome::Failed(e.to_string()),
        };

        match self.submitter.submit(&magnet).await {
            Ok(()) => TitleOutcome::Submitted,
            Err(e) => TitleOutcome::Failed(e.to_string()),
        }
    }

    /// Process the whole list. Only a failure-log write error stops the run.
    pub async fn run(&self, titles: &[String]) -> Result<RunSummary> {
        let mut summary = RunSummary {
            total: titles.len(),
            ..Default::default()
        };

        for (position, title) in titles.iter().enumerate() {
            self.term.write_line(&format!(
                "{} Searching: {}",
                style("[ATTEMPT]").cyan(),
                title
            ))?;

            let spinner = ProgressBar::new_spinner();
            if let Ok(spinner_style) = ProgressStyle::with_template("{spinner:.blue} {msg}") {
                spinner.set_style(spinner_style);
            }
            spinner.set_message(format!("Looking up {} on {}", title, self.index.name()));
            spinner.enable_steady_tick(Duration::from_millis(100));

            let outcome = self.process(title).await;
            spinner.finish_and_clear();

            self.report(title, &outcome)?;

            if let Some(reason) = outcome.failure_reason(self.index.name()) {
                self.failure_log.record(title, &reason)?;
                summary.failures.push(Failure {
                    title: title.clone(),
                    reason,
                });
                continue;
            }

            summary.submitted += 1;
            if position + 1 < titles.len() && !self.delay.is_zero() {
                sleep(self.delay).await;
            }
        }

        self.term.write_line(&format!(
            "{} Finished all items from list!",
            style("[SUCCESS]").green()
        ))?;
        self.term.write_line(&format!(
            "{} submitted, {} failed",
            style(summary.submitted).green().bold(),
            style(summary.failures.len()).red().bold()
        ))?;

        info!(
            "Run complete: {} of {} titles queued",
            summary.submitted, summary.total
        );
        Ok(summary)
    }

    fn report(&self, title: &str, outcome: &TitleOutcome) -> Result<()> {
        let line = match outcome {
            TitleOutcome::Submitted => format!(
                "{} Sent to Download Station: {}",
                style("[SUCCESS]").green(),
                title
            ),
            TitleOutcome::NotFound => {
                format!("{} Not found: {}", style("[NOT FOUND]").red(), title)
            }
            TitleOutcome::NoMagnet => format!(
                "{} No magnet link for item: {}",
                style("[ERROR]").yellow(),
                title
            ),
            TitleOutcome::Failed(message) => format!(
                "{} Error: {} - {}",
                style("[ERROR]").red(),
                title,
                message
            ),
        };
        self.term.write_line(&line)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use async_trait::async_trait;
    use std::fs;
    use std::sync::{Arc, Mutex};
    use tempfile::TempDir;

    /// "Missing" is never found, "Broken" fails to connect, "Bare" has no magnet
    struct FakeIndex;

    #[async_trait]
    impl MovieIndex for FakeIndex {
        fn name(&self) -> &str {
            "YTS"
        }

        async fn search(&self, title: &str) -> Result<Option<String>> {
            match title {
                "Missing" => Ok(None),
                "Broken" => Err(Error::Io(std::io::Error::new(
                    std::io::ErrorKind::ConnectionRefused,
                    "connection refused",
                ))),
                other => Ok(Some(format!("page/{}", other))),
            }
        }

        async fn best_magnet(&self, page_url: &str) -> Result<Option<String>> {
            if page_url == "page/Bare" {
                Ok(None)
            } else {
                Ok(Some(format!("magnet:?dn={}", page_url)))
            }
        }
    }

    /// Rejects any magnet for the title "Rejected"
    #[derive(Clone, Default)]
    struct FakeSubmitter {
        submitted: Arc<Mutex<Vec<String>>>,
    }

    impl FakeSubmitter {
        fn submitted(&self) -> Vec<String> {
            self.submitted.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl TaskSubmitter for FakeSubmitter {
        async fn submit(&self, magnet: &str) -> Result<()> {
            if magnet.ends_with("Rejected") {
                return Err(Error::NasSubmission("Max number of tasks reached".into()));
            }
            self.submitted.lock().unwrap().push(magnet.to_string());
            Ok(())
        }
    }

    fn titles(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[tokio::test]
    async fn test_process_outcomes() {
        let dir = TempDir::new().unwrap();
        let submitter = FakeSubmitter::default();
        let pipeline = Pipeline::new(
            FakeIndex,
            submitter.clone(),
            FailureLog::new(dir.path().join("failed.txt")),
        );

        assert_eq!(pipeline.process("Heat").await, TitleOutcome::Submitted);
        assert_eq!(pipeline.process("Missing").await, TitleOutcome::NotFound);
        assert_eq!(pipeline.process("Bare").await, TitleOutcome::NoMagnet);
        assert!(matches!(
            pipeline.process("Rejected").await,
            TitleOutcome::Failed(_)
        ));
        assert_eq!(submitter.submitted(), vec!["magnet:?dn=page/Heat".to_string()]);
    }

    #[tokio::test]
    async fn test_mixed_batch_logs_each_failure_once() {
        let dir = TempDir::new().unwrap();
        let log_path = dir.path().join("logs").join("failed.txt");
        let submitter = FakeSubmitter::default();
        let pipeline = Pipeline::new(FakeIndex, submitter.clone(), FailureLog::new(&log_path))
            .with_delay(Duration::ZERO);

        let list = titles(&["Heat", "Missing", "Bare", "Rejected", "Broken", "Ronin"]);
        let summary = pipeline.run(&list).await.unwrap();

        assert_eq!(summary.total, 6);
        assert_eq!(summary.submitted, 2);
        assert_eq!(summary.failures.len(), 4);

        let content = fs::read_to_string(&log_path).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines.len(), 4);
        assert_eq!(lines[0], "Missing - Not found on YTS");
        assert_eq!(lines[1], "Bare - No magnet link found");
        assert_eq!(
            lines[2],
            "Rejected - Failed to add magnet link to Download Station: Max number of tasks reached"
        );
        assert!(lines[3].starts_with("Broken - IO error:"));

        assert_eq!(submitter.submitted().len(), 2);
    }

    #[tokio::test]
    async fn test_empty_list_completes() {
        let dir = TempDir::new().unwrap();
        let log_path = dir.path().join("failed.txt");
        let submitter = FakeSubmitter::default();
        let pipeline = Pipeline::new(FakeIndex, submitter.clone(), FailureLog::new(&log_path));

        let summary = pipeline.run(&[]).await.unwrap();
        assert_eq!(summary.total, 0);
        assert!(!log_path.exists());
    }

    #[tokio::test]
    async fn test_failure_log_write_error_aborts() {
        let dir = TempDir::new().unwrap();
        let submitter = FakeSubmitter::default();
        // A directory cannot be opened for appending
        let pipeline = Pipeline::new(FakeIndex, submitter.clone(), FailureLog::new(dir.path()))
            .with_delay(Duration::ZERO);

        let result = pipeline.run(&titles(&["Missing", "Heat"])).await;
        assert!(result.is_err());
        assert!(submitter.submitted().is_empty());
    }

    #[test]
    fn test_failure_reasons() {
        assert_eq!(TitleOutcome::Submitted.failure_reason("YTS"), None);
        assert_eq!(
            TitleOutcome::NotFound.failure_reason("YTS").as_deref(),
            Some("Not found on YTS")
        );
        assert_eq!(
            TitleOutcome::Failed("Login failed: Account disabled (code 401)".into())
                .failure_reason("YTS")
                .as_deref(),
            Some("Login failed: Account disabled (code 401)")
        );
    }
}
