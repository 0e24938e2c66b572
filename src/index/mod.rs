pub mod parser;
pub mod quality;
pub mod yts;

pub use quality::{Candidate, Quality, ReleaseBlock};
pub use yts::YtsIndex;

use crate::error::Result;
use async_trait::async_trait;

/// A torrent index that can be searched by title.
///
/// Implementations hide all site-specific markup handling. "Nothing found"
/// is `Ok(None)`; only transport problems are errors.
#[async_trait]
pub trait MovieIndex: Send + Sync {
    /// Short site name used in operator messages
    fn name(&self) -> &str;

    /// URL of the first result page for `title`
    async fn search(&self, title: &str) -> Result<Option<String>>;

    /// Magnet URI of the best quality release on a result page
    async fn best_magnet(&self, page_url: &str) -> Result<Option<String>>;
}
