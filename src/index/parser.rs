//! Markup-dependent parsing for the index's browse and movie pages.

use super::quality::ReleaseBlock;
use reqwest::Url;
use scraper::{Html, Selector};
use std::sync::LazyLock;

static RESULT_LINK: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse(".browse-movie-wrap a").expect("valid result selector"));
static RELEASE_BLOCK: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse(".modal-torrent").expect("valid release selector"));
static MAGNET_LINK: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse(r#"a[href^="magnet:"]"#).expect("valid magnet selector"));

/// First result link of a browse page, resolved against `base`
pub fn parse_search_result(html: &str, base: &Url) -> Option<Url> {
    let document = Html::parse_document(html);
    let href = document
        .select(&RESULT_LINK)
        .next()?
        .value()
        .attr("href")?;

    base.join(href.trim()).ok()
}

/// All release blocks of a movie page, in document order
pub fn parse_release_blocks(html: &str) -> Vec<ReleaseBlock> {
    let document = Html::parse_document(html);

    document
        .select(&RELEASE_BLOCK)
        .map(|element| {
            let text: String = element.text().collect();
            let magnet = element
                .select(&MAGNET_LINK)
                .next()
                .and_then(|a| a.value().attr("href"))
                .map(str::to_string);
            ReleaseBlock::new(text, magnet)
        })
        .collect()
}
