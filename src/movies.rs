use crate::error::{Error, Result};
use std::fs;
use std::path::Path;
use tracing::debug;

/// Read a newline separated movie list.
///
/// Lines are trimmed and blank lines dropped; order and duplicates are kept.
pub fn read_movie_list(path: &Path) -> Result<Vec<String>> {
    if !path.is_file() {
        return Err(Error::FileNotFound(path.to_path_buf()));
    }

    let content = fs::read_to_string(path)?;
    let movies = parse_movie_list(&content);

    debug!("Read {} titles from {:?}", movies.len(), path);
    Ok(movies)
}

pub fn parse_movie_list(content: &str) -> Vec<String> {
    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}
