use std::cmp::Ordering;
use std::fmt;

/// Video resolution tiers offered by the index
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Quality {
    Uhd2160,
    Fhd1080,
    Hd720,
}

impl Quality {
    /// Tiers in order of preference, best first
    pub const PREFERENCE: [Quality; 3] = [Quality::Uhd2160, Quality::Fhd1080, Quality::Hd720];

    pub fn label(self) -> &'static str {
        match self {
            Quality::Uhd2160 => "2160p",
            Quality::Fhd1080 => "1080p",
            Quality::Hd720 => "720p",
        }
    }

    /// Position in [`Quality::PREFERENCE`]; lower is better
    pub fn rank(self) -> usize {
        match self {
            Quality::Uhd2160 => 0,
            Quality::Fhd1080 => 1,
            Quality::Hd720 => 2,
        }
    }
}

impl fmt::Display for Quality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// One release entry scraped from a movie page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReleaseBlock {
    pub text: String,
    pub magnet: Option<String>,
}

impl ReleaseBlock {
    pub fn new(text: impl Into<String>, magnet: Option<String>) -> Self {
        Self {
            text: text.into(),
            magnet,
        }
    }

    pub fn mentions(&self, quality: Quality) -> bool {
        self.text.contains(quality.label())
    }
}

/// A usable magnet for a given tier, tagged with its block's document position
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate<'a> {
    pub quality: Quality,
    pub position: usize,
    pub magnet: &'a str,
}

/// Order candidates best first: higher tier wins, then earlier position in the page
pub fn preference(a: &Candidate<'_>, b: &Candidate<'_>) -> Ordering {
    a.quality
        .rank()
        .cmp(&b.quality.rank())
        .then(a.position.cmp(&b.position))
}

impl PartialOrd for Candidate<'_> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Candidate<'_> {
    fn cmp(&self, other: &Self) -> Ordering {
        preference(self, other)
    }
}

/// Pair every tier with the blocks that mention it and carry a magnet.
///
/// A block mentioning several labels yields one candidate per tier.
pub fn candidates(blocks: &[ReleaseBlock]) -> Vec<Candidate<'_>> {
    Quality::PREFERENCE
        .iter()
        .flat_map(|&quality| {
            blocks
                .iter()
                .enumerate()
                .filter(move |(_, block)| block.mentions(quality))
                .filter_map(move |(position, block)| {
                    block.magnet.as_deref().map(|magnet| Candidate {
                        quality,
                        position,
                        magnet,
                    })
                })
        })
        .collect()
}

/// Best magnet across all blocks, or `None` when no tier has one
pub fn select_best(blocks: &[ReleaseBlock]) -> Option<Candidate<'_>> {
    candidates(blocks).into_iter().min()
}
