use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The five stories a child can choose from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum StoryKind {
    Moses,
    WimpyKid,
    Tractor,
    RomeoJuliet,
    Treehouse,
}

impl StoryKind {
    /// Menu order.
    pub const ALL: [StoryKind; 5] = [
        Self::Moses,
        Self::WimpyKid,
        Self::Tractor,
        Self::RomeoJuliet,
        Self::Treehouse,
    ];

    /// The label shown in the story menu.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Moses => "Moses & Pharaoh",
            Self::WimpyKid => "Diary of a Wimpy Kid",
            Self::Tractor => "Time-Travelling Tractor",
            Self::RomeoJuliet => "Romeo & Juliet",
            Self::Treehouse => "The Treasure in the Treehouse",
        }
    }

    /// Short identifier, also the story file stem under `story_data/stories/`.
    pub fn slug(&self) -> &'static str {
        match self {
            Self::Moses => "moses",
            Self::WimpyKid => "wimpy_kid",
            Self::Tractor => "tractor",
            Self::RomeoJuliet => "romeo_juliet",
            Self::Treehouse => "treehouse",
        }
    }

    /// Accepts a slug, a full label (case-insensitive) or a 1-based menu number.
    pub fn parse(input: &str) -> Option<StoryKind> {
        let needle = input.trim();
        if let Ok(n) = needle.parse::<usize>() {
            return n.checked_sub(1).and_then(|i| Self::ALL.get(i).copied());
        }
        Self::ALL.iter().copied().find(|kind| {
            kind.slug().eq_ignore_ascii_case(needle) || kind.label().eq_ignore_ascii_case(needle)
        })
    }

    /// Uniform pick for the "surprise me" option.
    pub fn pick<R: Rng + ?Sized>(rng: &mut R) -> StoryKind {
        *Self::ALL.choose(rng).unwrap_or(&Self::Moses)
    }
}

impl fmt::Display for StoryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Reading-stats bucket a story counts towards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum StoryCategory {
    Adventure,
    Fantasy,
    Historical,
    Comedy,
    Drama,
}

impl StoryCategory {
    pub const ALL: [StoryCategory; 5] = [
        Self::Adventure,
        Self::Fantasy,
        Self::Historical,
        Self::Comedy,
        Self::Drama,
    ];
}

impl fmt::Display for StoryCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Adventure => "Adventure",
            Self::Fantasy => "Fantasy",
            Self::Historical => "Historical",
            Self::Comedy => "Comedy",
            Self::Drama => "Drama",
        };
        f.write_str(name)
    }
}
