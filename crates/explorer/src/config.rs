use std::path::PathBuf;

use analysis::DEFAULT_BIN_WIDTH;

/// Thresholds and lookup targets of one exploration run
#[derive(Debug, Clone, PartialEq)]
pub struct ExplorerConfig {
    /// Movies need strictly more ratings than this to count as popular
    pub min_ratings: u32,
    pub tags_title: String,
    pub mean_title: String,
    pub distribution_title: String,
    pub genre: String,
    pub top_n: usize,
    /// 0-based rank within `genre` by rating count
    pub genre_rank: usize,
    /// Where the distribution chart goes; `None` skips rendering
    pub chart_path: Option<PathBuf>,
    pub bin_width: f64,
}

impl Default for ExplorerConfig {
    fn default() -> Self {
        Self {
            min_ratings: 50,
            tags_title: "Matrix, The (1999)".to_string(),
            mean_title: "Terminator 2: Judgment Day (1991)".to_string(),
            distribution_title: "Fight Club (1999)".to_string(),
            genre: "Sci-Fi".to_string(),
            top_n: 5,
            genre_rank: 2,
            chart_path: Some(PathBuf::from("fight_club_ratings.svg")),
            bin_width: DEFAULT_BIN_WIDTH,
        }
    }
}
