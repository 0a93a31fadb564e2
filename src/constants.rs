//! Configuration constants for the roulette game
//!
//! This module contains the fixed limits, option sets and tuning values
//! used throughout the game core so that every component agrees on the
//! same boundaries.

/// Category wheel constants
pub mod wheel {
    /// Duration of a full spin animation in milliseconds
    pub const SPIN_DURATION_MS: u64 = 8_000;
    /// Minimum number of whole turns before the wheel settles
    pub const SPIN_LOOPS: u32 = 5;
    /// Share of a segment, on each side, kept free of landing points
    pub const LANDING_MARGIN: f64 = 0.1;
    /// Degrees in a full turn
    pub const FULL_TURN: f64 = 360.0;
}

/// Category and word constants
pub mod category {
    /// Maximum length of a category name in characters
    pub const MAX_NAME_LENGTH: usize = 40;
    /// Maximum length of a single word in characters
    pub const MAX_WORD_LENGTH: usize = 60;
    /// Maximum number of words a category can hold
    pub const MAX_WORD_COUNT: usize = 500;
    /// Maximum number of categories
    pub const MAX_CATEGORY_COUNT: usize = 64;
}

/// Participant constants
pub mod participant {
    /// Maximum length of a team or player name in characters
    pub const MAX_NAME_LENGTH: usize = 30;
    /// Colors handed out to participants in creation order
    pub const PALETTE: [&str; 8] = [
        "#ef4444", "#3b82f6", "#22c55e", "#eab308", "#a855f7", "#ec4899", "#14b8a6", "#f97316",
    ];
}

/// Countdown constants
pub mod timer {
    /// Round durations the host can choose from, in seconds
    pub const CHOICES: [u64; 4] = [30, 60, 90, 120];
    /// Remaining seconds at or below which every tick plays a warning cue
    pub const WARNING_SECONDS: u64 = 5;
}

/// Scoring constants
pub mod scoring {
    /// Winning thresholds the host can choose from (0 disables the win condition)
    pub const WINNING_SCORES: [u64; 5] = [0, 5, 10, 15, 20];
    /// Total points between two leader announcements
    pub const MILESTONE_INTERVAL: u64 = 5;
}

/// Text and image generation constants
pub mod generation {
    /// Number of image requests issued for each drawn word
    pub const IMAGE_ATTEMPTS: usize = 3;
    /// Longest generated message accepted before falling back
    pub const MAX_MESSAGE_LENGTH: usize = 280;
    /// Prefix every accepted image payload must start with
    pub const IMAGE_PAYLOAD_PREFIX: &str = "data:image/";
}

/// Keys used in the persistent store
pub mod storage {
    /// Category list (JSON array of categories)
    pub const CATEGORIES_KEY: &str = "pictionary_categories";
    /// Participant list (JSON array of participants)
    pub const PARTICIPANTS_KEY: &str = "pictionary_teams";
    /// Selected game mode (JSON string)
    pub const MODE_KEY: &str = "pictionary_game_mode";
    /// AI image preference (JSON boolean)
    pub const AI_IMAGES_KEY: &str = "pictionary_ai_images";
}
