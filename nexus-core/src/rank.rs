//! Rank progression derived from the number of completed tasks.
//!
//! Nothing here is stored. Every call recomputes the badge from the current
//! completed count, so deleting completed tasks can move a rank backwards.

/// Completed tasks per level.
pub const LEVEL_SPAN: u32 = 5;

/// Cosmetic tier, ordered from lowest to highest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Rank {
    /// Starting rank.
    Bronze,
    /// 5 completed tasks.
    Silver,
    /// 15 completed tasks.
    Gold,
    /// 30 completed tasks.
    Platinum,
    /// 50 completed tasks.
    Diamond,
}

impl Rank {
    /// All ranks in ascending threshold order.
    pub const ALL: [Self; 5] = [
        Self::Bronze,
        Self::Silver,
        Self::Gold,
        Self::Platinum,
        Self::Diamond,
    ];

    /// Minimum completed count needed to hold this rank.
    #[must_use]
    pub const fn min_completed(self) -> u32 {
        match self {
            Self::Bronze => 0,
            Self::Silver => 5,
            Self::Gold => 15,
            Self::Platinum => 30,
            Self::Diamond => 50,
        }
    }

    /// Display name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Bronze => "Bronze",
            Self::Silver => "Silver",
            Self::Gold => "Gold",
            Self::Platinum => "Platinum",
            Self::Diamond => "Diamond",
        }
    }

    /// Features "unlocked" at this rank, shown on rank-up.
    #[must_use]
    pub const fn rewards(self) -> &'static [&'static str] {
        match self {
            Self::Bronze => &["Basic Task Tracker", "Simple Statistics"],
            Self::Silver => &["Advanced Analytics", "Priority Filtering", "Search Function"],
            Self::Gold => &["Custom Categories", "Export Data", "Progress Charts"],
            Self::Platinum => &["Team Collaboration", "Advanced Reports", "API Access"],
            Self::Diamond => &[
                "Unlimited Features",
                "Priority Support",
                "Custom Themes",
                "Advanced AI Assistant",
            ],
        }
    }

    /// Highest rank whose threshold is at or below `completed`.
    #[must_use]
    pub fn for_completed(completed: u32) -> Self {
        Self::ALL
            .into_iter()
            .rev()
            .find(|rank| completed >= rank.min_completed())
            .unwrap_or(Self::Bronze)
    }

    /// The rank above this one, if any.
    #[must_use]
    pub fn next(self) -> Option<Self> {
        Self::ALL.into_iter().find(|rank| *rank > self)
    }
}

impl std::fmt::Display for Rank {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Badge state for a given completed count.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RankState {
    /// Current tier.
    pub rank: Rank,
    /// `completed / 5 + 1`.
    pub level: u32,
    /// `completed % 5`.
    pub xp_current: u32,
    /// Always [`LEVEL_SPAN`].
    pub xp_to_next: u32,
    /// The completed count this state was derived from.
    pub total_completed: u32,
}

impl RankState {
    /// Derives the badge from the number of completed tasks.
    #[must_use]
    pub fn derive(completed: u32) -> Self {
        Self {
            rank: Rank::for_completed(completed),
            level: completed / LEVEL_SPAN + 1,
            xp_current: completed % LEVEL_SPAN,
            xp_to_next: LEVEL_SPAN,
            total_completed: completed,
        }
    }

    /// Progress through the current level, 0–100.
    #[must_use]
    pub const fn progress_percent(&self) -> u32 {
        if self.xp_to_next == 0 {
            return 0;
        }
        self.xp_current * 100 / self.xp_to_next
    }

    /// The next rank and how many more completions it takes, or `None` at
    /// the top rank.
    #[must_use]
    pub fn next_rank(&self) -> Option<(Rank, u32)> {
        let next = self.rank.next()?;
        Some((
            next,
            next.min_completed().saturating_sub(self.total_completed),
        ))
    }
}

impl Default for RankState {
    fn default() -> Self {
        Self::derive(0)
    }
}

/// Outcome of re-deriving the badge after a change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RankUpdate {
    /// Freshly derived state.
    pub state: RankState,
    /// True if `state.rank` is above the previous rank.
    pub rank_increased: bool,
}

/// Re-derives the badge and reports whether the rank went up.
///
/// A drop in rank is reflected in `state` but never flagged.
#[must_use]
pub fn evaluate(previous: Rank, completed: u32) -> RankUpdate {
    let state = RankState::derive(completed);
    RankUpdate {
        state,
        rank_increased: state.rank > previous,
    }
}
