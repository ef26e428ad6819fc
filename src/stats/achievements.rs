use super::ProfileStats;

/// A badge shown next to the quick stats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Achievement {
    ExperiencedDeveloper,
    RisingStar,
    ProjectMaster,
    FastLearner,
    CommunityBuilder,
    TeamPlayer,
}

impl Achievement {
    pub fn icon(self) -> &'static str {
        match self {
            Achievement::ExperiencedDeveloper => "★",
            Achievement::RisingStar | Achievement::FastLearner => "🚀",
            Achievement::ProjectMaster => "🏆",
            Achievement::CommunityBuilder | Achievement::TeamPlayer => "👥",
        }
    }
}

impl std::fmt::Display for Achievement {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            Achievement::ExperiencedDeveloper => "Experienced Developer",
            Achievement::RisingStar => "Rising Star",
            Achievement::ProjectMaster => "Project Master",
            Achievement::FastLearner => "Fast Learner",
            Achievement::CommunityBuilder => "Community Builder",
            Achievement::TeamPlayer => "Team Player",
        };
        write!(f, "{label}")
    }
}

/// Pick one badge per dimension: experience, project count, followers.
pub fn achievements(stats: &ProfileStats) -> [Achievement; 3] {
    let experience = if stats.experience_years >= 3 {
        Achievement::ExperiencedDeveloper
    } else {
        Achievement::RisingStar
    };
    let projects = if stats.projects >= 20 {
        Achievement::ProjectMaster
    } else {
        Achievement::FastLearner
    };
    let community = if stats.followers >= 10 {
        Achievement::CommunityBuilder
    } else {
        Achievement::TeamPlayer
    };
    [experience, projects, community]
}
