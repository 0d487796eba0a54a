use serde::{Deserialize, Serialize};

/// Display state of a single calendar week. Recomputed on every run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WeekStatus {
    /// Outside every evaluated window; nothing is rendered.
    Ignored,
    /// Meets the weekly minimum but sits in a window that is still failing.
    Pending,
    Compliant,
    Invalid,
}

impl WeekStatus {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Ignored => "",
            Self::Pending => "Pending",
            Self::Compliant => "Compliant",
            Self::Invalid => "Invalid",
        }
    }
}

/// Facts about one week that decide its status.
pub(crate) struct StatusFacts {
    pub(crate) evaluated: bool,
    pub(crate) week_compliant: bool,
    pub(crate) windows_compliant: bool,
    pub(crate) is_worst_week: bool,
}

/// First matching rule wins. The weekly check must run before any window
/// outcome: a week below the minimum is invalid even inside a passing window.
pub(crate) fn resolve(facts: StatusFacts) -> WeekStatus {
    if !facts.evaluated {
        return WeekStatus::Ignored;
    }

    if !facts.week_compliant {
        return WeekStatus::Invalid;
    }

    if facts.windows_compliant {
        return WeekStatus::Compliant;
    }

    if facts.is_worst_week {
        return WeekStatus::Invalid;
    }

    WeekStatus::Pending
}
