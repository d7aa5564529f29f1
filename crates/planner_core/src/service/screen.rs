use std::fmt::{Display, Formatter};

/// Screens that own a controller instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Screen {
    /// Today's tasks with completion statistics.
    Today,
    /// Calendar-driven task planning for any date.
    Planner,
    /// Goal list with progress counters.
    Goals,
}

impl Screen {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Today => "today",
            Self::Planner => "planner",
            Self::Goals => "goals",
        }
    }
}

impl Display for Screen {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
