/// Qualitative label derived from a score percentage.
///
/// Thresholds are evaluated top-down and never overlap:
/// - `PmAce`: 90 and above
/// - `StrongBuilder`: 75 to 89
/// - `SolidStart`: 50 to 74
/// - `KeepGoing`: below 50
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Badge {
    PmAce,
    StrongBuilder,
    SolidStart,
    KeepGoing,
}

impl Badge {
    #[must_use]
    pub fn for_percent(percent: u32) -> Self {
        match percent {
            90.. => Self::PmAce,
            75..=89 => Self::StrongBuilder,
            50..=74 => Self::SolidStart,
            _ => Self::KeepGoing,
        }
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Badge::PmAce => "PM Ace",
            Badge::StrongBuilder => "Strong Builder",
            Badge::SolidStart => "Solid Start",
            Badge::KeepGoing => "Keep Going",
        }
    }

    #[must_use]
    pub fn emoji(self) -> &'static str {
        match self {
            Badge::PmAce => "🏆",
            Badge::StrongBuilder => "🚀",
            Badge::SolidStart => "✅",
            Badge::KeepGoing => "💪",
        }
    }

    /// Colour family used by the UI for pills and headings.
    #[must_use]
    pub fn tone(self) -> &'static str {
        match self {
            Badge::PmAce => "amber",
            Badge::StrongBuilder => "indigo",
            Badge::SolidStart => "emerald",
            Badge::KeepGoing => "slate",
        }
    }
}

#[must_use]
pub fn badge_for(percent: u32) -> Badge {
    Badge::for_percent(percent)
}
