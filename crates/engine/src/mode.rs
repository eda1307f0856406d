use serde::{Deserialize, Serialize};

/// The current actor-set filter, cycled by a user toggle action.
///
/// The cycle order is fixed: all, then visible-only, then hidden-only,
/// then back to all. No mode is reachable any other way.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DisplayMode {
    ShowAll,
    #[default]
    ShowVisible,
    ShowHidden,
}

impl DisplayMode {
    /// The next mode in the toggle cycle.
    pub fn cycle(self) -> Self {
        match self {
            DisplayMode::ShowAll => DisplayMode::ShowVisible,
            DisplayMode::ShowVisible => DisplayMode::ShowHidden,
            DisplayMode::ShowHidden => DisplayMode::ShowAll,
        }
    }

    /// The previous mode in the toggle cycle.
    pub fn cycle_back(self) -> Self {
        match self {
            DisplayMode::ShowAll => DisplayMode::ShowHidden,
            DisplayMode::ShowVisible => DisplayMode::ShowAll,
            DisplayMode::ShowHidden => DisplayMode::ShowVisible,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            DisplayMode::ShowAll => "SHOW_ALL",
            DisplayMode::ShowVisible => "SHOW_VISIBLE",
            DisplayMode::ShowHidden => "SHOW_HIDDEN",
        }
    }
}

impl std::fmt::Display for DisplayMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cycle_wraps_in_fixed_order() {
        let mut mode = DisplayMode::ShowAll;
        let mut seen = Vec::new();
        for _ in 0..4 {
            seen.push(mode);
            mode = mode.cycle();
        }
        assert_eq!(
            seen,
            [
                DisplayMode::ShowAll,
                DisplayMode::ShowVisible,
                DisplayMode::ShowHidden,
                DisplayMode::ShowAll,
            ]
        );
    }

    #[test]
    fn test_cycle_back_inverts_cycle() {
        for mode in [DisplayMode::ShowAll, DisplayMode::ShowVisible, DisplayMode::ShowHidden] {
            assert_eq!(mode.cycle().cycle_back(), mode);
        }
    }

    #[test]
    fn test_default_is_visible_only() {
        assert_eq!(DisplayMode::default(), DisplayMode::ShowVisible);
    }

    #[test]
    fn test_serializes_as_screaming_snake() {
        let json = serde_json::to_string(&DisplayMode::ShowHidden).unwrap();
        assert_eq!(json, "\"SHOW_HIDDEN\"");
    }
}
