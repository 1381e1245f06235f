/// One of the two opposing teams a player joins.
///
/// Factions share the board rather than alternating turns; balance is
/// enforced at join time, not per move.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Faction {
    Red,
    Yellow,
}

impl Faction {
    /// Both factions in canonical order.
    pub const fn all() -> [Self; 2] {
        [Self::Red, Self::Yellow]
    }
    /// The opposing faction.
    pub const fn rival(&self) -> Self {
        match self {
            Self::Red => Self::Yellow,
            Self::Yellow => Self::Red,
        }
    }
}

impl TryFrom<&str> for Faction {
    type Error = String;
    fn try_from(s: &str) -> Result<Self, Self::Error> {
        match s.trim().to_lowercase().as_str() {
            "red" | "r" => Ok(Self::Red),
            "yellow" | "y" => Ok(Self::Yellow),
            _ => Err(format!("invalid faction str: {}", s)),
        }
    }
}

impl std::fmt::Display for Faction {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Self::Red => write!(f, "red"),
            Self::Yellow => write!(f, "yellow"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    #[test]
    fn rivals_are_mutual() {
        for faction in Faction::all() {
            assert_eq!(faction.rival().rival(), faction);
            assert_ne!(faction.rival(), faction);
        }
    }
    #[test]
    fn parses_from_str() {
        assert_eq!(Faction::try_from("red"), Ok(Faction::Red));
        assert_eq!(Faction::try_from(" Yellow "), Ok(Faction::Yellow));
        assert!(Faction::try_from("blue").is_err());
    }
}
