use serde::{Deserialize, Serialize};

/// Closed set of spending categories. Serialized by exact variant name.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    #[default]
    Groceries,
    Transport,
    Rent,
    Utilities,
    Shopping,
    Entertainment,
    Other,
}

impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Groceries => "Groceries",
            Self::Transport => "Transport",
            Self::Rent => "Rent",
            Self::Utilities => "Utilities",
            Self::Shopping => "Shopping",
            Self::Entertainment => "Entertainment",
            Self::Other => "Other",
        }
    }

    /// Case-insensitive lookup. Unknown names are rejected rather than mapped to `Other`.
    pub fn parse(s: &str) -> Option<Self> {
        let lower = s.trim().to_lowercase();
        Self::all()
            .iter()
            .copied()
            .find(|c| c.as_str().to_lowercase() == lower)
    }

    pub fn all() -> &'static [Category] {
        &[
            Self::Groceries,
            Self::Transport,
            Self::Rent,
            Self::Utilities,
            Self::Shopping,
            Self::Entertainment,
            Self::Other,
        ]
    }

    /// Next category in `all()` order, wrapping around. Used by the form's category picker.
    pub fn next(self) -> Self {
        let all = Self::all();
        let idx = all.iter().position(|c| *c == self).unwrap_or(0);
        all[(idx + 1) % all.len()]
    }

    pub fn prev(self) -> Self {
        let all = Self::all();
        let idx = all.iter().position(|c| *c == self).unwrap_or(0);
        if idx == 0 {
            all[all.len() - 1]
        } else {
            all[idx - 1]
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
