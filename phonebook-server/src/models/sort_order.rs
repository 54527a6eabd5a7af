use std::cmp::Ordering;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SortOrder {
    #[default]
    Ascending,
    Descending,
}

impl SortOrder {
    pub fn from_reverse(reverse: bool) -> Self {
        if reverse {
            SortOrder::Descending
        } else {
            SortOrder::Ascending
        }
    }

    /// Accepts `desc`, `descending` and `reverse`, anything else is ascending
    pub fn from_name(name: &str) -> Self {
        match name.trim().to_lowercase().as_str() {
            "desc" | "descending" | "reverse" => SortOrder::Descending,
            _ => SortOrder::Ascending,
        }
    }

    /// Equal elements stay equal, so stable sorts keep their relative order both ways
    pub fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            SortOrder::Ascending => ordering,
            SortOrder::Descending => ordering.reverse(),
        }
    }
}
