use serde::Deserialize;

/// Field the derived view is ordered by.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SortKey {
    #[default]
    Title,
    Artist,
    Album,
    Year,
}

impl SortKey {
    /// Next key in `Title -> Artist -> Album -> Year -> Title`.
    pub fn cycle(self) -> Self {
        match self {
            SortKey::Title => SortKey::Artist,
            SortKey::Artist => SortKey::Album,
            SortKey::Album => SortKey::Year,
            SortKey::Year => SortKey::Title,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            SortKey::Title => "Title",
            SortKey::Artist => "Artist",
            SortKey::Album => "Album",
            SortKey::Year => "Year",
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SortDirection {
    #[default]
    #[serde(alias = "asc")]
    Ascending,
    #[serde(alias = "desc")]
    Descending,
}

impl SortDirection {
    pub fn toggle(self) -> Self {
        match self {
            SortDirection::Ascending => SortDirection::Descending,
            SortDirection::Descending => SortDirection::Ascending,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            SortDirection::Ascending => "Asc",
            SortDirection::Descending => "Desc",
        }
    }
}

/// Field tracks are partitioned by, if any.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum GroupKey {
    #[default]
    #[serde(alias = "")]
    None,
    Album,
    Artist,
}

impl GroupKey {
    /// Next grouping in `None -> Album -> Artist -> None`.
    pub fn cycle(self) -> Self {
        match self {
            GroupKey::None => GroupKey::Album,
            GroupKey::Album => GroupKey::Artist,
            GroupKey::Artist => GroupKey::None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            GroupKey::None => "No Group",
            GroupKey::Album => "Album",
            GroupKey::Artist => "Artist",
        }
    }
}

/// Transient filter, sort and grouping state. Empty filter terms match
/// everything.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct QueryParams {
    /// Matched against title, artist and album run together.
    pub search: String,
    pub artist: String,
    pub album: String,
    pub sort_key: SortKey,
    pub direction: SortDirection,
    pub group_by: GroupKey,
}

impl QueryParams {
    /// True when any of the three filter terms is set.
    pub fn has_filters(&self) -> bool {
        !self.search.is_empty() || !self.artist.is_empty() || !self.album.is_empty()
    }

    pub fn clear_filters(&mut self) {
        self.search.clear();
        self.artist.clear();
        self.album.clear();
    }
}
