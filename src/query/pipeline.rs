use std::cmp::Ordering;
use std::collections::HashMap;

use crate::catalog::Track;

use super::params::{GroupKey, QueryParams, SortDirection, SortKey};

/// Tracks sharing one album or artist value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackGroup<'a> {
    pub label: &'a str,
    pub tracks: Vec<&'a Track>,
}

/// Result of running the pipeline over a catalog snapshot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DerivedView<'a> {
    Flat(Vec<&'a Track>),
    /// Groups in the order their first member appears in the sorted sequence.
    Grouped(Vec<TrackGroup<'a>>),
}

impl<'a> DerivedView<'a> {
    /// All tracks in display order, groups flattened.
    pub fn tracks(&self) -> Vec<&'a Track> {
        match self {
            DerivedView::Flat(tracks) => tracks.clone(),
            DerivedView::Grouped(groups) => groups
                .iter()
                .flat_map(|g| g.tracks.iter().copied())
                .collect(),
        }
    }

    pub fn len(&self) -> usize {
        match self {
            DerivedView::Flat(tracks) => tracks.len(),
            DerivedView::Grouped(groups) => groups.iter().map(|g| g.tracks.len()).sum(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn contains_ci(haystack: &str, needle_lower: &str) -> bool {
    haystack.to_lowercase().contains(needle_lower)
}

/// Stage 1: keep tracks matching every non-empty term, case-insensitively.
pub fn filter<'a>(tracks: &'a [Track], params: &QueryParams) -> Vec<&'a Track> {
    let search = params.search.to_lowercase();
    let artist = params.artist.to_lowercase();
    let album = params.album.to_lowercase();

    tracks
        .iter()
        .filter(|t| {
            search.is_empty()
                || format!("{}{}{}", t.title, t.artist, t.album)
                    .to_lowercase()
                    .contains(&search)
        })
        .filter(|t| artist.is_empty() || contains_ci(&t.artist, &artist))
        .filter(|t| album.is_empty() || contains_ci(&t.album, &album))
        .collect()
}

/// Compare two tracks on `key`. Text compares case-sensitively; a missing
/// year sorts below any present one.
pub fn compare(a: &Track, b: &Track, key: SortKey) -> Ordering {
    match key {
        SortKey::Title => a.title.cmp(&b.title),
        SortKey::Artist => a.artist.cmp(&b.artist),
        SortKey::Album => a.album.cmp(&b.album),
        SortKey::Year => a.year.cmp(&b.year),
    }
}

/// Stage 2: stable sort, so equal keys keep their filtered order in either
/// direction.
pub fn sort(tracks: &mut [&Track], key: SortKey, direction: SortDirection) {
    tracks.sort_by(|a, b| {
        let ord = compare(a, b, key);
        match direction {
            SortDirection::Ascending => ord,
            SortDirection::Descending => ord.reverse(),
        }
    });
}

fn group_label(track: &Track, key: GroupKey) -> Option<&str> {
    match key {
        GroupKey::None => None,
        GroupKey::Album => Some(track.album.as_str()),
        GroupKey::Artist => Some(track.artist.as_str()),
    }
}

/// Stage 3: partition an already sorted sequence.
pub fn group<'a>(sorted: Vec<&'a Track>, key: GroupKey) -> DerivedView<'a> {
    if key == GroupKey::None {
        return DerivedView::Flat(sorted);
    }

    let mut groups: Vec<TrackGroup<'a>> = Vec::new();
    let mut slots: HashMap<&'a str, usize> = HashMap::new();

    for track in sorted {
        let Some(label) = group_label(track, key) else {
            continue;
        };
        let slot = *slots.entry(label).or_insert_with(|| {
            groups.push(TrackGroup {
                label,
                tracks: Vec::new(),
            });
            groups.len() - 1
        });
        groups[slot].tracks.push(track);
    }

    DerivedView::Grouped(groups)
}

/// Run filter, sort and group over `tracks`.
pub fn run<'a>(tracks: &'a [Track], params: &QueryParams) -> DerivedView<'a> {
    let mut selected = filter(tracks, params);
    sort(&mut selected, params.sort_key, params.direction);
    group(selected, params.group_by)
}
