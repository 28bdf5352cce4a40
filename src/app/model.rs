//! Application model types: `App`, input modes and the add-track draft.
//!
//! The `App` struct owns the catalog store, the current query parameters
//! and the selection. Mutations go through the store's editor and are only
//! attempted when the session's capabilities allow them.

use crate::access::Capabilities;
use crate::catalog::{CatalogStore, NewTrack, Track};
use crate::query::{self, DerivedView, QueryParams};

/// Which filter term keystrokes are edited into.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum FilterField {
    Search,
    Artist,
    Album,
}

impl FilterField {
    pub fn next(self) -> Self {
        match self {
            FilterField::Search => FilterField::Artist,
            FilterField::Artist => FilterField::Album,
            FilterField::Album => FilterField::Search,
        }
    }
}

/// Field of the add form that has focus.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
pub enum DraftField {
    #[default]
    Title,
    Artist,
    Album,
    Year,
}

impl DraftField {
    pub fn next(self) -> Self {
        match self {
            DraftField::Title => DraftField::Artist,
            DraftField::Artist => DraftField::Album,
            DraftField::Album => DraftField::Year,
            DraftField::Year => DraftField::Title,
        }
    }

    pub fn prev(self) -> Self {
        match self {
            DraftField::Title => DraftField::Year,
            DraftField::Artist => DraftField::Title,
            DraftField::Album => DraftField::Artist,
            DraftField::Year => DraftField::Album,
        }
    }
}

/// Raw text typed into the add form.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TrackDraft {
    pub title: String,
    pub artist: String,
    pub album: String,
    pub year: String,
    pub focus: DraftField,
}

impl TrackDraft {
    pub fn field(&self, field: DraftField) -> &str {
        match field {
            DraftField::Title => &self.title,
            DraftField::Artist => &self.artist,
            DraftField::Album => &self.album,
            DraftField::Year => &self.year,
        }
    }

    fn focused_mut(&mut self) -> &mut String {
        match self.focus {
            DraftField::Title => &mut self.title,
            DraftField::Artist => &mut self.artist,
            DraftField::Album => &mut self.album,
            DraftField::Year => &mut self.year,
        }
    }

    pub fn push_char(&mut self, c: char) {
        if self.focus == DraftField::Year && !(c.is_ascii_digit() || c == '-') {
            return;
        }
        self.focused_mut().push(c);
    }

    pub fn pop_char(&mut self) {
        self.focused_mut().pop();
    }

    /// Build the add payload. `None` when a required field is blank or the
    /// year is not a number; an empty year means "unknown".
    pub fn to_new_track(&self) -> Option<NewTrack> {
        let year = match self.year.trim() {
            "" => None,
            y => Some(y.parse::<i32>().ok()?),
        };
        NewTrack::new(&self.title, &self.artist, &self.album, year)
    }
}

/// What keystrokes currently act on.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
pub enum Mode {
    #[default]
    Browse,
    Filter(FilterField),
    AddTrack,
    ConfirmReset,
}

/// The main application model.
pub struct App {
    store: CatalogStore,
    pub capabilities: Capabilities,
    pub params: QueryParams,
    pub mode: Mode,
    pub draft: TrackDraft,
    /// Id of the highlighted track.
    pub selected: Option<String>,
    pub metadata_window: bool,
    /// One-line message shown in the status box until the next action.
    pub notice: Option<String>,
}

impl App {
    /// Create a new `App` over `store`, starting with `params`.
    pub fn new(store: CatalogStore, capabilities: Capabilities, params: QueryParams) -> Self {
        let mut app = Self {
            store,
            capabilities,
            params,
            mode: Mode::Browse,
            draft: TrackDraft::default(),
            selected: None,
            metadata_window: false,
            notice: None,
        };
        app.ensure_selected_visible();
        app
    }

    pub fn tracks(&self) -> &[Track] {
        self.store.tracks()
    }

    pub fn can_mutate(&self) -> bool {
        self.capabilities.can_mutate()
    }

    /// Run the query pipeline over the current catalog. Sessions without
    /// read access see an empty view.
    pub fn view(&self) -> DerivedView<'_> {
        if !self.capabilities.can_read() {
            return DerivedView::Flat(Vec::new());
        }
        query::run(self.store.tracks(), &self.params)
    }

    /// Ids of the tracks in the current view, in display order.
    pub fn visible_ids(&self) -> Vec<&str> {
        self.view().tracks().into_iter().map(|t| t.id.as_str()).collect()
    }

    pub fn selected_track(&self) -> Option<&Track> {
        self.selected.as_deref().and_then(|id| self.store.get(id))
    }

    pub fn toggle_metadata_window(&mut self) {
        self.metadata_window = !self.metadata_window;
    }

    pub fn clear_notice(&mut self) {
        self.notice = None;
    }

    fn select(&mut self, id: Option<&str>) {
        self.selected = id.map(str::to_string);
    }

    /// Keep `selected` inside the current view, otherwise move it to the
    /// first visible track.
    fn ensure_selected_visible(&mut self) {
        let first = {
            let visible = self.visible_ids();
            match self.selected.as_deref() {
                Some(id) if visible.contains(&id) => return,
                _ => visible.first().map(|s| s.to_string()),
            }
        };
        self.selected = first;
    }

    /// Move selection to the next visible track, wrapping to the first.
    pub fn next(&mut self) {
        let next = {
            let visible = self.visible_ids();
            if visible.is_empty() {
                None
            } else {
                let pos = self
                    .selected
                    .as_deref()
                    .and_then(|id| visible.iter().position(|&v| v == id));
                Some(match pos {
                    Some(p) => visible[(p + 1) % visible.len()].to_string(),
                    None => visible[0].to_string(),
                })
            }
        };
        self.selected = next;
    }

    /// Move selection to the previous visible track, wrapping to the last.
    pub fn prev(&mut self) {
        let prev = {
            let visible = self.visible_ids();
            if visible.is_empty() {
                None
            } else {
                let pos = self
                    .selected
                    .as_deref()
                    .and_then(|id| visible.iter().position(|&v| v == id));
                Some(match pos {
                    Some(0) | None => visible[visible.len() - 1].to_string(),
                    Some(p) => visible[p - 1].to_string(),
                })
            }
        };
        self.selected = prev;
    }

    pub fn select_first(&mut self) {
        let first = self.visible_ids().first().map(|s| s.to_string());
        self.selected = first;
    }

    pub fn select_last(&mut self) {
        let last = self.visible_ids().last().map(|s| s.to_string());
        self.selected = last;
    }

    /// Enter filter mode editing `field`.
    pub fn enter_filter_mode(&mut self, field: FilterField) {
        self.mode = Mode::Filter(field);
    }

    /// Leave filter mode keeping the typed terms.
    pub fn exit_filter_mode(&mut self) {
        self.mode = Mode::Browse;
    }

    /// Move editing to the next filter term.
    pub fn cycle_filter_field(&mut self) {
        if let Mode::Filter(field) = self.mode {
            self.mode = Mode::Filter(field.next());
        }
    }

    fn filter_term_mut(&mut self) -> Option<&mut String> {
        match self.mode {
            Mode::Filter(FilterField::Search) => Some(&mut self.params.search),
            Mode::Filter(FilterField::Artist) => Some(&mut self.params.artist),
            Mode::Filter(FilterField::Album) => Some(&mut self.params.album),
            _ => None,
        }
    }

    /// Append a character to the term being edited and refresh the view.
    pub fn push_filter_char(&mut self, c: char) {
        if let Some(term) = self.filter_term_mut() {
            term.push(c);
        }
        self.ensure_selected_visible();
    }

    /// Remove the last character of the term being edited and refresh the view.
    pub fn pop_filter_char(&mut self) {
        if let Some(term) = self.filter_term_mut() {
            term.pop();
        }
        self.ensure_selected_visible();
    }

    /// Clear the term being edited and leave filter mode.
    pub fn clear_filter_field(&mut self) {
        if let Some(term) = self.filter_term_mut() {
            term.clear();
        }
        self.mode = Mode::Browse;
        self.ensure_selected_visible();
    }

    /// Clear all three filter terms.
    pub fn clear_filters(&mut self) {
        self.params.clear_filters();
        self.ensure_selected_visible();
    }

    pub fn cycle_sort_key(&mut self) {
        self.params.sort_key = self.params.sort_key.cycle();
    }

    pub fn toggle_sort_direction(&mut self) {
        self.params.direction = self.params.direction.toggle();
    }

    pub fn cycle_group_by(&mut self) {
        self.params.group_by = self.params.group_by.cycle();
    }

    /// Open an empty add form. Read-only sessions stay in browse mode.
    pub fn open_add_form(&mut self) {
        if !self.can_mutate() {
            return;
        }
        self.draft = TrackDraft::default();
        self.mode = Mode::AddTrack;
    }

    pub fn cancel_add_form(&mut self) {
        self.draft = TrackDraft::default();
        self.mode = Mode::Browse;
    }

    /// Add the drafted track. Returns `false` (and keeps the form open) when
    /// the draft is incomplete or the session cannot mutate.
    pub fn submit_draft(&mut self) -> bool {
        let Some(new) = self.draft.to_new_track() else {
            self.notice = Some("title, artist and album are required; year must be a number".into());
            return false;
        };
        let Some(mut editor) = self.store.editor(self.capabilities) else {
            return false;
        };

        let added = editor.add(new).last().map(|t| t.id.clone());
        self.draft = TrackDraft::default();
        self.mode = Mode::Browse;
        self.notice = None;

        // The new track may be hidden by the active filters.
        self.select(added.as_deref());
        self.ensure_selected_visible();
        true
    }

    /// Delete the highlighted track and move selection to its neighbour.
    pub fn delete_selected(&mut self) -> bool {
        let Some(id) = self.selected.clone() else {
            return false;
        };

        let neighbour = {
            let visible = self.visible_ids();
            visible.iter().position(|&v| v == id).and_then(|p| {
                visible
                    .get(p + 1)
                    .or_else(|| p.checked_sub(1).and_then(|q| visible.get(q)))
                    .map(|s| s.to_string())
            })
        };

        let Some(mut editor) = self.store.editor(self.capabilities) else {
            return false;
        };
        editor.delete(&id);

        self.selected = neighbour;
        self.ensure_selected_visible();
        true
    }

    /// Ask for confirmation before a reset.
    pub fn request_reset(&mut self) {
        if self.can_mutate() {
            self.mode = Mode::ConfirmReset;
        }
    }

    pub fn cancel_reset(&mut self) {
        self.mode = Mode::Browse;
    }

    /// Replace the catalog with the seed collection.
    pub fn confirm_reset(&mut self) -> bool {
        self.mode = Mode::Browse;
        let Some(mut editor) = self.store.editor(self.capabilities) else {
            return false;
        };
        editor.reset();
        self.notice = Some("catalog reset to the default tracks".into());
        self.ensure_selected_visible();
        true
    }
}
