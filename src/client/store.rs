//! Client state and its reducer.
//!
//! State transitions: `Uninitialized → Loading → {Loaded | LoadFailed}`.
//! From `Loaded`, browsing (no selection) and inspecting (one selection) are
//! mutually exclusive; tag-filter changes are permitted in either.
//!
//! `filtered_examples` is derived, never mutated directly: the host loop
//! calls [`refresh_filtered`] after every reduce, which keeps the invariant
//! that it equals the subset of `examples` whose tag set is a superset of
//! `selected_tags` (all of `examples` when no tags are selected), and stays
//! empty until the first successful load.

use crate::catalog::{ExampleRecord, FALLBACK_LANG};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

// ============================================================================
// Options
// ============================================================================

/// Immutable load-time configuration, supplied once at initialization.
///
/// Serialized camelCase: this is the shape the index page hands to a
/// rendering collaborator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientOptions {
    /// Catalog server base URL.
    #[serde(default)]
    pub base_url: String,
    /// Callback URL receiving the selected example's source.
    #[serde(default)]
    pub callback_url: String,
    /// Initially selected filter tags.
    #[serde(default)]
    pub tags: Vec<String>,
    /// UI language, possibly with a region subtag (`fr-FR`).
    #[serde(default = "default_lang")]
    pub lang: String,
    /// Navigation target context for the launch effect.
    #[serde(default = "default_target")]
    pub target: String,
}

fn default_lang() -> String {
    FALLBACK_LANG.to_string()
}

fn default_target() -> String {
    "_blank".to_string()
}

impl Default for ClientOptions {
    fn default() -> Self {
        Self {
            base_url: String::new(),
            callback_url: String::new(),
            tags: Vec::new(),
            lang: default_lang(),
            target: default_target(),
        }
    }
}

impl ClientOptions {
    /// Language for the catalog request: any region subtag stripped,
    /// `fr-FR` → `fr`.
    pub fn catalog_lang(&self) -> &str {
        let base = self.lang.split(['-', '_']).next().unwrap_or_default();
        if base.is_empty() { FALLBACK_LANG } else { base }
    }
}

// ============================================================================
// State & Actions
// ============================================================================

/// In-memory client state; lifecycle is one session.
#[derive(Debug, Clone, Default)]
pub struct ClientState {
    pub options: ClientOptions,
    /// Load in flight. `loading == true` implies `loaded == false`.
    pub loading: bool,
    /// At least one load has succeeded.
    pub loaded: bool,
    pub last_error: Option<String>,
    /// Last successful catalog contents.
    pub examples: Vec<ExampleRecord>,
    pub tags: Vec<String>,
    /// User-chosen filter set, seeded from `options.tags`.
    pub selected_tags: BTreeSet<String>,
    /// Derived: see [`refresh_filtered`].
    pub filtered_examples: Vec<ExampleRecord>,
    pub selected_example: Option<ExampleRecord>,
}

/// Everything the reducer can be asked to do.
#[derive(Debug, Clone)]
pub enum Action {
    /// Seed options and start the (single) catalog load.
    Initialize(ClientOptions),
    LoadSucceeded {
        examples: Vec<ExampleRecord>,
        tags: Vec<String>,
    },
    LoadFailed {
        error: String,
    },
    /// Accumulating filter: insert when selected, remove otherwise.
    ToggleTag {
        tag: String,
        selected: bool,
    },
    Select(ExampleRecord),
    /// Launch the selected example. Side effect only; no state change.
    Use,
}

// ============================================================================
// Reducer
// ============================================================================

/// Apply one action to the state. Pure with respect to effects: the load
/// and the launch are the host loop's business.
pub fn reduce(state: &mut ClientState, action: &Action) {
    match action {
        Action::Initialize(options) => {
            state.selected_tags = options.tags.iter().cloned().collect();
            state.options = options.clone();
            state.loading = true;
            state.loaded = false;
            state.last_error = None;
        }
        Action::LoadSucceeded { examples, tags } => {
            state.examples = examples.clone();
            state.tags = tags.clone();
            state.loaded = true;
            state.loading = false;
        }
        Action::LoadFailed { error } => {
            // examples/tags keep whatever they were; no automatic retry
            state.loading = false;
            state.last_error = Some(error.clone());
        }
        Action::ToggleTag { tag, selected } => {
            if *selected {
                state.selected_tags.insert(tag.clone());
            } else {
                state.selected_tags.remove(tag);
            }
        }
        Action::Select(example) => {
            state.selected_example = Some(example.clone());
        }
        Action::Use => {}
    }
}

/// Recompute `filtered_examples` from `examples` and `selected_tags`.
///
/// Runs after every reduce; yields an empty list until the first
/// successful load.
pub fn refresh_filtered(state: &mut ClientState) {
    state.filtered_examples = if !state.loaded {
        Vec::new()
    } else if state.selected_tags.is_empty() {
        state.examples.clone()
    } else {
        state
            .examples
            .iter()
            .filter(|e| e.matches_tags(&state.selected_tags))
            .cloned()
            .collect()
    };
}
