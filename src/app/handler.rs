//! Event handling and state transition logic.
//!
//! [`handle_event`] is the single entry point for everything that happens to
//! the plugin: key presses already translated by the shim, permission
//! results, and decoded HTTP responses. It mutates [`AppState`] and returns
//! whether a re-render is needed plus the [`Action`]s to execute.
//!
//! The same key can mean different things depending on screen and input
//! mode, so dispatch happens in two steps: the input mode first (picker and
//! date entry capture typing), then the screen.
//!
//! # Example
//!
//! ```
//! use paperfeed::api::ApiClient;
//! use paperfeed::app::{handle_event, AppState, Event};
//! use paperfeed::ui::theme::Theme;
//!
//! let mut state = AppState::new(ApiClient::default(), 15, 1000, Theme::default());
//! let (_render, actions) = handle_event(&mut state, &Event::Start)?;
//! assert_eq!(actions.len(), 4);
//! # Ok::<(), paperfeed::domain::PaperfeedError>(())
//! ```

use super::feed::{Completion, FeedFetch};
use super::modes::{DateField, InputMode, Screen};
use super::preferences::SyncCompletion;
use super::state::{Notice, SettingsItem};
use crate::api::{ApiEvent, FeedSource};
use crate::app::{Action, AppState};
use crate::domain::catalog;
use crate::domain::error::Result;
use crate::domain::favorites::FavoriteSet;
use crate::domain::filter::{parse_date_input, FilterChange, FilterState, TagKind};
use crate::domain::preferences::NotificationSetting;

/// Events triggered by user input, the plugin runtime, or HTTP responses.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// Web access was granted; issue the initial loads.
    Start,
    /// Web access was refused. Nothing can be loaded.
    PermissionsDenied,

    MoveDown,
    MoveUp,
    NextPage,
    PrevPage,
    FirstPage,
    LastPage,

    /// Enter. Expands the selected paper, toggles a picker option or a
    /// settings row, or submits a typed date.
    Confirm,
    ToggleFavorite,
    CycleSort,
    CycleDatePreset,
    ClearDateFilter,
    /// Starts typing a custom date range, beginning with the start date.
    BeginDateEntry,
    OpenPicker(TagKind),
    /// Select-all / deselect-all for the open picker or settings group.
    ToggleAll,

    Char(char),
    Backspace,
    Escape,

    /// Refetches whatever the current screen shows.
    Reload,
    NextScreen,
    SavePreferences,
    CloseFocus,

    /// A decoded HTTP response.
    Api(ApiEvent),
}

/// Processes an event, mutates application state, and returns actions to execute.
///
/// Returns `(should_render, actions)`.
///
/// # Errors
///
/// Returns an error if an outgoing request body cannot be serialized.
pub fn handle_event(state: &mut AppState, event: &Event) -> Result<(bool, Vec<Action>)> {
    let _span = tracing::debug_span!("handle_event", event_type = ?event).entered();

    match event {
        Event::Api(api_event) => return handle_api_event(state, api_event.clone()),
        Event::Start => return Ok((true, start(state))),
        Event::PermissionsDenied => {
            tracing::warn!("web access permission denied");
            state.notice = Some(Notice::error("Web access permission denied"));
            return Ok((true, vec![]));
        }
        Event::CloseFocus => return Ok((false, vec![Action::CloseFocus])),
        _ => {}
    }

    // Any keypress dismisses the previous notice.
    state.notice = None;

    match state.input_mode {
        InputMode::Picker(kind) => Ok(handle_picker(state, kind, event)),
        InputMode::DateEntry(field) => Ok(handle_date_entry(state, field, event)),
        InputMode::Normal if state.screen == Screen::Settings => handle_settings(state, event),
        InputMode::Normal => Ok(handle_feed(state, event)),
    }
}

fn start(state: &mut AppState) -> Vec<Action> {
    tracing::info!(base_url = state.client.base_url(), "starting initial loads");
    let feed = state.feed.load();
    let mut actions = vec![
        Action::Request(state.client.filter_options()),
        Action::Request(state.client.favorite_ids(state.favorites_cap)),
        Action::Request(state.fetch_request(&feed)),
    ];
    actions.extend(load_preferences(state));
    actions
}

fn load_preferences(state: &mut AppState) -> Option<Action> {
    let fetch = state.preferences.load()?;
    Some(Action::Request(state.client.load_preferences(fetch.seq)))
}

fn fetch_actions(state: &AppState, fetch: Option<FeedFetch>) -> (bool, Vec<Action>) {
    match fetch {
        Some(fetch) => (true, vec![Action::Request(state.fetch_request(&fetch))]),
        None => (false, vec![]),
    }
}

/// Applies a filter edit to the listing on screen.
fn apply_filter(state: &mut AppState, change: impl FnOnce(&FilterState) -> FilterChange) -> (bool, Vec<Action>) {
    let Some(feed) = state.active_feed_mut() else {
        return (false, vec![]);
    };
    let change = change(feed.filters());
    let fetch = feed.on_filter_change(change);
    fetch_actions(state, Some(fetch))
}

fn handle_feed(state: &mut AppState, event: &Event) -> (bool, Vec<Action>) {
    let Some(feed) = state.active_feed_mut() else {
        return (false, vec![]);
    };

    match event {
        Event::MoveDown => {
            feed.select_next();
            (true, vec![])
        }
        Event::MoveUp => {
            feed.select_prev();
            (true, vec![])
        }
        Event::Confirm => {
            feed.toggle_expanded();
            (true, vec![])
        }
        Event::Escape => {
            if feed.is_expanded() {
                feed.toggle_expanded();
            }
            (true, vec![])
        }
        Event::NextPage => {
            let fetch = feed.next_page();
            fetch_actions(state, fetch)
        }
        Event::PrevPage => {
            let fetch = feed.prev_page();
            fetch_actions(state, fetch)
        }
        Event::FirstPage => {
            let fetch = feed.first_page();
            fetch_actions(state, fetch)
        }
        Event::LastPage => {
            let fetch = feed.last_page();
            fetch_actions(state, fetch)
        }
        Event::Reload => {
            let fetch = feed.load();
            fetch_actions(state, Some(fetch))
        }
        Event::CycleSort => apply_filter(state, |f| FilterChange::Sort(f.sort.next())),
        Event::CycleDatePreset => {
            apply_filter(state, |f| FilterChange::DatePreset(f.date_preset.next()))
        }
        Event::ClearDateFilter => apply_filter(state, |_| FilterState::clear_date_filter()),
        Event::BeginDateEntry => {
            state.date_buffer = format_date(feed.filters().date_from);
            state.input_mode = InputMode::DateEntry(DateField::From);
            (true, vec![])
        }
        Event::OpenPicker(kind) => {
            tracing::debug!(kind = ?kind, "opening filter picker");
            state.input_mode = InputMode::Picker(*kind);
            state.picker_query.clear();
            state.picker_cursor = 0;
            (true, vec![])
        }
        Event::ToggleFavorite => toggle_favorite(state),
        Event::NextScreen => next_screen(state),
        _ => (false, vec![]),
    }
}

fn format_date(date: Option<chrono::NaiveDate>) -> String {
    date.map(|d| d.format("%Y-%m-%d").to_string())
        .unwrap_or_default()
}

fn toggle_favorite(state: &mut AppState) -> (bool, Vec<Action>) {
    let Some(row) = state.active_feed().and_then(|f| f.selected_row()) else {
        return (false, vec![]);
    };
    let paper_id = row.id.clone();
    let currently_favorite = row.is_favorite;

    if !state.pending_favorites.insert(paper_id.clone()) {
        tracing::debug!(paper_id, "favorite change already in flight");
        return (false, vec![]);
    }

    tracing::debug!(paper_id, add = !currently_favorite, "toggling favorite");
    let request = if currently_favorite {
        state.client.remove_favorite(&paper_id)
    } else {
        state.client.add_favorite(&paper_id)
    };
    (false, vec![Action::Request(request)])
}

fn next_screen(state: &mut AppState) -> (bool, Vec<Action>) {
    state.screen = state.screen.next();
    state.input_mode = InputMode::Normal;
    tracing::debug!(screen = ?state.screen, "switched screen");

    let mut actions = vec![];
    match state.screen {
        Screen::Favorites => {
            let fetch = state.favorites_view.load();
            actions.push(Action::Request(state.fetch_request(&fetch)));
        }
        Screen::Feed if !state.feed.has_started() => {
            let fetch = state.feed.load();
            actions.push(Action::Request(state.fetch_request(&fetch)));
        }
        Screen::Settings if !state.preferences.is_loaded() && !state.preferences.is_loading() => {
            actions.extend(load_preferences(state));
        }
        Screen::Feed | Screen::Settings => {}
    }
    (true, actions)
}

fn handle_picker(state: &mut AppState, kind: TagKind, event: &Event) -> (bool, Vec<Action>) {
    match event {
        Event::Char(c) => {
            state.picker_query.push(*c);
            state.picker_cursor = 0;
            (true, vec![])
        }
        Event::Backspace => {
            state.picker_query.pop();
            state.picker_cursor = 0;
            (true, vec![])
        }
        Event::MoveDown => {
            let count = state.picker_matches(kind).len();
            if count > 0 {
                state.picker_cursor = (state.picker_cursor + 1) % count;
            }
            (true, vec![])
        }
        Event::MoveUp => {
            let count = state.picker_matches(kind).len();
            if count > 0 {
                state.picker_cursor = state.picker_cursor.checked_sub(1).unwrap_or(count - 1);
            }
            (true, vec![])
        }
        Event::Confirm => match state.picker_selection(kind) {
            Some(option) => {
                tracing::debug!(kind = ?kind, option, "toggling filter option");
                apply_filter(state, |f| f.toggled(kind, &option))
            }
            None => (false, vec![]),
        },
        Event::ToggleAll => {
            let options = state.filter_options.for_kind(kind).to_vec();
            apply_filter(state, |f| f.with_all(kind, &options))
        }
        Event::Escape => {
            state.input_mode = InputMode::Normal;
            state.picker_query.clear();
            state.picker_cursor = 0;
            (true, vec![])
        }
        _ => (false, vec![]),
    }
}

fn handle_date_entry(state: &mut AppState, field: DateField, event: &Event) -> (bool, Vec<Action>) {
    match event {
        Event::Char(c) => {
            state.date_buffer.push(*c);
            (true, vec![])
        }
        Event::Backspace => {
            state.date_buffer.pop();
            (true, vec![])
        }
        Event::Escape => {
            state.input_mode = InputMode::Normal;
            state.date_buffer.clear();
            (true, vec![])
        }
        Event::Confirm => {
            let date = match parse_date_input(&state.date_buffer) {
                Ok(date) => date,
                Err(e) => {
                    tracing::debug!(input = %state.date_buffer, error = %e, "rejected date input");
                    state.notice = Some(Notice::error(e.to_string()));
                    return (true, vec![]);
                }
            };

            let result = match field {
                DateField::From => apply_filter(state, |_| FilterChange::DateFrom(date)),
                DateField::To => apply_filter(state, |_| FilterChange::DateTo(date)),
            };

            match field {
                DateField::From => {
                    let date_to = state.active_feed().and_then(|f| f.filters().date_to);
                    state.date_buffer = format_date(date_to);
                    state.input_mode = InputMode::DateEntry(DateField::To);
                }
                DateField::To => {
                    state.date_buffer.clear();
                    state.input_mode = InputMode::Normal;
                }
            }
            result
        }
        _ => (false, vec![]),
    }
}

fn handle_settings(state: &mut AppState, event: &Event) -> Result<(bool, Vec<Action>)> {
    let item_count = AppState::settings_items().len();

    match event {
        Event::MoveDown => {
            state.settings_cursor = (state.settings_cursor + 1) % item_count;
            Ok((true, vec![]))
        }
        Event::MoveUp => {
            state.settings_cursor = state
                .settings_cursor
                .checked_sub(1)
                .unwrap_or(item_count - 1);
            Ok((true, vec![]))
        }
        Event::Confirm => {
            let Some(item) = state.selected_settings_item() else {
                return Ok((false, vec![]));
            };
            let current = state.preferences.working().notifications.clone().unwrap_or_default();
            match item {
                SettingsItem::Key(kind, entry) => state.preferences.toggle(kind, entry.key),
                SettingsItem::Email => state
                    .preferences
                    .set_notification(NotificationSetting::Email(!current.email_enabled)),
                SettingsItem::Push => state
                    .preferences
                    .set_notification(NotificationSetting::Push(!current.push_enabled)),
                SettingsItem::Whatsapp => state
                    .preferences
                    .set_notification(NotificationSetting::Whatsapp(!current.whatsapp_enabled)),
                SettingsItem::Frequency => state
                    .preferences
                    .set_notification(NotificationSetting::Frequency(current.frequency.next())),
            }
            Ok((true, vec![]))
        }
        Event::ToggleAll => {
            if let Some(SettingsItem::Key(kind, _)) = state.selected_settings_item() {
                state.preferences.toggle_all(kind, &catalog::keys(kind));
                return Ok((true, vec![]));
            }
            Ok((false, vec![]))
        }
        Event::SavePreferences => match state.preferences.save() {
            Some(save) => {
                let request = state.client.save_preferences(save.seq, &save.document)?;
                Ok((true, vec![Action::Request(request)]))
            }
            None => {
                state.notice = Some(Notice::info("Nothing to save"));
                Ok((true, vec![]))
            }
        },
        Event::Reload => match load_preferences(state) {
            Some(action) => Ok((true, vec![action])),
            None => {
                state.notice = Some(Notice::info("Wait for the save to finish"));
                Ok((true, vec![]))
            }
        },
        Event::NextScreen => Ok(next_screen(state)),
        _ => Ok((false, vec![])),
    }
}

fn handle_api_event(state: &mut AppState, event: ApiEvent) -> Result<(bool, Vec<Action>)> {
    match event {
        ApiEvent::FeedPage {
            source,
            seq,
            result,
        } => {
            let favorites = state.favorites.as_ref();
            let controller = match source {
                FeedSource::Feed => &mut state.feed,
                FeedSource::Favorites => &mut state.favorites_view,
            };
            match controller.complete(seq, result, favorites) {
                Completion::Stale => Ok((false, vec![])),
                Completion::Applied | Completion::Failed => Ok((true, vec![])),
                Completion::Refetch(fetch) => Ok(fetch_actions(state, Some(fetch))),
            }
        }
        ApiEvent::FavoriteIds { result } => match result {
            Ok(page) => {
                let set = FavoriteSet::from_listing(&page);
                tracing::info!(count = set.len(), "favorite ids loaded");
                state.favorites = Some(set);

                // Rows fetched before the set arrived were enriched without it.
                if state.feed.has_started() {
                    let fetch = state.feed.load();
                    return Ok(fetch_actions(state, Some(fetch)));
                }
                Ok((true, vec![]))
            }
            Err(failure) => {
                tracing::warn!(error = %failure, "favorite ids failed to load");
                Ok((false, vec![]))
            }
        },
        ApiEvent::FavoriteToggled {
            paper_id,
            favorite,
            result,
        } => {
            state.pending_favorites.remove(&paper_id);
            match result {
                Ok(()) => {
                    let favorites = state.favorites.get_or_insert_with(FavoriteSet::new);
                    if favorite {
                        favorites.insert(paper_id.clone());
                    } else {
                        favorites.remove(&paper_id);
                    }
                    state.feed.mark_favorite(&paper_id, favorite);
                    state.favorites_view.mark_favorite(&paper_id, favorite);
                    state.notice = Some(Notice::info(if favorite {
                        "Added to favorites"
                    } else {
                        "Removed from favorites"
                    }));

                    if !favorite && state.screen == Screen::Favorites {
                        let fetch = state.favorites_view.load();
                        return Ok(fetch_actions(state, Some(fetch)));
                    }
                    Ok((true, vec![]))
                }
                Err(failure) => {
                    tracing::warn!(paper_id, favorite, error = %failure, "favorite change failed");
                    state.notice = Some(Notice::error("Could not update favorite"));
                    Ok((true, vec![]))
                }
            }
        }
        ApiEvent::FilterOptions { result } => match result {
            Ok(options) => {
                tracing::debug!(
                    subspecialties = options.subspecialties.len(),
                    research_types = options.research_types.len(),
                    journals = options.journals.len(),
                    "filter options loaded"
                );
                state.filter_options = options;
                Ok((true, vec![]))
            }
            Err(failure) => {
                tracing::warn!(error = %failure, "filter options failed to load");
                Ok((false, vec![]))
            }
        },
        ApiEvent::PreferencesLoaded { seq, result } => {
            let completion = state.preferences.complete_load(seq, result);
            Ok((completion != SyncCompletion::Stale, vec![]))
        }
        ApiEvent::PreferencesSaved { seq, result } => {
            let completion = state.preferences.complete_save(seq, result);
            Ok((completion != SyncCompletion::Stale, vec![]))
        }
    }
}
