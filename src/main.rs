//! Zellij plugin wrapper and entry point.
//!
//! The only module that touches `zellij_tile`. It translates Zellij events
//! into library [`Event`]s, runs them through [`handle_event`], and carries
//! out the returned [`Action`]s: `web_request` for HTTP, `hide_self` to close.
//!
//! # Plugin Lifecycle
//!
//! 1. **Load**: parse config, initialize tracing, build `AppState`, request
//!    `WebAccess`, subscribe to events
//! 2. **Permission granted**: `Event::Start` issues the initial requests
//! 3. **Update**: keys and `WebRequestResult`s go through the library
//! 4. **Render**: delegate to `paperfeed::ui::render`
//!
//! # Keybindings
//!
//! Global:
//! - `Ctrl+n` / `Ctrl+p`: move down / up
//!
//! Feed and favorites:
//! - `j`/`k`, arrows: move
//! - `h`/`l`, left/right: previous / next page; `g`/`G`: first / last page
//! - `Enter`: expand the selected paper
//! - `f`: add or remove favorite
//! - `o`: cycle sort order; `d`: cycle date window; `c`: custom range;
//!   `x`: clear the date filter
//! - `1`/`2`/`3`: subspecialty / research type / journal picker
//! - `r`: reload; `Tab`: next screen; `q`: close
//!
//! Settings:
//! - `j`/`k`: move; `Space`/`Enter`: toggle; `a`: select or clear the group;
//!   `s`: save; `r`: reload
//!
//! Picker and date entry capture typing; `Enter` toggles or applies,
//! `Ctrl+a` selects all in a picker, `Esc` closes.

#![allow(clippy::multiple_crate_versions)]

use std::collections::BTreeMap;
use zellij_tile::prelude::*;

use paperfeed::api::{decode_response, HttpMethod};
use paperfeed::domain::filter::TagKind;
use paperfeed::{handle_event, Action, Config, Event, InputMode};

register_plugin!(State);

/// Plugin state wrapper.
struct State {
    app: paperfeed::app::AppState,
}

impl Default for State {
    fn default() -> Self {
        Self {
            app: paperfeed::initialize(&Config::default()),
        }
    }
}

impl ZellijPlugin for State {
    fn load(&mut self, configuration: BTreeMap<String, String>) {
        let config = Config::from_zellij(&configuration);
        paperfeed::observability::init_tracing(&config);

        let span = tracing::debug_span!("plugin_load");
        let _guard = span.entered();

        tracing::debug!(
            base_url = %config.api_base_url,
            page_size = config.page_size,
            has_token = config.api_token.is_some(),
            "parsed configuration"
        );
        self.app = paperfeed::initialize(&config);

        request_permission(&[PermissionType::WebAccess]);
        subscribe(&[
            EventType::Key,
            EventType::WebRequestResult,
            EventType::PermissionRequestResult,
        ]);

        tracing::debug!("plugin load complete - waiting for permissions");
    }

    fn update(&mut self, event: zellij_tile::prelude::Event) -> bool {
        let event_name = Self::get_event_name(&event);
        let span = tracing::debug_span!("plugin_update_event", event_type = %event_name);
        let _guard = span.entered();

        let our_event = match event {
            zellij_tile::prelude::Event::Key(ref key) => match self.map_key_event(key) {
                Some(event) => event,
                None => return false,
            },
            zellij_tile::prelude::Event::WebRequestResult(status, _headers, body, context) => {
                match decode_response(status, &body, &context) {
                    Some(api_event) => Event::Api(api_event),
                    None => {
                        tracing::debug!(status, context = ?context, "ignoring unrecognised response");
                        return false;
                    }
                }
            }
            zellij_tile::prelude::Event::PermissionRequestResult(status) => match status {
                PermissionStatus::Granted => Event::Start,
                PermissionStatus::Denied => Event::PermissionsDenied,
            },
            _ => return false,
        };

        match handle_event(&mut self.app, &our_event) {
            Ok((should_render, actions)) => {
                tracing::debug!(
                    action_count = actions.len(),
                    should_render = should_render,
                    "event handled successfully"
                );
                for a in actions {
                    Self::execute_action(a);
                }
                should_render
            }
            Err(e) => {
                tracing::warn!(error = %e, "error handling event");
                false
            }
        }
    }

    fn render(&mut self, rows: usize, cols: usize) {
        paperfeed::ui::render(&self.app, rows, cols);
    }
}

impl State {
    fn get_event_name(event: &zellij_tile::prelude::Event) -> String {
        match event {
            zellij_tile::prelude::Event::Key(key) => format!("Key({:?})", key.bare_key),
            zellij_tile::prelude::Event::WebRequestResult(status, ..) => {
                format!("WebRequestResult({status})")
            }
            zellij_tile::prelude::Event::PermissionRequestResult(..) => {
                "PermissionRequestResult".to_string()
            }
            _ => "Other".to_string(),
        }
    }

    fn map_key_event(&self, key: &KeyWithModifier) -> Option<Event> {
        tracing::debug!(bare_key = ?key.bare_key, "key event");

        if key.has_modifiers(&[KeyModifier::Ctrl]) {
            return match key.bare_key {
                BareKey::Char('n') => Some(Event::MoveDown),
                BareKey::Char('p') => Some(Event::MoveUp),
                BareKey::Char('a') => Some(Event::ToggleAll),
                _ => None,
            };
        }

        if self.app.input_mode != InputMode::Normal {
            return Some(match key.bare_key {
                BareKey::Down => Event::MoveDown,
                BareKey::Up => Event::MoveUp,
                BareKey::Enter => Event::Confirm,
                BareKey::Esc => Event::Escape,
                BareKey::Backspace => Event::Backspace,
                BareKey::Char(c) => Event::Char(c),
                _ => return None,
            });
        }

        Some(match key.bare_key {
            BareKey::Down | BareKey::Char('j') => Event::MoveDown,
            BareKey::Up | BareKey::Char('k') => Event::MoveUp,
            BareKey::Left | BareKey::Char('h') => Event::PrevPage,
            BareKey::Right | BareKey::Char('l') => Event::NextPage,
            BareKey::Char('g') => Event::FirstPage,
            BareKey::Char('G') => Event::LastPage,
            BareKey::Enter | BareKey::Char(' ') => Event::Confirm,
            BareKey::Esc => Event::Escape,
            BareKey::Tab => Event::NextScreen,
            BareKey::Char('q') => Event::CloseFocus,
            BareKey::Char('r') => Event::Reload,
            BareKey::Char('f') => Event::ToggleFavorite,
            BareKey::Char('o') => Event::CycleSort,
            BareKey::Char('d') => Event::CycleDatePreset,
            BareKey::Char('c') => Event::BeginDateEntry,
            BareKey::Char('x') => Event::ClearDateFilter,
            BareKey::Char('1') => Event::OpenPicker(TagKind::Subspecialty),
            BareKey::Char('2') => Event::OpenPicker(TagKind::ResearchType),
            BareKey::Char('3') => Event::OpenPicker(TagKind::Journal),
            BareKey::Char('a') => Event::ToggleAll,
            BareKey::Char('s') => Event::SavePreferences,
            _ => return None,
        })
    }

    fn execute_action(action: Action) {
        match action {
            Action::CloseFocus => {
                tracing::debug!("closing plugin focus");
                hide_self();
            }
            Action::Request(request) => {
                tracing::debug!(
                    kind = request.kind.as_str(),
                    method = ?request.method,
                    url = %request.url,
                    "sending web request"
                );
                let verb = match request.method {
                    HttpMethod::Get => HttpVerb::Get,
                    HttpMethod::Post => HttpVerb::Post,
                    HttpMethod::Put => HttpVerb::Put,
                    HttpMethod::Delete => HttpVerb::Delete,
                };
                web_request(request.url, verb, request.headers, request.body, request.context);
            }
        }
    }
}
