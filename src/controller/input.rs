//! Key event handling

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::audio::AudioEngine;
use crate::model::ActiveSection;
use super::AppController;

/// Rows skipped by PageUp / PageDown
const PAGE_STEP: isize = 10;

impl<E: AudioEngine> AppController<E> {
    pub async fn handle_key_event(&self, key: KeyEvent) {
        if key.kind != KeyEventKind::Press {
            return;
        }

        let model = &self.model;
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

        // Global bindings, work whatever has focus
        match key.code {
            KeyCode::Char('q') | KeyCode::Char('c') if ctrl => {
                model.set_should_quit(true).await;
                return;
            }
            KeyCode::F(5) => {
                self.spawn_fetch();
                return;
            }
            _ => {}
        }

        if model.is_help_popup_open().await {
            if matches!(key.code, KeyCode::Esc | KeyCode::Char('h') | KeyCode::Char('H')) {
                model.set_help_popup(false).await;
            }
            return;
        }

        match key.code {
            KeyCode::BackTab => {
                model.cycle_section_backward().await;
                return;
            }
            KeyCode::Tab => {
                if key.modifiers.contains(KeyModifiers::SHIFT) {
                    model.cycle_section_backward().await;
                } else {
                    model.cycle_section_forward().await;
                }
                return;
            }
            _ => {}
        }

        match model.active_section().await {
            ActiveSection::Artist => match key.code {
                KeyCode::Enter => self.spawn_fetch(),
                KeyCode::Esc => {
                    model.update_search(|s| s.with_artist_query(String::new())).await;
                }
                KeyCode::Backspace => model.backspace_artist().await,
                KeyCode::Char(c) if !ctrl => model.append_to_artist(c).await,
                _ => {}
            },
            ActiveSection::Filter => match key.code {
                KeyCode::Enter => model.set_active_section(ActiveSection::Results).await,
                KeyCode::Esc => {
                    model.update_search(|s| s.with_filter_text(String::new())).await;
                }
                KeyCode::Backspace => model.backspace_filter().await,
                KeyCode::Char(c) if !ctrl => model.append_to_filter(c).await,
                _ => {}
            },
            ActiveSection::Results => match key.code {
                KeyCode::Up | KeyCode::Char('k') => model.move_selection(-1).await,
                KeyCode::Down | KeyCode::Char('j') => model.move_selection(1).await,
                KeyCode::PageUp => model.move_selection(-PAGE_STEP).await,
                KeyCode::PageDown => model.move_selection(PAGE_STEP).await,
                KeyCode::Enter | KeyCode::Char(' ') => self.spawn_tap_selected().await,
                KeyCode::Char('f') | KeyCode::Char('F') => self.spawn_fetch(),
                KeyCode::Char('s') | KeyCode::Char('S') => self.stop_playback().await,
                KeyCode::Char('/') => model.set_active_section(ActiveSection::Filter).await,
                KeyCode::Char('a') | KeyCode::Char('A') => {
                    model.set_active_section(ActiveSection::Artist).await
                }
                KeyCode::Char('h') | KeyCode::Char('H') => model.set_help_popup(true).await,
                KeyCode::Char('q') | KeyCode::Char('Q') => model.set_should_quit(true).await,
                KeyCode::Esc => model.clear_status().await,
                _ => {}
            },
        }
    }
}
