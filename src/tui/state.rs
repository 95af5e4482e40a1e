use crate::model::{ClientEvent, GcdResult, HistoryItem, PlaybackSpeed};
use crate::playback::Playback;
use std::time::Instant;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthMode {
    Login,
    Register,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthField {
    Email,
    Password,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CalcField {
    A,
    B,
}

/// UI state, owned by the UI thread only; no cross-thread mutation.
pub struct UiState {
    pub tab: usize,
    pub info: String,
    pub session_email: Option<String>,

    // Login screen
    pub auth_mode: AuthMode,
    pub auth_field: AuthField,
    pub email_input: String,
    pub password_input: String,
    pub auth_pending: bool,

    // Calculate form
    pub calc_field: CalcField,
    pub input_a: String,
    pub input_b: String,
    pub calc_pending: bool,

    // Visualizer
    pub result: Option<GcdResult>,
    pub playback: Option<Playback>,
    pub speed: PlaybackSpeed,
    pub last_advance: Instant,

    // History
    pub history: Vec<HistoryItem>,
    pub history_selected: usize,
    pub history_scroll_offset: usize,
    /// Rows the last draw had for the list; scrolling keys page by this.
    pub history_viewport_rows: usize,
    pub history_pending: bool,
    pub last_exported_path: Option<String>,

    // Theory
    pub theory_section: usize,
    pub theory_scroll: u16,
}

impl UiState {
    pub fn new(speed: PlaybackSpeed) -> Self {
        Self {
            tab: 0,
            info: String::new(),
            session_email: None,
            auth_mode: AuthMode::Login,
            auth_field: AuthField::Email,
            email_input: String::new(),
            password_input: String::new(),
            auth_pending: false,
            calc_field: CalcField::A,
            input_a: String::new(),
            input_b: String::new(),
            calc_pending: false,
            result: None,
            playback: None,
            speed,
            last_advance: Instant::now(),
            history: Vec::new(),
            history_selected: 0,
            history_scroll_offset: 0,
            history_viewport_rows: 1,
            history_pending: false,
            last_exported_path: None,
            theory_section: 0,
            theory_scroll: 0,
        }
    }

    pub fn authenticated(&self) -> bool {
        self.session_email.is_some()
    }

    /// Install a fresh result and rewind the visualizer. A trace always
    /// carries at least the terminating step; an empty one is not installed.
    pub fn set_result(&mut self, result: GcdResult) {
        if result.steps.is_empty() {
            self.info = format!(
                "GCD({}, {}) = {} (no steps returned)",
                result.a, result.b, result.result
            );
            return;
        }
        self.playback = Some(Playback::new(result.steps.len()));
        self.result = Some(result);
        self.last_advance = Instant::now();
        self.tab = 0;
    }

    /// Back to the input form for a new calculation.
    pub fn clear_result(&mut self) {
        self.result = None;
        self.playback = None;
        self.input_a.clear();
        self.input_b.clear();
        self.calc_field = CalcField::A;
    }

    /// Auto-advance when the playback timer is due. Changing the speed simply
    /// changes the delay the next check uses, so a pending tick is re-armed
    /// with the new delay without skipping a step.
    pub fn maybe_tick(&mut self) {
        let due = match self.playback.as_ref() {
            Some(pb) => pb.is_playing() && self.last_advance.elapsed() >= self.speed.delay(),
            None => false,
        };
        if due {
            if let Some(pb) = self.playback.as_mut() {
                pb.tick();
            }
            self.last_advance = Instant::now();
        }
    }

    pub fn playback_next(&mut self) {
        if let Some(pb) = self.playback.as_mut() {
            pb.next();
        }
        // Manual navigation disarms the pending tick.
        self.last_advance = Instant::now();
    }

    pub fn playback_previous(&mut self) {
        if let Some(pb) = self.playback.as_mut() {
            pb.previous();
        }
        self.last_advance = Instant::now();
    }

    pub fn playback_toggle(&mut self) {
        if let Some(pb) = self.playback.as_mut() {
            pb.toggle_play();
            if pb.is_playing() {
                self.last_advance = Instant::now();
            }
        }
    }

    pub fn selected_history_item(&self) -> Option<&HistoryItem> {
        self.history.get(self.history_selected)
    }

    /// Keep selection and scroll inside the (possibly shrunken) list.
    fn clamp_history_cursor(&mut self) {
        if self.history.is_empty() {
            self.history_selected = 0;
            self.history_scroll_offset = 0;
            return;
        }
        if self.history_selected >= self.history.len() {
            self.history_selected = self.history.len() - 1;
        }
        if self.history_scroll_offset > self.history_selected {
            self.history_scroll_offset = self.history_selected;
        }
    }

    /// Keep the selection inside a window of `visible_rows`, shifting the
    /// scroll offset when the terminal shrinks between draws.
    pub fn clamp_history_scroll(&mut self, visible_rows: usize) {
        let rows = visible_rows.max(1);
        if self.history_selected < self.history_scroll_offset {
            self.history_scroll_offset = self.history_selected;
        } else if self.history_selected >= self.history_scroll_offset + rows {
            self.history_scroll_offset = self.history_selected + 1 - rows;
        }
    }

    pub fn apply_event(&mut self, ev: ClientEvent) {
        match ev {
            ClientEvent::AuthOk { email } => {
                self.auth_pending = false;
                self.password_input.clear();
                self.info = format!("Logged in as {email}");
                self.session_email = Some(email);
            }
            ClientEvent::SessionCleared { reason } => {
                self.session_email = None;
                self.auth_pending = false;
                self.calc_pending = false;
                self.history_pending = false;
                self.result = None;
                self.playback = None;
                self.history.clear();
                self.history_selected = 0;
                self.history_scroll_offset = 0;
                self.tab = 0;
                self.info = reason.to_message().to_string();
            }
            ClientEvent::CalculationReady { result } => {
                self.calc_pending = false;
                self.info = format!(
                    "GCD({}, {}) computed in {} step(s)",
                    result.a,
                    result.b,
                    result.steps.len()
                );
                self.set_result(*result);
            }
            ClientEvent::HistoryLoaded { items } => {
                self.history_pending = false;
                self.info = format!("History: {} item(s)", items.len());
                self.history = items;
                self.clamp_history_cursor();
            }
            ClientEvent::HistoryItemLoaded { item } => {
                self.info = format!("Loaded calculation #{}", item.id);
                self.set_result(item.to_result());
            }
            ClientEvent::HistoryDeleted { id } => {
                self.history.retain(|item| item.id != id);
                self.clamp_history_cursor();
                self.info = "Deleted".into();
            }
            ClientEvent::Failed { message } => {
                self.auth_pending = false;
                self.calc_pending = false;
                self.history_pending = false;
                self.info = message;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{GcdStep, SessionEnd};

    fn sample_result() -> GcdResult {
        GcdResult {
            result: 6,
            steps: vec![
                GcdStep {
                    step: 1,
                    a: 48,
                    b: 18,
                    quotient: Some(2),
                    remainder: Some(12),
                    operation: None,
                    explanation: None,
                },
                GcdStep {
                    step: 2,
                    a: 18,
                    b: 12,
                    quotient: Some(1),
                    remainder: Some(6),
                    operation: None,
                    explanation: None,
                },
                GcdStep {
                    step: 3,
                    a: 12,
                    b: 6,
                    quotient: Some(2),
                    remainder: Some(0),
                    operation: None,
                    explanation: None,
                },
            ],
            a: 48,
            b: 18,
        }
    }

    #[test]
    fn calculation_ready_rewinds_playback() {
        let mut state = UiState::new(PlaybackSpeed::Normal);
        state.apply_event(ClientEvent::CalculationReady {
            result: Box::new(sample_result()),
        });
        let pb = state.playback.as_ref().unwrap();
        assert_eq!(pb.index(), 0);
        assert!(!pb.is_playing());
        assert_eq!(pb.len(), 3);
        assert!(!state.calc_pending);
    }

    #[test]
    fn empty_trace_is_not_installed() {
        let mut state = UiState::new(PlaybackSpeed::Normal);
        state.apply_event(ClientEvent::CalculationReady {
            result: Box::new(GcdResult {
                result: 6,
                steps: Vec::new(),
                a: 48,
                b: 18,
            }),
        });
        assert!(state.result.is_none());
        assert!(state.playback.is_none());
        assert_eq!(state.info, "GCD(48, 18) = 6 (no steps returned)");
    }

    #[test]
    fn session_cleared_drops_everything_client_side() {
        let mut state = UiState::new(PlaybackSpeed::Normal);
        state.session_email = Some("user@example.com".into());
        state.apply_event(ClientEvent::CalculationReady {
            result: Box::new(sample_result()),
        });
        state.apply_event(ClientEvent::SessionCleared {
            reason: SessionEnd::Expired,
        });
        assert!(!state.authenticated());
        assert!(state.result.is_none());
        assert!(state.history.is_empty());
        assert_eq!(state.info, "Session expired. Please log in again.");
    }

    #[test]
    fn scroll_window_follows_the_selection_on_short_terminals() {
        let mut state = UiState::new(PlaybackSpeed::Normal);
        state.history_selected = 9;
        state.history_scroll_offset = 0;
        state.clamp_history_scroll(4);
        assert_eq!(state.history_scroll_offset, 6);

        // Scrolling back up pulls the window with it.
        state.history_selected = 2;
        state.clamp_history_scroll(4);
        assert_eq!(state.history_scroll_offset, 2);
    }

    #[test]
    fn deleting_the_last_item_clamps_the_cursor() {
        let mut state = UiState::new(PlaybackSpeed::Normal);
        let item = |id: i64| HistoryItem {
            id,
            a: 48,
            b: 18,
            result: 6,
            steps: sample_result().steps,
            created_at: "2026-08-01T12:00:00Z".into(),
        };
        state.apply_event(ClientEvent::HistoryLoaded {
            items: vec![item(1), item(2)],
        });
        state.history_selected = 1;
        state.apply_event(ClientEvent::HistoryDeleted { id: 2 });
        assert_eq!(state.history.len(), 1);
        assert_eq!(state.history_selected, 0);
    }

    #[test]
    fn manual_navigation_pauses_playback() {
        let mut state = UiState::new(PlaybackSpeed::Normal);
        state.set_result(sample_result());
        state.playback_toggle();
        state.playback_next();
        let pb = state.playback.as_ref().unwrap();
        assert_eq!(pb.index(), 1);
        assert!(!pb.is_playing());
    }

    #[test]
    fn tick_is_not_due_before_the_delay_elapses() {
        let mut state = UiState::new(PlaybackSpeed::Half);
        state.set_result(sample_result());
        state.playback_toggle();
        state.maybe_tick();
        assert_eq!(state.playback.as_ref().unwrap().index(), 0);
    }
}
