//! Key Button - captures a single key press for a shortcut field
//!
//! State diagram:
//! ```text
//! Idle ──Activate──> Listening ──Key──> Idle
//!                        │
//!                   [FocusLost]──> Idle
//! ```
//!
//! A key press that resolves to nothing keeps the button listening. Every exit
//! from Listening posts a [`KeyChange`]; the callback runs when the
//! [`KeyChangeDispatcher`] next drains its queue, not inside the key handler.

use crate::validation::KeyValidationError;
use leaderkey_keyboard::{glyph_for, resolve, CaptureResult, KeyEvent, KeyMap};
use log::{debug, warn};
use tokio::sync::mpsc;

/// Events that can trigger state transitions
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display)]
pub enum CaptureEvent {
    /// User clicked the button
    Activate,
    /// A key press resolved to something actionable
    Key,
    /// The button stopped being first responder
    FocusLost,
}

/// Button states
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, strum::Display)]
pub enum CaptureState {
    #[default]
    Idle,
    Listening,
}

/// Reason a transition was rejected
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("{attempted_event} event rejected in {current_state} state")]
pub struct TransitionRejection {
    pub current_state: CaptureState,
    pub attempted_event: CaptureEvent,
}

/// Value before and after a capture, delivered to the change callback.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyChange {
    pub before: String,
    pub after: String,
}

/// Platform-independent half of the key capture control.
///
/// The UI forwards activation, key presses and focus loss; the button keeps
/// the stored value and decides when the capture is over.
#[derive(Debug)]
pub struct KeyButton {
    text: String,
    old_value: String,
    state: CaptureState,
    validation_error: Option<KeyValidationError>,
    changes: mpsc::UnboundedSender<KeyChange>,
}

impl KeyButton {
    pub fn new(text: impl Into<String>, changes: mpsc::UnboundedSender<KeyChange>) -> Self {
        Self {
            text: text.into(),
            old_value: String::new(),
            state: CaptureState::Idle,
            validation_error: None,
            changes,
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Replace the stored value from outside a capture, e.g. when the
    /// configuration is reloaded.
    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
    }

    pub fn state(&self) -> CaptureState {
        self.state
    }

    pub fn is_listening(&self) -> bool {
        self.state == CaptureState::Listening
    }

    pub fn validation_error(&self) -> Option<KeyValidationError> {
        self.validation_error
    }

    pub fn set_validation_error(&mut self, error: Option<KeyValidationError>) {
        self.validation_error = error;
    }

    /// Text to draw on the button: the placeholder while empty, otherwise the
    /// glyph for the stored value.
    pub fn display_text(&self, placeholder: &str, keymap: &KeyMap) -> String {
        if self.text.is_empty() {
            placeholder.to_string()
        } else {
            glyph_for(&self.text, keymap)
        }
    }

    /// Start listening for a key. Remembers the current value so Escape can
    /// restore it.
    pub fn activate(&mut self) -> Result<(), TransitionRejection> {
        self.transition(CaptureEvent::Activate)?;
        self.old_value = self.text.clone();
        Ok(())
    }

    /// Handle a key press.
    ///
    /// Presses while idle are not for this button and come back as
    /// [`CaptureResult::NoResolution`] with nothing changed.
    pub fn handle_key(&mut self, event: &KeyEvent, keymap: &KeyMap) -> CaptureResult {
        if !self.is_listening() {
            return CaptureResult::NoResolution;
        }

        let result = resolve(event, keymap);
        let Some(value) = result.apply(&self.old_value) else {
            debug!("Key code {} not actionable, still listening", event.code);
            return result;
        };

        self.text = value;
        // Listening -> Idle on Key is always valid
        if let Err(rejection) = self.transition(CaptureEvent::Key) {
            warn!("{}", rejection);
        }
        self.post_change();
        result
    }

    /// Focus moved elsewhere. Ends a running capture with the value as it
    /// stands; does nothing when idle.
    pub fn focus_lost(&mut self) {
        if !self.is_listening() {
            return;
        }
        if let Err(rejection) = self.transition(CaptureEvent::FocusLost) {
            warn!("{}", rejection);
            return;
        }
        self.post_change();
    }

    fn post_change(&self) {
        let change = KeyChange {
            before: self.old_value.clone(),
            after: self.text.clone(),
        };
        if self.changes.send(change).is_err() {
            warn!("Key change dropped: dispatcher is gone");
        }
    }

    /// This is the ONLY way to change state
    fn transition(&mut self, event: CaptureEvent) -> Result<(), TransitionRejection> {
        let current = self.state;
        match Self::compute_transition(current, event) {
            Some(next) => {
                debug!("Key button {} -> {} on {}", current, next, event);
                self.state = next;
                Ok(())
            }
            None => Err(TransitionRejection {
                current_state: current,
                attempted_event: event,
            }),
        }
    }

    fn compute_transition(current: CaptureState, event: CaptureEvent) -> Option<CaptureState> {
        match current {
            CaptureState::Idle => match event {
                CaptureEvent::Activate => Some(CaptureState::Listening),
                _ => None,
            },
            CaptureState::Listening => match event {
                CaptureEvent::Key | CaptureEvent::FocusLost => Some(CaptureState::Idle),
                CaptureEvent::Activate => None,
            },
        }
    }
}

pub type KeyChangedFn = Box<dyn FnMut(KeyChange) + Send>;

/// Delivers [`KeyChange`]s posted by buttons to a callback, one tick after
/// the capture finished.
pub struct KeyChangeDispatcher {
    tx: mpsc::UnboundedSender<KeyChange>,
    rx: mpsc::UnboundedReceiver<KeyChange>,
    on_key_changed: KeyChangedFn,
}

impl KeyChangeDispatcher {
    pub fn new<F>(on_key_changed: F) -> Self
    where
        F: FnMut(KeyChange) + Send + 'static,
    {
        let (tx, rx) = mpsc::unbounded_channel();
        Self {
            tx,
            rx,
            on_key_changed: Box::new(on_key_changed),
        }
    }

    /// Create a button that reports to this dispatcher.
    pub fn button(&self, text: impl Into<String>) -> KeyButton {
        KeyButton::new(text, self.tx.clone())
    }

    /// Run the callback for every change posted so far. Returns how many ran.
    pub fn dispatch_pending(&mut self) -> usize {
        let mut dispatched = 0;
        while let Ok(change) = self.rx.try_recv() {
            (self.on_key_changed)(change);
            dispatched += 1;
        }
        dispatched
    }

    /// Deliver changes until every button has been dropped.
    pub async fn run(self) {
        let Self {
            tx,
            mut rx,
            mut on_key_changed,
        } = self;
        drop(tx);

        while let Some(change) = rx.recv().await {
            on_key_changed(change);
        }
        debug!("All key buttons dropped, dispatcher stopping");
    }
}
