//! The interaction loop, stepped one input event at a time.
//!
//! Session state (the transcript and the refinement toggle) is explicit and
//! owned by [`Session`], not ambient: the front-end constructs the state,
//! feeds one [`InputEvent`] per cycle into [`Session::step`], and renders
//! from the returned [`CycleOutcome`] and the transcript. Each cycle runs
//! to completion before the next input is accepted; there is no
//! cancellation and at most one model call chain is outstanding.

use crate::chat::{ChatMessage, Transcript};
use crate::client::GenerationProvider;
use crate::intake::{self, UNSUPPORTED_FILE_WARNING};

/// One external trigger for an interaction cycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputEvent {
    /// A free-form text query
    Query(String),
    /// A file upload
    Upload {
        /// Name of the uploaded file
        file_name: String,
        /// Raw bytes of the upload
        data: Vec<u8>,
    },
}

impl InputEvent {
    /// Picks the event to process when both triggers fired in one cycle.
    ///
    /// A pending upload takes priority over a pending query; with neither
    /// present the cycle is idle and `None` is returned.
    pub fn select(
        upload: Option<(String, Vec<u8>)>,
        query: Option<String>,
    ) -> Option<InputEvent> {
        if let Some((file_name, data)) = upload {
            Some(InputEvent::Upload { file_name, data })
        } else {
            query.map(InputEvent::Query)
        }
    }
}

/// Result of one interaction cycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CycleOutcome {
    /// A completed user/assistant exchange, already appended to the
    /// transcript in that order.
    Exchanged {
        user: ChatMessage,
        assistant: ChatMessage,
    },
    /// The input was rejected before any model call; nothing was appended.
    Rejected {
        /// User-facing warning text
        warning: String,
    },
}

/// State of one interactive chat session.
#[derive(Debug, Clone, Default)]
pub struct Session {
    transcript: Transcript,
    refine_enabled: bool,
}

impl Session {
    /// Creates a fresh session with an empty transcript.
    pub fn new(refine_enabled: bool) -> Self {
        Self {
            transcript: Transcript::new(),
            refine_enabled,
        }
    }

    /// The ordered transcript of this session.
    pub fn transcript(&self) -> &Transcript {
        &self.transcript
    }

    /// Whether responses go through the refinement pass.
    pub fn refine_enabled(&self) -> bool {
        self.refine_enabled
    }

    /// Toggles the refinement pass for subsequent cycles.
    pub fn set_refine_enabled(&mut self, enabled: bool) {
        self.refine_enabled = enabled;
    }

    /// Runs one interaction cycle to completion.
    ///
    /// For an upload, the intake status text stands in as the user input;
    /// a non-image upload is rejected without any model call or transcript
    /// change. Otherwise the input is recorded as a user message, answered
    /// via [`GenerationProvider::ask`] (refined when enabled), and the
    /// answer recorded as the paired assistant message. A completed cycle
    /// appends exactly two messages.
    pub async fn step<P>(&mut self, ai: &P, event: InputEvent) -> CycleOutcome
    where
        P: GenerationProvider + ?Sized,
    {
        let input_text = match event {
            InputEvent::Upload { file_name, data } => {
                match intake::handle_upload(&file_name, &data) {
                    Some(status) => status,
                    None => {
                        return CycleOutcome::Rejected {
                            warning: UNSUPPORTED_FILE_WARNING.to_string(),
                        }
                    }
                }
            }
            InputEvent::Query(query) => query,
        };

        let initial = ai.ask(&input_text).await;
        let reply = if self.refine_enabled {
            ai.refine(&initial, None).await
        } else {
            initial
        };

        let user = ChatMessage::user().content(input_text).build();
        let assistant = ChatMessage::assistant().content(reply).build();
        self.transcript.push(user.clone());
        self.transcript.push(assistant.clone());

        CycleOutcome::Exchanged { user, assistant }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn upload_takes_priority_over_query() {
        let event = InputEvent::select(
            Some(("photo.png".to_string(), vec![1, 2, 3])),
            Some("also typed this".to_string()),
        );
        assert!(matches!(event, Some(InputEvent::Upload { .. })));
    }

    #[test]
    fn query_selected_when_no_upload_pending() {
        let event = InputEvent::select(None, Some("hello".to_string()));
        assert_eq!(event, Some(InputEvent::Query("hello".to_string())));
    }

    #[test]
    fn idle_cycle_selects_nothing() {
        assert_eq!(InputEvent::select(None, None), None);
    }
}
