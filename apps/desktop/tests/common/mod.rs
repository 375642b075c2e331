//! Shared fakes for controller integration tests.
//!
//! - `RecordingAi`: an `AiClient` that records requests and lets the test
//!   complete them later through an `AiHandle`
//! - `EventLog`: records every `StudyEvent` a controller publishes
//! - notes fixtures

#![allow(dead_code)]

pub mod fixtures;

use std::cell::RefCell;
use std::rc::Rc;
use std::sync::Arc;

use study_desktop_lib::ai::{AiClient, AiEvent, AiEventSink};
use study_desktop_lib::controller::StudyController;
use study_desktop_lib::events::StudyEvent;
use study_desktop_lib::notes::{NoteSource, StaticNotes};

#[derive(Debug, Default)]
pub struct AiCalls {
    pub sink: Option<AiEventSink>,
    pub flashcard_requests: Vec<String>,
    pub answer_requests: Vec<(String, String)>,
    pub endpoint: Option<String>,
    pub api_key: Option<String>,
}

/// AI client that never talks to the network.
pub struct RecordingAi {
    calls: Rc<RefCell<AiCalls>>,
}

/// Test-side view of a `RecordingAi`.
#[derive(Clone)]
pub struct AiHandle {
    calls: Rc<RefCell<AiCalls>>,
}

impl RecordingAi {
    pub fn new() -> (Box<dyn AiClient>, AiHandle) {
        let calls = Rc::new(RefCell::new(AiCalls::default()));
        let client = Box::new(RecordingAi {
            calls: calls.clone(),
        });
        (client, AiHandle { calls })
    }
}

impl AiClient for RecordingAi {
    fn connect(&mut self, sink: AiEventSink) {
        self.calls.borrow_mut().sink = Some(sink);
    }

    fn request_flashcards(&mut self, notes: &str) {
        self.calls
            .borrow_mut()
            .flashcard_requests
            .push(notes.to_string());
    }

    fn request_answer(&mut self, context: &str, question: &str) {
        self.calls
            .borrow_mut()
            .answer_requests
            .push((context.to_string(), question.to_string()));
    }

    fn set_endpoint_override(&mut self, url: &str) {
        self.calls.borrow_mut().endpoint = Some(url.to_string());
    }

    fn set_api_key_override(&mut self, key: &str) {
        self.calls.borrow_mut().api_key = Some(key.to_string());
    }
}

impl AiHandle {
    pub fn calls(&self) -> std::cell::Ref<'_, AiCalls> {
        self.calls.borrow()
    }

    pub fn request_count(&self) -> usize {
        let calls = self.calls.borrow();
        calls.flashcard_requests.len() + calls.answer_requests.len()
    }

    /// Deliver a completion as the real client would, from "elsewhere".
    pub fn complete(&self, event: AiEvent) {
        let calls = self.calls.borrow();
        let sink = calls.sink.as_ref().expect("client was never connected");
        sink.emit(event);
    }
}

/// Recorded controller notifications.
#[derive(Clone, Default)]
pub struct EventLog {
    events: Rc<RefCell<Vec<StudyEvent>>>,
}

impl EventLog {
    pub fn attach(controller: &mut StudyController) -> Self {
        let log = Self::default();
        let events = log.events.clone();
        controller.subscribe(move |event| events.borrow_mut().push(event.clone()));
        log
    }

    pub fn events(&self) -> Vec<StudyEvent> {
        self.events.borrow().clone()
    }

    pub fn errors(&self) -> Vec<String> {
        self.events
            .borrow()
            .iter()
            .filter_map(|event| match event {
                StudyEvent::Error(message) => Some(message.clone()),
                _ => None,
            })
            .collect()
    }

    pub fn clear(&self) {
        self.events.borrow_mut().clear();
    }
}

pub fn notes(source: StaticNotes) -> Option<Arc<dyn NoteSource>> {
    Some(Arc::new(source))
}

/// Controller over the standard fixture boards, with a recording AI client.
pub fn controller_with_ai() -> (StudyController, AiHandle, EventLog) {
    let (client, handle) = RecordingAi::new();
    let mut controller = StudyController::new(notes(fixtures::boards()), Some(client));
    let log = EventLog::attach(&mut controller);
    (controller, handle, log)
}

/// Controller over the standard fixture boards, without an AI client.
pub fn controller_without_ai() -> (StudyController, EventLog) {
    let mut controller = StudyController::new(notes(fixtures::boards()), None);
    let log = EventLog::attach(&mut controller);
    (controller, log)
}
