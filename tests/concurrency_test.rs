//! Integration tests for events delivered from several threads.

mod common;

use std::sync::{Arc, Mutex};
use std::time::Duration;

use bytes::Bytes;
use common::running_task;
use urlsession_double::adapters::{DelegateHandlers, RecordingDelegate};
use urlsession_double::domain::{TaskError, TaskState};
use urlsession_double::traits::{SessionDelegate, SessionTask};
use urlsession_double::{MockSession, SessionError};

/// Logs callback entry and exit, pausing inside the data callback.
#[derive(Default)]
struct SlowDataDelegate {
    log: Mutex<Vec<String>>,
}

impl SlowDataDelegate {
    fn entries(&self) -> Vec<String> {
        self.log.lock().unwrap().clone()
    }
}

impl SessionDelegate for SlowDataDelegate {
    fn did_receive_data(&self, task: &dyn SessionTask, _data: &Bytes) {
        self.log.lock().unwrap().push("data-start".to_string());
        std::thread::sleep(Duration::from_millis(50));
        self.log
            .lock()
            .unwrap()
            .push(format!("data-end({:?})", task.state()));
    }

    fn task_did_complete(&self, _task: &dyn SessionTask, _error: Option<&TaskError>) {
        self.log.lock().unwrap().push("complete".to_string());
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_interleaved_chunks_are_all_kept() {
    let session = MockSession::new();
    let delegate = Arc::new(RecordingDelegate::new());
    session.set_delegate(&delegate);
    let task = running_task(&session, "https://example.com/parallel");

    let mut handles = Vec::new();
    for worker in 0..8u8 {
        let task = task.clone();
        handles.push(tokio::spawn(async move {
            for _ in 0..50 {
                task.receive_data(vec![worker]).unwrap();
            }
        }));
    }
    for handle in handles {
        handle.await.unwrap();
    }

    let data = task.data();
    assert_eq!(data.len(), 8 * 50);
    for worker in 0..8u8 {
        assert_eq!(data.iter().filter(|byte| **byte == worker).count(), 50);
    }
    assert_eq!(delegate.len(), 8 * 50);
    assert_eq!(task.state(), TaskState::ReceivingData);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_racing_completions_complete_once() {
    let session = MockSession::new();
    let delegate = Arc::new(RecordingDelegate::new());
    session.set_delegate(&delegate);
    let task = running_task(&session, "https://example.com/race");

    let mut handles = Vec::new();
    for _ in 0..16 {
        let task = task.clone();
        handles.push(tokio::spawn(async move { task.complete_with_error(None) }));
    }

    let mut succeeded = 0;
    for handle in handles {
        match handle.await.unwrap() {
            Ok(()) => succeeded += 1,
            Err(SessionError::DoubleCompletion { .. }) => {}
            Err(other) => panic!("unexpected error: {}", other),
        }
    }

    assert_eq!(succeeded, 1);
    assert_eq!(delegate.completion_count(task.task_identifier()), 1);
    assert_eq!(task.state(), TaskState::Completed);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_registration_yields_unique_ids() {
    let session = MockSession::new();

    let mut handles = Vec::new();
    for i in 0..32 {
        let session = session.clone();
        handles.push(tokio::task::spawn_blocking(move || {
            session
                .register(urlsession_double::domain::Request::get(format!(
                    "https://example.com/{}",
                    i
                )))
                .task_identifier()
        }));
    }

    let mut ids = Vec::new();
    for handle in handles {
        ids.push(handle.await.unwrap());
    }
    ids.sort();
    ids.dedup();
    assert_eq!(ids.len(), 32);
    assert_eq!(session.len(), 32);
}

// ============================================================================
// Delivery ordering
// ============================================================================

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_completion_waits_for_data_callback_to_return() {
    let session = MockSession::new();
    let delegate = Arc::new(SlowDataDelegate::default());
    session.set_delegate(&delegate);
    let task = running_task(&session, "https://example.com/slow");

    let receiver = {
        let task = task.clone();
        tokio::task::spawn_blocking(move || task.receive_data("x"))
    };

    while task.state() != TaskState::ReceivingData {
        tokio::time::sleep(Duration::from_millis(1)).await;
    }
    let completer = {
        let task = task.clone();
        tokio::task::spawn_blocking(move || task.complete_with_error(None))
    };

    receiver.await.unwrap().unwrap();
    completer.await.unwrap().unwrap();

    assert_eq!(
        delegate.entries(),
        vec!["data-start", "data-end(ReceivingData)", "complete"]
    );
    assert_eq!(task.state(), TaskState::Completed);
}

#[test]
fn test_delegate_can_drive_same_task_from_callback() {
    let session = MockSession::new();
    let task = running_task(&session, "https://example.com/reentrant");
    let log = Arc::new(Mutex::new(Vec::new()));

    let driven = task.clone();
    let data_log = log.clone();
    let complete_log = log.clone();
    let delegate = Arc::new(
        DelegateHandlers::new()
            .on_data(move |_task, data| {
                data_log.lock().unwrap().push(format!("data:{}", data.len()));
                driven.complete_with_error(None).unwrap();
            })
            .on_complete(move |task, _error| {
                complete_log
                    .lock()
                    .unwrap()
                    .push(format!("complete:{:?}", task.state()));
            }),
    );
    session.set_delegate(&delegate);

    task.receive_data("abc").unwrap();

    assert_eq!(
        *log.lock().unwrap(),
        vec!["data:3".to_string(), "complete:Completed".to_string()]
    );
    assert_eq!(task.state(), TaskState::Completed);
}
