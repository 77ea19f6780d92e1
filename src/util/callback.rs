//! Callback adapter over async results.
//!
//! Applications that prefer completion callbacks to `.await` get the
//! `(code, message, payload)` triple: code `0` and a payload on success, the
//! error's code and message otherwise.

use std::future::Future;

use tokio::task::JoinHandle;

use crate::error::{ErrorCode, Result};

/// Completion callback: `(code, message, payload)`.
pub type VoiceRoomCallback<T> = Box<dyn FnOnce(i32, Option<String>, Option<T>) + Send>;

/// Flattened outcome of an operation.
#[derive(Debug, Clone, PartialEq)]
pub struct Completion<T> {
    pub code: i32,
    pub message: Option<String>,
    pub payload: Option<T>,
}

impl<T> Completion<T> {
    pub fn is_success(&self) -> bool {
        self.code == ErrorCode::SUCCESS
    }

    /// Hand the triple to `callback`.
    pub fn deliver(self, callback: VoiceRoomCallback<T>) {
        callback(self.code, self.message, self.payload)
    }
}

impl<T> From<Result<T>> for Completion<T> {
    fn from(result: Result<T>) -> Self {
        match result {
            Ok(payload) => Self {
                code: ErrorCode::SUCCESS,
                message: None,
                payload: Some(payload),
            },
            Err(err) => Self {
                code: err.code(),
                message: Some(err.message()),
                payload: None,
            },
        }
    }
}

/// Run `operation` on the current runtime and report its outcome through
/// `callback`.
pub fn spawn_with_callback<T, F>(operation: F, callback: VoiceRoomCallback<T>) -> JoinHandle<()>
where
    T: Send + 'static,
    F: Future<Output = Result<T>> + Send + 'static,
{
    tokio::spawn(async move {
        Completion::from(operation.await).deliver(callback);
    })
}
