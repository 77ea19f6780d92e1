//! Per-room session state owned by the kit.

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use strum::Display;

use crate::service::{LiveResponse, RoomContext, RoomListener};

/// Where the kit is in a room's lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, Display)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum SessionPhase {
    #[default]
    Idle,
    Joined,
    Ended,
}

/// The room the kit is currently in, if any.
///
/// Live info may exist without a context (after `create_room`, before
/// `join_room`). The forwarder is the listener the kit registered with the
/// context; it is handed back on detach so it can be removed.
#[derive(Default)]
pub(crate) struct RoomSession {
    phase: SessionPhase,
    context: Option<Arc<dyn RoomContext>>,
    forwarder: Option<Arc<dyn RoomListener>>,
    live_info: Option<LiveResponse>,
    on_seat: bool,
}

impl fmt::Debug for RoomSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RoomSession")
            .field("phase", &self.phase)
            .field("room_uuid", &self.context.as_ref().map(|c| c.room_uuid()))
            .field("live_record_id", &self.live_record_id())
            .field("on_seat", &self.on_seat)
            .finish()
    }
}

/// Context and forwarder released by [`RoomSession::detach`].
pub(crate) struct Detached {
    pub context: Arc<dyn RoomContext>,
    pub forwarder: Option<Arc<dyn RoomListener>>,
}

impl Detached {
    /// Unregister the kit's forwarder from the released context.
    pub fn unregister(&self) {
        if let Some(forwarder) = &self.forwarder {
            self.context.remove_room_listener(forwarder);
        }
    }

    /// Leave the released room. Failures are only logged.
    pub async fn leave(&self) {
        if let Err(e) = self.context.leave_room().await {
            tracing::warn!(code = e.code, message = %e.message, "Failed to leave previous room");
        }
    }
}

impl RoomSession {
    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    pub fn context(&self) -> Option<Arc<dyn RoomContext>> {
        self.context.clone()
    }

    pub fn live_info(&self) -> Option<&LiveResponse> {
        self.live_info.as_ref()
    }

    pub fn live_record_id(&self) -> Option<i64> {
        self.live_info.as_ref().and_then(LiveResponse::live_record_id)
    }

    pub fn is_on_seat(&self) -> bool {
        self.on_seat
    }

    pub fn set_on_seat(&mut self, on_seat: bool) {
        self.on_seat = on_seat;
    }

    pub fn set_live_info(&mut self, info: LiveResponse) {
        self.live_info = Some(info);
    }

    /// Bind a freshly joined context. Any previous binding is returned.
    pub fn attach(
        &mut self,
        context: Arc<dyn RoomContext>,
        forwarder: Arc<dyn RoomListener>,
    ) -> Option<Detached> {
        let previous = self.detach();
        self.context = Some(context);
        self.forwarder = Some(forwarder);
        self.phase = SessionPhase::Joined;
        previous
    }

    /// Release the context without touching live info.
    pub fn detach(&mut self) -> Option<Detached> {
        self.on_seat = false;
        let context = self.context.take()?;
        self.phase = SessionPhase::Idle;
        Some(Detached {
            context,
            forwarder: self.forwarder.take(),
        })
    }

    /// Close the session: drop the context and the live info.
    pub fn end(&mut self) -> Option<Detached> {
        let detached = self.detach();
        self.live_info = None;
        self.phase = SessionPhase::Ended;
        detached
    }
}
