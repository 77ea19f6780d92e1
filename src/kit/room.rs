//! Room lifecycle: list, info, create, join, leave, end.

use std::sync::atomic::Ordering;
use std::sync::Arc;

use crate::error::{Result, VoiceRoomError};
use crate::service::{ClientRole, JoinRoomRequest, RoomContext, RoomListener, ServiceError};
use crate::types::{
    CreateRoomOptions, CreateRoomParams, CreateVoiceRoomDefaultInfo, JoinRoomOptions,
    JoinRoomParams, LiveState, VoiceRoomInfo, VoiceRoomList,
};

use super::events::EventForwarder;
use super::{KitInner, VoiceRoomKit};

fn log_remote(action: &str, e: &ServiceError) {
    tracing::error!(code = e.code, message = %e.message, "Failed to {action}");
}

impl VoiceRoomKit {
    /// One page of rooms of the configured live type.
    pub async fn get_room_list(
        &self,
        live_state: LiveState,
        page_num: i32,
        page_size: i32,
    ) -> Result<VoiceRoomList> {
        tracing::info!(%live_state, page_num, page_size, "Get room list");
        self.inner.require_initialized("get room list")?;
        let live_type = self.inner.live_type.load(Ordering::SeqCst);
        let list = self
            .inner
            .room_service
            .get_room_list(live_type, live_state.raw(), page_num, page_size)
            .await
            .inspect_err(|e| log_remote("get room list", e))?;
        tracing::info!(count = list.list.len(), "Successfully get room list");
        Ok(list.into())
    }

    /// Fetch a room's anchor and live record by live-record id.
    pub async fn get_room_info(&self, live_record_id: i64) -> Result<VoiceRoomInfo> {
        tracing::info!(live_record_id, "Get room info");
        self.inner.require_initialized("get room info")?;
        let resp = self
            .inner
            .room_service
            .get_room_info(live_record_id)
            .await
            .inspect_err(|e| log_remote("get room info", e))?;
        let resp = resp.ok_or_else(|| {
            VoiceRoomError::EmptyResponse("Failed to get room info. RoomInfo is nil.".to_string())
        })?;
        Ok(resp.into())
    }

    /// Topic and cover suggestions for a new room.
    pub async fn get_create_room_default_info(&self) -> Result<CreateVoiceRoomDefaultInfo> {
        tracing::info!("Get create room default info");
        self.inner.require_initialized("get create room default info")?;
        let info = self
            .inner
            .room_service
            .get_default_live_info()
            .await
            .inspect_err(|e| log_remote("get create room default info", e))?;
        Ok(info.into())
    }

    /// Start a room on the backend and remember its live info.
    pub async fn create_room(
        &self,
        params: &CreateRoomParams,
        _options: &CreateRoomOptions,
    ) -> Result<VoiceRoomInfo> {
        tracing::info!(title = %params.title, seat_count = params.seat_count, "Create room");
        self.inner.require_initialized("create room")?;
        let mut params = params.clone();
        params
            .live_type
            .get_or_insert(self.inner.live_type.load(Ordering::SeqCst));
        let resp = self
            .inner
            .room_service
            .start_room(&params)
            .await
            .inspect_err(|e| log_remote("create room", e))?;
        let Some(resp) = resp else {
            let message = "Failed to create room. RoomUuid is nil.";
            tracing::error!("{message}");
            return Err(VoiceRoomError::EmptyResponse(message.to_string()));
        };
        self.inner.session().set_live_info(resp.clone());
        tracing::info!(live_record_id = ?resp.live_record_id(), "Successfully create room");
        Ok(resp.into())
    }

    /// Join a room: toolkit room, RTC channel, chatroom, then room info.
    ///
    /// A room joined earlier through this kit is left first. If RTC,
    /// chatroom or room info fails the new room is left again and no
    /// session remains.
    pub async fn join_room(
        &self,
        params: &JoinRoomParams,
        _options: &JoinRoomOptions,
    ) -> Result<VoiceRoomInfo> {
        tracing::info!(room_uuid = %params.room_uuid, role = %params.role, "Join room");
        let inner = &self.inner;
        inner.require_initialized("join room")?;

        let previous = {
            let mut session = inner.session();
            match session.context() {
                Some(ctx) if ctx.room_uuid() != params.room_uuid => session.detach(),
                _ => None,
            }
        };
        if let Some(previous) = previous {
            tracing::info!(room_uuid = %previous.context.room_uuid(), "Leaving previous room");
            previous.unregister();
            previous.leave().await;
        }

        if let Some(existing) = inner.room_kit.get_room_context(&params.room_uuid) {
            tracing::debug!(room_uuid = %params.room_uuid, "Already in room, leaving first");
            if let Err(e) = existing.leave_room().await {
                tracing::debug!(code = e.code, message = %e.message, "Leaving stale room failed");
            }
            let stale = {
                let mut session = inner.session();
                match session.context() {
                    Some(ctx) if ctx.room_uuid() == params.room_uuid => session.detach(),
                    _ => None,
                }
            };
            if let Some(stale) = stale {
                stale.unregister();
            }
        }

        let request = JoinRoomRequest {
            room_uuid: params.room_uuid.clone(),
            user_name: params.nick.clone(),
            role: params.role.to_string(),
        };
        let context = inner
            .room_kit
            .join_room(&request)
            .await
            .inspect_err(|e| log_remote("join room", e))?;

        let forwarder: Arc<dyn RoomListener> = Arc::new(EventForwarder::new(inner.events.clone()));
        context.add_room_listener(forwarder.clone());
        let replaced = inner.session().attach(context.clone(), forwarder);
        if let Some(replaced) = replaced {
            replaced.unregister();
        }

        if let Err(e) = context.set_client_role(ClientRole::Audience).await {
            tracing::warn!(code = e.code, message = %e.message, "Failed to set client role");
        }

        if let Err(e) = context.join_rtc_channel().await {
            log_remote("join rtc", &e);
            inner.abandon(&context).await;
            return Err(e.into());
        }
        if let Err(e) = context.join_chatroom().await {
            log_remote("join chatroom", &e);
            inner.abandon(&context).await;
            return Err(e.into());
        }
        let resp = match inner.room_service.get_room_info(params.live_record_id).await {
            Ok(Some(resp)) => resp,
            Ok(None) => {
                let message = "Failed to join room. RoomInfo is nil.";
                tracing::error!("{message}");
                inner.abandon(&context).await;
                return Err(VoiceRoomError::EmptyResponse(message.to_string()));
            }
            Err(e) => {
                log_remote("join room", &e);
                inner.abandon(&context).await;
                return Err(e.into());
            }
        };
        inner.session().set_live_info(resp.clone());
        tracing::info!(room_uuid = %params.room_uuid, "Successfully join room");
        Ok(resp.into())
    }

    /// Leave the current room. The session is kept if the toolkit fails.
    pub async fn leave_room(&self) -> Result<()> {
        tracing::info!("Leave room");
        let context = self.inner.require_context("leave room")?;
        context
            .leave_room()
            .await
            .inspect_err(|e| log_remote("leave room", e))?;
        let detached = self.inner.session().end();
        if let Some(detached) = detached {
            detached.unregister();
        }
        tracing::info!("Successfully leave room");
        Ok(())
    }

    /// End the room for everyone. Requires the live record of the room
    /// created or joined last.
    pub async fn end_room(&self) -> Result<()> {
        tracing::info!("End room");
        self.inner.require_initialized("end room")?;
        let (live_record_id, context) = {
            let session = self.inner.session();
            (session.live_record_id(), session.context())
        };
        let Some(live_record_id) = live_record_id else {
            let message = "Failed to end room. LiveRecordId don't exist.";
            tracing::error!("{message}");
            return Err(VoiceRoomError::MissingLiveRecord(message.to_string()));
        };
        if let Some(context) = context {
            if let Err(e) = context.end_room(true).await {
                tracing::warn!(code = e.code, message = %e.message, "Failed to end room context");
            }
        }
        self.inner
            .room_service
            .end_room(live_record_id)
            .await
            .inspect_err(|e| log_remote("end room", e))?;
        let detached = self.inner.session().end();
        if let Some(detached) = detached {
            detached.unregister();
        }
        tracing::info!(live_record_id, "Successfully end room");
        Ok(())
    }
}

impl KitInner {
    /// Leave a half-joined room and drop the session's hold on it.
    async fn abandon(&self, context: &Arc<dyn RoomContext>) {
        if let Err(e) = context.leave_room().await {
            tracing::debug!(code = e.code, message = %e.message, "Leaving after failed join");
        }
        let detached = self.session().detach();
        if let Some(detached) = detached {
            detached.unregister();
        }
    }
}
