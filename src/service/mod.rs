//! Seams to the wrapped room toolkit and the room service backend.
//!
//! The kit never talks to a network itself. Everything goes through these
//! traits, which an application implements over its toolkit bindings (and
//! tests implement with doubles).

pub mod types;

use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;

use crate::types::CreateRoomParams;
pub use types::*;

/// Failure reported by the toolkit or the backend: code plus message.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("code {code}: {message}")]
pub struct ServiceError {
    pub code: i32,
    pub message: String,
}

impl ServiceError {
    pub fn new(code: i32, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }
}

/// Result of a toolkit or backend call.
pub type ServiceResult<T> = std::result::Result<T, ServiceError>;

/// Business backend for voice rooms (room list, live records, rewards).
#[async_trait]
pub trait RoomService: Send + Sync {
    async fn get_room_list(
        &self,
        live_type: i32,
        live_state: i32,
        page_num: i32,
        page_size: i32,
    ) -> ServiceResult<LiveListResponse>;

    async fn get_room_info(&self, live_record_id: i64) -> ServiceResult<Option<LiveResponse>>;

    async fn get_default_live_info(&self) -> ServiceResult<DefaultLiveInfo>;

    /// Create the room and its live record.
    async fn start_room(&self, params: &CreateRoomParams) -> ServiceResult<Option<LiveResponse>>;

    async fn end_room(&self, live_record_id: i64) -> ServiceResult<()>;

    async fn reward(&self, live_record_id: i64, gift_id: i64) -> ServiceResult<()>;

    async fn batch_reward(
        &self,
        live_record_id: i64,
        gift_id: i64,
        gift_count: i64,
        user_uuids: &[String],
    ) -> ServiceResult<()>;
}

/// Entry point of the room toolkit.
#[async_trait]
pub trait RoomKit: Send + Sync {
    async fn initialize(&self, options: &RoomKitOptions) -> ServiceResult<()>;

    async fn login(&self, account: &str, token: &str) -> ServiceResult<()>;

    async fn logout(&self) -> ServiceResult<()>;

    fn is_logged_in(&self) -> bool;

    async fn join_room(&self, request: &JoinRoomRequest) -> ServiceResult<Arc<dyn RoomContext>>;

    /// Context of a room this client is already in, if any.
    fn get_room_context(&self, room_uuid: &str) -> Option<Arc<dyn RoomContext>>;

    /// Member-directed custom message over the message channel.
    async fn send_custom_message(
        &self,
        room_uuid: &str,
        user_uuid: &str,
        command_id: i32,
        data: &str,
    ) -> ServiceResult<()>;
}

/// Receives events for one room from the toolkit.
///
/// Implementations may be called from any thread.
pub trait RoomListener: Send + Sync {
    fn on_room_event(&self, event: RoomKitEvent);
}

/// Active membership in one room: room, RTC, chat and seat operations.
#[async_trait]
pub trait RoomContext: Send + Sync {
    fn room_uuid(&self) -> String;

    fn local_member(&self) -> RoomMember;

    fn remote_members(&self) -> Vec<RoomMember>;

    fn add_room_listener(&self, listener: Arc<dyn RoomListener>);

    fn remove_room_listener(&self, listener: &Arc<dyn RoomListener>);

    async fn leave_room(&self) -> ServiceResult<()>;

    async fn end_room(&self, force: bool) -> ServiceResult<()>;

    async fn update_member_property(
        &self,
        user_uuid: &str,
        key: &str,
        value: &str,
    ) -> ServiceResult<()>;

    async fn delete_member_property(&self, user_uuid: &str, key: &str) -> ServiceResult<()>;

    // RTC
    async fn set_client_role(&self, role: ClientRole) -> ServiceResult<()>;

    async fn join_rtc_channel(&self) -> ServiceResult<()>;

    async fn mute_my_audio(&self) -> ServiceResult<()>;

    async fn unmute_my_audio(&self) -> ServiceResult<()>;

    // Chat
    async fn join_chatroom(&self) -> ServiceResult<()>;

    async fn send_broadcast_text_message(&self, message: &str) -> ServiceResult<()>;

    // Seats
    async fn submit_seat_request(&self, seat_index: i32, exclusive: bool) -> ServiceResult<()>;

    async fn cancel_seat_request(&self) -> ServiceResult<()>;

    async fn approve_seat_request(&self, user: &str) -> ServiceResult<()>;

    async fn reject_seat_request(&self, user: &str) -> ServiceResult<()>;

    async fn kick_seat(&self, user: &str) -> ServiceResult<()>;

    async fn leave_seat(&self) -> ServiceResult<()>;

    async fn get_seat_info(&self) -> ServiceResult<SeatInfo>;

    async fn get_seat_request_list(&self) -> ServiceResult<Vec<SeatRequest>>;
}
