//! Wire-side types exchanged with the room toolkit and the room service.
//!
//! These mirror what the wrapped SDK hands back. Public models in
//! [`crate::types`] are built from them.

use std::collections::HashMap;

use bon::Builder;
use serde::{Deserialize, Serialize};
use strum::Display;

/// Anchor (host) of a live room as returned by the room service.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LiveAnchor {
    pub user_uuid: Option<String>,
    pub user_name: Option<String>,
    pub icon: Option<String>,
}

/// Live record of a room as returned by the room service.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LiveRecord {
    pub room_uuid: Option<String>,
    pub live_record_id: Option<i64>,
    pub live_type: Option<i32>,
    pub live_status: Option<i32>,
    pub live_topic: Option<String>,
    pub cover: Option<String>,
    pub audience_count: Option<i64>,
    pub on_seat_count: Option<i64>,
    pub reward_total: Option<i64>,
}

/// Response of `start_room` / `get_room_info`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LiveResponse {
    pub anchor: Option<LiveAnchor>,
    pub live: Option<LiveRecord>,
}

impl LiveResponse {
    pub fn live_record_id(&self) -> Option<i64> {
        self.live.as_ref().and_then(|live| live.live_record_id)
    }
}

/// One page of the room list.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LiveListResponse {
    pub page_num: i32,
    pub has_next_page: bool,
    pub list: Vec<LiveResponse>,
}

/// Defaults offered when creating a room.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DefaultLiveInfo {
    pub topic: Option<String>,
    pub live_picture: Option<String>,
    pub default_pictures: Vec<String>,
}

/// Options handed to [`RoomKit::initialize`](super::RoomKit::initialize).
#[derive(Debug, Clone, Default, PartialEq, Builder)]
pub struct RoomKitOptions {
    #[builder(into)]
    pub app_key: String,
    #[builder(into)]
    pub server_url: Option<String>,
    #[builder(default)]
    pub extras: HashMap<String, String>,
}

/// Request handed to [`RoomKit::join_room`](super::RoomKit::join_room).
#[derive(Debug, Clone, PartialEq)]
pub struct JoinRoomRequest {
    pub room_uuid: String,
    pub user_name: String,
    pub role: String,
}

/// RTC client role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
#[strum(serialize_all = "snake_case")]
pub enum ClientRole {
    Broadcaster,
    Audience,
}

/// A member as the toolkit describes it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RoomMember {
    pub uuid: String,
    pub name: String,
    pub role: String,
    pub avatar: Option<String>,
    pub is_audio_on: bool,
    pub properties: HashMap<String, String>,
}

/// Per-member volume reported by the RTC layer.
#[derive(Debug, Clone, PartialEq)]
pub struct MemberVolume {
    pub user_uuid: String,
    pub volume: i32,
}

/// Raw seat status codes used by the toolkit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeatStatus {
    Initial,
    Waiting,
    Taken,
    Closed,
}

/// A seat slot as the toolkit describes it.
#[derive(Debug, Clone, PartialEq)]
pub struct SeatItem {
    pub index: i32,
    pub status: SeatStatus,
    pub user: Option<String>,
    pub user_name: Option<String>,
    pub icon: Option<String>,
}

/// Snapshot of the seat arrangement.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SeatInfo {
    pub creator: String,
    pub managers: Vec<String>,
    pub seat_items: Vec<SeatItem>,
}

/// A pending seat request.
#[derive(Debug, Clone, PartialEq)]
pub struct SeatRequest {
    pub index: i32,
    pub user: String,
    pub user_name: Option<String>,
    pub icon: Option<String>,
}

/// Chat text message from the chatroom.
#[derive(Debug, Clone, PartialEq)]
pub struct ChatTextMessage {
    pub message_uuid: Option<String>,
    pub from_user_uuid: Option<String>,
    pub from_nick: Option<String>,
    pub text: String,
    /// Milliseconds since the Unix epoch.
    pub time: i64,
}

/// Custom message from the chatroom; `attach_str` carries JSON.
#[derive(Debug, Clone, PartialEq)]
pub struct ChatCustomMessage {
    pub from_user_uuid: Option<String>,
    pub attach_str: Option<String>,
    pub time: i64,
}

/// Any chatroom message.
#[derive(Debug, Clone, PartialEq)]
pub enum ChatMessage {
    Text(ChatTextMessage),
    Custom(ChatCustomMessage),
    Image,
    File,
}

/// Events pushed by the toolkit into a registered [`RoomListener`](super::RoomListener).
#[derive(Debug, Clone, PartialEq)]
pub enum RoomKitEvent {
    MemberJoinRoom(Vec<RoomMember>),
    MemberLeaveRoom(Vec<RoomMember>),
    MemberJoinChatroom(Vec<RoomMember>),
    MemberJoinRtcChannel(Vec<RoomMember>),
    MemberPropertiesChanged {
        member: RoomMember,
        properties: HashMap<String, String>,
    },
    /// Raw end-reason code.
    RoomEnded(i32),
    RtcChannelError(i32),
    RtcAudioVolumeIndication {
        volumes: Vec<MemberVolume>,
        total_volume: i32,
    },
    RtcAudioEffectFinished {
        effect_id: u32,
    },
    RtcAudioEffectTimestampUpdate {
        effect_id: u32,
        timestamp_ms: u64,
    },
    ChatroomMessages(Vec<ChatMessage>),
    SeatRequestSubmitted {
        seat_index: i32,
        user: String,
    },
    SeatRequestCancelled {
        seat_index: i32,
        user: String,
    },
    SeatRequestApproved {
        seat_index: i32,
        user: String,
        operate_by: String,
        is_auto_agree: bool,
    },
    SeatRequestRejected {
        seat_index: i32,
        user: String,
        operate_by: String,
    },
    SeatLeave {
        seat_index: i32,
        user: String,
    },
    SeatKicked {
        seat_index: i32,
        user: String,
        operate_by: String,
    },
    SeatListChanged(Vec<SeatItem>),
    SeatInvitationAccepted {
        seat_index: i32,
        user: String,
        is_auto_agree: bool,
    },
}
