//! Chat message and room-end models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use crate::service::ChatTextMessage;

/// A text message received from the chatroom.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VoiceRoomChatTextMessage {
    pub message_uuid: Option<String>,
    pub from_user_uuid: String,
    pub from_nick: String,
    pub text: String,
    pub time: Option<DateTime<Utc>>,
}

impl From<&ChatTextMessage> for VoiceRoomChatTextMessage {
    fn from(msg: &ChatTextMessage) -> Self {
        Self {
            message_uuid: msg.message_uuid.clone(),
            from_user_uuid: msg.from_user_uuid.clone().unwrap_or_default(),
            from_nick: msg.from_nick.clone().unwrap_or_default(),
            text: msg.text.clone(),
            time: DateTime::from_timestamp_millis(msg.time),
        }
    }
}

/// Why a room ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum VoiceRoomEndReason {
    LeaveBySelf,
    SyncDataError,
    KickBySelf,
    KickOut,
    CloseByMember,
    EndOfLife,
    AllMembersOut,
    CloseByBackend,
    LoginStateError,
    Unknown,
}

impl VoiceRoomEndReason {
    /// Map the toolkit's raw code; unrecognised codes become `Unknown`.
    pub fn from_raw(raw: i32) -> Self {
        match raw {
            0 => Self::LeaveBySelf,
            1 => Self::SyncDataError,
            2 => Self::KickBySelf,
            3 => Self::KickOut,
            4 => Self::CloseByMember,
            5 => Self::EndOfLife,
            6 => Self::AllMembersOut,
            7 => Self::CloseByBackend,
            8 => Self::LoginStateError,
            _ => Self::Unknown,
        }
    }
}
