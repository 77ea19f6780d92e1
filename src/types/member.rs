//! Member models.

use serde::{Deserialize, Serialize};

use crate::service::{MemberVolume, RoomMember};

/// Member property keys and values the kit understands.
pub mod property {
    /// Local audio device state.
    pub const MUTE_AUDIO_KEY: &str = "recordDevice";
    pub const MUTE_AUDIO_ON: &str = "on";
    pub const MUTE_AUDIO_OFF: &str = "off";

    /// Whether a member may open the microphone.
    pub const CAN_OPEN_MIC_KEY: &str = "canOpenMic";
    pub const CAN_OPEN_MIC_NO: &str = "0";
    pub const CAN_OPEN_MIC_YES: &str = "1";
}

/// A room member as seen by applications.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VoiceRoomMember {
    pub account: String,
    pub name: String,
    pub role: String,
    pub avatar: Option<String>,
    pub is_audio_on: bool,
    pub is_audio_banned: bool,
}

impl From<&RoomMember> for VoiceRoomMember {
    fn from(member: &RoomMember) -> Self {
        let is_audio_banned = member
            .properties
            .get(property::CAN_OPEN_MIC_KEY)
            .is_some_and(|v| v == property::CAN_OPEN_MIC_NO);
        Self {
            account: member.uuid.clone(),
            name: member.name.clone(),
            role: member.role.clone(),
            avatar: member.avatar.clone(),
            is_audio_on: member.is_audio_on,
            is_audio_banned,
        }
    }
}

/// Volume of one member.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VoiceRoomMemberVolumeInfo {
    pub user_uuid: String,
    pub volume: i32,
}

impl From<&MemberVolume> for VoiceRoomMemberVolumeInfo {
    fn from(info: &MemberVolume) -> Self {
        Self {
            user_uuid: info.user_uuid.clone(),
            volume: info.volume,
        }
    }
}
