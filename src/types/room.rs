//! Room and live models plus create/join parameters.

use bon::Builder;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use crate::service::{DefaultLiveInfo, LiveAnchor, LiveListResponse, LiveRecord, LiveResponse};

/// Live state filter for room listing.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Display, EnumString)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum LiveState {
    NotStarted,
    Live,
    Ended,
}

impl LiveState {
    /// Raw value understood by the room service.
    pub fn raw(self) -> i32 {
        match self {
            Self::NotStarted => 0,
            Self::Live => 1,
            Self::Ended => -1,
        }
    }
}

/// Role of the local user when joining.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Display, EnumString)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum VoiceRoomRole {
    Host,
    Audience,
}

/// Room host.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VoiceRoomAnchor {
    pub user_uuid: String,
    pub user_name: String,
    pub icon: Option<String>,
}

/// Live record of a room.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VoiceRoomLiveModel {
    pub room_uuid: String,
    pub live_record_id: i64,
    pub live_type: i32,
    pub live_status: i32,
    pub live_topic: String,
    pub cover: Option<String>,
    pub audience_count: i64,
    pub on_seat_count: i64,
    pub reward_total: i64,
}

/// Room info handed to applications.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VoiceRoomInfo {
    pub anchor: VoiceRoomAnchor,
    pub live: VoiceRoomLiveModel,
}

impl From<LiveAnchor> for VoiceRoomAnchor {
    fn from(anchor: LiveAnchor) -> Self {
        Self {
            user_uuid: anchor.user_uuid.unwrap_or_default(),
            user_name: anchor.user_name.unwrap_or_default(),
            icon: anchor.icon,
        }
    }
}

impl From<LiveRecord> for VoiceRoomLiveModel {
    fn from(live: LiveRecord) -> Self {
        Self {
            room_uuid: live.room_uuid.unwrap_or_default(),
            live_record_id: live.live_record_id.unwrap_or_default(),
            live_type: live.live_type.unwrap_or_default(),
            live_status: live.live_status.unwrap_or_default(),
            live_topic: live.live_topic.unwrap_or_default(),
            cover: live.cover,
            audience_count: live.audience_count.unwrap_or_default(),
            on_seat_count: live.on_seat_count.unwrap_or_default(),
            reward_total: live.reward_total.unwrap_or_default(),
        }
    }
}

impl From<LiveResponse> for VoiceRoomInfo {
    fn from(resp: LiveResponse) -> Self {
        Self {
            anchor: resp.anchor.map(Into::into).unwrap_or_default(),
            live: resp.live.map(Into::into).unwrap_or_default(),
        }
    }
}

/// One page of rooms.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VoiceRoomList {
    pub list: Vec<VoiceRoomInfo>,
    pub page_num: i32,
    pub has_next_page: bool,
}

impl From<LiveListResponse> for VoiceRoomList {
    fn from(resp: LiveListResponse) -> Self {
        Self {
            list: resp.list.into_iter().map(Into::into).collect(),
            page_num: resp.page_num,
            has_next_page: resp.has_next_page,
        }
    }
}

/// Defaults offered by the backend for a new room.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CreateVoiceRoomDefaultInfo {
    pub topic: String,
    pub live_picture: String,
    pub default_pictures: Vec<String>,
}

impl From<DefaultLiveInfo> for CreateVoiceRoomDefaultInfo {
    fn from(info: DefaultLiveInfo) -> Self {
        Self {
            topic: info.topic.unwrap_or_default(),
            live_picture: info.live_picture.unwrap_or_default(),
            default_pictures: info.default_pictures,
        }
    }
}

/// Parameters for creating a room.
#[derive(Debug, Clone, PartialEq, Builder, Serialize, Deserialize)]
pub struct CreateRoomParams {
    #[builder(into)]
    pub title: String,
    #[builder(into)]
    pub nick: String,
    #[builder(default = 9)]
    pub seat_count: i32,
    #[builder(default)]
    pub config_id: i64,
    #[builder(into)]
    pub cover: Option<String>,
    /// Falls back to the kit's configured live type when unset.
    pub live_type: Option<i32>,
    #[builder(into)]
    pub ext: Option<String>,
}

/// Options for creating a room.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CreateRoomOptions {}

/// Parameters for joining a room.
#[derive(Debug, Clone, PartialEq, Builder, Serialize, Deserialize)]
pub struct JoinRoomParams {
    #[builder(into)]
    pub room_uuid: String,
    #[builder(into)]
    pub nick: String,
    pub role: VoiceRoomRole,
    pub live_record_id: i64,
    #[builder(into)]
    pub ext: Option<String>,
}

/// Options for joining a room.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct JoinRoomOptions {}
