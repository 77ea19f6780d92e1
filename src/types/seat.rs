//! Seat models.

use serde::{Deserialize, Serialize};
use strum::Display;

use crate::service::{SeatInfo, SeatItem, SeatRequest, SeatStatus};

/// Seat state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum VoiceRoomSeatItemStatus {
    Initial,
    Waiting,
    Taken,
    Closed,
}

impl From<SeatStatus> for VoiceRoomSeatItemStatus {
    fn from(status: SeatStatus) -> Self {
        match status {
            SeatStatus::Initial => Self::Initial,
            SeatStatus::Waiting => Self::Waiting,
            SeatStatus::Taken => Self::Taken,
            SeatStatus::Closed => Self::Closed,
        }
    }
}

/// One seat slot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VoiceRoomSeatItem {
    pub index: i32,
    pub status: VoiceRoomSeatItemStatus,
    pub user: Option<String>,
    pub user_name: Option<String>,
    pub icon: Option<String>,
}

impl From<&SeatItem> for VoiceRoomSeatItem {
    fn from(item: &SeatItem) -> Self {
        Self {
            index: item.index,
            status: item.status.into(),
            user: item.user.clone(),
            user_name: item.user_name.clone(),
            icon: item.icon.clone(),
        }
    }
}

/// Seat arrangement of the room.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VoiceRoomSeatInfo {
    pub creator: String,
    pub managers: Vec<String>,
    pub seat_items: Vec<VoiceRoomSeatItem>,
}

impl From<SeatInfo> for VoiceRoomSeatInfo {
    fn from(info: SeatInfo) -> Self {
        Self {
            seat_items: info.seat_items.iter().map(Into::into).collect(),
            creator: info.creator,
            managers: info.managers,
        }
    }
}

/// Pending request for a seat.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VoiceRoomSeatRequestItem {
    pub index: i32,
    pub user: String,
    pub user_name: Option<String>,
    pub icon: Option<String>,
}

impl From<SeatRequest> for VoiceRoomSeatRequestItem {
    fn from(req: SeatRequest) -> Self {
        Self {
            index: req.index,
            user: req.user,
            user_name: req.user_name,
            icon: req.icon,
        }
    }
}
