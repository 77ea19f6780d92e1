//! Public models handed to applications.

pub mod gift;
pub mod member;
pub mod message;
pub mod room;
pub mod seat;

pub use gift::{VoiceRoomBatchGiftModel, VoiceRoomBatchSeatUserReward, VoiceRoomGiftModel};
pub use member::{property, VoiceRoomMember, VoiceRoomMemberVolumeInfo};
pub use message::{VoiceRoomChatTextMessage, VoiceRoomEndReason};
pub use room::{
    CreateRoomOptions, CreateRoomParams, CreateVoiceRoomDefaultInfo, JoinRoomOptions,
    JoinRoomParams, LiveState, VoiceRoomAnchor, VoiceRoomInfo, VoiceRoomList,
    VoiceRoomLiveModel, VoiceRoomRole,
};
pub use seat::{
    VoiceRoomSeatInfo, VoiceRoomSeatItem, VoiceRoomSeatItemStatus, VoiceRoomSeatRequestItem,
};
