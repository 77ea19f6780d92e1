//! Gift models built from decoded reward messages.

use serde::{Deserialize, Serialize};

use crate::message::{BatchRewardMessage, RewardMessage, SeatUserReward};

/// A single gift received in the room.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VoiceRoomGiftModel {
    pub send_account: String,
    pub send_nick: String,
    pub gift_id: i64,
}

impl VoiceRoomGiftModel {
    /// Build the model; `None` when a required field is missing.
    pub fn from_message(msg: &RewardMessage) -> Option<Self> {
        let rewarder_uuid = msg.rewarder_user_uuid.as_ref()?;
        let send_nick = msg.rewarder_user_name.clone()?;
        let gift_id = msg.gift_id?;
        Some(Self {
            send_account: msg
                .sender_user_uuid
                .clone()
                .unwrap_or_else(|| rewarder_uuid.clone()),
            send_nick,
            gift_id,
        })
    }
}

/// Reward standing of one seat after a batch gift.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VoiceRoomBatchSeatUserReward {
    pub seat_index: i32,
    pub user_uuid: Option<String>,
    pub user_name: Option<String>,
    pub reward_total: i64,
    pub icon: Option<String>,
}

impl From<&SeatUserReward> for VoiceRoomBatchSeatUserReward {
    fn from(reward: &SeatUserReward) -> Self {
        Self {
            seat_index: reward.seat_index,
            user_uuid: reward.user_uuid.clone(),
            user_name: reward.user_name.clone(),
            reward_total: reward.reward_total,
            icon: reward.icon.clone(),
        }
    }
}

/// A batch of gifts sent to one or more members.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VoiceRoomBatchGiftModel {
    pub send_account: String,
    pub gift_id: i64,
    pub gift_count: i64,
    pub rewarder_user_uuid: String,
    pub rewarder_user_name: String,
    pub rewardee_user_uuid: String,
    pub rewardee_user_name: String,
    pub seat_user_reward: Vec<VoiceRoomBatchSeatUserReward>,
}

impl VoiceRoomBatchGiftModel {
    /// Build the model; `None` when a required field is missing.
    pub fn from_message(msg: &BatchRewardMessage) -> Option<Self> {
        let rewarder_user_uuid = msg.rewarder_user_uuid.clone()?;
        let rewarder_user_name = msg.rewarder_user_name.clone()?;
        let rewardee_user_name = msg.rewardee_user_name.clone()?;
        let gift_id = msg.gift_id?;
        Some(Self {
            send_account: msg
                .sender_user_uuid
                .clone()
                .unwrap_or_else(|| rewarder_user_uuid.clone()),
            gift_id,
            gift_count: msg.gift_count.unwrap_or_default(),
            rewarder_user_uuid,
            rewarder_user_name,
            rewardee_user_uuid: msg.rewardee_user_uuid.clone().unwrap_or_default(),
            rewardee_user_name,
            seat_user_reward: msg.seat_user_reward.iter().map(Into::into).collect(),
        })
    }
}
