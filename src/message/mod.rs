//! Custom chatroom message decoding.
//!
//! Custom messages carry a JSON attachment shaped like
//! `{ "subCmd": int, "type": int, "data": {...}? }`. The `(subCmd, type)`
//! pair selects a schema from a closed table; anything that does not match,
//! or matches but fails to decode, is dropped.

use std::ops::RangeInclusive;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use strum::Display;

/// Command ids accepted for member-directed custom messages.
pub const CUSTOM_COMMAND_RANGE: RangeInclusive<i32> = 10000..=19999;

/// Schemas a custom message can decode into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
#[strum(serialize_all = "snake_case")]
pub enum CustomSchema {
    Reward,
    BatchReward,
}

/// `(subCmd, type)` → schema. First match wins.
pub const SCHEMA_TABLE: &[((i64, i64), CustomSchema)] = &[
    ((2, 1001), CustomSchema::Reward),
    ((4, 1002), CustomSchema::BatchReward),
];

/// Single gift payload.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RewardMessage {
    pub sender_user_uuid: Option<String>,
    pub send_time: Option<i64>,
    pub rewarder_user_uuid: Option<String>,
    pub rewarder_user_name: Option<String>,
    pub rewardee_user_uuid: Option<String>,
    pub rewardee_user_name: Option<String>,
    pub gift_id: Option<i64>,
}

/// Per-seat reward standing inside a batch gift payload.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SeatUserReward {
    pub seat_index: i32,
    pub user_uuid: Option<String>,
    pub user_name: Option<String>,
    pub reward_total: i64,
    pub icon: Option<String>,
}

/// Batch gift payload.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BatchRewardMessage {
    pub sender_user_uuid: Option<String>,
    pub send_time: Option<i64>,
    pub rewarder_user_uuid: Option<String>,
    pub rewarder_user_name: Option<String>,
    pub rewardee_user_uuid: Option<String>,
    pub rewardee_user_name: Option<String>,
    pub gift_id: Option<i64>,
    pub gift_count: Option<i64>,
    pub seat_user_reward: Vec<SeatUserReward>,
}

/// A recognised custom message.
#[derive(Debug, Clone, PartialEq)]
pub enum CustomMessage {
    /// Carries `data.cmd`; acknowledged, nothing else happens.
    Command(i64),
    Reward(RewardMessage),
    BatchReward(BatchRewardMessage),
}

/// Look up the schema for a `(subCmd, type)` pair.
pub fn schema_for(sub_cmd: i64, kind: i64) -> Option<CustomSchema> {
    SCHEMA_TABLE
        .iter()
        .find(|(tag, _)| *tag == (sub_cmd, kind))
        .map(|(_, schema)| *schema)
}

/// Decode a custom message attachment. `None` means "drop".
pub fn decode_custom_message(attach: &str) -> Option<CustomMessage> {
    let value: Value = match serde_json::from_str(attach) {
        Ok(value @ Value::Object(_)) => value,
        Ok(_) => {
            tracing::debug!("Dropping custom message: attachment is not an object");
            return None;
        }
        Err(e) => {
            tracing::debug!(error = %e, "Dropping custom message: attachment is not JSON");
            return None;
        }
    };

    if let Some(cmd) = value
        .get("data")
        .and_then(|data| data.get("cmd"))
        .and_then(Value::as_i64)
    {
        return Some(CustomMessage::Command(cmd));
    }

    let sub_cmd = value.get("subCmd").and_then(Value::as_i64);
    let kind = value.get("type").and_then(Value::as_i64);
    let (Some(sub_cmd), Some(kind)) = (sub_cmd, kind) else {
        tracing::debug!("Dropping custom message: missing subCmd/type");
        return None;
    };
    let Some(schema) = schema_for(sub_cmd, kind) else {
        tracing::debug!(sub_cmd, kind, "Dropping custom message: unknown tag");
        return None;
    };

    let decoded = match schema {
        CustomSchema::Reward => serde_json::from_value(value).map(CustomMessage::Reward),
        CustomSchema::BatchReward => {
            serde_json::from_value(value).map(CustomMessage::BatchReward)
        }
    };
    match decoded {
        Ok(message) => Some(message),
        Err(e) => {
            tracing::debug!(%schema, error = %e, "Dropping custom message: decode failed");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn data_cmd_takes_precedence_over_tags() {
        let raw = r#"{"subCmd":2,"type":1001,"data":{"cmd":7},"giftId":1}"#;
        assert_eq!(decode_custom_message(raw), Some(CustomMessage::Command(7)));
    }

    #[test]
    fn non_integer_data_cmd_falls_through_to_tag_table() {
        let raw = r#"{"subCmd":2,"type":1001,"data":{"cmd":"x"},"rewarderUserUuid":"u1"}"#;
        assert!(matches!(
            decode_custom_message(raw),
            Some(CustomMessage::Reward(_))
        ));
    }

    #[test]
    fn reward_tag_decodes_reward_schema() {
        let raw = r#"{"subCmd":2,"type":1001,"rewarderUserUuid":"u1","rewarderUserName":"Alice","giftId":5}"#;
        let Some(CustomMessage::Reward(msg)) = decode_custom_message(raw) else {
            panic!("expected reward");
        };
        assert_eq!(msg.rewarder_user_uuid.as_deref(), Some("u1"));
        assert_eq!(msg.gift_id, Some(5));
    }

    #[test]
    fn batch_reward_tag_decodes_seat_rewards_in_order() {
        let raw = r#"{
            "subCmd": 4, "type": 1002, "giftId": 2, "giftCount": 3,
            "seatUserReward": [
                {"seatIndex": 1, "userUuid": "a", "rewardTotal": 10},
                {"seatIndex": 2, "userUuid": "b", "rewardTotal": 20, "icon": "http://i"}
            ]
        }"#;
        let Some(CustomMessage::BatchReward(msg)) = decode_custom_message(raw) else {
            panic!("expected batch reward");
        };
        let seats: Vec<i32> = msg.seat_user_reward.iter().map(|s| s.seat_index).collect();
        assert_eq!(seats, vec![1, 2]);
        assert_eq!(msg.seat_user_reward[1].icon.as_deref(), Some("http://i"));
    }

    #[test]
    fn mismatched_or_unknown_tags_are_dropped() {
        assert_eq!(decode_custom_message(r#"{"subCmd":2,"type":1002}"#), None);
        assert_eq!(decode_custom_message(r#"{"subCmd":9,"type":1}"#), None);
        assert_eq!(decode_custom_message(r#"{"type":1001}"#), None);
    }

    #[test]
    fn decode_failure_for_matched_tag_is_dropped() {
        let raw = r#"{"subCmd":2,"type":1001,"giftId":"not-a-number"}"#;
        assert_eq!(decode_custom_message(raw), None);
    }

    #[test]
    fn non_json_and_non_object_attachments_are_dropped() {
        assert_eq!(decode_custom_message("hello"), None);
        assert_eq!(decode_custom_message("[1,2]"), None);
    }

    #[test]
    fn command_range_bounds() {
        assert!(CUSTOM_COMMAND_RANGE.contains(&10000));
        assert!(CUSTOM_COMMAND_RANGE.contains(&19999));
        assert!(!CUSTOM_COMMAND_RANGE.contains(&20000));
    }
}
