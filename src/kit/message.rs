//! Chat messages and gifts.

use crate::error::{Result, VoiceRoomError};

use super::VoiceRoomKit;

impl VoiceRoomKit {
    /// Broadcast a text message to the room's chatroom.
    pub async fn send_text_message(&self, content: &str) -> Result<()> {
        tracing::info!(len = content.len(), "Send text message");
        let context = self.inner.require_context("send text message")?;
        match context.send_broadcast_text_message(content).await {
            Ok(()) => {
                tracing::info!("Successfully send text message");
                Ok(())
            }
            Err(e) => {
                tracing::error!(code = e.code, message = %e.message, "Failed to send text message");
                Err(e.into())
            }
        }
    }

    /// Send a custom signaling message to one member of the current room.
    ///
    /// Command ids are expected in [`CUSTOM_COMMAND_RANGE`]; the toolkit
    /// enforces this.
    ///
    /// [`CUSTOM_COMMAND_RANGE`]: crate::message::CUSTOM_COMMAND_RANGE
    pub async fn send_custom_message(
        &self,
        user_uuid: &str,
        command_id: i32,
        data: &str,
    ) -> Result<()> {
        tracing::info!(user_uuid, command_id, "Send custom message");
        let context = self.inner.require_context("send custom message")?;
        let room_uuid = context.room_uuid();
        match self
            .inner
            .room_kit
            .send_custom_message(&room_uuid, user_uuid, command_id, data)
            .await
        {
            Ok(()) => {
                tracing::info!("Successfully send custom message");
                Ok(())
            }
            Err(e) => {
                tracing::error!(code = e.code, message = %e.message, "Failed to send custom message");
                Err(e.into())
            }
        }
    }

    /// Reward the room's anchor with one gift.
    pub async fn send_gift(&self, gift_id: i64) -> Result<()> {
        tracing::info!(gift_id, "Send gift");
        let live_record_id = self.gift_live_record("send Gift")?;
        self.inner
            .room_service
            .reward(live_record_id, gift_id)
            .await
            .map_err(|e| {
                tracing::error!(code = e.code, message = %e.message, "Failed to send gift");
                VoiceRoomError::from(e)
            })?;
        tracing::info!("Successfully send gift");
        Ok(())
    }

    /// Reward several members at once.
    pub async fn send_batch_gift(
        &self,
        gift_id: i64,
        gift_count: i64,
        user_uuids: &[String],
    ) -> Result<()> {
        tracing::info!(gift_id, gift_count, users = user_uuids.len(), "Send batch gift");
        let live_record_id = self.gift_live_record("send batch gift")?;
        self.inner
            .room_service
            .batch_reward(live_record_id, gift_id, gift_count, user_uuids)
            .await
            .map_err(|e| {
                tracing::error!(code = e.code, message = %e.message, "Failed to send batch gift");
                VoiceRoomError::from(e)
            })?;
        tracing::info!("Successfully send batch gift");
        Ok(())
    }

    /// Gifts need an initialized kit and the live record of the current room.
    fn gift_live_record(&self, action: &str) -> Result<i64> {
        self.inner.require_initialized(action)?;
        self.inner.session().live_record_id().ok_or_else(|| {
            let message = format!("Failed to {action}. liveRecordId not exist.");
            tracing::error!("{message}");
            VoiceRoomError::MissingLiveRecord(message)
        })
    }
}
