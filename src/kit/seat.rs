//! Seats, local audio and members of the current room.

use crate::error::Result;
use crate::service::ServiceError;
use crate::types::{property, VoiceRoomMember, VoiceRoomSeatInfo, VoiceRoomSeatRequestItem};

use super::VoiceRoomKit;

fn log_failure(action: &str) -> impl Fn(&ServiceError) + '_ {
    move |e: &ServiceError| tracing::error!(code = e.code, message = %e.message, "Failed to {action}")
}

impl VoiceRoomKit {
    /// Ask for a seat. With `exclusive` the request targets exactly
    /// `seat_index`; otherwise any free seat may be assigned.
    pub async fn submit_seat_request(&self, seat_index: i32, exclusive: bool) -> Result<()> {
        tracing::info!(seat_index, exclusive, "Submit seat request");
        let context = self.inner.require_context("submit seat request")?;
        context
            .submit_seat_request(seat_index, exclusive)
            .await
            .inspect_err(log_failure("submit seat request"))?;
        Ok(())
    }

    /// Withdraw the local member's pending seat request.
    pub async fn cancel_seat_request(&self) -> Result<()> {
        tracing::info!("Cancel seat request");
        let context = self.inner.require_context("cancel seat request")?;
        context
            .cancel_seat_request()
            .await
            .inspect_err(log_failure("cancel seat request"))?;
        Ok(())
    }

    /// Grant `account` the seat it asked for.
    pub async fn approve_seat_request(&self, account: &str) -> Result<()> {
        tracing::info!(account, "Approve seat request");
        let context = self.inner.require_context("approve seat request")?;
        context
            .approve_seat_request(account)
            .await
            .inspect_err(log_failure("approve seat request"))?;
        Ok(())
    }

    /// Turn down the seat request of `account`.
    pub async fn reject_seat_request(&self, account: &str) -> Result<()> {
        tracing::info!(account, "Reject seat request");
        let context = self.inner.require_context("reject seat request")?;
        context
            .reject_seat_request(account)
            .await
            .inspect_err(log_failure("reject seat request"))?;
        Ok(())
    }

    /// Remove `account` from its seat.
    pub async fn kick_seat(&self, account: &str) -> Result<()> {
        tracing::info!(account, "Kick seat");
        let context = self.inner.require_context("kick seat")?;
        context
            .kick_seat(account)
            .await
            .inspect_err(log_failure("kick seat"))?;
        Ok(())
    }

    /// Give up the local member's seat.
    pub async fn leave_seat(&self) -> Result<()> {
        tracing::info!("Leave seat");
        let context = self.inner.require_context("leave seat")?;
        context
            .leave_seat()
            .await
            .inspect_err(log_failure("leave seat"))?;
        Ok(())
    }

    /// Seat layout of the current room.
    pub async fn get_seat_info(&self) -> Result<VoiceRoomSeatInfo> {
        let context = self.inner.require_context("get seat info")?;
        let info = context
            .get_seat_info()
            .await
            .inspect_err(log_failure("get seat info"))?;
        Ok(info.into())
    }

    /// Pending seat requests.
    pub async fn get_seat_request_list(&self) -> Result<Vec<VoiceRoomSeatRequestItem>> {
        let context = self.inner.require_context("get seat request list")?;
        let requests = context
            .get_seat_request_list()
            .await
            .inspect_err(log_failure("get seat request list"))?;
        Ok(requests.into_iter().map(Into::into).collect())
    }

    /// Mute the local microphone and publish the state to other members.
    pub async fn mute_my_audio(&self) -> Result<()> {
        tracing::info!("Mute my audio");
        let context = self.inner.require_context("mute my audio")?;
        let local = context.local_member();
        context
            .update_member_property(&local.uuid, property::MUTE_AUDIO_KEY, property::MUTE_AUDIO_OFF)
            .await
            .inspect_err(log_failure("mute my audio"))?;
        context
            .mute_my_audio()
            .await
            .inspect_err(log_failure("mute my audio"))?;
        Ok(())
    }

    /// Open the local microphone and publish the state to other members.
    pub async fn unmute_my_audio(&self) -> Result<()> {
        tracing::info!("Unmute my audio");
        let context = self.inner.require_context("unmute my audio")?;
        let local = context.local_member();
        context
            .update_member_property(&local.uuid, property::MUTE_AUDIO_KEY, property::MUTE_AUDIO_ON)
            .await
            .inspect_err(log_failure("unmute my audio"))?;
        context
            .unmute_my_audio()
            .await
            .inspect_err(log_failure("unmute my audio"))?;
        Ok(())
    }

    /// Forbid (or allow again) a member to open the microphone.
    pub async fn ban_remote_audio(&self, account: &str, ban: bool) -> Result<()> {
        tracing::info!(account, ban, "Ban remote audio");
        let context = self.inner.require_context("ban remote audio")?;
        let value = if ban {
            property::CAN_OPEN_MIC_NO
        } else {
            property::CAN_OPEN_MIC_YES
        };
        context
            .update_member_property(account, property::CAN_OPEN_MIC_KEY, value)
            .await
            .inspect_err(log_failure("ban remote audio"))?;
        Ok(())
    }

    /// The local member, while in a room.
    pub fn local_member(&self) -> Option<VoiceRoomMember> {
        let context = self.inner.session().context()?;
        Some(VoiceRoomMember::from(&context.local_member()))
    }

    /// Local member first, then remote members. Empty outside a room.
    pub fn all_members(&self) -> Vec<VoiceRoomMember> {
        let Some(context) = self.inner.session().context() else {
            return Vec::new();
        };
        std::iter::once(context.local_member())
            .chain(context.remote_members())
            .map(|member| VoiceRoomMember::from(&member))
            .collect()
    }
}
