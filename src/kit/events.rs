//! Inbound event translation and fan-out.
//!
//! The toolkit calls [`EventForwarder`] from whatever thread it likes; the
//! forwarder only enqueues. [`run_dispatcher`] drains the queue on a single
//! task, translates each toolkit event into zero or more
//! [`VoiceRoomEvent`]s and applies the kit's own side effects.

use std::sync::Weak;

use tokio::sync::{mpsc, oneshot};

use crate::listener::VoiceRoomEvent;
use crate::message::{decode_custom_message, CustomMessage};
use crate::service::{
    ChatCustomMessage, ChatMessage, ClientRole, RoomKitEvent, RoomListener, RoomMember, SeatItem,
    SeatStatus,
};
use crate::types::{
    property, VoiceRoomBatchGiftModel, VoiceRoomChatTextMessage, VoiceRoomEndReason,
    VoiceRoomGiftModel, VoiceRoomMember, VoiceRoomSeatItem,
};

use super::KitInner;

pub(crate) enum DispatchMessage {
    Event(RoomKitEvent),
    /// Acknowledged once everything queued before it has been handled.
    Flush(oneshot::Sender<()>),
}

/// The listener the kit registers with each joined room context.
pub(crate) struct EventForwarder {
    tx: mpsc::UnboundedSender<DispatchMessage>,
}

impl EventForwarder {
    pub fn new(tx: mpsc::UnboundedSender<DispatchMessage>) -> Self {
        Self { tx }
    }
}

impl RoomListener for EventForwarder {
    fn on_room_event(&self, event: RoomKitEvent) {
        if self.tx.send(DispatchMessage::Event(event)).is_err() {
            tracing::debug!("Voice room kit dropped; ignoring room event");
        }
    }
}

pub(crate) async fn run_dispatcher(
    inner: Weak<KitInner>,
    mut rx: mpsc::UnboundedReceiver<DispatchMessage>,
) {
    while let Some(message) = rx.recv().await {
        match message {
            DispatchMessage::Flush(ack) => {
                let _ = ack.send(());
            }
            DispatchMessage::Event(event) => {
                let Some(inner) = inner.upgrade() else {
                    break;
                };
                inner.handle_event(event).await;
            }
        }
    }
    tracing::debug!("Voice room event dispatcher stopped");
}

fn members(list: &[RoomMember]) -> Vec<VoiceRoomMember> {
    list.iter().map(Into::into).collect()
}

impl KitInner {
    async fn handle_event(&self, event: RoomKitEvent) {
        match event {
            RoomKitEvent::MemberJoinRoom(list) => {
                self.emit(VoiceRoomEvent::MemberJoinRoom(members(&list)));
            }
            RoomKitEvent::MemberLeaveRoom(list) => {
                self.emit(VoiceRoomEvent::MemberLeaveRoom(members(&list)));
            }
            RoomKitEvent::MemberJoinChatroom(list) => {
                self.emit(VoiceRoomEvent::MemberJoinChatroom(members(&list)));
            }
            RoomKitEvent::MemberJoinRtcChannel(list) => self.on_member_join_rtc(&list).await,
            RoomKitEvent::MemberPropertiesChanged { member, properties } => {
                let converted = VoiceRoomMember::from(&member);
                if properties.contains_key(property::MUTE_AUDIO_KEY) {
                    let mute = !converted.is_audio_on;
                    self.emit(VoiceRoomEvent::MemberAudioMuteChanged {
                        member: converted,
                        mute,
                        operate_by: None,
                    });
                } else if let Some(value) = properties.get(property::CAN_OPEN_MIC_KEY) {
                    self.emit(VoiceRoomEvent::MemberAudioBanned {
                        member: converted,
                        banned: value == property::CAN_OPEN_MIC_NO,
                    });
                }
            }
            RoomKitEvent::RoomEnded(raw) => {
                self.emit(VoiceRoomEvent::RoomEnded(VoiceRoomEndReason::from_raw(raw)));
            }
            RoomKitEvent::RtcChannelError(code) => {
                self.emit(VoiceRoomEvent::RtcChannelError(code));
            }
            RoomKitEvent::RtcAudioVolumeIndication {
                volumes,
                total_volume,
            } => {
                self.emit(VoiceRoomEvent::RtcAudioVolumeIndication {
                    volumes: volumes.iter().map(Into::into).collect(),
                    total_volume,
                });
            }
            RoomKitEvent::RtcAudioEffectFinished { .. } => {
                self.emit(VoiceRoomEvent::AudioEffectFinished);
            }
            RoomKitEvent::RtcAudioEffectTimestampUpdate {
                effect_id,
                timestamp_ms,
            } => {
                self.emit(VoiceRoomEvent::AudioEffectTimestampUpdate {
                    effect_id,
                    timestamp_ms,
                });
            }
            RoomKitEvent::ChatroomMessages(messages) => {
                for message in &messages {
                    self.on_chat_message(message);
                }
            }
            RoomKitEvent::SeatRequestSubmitted { seat_index, user } => {
                self.emit(VoiceRoomEvent::SeatRequestSubmitted {
                    seat_index,
                    account: user,
                });
            }
            RoomKitEvent::SeatRequestCancelled { seat_index, user } => {
                self.emit(VoiceRoomEvent::SeatRequestCancelled {
                    seat_index,
                    account: user,
                });
            }
            RoomKitEvent::SeatRequestApproved {
                seat_index,
                user,
                operate_by,
                is_auto_agree,
            } => {
                self.emit(VoiceRoomEvent::SeatRequestApproved {
                    seat_index,
                    account: user,
                    operate_by,
                    is_auto_agree,
                });
            }
            RoomKitEvent::SeatRequestRejected {
                seat_index,
                user,
                operate_by,
            } => {
                self.emit(VoiceRoomEvent::SeatRequestRejected {
                    seat_index,
                    account: user,
                    operate_by,
                });
            }
            RoomKitEvent::SeatLeave { seat_index, user } => {
                self.emit(VoiceRoomEvent::SeatLeave {
                    seat_index,
                    account: user,
                });
            }
            RoomKitEvent::SeatKicked {
                seat_index,
                user,
                operate_by,
            } => {
                self.emit(VoiceRoomEvent::SeatKicked {
                    seat_index,
                    account: user,
                    operate_by,
                });
            }
            RoomKitEvent::SeatListChanged(items) => {
                self.emit(VoiceRoomEvent::SeatListChanged(
                    items.iter().map(VoiceRoomSeatItem::from).collect(),
                ));
                self.sync_seat_state(&items).await;
            }
            RoomKitEvent::SeatInvitationAccepted {
                seat_index,
                user,
                is_auto_agree,
            } => {
                self.emit(VoiceRoomEvent::SeatInvitationAccepted {
                    seat_index,
                    account: user,
                    is_auto_agree,
                });
            }
        }
    }

    fn emit(&self, event: VoiceRoomEvent) {
        let delivered = self.listeners.dispatch(&event);
        tracing::trace!(kind = %event.kind(), delivered, "Dispatched voice room event");
    }

    fn on_chat_message(&self, message: &ChatMessage) {
        match message {
            ChatMessage::Text(text) => {
                self.emit(VoiceRoomEvent::ReceiveTextMessage(
                    VoiceRoomChatTextMessage::from(text),
                ));
            }
            ChatMessage::Custom(custom) => self.on_custom_message(custom),
            ChatMessage::Image | ChatMessage::File => {}
        }
    }

    fn on_custom_message(&self, custom: &ChatCustomMessage) {
        let Some(attach) = custom.attach_str.as_deref() else {
            tracing::debug!("Dropping custom message without attachment");
            return;
        };
        match decode_custom_message(attach) {
            None => {}
            Some(CustomMessage::Command(cmd)) => {
                tracing::debug!(cmd, "Received command message");
            }
            Some(CustomMessage::Reward(reward)) => match VoiceRoomGiftModel::from_message(&reward)
            {
                Some(gift) => self.emit(VoiceRoomEvent::ReceiveGift(gift)),
                None => tracing::debug!("Dropping reward message with missing fields"),
            },
            Some(CustomMessage::BatchReward(batch)) => {
                match VoiceRoomBatchGiftModel::from_message(&batch) {
                    Some(gift) => self.emit(VoiceRoomEvent::ReceiveBatchGift(gift)),
                    None => tracing::debug!("Dropping batch reward message with missing fields"),
                }
            }
        }
    }

    /// The local member's own RTC join re-opens its audio.
    async fn on_member_join_rtc(&self, list: &[RoomMember]) {
        let Some(context) = self.session().context() else {
            return;
        };
        let local = context.local_member();
        if !list.iter().any(|member| member.uuid == local.uuid) {
            return;
        }
        if let Err(e) = context.unmute_my_audio().await {
            tracing::warn!(code = e.code, message = %e.message, "Failed to unmute after rtc join");
        }
    }

    /// Keep the RTC role and mic permission in line with the seat list.
    async fn sync_seat_state(&self, items: &[SeatItem]) {
        let Some(context) = self.session().context() else {
            return;
        };
        let local = context.local_member();
        let on_seat = items.iter().any(|item| {
            item.status == SeatStatus::Taken && item.user.as_deref() == Some(local.uuid.as_str())
        });
        self.session().set_on_seat(on_seat);

        let banned = local
            .properties
            .get(property::CAN_OPEN_MIC_KEY)
            .is_some_and(|value| value == property::CAN_OPEN_MIC_NO);
        if !on_seat && banned {
            if let Err(e) = context
                .delete_member_property(&local.uuid, property::CAN_OPEN_MIC_KEY)
                .await
            {
                tracing::warn!(code = e.code, message = %e.message, "Failed to clear mic ban");
            }
        }

        let role = if on_seat {
            ClientRole::Broadcaster
        } else {
            ClientRole::Audience
        };
        if let Err(e) = context.set_client_role(role).await {
            tracing::warn!(code = e.code, message = %e.message, %role, "Failed to set client role");
        }
    }
}
