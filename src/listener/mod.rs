//! Application listeners and event fan-out.
//!
//! Listeners declare which [`EventKind`]s they handle. The registry holds
//! them weakly, so the application owns their lifetime; a dropped listener
//! simply stops receiving events.

use std::fmt;
use std::sync::{Arc, RwLock, Weak};

use serde::{Deserialize, Serialize};
use strum::{Display, EnumCount, EnumIter, IntoEnumIterator};

use crate::types::{
    VoiceRoomBatchGiftModel, VoiceRoomChatTextMessage, VoiceRoomEndReason, VoiceRoomGiftModel,
    VoiceRoomMember, VoiceRoomMemberVolumeInfo, VoiceRoomSeatItem,
};

/// Kind of a [`VoiceRoomEvent`], used for capability checks.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumIter, EnumCount,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum EventKind {
    MemberJoinRoom,
    MemberLeaveRoom,
    MemberJoinChatroom,
    MemberAudioMuteChanged,
    MemberAudioBanned,
    RoomEnded,
    RtcChannelError,
    RtcAudioVolumeIndication,
    AudioEffectFinished,
    AudioEffectTimestampUpdate,
    ReceiveTextMessage,
    ReceiveGift,
    ReceiveBatchGift,
    SeatRequestSubmitted,
    SeatRequestCancelled,
    SeatRequestApproved,
    SeatRequestRejected,
    SeatLeave,
    SeatKicked,
    SeatListChanged,
    SeatInvitationAccepted,
}

impl EventKind {
    fn bit(self) -> u32 {
        1 << (self as u32)
    }
}

/// Set of event kinds a listener handles.
#[derive(Clone, Copy, PartialEq, Eq, Default)]
pub struct EventKinds(u32);

impl EventKinds {
    pub const fn empty() -> Self {
        Self(0)
    }

    pub fn all() -> Self {
        EventKind::iter().collect()
    }

    pub fn of(kinds: &[EventKind]) -> Self {
        kinds.iter().copied().collect()
    }

    #[must_use]
    pub fn with(self, kind: EventKind) -> Self {
        Self(self.0 | kind.bit())
    }

    pub fn contains(self, kind: EventKind) -> bool {
        self.0 & kind.bit() != 0
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    pub fn iter(self) -> impl Iterator<Item = EventKind> {
        EventKind::iter().filter(move |k| self.contains(*k))
    }
}

impl FromIterator<EventKind> for EventKinds {
    fn from_iter<I: IntoIterator<Item = EventKind>>(iter: I) -> Self {
        iter.into_iter().fold(Self::empty(), Self::with)
    }
}

impl fmt::Debug for EventKinds {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

/// Events delivered to application listeners.
#[derive(Debug, Clone, PartialEq)]
pub enum VoiceRoomEvent {
    MemberJoinRoom(Vec<VoiceRoomMember>),
    MemberLeaveRoom(Vec<VoiceRoomMember>),
    MemberJoinChatroom(Vec<VoiceRoomMember>),
    MemberAudioMuteChanged {
        member: VoiceRoomMember,
        mute: bool,
        operate_by: Option<VoiceRoomMember>,
    },
    MemberAudioBanned {
        member: VoiceRoomMember,
        banned: bool,
    },
    RoomEnded(VoiceRoomEndReason),
    RtcChannelError(i32),
    RtcAudioVolumeIndication {
        volumes: Vec<VoiceRoomMemberVolumeInfo>,
        total_volume: i32,
    },
    AudioEffectFinished,
    AudioEffectTimestampUpdate {
        effect_id: u32,
        timestamp_ms: u64,
    },
    ReceiveTextMessage(VoiceRoomChatTextMessage),
    ReceiveGift(VoiceRoomGiftModel),
    ReceiveBatchGift(VoiceRoomBatchGiftModel),
    SeatRequestSubmitted {
        seat_index: i32,
        account: String,
    },
    SeatRequestCancelled {
        seat_index: i32,
        account: String,
    },
    SeatRequestApproved {
        seat_index: i32,
        account: String,
        operate_by: String,
        is_auto_agree: bool,
    },
    SeatRequestRejected {
        seat_index: i32,
        account: String,
        operate_by: String,
    },
    SeatLeave {
        seat_index: i32,
        account: String,
    },
    SeatKicked {
        seat_index: i32,
        account: String,
        operate_by: String,
    },
    SeatListChanged(Vec<VoiceRoomSeatItem>),
    SeatInvitationAccepted {
        seat_index: i32,
        account: String,
        is_auto_agree: bool,
    },
}

impl VoiceRoomEvent {
    pub fn kind(&self) -> EventKind {
        match self {
            Self::MemberJoinRoom(_) => EventKind::MemberJoinRoom,
            Self::MemberLeaveRoom(_) => EventKind::MemberLeaveRoom,
            Self::MemberJoinChatroom(_) => EventKind::MemberJoinChatroom,
            Self::MemberAudioMuteChanged { .. } => EventKind::MemberAudioMuteChanged,
            Self::MemberAudioBanned { .. } => EventKind::MemberAudioBanned,
            Self::RoomEnded(_) => EventKind::RoomEnded,
            Self::RtcChannelError(_) => EventKind::RtcChannelError,
            Self::RtcAudioVolumeIndication { .. } => EventKind::RtcAudioVolumeIndication,
            Self::AudioEffectFinished => EventKind::AudioEffectFinished,
            Self::AudioEffectTimestampUpdate { .. } => EventKind::AudioEffectTimestampUpdate,
            Self::ReceiveTextMessage(_) => EventKind::ReceiveTextMessage,
            Self::ReceiveGift(_) => EventKind::ReceiveGift,
            Self::ReceiveBatchGift(_) => EventKind::ReceiveBatchGift,
            Self::SeatRequestSubmitted { .. } => EventKind::SeatRequestSubmitted,
            Self::SeatRequestCancelled { .. } => EventKind::SeatRequestCancelled,
            Self::SeatRequestApproved { .. } => EventKind::SeatRequestApproved,
            Self::SeatRequestRejected { .. } => EventKind::SeatRequestRejected,
            Self::SeatLeave { .. } => EventKind::SeatLeave,
            Self::SeatKicked { .. } => EventKind::SeatKicked,
            Self::SeatListChanged(_) => EventKind::SeatListChanged,
            Self::SeatInvitationAccepted { .. } => EventKind::SeatInvitationAccepted,
        }
    }
}

/// Application-side receiver of room events.
///
/// `on_event` is only called for kinds contained in `interests()`, always
/// from the kit's dispatcher task.
pub trait VoiceRoomListener: Send + Sync {
    fn interests(&self) -> EventKinds;

    fn on_event(&self, event: &VoiceRoomEvent);
}

/// Listener backed by a closure.
///
/// ```
/// use std::sync::Arc;
/// use voiceroom::listener::{EventKind, EventKinds, FnListener, VoiceRoomListener};
///
/// let listener: Arc<dyn VoiceRoomListener> = Arc::new(FnListener::new(
///     EventKinds::of(&[EventKind::ReceiveGift]),
///     |event| println!("{event:?}"),
/// ));
/// assert!(listener.interests().contains(EventKind::ReceiveGift));
/// ```
pub struct FnListener<F> {
    interests: EventKinds,
    handler: F,
}

impl<F> FnListener<F>
where
    F: Fn(&VoiceRoomEvent) + Send + Sync,
{
    pub fn new(interests: EventKinds, handler: F) -> Self {
        Self { interests, handler }
    }
}

impl<F> VoiceRoomListener for FnListener<F>
where
    F: Fn(&VoiceRoomEvent) + Send + Sync,
{
    fn interests(&self) -> EventKinds {
        self.interests
    }

    fn on_event(&self, event: &VoiceRoomEvent) {
        (self.handler)(event)
    }
}

/// Weakly held set of listeners, keyed by identity.
#[derive(Default)]
pub struct ListenerRegistry {
    listeners: RwLock<Vec<Weak<dyn VoiceRoomListener>>>,
}

impl fmt::Debug for ListenerRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ListenerRegistry")
            .field("len", &self.len())
            .finish()
    }
}

impl ListenerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a listener. Adding the same listener twice is a no-op.
    pub fn add(&self, listener: &Arc<dyn VoiceRoomListener>) {
        let Ok(mut guard) = self.listeners.write() else {
            return;
        };
        guard.retain(|weak| weak.strong_count() > 0);
        let target = Arc::downgrade(listener);
        if !guard.iter().any(|weak| Weak::ptr_eq(weak, &target)) {
            guard.push(target);
        }
    }

    /// Unregister a listener. Returns whether it was present.
    pub fn remove(&self, listener: &Arc<dyn VoiceRoomListener>) -> bool {
        let Ok(mut guard) = self.listeners.write() else {
            return false;
        };
        let target = Arc::downgrade(listener);
        let present = guard.iter().any(|weak| Weak::ptr_eq(weak, &target));
        guard.retain(|weak| weak.strong_count() > 0 && !Weak::ptr_eq(weak, &target));
        present
    }

    /// Number of live listeners.
    pub fn len(&self) -> usize {
        self.listeners
            .read()
            .map(|guard| guard.iter().filter(|weak| weak.strong_count() > 0).count())
            .unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Deliver `event` to every live listener interested in its kind.
    ///
    /// Returns how many listeners were invoked.
    pub fn dispatch(&self, event: &VoiceRoomEvent) -> usize {
        let kind = event.kind();
        let live: Vec<Arc<dyn VoiceRoomListener>> = match self.listeners.read() {
            Ok(guard) => guard.iter().filter_map(Weak::upgrade).collect(),
            Err(_) => return 0,
        };
        let mut delivered = 0;
        for listener in live {
            if listener.interests().contains(kind) {
                listener.on_event(event);
                delivered += 1;
            }
        }
        delivered
    }
}
