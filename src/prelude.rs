//! Convenience re-exports for common use.

pub use crate::config::VoiceRoomConfig;
pub use crate::error::{ErrorCode, Result, VoiceRoomError};
pub use crate::kit::{SessionPhase, VoiceRoomKit};
pub use crate::listener::{EventKind, EventKinds, FnListener, VoiceRoomEvent, VoiceRoomListener};
pub use crate::service::{RoomContext, RoomKit, RoomService};
pub use crate::types::{
    CreateRoomOptions, CreateRoomParams, JoinRoomOptions, JoinRoomParams, LiveState,
    VoiceRoomInfo, VoiceRoomMember, VoiceRoomRole,
};
pub use crate::util::callback::{spawn_with_callback, VoiceRoomCallback};
