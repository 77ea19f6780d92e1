//! voiceroom: a voice chat room client SDK.
//!
//! Wraps a room/RTC/chat toolkit and a voice room business backend behind
//! one façade, [`VoiceRoomKit`](kit::VoiceRoomKit): room lifecycle, chat,
//! gifts, seats, local audio, and fan-out of room events to application
//! listeners.
//!
//! # Quick Start
//!
//! ```no_run
//! use std::sync::Arc;
//! use voiceroom::prelude::*;
//!
//! # async fn example(service: Arc<dyn RoomService>, toolkit: Arc<dyn RoomKit>) -> voiceroom::error::Result<()> {
//! let kit = VoiceRoomKit::new(service, toolkit);
//! kit.initialize(&VoiceRoomConfig::from_env()).await?;
//!
//! let gifts: Arc<dyn VoiceRoomListener> = Arc::new(FnListener::new(
//!     EventKinds::of(&[EventKind::ReceiveGift]),
//!     |event| println!("{event:?}"),
//! ));
//! kit.add_voice_room_listener(&gifts);
//!
//! let rooms = kit.get_room_list(LiveState::Live, 1, 20).await?;
//! println!("{} rooms live", rooms.list.len());
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod error;
pub mod kit;
pub mod listener;
pub mod message;
pub mod prelude;
pub mod service;
pub mod types;
pub mod util;
