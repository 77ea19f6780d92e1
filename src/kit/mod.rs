//! The voice room façade.
//!
//! [`VoiceRoomKit`] validates preconditions, forwards to the injected
//! [`RoomService`] and [`RoomKit`], keeps the current [`RoomSession`] and
//! fans inbound toolkit events out to application listeners.
//!
//! All inbound events are funnelled through one dispatcher task, so
//! listeners observe them in arrival order and never concurrently.

mod events;
mod message;
mod room;
mod seat;
mod session;

pub use session::SessionPhase;

use std::sync::atomic::{AtomicBool, AtomicI32, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tokio::sync::{mpsc, oneshot};

use crate::config::{VoiceRoomConfig, DEFAULT_LIVE_TYPE};
use crate::error::{Result, VoiceRoomError};
use crate::listener::{ListenerRegistry, VoiceRoomListener};
use crate::service::{RoomContext, RoomKit, RoomService};
use crate::types::VoiceRoomInfo;

use events::DispatchMessage;
use session::RoomSession;

/// Handle to the voice room kit. Cheap to clone; clones share state.
#[derive(Clone)]
pub struct VoiceRoomKit {
    inner: Arc<KitInner>,
}

pub(crate) struct KitInner {
    room_service: Arc<dyn RoomService>,
    room_kit: Arc<dyn RoomKit>,
    initialized: AtomicBool,
    live_type: AtomicI32,
    session: Mutex<RoomSession>,
    listeners: ListenerRegistry,
    events: mpsc::UnboundedSender<DispatchMessage>,
}

impl std::fmt::Debug for VoiceRoomKit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VoiceRoomKit")
            .field("initialized", &self.is_initialized())
            .field("session", &*self.inner.session())
            .field("listeners", &self.inner.listeners)
            .finish()
    }
}

impl VoiceRoomKit {
    /// Create a kit over the given services.
    ///
    /// Spawns the event dispatcher, so this must be called from within a
    /// tokio runtime.
    pub fn new(room_service: Arc<dyn RoomService>, room_kit: Arc<dyn RoomKit>) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        let inner = Arc::new(KitInner {
            room_service,
            room_kit,
            initialized: AtomicBool::new(false),
            live_type: AtomicI32::new(DEFAULT_LIVE_TYPE),
            session: Mutex::new(RoomSession::default()),
            listeners: ListenerRegistry::new(),
            events: tx,
        });
        tokio::spawn(events::run_dispatcher(Arc::downgrade(&inner), rx));
        Self { inner }
    }

    /// Initialize the toolkit. Every other operation except listener
    /// management requires this to have succeeded.
    pub async fn initialize(&self, config: &VoiceRoomConfig) -> Result<()> {
        tracing::info!(server_url = ?config.server_url, "Initialize voice room kit");
        config.validate()?;
        match self.inner.room_kit.initialize(&config.to_options()).await {
            Ok(()) => {
                self.inner.live_type.store(config.live_type, Ordering::SeqCst);
                self.inner.initialized.store(true, Ordering::SeqCst);
                tracing::info!("Successfully initialized voice room kit");
                Ok(())
            }
            Err(e) => {
                tracing::error!(code = e.code, message = %e.message, "Failed to initialize");
                Err(e.into())
            }
        }
    }

    /// Whether [`initialize`](Self::initialize) has succeeded.
    pub fn is_initialized(&self) -> bool {
        self.inner.initialized.load(Ordering::SeqCst)
    }

    /// Log the account in with the toolkit.
    pub async fn login(&self, account: &str, token: &str) -> Result<()> {
        tracing::info!(account, "Login");
        self.inner.require_initialized("login")?;
        self.inner
            .room_kit
            .login(account, token)
            .await
            .map_err(|e| {
                tracing::error!(code = e.code, message = %e.message, "Failed to login");
                e.into()
            })
    }

    /// Log the current account out.
    pub async fn logout(&self) -> Result<()> {
        tracing::info!("Logout");
        self.inner.require_initialized("logout")?;
        self.inner.room_kit.logout().await.map_err(|e| {
            tracing::error!(code = e.code, message = %e.message, "Failed to logout");
            e.into()
        })
    }

    /// Login state as reported by the toolkit.
    pub fn is_logged_in(&self) -> bool {
        self.inner.room_kit.is_logged_in()
    }

    /// Register a listener. The kit holds it weakly: keep the `Arc` alive
    /// for as long as events should be delivered.
    pub fn add_voice_room_listener(&self, listener: &Arc<dyn VoiceRoomListener>) {
        tracing::info!(interests = ?listener.interests(), "Add voice room listener");
        self.inner.listeners.add(listener);
    }

    /// Unregister a listener. Returns whether it was registered.
    pub fn remove_voice_room_listener(&self, listener: &Arc<dyn VoiceRoomListener>) -> bool {
        tracing::info!("Remove voice room listener");
        self.inner.listeners.remove(listener)
    }

    /// Wait until every event received so far has been delivered.
    pub async fn flush_events(&self) {
        let (ack, done) = oneshot::channel();
        if self.inner.events.send(DispatchMessage::Flush(ack)).is_ok() {
            let _ = done.await;
        }
    }

    /// Current phase of the room session.
    pub fn session_phase(&self) -> SessionPhase {
        self.inner.session().phase()
    }

    /// Info of the room created or joined last, until it is left or ended.
    pub fn live_info(&self) -> Option<VoiceRoomInfo> {
        self.inner.session().live_info().cloned().map(Into::into)
    }

    /// Whether the local member currently occupies a seat, as of the last
    /// seat list update.
    pub fn is_on_seat(&self) -> bool {
        self.inner.session().is_on_seat()
    }
}

impl Drop for KitInner {
    /// The forwarder owns a sender; once it is gone the dispatcher stops.
    fn drop(&mut self) {
        let session = self
            .session
            .get_mut()
            .unwrap_or_else(PoisonError::into_inner);
        if let Some(detached) = session.detach() {
            detached.unregister();
        }
    }
}

impl KitInner {
    fn session(&self) -> MutexGuard<'_, RoomSession> {
        self.session.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn is_initialized(&self) -> bool {
        self.initialized.load(Ordering::SeqCst)
    }

    fn require_initialized(&self, action: &str) -> Result<()> {
        if self.is_initialized() {
            return Ok(());
        }
        let message = format!("Failed to {action}. Uninitialized.");
        tracing::error!("{message}");
        Err(VoiceRoomError::NotInitialized(message))
    }

    /// Initialized and inside a room.
    fn require_context(&self, action: &str) -> Result<Arc<dyn RoomContext>> {
        self.require_initialized(action)?;
        self.session().context().ok_or_else(|| {
            let message = format!("Failed to {action}. RoomContext is nil.");
            tracing::error!("{message}");
            VoiceRoomError::NoRoomContext(message)
        })
    }
}
