//! Shared test helpers: mock room service, toolkit and room context.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use voiceroom::config::VoiceRoomConfig;
use voiceroom::kit::VoiceRoomKit;
use voiceroom::listener::{EventKind, EventKinds, VoiceRoomEvent, VoiceRoomListener};
use voiceroom::service::*;
use voiceroom::types::{CreateRoomParams, JoinRoomParams, VoiceRoomRole};

pub const ROOM_UUID: &str = "room-1";
pub const LIVE_RECORD_ID: i64 = 42;
pub const LOCAL_UUID: &str = "local-user";

pub fn live_response(room_uuid: &str, live_record_id: i64) -> LiveResponse {
    LiveResponse {
        anchor: Some(LiveAnchor {
            user_uuid: Some("anchor".into()),
            user_name: Some("Anchor".into()),
            icon: None,
        }),
        live: Some(LiveRecord {
            room_uuid: Some(room_uuid.into()),
            live_record_id: Some(live_record_id),
            live_topic: Some("Evening chat".into()),
            ..Default::default()
        }),
    }
}

pub fn member(uuid: &str) -> RoomMember {
    RoomMember {
        uuid: uuid.into(),
        name: format!("{uuid}-name"),
        role: "audience".into(),
        ..Default::default()
    }
}

pub fn test_config() -> VoiceRoomConfig {
    VoiceRoomConfig::builder().app_key("test-app-key").build()
}

pub fn join_params() -> JoinRoomParams {
    JoinRoomParams::builder()
        .room_uuid(ROOM_UUID)
        .nick("Local")
        .role(VoiceRoomRole::Audience)
        .live_record_id(LIVE_RECORD_ID)
        .build()
}

pub fn create_params() -> CreateRoomParams {
    CreateRoomParams::builder().title("Evening chat").nick("Host").build()
}

/// Ordered log of calls made against a double.
#[derive(Default)]
pub struct CallLog(Mutex<Vec<String>>);

impl CallLog {
    pub fn record(&self, call: impl Into<String>) {
        self.0.lock().unwrap().push(call.into());
    }

    pub fn all(&self) -> Vec<String> {
        self.0.lock().unwrap().clone()
    }

    /// Number of calls whose name (text before `(`) is `name`.
    pub fn count(&self, name: &str) -> usize {
        self.0
            .lock()
            .unwrap()
            .iter()
            .filter(|call| call.split('(').next() == Some(name))
            .count()
    }

    pub fn total(&self) -> usize {
        self.0.lock().unwrap().len()
    }
}

/// Failures to inject, keyed by operation name.
#[derive(Default)]
pub struct Failures(Mutex<HashMap<&'static str, ServiceError>>);

impl Failures {
    pub fn set(&self, op: &'static str, code: i32, message: &str) {
        self.0
            .lock()
            .unwrap()
            .insert(op, ServiceError::new(code, message));
    }

    pub fn check(&self, op: &str) -> ServiceResult<()> {
        match self.0.lock().unwrap().get(op) {
            Some(err) => Err(err.clone()),
            None => Ok(()),
        }
    }
}

/// Room service double with canned responses.
pub struct MockRoomService {
    pub calls: CallLog,
    pub failures: Failures,
    pub room_info: Mutex<Option<LiveResponse>>,
    pub started: Mutex<Option<LiveResponse>>,
    pub room_list: Mutex<LiveListResponse>,
}

impl Default for MockRoomService {
    fn default() -> Self {
        Self {
            calls: CallLog::default(),
            failures: Failures::default(),
            room_info: Mutex::new(Some(live_response(ROOM_UUID, LIVE_RECORD_ID))),
            started: Mutex::new(Some(live_response(ROOM_UUID, LIVE_RECORD_ID))),
            room_list: Mutex::new(LiveListResponse::default()),
        }
    }
}

#[async_trait]
impl RoomService for MockRoomService {
    async fn get_room_list(
        &self,
        live_type: i32,
        live_state: i32,
        page_num: i32,
        page_size: i32,
    ) -> ServiceResult<LiveListResponse> {
        self.calls.record(format!(
            "get_room_list({live_type},{live_state},{page_num},{page_size})"
        ));
        self.failures.check("get_room_list")?;
        Ok(self.room_list.lock().unwrap().clone())
    }

    async fn get_room_info(&self, live_record_id: i64) -> ServiceResult<Option<LiveResponse>> {
        self.calls.record(format!("get_room_info({live_record_id})"));
        self.failures.check("get_room_info")?;
        Ok(self.room_info.lock().unwrap().clone())
    }

    async fn get_default_live_info(&self) -> ServiceResult<DefaultLiveInfo> {
        self.calls.record("get_default_live_info()");
        self.failures.check("get_default_live_info")?;
        Ok(DefaultLiveInfo {
            topic: Some("Default topic".into()),
            live_picture: Some("https://img/cover.png".into()),
            default_pictures: vec!["https://img/a.png".into(), "https://img/b.png".into()],
        })
    }

    async fn start_room(&self, params: &CreateRoomParams) -> ServiceResult<Option<LiveResponse>> {
        self.calls.record(format!(
            "start_room({},{})",
            params.title,
            params.live_type.unwrap_or_default()
        ));
        self.failures.check("start_room")?;
        Ok(self.started.lock().unwrap().clone())
    }

    async fn end_room(&self, live_record_id: i64) -> ServiceResult<()> {
        self.calls.record(format!("end_room({live_record_id})"));
        self.failures.check("end_room")
    }

    async fn reward(&self, live_record_id: i64, gift_id: i64) -> ServiceResult<()> {
        self.calls.record(format!("reward({live_record_id},{gift_id})"));
        self.failures.check("reward")
    }

    async fn batch_reward(
        &self,
        live_record_id: i64,
        gift_id: i64,
        gift_count: i64,
        user_uuids: &[String],
    ) -> ServiceResult<()> {
        self.calls.record(format!(
            "batch_reward({live_record_id},{gift_id},{gift_count},{})",
            user_uuids.join("|")
        ));
        self.failures.check("batch_reward")
    }
}

/// Room context double: records calls and holds registered listeners.
pub struct MockRoomContext {
    pub room_uuid: String,
    pub local: Mutex<RoomMember>,
    pub remotes: Mutex<Vec<RoomMember>>,
    pub calls: CallLog,
    pub failures: Failures,
    listeners: Mutex<Vec<Arc<dyn RoomListener>>>,
}

impl MockRoomContext {
    pub fn new(room_uuid: &str) -> Arc<Self> {
        Arc::new(Self {
            room_uuid: room_uuid.into(),
            local: Mutex::new(member(LOCAL_UUID)),
            remotes: Mutex::new(vec![member("remote-1")]),
            calls: CallLog::default(),
            failures: Failures::default(),
            listeners: Mutex::new(Vec::new()),
        })
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.lock().unwrap().len()
    }

    /// Push an event into every registered toolkit listener.
    pub fn emit(&self, event: RoomKitEvent) {
        let listeners = self.listeners.lock().unwrap().clone();
        for listener in listeners {
            listener.on_room_event(event.clone());
        }
    }

    pub fn set_local_property(&self, key: &str, value: &str) {
        self.local
            .lock()
            .unwrap()
            .properties
            .insert(key.into(), value.into());
    }

    fn op(&self, call: String, name: &str) -> ServiceResult<()> {
        self.calls.record(call);
        self.failures.check(name)
    }
}

#[async_trait]
impl RoomContext for MockRoomContext {
    fn room_uuid(&self) -> String {
        self.room_uuid.clone()
    }

    fn local_member(&self) -> RoomMember {
        self.local.lock().unwrap().clone()
    }

    fn remote_members(&self) -> Vec<RoomMember> {
        self.remotes.lock().unwrap().clone()
    }

    fn add_room_listener(&self, listener: Arc<dyn RoomListener>) {
        self.listeners.lock().unwrap().push(listener);
    }

    fn remove_room_listener(&self, listener: &Arc<dyn RoomListener>) {
        self.listeners
            .lock()
            .unwrap()
            .retain(|existing| !Arc::ptr_eq(existing, listener));
    }

    async fn leave_room(&self) -> ServiceResult<()> {
        self.op("leave_room()".into(), "leave_room")
    }

    async fn end_room(&self, force: bool) -> ServiceResult<()> {
        self.op(format!("end_room({force})"), "end_room")
    }

    async fn update_member_property(
        &self,
        user_uuid: &str,
        key: &str,
        value: &str,
    ) -> ServiceResult<()> {
        self.op(
            format!("update_member_property({user_uuid},{key},{value})"),
            "update_member_property",
        )
    }

    async fn delete_member_property(&self, user_uuid: &str, key: &str) -> ServiceResult<()> {
        self.op(
            format!("delete_member_property({user_uuid},{key})"),
            "delete_member_property",
        )
    }

    async fn set_client_role(&self, role: ClientRole) -> ServiceResult<()> {
        self.op(format!("set_client_role({role})"), "set_client_role")
    }

    async fn join_rtc_channel(&self) -> ServiceResult<()> {
        self.op("join_rtc_channel()".into(), "join_rtc_channel")
    }

    async fn mute_my_audio(&self) -> ServiceResult<()> {
        self.op("mute_my_audio()".into(), "mute_my_audio")
    }

    async fn unmute_my_audio(&self) -> ServiceResult<()> {
        self.op("unmute_my_audio()".into(), "unmute_my_audio")
    }

    async fn join_chatroom(&self) -> ServiceResult<()> {
        self.op("join_chatroom()".into(), "join_chatroom")
    }

    async fn send_broadcast_text_message(&self, message: &str) -> ServiceResult<()> {
        self.op(
            format!("send_broadcast_text_message({message})"),
            "send_broadcast_text_message",
        )
    }

    async fn submit_seat_request(&self, seat_index: i32, exclusive: bool) -> ServiceResult<()> {
        self.op(
            format!("submit_seat_request({seat_index},{exclusive})"),
            "submit_seat_request",
        )
    }

    async fn cancel_seat_request(&self) -> ServiceResult<()> {
        self.op("cancel_seat_request()".into(), "cancel_seat_request")
    }

    async fn approve_seat_request(&self, user: &str) -> ServiceResult<()> {
        self.op(format!("approve_seat_request({user})"), "approve_seat_request")
    }

    async fn reject_seat_request(&self, user: &str) -> ServiceResult<()> {
        self.op(format!("reject_seat_request({user})"), "reject_seat_request")
    }

    async fn kick_seat(&self, user: &str) -> ServiceResult<()> {
        self.op(format!("kick_seat({user})"), "kick_seat")
    }

    async fn leave_seat(&self) -> ServiceResult<()> {
        self.op("leave_seat()".into(), "leave_seat")
    }

    async fn get_seat_info(&self) -> ServiceResult<SeatInfo> {
        self.op("get_seat_info()".into(), "get_seat_info")?;
        Ok(SeatInfo {
            creator: "anchor".into(),
            managers: vec![],
            seat_items: vec![SeatItem {
                index: 1,
                status: SeatStatus::Taken,
                user: Some("anchor".into()),
                user_name: Some("Anchor".into()),
                icon: None,
            }],
        })
    }

    async fn get_seat_request_list(&self) -> ServiceResult<Vec<SeatRequest>> {
        self.op("get_seat_request_list()".into(), "get_seat_request_list")?;
        Ok(vec![SeatRequest {
            index: 2,
            user: "remote-1".into(),
            user_name: None,
            icon: None,
        }])
    }
}

/// Toolkit double handing out [`MockRoomContext`]s. [`ROOM_UUID`] always
/// maps to `context`; other rooms get their own context on first join.
pub struct MockRoomKit {
    pub calls: CallLog,
    pub failures: Failures,
    pub context: Arc<MockRoomContext>,
    others: Mutex<HashMap<String, Arc<MockRoomContext>>>,
    /// When set, `get_room_context` reports this context as already joined.
    pub already_joined: Mutex<Option<Arc<MockRoomContext>>>,
    logged_in: Mutex<bool>,
}

impl Default for MockRoomKit {
    fn default() -> Self {
        Self {
            calls: CallLog::default(),
            failures: Failures::default(),
            context: MockRoomContext::new(ROOM_UUID),
            others: Mutex::new(HashMap::new()),
            already_joined: Mutex::new(None),
            logged_in: Mutex::new(false),
        }
    }
}

impl MockRoomKit {
    pub fn context_for(&self, room_uuid: &str) -> Arc<MockRoomContext> {
        if room_uuid == self.context.room_uuid {
            return self.context.clone();
        }
        self.others
            .lock()
            .unwrap()
            .entry(room_uuid.to_string())
            .or_insert_with(|| MockRoomContext::new(room_uuid))
            .clone()
    }
}

#[async_trait]
impl RoomKit for MockRoomKit {
    async fn initialize(&self, options: &RoomKitOptions) -> ServiceResult<()> {
        self.calls.record(format!("initialize({})", options.app_key));
        self.failures.check("initialize")
    }

    async fn login(&self, account: &str, _token: &str) -> ServiceResult<()> {
        self.calls.record(format!("login({account})"));
        self.failures.check("login")?;
        *self.logged_in.lock().unwrap() = true;
        Ok(())
    }

    async fn logout(&self) -> ServiceResult<()> {
        self.calls.record("logout()");
        self.failures.check("logout")?;
        *self.logged_in.lock().unwrap() = false;
        Ok(())
    }

    fn is_logged_in(&self) -> bool {
        *self.logged_in.lock().unwrap()
    }

    async fn join_room(&self, request: &JoinRoomRequest) -> ServiceResult<Arc<dyn RoomContext>> {
        self.calls.record(format!(
            "join_room({},{},{})",
            request.room_uuid, request.user_name, request.role
        ));
        self.failures.check("join_room")?;
        Ok(self.context_for(&request.room_uuid) as Arc<dyn RoomContext>)
    }

    fn get_room_context(&self, room_uuid: &str) -> Option<Arc<dyn RoomContext>> {
        self.already_joined
            .lock()
            .unwrap()
            .clone()
            .filter(|ctx| ctx.room_uuid == room_uuid)
            .map(|ctx| ctx as Arc<dyn RoomContext>)
    }

    async fn send_custom_message(
        &self,
        room_uuid: &str,
        user_uuid: &str,
        command_id: i32,
        data: &str,
    ) -> ServiceResult<()> {
        self.calls.record(format!(
            "send_custom_message({room_uuid},{user_uuid},{command_id},{data})"
        ));
        self.failures.check("send_custom_message")
    }
}

/// Listener that keeps every event it receives.
pub struct RecordingListener {
    interests: EventKinds,
    events: Mutex<Vec<VoiceRoomEvent>>,
}

impl RecordingListener {
    pub fn new(kinds: &[EventKind]) -> Arc<Self> {
        Arc::new(Self {
            interests: EventKinds::of(kinds),
            events: Mutex::new(Vec::new()),
        })
    }

    pub fn all() -> Arc<Self> {
        Arc::new(Self {
            interests: EventKinds::all(),
            events: Mutex::new(Vec::new()),
        })
    }

    pub fn events(&self) -> Vec<VoiceRoomEvent> {
        self.events.lock().unwrap().clone()
    }
}

impl VoiceRoomListener for RecordingListener {
    fn interests(&self) -> EventKinds {
        self.interests
    }

    fn on_event(&self, event: &VoiceRoomEvent) {
        self.events.lock().unwrap().push(event.clone());
    }
}

/// Kit over fresh doubles, not yet initialized.
pub fn kit() -> (VoiceRoomKit, Arc<MockRoomService>, Arc<MockRoomKit>) {
    let service = Arc::new(MockRoomService::default());
    let toolkit = Arc::new(MockRoomKit::default());
    let kit = VoiceRoomKit::new(service.clone(), toolkit.clone());
    (kit, service, toolkit)
}

pub async fn initialized_kit() -> (VoiceRoomKit, Arc<MockRoomService>, Arc<MockRoomKit>) {
    let (kit, service, toolkit) = kit();
    kit.initialize(&test_config()).await.unwrap();
    (kit, service, toolkit)
}

/// Initialized kit that has joined [`ROOM_UUID`].
pub async fn joined_kit() -> (VoiceRoomKit, Arc<MockRoomService>, Arc<MockRoomKit>) {
    let (kit, service, toolkit) = initialized_kit().await;
    kit.join_room(&join_params(), &Default::default())
        .await
        .unwrap();
    (kit, service, toolkit)
}
