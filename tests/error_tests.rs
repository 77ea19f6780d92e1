//! Tests for the error system.

use pretty_assertions::assert_eq;

use voiceroom::error::*;
use voiceroom::service::ServiceError;
use voiceroom::util::callback::Completion;

#[test]
fn error_remote_creation() {
    let err = VoiceRoomError::remote(1004, "room not exist");
    assert!(matches!(&err, VoiceRoomError::Remote { code: 1004, .. }));
    assert_eq!(err.to_string(), "Remote error (code 1004): room not exist");
}

#[test]
fn error_projection_is_stable_for_every_variant() {
    struct Case {
        error: VoiceRoomError,
        expected_category: ErrorCategory,
        expected_code: i32,
        expected_message: &'static str,
    }

    let cases = vec![
        Case {
            error: VoiceRoomError::NotInitialized("Failed to end room. Uninitialized.".into()),
            expected_category: ErrorCategory::Precondition,
            expected_code: ErrorCode::FAILED,
            expected_message: "Failed to end room. Uninitialized.",
        },
        Case {
            error: VoiceRoomError::NoRoomContext("Failed to leave room. RoomContext is nil.".into()),
            expected_category: ErrorCategory::Precondition,
            expected_code: ErrorCode::FAILED,
            expected_message: "Failed to leave room. RoomContext is nil.",
        },
        Case {
            error: VoiceRoomError::MissingLiveRecord(
                "Failed to send Gift. liveRecordId not exist.".into(),
            ),
            expected_category: ErrorCategory::Precondition,
            expected_code: ErrorCode::FAILED,
            expected_message: "Failed to send Gift. liveRecordId not exist.",
        },
        Case {
            error: ServiceError::new(30001, "rtc unavailable").into(),
            expected_category: ErrorCategory::Remote,
            expected_code: 30001,
            expected_message: "rtc unavailable",
        },
        Case {
            error: VoiceRoomError::Configuration("app_key must not be empty".into()),
            expected_category: ErrorCategory::Configuration,
            expected_code: ErrorCode::FAILED,
            expected_message: "Configuration error: app_key must not be empty",
        },
    ];

    for case in cases {
        assert_eq!(case.error.category(), case.expected_category);
        assert_eq!(case.error.code(), case.expected_code);
        assert_eq!(case.error.message(), case.expected_message);
    }
}

#[cfg(feature = "config-file")]
#[test]
fn unreadable_config_file_is_an_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = voiceroom::config::VoiceRoomConfig::from_toml_file(dir.path().join("missing.toml"))
        .unwrap_err();
    assert!(matches!(err, VoiceRoomError::Io(_)));
    assert_eq!(err.category(), ErrorCategory::Io);
    assert_eq!(err.code(), ErrorCode::FAILED);
}

#[test]
fn completion_projects_success_and_failure() {
    let ok: Completion<&str> = Completion::from(Ok::<_, VoiceRoomError>("payload"));
    assert_eq!(ok.code, ErrorCode::SUCCESS);
    assert_eq!(ok.payload, Some("payload"));

    let failed: Completion<&str> = Completion::from(Err::<&str, _>(VoiceRoomError::remote(7, "busy")));
    assert_eq!((failed.code, failed.message, failed.payload), (7, Some("busy".to_string()), None));
}
