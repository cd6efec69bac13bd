use std::sync::Arc;
use wintoast::platform::FailurePoint;
use wintoast::{
    ChannelHandler, DismissalReason, RecordingPlatform, TemplateType, TextField, ToastError,
    ToastEvent, ToastService, ToastTemplate,
};

fn initialized_service() -> (ToastService<RecordingPlatform>, RecordingPlatform) {
    let platform = RecordingPlatform::new();
    let mut service = ToastService::new(platform.clone());
    service.set_app_name("Example");
    service.set_app_user_model_id("Example.App");
    service.initialize().unwrap();
    (service, platform)
}

fn image_template() -> ToastTemplate {
    let mut template = ToastTemplate::new(TemplateType::ImageAndText02);
    template.set_text_field("Download complete", TextField::FirstLine).unwrap();
    template.set_text_field("report.pdf", TextField::SecondLine).unwrap();
    template.set_image_path(r"C:\icons\done.png");
    template.set_silent(true);
    template
}

#[test]
fn test_full_payload() {
    let (service, platform) = initialized_service();
    let (handler, _events) = ChannelHandler::new();

    service.show_toast(&image_template(), Arc::new(handler)).unwrap();

    let posted = platform.posted();
    assert_eq!(posted.len(), 1);
    assert_eq!(posted[0].app_user_model_id, "Example.App");
    assert_eq!(
        posted[0].xml,
        "<toast><visual><binding template=\"ToastImageAndText02\">\
         <image id=\"1\" src=\"file:///C:\\icons\\done.png\"/>\
         <text id=\"1\">Download complete</text>\
         <text id=\"2\">report.pdf</text>\
         </binding></visual><audio silent=\"true\"/></toast>"
    );
}

#[tokio::test]
async fn test_lifecycle_events_reach_handler() {
    let (service, platform) = initialized_service();
    let (handler, mut events) = ChannelHandler::new();
    let handler = Arc::new(handler);

    let first = service.show_toast(&image_template(), handler.clone()).unwrap();
    let second = service.show_toast(&image_template(), handler.clone()).unwrap();
    assert_ne!(first, second);

    platform.activate(first).unwrap();
    platform.dismiss(second, DismissalReason::TimedOut).unwrap();
    platform.fail(first, "notifications disabled").unwrap();

    assert_eq!(events.recv().await, Some(ToastEvent::Activated { id: first }));
    assert_eq!(
        events.recv().await,
        Some(ToastEvent::Dismissed {
            id: second,
            reason: DismissalReason::TimedOut
        })
    );
    assert_eq!(
        events.recv().await,
        Some(ToastEvent::Failed {
            id: first,
            error: "notifications disabled".to_string()
        })
    );
}

#[test]
fn test_incompatible_platform() {
    let mut service = ToastService::new(RecordingPlatform::incompatible());
    service.set_app_name("Example");
    service.set_app_user_model_id("Example.App");

    assert!(!service.is_compatible());
    match service.initialize() {
        Err(ToastError::Incompatible(missing)) => assert!(!missing.is_empty()),
        other => panic!("expected Incompatible, got {:?}", other),
    }
    assert!(service.platform().process_app_id().is_none());
}

#[test]
fn test_open_failure_leaves_service_uninitialized() {
    let platform = RecordingPlatform::new();
    platform.fail_at(FailurePoint::Open);

    let mut service = ToastService::new(platform.clone());
    service.set_app_name("Example");
    service.set_app_user_model_id("Example.App");

    assert!(matches!(service.initialize(), Err(ToastError::Platform(_))));
    assert!(!service.is_initialized());
    // app id was bound before the session failed to open
    assert_eq!(platform.process_app_id().as_deref(), Some("Example.App"));
}

#[test]
fn test_post_failures_abort() {
    let (service, platform) = initialized_service();
    let (handler, _events) = ChannelHandler::new();
    let handler = Arc::new(handler);

    platform.fail_at(FailurePoint::TemplateContent);
    assert!(service.show_toast(&image_template(), handler.clone()).is_err());

    platform.fail_at(FailurePoint::Show);
    assert!(service.show_toast(&image_template(), handler.clone()).is_err());

    platform.clear_failure();
    let mut too_long = image_template();
    too_long.set_image_path("x".repeat(300));
    assert!(matches!(
        service.show_toast(&too_long, handler),
        Err(ToastError::PathTooLong(_))
    ));

    assert!(platform.posted().is_empty());
}

#[test]
fn test_shared_service_is_single_instance() {
    let first = ToastService::shared() as *const _;
    let second = ToastService::shared() as *const _;
    assert_eq!(first, second);
}
