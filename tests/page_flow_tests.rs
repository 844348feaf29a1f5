use std::time::Duration;

use gallery_page::config::PageStructure;
use gallery_page::events::{PageCommand, PageEvent};
use gallery_page::forms::MISSING_FIELDS_NOTICE;
use gallery_page::tasks;
use tokio::sync::mpsc;
use tokio::time::timeout;
use tokio_util::sync::CancellationToken;

fn structure_with_form() -> PageStructure {
    let yaml = r#"
anchors: ["about", "gallery"]
reveal-targets: ["hero"]
contact-form: true
"#;
    serde_yaml::from_str(yaml).expect("valid page structure")
}

async fn next_command(rx: &mut mpsc::Receiver<PageCommand>) -> PageCommand {
    timeout(Duration::from_secs(2), rx.recv())
        .await
        .expect("timed out waiting for a page command")
        .expect("command channel closed unexpectedly")
}

async fn expect_quiet(rx: &mut mpsc::Receiver<PageCommand>) {
    let unexpected = timeout(Duration::from_millis(150), rx.recv()).await;
    assert!(
        unexpected.is_err(),
        "expected no page command, got {:?}",
        unexpected
    );
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn page_task_routes_the_full_feature_set() {
    let (events_tx, events_rx) = mpsc::channel(16);
    let (commands_tx, mut commands_rx) = mpsc::channel(16);
    let cancel = CancellationToken::new();
    let handle = tokio::spawn(tasks::page::run(
        structure_with_form(),
        events_rx,
        commands_tx,
        cancel.clone(),
    ));

    // Known anchor scrolls smoothly; unknown one is silently skipped.
    events_tx
        .send(PageEvent::AnchorClicked {
            href: "#gallery".to_owned(),
        })
        .await
        .unwrap();
    assert_eq!(
        next_command(&mut commands_rx).await,
        PageCommand::SmoothScrollTo {
            fragment: "gallery".to_owned()
        }
    );
    events_tx
        .send(PageEvent::AnchorClicked {
            href: "#nowhere".to_owned(),
        })
        .await
        .unwrap();
    expect_quiet(&mut commands_rx).await;

    // Reveal fires once, then the target is no longer observed.
    events_tx
        .send(PageEvent::TargetIntersected {
            id: "hero".to_owned(),
            ratio: 0.4,
        })
        .await
        .unwrap();
    assert_eq!(
        next_command(&mut commands_rx).await,
        PageCommand::Reveal {
            id: "hero".to_owned()
        }
    );
    events_tx
        .send(PageEvent::TargetIntersected {
            id: "hero".to_owned(),
            ratio: 0.9,
        })
        .await
        .unwrap();
    expect_quiet(&mut commands_rx).await;

    // Back-to-top shows past the threshold, hides below it, scrolls on press.
    events_tx
        .send(PageEvent::WindowScrolled { y: 450.0 })
        .await
        .unwrap();
    assert_eq!(
        next_command(&mut commands_rx).await,
        PageCommand::SetBackToTopVisible(true)
    );
    events_tx
        .send(PageEvent::BackToTopPressed)
        .await
        .unwrap();
    assert_eq!(next_command(&mut commands_rx).await, PageCommand::ScrollToTop);
    events_tx
        .send(PageEvent::WindowScrolled { y: 40.0 })
        .await
        .unwrap();
    assert_eq!(
        next_command(&mut commands_rx).await,
        PageCommand::SetBackToTopVisible(false)
    );

    cancel.cancel();
    let _ = handle.await;
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn form_rejection_keeps_fields_and_acceptance_resets_them() {
    let (events_tx, events_rx) = mpsc::channel(16);
    let (commands_tx, mut commands_rx) = mpsc::channel(16);
    let cancel = CancellationToken::new();
    let handle = tokio::spawn(tasks::page::run(
        structure_with_form(),
        events_rx,
        commands_tx,
        cancel.clone(),
    ));

    events_tx
        .send(PageEvent::FormSubmitted {
            name: "Ana".to_owned(),
            email: String::new(),
            message: "Hi".to_owned(),
        })
        .await
        .unwrap();
    assert_eq!(
        next_command(&mut commands_rx).await,
        PageCommand::Notice {
            text: MISSING_FIELDS_NOTICE.to_owned()
        }
    );
    // No reset after a rejection; the fields stay as typed.
    expect_quiet(&mut commands_rx).await;

    events_tx
        .send(PageEvent::FormSubmitted {
            name: "Ana".to_owned(),
            email: "ana@example.com".to_owned(),
            message: "Hi".to_owned(),
        })
        .await
        .unwrap();
    assert_eq!(
        next_command(&mut commands_rx).await,
        PageCommand::Notice {
            text: "Thank you for your message, Ana! We'll get back to you soon.".to_owned()
        }
    );
    assert_eq!(next_command(&mut commands_rx).await, PageCommand::ResetForm);

    cancel.cancel();
    let _ = handle.await;
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn submission_without_a_form_is_silently_skipped() {
    let structure: PageStructure = serde_yaml::from_str("contact-form: false").unwrap();
    let (events_tx, events_rx) = mpsc::channel(16);
    let (commands_tx, mut commands_rx) = mpsc::channel(16);
    let cancel = CancellationToken::new();
    let handle = tokio::spawn(tasks::page::run(
        structure,
        events_rx,
        commands_tx,
        cancel.clone(),
    ));

    events_tx
        .send(PageEvent::FormSubmitted {
            name: "Ana".to_owned(),
            email: "ana@example.com".to_owned(),
            message: "Hi".to_owned(),
        })
        .await
        .unwrap();
    expect_quiet(&mut commands_rx).await;

    cancel.cancel();
    let _ = handle.await;
}
