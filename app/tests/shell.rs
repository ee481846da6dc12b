//! The line shell end to end over in-memory input and output
#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

mod common;

use common::Harness;
use conduit_app::shell::{Command, Flow};
use conduit_app::{AppAction, AppError, FeedTab};
use conduit_testing::MockConduitApi;
use tokio::io::BufReader;

fn backend() -> MockConduitApi {
    let api = MockConduitApi::new();
    api.with_user("alice");
    api.with_article("alice", "Dragons", &["dragons"]);
    api
}

async fn run(h: &Harness, script: &str) -> String {
    let mut output = Vec::new();
    h.shell
        .run(BufReader::new(script.as_bytes()), &mut output)
        .await
        .unwrap();
    String::from_utf8(output).unwrap()
}

#[tokio::test]
async fn a_script_signs_in_and_comments() {
    let h = Harness::new(backend());
    h.send(AppAction::Start).await;

    let output = run(
        &h,
        "go /login\n\
         submit form-login email=alice@conduit.test password=password123\n\
         press open-dragons\n\
         submit form-comment body=Nice work, me\n\
         quit\n\
         show\n",
    )
    .await;

    assert!(output.contains("Sign in"));
    assert!(output.contains("Nice work, me"));
    assert!(!output.contains("error:"), "{output}");
    assert_eq!(h.api.stored_comments("dragons")[0].body, "Nice work, me");
}

#[tokio::test]
async fn mistakes_are_reported_and_the_loop_goes_on() {
    let h = Harness::new(backend());
    h.send(AppAction::Start).await;

    let output = run(&h, "dance\npress nowhere\ngo /article/dragons\n").await;

    assert!(output.contains("error: "));
    assert!(output.contains("commands:"));
    assert!(output.contains("nowhere"));
    assert!(output.contains("# Dragons"));
}

#[tokio::test]
async fn forms_cannot_be_pressed_and_links_cannot_be_submitted() {
    let h = Harness::new(backend());
    h.visit("/login").await;

    assert!(matches!(
        h.shell.execute(Command::Press("form-login".into())).await,
        Err(AppError::NotPressable(_))
    ));
    assert!(matches!(
        h.shell
            .execute(Command::Submit {
                form: "nav-home".into(),
                fields: vec![],
            })
            .await,
        Err(AppError::NotAForm(_))
    ));
    assert!(matches!(
        h.shell
            .execute(Command::Submit {
                form: "form-login".into(),
                fields: vec![("username".into(), "alice".into())],
            })
            .await,
        Err(AppError::UnknownField { .. })
    ));
    assert_eq!(h.shell.execute(Command::Quit).await.unwrap(), Flow::Quit);
}

#[tokio::test]
async fn tags_with_spaces_can_be_pressed() {
    let api = backend();
    api.with_article("alice", "Ownership", &["rust lang"]);
    let h = Harness::new(api);
    h.send(AppAction::Start).await;

    let output = run(&h, "press tag-rust lang\n").await;

    assert!(!output.contains("error:"), "{output}");
    assert_eq!(
        h.state(|s| s.view.tab.clone()).await,
        FeedTab::Tag("rust lang".into())
    );
    assert!(output.contains("Ownership"));
}

#[tokio::test]
async fn comment_text_keeps_equals_signs_and_spacing() {
    let h = Harness::new(backend());
    h.login_as("alice").await;
    h.visit("/article/dragons").await;

    let output = run(&h, "submit form-comment body=1 + 1 = 2,  surely\n").await;

    assert!(!output.contains("error:"), "{output}");
    assert_eq!(h.api.stored_comments("dragons")[0].body, "1 + 1 = 2,  surely");
}

#[tokio::test]
async fn typed_fields_must_belong_to_the_form() {
    let h = Harness::new(backend());
    h.visit("/login").await;

    assert!(matches!(
        h.shell
            .execute(Command::SubmitLine {
                form: "form-login".into(),
                input: "username=alice password=secret".into(),
            })
            .await,
        Err(AppError::UnknownField { field, .. }) if field == "username"
    ));
}
