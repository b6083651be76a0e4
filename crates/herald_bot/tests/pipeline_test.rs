//! End-to-end pipeline runs against mock services.

mod test_utils;

use herald_core::{PublishOutcome, StoreKey};
use herald_error::HeraldErrorKind;
use herald_storage::ArchiveOutcome;
use std::sync::Arc;
use test_utils::{MockGenerator, MockPublisher, Workspace};

#[tokio::test]
async fn test_promo_scenario() {
    let workspace = Workspace::new();
    workspace.add_text("promo.md", "Fresh handmade pasta every evening.");
    let image_path = workspace.add_image("a.jpg");

    let generator = Arc::new(MockGenerator::replying("Come taste our fresh pasta! 🍝"));
    let facebook = Arc::new(MockPublisher::accepting("facebook"));
    let instagram = Arc::new(MockPublisher::accepting("instagram"));
    let pipeline = workspace.pipeline(generator.clone(), &[facebook.clone(), instagram.clone()]);

    let report = pipeline.run().await.unwrap();
    let expected =
        "Come taste our fresh pasta! 🍝 #Foodie #RestaurantVibes #Gourmet #DiningExperience";

    let context = report.context();
    assert_eq!(context.caption(), Some(expected));
    assert_eq!(context.value(StoreKey::MdFilename).as_deref(), Some("promo.md"));
    assert_eq!(
        context.value(StoreKey::MdContent).as_deref(),
        Some("Fresh handmade pasta every evening.")
    );

    for publisher in [&facebook, &instagram] {
        let calls = publisher.calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].0, expected);
        assert_eq!(calls[0].1.path(), &image_path);
        assert_eq!(calls[0].1.file_name(), "a.jpg");
    }

    assert!(report.outcome("facebook").unwrap().is_published());
    assert!(report.outcome("instagram").unwrap().is_published());
    assert_eq!(report.published_count(), 2);

    assert_eq!(
        report.archived(),
        &Some(ArchiveOutcome::Moved(workspace.history_dir().join("a.jpg")))
    );
    assert!(!image_path.exists());
    assert_eq!(workspace.history(), vec!["a.jpg".to_string()]);
}

#[tokio::test]
async fn test_generation_request() {
    let workspace = Workspace::new();
    workspace.add_text("promo.md", "Oysters on Friday.");
    workspace.add_image("a.jpg");

    let generator = Arc::new(MockGenerator::replying("Shucked fresh #Oysters"));
    let pipeline = workspace.pipeline(generator.clone(), &[]);

    pipeline.run().await.unwrap();

    let requests = generator.requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].model(), "mock-model");
    assert_eq!(*requests[0].temperature(), Some(0.7));
    assert_eq!(*requests[0].max_tokens(), Some(100));
    assert!(requests[0].prompt().contains("'promo.md'"));
    assert!(requests[0].prompt().contains("Oysters on Friday."));
}

#[tokio::test]
async fn test_hashtag_response_kept_verbatim() {
    let workspace = Workspace::new();
    workspace.add_text("menu.md", "New tasting menu.");
    workspace.add_image("dish.png");

    let generator = Arc::new(MockGenerator::replying("  Seven courses of joy ✨ #TastingMenu #Chef\n"));
    let facebook = Arc::new(MockPublisher::accepting("facebook"));
    let pipeline = workspace.pipeline(generator, &[facebook.clone()]);

    let report = pipeline.run().await.unwrap();

    assert_eq!(
        report.context().caption(),
        Some("Seven courses of joy ✨ #TastingMenu #Chef")
    );
    assert_eq!(facebook.calls()[0].0, "Seven courses of joy ✨ #TastingMenu #Chef");
}

#[tokio::test]
async fn test_empty_content_dir_skips_everything() {
    let workspace = Workspace::new();
    workspace.add_image("a.jpg");

    let generator = Arc::new(MockGenerator::replying("unused #tag"));
    let facebook = Arc::new(MockPublisher::accepting("facebook"));
    let instagram = Arc::new(MockPublisher::accepting("instagram"));
    let pipeline = workspace.pipeline(generator.clone(), &[facebook.clone(), instagram.clone()]);

    let report = pipeline.run().await.unwrap();
    let context = report.context();

    assert!(context.source().is_none());
    assert!(context.value(StoreKey::MdContent).is_none());
    assert!(context.value(StoreKey::MdFilename).is_none());
    assert!(context.caption().is_none());
    assert!(context.image().is_some());

    assert!(generator.requests().is_empty());
    assert!(facebook.calls().is_empty());
    assert!(instagram.calls().is_empty());
    assert_eq!(report.outcome("facebook"), Some(&PublishOutcome::Skipped));
    assert_eq!(report.outcome("instagram"), Some(&PublishOutcome::Skipped));
}

#[tokio::test]
async fn test_empty_image_dir_skips_publishers() {
    let workspace = Workspace::new();
    workspace.add_text("promo.md", "Brunch is back.");

    let generator = Arc::new(MockGenerator::replying("Brunch time! #Brunch"));
    let facebook = Arc::new(MockPublisher::accepting("facebook"));
    let instagram = Arc::new(MockPublisher::accepting("instagram"));
    let pipeline = workspace.pipeline(generator, &[facebook.clone(), instagram.clone()]);

    let report = pipeline.run().await.unwrap();

    assert!(report.archived().is_none());
    assert_eq!(report.context().caption(), Some("Brunch time! #Brunch"));
    assert!(report.context().image().is_none());
    assert!(facebook.calls().is_empty());
    assert!(instagram.calls().is_empty());
    assert_eq!(report.outcome("facebook"), Some(&PublishOutcome::Skipped));
    assert_eq!(report.outcome("instagram"), Some(&PublishOutcome::Skipped));
    assert_eq!(report.published_count(), 0);
}

#[tokio::test]
async fn test_empty_file_skips_generation() {
    let workspace = Workspace::new();
    workspace.add_text("blank.md", "");
    workspace.add_image("a.jpg");

    let generator = Arc::new(MockGenerator::replying("unused #tag"));
    let facebook = Arc::new(MockPublisher::accepting("facebook"));
    let pipeline = workspace.pipeline(generator.clone(), &[facebook.clone()]);

    let report = pipeline.run().await.unwrap();

    assert!(generator.requests().is_empty());
    assert!(report.context().caption().is_none());
    assert_eq!(report.outcome("facebook"), Some(&PublishOutcome::Skipped));
}

#[tokio::test]
async fn test_rejection_is_recorded_not_raised() {
    let workspace = Workspace::new();
    workspace.add_text("promo.md", "Wine pairing night.");
    workspace.add_image("a.jpg");

    let generator = Arc::new(MockGenerator::replying("Cheers! #Wine"));
    let facebook = Arc::new(MockPublisher::returning(
        "facebook",
        PublishOutcome::Rejected {
            status: 400,
            body: serde_json::json!({"error": {"code": 190}}),
        },
    ));
    let instagram = Arc::new(MockPublisher::accepting("instagram"));
    let pipeline = workspace.pipeline(generator, &[facebook.clone(), instagram.clone()]);

    let report = pipeline.run().await.unwrap();

    assert!(matches!(
        report.outcome("facebook"),
        Some(PublishOutcome::Rejected { status: 400, .. })
    ));
    assert_eq!(instagram.calls().len(), 1);
    assert_eq!(report.published_count(), 1);
    assert!(report.archived().is_some());
    assert_eq!(workspace.history(), vec!["a.jpg".to_string()]);
}

#[tokio::test]
async fn test_unpublished_image_stays_in_place() {
    let workspace = Workspace::new();
    workspace.add_text("promo.md", "Wine pairing night.");
    let image_path = workspace.add_image("a.jpg");

    let generator = Arc::new(MockGenerator::replying("Cheers! #Wine"));
    let facebook = Arc::new(MockPublisher::returning(
        "facebook",
        PublishOutcome::Rejected {
            status: 400,
            body: serde_json::json!({"error": {"code": 190}}),
        },
    ));
    let instagram = Arc::new(MockPublisher::returning(
        "instagram",
        PublishOutcome::Aborted {
            stage: "media".to_string(),
            status: 400,
            body: serde_json::json!({"error": {}}),
        },
    ));
    let pipeline = workspace.pipeline(generator, &[facebook, instagram]);

    let report = pipeline.run().await.unwrap();

    assert_eq!(report.published_count(), 0);
    assert!(report.archived().is_none());
    assert!(image_path.exists());
    assert!(workspace.history().is_empty());
}

#[tokio::test]
async fn test_generation_error_aborts_run() {
    let workspace = Workspace::new();
    workspace.add_text("promo.md", "Late night menu.");
    workspace.add_image("a.jpg");

    let generator = Arc::new(MockGenerator::unreachable());
    let facebook = Arc::new(MockPublisher::accepting("facebook"));
    let pipeline = workspace.pipeline(generator, &[facebook.clone()]);

    let err = pipeline.run().await.unwrap_err();

    assert!(matches!(err.kind(), HeraldErrorKind::Generation(_)));
    assert!(facebook.calls().is_empty());
}

#[tokio::test]
async fn test_transport_error_stops_later_publishers() {
    let workspace = Workspace::new();
    workspace.add_text("promo.md", "Happy hour.");
    workspace.add_image("a.jpg");

    let generator = Arc::new(MockGenerator::replying("Half price #HappyHour"));
    let facebook = Arc::new(MockPublisher::broken("facebook"));
    let instagram = Arc::new(MockPublisher::accepting("instagram"));
    let pipeline = workspace.pipeline(generator, &[facebook.clone(), instagram.clone()]);

    let err = pipeline.run().await.unwrap_err();

    assert!(matches!(err.kind(), HeraldErrorKind::Http(_)));
    assert_eq!(facebook.calls().len(), 1);
    assert!(instagram.calls().is_empty());
    assert!(workspace.history().is_empty());
}

#[tokio::test]
async fn test_seeded_selection_is_reproducible() {
    let workspace = Workspace::new();
    for name in ["a.md", "b.md", "c.md", "d.md"] {
        workspace.add_text(name, &format!("content of {name}"));
    }
    for name in ["1.jpg", "2.png", "3.webp", "4.jpeg"] {
        workspace.add_image(name);
    }

    let pick = |seed: u64| {
        let pipeline = workspace
            .pipeline(Arc::new(MockGenerator::replying("#same")), &[])
            .with_seed(seed);
        async move {
            let report = pipeline.run().await.unwrap();
            (
                report.context().value(StoreKey::MdFilename),
                report.context().value(StoreKey::SelectedImage),
            )
        }
    };

    assert_eq!(pick(7).await, pick(7).await);
}

#[tokio::test]
async fn test_runs_do_not_share_state() {
    let workspace = Workspace::new();
    workspace.add_text("promo.md", "Soup of the day.");
    let image = workspace.add_image("a.jpg");

    let generator = Arc::new(MockGenerator::replying("Warm up #Soup"));
    let pipeline = workspace.pipeline(generator, &[]);

    let first = pipeline.run().await.unwrap();
    assert!(first.context().image().is_some());

    std::fs::remove_file(image).unwrap();
    let second = pipeline.run().await.unwrap();

    assert!(second.context().image().is_none());
    assert!(second.context().caption().is_some());
}
