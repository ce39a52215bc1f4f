use chrono::Duration;
use uuid::Uuid;

use enlace_domain::activity::ActivityAction;
use enlace_referrals::usecase::activity::{
    ListActivityUseCase, NewActivity, RecordActivityUseCase,
};

use crate::helpers::MockActivityRepo;

fn new_activity(user_id: Uuid, description: &str) -> NewActivity {
    NewActivity {
        user_id,
        action: ActivityAction::AddReferral,
        entity_type: "referral".into(),
        entity_id: Some(Uuid::new_v4()),
        description: Some(description.to_owned()),
        metadata: None,
    }
}

#[tokio::test]
async fn should_record_and_list_newest_first() {
    let user_id = Uuid::new_v4();
    let repo = MockActivityRepo::empty();
    let entries = repo.entries_handle();

    let recorder = RecordActivityUseCase {
        activity: repo.clone(),
    };
    recorder
        .execute(new_activity(user_id, "first"))
        .await
        .unwrap();
    recorder
        .execute(new_activity(user_id, "second"))
        .await
        .unwrap();

    // force distinct timestamps
    {
        let mut entries = entries.lock().unwrap();
        let bump = entries[1].created_at + Duration::seconds(1);
        entries[1].created_at = bump;
    }

    let lister = ListActivityUseCase { activity: repo };
    let feed = lister.execute(user_id, 10).await.unwrap();
    assert_eq!(feed.len(), 2);
    assert_eq!(feed[0].description.as_deref(), Some("second"));
}

#[tokio::test]
async fn should_bound_the_feed_by_the_requested_limit() {
    let user_id = Uuid::new_v4();
    let repo = MockActivityRepo::empty();
    let recorder = RecordActivityUseCase {
        activity: repo.clone(),
    };
    for i in 0..5 {
        recorder
            .execute(new_activity(user_id, &format!("entry {i}")))
            .await
            .unwrap();
    }

    let lister = ListActivityUseCase { activity: repo };
    let feed = lister.execute(user_id, 3).await.unwrap();
    assert_eq!(feed.len(), 3);
}

#[tokio::test]
async fn should_scope_the_feed_to_its_owner() {
    let user_id = Uuid::new_v4();
    let repo = MockActivityRepo::empty();
    let recorder = RecordActivityUseCase {
        activity: repo.clone(),
    };
    recorder
        .execute(new_activity(user_id, "mine"))
        .await
        .unwrap();
    recorder
        .execute(new_activity(Uuid::new_v4(), "someone else's"))
        .await
        .unwrap();

    let lister = ListActivityUseCase { activity: repo };
    let feed = lister.execute(user_id, 10).await.unwrap();
    assert_eq!(feed.len(), 1);
    assert_eq!(feed[0].description.as_deref(), Some("mine"));
}

#[tokio::test]
async fn best_effort_recording_swallows_store_failures() {
    let recorder = RecordActivityUseCase {
        activity: MockActivityRepo::failing(),
    };
    // must not panic or propagate
    recorder
        .execute_best_effort(new_activity(Uuid::new_v4(), "lost"))
        .await;
}
