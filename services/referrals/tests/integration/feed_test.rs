use tokio::sync::broadcast;
use uuid::Uuid;

use enlace_domain::referral::ReferralStatus;
use enlace_referrals::domain::feed::{FeedEvent, ReferralFeed};

use crate::helpers::test_referral;

#[tokio::test]
async fn should_keep_a_projection_current_through_a_broadcast_channel() {
    let owner = Uuid::new_v4();
    let (tx, mut rx) = broadcast::channel::<FeedEvent>(16);

    let mut row = test_referral(owner, "900100200");
    tx.send(FeedEvent::Inserted(row.clone())).unwrap();
    row.status = ReferralStatus::Active;
    tx.send(FeedEvent::Updated(row.clone())).unwrap();
    tx.send(FeedEvent::Deleted {
        referred_by: owner,
        id: Uuid::new_v4(),
    })
    .unwrap();

    let mut feed = ReferralFeed::new();
    while let Ok(event) = rx.try_recv() {
        assert_eq!(event.owner(), owner);
        feed.apply(event);
    }

    assert_eq!(feed.len(), 1);
    assert_eq!(feed.items()[0].status, ReferralStatus::Active);
}

#[tokio::test]
async fn should_only_deliver_events_sent_after_subscribing() {
    let owner = Uuid::new_v4();
    let (tx, _drop_me) = broadcast::channel::<FeedEvent>(16);

    tx.send(FeedEvent::Inserted(test_referral(owner, "900100200")))
        .unwrap();

    let mut rx = tx.subscribe();
    tx.send(FeedEvent::Inserted(test_referral(owner, "900100201")))
        .unwrap();

    let first = rx.try_recv().unwrap();
    match first {
        FeedEvent::Inserted(referral) => assert_eq!(referral.identification, "900100201"),
        other => panic!("unexpected event {other:?}"),
    }
    assert!(rx.try_recv().is_err());
}

#[test]
fn should_survive_a_full_out_of_order_replay() {
    let owner = Uuid::new_v4();
    let row = test_referral(owner, "900100200");
    let mut feed = ReferralFeed::new();

    // delete and update arriving before the insert are no-ops
    feed.apply(FeedEvent::Deleted {
        referred_by: owner,
        id: row.id,
    });
    feed.apply(FeedEvent::Updated(row.clone()));
    assert!(feed.is_empty());

    feed.apply(FeedEvent::Inserted(row.clone()));
    feed.apply(FeedEvent::Inserted(row.clone()));
    assert_eq!(feed.len(), 1);
}
