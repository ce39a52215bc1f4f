use std::collections::HashMap;

use chrono::{Duration, Utc};
use uuid::Uuid;

use enlace_referrals::domain::types::NetworkChild;
use enlace_referrals::usecase::network::GetNetworkUseCase;

use crate::helpers::MockNetwork;

fn child(name: &str, linked: Option<Uuid>, offset_min: i64) -> NetworkChild {
    NetworkChild {
        id: Uuid::new_v4(),
        name: name.into(),
        linked_user_id: linked,
        created_at: Utc::now() + Duration::minutes(offset_min),
    }
}

#[tokio::test]
async fn should_traverse_registered_referrals_breadth_first() {
    // root -> B (registered), C ; B's account -> D (registered) ; D's account -> (none)
    let root = Uuid::new_v4();
    let b_account = Uuid::new_v4();
    let d_account = Uuid::new_v4();
    let b = child("B", Some(b_account), 0);
    let c = child("C", None, 1);
    let d = child("D", Some(d_account), 2);

    let mut children = HashMap::new();
    children.insert(root, vec![b.clone(), c.clone()]);
    children.insert(b_account, vec![d.clone()]);

    let uc = GetNetworkUseCase {
        network: MockNetwork::with_children(children),
    };
    let view = uc.execute(root).await.unwrap();

    assert!(!view.degraded);
    let summary: Vec<(&str, u32, u64)> = view
        .nodes
        .iter()
        .map(|n| (n.name.as_str(), n.level, n.children_count))
        .collect();
    assert_eq!(summary, vec![("B", 1, 1), ("C", 1, 0), ("D", 2, 0)]);
    assert_eq!(view.nodes[2].parent_id, b.id);
}

#[tokio::test]
async fn should_degrade_to_direct_referrals_on_mid_traversal_failure() {
    let root = Uuid::new_v4();
    let b_account = Uuid::new_v4();
    let b = child("B", Some(b_account), 0);
    let c = child("C", None, 1);

    let mut children = HashMap::new();
    children.insert(root, vec![b.clone(), c.clone()]);

    // first call (root) succeeds, expanding B's account fails
    let mut network = MockNetwork::with_children(children);
    network.fail_after = Some(1);

    let uc = GetNetworkUseCase { network };
    let view = uc.execute(root).await.unwrap();

    assert!(view.degraded);
    assert_eq!(view.nodes.len(), 2);
    assert!(view.nodes.iter().all(|n| n.level == 1));
    assert!(view.nodes.iter().all(|n| n.children_count == 0));
    assert!(view.nodes.iter().all(|n| n.parent_id == root));
}

#[tokio::test]
async fn should_fail_when_the_store_is_unreachable_from_the_start() {
    let mut network = MockNetwork::default();
    network.fail_after = Some(0);
    let uc = GetNetworkUseCase { network };
    assert!(uc.execute(Uuid::new_v4()).await.is_err());
}

#[tokio::test]
async fn should_return_empty_view_for_user_with_no_referrals() {
    let uc = GetNetworkUseCase {
        network: MockNetwork::default(),
    };
    let view = uc.execute(Uuid::new_v4()).await.unwrap();
    assert!(view.nodes.is_empty());
    assert!(!view.degraded);
}
