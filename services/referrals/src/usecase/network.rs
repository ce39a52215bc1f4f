//! Referral network aggregation.
//!
//! Breadth-first traversal of the referral graph: children of a node are
//! the referrals recorded by that node's user account; a referral that
//! later registered continues the traversal through its linked account.

use std::collections::{HashSet, VecDeque};

use uuid::Uuid;

use enlace_domain::network::NetworkNode;

use crate::domain::repository::NetworkQueries;
use crate::domain::types::NetworkChild;
use crate::error::ReferralServiceError;

/// Result of a network query. `degraded` is set when the traversal fell
/// back to the direct-referrals-only view (every node at level 1,
/// children uncounted).
#[derive(Debug)]
pub struct NetworkView {
    pub nodes: Vec<NetworkNode>,
    pub degraded: bool,
}

pub struct GetNetworkUseCase<N: NetworkQueries> {
    pub network: N,
}

impl<N: NetworkQueries> GetNetworkUseCase<N> {
    /// Full tree rooted at `root`, ordered by (level asc, created_at asc).
    ///
    /// An empty network yields an empty view; only an unreachable store
    /// on the very first query is an error. A transient failure deeper
    /// in the traversal degrades to the level-1 view instead of failing.
    pub async fn execute(&self, root: Uuid) -> Result<NetworkView, ReferralServiceError> {
        let direct = self.network.children_of(root).await?;

        let mut nodes: Vec<NetworkNode> = Vec::new();
        let mut visited: HashSet<Uuid> = HashSet::new();
        visited.insert(root);
        // (account to expand, index of its node in `nodes`, next level)
        let mut queue: VecDeque<(Uuid, usize, u32)> = VecDeque::new();

        Self::admit_children(&mut nodes, &mut visited, &mut queue, &direct, root, 1);

        while let Some((account, node_idx, child_level)) = queue.pop_front() {
            let children = match self.network.children_of(account).await {
                Ok(children) => children,
                Err(ReferralServiceError::Internal(e)) => {
                    tracing::warn!(
                        root = %root,
                        error = %e,
                        "network traversal degraded to direct referrals"
                    );
                    return Ok(Self::degraded_view(&direct, root));
                }
                Err(other) => return Err(other),
            };
            nodes[node_idx].children_count = children.len() as u64;
            let parent_id = nodes[node_idx].id;
            Self::admit_children(
                &mut nodes,
                &mut visited,
                &mut queue,
                &children,
                parent_id,
                child_level,
            );
        }

        // BFS already yields level order; the explicit sort pins the
        // (level, created_at) contract across sibling groups.
        nodes.sort_by(|a, b| a.level.cmp(&b.level).then(a.created_at.cmp(&b.created_at)));
        Ok(NetworkView {
            nodes,
            degraded: false,
        })
    }

    fn admit_children(
        nodes: &mut Vec<NetworkNode>,
        visited: &mut HashSet<Uuid>,
        queue: &mut VecDeque<(Uuid, usize, u32)>,
        children: &[NetworkChild],
        parent_id: Uuid,
        level: u32,
    ) {
        for child in children {
            if !visited.insert(child.id) {
                tracing::warn!(node = %child.id, "cycle in referral graph, skipping branch");
                continue;
            }
            nodes.push(NetworkNode {
                id: child.id,
                name: child.name.clone(),
                level,
                parent_id,
                children_count: 0,
                created_at: child.created_at,
            });
            if let Some(account) = child.linked_user_id {
                if visited.insert(account) {
                    queue.push_back((account, nodes.len() - 1, level + 1));
                } else {
                    tracing::warn!(account = %account, "cycle in referral graph, not descending");
                }
            }
        }
    }

    fn degraded_view(direct: &[NetworkChild], root: Uuid) -> NetworkView {
        let nodes = direct
            .iter()
            .map(|child| NetworkNode {
                id: child.id,
                name: child.name.clone(),
                level: 1,
                parent_id: root,
                children_count: 0,
                created_at: child.created_at,
            })
            .collect();
        NetworkView {
            nodes,
            degraded: true,
        }
    }
}
