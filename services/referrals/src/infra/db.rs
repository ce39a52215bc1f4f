use anyhow::Context as _;
use chrono::{DateTime, Utc};
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, DatabaseConnection, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, SqlErr,
};
use uuid::Uuid;

use enlace_domain::activity::ActivityAction;
use enlace_domain::pagination::PageRequest;
use enlace_domain::referral::{Gender, ReferralStatus, Zone};
use enlace_domain::user::UserRole;
use enlace_referrals_schema::{activity_log, referrals, users};

use crate::domain::repository::{
    ActivityLogRepository, NetworkQueries, ReferralRepository, UserRepository,
};
use crate::domain::types::{
    ActivityEntry, NetworkChild, ProfilePatch, RankingRow, Referral, ReferralPatch, User,
};
use crate::error::ReferralServiceError;

// ── User repository ──────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbUserRepository {
    pub db: DatabaseConnection,
}

impl UserRepository for DbUserRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, ReferralServiceError> {
        let model = users::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .context("find user by id")?;
        Ok(model.map(user_from_model))
    }

    async fn find_by_identity_id(
        &self,
        identity_id: Uuid,
    ) -> Result<Option<User>, ReferralServiceError> {
        let model = users::Entity::find()
            .filter(users::Column::IdentityId.eq(identity_id))
            .one(&self.db)
            .await
            .context("find user by identity id")?;
        Ok(model.map(user_from_model))
    }

    async fn find_by_referral_code(
        &self,
        code: &str,
    ) -> Result<Option<User>, ReferralServiceError> {
        let model = users::Entity::find()
            .filter(users::Column::ReferralCode.eq(code))
            .one(&self.db)
            .await
            .context("find user by referral code")?;
        Ok(model.map(user_from_model))
    }

    async fn referral_code_exists(&self, code: &str) -> Result<bool, ReferralServiceError> {
        let count = users::Entity::find()
            .filter(users::Column::ReferralCode.eq(code))
            .count(&self.db)
            .await
            .context("check referral code existence")?;
        Ok(count > 0)
    }

    async fn create(&self, user: &User) -> Result<(), ReferralServiceError> {
        let result = users::ActiveModel {
            id: Set(user.id),
            identity_id: Set(user.identity_id),
            identification: Set(user.identification.clone()),
            first_name: Set(user.first_name.clone()),
            last_name: Set(user.last_name.clone()),
            role: Set(user.role.as_str().to_owned()),
            referral_code: Set(user.referral_code.clone()),
            parent_user_id: Set(user.parent_user_id),
            email: Set(user.email.clone()),
            phone: Set(user.phone.clone()),
            department: Set(user.department.clone()),
            municipality: Set(user.municipality.clone()),
            zone: Set(user.zone.map(|z| z.as_str().to_owned())),
            neighborhood: Set(user.neighborhood.clone()),
            birth_date: Set(user.birth_date),
            occupation: Set(user.occupation.clone()),
            created_at: Set(user.created_at),
            updated_at: Set(user.updated_at),
        }
        .insert(&self.db)
        .await;

        match result {
            Ok(_) => Ok(()),
            // Two unique constraints on the table; tell them apart by
            // the constraint name in the violation message.
            Err(e) => match e.sql_err() {
                Some(SqlErr::UniqueConstraintViolation(msg)) if msg.contains("referral_code") => {
                    Err(ReferralServiceError::ReferralCodeTaken)
                }
                Some(SqlErr::UniqueConstraintViolation(_)) => {
                    Err(ReferralServiceError::IdentificationTaken)
                }
                _ => Err(anyhow::Error::from(e).context("create user").into()),
            },
        }
    }

    async fn update_profile(
        &self,
        id: Uuid,
        patch: &ProfilePatch,
    ) -> Result<(), ReferralServiceError> {
        let mut am = users::ActiveModel {
            id: Set(id),
            ..Default::default()
        };
        if let Some(first_name) = &patch.first_name {
            am.first_name = Set(first_name.clone());
        }
        if let Some(last_name) = &patch.last_name {
            am.last_name = Set(last_name.clone());
        }
        if let Some(phone) = &patch.phone {
            am.phone = Set(Some(phone.clone()));
        }
        if let Some(department) = &patch.department {
            am.department = Set(Some(department.clone()));
        }
        if let Some(municipality) = &patch.municipality {
            am.municipality = Set(Some(municipality.clone()));
        }
        if let Some(zone) = patch.zone {
            am.zone = Set(Some(zone.as_str().to_owned()));
        }
        if let Some(neighborhood) = &patch.neighborhood {
            am.neighborhood = Set(Some(neighborhood.clone()));
        }
        if let Some(occupation) = &patch.occupation {
            am.occupation = Set(Some(occupation.clone()));
        }
        am.updated_at = Set(Utc::now());
        am.update(&self.db).await.context("update user profile")?;
        Ok(())
    }

    async fn count(&self) -> Result<u64, ReferralServiceError> {
        let count = users::Entity::find()
            .count(&self.db)
            .await
            .context("count users")?;
        Ok(count)
    }

    async fn list_basic(&self, limit: u64) -> Result<Vec<User>, ReferralServiceError> {
        let models = users::Entity::find()
            .order_by_asc(users::Column::CreatedAt)
            .limit(limit)
            .all(&self.db)
            .await
            .context("list users")?;
        Ok(models.into_iter().map(user_from_model).collect())
    }
}

fn user_from_model(model: users::Model) -> User {
    User {
        id: model.id,
        identity_id: model.identity_id,
        identification: model.identification,
        first_name: model.first_name,
        last_name: model.last_name,
        role: UserRole::from_str_opt(&model.role).unwrap_or(UserRole::Volunteer),
        referral_code: model.referral_code,
        parent_user_id: model.parent_user_id,
        email: model.email,
        phone: model.phone,
        department: model.department,
        municipality: model.municipality,
        zone: model.zone.as_deref().and_then(Zone::from_str_opt),
        neighborhood: model.neighborhood,
        birth_date: model.birth_date,
        occupation: model.occupation,
        created_at: model.created_at,
        updated_at: model.updated_at,
    }
}

// ── Referral repository ──────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbReferralRepository {
    pub db: DatabaseConnection,
}

impl ReferralRepository for DbReferralRepository {
    async fn find_by_identification(
        &self,
        identification: &str,
    ) -> Result<Option<Referral>, ReferralServiceError> {
        let model = referrals::Entity::find()
            .filter(referrals::Column::Identification.eq(identification))
            .one(&self.db)
            .await
            .context("find referral by identification")?;
        Ok(model.map(referral_from_model))
    }

    async fn create(&self, referral: &Referral) -> Result<(), ReferralServiceError> {
        let result = referrals::ActiveModel {
            id: Set(referral.id),
            identification: Set(referral.identification.clone()),
            first_name: Set(referral.first_name.clone()),
            last_name: Set(referral.last_name.clone()),
            gender: Set(referral.gender.map(|g| g.as_str().to_owned())),
            birth_date: Set(referral.birth_date),
            phone: Set(referral.phone.clone()),
            email: Set(referral.email.clone()),
            department: Set(referral.department.clone()),
            municipality: Set(referral.municipality.clone()),
            zone: Set(referral.zone.map(|z| z.as_str().to_owned())),
            neighborhood: Set(referral.neighborhood.clone()),
            occupation: Set(referral.occupation.clone()),
            status: Set(referral.status.as_str().to_owned()),
            referred_by: Set(referral.referred_by),
            user_id: Set(referral.user_id),
            terms_accepted: Set(referral.terms_accepted),
            privacy_accepted: Set(referral.privacy_accepted),
            created_at: Set(referral.created_at),
            updated_at: Set(referral.updated_at),
        }
        .insert(&self.db)
        .await;

        match result {
            Ok(_) => Ok(()),
            Err(e) => match e.sql_err() {
                Some(SqlErr::UniqueConstraintViolation(_)) => {
                    Err(ReferralServiceError::ReferralExists)
                }
                _ => Err(anyhow::Error::from(e).context("create referral").into()),
            },
        }
    }

    async fn update(
        &self,
        owner: Uuid,
        id: Uuid,
        patch: &ReferralPatch,
    ) -> Result<Option<Referral>, ReferralServiceError> {
        // Ownership check and fetch in one query; a wrong owner looks
        // identical to a missing row.
        let Some(model) = referrals::Entity::find_by_id(id)
            .filter(referrals::Column::ReferredBy.eq(owner))
            .one(&self.db)
            .await
            .context("find referral for update")?
        else {
            return Ok(None);
        };

        let mut am: referrals::ActiveModel = model.into();
        if let Some(status) = patch.status {
            am.status = Set(status.as_str().to_owned());
        }
        if let Some(phone) = &patch.phone {
            am.phone = Set(Some(phone.clone()));
        }
        if let Some(email) = &patch.email {
            am.email = Set(Some(email.clone()));
        }
        if let Some(municipality) = &patch.municipality {
            am.municipality = Set(municipality.clone());
        }
        if let Some(zone) = patch.zone {
            am.zone = Set(Some(zone.as_str().to_owned()));
        }
        if let Some(neighborhood) = &patch.neighborhood {
            am.neighborhood = Set(Some(neighborhood.clone()));
        }
        if let Some(occupation) = &patch.occupation {
            am.occupation = Set(Some(occupation.clone()));
        }
        am.updated_at = Set(Utc::now());
        let updated = am.update(&self.db).await.context("update referral")?;
        Ok(Some(referral_from_model(updated)))
    }

    async fn delete(&self, owner: Uuid, id: Uuid) -> Result<bool, ReferralServiceError> {
        let result = referrals::Entity::delete_many()
            .filter(referrals::Column::Id.eq(id))
            .filter(referrals::Column::ReferredBy.eq(owner))
            .exec(&self.db)
            .await
            .context("delete referral")?;
        Ok(result.rows_affected > 0)
    }

    async fn list_by_referrer(
        &self,
        owner: Uuid,
        page: PageRequest,
    ) -> Result<(Vec<Referral>, u64), ReferralServiceError> {
        let page = page.clamped();
        let filter = referrals::Entity::find().filter(referrals::Column::ReferredBy.eq(owner));

        let total = filter
            .clone()
            .count(&self.db)
            .await
            .context("count referrals for listing")?;
        let models = filter
            .order_by_desc(referrals::Column::CreatedAt)
            .offset(page.offset())
            .limit(u64::from(page.per_page))
            .all(&self.db)
            .await
            .context("list referrals")?;
        Ok((models.into_iter().map(referral_from_model).collect(), total))
    }

    async fn count_by_referrer(&self, owner: Uuid) -> Result<u64, ReferralServiceError> {
        let count = referrals::Entity::find()
            .filter(referrals::Column::ReferredBy.eq(owner))
            .count(&self.db)
            .await
            .context("count referrals")?;
        Ok(count)
    }

    async fn count_by_referrer_since(
        &self,
        owner: Uuid,
        cutoff: DateTime<Utc>,
    ) -> Result<u64, ReferralServiceError> {
        let count = referrals::Entity::find()
            .filter(referrals::Column::ReferredBy.eq(owner))
            .filter(referrals::Column::CreatedAt.gte(cutoff))
            .count(&self.db)
            .await
            .context("count recent referrals")?;
        Ok(count)
    }
}

fn referral_from_model(model: referrals::Model) -> Referral {
    Referral {
        id: model.id,
        identification: model.identification,
        first_name: model.first_name,
        last_name: model.last_name,
        gender: model.gender.as_deref().and_then(Gender::from_str_opt),
        birth_date: model.birth_date,
        phone: model.phone,
        email: model.email,
        department: model.department,
        municipality: model.municipality,
        zone: model.zone.as_deref().and_then(Zone::from_str_opt),
        neighborhood: model.neighborhood,
        occupation: model.occupation,
        status: ReferralStatus::from_str_opt(&model.status).unwrap_or_default(),
        referred_by: model.referred_by,
        user_id: model.user_id,
        terms_accepted: model.terms_accepted,
        privacy_accepted: model.privacy_accepted,
        created_at: model.created_at,
        updated_at: model.updated_at,
    }
}

// ── Activity log repository ──────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbActivityLogRepository {
    pub db: DatabaseConnection,
}

impl ActivityLogRepository for DbActivityLogRepository {
    async fn append(&self, entry: &ActivityEntry) -> Result<(), ReferralServiceError> {
        activity_log::ActiveModel {
            id: Set(entry.id),
            user_id: Set(entry.user_id),
            action: Set(entry.action.as_str().to_owned()),
            entity_type: Set(entry.entity_type.clone()),
            entity_id: Set(entry.entity_id),
            description: Set(entry.description.clone()),
            metadata: Set(entry.metadata.clone()),
            created_at: Set(entry.created_at),
        }
        .insert(&self.db)
        .await
        .context("append activity entry")?;
        Ok(())
    }

    async fn list_recent(
        &self,
        user_id: Uuid,
        limit: u64,
    ) -> Result<Vec<ActivityEntry>, ReferralServiceError> {
        let models = activity_log::Entity::find()
            .filter(activity_log::Column::UserId.eq(user_id))
            .order_by_desc(activity_log::Column::CreatedAt)
            .limit(limit)
            .all(&self.db)
            .await
            .context("list activity entries")?;

        let entries = models
            .into_iter()
            .filter_map(|model| {
                let Some(action) = ActivityAction::from_str_opt(&model.action) else {
                    tracing::warn!(id = %model.id, action = model.action, "unknown activity action");
                    return None;
                };
                Some(ActivityEntry {
                    id: model.id,
                    user_id: model.user_id,
                    action,
                    entity_type: model.entity_type,
                    entity_id: model.entity_id,
                    description: model.description,
                    metadata: model.metadata,
                    created_at: model.created_at,
                })
            })
            .collect();
        Ok(entries)
    }
}

// ── Network queries ──────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbNetworkQueries {
    pub db: DatabaseConnection,
}

impl NetworkQueries for DbNetworkQueries {
    async fn children_of(&self, node: Uuid) -> Result<Vec<NetworkChild>, ReferralServiceError> {
        let models = referrals::Entity::find()
            .filter(referrals::Column::ReferredBy.eq(node))
            .order_by_asc(referrals::Column::CreatedAt)
            .all(&self.db)
            .await
            .context("list referral children")?;
        Ok(models
            .into_iter()
            .map(|model| NetworkChild {
                id: model.id,
                name: format!("{} {}", model.first_name, model.last_name),
                linked_user_id: model.user_id,
                created_at: model.created_at,
            })
            .collect())
    }

    async fn referral_counts(&self) -> Result<Vec<RankingRow>, ReferralServiceError> {
        use sea_orm::{ConnectionTrait, FromQueryResult, Statement};

        // One statement for the whole graph. The plain UNION (not UNION
        // ALL) deduplicates rows, so a cyclic chain cannot recurse
        // forever.
        let sql = r#"
            WITH RECURSIVE network(root_id, referral_id, linked_user_id) AS (
                SELECT r.referred_by, r.id, r.user_id
                    FROM referrals r
                UNION
                SELECT n.root_id, r.id, r.user_id
                    FROM network n
                    JOIN referrals r ON r.referred_by = n.linked_user_id
            ),
            sizes AS (
                SELECT root_id, COUNT(DISTINCT referral_id) AS network_size
                    FROM network
                    GROUP BY root_id
            ),
            direct AS (
                SELECT referred_by AS root_id, COUNT(*) AS total_referrals
                    FROM referrals
                    GROUP BY referred_by
            )
            SELECT u.id AS user_id,
                   u.first_name,
                   u.last_name,
                   u.referral_code,
                   u.created_at,
                   COALESCE(d.total_referrals, 0) AS total_referrals,
                   COALESCE(s.network_size, 0) AS network_size
                FROM users u
                LEFT JOIN direct d ON d.root_id = u.id
                LEFT JOIN sizes s ON s.root_id = u.id
            "#;

        #[derive(Debug, FromQueryResult)]
        struct CountRow {
            user_id: Uuid,
            first_name: String,
            last_name: String,
            referral_code: String,
            created_at: DateTime<Utc>,
            total_referrals: i64,
            network_size: i64,
        }

        let rows = CountRow::find_by_statement(Statement::from_string(
            self.db.get_database_backend(),
            sql,
        ))
        .all(&self.db)
        .await
        .context("referral counts (recursive aggregate)")?;

        Ok(rows
            .into_iter()
            .map(|row| RankingRow {
                user_id: row.user_id,
                name: format!("{} {}", row.first_name, row.last_name),
                referral_code: row.referral_code,
                total_referrals: row.total_referrals.max(0) as u64,
                network_size: row.network_size.max(0) as u64,
                created_at: row.created_at,
            })
            .collect())
    }
}
