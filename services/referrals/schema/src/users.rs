use sea_orm::entity::prelude::*;

/// Volunteer profile record.
///
/// `parent_user_id` points at the user whose referral code was used at
/// signup; the chain must stay acyclic (enforced at write time by the
/// registration usecase).
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    /// Id of the account at the external identity provider.
    pub identity_id: Option<Uuid>,
    #[sea_orm(unique)]
    pub identification: String,
    pub first_name: String,
    pub last_name: String,
    pub role: String,
    #[sea_orm(unique)]
    pub referral_code: String,
    pub parent_user_id: Option<Uuid>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub department: Option<String>,
    pub municipality: Option<String>,
    pub zone: Option<String>,
    pub neighborhood: Option<String>,
    pub birth_date: Option<chrono::NaiveDate>,
    pub occupation: Option<String>,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "Entity",
        from = "Column::ParentUserId",
        to = "Column::Id"
    )]
    Parent,
    #[sea_orm(has_many = "super::referrals::Entity")]
    Referrals,
    #[sea_orm(has_many = "super::activity_log::Entity")]
    ActivityLog,
}

impl Related<super::referrals::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Referrals.def()
    }
}

impl Related<super::activity_log::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ActivityLog.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
