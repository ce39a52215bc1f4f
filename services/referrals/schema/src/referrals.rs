use sea_orm::entity::prelude::*;

/// A person recruited by a user, not necessarily a registered user
/// themselves.
///
/// `referred_by` is the owning user; `user_id` is a weak back-link set
/// when the referral later self-registers.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "referrals")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(unique)]
    pub identification: String,
    pub first_name: String,
    pub last_name: String,
    pub gender: Option<String>,
    pub birth_date: Option<chrono::NaiveDate>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub department: Option<String>,
    pub municipality: String,
    pub zone: Option<String>,
    pub neighborhood: Option<String>,
    pub occupation: Option<String>,
    pub status: String,
    pub referred_by: Uuid,
    pub user_id: Option<Uuid>,
    pub terms_accepted: bool,
    pub privacy_accepted: bool,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::ReferredBy",
        to = "super::users::Column::Id"
    )]
    Referrer,
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::UserId",
        to = "super::users::Column::Id"
    )]
    LinkedUser,
}

impl Related<super::users::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Referrer.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
