use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// 예약. 연관 엔티티는 ID로만 참조합니다.
///
/// (date, time_id, theme_id)에는 `uq_reservation_slot` 유니크 인덱스가 걸립니다.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "reservation")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub date: Date,
    pub time_id: i64,
    pub theme_id: i64,
    pub member_id: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "crate::domain::reservation_time::entity::reservation_time::Entity",
        from = "Column::TimeId",
        to = "crate::domain::reservation_time::entity::reservation_time::Column::Id"
    )]
    ReservationTime,
    #[sea_orm(
        belongs_to = "crate::domain::theme::entity::theme::Entity",
        from = "Column::ThemeId",
        to = "crate::domain::theme::entity::theme::Column::Id"
    )]
    Theme,
    #[sea_orm(
        belongs_to = "crate::domain::member::entity::member::Entity",
        from = "Column::MemberId",
        to = "crate::domain::member::entity::member::Column::Id"
    )]
    Member,
}

impl Related<crate::domain::reservation_time::entity::reservation_time::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ReservationTime.def()
    }
}

impl Related<crate::domain::theme::entity::theme::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Theme.def()
    }
}

impl Related<crate::domain::member::entity::member::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Member.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
