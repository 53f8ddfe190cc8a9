use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// 모든 테마와 날짜에 공통으로 쓰이는 예약 시간대
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "reservation_time")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub start_at: Time,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "crate::domain::reservation::entity::reservation::Entity")]
    Reservation,
}

impl Related<crate::domain::reservation::entity::reservation::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Reservation.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
