//! Topic entity for SeaORM.

use sea_orm::Set;
use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "topics")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub board_id: Uuid,
    pub subject: String,
    pub starter_id: Uuid,
    pub views: i64,
    pub last_updated: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::board::Entity",
        from = "Column::BoardId",
        to = "super::board::Column::Id",
        on_update = "Cascade",
        on_delete = "Cascade"
    )]
    Board,
    #[sea_orm(has_many = "super::post::Entity")]
    Post,
}

impl Related<super::board::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Board.def()
    }
}

impl Related<super::post::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Post.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for quorum_core::domain::Topic {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            board_id: model.board_id,
            subject: model.subject,
            starter_id: model.starter_id,
            views: model.views,
            last_updated: model.last_updated.into(),
        }
    }
}

impl From<quorum_core::domain::Topic> for ActiveModel {
    fn from(topic: quorum_core::domain::Topic) -> Self {
        Self {
            id: Set(topic.id),
            board_id: Set(topic.board_id),
            subject: Set(topic.subject),
            starter_id: Set(topic.starter_id),
            views: Set(topic.views),
            last_updated: Set(topic.last_updated.into()),
        }
    }
}
