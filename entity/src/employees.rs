use sea_orm::entity::prelude::*;

/// Upper bound, in characters, for `name`.
pub const NAME_MAX_LEN: usize = 100;
/// Upper bound, in characters, for `position`.
pub const POSITION_MAX_LEN: usize = 100;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "employees")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub name: String,
    pub position: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
