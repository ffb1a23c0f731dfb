use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "investors")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = true)]
    pub id: i32,
    #[sea_orm(unique)]
    pub name: String, // Dedup key when loading the ledger
    #[sea_orm(column_name = "type")]
    pub investor_type: String,
    pub country: String,
    pub date_added: String,
    pub last_updated: String,
    /// Running sum of this investor's commitment amounts, maintained at load time.
    /// Decimal text, see [`crate::models::InvestorRecord`].
    #[sea_orm(column_type = "Text")]
    pub total_commitment: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::commitment::Entity")]
    Commitment,
}

impl Related<super::commitment::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Commitment.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
