use sea_orm::{ActiveValue::Set, entity::prelude::*};
use serde::{Deserialize, Serialize};

use crate::db::dao::base_traits::{HasIdColumn, TimestampedActiveModel};

#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    EnumIter,
    DeriveActiveEnum,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MemberRole {
    #[default]
    #[sea_orm(string_value = "MEMBER")]
    Member,
    #[sea_orm(string_value = "ADMIN")]
    Admin,
}

impl MemberRole {
    pub fn is_admin(self) -> bool {
        self == MemberRole::Admin
    }

    /// Falls back to [`MemberRole::Member`] when the caller gave no role.
    pub fn or_default(role: Option<Self>) -> Self {
        role.unwrap_or_default()
    }
}

#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "members")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    #[sea_orm(unique)]
    pub email: String,
    pub name: String,
    pub role: MemberRole,
    #[sea_orm(indexed)]
    pub department: Option<String>,
    #[sea_orm(default_expr = "Expr::current_timestamp()")]
    pub created_at: DateTimeWithTimeZone,
}

impl Model {
    pub fn is_admin(&self) -> bool {
        self.role.is_admin()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl TimestampedActiveModel for ActiveModel {
    fn set_created_at(&mut self, ts: DateTimeWithTimeZone) {
        self.created_at = Set(ts);
    }
}

impl HasIdColumn for Entity {
    fn id_column() -> Column {
        Column::Id
    }
}

#[cfg(test)]
mod tests {
    use super::MemberRole;

    #[test]
    fn missing_role_defaults_to_member() {
        assert_eq!(MemberRole::or_default(None), MemberRole::Member);
        assert_eq!(
            MemberRole::or_default(Some(MemberRole::Admin)),
            MemberRole::Admin
        );
    }

    #[test]
    fn only_admin_is_admin() {
        assert!(MemberRole::Admin.is_admin());
        assert!(!MemberRole::Member.is_admin());
    }

    #[test]
    fn roles_use_upper_case_wire_names() {
        assert_eq!(
            serde_json::to_string(&MemberRole::Admin).unwrap(),
            "\"ADMIN\""
        );
        let role: MemberRole = serde_json::from_str("\"MEMBER\"").unwrap();
        assert_eq!(role, MemberRole::Member);
        assert!(serde_json::from_str::<MemberRole>("\"OWNER\"").is_err());
    }
}
