use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct UserModel {
    pub id: i64,
    pub full_name: String,
    pub email: String,
    pub phone_no: String,
    pub image: String,
    pub created_at: String,
    pub updated_at: String,
}

/// A row that has passed every validation gate but has no id yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    pub full_name: String,
    pub email: String,
    pub phone_no: String,
    pub image: String,
    pub created_at: String,
    pub updated_at: String,
}

impl NewUser {
    pub fn into_model(self, id: i64) -> UserModel {
        UserModel {
            id,
            full_name: self.full_name,
            email: self.email,
            phone_no: self.phone_no,
            image: self.image,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}
