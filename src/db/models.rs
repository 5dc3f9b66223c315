use serde::{Deserialize, Serialize, Serializer};
use serde_json::Value;
use sqlx::FromRow;

#[derive(Debug, Clone, FromRow)]
pub struct SystemUser {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub password: Option<String>,
    pub role: String,
    pub image: Option<String>,
}

#[derive(Debug, Clone, FromRow)]
pub struct Teacher {
    pub id: i64,
    pub teacher_name: String,
    pub email: String,
    pub password: Option<String>,
    pub image: Option<String>,
}

#[derive(Debug, Clone, FromRow)]
pub struct Student {
    pub id: i64,
    pub student_name: String,
    pub email: String,
    pub password: Option<String>,
    pub image: Option<String>,
}

#[derive(Debug, Clone, PartialEq, FromRow, Serialize)]
pub struct Expense {
    #[serde(serialize_with = "id_as_string")]
    pub id: i64,
    pub title: String,
    pub amount: f64,
    pub category: Option<String>,
    pub description: Option<String>,
    /// `YYYY-MM-DD`, as normalised by the store
    pub date: String,
}

/// Expense fields exactly as submitted, before the store assigns an id.
/// Values are handed to the store untouched; it coerces or rejects them.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct NewExpense {
    pub title: Value,
    pub amount: Value,
    pub category: Value,
    pub description: Value,
    pub date: Value,
}

fn id_as_string<S: Serializer>(id: &i64, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.collect_str(id)
}
