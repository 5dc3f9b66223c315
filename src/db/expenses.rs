use serde_json::Value;
use sqlx::query::QueryAs;
use sqlx::sqlite::SqliteArguments;
use sqlx::{Pool, Sqlite};

use crate::db::models::{Expense, NewExpense};
use crate::error::AppError;

pub struct ExpenseRepository;

impl ExpenseRepository {
    /// All expenses, newest date first
    pub async fn list(pool: &Pool<Sqlite>) -> Result<Vec<Expense>, AppError> {
        let expenses = sqlx::query_as::<_, Expense>(
            r#"
SELECT id, title, amount, category, description, date
FROM expenses
ORDER BY date DESC, id DESC
            "#
        )
        .fetch_all(pool)
        .await?;

        Ok(expenses)
    }

    /// Insert whatever was submitted. Column affinity coerces numeric strings
    /// and `date()` trims timestamps to a day; anything else fails on a
    /// constraint.
    pub async fn create(pool: &Pool<Sqlite>, expense: &NewExpense) -> Result<Expense, AppError> {
        let query = sqlx::query_as::<_, Expense>(
            r#"
INSERT INTO expenses (title, amount, category, description, date)
VALUES (?, ?, ?, ?, date(?))
RETURNING id, title, amount, category, description, date
            "#,
        );

        let query = [
            &expense.title,
            &expense.amount,
            &expense.category,
            &expense.description,
            &expense.date,
        ]
        .into_iter()
        .fold(query, bind_json);

        let created = query.fetch_one(pool).await?;

        Ok(created)
    }

    /// Delete by id. Deleting a missing row is not an error.
    pub async fn delete(pool: &Pool<Sqlite>, id: &str) -> Result<(), AppError> {
        sqlx::query("DELETE FROM expenses WHERE id = ?")
            .bind(id)
            .execute(pool)
            .await?;

        Ok(())
    }
}

type ExpenseQuery<'q> = QueryAs<'q, Sqlite, Expense, SqliteArguments<'q>>;

/// Bind a JSON scalar as the matching SQLite value; arrays and objects go in as text.
fn bind_json<'q>(query: ExpenseQuery<'q>, value: &'q Value) -> ExpenseQuery<'q> {
    match value {
        Value::Null => query.bind(None::<String>),
        Value::Bool(b) => query.bind(*b),
        Value::Number(n) => match n.as_i64() {
            Some(i) => query.bind(i),
            None => query.bind(n.as_f64()),
        },
        Value::String(s) => query.bind(s.as_str()),
        other => query.bind(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::test_pool;
    use serde_json::json;

    fn expense(title: &str, date: &str) -> NewExpense {
        NewExpense {
            title: json!(title),
            amount: json!(120.5),
            category: json!("supplies"),
            description: Value::Null,
            date: json!(date),
        }
    }

    #[tokio::test]
    async fn test_list_orders_by_date_desc() {
        let pool = test_pool().await;
        for (title, date) in [("jan", "2024-01-01"), ("mar", "2024-03-01"), ("feb", "2024-02-01")] {
            ExpenseRepository::create(&pool, &expense(title, date)).await.unwrap();
        }

        let dates: Vec<String> = ExpenseRepository::list(&pool)
            .await
            .unwrap()
            .into_iter()
            .map(|e| e.date)
            .collect();

        assert_eq!(dates, vec!["2024-03-01", "2024-02-01", "2024-01-01"]);
    }

    #[tokio::test]
    async fn test_create_then_delete() {
        let pool = test_pool().await;
        let created = ExpenseRepository::create(&pool, &expense("chalk", "2024-05-10"))
            .await
            .unwrap();
        assert_eq!(created.title, "chalk");

        let listed = ExpenseRepository::list(&pool).await.unwrap();
        assert_eq!(listed, vec![created.clone()]);

        ExpenseRepository::delete(&pool, &created.id.to_string()).await.unwrap();
        assert!(ExpenseRepository::list(&pool).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_delete_missing_is_ok() {
        let pool = test_pool().await;
        ExpenseRepository::delete(&pool, "9999").await.unwrap();
    }

    #[tokio::test]
    async fn test_missing_required_field_fails_in_store() {
        let pool = test_pool().await;
        let incomplete = NewExpense {
            title: json!("no date"),
            amount: json!(1.0),
            ..Default::default()
        };

        let result = ExpenseRepository::create(&pool, &incomplete).await;
        assert!(matches!(result, Err(AppError::Database(_))));
    }

    #[test]
    fn test_id_serialized_as_string() {
        let expense = Expense {
            id: 12,
            title: "paper".to_string(),
            amount: 3.0,
            category: None,
            description: None,
            date: "2024-01-01".to_string(),
        };

        let json = serde_json::to_value(&expense).unwrap();
        assert_eq!(json["id"], "12");
        assert_eq!(json["date"], "2024-01-01");
    }

    #[tokio::test]
    async fn test_store_coerces_loose_values() {
        let pool = test_pool().await;
        let submitted = NewExpense {
            title: json!("Bus hire"),
            amount: json!("250.5"),
            category: json!(42),
            description: Value::Null,
            date: json!("2024-01-01T10:00:00Z"),
        };

        let created = ExpenseRepository::create(&pool, &submitted).await.unwrap();
        assert_eq!(created.amount, 250.5);
        assert_eq!(created.category.as_deref(), Some("42"));
        assert_eq!(created.date, "2024-01-01");
    }

    #[tokio::test]
    async fn test_store_rejects_unusable_values() {
        let pool = test_pool().await;

        let bad_amount = NewExpense {
            amount: json!("a lot"),
            ..expense("fees", "2024-01-01")
        };
        assert!(matches!(
            ExpenseRepository::create(&pool, &bad_amount).await,
            Err(AppError::Database(_))
        ));

        let bad_date = expense("fees", "next tuesday");
        assert!(matches!(
            ExpenseRepository::create(&pool, &bad_date).await,
            Err(AppError::Database(_))
        ));

        assert!(ExpenseRepository::list(&pool).await.unwrap().is_empty());
    }
}
