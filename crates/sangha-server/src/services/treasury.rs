use crate::error::{AppError, Result};
use crate::models::{CreateTransaction, LedgerSummary, Transaction, TransactionKind};
use chrono::Utc;
use sqlx::SqlitePool;
use uuid::Uuid;

#[derive(Clone)]
pub struct TreasuryService {
    db: SqlitePool,
}

impl TreasuryService {
    pub fn new(db: SqlitePool) -> Self {
        Self { db }
    }

    /// Appends a ledger entry. Amounts are positive magnitudes; direction is
    /// carried by the kind.
    pub async fn create(&self, input: CreateTransaction, recorded_by: &str) -> Result<Transaction> {
        if input.amount <= 0.0 || !input.amount.is_finite() {
            return Err(AppError::BadRequest(
                "Transaction amount must be a positive number".to_string(),
            ));
        }

        let transaction = sqlx::query_as::<_, Transaction>(
            r#"
            INSERT INTO transactions (id, kind, category, amount, description, date, recorded_by, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(input.kind)
        .bind(&input.category)
        .bind(input.amount)
        .bind(&input.description)
        .bind(input.date)
        .bind(recorded_by)
        .bind(Utc::now())
        .fetch_one(&self.db)
        .await?;

        Ok(transaction)
    }

    /// Full ledger, transaction date descending, ties broken by creation
    /// time descending.
    pub async fn list_all(&self) -> Result<Vec<Transaction>> {
        let transactions = sqlx::query_as::<_, Transaction>(
            "SELECT * FROM transactions ORDER BY date DESC, created_at DESC",
        )
        .fetch_all(&self.db)
        .await?;

        Ok(transactions)
    }

    pub async fn delete(&self, id: Uuid) -> Result<()> {
        let result = sqlx::query("DELETE FROM transactions WHERE id = $1")
            .bind(id)
            .execute(&self.db)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Transaction not found".to_string()));
        }

        Ok(())
    }
}

/// Derived totals as a stateless fold over the ledger; no running balance is
/// persisted, so the result is always consistent with the entries.
pub fn summarize(transactions: &[Transaction]) -> LedgerSummary {
    let mut total_income = 0.0;
    let mut total_expense = 0.0;

    for tx in transactions {
        match tx.kind {
            TransactionKind::Income => total_income += tx.amount,
            TransactionKind::Expense => total_expense += tx.amount,
        }
    }

    LedgerSummary {
        total_income,
        total_expense,
        balance: total_income - total_expense,
    }
}
