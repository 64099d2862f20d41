use diesel::prelude::*;
use std::sync::Arc;

use crate::db::{get_connection, DbPool};
use crate::schema::transactions;
use crate::schema::transactions::dsl::*;

use super::transactions_errors::{LedgerError, Result};
use super::transactions_model::{NewTransaction, Transaction, TransactionDB, TransactionSearch};

/// Repository for the append-only transaction store
pub struct TransactionRepository {
    pool: Arc<DbPool>,
}

impl TransactionRepository {
    /// Creates a new TransactionRepository instance
    pub fn new(pool: Arc<DbPool>) -> Self {
        Self { pool }
    }

    /// Appends an immutable transaction record and returns it
    pub fn create(&self, new_transaction: NewTransaction) -> Result<Transaction> {
        new_transaction.validate()?;

        let mut transaction_db: TransactionDB = new_transaction.into();
        if transaction_db.id.is_empty() {
            transaction_db.id = uuid::Uuid::new_v4().to_string();
        }

        let mut conn =
            get_connection(&self.pool).map_err(|e| LedgerError::DatabaseError(e.to_string()))?;

        diesel::insert_into(transactions::table)
            .values(&transaction_db)
            .execute(&mut conn)
            .map_err(|e| LedgerError::DatabaseError(e.to_string()))?;

        transaction_db.try_into()
    }

    /// Retrieves a transaction by its ID
    pub fn get_by_id(&self, transaction_id: &str) -> Result<Transaction> {
        let mut conn =
            get_connection(&self.pool).map_err(|e| LedgerError::DatabaseError(e.to_string()))?;

        let record = transactions
            .find(transaction_id)
            .first::<TransactionDB>(&mut conn)
            .map_err(|e| match e {
                diesel::result::Error::NotFound => LedgerError::NotFound(format!(
                    "Transaction with id {} not found",
                    transaction_id
                )),
                _ => LedgerError::DatabaseError(e.to_string()),
            })?;

        record.try_into()
    }

    /// Removes a transaction record. Only the coordinator calls this, as a
    /// reversal or compensation step paired with balance and aggregate
    /// corrections.
    pub fn delete(&self, transaction_id: &str) -> Result<()> {
        let mut conn =
            get_connection(&self.pool).map_err(|e| LedgerError::DatabaseError(e.to_string()))?;

        let affected = diesel::delete(transactions.find(transaction_id))
            .execute(&mut conn)
            .map_err(|e| LedgerError::DatabaseError(e.to_string()))?;

        if affected == 0 {
            return Err(LedgerError::NotFound(format!(
                "Transaction with id {} not found",
                transaction_id
            )));
        }

        Ok(())
    }

    /// Lists a wallet's transactions ordered by date then id ascending.
    /// This is the replay sequence the reconciliation job consumes.
    pub fn list_by_wallet(&self, for_wallet_id: &str) -> Result<Vec<Transaction>> {
        let mut conn =
            get_connection(&self.pool).map_err(|e| LedgerError::DatabaseError(e.to_string()))?;

        transactions
            .filter(wallet_id.eq(for_wallet_id))
            .order((transaction_date.asc(), id.asc()))
            .load::<TransactionDB>(&mut conn)
            .map_err(|e| LedgerError::DatabaseError(e.to_string()))?
            .into_iter()
            .map(Transaction::try_from)
            .collect()
    }

    /// Lists an investment's transactions ordered by date then id ascending
    pub fn list_by_investment(&self, for_investment_id: &str) -> Result<Vec<Transaction>> {
        let mut conn =
            get_connection(&self.pool).map_err(|e| LedgerError::DatabaseError(e.to_string()))?;

        transactions
            .filter(investment_id.eq(for_investment_id))
            .order((transaction_date.asc(), id.asc()))
            .load::<TransactionDB>(&mut conn)
            .map_err(|e| LedgerError::DatabaseError(e.to_string()))?
            .into_iter()
            .map(Transaction::try_from)
            .collect()
    }

    /// Filtered search for the request layer
    pub fn search(&self, filter: TransactionSearch) -> Result<Vec<Transaction>> {
        let mut conn =
            get_connection(&self.pool).map_err(|e| LedgerError::DatabaseError(e.to_string()))?;

        let mut query = transactions::table.into_boxed();

        if let Some(w) = filter.wallet_id {
            query = query.filter(wallet_id.eq(w));
        }
        if let Some(k) = filter.kind {
            query = query.filter(kind.eq(k.as_str()));
        }
        if let Some(from) = filter.from_date {
            query = query.filter(transaction_date.ge(from));
        }
        if let Some(to) = filter.to_date {
            query = query.filter(transaction_date.le(to));
        }

        query
            .order((transaction_date.asc(), id.asc()))
            .load::<TransactionDB>(&mut conn)
            .map_err(|e| LedgerError::DatabaseError(e.to_string()))?
            .into_iter()
            .map(Transaction::try_from)
            .collect()
    }
}
