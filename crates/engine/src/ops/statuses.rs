use api_types::status::ExpenseGroupStatus;
use sea_orm::{QueryOrder, TransactionTrait, prelude::*};

use crate::{EngineError, ResultEngine, expense_group_statuses};

use super::{Engine, with_tx};

impl Engine {
    /// All expense group statuses ordered by id.
    pub async fn expense_group_statuses(&self) -> ResultEngine<Vec<ExpenseGroupStatus>> {
        with_tx!(self, |db_tx| {
            let statuses = expense_group_statuses::Entity::find()
                .order_by_asc(expense_group_statuses::Column::Id)
                .all(&db_tx)
                .await?
                .into_iter()
                .map(ExpenseGroupStatus::from)
                .collect::<Vec<_>>();
            Ok(statuses)
        })
    }

    pub async fn expense_group_status(&self, id: i32) -> ResultEngine<ExpenseGroupStatus> {
        with_tx!(self, |db_tx| {
            let model = expense_group_statuses::Entity::find_by_id(id)
                .one(&db_tx)
                .await?
                .ok_or_else(|| EngineError::KeyNotFound(format!("expense group status {id}")))?;
            Ok(ExpenseGroupStatus::from(model))
        })
    }
}
