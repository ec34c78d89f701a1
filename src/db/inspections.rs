//! Database queries for inspections and their answers.

use std::collections::HashMap;

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, QueryOrder,
    QuerySelect, Set, TransactionTrait,
};
use tracing::{info, warn};

use crate::entity::inspection::{self, ActiveModel, Entity as InspectionEntity};
use crate::entity::inspection_answer::{self, Entity as AnswerEntity};
use crate::error::{AppError, AppResult};
use crate::models::inspection::encode_images;
use crate::models::support::last_inspection;
use crate::models::{
    CreateInspectionRequest, Inspection, QuestionAnswers, UpdateInspectionRequest,
};

use super::DbPool;

/// Delete every inspection (and answer) owned by the given supports.
/// Returns the number of inspections removed.
pub(super) async fn delete_inspections_of_supports<C: ConnectionTrait>(
    conn: &C,
    support_ids: &[i32],
) -> AppResult<u64> {
    if support_ids.is_empty() {
        return Ok(0);
    }

    let inspection_ids: Vec<i32> = InspectionEntity::find()
        .select_only()
        .column(inspection::Column::Id)
        .filter(inspection::Column::SupportId.is_in(support_ids.to_vec()))
        .into_tuple()
        .all(conn)
        .await
        .map_err(|e| AppError::Database(format!("Failed to load inspections: {}", e)))?;

    if inspection_ids.is_empty() {
        return Ok(0);
    }

    delete_answers(conn, &inspection_ids).await?;

    let deleted = InspectionEntity::delete_many()
        .filter(inspection::Column::Id.is_in(inspection_ids))
        .exec(conn)
        .await
        .map_err(|e| AppError::Database(format!("Failed to delete inspections: {}", e)))?;

    Ok(deleted.rows_affected)
}

async fn delete_answers<C: ConnectionTrait>(conn: &C, inspection_ids: &[i32]) -> AppResult<()> {
    AnswerEntity::delete_many()
        .filter(inspection_answer::Column::InspectionId.is_in(inspection_ids.to_vec()))
        .exec(conn)
        .await
        .map_err(|e| AppError::Database(format!("Failed to delete answers: {}", e)))?;
    Ok(())
}

async fn insert_answers<C: ConnectionTrait>(
    conn: &C,
    inspection_id: i32,
    answers: &QuestionAnswers,
) -> AppResult<()> {
    for (index, answer) in answers.iter().enumerate() {
        inspection_answer::ActiveModel {
            inspection_id: Set(inspection_id),
            question_index: Set(index as i32),
            condition: Set(answer.condition.map(|c| c.as_str().to_string())),
            comment: Set(answer.comment.clone()),
            recommendation: Set(answer.recommendation.clone()),
            images: Set(encode_images(&answer.images)),
            ..Default::default()
        }
        .insert(conn)
        .await
        .map_err(|e| AppError::Database(format!("Failed to insert answer: {}", e)))?;
    }
    Ok(())
}

async fn load_answers<C: ConnectionTrait>(
    conn: &C,
    inspection_ids: &[i32],
) -> AppResult<HashMap<i32, Vec<inspection_answer::Model>>> {
    let mut grouped: HashMap<i32, Vec<inspection_answer::Model>> = HashMap::new();
    if inspection_ids.is_empty() {
        return Ok(grouped);
    }

    let rows = AnswerEntity::find()
        .filter(inspection_answer::Column::InspectionId.is_in(inspection_ids.to_vec()))
        .order_by_asc(inspection_answer::Column::QuestionIndex)
        .all(conn)
        .await
        .map_err(|e| AppError::Database(format!("Failed to load answers: {}", e)))?;

    for row in rows {
        grouped.entry(row.inspection_id).or_default().push(row);
    }
    Ok(grouped)
}

async fn attach_answers<C: ConnectionTrait>(
    conn: &C,
    models: Vec<inspection::Model>,
) -> AppResult<Vec<Inspection>> {
    let ids: Vec<i32> = models.iter().map(|m| m.id).collect();
    let mut answers = load_answers(conn, &ids).await?;

    Ok(models
        .into_iter()
        .map(|model| {
            let rows = answers.remove(&model.id).unwrap_or_default();
            Inspection::from_entity(model, &rows)
        })
        .collect())
}

impl DbPool {
    /// Insert an inspection with its nine answers.
    ///
    /// Q1..Q4 are validated before anything is written, so a rejected
    /// inspection leaves no trace.
    pub async fn insert_inspection(
        &self,
        support_id: i32,
        req: CreateInspectionRequest,
        acting_user: Option<String>,
    ) -> AppResult<Inspection> {
        let answers = QuestionAnswers::from_request(req.answers)?;
        if let Err(e) = answers.validate() {
            warn!(support_id, "Inspection rejected: mandatory questions unanswered");
            return Err(e);
        }

        self.require_support(support_id).await?;

        let now = Utc::now();
        let txn = self.connection().begin().await?;

        let model = ActiveModel {
            support_id: Set(support_id),
            inspector: Set(req.inspector.or(acting_user)),
            inspection_date: Set(req.inspection_date.unwrap_or(now)),
            status: Set(req.status.unwrap_or_default().as_str().to_string()),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(&txn)
        .await
        .map_err(|e| AppError::Database(format!("Failed to insert inspection: {}", e)))?;

        insert_answers(&txn, model.id, &answers).await?;
        txn.commit().await?;

        info!(inspection_id = model.id, support_id, "Inspection created");

        Ok(Inspection {
            id: model.id,
            support_id: model.support_id,
            inspector: model.inspector,
            inspection_date: model.inspection_date,
            status: req.status.unwrap_or_default(),
            answers,
            created_at: model.created_at,
            updated_at: model.updated_at,
        })
    }

    /// Get an inspection with its answers.
    pub async fn get_inspection_by_id(&self, id: i32) -> AppResult<Option<Inspection>> {
        let model = InspectionEntity::find_by_id(id)
            .one(self.connection())
            .await
            .map_err(|e| AppError::Database(format!("Failed to get inspection: {}", e)))?;

        match model {
            Some(model) => {
                let mut inspections = attach_answers(self.connection(), vec![model]).await?;
                Ok(inspections.pop())
            }
            None => Ok(None),
        }
    }

    /// Get an inspection or fail with NotFound.
    pub async fn require_inspection(&self, id: i32) -> AppResult<Inspection> {
        self.get_inspection_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Inspection {}", id)))
    }

    /// Inspections of a support, newest first.
    pub async fn get_inspections_by_support_id(
        &self,
        support_id: i32,
    ) -> AppResult<Vec<Inspection>> {
        let models = InspectionEntity::find()
            .filter(inspection::Column::SupportId.eq(support_id))
            .order_by_desc(inspection::Column::Id)
            .all(self.connection())
            .await
            .map_err(|e| AppError::Database(format!("Failed to list inspections: {}", e)))?;

        attach_answers(self.connection(), models).await
    }

    /// Number of inspections per support.
    pub async fn count_inspections_by_support(
        &self,
        support_ids: &[i32],
    ) -> AppResult<HashMap<i32, u64>> {
        let mut counts: HashMap<i32, u64> = support_ids.iter().map(|id| (*id, 0)).collect();
        if support_ids.is_empty() {
            return Ok(counts);
        }

        let parents: Vec<i32> = InspectionEntity::find()
            .select_only()
            .column(inspection::Column::SupportId)
            .filter(inspection::Column::SupportId.is_in(support_ids.to_vec()))
            .into_tuple()
            .all(self.connection())
            .await
            .map_err(|e| AppError::Database(format!("Failed to count inspections: {}", e)))?;

        for support_id in parents {
            *counts.entry(support_id).or_default() += 1;
        }
        Ok(counts)
    }

    /// The last inspection (highest id) of each support that has one.
    pub async fn last_inspections_for_supports(
        &self,
        support_ids: &[i32],
    ) -> AppResult<HashMap<i32, Inspection>> {
        if support_ids.is_empty() {
            return Ok(HashMap::new());
        }

        let models = InspectionEntity::find()
            .filter(inspection::Column::SupportId.is_in(support_ids.to_vec()))
            .all(self.connection())
            .await
            .map_err(|e| AppError::Database(format!("Failed to load inspections: {}", e)))?;

        let mut by_support: HashMap<i32, Vec<inspection::Model>> = HashMap::new();
        for model in models {
            by_support.entry(model.support_id).or_default().push(model);
        }
        let latest: Vec<inspection::Model> = by_support
            .values()
            .filter_map(|rows| last_inspection(rows).cloned())
            .collect();

        let inspections = attach_answers(self.connection(), latest).await?;
        Ok(inspections
            .into_iter()
            .map(|inspection| (inspection.support_id, inspection))
            .collect())
    }

    /// Update an inspection. The merged answers must still satisfy Q1..Q4.
    pub async fn update_inspection(
        &self,
        id: i32,
        req: UpdateInspectionRequest,
    ) -> AppResult<Inspection> {
        let current = self.require_inspection(id).await?;

        let replaced = req.answers.is_some();
        let answers = match req.answers {
            Some(list) => QuestionAnswers::from_request(list)?,
            None => current.answers.clone(),
        };
        if let Err(e) = answers.validate() {
            warn!(inspection_id = id, "Inspection update rejected: mandatory questions unanswered");
            return Err(e);
        }

        let status = req.status.unwrap_or(current.status);
        let txn = self.connection().begin().await?;

        let stored = InspectionEntity::find_by_id(id)
            .one(&txn)
            .await
            .map_err(|e| AppError::Database(format!("Failed to get inspection: {}", e)))?
            .ok_or_else(|| AppError::NotFound(format!("Inspection {}", id)))?;

        let mut active: ActiveModel = stored.into();
        if let Some(inspector) = req.inspector {
            active.inspector = Set(inspector);
        }
        if let Some(date) = req.inspection_date {
            active.inspection_date = Set(date);
        }
        active.status = Set(status.as_str().to_string());
        active.updated_at = Set(Utc::now());

        let model = active
            .update(&txn)
            .await
            .map_err(|e| AppError::Database(format!("Failed to update inspection: {}", e)))?;

        if replaced {
            delete_answers(&txn, &[id]).await?;
            insert_answers(&txn, id, &answers).await?;
        }
        txn.commit().await?;

        Ok(Inspection {
            id: model.id,
            support_id: model.support_id,
            inspector: model.inspector,
            inspection_date: model.inspection_date,
            status,
            answers,
            created_at: model.created_at,
            updated_at: model.updated_at,
        })
    }

    /// Delete an inspection and its answers.
    pub async fn delete_inspection(&self, id: i32) -> AppResult<()> {
        let txn = self.connection().begin().await?;

        delete_answers(&txn, &[id]).await?;
        let deleted = InspectionEntity::delete_by_id(id)
            .exec(&txn)
            .await
            .map_err(|e| AppError::Database(format!("Failed to delete inspection: {}", e)))?;

        if deleted.rows_affected == 0 {
            return Err(AppError::NotFound(format!("Inspection {}", id)));
        }

        txn.commit().await?;
        info!(inspection_id = id, "Inspection deleted");
        Ok(())
    }
}
