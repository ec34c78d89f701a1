//! Inspection domain models and DTOs.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::nullable;
use crate::entity::{inspection, inspection_answer};
use crate::error::{AppError, AppResult};

/// Number of standard questions asked during every inspection.
pub const QUESTION_COUNT: usize = 9;

/// Questions Q1..Q4 must carry a condition before an inspection can be saved.
pub const MANDATORY_QUESTIONS: usize = 4;

pub const MANDATORY_QUESTIONS_MESSAGE: &str =
    "You must answer at least the first 4 questions (Q1 - Q4) to save this inspection.";

/// Condition rating, from satisfactory to imminent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Condition {
    C,
    B,
    A1,
    A2,
}

impl Condition {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::C => "c",
            Self::B => "b",
            Self::A1 => "a1",
            Self::A2 => "a2",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "c" => Some(Self::C),
            "b" => Some(Self::B),
            "a1" => Some(Self::A1),
            "a2" => Some(Self::A2),
            _ => None,
        }
    }

    /// Human-readable label shown on forms.
    pub fn label(&self) -> &'static str {
        match self {
            Self::C => "C - Satisfactory",
            Self::B => "B - Less Significant",
            Self::A1 => "A1 - Significant",
            Self::A2 => "A2 - Imminent",
        }
    }

    /// Uppercase code printed on reports (e.g. "A1").
    pub fn tag(&self) -> String {
        self.as_str().to_uppercase()
    }
}

/// Inspection status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum InspectionStatus {
    #[default]
    Pending,
    Reviewed,
    #[serde(alias = "issue")]
    IssueFound,
}

impl InspectionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Reviewed => "reviewed",
            Self::IssueFound => "issue_found",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "pending" => Some(Self::Pending),
            "reviewed" => Some(Self::Reviewed),
            "issue_found" | "issue" => Some(Self::IssueFound),
            _ => None,
        }
    }
}

impl std::fmt::Display for InspectionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One question block: condition rating, free-text notes and photos.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct QuestionAnswer {
    #[serde(default)]
    pub condition: Option<Condition>,
    #[serde(default)]
    pub comment: Option<String>,
    #[serde(default)]
    pub recommendation: Option<String>,
    /// Attachment references, in upload order.
    #[serde(default)]
    pub images: Vec<String>,
}

impl QuestionAnswer {
    pub fn from_entity(model: &inspection_answer::Model) -> Self {
        QuestionAnswer {
            condition: model.condition.as_deref().and_then(Condition::parse),
            comment: model.comment.clone(),
            recommendation: model.recommendation.clone(),
            images: decode_images(&model.images),
        }
    }
}

/// The nine answers of an inspection, indexed 0..=8 (Q1 is index 0).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionAnswers(Vec<QuestionAnswer>);

impl Default for QuestionAnswers {
    fn default() -> Self {
        QuestionAnswers(vec![QuestionAnswer::default(); QUESTION_COUNT])
    }
}

impl QuestionAnswers {
    /// Build from a client-supplied list, padding missing trailing questions.
    pub fn from_request(answers: Vec<QuestionAnswer>) -> AppResult<Self> {
        if answers.len() > QUESTION_COUNT {
            return Err(AppError::InvalidInput(format!(
                "an inspection has {} questions, got {} answers",
                QUESTION_COUNT,
                answers.len()
            )));
        }
        let mut answers = answers;
        answers.resize(QUESTION_COUNT, QuestionAnswer::default());
        Ok(QuestionAnswers(answers))
    }

    /// Rebuild from stored rows. Rows outside 0..9 are ignored.
    pub fn from_entities(rows: &[inspection_answer::Model]) -> Self {
        let mut answers = Self::default();
        for row in rows {
            if let Some(slot) = usize::try_from(row.question_index)
                .ok()
                .and_then(|i| answers.0.get_mut(i))
            {
                *slot = QuestionAnswer::from_entity(row);
            }
        }
        answers
    }

    pub fn get(&self, index: usize) -> Option<&QuestionAnswer> {
        self.0.get(index)
    }

    /// The general visual question (Q1).
    pub fn first(&self) -> &QuestionAnswer {
        &self.0[0]
    }

    pub fn iter(&self) -> impl Iterator<Item = &QuestionAnswer> {
        self.0.iter()
    }

    pub fn into_vec(self) -> Vec<QuestionAnswer> {
        self.0
    }

    /// Reject the write unless Q1..Q4 all have a condition.
    pub fn validate(&self) -> AppResult<()> {
        let answered = self
            .0
            .iter()
            .take(MANDATORY_QUESTIONS)
            .all(|a| a.condition.is_some());
        if answered {
            Ok(())
        } else {
            Err(AppError::Validation(MANDATORY_QUESTIONS_MESSAGE.to_string()))
        }
    }
}

/// Decode a stored JSON image list; unreadable values count as empty.
pub fn decode_images(raw: &str) -> Vec<String> {
    serde_json::from_str(raw).unwrap_or_default()
}

pub fn encode_images(images: &[String]) -> String {
    serde_json::to_string(images).unwrap_or_else(|_| "[]".to_string())
}

/// An inspection together with its nine answers.
#[derive(Debug, Clone, PartialEq)]
pub struct Inspection {
    pub id: i32,
    pub support_id: i32,
    pub inspector: Option<String>,
    pub inspection_date: DateTime<Utc>,
    pub status: InspectionStatus,
    pub answers: QuestionAnswers,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Inspection {
    pub fn from_entity(model: inspection::Model, rows: &[inspection_answer::Model]) -> Self {
        Inspection {
            id: model.id,
            support_id: model.support_id,
            inspector: model.inspector,
            inspection_date: model.inspection_date,
            status: InspectionStatus::parse(&model.status).unwrap_or_default(),
            answers: QuestionAnswers::from_entities(rows),
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

/// Request body for creating an inspection under a support.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct CreateInspectionRequest {
    /// Defaults to the acting user.
    #[serde(default)]
    pub inspector: Option<String>,
    /// Defaults to the time of creation.
    #[serde(default)]
    pub inspection_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub status: Option<InspectionStatus>,
    /// Answers in question order; at most nine, missing ones are left blank.
    #[serde(default)]
    pub answers: Vec<QuestionAnswer>,
}

/// Request body for updating an inspection. Absent fields are kept.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct UpdateInspectionRequest {
    /// `null` clears the inspector.
    #[serde(default, deserialize_with = "nullable")]
    #[schema(value_type = Option<String>)]
    pub inspector: Option<Option<String>>,
    #[serde(default)]
    pub inspection_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub status: Option<InspectionStatus>,
    /// Replaces every answer when present.
    #[serde(default)]
    pub answers: Option<Vec<QuestionAnswer>>,
}

/// Inspection as returned by the API.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct InspectionResponse {
    pub id: i32,
    pub support_id: i32,
    pub inspector: Option<String>,
    pub inspection_date: DateTime<Utc>,
    pub status: InspectionStatus,
    pub answers: Vec<QuestionAnswer>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Inspection> for InspectionResponse {
    fn from(inspection: Inspection) -> Self {
        InspectionResponse {
            id: inspection.id,
            support_id: inspection.support_id,
            inspector: inspection.inspector,
            inspection_date: inspection.inspection_date,
            status: inspection.status,
            answers: inspection.answers.into_vec(),
            created_at: inspection.created_at,
            updated_at: inspection.updated_at,
        }
    }
}
