//! Questions asked by clients about a product, and the institution's answer.

use chrono::{DateTime, Utc};
use entity_store::Keyed;
use serde::{Deserialize, Serialize};

use super::{FieldPatch, ProductId, QuestionId, Resource, UserId};

/// A product question as served by the remote service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Question {
    /// Server-assigned identifier.
    #[serde(rename = "_id")]
    pub id: QuestionId,
    /// Product the question is about.
    pub product_id: ProductId,
    /// Asking user.
    pub author_id: UserId,
    /// Question text.
    pub text: String,
    /// Answer from the institution, once given.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub answer: Option<String>,
    /// When the question was asked.
    pub created_at: DateTime<Utc>,
}

impl Question {
    /// Whether the institution has answered.
    pub fn is_answered(&self) -> bool {
        self.answer
            .as_deref()
            .is_some_and(|answer| !answer.trim().is_empty())
    }
}

impl Keyed for Question {
    type Key = QuestionId;

    fn key(&self) -> &QuestionId {
        &self.id
    }
}

impl Resource for Question {
    const COLLECTION: &'static str = "questions";
    const NAME: &'static str = "question";

    type Draft = QuestionDraft;
    type Patch = FieldPatch;
}

/// New question payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionDraft {
    /// Product the question is about.
    pub product_id: ProductId,
    /// Question text.
    pub text: String,
}
