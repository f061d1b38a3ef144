//! Fee rule types.
//!
//! A fee rule is a pricing policy scoped to a batch, a student-count range,
//! a region, a medium, and a course. Rules are created via the entry form,
//! mutated through the edit modal with partial-update semantics, and deleted
//! behind a confirmation prompt.

use serde::{Deserialize, Serialize};

use super::batch::{Batch, BatchId, Medium};

/// Server-assigned identifier for a fee rule.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FeeRuleId(pub String);

impl From<String> for FeeRuleId {
    fn from(id: String) -> Self {
        FeeRuleId(id)
    }
}

impl From<&str> for FeeRuleId {
    fn from(id: &str) -> Self {
        FeeRuleId(id.to_string())
    }
}

impl std::ops::Deref for FeeRuleId {
    type Target = str;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl std::fmt::Display for FeeRuleId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Region a fee rule applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Region {
    North,
    South,
    East,
    West,
}

impl Region {
    pub fn as_str(&self) -> &'static str {
        match self {
            Region::North => "North",
            Region::South => "South",
            Region::East => "East",
            Region::West => "West",
        }
    }
}

impl std::fmt::Display for Region {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Region {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "North" => Ok(Region::North),
            "South" => Ok(Region::South),
            "East" => Ok(Region::East),
            "West" => Ok(Region::West),
            _ => Err(format!("invalid region: {}", s)),
        }
    }
}

/// Course a fee rule applies to.
///
/// Not the same vocabulary as [`super::batch::BatchCourse`]; see the note
/// there.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FeeCourse {
    Maths,
    Science,
    Computer,
}

impl FeeCourse {
    pub fn as_str(&self) -> &'static str {
        match self {
            FeeCourse::Maths => "Maths",
            FeeCourse::Science => "Science",
            FeeCourse::Computer => "Computer",
        }
    }
}

impl std::fmt::Display for FeeCourse {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for FeeCourse {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Maths" => Ok(FeeCourse::Maths),
            "Science" => Ok(FeeCourse::Science),
            "Computer" => Ok(FeeCourse::Computer),
            _ => Err(format!("invalid course: {}", s)),
        }
    }
}

/// Reference to a batch, as it appears on a fee rule's `batchId` field.
///
/// The API is asymmetric here: on read it populates the full batch object,
/// on write it accepts a bare id string. Both shapes occur in the wild, so
/// deserialization handles either.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum BatchRef {
    Embedded(Batch),
    Id(BatchId),
}

impl BatchRef {
    /// The referenced batch's identifier, regardless of shape.
    pub fn id(&self) -> &BatchId {
        match self {
            BatchRef::Embedded(batch) => &batch.id,
            BatchRef::Id(id) => id,
        }
    }

    /// The referenced batch's display name, when the server embedded it.
    pub fn batch_name(&self) -> Option<&str> {
        match self {
            BatchRef::Embedded(batch) => Some(&batch.batch_name),
            BatchRef::Id(_) => None,
        }
    }
}

/// A fee rule as returned by the server (`batchId` populated).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeeRule {
    #[serde(rename = "_id")]
    pub id: FeeRuleId,
    #[serde(rename = "batchId")]
    pub batch: BatchRef,
    /// Lower bound of the student-count range. `min <= max` is an
    /// expectation, not a verified invariant; the server owns enforcement.
    pub no_of_students_min: u32,
    pub no_of_students_max: u32,
    pub region: Region,
    pub medium: Medium,
    pub course: FeeCourse,
    pub monthly_fee: f64,
    pub total_classes: u32,
    /// Minimum fee floor below which discounting is not permitted. Rendered
    /// under the "Remarks" column header in the table, a labeling quirk
    /// carried over from the original screens.
    pub negotiable_fee: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub discount: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub remarks: Option<String>,
}

/// Creation payload for a fee rule: bare batch id, no server-assigned id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewFeeRule {
    pub batch_id: BatchId,
    pub no_of_students_min: u32,
    pub no_of_students_max: u32,
    pub region: Region,
    pub medium: Medium,
    pub course: FeeCourse,
    pub monthly_fee: f64,
    pub total_classes: u32,
    pub negotiable_fee: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub discount: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub remarks: Option<String>,
}

/// Partial-update payload for PATCH `/fees/:id`.
///
/// Only populated keys are serialized; the server leaves absent fields
/// untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FeeRulePatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub batch_id: Option<BatchId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub no_of_students_min: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub no_of_students_max: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub region: Option<Region>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub medium: Option<Medium>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub course: Option<FeeCourse>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub monthly_fee: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_classes: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub negotiable_fee: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub discount: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remarks: Option<String>,
}
