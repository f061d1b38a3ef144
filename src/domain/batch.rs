//! Batch types.
//!
//! A batch is a named group of students sharing a class schedule. Batches are
//! created via the entry form and otherwise read-only: fee rules reference
//! them by id, and no update or delete operation exists for them.

use serde::{Deserialize, Serialize};

/// Server-assigned identifier for a batch.
///
/// Opaque Mongo-style id; the client never parses or generates these.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BatchId(pub String);

impl From<String> for BatchId {
    fn from(id: String) -> Self {
        BatchId(id)
    }
}

impl From<&str> for BatchId {
    fn from(id: &str) -> Self {
        BatchId(id.to_string())
    }
}

impl std::ops::Deref for BatchId {
    type Target = str;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl std::fmt::Display for BatchId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Course offered to a batch.
///
/// Note: this vocabulary deliberately differs from [`crate::domain::FeeCourse`]
/// ("Math" here, "Maths" there; no "Computer"/"English" overlap). The two enum
/// sets were never unified upstream and the discrepancy is preserved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BatchCourse {
    Math,
    Science,
    English,
}

impl BatchCourse {
    pub fn as_str(&self) -> &'static str {
        match self {
            BatchCourse::Math => "Math",
            BatchCourse::Science => "Science",
            BatchCourse::English => "English",
        }
    }
}

impl std::fmt::Display for BatchCourse {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for BatchCourse {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Math" => Ok(BatchCourse::Math),
            "Science" => Ok(BatchCourse::Science),
            "English" => Ok(BatchCourse::English),
            _ => Err(format!("invalid course: {}", s)),
        }
    }
}

/// Medium of instruction, shared by batches and fee rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Medium {
    English,
    Hindi,
}

impl Medium {
    pub fn as_str(&self) -> &'static str {
        match self {
            Medium::English => "English",
            Medium::Hindi => "Hindi",
        }
    }
}

impl std::fmt::Display for Medium {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Medium {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "English" => Ok(Medium::English),
            "Hindi" => Ok(Medium::Hindi),
            _ => Err(format!("invalid medium: {}", s)),
        }
    }
}

/// A batch as returned by the server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Batch {
    #[serde(rename = "_id")]
    pub id: BatchId,
    pub batch_name: String,
    pub number_of_students: u32,
    pub number_of_classes_per_month: u32,
    pub course: BatchCourse,
    pub medium: Medium,
}

/// Creation payload for a batch (everything but the server-assigned id).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewBatch {
    pub batch_name: String,
    pub number_of_students: u32,
    pub number_of_classes_per_month: u32,
    pub course: BatchCourse,
    pub medium: Medium,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn batch_deserializes_from_wire_shape() {
        let batch: Batch = serde_json::from_value(serde_json::json!({
            "_id": "66b1f0a2c9e77a0012345678",
            "batchName": "Morning Star",
            "numberOfStudents": 25,
            "numberOfClassesPerMonth": 12,
            "course": "Math",
            "medium": "Hindi"
        }))
        .unwrap();

        assert_eq!(batch.id, BatchId::from("66b1f0a2c9e77a0012345678"));
        assert_eq!(batch.batch_name, "Morning Star");
        assert_eq!(batch.number_of_students, 25);
        assert_eq!(batch.course, BatchCourse::Math);
        assert_eq!(batch.medium, Medium::Hindi);
    }

    #[test]
    fn new_batch_serializes_camel_case_without_id() {
        let input = NewBatch {
            batch_name: "Evening".to_string(),
            number_of_students: 10,
            number_of_classes_per_month: 8,
            course: BatchCourse::English,
            medium: Medium::English,
        };

        let value = serde_json::to_value(&input).unwrap();
        assert_eq!(
            value,
            serde_json::json!({
                "batchName": "Evening",
                "numberOfStudents": 10,
                "numberOfClassesPerMonth": 8,
                "course": "English",
                "medium": "English"
            })
        );
    }

    #[test]
    fn course_labels_round_trip() {
        for label in ["Math", "Science", "English"] {
            let course: BatchCourse = label.parse().unwrap();
            assert_eq!(course.as_str(), label);
        }
        assert!("Maths".parse::<BatchCourse>().is_err());
    }
}
