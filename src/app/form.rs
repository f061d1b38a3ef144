//! Form state controllers.
//!
//! Each form holds its fields as raw text, updated last-write-wins per field
//! exactly as the user types. Validation is limited to required-field gating
//! plus numeric parsing at submit time; all business rules (fee computation,
//! discount application, range checks) live server-side.

use crate::domain::{BatchId, FeeRule, FeeRulePatch, NewBatch, NewFeeRule};
use crate::error::{FeedeskError, Result};

fn parse_positive(field: &str, raw: &str) -> Result<u32> {
    let n: u32 = raw
        .trim()
        .parse()
        .map_err(|_| FeedeskError::Validation(format!("{} must be a number", field)))?;
    if n == 0 {
        return Err(FeedeskError::Validation(format!(
            "{} must be a positive integer",
            field
        )));
    }
    Ok(n)
}

fn parse_amount(field: &str, raw: &str) -> Result<f64> {
    raw.trim()
        .parse()
        .map_err(|_| FeedeskError::Validation(format!("{} must be a number", field)))
}

fn parse_enum<T>(field: &str, raw: &str) -> Result<T>
where
    T: std::str::FromStr<Err = String>,
{
    raw.parse()
        .map_err(|_| FeedeskError::Validation(format!("{} has an invalid value: {}", field, raw)))
}

/// Draft state for the batch entry form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchDraft {
    pub batch_name: String,
    pub number_of_students: String,
    pub number_of_classes_per_month: String,
    pub course: String,
    pub medium: String,
}

impl BatchDraft {
    /// Update one field by name, last-write-wins. Returns false for an
    /// unknown field name.
    pub fn set(&mut self, field: &str, value: &str) -> bool {
        let slot = match field {
            "batchName" => &mut self.batch_name,
            "numberOfStudents" => &mut self.number_of_students,
            "numberOfClassesPerMonth" => &mut self.number_of_classes_per_month,
            "course" => &mut self.course,
            "medium" => &mut self.medium,
            _ => return false,
        };
        *slot = value.to_string();
        true
    }

    /// Required-field gating: every field on this form is required.
    pub fn is_complete(&self) -> bool {
        !self.batch_name.trim().is_empty()
            && !self.number_of_students.trim().is_empty()
            && !self.number_of_classes_per_month.trim().is_empty()
            && !self.course.trim().is_empty()
            && !self.medium.trim().is_empty()
    }

    /// Parse the draft into the typed creation payload.
    pub fn to_input(&self) -> Result<NewBatch> {
        Ok(NewBatch {
            batch_name: self.batch_name.trim().to_string(),
            number_of_students: parse_positive("numberOfStudents", &self.number_of_students)?,
            number_of_classes_per_month: parse_positive(
                "numberOfClassesPerMonth",
                &self.number_of_classes_per_month,
            )?,
            course: parse_enum("course", &self.course)?,
            medium: parse_enum("medium", &self.medium)?,
        })
    }

    /// Clear back to empty defaults (after a successful create).
    pub fn reset(&mut self) {
        *self = BatchDraft::default();
    }
}

/// Draft state for the fee rule forms (create and edit share this shape).
///
/// The edit modal seeds a fresh draft from the selected rule and mutates the
/// draft only — the selected-rule snapshot stays untouched, which keeps the
/// partial-update payload auditable against it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FeeRuleDraft {
    pub batch_id: String,
    pub no_of_students_min: String,
    pub no_of_students_max: String,
    pub region: String,
    pub medium: String,
    pub course: String,
    pub monthly_fee: String,
    pub total_classes: String,
    pub negotiable_fee: String,
    pub discount: String,
    pub remarks: String,
}

impl FeeRuleDraft {
    /// Seed an edit draft from an existing rule, falling back to the empty
    /// string field-by-field where a value is absent. The batch field takes
    /// the referenced batch's identifier, never its display name.
    pub fn from_rule(rule: &FeeRule) -> Self {
        FeeRuleDraft {
            batch_id: rule.batch.id().to_string(),
            no_of_students_min: rule.no_of_students_min.to_string(),
            no_of_students_max: rule.no_of_students_max.to_string(),
            region: rule.region.to_string(),
            medium: rule.medium.to_string(),
            course: rule.course.to_string(),
            monthly_fee: rule.monthly_fee.to_string(),
            total_classes: rule.total_classes.to_string(),
            negotiable_fee: rule.negotiable_fee.to_string(),
            discount: rule.discount.map(|d| d.to_string()).unwrap_or_default(),
            remarks: rule.remarks.clone().unwrap_or_default(),
        }
    }

    /// Update one field by name, last-write-wins. Returns false for an
    /// unknown field name.
    pub fn set(&mut self, field: &str, value: &str) -> bool {
        let slot = match field {
            "batchId" => &mut self.batch_id,
            "noOfStudentsMin" => &mut self.no_of_students_min,
            "noOfStudentsMax" => &mut self.no_of_students_max,
            "region" => &mut self.region,
            "medium" => &mut self.medium,
            "course" => &mut self.course,
            "monthlyFee" => &mut self.monthly_fee,
            "totalClasses" => &mut self.total_classes,
            "negotiableFee" => &mut self.negotiable_fee,
            "discount" => &mut self.discount,
            "remarks" => &mut self.remarks,
            _ => return false,
        };
        *slot = value.to_string();
        true
    }

    /// Required-field gating for the creation form. Discount and remarks are
    /// the only optional fields.
    pub fn is_complete(&self) -> bool {
        !self.batch_id.trim().is_empty()
            && !self.no_of_students_min.trim().is_empty()
            && !self.no_of_students_max.trim().is_empty()
            && !self.region.trim().is_empty()
            && !self.medium.trim().is_empty()
            && !self.course.trim().is_empty()
            && !self.monthly_fee.trim().is_empty()
            && !self.total_classes.trim().is_empty()
            && !self.negotiable_fee.trim().is_empty()
    }

    /// Parse the draft into the typed creation payload.
    ///
    /// Note min <= max is NOT checked here; that expectation belongs to the
    /// server.
    pub fn to_input(&self) -> Result<NewFeeRule> {
        Ok(NewFeeRule {
            batch_id: BatchId::from(self.batch_id.trim()),
            no_of_students_min: parse_positive("noOfStudentsMin", &self.no_of_students_min)?,
            no_of_students_max: parse_positive("noOfStudentsMax", &self.no_of_students_max)?,
            region: parse_enum("region", &self.region)?,
            medium: parse_enum("medium", &self.medium)?,
            course: parse_enum("course", &self.course)?,
            monthly_fee: parse_amount("monthlyFee", &self.monthly_fee)?,
            total_classes: parse_positive("totalClasses", &self.total_classes)?,
            negotiable_fee: parse_amount("negotiableFee", &self.negotiable_fee)?,
            discount: self.optional_amount("discount", &self.discount)?,
            remarks: match self.remarks.trim() {
                "" => None,
                text => Some(text.to_string()),
            },
        })
    }

    /// Emit the partial-update payload: every populated field becomes a key,
    /// every empty field is omitted entirely.
    pub fn to_patch(&self) -> Result<FeeRulePatch> {
        Ok(FeeRulePatch {
            batch_id: match self.batch_id.trim() {
                "" => None,
                id => Some(BatchId::from(id)),
            },
            no_of_students_min: self.optional_positive("noOfStudentsMin", &self.no_of_students_min)?,
            no_of_students_max: self.optional_positive("noOfStudentsMax", &self.no_of_students_max)?,
            region: self.optional_enum("region", &self.region)?,
            medium: self.optional_enum("medium", &self.medium)?,
            course: self.optional_enum("course", &self.course)?,
            monthly_fee: self.optional_amount("monthlyFee", &self.monthly_fee)?,
            total_classes: self.optional_positive("totalClasses", &self.total_classes)?,
            negotiable_fee: self.optional_amount("negotiableFee", &self.negotiable_fee)?,
            discount: self.optional_amount("discount", &self.discount)?,
            remarks: match self.remarks.trim() {
                "" => None,
                text => Some(text.to_string()),
            },
        })
    }

    fn optional_positive(&self, field: &str, raw: &str) -> Result<Option<u32>> {
        if raw.trim().is_empty() {
            Ok(None)
        } else {
            parse_positive(field, raw).map(Some)
        }
    }

    fn optional_amount(&self, field: &str, raw: &str) -> Result<Option<f64>> {
        if raw.trim().is_empty() {
            Ok(None)
        } else {
            parse_amount(field, raw).map(Some)
        }
    }

    fn optional_enum<T>(&self, field: &str, raw: &str) -> Result<Option<T>>
    where
        T: std::str::FromStr<Err = String>,
    {
        if raw.trim().is_empty() {
            Ok(None)
        } else {
            parse_enum(field, raw).map(Some)
        }
    }

    /// Clear back to empty defaults (after a successful create).
    pub fn reset(&mut self) {
        *self = FeeRuleDraft::default();
    }
}

/// Local state for the batch fee configuration modal.
///
/// Never persisted: submission is a stub in the original product and stays
/// one here (see DESIGN.md).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchFeeConfig {
    pub category: String,
    pub fee_amount: String,
    pub discount: String,
    pub configure_discount: bool,
}

impl BatchFeeConfig {
    /// Category and fee amount are required; discount only matters when the
    /// configure-discount flag is set.
    pub fn is_complete(&self) -> bool {
        !self.category.trim().is_empty() && !self.fee_amount.trim().is_empty()
    }

    pub fn reset(&mut self) {
        *self = BatchFeeConfig::default();
    }
}
