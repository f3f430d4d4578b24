//! Eyeglass prescription models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{patch_field, patch_optional, required_id, LooseId};
use crate::record::{numeric_key, CreateContext, Record, Resource};
use crate::{CoreError, CoreResult};

/// Refraction values for one eye. Diopters, axis in degrees.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct EyeMeasurement {
    pub sphere: Option<f64>,
    pub cylinder: Option<f64>,
    pub axis: Option<f64>,
    pub add: Option<f64>,
}

impl EyeMeasurement {
    fn validate(&self, eye: &str) -> CoreResult<()> {
        if let Some(axis) = self.axis {
            if !(0.0..=180.0).contains(&axis) {
                return Err(CoreError::Validation(format!(
                    "{}.axis must be between 0 and 180",
                    eye
                )));
            }
        }
        Ok(())
    }
}

/// Both eyes, as embedded in patient records.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct EyePair {
    pub right_eye: EyeMeasurement,
    pub left_eye: EyeMeasurement,
}

/// A prescription with a counter-assigned numeric id.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Prescription {
    pub id: u64,
    /// Id of the patient, in string form whatever the client sent
    pub patient_id: String,
    pub patient_name: Option<String>,
    pub right_eye: EyeMeasurement,
    pub left_eye: EyeMeasurement,
    /// Pupillary distance in mm
    pub pd: Option<f64>,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Payload for creating a prescription.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewPrescription {
    pub patient_id: Option<LooseId>,
    pub patient_name: Option<String>,
    pub right_eye: Option<EyeMeasurement>,
    pub left_eye: Option<EyeMeasurement>,
    pub pd: Option<f64>,
    pub notes: Option<String>,
}

/// Patchable prescription fields. The patient link is fixed at creation.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PrescriptionPatch {
    pub patient_name: Option<String>,
    pub right_eye: Option<EyeMeasurement>,
    pub left_eye: Option<EyeMeasurement>,
    pub pd: Option<f64>,
    pub notes: Option<String>,
}

impl Record for Prescription {
    const KIND: &'static str = "prescriptions";
    const LABEL: &'static str = "Prescription";

    fn key(&self) -> String {
        self.id.to_string()
    }

    fn normalize_key(raw: &str) -> Option<String> {
        numeric_key(raw)
    }

    fn search_text(&self) -> &str {
        self.patient_name.as_deref().unwrap_or(&self.patient_id)
    }

    fn sequence(&self) -> Option<u64> {
        Some(self.id)
    }
}

impl Resource for Prescription {
    type Input = NewPrescription;
    type Patch = PrescriptionPatch;

    fn create(input: NewPrescription, ctx: &CreateContext<'_>) -> CoreResult<Self> {
        let patient_id = required_id("patientId", input.patient_id)?;
        let right_eye = input
            .right_eye
            .ok_or_else(|| CoreError::Validation("rightEye is required".into()))?;
        let left_eye = input
            .left_eye
            .ok_or_else(|| CoreError::Validation("leftEye is required".into()))?;
        right_eye.validate("rightEye")?;
        left_eye.validate("leftEye")?;

        Ok(Self {
            id: ctx.next_sequence()?,
            patient_id,
            patient_name: input.patient_name,
            right_eye,
            left_eye,
            pd: input.pd,
            notes: input.notes,
            created_at: ctx.now,
            updated_at: ctx.now,
        })
    }

    fn validate_patch(patch: &PrescriptionPatch) -> CoreResult<()> {
        if let Some(eye) = &patch.right_eye {
            eye.validate("rightEye")?;
        }
        if let Some(eye) = &patch.left_eye {
            eye.validate("leftEye")?;
        }
        Ok(())
    }

    fn apply_patch(&mut self, patch: &PrescriptionPatch, now: DateTime<Utc>) {
        patch_optional(&mut self.patient_name, &patch.patient_name);
        patch_field(&mut self.right_eye, &patch.right_eye);
        patch_field(&mut self.left_eye, &patch.left_eye);
        patch_optional(&mut self.pd, &patch.pd);
        patch_optional(&mut self.notes, &patch.notes);
        self.updated_at = now;
    }
}
