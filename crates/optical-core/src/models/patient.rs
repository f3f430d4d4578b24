//! Patient models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{not_blank, patch_field, patch_optional, required, EyePair};
use crate::record::{prefixed_id, prefixed_sequence, CreateContext, Record, Resource};
use crate::CoreResult;

const ID_PREFIX: &str = "PAT";

/// A patient record with clinical and loyalty data.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Patient {
    /// `PAT###`
    pub id: String,
    pub name: String,
    pub age: Option<u32>,
    pub gender: Option<String>,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub address: String,
    pub medical_history: Option<String>,
    /// Latest refraction on file
    pub prescription: Option<EyePair>,
    #[serde(default)]
    pub loyalty_points: u32,
    pub loyalty_tier: Option<String>,
    pub shop_id: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Payload for creating a patient.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewPatient {
    pub name: Option<String>,
    pub age: Option<u32>,
    pub gender: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub medical_history: Option<String>,
    pub prescription: Option<EyePair>,
    pub loyalty_points: Option<u32>,
    pub loyalty_tier: Option<String>,
    pub shop_id: Option<String>,
}

/// Patchable patient fields.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PatientPatch {
    pub name: Option<String>,
    pub age: Option<u32>,
    pub gender: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub medical_history: Option<String>,
    pub prescription: Option<EyePair>,
    pub loyalty_points: Option<u32>,
    pub loyalty_tier: Option<String>,
    pub shop_id: Option<String>,
}

impl Patient {
    /// Create a patient with required fields.
    pub fn new(sequence: u64, name: String, now: DateTime<Utc>) -> Self {
        Self {
            id: prefixed_id(ID_PREFIX, sequence),
            name,
            age: None,
            gender: None,
            phone: String::new(),
            address: String::new(),
            medical_history: None,
            prescription: None,
            loyalty_points: 0,
            loyalty_tier: None,
            shop_id: None,
            created_at: now,
            updated_at: now,
        }
    }
}

impl Record for Patient {
    const KIND: &'static str = "patients";
    const LABEL: &'static str = "Patient";

    fn key(&self) -> String {
        self.id.clone()
    }

    fn search_text(&self) -> &str {
        &self.name
    }

    fn sequence(&self) -> Option<u64> {
        prefixed_sequence(&self.id, ID_PREFIX)
    }
}

impl Resource for Patient {
    type Input = NewPatient;
    type Patch = PatientPatch;

    fn create(input: NewPatient, ctx: &CreateContext<'_>) -> CoreResult<Self> {
        let name = required("name", input.name)?;
        let mut patient = Patient::new(ctx.next_sequence()?, name, ctx.now);
        patient.age = input.age;
        patient.gender = input.gender;
        patient.phone = input.phone.unwrap_or_default();
        patient.address = input.address.unwrap_or_default();
        patient.medical_history = input.medical_history;
        patient.prescription = input.prescription;
        patient.loyalty_points = input.loyalty_points.unwrap_or(0);
        patient.loyalty_tier = input.loyalty_tier;
        patient.shop_id = input.shop_id;
        Ok(patient)
    }

    fn validate_patch(patch: &PatientPatch) -> CoreResult<()> {
        not_blank("name", patch.name.as_ref())
    }

    fn apply_patch(&mut self, patch: &PatientPatch, now: DateTime<Utc>) {
        patch_field(&mut self.name, &patch.name);
        patch_optional(&mut self.age, &patch.age);
        patch_optional(&mut self.gender, &patch.gender);
        patch_field(&mut self.phone, &patch.phone);
        patch_field(&mut self.address, &patch.address);
        patch_optional(&mut self.medical_history, &patch.medical_history);
        patch_optional(&mut self.prescription, &patch.prescription);
        patch_field(&mut self.loyalty_points, &patch.loyalty_points);
        patch_optional(&mut self.loyalty_tier, &patch.loyalty_tier);
        patch_optional(&mut self.shop_id, &patch.shop_id);
        self.updated_at = now;
    }
}
