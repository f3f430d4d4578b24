//! Appointment models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{
    check_date, check_time, not_blank, patch_field, patch_optional, required, required_id,
    LooseId,
};
use crate::record::{prefixed_id, prefixed_sequence, CreateContext, Record, Resource};
use crate::CoreResult;

const ID_PREFIX: &str = "APP";

/// Status given to new appointments.
pub const DEFAULT_APPOINTMENT_STATUS: &str = "Scheduled";

/// An eye-exam or fitting appointment.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Appointment {
    /// `APP###`
    pub id: String,
    pub patient_id: String,
    pub patient_name: Option<String>,
    pub doctor_name: Option<String>,
    /// `YYYY-MM-DD`
    pub date: String,
    /// `HH:MM`
    pub time: String,
    pub status: String,
    pub notes: Option<String>,
    pub shop_id: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Payload for booking an appointment.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewAppointment {
    pub patient_id: Option<LooseId>,
    pub patient_name: Option<String>,
    pub doctor_name: Option<String>,
    pub date: Option<String>,
    pub time: Option<String>,
    pub status: Option<String>,
    pub notes: Option<String>,
    pub shop_id: Option<String>,
}

/// Patchable appointment fields.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppointmentPatch {
    pub patient_name: Option<String>,
    pub doctor_name: Option<String>,
    pub date: Option<String>,
    pub time: Option<String>,
    pub status: Option<String>,
    pub notes: Option<String>,
    pub shop_id: Option<String>,
}

impl Record for Appointment {
    const KIND: &'static str = "appointments";
    const LABEL: &'static str = "Appointment";

    fn key(&self) -> String {
        self.id.clone()
    }

    fn search_text(&self) -> &str {
        self.patient_name.as_deref().unwrap_or(&self.patient_id)
    }

    fn sequence(&self) -> Option<u64> {
        prefixed_sequence(&self.id, ID_PREFIX)
    }
}

impl Resource for Appointment {
    type Input = NewAppointment;
    type Patch = AppointmentPatch;

    fn create(input: NewAppointment, ctx: &CreateContext<'_>) -> CoreResult<Self> {
        let patient_id = required_id("patientId", input.patient_id)?;
        let date = required("date", input.date)?;
        let time = required("time", input.time)?;
        check_date("date", &date)?;
        check_time("time", &time)?;

        Ok(Self {
            id: prefixed_id(ID_PREFIX, ctx.next_sequence()?),
            patient_id,
            patient_name: input.patient_name,
            doctor_name: input.doctor_name,
            date,
            time,
            status: input
                .status
                .filter(|s| !s.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_APPOINTMENT_STATUS.to_string()),
            notes: input.notes,
            shop_id: input.shop_id,
            created_at: ctx.now,
            updated_at: ctx.now,
        })
    }

    fn validate_patch(patch: &AppointmentPatch) -> CoreResult<()> {
        not_blank("status", patch.status.as_ref())?;
        if let Some(date) = &patch.date {
            check_date("date", date)?;
        }
        if let Some(time) = &patch.time {
            check_time("time", time)?;
        }
        Ok(())
    }

    fn apply_patch(&mut self, patch: &AppointmentPatch, now: DateTime<Utc>) {
        patch_optional(&mut self.patient_name, &patch.patient_name);
        patch_optional(&mut self.doctor_name, &patch.doctor_name);
        patch_field(&mut self.date, &patch.date);
        patch_field(&mut self.time, &patch.time);
        patch_field(&mut self.status, &patch.status);
        patch_optional(&mut self.notes, &patch.notes);
        patch_optional(&mut self.shop_id, &patch.shop_id);
        self.updated_at = now;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::Clock;
    use crate::repo::RepoResult;

    fn create(json: &str) -> CoreResult<Appointment> {
        let clock = Clock::new();
        let sequence = || -> RepoResult<u64> { Ok(12) };
        let ctx = CreateContext::new(clock.now(), &clock, &sequence);
        Appointment::create(serde_json::from_str(json).unwrap(), &ctx)
    }

    #[test]
    fn test_create_assigns_prefixed_id_and_default_status() {
        let appt = create(r#"{"patientId":"PAT001","date":"2024-03-01","time":"10:30"}"#).unwrap();
        assert_eq!(appt.id, "APP012");
        assert_eq!(appt.status, "Scheduled");
        assert_eq!(appt.sequence(), Some(12));
    }

    #[test]
    fn test_create_validates_date_and_time() {
        let err = create(r#"{"patientId":"PAT001","time":"10:30"}"#).unwrap_err();
        assert_eq!(err.to_string(), "date is required");

        assert!(create(r#"{"patientId":"PAT001","date":"03/01/2024","time":"10:30"}"#).is_err());
        assert!(create(r#"{"patientId":"PAT001","date":"2024-03-01","time":"half past"}"#).is_err());
    }
}
