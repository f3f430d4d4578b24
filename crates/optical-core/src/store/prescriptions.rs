//! Prescriptions returned with the patient they belong to.

use serde::Serialize;
use tracing::warn;

use super::Store;
use crate::models::{NewPrescription, Patient, Prescription};
use crate::CoreResult;

/// A prescription with its patient attached when the patient exists.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct PrescriptionDetail {
    #[serde(flatten)]
    pub prescription: Prescription,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub patient: Option<Patient>,
}

impl Store {
    pub fn create_prescription(&self, input: NewPrescription) -> CoreResult<PrescriptionDetail> {
        let prescription = self.create::<Prescription>(input)?;
        Ok(self.with_patient(prescription))
    }

    pub fn prescription_detail(&self, raw_id: &str) -> CoreResult<PrescriptionDetail> {
        let prescription = self.get::<Prescription>(raw_id)?;
        Ok(self.with_patient(prescription))
    }

    /// Enrichment never fails the request; a lookup error just leaves `patient` out.
    fn with_patient(&self, prescription: Prescription) -> PrescriptionDetail {
        let patient = match self.find::<Patient>(&prescription.patient_id) {
            Ok(patient) => patient,
            Err(e) => {
                warn!(prescription = prescription.id, error = %e, "patient lookup failed");
                None
            }
        };
        PrescriptionDetail {
            prescription,
            patient,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::NewPatient;

    fn prescription_for(patient_id: &str) -> NewPrescription {
        serde_json::from_value(serde_json::json!({
            "patientId": patient_id,
            "rightEye": {"sphere": -1.25, "cylinder": -0.5, "axis": 90},
            "leftEye": {"sphere": -1.0}
        }))
        .unwrap()
    }

    #[test]
    fn test_enriched_with_existing_patient() {
        let store = Store::in_memory();
        let patient = store
            .create::<Patient>(NewPatient {
                name: Some("Meera".into()),
                ..Default::default()
            })
            .unwrap();

        let detail = store.create_prescription(prescription_for(&patient.id)).unwrap();
        assert_eq!(detail.patient.as_ref().map(|p| p.name.as_str()), Some("Meera"));

        let fetched = store
            .prescription_detail(&detail.prescription.id.to_string())
            .unwrap();
        assert_eq!(fetched, detail);
    }

    #[test]
    fn test_unknown_patient_is_omitted() {
        let store = Store::in_memory();
        let detail = store.create_prescription(prescription_for("PAT999")).unwrap();
        assert!(detail.patient.is_none());

        let json = serde_json::to_value(&detail).unwrap();
        assert!(json.get("patient").is_none());
        assert_eq!(json["patientId"], "PAT999");
    }
}
