//! Course-completion certificates

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::http::{ApiRequest, HttpClient};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CertificateStatus {
    Valid,
    Revoked,
    NotFound,
    Tampered,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentCertificateResponse {
    pub serial: String,
    pub issued_at: String,
    #[serde(default)]
    pub revoked_at: Option<String>,
    #[serde(default)]
    pub pdf_url: Option<String>,
    pub verify_url: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CertificateVerification {
    pub serial: String,
    pub status: CertificateStatus,
    #[serde(default)]
    pub student_full_name: Option<String>,
    #[serde(default)]
    pub course_title: Option<String>,
    #[serde(default)]
    pub issued_at: Option<String>,
    #[serde(default)]
    pub revoked_at: Option<String>,
}

/// Client for certificate retrieval, revocation and public verification
pub struct CertificateClient {
    http: Arc<HttpClient>,
}

impl CertificateClient {
    pub(crate) fn new(http: Arc<HttpClient>) -> Self {
        Self { http }
    }

    pub async fn student_course_certificate(
        &self,
        course_id: i64,
    ) -> Result<StudentCertificateResponse> {
        self.http
            .execute(ApiRequest::get(format!(
                "/api/student/courses/{course_id}/certificate"
            )))
            .await
    }

    pub async fn admin_revoke(&self, serial: &str) -> Result<()> {
        self.http
            .execute_unit(ApiRequest::post(format!(
                "/api/admin/certificates/{serial}/revoke"
            )))
            .await
    }

    /// Verify a certificate by serial; the endpoint is public but still
    /// returns the standard envelope
    pub async fn verify(&self, serial: &str) -> Result<CertificateVerification> {
        self.http
            .execute(ApiRequest::get(format!(
                "/api/public/certificates/verify/{serial}"
            )))
            .await
    }
}
