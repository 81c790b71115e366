use chrono::{DateTime, SecondsFormat, Utc};
use reqwest::blocking::multipart::{Form, Part};
use serde::Serialize;
use url::Url;

use super::schema::{FieldError, validate, validate_resume};
use super::{ApplicationForm, Attachment};
use crate::http::{TransportError, check_status};
use crate::notice::Notice;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct Payload<'a> {
    #[serde(flatten)]
    form: &'a ApplicationForm,
    submitted_at: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Sent and accepted; the form has been cleared.
    Submitted(Notice),
    /// Validation failed; nothing was sent.
    Rejected(Vec<FieldError>),
    /// Sending failed; the form is untouched so it can be resent.
    Failed(Notice),
}

/// Posts applications to the careers endpoint, one attempt per call.
pub struct Submitter {
    client: reqwest::blocking::Client,
    endpoint: Url,
}

impl Submitter {
    pub fn new(client: reqwest::blocking::Client, endpoint: Url) -> Self {
        Self { client, endpoint }
    }

    pub fn submit(&self, form: &mut ApplicationForm, now: DateTime<Utc>) -> SubmitOutcome {
        let errors = validate(form);
        if !errors.is_empty() {
            tracing::debug!(count = errors.len(), "application rejected by validation");
            return SubmitOutcome::Rejected(errors);
        }

        let Some(resume) = form.resume() else {
            return SubmitOutcome::Rejected(validate_resume(form).into_iter().collect());
        };

        match self.send(form, resume, now) {
            Ok(()) => {
                form.clear();
                SubmitOutcome::Submitted(Notice::success(
                    "Application submitted",
                    "Application submitted successfully! We'll get back to you soon.",
                ))
            }
            Err(e) => {
                tracing::warn!(endpoint = %self.endpoint, error = %e, "application upload failed");
                SubmitOutcome::Failed(Notice::failure(
                    "Submission failed",
                    format!("Could not submit your application ({e}). Please try again."),
                ))
            }
        }
    }

    fn send(
        &self,
        form: &ApplicationForm,
        resume: &Attachment,
        now: DateTime<Utc>,
    ) -> Result<(), TransportError> {
        if resume.exceeds_advisory_size() {
            tracing::warn!(
                file = %resume.file_name,
                bytes = resume.bytes.len(),
                "resume is larger than the advertised 5MB limit"
            );
        }
        let body = build_multipart(form, resume, now)?;
        tracing::debug!(endpoint = %self.endpoint, "posting application");
        check_status(
            self.client
                .post(self.endpoint.clone())
                .multipart(body)
                .send()?,
        )?;
        Ok(())
    }
}

pub(crate) fn payload_json(
    form: &ApplicationForm,
    now: DateTime<Utc>,
) -> Result<String, serde_json::Error> {
    serde_json::to_string(&Payload {
        form,
        submitted_at: now.to_rfc3339_opts(SecondsFormat::Millis, true),
    })
}

fn build_multipart(
    form: &ApplicationForm,
    resume: &Attachment,
    now: DateTime<Utc>,
) -> Result<Form, TransportError> {
    let data = Part::text(payload_json(form, now)?).mime_str("application/json")?;
    let file = Part::bytes(resume.bytes.clone())
        .file_name(resume.file_name.clone())
        .mime_str(&resume.content_type)?;
    Ok(Form::new().part("data", data).part("resume", file))
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;
    use httpmock::prelude::*;

    use super::*;
    use crate::apply::Field;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 1, 9, 30, 0).unwrap()
    }

    fn valid_form() -> ApplicationForm {
        let mut form = ApplicationForm::new();
        form.set(Field::Name, "Jane Smith");
        form.set(Field::Email, "jane@example.com");
        form.set(Field::ContactNumber, "+91 9876543210");
        form.set(Field::InterestedPosition, "DevOps Engineer");
        form.set(Field::TotalExperience, "5");
        form.set(Field::NoticePeriod, "30");
        form.set(Field::HasOffers, "no");
        form.attach(Attachment::new("jane.txt", b"Jane's resume".to_vec()));
        form
    }

    fn submitter(server: &MockServer) -> Submitter {
        Submitter::new(
            reqwest::blocking::Client::new(),
            Url::parse(&server.url("/apply")).unwrap(),
        )
    }

    #[test]
    fn test_payload_json_contains_every_field_and_timestamp() {
        let form = valid_form();
        let json: serde_json::Value =
            serde_json::from_str(&payload_json(&form, now()).unwrap()).unwrap();

        assert_eq!(json["name"], "Jane Smith");
        assert_eq!(json["noticePeriod"], "30");
        assert_eq!(json["currentCTC"], "");
        assert_eq!(json["submittedAt"], "2024-05-01T09:30:00.000Z");
        for field in Field::ALL {
            assert!(json.get(field.key()).is_some(), "missing {}", field.key());
        }
    }

    #[test]
    fn test_successful_submission_clears_form() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(POST)
                .path("/apply")
                .body_includes("name=\"data\"")
                .body_includes("\"email\":\"jane@example.com\"")
                .body_includes("name=\"resume\"; filename=\"jane.txt\"")
                .body_includes("Jane's resume");
            then.status(200);
        });

        let mut form = valid_form();
        let outcome = submitter(&server).submit(&mut form, now());

        mock.assert();
        let SubmitOutcome::Submitted(notice) = outcome else {
            panic!("expected success, got {outcome:?}");
        };
        assert!(notice.description.contains("submitted successfully"));
        assert!(form.is_empty());
        assert!(form.resume().is_none());
    }

    #[test]
    fn test_invalid_email_sends_nothing() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(POST).path("/apply");
            then.status(200);
        });

        let mut form = valid_form();
        form.set(Field::Email, "not-an-email");
        let before = form.clone();
        let outcome = submitter(&server).submit(&mut form, now());

        mock.assert_calls(0);
        let SubmitOutcome::Rejected(errors) = outcome else {
            panic!("expected rejection, got {outcome:?}");
        };
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field, "email");
        assert_eq!(form, before);
    }

    #[test]
    fn test_missing_resume_sends_nothing() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(POST).path("/apply");
            then.status(200);
        });

        let mut form = ApplicationForm::new();
        form.set(Field::Name, "Jane Smith");
        form.set(Field::Email, "jane@example.com");
        form.set(Field::ContactNumber, "123");
        form.set(Field::InterestedPosition, "Fresher");
        form.set(Field::TotalExperience, "0");
        let outcome = submitter(&server).submit(&mut form, now());

        mock.assert_calls(0);
        assert_eq!(
            outcome,
            SubmitOutcome::Rejected(vec![FieldError {
                field: "resume",
                message: "Please upload your resume".to_string(),
            }])
        );
    }

    #[test]
    fn test_server_error_keeps_form() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(POST).path("/apply");
            then.status(500);
        });

        let mut form = valid_form();
        let before = form.clone();
        let outcome = submitter(&server).submit(&mut form, now());

        mock.assert();
        assert!(matches!(outcome, SubmitOutcome::Failed(_)));
        assert_eq!(form, before);
    }

    #[test]
    fn test_network_error_keeps_form() {
        // Nothing listens on port 9 on test machines
        let submitter = Submitter::new(
            reqwest::blocking::Client::new(),
            Url::parse("http://127.0.0.1:9/apply").unwrap(),
        );
        let mut form = valid_form();
        let before = form.clone();

        let outcome = submitter.submit(&mut form, now());

        let SubmitOutcome::Failed(notice) = outcome else {
            panic!("expected failure, got {outcome:?}");
        };
        assert_eq!(notice.title, "Submission failed");
        assert_eq!(form, before);
    }
}
