use std::fmt;

use validator::{Validate, ValidationError, ValidationErrors};

use super::{ApplicationForm, Field, RESUME_EXTENSIONS};

pub const RESUME_KEY: &str = "resume";

/// Most specific first: an empty email should read as missing, not malformed.
const CODE_PRIORITY: [&str; 5] = ["required", "email", "numeric", "yes_no", "length"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: &'static str,
    pub message: String,
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

pub(super) fn required(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("required"));
    }
    Ok(())
}

/// `email` alone accepts dotless domains such as `jane@localhost`.
pub(super) fn required_email(value: &str) -> Result<(), ValidationError> {
    required(value)?;
    match value.rsplit_once('@') {
        Some((_, domain)) if domain.contains('.') && !domain.ends_with('.') => Ok(()),
        _ => Err(ValidationError::new("email")),
    }
}

pub(super) fn number(value: &str) -> Result<(), ValidationError> {
    let value = value.trim();
    let ok = value.is_empty()
        || value
            .parse::<f64>()
            .is_ok_and(|n| n.is_finite() && n >= 0.0);
    if ok {
        Ok(())
    } else {
        Err(ValidationError::new("numeric"))
    }
}

pub(super) fn required_number(value: &str) -> Result<(), ValidationError> {
    required(value)?;
    number(value)
}

pub(super) fn yes_no(value: &str) -> Result<(), ValidationError> {
    match value.trim() {
        "" | "yes" | "no" => Ok(()),
        _ => Err(ValidationError::new("yes_no")),
    }
}

/// Rust field name for a JSON key: `currentCTC` -> `current_ctc`.
fn snake_case(key: &str) -> String {
    let mut out = String::with_capacity(key.len() + 4);
    let mut prev_lower = false;
    for ch in key.chars() {
        if ch.is_ascii_uppercase() && prev_lower {
            out.push('_');
        }
        prev_lower = ch.is_ascii_lowercase();
        out.push(ch.to_ascii_lowercase());
    }
    out
}

fn message(field: Field, error: &ValidationError) -> String {
    let label = field.label();
    match error.code.as_ref() {
        "required" => format!("{label} is required"),
        "email" => "Enter a valid email address".to_string(),
        "numeric" => format!("{label} must be a number"),
        "yes_no" => format!("{label} must be yes or no"),
        "length" => match error.params.get("max").and_then(|v| v.as_u64()) {
            Some(max) => format!("{label} must be at most {max} characters"),
            None => format!("{label} has an invalid length"),
        },
        _ => format!("{label} is invalid"),
    }
}

fn field_error(errors: &ValidationErrors, field: Field) -> Option<FieldError> {
    let by_field = errors.field_errors();
    let snake = snake_case(field.key());
    let list = by_field
        .get(field.key())
        .or_else(|| by_field.get(snake.as_str()))?;
    let error = CODE_PRIORITY
        .iter()
        .find_map(|code| list.iter().find(|e| e.code == *code))
        .or_else(|| list.first())?;
    Some(FieldError {
        field: field.key(),
        message: message(field, error),
    })
}

pub fn validate_field(form: &ApplicationForm, field: Field) -> Option<FieldError> {
    let errors = form.validate().err()?;
    field_error(&errors, field)
}

pub fn validate_resume(form: &ApplicationForm) -> Option<FieldError> {
    let message = match form.resume() {
        None => "Please upload your resume".to_string(),
        Some(resume) if !resume.has_resume_extension() => format!(
            "Resume must be one of: {}",
            RESUME_EXTENSIONS.map(|e| e.to_uppercase()).join(", ")
        ),
        Some(_) => return None,
    };
    Some(FieldError {
        field: RESUME_KEY,
        message,
    })
}

/// All errors in form order; empty means the form may be submitted.
pub fn validate(form: &ApplicationForm) -> Vec<FieldError> {
    let mut errors: Vec<FieldError> = match form.validate() {
        Ok(()) => Vec::new(),
        Err(errors) => Field::ALL
            .iter()
            .filter_map(|&field| field_error(&errors, field))
            .collect(),
    };
    errors.extend(validate_resume(form));
    errors
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;
    use crate::apply::Attachment;

    fn valid_form() -> ApplicationForm {
        let mut form = ApplicationForm::new();
        form.set(Field::Name, "Jane Smith");
        form.set(Field::Email, "jane@example.com");
        form.set(Field::ContactNumber, "+91 9876543210");
        form.set(Field::InterestedPosition, "DevOps Engineer");
        form.set(Field::TotalExperience, "5");
        form.attach(Attachment::new("cv.pdf", b"%PDF".to_vec()));
        form
    }

    fn error_for(form: &ApplicationForm, field: Field) -> Option<String> {
        validate_field(form, field).map(|e| e.message)
    }

    #[test]
    fn test_valid_form_passes() {
        assert!(validate(&valid_form()).is_empty());
    }

    #[test]
    fn test_empty_form_reports_required_fields_in_order() {
        let errors = validate(&ApplicationForm::new());
        let fields: Vec<&str> = errors.iter().map(|e| e.field).collect();
        assert_eq!(
            fields,
            vec![
                "name",
                "email",
                "contactNumber",
                "interestedPosition",
                "totalExperience",
                "resume"
            ]
        );
    }

    #[rstest]
    #[case("jane@example.com", true)]
    #[case("j.doe+jobs@mail.example.co.in", true)]
    #[case("not-an-email", false)]
    #[case("jane@example", false)]
    #[case("jane @example.com", false)]
    #[case("@example.com", false)]
    #[case("jane@@example.com", false)]
    fn test_email_rule(#[case] email: &str, #[case] ok: bool) {
        let mut form = valid_form();
        form.set(Field::Email, email);
        assert_eq!(error_for(&form, Field::Email).is_none(), ok, "{email}");
    }

    #[rstest]
    #[case("5", true)]
    #[case("2.5", true)]
    #[case(" 0 ", true)]
    #[case("five", false)]
    #[case("-1", false)]
    #[case("NaN", false)]
    #[case("inf", false)]
    fn test_experience_rule(#[case] value: &str, #[case] ok: bool) {
        let mut form = valid_form();
        form.set(Field::TotalExperience, value);
        assert_eq!(error_for(&form, Field::TotalExperience).is_none(), ok, "{value}");
    }

    #[test]
    fn test_notice_period_is_optional_but_numeric() {
        let mut form = valid_form();
        assert_eq!(error_for(&form, Field::NoticePeriod), None);
        form.set(Field::NoticePeriod, "30");
        assert_eq!(error_for(&form, Field::NoticePeriod), None);
        form.set(Field::NoticePeriod, "a month");
        assert_eq!(
            error_for(&form, Field::NoticePeriod).as_deref(),
            Some("Notice Period (Days) must be a number")
        );
    }

    #[rstest]
    #[case("", true)]
    #[case("yes", true)]
    #[case("no", true)]
    #[case("maybe", false)]
    fn test_yes_no_rule(#[case] value: &str, #[case] ok: bool) {
        let mut form = valid_form();
        form.set(Field::HasOffers, value);
        assert_eq!(error_for(&form, Field::HasOffers).is_none(), ok);
    }

    #[test]
    fn test_whitespace_does_not_satisfy_required() {
        let mut form = valid_form();
        form.set(Field::Name, "   ");
        assert_eq!(
            error_for(&form, Field::Name).as_deref(),
            Some("Full Name is required")
        );
    }

    #[test]
    fn test_max_length() {
        let mut form = valid_form();
        form.set(Field::Comments, "x".repeat(2000));
        assert_eq!(error_for(&form, Field::Comments), None);
        form.set(Field::Comments, "x".repeat(2001));
        assert_eq!(
            error_for(&form, Field::Comments).as_deref(),
            Some("Comments must be at most 2000 characters")
        );
    }

    #[test]
    fn test_missing_resume() {
        let mut form = valid_form();
        form.clear();
        assert!(validate_resume(&form).is_some());
        assert_eq!(validate_resume(&valid_form()), None);
    }

    #[rstest]
    #[case("cv.pdf", true)]
    #[case("cv.DOC", true)]
    #[case("cv.docx", true)]
    #[case("cv.txt", true)]
    #[case("cv.rtf", true)]
    #[case("holiday.png", false)]
    #[case("cv.pdf.exe", false)]
    #[case("resume", false)]
    fn test_resume_extension(#[case] file_name: &str, #[case] ok: bool) {
        let mut form = valid_form();
        form.attach(Attachment::new(file_name, b"bytes".to_vec()));
        let errors = validate(&form);
        assert_eq!(errors.is_empty(), ok, "{file_name}: {errors:?}");
        if !ok {
            assert_eq!(errors[0].field, "resume");
            assert_eq!(errors[0].message, "Resume must be one of: PDF, DOC, DOCX, TXT, RTF");
        }
    }

    #[test]
    fn test_length_is_checked_after_trimming() {
        let mut form = valid_form();
        form.set(Field::Name, format!("  {}  ", "n".repeat(100)));
        assert_eq!(form.value(Field::Name), "n".repeat(100));
        assert_eq!(error_for(&form, Field::Name), None);

        form.set(Field::Name, format!("  {}  ", "n".repeat(101)));
        assert_eq!(
            error_for(&form, Field::Name).as_deref(),
            Some("Full Name must be at most 100 characters")
        );
    }

    #[test]
    fn test_padded_email_is_trimmed() {
        let mut form = valid_form();
        form.set(Field::Email, "  jane@example.com  ");
        assert_eq!(form.value(Field::Email), "jane@example.com");
        assert_eq!(error_for(&form, Field::Email), None);
    }

    #[test]
    fn test_empty_email_reads_as_missing() {
        let mut form = valid_form();
        form.set(Field::Email, "");
        assert_eq!(
            error_for(&form, Field::Email).as_deref(),
            Some("Email ID is required")
        );
    }

    #[test]
    fn test_renamed_fields_report_under_json_key() {
        let mut form = valid_form();
        form.set(Field::CurrentCtc, "9".repeat(51));
        let errors = validate(&form);
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field, "currentCTC");
        assert_eq!(
            errors[0].message,
            "Current CTC per Annum must be at most 50 characters"
        );
    }

    #[test]
    fn test_field_error_display() {
        let err = FieldError {
            field: "email",
            message: "Enter a valid email address".to_string(),
        };
        assert_eq!(err.to_string(), "email: Enter a valid email address");
    }
}
