pub mod schema;
pub mod submit;

use std::fs;
use std::path::Path;

use anyhow::Context;
use serde::Serialize;
use validator::Validate;

pub use schema::{FieldError, validate, validate_field, validate_resume};
pub use submit::{SubmitOutcome, Submitter};

/// Resumes larger than this are still sent, but the endpoint may refuse them.
pub const ADVISORY_MAX_RESUME_BYTES: usize = 5 * 1024 * 1024;

/// File extensions the careers endpoint takes as a resume.
pub const RESUME_EXTENSIONS: [&str; 5] = ["pdf", "doc", "docx", "txt", "rtf"];

/// Every text input of the application form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Field {
    Name,
    Email,
    ContactNumber,
    InterestedPosition,
    CurrentRole,
    CurrentOrganization,
    CurrentLocation,
    CurrentCtc,
    ExpectedCtc,
    TotalExperience,
    NoticePeriod,
    IsInNotice,
    IsImmediateJoiner,
    HasOffers,
    OfferedCtc,
    LocationPreference,
    Certifications,
    LinkedinProfile,
    Comments,
    ReferredBy,
}

impl Field {
    pub const ALL: [Field; 20] = [
        Field::Name,
        Field::Email,
        Field::ContactNumber,
        Field::InterestedPosition,
        Field::CurrentRole,
        Field::CurrentOrganization,
        Field::CurrentLocation,
        Field::CurrentCtc,
        Field::ExpectedCtc,
        Field::TotalExperience,
        Field::NoticePeriod,
        Field::IsInNotice,
        Field::IsImmediateJoiner,
        Field::HasOffers,
        Field::OfferedCtc,
        Field::LocationPreference,
        Field::Certifications,
        Field::LinkedinProfile,
        Field::Comments,
        Field::ReferredBy,
    ];

    /// Name used in the submitted JSON and in error reports.
    pub fn key(&self) -> &'static str {
        match self {
            Field::Name => "name",
            Field::Email => "email",
            Field::ContactNumber => "contactNumber",
            Field::InterestedPosition => "interestedPosition",
            Field::CurrentRole => "currentRole",
            Field::CurrentOrganization => "currentOrganization",
            Field::CurrentLocation => "currentLocation",
            Field::CurrentCtc => "currentCTC",
            Field::ExpectedCtc => "expectedCTC",
            Field::TotalExperience => "totalExperience",
            Field::NoticePeriod => "noticePeriod",
            Field::IsInNotice => "isInNotice",
            Field::IsImmediateJoiner => "isImmediateJoiner",
            Field::HasOffers => "hasOffers",
            Field::OfferedCtc => "offeredCTC",
            Field::LocationPreference => "locationPreference",
            Field::Certifications => "certifications",
            Field::LinkedinProfile => "linkedinProfile",
            Field::Comments => "comments",
            Field::ReferredBy => "referredBy",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Field::Name => "Full Name",
            Field::Email => "Email ID",
            Field::ContactNumber => "Contact Number",
            Field::InterestedPosition => "Interested Position",
            Field::CurrentRole => "Current Role",
            Field::CurrentOrganization => "Current Organization",
            Field::CurrentLocation => "Current Location",
            Field::CurrentCtc => "Current CTC per Annum",
            Field::ExpectedCtc => "Expected CTC per Annum",
            Field::TotalExperience => "Total Years of Experience",
            Field::NoticePeriod => "Notice Period (Days)",
            Field::IsInNotice => "Currently in Notice?",
            Field::IsImmediateJoiner => "Immediate Joiner?",
            Field::HasOffers => "Other Offers in Hand?",
            Field::OfferedCtc => "Offered CTC",
            Field::LocationPreference => "Location Preference",
            Field::Certifications => "Certifications",
            Field::LinkedinProfile => "LinkedIn Profile",
            Field::Comments => "Comments",
            Field::ReferredBy => "Referred By",
        }
    }
}

/// The resume file picked for upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attachment {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

impl Attachment {
    pub fn new(file_name: impl Into<String>, bytes: Vec<u8>) -> Self {
        let file_name = file_name.into();
        let content_type = content_type_for(&file_name).to_string();
        Self {
            file_name,
            content_type,
            bytes,
        }
    }

    pub fn from_path(path: &Path) -> anyhow::Result<Self> {
        let bytes =
            fs::read(path).with_context(|| format!("reading resume {}", path.display()))?;
        let file_name = path
            .file_name()
            .and_then(|f| f.to_str())
            .unwrap_or("resume")
            .to_string();
        Ok(Self::new(file_name, bytes))
    }

    pub fn exceeds_advisory_size(&self) -> bool {
        self.bytes.len() > ADVISORY_MAX_RESUME_BYTES
    }

    pub fn has_resume_extension(&self) -> bool {
        RESUME_EXTENSIONS.contains(&extension(&self.file_name).as_str())
    }
}

fn extension(file_name: &str) -> String {
    Path::new(file_name)
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or_default()
        .to_ascii_lowercase()
}

fn content_type_for(file_name: &str) -> &'static str {
    match extension(file_name).as_str() {
        "pdf" => "application/pdf",
        "doc" => "application/msword",
        "docx" => "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
        "txt" => "text/plain",
        "rtf" => "application/rtf",
        _ => "application/octet-stream",
    }
}

/// Form state. Text fields serialize under their [`Field::key`] names and are
/// stored trimmed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationForm {
    #[validate(custom(function = "schema::required"), length(max = 100))]
    name: String,
    #[validate(custom(function = "schema::required_email"), email, length(max = 254))]
    email: String,
    #[validate(custom(function = "schema::required"), length(max = 20))]
    contact_number: String,
    #[validate(custom(function = "schema::required"), length(max = 200))]
    interested_position: String,
    #[validate(length(max = 100))]
    current_role: String,
    #[validate(length(max = 100))]
    current_organization: String,
    #[validate(length(max = 100))]
    current_location: String,
    #[serde(rename = "currentCTC")]
    #[validate(length(max = 50))]
    current_ctc: String,
    #[serde(rename = "expectedCTC")]
    #[validate(length(max = 50))]
    expected_ctc: String,
    #[validate(custom(function = "schema::required_number"))]
    total_experience: String,
    #[validate(custom(function = "schema::number"))]
    notice_period: String,
    #[validate(custom(function = "schema::yes_no"))]
    is_in_notice: String,
    #[validate(custom(function = "schema::yes_no"))]
    is_immediate_joiner: String,
    #[validate(custom(function = "schema::yes_no"))]
    has_offers: String,
    #[serde(rename = "offeredCTC")]
    #[validate(length(max = 50))]
    offered_ctc: String,
    #[validate(length(max = 100))]
    location_preference: String,
    #[validate(length(max = 500))]
    certifications: String,
    #[validate(length(max = 200))]
    linkedin_profile: String,
    #[validate(length(max = 2000))]
    comments: String,
    #[validate(length(max = 100))]
    referred_by: String,
    #[serde(skip)]
    resume: Option<Attachment>,
}

impl ApplicationForm {
    pub fn new() -> Self {
        Self::default()
    }

    fn slot(&mut self, field: Field) -> &mut String {
        match field {
            Field::Name => &mut self.name,
            Field::Email => &mut self.email,
            Field::ContactNumber => &mut self.contact_number,
            Field::InterestedPosition => &mut self.interested_position,
            Field::CurrentRole => &mut self.current_role,
            Field::CurrentOrganization => &mut self.current_organization,
            Field::CurrentLocation => &mut self.current_location,
            Field::CurrentCtc => &mut self.current_ctc,
            Field::ExpectedCtc => &mut self.expected_ctc,
            Field::TotalExperience => &mut self.total_experience,
            Field::NoticePeriod => &mut self.notice_period,
            Field::IsInNotice => &mut self.is_in_notice,
            Field::IsImmediateJoiner => &mut self.is_immediate_joiner,
            Field::HasOffers => &mut self.has_offers,
            Field::OfferedCtc => &mut self.offered_ctc,
            Field::LocationPreference => &mut self.location_preference,
            Field::Certifications => &mut self.certifications,
            Field::LinkedinProfile => &mut self.linkedin_profile,
            Field::Comments => &mut self.comments,
            Field::ReferredBy => &mut self.referred_by,
        }
    }

    pub fn value(&self, field: Field) -> &str {
        match field {
            Field::Name => &self.name,
            Field::Email => &self.email,
            Field::ContactNumber => &self.contact_number,
            Field::InterestedPosition => &self.interested_position,
            Field::CurrentRole => &self.current_role,
            Field::CurrentOrganization => &self.current_organization,
            Field::CurrentLocation => &self.current_location,
            Field::CurrentCtc => &self.current_ctc,
            Field::ExpectedCtc => &self.expected_ctc,
            Field::TotalExperience => &self.total_experience,
            Field::NoticePeriod => &self.notice_period,
            Field::IsInNotice => &self.is_in_notice,
            Field::IsImmediateJoiner => &self.is_immediate_joiner,
            Field::HasOffers => &self.has_offers,
            Field::OfferedCtc => &self.offered_ctc,
            Field::LocationPreference => &self.location_preference,
            Field::Certifications => &self.certifications,
            Field::LinkedinProfile => &self.linkedin_profile,
            Field::Comments => &self.comments,
            Field::ReferredBy => &self.referred_by,
        }
    }

    /// Updates one field and returns its fresh validation error, if any.
    pub fn set(&mut self, field: Field, value: impl Into<String>) -> Option<FieldError> {
        *self.slot(field) = value.into().trim().to_string();
        validate_field(self, field)
    }

    pub fn attach(&mut self, resume: Attachment) {
        self.resume = Some(resume);
    }

    pub fn resume(&self) -> Option<&Attachment> {
        self.resume.as_ref()
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}
