use std::path::PathBuf;

use anyhow::{bail, ensure};
use chrono::Utc;

use crate::apply::{ApplicationForm, Attachment, Field, SubmitOutcome, Submitter};
use crate::catalog::Catalog;
use crate::config::Config;
use crate::http::http_client;

use super::spinner;

/// Raw values collected from the command line, before validation.
#[derive(Debug, Default)]
pub(crate) struct ApplyInput {
    pub fields: Vec<(Field, String)>,
    pub resume: Option<PathBuf>,
}

fn check_choices(catalog: &Catalog, form: &ApplicationForm) -> anyhow::Result<()> {
    let position = form.value(Field::InterestedPosition);
    ensure!(
        position.is_empty() || catalog.is_known_position(position),
        "unknown position {:?} (run `site positions` for the choices)",
        position
    );
    let location = form.value(Field::LocationPreference);
    ensure!(
        location.is_empty() || catalog.is_known_location(location),
        "unknown location preference {:?} (run `site positions` for the choices)",
        location
    );
    Ok(())
}

pub(crate) fn build_form(catalog: &Catalog, input: ApplyInput) -> anyhow::Result<ApplicationForm> {
    let mut form = ApplicationForm::new();
    for (field, value) in input.fields {
        form.set(field, value);
    }
    check_choices(catalog, &form)?;
    if let Some(path) = &input.resume {
        form.attach(Attachment::from_path(path)?);
    }
    Ok(form)
}

pub(crate) fn cmd_apply(config: &Config, catalog: &Catalog, input: ApplyInput) -> anyhow::Result<()> {
    let mut form = build_form(catalog, input)?;
    let submitter = Submitter::new(http_client(config.timeout())?, config.submit_url()?);

    let sp = spinner("Submitting application...");
    let outcome = submitter.submit(&mut form, Utc::now());
    sp.finish_and_clear();

    match outcome {
        SubmitOutcome::Submitted(notice) => {
            eprintln!("{}", notice);
            Ok(())
        }
        SubmitOutcome::Rejected(errors) => {
            for error in &errors {
                eprintln!("  {}", error);
            }
            bail!("Application not submitted: {} field(s) need attention", errors.len())
        }
        SubmitOutcome::Failed(notice) => {
            eprintln!("{}", notice);
            bail!("Application not submitted")
        }
    }
}
