mod apply;
mod catalog;
mod commands;
mod config;
mod feed;
mod http;
mod notice;

use std::path::PathBuf;

use clap::{Args as ClapArgs, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use apply::Field;
use catalog::Catalog;
use commands::apply::ApplyInput;
use commands::careers::OpeningFilter;
use config::Config;
use feed::Filters;

/// Blog feed, careers board and job applications from the command line
#[derive(Parser)]
#[command(version)]
struct Args {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Print blog posts, fetching as many pages as requested
    Blog {
        #[arg(short, long)]
        category: Option<String>,
        #[arg(short, long)]
        tag: Option<String>,
        /// Number of pages to load
        #[arg(short, long, default_value_t = 1)]
        pages: u32,
    },
    /// Scroll through blog posts interactively
    Browse {
        #[arg(short, long)]
        category: Option<String>,
        #[arg(short, long)]
        tag: Option<String>,
    },
    /// Show blog categories, popular tags and recent posts
    Topics,
    /// List current openings
    Careers {
        #[arg(short, long)]
        department: Option<String>,
        #[arg(short, long)]
        location: Option<String>,
        /// Show featured teams instead of openings
        #[arg(long)]
        teams: bool,
    },
    /// List the positions and locations accepted by `apply`
    Positions,
    /// Submit a job application with a resume
    Apply(ApplyArgs),
}

#[derive(ClapArgs)]
struct ApplyArgs {
    /// Resume file (PDF, DOC, DOCX, TXT or RTF)
    #[arg(long, value_name = "PATH")]
    resume: Option<PathBuf>,
    #[arg(long)]
    name: Option<String>,
    #[arg(long)]
    email: Option<String>,
    #[arg(long)]
    contact_number: Option<String>,
    #[arg(long)]
    position: Option<String>,
    #[arg(long)]
    current_role: Option<String>,
    #[arg(long)]
    current_organization: Option<String>,
    #[arg(long)]
    current_location: Option<String>,
    #[arg(long)]
    current_ctc: Option<String>,
    #[arg(long)]
    expected_ctc: Option<String>,
    /// Total years of experience
    #[arg(long)]
    experience: Option<String>,
    /// Notice period in days
    #[arg(long)]
    notice_period: Option<String>,
    /// yes or no
    #[arg(long)]
    in_notice: Option<String>,
    /// yes or no
    #[arg(long)]
    immediate_joiner: Option<String>,
    /// yes or no
    #[arg(long)]
    has_offers: Option<String>,
    #[arg(long)]
    offered_ctc: Option<String>,
    #[arg(long)]
    location_preference: Option<String>,
    #[arg(long)]
    certifications: Option<String>,
    #[arg(long)]
    linkedin: Option<String>,
    #[arg(long)]
    comments: Option<String>,
    #[arg(long)]
    referred_by: Option<String>,
}

impl ApplyArgs {
    fn into_input(self) -> ApplyInput {
        let fields = [
            (Field::Name, self.name),
            (Field::Email, self.email),
            (Field::ContactNumber, self.contact_number),
            (Field::InterestedPosition, self.position),
            (Field::CurrentRole, self.current_role),
            (Field::CurrentOrganization, self.current_organization),
            (Field::CurrentLocation, self.current_location),
            (Field::CurrentCtc, self.current_ctc),
            (Field::ExpectedCtc, self.expected_ctc),
            (Field::TotalExperience, self.experience),
            (Field::NoticePeriod, self.notice_period),
            (Field::IsInNotice, self.in_notice),
            (Field::IsImmediateJoiner, self.immediate_joiner),
            (Field::HasOffers, self.has_offers),
            (Field::OfferedCtc, self.offered_ctc),
            (Field::LocationPreference, self.location_preference),
            (Field::Certifications, self.certifications),
            (Field::LinkedinProfile, self.linkedin),
            (Field::Comments, self.comments),
            (Field::ReferredBy, self.referred_by),
        ];
        ApplyInput {
            fields: fields
                .into_iter()
                .filter_map(|(field, value)| value.map(|v| (field, v)))
                .collect(),
            resume: self.resume,
        }
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn run(args: Args) -> anyhow::Result<()> {
    let config = Config::load()?;
    let catalog = Catalog::load(config.catalog.as_deref())?;

    match args.command {
        Some(Command::Blog {
            category,
            tag,
            pages,
        }) => commands::blog::cmd_blog(&config, Filters::new(category, tag), pages),
        Some(Command::Browse { category, tag }) => {
            commands::browse::cmd_browse(&config, Filters::new(category, tag))
        }
        Some(Command::Topics) => commands::topics::cmd_topics(&catalog),
        Some(Command::Careers {
            department,
            location,
            teams,
        }) => commands::careers::cmd_careers(
            &catalog,
            &OpeningFilter {
                department,
                location,
            },
            teams,
        ),
        Some(Command::Positions) => commands::careers::cmd_positions(&catalog),
        Some(Command::Apply(apply)) => {
            commands::apply::cmd_apply(&config, &catalog, apply.into_input())
        }
        None => commands::blog::cmd_blog(&config, Filters::default(), 1),
    }
}

fn main() {
    init_tracing();
    let args = Args::parse();
    if let Err(e) = run(args) {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}
