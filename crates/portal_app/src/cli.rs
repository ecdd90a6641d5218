use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use portal_core::FeedTab;

#[derive(Parser)]
#[command(name = "portal")]
#[command(about = "Lumenhire hiring portal for candidates and recruiters", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Backend base URL (overrides PORTAL_API_URL)
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    /// Log debug output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Sign in and remember the session
    Login {
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
    },

    /// Forget the stored session
    Logout,

    /// Create an account and sign in
    Register {
        #[command(subcommand)]
        role: RegisterCommand,
    },

    /// Browse the candidate job feed
    Jobs {
        /// all, applied or saved
        #[arg(long, default_value = "all")]
        tab: FeedTab,

        /// Page number, starting at 1
        #[arg(long, default_value_t = 1)]
        page: u32,
    },

    /// Apply to a job
    Apply { job: u64 },

    /// Bookmark a job
    Save { job: u64 },

    /// Recruiter workspace
    Recruiter {
        #[command(subcommand)]
        command: RecruiterCommand,
    },

    /// Interactive session
    Shell,
}

#[derive(Subcommand)]
pub enum RegisterCommand {
    Candidate {
        #[command(flatten)]
        account: AccountArgs,

        /// Resume file (PDF, at most 5 MiB)
        #[arg(long)]
        resume: PathBuf,
    },
    Recruiter {
        #[command(flatten)]
        account: AccountArgs,

        #[arg(long)]
        company: String,

        /// Current position at the company
        #[arg(long)]
        position: String,

        #[arg(long)]
        linkedin: Option<String>,
    },
}

#[derive(Args)]
pub struct AccountArgs {
    #[arg(long)]
    pub name: String,
    #[arg(long)]
    pub email: String,
    #[arg(long)]
    pub password: String,
    /// Comma separated
    #[arg(long, default_value = "")]
    pub skills: String,
}

#[derive(Subcommand)]
pub enum RecruiterCommand {
    /// List your posted jobs
    Jobs {
        #[arg(long, default_value_t = 1)]
        page: u32,
    },

    /// Applications received for a job
    Applications {
        job: u64,
        #[arg(long, default_value_t = 1)]
        page: u32,
    },

    /// Meetings scheduled for a job
    Meetings {
        job: u64,
        #[arg(long, default_value_t = 1)]
        page: u32,
    },

    /// Move an application to the next round, select or reject it
    Status {
        application: u64,
        #[arg(long)]
        job: u64,
        #[arg(long)]
        candidate: String,
        /// next-round, selected or rejected
        #[arg(long)]
        status: String,
        #[arg(long, default_value = "")]
        note: String,
    },

    /// Publish a new job
    PostJob {
        #[arg(long)]
        title: String,
        #[arg(long)]
        description: String,
        #[arg(long)]
        location: String,
        /// Comma separated
        #[arg(long, default_value = "")]
        skills: String,
        /// YYYY-MM-DD
        #[arg(long)]
        deadline: Option<String>,
        /// Full-time, Internship, ...
        #[arg(long)]
        kind: Option<String>,
        #[arg(long, default_value_t = 0)]
        stipend: u32,
    },

    /// Schedule an interview slot for a job
    Schedule {
        job: u64,
        #[arg(long)]
        time: String,
        #[arg(long)]
        zoom_link: String,
        #[arg(long)]
        candidate: Option<String>,
    },
}
