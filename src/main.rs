mod account;
mod ai;
mod applications;
mod bookmarks;
mod categories;
mod client;
mod config;
mod extract;
mod jobs;
mod mock;
mod models;
mod parse;
mod profile;
mod session;
mod store;

use anyhow::{Context, Result, anyhow};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use client::ApiClient;
use config::Config;
use jobs::JobQuery;
use profile::ProfileData;
use store::Store;

#[derive(Parser)]
#[command(name = "jobdeck")]
#[command(about = "Job-search platform client - browse, bookmark, apply, and use the AI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Log in and store the session token
    Login {
        #[arg(short, long)]
        email: String,

        #[arg(short, long)]
        password: String,
    },

    /// Create an account (logs you in on success)
    Register {
        #[arg(short, long)]
        name: String,

        #[arg(short, long)]
        email: String,

        #[arg(short, long)]
        password: String,
    },

    /// Clear the stored session token
    Logout,

    /// Show the logged-in user
    Whoami,

    /// Show application/bookmark counts for the logged-in user
    Stats,

    /// Browse and search jobs
    Jobs {
        #[command(subcommand)]
        command: JobCommands,
    },

    /// Manage bookmarked jobs
    Bookmark {
        #[command(subcommand)]
        command: BookmarkCommands,
    },

    /// Apply to a job
    Apply {
        /// Job ID
        job_id: String,

        /// Path to a cover letter text file
        #[arg(short, long)]
        cover_letter: Option<PathBuf>,
    },

    /// Manage submitted applications
    Applications {
        #[command(subcommand)]
        command: ApplicationCommands,
    },

    /// Job categories
    Categories {
        #[command(subcommand)]
        command: CategoryCommands,
    },

    /// Local candidate profile
    Profile {
        #[command(subcommand)]
        command: ProfileCommands,
    },

    /// AI-assisted tools
    Ai {
        #[command(subcommand)]
        command: AiCommands,
    },

    /// Display theme preference
    Theme {
        #[command(subcommand)]
        command: ThemeCommands,
    },
}

#[derive(Subcommand)]
enum JobCommands {
    /// Search the job listings
    List {
        /// Title search text
        #[arg(short, long)]
        title: Option<String>,

        /// Filter by category slug
        #[arg(short, long)]
        category: Option<String>,

        /// Filter by location
        #[arg(short, long)]
        location: Option<String>,

        #[arg(short, long)]
        page: Option<u32>,

        #[arg(long)]
        limit: Option<u32>,

        /// Sort order (newest, salary, relevance)
        #[arg(short, long)]
        sort: Option<String>,
    },

    /// Show job details
    Show {
        /// Job ID
        id: String,
    },

    /// Show featured jobs
    Featured,

    /// List jobs posted by a company
    Company {
        /// Company ID
        id: String,
    },

    /// Search suggestions for a partial query
    Suggest {
        query: String,
    },

    /// Post a new job listing
    Post {
        #[arg(short, long)]
        title: String,

        #[arg(short, long)]
        description: String,

        #[arg(short, long)]
        location: Option<String>,

        /// full-time, part-time, contract...
        #[arg(short, long)]
        employment_type: Option<String>,

        #[arg(short, long)]
        category: Option<String>,

        #[arg(short, long)]
        skill: Vec<String>,
    },
}

#[derive(Subcommand)]
enum BookmarkCommands {
    /// Bookmark a job
    Add {
        job_id: String,
    },

    /// Remove a bookmark
    Remove {
        job_id: String,
    },

    /// List bookmarks (refreshes the local mirror)
    List,

    /// Check whether a job is bookmarked
    Check {
        job_id: String,
    },
}

#[derive(Subcommand)]
enum ApplicationCommands {
    /// List submitted applications
    List,

    /// Withdraw a pending application
    Withdraw {
        /// Application ID
        id: String,
    },
}

#[derive(Subcommand)]
enum CategoryCommands {
    /// List categories
    List,

    /// Create a category
    Add {
        name: String,
    },
}

#[derive(Subcommand)]
enum ProfileCommands {
    /// Show the local profile and completeness score
    Show,

    /// Edit profile fields (only the flags you pass change)
    Edit {
        #[arg(long)]
        name: Option<String>,

        #[arg(long)]
        title: Option<String>,

        #[arg(long)]
        bio: Option<String>,

        #[arg(long)]
        email: Option<String>,

        #[arg(long)]
        phone: Option<String>,

        #[arg(long)]
        location: Option<String>,

        /// Replace the skills list (repeatable)
        #[arg(long)]
        skill: Vec<String>,

        /// Replace the experience entries (repeatable)
        #[arg(long)]
        experience: Vec<String>,

        /// Replace the education entries (repeatable)
        #[arg(long)]
        education: Vec<String>,
    },
}

#[derive(Subcommand)]
enum AiCommands {
    /// Analyze a resume file and show sectioned feedback
    AnalyzeResume {
        /// Resume file (.txt, .pdf, .docx, .doc)
        file: PathBuf,
    },

    /// Get AI job recommendations for a set of skills
    Recommend {
        /// Your skills (repeatable)
        #[arg(short, long, required = true)]
        skill: Vec<String>,

        /// Free-text interests
        #[arg(short, long)]
        interests: Option<String>,
    },

    /// Generate a cover letter for a job
    CoverLetter {
        /// Job ID
        job_id: String,

        /// Points to emphasize
        #[arg(long, default_value = "")]
        highlights: String,
    },

    /// Draft a job posting from a short prompt
    SmartPost {
        prompt: String,
    },

    /// Ask the assistant a question
    Chat {
        message: String,
    },
}

#[derive(Subcommand)]
enum ThemeCommands {
    /// Show the current theme
    Show,

    /// Set the theme (light, dark)
    Set {
        value: String,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let store = Store::open()?;
    let config = Config::from_env()?;
    let api = ApiClient::new(config, &store)?;

    match cli.command {
        Commands::Login { email, password } => {
            let user = account::login(&api, &store, &email, &password)?;
            println!("Logged in as {} <{}>", user.name, user.email);
        }

        Commands::Register {
            name,
            email,
            password,
        } => {
            let user = account::register(&api, &store, &name, &email, &password)?;
            println!("Account created. Logged in as {} <{}>", user.name, user.email);
        }

        Commands::Logout => {
            account::logout(&store)?;
            println!("Logged out.");
        }

        Commands::Whoami => {
            session::require_auth(&store)?;
            let user = account::me(&api)?;
            println!("{} <{}>", user.name, user.email);
            if let Some(role) = &user.role {
                println!("Role: {}", role);
            }
        }

        Commands::Stats => {
            session::require_auth(&store)?;
            let stats = account::stats(&api);
            println!("Applications:  {}", stats.applications);
            println!("Bookmarks:     {}", stats.bookmarks);
            println!("Profile views: {}", stats.profile_views);
        }

        Commands::Jobs { command } => run_jobs(&api, command)?,

        Commands::Bookmark { command } => {
            session::require_auth(&store)?;
            run_bookmarks(&api, &store, command)?;
        }

        Commands::Apply {
            job_id,
            cover_letter,
        } => {
            session::require_auth(&store)?;
            let letter = match &cover_letter {
                Some(path) => Some(std::fs::read_to_string(path).with_context(|| {
                    format!("Failed to read cover letter: {}", path.display())
                })?),
                None => None,
            };
            let application = applications::apply(&api, &job_id, letter.as_deref())?;
            println!(
                "Applied to job {} (application {}, status: {})",
                job_id, application.id, application.status
            );
        }

        Commands::Applications { command } => {
            session::require_auth(&store)?;
            run_applications(&api, command)?;
        }

        Commands::Categories { command } => run_categories(&api, command)?,

        Commands::Profile { command } => run_profile(&store, command)?,

        Commands::Ai { command } => {
            session::require_auth(&store)?;
            run_ai(&api, command)?;
        }

        Commands::Theme { command } => match command {
            ThemeCommands::Show => println!("{}", store.theme()),
            ThemeCommands::Set { value } => {
                store.set_theme(&value)?;
                println!("Theme set to '{}'.", value);
            }
        },
    }

    Ok(())
}

fn run_jobs(api: &ApiClient, command: JobCommands) -> Result<()> {
    match command {
        JobCommands::List {
            title,
            category,
            location,
            page,
            limit,
            sort,
        } => {
            let query = JobQuery {
                title,
                category,
                location,
                page,
                limit,
                sort,
            };
            let page = jobs::list(api, &query);
            if page.jobs.is_empty() {
                println!("No jobs found.");
            } else {
                print_job_table(&page.jobs);
                println!(
                    "\nPage {} of {} ({} total)",
                    page.page, page.total_pages, page.total
                );
            }
        }

        JobCommands::Show { id } => {
            let job = jobs::get(api, &id)?;
            println!("{}", job.title);
            if !job.company.name.is_empty() {
                let verified = if job.company.verified { " (verified)" } else { "" };
                println!("Company: {}{}", job.company.name, verified);
            }
            if let Some(location) = &job.location {
                println!("Location: {}", location);
            }
            if let Some(employment_type) = &job.employment_type {
                println!("Type: {}", employment_type);
            }
            if let Some(salary) = &job.salary {
                println!("Salary: {}", salary.display());
            }
            if let Some(posted_at) = &job.posted_at {
                println!("Posted: {}", posted_at.format("%Y-%m-%d"));
            }
            if !job.skills.is_empty() {
                println!("Skills: {}", job.skills.join(", "));
            }
            if let Some(description) = &job.description {
                println!("\n{}", textwrap::fill(description, 80));
            }
            print_list("Requirements", &job.requirements);
            print_list("Responsibilities", &job.responsibilities);
            print_list("Benefits", &job.benefits);
        }

        JobCommands::Featured => {
            let featured = jobs::featured(api);
            if featured.is_empty() {
                println!("No featured jobs.");
            } else {
                print_job_table(&featured);
            }
        }

        JobCommands::Company { id } => {
            let company_jobs = jobs::by_company(api, &id);
            if company_jobs.is_empty() {
                println!("No jobs found for this company.");
            } else {
                print_job_table(&company_jobs);
            }
        }

        JobCommands::Suggest { query } => {
            let suggestions = jobs::suggestions(api, &query);
            if suggestions.is_empty() {
                println!("No suggestions.");
            } else {
                for suggestion in suggestions {
                    println!("{}", suggestion);
                }
            }
        }

        JobCommands::Post {
            title,
            description,
            location,
            employment_type,
            category,
            skill,
        } => {
            let job = jobs::post(
                api,
                &jobs::NewJob {
                    title,
                    description,
                    location,
                    employment_type,
                    category,
                    skills: skill,
                },
            )?;
            println!("Posted job '{}' (ID: {})", job.title, job.id);
        }
    }
    Ok(())
}

fn run_bookmarks(api: &ApiClient, store: &Store, command: BookmarkCommands) -> Result<()> {
    match command {
        BookmarkCommands::Add { job_id } => {
            bookmarks::add(api, store, &job_id)?;
            println!("Bookmarked job {}.", job_id);
        }

        BookmarkCommands::Remove { job_id } => {
            bookmarks::remove(api, store, &job_id)?;
            println!("Removed bookmark for job {}.", job_id);
        }

        BookmarkCommands::List => {
            let list = bookmarks::list(api);
            let set = bookmarks::sync(store, &list)?;
            if set.is_empty() && list.is_empty() {
                println!("No bookmarks.");
            } else {
                println!("{:<26} {:<40}", "JOB ID", "TITLE");
                println!("{}", "-".repeat(66));
                for bookmark in list {
                    let title = bookmark
                        .job
                        .as_ref()
                        .map(|j| j.title.as_str())
                        .unwrap_or("-");
                    println!("{:<26} {:<40}", bookmark.job_id, truncate(title, 38));
                }
                println!("\n{} bookmarked job(s)", set.len());
            }
        }

        BookmarkCommands::Check { job_id } => {
            let bookmarked = bookmarks::check(api, &job_id);

            // Keep the mirror in step with what the backend said.
            let mut set = bookmarks::BookmarkSet::load(store)?;
            if set.contains(&job_id) != bookmarked {
                tracing::debug!("Bookmark mirror out of date for job {job_id}");
            }
            if bookmarked {
                set.insert(&job_id);
            } else {
                set.remove(&job_id);
            }
            set.save(store)?;

            if bookmarked {
                println!("Job {} is bookmarked.", job_id);
            } else {
                println!("Job {} is not bookmarked.", job_id);
            }
        }
    }
    Ok(())
}

fn run_applications(api: &ApiClient, command: ApplicationCommands) -> Result<()> {
    match command {
        ApplicationCommands::List => {
            let apps = applications::list(api);
            if apps.is_empty() {
                println!("No applications.");
            } else {
                println!("{:<26} {:<26} {:<10}", "ID", "JOB", "STATUS");
                println!("{}", "-".repeat(62));
                for app in apps {
                    let job = app
                        .job
                        .as_ref()
                        .map(|j| j.title.clone())
                        .unwrap_or_else(|| app.job_id.clone());
                    println!(
                        "{:<26} {:<26} {:<10}",
                        app.id,
                        truncate(&job, 24),
                        app.status
                    );
                }
            }
        }

        ApplicationCommands::Withdraw { id } => {
            let apps = applications::list(api);
            let app = apps
                .iter()
                .find(|a| a.id == id)
                .ok_or_else(|| anyhow!("Application {} not found", id))?;
            applications::withdraw(api, app)?;
            println!("Withdrew application {}.", id);
        }
    }
    Ok(())
}

fn run_categories(api: &ApiClient, command: CategoryCommands) -> Result<()> {
    match command {
        CategoryCommands::List => {
            let categories = categories::list(api);
            if categories.is_empty() {
                println!("No categories.");
            } else {
                println!("{:<26} {:<24} {:<24}", "ID", "NAME", "SLUG");
                println!("{}", "-".repeat(74));
                for category in categories {
                    println!(
                        "{:<26} {:<24} {:<24}",
                        category.id,
                        truncate(&category.name, 22),
                        category.slug
                    );
                }
            }
        }

        CategoryCommands::Add { name } => {
            let category = categories::create(api, &name)?;
            println!("Created category '{}' (slug: {})", category.name, category.slug);
        }
    }
    Ok(())
}

fn run_profile(store: &Store, command: ProfileCommands) -> Result<()> {
    match command {
        ProfileCommands::Show => {
            let profile = ProfileData::load(store)?;
            println!("Name:     {}", or_dash(&profile.name));
            println!("Title:    {}", or_dash(&profile.title));
            println!("Email:    {}", or_dash(&profile.email));
            println!("Phone:    {}", or_dash(&profile.phone));
            println!("Location: {}", or_dash(&profile.location));
            if !profile.bio.is_empty() {
                println!("\n{}", textwrap::fill(&profile.bio, 80));
            }
            if !profile.skills.is_empty() {
                println!("\nSkills: {}", profile.skills.join(", "));
            }
            print_list("Experience", &profile.experience);
            print_list("Education", &profile.education);
            println!("\nProfile completeness: {}%", profile.completeness);
        }

        ProfileCommands::Edit {
            name,
            title,
            bio,
            email,
            phone,
            location,
            skill,
            experience,
            education,
        } => {
            let mut profile = ProfileData::load(store)?;
            if let Some(name) = name {
                profile.name = name;
            }
            if let Some(title) = title {
                profile.title = title;
            }
            if let Some(bio) = bio {
                profile.bio = bio;
            }
            if let Some(email) = email {
                profile.email = email;
            }
            if let Some(phone) = phone {
                profile.phone = phone;
            }
            if let Some(location) = location {
                profile.location = location;
            }
            if !skill.is_empty() {
                profile.skills = skill;
            }
            if !experience.is_empty() {
                profile.experience = experience;
            }
            if !education.is_empty() {
                profile.education = education;
            }
            profile.save(store)?;
            println!("Profile saved. Completeness: {}%", profile.completeness);
        }
    }
    Ok(())
}

fn run_ai(api: &ApiClient, command: AiCommands) -> Result<()> {
    match command {
        AiCommands::AnalyzeResume { file } => {
            if !extract::is_supported(&file) {
                return Err(anyhow!(
                    "Unsupported resume file. Accepted: .txt, .pdf, .docx, .doc"
                ));
            }
            let text = extract::extract_text(&file)?;
            println!("Analyzing {} ({} characters)...", file.display(), text.len());
            let analysis = ai::analyze_resume(api, &text)?;
            if analysis.sections.is_empty() {
                println!("The analysis came back empty.");
            }
            for section in &analysis.sections {
                println!("\n=== {} ===", section.title);
                println!("{}", textwrap::fill(&section.content, 80));
            }
            if analysis.source == parse::AnalysisSource::Fallback {
                println!("\n(The response had no section markers; shown as-is.)");
            }
        }

        AiCommands::Recommend { skill, interests } => {
            let recommended = ai::recommend_jobs(api, &skill, interests.as_deref())?;
            if recommended.is_empty() {
                println!("No recommendations this time.");
            }
            for job in recommended {
                println!("\n{} — {} ({})", job.title, job.company, job.location);
                println!("Match: {}%  Skills: {}", job.match_score, job.skills.join(", "));
                if !job.description.is_empty() {
                    println!("{}", textwrap::fill(&job.description, 80));
                }
            }
        }

        AiCommands::CoverLetter { job_id, highlights } => {
            let job = jobs::get(api, &job_id)?;
            let letter =
                ai::generate_cover_letter(api, &job.title, &job.company.name, &highlights)?;
            println!("{}", textwrap::fill(&letter, 80));
        }

        AiCommands::SmartPost { prompt } => {
            let draft = ai::smart_job_post(api, &prompt)?;
            println!("{}", textwrap::fill(&draft, 80));
        }

        AiCommands::Chat { message } => {
            let reply = ai::chat(api, &message)?;
            println!("{}", textwrap::fill(&reply, 80));
        }
    }
    Ok(())
}

fn print_job_table(list: &[models::Job]) {
    println!(
        "{:<26} {:<30} {:<18} {:<14}",
        "ID", "TITLE", "COMPANY", "LOCATION"
    );
    println!("{}", "-".repeat(88));
    for job in list {
        println!(
            "{:<26} {:<30} {:<18} {:<14}",
            job.id,
            truncate(&job.title, 28),
            truncate(&job.company.name, 16),
            truncate(job.location.as_deref().unwrap_or("-"), 12)
        );
    }
}

fn print_list(label: &str, items: &[String]) {
    if items.is_empty() {
        return;
    }
    println!("\n{}:", label);
    for item in items {
        println!("  - {}", item);
    }
}

fn or_dash(s: &str) -> &str {
    if s.trim().is_empty() { "-" } else { s }
}

fn truncate(s: &str, max: usize) -> String {
    // Counts characters, not bytes: backend titles can be non-ASCII
    // and slicing at a byte offset would panic mid-character.
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let cut: String = s.chars().take(max.saturating_sub(3)).collect();
        format!("{}...", cut)
    }
}
