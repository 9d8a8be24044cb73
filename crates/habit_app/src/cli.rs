use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use habit_core::habit::Frequency;

#[derive(Parser, Debug)]
#[command(name = "habits", version)]
#[command(about = "Local-first habit tracker with streaks, stats, badges, and a yearly heatmap")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Show today's habits with completion state and streaks (default)
    Today,
    /// List every habit with its metadata and totals
    List,
    /// List the starter templates available to `adopt`
    Templates,
    /// Add a new habit
    Add(AddArgs),
    /// Create a habit from a starter template
    Adopt {
        /// Template name, e.g. `water` or `reading`
        template: String,
    },
    /// Edit a habit's name, icon, category, frequency, or goal
    Edit(EditArgs),
    /// Delete a habit together with its completion history
    Delete {
        /// Habit id (see `list`)
        id: String,
    },
    /// Toggle a habit's completion for a day
    Toggle {
        /// Habit id (see `list`)
        id: String,
        /// Day to toggle, `YYYY-MM-DD` (default: today)
        #[arg(long)]
        date: Option<NaiveDate>,
    },
    /// Weekly and monthly completion charts
    Stats,
    /// Achievement badges and unlock progress
    Badges,
    /// One-year completion heatmap
    Heatmap {
        /// Restrict to a single habit id instead of all habits
        #[arg(long)]
        habit: Option<String>,
    },
    /// Show or set the colour theme (`light` or `dark`)
    Theme { value: Option<String> },
    /// Show or set the interface language
    Language { value: Option<String> },
}

#[derive(Args, Debug)]
pub struct AddArgs {
    /// Display name of the habit
    pub name: String,

    /// Single-glyph icon shown next to the name
    #[arg(long, default_value = "🏃")]
    pub icon: String,

    #[arg(long, default_value = "health")]
    pub category: String,

    /// daily, weekly, or monthly
    #[arg(long, default_value = "daily")]
    pub frequency: Frequency,

    /// Target number of days
    #[arg(long, default_value_t = 30)]
    pub goal: u32,
}

#[derive(Args, Debug)]
pub struct EditArgs {
    /// Habit id (see `list`)
    pub id: String,

    #[arg(long)]
    pub name: Option<String>,

    #[arg(long)]
    pub icon: Option<String>,

    #[arg(long)]
    pub category: Option<String>,

    /// daily, weekly, or monthly
    #[arg(long)]
    pub frequency: Option<Frequency>,

    #[arg(long)]
    pub goal: Option<u32>,
}
