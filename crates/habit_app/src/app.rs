use std::path::PathBuf;

use anyhow::{anyhow, Context, Result};
use chrono::{Local, NaiveDate, Utc};
use habit_core::habit::{template, HabitDraft, HabitId};
use habit_core::prefs::{Theme, SUPPORTED_LANGUAGES};
use habit_core::storage::FileStore;
use habit_core::HabitService;
use tracing::info;

use crate::cli::{AddArgs, Command, EditArgs};
use crate::views;

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub data_file: PathBuf,
}

impl AppConfig {
    pub fn from_env() -> Result<Self> {
        if let Ok(path) = std::env::var("HABIT_DATA_FILE") {
            return Ok(Self {
                data_file: PathBuf::from(path),
            });
        }
        let base = dirs::data_dir()
            .ok_or_else(|| anyhow!("no user data directory available; set HABIT_DATA_FILE"))?;
        Ok(Self {
            data_file: base.join("habits").join("data.json"),
        })
    }
}

pub fn run(config: AppConfig, command: Command) -> Result<()> {
    info!(data_file = %config.data_file.display(), "opening habit data");
    let storage = FileStore::open(&config.data_file)
        .with_context(|| format!("unable to open {}", config.data_file.display()))?;
    let service = HabitService::builder()
        .with_storage(Box::new(storage))
        .build()
        .context("failed to initialize habit service")?;

    let today = Local::now().date_naive();
    match command {
        Command::Today => print!("{}", views::today_view(&service, today)),
        Command::List => print!("{}", views::list_view(&service, today)),
        Command::Templates => print!("{}", views::templates_view()),
        Command::Add(args) => add_habit(&service, args)?,
        Command::Adopt { template } => adopt_template(&service, &template)?,
        Command::Edit(args) => edit_habit(&service, args)?,
        Command::Delete { id } => delete_habit(&service, &id)?,
        Command::Toggle { id, date } => toggle(&service, &id, date.unwrap_or(today))?,
        Command::Stats => {
            print!("{}", views::weekly_view(&service.weekly_stats(today)));
            println!();
            print!("{}", views::monthly_view(&service.monthly_stats(today)));
        }
        Command::Badges => print!("{}", views::badges_view(&service, today)),
        Command::Heatmap { habit } => heatmap(&service, habit.as_deref(), today)?,
        Command::Theme { value } => theme(&service, value.as_deref())?,
        Command::Language { value } => language(&service, value.as_deref())?,
    }

    if let Some(err) = service.last_save_error() {
        eprintln!("warning: changes were not saved ({err}); they apply to this session only");
    }
    Ok(())
}

fn add_habit(service: &HabitService, args: AddArgs) -> Result<()> {
    let id = service.add_habit(
        HabitDraft {
            name: args.name.clone(),
            icon: args.icon,
            category: args.category,
            frequency: args.frequency,
            goal: args.goal,
        },
        Utc::now(),
    );
    println!("Added {} (id {id}).", args.name);
    mark_onboarded(service);
    Ok(())
}

fn adopt_template(service: &HabitService, name: &str) -> Result<()> {
    let template = template(name)
        .ok_or_else(|| anyhow!("unknown template `{name}`; see `habits templates`"))?;
    let id = service.adopt_template(template, Utc::now());
    println!("Added {} {} (id {id}).", template.icon, template.label);
    mark_onboarded(service);
    Ok(())
}

/// Creating the first habit counts as finishing the first-run guidance.
fn mark_onboarded(service: &HabitService) {
    if service.onboarding_dismissed() {
        return;
    }
    if let Err(err) = service.dismiss_onboarding() {
        tracing::debug!(%err, "unable to record onboarding dismissal");
    }
}

fn edit_habit(service: &HabitService, args: EditArgs) -> Result<()> {
    let id = HabitId::from(args.id.as_str());
    let habit = service
        .habit(&id)
        .ok_or_else(|| anyhow!("unknown habit {id}"))?;
    let draft = HabitDraft {
        name: args.name.unwrap_or(habit.name),
        icon: args.icon.unwrap_or(habit.icon),
        category: args.category.unwrap_or(habit.category),
        frequency: args.frequency.unwrap_or(habit.frequency),
        goal: args.goal.unwrap_or(habit.goal),
    };
    service.update_habit(&id, draft)?;
    println!("Updated habit {id}.");
    Ok(())
}

fn delete_habit(service: &HabitService, id: &str) -> Result<()> {
    let id = HabitId::from(id);
    service.delete_habit(&id)?;
    println!("Deleted habit {id} and its completion history.");
    Ok(())
}

fn toggle(service: &HabitService, id: &str, date: NaiveDate) -> Result<()> {
    let id = HabitId::from(id);
    let done = service.toggle_completion(&id, date)?;
    let habit = service.habit(&id).map(|habit| habit.name);
    let name = habit.as_deref().unwrap_or("habit");
    if done {
        println!("Marked {name} done for {date}.");
    } else {
        println!("Cleared {name} for {date}.");
    }
    Ok(())
}

fn heatmap(service: &HabitService, habit: Option<&str>, today: NaiveDate) -> Result<()> {
    let id = habit.map(HabitId::from);
    if let Some(id) = &id {
        if service.habit(id).is_none() {
            return Err(anyhow!("unknown habit {id}"));
        }
    }
    let cells = service.heatmap(id.as_ref(), today);
    print!("{}", views::heatmap_view(&cells));
    Ok(())
}

fn theme(service: &HabitService, value: Option<&str>) -> Result<()> {
    match value {
        None => println!("{}", service.theme().as_str()),
        Some(raw) => {
            let theme =
                Theme::parse(raw).ok_or_else(|| anyhow!("unknown theme `{raw}`; use light or dark"))?;
            service.set_theme(theme)?;
            println!("Theme set to {}.", theme.as_str());
        }
    }
    Ok(())
}

fn language(service: &HabitService, value: Option<&str>) -> Result<()> {
    match value {
        None => println!("{}", service.language()),
        Some(code) => {
            service.set_language(code).with_context(|| {
                format!("supported languages: {}", SUPPORTED_LANGUAGES.join(", "))
            })?;
            println!("Language set to {code}.");
        }
    }
    Ok(())
}
