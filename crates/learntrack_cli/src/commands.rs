//! Subcommand handlers.

use chrono::NaiveDate;
use clap::{Args, Subcommand};
use learntrack_core::{
    average_overall, deduplicated_history, dimension_radar, format_score, latest_radar_snapshot,
    recent_series, CoreConfig, DimensionKey, ProfileService, RadarPoint, SqliteStudentStore,
    StoreError, UpsertAction,
};
use log::info;
use rusqlite::Connection;
use std::error::Error;
use uuid::Uuid;

type CommandResult = Result<(), Box<dyn Error>>;

#[derive(Subcommand)]
pub enum StudentCommand {
    /// Create a student profile
    Add {
        #[arg(long)]
        name: String,
        #[arg(long)]
        grade: String,
    },
    /// List student profiles
    List,
    /// Delete a student and all of its assessments
    Remove { id: Uuid },
}

#[derive(Args)]
pub struct AssessArgs {
    pub student: Uuid,
    /// Calendar date of the assessment; defaults to today
    #[arg(long)]
    pub date: Option<NaiveDate>,
    /// Id of the stored assessment to edit
    #[arg(long)]
    pub edit: Option<Uuid>,
    /// Rating edit, repeatable; value 0 clears the indicator
    #[arg(long = "rate", value_name = "DIM.SUB.IND=VALUE")]
    pub rates: Vec<String>,
    #[arg(long)]
    pub strengths: Option<String>,
    #[arg(long)]
    pub improvements: Option<String>,
    #[arg(long)]
    pub next_steps: Option<String>,
}

/// One CLI invocation bound to an open store.
pub struct Session<'conn> {
    service: ProfileService<SqliteStudentStore<'conn>>,
    trend_window: usize,
}

impl<'conn> Session<'conn> {
    pub fn open(conn: &'conn Connection, config: &CoreConfig) -> Result<Self, StoreError> {
        let store = SqliteStudentStore::try_new(conn)?;
        Ok(Self {
            service: ProfileService::open(store, config.day_policy),
            trend_window: config.trend_window,
        })
    }

    pub fn student(&mut self, action: StudentCommand) -> CommandResult {
        match action {
            StudentCommand::Add { name, grade } => {
                let student = self.service.add_student(name, grade)?;
                println!("{}\t{}\t{}", student.id, student.name, student.grade);
            }
            StudentCommand::List => {
                for student in self.service.students() {
                    println!(
                        "{}\t{}\t{}\tassessments={}",
                        student.id,
                        student.name,
                        student.grade,
                        student.assessments.len()
                    );
                }
            }
            StudentCommand::Remove { id } => {
                let removed = self.service.remove_student(id)?;
                println!(
                    "removed {} ({} assessments)",
                    removed.id,
                    removed.assessments.len()
                );
            }
        }
        Ok(())
    }

    pub fn assess(&mut self, args: AssessArgs) -> CommandResult {
        let policy = self.service.day_policy();
        let mut draft = match args.edit {
            Some(id) => self.service.begin_edit(args.student, id)?,
            None => self.service.begin_assessment(args.student, None)?,
        };
        if let Some(day) = args.date {
            draft.date = policy.start_of_day(day);
        }

        for raw in &args.rates {
            let (dimension, sub_dimension, indicator, value) = parse_rate(raw)?;
            draft
                .scores
                .apply_edit(dimension, sub_dimension, indicator, value)?;
        }
        if let Some(strengths) = args.strengths {
            draft.feedback.strengths = strengths;
        }
        if let Some(improvements) = args.improvements {
            draft.feedback.improvements = improvements;
        }
        if let Some(next_steps) = args.next_steps {
            draft.feedback.next_steps = next_steps;
        }

        let outcome = self.service.save_assessment(args.student, &draft, args.edit)?;
        info!(
            "event=cli_assess module=cli status=ok rates={}",
            args.rates.len()
        );

        let saved = &outcome.assessment;
        let action = match outcome.action {
            UpsertAction::Appended => "created".to_string(),
            UpsertAction::Overwritten => "updated".to_string(),
            UpsertAction::MergedIntoExisting { removed } => format!("merged (removed {removed})"),
        };
        let progress = saved.scores.progress();
        println!(
            "{action} {} on {} overall={} rated={}/{}",
            saved.id,
            policy.calendar_day(saved.date),
            format_score(average_overall(&saved.scores)),
            progress.rated,
            progress.total
        );
        for dropped in &outcome.dropped_duplicates {
            println!("dropped duplicate {dropped}");
        }
        Ok(())
    }

    pub fn history(&self, student_id: Uuid) -> CommandResult {
        let policy = self.service.day_policy();
        let student = self.service.student(student_id)?;
        for assessment in deduplicated_history(&student.assessments, policy) {
            println!(
                "{}\t{}\toverall={}",
                policy.calendar_day(assessment.date),
                assessment.id,
                format_score(average_overall(&assessment.scores))
            );
        }
        Ok(())
    }

    pub fn trend(&self, student_id: Uuid, limit: Option<usize>) -> CommandResult {
        let policy = self.service.day_policy();
        let student = self.service.student(student_id)?;
        let limit = limit.unwrap_or(self.trend_window);
        for point in recent_series(&student.assessments, limit) {
            let dimensions = point
                .dimensions
                .iter()
                .map(|(dimension, value)| format!("{}={}", dimension.key(), format_score(value)))
                .collect::<Vec<_>>()
                .join(" ");
            println!(
                "{}\t{}\toverall={}",
                policy.calendar_day(point.date),
                dimensions,
                format_score(point.overall)
            );
        }
        Ok(())
    }

    pub fn radar(&self, student_id: Uuid, dimension: Option<&str>) -> CommandResult {
        let points = match dimension {
            Some(key) => {
                let dimension = DimensionKey::parse(key)?;
                match self.service.latest_assessment(student_id)? {
                    Some(latest) => dimension_radar(latest, dimension),
                    None => Vec::new(),
                }
            }
            None => latest_radar_snapshot(&self.service.student(student_id)?.assessments),
        };

        if points.is_empty() {
            println!("no assessments");
        }
        for point in points {
            print_radar_point(&point);
        }
        Ok(())
    }
}

pub fn print_taxonomy() {
    for dimension in DimensionKey::ALL {
        println!("{}\t{}", dimension.key(), dimension.label());
        for sub_dimension in dimension.sub_dimensions() {
            println!("  {}\t{}", sub_dimension.key(), sub_dimension.label());
            for indicator in sub_dimension.indicators() {
                println!("    {}\t{}", indicator.key(), indicator.label());
            }
        }
    }
}

fn print_radar_point(point: &RadarPoint) {
    println!(
        "{}\t{}\t{}/{}",
        point.node.key(),
        point.label,
        format_score(point.value),
        format_score(point.full_mark)
    );
}

/// Splits `dim.sub.ind=value`.
fn parse_rate(raw: &str) -> Result<(&str, &str, &str, i64), Box<dyn Error>> {
    let invalid = || format!("invalid --rate `{raw}`; expected DIM.SUB.IND=VALUE");

    let (path, value) = raw.split_once('=').ok_or_else(invalid)?;
    let mut parts = path.trim().splitn(3, '.');
    let (Some(dimension), Some(sub_dimension), Some(indicator)) =
        (parts.next(), parts.next(), parts.next())
    else {
        return Err(invalid().into());
    };
    let value = value.trim().parse::<i64>().map_err(|_| invalid())?;
    Ok((dimension, sub_dimension, indicator, value))
}
