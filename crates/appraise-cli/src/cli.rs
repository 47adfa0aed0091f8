//! Command definitions and their handlers.
//!
//! Each command has a clap argument struct that converts into the matching
//! core parameter type, so the core stays free of clap derives:
//!
//! ```text
//! User Input → CLI Args (clap) → Core Params → ReviewService
//! ```
//!
//! [`Cli`] runs the converted request against the service and renders the
//! result as markdown.

use anyhow::{Context, Result};
use appraise_core::{
    models::{PlanStatus, ReviewAction, Role},
    params::{ApplyAction, CreatePlan, Id, ListPlans, SubmitPlan},
    ReviewService,
};
use clap::{Args, Subcommand, ValueEnum};
use jiff::civil::Date;
use log::debug;

use crate::{
    display::{OperationStatus, PlanSummaries, SnapshotView},
    renderer::TerminalRenderer,
};

/// Create a new plan in draft
///
/// The review period defaults to the whole calendar year.
#[derive(Args)]
pub struct CreatePlanArgs {
    /// Title of the plan
    pub title: String,
    #[arg(long, help = "Identity of the employee who owns the plan")]
    pub employee: String,
    #[arg(long, help = "Identity of the supervising manager")]
    pub supervisor: String,
    #[arg(
        long,
        help = "Identity of the reviewer giving final approval; omit for supervisor-only review"
    )]
    pub reviewer: Option<String>,
    #[arg(long, help = "Performance year the plan covers")]
    pub year: i16,
    #[arg(long, help = "First day of the review period (YYYY-MM-DD)")]
    pub start: Option<Date>,
    #[arg(long, help = "Last day of the review period (YYYY-MM-DD)")]
    pub end: Option<Date>,
}

impl TryFrom<CreatePlanArgs> for CreatePlan {
    type Error = jiff::Error;

    fn try_from(val: CreatePlanArgs) -> std::result::Result<Self, Self::Error> {
        let period_start = match val.start {
            Some(start) => start,
            None => Date::new(val.year, 1, 1)?,
        };
        let period_end = match val.end {
            Some(end) => end,
            None => Date::new(val.year, 12, 31)?,
        };
        Ok(CreatePlan {
            employee_id: val.employee,
            supervisor_id: val.supervisor,
            reviewer_id: val.reviewer,
            title: val.title,
            year: val.year,
            period_start,
            period_end,
        })
    }
}

/// List plans, most recently updated first
#[derive(Args)]
pub struct ListPlansArgs {
    #[arg(short, long, help = "Only plans in this status")]
    pub status: Option<StatusArg>,
    #[arg(long, help = "Only plans owned by this employee")]
    pub employee: Option<String>,
    #[arg(long, help = "Only plans supervised by this identity")]
    pub supervisor: Option<String>,
    #[arg(long, help = "Only plans assigned to this reviewer")]
    pub reviewer: Option<String>,
    #[arg(short, long, help = "Only plans for this performance year")]
    pub year: Option<i16>,
}

impl From<ListPlansArgs> for ListPlans {
    fn from(val: ListPlansArgs) -> Self {
        ListPlans {
            status: val.status.map(PlanStatus::from),
            employee_id: val.employee,
            supervisor_id: val.supervisor,
            reviewer_id: val.reviewer,
            year: val.year,
        }
    }
}

/// Show a plan with its comment history and approvals
#[derive(Args)]
pub struct ShowPlanArgs {
    #[arg(help = "Unique identifier of the plan to show")]
    pub id: u64,
    #[arg(long, help = "Print the snapshot as JSON instead of markdown")]
    pub json: bool,
    #[arg(long, help = "Also list the actions this identity may currently take")]
    pub actor: Option<String>,
}

impl From<&ShowPlanArgs> for Id {
    fn from(val: &ShowPlanArgs) -> Self {
        Id { id: val.id }
    }
}

/// Submit a draft, or resubmit a plan sent back for revision
#[derive(Args)]
pub struct SubmitPlanArgs {
    #[arg(help = "Unique identifier of the plan to submit")]
    pub id: u64,
    #[arg(long, help = "Identity of the submitting employee")]
    pub actor: String,
}

impl From<SubmitPlanArgs> for SubmitPlan {
    fn from(val: SubmitPlanArgs) -> Self {
        SubmitPlan {
            plan_id: val.id,
            actor_id: val.actor,
        }
    }
}

#[derive(Subcommand)]
pub enum PlanCommands {
    /// Create a new plan in draft
    #[command(alias = "c")]
    Create(CreatePlanArgs),
    /// List plans
    #[command(aliases = ["l", "ls"])]
    List(ListPlansArgs),
    /// Show a plan with its comment history and approvals
    #[command(alias = "s")]
    Show(ShowPlanArgs),
    /// Submit a plan for review
    Submit(SubmitPlanArgs),
}

/// Act on a plan as its supervisor or reviewer
///
/// A comment body is required for `comment` and `request-changes`; it is
/// optional for `approve` and `final-approve`.
#[derive(Args)]
pub struct ReviewArgs {
    #[arg(help = "Unique identifier of the plan to act on")]
    pub id: u64,
    #[arg(long, help = "Identity of the acting supervisor or reviewer")]
    pub actor: String,
    #[arg(long, help = "Display name recorded with the comment; defaults to the identity")]
    pub name: Option<String>,
    #[arg(long, help = "Role the actor is acting in")]
    pub role: RoleArg,
    #[arg(long, help = "Action to take")]
    pub action: ActionArg,
    #[arg(short, long, default_value = "", help = "Comment text")]
    pub body: String,
}

impl From<ReviewArgs> for ApplyAction {
    fn from(val: ReviewArgs) -> Self {
        ApplyAction {
            plan_id: val.id,
            actor_name: val.name.unwrap_or_default(),
            actor_id: val.actor,
            role: val.role.into(),
            action: val.action.into(),
            body: val.body,
        }
    }
}

/// Plan status values accepted by `--status`
#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
pub enum StatusArg {
    Draft,
    Submitted,
    #[value(alias = "supervisor_review")]
    SupervisorReview,
    #[value(alias = "reviewer_assessment")]
    ReviewerAssessment,
    #[value(alias = "revision_requested")]
    RevisionRequested,
    Approved,
}

impl From<StatusArg> for PlanStatus {
    fn from(val: StatusArg) -> Self {
        match val {
            StatusArg::Draft => PlanStatus::Draft,
            StatusArg::Submitted => PlanStatus::Submitted,
            StatusArg::SupervisorReview => PlanStatus::SupervisorReview,
            StatusArg::ReviewerAssessment => PlanStatus::ReviewerAssessment,
            StatusArg::RevisionRequested => PlanStatus::RevisionRequested,
            StatusArg::Approved => PlanStatus::Approved,
        }
    }
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
pub enum RoleArg {
    Supervisor,
    Reviewer,
}

impl From<RoleArg> for Role {
    fn from(val: RoleArg) -> Self {
        match val {
            RoleArg::Supervisor => Role::Supervisor,
            RoleArg::Reviewer => Role::Reviewer,
        }
    }
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
pub enum ActionArg {
    /// Add a remark to your ledger
    Comment,
    /// Supervisor sign-off
    Approve,
    /// Send the plan back to the employee
    #[value(alias = "request_changes")]
    RequestChanges,
    /// Reviewer sign-off, completing the review
    #[value(alias = "final_approve")]
    FinalApprove,
}

impl From<ActionArg> for ReviewAction {
    fn from(val: ActionArg) -> Self {
        match val {
            ActionArg::Comment => ReviewAction::Comment,
            ActionArg::Approve => ReviewAction::Approve,
            ActionArg::RequestChanges => ReviewAction::RequestChanges,
            ActionArg::FinalApprove => ReviewAction::FinalApprove,
        }
    }
}

/// Runs parsed commands against a [`ReviewService`].
pub struct Cli {
    service: ReviewService,
    renderer: TerminalRenderer,
}

impl Cli {
    pub fn new(service: ReviewService, renderer: TerminalRenderer) -> Self {
        Self { service, renderer }
    }

    pub async fn handle_plan_command(&self, command: PlanCommands) -> Result<()> {
        match command {
            PlanCommands::Create(args) => self.create_plan(args).await,
            PlanCommands::List(args) => self.list_plans(&args.into()).await,
            PlanCommands::Show(args) => self.show_plan(&args).await,
            PlanCommands::Submit(args) => self.submit_plan(args.into()).await,
        }
    }

    pub async fn handle_review(&self, args: ReviewArgs) -> Result<()> {
        let request = ApplyAction::from(args);
        debug!(
            "Applying {} as {} to plan {}",
            request.action, request.role, request.plan_id
        );
        let snapshot = self
            .service
            .apply_action(&request)
            .await
            .context("Failed to apply review action")?;

        let mut output = OperationStatus::success(format!(
            "Recorded {} by {} on plan {}; plan is now {}",
            request.action,
            request.author_name(),
            request.plan_id,
            snapshot.status()
        ))
        .to_string();
        output.push_str(
            &SnapshotView::new(&snapshot)
                .for_viewer(Some(&request.actor_id))
                .to_string(),
        );
        self.renderer.render(&output)
    }

    pub async fn list_plans(&self, params: &ListPlans) -> Result<()> {
        let plans = self
            .service
            .list_plans(params)
            .await
            .context("Failed to list plans")?;
        self.renderer.render(&PlanSummaries(plans).to_string())
    }

    async fn create_plan(&self, args: CreatePlanArgs) -> Result<()> {
        let params = CreatePlan::try_from(args).context("Invalid review period")?;
        let snapshot = self
            .service
            .create_plan(&params)
            .await
            .context("Failed to create plan")?;

        let mut output =
            OperationStatus::success(format!("Created plan {}", snapshot.plan.id)).to_string();
        output.push_str(&SnapshotView::new(&snapshot).to_string());
        self.renderer.render(&output)
    }

    async fn show_plan(&self, args: &ShowPlanArgs) -> Result<()> {
        let snapshot = self
            .service
            .get_plan_snapshot(&Id::from(args))
            .await
            .context("Failed to load plan")?;

        if args.json {
            println!("{}", serde_json::to_string_pretty(&snapshot)?);
            return Ok(());
        }
        self.renderer.render(
            &SnapshotView::new(&snapshot)
                .for_viewer(args.actor.as_deref())
                .to_string(),
        )
    }

    async fn submit_plan(&self, params: SubmitPlan) -> Result<()> {
        let snapshot = self
            .service
            .submit_plan(&params)
            .await
            .context("Failed to submit plan")?;

        self.renderer.render(
            &OperationStatus::success(format!(
                "Submitted plan {} (round {}); plan is now {}",
                snapshot.plan.id,
                snapshot.plan.round,
                snapshot.status()
            ))
            .to_string(),
        )
    }
}
