use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use chrono::{Local, NaiveDate};
use clap::{Args, Parser, Subcommand};
use domain::models::{Expense, ExpenseDraft, ListRecord, Requisition, ReviewAction, StatusFilter};
use domain::services::ListEvent;
use expense_tracker_client::{
    config::Config,
    fetcher::RecordFetcher,
    logging::init_logging,
    review::HttpReviewGateway,
    screen::ListScreen,
    session::{FileSessionStore, SessionStore, USER_ID_KEY},
    source::HttpRecordSource,
    submit::ExpenseSubmitter,
};
use serde::Serialize;
use shared::dates::DateRange;
use shared::pagination::Paginator;
use std::str::FromStr;
use tracing::info;

#[derive(Parser)]
#[command(name = "expense-tracker", version, about = "Expense and requisition tracker client")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Store the signed-in user id in the local session
    Login {
        user_id: i64,
    },
    /// Clear the signed-in user
    Logout,
    /// List expense claims
    Expenses(ListArgs),
    /// List requisitions
    Requisitions(ListArgs),
    /// List requisitions awaiting review
    Manage(ListArgs),
    /// Approve a requisition
    Approve {
        id: String,
    },
    /// Reject a requisition
    Reject {
        id: String,
    },
    /// Submit an expense claim from a JSON draft
    Submit {
        #[arg(help = "Path to the draft JSON file")]
        draft: PathBuf,
    },
}

#[derive(Args)]
struct ListArgs {
    #[arg(long, help = "Case-insensitive text matched against employee, title and remarks")]
    search: Option<String>,

    #[arg(long, help = "Status label, or \"All\"")]
    status: Option<String>,

    #[arg(long, conflicts_with_all = ["last_month", "from", "to"], help = "Only records dated today")]
    today: bool,

    #[arg(long, conflicts_with_all = ["from", "to"], help = "Only records dated last calendar month")]
    last_month: bool,

    #[arg(long, requires = "to", help = "Range start (YYYY-MM-DD)")]
    from: Option<NaiveDate>,

    #[arg(long, requires = "from", help = "Range end (YYYY-MM-DD)")]
    to: Option<NaiveDate>,

    #[arg(long, default_value_t = 1)]
    page: usize,

    #[arg(long, help = "Print the page as JSON")]
    json: bool,
}

impl ListArgs {
    fn date_range(&self) -> Result<Option<DateRange>> {
        let today = Local::now().date_naive();
        if self.today {
            return Ok(Some(DateRange::today(today)));
        }
        if self.last_month {
            return Ok(Some(DateRange::last_month(today)));
        }
        match (self.from, self.to) {
            (Some(start), Some(end)) => Ok(Some(DateRange::new(start, end)?)),
            _ => Ok(None),
        }
    }
}

#[derive(Serialize)]
struct PageOutput<'a, V> {
    items: Vec<&'a V>,
    page: usize,
    page_count: usize,
    filtered_total: usize,
    total: usize,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let config = Config::load().context("Failed to load configuration")?;

    init_logging(&config.logging);

    let session = FileSessionStore::new(&config.session.path);
    let fetcher = Arc::new(RecordFetcher::new(config.api.clone())?);
    let paginator = Paginator::new(config.list.page_size)?;

    match cli.command {
        Commands::Login { user_id } => {
            session.set(USER_ID_KEY, &user_id.to_string()).await?;
            info!(user_id, "Signed in");
            println!("Signed in as user {user_id}");
        }
        Commands::Logout => {
            session.remove(USER_ID_KEY).await?;
            println!("Signed out");
        }
        Commands::Expenses(args) => {
            let source = HttpRecordSource::expenses(fetcher);
            let screen = ListScreen::new("expenses", Arc::new(source), paginator);
            show_list(&screen, &args, expense_row).await?;
        }
        Commands::Requisitions(args) => {
            let source = HttpRecordSource::requisitions(fetcher);
            let screen = ListScreen::new("requisitions", Arc::new(source), paginator);
            show_list(&screen, &args, requisition_row).await?;
        }
        Commands::Manage(args) => {
            let source = HttpRecordSource::managed_requisitions(fetcher);
            let screen = ListScreen::new("manage", Arc::new(source), paginator);
            show_list(&screen, &args, requisition_row).await?;
        }
        Commands::Approve { id } => {
            review(&fetcher, &session, paginator, &id, ReviewAction::Approve).await?;
        }
        Commands::Reject { id } => {
            review(&fetcher, &session, paginator, &id, ReviewAction::Reject).await?;
        }
        Commands::Submit { draft } => {
            let contents = tokio::fs::read_to_string(&draft)
                .await
                .with_context(|| format!("Failed to read {}", draft.display()))?;
            let draft: ExpenseDraft =
                serde_json::from_str(&contents).context("Draft is not valid JSON")?;

            let message = ExpenseSubmitter::new(&fetcher)
                .submit(draft, &session)
                .await?;
            println!("{message}");
        }
    }

    Ok(())
}

async fn show_list<V>(
    screen: &ListScreen<V>,
    args: &ListArgs,
    row: fn(&V) -> String,
) -> Result<()>
where
    V: ListRecord + Serialize,
    V::Status: FromStr<Err = domain::models::status::UnknownStatus>,
{
    screen.refresh().await?;

    if let Some(query) = &args.search {
        screen.dispatch(ListEvent::QueryChanged(query.clone())).await;
    }
    if let Some(status) = &args.status {
        let filter = StatusFilter::<V::Status>::from_str(status)?;
        screen.dispatch(ListEvent::StatusFilterChanged(filter)).await;
    }
    if let Some(range) = args.date_range()? {
        screen.dispatch(ListEvent::DateRangeChanged(Some(range))).await;
    }
    screen.dispatch(ListEvent::GoToPage(args.page)).await;
    let filtered = screen.snapshot().await.filter().is_active();

    screen
        .with_view(|view| -> Result<()> {
            if args.json {
                let output = PageOutput {
                    items: view.items.clone(),
                    page: view.page,
                    page_count: view.page_count,
                    filtered_total: view.filtered_total,
                    total: view.total,
                };
                println!("{}", serde_json::to_string_pretty(&output)?);
                return Ok(());
            }

            if view.is_empty() {
                if filtered {
                    println!("No records match the current filters");
                } else {
                    println!("No records found");
                }
            }
            for item in &view.items {
                println!("{}", row(item));
            }
            println!(
                "Page {} of {} ({} of {} records)",
                view.page, view.page_count, view.filtered_total, view.total
            );
            Ok(())
        })
        .await
}

async fn review(
    fetcher: &Arc<RecordFetcher>,
    session: &FileSessionStore,
    paginator: Paginator,
    id: &str,
    action: ReviewAction,
) -> Result<()> {
    let source = HttpRecordSource::managed_requisitions(fetcher.clone());
    let screen = ListScreen::new("manage", Arc::new(source), paginator);
    screen.refresh().await?;

    let gateway = HttpReviewGateway::new(fetcher);
    let message = screen.review(&gateway, session, id, action).await?;
    println!("{message}");

    let state = screen.snapshot().await;
    if let Some(record) = state.records().iter().find(|r| r.id() == id) {
        println!("{}", requisition_row(record));
    }
    Ok(())
}

fn expense_row(e: &Expense) -> String {
    format!(
        "{:>6}  {:<20}  {:<28}  {:<15}  {:>10.2}  {:<12}  {:<10}  {}: {}",
        e.id,
        e.employee,
        e.title,
        e.expense_type,
        e.amount,
        e.display_date,
        e.status,
        e.reviewer_heading(),
        e.reviewer(),
    )
}

fn requisition_row(r: &Requisition) -> String {
    format!(
        "{:>6}  {:<20}  {:<28}  {:<18}  {:<12}  {:<18}  {}",
        r.id, r.employee, r.title, r.requisition_type, r.display_date, r.status, r.comment
    )
}
