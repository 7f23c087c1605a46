use anyhow::Result;
use clap::{Parser, Subcommand};
use relo::api::ApiClient;
use relo::config::config;
use relo::logging;
use relo::session::SessionStore;
use relo::tui::{App, Route};
use std::io::{self, BufRead, Write};

#[derive(Parser, Debug)]
#[command(name = "relo")]
#[command(version = env!("RELO_VERSION"))]
#[command(about = "Terminal dashboard for the Relocate Me relocation planner")]
struct Args {
    /// Backend base URL (overrides config and $RELO_BACKEND_URL)
    #[arg(long, global = true)]
    backend: Option<String>,

    /// Page to open on launch (dashboard, progress, housing, employment,
    /// visa, resources, comparison, extensions). Unknown pages open the
    /// dashboard.
    #[arg(long)]
    page: Option<String>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Log in and persist a session token
    Login {
        /// Username (prompted when omitted)
        username: Option<String>,
    },

    /// Drop the persisted session
    Logout,

    /// Show whether a persisted session is still valid
    Status,

    /// Run the two-step demo password reset
    Reset {
        /// Username (prompted when omitted)
        username: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    logging::init();
    let args = Args::parse();

    let base_url = args
        .backend
        .clone()
        .unwrap_or_else(|| config().backend.base_url.clone());
    let mut api = ApiClient::new(&base_url)?;
    let mut session = SessionStore::open()?;

    match args.command {
        Some(Command::Login { username }) => cmd_login(&mut api, &mut session, username).await,
        Some(Command::Logout) => {
            session.logout(&mut api);
            println!("Logged out.");
            Ok(())
        }
        Some(Command::Status) => cmd_status(&mut api, &mut session).await,
        Some(Command::Reset { username }) => cmd_reset(&api, &session, username).await,
        None => run_tui(api, session, args.page.as_deref()).await,
    }
}

async fn run_tui(mut api: ApiClient, mut session: SessionStore, page: Option<&str>) -> Result<()> {
    // One restore attempt before the UI comes up; a stale token lands on the
    // login screen.
    session.restore(&mut api).await;

    let route = page.map(Route::parse).unwrap_or_default();
    let terminal = ratatui::init();
    let result = App::new(api, session, route).run(terminal).await;
    ratatui::restore();
    result
}

fn prompt(label: &str) -> Result<String> {
    print!("{}", label);
    io::stdout().flush()?;
    let mut line = String::new();
    io::stdin().lock().read_line(&mut line)?;
    Ok(line.trim().to_string())
}

async fn cmd_login(
    api: &mut ApiClient,
    session: &mut SessionStore,
    username: Option<String>,
) -> Result<()> {
    let username = match username {
        Some(u) => u,
        None => prompt("Username: ")?,
    };
    let password = prompt("Password: ")?;

    match session.login(api, &username, &password).await {
        Ok(()) => {
            println!(
                "Logged in as {}.",
                session.username().filter(|u| !u.is_empty()).unwrap_or(&username)
            );
            Ok(())
        }
        Err(e) => {
            logging::info(&format!("CLI login failed: {}", e));
            eprintln!("Invalid credentials. Please try again.");
            std::process::exit(1);
        }
    }
}

async fn cmd_status(api: &mut ApiClient, session: &mut SessionStore) -> Result<()> {
    if session.restore(api).await {
        println!(
            "Active session for {} ({})",
            session.username().unwrap_or(""),
            api.base_url()
        );
    } else {
        println!("No active session. Run `relo login` first.");
    }
    Ok(())
}

async fn cmd_reset(api: &ApiClient, session: &SessionStore, username: Option<String>) -> Result<()> {
    let username = match username {
        Some(u) => u,
        None => prompt("Username: ")?,
    };

    let code = match session.request_password_reset(api, &username).await {
        Ok(code) => code,
        Err(e) => {
            logging::info(&format!("Reset request failed: {}", e));
            eprintln!("Could not request a reset code.");
            std::process::exit(1);
        }
    };
    // Demo backend: the code comes straight back in the response
    println!("Reset code: {}", code);

    let entered = prompt("Enter reset code: ")?;
    let new_password = prompt("New password: ")?;

    match session
        .complete_password_reset(api, &username, &entered, &new_password)
        .await
    {
        Ok(()) => {
            println!("Password updated. You can log in now.");
            Ok(())
        }
        Err(e) => {
            eprintln!("Password reset failed: {}", e);
            std::process::exit(1);
        }
    }
}
