pub mod list;
pub mod pick;
pub mod toggle;

use colored::Colorize;
use tracing::warn;

use rc_core::Roster;
use rc_fetch::{ClientConfig, RosterClient, failure_notice, load_roster_file};
use rc_pick::{PickResult, PickerConfig, PickerSession};
use rc_store::FileStore;

use crate::GlobalOpts;

/// Session type used by every command.
pub type Session = PickerSession<FileStore>;

/// TUI session plus the feedback link shown on the error view.
pub struct TuiSession {
    pub session: Session,
    pub feedback_url: Option<String>,
}

fn client_config(opts: &GlobalOpts) -> ClientConfig {
    let config = ClientConfig::default().with_endpoint(&opts.endpoint);
    match &opts.feedback_url {
        Some(url) => config.with_feedback_url(url),
        None => config,
    }
}

/// Load the roster from the configured file or endpoint.
///
/// On failure, returns the static notice meant for the user.
fn load_roster(opts: &GlobalOpts) -> Result<Roster, String> {
    let config = client_config(opts);
    let loaded = match &opts.roster_file {
        Some(path) => load_roster_file(path),
        None => {
            let runtime = tokio::runtime::Builder::new_current_thread()
                .enable_all()
                .build()
                .map_err(|e| format!("cannot start runtime: {e}"))?;
            let client = RosterClient::new(config.clone());
            runtime.block_on(client.fetch())
        }
    };
    loaded.map_err(|e| failure_notice(&e, &config))
}

/// Open the persisted session state without loading the roster.
fn open_session(opts: &GlobalOpts) -> Result<Session, String> {
    let store = FileStore::open_or_recover(&opts.state)
        .map_err(|e| format!("cannot open state: {e}"))?;
    let config = match opts.seed {
        Some(seed) => PickerConfig::default().with_seed(seed),
        None => PickerConfig::default(),
    };
    Ok(PickerSession::new(store, config))
}

/// Open the session and load the roster; a fetch failure is fatal.
fn ready_session(opts: &GlobalOpts) -> Result<Session, String> {
    let mut session = open_session(opts)?;
    session.roster_loaded(load_roster(opts)?);
    Ok(session)
}

/// Open the session for the TUI. A fetch failure is shown inside the TUI.
pub fn open_tui_session(opts: &GlobalOpts) -> Result<TuiSession, String> {
    let mut session = open_session(opts)?;
    eprintln!("  Loading roster...");
    match load_roster(opts) {
        Ok(roster) => session.roster_loaded(roster),
        Err(notice) => {
            warn!("starting with an unavailable roster");
            session.roster_failed(notice);
        }
    }
    Ok(TuiSession {
        session,
        feedback_url: opts.feedback_url.clone(),
    })
}

/// Turn a recorded persistence failure into a command error.
fn check_persisted(session: &Session) -> Result<(), String> {
    match session.persist_error() {
        Some(e) => Err(format!("state not saved: {e}")),
        None => Ok(()),
    }
}

/// Print the result currently open in the session's display.
fn print_result(session: &Session) {
    let Some(result) = session.display().result() else {
        return;
    };

    println!("  {}", "Today's duty".bold());
    println!();
    match result {
        PickResult::Single(student) => {
            println!("  {}", student.name.green().bold());
            println!("  {}", student.portrait_image().dimmed());
        }
        PickResult::Multi(students) if students.is_empty() => {
            println!("  {}", "No students to show.".yellow());
        }
        PickResult::Multi(students) => {
            for (i, student) in students.iter().enumerate() {
                println!(
                    "  {:>2}. {}  {}",
                    i + 1,
                    student.name.green().bold(),
                    student.tile_image().dimmed()
                );
            }
        }
    }
}
