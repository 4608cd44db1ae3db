use colored::Colorize;

use rc_pick::{EngineResult, PickSignal};

use super::Session;
use crate::GlobalOpts;

pub fn run_one(opts: &GlobalOpts) -> Result<(), String> {
    run_with(opts, |s| s.pick_one())
}

pub fn run_many(opts: &GlobalOpts, count: usize) -> Result<(), String> {
    run_with(opts, |s| s.pick_many(count))
}

pub fn run_one_from_all(opts: &GlobalOpts) -> Result<(), String> {
    run_with(opts, |s| s.pick_one_from_all())
}

pub fn run_many_from_all(opts: &GlobalOpts, count: usize) -> Result<(), String> {
    run_with(opts, |s| s.pick_many_from_all(count))
}

fn run_with(
    opts: &GlobalOpts,
    action: impl FnOnce(&mut Session) -> EngineResult<PickSignal>,
) -> Result<(), String> {
    let mut session = super::ready_session(opts)?;

    match action(&mut session).map_err(|e| e.to_string())? {
        PickSignal::NoOp => {
            println!("  Nothing to pick.");
            return Ok(());
        }
        PickSignal::OpenedClamped {
            requested,
            available,
        } => {
            println!(
                "  {}",
                format!("Only {available} students available; picking {available} instead of {requested}.")
                    .yellow()
            );
        }
        PickSignal::Opened => {}
    }

    super::print_result(&session);
    super::check_persisted(&session)
}
