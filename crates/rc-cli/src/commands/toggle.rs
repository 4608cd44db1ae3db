use colored::Colorize;

use rc_core::StudentId;

use crate::GlobalOpts;

pub fn run(opts: &GlobalOpts, ids: &[i64]) -> Result<(), String> {
    let mut session = super::ready_session(opts)?;

    for &raw in ids {
        let id = StudentId(raw);
        let selected = session.toggle(id).map_err(|e| e.to_string())?;
        let name = session
            .roster()
            .and_then(|r| r.get(id))
            .map(|s| s.name.clone())
            .unwrap_or_else(|| "(not in roster)".to_string());
        let state = if selected {
            "selected".green()
        } else {
            "deselected".yellow()
        };
        println!("  {id} {name}: {state}");
    }
    println!("  {} selected", session.selection().len());

    super::check_persisted(&session)
}
