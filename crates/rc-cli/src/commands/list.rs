use comfy_table::{ContentArrangement, Table};

use crate::GlobalOpts;

pub fn run(opts: &GlobalOpts, selected_only: bool) -> Result<(), String> {
    let mut session = super::ready_session(opts)?;
    if selected_only {
        session.toggle_view();
    }

    let students = session.visible_students();
    if students.is_empty() {
        println!("  No students found.");
        return Ok(());
    }

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["ID", "Name", "Selected", "Last", "Image"]);

    for student in &students {
        let id = student.student_id;
        let selected = if session.selection().contains(id) { "✓" } else { "" };
        let last = if session.last_picked() == Some(id) { "★" } else { "" };
        table.add_row(vec![
            id.to_string(),
            student.name.clone(),
            selected.to_string(),
            last.to_string(),
            student.tile_image(),
        ]);
    }

    println!("{table}");
    println!();
    println!(
        "  {} students, {} selected",
        students.len(),
        session.selection().len()
    );

    Ok(())
}
