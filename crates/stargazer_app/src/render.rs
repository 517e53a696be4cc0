use stargazer_core::{AppViewModel, ContentView, RepoRowView, ViewMode};

const TITLE: &str = "Most Popular GitHub Repositories (sorted by total stars)";

/// Renders the whole screen as plain text.
pub fn render(view: &AppViewModel) -> String {
    let mut out = String::new();
    out.push_str(TITLE);
    out.push('\n');
    out.push_str(&status_line(view));
    out.push_str("\n\n");

    match &view.content {
        ContentView::Loading => out.push_str("Loading...\n"),
        ContentView::Error(message) => {
            out.push_str("Error: ");
            out.push_str(message);
            out.push('\n');
        }
        ContentView::Empty(message) => {
            out.push_str(message);
            out.push('\n');
        }
        ContentView::Table(rows) => {
            for row in rows {
                out.push_str(&render_row(row));
            }
        }
    }

    if view.show_pagination {
        out.push('\n');
        out.push_str(&pagination_line(view));
        out.push('\n');
    }
    out
}

fn status_line(view: &AppViewModel) -> String {
    let mode = match view.mode {
        ViewMode::Remote => "all repositories",
        ViewMode::Starred => "starred only",
    };
    let language = if view.language_filter.is_empty() {
        "any"
    } else {
        view.language_filter.as_str()
    };
    format!(
        "[{mode}] language: {language} | starred: {}",
        view.starred_count
    )
}

fn render_row(row: &RepoRowView) -> String {
    let marker = if row.starred { "★" } else { "☆" };
    let language = row.language.as_deref().unwrap_or("-");
    let mut line = format!(
        "{marker} {:>10}  {:>11}  {}  [{language}]\n",
        row.id,
        group_thousands(row.stars),
        row.full_name
    );
    if let Some(description) = row.description.as_deref().filter(|d| !d.is_empty()) {
        line.push_str(&format!("{:25}{description}\n", ""));
    }
    line.push_str(&format!("{:25}{}\n", "", row.html_url));
    line
}

fn pagination_line(view: &AppViewModel) -> String {
    let prev = if view.has_prev_page { "< prev (p)" } else { "  --      " };
    let next = if view.has_next_page { "next (n) >" } else { "      --  " };
    format!("{prev}   Page {}   {next}", view.page)
}

/// Formats `value` with `,` between thousands groups.
pub fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (index, ch) in digits.chars().enumerate() {
        if index > 0 && (digits.len() - index) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}
