use axum::{extract::State, response::Html};
use service::Teacher;

use crate::errors::{JsonApiError, Operation};
use crate::state::AppState;

/// HTML listing of every teacher.
pub async fn index(State(state): State<AppState>) -> Result<Html<String>, JsonApiError> {
    let teachers = state
        .store
        .list()
        .await
        .map_err(|e| JsonApiError::from_service(e, state.status_policy, Operation::Read))?;
    Ok(Html(render_listing(&teachers)))
}

pub fn render_listing(teachers: &[Teacher]) -> String {
    let mut rows = String::new();
    for t in teachers {
        rows.push_str(&format!(
            "      <tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>\n",
            t.id,
            escape_html(&t.full_name),
            t.age,
            escape_html(&t.dob),
            t.num_classes
        ));
    }
    if teachers.is_empty() {
        rows.push_str("      <tr><td colspan=\"5\">No teachers yet</td></tr>\n");
    }

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="utf-8">
  <title>Teachers</title>
</head>
<body>
  <h1>Teachers</h1>
  <table>
    <thead>
      <tr><th>ID</th><th>Full name</th><th>Age</th><th>Date of birth</th><th>Classes</th></tr>
    </thead>
    <tbody>
{rows}    </tbody>
  </table>
</body>
</html>
"#
    )
}

fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_are_escaped() {
        let t = Teacher {
            id: 3,
            full_name: "<script>alert('x')</script>".into(),
            age: 40,
            dob: "1984 & co".into(),
            num_classes: 2,
        };
        let html = render_listing(&[t]);
        assert!(html.contains("&lt;script&gt;alert(&#39;x&#39;)&lt;/script&gt;"));
        assert!(html.contains("<td>1984 &amp; co</td>"));
        assert!(!html.contains("<script>"));
    }

    #[test]
    fn empty_listing_has_placeholder_row() {
        let html = render_listing(&[]);
        assert!(html.contains("No teachers yet"));
        assert!(html.starts_with("<!DOCTYPE html>"));
    }
}
