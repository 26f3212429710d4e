//! Server-Side HTML
//!
//! Renders the list page the frontend enhances. The markup contract the
//! WASM layer depends on: `#task-container` holding `.task` entries,
//! `.check[data-todo-id]` and `.title` carrying the `completed` class,
//! and `#load-more[data-next-page]` while more pages remain.

use std::fmt::Write;

use crate::domain::{Stats, Todo, TodoFilter};

/// Everything the list page needs
#[derive(Debug)]
pub struct ListPage<'a> {
    pub todos: &'a [Todo],
    pub stats: Stats,
    pub filter: TodoFilter,
    pub next_page: Option<i64>,
}

pub fn render_list_page(page: &ListPage) -> String {
    let mut html = String::with_capacity(4096);
    html.push_str(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n\
         <meta charset=\"utf-8\">\n\
         <meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n\
         <title>Todos</title>\n\
         <link rel=\"stylesheet\" href=\"/static/css/todos.css\">\n\
         </head>\n<body>\n",
    );

    render_header(&mut html, page);

    html.push_str("<main>\n<div id=\"task-container\">\n");
    for todo in page.todos {
        render_task(&mut html, todo);
    }
    html.push_str("</div>\n");

    if let Some(next_page) = page.next_page {
        let _ = writeln!(
            html,
            "<button id=\"load-more\" data-next-page=\"{next_page}\">Load more</button>"
        );
    }
    html.push_str("</main>\n");

    html.push_str(
        "<script type=\"module\">\
         import init from \"/static/pkg/todos_ui.js\"; init();\
         </script>\n</body>\n</html>\n",
    );
    html
}

fn render_header(html: &mut String, page: &ListPage) {
    let stats = page.stats;
    html.push_str("<header class=\"stats\">\n<h1>Todos</h1>\n<nav class=\"filters\">\n");
    for filter in [TodoFilter::All, TodoFilter::Todo, TodoFilter::Complete] {
        let class = if filter == page.filter {
            " class=\"active\""
        } else {
            ""
        };
        let _ = writeln!(
            html,
            "<a href=\"/?filter={param}\"{class}>{param}</a>",
            param = filter.as_param(),
        );
    }
    html.push_str("</nav>\n");
    let _ = writeln!(
        html,
        "<p class=\"counts\">{total} tasks &middot; {completed} done &middot; {uncompleted} open</p>",
        total = stats.total,
        completed = stats.completed,
        uncompleted = stats.uncompleted,
    );
    html.push_str("</header>\n");
}

fn render_task(html: &mut String, todo: &Todo) {
    let state = if todo.completed { " completed" } else { "" };
    let _ = writeln!(
        html,
        "<div class=\"task\">\
         <span class=\"check{state}\" data-todo-id=\"{uuid}\"></span>\
         <span class=\"avatar avatar-{image}\"></span>\
         <span class=\"title{state}\">{title}</span>\
         </div>",
        uuid = todo.uuid,
        image = escape_html(&todo.image),
        title = escape_html(&todo.title),
    );
}

/// Escape text interpolated into markup
fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Todo;

    fn sample(api_id: i64, completed: bool) -> Todo {
        Todo::new(api_id, 1, format!("Todo {api_id}"), "3".to_string(), completed)
    }

    fn page_of<'a>(todos: &'a [Todo], next_page: Option<i64>) -> ListPage<'a> {
        ListPage {
            todos,
            stats: Stats {
                total: todos.len() as i64,
                completed: todos.iter().filter(|t| t.completed).count() as i64,
                uncompleted: todos.iter().filter(|t| !t.completed).count() as i64,
            },
            filter: TodoFilter::All,
            next_page,
        }
    }

    #[test]
    fn test_renders_one_node_per_task() {
        let todos: Vec<Todo> = (0..5).map(|i| sample(i, false)).collect();
        let html = render_list_page(&page_of(&todos, None));
        assert_eq!(html.matches("class=\"task\"").count(), 5);
        assert!(html.contains("id=\"task-container\""));
    }

    #[test]
    fn test_load_more_carries_continuation_token() {
        let todos = vec![sample(1, false)];
        let html = render_list_page(&page_of(&todos, Some(2)));
        assert!(html.contains("id=\"load-more\""));
        assert!(html.contains("data-next-page=\"2\""));
    }

    #[test]
    fn test_exhausted_list_has_no_load_more() {
        let todos = vec![sample(1, false)];
        let html = render_list_page(&page_of(&todos, None));
        assert!(!html.contains("id=\"load-more\""));
    }

    #[test]
    fn test_completed_state_class_on_check_and_title() {
        let todos = vec![sample(1, true)];
        let html = render_list_page(&page_of(&todos, None));
        assert!(html.contains("class=\"check completed\""));
        assert!(html.contains("class=\"title completed\""));
    }

    #[test]
    fn test_incomplete_task_has_no_state_class() {
        let todos = vec![sample(1, false)];
        let html = render_list_page(&page_of(&todos, None));
        assert!(html.contains("class=\"check\""));
        assert!(html.contains("class=\"title\""));
        assert!(!html.contains("completed\""));
    }

    #[test]
    fn test_checkbox_carries_todo_uuid() {
        let todos = vec![sample(1, false)];
        let html = render_list_page(&page_of(&todos, None));
        assert!(html.contains(&format!("data-todo-id=\"{}\"", todos[0].uuid)));
    }

    #[test]
    fn test_titles_are_escaped() {
        let mut todo = sample(1, false);
        todo.title = "<script>alert(1)</script>".to_string();
        let html = render_list_page(&page_of(&[todo], None));
        assert!(html.contains("&lt;script&gt;"));
        assert!(!html.contains("<script>alert"));
    }

    #[test]
    fn test_header_counts() {
        let todos = vec![sample(1, true), sample(2, false), sample(3, false)];
        let html = render_list_page(&page_of(&todos, None));
        assert!(html.contains("3 tasks"));
        assert!(html.contains("1 done"));
        assert!(html.contains("2 open"));
    }

    #[test]
    fn test_active_filter_is_marked() {
        let page = ListPage {
            todos: &[],
            stats: Stats::default(),
            filter: TodoFilter::Complete,
            next_page: None,
        };
        let html = render_list_page(&page);
        assert!(html.contains("href=\"/?filter=complete\" class=\"active\""));
    }
}
