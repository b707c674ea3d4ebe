//! Handlers and views for the blog demo.

use ham_rs_views::{Response, View};

/// Controller for individual blog posts. A fresh instance is constructed
/// per dispatch; `prepare` plays the role of loading from storage.
#[derive(Default)]
pub struct PostView {
    posts: Vec<(&'static str, &'static str)>,
}

impl View for PostView {
    fn prepare(&mut self) {
        self.posts = vec![
            ("Hello, world", "The obligatory first post."),
            ("Routing", "Nested routers and typed placeholders."),
        ];
    }

    fn get(&mut self, args: &[String]) -> Option<Response> {
        let id: usize = args.first()?.parse().ok()?;
        let (title, body) = self.posts.get(id)?;
        Some(format!("{title}\n\n{body}"))
    }

    fn post(&mut self, args: &[String]) -> Option<Response> {
        Some(format!("comment recorded on post {}", args.first()?))
    }

    fn allowed_methods(&self) -> Vec<String> {
        vec!["get".to_string(), "post".to_string(), "head".to_string()]
    }
}

/// Plain handler for the site index.
pub fn index(_args: &[String]) -> Option<Response> {
    Some("welcome to the blog demo".to_string())
}

/// Plain handler for the blog archive, taking a `<page>` pair.
pub fn archive(args: &[String]) -> Option<Response> {
    match args {
        [year, month] if !month.is_empty() => Some(format!("archive for {year}-{month}")),
        [year, _] if !year.is_empty() => Some(format!("archive for {year}")),
        _ => Some("full archive".to_string()),
    }
}
